//! Data → pixel mapping.

use folio_paint::Point;

use crate::data::DataPoint;
use crate::normalize::ValueRange;
use crate::scale::LinearScale;
use crate::view::DrawingArea;

/// A point in surface coordinates, carrying its source value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelPoint {
    pub x: f32,
    pub y: f32,
    pub value: f32,
}

impl PixelPoint {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Index → x scale over `slot_count` evenly spaced slots.
///
/// `None` for fewer than two slots; a single slot sits at the center.
pub fn slot_scale(area: &DrawingArea, slot_count: usize) -> Option<LinearScale> {
    if slot_count < 2 {
        return None;
    }
    Some(LinearScale::new(
        0.0,
        (slot_count - 1) as f32,
        area.left(),
        area.left() + area.inner_width(),
    ))
}

/// Horizontal distance between neighbouring slots.
pub fn slot_step(area: &DrawingArea, slot_count: usize) -> f32 {
    area.inner_width() / slot_count.saturating_sub(1).max(1) as f32
}

pub fn x_for_index(area: &DrawingArea, slot_count: usize, index: usize) -> f32 {
    match slot_scale(area, slot_count) {
        Some(scale) => scale.map(index as f32),
        None => area.left() + area.inner_width() * 0.5,
    }
}

/// Larger values sit higher; the bottom of the plot is `range.min`.
pub fn y_for_value(range: &ValueRange, area: &DrawingArea, value: f32) -> f32 {
    let h = area.inner_height();
    area.top() + (h - range.ratio(value) * h)
}

/// Map clean points into the drawing area, one slot per point.
pub fn map_points(points: &[DataPoint], range: &ValueRange, area: &DrawingArea) -> Vec<PixelPoint> {
    map_points_in_slots(points, range, area, points.len())
}

/// Map points into the leading slots of a `slot_count`-wide grid (multi-line
/// charts whose series differ in length).
pub fn map_points_in_slots(
    points: &[DataPoint],
    range: &ValueRange,
    area: &DrawingArea,
    slot_count: usize,
) -> Vec<PixelPoint> {
    let slot_count = slot_count.max(points.len());
    points
        .iter()
        .enumerate()
        .map(|(i, p)| PixelPoint {
            x: x_for_index(area, slot_count, i),
            y: y_for_value(range, area, p.value),
            value: p.value,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Padding;

    fn area() -> DrawingArea {
        DrawingArea::new(560.0, 220.0, Padding::default())
    }

    #[test]
    fn three_points_span_the_plot() {
        let pts = vec![
            DataPoint::new(2025, 480.0),
            DataPoint::new(2026, 820.0),
            DataPoint::new(2027, 1200.0),
        ];
        let px = map_points(&pts, &ValueRange::new(480.0, 1200.0), &area());
        let xs: Vec<f32> = px.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![52.0, 294.0, 536.0]);
        assert_eq!(px[0].y, 188.0);
        assert_eq!(px[2].y, 16.0);
    }

    #[test]
    fn single_point_is_centered() {
        let px = map_points(
            &[DataPoint::new("a", 3.0)],
            &ValueRange::new(3.0, 3.0),
            &area(),
        );
        assert_eq!(px[0].x, 294.0);
        assert_eq!(px[0].y, 16.0 + 86.0);
    }

    #[test]
    fn short_series_use_leading_slots() {
        let pts = vec![DataPoint::new("a", 1.0), DataPoint::new("b", 2.0)];
        let px = map_points_in_slots(&pts, &ValueRange::new(0.0, 2.0), &area(), 3);
        assert_eq!(px[0].x, 52.0);
        assert_eq!(px[1].x, 294.0);
    }

    #[test]
    fn slot_step_matches_mapping() {
        assert_eq!(slot_step(&area(), 3), 242.0);
        assert_eq!(slot_step(&area(), 1), 484.0);
    }
}
