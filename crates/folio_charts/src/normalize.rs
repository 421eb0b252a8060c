//! Point normalization: drop unusable points and resolve the value range.

use tracing::debug;

use crate::data::{DataPoint, Series};

/// Inclusive value range shared by every mapped point of one render pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

impl ValueRange {
    /// Build a range; inverted bounds are swapped.
    pub fn new(min: f32, max: f32) -> Self {
        if min > max {
            Self { min: max, max: min }
        } else {
            Self { min, max }
        }
    }

    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    pub fn is_flat(&self) -> bool {
        self.span() == 0.0
    }

    /// Position of `value` inside the range, in `0.0..=1.0`.
    ///
    /// A flat range maps everything to `0.5`; values outside the range sit
    /// on its edge.
    pub fn ratio(&self, value: f32) -> f32 {
        if self.is_flat() {
            return 0.5;
        }
        // f64: the span of two finite f32 values can overflow f32.
        let span = self.max as f64 - self.min as f64;
        ((value as f64 - self.min as f64) / span).clamp(0.0, 1.0) as f32
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self { min: 0.0, max: 0.0 }
    }
}

/// Clean points and the range they are drawn in.
#[derive(Clone, Debug, PartialEq)]
pub struct Normalized {
    pub points: Vec<DataPoint>,
    pub range: ValueRange,
}

/// Clean series sharing one range.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedSeries {
    pub series: Vec<Series>,
    pub range: ValueRange,
    /// Length of the longest clean series; x spacing is derived from it.
    pub slot_count: usize,
}

/// Drop points whose value is not finite. Order is preserved.
pub fn clean_points(points: &[DataPoint]) -> Vec<DataPoint> {
    let clean: Vec<DataPoint> = points
        .iter()
        .filter(|p| p.value.is_finite())
        .cloned()
        .collect();
    let dropped = points.len() - clean.len();
    if dropped > 0 {
        debug!(dropped, "dropped non-finite chart values");
    }
    clean
}

/// Resolve the drawing range from clean values and optional overrides.
///
/// Non-finite overrides are ignored. Without values and overrides the range
/// is `{0, 0}`.
pub fn resolve_range(
    values: impl IntoIterator<Item = f32>,
    min_override: Option<f32>,
    max_override: Option<f32>,
) -> ValueRange {
    let mut data_min: Option<f32> = None;
    let mut data_max: Option<f32> = None;
    for v in values {
        data_min = Some(data_min.map_or(v, |m| m.min(v)));
        data_max = Some(data_max.map_or(v, |m| m.max(v)));
    }

    let min_override = min_override.filter(|v| v.is_finite());
    let max_override = max_override.filter(|v| v.is_finite());

    let min = min_override.or(data_min).unwrap_or(0.0);
    let max = max_override.or(data_max).unwrap_or(min);
    if min > max {
        debug!(min, max, "inverted chart range; swapping bounds");
    }
    ValueRange::new(min, max)
}

/// Normalize a single point list.
pub fn normalize(
    points: &[DataPoint],
    min_override: Option<f32>,
    max_override: Option<f32>,
) -> Normalized {
    let points = clean_points(points);
    let range = resolve_range(points.iter().map(|p| p.value), min_override, max_override);
    Normalized { points, range }
}

/// Normalize several series into one shared range.
pub fn normalize_series(
    series: &[Series],
    min_override: Option<f32>,
    max_override: Option<f32>,
) -> NormalizedSeries {
    let series: Vec<Series> = series
        .iter()
        .map(|s| Series {
            name: s.name.clone(),
            color: s.color,
            points: clean_points(&s.points),
        })
        .collect();
    let range = resolve_range(
        series.iter().flat_map(|s| s.points.iter().map(|p| p.value)),
        min_override,
        max_override,
    );
    let slot_count = series.iter().map(|s| s.points.len()).max().unwrap_or(0);
    NormalizedSeries {
        series,
        range,
        slot_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(values: &[f32]) -> Vec<DataPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| DataPoint::new(i as i32, *v))
            .collect()
    }

    #[test]
    fn range_comes_from_data() {
        let n = normalize(&pts(&[480.0, 820.0, 1200.0]), None, None);
        assert_eq!(n.range, ValueRange::new(480.0, 1200.0));
        assert_eq!(n.points.len(), 3);
    }

    #[test]
    fn non_finite_values_are_dropped() {
        let n = normalize(&pts(&[1.0, f32::NAN, 3.0, f32::INFINITY]), None, None);
        assert_eq!(n.points.len(), 2);
        assert_eq!(n.points[1].value, 3.0);
        assert_eq!(n.range, ValueRange::new(1.0, 3.0));
    }

    #[test]
    fn overrides_win_and_non_finite_overrides_are_ignored() {
        let n = normalize(&pts(&[5.0, 10.0]), Some(0.0), Some(f32::NAN));
        assert_eq!(n.range, ValueRange::new(0.0, 10.0));
    }

    #[test]
    fn inverted_overrides_are_swapped() {
        let n = normalize(&pts(&[5.0]), Some(10.0), Some(0.0));
        assert_eq!(n.range, ValueRange::new(0.0, 10.0));
        assert!(n.range.max >= n.range.min);
    }

    #[test]
    fn empty_input_is_zero_range() {
        let n = normalize(&[], None, None);
        assert!(n.points.is_empty());
        assert_eq!(n.range, ValueRange::default());
    }

    #[test]
    fn flat_range_ratio_is_half() {
        let r = ValueRange::new(7.0, 7.0);
        assert_eq!(r.ratio(7.0), 0.5);
        assert_eq!(r.ratio(-100.0), 0.5);
    }

    #[test]
    fn ratio_is_clamped_to_unit_interval() {
        let r = ValueRange::new(0.0, 10.0);
        assert_eq!(r.ratio(5.0), 0.5);
        assert_eq!(r.ratio(20.0), 1.0);
        assert_eq!(r.ratio(-5.0), 0.0);
    }

    #[test]
    fn ratio_survives_span_beyond_f32() {
        let r = ValueRange::new(-f32::MAX, f32::MAX);
        assert_eq!(r.ratio(0.0), 0.5);
        assert_eq!(r.ratio(f32::MAX), 1.0);
        assert_eq!(r.ratio(-f32::MAX), 0.0);
    }

    #[test]
    fn series_share_one_range() {
        let a = Series::new("a", pts(&[1.0, 2.0]));
        let b = Series::new("b", pts(&[-3.0, 4.0, f32::NAN, 0.5]));
        let n = normalize_series(&[a, b], None, None);
        assert_eq!(n.range, ValueRange::new(-3.0, 4.0));
        assert_eq!(n.slot_count, 3);
        assert_eq!(n.series[1].points.len(), 3);
    }
}
