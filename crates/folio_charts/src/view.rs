use folio_paint::Point;
use serde::{Deserialize, Serialize};

/// Space reserved around the plot for tick labels and axis labels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Padding {
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn uniform(v: f32) -> Self {
        Self::new(v, v, v, v)
    }

    /// Non-finite or negative sides become zero.
    pub fn sanitized(self) -> Self {
        Self::new(
            sanitize_extent(self.top),
            sanitize_extent(self.right),
            sanitize_extent(self.bottom),
            sanitize_extent(self.left),
        )
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self::new(16.0, 24.0, 32.0, 52.0)
    }
}

/// Surface size plus padding. Derived per render, never persisted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawingArea {
    pub width: f32,
    pub height: f32,
    pub padding: Padding,
}

impl DrawingArea {
    pub fn new(width: f32, height: f32, padding: Padding) -> Self {
        Self {
            width: sanitize_extent(width),
            height: sanitize_extent(height),
            padding: padding.sanitized(),
        }
    }

    pub fn left(&self) -> f32 {
        self.padding.left
    }

    pub fn top(&self) -> f32 {
        self.padding.top
    }

    pub fn inner_width(&self) -> f32 {
        (self.width - self.padding.left - self.padding.right).max(0.0)
    }

    pub fn inner_height(&self) -> f32 {
        (self.height - self.padding.top - self.padding.bottom).max(0.0)
    }

    pub fn right(&self) -> f32 {
        self.left() + self.inner_width()
    }

    pub fn bottom(&self) -> f32 {
        self.top() + self.inner_height()
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.left() + self.inner_width() * 0.5,
            self.top() + self.inner_height() * 0.5,
        )
    }

    pub fn is_degenerate(&self) -> bool {
        self.inner_width() <= 0.0 || self.inner_height() <= 0.0
    }
}

fn sanitize_extent(v: f32) -> f32 {
    if v.is_finite() {
        v.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inner_extent_excludes_padding() {
        let area = DrawingArea::new(560.0, 220.0, Padding::default());
        assert_eq!(area.inner_width(), 484.0);
        assert_eq!(area.inner_height(), 172.0);
        assert_eq!(area.right(), 536.0);
        assert_eq!(area.bottom(), 188.0);
    }

    #[test]
    fn padding_larger_than_surface_clamps_to_zero() {
        let area = DrawingArea::new(40.0, 20.0, Padding::default());
        assert_eq!(area.inner_width(), 0.0);
        assert_eq!(area.inner_height(), 0.0);
        assert!(area.is_degenerate());
    }

    #[test]
    fn hostile_padding_sides_become_zero() {
        let area = DrawingArea::new(
            560.0,
            220.0,
            Padding::new(f32::NAN, f32::INFINITY, -8.0, 52.0),
        );
        assert_eq!(area.padding, Padding::new(0.0, 0.0, 0.0, 52.0));
        assert_eq!(area.top(), 0.0);
        assert_eq!(area.inner_width(), 508.0);
        assert_eq!(area.bottom(), 220.0);
    }

    #[test]
    fn non_finite_size_is_treated_as_empty() {
        let area = DrawingArea::new(f32::NAN, f32::INFINITY, Padding::uniform(0.0));
        assert_eq!(area.width, 0.0);
        assert_eq!(area.height, 0.0);
    }
}
