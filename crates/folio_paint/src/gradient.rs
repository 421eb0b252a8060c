//! Gradient fills

use crate::color::Color;
use crate::path::Point;

/// A gradient stop
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f32, // 0.0 to 1.0
    pub color: Color,
}

/// Linear gradient in user-space coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    pub start: Point,
    pub end: Point,
    pub stops: Vec<GradientStop>,
}

impl Gradient {
    /// Create a simple linear gradient between two colors
    pub fn linear_simple(start: Point, end: Point, from: Color, to: Color) -> Self {
        Self {
            start,
            end,
            stops: vec![
                GradientStop {
                    offset: 0.0,
                    color: from,
                },
                GradientStop {
                    offset: 1.0,
                    color: to,
                },
            ],
        }
    }

    /// Top-to-bottom fade of a single color, used under area charts.
    pub fn vertical_fade(top: f32, bottom: f32, color: Color, from_alpha: f32) -> Self {
        Self::linear_simple(
            Point::new(0.0, top),
            Point::new(0.0, bottom),
            color.with_alpha(from_alpha),
            color.with_alpha(0.0),
        )
    }
}
