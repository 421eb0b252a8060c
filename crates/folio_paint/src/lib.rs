//! Folio Paint API
//!
//! A small 2D drawing API for document graphics, similar to HTML Canvas.
//!
//! # Features
//!
//! - Path drawing (lines, cubic curves) with arc-length measurement
//! - Shape primitives (rect, rounded rect, circle)
//! - Fills and strokes with colors, linear gradients and dashes
//! - Text with anchors
//! - Accessibility groups (titles for screen readers)
//! - SVG serialization of the recorded commands

pub mod color;
pub mod context;
pub mod gradient;
pub mod path;
pub mod primitives;
pub mod svg;

pub use color::Color;
pub use context::{
    Dash, FillStyle, LineCap, LineJoin, PaintCommand, PaintContext, StrokeStyle, TextAnchor,
    TextStyle,
};
pub use gradient::{Gradient, GradientStop};
pub use path::{Path, PathBuilder, PathCommand, Point};
pub use primitives::*;
pub use svg::{render_svg, SvgDocument};
