//! Paint context - the main drawing API

use crate::color::Color;
use crate::gradient::Gradient;
use crate::path::{Path, Point};
use crate::primitives::*;

/// Fill style for shapes
#[derive(Clone, Debug, PartialEq)]
pub enum FillStyle {
    Color(Color),
    Gradient(Gradient),
}

impl From<Color> for FillStyle {
    fn from(color: Color) -> Self {
        FillStyle::Color(color)
    }
}

impl From<Gradient> for FillStyle {
    fn from(gradient: Gradient) -> Self {
        FillStyle::Gradient(gradient)
    }
}

/// Dash pattern: `length` on, `gap` off, shifted by `offset`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dash {
    pub length: f32,
    pub gap: f32,
    pub offset: f32,
}

impl Dash {
    /// A single dash covering `visible` of a path of length `total`.
    ///
    /// `visible == total` shows the whole path, `0.0` hides it.
    pub fn reveal(total: f32, visible: f32) -> Self {
        let total = total.max(0.0);
        Self {
            length: total,
            gap: total,
            offset: (total - visible.clamp(0.0, total)).max(0.0),
        }
    }
}

/// Stroke style
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f32,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub dash: Option<Dash>,
}

impl StrokeStyle {
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            ..Default::default()
        }
    }

    pub fn rounded(mut self) -> Self {
        self.line_cap = LineCap::Round;
        self.line_join = LineJoin::Round;
        self
    }

    pub fn with_dash(mut self, dash: Dash) -> Self {
        self.dash = Some(dash);
        self
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            dash: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Horizontal text anchoring relative to the draw position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

/// Text style. The position passed with it is the text baseline.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub color: Color,
    pub anchor: TextAnchor,
    pub bold: bool,
}

impl TextStyle {
    pub fn new(size: f32) -> Self {
        Self {
            size,
            color: Color::BLACK,
            anchor: TextAnchor::Start,
            bold: false,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// A paint command for the renderer
#[derive(Clone, Debug, PartialEq)]
pub enum PaintCommand {
    FillRect {
        rect: Rect,
        radius: f32,
        style: FillStyle,
    },
    StrokeLine {
        from: Point,
        to: Point,
        style: StrokeStyle,
    },
    FillCircle {
        circle: Circle,
        style: FillStyle,
    },
    StrokeCircle {
        circle: Circle,
        style: StrokeStyle,
    },
    FillPath {
        path: Path,
        style: FillStyle,
    },
    StrokePath {
        path: Path,
        style: StrokeStyle,
    },
    DrawText {
        text: String,
        position: Point,
        style: TextStyle,
    },
    /// Start a logical group. `title` is the group's text alternative.
    BeginGroup {
        title: Option<String>,
        opacity: f32,
    },
    EndGroup,
}

/// The paint context used for custom drawing.
///
/// Records commands; a backend (see [`crate::svg`]) turns them into output.
pub struct PaintContext {
    commands: Vec<PaintCommand>,
    group_depth: usize,
}

impl PaintContext {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            group_depth: 0,
        }
    }

    /// Get all recorded commands
    pub fn commands(&self) -> &[PaintCommand] {
        &self.commands
    }

    /// Take ownership of recorded commands
    pub fn take_commands(&mut self) -> Vec<PaintCommand> {
        self.group_depth = 0;
        std::mem::take(&mut self.commands)
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    // === Shape drawing ===

    pub fn fill_rect(&mut self, rect: Rect, style: impl Into<FillStyle>) {
        self.fill_rounded_rect(rect, 0.0, style);
    }

    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, style: impl Into<FillStyle>) {
        if rect.is_empty() {
            return;
        }
        self.commands.push(PaintCommand::FillRect {
            rect,
            radius: radius.max(0.0),
            style: style.into(),
        });
    }

    pub fn stroke_line(&mut self, from: Point, to: Point, style: StrokeStyle) {
        self.commands
            .push(PaintCommand::StrokeLine { from, to, style });
    }

    pub fn fill_circle(&mut self, center: Point, radius: f32, style: impl Into<FillStyle>) {
        if radius <= 0.0 {
            return;
        }
        self.commands.push(PaintCommand::FillCircle {
            circle: Circle::new(center, radius),
            style: style.into(),
        });
    }

    pub fn stroke_circle(&mut self, center: Point, radius: f32, style: StrokeStyle) {
        if radius <= 0.0 {
            return;
        }
        self.commands.push(PaintCommand::StrokeCircle {
            circle: Circle::new(center, radius),
            style,
        });
    }

    // === Path drawing ===

    pub fn fill_path(&mut self, path: Path, style: impl Into<FillStyle>) {
        if path.is_empty() {
            return;
        }
        self.commands.push(PaintCommand::FillPath {
            path,
            style: style.into(),
        });
    }

    pub fn stroke_path(&mut self, path: Path, style: StrokeStyle) {
        if path.is_empty() {
            return;
        }
        self.commands.push(PaintCommand::StrokePath { path, style });
    }

    // === Text ===

    pub fn draw_text(&mut self, text: impl Into<String>, position: Point, style: &TextStyle) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        self.commands.push(PaintCommand::DrawText {
            text,
            position,
            style: style.clone(),
        });
    }

    // === Groups ===

    pub fn begin_group(&mut self, title: Option<String>, opacity: f32) {
        self.group_depth += 1;
        self.commands.push(PaintCommand::BeginGroup {
            title,
            opacity: opacity.clamp(0.0, 1.0),
        });
    }

    pub fn end_group(&mut self) {
        if self.group_depth == 0 {
            tracing::debug!("end_group without matching begin_group");
            return;
        }
        self.group_depth -= 1;
        self.commands.push(PaintCommand::EndGroup);
    }
}

impl Default for PaintContext {
    fn default() -> Self {
        Self::new()
    }
}
