//! Drawing helpers shared by every chart kind.

use folio_paint::{
    render_svg, Color, Dash, PaintCommand, PaintContext, Point, Rect, StrokeStyle, SvgDocument,
    TextAnchor, TextStyle,
};

use crate::axis::label_width_px;
use crate::view::DrawingArea;

pub const TOOLTIP_FONT_SIZE: f32 = 12.0;
const TOOLTIP_PAD_X: f32 = 8.0;
const TOOLTIP_PAD_Y: f32 = 6.0;
const TOOLTIP_LINE_HEIGHT: f32 = 16.0;
const TOOLTIP_OFFSET: f32 = 12.0;

/// Colors for the non-data parts of a chart. Tuned for light document pages.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartTheme {
    pub background: Option<Color>,
    pub grid: Color,
    pub axis_text: Color,
    pub guide: Color,
    pub tooltip_bg: Color,
    pub tooltip_text: Color,
    pub marker_fill: Color,
    pub placeholder_text: Color,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background: None,
            grid: Color::from_hex(0xE5E7EB),
            axis_text: Color::from_hex(0x6B7280),
            guide: Color::from_hex(0x9CA3AF),
            tooltip_bg: Color::from_hex(0x111827).with_alpha(0.92),
            tooltip_text: Color::WHITE,
            marker_fill: Color::WHITE,
            placeholder_text: Color::from_hex(0x9CA3AF),
        }
    }
}

/// Output of one render pass: the recorded commands plus the SVG root
/// metadata they belong to.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedChart {
    pub document: SvgDocument,
    pub commands: Vec<PaintCommand>,
}

impl RenderedChart {
    pub fn to_svg(&self) -> String {
        render_svg(&self.document, &self.commands)
    }
}

pub fn fill_background(ctx: &mut PaintContext, width: f32, height: f32, theme: &ChartTheme) {
    if let Some(bg) = theme.background {
        ctx.fill_rect(Rect::new(0.0, 0.0, width, height), bg);
    }
}

/// Centered message shown instead of a chart when there is nothing to plot.
pub fn draw_placeholder(ctx: &mut PaintContext, width: f32, height: f32, message: &str, theme: &ChartTheme) {
    let style = TextStyle::new(13.0)
        .with_color(theme.placeholder_text)
        .with_anchor(TextAnchor::Middle);
    ctx.draw_text(message, Point::new(width * 0.5, height * 0.5 + 4.0), &style);
}

/// A data marker wrapped in a titled group so assistive technology can read
/// it. `progress` drives the staggered fade/scale-in.
pub fn draw_marker(
    ctx: &mut PaintContext,
    center: Point,
    radius: f32,
    color: Color,
    theme: &ChartTheme,
    title: String,
    progress: f32,
) {
    let progress = progress.clamp(0.0, 1.0);
    let r = radius * (0.4 + 0.6 * progress);
    ctx.begin_group(Some(title), progress);
    ctx.fill_circle(center, r, theme.marker_fill);
    ctx.stroke_circle(center, r, StrokeStyle::new(color, 2.0));
    ctx.end_group();
}

/// Invisible titled hit target, used when visible markers are turned off.
pub fn draw_marker_label(ctx: &mut PaintContext, center: Point, radius: f32, title: String) {
    ctx.begin_group(Some(title), 1.0);
    ctx.fill_circle(center, radius, Color::TRANSPARENT);
    ctx.end_group();
}

/// Emphasized marker for the selected point.
pub fn draw_focus_marker(ctx: &mut PaintContext, center: Point, radius: f32, color: Color, theme: &ChartTheme) {
    ctx.fill_circle(center, radius * 1.6, color.with_alpha(0.2));
    ctx.fill_circle(center, radius * 1.1, color);
    ctx.stroke_circle(center, radius * 1.1, StrokeStyle::new(theme.marker_fill, 2.0));
}

/// Dashed vertical guide through the selected slot.
pub fn draw_guide(ctx: &mut PaintContext, x: f32, area: &DrawingArea, theme: &ChartTheme) {
    let style = StrokeStyle::new(theme.guide, 1.0).with_dash(Dash {
        length: 4.0,
        gap: 4.0,
        offset: 0.0,
    });
    ctx.stroke_line(Point::new(x, area.top()), Point::new(x, area.bottom()), style);
}

/// Tooltip box position and content.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipLayout {
    pub rect: Rect,
    pub lines: Vec<String>,
    /// Placed left of the anchor because the right side would overflow.
    pub flipped: bool,
}

/// Place a tooltip right of `anchor`, flipping left when it would overflow
/// `surface_width`, and keep it vertically inside the surface.
pub fn layout_tooltip(anchor: Point, lines: Vec<String>, surface_width: f32, surface_height: f32) -> TooltipLayout {
    let text_w = lines
        .iter()
        .map(|l| label_width_px(l, TOOLTIP_FONT_SIZE))
        .fold(0.0_f32, f32::max);
    let width = text_w + TOOLTIP_PAD_X * 2.0;
    let height = lines.len().max(1) as f32 * TOOLTIP_LINE_HEIGHT + TOOLTIP_PAD_Y * 2.0;

    let mut x = anchor.x + TOOLTIP_OFFSET;
    let flipped = x + width > surface_width;
    if flipped {
        x = (anchor.x - TOOLTIP_OFFSET - width).max(0.0);
    }
    let y = (anchor.y - height * 0.5).clamp(0.0, (surface_height - height).max(0.0));

    TooltipLayout {
        rect: Rect::new(x, y, width, height),
        lines,
        flipped,
    }
}

pub fn draw_tooltip(ctx: &mut PaintContext, layout: &TooltipLayout, theme: &ChartTheme) {
    ctx.fill_rounded_rect(layout.rect, 4.0, theme.tooltip_bg);
    let style = TextStyle::new(TOOLTIP_FONT_SIZE).with_color(theme.tooltip_text);
    for (i, line) in layout.lines.iter().enumerate() {
        let baseline = layout.rect.y + TOOLTIP_PAD_Y + TOOLTIP_LINE_HEIGHT * (i as f32 + 0.75);
        let style = if i == 0 && layout.lines.len() > 1 {
            style.clone().bold()
        } else {
            style.clone()
        };
        ctx.draw_text(line.clone(), Point::new(layout.rect.x + TOOLTIP_PAD_X, baseline), &style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tooltip_sits_right_of_anchor() {
        let t = layout_tooltip(Point::new(100.0, 100.0), vec!["2026 • 820".into()], 560.0, 220.0);
        assert!(!t.flipped);
        assert_eq!(t.rect.x, 112.0);
    }

    #[test]
    fn tooltip_flips_near_right_edge() {
        let t = layout_tooltip(Point::new(530.0, 100.0), vec!["2027 • 1.200".into()], 560.0, 220.0);
        assert!(t.flipped);
        assert!(t.rect.right() <= 530.0);
        assert!(t.rect.x >= 0.0);
    }

    #[test]
    fn tooltip_is_clamped_vertically() {
        let t = layout_tooltip(Point::new(50.0, 2.0), vec!["a".into(), "b".into(), "c".into()], 560.0, 220.0);
        assert_eq!(t.rect.y, 0.0);
        let t = layout_tooltip(Point::new(50.0, 219.0), vec!["a".into()], 560.0, 220.0);
        assert!(t.rect.bottom() <= 220.0);
    }

    #[test]
    fn marker_is_a_titled_group() {
        let mut ctx = PaintContext::new();
        draw_marker(&mut ctx, Point::new(5.0, 5.0), 4.0, Color::BLACK, &ChartTheme::default(), "2025: 480".into(), 1.0);
        let cmds = ctx.commands();
        assert!(matches!(&cmds[0], PaintCommand::BeginGroup { title: Some(t), .. } if t == "2025: 480"));
        assert!(matches!(cmds.last(), Some(PaintCommand::EndGroup)));
    }
}
