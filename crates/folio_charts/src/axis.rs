use folio_paint::{Color, PaintContext, Point, StrokeStyle, TextAnchor, TextStyle};

use crate::data::Label;
use crate::normalize::ValueRange;
use crate::view::DrawingArea;

pub const DEFAULT_TICK_COUNT: usize = 4;
pub const TICK_FONT_SIZE: f32 = 10.0;

// Used to estimate label extents; the SVG backend has no text measurement.
const AVG_LABEL_CHAR_WIDTH_PX: f32 = 6.0;

/// Rough rendered width of `label` at `font_size`.
pub fn label_width_px(label: &str, font_size: f32) -> f32 {
    let w = label.chars().count() as f32 * AVG_LABEL_CHAR_WIDTH_PX * (font_size / TICK_FONT_SIZE);
    w.max(10.0)
}

/// A horizontal gridline position with its value label.
#[derive(Clone, Debug, PartialEq)]
pub struct ValueTick {
    pub value: f32,
    pub y: f32,
    pub label: String,
}

/// A category label under one x slot.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelTick {
    pub index: usize,
    pub x: f32,
    pub label: String,
}

/// `tick_count + 1` evenly spaced ticks from `range.max` (top) down to
/// `range.min` (bottom), both inclusive.
pub fn build_value_ticks<F>(
    range: &ValueRange,
    area: &DrawingArea,
    tick_count: usize,
    formatter: F,
) -> Vec<ValueTick>
where
    F: Fn(f32) -> String,
{
    let n = tick_count.max(1);
    (0..=n)
        .map(|i| {
            let ratio = i as f32 / n as f32;
            let value = range.min + range.span() * (1.0 - ratio);
            ValueTick {
                value,
                y: area.top() + area.inner_height() * ratio,
                label: formatter(value),
            }
        })
        .collect()
}

/// Category labels at the given slot positions, thinned to at most
/// `max_labels` by stepping. The first label is always kept.
pub fn build_label_ticks(labels: &[&Label], xs: &[f32], max_labels: usize) -> Vec<LabelTick> {
    let n = labels.len().min(xs.len());
    if n == 0 || max_labels == 0 {
        return Vec::new();
    }
    let step = n.div_ceil(max_labels).max(1);
    (0..n)
        .step_by(step)
        .map(|i| LabelTick {
            index: i,
            x: xs[i],
            label: labels[i].to_string(),
        })
        .collect()
}

/// Horizontal gridlines with right-aligned value labels in the left padding.
pub fn draw_value_grid(
    ctx: &mut PaintContext,
    ticks: &[ValueTick],
    area: &DrawingArea,
    grid_color: Color,
    text_color: Color,
) {
    if area.inner_width() <= 0.0 {
        return;
    }
    let line = StrokeStyle::new(grid_color, 1.0);
    let style = TextStyle::new(TICK_FONT_SIZE)
        .with_color(text_color)
        .with_anchor(TextAnchor::End);
    for t in ticks {
        ctx.stroke_line(
            Point::new(area.left(), t.y),
            Point::new(area.right(), t.y),
            line.clone(),
        );
        ctx.draw_text(
            t.label.clone(),
            Point::new(area.left() - 8.0, t.y + TICK_FONT_SIZE * 0.35),
            &style,
        );
    }
}

/// Centered category labels below the plot.
pub fn draw_label_axis(
    ctx: &mut PaintContext,
    ticks: &[LabelTick],
    area: &DrawingArea,
    text_color: Color,
) {
    let style = TextStyle::new(TICK_FONT_SIZE)
        .with_color(text_color)
        .with_anchor(TextAnchor::Middle);
    let y = area.bottom() + TICK_FONT_SIZE + 8.0;
    for t in ticks {
        ctx.draw_text(t.label.clone(), Point::new(t.x, y), &style);
    }
}
