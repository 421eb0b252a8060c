use folio_i18n::Catalogs;
use folio_paint::{Color, PaintContext, Point, Rect, SvgDocument};

use crate::a11y;
use crate::animation::{AnimationFrame, ChartAnimation};
use crate::axis::{build_label_ticks, build_value_ticks, draw_label_axis, draw_value_grid, ValueTick};
use crate::chart::{ChartHandle, ChartModel, Inspection};
use crate::data::{DataPoint, Label};
use crate::interaction::Interaction;
use crate::line::DEFAULT_LINE_COLOR;
use crate::mapper::{y_for_value, PixelPoint};
use crate::normalize::{normalize, Normalized, ValueRange};
use crate::options::ChartOptions;
use crate::render::{draw_placeholder, draw_tooltip, fill_background, layout_tooltip, RenderedChart};
use crate::scale::BandScale;
use crate::view::DrawingArea;

#[derive(Clone, Debug, PartialEq)]
pub struct BarChartStyle {
    pub color: Color,
    pub negative_color: Color,
    pub bar_radius: f32,
    /// Share of each band left empty between bars, `0.0..1.0`.
    pub padding_inner: f32,
    /// Space before the first and after the last band, in band steps.
    pub padding_outer: f32,
    pub show_grid: bool,
    /// Print each value above its bar.
    pub show_values: bool,
}

impl Default for BarChartStyle {
    fn default() -> Self {
        Self {
            color: Color::from_hex(DEFAULT_LINE_COLOR),
            negative_color: Color::from_hex(0xDC2626),
            bar_radius: 3.0,
            padding_inner: 0.2,
            padding_outer: 0.1,
            show_grid: true,
            show_values: false,
        }
    }
}

/// One bar in band coordinates; grows from `from_y` towards `to_y`.
pub(crate) struct BandBar {
    pub x: f32,
    pub width: f32,
    pub from_y: f32,
    pub to_y: f32,
    pub color: Color,
    pub title: String,
}

impl BandBar {
    fn rect(&self, progress: f32) -> Rect {
        let end = self.from_y + (self.to_y - self.from_y) * progress.clamp(0.0, 1.0);
        let top = self.from_y.min(end);
        Rect::new(self.x, top, self.width, (self.from_y - end).abs())
    }

    /// Center of the bar's value edge.
    pub fn anchor(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.to_y)
    }
}

/// Titled bar groups; the selected bar is lightened.
pub(crate) fn draw_band_bars(
    ctx: &mut PaintContext,
    bars: &[BandBar],
    radius: f32,
    selected: Option<usize>,
    frame: &AnimationFrame,
) {
    for (i, bar) in bars.iter().enumerate() {
        let progress = frame.marker(i);
        let color = if selected == Some(i) {
            bar.color.lighten(0.15)
        } else {
            bar.color
        };
        ctx.begin_group(Some(bar.title.clone()), 1.0);
        let rect = bar.rect(progress);
        ctx.fill_rounded_rect(rect, radius.min(rect.width * 0.5), color);
        ctx.end_group();
    }
}

/// The range bars are drawn in: the data range widened to include the zero
/// baseline on each side that has no explicit override.
pub(crate) fn bar_range(data: ValueRange, min_y: Option<f32>, max_y: Option<f32>) -> ValueRange {
    let min_set = min_y.is_some_and(f32::is_finite);
    let max_set = max_y.is_some_and(f32::is_finite);
    ValueRange::new(
        if min_set { data.min } else { data.min.min(0.0) },
        if max_set { data.max } else { data.max.max(0.0) },
    )
}

pub(crate) fn band_scale(area: &DrawingArea, count: usize, inner: f32, outer: f32) -> BandScale {
    BandScale::new(count, area.left(), area.right(), inner, outer)
}

/// Vertical bars from a zero baseline, one band per point.
pub struct BarChartModel {
    points: Vec<DataPoint>,
    pub options: ChartOptions,
    pub style: BarChartStyle,
    interaction: Interaction,
    animation: ChartAnimation,
}

impl BarChartModel {
    pub fn new(points: Vec<DataPoint>, options: ChartOptions) -> Self {
        let clean = normalize(&points, options.min_y, options.max_y).points.len();
        Self {
            interaction: Interaction::new(clean),
            animation: ChartAnimation::for_options(clean, &options),
            points,
            options,
            style: BarChartStyle::default(),
        }
    }

    pub fn with_style(mut self, style: BarChartStyle) -> Self {
        self.style = style;
        self
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    /// Replace the data. The selection is clamped to the new bar count.
    pub fn set_points(&mut self, points: Vec<DataPoint>) {
        self.points = points;
        let clean = self.normalized().points.len();
        self.interaction.set_slot_count(clean);
        self.animation = self.animation.rebuilt(clean, &self.options);
    }

    fn normalized(&self) -> Normalized {
        let n = normalize(&self.points, self.options.min_y, self.options.max_y);
        Normalized {
            range: bar_range(n.range, self.options.min_y, self.options.max_y),
            points: n.points,
        }
    }

    fn bands(&self, count: usize) -> BandScale {
        band_scale(
            &self.options.area(),
            count,
            self.style.padding_inner,
            self.style.padding_outer,
        )
    }

    fn ticks(&self, range: &ValueRange, area: &DrawingArea) -> Vec<ValueTick> {
        let f = &self.options.formatters;
        build_value_ticks(range, area, self.options.y_ticks_count, |v| f.format_tick(v))
    }

    fn layout(&self, points: &[DataPoint], range: &ValueRange, bands: &BandScale, titles: Vec<String>) -> Vec<BandBar> {
        let area = self.options.area();
        let baseline = y_for_value(range, &area, 0.0_f32.clamp(range.min, range.max));
        points
            .iter()
            .zip(titles)
            .enumerate()
            .filter_map(|(i, (p, title))| {
                Some(BandBar {
                    x: bands.band_start(i)?,
                    width: bands.band_width(),
                    from_y: baseline,
                    to_y: y_for_value(range, &area, p.value),
                    color: if p.value < 0.0 {
                        self.style.negative_color
                    } else {
                        self.style.color
                    },
                    title,
                })
            })
            .collect()
    }
}

impl ChartModel for BarChartModel {
    fn kind(&self) -> &'static str {
        "bar"
    }

    fn options(&self) -> &ChartOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut ChartOptions {
        &mut self.options
    }

    fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    fn interaction_mut(&mut self) -> &mut Interaction {
        &mut self.interaction
    }

    fn animation(&self) -> &ChartAnimation {
        &self.animation
    }

    fn animation_mut(&mut self) -> &mut ChartAnimation {
        &mut self.animation
    }

    fn on_pointer_move(&mut self, x: f32) {
        let bands = self.bands(self.interaction.slot_count());
        self.interaction.pointer_over(bands.index_at(x));
    }

    fn render(&self, catalogs: &Catalogs) -> RenderedChart {
        let opts = &self.options;
        let area = opts.area();
        let mut doc = SvgDocument::new(opts.id.clone(), opts.width, opts.height);
        doc.responsive = opts.responsive;
        let mut ctx = PaintContext::new();
        fill_background(&mut ctx, opts.width, opts.height, &opts.theme);

        let Normalized { points, range } = self.normalized();
        if points.is_empty() {
            let message = a11y::no_data_text(opts, catalogs);
            draw_placeholder(&mut ctx, opts.width, opts.height, &message, &opts.theme);
            doc.title = message;
            return RenderedChart {
                document: doc,
                commands: ctx.take_commands(),
            };
        }

        doc.title = a11y::chart_title(opts, catalogs);
        doc.desc = a11y::series_summary(opts, catalogs, &points, &range);

        if self.style.show_grid {
            let ticks = self.ticks(&range, &area);
            draw_value_grid(&mut ctx, &ticks, &area, opts.theme.grid, opts.theme.axis_text);
        }

        let bands = self.bands(points.len());
        let titles = points
            .iter()
            .map(|p| a11y::point_text(opts, catalogs, &p.label, p.value))
            .collect();
        let bars = self.layout(&points, &range, &bands, titles);
        let frame = self.animation.frame();
        let selected = self.interaction.selected();
        draw_band_bars(&mut ctx, &bars, self.style.bar_radius, selected, &frame);

        if self.style.show_values {
            let style = folio_paint::TextStyle::new(crate::axis::TICK_FONT_SIZE)
                .with_color(opts.theme.axis_text)
                .with_anchor(folio_paint::TextAnchor::Middle);
            for (bar, p) in bars.iter().zip(&points) {
                let a = bar.anchor();
                let dy = if p.value < 0.0 { 12.0 } else { -4.0 };
                ctx.draw_text(opts.formatters.format_value(p.value), Point::new(a.x, a.y + dy), &style);
            }
        }

        let labels: Vec<&Label> = points.iter().map(|p| &p.label).collect();
        let xs: Vec<f32> = (0..points.len()).filter_map(|i| bands.center(i)).collect();
        let label_ticks = build_label_ticks(&labels, &xs, opts.max_x_labels);
        draw_label_axis(&mut ctx, &label_ticks, &area, opts.theme.axis_text);

        if let Some(i) = selected {
            if let (Some(bar), Some(p)) = (bars.get(i), points.get(i)) {
                let text = opts.formatters.tooltip_text(&p.label, p.value);
                let tooltip = layout_tooltip(bar.anchor(), vec![text], opts.width, opts.height);
                draw_tooltip(&mut ctx, &tooltip, &opts.theme);
            }
        }

        tracing::trace!(id = %opts.id, bars = bars.len(), "bar chart rendered");
        RenderedChart {
            document: doc,
            commands: ctx.take_commands(),
        }
    }

    fn inspect(&self) -> Inspection {
        let Normalized { points, range } = self.normalized();
        let area = self.options.area();
        let bands = self.bands(points.len());
        let tops = points
            .iter()
            .enumerate()
            .filter_map(|(i, p)| {
                Some(PixelPoint {
                    x: bands.center(i)?,
                    y: y_for_value(&range, &area, p.value),
                    value: p.value,
                })
            })
            .collect();
        Inspection {
            series: vec![tops],
            ticks: if points.is_empty() {
                Vec::new()
            } else {
                self.ticks(&range, &area)
            },
            paths: Vec::new(),
        }
    }
}

/// Create a bar chart behind a shared handle.
pub fn bar_chart(points: Vec<DataPoint>, options: ChartOptions) -> ChartHandle {
    ChartHandle::new(BarChartModel::new(points, options))
}

#[cfg(test)]
mod tests {
    use folio_paint::PaintCommand;

    use super::*;

    fn quarterly() -> Vec<DataPoint> {
        vec![
            DataPoint::new("Q1", 120.0),
            DataPoint::new("Q2", -40.0),
            DataPoint::new("Q3", 200.0),
        ]
    }

    #[test]
    fn range_includes_zero_baseline() {
        assert_eq!(bar_range(ValueRange::new(5.0, 9.0), None, None), ValueRange::new(0.0, 9.0));
        assert_eq!(bar_range(ValueRange::new(5.0, 9.0), Some(4.0), None), ValueRange::new(5.0, 9.0));
        assert_eq!(bar_range(ValueRange::new(-5.0, -1.0), None, None), ValueRange::new(-5.0, 0.0));
    }

    #[test]
    fn negative_bars_hang_below_baseline() {
        let model = BarChartModel::new(quarterly(), ChartOptions::new("q").with_animation(false));
        let Normalized { points, range } = model.normalized();
        let bands = model.bands(points.len());
        let bars = model.layout(&points, &range, &bands, vec![String::new(); 3]);
        assert!(bars[0].to_y < bars[0].from_y);
        assert!(bars[1].to_y > bars[1].from_y);
        assert_eq!(bars[1].color, model.style.negative_color);
    }

    #[test]
    fn pointer_selects_band() {
        let mut model = BarChartModel::new(quarterly(), ChartOptions::new("q").with_animation(false));
        let center = model.bands(3).center(2).unwrap_or_default();
        model.on_pointer_move(center);
        assert_eq!(model.interaction().selected(), Some(2));
        model.on_pointer_leave();
        assert_eq!(model.interaction().selected(), None);
    }

    #[test]
    fn set_points_shrinks_selectable_range() {
        let mut model = BarChartModel::new(quarterly(), ChartOptions::new("q").with_animation(false));
        model.set_points(vec![DataPoint::new("Q1", 5.0), DataPoint::new("Q2", f32::NAN)]);
        model.on_key(crate::interaction::ChartKey::End);
        assert_eq!(model.interaction().selected(), Some(0));
        assert_eq!(model.points().len(), 2);
    }

    #[test]
    fn bars_are_titled_groups() {
        let model = BarChartModel::new(quarterly(), ChartOptions::new("q").with_animation(false));
        let out = model.render(&Catalogs::builtin());
        let titles: Vec<&str> = out
            .commands
            .iter()
            .filter_map(|c| match c {
                PaintCommand::BeginGroup { title: Some(t), .. } => Some(t.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(titles, vec!["Q1: 120", "Q2: -40", "Q3: 200"]);
    }

    #[test]
    fn bars_grow_from_baseline() {
        let model = BarChartModel::new(quarterly(), ChartOptions::new("q"));
        let out = model.render(&Catalogs::builtin());
        assert!(!out
            .commands
            .iter()
            .any(|c| matches!(c, PaintCommand::FillRect { .. })));
    }
}
