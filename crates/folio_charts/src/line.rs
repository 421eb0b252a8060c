use folio_i18n::Catalogs;
use folio_paint::svg::path_data;
use folio_paint::{Color, Dash, Gradient, PaintContext, StrokeStyle, SvgDocument};

use crate::a11y;
use crate::animation::{AnimationFrame, ChartAnimation};
use crate::axis::{build_label_ticks, build_value_ticks, draw_label_axis, draw_value_grid, ValueTick};
use crate::chart::{ChartHandle, ChartModel, Inspection};
use crate::curve::{build_area_path, build_line_path};
use crate::data::{DataPoint, Label};
use crate::interaction::Interaction;
use crate::mapper::{map_points, PixelPoint};
use crate::normalize::{normalize, Normalized, ValueRange};
use crate::options::ChartOptions;
use crate::render::{
    draw_focus_marker, draw_guide, draw_marker, draw_marker_label, draw_placeholder, draw_tooltip,
    fill_background, layout_tooltip, RenderedChart,
};
use crate::view::DrawingArea;

pub const DEFAULT_LINE_COLOR: u32 = 0x2563EB;

/// Visual styling for the line chart.
#[derive(Clone, Debug, PartialEq)]
pub struct LineChartStyle {
    pub color: Color,
    pub stroke_width: f32,
    pub show_area: bool,
    pub show_points: bool,
    pub show_grid: bool,
    pub smooth: bool,
    /// Fade the area fill towards the baseline instead of a flat tint.
    pub gradient_area: bool,
    pub point_radius: f32,
}

impl Default for LineChartStyle {
    fn default() -> Self {
        Self {
            color: Color::from_hex(DEFAULT_LINE_COLOR),
            stroke_width: 2.0,
            show_area: false,
            show_points: true,
            show_grid: true,
            smooth: false,
            gradient_area: true,
            point_radius: 4.0,
        }
    }
}

/// One stroked series with an optional fill below it.
pub(crate) struct LineLayer<'a> {
    pub pixels: &'a [PixelPoint],
    pub color: Color,
    pub stroke_width: f32,
    pub smooth: bool,
    pub fill: Option<AreaFill>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AreaFill {
    Solid,
    Gradient,
}

/// Area fill, then the (progressively revealed) stroke.
pub(crate) fn draw_line_layer(
    ctx: &mut PaintContext,
    layer: &LineLayer<'_>,
    area: &DrawingArea,
    frame: &AnimationFrame,
) {
    if layer.pixels.len() < 2 {
        return;
    }

    if let Some(fill) = layer.fill {
        let path = build_area_path(layer.pixels, layer.smooth, area.bottom());
        ctx.begin_group(None, frame.area_opacity);
        match fill {
            AreaFill::Gradient => ctx.fill_path(
                path,
                Gradient::vertical_fade(area.top(), area.bottom(), layer.color, 0.35),
            ),
            AreaFill::Solid => ctx.fill_path(path, layer.color.with_alpha(0.15)),
        }
        ctx.end_group();
    }

    let path = build_line_path(layer.pixels, layer.smooth);
    let mut stroke = StrokeStyle::new(layer.color, layer.stroke_width).rounded();
    if frame.reveal < 1.0 {
        let total = path.length();
        stroke = stroke.with_dash(Dash::reveal(total, total * frame.reveal));
    }
    ctx.stroke_path(path, stroke);
}

/// Mutable model for a single-series line chart.
pub struct LineChartModel {
    points: Vec<DataPoint>,
    pub options: ChartOptions,
    pub style: LineChartStyle,
    interaction: Interaction,
    animation: ChartAnimation,
}

impl LineChartModel {
    pub fn new(points: Vec<DataPoint>, options: ChartOptions) -> Self {
        let clean = normalize(&points, options.min_y, options.max_y).points.len();
        Self {
            interaction: Interaction::new(clean),
            animation: ChartAnimation::for_options(clean, &options),
            points,
            options,
            style: LineChartStyle::default(),
        }
    }

    pub fn with_style(mut self, style: LineChartStyle) -> Self {
        self.style = style;
        self
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    /// Replace the data. The selection is clamped to the new length.
    pub fn set_points(&mut self, points: Vec<DataPoint>) {
        self.points = points;
        let clean = self.normalized().points.len();
        self.interaction.set_slot_count(clean);
        self.animation = self.animation.rebuilt(clean, &self.options);
    }

    fn normalized(&self) -> Normalized {
        normalize(&self.points, self.options.min_y, self.options.max_y)
    }

    fn ticks(&self, range: &ValueRange, area: &DrawingArea) -> Vec<ValueTick> {
        let f = &self.options.formatters;
        build_value_ticks(range, area, self.options.y_ticks_count, |v| f.format_tick(v))
    }

    fn fill(&self) -> Option<AreaFill> {
        match (self.style.show_area, self.style.gradient_area) {
            (false, _) => None,
            (true, true) => Some(AreaFill::Gradient),
            (true, false) => Some(AreaFill::Solid),
        }
    }
}

impl ChartModel for LineChartModel {
    fn kind(&self) -> &'static str {
        "line"
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

    fn render(&self, catalogs: &Catalogs) -> RenderedChart {
        let opts = &self.options;
        let style = &self.style;
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

        let pixels = map_points(&points, &range, &area);
        let frame = self.animation.frame();

        if style.show_grid {
            let ticks = self.ticks(&range, &area);
            draw_value_grid(&mut ctx, &ticks, &area, opts.theme.grid, opts.theme.axis_text);
        }

        let layer = LineLayer {
            pixels: &pixels,
            color: style.color,
            stroke_width: style.stroke_width,
            smooth: style.smooth,
            fill: self.fill(),
        };
        draw_line_layer(&mut ctx, &layer, &area, &frame);

        // A lone point has no path, so its marker is always drawn.
        let visible_markers = style.show_points || pixels.len() == 1;
        for (i, (p, dp)) in pixels.iter().zip(&points).enumerate() {
            let title = a11y::point_text(opts, catalogs, &dp.label, dp.value);
            if visible_markers {
                draw_marker(
                    &mut ctx,
                    p.point(),
                    style.point_radius,
                    style.color,
                    &opts.theme,
                    title,
                    frame.marker(i),
                );
            } else {
                draw_marker_label(&mut ctx, p.point(), style.point_radius, title);
            }
        }

        let labels: Vec<&Label> = points.iter().map(|p| &p.label).collect();
        let xs: Vec<f32> = pixels.iter().map(|p| p.x).collect();
        let label_ticks = build_label_ticks(&labels, &xs, opts.max_x_labels);
        draw_label_axis(&mut ctx, &label_ticks, &area, opts.theme.axis_text);

        if let Some(i) = self.interaction.selected() {
            if let (Some(p), Some(dp)) = (pixels.get(i), points.get(i)) {
                draw_guide(&mut ctx, p.x, &area, &opts.theme);
                draw_focus_marker(&mut ctx, p.point(), style.point_radius, style.color, &opts.theme);
                let text = opts.formatters.tooltip_text(&dp.label, dp.value);
                let tooltip = layout_tooltip(p.point(), vec![text], opts.width, opts.height);
                draw_tooltip(&mut ctx, &tooltip, &opts.theme);
            }
        }

        tracing::trace!(id = %opts.id, points = pixels.len(), "line chart rendered");
        RenderedChart {
            document: doc,
            commands: ctx.take_commands(),
        }
    }

    fn inspect(&self) -> Inspection {
        let area = self.options.area();
        let Normalized { points, range } = self.normalized();
        let pixels = map_points(&points, &range, &area);
        let path = build_line_path(&pixels, self.style.smooth);
        Inspection {
            ticks: if points.is_empty() {
                Vec::new()
            } else {
                self.ticks(&range, &area)
            },
            paths: if path.is_empty() {
                Vec::new()
            } else {
                vec![path_data(&path)]
            },
            series: vec![pixels],
        }
    }
}

/// Create a line chart behind a shared handle.
pub fn line_chart(points: Vec<DataPoint>, options: ChartOptions) -> ChartHandle {
    ChartHandle::new(LineChartModel::new(points, options))
}

#[cfg(test)]
mod tests {
    use folio_paint::PaintCommand;

    use super::*;

    fn sample() -> Vec<DataPoint> {
        vec![
            DataPoint::new(2025, 480.0),
            DataPoint::new(2026, 820.0),
            DataPoint::new(2027, 1200.0),
        ]
    }

    fn static_options() -> ChartOptions {
        ChartOptions::new("revenue").with_animation(false)
    }

    #[test]
    fn renders_path_markers_and_labels() {
        let model = LineChartModel::new(sample(), static_options());
        let out = model.render(&Catalogs::builtin());
        let strokes = out
            .commands
            .iter()
            .filter(|c| matches!(c, PaintCommand::StrokePath { .. }))
            .count();
        assert_eq!(strokes, 1);
        let titled = out
            .commands
            .iter()
            .filter(|c| matches!(c, PaintCommand::BeginGroup { title: Some(_), .. }))
            .count();
        assert_eq!(titled, 3);
        assert_eq!(out.document.title, "Chart");
        assert!(out.document.desc.is_some());
    }

    #[test]
    fn unrevealed_stroke_is_dashed() {
        let model = LineChartModel::new(sample(), ChartOptions::new("c"));
        let out = model.render(&Catalogs::builtin());
        let dash = out.commands.iter().find_map(|c| match c {
            PaintCommand::StrokePath { style, .. } => style.dash,
            _ => None,
        });
        let dash = dash.expect("dash while hidden");
        assert_eq!(dash.offset, dash.length);
    }

    #[test]
    fn area_fill_precedes_stroke() {
        let style = LineChartStyle {
            show_area: true,
            ..LineChartStyle::default()
        };
        let model = LineChartModel::new(sample(), static_options()).with_style(style);
        let out = model.render(&Catalogs::builtin());
        let fill = out
            .commands
            .iter()
            .position(|c| matches!(c, PaintCommand::FillPath { .. }));
        let stroke = out
            .commands
            .iter()
            .position(|c| matches!(c, PaintCommand::StrokePath { .. }));
        assert!(fill.is_some());
        assert!(fill < stroke);
    }

    #[test]
    fn set_points_clamps_selection() {
        let mut model = LineChartModel::new(sample(), static_options());
        model.interaction_mut().select(2, crate::interaction::HoverSource::Keyboard);
        model.set_points(vec![DataPoint::new("a", 1.0)]);
        assert_eq!(model.interaction().selected(), Some(0));
    }

    #[test]
    fn set_points_shrinks_selectable_range() {
        let mut model = LineChartModel::new(sample(), static_options());
        model.set_points(vec![DataPoint::new("a", 1.0)]);
        model.on_key(crate::interaction::ChartKey::End);
        assert_eq!(model.interaction().selected(), Some(0));
        assert_eq!(model.points().len(), 1);
    }

    #[test]
    fn inspect_reports_geometry() {
        let model = LineChartModel::new(sample(), static_options());
        let info = model.inspect();
        assert_eq!(info.series[0].len(), 3);
        assert_eq!(info.ticks.len(), 5);
        assert!(info.paths[0].starts_with("M52 188"));
    }
}
