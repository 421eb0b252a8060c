use folio_i18n::Catalogs;
use folio_paint::svg::path_data;
use folio_paint::{Color, PaintContext, Point, Rect, SvgDocument, TextStyle};

use crate::a11y;
use crate::animation::ChartAnimation;
use crate::axis::{
    build_label_ticks, build_value_ticks, draw_label_axis, draw_value_grid, label_width_px,
    TICK_FONT_SIZE,
};
use crate::chart::{ChartHandle, ChartModel, Inspection};
use crate::curve::build_line_path;
use crate::data::{Label, Series};
use crate::interaction::Interaction;
use crate::line::{draw_line_layer, LineLayer};
use crate::mapper::{map_points_in_slots, x_for_index, PixelPoint};
use crate::normalize::{normalize_series, NormalizedSeries};
use crate::options::ChartOptions;
use crate::render::{
    draw_focus_marker, draw_guide, draw_marker, draw_marker_label, draw_placeholder, draw_tooltip,
    fill_background, layout_tooltip, RenderedChart,
};
use crate::view::Padding;

const LEGEND_SWATCH: f32 = 10.0;
const LEGEND_GAP: f32 = 16.0;

#[derive(Clone, Debug, PartialEq)]
pub struct MultiLineChartStyle {
    pub stroke_width: f32,
    pub show_points: bool,
    pub show_grid: bool,
    pub show_legend: bool,
    pub smooth: bool,
    pub point_radius: f32,
}

impl Default for MultiLineChartStyle {
    fn default() -> Self {
        Self {
            stroke_width: 2.0,
            show_points: true,
            show_grid: true,
            show_legend: true,
            smooth: false,
            point_radius: 3.5,
        }
    }
}

/// Default padding leaves room for the legend row.
pub fn multi_line_padding() -> Padding {
    Padding::new(32.0, 24.0, 32.0, 52.0)
}

/// Color of series `i` when none is given.
pub fn palette_color(i: usize) -> Color {
    // Golden-ratio hue step for decent distribution.
    let h = (i as f32 * 0.618_034) % 1.0;
    let s = 0.75;
    let v = 0.95;
    let (r, g, b) = hsv_to_rgb(h, s, v);
    Color::rgb(r, g, b)
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    let h = (h.fract() + 1.0).fract() * 6.0;
    let i = h.floor() as i32;
    let f = h - i as f32;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match i.rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// Several series in one coordinate space.
pub struct MultiLineChartModel {
    series: Vec<Series>,
    pub options: ChartOptions,
    pub style: MultiLineChartStyle,
    interaction: Interaction,
    animation: ChartAnimation,
}

impl MultiLineChartModel {
    pub fn new(series: Vec<Series>, options: ChartOptions) -> Self {
        let slots = normalize_series(&series, options.min_y, options.max_y).slot_count;
        Self {
            interaction: Interaction::new(slots),
            animation: ChartAnimation::for_options(slots, &options),
            series,
            options,
            style: MultiLineChartStyle::default(),
        }
    }

    pub fn with_style(mut self, style: MultiLineChartStyle) -> Self {
        self.style = style;
        self
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Replace the data. The selection is clamped to the new slot count.
    pub fn set_series(&mut self, series: Vec<Series>) {
        self.series = series;
        let slots = self.normalized().slot_count;
        self.interaction.set_slot_count(slots);
        self.animation = self.animation.rebuilt(slots, &self.options);
    }

    fn normalized(&self) -> NormalizedSeries {
        normalize_series(&self.series, self.options.min_y, self.options.max_y)
    }

    fn series_color(series: &Series, i: usize) -> Color {
        series.color.unwrap_or_else(|| palette_color(i))
    }

    /// Label of slot `index`, taken from the first series long enough to have it.
    fn slot_label(series: &[Series], index: usize) -> Option<&Label> {
        series
            .iter()
            .find_map(|s| s.points.get(index).map(|p| &p.label))
    }

    fn draw_legend(&self, ctx: &mut PaintContext, series: &[Series]) {
        let opts = &self.options;
        let style = TextStyle::new(TICK_FONT_SIZE).with_color(opts.theme.axis_text);
        let y = (opts.padding.top - LEGEND_SWATCH * 2.0).max(2.0);
        let mut x = opts.padding.left;
        for (i, s) in series.iter().enumerate() {
            if s.name.is_empty() {
                continue;
            }
            ctx.fill_rounded_rect(
                Rect::new(x, y, LEGEND_SWATCH, LEGEND_SWATCH),
                2.0,
                Self::series_color(s, i),
            );
            let text_x = x + LEGEND_SWATCH + 6.0;
            ctx.draw_text(s.name.clone(), Point::new(text_x, y + LEGEND_SWATCH - 1.0), &style);
            x = text_x + label_width_px(&s.name, TICK_FONT_SIZE) + LEGEND_GAP;
        }
    }

    /// A custom tooltip formatter owns the whole line: one line per series,
    /// no slot header and no series prefix.
    fn tooltip_lines(&self, series: &[Series], index: usize) -> Vec<String> {
        let f = &self.options.formatters;
        let mut lines = Vec::with_capacity(series.len() + 1);
        let at_slot = series
            .iter()
            .filter_map(|s| s.points.get(index).map(|p| (s, p)));
        if f.has_tooltip_formatter() {
            lines.extend(at_slot.map(|(_, p)| f.tooltip_text(&p.label, p.value)));
            return lines;
        }
        if let Some(label) = Self::slot_label(series, index) {
            lines.push(label.to_string());
        }
        for (s, p) in at_slot {
            let text = f.format_value(p.value);
            lines.push(if s.name.is_empty() {
                text
            } else {
                format!("{}: {text}", s.name)
            });
        }
        lines
    }
}

impl ChartModel for MultiLineChartModel {
    fn kind(&self) -> &'static str {
        "multi_line"
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

        let NormalizedSeries {
            series,
            range,
            slot_count,
        } = self.normalized();
        if slot_count == 0 {
            let message = a11y::no_data_text(opts, catalogs);
            draw_placeholder(&mut ctx, opts.width, opts.height, &message, &opts.theme);
            doc.title = message;
            return RenderedChart {
                document: doc,
                commands: ctx.take_commands(),
            };
        }

        doc.title = a11y::chart_title(opts, catalogs);
        doc.desc = a11y::multi_series_summary(opts, catalogs, series.len(), slot_count, &range);

        if style.show_grid {
            let f = &opts.formatters;
            let ticks = build_value_ticks(&range, &area, opts.y_ticks_count, |v| f.format_tick(v));
            draw_value_grid(&mut ctx, &ticks, &area, opts.theme.grid, opts.theme.axis_text);
        }
        if style.show_legend {
            self.draw_legend(&mut ctx, &series);
        }

        let frame = self.animation.frame();
        let pixels: Vec<Vec<PixelPoint>> = series
            .iter()
            .map(|s| map_points_in_slots(&s.points, &range, &area, slot_count))
            .collect();

        for (i, (s, px)) in series.iter().zip(&pixels).enumerate() {
            let color = Self::series_color(s, i);
            ctx.begin_group(None, 1.0);
            draw_line_layer(
                &mut ctx,
                &LineLayer {
                    pixels: px,
                    color,
                    stroke_width: style.stroke_width,
                    smooth: style.smooth,
                    fill: None,
                },
                &area,
                &frame,
            );
            let visible_markers = style.show_points || px.len() == 1;
            for (j, (p, dp)) in px.iter().zip(&s.points).enumerate() {
                let point_text = a11y::point_text(opts, catalogs, &dp.label, dp.value);
                let title = if s.name.is_empty() {
                    point_text
                } else {
                    format!("{}, {point_text}", s.name)
                };
                if visible_markers {
                    draw_marker(
                        &mut ctx,
                        p.point(),
                        style.point_radius,
                        color,
                        &opts.theme,
                        title,
                        frame.marker(j),
                    );
                } else {
                    draw_marker_label(&mut ctx, p.point(), style.point_radius, title);
                }
            }
            ctx.end_group();
        }

        let labels: Vec<&Label> = (0..slot_count)
            .filter_map(|i| Self::slot_label(&series, i))
            .collect();
        let xs: Vec<f32> = (0..slot_count)
            .map(|i| x_for_index(&area, slot_count, i))
            .collect();
        let label_ticks = build_label_ticks(&labels, &xs, opts.max_x_labels);
        draw_label_axis(&mut ctx, &label_ticks, &area, opts.theme.axis_text);

        if let Some(index) = self.interaction.selected() {
            let x = x_for_index(&area, slot_count, index);
            draw_guide(&mut ctx, x, &area, &opts.theme);
            let mut anchor_y = area.bottom();
            for (i, (s, px)) in series.iter().zip(&pixels).enumerate() {
                if let Some(p) = px.get(index) {
                    draw_focus_marker(&mut ctx, p.point(), style.point_radius, Self::series_color(s, i), &opts.theme);
                    anchor_y = anchor_y.min(p.y);
                }
            }
            let lines = self.tooltip_lines(&series, index);
            let tooltip = layout_tooltip(Point::new(x, anchor_y), lines, opts.width, opts.height);
            draw_tooltip(&mut ctx, &tooltip, &opts.theme);
        }

        tracing::trace!(id = %opts.id, series = series.len(), slots = slot_count, "multi-line chart rendered");
        RenderedChart {
            document: doc,
            commands: ctx.take_commands(),
        }
    }

    fn inspect(&self) -> Inspection {
        let area = self.options.area();
        let NormalizedSeries {
            series,
            range,
            slot_count,
        } = self.normalized();
        let pixels: Vec<Vec<PixelPoint>> = series
            .iter()
            .map(|s| map_points_in_slots(&s.points, &range, &area, slot_count))
            .collect();
        let paths = pixels
            .iter()
            .map(|px| build_line_path(px, self.style.smooth))
            .filter(|p| !p.is_empty())
            .map(|p| path_data(&p))
            .collect();
        let f = &self.options.formatters;
        let ticks = if slot_count == 0 {
            Vec::new()
        } else {
            build_value_ticks(&range, &area, self.options.y_ticks_count, |v| f.format_tick(v))
        };
        Inspection {
            series: pixels,
            ticks,
            paths,
        }
    }
}

/// Create a multi-line chart behind a shared handle.
pub fn multi_line_chart(series: Vec<Series>, options: ChartOptions) -> ChartHandle {
    ChartHandle::new(MultiLineChartModel::new(series, options))
}

#[cfg(test)]
mod tests {
    use folio_paint::PaintCommand;

    use super::*;
    use crate::data::DataPoint;
    use crate::interaction::{ChartKey, HoverSource};

    fn two_series() -> Vec<Series> {
        vec![
            Series::new(
                "Umsatz",
                vec![
                    DataPoint::new(2025, 480.0),
                    DataPoint::new(2026, 820.0),
                    DataPoint::new(2027, 1200.0),
                ],
            ),
            Series::new(
                "Kosten",
                vec![DataPoint::new(2025, 300.0), DataPoint::new(2026, 410.0)],
            ),
        ]
    }

    fn options() -> ChartOptions {
        ChartOptions::new("plan")
            .with_padding(multi_line_padding())
            .with_animation(false)
    }

    #[test]
    fn palette_colors_are_distinct() {
        assert_ne!(palette_color(0), palette_color(1));
        assert_ne!(palette_color(1), palette_color(2));
    }

    #[test]
    fn shorter_series_share_slot_spacing() {
        let model = MultiLineChartModel::new(two_series(), options());
        let info = model.inspect();
        assert_eq!(info.series[0][1].x, info.series[1][1].x);
        assert_eq!(info.series[1].len(), 2);
        assert_eq!(info.paths.len(), 2);
    }

    #[test]
    fn tooltip_lists_every_series_at_slot() {
        let mut model = MultiLineChartModel::new(two_series(), options());
        model.interaction_mut().select(1, HoverSource::Keyboard);
        assert_eq!(
            model.tooltip_lines(model.series(), 1),
            vec!["2026".to_string(), "Umsatz: 820".to_string(), "Kosten: 410".to_string()]
        );
        assert_eq!(
            model.tooltip_lines(model.series(), 2),
            vec!["2027".to_string(), "Umsatz: 1,200".to_string()]
        );
    }

    #[test]
    fn custom_tooltip_formatter_is_used_verbatim() {
        let formatters = crate::format::Formatters::new("de")
            .with_tooltip_formatter(|label, value| format!("{label}=>{value}"));
        let model = MultiLineChartModel::new(
            vec![Series::new("Umsatz", vec![DataPoint::new(2025, 480.0)])],
            options().with_formatters(formatters),
        );
        assert_eq!(model.tooltip_lines(model.series(), 0), vec!["2025=>480".to_string()]);
        let model = MultiLineChartModel::new(two_series(), model.options.clone());
        assert_eq!(
            model.tooltip_lines(model.series(), 1),
            vec!["2026=>820".to_string(), "2026=>410".to_string()]
        );
    }

    #[test]
    fn set_series_shrinks_selectable_range() {
        let mut model = MultiLineChartModel::new(two_series(), options());
        model.set_series(vec![Series::new("a", vec![DataPoint::new("x", 1.0)])]);
        model.on_key(ChartKey::End);
        assert_eq!(model.interaction().selected(), Some(0));
        assert_eq!(model.series().len(), 1);
    }

    #[test]
    fn legend_names_every_series() {
        let model = MultiLineChartModel::new(two_series(), options());
        let out = model.render(&Catalogs::builtin());
        let texts: Vec<&str> = out
            .commands
            .iter()
            .filter_map(|c| match c {
                PaintCommand::DrawText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert!(texts.contains(&"Umsatz"));
        assert!(texts.contains(&"Kosten"));
    }

    #[test]
    fn all_empty_series_render_placeholder() {
        let model = MultiLineChartModel::new(vec![Series::new("a", Vec::new())], options());
        let out = model.render(&Catalogs::builtin());
        assert_eq!(out.document.title, "No data available");
    }
}
