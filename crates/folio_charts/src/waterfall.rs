use folio_i18n::{Catalogs, Message};
use folio_paint::{Color, Dash, PaintContext, Point, StrokeStyle, SvgDocument};
use tracing::debug;

use crate::a11y;
use crate::animation::ChartAnimation;
use crate::axis::{build_label_ticks, build_value_ticks, draw_label_axis, draw_value_grid};
use crate::bar::{band_scale, bar_range, draw_band_bars, BandBar};
use crate::chart::{ChartHandle, ChartModel, Inspection};
use crate::data::{DataPoint, Label};
use crate::interaction::Interaction;
use crate::mapper::{y_for_value, PixelPoint};
use crate::normalize::{clean_points, resolve_range, ValueRange};
use crate::options::ChartOptions;
use crate::render::{draw_placeholder, draw_tooltip, fill_background, layout_tooltip, RenderedChart};
use crate::scale::BandScale;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaterfallKind {
    Increase,
    Decrease,
    Total,
}

/// A floating bar between the running total before and after one step.
#[derive(Clone, Debug, PartialEq)]
pub struct WaterfallBar {
    pub label: Label,
    pub start: f32,
    pub end: f32,
    pub kind: WaterfallKind,
}

impl WaterfallBar {
    /// The step's change (the total itself for the total bar).
    pub fn delta(&self) -> f32 {
        match self.kind {
            WaterfallKind::Total => self.end,
            _ => self.end - self.start,
        }
    }
}

/// Running totals for `steps`, optionally closed by a total bar.
///
/// Non-finite deltas are skipped. A running total that overflows ends the
/// usable data; the remaining steps are dropped.
pub fn waterfall_bars(steps: &[DataPoint], total_label: Option<Label>) -> Vec<WaterfallBar> {
    let clean = clean_points(steps);
    let mut running = 0.0_f32;
    let mut bars: Vec<WaterfallBar> = Vec::with_capacity(clean.len() + 1);
    for (i, step) in clean.iter().enumerate() {
        let end = running + step.value;
        if !end.is_finite() {
            debug!(dropped = clean.len() - i, "waterfall running total overflowed");
            break;
        }
        bars.push(WaterfallBar {
            label: step.label.clone(),
            start: running,
            end,
            kind: if step.value < 0.0 {
                WaterfallKind::Decrease
            } else {
                WaterfallKind::Increase
            },
        });
        running = end;
    }
    if let Some(label) = total_label {
        if !bars.is_empty() {
            bars.push(WaterfallBar {
                label,
                start: 0.0,
                end: running,
                kind: WaterfallKind::Total,
            });
        }
    }
    bars
}

#[derive(Clone, Debug, PartialEq)]
pub struct WaterfallStyle {
    pub increase_color: Color,
    pub decrease_color: Color,
    pub total_color: Color,
    pub connector_color: Color,
    pub show_total: bool,
    /// Label of the total bar; the localized "Total" when unset.
    pub total_label: Option<String>,
    pub bar_radius: f32,
    pub padding_inner: f32,
    pub padding_outer: f32,
    pub show_grid: bool,
}

impl Default for WaterfallStyle {
    fn default() -> Self {
        Self {
            increase_color: Color::from_hex(0x16A34A),
            decrease_color: Color::from_hex(0xDC2626),
            total_color: Color::from_hex(0x2563EB),
            connector_color: Color::from_hex(0x9CA3AF),
            show_total: true,
            total_label: None,
            bar_radius: 2.0,
            padding_inner: 0.25,
            padding_outer: 0.1,
            show_grid: true,
        }
    }
}

/// Step-by-step changes to a running total (cash bridges, budget walks).
pub struct WaterfallModel {
    /// Each point is a delta, not an absolute value.
    steps: Vec<DataPoint>,
    pub options: ChartOptions,
    /// Private: `show_total` changes the bar count.
    style: WaterfallStyle,
    interaction: Interaction,
    animation: ChartAnimation,
}

impl WaterfallModel {
    pub fn new(steps: Vec<DataPoint>, options: ChartOptions) -> Self {
        let mut model = Self {
            interaction: Interaction::new(0),
            animation: ChartAnimation::for_options(0, &options),
            steps,
            options,
            style: WaterfallStyle::default(),
        };
        model.sync_slots();
        model
    }

    pub fn with_style(mut self, style: WaterfallStyle) -> Self {
        self.style = style;
        self.sync_slots();
        self
    }

    pub fn steps(&self) -> &[DataPoint] {
        &self.steps
    }

    pub fn style(&self) -> &WaterfallStyle {
        &self.style
    }

    /// Replace the steps. The selection is clamped to the new bar count.
    pub fn set_steps(&mut self, steps: Vec<DataPoint>) {
        self.steps = steps;
        self.sync_slots();
    }

    fn sync_slots(&mut self) {
        let count = self.bars(Label::Text(String::new())).len();
        self.interaction.set_slot_count(count);
        self.animation = self.animation.rebuilt(count, &self.options);
    }

    fn bars(&self, default_total: Label) -> Vec<WaterfallBar> {
        let total = self.style.show_total.then(|| {
            self.style
                .total_label
                .clone()
                .map(Label::Text)
                .unwrap_or(default_total)
        });
        waterfall_bars(&self.steps, total)
    }

    fn range(&self, bars: &[WaterfallBar]) -> ValueRange {
        let data = resolve_range(
            bars.iter().flat_map(|b| [b.start, b.end]),
            self.options.min_y,
            self.options.max_y,
        );
        bar_range(data, self.options.min_y, self.options.max_y)
    }

    fn bands(&self, count: usize) -> BandScale {
        band_scale(
            &self.options.area(),
            count,
            self.style.padding_inner,
            self.style.padding_outer,
        )
    }

    fn color(&self, kind: WaterfallKind) -> Color {
        match kind {
            WaterfallKind::Increase => self.style.increase_color,
            WaterfallKind::Decrease => self.style.decrease_color,
            WaterfallKind::Total => self.style.total_color,
        }
    }

    fn step_text(&self, catalogs: &Catalogs, bar: &WaterfallBar) -> String {
        let opts = &self.options;
        if bar.kind == WaterfallKind::Total {
            return a11y::point_text(opts, catalogs, &bar.label, bar.end);
        }
        let f = &opts.formatters;
        let msg = Message::new("chart.waterfall_step")
            .arg("label", bar.label.to_string())
            .arg("delta", f.format_value(bar.delta()))
            .arg("total", f.format_value(bar.end));
        catalogs.format(opts.locale(), &msg)
    }
}

impl ChartModel for WaterfallModel {
    fn kind(&self) -> &'static str {
        "waterfall"
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

        let total_label = Label::Text(catalogs.text(opts.locale(), "chart.total"));
        let bars = self.bars(total_label);
        if bars.is_empty() {
            let message = a11y::no_data_text(opts, catalogs);
            draw_placeholder(&mut ctx, opts.width, opts.height, &message, &opts.theme);
            doc.title = message;
            return RenderedChart {
                document: doc,
                commands: ctx.take_commands(),
            };
        }

        let range = self.range(&bars);
        let steps: Vec<DataPoint> = bars
            .iter()
            .map(|b| DataPoint::new(b.label.clone(), b.end))
            .collect();
        doc.title = a11y::chart_title(opts, catalogs);
        doc.desc = a11y::series_summary(opts, catalogs, &steps, &range);

        if self.style.show_grid {
            let f = &opts.formatters;
            let ticks = build_value_ticks(&range, &area, opts.y_ticks_count, |v| f.format_tick(v));
            draw_value_grid(&mut ctx, &ticks, &area, opts.theme.grid, opts.theme.axis_text);
        }

        let bands = self.bands(bars.len());
        let band_bars: Vec<BandBar> = bars
            .iter()
            .enumerate()
            .filter_map(|(i, b)| {
                Some(BandBar {
                    x: bands.band_start(i)?,
                    width: bands.band_width(),
                    from_y: y_for_value(&range, &area, b.start),
                    to_y: y_for_value(&range, &area, b.end),
                    color: self.color(b.kind),
                    title: self.step_text(catalogs, b),
                })
            })
            .collect();

        let frame = self.animation.frame();
        let connector = StrokeStyle::new(self.style.connector_color, 1.0).with_dash(Dash {
            length: 3.0,
            gap: 3.0,
            offset: 0.0,
        });
        for (i, pair) in band_bars.windows(2).enumerate() {
            if frame.marker(i + 1) <= 0.0 {
                continue;
            }
            let y = pair[0].to_y;
            ctx.stroke_line(
                Point::new(pair[0].x + pair[0].width, y),
                Point::new(pair[1].x, y),
                connector.clone(),
            );
        }

        let selected = self.interaction.selected();
        draw_band_bars(&mut ctx, &band_bars, self.style.bar_radius, selected, &frame);

        let labels: Vec<&Label> = bars.iter().map(|b| &b.label).collect();
        let xs: Vec<f32> = (0..bars.len()).filter_map(|i| bands.center(i)).collect();
        let label_ticks = build_label_ticks(&labels, &xs, opts.max_x_labels);
        draw_label_axis(&mut ctx, &label_ticks, &area, opts.theme.axis_text);

        if let Some(i) = selected {
            if let (Some(bar), Some(b)) = (band_bars.get(i), bars.get(i)) {
                let text = opts.formatters.tooltip_text(&b.label, b.delta());
                let tooltip = layout_tooltip(bar.anchor(), vec![text], opts.width, opts.height);
                draw_tooltip(&mut ctx, &tooltip, &opts.theme);
            }
        }

        tracing::trace!(id = %opts.id, bars = bars.len(), "waterfall chart rendered");
        RenderedChart {
            document: doc,
            commands: ctx.take_commands(),
        }
    }

    fn inspect(&self) -> Inspection {
        let bars = self.bars(Label::Text("total".to_string()));
        let range = self.range(&bars);
        let area = self.options.area();
        let bands = self.bands(bars.len());
        let tops = bars
            .iter()
            .enumerate()
            .filter_map(|(i, b)| {
                Some(PixelPoint {
                    x: bands.center(i)?,
                    y: y_for_value(&range, &area, b.end),
                    value: b.end,
                })
            })
            .collect();
        let f = &self.options.formatters;
        Inspection {
            series: vec![tops],
            ticks: if bars.is_empty() {
                Vec::new()
            } else {
                build_value_ticks(&range, &area, self.options.y_ticks_count, |v| f.format_tick(v))
            },
            paths: Vec::new(),
        }
    }
}

/// Create a waterfall chart behind a shared handle.
pub fn waterfall_chart(steps: Vec<DataPoint>, options: ChartOptions) -> ChartHandle {
    ChartHandle::new(WaterfallModel::new(steps, options))
}
