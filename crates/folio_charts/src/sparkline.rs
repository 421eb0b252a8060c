use folio_i18n::Catalogs;
use folio_paint::svg::path_data;
use folio_paint::{Color, PaintContext, SvgDocument};

use crate::a11y;
use crate::animation::ChartAnimation;
use crate::chart::{ChartHandle, ChartModel, Inspection};
use crate::curve::build_line_path;
use crate::data::DataPoint;
use crate::interaction::Interaction;
use crate::line::{draw_line_layer, AreaFill, LineLayer, DEFAULT_LINE_COLOR};
use crate::mapper::map_points;
use crate::normalize::{normalize, Normalized};
use crate::options::ChartOptions;
use crate::render::{
    draw_focus_marker, draw_marker, draw_marker_label, draw_placeholder, fill_background, RenderedChart,
};
use crate::view::Padding;

pub const SPARKLINE_WIDTH: f32 = 120.0;
pub const SPARKLINE_HEIGHT: f32 = 32.0;

#[derive(Clone, Debug, PartialEq)]
pub struct SparklineStyle {
    pub color: Color,
    pub stroke_width: f32,
    pub show_area: bool,
    pub smooth: bool,
    /// Mark the most recent value.
    pub show_last_point: bool,
    pub point_radius: f32,
}

impl Default for SparklineStyle {
    fn default() -> Self {
        Self {
            color: Color::from_hex(DEFAULT_LINE_COLOR),
            stroke_width: 1.5,
            show_area: true,
            smooth: true,
            show_last_point: true,
            point_radius: 2.5,
        }
    }
}

/// Compact inline options: small surface, near-zero padding.
pub fn sparkline_options(id: impl Into<String>) -> ChartOptions {
    ChartOptions::new(id)
        .with_size(SPARKLINE_WIDTH, SPARKLINE_HEIGHT)
        .with_padding(Padding::uniform(3.0))
}

/// Word-sized trend line without axes, labels or tooltip.
pub struct SparklineModel {
    points: Vec<DataPoint>,
    pub options: ChartOptions,
    pub style: SparklineStyle,
    interaction: Interaction,
    animation: ChartAnimation,
}

impl SparklineModel {
    pub fn new(points: Vec<DataPoint>, options: ChartOptions) -> Self {
        let clean = normalize(&points, options.min_y, options.max_y).points.len();
        Self {
            interaction: Interaction::new(clean),
            // Only the end-point marker animates.
            animation: ChartAnimation::for_options(1, &options),
            points,
            options,
            style: SparklineStyle::default(),
        }
    }

    pub fn with_style(mut self, style: SparklineStyle) -> Self {
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
        self.animation = self.animation.rebuilt(1, &self.options);
    }

    fn normalized(&self) -> Normalized {
        normalize(&self.points, self.options.min_y, self.options.max_y)
    }
}

impl ChartModel for SparklineModel {
    fn kind(&self) -> &'static str {
        "sparkline"
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
        draw_line_layer(
            &mut ctx,
            &LineLayer {
                pixels: &pixels,
                color: style.color,
                stroke_width: style.stroke_width,
                smooth: style.smooth,
                fill: style.show_area.then_some(AreaFill::Gradient),
            },
            &area,
            &frame,
        );

        let last = pixels.len() - 1;
        let show_last = style.show_last_point || pixels.len() == 1;
        for (i, (p, dp)) in pixels.iter().zip(&points).enumerate() {
            let title = a11y::point_text(opts, catalogs, &dp.label, dp.value);
            if i == last && show_last {
                draw_marker(&mut ctx, p.point(), style.point_radius, style.color, &opts.theme, title, frame.marker(0));
            } else {
                draw_marker_label(&mut ctx, p.point(), style.point_radius, title);
            }
        }

        if let Some(p) = self.interaction.selected().and_then(|i| pixels.get(i)) {
            draw_focus_marker(&mut ctx, p.point(), style.point_radius, style.color, &opts.theme);
        }

        RenderedChart {
            document: doc,
            commands: ctx.take_commands(),
        }
    }

    fn inspect(&self) -> Inspection {
        let Normalized { points, range } = self.normalized();
        let pixels = map_points(&points, &range, &self.options.area());
        let path = build_line_path(&pixels, self.style.smooth);
        Inspection {
            paths: if path.is_empty() {
                Vec::new()
            } else {
                vec![path_data(&path)]
            },
            series: vec![pixels],
            ticks: Vec::new(),
        }
    }
}

/// Create a sparkline behind a shared handle.
pub fn sparkline(points: Vec<DataPoint>, options: ChartOptions) -> ChartHandle {
    ChartHandle::new(SparklineModel::new(points, options))
}
