use folio_animation::Easing;

use crate::animation::DEFAULT_REVEAL_EASING;
use crate::axis::DEFAULT_TICK_COUNT;
use crate::format::Formatters;
use crate::render::ChartTheme;
use crate::view::{DrawingArea, Padding};

pub const DEFAULT_WIDTH: f32 = 560.0;
pub const DEFAULT_HEIGHT: f32 = 220.0;
pub const DEFAULT_MAX_X_LABELS: usize = 12;

/// Options shared by every chart kind: geometry, scale overrides, formatting
/// and accessibility.
#[derive(Clone, Debug)]
pub struct ChartOptions {
    /// Unique per page; prefixes SVG element ids.
    pub id: String,
    pub width: f32,
    pub height: f32,
    pub padding: Padding,
    /// Scale with the container instead of a fixed pixel width.
    pub responsive: bool,
    pub animate: bool,
    /// Easing of the line reveal.
    pub easing: Easing,
    pub aria_label: Option<String>,
    pub min_y: Option<f32>,
    pub max_y: Option<f32>,
    pub y_ticks_count: usize,
    pub max_x_labels: usize,
    pub formatters: Formatters,
    pub theme: ChartTheme,
}

impl ChartOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            padding: Padding::default(),
            responsive: true,
            animate: true,
            easing: DEFAULT_REVEAL_EASING,
            aria_label: None,
            min_y: None,
            max_y: None,
            y_ticks_count: DEFAULT_TICK_COUNT,
            max_x_labels: DEFAULT_MAX_X_LABELS,
            formatters: Formatters::default(),
            theme: ChartTheme::default(),
        }
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.formatters = self.formatters.with_locale(locale);
        self
    }

    pub fn with_formatters(mut self, formatters: Formatters) -> Self {
        self.formatters = formatters;
        self
    }

    pub fn with_aria_label(mut self, label: impl Into<String>) -> Self {
        self.aria_label = Some(label.into());
        self
    }

    pub fn with_range(mut self, min_y: Option<f32>, max_y: Option<f32>) -> Self {
        self.min_y = min_y;
        self.max_y = max_y;
        self
    }

    pub fn with_animation(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn locale(&self) -> &str {
        self.formatters.locale()
    }

    pub fn area(&self) -> DrawingArea {
        DrawingArea::new(self.width, self.height, self.padding)
    }
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self::new("chart")
    }
}
