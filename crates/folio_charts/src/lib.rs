//! folio_charts
//!
//! Accessible, locale-aware charts for Folio documents.
//!
//! Each render is a synchronous pipeline over the chart's current state:
//!
//! - **normalize**: drop non-finite values, resolve the value range
//! - **mapper**: data to pixel coordinates inside the padded drawing area
//! - **curve**: straight or Catmull-Rom smoothed paths, optional area fill
//! - **axis**: value ticks and category labels
//! - **interaction**: pointer and keyboard selection (pixel back to index)
//! - **render**: paint commands, serialized to SVG by `folio_paint`
//!
//! Broken input never fails a render; it degrades to a "no data" placeholder.

mod bar;
mod line;
mod multi_line;
mod scale;
mod sparkline;
mod waterfall;

pub mod a11y;
pub mod animation;
pub mod axis;
pub mod chart;
pub mod config;
pub mod curve;
pub mod data;
pub mod error;
pub mod format;
pub mod interaction;
pub mod lifecycle;
pub mod mapper;
pub mod normalize;
pub mod options;
pub mod render;
pub mod view;

pub use bar::{bar_chart, BarChartModel, BarChartStyle};
pub use chart::{ChartHandle, ChartModel, Inspection};
pub use config::{ChartDocument, ChartKind, ChartSpec};
pub use data::{ChartData, DataPoint, Label, Series};
pub use error::ConfigError;
pub use line::{line_chart, LineChartModel, LineChartStyle, DEFAULT_LINE_COLOR};
pub use multi_line::{
    multi_line_chart, multi_line_padding, palette_color, MultiLineChartModel, MultiLineChartStyle,
};
pub use scale::{BandScale, LinearScale};
pub use sparkline::{
    sparkline, sparkline_options, SparklineModel, SparklineStyle, SPARKLINE_HEIGHT, SPARKLINE_WIDTH,
};
pub use view::{DrawingArea, Padding};
pub use waterfall::{
    waterfall_bars, waterfall_chart, WaterfallBar, WaterfallKind, WaterfallModel, WaterfallStyle,
};

/// Common imports for chart users.
pub mod prelude {
    pub use crate::bar::{bar_chart, BarChartModel, BarChartStyle};
    pub use crate::chart::{ChartHandle, ChartModel};
    pub use crate::data::{ChartData, DataPoint, Label, Series};
    pub use crate::format::Formatters;
    pub use crate::interaction::{ChartKey, HoverSource, HoverState};
    pub use crate::lifecycle::{ChartMount, ObserverEvent, ObserverRegistry};
    pub use crate::line::{line_chart, LineChartModel, LineChartStyle};
    pub use crate::multi_line::{multi_line_chart, MultiLineChartModel, MultiLineChartStyle};
    pub use crate::options::ChartOptions;
    pub use crate::render::{ChartTheme, RenderedChart};
    pub use crate::sparkline::{sparkline, sparkline_options, SparklineModel, SparklineStyle};
    pub use crate::view::Padding;
    pub use crate::waterfall::{waterfall_chart, WaterfallModel, WaterfallStyle};
}
