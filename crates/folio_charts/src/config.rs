//! Chart document configuration (`folio.toml`)
//!
//! A document lists the charts of one page. Each entry carries its data inline
//! or points at a JSON file; both pass through [`ChartData::from_json_value`].

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use folio_animation::Easing;
use folio_i18n::DEFAULT_LOCALE;
use folio_paint::Color;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::bar::{BarChartModel, BarChartStyle};
use crate::chart::ChartHandle;
use crate::data::ChartData;
use crate::error::{ConfigError, Result};
use crate::format::Formatters;
use crate::line::{LineChartModel, LineChartStyle};
use crate::multi_line::{multi_line_padding, MultiLineChartModel, MultiLineChartStyle};
use crate::options::ChartOptions;
use crate::sparkline::{sparkline_options, SparklineModel, SparklineStyle};
use crate::view::Padding;
use crate::waterfall::{WaterfallModel, WaterfallStyle};

/// Top-level chart document
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChartDocument {
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Output directory for rendered charts
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default)]
    pub chart: Vec<ChartSpec>,
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

fn default_output() -> String {
    "charts".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    #[default]
    Line,
    MultiLine,
    Sparkline,
    Bar,
    Waterfall,
}

/// One `[[chart]]` entry.
///
/// Appearance fields left unset fall back to the chart kind's own defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ChartSpec {
    pub id: String,
    #[serde(default)]
    pub kind: ChartKind,
    /// Accessible title
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
    #[serde(default)]
    pub padding: Option<Padding>,
    #[serde(default = "default_true")]
    pub responsive: bool,
    #[serde(default = "default_true")]
    pub animate: bool,
    /// Line reveal easing, e.g. `"linear"` or `{ cubic-bezier = [0.4, 0, 0.2, 1] }`
    #[serde(default)]
    pub easing: Option<Easing>,
    /// Overrides the document locale for this chart
    #[serde(default)]
    pub locale: Option<String>,

    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub stroke_width: Option<f32>,
    #[serde(default)]
    pub show_area: Option<bool>,
    #[serde(default)]
    pub show_points: Option<bool>,
    #[serde(default)]
    pub show_grid: Option<bool>,
    #[serde(default)]
    pub smooth: Option<bool>,
    #[serde(default)]
    pub gradient_area: Option<bool>,
    #[serde(default)]
    pub show_values: Option<bool>,

    #[serde(default)]
    pub min_y: Option<f32>,
    #[serde(default)]
    pub max_y: Option<f32>,
    #[serde(default)]
    pub y_ticks_count: Option<usize>,
    #[serde(default)]
    pub compact_ticks: bool,
    /// Text around every formatted value, e.g. `" €"`
    #[serde(default)]
    pub value_prefix: Option<String>,
    #[serde(default)]
    pub value_suffix: Option<String>,

    /// Inline point list
    #[serde(default)]
    pub points: Option<Value>,
    /// Inline series list
    #[serde(default)]
    pub series: Option<Value>,
    /// JSON data file, relative to the document
    #[serde(default)]
    pub data: Option<PathBuf>,

    #[serde(default)]
    pub show_total: Option<bool>,
    #[serde(default)]
    pub total_label: Option<String>,
}

impl ChartDocument {
    /// Parse and validate a document.
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let doc: ChartDocument = toml::from_str(src)?;
        doc.validate()?;
        Ok(doc)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let src = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&src)
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for spec in &self.chart {
            if spec.id.trim().is_empty() {
                return Err(ConfigError::EmptyId);
            }
            if !is_valid_id(&spec.id) {
                return Err(ConfigError::InvalidId(spec.id.clone()));
            }
            if !seen.insert(spec.id.as_str()) {
                return Err(ConfigError::DuplicateId(spec.id.clone()));
            }
        }
        Ok(())
    }

    pub fn find(&self, id: &str) -> Result<&ChartSpec> {
        self.chart
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| ConfigError::UnknownChart(id.to_string()))
    }
}

fn is_valid_id(id: &str) -> bool {
    id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

impl ChartSpec {
    pub fn locale<'a>(&'a self, document_locale: &'a str) -> &'a str {
        self.locale.as_deref().unwrap_or(document_locale)
    }

    /// Resolve the chart's data: file first, then inline series, then points.
    pub fn load_data(&self, base_dir: &Path) -> Result<ChartData> {
        if let Some(rel) = &self.data {
            let path = base_dir.join(rel);
            let src = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
                path: path.clone(),
                source,
            })?;
            let value: Value =
                serde_json::from_str(&src).map_err(|source| ConfigError::Json { path, source })?;
            return Ok(ChartData::from_json_value(&value));
        }
        let inline = self.series.as_ref().or(self.points.as_ref());
        Ok(inline.map(ChartData::from_json_value).unwrap_or_else(|| {
            debug!(id = %self.id, "chart has no data");
            ChartData::empty()
        }))
    }

    fn color(&self) -> Result<Option<Color>> {
        self.color
            .as_deref()
            .map(|s| {
                Color::parse_hex(s).ok_or_else(|| ConfigError::InvalidColor {
                    chart: self.id.clone(),
                    value: s.to_string(),
                })
            })
            .transpose()
    }

    fn formatters(&self, locale: &str) -> Formatters {
        let formatters = Formatters::new(locale).with_compact_ticks(self.compact_ticks);
        if self.value_prefix.is_none() && self.value_suffix.is_none() {
            return formatters;
        }
        let number = formatters.number_format();
        let prefix = self.value_prefix.clone().unwrap_or_default();
        let suffix = self.value_suffix.clone().unwrap_or_default();
        formatters.with_value_formatter(move |v| format!("{prefix}{}{suffix}", number.format(v as f64)))
    }

    fn options(&self, locale: &str) -> ChartOptions {
        let mut options = match self.kind {
            ChartKind::Sparkline => sparkline_options(self.id.clone()),
            ChartKind::MultiLine => ChartOptions::new(self.id.clone()).with_padding(multi_line_padding()),
            _ => ChartOptions::new(self.id.clone()),
        };
        options.width = self.width.unwrap_or(options.width);
        options.height = self.height.unwrap_or(options.height);
        if let Some(padding) = self.padding {
            options.padding = padding;
        }
        options.responsive = self.responsive;
        options.animate = self.animate;
        if let Some(easing) = self.easing {
            options.easing = easing;
        }
        options.aria_label = self.title.clone();
        options.min_y = self.min_y;
        options.max_y = self.max_y;
        if let Some(count) = self.y_ticks_count {
            options.y_ticks_count = count;
        }
        options.formatters = self.formatters(locale);
        options
    }

    /// Build the chart model described by this entry.
    pub fn build(&self, base_dir: &Path, document_locale: &str) -> Result<ChartHandle> {
        let locale = self.locale(document_locale);
        let options = self.options(locale);
        let data = self.load_data(base_dir)?;
        let color = self.color()?;

        let handle = match self.kind {
            ChartKind::Line => {
                let d = LineChartStyle::default();
                let style = LineChartStyle {
                    color: color.unwrap_or(d.color),
                    stroke_width: self.stroke_width.unwrap_or(d.stroke_width),
                    show_area: self.show_area.unwrap_or(d.show_area),
                    show_points: self.show_points.unwrap_or(d.show_points),
                    show_grid: self.show_grid.unwrap_or(d.show_grid),
                    smooth: self.smooth.unwrap_or(d.smooth),
                    gradient_area: self.gradient_area.unwrap_or(d.gradient_area),
                    ..d
                };
                ChartHandle::new(LineChartModel::new(data.into_points(), options).with_style(style))
            }
            ChartKind::MultiLine => {
                let d = MultiLineChartStyle::default();
                let style = MultiLineChartStyle {
                    stroke_width: self.stroke_width.unwrap_or(d.stroke_width),
                    show_points: self.show_points.unwrap_or(d.show_points),
                    show_grid: self.show_grid.unwrap_or(d.show_grid),
                    smooth: self.smooth.unwrap_or(d.smooth),
                    ..d
                };
                ChartHandle::new(MultiLineChartModel::new(data.into_series(), options).with_style(style))
            }
            ChartKind::Sparkline => {
                let d = SparklineStyle::default();
                let style = SparklineStyle {
                    color: color.unwrap_or(d.color),
                    stroke_width: self.stroke_width.unwrap_or(d.stroke_width),
                    show_area: self.show_area.unwrap_or(d.show_area),
                    smooth: self.smooth.unwrap_or(d.smooth),
                    ..d
                };
                ChartHandle::new(SparklineModel::new(data.into_points(), options).with_style(style))
            }
            ChartKind::Bar => {
                let d = BarChartStyle::default();
                let style = BarChartStyle {
                    color: color.unwrap_or(d.color),
                    show_grid: self.show_grid.unwrap_or(d.show_grid),
                    show_values: self.show_values.unwrap_or(d.show_values),
                    ..d
                };
                ChartHandle::new(BarChartModel::new(data.into_points(), options).with_style(style))
            }
            ChartKind::Waterfall => {
                let d = WaterfallStyle::default();
                let style = WaterfallStyle {
                    show_grid: self.show_grid.unwrap_or(d.show_grid),
                    show_total: self.show_total.unwrap_or(d.show_total),
                    total_label: self.total_label.clone(),
                    ..d
                };
                ChartHandle::new(WaterfallModel::new(data.into_points(), options).with_style(style))
            }
        };
        debug!(id = %self.id, kind = ?self.kind, locale, "chart built");
        Ok(handle)
    }
}
