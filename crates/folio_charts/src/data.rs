//! Chart input data and the validated input boundary.
//!
//! Everything loosely typed (JSON files, hand-written TOML) is sanitized here,
//! once, so the render pipeline only ever sees well-formed points.

use std::fmt;

use folio_paint::Color;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Category label of a point: text (`"Q1"`) or a number (`2025`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Number(f64),
    Text(String),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Text(s) => f.write_str(s),
            // Years and counts print without a trailing `.0`.
            Label::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Label::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Label::Text(s.to_string())
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Label::Text(s)
    }
}

impl From<i32> for Label {
    fn from(n: i32) -> Self {
        Label::Number(n as f64)
    }
}

impl From<f64> for Label {
    fn from(n: f64) -> Self {
        Label::Number(n)
    }
}

/// One `(label, value)` sample.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub label: Label,
    pub value: f32,
}

impl DataPoint {
    pub fn new(label: impl Into<Label>, value: f32) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// A named, optionally colored, ordered set of points.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub name: String,
    pub color: Option<Color>,
    pub points: Vec<DataPoint>,
}

impl Series {
    pub fn new(name: impl Into<String>, points: Vec<DataPoint>) -> Self {
        Self {
            name: name.into(),
            color: None,
            points,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

/// Sanitized chart input.
#[derive(Clone, Debug, PartialEq)]
pub enum ChartData {
    Points(Vec<DataPoint>),
    Series(Vec<Series>),
}

impl ChartData {
    pub fn empty() -> Self {
        ChartData::Points(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ChartData::Points(p) => p.is_empty(),
            ChartData::Series(s) => s.iter().all(|s| s.points.is_empty()),
        }
    }

    /// Convert loosely typed JSON into chart data.
    ///
    /// - an array of objects with a `points` array is a series list;
    /// - any other array is a point list;
    /// - anything else is "no data".
    ///
    /// Entries without a usable numeric `value` are dropped. A missing label
    /// falls back to the entry's index.
    pub fn from_json_value(value: &Value) -> Self {
        let Some(items) = value.as_array() else {
            debug!("chart data is not an array; treating as empty");
            return Self::empty();
        };

        let is_series = !items.is_empty()
            && items
                .iter()
                .all(|v| v.get("points").map(Value::is_array).unwrap_or(false));
        if is_series {
            let series = items
                .iter()
                .enumerate()
                .map(|(i, item)| series_from_json(i, item))
                .collect();
            return ChartData::Series(series);
        }

        ChartData::Points(points_from_json(items))
    }

    /// Point list view; series data is reduced to its first series.
    pub fn into_points(self) -> Vec<DataPoint> {
        match self {
            ChartData::Points(p) => p,
            ChartData::Series(s) => s.into_iter().next().map(|s| s.points).unwrap_or_default(),
        }
    }

    /// Series view; a point list becomes a single unnamed series.
    pub fn into_series(self) -> Vec<Series> {
        match self {
            ChartData::Points(p) if p.is_empty() => Vec::new(),
            ChartData::Points(p) => vec![Series::new("", p)],
            ChartData::Series(s) => s,
        }
    }
}

fn series_from_json(index: usize, item: &Value) -> Series {
    let name = item
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}", index + 1));
    let color = item.get("color").and_then(Value::as_str).and_then(|s| {
        let parsed = Color::parse_hex(s);
        if parsed.is_none() {
            debug!("ignoring invalid series color `{s}`");
        }
        parsed
    });
    let points = item
        .get("points")
        .and_then(Value::as_array)
        .map(|items| points_from_json(items))
        .unwrap_or_default();
    Series {
        name,
        color,
        points,
    }
}

fn points_from_json(items: &[Value]) -> Vec<DataPoint> {
    let mut out = Vec::with_capacity(items.len());
    let mut dropped = 0usize;
    for (i, item) in items.iter().enumerate() {
        let Some(value) = item.get("value").and_then(json_number) else {
            dropped += 1;
            continue;
        };
        let label = match item.get("label") {
            Some(Value::String(s)) => Label::Text(s.clone()),
            Some(Value::Number(n)) => n
                .as_f64()
                .map(Label::Number)
                .unwrap_or(Label::Number(i as f64)),
            _ => Label::Number(i as f64),
        };
        out.push(DataPoint { label, value });
    }
    if dropped > 0 {
        debug!(dropped, "dropped chart entries without a numeric value");
    }
    out
}

/// Numbers, or strings that parse as numbers; non-finite results are rejected.
fn json_number(v: &Value) -> Option<f32> {
    let n = match v {
        Value::Number(n) => n.as_f64()? as f32,
        Value::String(s) => s.trim().parse::<f32>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}
