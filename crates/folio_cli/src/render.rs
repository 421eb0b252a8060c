//! `folio render` and `folio inspect`

use anyhow::{Context, Result};
use folio_charts::Inspection;
use folio_i18n::Catalogs;
use serde_json::{json, Value};
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::LoadedDocument;

pub struct RenderOptions {
    /// Output directory; the document's `output` when unset
    pub out: Option<PathBuf>,
    /// Render only this chart id
    pub only: Option<String>,
}

#[derive(Debug, Default)]
pub struct RenderSummary {
    pub written: Vec<PathBuf>,
    pub skipped: usize,
}

/// Render every chart to `<out>/<id>.svg`.
///
/// Output is static: animations are finished before rendering. A chart that
/// fails to build is logged and skipped.
pub fn render_document(
    loaded: &LoadedDocument,
    catalogs: &Catalogs,
    options: &RenderOptions,
) -> Result<RenderSummary> {
    let doc = &loaded.doc;
    if !catalogs.has_locale(&doc.locale) {
        warn!(locale = %doc.locale, "no catalog for locale; falling back to English strings");
    }
    if let Some(id) = &options.only {
        doc.find(id)?;
    }

    let out_dir = options
        .out
        .clone()
        .unwrap_or_else(|| loaded.base_dir.join(&doc.output));
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let mut summary = RenderSummary::default();
    let charts = doc
        .chart
        .iter()
        .filter(|c| options.only.as_ref().map_or(true, |id| &c.id == id));
    for spec in charts {
        let handle = match spec.build(&loaded.base_dir, &doc.locale) {
            Ok(handle) => handle,
            Err(e) => {
                warn!(id = %spec.id, "skipping chart: {e}");
                summary.skipped += 1;
                continue;
            }
        };
        let Some(svg) = handle.with(|m| {
            m.animation_mut().finish();
            m.render(catalogs).to_svg()
        }) else {
            warn!(id = %spec.id, "skipping chart: model unavailable");
            summary.skipped += 1;
            continue;
        };

        let path = out_dir.join(format!("{}.svg", spec.id));
        fs::write(&path, svg).with_context(|| format!("Failed to write {}", path.display()))?;
        info!(id = %spec.id, path = %path.display(), "chart written");
        summary.written.push(path);
    }
    Ok(summary)
}

/// Derived geometry of one chart.
#[derive(Debug)]
pub struct InspectReport {
    pub id: String,
    pub kind: &'static str,
    pub inspection: Inspection,
}

pub fn inspect_chart(loaded: &LoadedDocument, id: &str) -> Result<InspectReport> {
    let spec = loaded.doc.find(id)?;
    let handle = spec
        .build(&loaded.base_dir, &loaded.doc.locale)
        .with_context(|| format!("Failed to build chart `{id}`"))?;
    let (kind, inspection) = handle
        .with(|m| (m.kind(), m.inspect()))
        .with_context(|| format!("Chart `{id}` is unavailable"))?;
    Ok(InspectReport {
        id: id.to_string(),
        kind,
        inspection,
    })
}

impl InspectReport {
    pub fn to_json(&self) -> Value {
        let series: Vec<Value> = self
            .inspection
            .series
            .iter()
            .map(|points| {
                points
                    .iter()
                    .map(|p| json!({ "x": p.x, "y": p.y, "value": p.value }))
                    .collect()
            })
            .collect();
        let ticks: Vec<Value> = self
            .inspection
            .ticks
            .iter()
            .map(|t| json!({ "value": t.value, "y": t.y, "label": t.label }))
            .collect();
        json!({
            "id": self.id,
            "kind": self.kind,
            "series": series,
            "ticks": ticks,
            "paths": self.inspection.paths,
        })
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} ({})", self.id, self.kind);
        for (i, points) in self.inspection.series.iter().enumerate() {
            let _ = writeln!(out, "series {i}:");
            for p in points {
                let _ = writeln!(out, "  x={:.2} y={:.2} value={}", p.x, p.y, p.value);
            }
        }
        if !self.inspection.ticks.is_empty() {
            let _ = writeln!(out, "ticks:");
            for t in &self.inspection.ticks {
                let _ = writeln!(out, "  y={:.2} {}", t.y, t.label);
            }
        }
        for path in &self.inspection.paths {
            let _ = writeln!(out, "path: {path}");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_document;

    fn fixture(name: &str, toml: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("folio-cli-{name}-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("folio.toml"), toml).unwrap();
        dir
    }

    const DOC: &str = r##"
output = "out"

[[chart]]
id = "revenue"
points = [ { label = 2025, value = 480 }, { label = 2026, value = 820 }, { label = 2027, value = 1200 } ]

[[chart]]
id = "broken"
color = "not-a-color"
points = [ { label = "a", value = 1 } ]
"##;

    #[test]
    fn renders_charts_and_skips_broken_ones() {
        let dir = fixture("render", DOC);
        let loaded = load_document(&dir).unwrap();
        let summary = render_document(
            &loaded,
            &Catalogs::builtin(),
            &RenderOptions {
                out: None,
                only: None,
            },
        )
        .unwrap();
        assert_eq!(summary.written, vec![dir.join("out").join("revenue.svg")]);
        assert_eq!(summary.skipped, 1);
        let svg = fs::read_to_string(&summary.written[0]).unwrap();
        assert!(svg.contains("<title id=\"revenue-title\">Chart</title>"));
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn ids_cannot_leave_the_output_dir() {
        let dir = fixture("escape", "[[chart]]\nid = \"../outside\"\npoints = []\n");
        let err = load_document(&dir).unwrap_err();
        assert!(format!("{err:#}").contains("../outside"));
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn inspect_reports_scenario_geometry() {
        let dir = fixture("inspect", DOC);
        let loaded = load_document(&dir).unwrap();
        let report = inspect_chart(&loaded, "revenue").unwrap();
        let json = report.to_json();
        assert_eq!(json["kind"], "line");
        assert_eq!(json["series"][0][1]["x"], 294.0);
        assert!(report.to_text().contains("path: M52 188"));
        assert!(inspect_chart(&loaded, "missing").is_err());
        fs::remove_dir_all(&dir).ok();
    }
}
