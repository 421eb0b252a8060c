//! Document and catalog loading

use anyhow::{Context, Result};
use folio_charts::ChartDocument;
use folio_i18n::Catalogs;
use std::fs;
use std::path::{Path, PathBuf};

pub const DOCUMENT_FILE: &str = "folio.toml";

/// A parsed document plus the directory its relative paths resolve against.
#[derive(Debug)]
pub struct LoadedDocument {
    pub doc: ChartDocument,
    pub base_dir: PathBuf,
}

/// Load a document file, or `folio.toml` inside a directory.
pub fn load_document(path: &Path) -> Result<LoadedDocument> {
    let doc_path = if path.is_dir() {
        path.join(DOCUMENT_FILE)
    } else {
        path.to_path_buf()
    };

    if !doc_path.exists() {
        anyhow::bail!("No {} found at {}", DOCUMENT_FILE, doc_path.display());
    }

    let doc = ChartDocument::load(&doc_path)
        .with_context(|| format!("Failed to load {}", doc_path.display()))?;
    let base_dir = doc_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    tracing::debug!(charts = doc.chart.len(), locale = %doc.locale, "document loaded");
    Ok(LoadedDocument { doc, base_dir })
}

/// Bundled catalogs with `files` merged on top.
pub fn load_catalogs(files: &[PathBuf]) -> Result<Catalogs> {
    let mut catalogs = Catalogs::builtin();
    for file in files {
        let locale = file
            .file_stem()
            .and_then(|s| s.to_str())
            .with_context(|| format!("Cannot derive a locale from {}", file.display()))?;
        let src = fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        catalogs
            .load_yaml(locale, &src)
            .with_context(|| format!("Failed to parse {}", file.display()))?;
    }
    Ok(catalogs)
}
