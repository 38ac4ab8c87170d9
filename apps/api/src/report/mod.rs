// Report Generator: renders the ranked results into a PDF at a fixed path.
// Rendering is CPU-bound and runs inside tokio::task::spawn_blocking.

pub mod font_metrics;
pub mod layout;
pub mod pdf;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::screening::models::EvaluationResult;

pub use layout::ReportDocument;
pub use pdf::PrintPdfRenderer;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("PDF rendering failed: {0}")]
    Pdf(String),

    #[error("failed to write report to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("report task aborted: {0}")]
    Task(String),
}

/// Turns a report document into file bytes.
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, doc: &ReportDocument) -> Result<Vec<u8>, ReportError>;
}

/// Renders `results` and replaces whatever is at `path` with the new report.
///
/// The bytes go to a sibling temp file that is then renamed over `path`, so
/// readers see either the previous report or the new one in full.
pub async fn write_report(
    renderer: Arc<dyn DocumentRenderer>,
    results: &[EvaluationResult],
    path: &Path,
) -> Result<(), ReportError> {
    let doc = ReportDocument::from_results(results);
    let path = path.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<(), ReportError> {
        let bytes = renderer.render(&doc)?;
        persist_atomically(&path, &bytes)?;
        info!(
            "Report written to {} ({} results, {} bytes)",
            path.display(),
            doc.paragraphs.len(),
            bytes.len()
        );
        Ok(())
    })
    .await
    .map_err(|e| ReportError::Task(e.to_string()))?
}

fn persist_atomically(path: &Path, bytes: &[u8]) -> Result<(), ReportError> {
    let io_err = |source: std::io::Error| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(io_err)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(bytes).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}
