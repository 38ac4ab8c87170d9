//! Text Extractor: best-effort plain text from résumé PDFs.
//!
//! The parsing itself is delegated to `pdf-extract`. Nothing here does OCR or
//! tries to preserve layout.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("PDF text extraction failed: {0}")]
    Pdf(String),
}

/// Turns a document's bytes into plain text.
///
/// Implementations are synchronous and may be CPU-heavy; callers run them on
/// the blocking pool via `extract_or_empty`.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError>;
}

/// `pdf-extract` backed extractor.
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))
    }
}

/// Runs `extractor` on the blocking pool and never fails: an extraction error,
/// or a panic inside the parser, yields an empty string.
pub async fn extract_or_empty(
    extractor: Arc<dyn TextExtractor>,
    file_name: &str,
    bytes: Vec<u8>,
) -> String {
    match tokio::task::spawn_blocking(move || extractor.extract(&bytes)).await {
        Ok(Ok(text)) => {
            debug!("Extracted {} chars from {file_name}", text.len());
            text
        }
        Ok(Err(e)) => {
            warn!("Failed to parse PDF: {file_name}: {e}");
            String::new()
        }
        Err(e) => {
            warn!("PDF parser aborted on {file_name}: {e}");
            String::new()
        }
    }
}
