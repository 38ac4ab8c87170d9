use std::sync::Arc;

use crate::config::Config;
use crate::extraction::TextExtractor;
use crate::report::DocumentRenderer;
use crate::screening::evaluator::CandidateEvaluator;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Each external library sits behind a capability trait so it can be swapped
/// without touching the screening pipeline.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// PDF → text. Default: `PdfTextExtractor` (pdf-extract).
    pub extractor: Arc<dyn TextExtractor>,
    /// Résumé scoring. Default: `LlmEvaluator` over the Gemini client.
    pub evaluator: Arc<dyn CandidateEvaluator>,
    /// Report document → file bytes. Default: `PrintPdfRenderer`.
    pub renderer: Arc<dyn DocumentRenderer>,
}
