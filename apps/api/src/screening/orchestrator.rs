//! Screening Orchestrator: validate, evaluate every résumé, rank, write the report.
//!
//! Per-file failures never abort the batch: an unreadable PDF is evaluated
//! with empty text, and a failed evaluation becomes the sentinel record.
//! Anything that fails outside the per-file loop fails the whole request.

use std::path::Path;

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use tempfile::NamedTempFile;
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::extraction::extract_or_empty;
use crate::report::write_report;
use crate::screening::models::EvaluationResult;
use crate::state::AppState;

pub const MISSING_INPUT_MESSAGE: &str = "Missing job description or resumes";

/// One uploaded résumé, spooled to a temp file under the upload directory.
/// The file is deleted once the résumé has been screened, or when dropped.
pub struct Upload {
    pub file_name: String,
    file: NamedTempFile,
}

impl Upload {
    pub fn create_in(dir: &Path, file_name: String) -> Result<Self> {
        let file = NamedTempFile::new_in(dir)
            .with_context(|| format!("failed to create spool file in {}", dir.display()))?;
        Ok(Self { file_name, file })
    }

    /// Opens an async write handle onto the spool file.
    pub fn writer(&self) -> Result<tokio::fs::File> {
        let file = self
            .file
            .reopen()
            .with_context(|| format!("failed to open spool file for {}", self.file_name))?;
        Ok(tokio::fs::File::from_std(file))
    }
}

pub struct ScreeningRequest {
    pub job_description: String,
    pub resumes: Vec<Upload>,
}

impl ScreeningRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.job_description.is_empty() || self.resumes.is_empty() {
            return Err(AppError::Validation(MISSING_INPUT_MESSAGE.to_string()));
        }
        Ok(())
    }
}

/// Runs the whole pipeline and returns one result per upload, best match first.
pub async fn run_screening(
    state: &AppState,
    request: ScreeningRequest,
) -> Result<Vec<EvaluationResult>, AppError> {
    request.validate()?;

    let ScreeningRequest {
        job_description,
        resumes,
    } = request;
    let concurrency = state.config.screen_concurrency.max(1);
    info!(
        "Screening {} resume(s), concurrency {concurrency}",
        resumes.len()
    );

    // `buffered` yields in input order, so ties keep upload order after the stable sort.
    let mut results: Vec<EvaluationResult> = stream::iter(resumes)
        .map(|upload| screen_one(state, &job_description, upload))
        .buffered(concurrency)
        .collect()
        .await;

    rank(&mut results);

    write_report(state.renderer.clone(), &results, &state.config.report_path).await?;

    Ok(results)
}

/// Stable sort, highest `match_score` first.
pub fn rank(results: &mut [EvaluationResult]) {
    results.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
}

async fn screen_one(state: &AppState, job_description: &str, upload: Upload) -> EvaluationResult {
    let Upload { file_name, file } = upload;

    let resume_text = match tokio::fs::read(file.path()).await {
        Ok(bytes) => extract_or_empty(state.extractor.clone(), &file_name, bytes).await,
        Err(e) => {
            warn!("Failed to read upload {file_name}: {e}");
            String::new()
        }
    };

    let result = match state
        .evaluator
        .evaluate(job_description, &resume_text, &file_name)
        .await
    {
        Ok(evaluation) => EvaluationResult::from_evaluation(file_name, evaluation),
        Err(e) => {
            error!("AI analysis failed for: {file_name}: {e}");
            EvaluationResult::failed(file_name)
        }
    };

    if let Err(e) = file.close() {
        warn!("Failed to remove spool file for {}: {e}", result.file_name);
    }

    result
}
