//! Axum route handler for résumé screening.

use std::path::Path;

use anyhow::Context;
use axum::{
    extract::{Multipart, State},
    Json,
};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::screening::models::EvaluationResult;
use crate::screening::orchestrator::{run_screening, ScreeningRequest, Upload};
use crate::state::AppState;

const JOB_DESCRIPTION_FIELD: &str = "jobDescription";
const RESUMES_FIELD: &str = "resumes";

/// POST /screen
///
/// Multipart body: a `jobDescription` text field and one or more `resumes` files.
/// Returns one evaluation per file, best match first, and rewrites the report.
pub async fn handle_screen(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Vec<EvaluationResult>>, AppError> {
    let span = info_span!("screen", request_id = %Uuid::new_v4());
    screen(&state, &mut multipart).instrument(span).await
}

async fn screen(
    state: &AppState,
    multipart: &mut Multipart,
) -> Result<Json<Vec<EvaluationResult>>, AppError> {
    info!("Request received");
    let request = receive_request(multipart, &state.config.upload_dir).await?;
    let results = run_screening(state, request).await?;
    info!("Screening finished with {} result(s)", results.len());
    Ok(Json(results))
}

/// Reads the multipart body, streaming each résumé into its own spool file.
async fn receive_request(
    multipart: &mut Multipart,
    upload_dir: &Path,
) -> Result<ScreeningRequest, AppError> {
    let mut job_description = String::new();
    let mut resumes = Vec::new();

    while let Some(mut field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            JOB_DESCRIPTION_FIELD => job_description = field.text().await?,
            RESUMES_FIELD => {
                // Only file parts count as résumés.
                let Some(file_name) = field.file_name().map(str::to_string) else {
                    debug!("Ignoring '{RESUMES_FIELD}' part without a filename");
                    continue;
                };
                let upload = Upload::create_in(upload_dir, file_name)?;
                let mut writer = upload.writer()?;
                while let Some(chunk) = field.chunk().await? {
                    writer
                        .write_all(&chunk)
                        .await
                        .with_context(|| format!("failed to spool {}", upload.file_name))?;
                }
                writer
                    .flush()
                    .await
                    .with_context(|| format!("failed to spool {}", upload.file_name))?;
                resumes.push(upload);
            }
            other => debug!("Ignoring unexpected form field '{other}'"),
        }
    }

    Ok(ScreeningRequest {
        job_description,
        resumes,
    })
}
