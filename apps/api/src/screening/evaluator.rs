//! Candidate Evaluator: asks the model to score one résumé against a job description.
//!
//! The orchestrator holds an `Arc<dyn CandidateEvaluator>`; `LlmEvaluator` is the
//! production implementation and works against any `CompletionModel`.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::llm_client::{parse_json_reply, CompletionModel, LlmError};
use crate::screening::models::Evaluation;
use crate::screening::prompts::build_evaluation_prompt;

#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("model call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("model reply is not a valid evaluation: {0}")]
    Parse(#[from] serde_json::Error),
}

#[async_trait]
pub trait CandidateEvaluator: Send + Sync {
    /// `file_name` is only used for logging.
    async fn evaluate(
        &self,
        job_description: &str,
        resume_text: &str,
        file_name: &str,
    ) -> Result<Evaluation, EvaluationError>;
}

/// Prompts a generative model and parses its JSON reply. No retry.
pub struct LlmEvaluator {
    model: Arc<dyn CompletionModel>,
}

impl LlmEvaluator {
    pub fn new(model: Arc<dyn CompletionModel>) -> Self {
        Self { model }
    }
}

#[async_trait]
impl CandidateEvaluator for LlmEvaluator {
    async fn evaluate(
        &self,
        job_description: &str,
        resume_text: &str,
        file_name: &str,
    ) -> Result<Evaluation, EvaluationError> {
        let prompt = build_evaluation_prompt(job_description, resume_text);
        debug!("Requesting evaluation for {file_name} ({} prompt chars)", prompt.len());

        let reply = self.model.complete(&prompt).await?;
        let evaluation = parse_json_reply::<Evaluation>(&reply)?;
        Ok(evaluation)
    }
}
