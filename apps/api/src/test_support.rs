//! Mocks and fixtures shared by the screening and routing tests.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::io::AsyncWriteExt;

use crate::config::Config;
use crate::extraction::{ExtractError, TextExtractor};
use crate::llm_client::{CompletionModel, LlmError, DEFAULT_MODEL};
use crate::report::{DocumentRenderer, ReportDocument, ReportError};
use crate::screening::evaluator::{CandidateEvaluator, EvaluationError, LlmEvaluator};
use crate::screening::models::Evaluation;
use crate::screening::orchestrator::Upload;
use crate::state::AppState;

/// Bytes starting with this prefix fail extraction.
pub const CORRUPT_PREFIX: &[u8] = b"CORRUPT";

/// A model reply in the shape the evaluation prompt asks for.
pub fn reply(score: u32, matching: &[&str], missing: &[&str]) -> String {
    serde_json::json!({
        "name": "Test Candidate",
        "email": "candidate@example.com",
        "matching_skills": matching,
        "missing_skills": missing,
        "summary": "Generated in tests.",
        "match_score": score
    })
    .to_string()
}

/// Treats the uploaded bytes as the résumé text.
#[derive(Default)]
pub struct Utf8Extractor {
    calls: AtomicUsize,
}

impl Utf8Extractor {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TextExtractor for Utf8Extractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if bytes.starts_with(CORRUPT_PREFIX) {
            return Err(ExtractError::Pdf("invalid file header".to_string()));
        }
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

/// Replies with the first scripted answer whose marker appears in the résumé
/// section of the prompt; fails the call when none does.
pub struct ScriptedModel {
    replies: Vec<(String, String)>,
}

impl ScriptedModel {
    pub fn new(replies: &[(&str, &str)]) -> Self {
        Self {
            replies: replies
                .iter()
                .map(|(marker, reply)| (marker.to_string(), reply.to_string()))
                .collect(),
        }
    }
}

#[async_trait]
impl CompletionModel for ScriptedModel {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let resume = prompt
            .split_once("RESUME:\n")
            .and_then(|(_, rest)| rest.split_once("\n\nTasks:"))
            .map(|(resume, _)| resume)
            .unwrap_or_default();

        // Yield so bounded-concurrency runs actually interleave.
        tokio::task::yield_now().await;

        self.replies
            .iter()
            .find(|(marker, _)| !resume.is_empty() && resume.contains(marker.as_str()))
            .map(|(_, reply)| reply.clone())
            .ok_or_else(|| LlmError::Api {
                status: 503,
                message: "no scripted reply".to_string(),
            })
    }
}

/// Real `LlmEvaluator` over a `ScriptedModel`, recording what it was asked.
pub struct RecordingEvaluator {
    inner: LlmEvaluator,
    seen: Mutex<Vec<(String, String)>>,
}

impl RecordingEvaluator {
    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    /// `(file_name, resume_text)` pairs in call order.
    pub fn seen(&self) -> Vec<(String, String)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl CandidateEvaluator for RecordingEvaluator {
    async fn evaluate(
        &self,
        job_description: &str,
        resume_text: &str,
        file_name: &str,
    ) -> Result<Evaluation, EvaluationError> {
        self.seen
            .lock()
            .unwrap()
            .push((file_name.to_string(), resume_text.to_string()));
        self.inner
            .evaluate(job_description, resume_text, file_name)
            .await
    }
}

pub struct RecordingRenderer {
    fail: bool,
    paragraph_counts: Mutex<Vec<usize>>,
}

impl RecordingRenderer {
    pub fn calls(&self) -> usize {
        self.paragraph_counts.lock().unwrap().len()
    }

    pub fn last_paragraph_count(&self) -> Option<usize> {
        self.paragraph_counts.lock().unwrap().last().copied()
    }
}

impl DocumentRenderer for RecordingRenderer {
    fn render(&self, doc: &ReportDocument) -> Result<Vec<u8>, ReportError> {
        self.paragraph_counts
            .lock()
            .unwrap()
            .push(doc.paragraphs.len());
        if self.fail {
            return Err(ReportError::Pdf("renderer unavailable".to_string()));
        }
        Ok(format!("%PDF-test {} results", doc.paragraphs.len()).into_bytes())
    }
}

/// An `AppState` wired to mocks, rooted in a throwaway directory.
pub struct Harness {
    _dir: TempDir,
    pub state: AppState,
    pub extractor: Arc<Utf8Extractor>,
    pub evaluator: Arc<RecordingEvaluator>,
    pub renderer: Arc<RecordingRenderer>,
}

impl Harness {
    pub fn new(replies: &[(&str, &str)]) -> Self {
        Self::build(replies, false)
    }

    pub fn with_failing_renderer(replies: &[(&str, &str)]) -> Self {
        Self::build(replies, true)
    }

    fn build(replies: &[(&str, &str)], fail_render: bool) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            gemini_api_key: "test-key".to_string(),
            gemini_model: DEFAULT_MODEL.to_string(),
            port: 0,
            public_dir: dir.path().join("public"),
            upload_dir: dir.path().join("uploads"),
            report_path: dir.path().join("screening_report.pdf"),
            screen_concurrency: 1,
            max_upload_bytes: 1024 * 1024,
            rust_log: "debug".to_string(),
        };
        std::fs::create_dir_all(&config.public_dir).unwrap();
        std::fs::create_dir_all(&config.upload_dir).unwrap();

        let extractor = Arc::new(Utf8Extractor::default());
        let evaluator = Arc::new(RecordingEvaluator {
            inner: LlmEvaluator::new(Arc::new(ScriptedModel::new(replies))),
            seen: Mutex::new(vec![]),
        });
        let renderer = Arc::new(RecordingRenderer {
            fail: fail_render,
            paragraph_counts: Mutex::new(vec![]),
        });

        let state = AppState {
            config,
            extractor: extractor.clone(),
            evaluator: evaluator.clone(),
            renderer: renderer.clone(),
        };

        Self {
            _dir: dir,
            state,
            extractor,
            evaluator,
            renderer,
        }
    }

    /// Spools `bytes` the same way the multipart handler does.
    pub async fn upload(&self, file_name: &str, bytes: &[u8]) -> Upload {
        let upload =
            Upload::create_in(&self.state.config.upload_dir, file_name.to_string()).unwrap();
        let mut writer = upload.writer().unwrap();
        writer.write_all(bytes).await.unwrap();
        writer.flush().await.unwrap();
        upload
    }

    pub fn upload_dir_is_empty(&self) -> bool {
        dir_is_empty(&self.state.config.upload_dir)
    }
}

fn dir_is_empty(dir: &Path) -> bool {
    std::fs::read_dir(dir).unwrap().next().is_none()
}
