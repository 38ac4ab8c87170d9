// Résumé screening: upload intake, per-file extraction and evaluation, ranking.
// All model calls go through llm_client via the CandidateEvaluator trait.

pub mod evaluator;
pub mod handlers;
pub mod models;
pub mod orchestrator;
pub mod prompts;
