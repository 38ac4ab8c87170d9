use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_MODEL;

/// Application configuration loaded from environment variables.
/// Startup fails if `GEMINI_API_KEY` is missing; everything else has a default.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub port: u16,
    /// Directory holding the browser assets (index.html, script.js, style.css).
    pub public_dir: PathBuf,
    /// Scratch directory for uploaded résumés while a request is in flight.
    pub upload_dir: PathBuf,
    /// Where the PDF report is written. Overwritten by every screening run.
    pub report_path: PathBuf,
    /// Max résumés evaluated at once within a single request. 1 = sequential.
    pub screen_concurrency: usize,
    pub max_upload_bytes: usize,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            gemini_model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            port: parse_env("PORT", 3000)?,
            public_dir: path_env("PUBLIC_DIR", "apps/web"),
            upload_dir: path_env("UPLOAD_DIR", "uploads"),
            report_path: path_env("REPORT_PATH", "screening_report.pdf"),
            screen_concurrency: parse_env::<usize>("SCREEN_CONCURRENCY", 1)?.max(1),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 25 * 1024 * 1024)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn path_env(key: &str, default: &str) -> PathBuf {
    std::env::var_os(key)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    parse_value(key, std::env::var(key).ok(), default)
}

fn parse_value<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{value}'")),
        None => Ok(default),
    }
}
