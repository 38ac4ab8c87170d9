use crate::screening::models::{format_score, EvaluationResult};

pub const REPORT_TITLE: &str = "Resume Screening Report";

/// Renderer-agnostic content of the screening report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub title: String,
    /// One paragraph per result, in ranking order.
    pub paragraphs: Vec<Paragraph>,
}

/// Logical lines of one result. Renderers may wrap each line further.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub lines: Vec<String>,
}

impl ReportDocument {
    pub fn from_results(results: &[EvaluationResult]) -> Self {
        Self {
            title: REPORT_TITLE.to_string(),
            paragraphs: results
                .iter()
                .enumerate()
                .map(|(i, r)| result_paragraph(i + 1, r))
                .collect(),
        }
    }
}

fn result_paragraph(ordinal: usize, r: &EvaluationResult) -> Paragraph {
    let text = |v: &Option<String>| v.clone().unwrap_or_default();
    Paragraph {
        lines: vec![
            format!("{ordinal}. File: {}", r.file_name),
            format!("Name: {}", text(&r.name)),
            format!("Email: {}", text(&r.email)),
            format!("Match Score: {}%", format_score(r.match_score)),
            format!("Matching Skills: {}", r.matching_skills.join(", ")),
            format!("Missing Skills: {}", r.missing_skills.join(", ")),
            format!("Summary: {}", text(&r.summary)),
        ],
    }
}
