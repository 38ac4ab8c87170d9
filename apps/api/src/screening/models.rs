use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Summary recorded for a résumé whose evaluation could not be obtained.
pub const FAILED_SUMMARY: &str = "AI analysis failed";

/// The per-résumé record returned to the browser and printed in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub file_name: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub summary: Option<String>,
    #[serde(serialize_with = "serialize_score")]
    pub match_score: f64,
}

impl EvaluationResult {
    pub fn from_evaluation(file_name: String, evaluation: Evaluation) -> Self {
        Self {
            file_name,
            name: evaluation.name,
            email: evaluation.email,
            matching_skills: evaluation.matching_skills,
            missing_skills: evaluation.missing_skills,
            summary: evaluation.summary,
            match_score: evaluation.match_score,
        }
    }

    /// The sentinel record: empty fields and a zero score.
    pub fn failed(file_name: String) -> Self {
        Self {
            file_name,
            name: Some(String::new()),
            email: Some(String::new()),
            matching_skills: vec![],
            missing_skills: vec![],
            summary: Some(FAILED_SUMMARY.to_string()),
            match_score: 0.0,
        }
    }
}

/// The model's structured reply for one résumé.
///
/// Name, email and summary are passed through unvalidated; non-string values
/// keep their JSON text. Skill lists accept an array, a comma-separated
/// string, or anything else as empty. `match_score` must be a number or a
/// numeric string ("85", "85%"); it is not clamped.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Evaluation {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_skills")]
    pub matching_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_skills")]
    pub missing_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub summary: Option<String>,
    #[serde(deserialize_with = "deserialize_score")]
    pub match_score: f64,
}

/// Renders a score the way people read it: `90`, not `90.0`.
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 && score.abs() < 1e15 {
        format!("{}", score as i64)
    } else {
        format!("{score}")
    }
}

fn serialize_score<S: Serializer>(score: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if score.fract() == 0.0 && score.abs() < 1e15 {
        serializer.serialize_i64(*score as i64)
    } else {
        serializer.serialize_f64(*score)
    }
}

fn deserialize_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawScore {
        Number(f64),
        Text(String),
    }

    match RawScore::deserialize(deserializer)? {
        RawScore::Number(n) => Ok(n),
        RawScore::Text(s) => s
            .trim()
            .trim_end_matches('%')
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| de::Error::custom(format!("match_score is not numeric: {s:?}"))),
    }
}

fn value_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        value => Some(value_text(value)),
    })
}

fn lenient_skills<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter(|item| !item.is_null())
            .map(value_text)
            .collect(),
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|skill| !skill.is_empty())
            .map(str::to_string)
            .collect(),
        _ => vec![],
    })
}
