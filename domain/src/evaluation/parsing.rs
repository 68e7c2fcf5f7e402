//! Specialist response parsing.
//!
//! Agents are asked to answer with a JSON object, but LLMs wrap it in prose
//! or code fences. These functions locate the object, read it leniently and
//! report anything that does not line up with the decision's options.
//!
//! Missing scores are reported, never invented: the disagreement detector
//! skips pairs where one side has no score, so the issue list is the only
//! place a gap becomes visible.

use super::entities::{AgentEvaluation, MAX_SCORE, MIN_SCORE, OptionScore};
use crate::core::agent_type::AgentType;
use crate::core::error::DomainError;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;

/// Return the slice from the first `{` to the last `}` (inclusive).
pub fn extract_json_object(response: &str) -> Option<&str> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    (end > start).then(|| &response[start..=end])
}

/// Something about an agent's scores that does not match the decision
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationIssue {
    /// The agent gave no score for a decision option
    MissingOption(String),
    /// The agent scored an option the decision does not have
    UnknownOption(String),
    /// The agent scored the same option more than once (first entry kept)
    DuplicateOption(String),
    /// The score was outside 1-10 and has been clamped
    ScoreOutOfRange { option_id: String, raw: f64 },
    /// The score was absent or not a number (entry dropped)
    InvalidScore(String),
}

impl std::fmt::Display for EvaluationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvaluationIssue::MissingOption(id) => write!(f, "no score for option '{}'", id),
            EvaluationIssue::UnknownOption(id) => write!(f, "score for unknown option '{}'", id),
            EvaluationIssue::DuplicateOption(id) => {
                write!(f, "duplicate score for option '{}'", id)
            }
            EvaluationIssue::ScoreOutOfRange { option_id, raw } => {
                write!(f, "score {} for option '{}' clamped to 1-10", raw, option_id)
            }
            EvaluationIssue::InvalidScore(id) => write!(f, "invalid score for option '{}'", id),
        }
    }
}

/// A parsed evaluation together with any boundary issues found
#[derive(Debug, Clone)]
pub struct ParsedEvaluation {
    pub evaluation: AgentEvaluation,
    pub issues: Vec<EvaluationIssue>,
}

impl ParsedEvaluation {
    pub fn is_complete(&self) -> bool {
        !self
            .issues
            .iter()
            .any(|i| matches!(i, EvaluationIssue::MissingOption(_)))
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEvaluation {
    #[serde(default)]
    option_scores: Vec<RawOptionScore>,
    #[serde(default)]
    key_factors: Vec<Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOptionScore {
    #[serde(default)]
    option_id: String,
    #[serde(default)]
    score: Value,
    #[serde(default)]
    reasoning: String,
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches("/10").trim().parse().ok(),
        _ => None,
    }
}

/// Parse a specialist's response into an [`AgentEvaluation`].
///
/// Scores are rounded to integers and clamped to 1-10. Unknown options are
/// kept (and reported); duplicate entries keep the first occurrence.
///
/// # Errors
///
/// [`DomainError::MissingJson`] when the response holds no `{...}` object,
/// [`DomainError::InvalidJson`] when the object does not deserialize.
///
/// # Examples
///
/// ```
/// use council_domain::{AgentType, evaluation::parse_agent_evaluation};
///
/// let response = r#"Here is my analysis:
/// {"optionScores": [{"optionId": "a", "score": 8, "reasoning": "Cheap"}],
///  "keyFactors": ["cost"]}"#;
///
/// let parsed = parse_agent_evaluation(AgentType::Financial, response, &["a", "b"]).unwrap();
/// assert_eq!(parsed.evaluation.option_scores[0].score, 8);
/// assert!(!parsed.is_complete()); // "b" was never scored
/// ```
pub fn parse_agent_evaluation(
    agent_type: AgentType,
    response: &str,
    option_ids: &[&str],
) -> Result<ParsedEvaluation, DomainError> {
    let json = extract_json_object(response).ok_or_else(|| DomainError::MissingJson {
        context: agent_type.to_string(),
    })?;

    let raw: RawEvaluation =
        serde_json::from_str(json).map_err(|e| DomainError::InvalidJson {
            context: agent_type.to_string(),
            message: e.to_string(),
        })?;

    let known: HashSet<&str> = option_ids.iter().copied().collect();
    let mut seen: HashSet<String> = HashSet::new();
    let mut issues = Vec::new();
    let mut option_scores = Vec::new();

    for entry in raw.option_scores {
        let option_id = entry.option_id.trim().to_string();

        let Some(raw_score) = numeric(&entry.score) else {
            issues.push(EvaluationIssue::InvalidScore(option_id));
            continue;
        };

        if !seen.insert(option_id.clone()) {
            issues.push(EvaluationIssue::DuplicateOption(option_id));
            continue;
        }

        if !known.contains(option_id.as_str()) {
            issues.push(EvaluationIssue::UnknownOption(option_id.clone()));
        }

        let rounded = raw_score.round();
        if !(MIN_SCORE as f64..=MAX_SCORE as f64).contains(&rounded) {
            issues.push(EvaluationIssue::ScoreOutOfRange {
                option_id: option_id.clone(),
                raw: raw_score,
            });
        }
        let score = rounded.clamp(MIN_SCORE as f64, MAX_SCORE as f64) as u8;

        option_scores.push(OptionScore::new(option_id, score, entry.reasoning));
    }

    for id in option_ids {
        if !seen.contains(*id) {
            issues.push(EvaluationIssue::MissingOption(id.to_string()));
        }
    }

    let key_factors = raw
        .key_factors
        .into_iter()
        .filter_map(|v| match v {
            Value::String(s) => Some(s),
            Value::Null => None,
            other => Some(other.to_string()),
        })
        .collect();

    Ok(ParsedEvaluation {
        evaluation: AgentEvaluation {
            agent_type,
            option_scores,
            key_factors,
        },
        issues,
    })
}
