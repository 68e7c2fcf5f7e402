//! Council value objects - synthesis and final evaluation.

use crate::core::error::DomainError;
use crate::decision::Decision;
use crate::deliberation::{AgentDebate, DeliberationResult};
use crate::evaluation::{AgentEvaluation, average_scores, extract_json_object};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stage of a council run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CouncilPhase {
    /// Specialists score the options in parallel
    Evaluation,
    /// Bounded debate over the largest disagreements
    Deliberation,
    /// Chief of staff picks the winner
    Synthesis,
}

impl CouncilPhase {
    pub fn as_str(&self) -> &str {
        match self {
            CouncilPhase::Evaluation => "evaluation",
            CouncilPhase::Deliberation => "deliberation",
            CouncilPhase::Synthesis => "synthesis",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            CouncilPhase::Evaluation => "Specialist Evaluation",
            CouncilPhase::Deliberation => "Deliberation",
            CouncilPhase::Synthesis => "Synthesis",
        }
    }
}

impl std::fmt::Display for CouncilPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// The chief of staff's recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisResult {
    pub recommended_option_id: String,
    /// 0.0 to 1.0
    pub confidence: f64,
    pub synthesis: String,
    #[serde(default)]
    pub dissent: Vec<String>,
    #[serde(default)]
    pub key_tradeoffs: Vec<String>,
}

impl SynthesisResult {
    /// Parse the chief of staff's synthesis response.
    ///
    /// Missing fields fall back to: the decision's first option, confidence
    /// 0.5, "Unable to synthesize", no dissent.
    ///
    /// Confidence of 2 or more is read as a 0-100 percentage and divided by
    /// 100. Anything else is taken on the 0-1 scale. Both are clamped to
    /// `[0, 1]`, so a slight overshoot such as 1.5 becomes 1.0.
    ///
    /// # Errors
    ///
    /// [`DomainError::MissingJson`] / [`DomainError::InvalidJson`] when the
    /// response does not contain a JSON object.
    pub fn parse(response: &str, decision: &Decision) -> Result<Self, DomainError> {
        let json = extract_json_object(response).ok_or_else(|| DomainError::MissingJson {
            context: "synthesis".to_string(),
        })?;

        let map = match serde_json::from_str::<Value>(json) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                return Err(DomainError::InvalidJson {
                    context: "synthesis".to_string(),
                    message: "expected an object".to_string(),
                });
            }
            Err(e) => {
                return Err(DomainError::InvalidJson {
                    context: "synthesis".to_string(),
                    message: e.to_string(),
                });
            }
        };

        let recommended_option_id = map
            .get("recommendedOptionId")
            .and_then(|v| v.as_str())
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.trim().to_string())
            .or_else(|| decision.options.first().map(|o| o.id.clone()))
            .unwrap_or_default();

        let confidence = map
            .get("confidence")
            .and_then(|v| v.as_f64())
            .filter(|c| *c > 0.0)
            .map(normalize_confidence)
            .unwrap_or(0.5);

        let synthesis = map
            .get("synthesis")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or("Unable to synthesize")
            .to_string();

        Ok(Self {
            recommended_option_id,
            confidence,
            synthesis,
            dissent: string_list(map.get("dissent")),
            key_tradeoffs: string_list(map.get("keyTradeoffs")),
        })
    }

    /// Deterministic recommendation when the synthesizer is unavailable.
    ///
    /// Picks the option with the highest mean score (first on ties) and
    /// uses `consensus` as the confidence.
    pub fn fallback(
        decision: &Decision,
        evaluations: &[AgentEvaluation],
        consensus: f64,
    ) -> Result<Self, DomainError> {
        let averages = average_scores(evaluations, decision.options.iter().map(|o| o.id.as_str()));
        let (best_id, best_avg) = averages
            .into_iter()
            .fold(None::<(String, f64)>, |best, (id, avg)| match best {
                Some((_, b)) if b >= avg => best,
                _ => Some((id, avg)),
            })
            .ok_or(DomainError::NoOptions)?;

        Ok(Self {
            synthesis: format!(
                "Synthesis unavailable; recommending {} on highest mean agent score ({:.1}/10).",
                decision.option_name(&best_id),
                best_avg
            ),
            recommended_option_id: best_id,
            confidence: consensus.clamp(0.0, 1.0),
            dissent: Vec::new(),
            key_tradeoffs: Vec::new(),
        })
    }

    /// Confidence on the 0-100 scale shown to users
    pub fn confidence_percent(&self) -> u8 {
        (self.confidence.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}

/// Smallest confidence read as a percentage
const PERCENT_SCALE_FROM: f64 = 2.0;

fn normalize_confidence(raw: f64) -> f64 {
    let value = if raw >= PERCENT_SCALE_FROM {
        raw / 100.0
    } else {
        raw
    };
    value.clamp(0.0, 1.0)
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        Some(Value::String(s)) if !s.is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}

/// Complete result of a council run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouncilEvaluation {
    pub agent_evaluations: Vec<AgentEvaluation>,
    pub recommended_option_id: String,
    /// 0-100
    pub confidence: u8,
    pub synthesis: String,
    pub dissent: Vec<String>,
    /// RFC 3339 timestamp of the run
    pub review_date: String,
    pub debates: Vec<AgentDebate>,
    pub consensus_reached: bool,
    pub deliberation_rounds: u32,
    /// 0.0 to 1.0, see [`consensus_score`](crate::deliberation::consensus_score)
    pub consensus_score: f64,
}

impl CouncilEvaluation {
    pub fn new(
        deliberation: DeliberationResult,
        synthesis: SynthesisResult,
        consensus_score: f64,
        review_date: impl Into<String>,
    ) -> Self {
        Self {
            confidence: synthesis.confidence_percent(),
            recommended_option_id: synthesis.recommended_option_id,
            synthesis: synthesis.synthesis,
            dissent: synthesis.dissent,
            review_date: review_date.into(),
            agent_evaluations: deliberation.final_evaluations,
            debates: deliberation.debates,
            consensus_reached: deliberation.consensus_reached,
            deliberation_rounds: deliberation.rounds,
            consensus_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::agent_type::AgentType;
    use crate::decision::DecisionOption;
    use crate::evaluation::OptionScore;

    fn decision() -> Decision {
        Decision::new("d", "Next bet")
            .with_option(DecisionOption::new("a", "Alpha"))
            .with_option(DecisionOption::new("b", "Beta"))
    }

    #[test]
    fn test_parse_full_response() {
        let response = r#"Final:
{"recommendedOptionId": "b", "confidence": 0.82, "synthesis": "Beta wins",
 "dissent": ["Risk worries about churn"], "keyTradeoffs": ["speed vs cost"]}"#;
        let result = SynthesisResult::parse(response, &decision()).unwrap();
        assert_eq!(result.recommended_option_id, "b");
        assert_eq!(result.confidence_percent(), 82);
        assert_eq!(result.dissent, vec!["Risk worries about churn"]);
        assert_eq!(result.key_tradeoffs.len(), 1);
    }

    #[test]
    fn test_parse_defaults() {
        let result = SynthesisResult::parse("{}", &decision()).unwrap();
        assert_eq!(result.recommended_option_id, "a");
        assert_eq!(result.confidence, 0.5);
        assert_eq!(result.synthesis, "Unable to synthesize");
        assert!(result.dissent.is_empty());
    }

    #[test]
    fn test_parse_percent_confidence() {
        let result = SynthesisResult::parse(r#"{"confidence": 75}"#, &decision()).unwrap();
        assert_eq!(result.confidence_percent(), 75);
    }

    #[test]
    fn test_parse_confidence_overshoot_is_clamped() {
        let parse = |raw: &str| {
            SynthesisResult::parse(&format!(r#"{{"confidence": {raw}}}"#), &decision())
                .unwrap()
                .confidence
        };
        assert_eq!(parse("1.5"), 1.0);
        assert_eq!(parse("1"), 1.0);
        assert_eq!(parse("2"), 0.02);
        assert_eq!(parse("250"), 1.0);
    }

    #[test]
    fn test_parse_without_json_fails() {
        let err = SynthesisResult::parse("I recommend Beta.", &decision()).unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_fallback_picks_highest_mean() {
        let evals = vec![
            AgentEvaluation::new(AgentType::Financial)
                .with_score(OptionScore::new("a", 4, ""))
                .with_score(OptionScore::new("b", 8, "")),
            AgentEvaluation::new(AgentType::Risk)
                .with_score(OptionScore::new("a", 6, ""))
                .with_score(OptionScore::new("b", 7, "")),
        ];
        let result = SynthesisResult::fallback(&decision(), &evals, 0.9).unwrap();
        assert_eq!(result.recommended_option_id, "b");
        assert_eq!(result.confidence_percent(), 90);
        assert!(result.synthesis.contains("Beta"));
    }

    #[test]
    fn test_fallback_without_options_fails() {
        let empty = Decision::new("d", "t");
        let err = SynthesisResult::fallback(&empty, &[], 1.0).unwrap_err();
        assert!(matches!(err, DomainError::NoOptions));
    }

    #[test]
    fn test_council_evaluation_from_parts() {
        let deliberation = DeliberationResult {
            final_evaluations: vec![],
            debates: vec![],
            consensus_reached: true,
            rounds: 1,
        };
        let synthesis = SynthesisResult::parse(r#"{"recommendedOptionId":"a","confidence":0.666}"#, &decision()).unwrap();
        let eval = CouncilEvaluation::new(deliberation, synthesis, 1.0, "2026-01-01T00:00:00Z");
        assert_eq!(eval.confidence, 67);
        assert_eq!(eval.deliberation_rounds, 1);
        assert!(eval.consensus_reached);
    }
}
