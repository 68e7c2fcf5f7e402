//! Evaluation entities produced by specialist agents

use crate::core::agent_type::AgentType;
use serde::{Deserialize, Serialize};

/// Lowest score an agent can give an option
pub const MIN_SCORE: u8 = 1;
/// Highest score an agent can give an option
pub const MAX_SCORE: u8 = 10;
/// Score used when an agent could not evaluate
pub const NEUTRAL_SCORE: u8 = 5;
/// Key factor marking a fallback evaluation
pub const EVALUATION_ERROR_FACTOR: &str = "evaluation_error";

/// One agent's score for one option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionScore {
    pub option_id: String,
    /// 1-10
    pub score: u8,
    pub reasoning: String,
}

impl OptionScore {
    pub fn new(option_id: impl Into<String>, score: u8, reasoning: impl Into<String>) -> Self {
        Self {
            option_id: option_id.into(),
            score,
            reasoning: reasoning.into(),
        }
    }

    /// Absolute gap between two scores
    pub fn difference(&self, other: &OptionScore) -> u8 {
        self.score.abs_diff(other.score)
    }
}

/// A specialist's full evaluation of a decision (Entity)
///
/// Each round of deliberation produces a new snapshot through
/// [`AgentEvaluation::with_adjusted_score`]; the previous one is never edited.
///
/// # Example
///
/// ```
/// use council_domain::{AgentEvaluation, AgentType, OptionScore};
///
/// let eval = AgentEvaluation::new(AgentType::Risk)
///     .with_score(OptionScore::new("opt-a", 3, "Execution risk is high"))
///     .with_key_factor("team capacity");
///
/// let adjusted = eval.with_adjusted_score("opt-a", 6, "Hiring plan mitigates it");
/// assert_eq!(eval.score_for("opt-a").unwrap().score, 3);
/// assert_eq!(adjusted.score_for("opt-a").unwrap().score, 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentEvaluation {
    pub agent_type: AgentType,
    pub option_scores: Vec<OptionScore>,
    pub key_factors: Vec<String>,
}

impl AgentEvaluation {
    pub fn new(agent_type: AgentType) -> Self {
        Self {
            agent_type,
            option_scores: Vec::new(),
            key_factors: Vec::new(),
        }
    }

    pub fn with_score(mut self, score: OptionScore) -> Self {
        self.option_scores.push(score);
        self
    }

    pub fn with_key_factor(mut self, factor: impl Into<String>) -> Self {
        self.key_factors.push(factor.into());
        self
    }

    /// Neutral evaluation substituted when an agent fails
    ///
    /// Scores every option [`NEUTRAL_SCORE`] and tags the evaluation with
    /// [`EVALUATION_ERROR_FACTOR`].
    pub fn fallback<'a>(
        agent_type: AgentType,
        option_ids: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            agent_type,
            option_scores: option_ids
                .into_iter()
                .map(|id| OptionScore::new(id, NEUTRAL_SCORE, "Error during evaluation"))
                .collect(),
            key_factors: vec![EVALUATION_ERROR_FACTOR.to_string()],
        }
    }

    /// Whether this is a fallback produced by [`AgentEvaluation::fallback`]
    pub fn is_fallback(&self) -> bool {
        self.key_factors.iter().any(|f| f == EVALUATION_ERROR_FACTOR)
    }

    /// First score this agent gave for the option, if any
    pub fn score_for(&self, option_id: &str) -> Option<&OptionScore> {
        self.option_scores.iter().find(|s| s.option_id == option_id)
    }

    /// Snapshot with every score for `option_id` replaced
    ///
    /// The reasoning keeps its original text and gains an audit note
    /// `" [Adjusted after debate: {resolution}]"`.
    pub fn with_adjusted_score(&self, option_id: &str, score: u8, resolution: &str) -> Self {
        let option_scores = self
            .option_scores
            .iter()
            .map(|s| {
                if s.option_id == option_id {
                    OptionScore {
                        option_id: s.option_id.clone(),
                        score,
                        reasoning: format!(
                            "{} [Adjusted after debate: {}]",
                            s.reasoning, resolution
                        ),
                    }
                } else {
                    s.clone()
                }
            })
            .collect();

        Self {
            agent_type: self.agent_type,
            option_scores,
            key_factors: self.key_factors.clone(),
        }
    }

    /// Mean score across all options this agent scored
    pub fn mean_score(&self) -> Option<f64> {
        if self.option_scores.is_empty() {
            return None;
        }
        let total: u32 = self.option_scores.iter().map(|s| s.score as u32).sum();
        Some(total as f64 / self.option_scores.len() as f64)
    }
}

/// Mean score per option across evaluations, in `option_ids` order
///
/// Options nobody scored are reported as `0.0`.
pub fn average_scores<'a>(
    evaluations: &[AgentEvaluation],
    option_ids: impl IntoIterator<Item = &'a str>,
) -> Vec<(String, f64)> {
    option_ids
        .into_iter()
        .map(|id| {
            let scores: Vec<u8> = evaluations
                .iter()
                .filter_map(|e| e.score_for(id).map(|s| s.score))
                .collect();
            let avg = if scores.is_empty() {
                0.0
            } else {
                scores.iter().map(|&s| s as f64).sum::<f64>() / scores.len() as f64
            };
            (id.to_string(), avg)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(agent: AgentType, scores: &[(&str, u8)]) -> AgentEvaluation {
        scores.iter().fold(AgentEvaluation::new(agent), |e, (id, s)| {
            e.with_score(OptionScore::new(*id, *s, format!("{} reasoning", id)))
        })
    }

    #[test]
    fn test_fallback_scores_every_option_neutral() {
        let eval = AgentEvaluation::fallback(AgentType::Market, ["a", "b", "c"]);
        assert_eq!(eval.option_scores.len(), 3);
        assert!(eval.option_scores.iter().all(|s| s.score == NEUTRAL_SCORE));
        assert_eq!(eval.key_factors, vec!["evaluation_error"]);
        assert!(eval.is_fallback());
    }

    #[test]
    fn test_adjusted_score_touches_only_contested_option() {
        let original = eval(AgentType::Risk, &[("a", 2), ("b", 7)]);
        let adjusted = original.with_adjusted_score("a", 6, "Risk overstated");

        assert_eq!(adjusted.score_for("a").unwrap().score, 6);
        assert!(
            adjusted
                .score_for("a")
                .unwrap()
                .reasoning
                .ends_with(" [Adjusted after debate: Risk overstated]")
        );
        assert_eq!(adjusted.score_for("b"), original.score_for("b"));
        assert_eq!(original.score_for("a").unwrap().score, 2);
    }

    #[test]
    fn test_adjusted_score_replaces_duplicates() {
        let original = eval(AgentType::Risk, &[("a", 2), ("a", 3)]);
        let adjusted = original.with_adjusted_score("a", 8, "x");
        assert!(adjusted.option_scores.iter().all(|s| s.score == 8));
    }

    #[test]
    fn test_average_scores() {
        let evals = vec![
            eval(AgentType::Financial, &[("a", 4), ("b", 9)]),
            eval(AgentType::Market, &[("a", 8)]),
        ];
        let avgs = average_scores(&evals, ["a", "b", "c"]);
        assert_eq!(avgs[0], ("a".to_string(), 6.0));
        assert_eq!(avgs[1], ("b".to_string(), 9.0));
        assert_eq!(avgs[2], ("c".to_string(), 0.0));
    }

    #[test]
    fn test_serialize_camel_case() {
        let e = eval(AgentType::GameTheory, &[("a", 4)]);
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["agentType"], "gametheory");
        assert_eq!(json["optionScores"][0]["optionId"], "a");
    }
}
