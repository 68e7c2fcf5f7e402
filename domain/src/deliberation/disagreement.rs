//! Disagreement detection
//!
//! A disagreement is two agents scoring the same option at least
//! [`DISAGREEMENT_THRESHOLD`] points apart. Detection is a pure function of
//! the current evaluations and is recomputed every round.

use crate::core::agent_type::AgentType;
use crate::evaluation::{AgentEvaluation, OptionScore};
use serde::{Deserialize, Serialize};

/// Score gap (on the 1-10 scale) at which two agents disagree
pub const DISAGREEMENT_THRESHOLD: u8 = 3;

/// One side of a disagreement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentPosition {
    pub agent_type: AgentType,
    pub score: OptionScore,
}

/// Two agents far apart on one option (transient, never persisted)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Disagreement {
    pub option_id: String,
    /// The agent listed first in the evaluation order (the challenger)
    pub agent1: AgentPosition,
    /// The agent listed later (the challenged party)
    pub agent2: AgentPosition,
    pub difference: u8,
}

/// Find every disagreement using [`DISAGREEMENT_THRESHOLD`].
///
/// See [`find_disagreements_with_threshold`].
pub fn find_disagreements(evaluations: &[AgentEvaluation]) -> Vec<Disagreement> {
    find_disagreements_with_threshold(evaluations, DISAGREEMENT_THRESHOLD)
}

/// Find every pair of agents whose scores for the same option differ by at
/// least `threshold`, largest difference first.
///
/// Pairs are scanned in evaluation order (`i < j`), then by agent `i`'s
/// option order. Only options scored by both agents are compared. The sort
/// is stable, so ties keep scan order.
///
/// # Example
///
/// ```
/// use council_domain::{AgentEvaluation, AgentType, OptionScore};
/// use council_domain::deliberation::find_disagreements;
///
/// let evals = vec![
///     AgentEvaluation::new(AgentType::Financial).with_score(OptionScore::new("a", 2, "")),
///     AgentEvaluation::new(AgentType::Market).with_score(OptionScore::new("a", 9, "")),
/// ];
///
/// let found = find_disagreements(&evals);
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].difference, 7);
/// assert_eq!(found[0].agent2.agent_type, AgentType::Market);
/// ```
pub fn find_disagreements_with_threshold(
    evaluations: &[AgentEvaluation],
    threshold: u8,
) -> Vec<Disagreement> {
    let mut disagreements = Vec::new();

    for (i, first) in evaluations.iter().enumerate() {
        for second in &evaluations[i + 1..] {
            for score1 in &first.option_scores {
                let Some(score2) = second.score_for(&score1.option_id) else {
                    continue;
                };

                let difference = score1.difference(score2);
                if difference >= threshold {
                    disagreements.push(Disagreement {
                        option_id: score1.option_id.clone(),
                        agent1: AgentPosition {
                            agent_type: first.agent_type,
                            score: score1.clone(),
                        },
                        agent2: AgentPosition {
                            agent_type: second.agent_type,
                            score: score2.clone(),
                        },
                        difference,
                    });
                }
            }
        }
    }

    disagreements.sort_by(|a, b| b.difference.cmp(&a.difference));
    disagreements
}

/// Whether no pair of agents disagrees under [`DISAGREEMENT_THRESHOLD`]
pub fn has_consensus(evaluations: &[AgentEvaluation]) -> bool {
    has_consensus_with_threshold(evaluations, DISAGREEMENT_THRESHOLD)
}

/// Whether no pair of agents disagrees under `threshold`
pub fn has_consensus_with_threshold(evaluations: &[AgentEvaluation], threshold: u8) -> bool {
    find_disagreements_with_threshold(evaluations, threshold).is_empty()
}
