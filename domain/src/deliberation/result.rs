//! Deliberation result and snapshot updates

use super::debate::{AgentDebate, DebateResolution};
use super::disagreement::Disagreement;
use crate::evaluation::AgentEvaluation;
use serde::{Deserialize, Serialize};

/// Default bound on deliberation rounds
pub const MAX_ROUNDS: u32 = 3;

/// How a deliberation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliberationOutcome {
    /// A round found no disagreements
    ConsensusReached,
    /// All rounds ran and disagreements remain
    RoundsExhausted,
}

impl std::fmt::Display for DeliberationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliberationOutcome::ConsensusReached => write!(f, "Consensus reached"),
            DeliberationOutcome::RoundsExhausted => write!(f, "Rounds exhausted"),
        }
    }
}

/// Final state of a deliberation (immutable once produced)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliberationResult {
    pub final_evaluations: Vec<AgentEvaluation>,
    pub debates: Vec<AgentDebate>,
    pub consensus_reached: bool,
    /// Rounds consumed, including the round that detected consensus
    pub rounds: u32,
}

impl DeliberationResult {
    pub fn outcome(&self) -> DeliberationOutcome {
        if self.consensus_reached {
            DeliberationOutcome::ConsensusReached
        } else {
            DeliberationOutcome::RoundsExhausted
        }
    }

    /// Debate entries for one round
    pub fn debates_in_round(&self, round: u32) -> impl Iterator<Item = &AgentDebate> {
        self.debates.iter().filter(move |d| d.round == round)
    }
}

/// Next evaluation snapshot after a round's resolution.
///
/// When the resolution [applies](DebateResolution::applies), every
/// evaluation belonging to the challenged agent (`agent2`) gets its score for
/// the contested option replaced. All other evaluations are cloned as-is.
/// The challenger is never changed.
pub fn apply_resolution(
    evaluations: &[AgentEvaluation],
    disagreement: &Disagreement,
    resolution: &DebateResolution,
) -> Vec<AgentEvaluation> {
    if !resolution.applies() {
        return evaluations.to_vec();
    }

    evaluations
        .iter()
        .map(|evaluation| {
            if evaluation.agent_type == disagreement.agent2.agent_type {
                evaluation.with_adjusted_score(
                    &disagreement.option_id,
                    resolution.adjusted_score,
                    &resolution.resolution,
                )
            } else {
                evaluation.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::agent_type::AgentType;
    use crate::deliberation::disagreement::find_disagreements;
    use crate::evaluation::OptionScore;

    fn evals() -> Vec<AgentEvaluation> {
        vec![
            AgentEvaluation::new(AgentType::Financial)
                .with_score(OptionScore::new("opt-A", 2, "Negative ROI"))
                .with_score(OptionScore::new("opt-B", 6, "Fine")),
            AgentEvaluation::new(AgentType::Market)
                .with_score(OptionScore::new("opt-A", 9, "Huge TAM"))
                .with_score(OptionScore::new("opt-B", 5, "Crowded")),
        ]
    }

    #[test]
    fn test_apply_valid_resolution_changes_only_challenged_score() {
        let before = evals();
        let d = find_disagreements(&before).remove(0);
        let after = apply_resolution(&before, &d, &DebateResolution::sustained("TAM overstated", 6));

        let changed = after[1].score_for("opt-A").unwrap();
        assert_eq!(changed.score, 6);
        assert!(changed.reasoning.contains("[Adjusted after debate:"));

        assert_eq!(after[0], before[0]);
        assert_eq!(after[1].score_for("opt-B"), before[1].score_for("opt-B"));
        assert_eq!(after[1].key_factors, before[1].key_factors);
    }

    #[test]
    fn test_apply_rejected_resolution_is_identity() {
        let before = evals();
        let d = find_disagreements(&before).remove(0);
        let after = apply_resolution(&before, &d, &DebateResolution::rejected("Stands"));
        assert_eq!(after, before);

        let zero = DebateResolution {
            challenge_valid: true,
            resolution: "x".into(),
            adjusted_score: 0,
        };
        assert_eq!(apply_resolution(&before, &d, &zero), before);
    }

    #[test]
    fn test_outcome() {
        let result = DeliberationResult {
            final_evaluations: vec![],
            debates: vec![],
            consensus_reached: false,
            rounds: 3,
        };
        assert_eq!(result.outcome(), DeliberationOutcome::RoundsExhausted);
        assert_eq!(result.outcome().to_string(), "Rounds exhausted");
    }
}
