//! Council parameters for the use case loop.
//!
//! [`CouncilParams`] groups the static parameters that shape a council run:
//! who sits on the council and how long deliberation may go on. These are
//! application-layer concerns; the domain only supplies the defaults.

use council_domain::{AgentType, DISAGREEMENT_THRESHOLD, MAX_ROUNDS};
use serde::{Deserialize, Serialize};

/// Council run parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouncilParams {
    /// Specialists consulted, in reporting order. Duplicates are ignored.
    pub agents: Vec<AgentType>,
    /// Upper bound on deliberation rounds.
    pub max_rounds: u32,
    /// Score gap at which two agents disagree.
    pub disagreement_threshold: u8,
}

impl Default for CouncilParams {
    fn default() -> Self {
        Self {
            agents: AgentType::default_council(),
            max_rounds: MAX_ROUNDS,
            disagreement_threshold: DISAGREEMENT_THRESHOLD,
        }
    }
}

impl CouncilParams {
    // ==================== Builder Methods ====================

    pub fn with_agents(mut self, agents: Vec<AgentType>) -> Self {
        self.agents = agents;
        self
    }

    pub fn with_max_rounds(mut self, max: u32) -> Self {
        self.max_rounds = max;
        self
    }

    pub fn with_disagreement_threshold(mut self, threshold: u8) -> Self {
        self.disagreement_threshold = threshold;
        self
    }

    /// Configured agents with duplicates removed, first occurrence kept.
    ///
    /// Score adjustments target agents by type, so each type may sit on the
    /// council only once.
    pub fn unique_agents(&self) -> Vec<AgentType> {
        let mut seen = Vec::with_capacity(self.agents.len());
        for agent in &self.agents {
            if !seen.contains(agent) {
                seen.push(*agent);
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = CouncilParams::default();
        assert_eq!(params.agents.len(), 5);
        assert_eq!(params.max_rounds, 3);
        assert_eq!(params.disagreement_threshold, 3);
    }

    #[test]
    fn test_builder() {
        let params = CouncilParams::default()
            .with_agents(vec![AgentType::Risk])
            .with_max_rounds(5)
            .with_disagreement_threshold(4);

        assert_eq!(params.agents, vec![AgentType::Risk]);
        assert_eq!(params.max_rounds, 5);
        assert_eq!(params.disagreement_threshold, 4);
    }

    #[test]
    fn test_unique_agents_keeps_first() {
        let params = CouncilParams::default().with_agents(vec![
            AgentType::Market,
            AgentType::Risk,
            AgentType::Market,
        ]);
        assert_eq!(params.unique_agents(), vec![AgentType::Market, AgentType::Risk]);
    }
}
