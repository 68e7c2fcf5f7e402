//! Council configuration from TOML (`[council]` section)

use super::ConfigValidationError;
use council_application::CouncilParams;
use council_domain::{AgentType, DISAGREEMENT_THRESHOLD, MAX_ROUNDS};
use serde::{Deserialize, Serialize};

/// Raw council configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCouncilConfig {
    /// Agent ids as strings ("financial", "market", ...)
    pub agents: Vec<String>,
    pub max_rounds: u32,
    pub disagreement_threshold: u8,
}

impl Default for FileCouncilConfig {
    fn default() -> Self {
        Self {
            agents: AgentType::default_council()
                .iter()
                .map(|a| a.as_str().to_string())
                .collect(),
            max_rounds: MAX_ROUNDS,
            disagreement_threshold: DISAGREEMENT_THRESHOLD,
        }
    }
}

impl FileCouncilConfig {
    /// Parse agent ids, failing on the first unknown one
    pub fn parse_agents(&self) -> Result<Vec<AgentType>, ConfigValidationError> {
        self.agents
            .iter()
            .map(|id| {
                id.parse::<AgentType>()
                    .map_err(|_| ConfigValidationError::UnknownAgent(id.clone()))
            })
            .collect()
    }

    /// Convert to application parameters
    pub fn to_params(&self) -> Result<CouncilParams, ConfigValidationError> {
        Ok(CouncilParams::default()
            .with_agents(self.parse_agents()?)
            .with_max_rounds(self.max_rounds)
            .with_disagreement_threshold(self.disagreement_threshold))
    }
}
