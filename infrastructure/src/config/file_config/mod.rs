//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod council;
mod logging;
mod output;
mod provider;

pub use council::FileCouncilConfig;
pub use logging::FileLoggingConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use provider::{FileProviderConfig, ProviderKind};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("provider.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("council.max_rounds cannot be 0")]
    InvalidMaxRounds,

    #[error("council.disagreement_threshold must be between 1 and 9, got {0}")]
    InvalidThreshold(u8),

    #[error("council.agents: unknown agent '{0}'")]
    UnknownAgent(String),

    #[error("council.agents cannot be empty")]
    NoAgents,

    #[error("provider.temperature must be between 0 and 2, got {0}")]
    InvalidTemperature(f32),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// LLM backend settings
    pub provider: FileProviderConfig,
    /// Council membership and deliberation bounds
    pub council: FileCouncilConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Transcript and log file settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, stopping at the first problem.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.provider.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if !(0.0..=2.0).contains(&self.provider.temperature) {
            return Err(ConfigValidationError::InvalidTemperature(
                self.provider.temperature,
            ));
        }
        if self.council.max_rounds == 0 {
            return Err(ConfigValidationError::InvalidMaxRounds);
        }
        if !(1..=9).contains(&self.council.disagreement_threshold) {
            return Err(ConfigValidationError::InvalidThreshold(
                self.council.disagreement_threshold,
            ));
        }
        if self.council.agents.is_empty() {
            return Err(ConfigValidationError::NoAgents);
        }
        self.council.parse_agents()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{AgentType, OutputFormat};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[provider]
kind = "openai"
openai_model = "gpt-4o-mini"
timeout_seconds = 60

[council]
agents = ["financial", "risk", "game-theory"]
max_rounds = 5
disagreement_threshold = 4

[output]
format = "json"
color = false

[logging]
transcript = "runs/council.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.provider.kind, ProviderKind::OpenAi);
        assert_eq!(config.provider.openai_model, "gpt-4o-mini");
        assert_eq!(config.provider.timeout_seconds, 60);
        assert_eq!(config.provider.max_tokens, 4096);
        assert_eq!(
            config.council.parse_agents().unwrap(),
            vec![AgentType::Financial, AgentType::Risk, AgentType::GameTheory]
        );
        assert_eq!(config.council.max_rounds, 5);
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.output.color);
        assert!(config.logging.transcript.is_some());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: FileConfig = toml::from_str("[council]\nmax_rounds = 2\n").unwrap();
        assert_eq!(config.council.max_rounds, 2);
        assert_eq!(config.council.agents.len(), 5);
        assert_eq!(config.provider.kind, ProviderKind::ClaudeCli);
        assert_eq!(config.provider.claude_command, "claude");
    }

    #[test]
    fn test_validate_default_config() {
        assert_eq!(FileConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = FileConfig::default();
        config.provider.timeout_seconds = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));

        let mut config = FileConfig::default();
        config.council.max_rounds = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidMaxRounds));

        let mut config = FileConfig::default();
        config.council.disagreement_threshold = 10;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidThreshold(10)));

        let mut config = FileConfig::default();
        config.council.agents.clear();
        assert_eq!(config.validate(), Err(ConfigValidationError::NoAgents));

        let mut config = FileConfig::default();
        config.council.agents.push("oracle".to_string());
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::UnknownAgent("oracle".to_string()))
        );
    }
}
