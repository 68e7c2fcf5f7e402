//! LLM provider adapters
//!
//! [`ProviderGateway`] picks the adapter named by the `[provider]` config
//! section and forwards every call to it.

pub mod claude_cli;
pub mod openai;

use crate::config::{FileProviderConfig, ProviderKind};
use async_trait::async_trait;
use claude_cli::ClaudeCliGateway;
use council_application::ports::llm_gateway::{GatewayError, LlmGateway};
use openai::OpenAiGateway;
use std::time::Duration;
use tracing::info;

/// The configured LLM backend
pub enum ProviderGateway {
    ClaudeCli(ClaudeCliGateway),
    OpenAi(OpenAiGateway),
}

impl ProviderGateway {
    /// Build the adapter selected by `config.kind`
    pub fn from_config(config: &FileProviderConfig) -> Result<Self, GatewayError> {
        let timeout = Duration::from_secs(config.timeout_seconds);

        let gateway = match config.kind {
            ProviderKind::ClaudeCli => {
                Self::ClaudeCli(ClaudeCliGateway::new(&config.claude_command, timeout))
            }
            ProviderKind::OpenAi => Self::OpenAi(
                OpenAiGateway::new(config.resolve_openai_api_key(), &config.openai_model, timeout)?
                    .with_base_url(&config.openai_base_url)
                    .with_sampling(config.temperature, config.max_tokens),
            ),
        };

        info!(
            "Using {} provider (timeout {}s)",
            config.kind, config.timeout_seconds
        );
        Ok(gateway)
    }

    pub fn kind(&self) -> ProviderKind {
        match self {
            Self::ClaudeCli(_) => ProviderKind::ClaudeCli,
            Self::OpenAi(_) => ProviderKind::OpenAi,
        }
    }

    fn inner(&self) -> &dyn LlmGateway {
        match self {
            Self::ClaudeCli(g) => g,
            Self::OpenAi(g) => g,
        }
    }
}

#[async_trait]
impl LlmGateway for ProviderGateway {
    fn name(&self) -> &str {
        self.inner().name()
    }

    async fn ask(&self, prompt: &str, system_prompt: &str) -> Result<String, GatewayError> {
        self.inner().ask(prompt, system_prompt).await
    }

    async fn check(&self) -> Result<(), GatewayError> {
        self.inner().check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_claude_cli() {
        let gateway = ProviderGateway::from_config(&FileProviderConfig::default()).unwrap();
        assert_eq!(gateway.kind(), ProviderKind::ClaudeCli);
        assert_eq!(gateway.name(), "claude-cli");
    }

    #[test]
    fn test_openai_selected() {
        let config = FileProviderConfig {
            kind: ProviderKind::OpenAi,
            openai_api_key: Some("sk-test".to_string()),
            ..Default::default()
        };
        let gateway = ProviderGateway::from_config(&config).unwrap();
        assert_eq!(gateway.kind(), ProviderKind::OpenAi);
        assert_eq!(gateway.name(), "openai");
    }
}
