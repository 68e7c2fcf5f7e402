//! LLM Gateway port
//!
//! Defines the interface for communicating with LLM providers.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Provider not available: {0}")]
    ProviderUnavailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Empty response from provider")]
    EmptyResponse,

    #[error("Timeout after {0}s")]
    Timeout(u64),

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway for LLM communication
///
/// One call is one stateless request: a system prompt plus a user prompt in,
/// the model's text out. Implementations (adapters) live in the
/// infrastructure layer and enforce their own timeouts.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Short provider label for logs ("claude-cli", "openai")
    fn name(&self) -> &str;

    /// Send a prompt and wait for the full response
    async fn ask(&self, prompt: &str, system_prompt: &str) -> Result<String, GatewayError>;

    /// Verify the provider is reachable without spending a completion
    async fn check(&self) -> Result<(), GatewayError>;
}
