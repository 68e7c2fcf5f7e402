//! Debate facilitator port
//!
//! The adjudicator consulted once per deliberation round. The deliberation
//! loop treats any error from it as an unresolved challenge.

use super::llm_gateway::{GatewayError, LlmGateway};
use async_trait::async_trait;
use council_domain::{AgentType, DebateResolution, PromptTemplate};
use council_domain::evaluation::extract_json_object;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum FacilitatorError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Adjudicator returned no JSON: {0}")]
    InvalidResponse(String),
}

/// Decides whether one agent's challenge of another's score holds
#[async_trait]
pub trait DebateFacilitator: Send + Sync {
    async fn resolve(
        &self,
        challenger: AgentType,
        challenged: AgentType,
        challenger_reasoning: &str,
        challenged_reasoning: &str,
        option_id: &str,
    ) -> Result<DebateResolution, FacilitatorError>;
}

/// Facilitator backed by a chief-of-staff LLM call
pub struct LlmDebateFacilitator<G: LlmGateway> {
    gateway: Arc<G>,
}

impl<G: LlmGateway> LlmDebateFacilitator<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl<G: LlmGateway + 'static> DebateFacilitator for LlmDebateFacilitator<G> {
    async fn resolve(
        &self,
        challenger: AgentType,
        challenged: AgentType,
        challenger_reasoning: &str,
        challenged_reasoning: &str,
        option_id: &str,
    ) -> Result<DebateResolution, FacilitatorError> {
        let prompt = PromptTemplate::debate_prompt(
            challenger,
            challenged,
            challenger_reasoning,
            challenged_reasoning,
            option_id,
        );
        let response = self
            .gateway
            .ask(&prompt, PromptTemplate::debate_system())
            .await?;

        if extract_json_object(&response).is_none() {
            return Err(FacilitatorError::InvalidResponse(
                council_domain::core::string::truncate(&response, 120),
            ));
        }

        let resolution = DebateResolution::parse(&response);
        debug!(
            "Adjudicated {} vs {} on {}: valid={}, adjusted={}",
            challenger, challenged, option_id, resolution.challenge_valid, resolution.adjusted_score
        );
        Ok(resolution)
    }
}
