//! Application layer for strategy-council
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::CouncilParams;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    debate_facilitator::{DebateFacilitator, FacilitatorError, LlmDebateFacilitator},
    llm_gateway::{GatewayError, LlmGateway},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::evaluate_agent::{EvaluateAgentError, EvaluateAgentUseCase};
pub use use_cases::run_council::{RunCouncilError, RunCouncilUseCase};
pub use use_cases::run_deliberation::RunDeliberationUseCase;
