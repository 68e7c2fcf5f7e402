//! Infrastructure layer for strategy-council
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: LLM providers, configuration file loading,
//! decision input loading, and the JSONL transcript.

pub mod config;
pub mod input;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileCouncilConfig, FileLoggingConfig,
    FileOutputConfig, FileOutputFormat, FileProviderConfig, ProviderKind,
};
pub use input::{InputError, InputLoader};
pub use logging::JsonlConversationLogger;
pub use providers::{ProviderGateway, claude_cli::ClaudeCliGateway, openai::OpenAiGateway};
