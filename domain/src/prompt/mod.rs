//! Prompt domain
//!
//! Templates for every LLM call in a council run: specialist evaluation,
//! debate adjudication, and synthesis.

pub mod agent;
mod template;

pub use agent::AgentPromptTemplate;
pub use template::PromptTemplate;
