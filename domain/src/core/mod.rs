//! Core domain concepts shared across all subdomains.
//!
//! - [`agent_type::AgentType`]: the closed set of council members
//! - [`error::DomainError`]: domain-level errors

pub mod agent_type;
pub mod error;
pub mod string;
