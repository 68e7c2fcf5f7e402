//! Use cases (application services)

pub mod evaluate_agent;
pub mod run_council;
pub mod run_deliberation;
