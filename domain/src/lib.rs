//! Domain layer for strategy-council
//!
//! Entities, value objects, and pure rules for the strategy council. No I/O
//! happens here; the application layer drives the LLM calls.
//!
//! # Core Concepts
//!
//! ## Council
//!
//! A panel of specialist agents (financial, market, risk, game theory,
//! resource allocation) scores every option of a [`Decision`] from 1 to 10.
//!
//! ## Deliberation
//!
//! When two agents differ by at least [`DISAGREEMENT_THRESHOLD`] points on an
//! option, the chief of staff adjudicates the largest gap and may adjust the
//! challenged score. At most [`MAX_ROUNDS`] rounds run.
//!
//! ## Synthesis
//!
//! The chief of staff turns the final scores into a [`SynthesisResult`],
//! which together with the debate log forms a [`CouncilEvaluation`].

pub mod config;
pub mod core;
pub mod council;
pub mod decision;
pub mod deliberation;
pub mod evaluation;
pub mod prompt;

pub use config::OutputFormat;
pub use core::{agent_type::AgentType, error::DomainError};
pub use council::{CouncilEvaluation, CouncilPhase, SynthesisResult};
pub use decision::{
    ArmStatus, BusinessArm, CompanyContext, Competitor, CouncilInput, Decision, DecisionOption,
    MarketData, StrategicGoal, ThreatLevel,
};
pub use deliberation::{
    AgentDebate, DISAGREEMENT_THRESHOLD, DebateResolution, DeliberationOutcome,
    DeliberationResult, Disagreement, MAX_ROUNDS, consensus_score, find_disagreements,
};
pub use evaluation::{
    AgentEvaluation, EvaluationIssue, OptionScore, ParsedEvaluation, parse_agent_evaluation,
};
pub use prompt::{AgentPromptTemplate, PromptTemplate};
