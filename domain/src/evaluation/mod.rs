//! Agent evaluation domain
//!
//! What a specialist produces: one [`OptionScore`] per decision option plus
//! the key factors behind them.

pub mod entities;
pub mod parsing;

pub use entities::{
    AgentEvaluation, EVALUATION_ERROR_FACTOR, MAX_SCORE, MIN_SCORE, NEUTRAL_SCORE, OptionScore,
    average_scores,
};
pub use parsing::{EvaluationIssue, ParsedEvaluation, extract_json_object, parse_agent_evaluation};
