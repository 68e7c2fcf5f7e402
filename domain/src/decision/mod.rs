//! Decision input domain
//!
//! Everything the council is asked to evaluate: the decision with its
//! options, and the company context shared by every specialist.
//!
//! - [`entities::Decision`] / [`entities::DecisionOption`]: what is decided
//! - [`context::CompanyContext`], [`context::BusinessArm`], [`context::MarketData`]:
//!   background handed to the specialists
//! - [`context::CouncilInput`]: the full payload for one council run

pub mod context;
pub mod entities;

pub use context::{
    ArmStatus, BusinessArm, CompanyContext, Competitor, CouncilInput, MarketData, StrategicGoal,
    ThreatLevel,
};
pub use entities::{Decision, DecisionOption};
