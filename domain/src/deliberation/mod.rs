//! Deliberation domain
//!
//! The pure half of the debate protocol. Each round:
//!
//! ```text
//!  evaluations(k) ──find_disagreements──▶ [] ? ──yes──▶ ConsensusReached
//!        │                                 │
//!        │                                 no: take the largest
//!        │                                 ▼
//!        │                  opening_positions ▶ adjudicate ▶ resolution
//!        │                                                      │
//!        └───────────── apply_resolution ◀──────────────────────┘
//!                              │
//!                        evaluations(k+1)
//! ```
//!
//! The loop itself (awaiting the adjudicator, bounding rounds) lives in the
//! application layer; everything here is synchronous and side-effect free.

pub mod consensus;
pub mod debate;
pub mod disagreement;
pub mod result;

pub use consensus::consensus_score;
pub use debate::{AgentDebate, DebateResolution, UNRESOLVED};
pub use disagreement::{
    AgentPosition, DISAGREEMENT_THRESHOLD, Disagreement, find_disagreements,
    find_disagreements_with_threshold, has_consensus, has_consensus_with_threshold,
};
pub use result::{DeliberationOutcome, DeliberationResult, MAX_ROUNDS, apply_resolution};
