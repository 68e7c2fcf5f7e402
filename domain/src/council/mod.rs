//! Council domain
//!
//! Result types for a full council run: the phases it moves through, the
//! chief of staff's synthesis, and the final [`CouncilEvaluation`].

pub mod value_objects;

pub use value_objects::{CouncilEvaluation, CouncilPhase, SynthesisResult};
