//! Application-level configuration.
//!
//! - [`CouncilParams`]: council membership and deliberation bounds

pub mod council_params;

pub use council_params::CouncilParams;
