//! Progress display for council runs

pub mod reporter;
