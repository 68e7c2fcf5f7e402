//! Terminal rendering of council results

pub mod console;
