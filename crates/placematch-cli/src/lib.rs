//! CLI library components for the place-name matcher.

pub mod logging;
pub mod workflow;
