//! Proportional text metrics and greedy line wrapping for the HUD font.

pub mod metrics;
pub mod wrap;

pub use metrics::*;
pub use wrap::*;
