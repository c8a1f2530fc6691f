//! Roll-bonus resolution pipeline.
//!
//! Read-only fan-in: the sequence evaluator calls the bonus calculator,
//! which pulls named contributions from the modifier aggregator and live
//! stat values from the injury resolver. Nothing in this module mutates
//! state.
pub mod bonus;
pub mod factors;
pub mod stat;

pub use bonus::{RollBreakdown, dice_pool, roll_breakdown, total_bonus};
pub use factors::{Factor, FactorSource, matching_factors};
pub use stat::live_stat;
