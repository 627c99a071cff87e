//! Adaptive large neighborhood search.
//!
//! - [`EdgeBag`] — bag-of-edges solution state (successor map keyed by id)
//! - [`destroy`] — destroy operators (random, path, worst)
//! - [`repair`] — greedy repair with sub-cycle detection
//! - [`RouletteWheel`] — adaptive operator selection
//! - [`LateAcceptance`] — late-acceptance hill climbing
//! - [`AlnsEngine`] — the destroy → repair → accept loop
//!
//! # Reference
//!
//! Ropke, S. & Pisinger, D. (2006). "An Adaptive Large Neighborhood Search
//! Heuristic for the Pickup and Delivery Problem with Time Windows",
//! *Transportation Science* 40(4), 455-472.

pub mod destroy;
pub mod repair;

mod accept;
mod engine;
mod select;
mod state;

pub use accept::LateAcceptance;
pub use engine::AlnsEngine;
pub use select::{Outcome, RouletteWheel};
pub use state::EdgeBag;

/// Fraction of edges removed by each destroy operator.
pub const DEGREE_OF_DESTRUCTION: f64 = 0.1;

/// Look-back window of the late-acceptance criterion.
pub const LOOKBACK_PERIOD: usize = 10;
