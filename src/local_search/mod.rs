//! Neighborhood operations and the local search improver.
//!
//! - [`TwoOpt`] — segment reversal
//! - [`Swap`] — position exchange
//! - [`Relocate`] — segment cut and reinsert
//! - [`LocalSearch`] — round-robin best-improvement search
//!
//! Every operation leaves the depot endpoints in place and follows a common
//! error policy: invalid parameters produce an unchanged copy of the input
//! route and a log record, never a panic.

mod improver;
mod operation;
mod relocate;
mod swap;
mod two_opt;

pub use improver::LocalSearch;
pub use operation::Operation;
pub use relocate::Relocate;
pub use swap::Swap;
pub use two_opt::TwoOpt;

/// Minimum route length (both depots plus two intermediates) for any
/// neighborhood move to exist.
pub const MIN_ROUTE_LENGTH: usize = 4;
