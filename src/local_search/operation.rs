//! Common interface of neighborhood operations.

use crate::models::Route;

/// A neighborhood operation over routes.
///
/// Implementations expose three entry points: a random move sampled from
/// the operation's own seeded PRNG, and exhaustive best-/first-improvement
/// scans over the parameter space. Concrete types additionally offer
/// `apply` with explicit parameters.
///
/// `apply_best_improvement` returns a route whose objective is never worse
/// than the input's; both scans return the input unchanged when no strict
/// improvement exists.
pub trait Operation {
    /// Operation name for logs and operator statistics.
    fn name(&self) -> &str;

    /// Applies the operation with uniformly sampled parameters.
    fn apply_random(&mut self, route: &Route) -> Route;

    /// Enumerates the full parameter space and returns the candidate with
    /// the strictly smallest objective, or the input if none improves.
    ///
    /// With `only_valid`, candidates violating the sequence constraints
    /// are skipped.
    fn apply_best_improvement(&self, route: &Route, only_valid: bool) -> Route;

    /// Enumerates in a fixed order and returns the first strictly
    /// improving candidate, or the input if none improves.
    fn apply_first_improvement(&self, route: &Route, only_valid: bool) -> Route;
}
