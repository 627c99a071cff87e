//! 2-opt segment reversal.
//!
//! Reversing `sequence[i..=j]` replaces the edges entering position `i` and
//! leaving position `j` with their crossed counterparts. Applying the same
//! move twice restores the original route.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, error, warn};

use crate::evaluation::RouteEvaluator;
use crate::models::Route;

use super::{Operation, MIN_ROUTE_LENGTH};

/// Reverses a contiguous segment of intermediates.
///
/// Parameters `(i, j)` with `1 ≤ i < j ≤ len − 2`; the depot endpoints are
/// never part of a reversal.
///
/// # Examples
///
/// ```
/// use seqroute::distance::DistanceCache;
/// use seqroute::edges::EdgeValidator;
/// use seqroute::evaluation::RouteEvaluator;
/// use seqroute::local_search::TwoOpt;
/// use seqroute::models::{Node, NodeStore, Route};
///
/// let store = NodeStore::from_nodes(
///     (0..6).map(|i| Node::new(i, i as f64, 0.0)).collect(),
/// );
/// let distances = DistanceCache::new(store.len());
/// let edges = EdgeValidator::for_store(&store);
/// let evaluator = RouteEvaluator::new(&store, &distances, &edges);
///
/// let op = TwoOpt::new(&evaluator, 42);
/// let route = Route::new(vec![0, 1, 2, 3, 4, 5]);
/// let reversed = op.apply(&route, 1, 3);
/// assert_eq!(reversed.sequence(), &[0, 3, 2, 1, 4, 5]);
/// assert_eq!(op.apply(&reversed, 1, 3), route);
/// ```
pub struct TwoOpt<'a> {
    evaluator: &'a RouteEvaluator<'a>,
    rng: StdRng,
}

impl<'a> TwoOpt<'a> {
    /// Creates the operation with a seeded parameter sampler.
    pub fn new(evaluator: &'a RouteEvaluator<'a>, seed: u64) -> Self {
        Self {
            evaluator,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Reverses `sequence[i..=j]` on a copy of the route.
    pub fn apply(&self, route: &Route, i: usize, j: usize) -> Route {
        let mut out = route.clone();
        self.apply_in_place(&mut out, i, j);
        out
    }

    /// Reverses `sequence[i..=j]` in place. Returns `false` (leaving the
    /// route untouched) on invalid parameters.
    pub fn apply_in_place(&self, route: &mut Route, i: usize, j: usize) -> bool {
        let len = route.len();
        if len < MIN_ROUTE_LENGTH {
            warn!(len, "route too short for 2-opt");
            return false;
        }
        if i < 1 || j <= i || j > len - 2 {
            error!(i, j, len, "invalid 2-opt parameters");
            return false;
        }
        route.sequence_mut()[i..=j].reverse();
        true
    }
}

impl Operation for TwoOpt<'_> {
    fn name(&self) -> &str {
        "2-opt"
    }

    fn apply_random(&mut self, route: &Route) -> Route {
        let len = route.len();
        if len < MIN_ROUTE_LENGTH {
            warn!(len, "route too short for 2-opt");
            return route.clone();
        }
        let i = self.rng.random_range(1..=len - 3);
        let j = self.rng.random_range(i + 1..=len - 2);
        self.apply(route, i, j)
    }

    fn apply_best_improvement(&self, route: &Route, only_valid: bool) -> Route {
        let len = route.len();
        if len < MIN_ROUTE_LENGTH {
            warn!(len, "route too short for 2-opt");
            return route.clone();
        }

        let mut best = route.clone();
        let mut best_value = self.evaluator.objective(route);
        let mut improved = false;

        for i in 1..=len - 3 {
            for j in i + 1..=len - 2 {
                let candidate = self.apply(route, i, j);
                if only_valid && !self.evaluator.is_valid(&candidate) {
                    continue;
                }
                let value = self.evaluator.objective(&candidate);
                if value < best_value {
                    best = candidate;
                    best_value = value;
                    improved = true;
                }
            }
        }

        if improved {
            debug!(value = best_value, "best 2-opt improvement");
        }
        best
    }

    fn apply_first_improvement(&self, route: &Route, only_valid: bool) -> Route {
        let len = route.len();
        if len < MIN_ROUTE_LENGTH {
            warn!(len, "route too short for 2-opt");
            return route.clone();
        }

        let current_value = self.evaluator.objective(route);
        for i in 1..=len - 3 {
            for j in i + 1..=len - 2 {
                let candidate = self.apply(route, i, j);
                if only_valid && !self.evaluator.is_valid(&candidate) {
                    continue;
                }
                if self.evaluator.objective(&candidate) < current_value {
                    debug!(i, j, "first 2-opt improvement");
                    return candidate;
                }
            }
        }
        route.clone()
    }
}
