//! Pairwise position exchange.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, error, warn};

use crate::evaluation::RouteEvaluator;
use crate::models::Route;

use super::{Operation, MIN_ROUTE_LENGTH};

/// Exchanges the nodes at two intermediate positions.
///
/// Parameters `(i, j)` with `1 ≤ i, j ≤ len − 2` and `i ≠ j`; the depot
/// endpoints never move.
///
/// # Examples
///
/// ```
/// use seqroute::distance::DistanceCache;
/// use seqroute::edges::EdgeValidator;
/// use seqroute::evaluation::RouteEvaluator;
/// use seqroute::local_search::Swap;
/// use seqroute::models::{Node, NodeStore, Route};
///
/// let store = NodeStore::from_nodes(
///     (0..6).map(|i| Node::new(i, i as f64, 0.0)).collect(),
/// );
/// let distances = DistanceCache::new(store.len());
/// let edges = EdgeValidator::for_store(&store);
/// let evaluator = RouteEvaluator::new(&store, &distances, &edges);
///
/// let op = Swap::new(&evaluator, 42);
/// let route = Route::new(vec![0, 1, 2, 3, 4, 5]);
/// assert_eq!(op.apply(&route, 1, 4).sequence(), &[0, 4, 2, 3, 1, 5]);
/// ```
pub struct Swap<'a> {
    evaluator: &'a RouteEvaluator<'a>,
    rng: StdRng,
}

impl<'a> Swap<'a> {
    /// Creates the operation with a seeded parameter sampler.
    pub fn new(evaluator: &'a RouteEvaluator<'a>, seed: u64) -> Self {
        Self {
            evaluator,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Exchanges positions `i` and `j` on a copy of the route.
    pub fn apply(&self, route: &Route, i: usize, j: usize) -> Route {
        let mut out = route.clone();
        self.apply_in_place(&mut out, i, j);
        out
    }

    /// Exchanges positions `i` and `j` in place. Returns `false` (leaving
    /// the route untouched) on invalid parameters.
    pub fn apply_in_place(&self, route: &mut Route, i: usize, j: usize) -> bool {
        let len = route.len();
        if len < MIN_ROUTE_LENGTH {
            warn!(len, "route too short for swap");
            return false;
        }
        if i < 1 || j < 1 || i > len - 2 || j > len - 2 || i == j {
            error!(i, j, len, "invalid swap parameters");
            return false;
        }
        route.sequence_mut().swap(i, j);
        true
    }
}

impl Operation for Swap<'_> {
    fn name(&self) -> &str {
        "swap"
    }

    fn apply_random(&mut self, route: &Route) -> Route {
        let len = route.len();
        if len < MIN_ROUTE_LENGTH {
            warn!(len, "route too short for swap");
            return route.clone();
        }
        let i = self.rng.random_range(1..=len - 2);
        // Sample j from the remaining positions so the pair is distinct.
        let mut j = self.rng.random_range(1..=len - 3);
        if j >= i {
            j += 1;
        }
        self.apply(route, i, j)
    }

    fn apply_best_improvement(&self, route: &Route, only_valid: bool) -> Route {
        let len = route.len();
        if len < MIN_ROUTE_LENGTH {
            warn!(len, "route too short for swap");
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
            debug!(value = best_value, "best swap improvement");
        }
        best
    }

    fn apply_first_improvement(&self, route: &Route, only_valid: bool) -> Route {
        let len = route.len();
        if len < MIN_ROUTE_LENGTH {
            warn!(len, "route too short for swap");
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
                    debug!(i, j, "first swap improvement");
                    return candidate;
                }
            }
        }
        route.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceCache;
    use crate::edges::EdgeValidator;
    use crate::models::{Node, NodeStore};

    fn line_instance(count: usize) -> (NodeStore, DistanceCache, EdgeValidator) {
        let store = NodeStore::from_nodes(
            (0..count).map(|i| Node::new(i, i as f64, 0.0)).collect(),
        );
        let distances = DistanceCache::new(store.len());
        let edges = EdgeValidator::for_store(&store);
        (store, distances, edges)
    }

    #[test]
    fn test_apply_exchanges_positions() {
        let (store, distances, edges) = line_instance(6);
        let evaluator = RouteEvaluator::new(&store, &distances, &edges);
        let op = Swap::new(&evaluator, 42);
        let route = Route::new(vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(op.apply(&route, 1, 4).sequence(), &[0, 4, 2, 3, 1, 5]);
        assert_eq!(op.apply(&route, 2, 3).sequence(), &[0, 1, 3, 2, 4, 5]);
    }

    #[test]
    fn test_double_swap_is_identity() {
        let (store, distances, edges) = line_instance(6);
        let evaluator = RouteEvaluator::new(&store, &distances, &edges);
        let op = Swap::new(&evaluator, 42);
        let route = Route::new(vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(op.apply(&op.apply(&route, 2, 4), 2, 4), route);
    }

    #[test]
    fn test_invalid_parameters_return_copy() {
        let (store, distances, edges) = line_instance(6);
        let evaluator = RouteEvaluator::new(&store, &distances, &edges);
        let op = Swap::new(&evaluator, 42);
        let route = Route::new(vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(op.apply(&route, 0, 2), route); // start depot
        assert_eq!(op.apply(&route, 2, 5), route); // end depot
        assert_eq!(op.apply(&route, 3, 3), route); // same position
    }

    #[test]
    fn test_random_apply_preserves_multiset() {
        let (store, distances, edges) = line_instance(7);
        let evaluator = RouteEvaluator::new(&store, &distances, &edges);
        let mut op = Swap::new(&evaluator, 42);
        let route = Route::new(vec![0, 1, 2, 3, 4, 5, 6]);
        for _ in 0..20 {
            let moved = op.apply_random(&route);
            let mut ids = moved.sequence().to_vec();
            ids.sort_unstable();
            assert_eq!(ids, vec![0, 1, 2, 3, 4, 5, 6]);
            assert_eq!(moved.first(), Some(0));
            assert_eq!(moved.last(), Some(6));
        }
    }

    #[test]
    fn test_best_improvement_fixes_single_exchange() {
        let (store, distances, edges) = line_instance(6);
        let evaluator = RouteEvaluator::new(&store, &distances, &edges);
        let op = Swap::new(&evaluator, 42);
        // Positions 2 and 4 are exchanged relative to the balanced line.
        let route = Route::new(vec![0, 1, 4, 3, 2, 5]);
        let improved = op.apply_best_improvement(&route, false);
        assert_eq!(improved.sequence(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_no_improvement_returns_input() {
        let (store, distances, edges) = line_instance(6);
        let evaluator = RouteEvaluator::new(&store, &distances, &edges);
        let op = Swap::new(&evaluator, 42);
        let route = Route::new(vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(op.apply_best_improvement(&route, false), route);
        assert_eq!(op.apply_first_improvement(&route, false), route);
    }
}
