//! Segment relocation.
//!
//! Cuts the contiguous segment `sequence[v1..=v2]` and reinserts it at
//! `insert_pos`. Positions are interpreted against the original sequence;
//! once the segment is removed, the effective insertion index is
//! `insert_pos` when it falls before the cut, and `insert_pos − segment
//! length` otherwise.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, error, warn};

use crate::evaluation::RouteEvaluator;
use crate::models::Route;

use super::{Operation, MIN_ROUTE_LENGTH};

/// Moves a contiguous run of intermediates to a new position.
///
/// Parameters `(v1, v2, insert_pos)` with `1 ≤ v1 ≤ v2 ≤ len − 2` and
/// `insert_pos` in `[0, len − segment_length)` outside `[v1, v2]`. Single
/// nodes relocate with `v1 == v2`.
///
/// # Examples
///
/// ```
/// use seqroute::distance::DistanceCache;
/// use seqroute::edges::EdgeValidator;
/// use seqroute::evaluation::RouteEvaluator;
/// use seqroute::local_search::Relocate;
/// use seqroute::models::{Node, NodeStore, Route};
///
/// let store = NodeStore::from_nodes(
///     (0..6).map(|i| Node::new(i, i as f64, 0.0)).collect(),
/// );
/// let distances = DistanceCache::new(store.len());
/// let edges = EdgeValidator::for_store(&store);
/// let evaluator = RouteEvaluator::new(&store, &distances, &edges);
///
/// let op = Relocate::new(&evaluator, 42);
/// let route = Route::new(vec![0, 1, 2, 3, 4, 5]);
/// // Move [2, 3] in front of position 1.
/// assert_eq!(op.apply(&route, 2, 3, 1).sequence(), &[0, 2, 3, 1, 4, 5]);
/// ```
pub struct Relocate<'a> {
    evaluator: &'a RouteEvaluator<'a>,
    rng: StdRng,
}

impl<'a> Relocate<'a> {
    /// Creates the operation with a seeded parameter sampler.
    pub fn new(evaluator: &'a RouteEvaluator<'a>, seed: u64) -> Self {
        Self {
            evaluator,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Relocates `sequence[v1..=v2]` to `insert_pos` on a copy of the route.
    pub fn apply(&self, route: &Route, v1: usize, v2: usize, insert_pos: usize) -> Route {
        let mut out = route.clone();
        self.apply_in_place(&mut out, v1, v2, insert_pos);
        out
    }

    /// Relocates `sequence[v1..=v2]` to `insert_pos` in place. Returns
    /// `false` (leaving the route untouched) on invalid parameters.
    pub fn apply_in_place(
        &self,
        route: &mut Route,
        v1: usize,
        v2: usize,
        insert_pos: usize,
    ) -> bool {
        let len = route.len();
        if len < MIN_ROUTE_LENGTH {
            warn!(len, "route too short for relocate");
            return false;
        }

        let (v1, v2) = if v1 > v2 { (v2, v1) } else { (v1, v2) };
        let segment_length = v2 - v1 + 1;

        if v1 < 1 || v2 > len - 2 {
            error!(v1, v2, len, "invalid relocate segment");
            return false;
        }
        if insert_pos >= len - segment_length || (v1..=v2).contains(&insert_pos) {
            error!(insert_pos, v1, v2, len, "invalid relocate insertion position");
            return false;
        }

        let sequence = route.sequence_mut();
        let segment: Vec<usize> = sequence[v1..=v2].to_vec();
        let mut remaining: Vec<usize> = Vec::with_capacity(len - segment_length);
        remaining.extend_from_slice(&sequence[..v1]);
        remaining.extend_from_slice(&sequence[v2 + 1..]);

        let adjusted = if insert_pos < v1 {
            insert_pos
        } else {
            insert_pos - segment_length
        };

        let mut rebuilt = Vec::with_capacity(len);
        rebuilt.extend_from_slice(&remaining[..adjusted]);
        rebuilt.extend_from_slice(&segment);
        rebuilt.extend_from_slice(&remaining[adjusted..]);
        *sequence = rebuilt;

        debug!(v1, v2, insert_pos, "applied relocate");
        true
    }
}

impl Operation for Relocate<'_> {
    fn name(&self) -> &str {
        "relocate"
    }

    fn apply_random(&mut self, route: &Route) -> Route {
        let len = route.len();
        if len < MIN_ROUTE_LENGTH {
            warn!(len, "route too short for relocate");
            return route.clone();
        }

        let v1 = self.rng.random_range(1..=len - 2);
        let v2 = self.rng.random_range(v1..=len - 2);
        let segment_length = v2 - v1 + 1;
        let positions: Vec<usize> = (0..len - segment_length)
            .filter(|pos| !(v1..=v2).contains(pos))
            .collect();
        let Some(&insert_pos) = positions.choose(&mut self.rng) else {
            warn!(v1, v2, "no insertion position available");
            return route.clone();
        };
        self.apply(route, v1, v2, insert_pos)
    }

    fn apply_best_improvement(&self, route: &Route, only_valid: bool) -> Route {
        let len = route.len();
        if len < MIN_ROUTE_LENGTH {
            warn!(len, "route too short for relocate");
            return route.clone();
        }

        let mut best = route.clone();
        let mut best_value = self.evaluator.objective(route);
        let mut improved = false;

        for v1 in 1..=len - 2 {
            for v2 in v1..=len - 2 {
                let segment_length = v2 - v1 + 1;
                for insert_pos in 0..len - segment_length {
                    // insert_pos == v2 + 1 lands back on v1: the identity move.
                    if insert_pos >= v1 && insert_pos <= v2 + 1 {
                        continue;
                    }
                    let candidate = self.apply(route, v1, v2, insert_pos);
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
        }

        if improved {
            debug!(value = best_value, "best relocate improvement");
        }
        best
    }

    fn apply_first_improvement(&self, route: &Route, only_valid: bool) -> Route {
        let len = route.len();
        if len < MIN_ROUTE_LENGTH {
            warn!(len, "route too short for relocate");
            return route.clone();
        }

        let current_value = self.evaluator.objective(route);
        for v1 in 1..=len - 2 {
            for v2 in v1..=len - 2 {
                let segment_length = v2 - v1 + 1;
                for insert_pos in 0..len - segment_length {
                    if insert_pos >= v1 && insert_pos <= v2 + 1 {
                        continue;
                    }
                    let candidate = self.apply(route, v1, v2, insert_pos);
                    if only_valid && !self.evaluator.is_valid(&candidate) {
                        continue;
                    }
                    if self.evaluator.objective(&candidate) < current_value {
                        debug!(v1, v2, insert_pos, "first relocate improvement");
                        return candidate;
                    }
                }
            }
        }
        route.clone()
    }
}
