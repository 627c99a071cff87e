//! Route objective, total length, and validity.
//!
//! The objective is `L·Δ + D`, where `D` is the total tour length, `Δ` the
//! spread between the longest and shortest consecutive edge, and
//! `L = max_distance_in_matrix · n` a penalty multiplier derived from the
//! instance alone. `L` is large enough that any unit reduction in `Δ`
//! dominates any realizable change in `D`, so length balance takes
//! lexicographic priority over length sum.

use std::cell::OnceCell;

use tracing::{debug, warn};

use crate::distance::DistanceCache;
use crate::edges::EdgeValidator;
use crate::models::{NodeStore, Route, MIN_ROUTE_NODES, START_DEPOT_ID};

/// Evaluates routes against one problem instance.
///
/// Borrows the instance data and memoizes `L` per instance; two evaluators
/// over different stores never share an `L` value.
///
/// # Examples
///
/// ```
/// use seqroute::distance::DistanceCache;
/// use seqroute::edges::EdgeValidator;
/// use seqroute::evaluation::RouteEvaluator;
/// use seqroute::models::{Node, NodeStore, Route};
///
/// let store = NodeStore::from_nodes(vec![
///     Node::new(0, 0.0, 0.0),
///     Node::new(1, 1.0, 0.0),
///     Node::new(2, 2.0, 0.0),
///     Node::new(3, 3.0, 0.0),
/// ]);
/// let distances = DistanceCache::new(store.len());
/// let edges = EdgeValidator::for_store(&store);
/// let evaluator = RouteEvaluator::new(&store, &distances, &edges);
///
/// let route = Route::new(vec![0, 2, 1, 3]);
/// assert_eq!(evaluator.total_length(&route), 5.0);
/// assert!(evaluator.is_valid(&route));
/// ```
pub struct RouteEvaluator<'a> {
    nodes: &'a NodeStore,
    distances: &'a DistanceCache,
    edges: &'a EdgeValidator,
    l_value: OnceCell<f64>,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates an evaluator for the given instance data.
    pub fn new(
        nodes: &'a NodeStore,
        distances: &'a DistanceCache,
        edges: &'a EdgeValidator,
    ) -> Self {
        Self {
            nodes,
            distances,
            edges,
            l_value: OnceCell::new(),
        }
    }

    /// Lengths of every consecutive edge in the route.
    ///
    /// Empty if the route has fewer than two nodes or references an id
    /// missing from the store.
    pub fn edge_lengths(&self, route: &Route) -> Vec<f64> {
        let sequence = route.sequence();
        if sequence.len() < MIN_ROUTE_NODES {
            return Vec::new();
        }
        let mut lengths = Vec::with_capacity(sequence.len() - 1);
        for pair in sequence.windows(2) {
            let (Some(a), Some(b)) = (self.nodes.get(pair[0]), self.nodes.get(pair[1])) else {
                warn!(from = pair[0], to = pair[1], "route references unknown node");
                return Vec::new();
            };
            lengths.push(self.distances.distance(a, b));
        }
        lengths
    }

    /// Total length of the route.
    pub fn total_length(&self, route: &Route) -> f64 {
        self.edge_lengths(route).iter().sum()
    }

    /// Spread between the longest and shortest consecutive edge.
    ///
    /// Zero for routes with no edges.
    pub fn delta(&self, route: &Route) -> f64 {
        let lengths = self.edge_lengths(route);
        if lengths.is_empty() {
            return 0.0;
        }
        let max = lengths.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = lengths.iter().copied().fold(f64::INFINITY, f64::min);
        max - min
    }

    /// Objective value `L·Δ + D`. Degenerate routes evaluate to `+∞`.
    pub fn objective(&self, route: &Route) -> f64 {
        let lengths = self.edge_lengths(route);
        if lengths.is_empty() {
            return f64::INFINITY;
        }
        let total: f64 = lengths.iter().sum();
        let max = lengths.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = lengths.iter().copied().fold(f64::INFINITY, f64::min);
        let delta = max - min;
        let objective = self.l_value() * delta + total;
        debug!(
            delta,
            total_length = total,
            objective,
            "evaluated route objective"
        );
        objective
    }

    /// Penalty multiplier `L = max_distance_in_matrix · n`, memoized per
    /// instance.
    pub fn l_value(&self) -> f64 {
        *self.l_value.get_or_init(|| {
            let all: Vec<_> = self.nodes.nodes().collect();
            let mut max_distance = 0.0f64;
            for (i, a) in all.iter().enumerate() {
                for b in all.iter().skip(i + 1) {
                    max_distance = max_distance.max(self.distances.distance(a, b));
                }
            }
            max_distance * self.nodes.num_intermediate() as f64
        })
    }

    /// Checks the route against the sequence constraints:
    ///
    /// 1. starts at the start depot,
    /// 2. ends at the end depot,
    /// 3. visits each intermediate node exactly once,
    /// 4. uses only admissible transitions between intermediates.
    pub fn is_valid(&self, route: &Route) -> bool {
        let sequence = route.sequence();
        if sequence.len() < MIN_ROUTE_NODES {
            warn!("route has fewer than 2 nodes");
            return false;
        }

        if sequence[0] != START_DEPOT_ID {
            warn!(starts_at = sequence[0], "route does not start at the depot");
            return false;
        }

        let n = self.nodes.num_intermediate();
        let end = self.nodes.end_depot_id();
        if sequence[sequence.len() - 1] != end {
            warn!(
                ends_at = sequence[sequence.len() - 1],
                expected = end,
                "route does not end at the end depot"
            );
            return false;
        }

        let mut intermediate: Vec<usize> = sequence[1..sequence.len() - 1].to_vec();
        intermediate.sort_unstable();
        let expected: Vec<usize> = (1..=n).collect();
        if intermediate != expected {
            warn!("not all intermediate nodes are visited exactly once");
            return false;
        }

        for pair in sequence.windows(2) {
            if !self.edges.is_edge_valid(pair[0], pair[1]) {
                warn!(
                    from = pair[0],
                    to = pair[1],
                    "route uses a forbidden transition"
                );
                return false;
            }
        }

        true
    }
}
