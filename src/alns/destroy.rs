//! Destroy operators.
//!
//! Each operator removes `⌊DEGREE_OF_DESTRUCTION · |edges|⌋` outgoing
//! edges from a copy of the current state:
//!
//! - [`RandomRemoval`] — drops the outgoing edges of uniformly picked nodes
//! - [`PathRemoval`] — follows the chain from a random node, dropping each
//!   edge in turn
//! - [`WorstRemoval`] — drops the longest edges first

use rand::rngs::StdRng;
use rand::Rng;
use tracing::debug;

use crate::distance::DistanceCache;
use crate::models::NodeStore;

use super::{EdgeBag, DEGREE_OF_DESTRUCTION};

/// A destroy operator over edge-bag states.
pub trait DestroyOperator {
    /// Operator name for logs and selection statistics.
    fn name(&self) -> &str;

    /// Returns a partially destroyed copy of `state`.
    fn destroy(&self, state: &EdgeBag, rng: &mut StdRng) -> EdgeBag;
}

/// Number of edges a destroy pass removes.
fn edges_to_remove(state: &EdgeBag) -> usize {
    (state.num_edges() as f64 * DEGREE_OF_DESTRUCTION) as usize
}

/// Drops the outgoing edge of nodes picked uniformly without replacement.
pub struct RandomRemoval;

impl DestroyOperator for RandomRemoval {
    fn name(&self) -> &str {
        "random_removal"
    }

    fn destroy(&self, state: &EdgeBag, rng: &mut StdRng) -> EdgeBag {
        let mut destroyed = state.clone();
        let num_remove = edges_to_remove(state).min(destroyed.nodes().len());
        let picked = rand::seq::index::sample(rng, destroyed.nodes().len(), num_remove);
        for idx in picked {
            let node = destroyed.nodes()[idx];
            destroyed.disconnect(node);
        }
        debug!(removed = num_remove, "random removal");
        destroyed
    }
}

/// Drops a run of consecutive edges starting from a random node.
pub struct PathRemoval;

impl DestroyOperator for PathRemoval {
    fn name(&self) -> &str {
        "path_removal"
    }

    fn destroy(&self, state: &EdgeBag, rng: &mut StdRng) -> EdgeBag {
        let mut destroyed = state.clone();
        if destroyed.nodes().len() < 3 {
            return destroyed;
        }

        let start_idx = rng.random_range(0..destroyed.nodes().len());
        let mut cursor = destroyed.nodes()[start_idx];
        for _ in 0..edges_to_remove(state) {
            match destroyed.disconnect(cursor) {
                Some(next) => cursor = next,
                None => break,
            }
        }
        destroyed
    }
}

/// Drops the edges with the largest length.
pub struct WorstRemoval<'a> {
    nodes: &'a NodeStore,
    distances: &'a DistanceCache,
}

impl<'a> WorstRemoval<'a> {
    /// Creates the operator over the instance data.
    pub fn new(nodes: &'a NodeStore, distances: &'a DistanceCache) -> Self {
        Self { nodes, distances }
    }

    fn edge_length(&self, from: usize, to: usize) -> f64 {
        match (self.nodes.get(from), self.nodes.get(to)) {
            (Some(a), Some(b)) => self.distances.distance(a, b),
            _ => 0.0,
        }
    }
}

impl DestroyOperator for WorstRemoval<'_> {
    fn name(&self) -> &str {
        "worst_removal"
    }

    fn destroy(&self, state: &EdgeBag, _rng: &mut StdRng) -> EdgeBag {
        let mut destroyed = state.clone();
        if destroyed.num_edges() == 0 {
            return destroyed;
        }

        let mut edges: Vec<(usize, f64)> = destroyed
            .connected()
            .map(|from| {
                let to = destroyed.successor(from).unwrap_or(from);
                (from, self.edge_length(from, to))
            })
            .collect();
        // Stable sort keeps ascending-id order among equal lengths.
        edges.sort_by(|a, b| b.1.total_cmp(&a.1));

        let num_remove = edges_to_remove(state).min(edges.len());
        for (from, length) in edges.into_iter().take(num_remove) {
            debug!(from, length, "removing worst edge");
            destroyed.disconnect(from);
        }
        destroyed
    }
}
