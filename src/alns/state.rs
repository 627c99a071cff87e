//! Bag-of-edges solution state.

use std::collections::{BTreeMap, HashSet};

use crate::evaluation::RouteEvaluator;
use crate::models::Route;

/// A solution as a node list plus a successor mapping, keyed by node id.
///
/// Complete when every node has an outgoing edge; a complete acyclic chain
/// followed by the wrap back to the start encodes a tour. Conversion back
/// to a [`Route`] is gated by sequence reconstruction, which fails on
/// missing edges and early cycles.
///
/// # Examples
///
/// ```
/// use seqroute::alns::EdgeBag;
/// use seqroute::models::Route;
///
/// let bag = EdgeBag::from_route(&Route::new(vec![0, 1, 2, 3]));
/// assert!(bag.is_complete());
/// assert_eq!(bag.successor(3), Some(0)); // wrap edge
/// assert_eq!(bag.to_route(), Some(Route::new(vec![0, 1, 2, 3])));
/// ```
#[derive(Debug, Clone)]
pub struct EdgeBag {
    nodes: Vec<usize>,
    successor: BTreeMap<usize, usize>,
}

impl EdgeBag {
    /// Builds the bag from a route, adding the wrap edge from the last
    /// node back to the first.
    pub fn from_route(route: &Route) -> Self {
        let nodes = route.sequence().to_vec();
        let mut successor = BTreeMap::new();
        for pair in nodes.windows(2) {
            successor.insert(pair[0], pair[1]);
        }
        if let (Some(&last), Some(&first)) = (nodes.last(), nodes.first()) {
            successor.insert(last, first);
        }
        Self { nodes, successor }
    }

    /// All node ids, in the order the seed route visited them.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Outgoing edge of `from`, if present.
    pub fn successor(&self, from: usize) -> Option<usize> {
        self.successor.get(&from).copied()
    }

    /// Ids that currently have an outgoing edge, in ascending order.
    pub fn connected(&self) -> impl Iterator<Item = usize> + '_ {
        self.successor.keys().copied()
    }

    /// Ids that are the target of some edge.
    pub fn visited(&self) -> HashSet<usize> {
        self.successor.values().copied().collect()
    }

    /// Adds or replaces the outgoing edge of `from`.
    pub fn connect(&mut self, from: usize, to: usize) {
        self.successor.insert(from, to);
    }

    /// Drops the outgoing edge of `from`, returning its old target.
    pub fn disconnect(&mut self, from: usize) -> Option<usize> {
        self.successor.remove(&from)
    }

    /// Number of edges currently in the bag.
    pub fn num_edges(&self) -> usize {
        self.successor.len()
    }

    /// `true` when every node has an outgoing edge.
    pub fn is_complete(&self) -> bool {
        self.successor.len() == self.nodes.len()
    }

    /// Returns `true` if adding `from → to` would close a cycle shorter
    /// than the full tour.
    ///
    /// Follows successors from `to` for up to `|nodes|` steps; coming back
    /// to `from` at exactly step `|nodes| − 1` is the legitimate tour
    /// closure and is allowed.
    pub fn would_form_subcycle(&self, from: usize, to: usize) -> bool {
        let total = self.nodes.len();
        let mut cursor = to;
        for step in 1..total {
            let Some(next) = self.successor(cursor) else {
                return false;
            };
            cursor = next;
            if cursor == from && step != total - 1 {
                return true;
            }
        }
        false
    }

    /// Walks the successor chain from the first node, yielding the visit
    /// sequence if it covers every node before cycling or dead-ending.
    pub fn reconstruct_sequence(&self) -> Option<Vec<usize>> {
        let total = self.nodes.len();
        let Some(&start) = self.nodes.first() else {
            return None;
        };

        let mut sequence = Vec::with_capacity(total);
        let mut seen = HashSet::with_capacity(total);
        let mut cursor = start;
        while sequence.len() < total {
            if !seen.insert(cursor) {
                return None; // early cycle
            }
            sequence.push(cursor);
            if sequence.len() == total {
                break;
            }
            cursor = self.successor(cursor)?;
        }
        Some(sequence)
    }

    /// Converts back to a route, if the bag encodes a full tour.
    pub fn to_route(&self) -> Option<Route> {
        self.reconstruct_sequence().map(Route::new)
    }

    /// Objective of the encoded tour, `+∞` for incomplete or cyclic bags.
    pub fn objective(&self, evaluator: &RouteEvaluator<'_>) -> f64 {
        if !self.is_complete() {
            return f64::INFINITY;
        }
        match self.reconstruct_sequence() {
            Some(sequence) => evaluator.objective(&Route::new(sequence)),
            None => f64::INFINITY,
        }
    }
}
