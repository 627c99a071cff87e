//! Lazily memoized Euclidean distance cache.
//!
//! Distances are symmetric by construction: lookups key on
//! `(min(id), max(id))`, so each unordered pair is computed once. Values are
//! rounded to one decimal. The closing edge from the end depot back to the
//! start depot is pre-seeded with distance `0.0`.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::models::Node;

/// Decimal places kept when rounding a computed distance.
const PRECISION_DIGITS: i32 = 1;

/// Memoized pairwise Euclidean distances.
///
/// Entries are computed on first lookup; repeated queries are O(1). The
/// cache is the single owner of its map and mutates it only through
/// [`DistanceCache::distance`], which keeps `&self` receivers workable for
/// every reader under the single-threaded model.
///
/// # Examples
///
/// ```
/// use seqroute::distance::DistanceCache;
/// use seqroute::models::Node;
///
/// let cache = DistanceCache::new(4);
/// let a = Node::new(0, 0.0, 0.0);
/// let b = Node::new(1, 3.0, 4.0);
/// assert_eq!(cache.distance(&a, &b), 5.0);
/// assert_eq!(cache.distance(&b, &a), 5.0);
/// ```
#[derive(Debug)]
pub struct DistanceCache {
    distances: RefCell<HashMap<(usize, usize), f64>>,
}

impl DistanceCache {
    /// Creates a cache for an instance of `num_nodes` nodes.
    ///
    /// Pre-seeds the tour-closing edge `{n+1, 0}` with `0.0`: returning
    /// from the end depot to the start depot is free.
    pub fn new(num_nodes: usize) -> Self {
        let mut distances = HashMap::new();
        if num_nodes > 0 {
            distances.insert((0, num_nodes - 1), 0.0);
        }
        Self {
            distances: RefCell::new(distances),
        }
    }

    /// Memoized distance between two nodes, rounded to one decimal.
    pub fn distance(&self, a: &Node, b: &Node) -> f64 {
        let key = if a.id() <= b.id() {
            (a.id(), b.id())
        } else {
            (b.id(), a.id())
        };
        if let Some(&known) = self.distances.borrow().get(&key) {
            return known;
        }
        let computed = Self::calculate(a, b);
        self.distances.borrow_mut().insert(key, computed);
        computed
    }

    /// Computes the rounded Euclidean distance without touching the cache.
    pub fn calculate(a: &Node, b: &Node) -> f64 {
        if a.id() == b.id() {
            return 0.0;
        }
        let raw = a.distance_to(b);
        let scale = 10f64.powi(PRECISION_DIGITS);
        (raw * scale).round() / scale
    }

    /// Number of cached entries. Never decreases over a run.
    pub fn len(&self) -> usize {
        self.distances.borrow().len()
    }

    /// Returns `true` if no entry has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.distances.borrow().is_empty()
    }
}
