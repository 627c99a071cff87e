//! Constructive heuristics producing seed routes.
//!
//! - [`naive_sequence()`] — visits nodes in ascending id order
//! - [`greedy_sequence()`] — nearest-neighbor chain between the depots
//!
//! Both emit structurally complete sequences; parity validity is a separate
//! query on the evaluator.

use tracing::{debug, warn};

use crate::distance::DistanceCache;
use crate::models::{NodeStore, Route};

/// Builds the sequence `[0, 1, …, n, n+1]`.
///
/// Deterministic and always structurally complete.
///
/// # Examples
///
/// ```
/// use seqroute::constructive::naive_sequence;
/// use seqroute::models::{Node, NodeStore};
///
/// let store = NodeStore::from_nodes(
///     (0..6).map(|i| Node::new(i, i as f64, 0.0)).collect(),
/// );
/// assert_eq!(naive_sequence(&store).sequence(), &[0, 1, 2, 3, 4, 5]);
/// ```
pub fn naive_sequence(store: &NodeStore) -> Route {
    Route::new(store.ids())
}

/// Builds a route by repeatedly hopping to the nearest unvisited
/// intermediate node, starting at the start depot and closing at the end
/// depot.
///
/// O(n²). Ties break toward the lower id.
pub fn greedy_sequence(store: &NodeStore, distances: &DistanceCache) -> Route {
    let ids = store.ids();
    if ids.len() < 2 {
        warn!("too few nodes for greedy construction");
        return Route::new(ids);
    }

    let start = ids[0];
    let end = ids[ids.len() - 1];
    let mut unvisited: Vec<usize> = ids[1..ids.len() - 1].to_vec();
    let mut sequence = vec![start];
    let mut current = start;

    while !unvisited.is_empty() {
        let mut nearest: Option<(usize, usize, f64)> = None;
        for (idx, &candidate) in unvisited.iter().enumerate() {
            let (Some(a), Some(b)) = (store.get(current), store.get(candidate)) else {
                continue;
            };
            let d = distances.distance(a, b);
            if nearest.is_none_or(|(_, _, best)| d < best) {
                nearest = Some((idx, candidate, d));
            }
        }
        let Some((idx, next, _)) = nearest else {
            debug!("no reachable unvisited node left");
            break;
        };
        sequence.push(next);
        unvisited.remove(idx);
        current = next;
    }

    sequence.push(end);
    debug!(len = sequence.len(), "constructed greedy route");
    Route::new(sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Node;

    fn line_store(count: usize) -> NodeStore {
        NodeStore::from_nodes((0..count).map(|i| Node::new(i, i as f64, 0.0)).collect())
    }

    #[test]
    fn test_naive_emits_ascending_ids() {
        let store = line_store(6);
        let route = naive_sequence(&store);
        assert_eq!(route.sequence(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_naive_is_structurally_complete() {
        let store = line_store(8);
        let route = naive_sequence(&store);
        assert_eq!(route.len(), 8);
        assert_eq!(route.first(), Some(0));
        assert_eq!(route.last(), Some(7));
    }

    #[test]
    fn test_greedy_visits_every_node_once() {
        let store = NodeStore::from_nodes(vec![
            Node::new(0, 0.0, 0.0),
            Node::new(1, 5.0, 0.0),
            Node::new(2, 1.0, 0.0),
            Node::new(3, 3.0, 0.0),
            Node::new(4, 9.0, 9.0),
        ]);
        let distances = DistanceCache::new(store.len());
        let route = greedy_sequence(&store, &distances);
        // From the depot: 2 (d=1), then 3 (d=2), then 1 (d=2), close at 4.
        assert_eq!(route.sequence(), &[0, 2, 3, 1, 4]);
    }

    #[test]
    fn test_greedy_handles_degenerate_store() {
        let store = line_store(1);
        let distances = DistanceCache::new(store.len());
        let route = greedy_sequence(&store, &distances);
        assert_eq!(route.sequence(), &[0]);
    }
}
