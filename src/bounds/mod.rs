//! Upper and lower bound estimates.
//!
//! Reporting only: no search decision reads these. The upper bound is the
//! length of a realized tour; the lower bound counts the cheapest `n+1`
//! pairwise distances, since every complete route spends exactly `n+1`
//! edges.

use crate::constructive::greedy_sequence;
use crate::distance::DistanceCache;
use crate::models::NodeStore;

/// Upper bound: total length of the greedy nearest-neighbor route.
pub fn upper_bound(store: &NodeStore, distances: &DistanceCache) -> f64 {
    let route = greedy_sequence(store, distances);
    route
        .sequence()
        .windows(2)
        .filter_map(|pair| {
            let a = store.get(pair[0])?;
            let b = store.get(pair[1])?;
            Some(distances.distance(a, b))
        })
        .sum()
}

/// Lower bound: sum of the `n+1` smallest pairwise distances.
pub fn lower_bound(store: &NodeStore, distances: &DistanceCache) -> f64 {
    let all: Vec<_> = store.nodes().collect();
    let mut pairwise = Vec::with_capacity(all.len() * (all.len().saturating_sub(1)) / 2);
    for (i, a) in all.iter().enumerate() {
        for b in all.iter().skip(i + 1) {
            pairwise.push(distances.distance(a, b));
        }
    }
    pairwise.sort_by(|a, b| a.total_cmp(b));
    let num_edges = store.num_intermediate() + 1;
    pairwise.iter().take(num_edges).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Node;

    fn line_instance(count: usize) -> (NodeStore, DistanceCache) {
        let store = NodeStore::from_nodes(
            (0..count).map(|i| Node::new(i, i as f64, 0.0)).collect(),
        );
        let distances = DistanceCache::new(store.len());
        (store, distances)
    }

    #[test]
    fn test_upper_bound_is_greedy_tour_length() {
        let (store, distances) = line_instance(6);
        // Greedy walks the line: 1 + 1 + 1 + 1 + 1 = 5.
        assert_eq!(upper_bound(&store, &distances), 5.0);
    }

    #[test]
    fn test_lower_bound_counts_cheapest_edges() {
        let (store, distances) = line_instance(6);
        // n + 1 = 5 edges; the cheapest pairwise entries are the seeded
        // closing pair (0.0) plus four unit gaps.
        assert_eq!(lower_bound(&store, &distances), 4.0);
    }

    #[test]
    fn test_lower_bound_never_exceeds_upper_bound() {
        let store = NodeStore::from_nodes(vec![
            Node::new(0, 0.0, 0.0),
            Node::new(1, 4.0, 3.0),
            Node::new(2, 1.0, 7.0),
            Node::new(3, 8.0, 2.0),
            Node::new(4, 5.0, 5.0),
        ]);
        let distances = DistanceCache::new(store.len());
        assert!(lower_bound(&store, &distances) <= upper_bound(&store, &distances));
    }
}
