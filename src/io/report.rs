//! Report emission: run summary and bounds file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::evaluation::RouteEvaluator;
use crate::models::Route;

/// Formats the per-run summary.
///
/// ```text
/// Route: 0-2-1-3
/// Total Distance: 5.00
/// Delta Value: 1.00
/// Objective: 9.00
/// Valid: true
/// ```
pub fn route_summary(route: &Route, evaluator: &RouteEvaluator<'_>) -> String {
    format!(
        "Route: {route}\nTotal Distance: {:.2}\nDelta Value: {:.2}\nObjective: {:.2}\nValid: {}",
        evaluator.total_length(route),
        evaluator.delta(route),
        evaluator.objective(route),
        evaluator.is_valid(route),
    )
}

/// Writes the run summary to `<dir>/route.txt`.
pub fn write_summary(
    dir: &Path,
    route: &Route,
    evaluator: &RouteEvaluator<'_>,
) -> Result<PathBuf, Error> {
    let path = dir.join("route.txt");
    fs::write(&path, route_summary(route, evaluator) + "\n")?;
    Ok(path)
}

/// Writes the bounds file to `<dir>/bounds.txt`.
pub fn write_bounds(dir: &Path, upper: f64, lower: f64) -> Result<PathBuf, Error> {
    let path = dir.join("bounds.txt");
    fs::write(&path, format!("Upper bound: {upper:.2}\nLower bound: {lower:.2}\n"))?;
    Ok(path)
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
    fn test_summary_format() {
        let (store, distances, edges) = line_instance(6);
        let evaluator = RouteEvaluator::new(&store, &distances, &edges);
        let route = Route::new(vec![0, 1, 2, 3, 4, 5]);
        let summary = route_summary(&route, &evaluator);
        assert!(summary.starts_with("Route: 0-1-2-3-4-5\n"));
        assert!(summary.contains("Total Distance: 5.00"));
        assert!(summary.contains("Delta Value: 0.00"));
        assert!(summary.contains("Objective: 5.00"));
    }

    #[test]
    fn test_summary_reports_invalid_route() {
        let (store, distances, edges) = line_instance(6);
        let evaluator = RouteEvaluator::new(&store, &distances, &edges);
        // n = 4: 3 → 4 is odd → even with 3 ≥ 2 — forbidden.
        let route = Route::new(vec![0, 1, 2, 3, 4, 5]);
        let summary = route_summary(&route, &evaluator);
        assert!(summary.ends_with("Valid: false"));
    }

    #[test]
    fn test_write_bounds_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_bounds(dir.path(), 12.345, 6.789).expect("write");
        let content = std::fs::read_to_string(path).expect("read");
        assert_eq!(content, "Upper bound: 12.35\nLower bound: 6.79\n");
    }

    #[test]
    fn test_write_summary_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (store, distances, edges) = line_instance(4);
        let evaluator = RouteEvaluator::new(&store, &distances, &edges);
        let route = Route::new(vec![0, 2, 1, 3]);
        let path = write_summary(dir.path(), &route, &evaluator).expect("write");
        let content = std::fs::read_to_string(path).expect("read");
        assert!(content.starts_with("Route: 0-2-1-3\n"));
        assert!(content.ends_with("Valid: true\n"));
    }
}
