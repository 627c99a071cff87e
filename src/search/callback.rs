//! Append-only iteration journal.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::models::Route;

/// One journal entry per improver iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationRecord {
    /// Iteration index, starting at 0.
    pub iteration: usize,
    /// Objective of the current solution after this iteration.
    pub current_value: f64,
    /// Objective of the best solution found so far.
    pub best_value: f64,
    /// Whether this iteration improved on the previous current value.
    pub improved: bool,
    /// Seconds elapsed since the search started, if measured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<f64>,
}

/// Collects per-iteration metrics and optional route snapshots.
///
/// # Examples
///
/// ```
/// use seqroute::search::Callback;
///
/// let mut callback = Callback::new();
/// callback.on_iteration(0, 42.0, 42.0, true, None);
/// callback.on_iteration(1, 40.0, 40.0, true, None);
/// assert_eq!(callback.iterations().len(), 2);
/// assert!(callback.iterations()[1].best_value <= callback.iterations()[0].best_value);
/// ```
#[derive(Debug, Default)]
pub struct Callback {
    iterations: Vec<IterationRecord>,
    routes: BTreeMap<usize, Vec<usize>>,
    snapshot_routes: bool,
}

impl Callback {
    /// Creates an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Also captures the full sequence on every iteration an improver
    /// offers one.
    pub fn with_route_snapshots(mut self) -> Self {
        self.snapshot_routes = true;
        self
    }

    /// Whether per-iteration snapshots were requested.
    pub fn snapshots_enabled(&self) -> bool {
        self.snapshot_routes
    }

    /// Records the sequence for this iteration if snapshots are enabled.
    pub fn snapshot(&mut self, iteration: usize, route: &Route) {
        if self.snapshot_routes {
            self.save_route(iteration, route);
        }
    }

    /// Appends one iteration record.
    pub fn on_iteration(
        &mut self,
        iteration: usize,
        current_value: f64,
        best_value: f64,
        improved: bool,
        runtime: Option<f64>,
    ) {
        self.iterations.push(IterationRecord {
            iteration,
            current_value,
            best_value,
            improved,
            runtime,
        });
    }

    /// Stores a snapshot of the full sequence at an iteration.
    pub fn save_route(&mut self, iteration: usize, route: &Route) {
        self.routes.insert(iteration, route.sequence().to_vec());
    }

    /// All journaled iterations, in order.
    pub fn iterations(&self) -> &[IterationRecord] {
        &self.iterations
    }

    /// All saved route snapshots, keyed by iteration.
    pub fn routes(&self) -> &BTreeMap<usize, Vec<usize>> {
        &self.routes
    }

    /// Writes the iteration records to a JSON file.
    pub fn iterations_to_file(&self, path: &Path) -> Result<(), Error> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), &self.iterations)?;
        Ok(())
    }

    /// Writes the route snapshots to a JSON file.
    pub fn routes_to_file(&self, path: &Path) -> Result<(), Error> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), &self.routes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_appended_in_order() {
        let mut cb = Callback::new();
        cb.on_iteration(0, 10.0, 10.0, true, Some(0.1));
        cb.on_iteration(1, 12.0, 10.0, false, Some(0.2));
        let records = cb.iterations();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].iteration, 0);
        assert!(records[0].improved);
        assert!(!records[1].improved);
        assert_eq!(records[1].best_value, 10.0);
    }

    #[test]
    fn test_route_snapshots() {
        let mut cb = Callback::new();
        cb.save_route(3, &Route::new(vec![0, 1, 2]));
        cb.save_route(7, &Route::new(vec![0, 2, 1]));
        assert_eq!(cb.routes().len(), 2);
        assert_eq!(cb.routes()[&3], vec![0, 1, 2]);
    }

    #[test]
    fn test_snapshot_respects_flag() {
        let mut off = Callback::new();
        off.snapshot(0, &Route::new(vec![0, 1]));
        assert!(off.routes().is_empty());

        let mut on = Callback::new().with_route_snapshots();
        on.snapshot(0, &Route::new(vec![0, 1]));
        assert_eq!(on.routes().len(), 1);
    }

    #[test]
    fn test_iterations_to_file_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("iterations.json");
        let mut cb = Callback::new();
        cb.on_iteration(0, 5.0, 5.0, true, None);
        cb.iterations_to_file(&path).expect("write");

        let raw = std::fs::read_to_string(&path).expect("read");
        let parsed: Vec<IterationRecord> = serde_json::from_str(&raw).expect("parse");
        assert_eq!(parsed, cb.iterations());
        // The unmeasured runtime is omitted, not serialized as null.
        assert!(!raw.contains("runtime"));
    }

    #[test]
    fn test_routes_to_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("routes.json");
        let mut cb = Callback::new();
        cb.save_route(0, &Route::new(vec![0, 1, 2, 3]));
        cb.routes_to_file(&path).expect("write");

        let raw = std::fs::read_to_string(&path).expect("read");
        let parsed: BTreeMap<usize, Vec<usize>> = serde_json::from_str(&raw).expect("parse");
        assert_eq!(parsed[&0], vec![0, 1, 2, 3]);
    }
}
