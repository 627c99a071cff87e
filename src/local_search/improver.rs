//! Round-robin best-improvement local search.

use std::time::Instant;

use tracing::{debug, info};

use crate::evaluation::RouteEvaluator;
use crate::models::Route;
use crate::search::{Callback, Improver, Termination};

use super::{Operation, Relocate, Swap, TwoOpt};

/// Search state: either still exploring neighborhoods or done.
#[derive(Debug, Clone, Copy, PartialEq)]
enum SearchState {
    Exploring,
    Terminated,
}

/// Local search over a fixed round-robin of neighborhood operations.
///
/// Each iteration applies the best-improvement variant of the next
/// operation in `{2-opt → relocate → swap}`. The search stops when a
/// termination gate trips or when a full cycle over all operations yields
/// no improvement: best-improvement steps are deterministic, so an
/// improvement-free cycle is a fixed point.
///
/// # Examples
///
/// ```
/// use seqroute::distance::DistanceCache;
/// use seqroute::edges::EdgeValidator;
/// use seqroute::evaluation::RouteEvaluator;
/// use seqroute::local_search::LocalSearch;
/// use seqroute::models::{Node, NodeStore, Route};
/// use seqroute::search::{Callback, Improver, Termination};
///
/// let store = NodeStore::from_nodes(
///     (0..6).map(|i| Node::new(i, i as f64, 0.0)).collect(),
/// );
/// let distances = DistanceCache::new(store.len());
/// let edges = EdgeValidator::for_store(&store);
/// let evaluator = RouteEvaluator::new(&store, &distances, &edges);
///
/// let mut search = LocalSearch::new(&evaluator, Termination::new(50, -1.0), 42);
/// let mut callback = Callback::new();
/// let seed = Route::new(vec![0, 3, 2, 1, 4, 5]);
/// let best = search.improve(&seed, &mut callback);
/// assert_eq!(best.len(), 1);
/// assert!(evaluator.objective(&best[0]) <= evaluator.objective(&seed));
/// ```
pub struct LocalSearch<'a> {
    evaluator: &'a RouteEvaluator<'a>,
    termination: Termination,
    operations: Vec<Box<dyn Operation + 'a>>,
    only_valid: bool,
}

impl<'a> LocalSearch<'a> {
    /// Creates the improver with the standard operation round-robin.
    pub fn new(evaluator: &'a RouteEvaluator<'a>, termination: Termination, seed: u64) -> Self {
        let operations: Vec<Box<dyn Operation + 'a>> = vec![
            Box::new(TwoOpt::new(evaluator, seed)),
            Box::new(Relocate::new(evaluator, seed)),
            Box::new(Swap::new(evaluator, seed)),
        ];
        Self {
            evaluator,
            termination,
            operations,
            only_valid: true,
        }
    }

    /// Also considers candidates that violate the sequence constraints.
    pub fn with_invalid_candidates(mut self) -> Self {
        self.only_valid = false;
        self
    }
}

impl Improver for LocalSearch<'_> {
    fn improve(&mut self, seed: &Route, callback: &mut Callback) -> Vec<Route> {
        self.termination.reset();
        let start = Instant::now();

        let mut current = seed.clone();
        let mut current_value = self.evaluator.objective(&current);
        let mut best = current.clone();
        let mut best_value = current_value;

        let mut state = SearchState::Exploring;
        let mut iteration = 0usize;
        let mut idle_operations = 0usize;

        while state == SearchState::Exploring {
            if self.termination.should_terminate(iteration, Some(best_value)) {
                info!(iteration, "local search budget exhausted");
                state = SearchState::Terminated;
                continue;
            }

            let operation = &self.operations[iteration % self.operations.len()];
            let candidate = operation.apply_best_improvement(&current, self.only_valid);
            let value = self.evaluator.objective(&candidate);
            let improved = value < current_value;

            if improved {
                debug!(
                    operation = operation.name(),
                    value, "local search step improved"
                );
                current = candidate;
                current_value = value;
                idle_operations = 0;
                if current_value < best_value {
                    best = current.clone();
                    best_value = current_value;
                }
            } else {
                idle_operations += 1;
            }

            callback.on_iteration(
                iteration,
                current_value,
                best_value,
                improved,
                Some(start.elapsed().as_secs_f64()),
            );
            callback.snapshot(iteration, &current);

            if idle_operations >= self.operations.len() {
                info!(iteration, best_value, "local search converged");
                state = SearchState::Terminated;
            }
            iteration += 1;
        }

        vec![best]
    }
}
