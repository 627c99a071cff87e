//! The destroy → repair → accept loop.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::distance::DistanceCache;
use crate::edges::EdgeValidator;
use crate::evaluation::RouteEvaluator;
use crate::models::{NodeStore, Route};
use crate::search::{Callback, Improver, Termination};

use super::destroy::{DestroyOperator, PathRemoval, RandomRemoval, WorstRemoval};
use super::repair::{GreedyRepair, RepairOperator};
use super::{EdgeBag, LateAcceptance, Outcome, RouletteWheel, LOOKBACK_PERIOD};

/// Adaptive large neighborhood search over edge-bag states.
///
/// Wires the standard operator set — random, path, and worst removal
/// against greedy repair — under roulette-wheel selection and
/// late-acceptance hill climbing. Wall-clock budget drives termination;
/// the iteration gate applies too when enabled.
///
/// # Examples
///
/// ```
/// use seqroute::alns::AlnsEngine;
/// use seqroute::constructive::naive_sequence;
/// use seqroute::distance::DistanceCache;
/// use seqroute::edges::EdgeValidator;
/// use seqroute::evaluation::RouteEvaluator;
/// use seqroute::models::{Node, NodeStore};
/// use seqroute::search::{Callback, Improver, Termination};
///
/// let store = NodeStore::from_nodes(
///     (0..12).map(|i| Node::new(i, (i * i % 7) as f64, i as f64)).collect(),
/// );
/// let distances = DistanceCache::new(store.len());
/// let edges = EdgeValidator::for_store(&store);
/// let evaluator = RouteEvaluator::new(&store, &distances, &edges);
///
/// let mut engine = AlnsEngine::new(
///     &evaluator, &store, &distances, &edges, Termination::new(50, -1.0), 42,
/// );
/// let seed = naive_sequence(&store);
/// let mut callback = Callback::new();
/// let best = engine.improve(&seed, &mut callback);
/// assert!(evaluator.objective(&best[0]) <= evaluator.objective(&seed));
/// ```
pub struct AlnsEngine<'a> {
    evaluator: &'a RouteEvaluator<'a>,
    destroy_ops: Vec<Box<dyn DestroyOperator + 'a>>,
    repair_ops: Vec<Box<dyn RepairOperator + 'a>>,
    selector: RouletteWheel,
    acceptance: LateAcceptance,
    termination: Termination,
    rng: StdRng,
}

impl<'a> AlnsEngine<'a> {
    /// Creates the engine with the standard operator set.
    pub fn new(
        evaluator: &'a RouteEvaluator<'a>,
        nodes: &'a NodeStore,
        distances: &'a DistanceCache,
        edges: &'a EdgeValidator,
        termination: Termination,
        seed: u64,
    ) -> Self {
        let destroy_ops: Vec<Box<dyn DestroyOperator + 'a>> = vec![
            Box::new(RandomRemoval),
            Box::new(PathRemoval),
            Box::new(WorstRemoval::new(nodes, distances)),
        ];
        let repair_ops: Vec<Box<dyn RepairOperator + 'a>> =
            vec![Box::new(GreedyRepair::new(nodes, distances, edges))];
        let selector = RouletteWheel::new(
            [3.0, 2.0, 1.0, 0.5],
            0.8,
            destroy_ops.len(),
            repair_ops.len(),
        );
        Self {
            evaluator,
            destroy_ops,
            repair_ops,
            selector,
            acceptance: LateAcceptance::new(LOOKBACK_PERIOD),
            termination,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Improver for AlnsEngine<'_> {
    fn improve(&mut self, seed: &Route, callback: &mut Callback) -> Vec<Route> {
        self.termination.reset();
        let start = Instant::now();

        let mut current = EdgeBag::from_route(seed);
        let mut current_value = current.objective(self.evaluator);
        let mut best = current.clone();
        let mut best_value = current_value;

        let mut iteration = 0usize;
        loop {
            if self.termination.should_terminate(iteration, Some(best_value)) {
                info!(iteration, best_value, "adaptive search budget exhausted");
                break;
            }

            let destroy_index = self.selector.select_destroy(&mut self.rng);
            let repair_index = self.selector.select_repair(&mut self.rng);
            let destroyed = self.destroy_ops[destroy_index].destroy(&current, &mut self.rng);
            let candidate = self.repair_ops[repair_index].repair(destroyed, &mut self.rng);
            let candidate_value = candidate.objective(self.evaluator);

            let accepted = self.acceptance.accept(candidate_value, current_value);
            let is_best = candidate_value < best_value;
            let outcome = if is_best {
                Outcome::NewGlobalBest
            } else if accepted {
                if candidate_value < current_value {
                    Outcome::BetterThanCurrent
                } else {
                    Outcome::Accepted
                }
            } else {
                Outcome::Rejected
            };

            if is_best {
                best = candidate.clone();
                best_value = candidate_value;
            }
            if is_best || accepted {
                debug!(
                    destroy = self.destroy_ops[destroy_index].name(),
                    repair = self.repair_ops[repair_index].name(),
                    candidate_value,
                    "accepted candidate"
                );
                current = candidate;
                current_value = candidate_value;
            }

            self.selector.update(destroy_index, repair_index, outcome);
            callback.on_iteration(
                iteration,
                current_value,
                best_value,
                outcome == Outcome::NewGlobalBest,
                Some(start.elapsed().as_secs_f64()),
            );
            if callback.snapshots_enabled() {
                if let Some(route) = current.to_route() {
                    callback.snapshot(iteration, &route);
                }
            }
            iteration += 1;
        }

        match best.to_route() {
            Some(route) => vec![route],
            None => vec![seed.clone()],
        }
    }
}
