//! Simulated annealing improver.
//!
//! Random neighborhood moves under a Metropolis acceptance rule with a
//! geometric cooling schedule: a worsening candidate with objective delta
//! `Δobj` is accepted with probability `exp(−Δobj / T)`, and `T` decays by
//! the cooling rate every iteration.
//!
//! # Reference
//!
//! Kirkpatrick, S., Gelatt, C.D. & Vecchi, M.P. (1983). "Optimization by
//! Simulated Annealing", *Science* 220(4598), 671-680.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::evaluation::RouteEvaluator;
use crate::local_search::{Operation, Relocate, Swap, TwoOpt};
use crate::models::Route;
use crate::search::{Callback, Improver, Termination};

/// Default initial temperature.
pub const DEFAULT_INITIAL_TEMPERATURE: f64 = 1000.0;
/// Default geometric cooling rate.
pub const DEFAULT_COOLING_RATE: f64 = 0.95;
/// Default temperature floor; the search stops below it.
pub const DEFAULT_MIN_TEMPERATURE: f64 = 1e-3;

/// Probability of accepting a candidate whose objective is `delta` worse
/// than the current one at temperature `temperature`.
///
/// Improving candidates (`delta < 0`) are always accepted.
///
/// # Examples
///
/// ```
/// use seqroute::sa::acceptance_probability;
///
/// assert_eq!(acceptance_probability(-1.0, 1000.0), 1.0);
/// assert!((acceptance_probability(10.0, 1000.0) - 0.99).abs() < 1e-3);
/// ```
pub fn acceptance_probability(delta: f64, temperature: f64) -> f64 {
    if delta < 0.0 {
        1.0
    } else {
        (-delta / temperature).exp()
    }
}

/// Simulated annealing over the shared neighborhood operations.
///
/// Deterministic for a fixed seed: operation choice, move parameters, and
/// acceptance draws all come from seeded PRNGs.
pub struct SimulatedAnnealing<'a> {
    evaluator: &'a RouteEvaluator<'a>,
    termination: Termination,
    operations: Vec<Box<dyn Operation + 'a>>,
    rng: StdRng,
    initial_temperature: f64,
    cooling_rate: f64,
    min_temperature: f64,
}

impl<'a> SimulatedAnnealing<'a> {
    /// Creates the improver with the default schedule.
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
            rng: StdRng::seed_from_u64(seed),
            initial_temperature: DEFAULT_INITIAL_TEMPERATURE,
            cooling_rate: DEFAULT_COOLING_RATE,
            min_temperature: DEFAULT_MIN_TEMPERATURE,
        }
    }

    /// Overrides the temperature schedule.
    ///
    /// `cooling_rate` must lie in `(0, 1)`; values outside are clamped to
    /// the default.
    pub fn with_schedule(
        mut self,
        initial_temperature: f64,
        cooling_rate: f64,
        min_temperature: f64,
    ) -> Self {
        self.initial_temperature = initial_temperature;
        self.cooling_rate = if cooling_rate > 0.0 && cooling_rate < 1.0 {
            cooling_rate
        } else {
            DEFAULT_COOLING_RATE
        };
        self.min_temperature = min_temperature;
        self
    }
}

impl Improver for SimulatedAnnealing<'_> {
    fn improve(&mut self, seed: &Route, callback: &mut Callback) -> Vec<Route> {
        self.termination.reset();
        let start = Instant::now();

        let mut current = seed.clone();
        let mut current_value = self.evaluator.objective(&current);
        let mut best = current.clone();
        let mut best_value = current_value;

        let mut temperature = self.initial_temperature;
        let mut iteration = 0usize;

        loop {
            if temperature < self.min_temperature {
                info!(iteration, "annealing reached the temperature floor");
                break;
            }
            if self.termination.should_terminate(iteration, Some(best_value)) {
                info!(iteration, "annealing budget exhausted");
                break;
            }

            let index = self.rng.random_range(0..self.operations.len());
            let candidate = self.operations[index].apply_random(&current);
            let candidate_value = self.evaluator.objective(&candidate);
            let delta = candidate_value - current_value;

            let accepted = delta < 0.0
                || self.rng.random::<f64>() < acceptance_probability(delta, temperature);
            if accepted {
                debug!(delta, temperature, "accepted candidate");
                current = candidate;
                current_value = candidate_value;
            }

            let improved = current_value < best_value;
            if improved {
                best = current.clone();
                best_value = current_value;
            }

            callback.on_iteration(
                iteration,
                current_value,
                best_value,
                improved,
                Some(start.elapsed().as_secs_f64()),
            );
            callback.snapshot(iteration, &current);

            temperature *= self.cooling_rate;
            iteration += 1;
        }

        vec![best]
    }
}
