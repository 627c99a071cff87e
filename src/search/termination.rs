//! Termination criteria for iterative improvers.

use std::time::Instant;

/// Budget gates for an iterative search.
///
/// Negative `max_iterations` / `max_seconds` disable the respective gate;
/// the value gates are disabled while left at their infinite defaults. A
/// terminator with every gate disabled never trips.
///
/// # Examples
///
/// ```
/// use seqroute::search::Termination;
///
/// let termination = Termination::new(100, -1.0);
/// assert!(!termination.should_terminate(99, None));
/// assert!(termination.should_terminate(100, None));
/// ```
#[derive(Debug, Clone)]
pub struct Termination {
    max_iterations: i64,
    max_seconds: f64,
    min_value: f64,
    max_value: f64,
    start_time: Instant,
}

impl Termination {
    /// Creates a terminator with iteration and wall-clock gates.
    pub fn new(max_iterations: i64, max_seconds: f64) -> Self {
        Self {
            max_iterations,
            max_seconds,
            min_value: f64::NEG_INFINITY,
            max_value: f64::INFINITY,
            start_time: Instant::now(),
        }
    }

    /// Adds value gates: the search is done once the best value reaches
    /// `min_value` from above or `max_value` from below.
    pub fn with_value_gates(mut self, min_value: f64, max_value: f64) -> Self {
        self.min_value = min_value;
        self.max_value = max_value;
        self
    }

    /// Wall-clock budget in seconds; negative when disabled.
    pub fn max_seconds(&self) -> f64 {
        self.max_seconds
    }

    /// Re-samples the start time.
    pub fn reset(&mut self) {
        self.start_time = Instant::now();
    }

    /// Returns `true` if any enabled gate is tripped.
    ///
    /// `value` should be the best value found so far: the gates mean
    /// "we are done", and only the best route ever becomes the answer.
    pub fn should_terminate(&self, iteration: usize, value: Option<f64>) -> bool {
        if self.max_seconds > 0.0 && self.start_time.elapsed().as_secs_f64() >= self.max_seconds {
            return true;
        }
        if self.max_iterations > 0 && iteration >= self.max_iterations as usize {
            return true;
        }
        if let Some(value) = value {
            if self.min_value.is_finite() && value <= self.min_value {
                return true;
            }
            if self.max_value.is_finite() && value >= self.max_value {
                return true;
            }
        }
        false
    }
}

impl Default for Termination {
    /// All gates disabled.
    fn default() -> Self {
        Self::new(-1, -1.0)
    }
}
