//! Late-acceptance hill climbing.

use std::collections::VecDeque;

/// Accepts a candidate iff it beats the current objective from `lookback`
/// iterations ago; for the first `lookback` iterations it compares against
/// the present current objective.
///
/// # Reference
///
/// Burke, E.K. & Bykov, Y. (2017). "The late acceptance hill-climbing
/// heuristic", *European Journal of Operational Research* 258(1), 70-78.
///
/// # Examples
///
/// ```
/// use seqroute::alns::LateAcceptance;
///
/// let mut accept = LateAcceptance::new(2);
/// assert!(accept.accept(9.0, 10.0));  // history short: compare to current
/// assert!(!accept.accept(11.0, 9.0));
/// // History now holds [10.0, 9.0]; the window is full.
/// assert!(accept.accept(9.5, 9.0));   // beats the 10.0 from two rounds ago
/// ```
#[derive(Debug, Clone)]
pub struct LateAcceptance {
    lookback: usize,
    history: VecDeque<f64>,
}

impl LateAcceptance {
    /// Creates the criterion with the given look-back window.
    pub fn new(lookback: usize) -> Self {
        Self {
            lookback,
            history: VecDeque::with_capacity(lookback),
        }
    }

    /// Decides on a candidate and records the current objective.
    pub fn accept(&mut self, candidate: f64, current: f64) -> bool {
        let baseline = match self.history.front() {
            Some(&oldest) if self.history.len() >= self.lookback => oldest,
            _ => current,
        };
        self.history.push_back(current);
        if self.history.len() > self.lookback {
            self.history.pop_front();
        }
        candidate < baseline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warmup_compares_to_current() {
        let mut accept = LateAcceptance::new(10);
        assert!(accept.accept(9.9, 10.0));
        assert!(!accept.accept(10.0, 10.0));
        assert!(!accept.accept(10.1, 10.0));
    }

    #[test]
    fn test_full_window_compares_to_oldest() {
        let mut accept = LateAcceptance::new(3);
        // Fill the window with currents 30, 20, 10.
        accept.accept(f64::INFINITY, 30.0);
        accept.accept(f64::INFINITY, 20.0);
        accept.accept(f64::INFINITY, 10.0);
        // Baseline is now 30: a candidate worse than current but better
        // than the look-back value is still accepted.
        assert!(accept.accept(25.0, 10.0));
        // Window slid to [20, 10, 10]; 25 no longer beats 20.
        assert!(!accept.accept(25.0, 10.0));
    }

    #[test]
    fn test_strictness() {
        let mut accept = LateAcceptance::new(1);
        accept.accept(f64::INFINITY, 10.0);
        // Baseline is exactly 10.0 and the comparison is strict.
        assert!(!accept.accept(10.0, 10.0));
        assert!(accept.accept(9.999, 10.0));
    }
}
