//! Roulette-wheel operator selection.

use rand::rngs::StdRng;
use rand::Rng;

/// What an iteration's candidate achieved, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// New global best.
    NewGlobalBest,
    /// Better than the current solution.
    BetterThanCurrent,
    /// Accepted without improving the current solution.
    Accepted,
    /// Rejected.
    Rejected,
}

impl Outcome {
    fn index(self) -> usize {
        match self {
            Outcome::NewGlobalBest => 0,
            Outcome::BetterThanCurrent => 1,
            Outcome::Accepted => 2,
            Outcome::Rejected => 3,
        }
    }
}

/// Probabilistic operator selection with exponentially decayed scores.
///
/// Destroy and repair operators keep separate weight vectors; both start
/// uniform and drift toward operators that keep producing good outcomes:
/// `w ← decay · w + (1 − decay) · score[outcome]`.
///
/// # Examples
///
/// ```
/// use seqroute::alns::{Outcome, RouletteWheel};
///
/// let mut wheel = RouletteWheel::new([3.0, 2.0, 1.0, 0.5], 0.8, 3, 1);
/// wheel.update(0, 0, Outcome::NewGlobalBest);
/// assert!(wheel.destroy_weights()[0] > wheel.destroy_weights()[1]);
/// ```
#[derive(Debug, Clone)]
pub struct RouletteWheel {
    scores: [f64; 4],
    decay: f64,
    destroy_weights: Vec<f64>,
    repair_weights: Vec<f64>,
}

impl RouletteWheel {
    /// Creates the wheel with uniform initial weights.
    pub fn new(scores: [f64; 4], decay: f64, num_destroy: usize, num_repair: usize) -> Self {
        Self {
            scores,
            decay,
            destroy_weights: vec![1.0; num_destroy],
            repair_weights: vec![1.0; num_repair],
        }
    }

    /// Picks a destroy operator index proportionally to its weight.
    pub fn select_destroy(&self, rng: &mut StdRng) -> usize {
        spin(&self.destroy_weights, rng)
    }

    /// Picks a repair operator index proportionally to its weight.
    pub fn select_repair(&self, rng: &mut StdRng) -> usize {
        spin(&self.repair_weights, rng)
    }

    /// Rewards the operators used this iteration according to the outcome.
    pub fn update(&mut self, destroy_index: usize, repair_index: usize, outcome: Outcome) {
        let score = self.scores[outcome.index()];
        let d = &mut self.destroy_weights[destroy_index];
        *d = self.decay * *d + (1.0 - self.decay) * score;
        let r = &mut self.repair_weights[repair_index];
        *r = self.decay * *r + (1.0 - self.decay) * score;
    }

    /// Current destroy-operator weights.
    pub fn destroy_weights(&self) -> &[f64] {
        &self.destroy_weights
    }

    /// Current repair-operator weights.
    pub fn repair_weights(&self) -> &[f64] {
        &self.repair_weights
    }
}

/// Samples an index with probability proportional to its weight.
fn spin(weights: &[f64], rng: &mut StdRng) -> usize {
    let total: f64 = weights.iter().sum();
    let mut remaining = rng.random::<f64>() * total;
    for (index, &weight) in weights.iter().enumerate() {
        if remaining < weight {
            return index;
        }
        remaining -= weight;
    }
    weights.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_update_pulls_weight_toward_score() {
        let mut wheel = RouletteWheel::new([3.0, 2.0, 1.0, 0.5], 0.8, 3, 1);
        wheel.update(0, 0, Outcome::NewGlobalBest);
        // 0.8 · 1.0 + 0.2 · 3.0 = 1.4
        assert!((wheel.destroy_weights()[0] - 1.4).abs() < 1e-12);
        assert_eq!(wheel.destroy_weights()[1], 1.0);
        assert!((wheel.repair_weights()[0] - 1.4).abs() < 1e-12);
    }

    #[test]
    fn test_rejection_decays_weight() {
        let mut wheel = RouletteWheel::new([3.0, 2.0, 1.0, 0.5], 0.8, 2, 1);
        wheel.update(1, 0, Outcome::Rejected);
        // 0.8 · 1.0 + 0.2 · 0.5 = 0.9
        assert!((wheel.destroy_weights()[1] - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_repeated_updates_converge_to_score() {
        let mut wheel = RouletteWheel::new([3.0, 2.0, 1.0, 0.5], 0.8, 1, 1);
        for _ in 0..200 {
            wheel.update(0, 0, Outcome::BetterThanCurrent);
        }
        assert!((wheel.destroy_weights()[0] - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_selection_is_seed_deterministic() {
        let wheel = RouletteWheel::new([3.0, 2.0, 1.0, 0.5], 0.8, 3, 1);
        let picks_a: Vec<usize> = {
            let mut rng = StdRng::seed_from_u64(42);
            (0..50).map(|_| wheel.select_destroy(&mut rng)).collect()
        };
        let picks_b: Vec<usize> = {
            let mut rng = StdRng::seed_from_u64(42);
            (0..50).map(|_| wheel.select_destroy(&mut rng)).collect()
        };
        assert_eq!(picks_a, picks_b);
    }

    #[test]
    fn test_selection_favors_heavy_operator() {
        let mut wheel = RouletteWheel::new([3.0, 2.0, 1.0, 0.5], 0.8, 2, 1);
        for _ in 0..50 {
            wheel.update(0, 0, Outcome::NewGlobalBest);
            wheel.update(1, 0, Outcome::Rejected);
        }
        let mut rng = StdRng::seed_from_u64(42);
        let picks_of_zero = (0..1000)
            .filter(|_| wheel.select_destroy(&mut rng) == 0)
            .count();
        // Weights converge to 3.0 vs 0.5, so operator 0 wins ~6/7 of spins.
        assert!(picks_of_zero > 700);
    }

    #[test]
    fn test_single_operator_always_selected() {
        let wheel = RouletteWheel::new([3.0, 2.0, 1.0, 0.5], 0.8, 3, 1);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            assert_eq!(wheel.select_repair(&mut rng), 0);
        }
    }
}
