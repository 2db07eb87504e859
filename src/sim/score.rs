//! Shared scoring.
//!
//! Both searches rank states with the same notion of value:
//! - **time** objective: `TIME_SCALE / cycle`, or `TIME_SCALE` at cycle 0;
//! - **stock** objective: `alpha * stock[target]` plus `beta` times the
//!   distance-discounted stock of every other reachable item.

use serde::{Deserialize, Serialize};

use crate::models::{Config, Objective};

/// Numerator of the time score.
pub const TIME_SCALE: f64 = 100_000.0;

/// Weights of the stock score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Weight of the target stock.
    pub alpha: f64,
    /// Weight of discounted intermediate stock.
    pub beta: f64,
    /// Per-step discount applied `distance` times.
    pub decay: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            beta: 0.1,
            decay: 0.7,
        }
    }
}

impl ScoreWeights {
    /// Sets the target weight.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the intermediate-stock weight.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Sets the distance decay.
    pub fn with_decay(mut self, decay: f64) -> Self {
        self.decay = decay;
        self
    }
}

/// Time score of a state that ended at `cycle`.
pub fn time_score(cycle: u64) -> f64 {
    if cycle == 0 {
        TIME_SCALE
    } else {
        TIME_SCALE / cycle as f64
    }
}

/// Weighted stock reward. Zero for the time objective.
pub fn weighted_reward(cfg: &Config, stocks: &[i64], weights: &ScoreWeights) -> f64 {
    let Objective::Stock(target) = cfg.objective() else {
        return 0.0;
    };
    let intermediate: f64 = stocks
        .iter()
        .enumerate()
        .filter(|&(item, &qty)| item != target && qty > 0)
        .filter_map(|(item, &qty)| {
            cfg.distance(item)
                .map(|d| weights.decay.powi(d as i32) * qty as f64)
        })
        .sum();
    weights.alpha * stocks[target] as f64 + weights.beta * intermediate
}

/// Score of a finished state under the configured objective. Higher is better.
pub fn fitness(cfg: &Config, cycle: u64, stocks: &[i64], weights: &ScoreWeights) -> f64 {
    match cfg.objective() {
        Objective::Time => time_score(cycle),
        Objective::Stock(_) => weighted_reward(cfg, stocks, weights),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConfigBuilder, Process};

    fn chain() -> Config {
        ConfigBuilder::new()
            .with_stock("ore", 10)
            .with_stock("junk", 3)
            .with_process(Process::new("smelt").with_need("ore", 2).with_result("ingot", 1))
            .with_process(Process::new("forge").with_need("ingot", 3).with_result("sword", 1))
            .with_objective("sword")
            .build()
            .unwrap()
    }

    #[test]
    fn test_time_score() {
        assert_eq!(time_score(0), TIME_SCALE);
        assert_eq!(time_score(4), 25_000.0);
        assert!(time_score(5) > time_score(6));
    }

    #[test]
    fn test_weighted_reward_discounts_by_distance() {
        let cfg = chain();
        let mut stocks = vec![0; cfg.item_count()];
        stocks[cfg.item_id("sword").unwrap()] = 2;
        stocks[cfg.item_id("ingot").unwrap()] = 1; // distance 1
        stocks[cfg.item_id("ore").unwrap()] = 4; // distance 2
        stocks[cfg.item_id("junk").unwrap()] = 100; // unreached

        let w = ScoreWeights::default();
        let expected = 2.0 + 0.1 * (0.7 * 1.0 + 0.49 * 4.0);
        assert!((weighted_reward(&cfg, &stocks, &w) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_fitness_follows_objective() {
        let cfg = chain();
        let stocks = cfg.initial_stocks().to_vec();
        let w = ScoreWeights::default().with_beta(0.0);
        assert_eq!(fitness(&cfg, 7, &stocks, &w), 0.0);

        let timed = ConfigBuilder::new()
            .with_stock("a", 1)
            .with_process(Process::new("p").with_need("a", 1).with_duration(5))
            .with_objective("time")
            .build()
            .unwrap();
        assert_eq!(fitness(&timed, 5, timed.initial_stocks(), &w), 20_000.0);
        assert_eq!(weighted_reward(&timed, timed.initial_stocks(), &w), 0.0);
    }
}
