//! Genetic search parameters.

use std::time::Duration;

use crate::sim::ScoreWeights;

/// Tuning knobs for the genetic search.
#[derive(Debug, Clone, PartialEq)]
pub struct GaConfig {
    /// Individuals per generation.
    pub population_size: usize,
    /// Generation limit.
    pub max_generations: usize,
    /// A playout stops extending once its clock reaches this cycle.
    pub max_cycles: u64,
    /// Percentage (0-100) of genes drawn at random during crossover.
    pub mutation_rate: f64,
    /// A playout stops after this many actions, even if time stands still.
    pub max_trace_len: usize,
    /// Wall-clock budget for the whole run.
    pub time_budget: Option<Duration>,
    /// RNG seed; drawn once and logged when `None`.
    pub seed: Option<u64>,
    /// Fitness weights for stock objectives.
    pub weights: ScoreWeights,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 1000,
            max_cycles: 50_000,
            mutation_rate: 10.0,
            max_trace_len: 100_000,
            time_budget: None,
            seed: None,
            weights: ScoreWeights::default(),
        }
    }
}

impl GaConfig {
    /// Sets the population size (at least 1).
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size.max(1);
        self
    }

    /// Sets the generation limit.
    pub fn with_max_generations(mut self, generations: usize) -> Self {
        self.max_generations = generations;
        self
    }

    /// Sets the playout cycle limit.
    pub fn with_max_cycles(mut self, cycles: u64) -> Self {
        self.max_cycles = cycles;
        self
    }

    /// Sets the mutation rate, clamped to 0-100.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 100.0);
        self
    }

    /// Sets the playout action limit.
    pub fn with_max_trace_len(mut self, len: usize) -> Self {
        self.max_trace_len = len;
        self
    }

    /// Sets the wall-clock budget.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    /// Fixes the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the fitness weights.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }
}
