//! Generational loop.
//!
//! Each generation is ranked, the two best individuals breed half of the
//! next population through crossover, and the rest is filled with fresh
//! random playouts. The best individual ever ranked is kept aside and
//! returned. A wall-clock budget is checked before every build and every
//! generation; running out stops the current phase and returns what has
//! been found so far.

use std::cmp::Ordering;
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, info};

use super::{GaConfig, GaProblem, Individual};

/// Outcome of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult<I> {
    /// Best individual ever ranked; `None` if nothing was built in time.
    pub best: Option<I>,
    /// Fitness of `best` (`f64::NEG_INFINITY` when there is none).
    pub best_fitness: f64,
    /// Completed generations.
    pub generations: usize,
    /// Seed the run used.
    pub seed: u64,
}

/// Runs a [`GaProblem`] under a [`GaConfig`].
pub struct GaRunner;

impl GaRunner {
    /// Runs the generational loop to completion or budget exhaustion.
    pub fn run<P: GaProblem>(problem: &P, config: &GaConfig) -> GaResult<P::Individual> {
        let start = Instant::now();
        let deadline = config.time_budget.map(|budget| start + budget);
        let expired = || deadline.is_some_and(|d| Instant::now() >= d);

        let seed = config.seed.unwrap_or_else(rand::random);
        info!(seed, population = config.population_size, "genetic search started");
        let mut rng = SmallRng::seed_from_u64(seed);
        let size = config.population_size.max(1);

        let mut population: Vec<P::Individual> = Vec::with_capacity(size);
        while population.len() < size && !expired() {
            population.push(problem.create_individual(&mut rng));
        }

        let mut best: Option<P::Individual> = None;
        let mut generations = 0;

        while generations < config.max_generations && !population.is_empty() && !expired() {
            rank(&mut population);
            keep_best(&mut best, &population[0]);

            let parent1 = population[0].clone();
            let parent2 = population.get(1).unwrap_or(&population[0]).clone();
            debug!(
                generation = generations,
                top = parent1.fitness(),
                second = parent2.fitness(),
                "generation ranked"
            );

            population.clear();
            while population.len() < size / 2 && !expired() {
                population.push(problem.crossover(&parent1, &parent2, &mut rng));
            }
            while population.len() < size && !expired() {
                population.push(problem.create_individual(&mut rng));
            }
            generations += 1;
        }

        if !population.is_empty() {
            rank(&mut population);
            keep_best(&mut best, &population[0]);
        }

        let best_fitness = best.as_ref().map_or(f64::NEG_INFINITY, Individual::fitness);
        info!(
            generations,
            best_fitness,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "genetic search finished"
        );

        GaResult {
            best,
            best_fitness,
            generations,
            seed,
        }
    }
}

/// Higher fitness first; lower tie key breaks ties.
fn compare<I: Individual>(a: &I, b: &I) -> Ordering {
    b.fitness()
        .partial_cmp(&a.fitness())
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.tie_key().cmp(&b.tie_key()))
}

fn rank<I: Individual>(population: &mut [I]) {
    population.sort_by(compare);
}

fn keep_best<I: Individual>(best: &mut Option<I>, challenger: &I) {
    let better = best
        .as_ref()
        .map_or(true, |current| compare(challenger, current) == Ordering::Less);
    if better {
        *best = Some(challenger.clone());
    }
}
