//! Process-scheduling GA problem definition.
//!
//! Bridges a prepared [`Config`] to the generic [`GaRunner`](super::GaRunner):
//! individuals are [`Candidate`] playouts, ranked by the shared objective
//! score with lower final cycle breaking ties.

use rand::Rng;

use super::{Candidate, GaConfig, GaProblem, Individual};
use crate::models::Config;
use crate::sim::Dispatcher;

impl Individual for Candidate {
    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn tie_key(&self) -> u64 {
        self.cycle()
    }
}

/// GA problem over launch orderings of a prepared configuration.
///
/// # Example
/// ```
/// use u_procsim::ga::{GaConfig, GaRunner, ProcessGaProblem};
/// use u_procsim::models::{ConfigBuilder, Process};
///
/// let cfg = ConfigBuilder::new()
///     .with_stock("euro", 100)
///     .with_process(Process::new("buy").with_need("euro", 10).with_result("item", 1).with_duration(5))
///     .with_objective("item")
///     .build()
///     .unwrap();
/// let params = GaConfig::default().with_population_size(10).with_max_generations(5).with_seed(42);
/// let problem = ProcessGaProblem::new(&cfg, &params);
/// let result = GaRunner::run(&problem, &params);
/// assert_eq!(result.best.map(|c| c.fitness), Some(10.0));
/// ```
#[derive(Debug)]
pub struct ProcessGaProblem<'a> {
    cfg: &'a Config,
    params: GaConfig,
    dispatcher: Dispatcher,
}

impl<'a> ProcessGaProblem<'a> {
    /// Creates the problem with the standard dispatcher.
    pub fn new(cfg: &'a Config, params: &GaConfig) -> Self {
        Self {
            cfg,
            params: params.clone(),
            dispatcher: Dispatcher::standard(),
        }
    }

    /// Replaces the dispatcher.
    pub fn with_dispatcher(mut self, dispatcher: Dispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    /// The configuration being scheduled.
    pub fn config(&self) -> &Config {
        self.cfg
    }
}

impl GaProblem for ProcessGaProblem<'_> {
    type Individual = Candidate;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> Candidate {
        Candidate::random(self.cfg, &self.dispatcher, &self.params, rng)
    }

    fn crossover<R: Rng>(&self, parent1: &Candidate, parent2: &Candidate, rng: &mut R) -> Candidate {
        Candidate::crossover(self.cfg, &self.dispatcher, &self.params, parent1, parent2, rng)
    }
}
