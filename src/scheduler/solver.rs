//! Strategy selection and dispatch.

use std::time::Duration;

use tracing::info;

use super::{SearchReport, StrategyKind};
use crate::beam::{BeamConfig, BeamSearch};
use crate::ga::{GaConfig, GaRunner, ProcessGaProblem};
use crate::models::{Config, Objective};
use crate::sim::{SimState, score};

/// Search strategy with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
    /// Genetic search over playouts.
    Genetic(GaConfig),
    /// Beam search over launch/wait successors.
    Beam(BeamConfig),
}

impl Strategy {
    /// Beam for a `time`-only objective, genetic otherwise.
    pub fn auto(cfg: &Config) -> Self {
        match cfg.objective() {
            Objective::Time => Strategy::Beam(BeamConfig::default()),
            Objective::Stock(_) => Strategy::Genetic(GaConfig::default()),
        }
    }

    /// Kind tag used in reports.
    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Genetic(_) => StrategyKind::Genetic,
            Strategy::Beam(_) => StrategyKind::Beam,
        }
    }
}

/// Runs the selected search against a prepared configuration.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use u_procsim::models::{ConfigBuilder, Process};
/// use u_procsim::scheduler::Solver;
///
/// let cfg = ConfigBuilder::new()
///     .with_stock("a", 1)
///     .with_process(Process::new("p").with_need("a", 1).with_result("b", 1).with_duration(5))
///     .with_objective("time")
///     .build()
///     .unwrap();
/// let report = Solver::new().with_time_budget(Duration::from_secs(1)).solve(&cfg);
/// assert_eq!(report.cycle, 5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Solver {
    strategy: Option<Strategy>,
    time_budget: Option<Duration>,
    seed: Option<u64>,
}

impl Solver {
    /// Creates a solver that picks its strategy from the objective.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces a strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Sets the wall-clock budget, overriding the strategy's own.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    /// Fixes the genetic search seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Strategy that [`solve`](Self::solve) will run on `cfg`.
    pub fn strategy_for(&self, cfg: &Config) -> Strategy {
        let mut strategy = self.strategy.clone().unwrap_or_else(|| Strategy::auto(cfg));
        match &mut strategy {
            Strategy::Genetic(params) => {
                if self.time_budget.is_some() {
                    params.time_budget = self.time_budget;
                }
                if self.seed.is_some() {
                    params.seed = self.seed;
                }
            }
            Strategy::Beam(params) => {
                if self.time_budget.is_some() {
                    params.time_budget = self.time_budget;
                }
            }
        }
        strategy
    }

    /// Runs the search and reports the best result found.
    pub fn solve(&self, cfg: &Config) -> SearchReport {
        let strategy = self.strategy_for(cfg);
        info!(strategy = ?strategy.kind(), "solving");
        match strategy {
            Strategy::Genetic(params) => Self::solve_genetic(cfg, &params),
            Strategy::Beam(params) => Self::solve_beam(cfg, params),
        }
    }

    fn solve_genetic(cfg: &Config, params: &GaConfig) -> SearchReport {
        let problem = ProcessGaProblem::new(cfg, params);
        let result = GaRunner::run(&problem, params);
        match result.best {
            Some(best) => SearchReport::from_parts(
                cfg,
                StrategyKind::Genetic,
                best.cycle(),
                best.state.trace(),
                best.state.stocks(),
                best.fitness,
                None,
            ),
            None => {
                let initial = SimState::new(cfg);
                let fitness = score::fitness(cfg, 0, initial.stocks(), &params.weights);
                SearchReport::from_parts(
                    cfg,
                    StrategyKind::Genetic,
                    0,
                    &[],
                    initial.stocks(),
                    fitness,
                    None,
                )
            }
        }
    }

    fn solve_beam(cfg: &Config, params: BeamConfig) -> SearchReport {
        let weights = params.weights;
        let outcome = BeamSearch::new(cfg, params).run();
        let fitness = score::fitness(cfg, outcome.cycle, &outcome.final_stocks, &weights);
        SearchReport::from_parts(
            cfg,
            StrategyKind::Beam,
            outcome.cycle,
            &outcome.trace,
            &outcome.final_stocks,
            fitness,
            outcome.makespan,
        )
    }
}
