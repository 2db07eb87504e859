//! Beam search over launch/wait successors.
//!
//! Anytime alternative to the genetic search, aimed at the `time`
//! objective. Every generation expands each beam node into one child per
//! runnable process plus a wait child when something is in flight, ranks
//! all children by `cycle + h` and keeps the best `beam_width`. The first
//! node found with nothing runnable and nothing in flight is terminal and
//! its cycle is the answer.
//!
//! # Heuristic
//!
//! - **time**: time left until the next completion when something is in
//!   flight, else the shortest runnable duration, else 0.
//! - **stock**: `cycle * lambda - weighted_reward`.
//!
//! Nodes keep an untraced [`SimState`]; launches go into a shared
//! [`LaunchArena`] and the trace of the answer is rebuilt from it.
//!
//! # Reference
//! - Lowerre (1976), "The HARPY Speech Recognition System"

mod arena;

pub use arena::LaunchArena;

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::models::{Config, Objective, TraceEntry};
use crate::sim::{ScoreWeights, SimState, score};

/// Arena size beyond which unreachable records are dropped.
const COMPACT_THRESHOLD: usize = 1 << 20;

/// Beam search parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct BeamConfig {
    /// Nodes kept per generation (at least 1).
    pub beam_width: usize,
    /// Generation limit.
    pub max_iter: usize,
    /// Cycle penalty in the stock heuristic.
    pub lambda: f64,
    /// Reward weights for the stock heuristic.
    pub weights: ScoreWeights,
    /// Optional wall-clock budget.
    pub time_budget: Option<Duration>,
}

impl Default for BeamConfig {
    fn default() -> Self {
        Self {
            beam_width: 100,
            max_iter: 10_000,
            lambda: 0.0,
            weights: ScoreWeights::default(),
            time_budget: None,
        }
    }
}

impl BeamConfig {
    /// Sets the beam width (at least 1).
    pub fn with_beam_width(mut self, width: usize) -> Self {
        self.beam_width = width.max(1);
        self
    }

    /// Sets the generation limit.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Sets the cycle penalty.
    pub fn with_lambda(mut self, lambda: f64) -> Self {
        self.lambda = lambda;
        self
    }

    /// Sets the reward weights.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Sets the wall-clock budget.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }
}

/// Result of a beam search.
#[derive(Debug, Clone)]
pub struct BeamOutcome {
    /// Cycle of the terminal node, `None` when the budget ran out first.
    pub makespan: Option<u64>,
    /// Launches leading to the reported state.
    pub trace: Vec<TraceEntry>,
    /// Reported cycle. On exhaustion this is the leading node, drained.
    pub cycle: u64,
    /// Stocks at `cycle`.
    pub final_stocks: Vec<i64>,
    /// Generations expanded.
    pub iterations: usize,
}

impl BeamOutcome {
    /// The makespan, or `-1` when no terminal state was reached.
    pub fn cycle_or_sentinel(&self) -> i64 {
        self.makespan.map_or(-1, |m| m as i64)
    }
}

#[derive(Debug, Clone)]
struct Node {
    state: SimState,
    head: Option<usize>,
    key: f64,
}

/// Beam search over a prepared configuration.
#[derive(Debug)]
pub struct BeamSearch<'a> {
    cfg: &'a Config,
    params: BeamConfig,
}

impl<'a> BeamSearch<'a> {
    /// Creates a search.
    pub fn new(cfg: &'a Config, params: BeamConfig) -> Self {
        Self { cfg, params }
    }

    /// Heuristic estimate `h` for `state`.
    pub fn heuristic(&self, state: &SimState) -> f64 {
        match self.cfg.objective() {
            Objective::Time => {
                if let Some(next) = state.next_completion() {
                    next.saturating_sub(state.cycle()) as f64
                } else {
                    state
                        .runnable()
                        .iter()
                        .map(|&p| self.cfg.process(p).duration)
                        .min()
                        .unwrap_or(0) as f64
                }
            }
            Objective::Stock(_) => {
                state.cycle() as f64 * self.params.lambda
                    - score::weighted_reward(self.cfg, state.stocks(), &self.params.weights)
            }
        }
    }

    /// Runs the search.
    pub fn run(&self) -> BeamOutcome {
        let cfg = self.cfg;
        let width = self.params.beam_width.max(1);
        let deadline = self.params.time_budget.map(|b| Instant::now() + b);

        let mut arena = LaunchArena::new();
        let root = SimState::untraced(cfg);
        let mut beam = vec![Node {
            key: self.heuristic(&root),
            state: root,
            head: None,
        }];

        let mut iterations = 0;
        while iterations < self.params.max_iter {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                break;
            }

            let mut children: Vec<Node> = Vec::new();
            for node in beam.drain(..) {
                let Node { mut state, head, .. } = node;
                state.resolve_completions(cfg);
                if state.is_stuck() {
                    info!(makespan = state.cycle(), iterations, "beam reached a terminal state");
                    return BeamOutcome {
                        makespan: Some(state.cycle()),
                        trace: arena.trace(head),
                        cycle: state.cycle(),
                        final_stocks: state.stocks().to_vec(),
                        iterations,
                    };
                }

                let mut runnable = state.runnable().to_vec();
                runnable.sort_unstable();
                for pid in runnable {
                    let mut child = state.clone();
                    if child.launch(cfg, pid) {
                        let launch = arena.push(TraceEntry::new(state.cycle(), pid), head);
                        children.push(self.node(child, Some(launch)));
                    }
                }
                if state.in_flight() > 0 {
                    state.wait(cfg);
                    children.push(self.node(state, head));
                }
            }

            children.sort_by(|a, b| a.key.partial_cmp(&b.key).unwrap_or(std::cmp::Ordering::Equal));
            children.truncate(width);
            debug!(
                iteration = iterations,
                beam = children.len(),
                best_key = children.first().map(|n| n.key),
                "beam generation"
            );
            beam = children;
            iterations += 1;

            if arena.len() > COMPACT_THRESHOLD {
                let mut heads: Vec<Option<usize>> = beam.iter().map(|n| n.head).collect();
                arena.compact(&mut heads);
                for (node, head) in beam.iter_mut().zip(heads) {
                    node.head = head;
                }
            }
        }

        warn!(iterations, max_iter = self.params.max_iter, "beam budget exhausted without a terminal state");
        let (trace, mut state) = match beam.into_iter().next() {
            Some(node) => (arena.trace(node.head), node.state),
            None => (Vec::new(), SimState::untraced(cfg)),
        };
        state.finish(cfg);
        BeamOutcome {
            makespan: None,
            trace,
            cycle: state.cycle(),
            final_stocks: state.stocks().to_vec(),
            iterations,
        }
    }

    fn node(&self, state: SimState, head: Option<usize>) -> Node {
        Node {
            key: state.cycle() as f64 + self.heuristic(&state),
            state,
            head,
        }
    }
}
