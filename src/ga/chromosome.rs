//! Playout candidates.
//!
//! A [`Candidate`] is one complete playout: the gene sequence of actions
//! chosen at each decision point (waits included, so positions line up
//! across parents) and the state it led to. Fitness is computed once,
//! when the playout ends.

use rand::Rng;

use super::GaConfig;
use super::operators::{crossover_gene, random_gene};
use crate::models::Config;
use crate::sim::{Action, Dispatcher, SimState, score};

/// A GA individual: a finished playout.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Final simulation state (nothing in flight).
    pub state: SimState,
    /// Actions taken, in order.
    pub genes: Vec<Action>,
    /// Objective score (higher is better).
    pub fitness: f64,
}

impl Candidate {
    /// Plays out a fully random candidate.
    pub fn random<R: Rng>(
        cfg: &Config,
        dispatcher: &Dispatcher,
        params: &GaConfig,
        rng: &mut R,
    ) -> Self {
        Self::play(cfg, dispatcher, params, rng, |_, available, rng| {
            random_gene(available, rng)
        })
    }

    /// Plays out a child guided by two parents' genes.
    pub fn crossover<R: Rng>(
        cfg: &Config,
        dispatcher: &Dispatcher,
        params: &GaConfig,
        parent1: &Candidate,
        parent2: &Candidate,
        rng: &mut R,
    ) -> Self {
        Self::play(cfg, dispatcher, params, rng, |i, available, rng| {
            crossover_gene(
                &parent1.genes,
                &parent2.genes,
                i,
                available,
                params.mutation_rate,
                rng,
            )
        })
    }

    /// Final cycle.
    pub fn cycle(&self) -> u64 {
        self.state.cycle()
    }

    fn play<R, F>(
        cfg: &Config,
        dispatcher: &Dispatcher,
        params: &GaConfig,
        rng: &mut R,
        mut pick: F,
    ) -> Self
    where
        R: Rng,
        F: FnMut(usize, &[Action], &mut R) -> Option<Action>,
    {
        let mut state = SimState::new(cfg);
        let mut genes = Vec::new();

        while state.cycle() < params.max_cycles && genes.len() < params.max_trace_len {
            let available = dispatcher.actions(cfg, &state);
            let Some(action) = pick(genes.len(), &available, rng) else {
                break;
            };
            action.apply(cfg, &mut state);
            genes.push(action);
        }
        state.finish(cfg);

        let fitness = score::fitness(cfg, state.cycle(), state.stocks(), &params.weights);
        Self {
            state,
            genes,
            fitness,
        }
    }
}
