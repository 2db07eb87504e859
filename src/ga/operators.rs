//! Gene-source operator.
//!
//! Crossover and mutation are fused: at gene position `i` of a child's
//! playout, the child inherits parent 1's action at `i` if it is currently
//! available, else parent 2's, as long as a roll stays below
//! `100 - mutation_rate / 2`. Otherwise (or when neither parent's gene
//! applies in the child's diverged state) a random available action is
//! drawn, which is the mutation.

use rand::Rng;
use rand::prelude::IndexedRandom;

use crate::sim::Action;

/// Where a child's gene came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneSource {
    /// Inherited from the first parent.
    Parent1,
    /// Inherited from the second parent.
    Parent2,
    /// Drawn at random.
    Mutation,
}

/// Decides where the gene at `index` comes from.
pub fn choose_source<R: Rng>(
    parent1: &[Action],
    parent2: &[Action],
    index: usize,
    available: &[Action],
    mutation_rate: f64,
    rng: &mut R,
) -> GeneSource {
    let roll = rng.random_range(0..100) as f64;
    let inherit = roll < 100.0 - mutation_rate / 2.0;
    let usable = |genes: &[Action]| genes.get(index).is_some_and(|g| available.contains(g));

    if inherit && usable(parent1) {
        GeneSource::Parent1
    } else if inherit && usable(parent2) {
        GeneSource::Parent2
    } else {
        GeneSource::Mutation
    }
}

/// Picks the child's gene at `index`; `None` when nothing is available.
pub fn crossover_gene<R: Rng>(
    parent1: &[Action],
    parent2: &[Action],
    index: usize,
    available: &[Action],
    mutation_rate: f64,
    rng: &mut R,
) -> Option<Action> {
    match choose_source(parent1, parent2, index, available, mutation_rate, rng) {
        GeneSource::Parent1 => parent1.get(index).copied(),
        GeneSource::Parent2 => parent2.get(index).copied(),
        GeneSource::Mutation => random_gene(available, rng),
    }
}

/// Uniform choice among `available`.
pub fn random_gene<R: Rng>(available: &[Action], rng: &mut R) -> Option<Action> {
    available.choose(rng).copied()
}
