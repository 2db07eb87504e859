//! GA-based launch-order optimization.
//!
//! Individuals are complete simulation playouts. A playout repeatedly
//! asks the [`Dispatcher`](crate::sim::Dispatcher) for the available
//! actions and picks one, until the clock reaches `max_cycles` or nothing
//! can happen; whatever is still in flight is then drained.
//!
//! # Encoding
//!
//! The chromosome is the sequence of actions taken, waits included, so
//! gene `i` means "the i-th decision" in every individual. Crossover
//! replays a child decision by decision, inheriting parent genes that are
//! still applicable and mutating otherwise (see [`operators`]).
//!
//! # Submodules
//!
//! - [`operators`]: Gene-source choice (inherit or mutate)
//!
//! # Reference
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization and Machine Learning"

mod chromosome;
mod config;
pub mod operators;
mod problem;
mod runner;

pub use chromosome::Candidate;
pub use config::GaConfig;
pub use problem::ProcessGaProblem;
pub use runner::{GaResult, GaRunner};

use rand::Rng;

/// A rankable GA individual.
pub trait Individual: Clone {
    /// Objective value; higher is better.
    fn fitness(&self) -> f64;

    /// Secondary key; lower wins when fitness ties.
    fn tie_key(&self) -> u64;
}

/// A problem the [`GaRunner`] can optimize.
pub trait GaProblem {
    /// Individual type.
    type Individual: Individual;

    /// Builds a fresh random individual.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    /// Breeds one child from two parents (mutation included).
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Individual,
        parent2: &Self::Individual,
        rng: &mut R,
    ) -> Self::Individual;
}
