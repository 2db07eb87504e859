//! Solver facade and result reporting.
//!
//! [`Solver`] picks a [`Strategy`] (beam search for a `time`-only
//! objective, genetic search otherwise, unless one is forced), applies a
//! wall-clock budget and seed, and turns the outcome into a
//! [`SearchReport`] with names resolved.
//!
//! Running out of budget is not an error: the report then holds the best
//! result found so far, or the untouched initial state if nothing was
//! built in time.

mod report;
mod solver;

pub use report::{SearchReport, StrategyKind, TOTAL_CYCLES_LABEL};
pub use solver::{Solver, Strategy};
