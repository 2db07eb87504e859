//! Search result report.
//!
//! Resolves ids back to names so the result can be printed, serialized
//! or fed to the verifier. [`SearchReport::render`] emits the trace as
//! `<cycle>:<process>` lines framed by headers the verifier skips.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::models::{Config, TraceEntry};

/// Label of the footer line that closes the rendered trace block.
pub const TOTAL_CYCLES_LABEL: &str = "Total cycles";

/// Which search produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyKind {
    /// Genetic search.
    Genetic,
    /// Beam search.
    Beam,
}

/// Named, serializable search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchReport {
    /// Search that produced the result.
    pub strategy: StrategyKind,
    /// Final cycle (nothing in flight).
    pub cycle: u64,
    /// Launches as `(cycle, process name)`.
    pub trace: Vec<(u64, String)>,
    /// Final stock per item, in item id order.
    pub final_stocks: Vec<(String, i64)>,
    /// Objective score of the final state.
    pub score: f64,
    /// Beam makespan; `None` for genetic runs and exhausted beams.
    pub makespan: Option<u64>,
}

impl SearchReport {
    /// Builds a report from id-level results.
    pub fn from_parts(
        cfg: &Config,
        strategy: StrategyKind,
        cycle: u64,
        trace: &[TraceEntry],
        stocks: &[i64],
        score: f64,
        makespan: Option<u64>,
    ) -> Self {
        Self {
            strategy,
            cycle,
            trace: trace
                .iter()
                .map(|e| (e.cycle, cfg.process(e.process).name.clone()))
                .collect(),
            final_stocks: cfg.named_stocks(stocks),
            score,
            makespan,
        }
    }

    /// Number of launches.
    pub fn launches(&self) -> usize {
        self.trace.len()
    }

    /// Final stock of `item`, if it exists.
    pub fn stock(&self, item: &str) -> Option<i64> {
        self.final_stocks
            .iter()
            .find(|(name, _)| name == item)
            .map(|&(_, qty)| qty)
    }

    /// Beam-style cycle: the makespan, or `-1` when none was reached.
    pub fn cycle_or_sentinel(&self) -> i64 {
        self.makespan.map_or(-1, |m| m as i64)
    }

    /// Human-readable report whose trace block the verifier accepts.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("Simulation trace:\n");
        for (cycle, name) in &self.trace {
            let _ = writeln!(out, "{cycle}:{name}");
        }
        let _ = writeln!(out, "\n{TOTAL_CYCLES_LABEL}: {}", self.cycle);
        out.push_str("\nFinal stock:\n");
        for (name, qty) in &self.final_stocks {
            let _ = writeln!(out, "{name}: {qty}");
        }
        out
    }
}
