//! Trace (schedule) model.
//!
//! A trace is the append-only record of launches that makes up a
//! schedule. Cycles are non-decreasing in record order.

use serde::{Deserialize, Serialize};

use super::ProcessId;

/// One launch event: `process` started at `cycle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEntry {
    /// Launch cycle.
    pub cycle: u64,
    /// Launched process.
    pub process: ProcessId,
}

impl TraceEntry {
    /// Creates a trace entry.
    pub fn new(cycle: u64, process: ProcessId) -> Self {
        Self { cycle, process }
    }
}

/// Whether cycles never decrease along `trace`.
pub fn is_monotonic(trace: &[TraceEntry]) -> bool {
    trace.windows(2).all(|w| w[0].cycle <= w[1].cycle)
}
