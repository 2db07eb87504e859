//! Trace replay verifier.
//!
//! Replays a `<cycle>:<process>` launch listing against a configuration
//! using the same step primitives the searches use. Lines that do not
//! look like launches are skipped until the first one that does; from
//! then on blank lines are skipped and the listing ends at the first
//! other non-matching line. A `Total cycles` footer always ends it, so a
//! rendered [`SearchReport`] can be fed in unchanged, even with an empty
//! trace and numeric item names in its stock listing.
//!
//! [`SearchReport`]: crate::scheduler::SearchReport

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::VerifyError;
use crate::models::Config;
use crate::parser::parse_config;
use crate::scheduler::TOTAL_CYCLES_LABEL;
use crate::sim::SimState;

static LAUNCH_LINE: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();

fn launch_line() -> Result<&'static Regex, VerifyError> {
    LAUNCH_LINE
        .get_or_init(|| Regex::new(r"^(?P<cycle>\d+)\s*:\s*(?P<name>[^:#;()\s]+)$"))
        .as_ref()
        .map_err(|e| VerifyError::Pattern(e.clone()))
}

/// Outcome of a successful replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyReport {
    /// Cycle once every launch has completed.
    pub cycle: u64,
    /// Final stock per item, in item id order.
    pub final_stocks: Vec<(String, i64)>,
    /// Number of launches replayed.
    pub launches: usize,
}

impl VerifyReport {
    /// Final stock of `item`, if it exists.
    pub fn stock(&self, item: &str) -> Option<i64> {
        self.final_stocks
            .iter()
            .find(|(name, _)| name == item)
            .map(|&(_, qty)| qty)
    }
}

/// Replays `trace` against `cfg`.
///
/// Each launch first advances the clock to its cycle, crediting every
/// completion due by then, and must find its needs in stock. After the
/// last launch everything in flight is drained.
pub fn verify_trace(cfg: &Config, trace: &str) -> Result<VerifyReport, VerifyError> {
    let pattern = launch_line()?;
    let mut state = SimState::new(cfg);
    let mut started = false;
    let mut previous = 0u64;

    for (idx, raw) in trace.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.starts_with(TOTAL_CYCLES_LABEL) {
            break;
        }
        let Some(caps) = pattern.captures(trimmed) else {
            if started && !trimmed.is_empty() {
                break;
            }
            continue;
        };
        started = true;

        let cycle: u64 = caps["cycle"].parse().map_err(|_| VerifyError::BadLine {
            line,
            message: format!("cycle '{}' out of range", &caps["cycle"]),
        })?;
        if cycle < previous {
            return Err(VerifyError::NonMonotonicCycle {
                line,
                cycle,
                previous,
            });
        }
        previous = cycle;

        let name = &caps["name"];
        let process = cfg
            .process_id(name)
            .ok_or_else(|| VerifyError::UnknownProcess {
                cycle,
                process: name.to_string(),
            })?;

        if cycle.checked_add(cfg.process(process).duration).is_none() {
            return Err(VerifyError::BadLine {
                line,
                message: format!("process '{name}' launched at cycle {cycle} would finish past the last cycle"),
            });
        }

        state.advance_to(cfg, cycle);
        if let Some((item, needed, available)) = state.first_shortage(cfg, process) {
            return Err(VerifyError::InsufficientStock {
                cycle,
                process: name.to_string(),
                item: cfg.item_name(item).to_string(),
                needed,
                available,
            });
        }
        state.launch(cfg, process);
        debug!(line, cycle, process = name, "launch replayed");
    }

    state.finish(cfg);
    let report = VerifyReport {
        cycle: state.cycle(),
        final_stocks: cfg.named_stocks(state.stocks()),
        launches: state.trace().len(),
    };
    info!(cycle = report.cycle, launches = report.launches, "trace verified");
    Ok(report)
}

/// Loads a configuration and a trace from disk and replays one against
/// the other.
///
/// The configuration is prepared without pruning so the trace may name
/// processes that do not contribute to the objective.
pub fn verify_files(
    config_path: impl AsRef<Path>,
    trace_path: impl AsRef<Path>,
) -> Result<VerifyReport, VerifyError> {
    let text = std::fs::read_to_string(config_path)?;
    let cfg = parse_config(&text)?.without_pruning().build()?;
    let trace = std::fs::read_to_string(trace_path)?;
    verify_trace(&cfg, &trace)
}
