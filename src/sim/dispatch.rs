//! Action dispatching.
//!
//! Turns a state's raw runnable set into the actions a search may take.
//! Filters are composed in order, each holding back some processes;
//! when a filter would leave nothing to launch and nothing in flight, the
//! lowest-id process it held back is re-admitted so a branch never stalls
//! because of a heuristic.

use std::fmt::Debug;
use std::sync::Arc;

use super::SimState;
use crate::models::{Config, ProcessId};

/// A search step: launch one process, or wait for the next completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Launch a process at the current cycle.
    Launch(ProcessId),
    /// Advance to the next completion.
    Wait,
}

impl Action {
    /// Applies the action. Returns `false` when it was not applicable.
    pub fn apply(self, cfg: &Config, state: &mut SimState) -> bool {
        match self {
            Action::Launch(pid) => state.launch(cfg, pid),
            Action::Wait => state.wait(cfg),
        }
    }
}

/// A heuristic that holds back runnable processes.
pub trait ActionFilter: Send + Sync + Debug {
    /// Filter name, for logging.
    fn name(&self) -> &'static str;

    /// Whether `process` should not be offered right now.
    fn holds_back(&self, cfg: &Config, state: &SimState, process: ProcessId) -> bool;
}

/// Holds back processes flagged as part of an obvious cycle.
#[derive(Debug, Clone, Copy, Default)]
pub struct CycleFilter;

impl ActionFilter for CycleFilter {
    fn name(&self) -> &'static str {
        "cycle"
    }

    fn holds_back(&self, cfg: &Config, _state: &SimState, process: ProcessId) -> bool {
        cfg.process(process).in_cycle
    }
}

/// Holds back processes whose every result is above its production cap.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapFilter;

impl ActionFilter for CapFilter {
    fn name(&self) -> &'static str {
        "cap"
    }

    fn holds_back(&self, cfg: &Config, state: &SimState, process: ProcessId) -> bool {
        cfg.caps().all_results_over(cfg.process(process), state.stocks())
    }
}

/// Ordered composition of [`ActionFilter`]s.
#[derive(Clone, Default)]
pub struct Dispatcher {
    filters: Vec<Arc<dyn ActionFilter>>,
}

impl Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.filters.iter().map(|r| r.name()).collect();
        f.debug_struct("Dispatcher").field("filters", &names).finish()
    }
}

impl Dispatcher {
    /// Creates a dispatcher with no filters (raw runnable set).
    pub fn new() -> Self {
        Self::default()
    }

    /// Cycle exclusion followed by the cap heuristic.
    pub fn standard() -> Self {
        Self::new().with_filter(CycleFilter).with_filter(CapFilter)
    }

    /// Appends a filter.
    pub fn with_filter<F: ActionFilter + 'static>(mut self, filter: F) -> Self {
        self.filters.push(Arc::new(filter));
        self
    }

    /// Launchable processes after filtering, sorted by id.
    pub fn candidates(&self, cfg: &Config, state: &SimState) -> Vec<ProcessId> {
        let mut offered = state.runnable().to_vec();
        offered.sort_unstable();

        for filter in &self.filters {
            if offered.is_empty() {
                break;
            }
            let kept: Vec<ProcessId> = offered
                .iter()
                .copied()
                .filter(|&p| !filter.holds_back(cfg, state, p))
                .collect();
            if kept.is_empty() && state.in_flight() == 0 {
                // offered is sorted, so this is the lowest id held back
                offered.truncate(1);
            } else {
                offered = kept;
            }
        }
        offered
    }

    /// Every action available: each candidate launch, plus `Wait` when
    /// something is in flight.
    pub fn actions(&self, cfg: &Config, state: &SimState) -> Vec<Action> {
        let mut actions: Vec<Action> = self
            .candidates(cfg, state)
            .into_iter()
            .map(Action::Launch)
            .collect();
        if state.in_flight() > 0 {
            actions.push(Action::Wait);
        }
        actions
    }
}
