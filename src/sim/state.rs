//! Simulation state and step primitives.
//!
//! A [`SimState`] is one branch's private snapshot of the world: the
//! clock, the stock vector, the in-flight completions and the launch
//! trace. Alongside it lives the incremental feasibility bookkeeping:
//! `missing[p]` counts the need lines of `p` not covered by stock, and
//! `runnable` lists exactly the processes with `missing == 0`. Every
//! stock change goes through [`SimState::apply_delta`], which consults
//! the needers index so only the affected processes are touched.
//!
//! The [`Config`] is passed into each primitive rather than stored, so a
//! state is plain owned data and can be cloned freely between branches.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::models::{Config, ItemId, ProcessId, TraceEntry};

/// An in-flight process, ordered by finish cycle then process id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Completion {
    /// Cycle at which the results land.
    pub finish: u64,
    /// Process that will complete.
    pub process: ProcessId,
}

/// Mutable simulation snapshot owned by a single search branch.
#[derive(Debug, Clone)]
pub struct SimState {
    cycle: u64,
    stocks: Vec<i64>,
    in_flight: BinaryHeap<Reverse<Completion>>,
    trace: Vec<TraceEntry>,
    record_trace: bool,
    missing: Vec<u32>,
    runnable: Vec<ProcessId>,
    slot: Vec<Option<usize>>,
}

impl SimState {
    /// Creates the initial state of `cfg`, recording launches.
    pub fn new(cfg: &Config) -> Self {
        let stocks = cfg.initial_stocks().to_vec();
        let n = cfg.process_count();
        let mut state = Self {
            cycle: 0,
            stocks,
            in_flight: BinaryHeap::new(),
            trace: Vec::new(),
            record_trace: true,
            missing: vec![0; n],
            runnable: Vec::with_capacity(n),
            slot: vec![None; n],
        };
        for (pid, process) in cfg.processes().iter().enumerate() {
            let missing = process
                .needs_by_id
                .iter()
                .filter(|&&(item, qty)| state.stocks[item] < qty)
                .count() as u32;
            state.missing[pid] = missing;
            if missing == 0 {
                state.insert_runnable(pid);
            }
        }
        state
    }

    /// Creates the initial state without trace recording.
    pub fn untraced(cfg: &Config) -> Self {
        let mut state = Self::new(cfg);
        state.record_trace = false;
        state
    }

    /// Current cycle.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Stock per item id.
    pub fn stocks(&self) -> &[i64] {
        &self.stocks
    }

    /// Stock of one item.
    pub fn stock(&self, item: ItemId) -> i64 {
        self.stocks[item]
    }

    /// Launches recorded so far (empty for untraced states).
    pub fn trace(&self) -> &[TraceEntry] {
        &self.trace
    }

    /// Hands the recorded trace over, leaving this state untraced.
    pub fn take_trace(&mut self) -> Vec<TraceEntry> {
        std::mem::take(&mut self.trace)
    }

    /// Processes whose needs are all covered, in no particular order.
    pub fn runnable(&self) -> &[ProcessId] {
        &self.runnable
    }

    /// Whether `process` is in the runnable set.
    pub fn is_runnable(&self, process: ProcessId) -> bool {
        self.slot[process].is_some()
    }

    /// Number of uncovered need lines of `process`.
    pub fn missing(&self, process: ProcessId) -> u32 {
        self.missing[process]
    }

    /// Number of in-flight processes.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Earliest pending finish cycle.
    pub fn next_completion(&self) -> Option<u64> {
        self.in_flight.peek().map(|Reverse(c)| c.finish)
    }

    /// Nothing runnable and nothing in flight.
    pub fn is_stuck(&self) -> bool {
        self.runnable.is_empty() && self.in_flight.is_empty()
    }

    /// Whether every need quantity of `process` is covered by stock.
    pub fn needs_satisfied(&self, cfg: &Config, process: ProcessId) -> bool {
        cfg.process(process)
            .needs_by_id
            .iter()
            .all(|&(item, qty)| self.stocks[item] >= qty)
    }

    /// First need line of `process` not covered: `(item, needed, available)`.
    pub fn first_shortage(&self, cfg: &Config, process: ProcessId) -> Option<(ItemId, i64, i64)> {
        cfg.process(process)
            .needs_by_id
            .iter()
            .find(|&&(item, qty)| self.stocks[item] < qty)
            .map(|&(item, qty)| (item, qty, self.stocks[item]))
    }

    /// Launches `process` at the current cycle.
    ///
    /// Returns `false` without touching the state when its needs are not
    /// covered; callers are expected to check [`needs_satisfied`] first.
    ///
    /// [`needs_satisfied`]: SimState::needs_satisfied
    pub fn launch(&mut self, cfg: &Config, process: ProcessId) -> bool {
        if !self.needs_satisfied(cfg, process) {
            return false;
        }
        let p = cfg.process(process);
        for &(item, qty) in &p.needs_by_id {
            self.apply_delta(cfg, item, -qty);
        }
        self.in_flight.push(Reverse(Completion {
            finish: self.cycle + p.duration,
            process,
        }));
        if self.record_trace {
            self.trace.push(TraceEntry::new(self.cycle, process));
        }
        true
    }

    /// Advances to the earliest pending finish and resolves everything due.
    ///
    /// Returns `false` (state unchanged) when nothing is in flight.
    pub fn wait(&mut self, cfg: &Config) -> bool {
        let Some(finish) = self.next_completion() else {
            return false;
        };
        self.cycle = self.cycle.max(finish);
        self.resolve_completions(cfg);
        true
    }

    /// Moves the clock forward to `cycle` (never backward) and resolves
    /// every completion due by then.
    pub fn advance_to(&mut self, cfg: &Config, cycle: u64) {
        self.cycle = self.cycle.max(cycle);
        self.resolve_completions(cfg);
    }

    /// Credits the results of every completion due at or before the
    /// current cycle, in finish order.
    pub fn resolve_completions(&mut self, cfg: &Config) {
        while let Some(&Reverse(done)) = self.in_flight.peek() {
            if done.finish > self.cycle {
                break;
            }
            self.in_flight.pop();
            for &(item, qty) in &cfg.process(done.process).results_by_id {
                self.apply_delta(cfg, item, qty);
            }
        }
    }

    /// Waits until nothing is in flight.
    pub fn finish(&mut self, cfg: &Config) {
        while self.wait(cfg) {}
    }

    /// Recomputes the runnable set from scratch, sorted by id.
    pub fn rescan_runnable(&self, cfg: &Config) -> Vec<ProcessId> {
        (0..cfg.process_count())
            .filter(|&pid| self.needs_satisfied(cfg, pid))
            .collect()
    }

    fn apply_delta(&mut self, cfg: &Config, item: ItemId, delta: i64) {
        let before = self.stocks[item];
        let after = before + delta;
        self.stocks[item] = after;

        for &(pid, required) in cfg.needers(item) {
            let was = before >= required;
            let now = after >= required;
            if was && !now {
                self.missing[pid] += 1;
                if self.missing[pid] == 1 {
                    self.remove_runnable(pid);
                }
            } else if !was && now {
                self.missing[pid] -= 1;
                if self.missing[pid] == 0 {
                    self.insert_runnable(pid);
                }
            }
        }
    }

    fn insert_runnable(&mut self, pid: ProcessId) {
        if self.slot[pid].is_none() {
            self.slot[pid] = Some(self.runnable.len());
            self.runnable.push(pid);
        }
    }

    fn remove_runnable(&mut self, pid: ProcessId) {
        let Some(pos) = self.slot[pid].take() else {
            return;
        };
        self.runnable.swap_remove(pos);
        if let Some(&moved) = self.runnable.get(pos) {
            self.slot[moved] = Some(pos);
        }
    }
}
