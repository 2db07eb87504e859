//! Process (recipe) model.
//!
//! A process consumes its needs at launch and, `duration` cycles later,
//! adds its results to stock. Processes are immutable once a
//! [`Config`](super::Config) has been prepared.

use serde::{Deserialize, Serialize};

use super::{Item, ItemId};

/// Dense index of a process in a prepared [`Config`](super::Config).
pub type ProcessId = usize;

/// A recipe: needs → (after `duration` cycles) results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Process {
    /// Unique process name.
    pub name: String,
    /// Items consumed at launch, in declaration order.
    pub needs: Vec<Item>,
    /// Items produced on completion, in declaration order. May be empty.
    pub results: Vec<Item>,
    /// Cycles between launch and completion.
    pub duration: u64,
    /// Part of an obvious cycle (set during preprocessing).
    pub in_cycle: bool,
    /// `needs` resolved to item ids.
    #[serde(default)]
    pub needs_by_id: Vec<(ItemId, i64)>,
    /// `results` resolved to item ids.
    #[serde(default)]
    pub results_by_id: Vec<(ItemId, i64)>,
}

impl Process {
    /// Creates a process with no needs, no results and zero duration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            needs: Vec::new(),
            results: Vec::new(),
            duration: 0,
            in_cycle: false,
            needs_by_id: Vec::new(),
            results_by_id: Vec::new(),
        }
    }

    /// Adds a need line.
    pub fn with_need(mut self, name: impl Into<String>, qty: i64) -> Self {
        self.needs.push(Item::new(name, qty));
        self
    }

    /// Adds a result line.
    pub fn with_result(mut self, name: impl Into<String>, qty: i64) -> Self {
        self.results.push(Item::new(name, qty));
        self
    }

    /// Sets the duration in cycles.
    pub fn with_duration(mut self, duration: u64) -> Self {
        self.duration = duration;
        self
    }

    /// Whether any result line names `item`.
    pub fn produces(&self, item: &str) -> bool {
        self.results.iter().any(|r| r.name == item)
    }
}
