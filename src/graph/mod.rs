//! Recipe-graph preprocessing.
//!
//! Runs once, while a [`Config`](crate::models::Config) is being built,
//! and annotates it with everything the searches read but never change.
//!
//! # Passes
//!
//! - **Reachability** ([`prune_unreachable`]): keeps only processes that
//!   can contribute to a stock objective.
//! - **Distance** ([`distance_map`]): backward BFS depth of every item
//!   from the goals, used to discount intermediate stock.
//! - **Obvious cycles** ([`mark_obvious_cycles`]): flags closed feed
//!   chains that can fire forever without net progress.
//! - **Caps** ([`derive_caps`]): per-item production ceilings that
//!   throttle overproduction.
//! - **Needers** ([`needers_index`]): item → processes needing it, so
//!   feasibility can be maintained incrementally.

mod caps;
mod cycles;
mod distance;
mod reachability;

pub use caps::{StockCaps, derive_caps};
pub use cycles::{feeds, mark_obvious_cycles};
pub use distance::distance_map;
pub use reachability::{Pruned, prune_unreachable};

use crate::models::{Process, ProcessId};

/// Builds `needers[item] → [(process, required_qty)]`, one pair per needing process.
pub fn needers_index(processes: &[Process], item_count: usize) -> Vec<Vec<(ProcessId, i64)>> {
    let mut needers: Vec<Vec<(ProcessId, i64)>> = vec![Vec::new(); item_count];
    for (pid, process) in processes.iter().enumerate() {
        for &(item, qty) in &process.needs_by_id {
            needers[item].push((pid, qty));
        }
    }
    needers
}
