//! Production caps.
//!
//! Throttles runaway overproduction of intermediates. For every item the
//! goal depends on, total demand (need quantities) and total supply
//! (result quantities) are summed over the surviving processes. The item
//! with the smallest non-negative surplus is the *limiting item*:
//!
//! - surplus exactly zero: caps are absolute,
//!   `ceil(needed[r] * initial[limiting] / needed[limiting])`;
//! - surplus positive: caps are factors `needed[r] / needed[limiting]`
//!   applied to the limiting item's live stock at each decision.
//!
//! Goals are never capped. Caps are a steering heuristic only; the
//! dispatcher re-admits capped processes when nothing else can happen.

use serde::{Deserialize, Serialize};

use crate::models::{ItemId, Process};

/// Per-item production caps derived from the recipe graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum StockCaps {
    /// No throttling.
    #[default]
    Unbounded,
    /// Fixed ceilings scaled off the limiting item's initial stock.
    Absolute {
        /// Limiting item.
        limiting: ItemId,
        /// Ceiling per item id; `None` = uncapped.
        caps: Vec<Option<i64>>,
    },
    /// Ceilings proportional to the limiting item's live stock.
    Proportional {
        /// Limiting item.
        limiting: ItemId,
        /// Factor per item id; `None` = uncapped.
        factors: Vec<Option<f64>>,
    },
}

impl StockCaps {
    /// The limiting item, if caps are active.
    pub fn limiting_item(&self) -> Option<ItemId> {
        match self {
            StockCaps::Unbounded => None,
            StockCaps::Absolute { limiting, .. } | StockCaps::Proportional { limiting, .. } => {
                Some(*limiting)
            }
        }
    }

    /// Whether `item` is currently above its cap.
    ///
    /// Proportional caps are inactive while the limiting item is out of stock.
    pub fn is_over(&self, item: ItemId, stocks: &[i64]) -> bool {
        match self {
            StockCaps::Unbounded => false,
            StockCaps::Absolute { caps, .. } => caps
                .get(item)
                .copied()
                .flatten()
                .is_some_and(|cap| stocks[item] > cap),
            StockCaps::Proportional { limiting, factors } => {
                let live = stocks[*limiting];
                if live <= 0 {
                    return false;
                }
                factors
                    .get(item)
                    .copied()
                    .flatten()
                    .is_some_and(|f| stocks[item] as f64 > live as f64 * f)
            }
        }
    }

    /// Whether every result of `process` is over its cap.
    ///
    /// A process without results is never considered over-cap.
    pub fn all_results_over(&self, process: &Process, stocks: &[i64]) -> bool {
        !process.results_by_id.is_empty()
            && process
                .results_by_id
                .iter()
                .all(|&(item, _)| self.is_over(item, stocks))
    }
}

/// Derives caps from demand/supply totals over `processes`.
///
/// `distance` selects the items the goal depends on; `goals` are exempt.
pub fn derive_caps(
    processes: &[Process],
    distance: &[Option<u32>],
    goals: &[ItemId],
    initial: &[i64],
) -> StockCaps {
    let n = distance.len();
    let mut needed = vec![0i64; n];
    let mut produced = vec![0i64; n];
    for process in processes {
        for &(item, qty) in &process.needs_by_id {
            needed[item] += qty;
        }
        for &(item, qty) in &process.results_by_id {
            produced[item] += qty;
        }
    }

    let capped: Vec<ItemId> = (0..n)
        .filter(|&i| distance[i].is_some() && !goals.contains(&i))
        .collect();

    let limiting = capped
        .iter()
        .copied()
        .filter(|&i| needed[i] > 0 && produced[i] >= needed[i])
        .min_by_key(|&i| produced[i] - needed[i]);
    let Some(limiting) = limiting else {
        return StockCaps::Unbounded;
    };

    let ratio = |i: ItemId| needed[i] as f64 / needed[limiting] as f64;

    if produced[limiting] == needed[limiting] {
        let base = initial[limiting];
        if base <= 0 {
            return StockCaps::Unbounded;
        }
        let mut caps = vec![None; n];
        for &i in &capped {
            caps[i] = Some((ratio(i) * base as f64).ceil() as i64);
        }
        StockCaps::Absolute { limiting, caps }
    } else {
        let mut factors = vec![None; n];
        for &i in &capped {
            factors[i] = Some(ratio(i));
        }
        StockCaps::Proportional { limiting, factors }
    }
}
