//! Prepared configuration.
//!
//! [`ConfigBuilder`] collects stocks, processes and objective keys;
//! [`ConfigBuilder::build`] validates them, runs the graph preprocessing
//! passes and freezes the result into a [`Config`] whose names are all
//! resolved to dense ids. A `Config` is never mutated afterwards and is
//! shared read-only by every search branch.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use super::{Item, ItemId, Process, ProcessId};
use crate::error::ConfigError;
use crate::graph::{self, StockCaps};
use crate::validation::validate_config;

/// Objective key meaning "minimize elapsed cycles".
pub const TIME_KEY: &str = "time";

/// What the searches optimize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    /// Minimize the final cycle.
    Time,
    /// Maximize the stock of the first non-`time` key.
    Stock(ItemId),
}

/// Unprepared configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    /// Initial stocks.
    pub stocks: Vec<Item>,
    /// Declared processes, in declaration order.
    pub processes: Vec<Process>,
    /// Objective keys, in declaration order.
    pub objective: Vec<String>,
    /// Skip reachability pruning and keep every declared process.
    pub keep_all: bool,
}

impl ConfigBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an initial stock.
    pub fn with_stock(mut self, name: impl Into<String>, qty: i64) -> Self {
        self.stocks.push(Item::new(name, qty));
        self
    }

    /// Adds a process.
    pub fn with_process(mut self, process: Process) -> Self {
        self.processes.push(process);
        self
    }

    /// Adds an objective key (`"time"` or a resource name).
    pub fn with_objective(mut self, key: impl Into<String>) -> Self {
        self.objective.push(key.into());
        self
    }

    /// Keeps every process, even those that cannot reach the objective.
    ///
    /// Used when replaying traces that may launch such processes.
    pub fn without_pruning(mut self) -> Self {
        self.keep_all = true;
        self
    }

    /// Validates and preprocesses into a [`Config`].
    ///
    /// # Pipeline
    /// 1. Structural validation
    /// 2. Reachability pruning
    /// 3. Item indexing and id resolution
    /// 4. Needers index, distance map, obvious cycles, stock caps
    pub fn build(self) -> Result<Config, ConfigError> {
        validate_config(&self).map_err(ConfigError::Validation)?;

        let ConfigBuilder {
            stocks,
            processes,
            objective,
            keep_all,
        } = self;

        // Items are interned from every declared process, so pruned and
        // unpruned builds of the same draft share one item index.
        let mut index = ItemIndex::default();
        let mut sorted: Vec<&Item> = stocks.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        for stock in sorted {
            index.intern(&stock.name);
        }
        for process in &processes {
            for item in process.needs.iter().chain(&process.results) {
                index.intern(&item.name);
            }
        }

        let declared = processes.len();
        let pruned = if keep_all {
            let reachable = graph::prune_unreachable(processes.clone(), &objective).reachable;
            graph::Pruned {
                processes,
                reachable,
            }
        } else {
            graph::prune_unreachable(processes, &objective)
        };
        if !pruned.reachable {
            warn!(objective = ?objective, "no process contributes to the objective; keeping all processes");
        }
        let mut processes = pruned.processes;

        for process in &mut processes {
            process.needs_by_id = index.resolve(&process.needs);
            process.results_by_id = index.resolve(&process.results);
        }
        let mut goals: Vec<ItemId> = Vec::new();
        for key in objective.iter().filter(|k| *k != TIME_KEY) {
            let id = index.intern(key);
            if !goals.contains(&id) {
                goals.push(id);
            }
        }

        let item_count = index.len();
        let mut initial_stocks = vec![0; item_count];
        for stock in &stocks {
            initial_stocks[index.intern(&stock.name)] = stock.qty;
        }

        let needers = graph::needers_index(&processes, item_count);
        let distance = graph::distance_map(&processes, item_count, &goals);
        let flagged = graph::mark_obvious_cycles(&mut processes);
        let caps = graph::derive_caps(&processes, &distance, &goals, &initial_stocks);

        let process_ids = processes
            .iter()
            .enumerate()
            .map(|(id, p)| (p.name.clone(), id))
            .collect();

        let objective_kind = goals
            .first()
            .map_or(Objective::Time, |&g| Objective::Stock(g));

        info!(
            declared,
            kept = processes.len(),
            items = item_count,
            in_cycle = flagged,
            "configuration prepared"
        );
        debug!(caps = ?caps, "stock caps derived");

        Ok(Config {
            processes,
            process_ids,
            objective_keys: objective,
            objective: objective_kind,
            goals,
            objective_reachable: pruned.reachable,
            item_names: index.names,
            item_ids: index.ids,
            initial_stocks,
            distance,
            caps,
            needers,
        })
    }
}

#[derive(Debug, Default)]
struct ItemIndex {
    names: Vec<String>,
    ids: HashMap<String, ItemId>,
}

impl ItemIndex {
    fn intern(&mut self, name: &str) -> ItemId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = self.names.len();
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        id
    }

    fn len(&self) -> usize {
        self.names.len()
    }

    /// Resolves item lines to ids, merging repeated names into one line.
    fn resolve(&mut self, items: &[Item]) -> Vec<(ItemId, i64)> {
        let mut lines: Vec<(ItemId, i64)> = Vec::with_capacity(items.len());
        for item in items {
            let id = self.intern(&item.name);
            match lines.iter_mut().find(|(existing, _)| *existing == id) {
                Some((_, qty)) => *qty += item.qty,
                None => lines.push((id, item.qty)),
            }
        }
        lines
    }
}

/// Prepared, read-only configuration.
#[derive(Debug, Clone)]
pub struct Config {
    processes: Vec<Process>,
    process_ids: HashMap<String, ProcessId>,
    objective_keys: Vec<String>,
    objective: Objective,
    goals: Vec<ItemId>,
    objective_reachable: bool,
    item_names: Vec<String>,
    item_ids: HashMap<String, ItemId>,
    initial_stocks: Vec<i64>,
    distance: Vec<Option<u32>>,
    caps: StockCaps,
    needers: Vec<Vec<(ProcessId, i64)>>,
}

impl Config {
    /// Surviving processes, indexed by [`ProcessId`].
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// A process by id.
    pub fn process(&self, id: ProcessId) -> &Process {
        &self.processes[id]
    }

    /// Looks up a process by name.
    pub fn process_id(&self, name: &str) -> Option<ProcessId> {
        self.process_ids.get(name).copied()
    }

    /// Number of surviving processes.
    pub fn process_count(&self) -> usize {
        self.processes.len()
    }

    /// Number of distinct items.
    pub fn item_count(&self) -> usize {
        self.item_names.len()
    }

    /// Item name by id.
    pub fn item_name(&self, id: ItemId) -> &str {
        &self.item_names[id]
    }

    /// Looks up an item by name.
    pub fn item_id(&self, name: &str) -> Option<ItemId> {
        self.item_ids.get(name).copied()
    }

    /// Initial stock per item id.
    pub fn initial_stocks(&self) -> &[i64] {
        &self.initial_stocks
    }

    /// Objective keys as declared.
    pub fn objective_keys(&self) -> &[String] {
        &self.objective_keys
    }

    /// Resolved objective.
    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Ids of every non-`time` objective key.
    pub fn goals(&self) -> &[ItemId] {
        &self.goals
    }

    /// `false` when no process contributes to a stock objective.
    pub fn objective_reachable(&self) -> bool {
        self.objective_reachable
    }

    /// Distance of `item` from the nearest goal.
    pub fn distance(&self, item: ItemId) -> Option<u32> {
        self.distance[item]
    }

    /// Production caps.
    pub fn caps(&self) -> &StockCaps {
        &self.caps
    }

    /// Processes needing `item` with the quantity each requires.
    pub fn needers(&self, item: ItemId) -> &[(ProcessId, i64)] {
        &self.needers[item]
    }

    /// Pairs every item name with its quantity in `stocks`.
    pub fn named_stocks(&self, stocks: &[i64]) -> Vec<(String, i64)> {
        self.item_names
            .iter()
            .cloned()
            .zip(stocks.iter().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_a() -> ConfigBuilder {
        ConfigBuilder::new()
            .with_stock("euro", 100)
            .with_process(
                Process::new("buy")
                    .with_need("euro", 10)
                    .with_result("item", 1)
                    .with_duration(5),
            )
            .with_objective("item")
    }

    #[test]
    fn test_build_resolves_ids() {
        let cfg = scenario_a().build().unwrap();
        let euro = cfg.item_id("euro").unwrap();
        let item = cfg.item_id("item").unwrap();

        assert_eq!(cfg.item_count(), 2);
        assert_eq!(cfg.item_name(euro), "euro");
        assert_eq!(cfg.initial_stocks()[euro], 100);
        assert_eq!(cfg.initial_stocks()[item], 0);

        let buy = cfg.process(cfg.process_id("buy").unwrap());
        assert_eq!(buy.needs_by_id, vec![(euro, 10)]);
        assert_eq!(buy.results_by_id, vec![(item, 1)]);
        assert_eq!(cfg.objective(), Objective::Stock(item));
        assert!(cfg.objective_reachable());
    }

    #[test]
    fn test_stock_items_come_first_sorted() {
        let cfg = ConfigBuilder::new()
            .with_stock("zinc", 1)
            .with_stock("apple", 2)
            .with_process(Process::new("p").with_need("zinc", 1).with_result("mid", 1))
            .with_objective("mid")
            .build()
            .unwrap();

        assert_eq!(cfg.item_id("apple"), Some(0));
        assert_eq!(cfg.item_id("zinc"), Some(1));
        assert_eq!(cfg.item_id("mid"), Some(2));
    }

    #[test]
    fn test_time_objective() {
        let cfg = ConfigBuilder::new()
            .with_stock("a", 1)
            .with_process(Process::new("p").with_need("a", 1).with_result("b", 1).with_duration(5))
            .with_objective("time")
            .build()
            .unwrap();

        assert_eq!(cfg.objective(), Objective::Time);
        assert!(cfg.goals().is_empty());
        assert!(cfg.item_id("time").is_none());
    }

    #[test]
    fn test_first_stock_key_is_target() {
        let cfg = scenario_a()
            .with_objective("euro")
            .build()
            .unwrap();

        assert_eq!(cfg.objective_keys(), &["item".to_string(), "euro".to_string()]);
        assert_eq!(cfg.objective(), Objective::Stock(cfg.item_id("item").unwrap()));
        assert_eq!(cfg.goals().len(), 2);
    }

    #[test]
    fn test_unreachable_objective_is_reported() {
        let cfg = scenario_a()
            .with_process(Process::new("idle").with_need("euro", 1))
            .build()
            .unwrap();
        assert_eq!(cfg.process_count(), 1);

        let cfg = ConfigBuilder::new()
            .with_stock("euro", 100)
            .with_process(Process::new("buy").with_need("euro", 10).with_result("item", 1))
            .with_objective("gold")
            .build()
            .unwrap();
        assert!(!cfg.objective_reachable());
        assert_eq!(cfg.process_count(), 1);
        assert!(cfg.item_id("gold").is_some());
    }

    #[test]
    fn test_without_pruning_keeps_idle_processes() {
        let cfg = scenario_a()
            .with_process(Process::new("idle").with_need("euro", 1))
            .without_pruning()
            .build()
            .unwrap();
        assert_eq!(cfg.process_count(), 2);
        assert!(cfg.process_id("idle").is_some());
    }

    #[test]
    fn test_pruning_keeps_item_index() {
        let draft = scenario_a().with_process(
            Process::new("idle")
                .with_need("zz", 1)
                .with_result("dust", 1),
        );
        let pruned = draft.clone().build().unwrap();
        let full = draft.without_pruning().build().unwrap();

        assert!(pruned.process_id("idle").is_none());
        assert_eq!(pruned.item_count(), 4);
        assert_eq!(pruned.item_count(), full.item_count());
        for id in 0..full.item_count() {
            assert_eq!(pruned.item_name(id), full.item_name(id));
        }
        assert_eq!(pruned.distance(pruned.item_id("dust").unwrap()), None);
        assert_eq!(
            pruned.named_stocks(pruned.initial_stocks()),
            full.named_stocks(full.initial_stocks())
        );
    }

    #[test]
    fn test_invalid_draft_is_rejected() {
        let err = scenario_a()
            .with_process(Process::new("buy"))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_repeated_lines_are_merged() {
        let cfg = ConfigBuilder::new()
            .with_stock("a", 10)
            .with_process(
                Process::new("mix")
                    .with_need("a", 2)
                    .with_need("a", 3)
                    .with_result("b", 1)
                    .with_result("b", 1),
            )
            .with_objective("b")
            .build()
            .unwrap();
        let a = cfg.item_id("a").unwrap();
        let b = cfg.item_id("b").unwrap();
        let mix = cfg.process(0);

        assert_eq!(mix.needs_by_id, vec![(a, 5)]);
        assert_eq!(mix.results_by_id, vec![(b, 2)]);
        assert_eq!(cfg.needers(a), &[(0, 5)]);
    }

    #[test]
    fn test_named_stocks() {
        let cfg = scenario_a().build().unwrap();
        let named = cfg.named_stocks(cfg.initial_stocks());
        assert_eq!(named, vec![("euro".to_string(), 100), ("item".to_string(), 0)]);
    }
}
