//! Distance-to-goal map.
//!
//! Breadth-first search backward through the "produces" relation:
//! goals sit at distance 0, and every need of a process producing an item
//! at distance `d` sits at `d + 1` unless it was already reached closer.

use std::collections::VecDeque;

use crate::models::{ItemId, Process, ProcessId};

/// Computes the distance of every item from the nearest goal.
///
/// Items never reached are `None` and earn no intermediate credit.
pub fn distance_map(processes: &[Process], item_count: usize, goals: &[ItemId]) -> Vec<Option<u32>> {
    let mut producers: Vec<Vec<ProcessId>> = vec![Vec::new(); item_count];
    for (pid, process) in processes.iter().enumerate() {
        for &(item, _) in &process.results_by_id {
            producers[item].push(pid);
        }
    }

    let mut dist = vec![None; item_count];
    let mut queue = VecDeque::new();
    for &goal in goals {
        if dist[goal].is_none() {
            dist[goal] = Some(0);
            queue.push_back(goal);
        }
    }

    while let Some(item) = queue.pop_front() {
        let next = dist[item].map_or(0, |d: u32| d + 1);
        for &pid in &producers[item] {
            for &(need, _) in &processes[pid].needs_by_id {
                if dist[need].is_none() {
                    dist[need] = Some(next);
                    queue.push_back(need);
                }
            }
        }
    }

    dist
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConfigBuilder;

    #[test]
    fn test_chain_depths() {
        let cfg = ConfigBuilder::new()
            .with_stock("ore", 10)
            .with_process(Process::new("smelt").with_need("ore", 2).with_result("ingot", 1))
            .with_process(Process::new("forge").with_need("ingot", 3).with_result("sword", 1))
            .with_objective("sword")
            .build()
            .unwrap();

        let d = |name: &str| cfg.distance(cfg.item_id(name).unwrap());
        assert_eq!(d("sword"), Some(0));
        assert_eq!(d("ingot"), Some(1));
        assert_eq!(d("ore"), Some(2));
    }

    #[test]
    fn test_shorter_path_wins() {
        let cfg = ConfigBuilder::new()
            .with_stock("ore", 10)
            .with_process(Process::new("smelt").with_need("ore", 2).with_result("ingot", 1))
            .with_process(Process::new("forge").with_need("ingot", 3).with_result("sword", 1))
            .with_process(Process::new("cast").with_need("ore", 9).with_result("sword", 1))
            .with_objective("sword")
            .build()
            .unwrap();

        assert_eq!(cfg.distance(cfg.item_id("ore").unwrap()), Some(1));
    }

    #[test]
    fn test_unreached_items_have_no_distance() {
        let cfg = ConfigBuilder::new()
            .with_stock("ore", 10)
            .with_stock("junk", 3)
            .with_process(Process::new("smelt").with_need("ore", 2).with_result("ingot", 1))
            .with_objective("ingot")
            .build()
            .unwrap();

        assert_eq!(cfg.distance(cfg.item_id("junk").unwrap()), None);
    }

    #[test]
    fn test_multiple_goals_are_all_zero() {
        let cfg = ConfigBuilder::new()
            .with_stock("ore", 10)
            .with_process(Process::new("smelt").with_need("ore", 2).with_result("ingot", 1))
            .with_process(Process::new("forge").with_need("ingot", 3).with_result("sword", 1))
            .with_objective("sword")
            .with_objective("ingot")
            .build()
            .unwrap();

        assert_eq!(cfg.distance(cfg.item_id("ingot").unwrap()), Some(0));
        assert_eq!(cfg.distance(cfg.item_id("ore").unwrap()), Some(1));
    }
}
