//! Reachability pruning.
//!
//! Walks the "produces" relation backward from every stock objective and
//! keeps only the processes that can (transitively) contribute to one.

use std::collections::HashSet;

use crate::models::{Process, TIME_KEY};

/// Outcome of [`prune_unreachable`].
#[derive(Debug, Clone)]
pub struct Pruned {
    /// Surviving processes, in declaration order.
    pub processes: Vec<Process>,
    /// `false` when no process contributes to any stock objective.
    /// The full process list is kept in that case.
    pub reachable: bool,
}

/// Drops every process that cannot contribute to a non-`time` objective.
///
/// A `time`-only objective keeps everything. When nothing is relevant the
/// original list is returned untouched with `reachable == false`.
pub fn prune_unreachable(processes: Vec<Process>, objective: &[String]) -> Pruned {
    let goals: Vec<&str> = objective
        .iter()
        .map(String::as_str)
        .filter(|k| *k != TIME_KEY)
        .collect();
    if goals.is_empty() {
        return Pruned {
            processes,
            reachable: true,
        };
    }

    let keep = relevant_processes(&processes, &goals);
    if !keep.iter().any(|&k| k) {
        return Pruned {
            processes,
            reachable: false,
        };
    }

    let processes = processes
        .into_iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(p))
        .collect();
    Pruned {
        processes,
        reachable: true,
    }
}

/// Marks processes producing a goal, then the producers of their needs, and so on.
fn relevant_processes<'a>(processes: &'a [Process], goals: &[&'a str]) -> Vec<bool> {
    let mut keep = vec![false; processes.len()];
    let mut seen: HashSet<&str> = HashSet::new();
    let mut stack: Vec<&str> = goals.to_vec();

    while let Some(item) = stack.pop() {
        if !seen.insert(item) {
            continue;
        }
        for (idx, process) in processes.iter().enumerate() {
            if !keep[idx] && process.produces(item) {
                keep[idx] = true;
                stack.extend(process.needs.iter().map(|n| n.name.as_str()));
            }
        }
    }
    keep
}
