//! Obvious-cycle detection.
//!
//! Process `A` *feeds* process `B` when `A`'s result set is exactly `B`'s
//! need set (same item names, same number of lines; quantities are not
//! compared). Every process lying on a closed feed chain, self-loops
//! included, can fire forever without net progress and is flagged
//! `in_cycle`.
//!
//! # Algorithm
//! Builds the feed graph, then runs one DFS per process looking for a
//! path back to itself.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.3

use crate::models::{Process, ProcessId};

/// Flags every process on an obvious cycle. Returns how many were flagged.
pub fn mark_obvious_cycles(processes: &mut [Process]) -> usize {
    let adj = feed_graph(processes);
    let flags: Vec<bool> = (0..processes.len())
        .map(|start| returns_to(start, &adj))
        .collect();

    let mut flagged = 0;
    for (process, flag) in processes.iter_mut().zip(flags) {
        process.in_cycle = flag;
        if flag {
            flagged += 1;
        }
    }
    flagged
}

/// Whether `a`'s results exactly match `b`'s needs.
pub fn feeds(a: &Process, b: &Process) -> bool {
    !a.results.is_empty()
        && a.results.len() == b.needs.len()
        && a.results.iter().all(|r| b.needs.contains(r))
}

fn feed_graph(processes: &[Process]) -> Vec<Vec<ProcessId>> {
    processes
        .iter()
        .map(|a| {
            processes
                .iter()
                .enumerate()
                .filter(|(_, b)| feeds(a, b))
                .map(|(id, _)| id)
                .collect()
        })
        .collect()
}

fn returns_to(start: ProcessId, adj: &[Vec<ProcessId>]) -> bool {
    let mut visited = vec![false; adj.len()];
    let mut stack: Vec<ProcessId> = adj[start].clone();

    while let Some(node) = stack.pop() {
        if node == start {
            return true;
        }
        if visited[node] {
            continue;
        }
        visited[node] = true;
        stack.extend(adj[node].iter().copied().filter(|&n| !visited[n]));
    }
    false
}
