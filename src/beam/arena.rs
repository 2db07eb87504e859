//! Launch arena for trace reconstruction.
//!
//! Beam nodes do not carry their own trace. Each launch is appended here
//! with the index of the launch before it on the same path, and a node
//! only remembers the index of its latest launch. Walking parent links
//! backward rebuilds the trace.

use crate::models::TraceEntry;

#[derive(Debug, Clone, Copy)]
struct LaunchRecord {
    entry: TraceEntry,
    parent: Option<usize>,
}

/// Append-only store of launch records addressed by index.
#[derive(Debug, Default)]
pub struct LaunchArena {
    records: Vec<LaunchRecord>,
}

impl LaunchArena {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records a launch following `parent`; returns its index.
    pub fn push(&mut self, entry: TraceEntry, parent: Option<usize>) -> usize {
        self.records.push(LaunchRecord { entry, parent });
        self.records.len() - 1
    }

    /// Rebuilds the trace ending at `head`, oldest launch first.
    pub fn trace(&self, head: Option<usize>) -> Vec<TraceEntry> {
        let mut trace = Vec::new();
        let mut cursor = head;
        while let Some(i) = cursor {
            let record = self.records[i];
            trace.push(record.entry);
            cursor = record.parent;
        }
        trace.reverse();
        trace
    }

    /// Drops every record not on a path ending at one of `heads`, then
    /// rewrites `heads` to the new indices.
    pub fn compact(&mut self, heads: &mut [Option<usize>]) {
        let mut live = vec![false; self.records.len()];
        for head in heads.iter().flatten() {
            let mut cursor = Some(*head);
            while let Some(i) = cursor {
                if live[i] {
                    break;
                }
                live[i] = true;
                cursor = self.records[i].parent;
            }
        }

        // parents always precede their children
        let mut remap: Vec<Option<usize>> = vec![None; self.records.len()];
        let mut kept = Vec::with_capacity(live.iter().filter(|&&l| l).count());
        for (i, record) in self.records.iter().enumerate() {
            if live[i] {
                remap[i] = Some(kept.len());
                kept.push(LaunchRecord {
                    entry: record.entry,
                    parent: record.parent.and_then(|p| remap[p]),
                });
            }
        }
        self.records = kept;

        for head in heads.iter_mut() {
            *head = head.and_then(|h| remap[h]);
        }
    }
}
