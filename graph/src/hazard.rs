//! Hazard-based dependency derivation from declared resource accesses.
//!
//! Nodes declare which shared resources they read and write; the scan in
//! [`AccessTable::derive`] turns conflicting accesses into ordering edges
//! using the three classic hazard rules from task scheduling:
//!
//! - **RAW**: a reader must run after the last writer of the resource.
//! - **WAW**: a writer must run after the previous writer.
//! - **WAR**: a writer must run after every reader since the previous
//!   write, so the write cannot change data mid-read.
//!
//! Two nodes that only read a resource stay mutually unordered.

use std::collections::HashMap;
use std::hash::Hash;

use crate::edges::DependencyMap;
use crate::store::NodeId;

/// Whether an access reads or writes the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessMode {
    /// The node reads the resource.
    Read,
    /// The node writes the resource.
    Write,
}

impl AccessMode {
    /// Check if this access mode is a write operation.
    pub fn is_write(self) -> bool {
        matches!(self, Self::Write)
    }

    /// Check if this access mode is a read operation.
    pub fn is_read(self) -> bool {
        matches!(self, Self::Read)
    }
}

/// One declared access: which resource, and how.
#[derive(Debug, Clone)]
struct Access<R> {
    resource: R,
    mode: AccessMode,
}

/// Conflict front for one resource during the scan.
#[derive(Debug, Default)]
struct ResourceState {
    /// The node that last wrote the resource, if any.
    last_writer: Option<NodeId>,
    /// Nodes that read the resource since the last write.
    ///
    /// Kept as a Vec with a membership check so WAR edges come out in a
    /// stable order.
    readers: Vec<NodeId>,
}

/// Per-node access records, in declaration order.
#[derive(Debug, Clone)]
pub(crate) struct AccessTable<R> {
    accesses: Vec<Vec<Access<R>>>,
}

impl<R> AccessTable<R> {
    pub(crate) fn new() -> Self {
        Self {
            accesses: Vec::new(),
        }
    }

    /// Appends an access record for `node`. The node's slot is grown on
    /// demand, so nodes without accesses cost nothing.
    pub(crate) fn record(&mut self, node: NodeId, resource: R, mode: AccessMode) {
        if self.accesses.len() <= node.index() {
            self.accesses.resize_with(node.index() + 1, Vec::new);
        }
        self.accesses[node.index()].push(Access { resource, mode });
    }

    /// Folds all declared accesses into ordering edges.
    ///
    /// Nodes are scanned in ascending id order, and a node's accesses in
    /// declaration order, which makes the materialized edge set
    /// deterministic. Per-resource state is rebuilt from scratch on every
    /// call; nothing persists between derivations.
    pub(crate) fn derive(&self, node_count: usize) -> DependencyMap
    where
        R: Eq + Hash,
    {
        let mut edges = DependencyMap::new();
        let mut states: HashMap<&R, ResourceState> = HashMap::new();

        for (index, node_accesses) in self.accesses.iter().enumerate() {
            let node = NodeId::from_index(index);
            for access in node_accesses {
                let state = states.entry(&access.resource).or_default();
                match access.mode {
                    AccessMode::Read => {
                        // RAW: the last writer must finish before this read.
                        if let Some(writer) = state.last_writer {
                            if writer != node {
                                edges.add_edge(writer, node);
                            }
                        }
                        if !state.readers.contains(&node) {
                            state.readers.push(node);
                        }
                    }
                    AccessMode::Write => {
                        // WAW: the previous writer must finish first.
                        if let Some(writer) = state.last_writer {
                            if writer != node {
                                edges.add_edge(writer, node);
                            }
                        }
                        // WAR: readers of the old contents must finish
                        // before the data changes under them.
                        for &reader in &state.readers {
                            if reader != node {
                                edges.add_edge(reader, node);
                            }
                        }
                        state.readers.clear();
                        state.last_writer = Some(node);
                    }
                }
            }
        }

        log::trace!(
            "derived {} hazard edges across {} nodes",
            edges.edge_count(),
            node_count
        );
        edges
    }
}

impl<R> Default for AccessTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(index: usize) -> NodeId {
        NodeId::from_index(index)
    }

    #[test]
    fn read_after_write_orders_reader_after_writer() {
        let mut table = AccessTable::new();
        table.record(id(0), "buf", AccessMode::Write);
        table.record(id(1), "buf", AccessMode::Read);

        let edges = table.derive(2);
        assert_eq!(edges.successors(id(0)), &[id(1)]);
    }

    #[test]
    fn write_after_write_orders_writers() {
        let mut table = AccessTable::new();
        table.record(id(0), "buf", AccessMode::Write);
        table.record(id(1), "buf", AccessMode::Write);

        let edges = table.derive(2);
        assert_eq!(edges.successors(id(0)), &[id(1)]);
    }

    #[test]
    fn write_after_read_orders_reader_before_writer() {
        let mut table = AccessTable::new();
        table.record(id(0), "buf", AccessMode::Write);
        table.record(id(1), "buf", AccessMode::Read);
        table.record(id(2), "buf", AccessMode::Write);

        let edges = table.derive(3);
        // RAW 0 → 1, then WAW 0 → 2 and WAR 1 → 2.
        assert_eq!(edges.successors(id(0)), &[id(1), id(2)]);
        assert_eq!(edges.successors(id(1)), &[id(2)]);
    }

    #[test]
    fn first_access_emits_nothing() {
        let mut table = AccessTable::new();
        table.record(id(0), "buf", AccessMode::Read);
        table.record(id(1), "other", AccessMode::Write);

        let edges = table.derive(2);
        assert_eq!(edges.edge_count(), 0);
    }

    #[test]
    fn node_never_depends_on_itself() {
        let mut table = AccessTable::new();
        table.record(id(0), "buf", AccessMode::Read);
        table.record(id(0), "buf", AccessMode::Write);
        table.record(id(0), "buf", AccessMode::Read);

        let edges = table.derive(1);
        assert_eq!(edges.edge_count(), 0);
    }

    #[test]
    fn write_clears_reader_set() {
        let mut table = AccessTable::new();
        table.record(id(0), "buf", AccessMode::Read);
        table.record(id(1), "buf", AccessMode::Write);
        table.record(id(2), "buf", AccessMode::Write);

        let edges = table.derive(3);
        // WAR 0 → 1, then only WAW 1 → 2: node 0's read was satisfied by
        // the first write and must not constrain the second.
        assert_eq!(edges.successors(id(0)), &[id(1)]);
        assert_eq!(edges.successors(id(1)), &[id(2)]);
    }

    #[test]
    fn repeated_read_counts_once_for_war() {
        let mut table = AccessTable::new();
        table.record(id(0), "buf", AccessMode::Read);
        table.record(id(0), "buf", AccessMode::Read);
        table.record(id(1), "buf", AccessMode::Write);

        let edges = table.derive(2);
        assert_eq!(edges.successors(id(0)), &[id(1)]);
        assert_eq!(edges.edge_count(), 1);
    }

    #[test]
    fn disjoint_resources_stay_unrelated() {
        let mut table = AccessTable::new();
        table.record(id(0), "a", AccessMode::Write);
        table.record(id(1), "b", AccessMode::Write);

        let edges = table.derive(2);
        assert_eq!(edges.edge_count(), 0);
    }

    #[test]
    fn access_mode_queries() {
        assert!(AccessMode::Write.is_write());
        assert!(!AccessMode::Write.is_read());
        assert!(AccessMode::Read.is_read());
        assert!(!AccessMode::Read.is_write());
    }
}
