//! Directed dependency edges between nodes.

use crate::store::NodeId;

/// Predecessor → successors adjacency for a dependency graph.
///
/// An edge `before → after` means `before` must be scheduled ahead of
/// `after`. Parallel edges between the same pair are kept as separate
/// occurrences rather than deduplicated: each occurrence adds one to the
/// successor's in-degree and is decremented exactly once when `before` is
/// scheduled, so duplicates cannot wedge the sort.
#[derive(Debug, Clone, Default)]
pub struct DependencyMap {
    /// Outgoing edges per node, indexed densely by id.
    successors: Vec<Vec<NodeId>>,
    /// Total edge occurrences, duplicates included.
    edge_count: usize,
}

impl DependencyMap {
    /// Creates an empty edge mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `before` must be scheduled ahead of `after`.
    pub fn add_edge(&mut self, before: NodeId, after: NodeId) {
        if self.successors.len() <= before.index() {
            self.successors.resize_with(before.index() + 1, Vec::new);
        }
        self.successors[before.index()].push(after);
        self.edge_count += 1;
    }

    /// Successors of `id`, in the order their edges were recorded.
    pub fn successors(&self, id: NodeId) -> &[NodeId] {
        match self.successors.get(id.index()) {
            Some(list) => list,
            None => &[],
        }
    }

    /// Total number of recorded edge occurrences, duplicates included.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}
