//! Topological sort strategies.

use std::collections::VecDeque;

use crate::edges::DependencyMap;
use crate::error::GraphError;
use crate::store::NodeId;

/// Strategy that linearizes a dependency graph.
///
/// Implementations consume the node count and the predecessor → successors
/// edge mapping and produce a total order in which every edge points
/// forward, or fail with [`GraphError::CyclicDependency`] when no such
/// order exists. Alternative algorithms (depth-first, priority-driven) can
/// be substituted without touching the derivation side.
pub trait TopologicalSorter {
    /// Computes a dependency-respecting total order over `node_count` nodes.
    fn sort(&self, node_count: usize, edges: &DependencyMap) -> Result<Vec<NodeId>, GraphError>;
}

/// FIFO variant of Kahn's algorithm, the reference strategy.
///
/// The work queue is seeded with every node that has no predecessors, in
/// ascending id order; afterwards nodes enter the queue as their last
/// in-degree count drops to zero. Ties among independent roots therefore
/// resolve by id, later ties by the order their predecessors were
/// scheduled, so the output is deterministic for a given input.
#[derive(Debug, Clone, Copy, Default)]
pub struct KahnSorter;

impl TopologicalSorter for KahnSorter {
    fn sort(&self, node_count: usize, edges: &DependencyMap) -> Result<Vec<NodeId>, GraphError> {
        // In-degree counts raw edge occurrences: a parallel edge adds one
        // here and is decremented exactly once below, so duplicates are
        // self-balancing.
        let mut in_degree = vec![0usize; node_count];
        for index in 0..node_count {
            for successor in edges.successors(NodeId::from_index(index)) {
                in_degree[successor.index()] += 1;
            }
        }

        let mut queue: VecDeque<NodeId> = VecDeque::new();
        for (index, &degree) in in_degree.iter().enumerate() {
            if degree == 0 {
                queue.push_back(NodeId::from_index(index));
            }
        }

        let mut order = Vec::with_capacity(node_count);
        while let Some(node) = queue.pop_front() {
            order.push(node);

            for &successor in edges.successors(node) {
                in_degree[successor.index()] -= 1;
                if in_degree[successor.index()] == 0 {
                    queue.push_back(successor);
                }
            }
        }

        if order.len() != node_count {
            // Whatever never reached in-degree zero is in a cycle or
            // downstream of one.
            let blocked: Vec<NodeId> = in_degree
                .iter()
                .enumerate()
                .filter(|&(_, &degree)| degree > 0)
                .map(|(index, _)| NodeId::from_index(index))
                .collect();
            return Err(GraphError::CyclicDependency(blocked));
        }

        log::debug!(
            "ordered {} nodes over {} edges",
            node_count,
            edges.edge_count()
        );
        Ok(order)
    }
}
