//! Dependency graph facades.
//!
//! A graph couples node storage with one way of declaring dependencies and
//! a sorter strategy. [`SimpleDependencyGraph`] takes explicit "runs
//! after" edges; [`ResourceDependencyGraph`] derives its edges from
//! declared resource reads and writes.

use std::hash::Hash;

use crate::edges::DependencyMap;
use crate::error::GraphError;
use crate::hazard::{AccessMode, AccessTable};
use crate::sorter::{KahnSorter, TopologicalSorter};
use crate::store::{NodeId, NodeStore};

/// Dependency graph with caller-declared edges.
///
/// # Example
///
/// ```
/// use passgraph::SimpleDependencyGraph;
///
/// let mut graph = SimpleDependencyGraph::new();
/// let shadow = graph.add_node("shadow");
/// let lighting = graph.add_node("lighting");
/// graph.add_dependency(lighting, shadow)?;
///
/// let order = graph.build_execution_order()?;
/// assert_eq!(order, vec![shadow, lighting]);
/// # Ok::<(), passgraph::GraphError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SimpleDependencyGraph<T, S = KahnSorter> {
    nodes: NodeStore<T>,
    edges: DependencyMap,
    sorter: S,
}

impl<T> SimpleDependencyGraph<T> {
    /// Creates an empty graph with the default [`KahnSorter`] strategy.
    pub fn new() -> Self {
        Self::with_sorter(KahnSorter)
    }
}

impl<T> Default for SimpleDependencyGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S: TopologicalSorter> SimpleDependencyGraph<T, S> {
    /// Creates an empty graph with a caller-chosen sorter strategy.
    pub fn with_sorter(sorter: S) -> Self {
        Self {
            nodes: NodeStore::new(),
            edges: DependencyMap::new(),
            sorter,
        }
    }

    /// Adds a node and returns its handle.
    pub fn add_node(&mut self, payload: T) -> NodeId {
        self.nodes.add(payload)
    }

    /// Returns the payload for `id`.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id)
    }

    /// Returns the payload for `id` mutably.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(id)
    }

    /// Number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Declares that `node` must run after `depends_on`.
    ///
    /// Declaring the same pair again adds a parallel edge, which the
    /// sorter tolerates. Fails with [`GraphError::UnknownNode`] if either
    /// id was never added.
    pub fn add_dependency(&mut self, node: NodeId, depends_on: NodeId) -> Result<(), GraphError> {
        self.check_node(node)?;
        self.check_node(depends_on)?;
        self.edges.add_edge(depends_on, node);
        Ok(())
    }

    /// Computes an execution order honoring every declared dependency.
    ///
    /// The accumulated edges are handed to the sorter unchanged. Fails
    /// with [`GraphError::CyclicDependency`] when the declarations
    /// contradict each other; no partial order is returned.
    pub fn build_execution_order(&self) -> Result<Vec<NodeId>, GraphError> {
        self.sorter.sort(self.nodes.len(), &self.edges)
    }

    fn check_node(&self, id: NodeId) -> Result<(), GraphError> {
        if self.nodes.contains(id) {
            Ok(())
        } else {
            Err(GraphError::UnknownNode(id))
        }
    }
}

/// Dependency graph that derives edges from declared resource accesses.
///
/// Each node declares which shared resources it reads and writes; at build
/// time the hazard rules (RAW, WAW, WAR) turn conflicting accesses into
/// ordering edges, so passes touching the same target line up without any
/// explicit edge declarations. Nodes that only read a resource stay
/// mutually unordered.
///
/// The resource key type `R` is caller-defined and compared by value; an
/// integer handle works well for GPU resources.
///
/// # Example
///
/// ```
/// use passgraph::ResourceDependencyGraph;
///
/// let mut graph = ResourceDependencyGraph::new();
/// let depth_prepass = graph.add_node("depth_prepass");
/// let gbuffer = graph.add_node("gbuffer");
///
/// const DEPTH: u32 = 0;
/// graph.add_write(depth_prepass, DEPTH)?;
/// graph.add_read(gbuffer, DEPTH)?;
///
/// let order = graph.build_execution_order()?;
/// assert_eq!(order, vec![depth_prepass, gbuffer]);
/// # Ok::<(), passgraph::GraphError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ResourceDependencyGraph<T, R, S = KahnSorter> {
    nodes: NodeStore<T>,
    accesses: AccessTable<R>,
    sorter: S,
}

impl<T, R> ResourceDependencyGraph<T, R> {
    /// Creates an empty graph with the default [`KahnSorter`] strategy.
    pub fn new() -> Self {
        Self::with_sorter(KahnSorter)
    }
}

impl<T, R> Default for ResourceDependencyGraph<T, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, R, S: TopologicalSorter> ResourceDependencyGraph<T, R, S> {
    /// Creates an empty graph with a caller-chosen sorter strategy.
    pub fn with_sorter(sorter: S) -> Self {
        Self {
            nodes: NodeStore::new(),
            accesses: AccessTable::new(),
            sorter,
        }
    }

    /// Adds a node and returns its handle.
    pub fn add_node(&mut self, payload: T) -> NodeId {
        self.nodes.add(payload)
    }

    /// Returns the payload for `id`.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id)
    }

    /// Returns the payload for `id` mutably.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(id)
    }

    /// Number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Declares that `node` reads `resource`.
    ///
    /// Fails with [`GraphError::UnknownNode`] if `node` was never added.
    pub fn add_read(&mut self, node: NodeId, resource: R) -> Result<(), GraphError> {
        self.check_node(node)?;
        self.accesses.record(node, resource, AccessMode::Read);
        Ok(())
    }

    /// Declares that `node` writes `resource`.
    ///
    /// Fails with [`GraphError::UnknownNode`] if `node` was never added.
    pub fn add_write(&mut self, node: NodeId, resource: R) -> Result<(), GraphError> {
        self.check_node(node)?;
        self.accesses.record(node, resource, AccessMode::Write);
        Ok(())
    }

    /// Derives hazard edges from the declared accesses and computes an
    /// execution order honoring them.
    ///
    /// The hazard scan runs from scratch on every call; repeated calls
    /// with unchanged declarations return the identical order. Fails with
    /// [`GraphError::CyclicDependency`] when the accesses imply a cycle.
    pub fn build_execution_order(&self) -> Result<Vec<NodeId>, GraphError>
    where
        R: Eq + Hash,
    {
        let edges = self.accesses.derive(self.nodes.len());
        self.sorter.sort(self.nodes.len(), &edges)
    }

    fn check_node(&self, id: NodeId) -> Result<(), GraphError> {
        if self.nodes.contains(id) {
            Ok(())
        } else {
            Err(GraphError::UnknownNode(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_graph_orders_explicit_edges() {
        let mut graph = SimpleDependencyGraph::new();
        let a = graph.add_node("a");
        let b = graph.add_node("b");
        graph.add_dependency(a, b).unwrap();

        let order = graph.build_execution_order().unwrap();
        assert_eq!(order, vec![b, a]);
    }

    #[test]
    fn unknown_node_in_dependency_is_rejected() {
        let mut graph = SimpleDependencyGraph::new();
        let a = graph.add_node("a");
        let ghost = NodeId::from_index(5);

        assert_eq!(
            graph.add_dependency(a, ghost),
            Err(GraphError::UnknownNode(ghost))
        );
        assert_eq!(
            graph.add_dependency(ghost, a),
            Err(GraphError::UnknownNode(ghost))
        );
    }

    #[test]
    fn unknown_node_in_access_is_rejected() {
        let mut graph: ResourceDependencyGraph<&str, u32> = ResourceDependencyGraph::new();
        let ghost = NodeId::from_index(0);

        assert_eq!(
            graph.add_read(ghost, 1),
            Err(GraphError::UnknownNode(ghost))
        );
        assert_eq!(
            graph.add_write(ghost, 1),
            Err(GraphError::UnknownNode(ghost))
        );
    }

    #[test]
    fn payloads_are_reachable_and_mutable() {
        let mut graph: ResourceDependencyGraph<String, u32> = ResourceDependencyGraph::new();
        let id = graph.add_node("shadow".to_string());

        graph.get_mut(id).unwrap().push_str("_map");
        assert_eq!(graph.get(id).map(String::as_str), Some("shadow_map"));
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn rebuild_without_changes_is_stable() {
        let mut graph = ResourceDependencyGraph::new();
        let a = graph.add_node("a");
        let b = graph.add_node("b");
        let c = graph.add_node("c");
        graph.add_write(a, "target").unwrap();
        graph.add_read(b, "target").unwrap();
        graph.add_write(c, "target").unwrap();

        let first = graph.build_execution_order().unwrap();
        let second = graph.build_execution_order().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn cycle_from_explicit_edges_surfaces() {
        let mut graph = SimpleDependencyGraph::new();
        let a = graph.add_node("a");
        let b = graph.add_node("b");
        graph.add_dependency(a, b).unwrap();
        graph.add_dependency(b, a).unwrap();

        let err = graph.build_execution_order().unwrap_err();
        assert!(matches!(err, GraphError::CyclicDependency(_)));
    }

    #[test]
    fn custom_sorter_strategy_is_used() {
        /// Schedules in reverse id order, ignoring edges. Only valid for
        /// edge-free graphs, which is all this test builds.
        struct ReverseSorter;

        impl TopologicalSorter for ReverseSorter {
            fn sort(
                &self,
                node_count: usize,
                _edges: &DependencyMap,
            ) -> Result<Vec<NodeId>, GraphError> {
                Ok((0..node_count).rev().map(NodeId::from_index).collect())
            }
        }

        let mut graph = SimpleDependencyGraph::with_sorter(ReverseSorter);
        let a = graph.add_node("a");
        let b = graph.add_node("b");

        let order = graph.build_execution_order().unwrap();
        assert_eq!(order, vec![b, a]);
    }
}
