//! Error types for execution-order building.

use std::fmt;

use crate::store::NodeId;

/// Errors that can occur while building an execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The declared dependencies contain a cycle.
    ///
    /// Carries the nodes still blocked when scheduling stalled: every
    /// member of the cycle, possibly along with nodes that transitively
    /// depend on one. No partial order is produced.
    CyclicDependency(Vec<NodeId>),
    /// A declaration referenced a node id that was never added.
    UnknownNode(NodeId),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CyclicDependency(blocked) => {
                write!(f, "dependency cycle among nodes [")?;
                for (i, node) in blocked.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{node}")?;
                }
                write!(f, "]")
            }
            Self::UnknownNode(node) => write!(f, "unknown node {node}"),
        }
    }
}

impl std::error::Error for GraphError {}
