//! # Passgraph
//!
//! Execution ordering for interdependent units of work, built with frame
//! graphs in mind: add passes as nodes, declare either explicit
//! dependencies or per-pass resource reads and writes, and get back a
//! linear order that respects every constraint.
//!
//! ## Core Types
//!
//! - [`SimpleDependencyGraph`]: caller declares direct "runs after" edges.
//! - [`ResourceDependencyGraph`]: edges are derived from declared
//!   resource accesses via the classic hazard rules (RAW, WAW, WAR).
//! - [`TopologicalSorter`] / [`KahnSorter`]: pluggable ordering strategy.
//! - [`GraphError`]: cycle detection and unknown-node reporting.
//!
//! ## Example
//!
//! ```
//! use passgraph::ResourceDependencyGraph;
//!
//! // Two passes contend on one render target; a third reads it last.
//! let mut graph = ResourceDependencyGraph::new();
//! let gbuffer = graph.add_node("gbuffer");
//! let lighting = graph.add_node("lighting");
//! let present = graph.add_node("present");
//!
//! let hdr = "hdr_color";
//! graph.add_write(gbuffer, hdr)?;
//! graph.add_read(lighting, hdr)?;
//! graph.add_write(lighting, hdr)?;
//! graph.add_read(present, hdr)?;
//!
//! let order = graph.build_execution_order()?;
//! assert_eq!(order, vec![gbuffer, lighting, present]);
//! # Ok::<(), passgraph::GraphError>(())
//! ```
//!
//! ## Scope
//!
//! The library produces a single total order. Resource lifetime analysis,
//! barrier synthesis, pass culling and parallel wavefront extraction are
//! jobs for the layer above.

mod edges;
mod error;
mod graph;
mod hazard;
mod sorter;
mod store;

pub use edges::DependencyMap;
pub use error::GraphError;
pub use graph::{ResourceDependencyGraph, SimpleDependencyGraph};
pub use hazard::AccessMode;
pub use sorter::{KahnSorter, TopologicalSorter};
pub use store::{NodeId, NodeStore};
