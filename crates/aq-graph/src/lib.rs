//! aq-graph: flow network data model and value propagation.
//!
//! Provides:
//! - Core node/edge data structures with per-node layout bias and
//!   display policy tags
//! - Topology loading with validation (unknown references, duplicate
//!   keys, cycle detection over the calculated subgraph)
//! - The single-pass flow/load propagation algorithm
//!
//! # Example
//!
//! ```
//! use aq_graph::{EdgeSpec, FlowGraph, Loads, NodeKind, NodeSpec, TopologySpec};
//!
//! let spec = TopologySpec {
//!     nodes: vec![
//!         NodeSpec::input("A", "Source").flow(0.7).loads(Loads::new(0.0, 0.0, 1200.0)),
//!         NodeSpec::calculated("M", "Mixer"),
//!     ],
//!     edges: vec![EdgeSpec::new("A", "M")],
//! };
//!
//! let mut graph = FlowGraph::load(spec).unwrap();
//! graph.propagate();
//! let m = graph.node_by_key("M").unwrap();
//! assert!((m.flow - 0.7).abs() < 1e-12);
//! ```

pub mod error;
pub mod graph;
pub mod node;
pub mod propagate;
pub mod spec;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use error::{GraphError, GraphResult};
pub use graph::{Edge, FlowGraph};
pub use node::{DisplayPolicy, InputAttribute, LayoutBias, Loads, Node, NodeKind, NodeRole, Substance};
pub use spec::{EdgeSpec, NodeSpec, TopologySpec};
