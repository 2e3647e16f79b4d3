//! Graph-specific error types.

use crate::node::NodeRole;
use thiserror::Error;

/// Topology loading and mutation errors.
///
/// All of these are configuration errors: they are surfaced at load time
/// (or at the mutation entry point) and never silently degraded.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// An input mutation carried a NaN or infinite value.
    #[error(transparent)]
    NonFinite(#[from] aq_core::NonFiniteError),

    /// Two nodes share the same key.
    #[error("Duplicate node key '{key}'")]
    DuplicateNodeKey { key: String },

    /// An edge references a node key that does not exist.
    #[error("Edge endpoint '{key}' refers to a non-existent node")]
    UnknownEdgeEndpoint { key: String },

    /// The calculated-node subgraph contains a dependency cycle.
    #[error("Calculated subgraph is cyclic (node '{key}' is on a cycle)")]
    CyclicCalculatedSubgraph { key: String },

    /// A lookup by key found no node.
    #[error("Unknown node '{key}'")]
    UnknownNode { key: String },

    /// An input mutation targeted a calculated node.
    #[error("Node '{key}' is calculated and cannot be set directly")]
    NotAnInputNode { key: String },

    /// A policy role required by business rules is not bound to any node.
    #[error("No node carries the {role:?} role")]
    RoleNotBound { role: NodeRole },
}

pub type GraphResult<T> = Result<T, GraphError>;
