//! Plain construction inputs for `FlowGraph::load`.
//!
//! These are deliberately dumb value types: file formats live in
//! aq-project, which lowers its serde definitions into this shape.

use crate::node::{DisplayPolicy, LayoutBias, Loads, NodeKind, NodeRole};
use aq_core::Real;

/// Construction description of one node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSpec {
    pub key: String,
    pub alias: String,
    pub kind: NodeKind,
    pub flow: Real,
    pub loads: Loads,
    pub bias: LayoutBias,
    pub display: DisplayPolicy,
    pub role: Option<NodeRole>,
}

impl NodeSpec {
    /// Input node with zero flow and loads; chain builder methods to fill in.
    pub fn input(key: impl Into<String>, alias: impl Into<String>) -> Self {
        Self::new(key, alias, NodeKind::Input)
    }

    /// Calculated node; flow and loads are overwritten by propagation.
    pub fn calculated(key: impl Into<String>, alias: impl Into<String>) -> Self {
        Self::new(key, alias, NodeKind::Calculated)
    }

    fn new(key: impl Into<String>, alias: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            key: key.into(),
            alias: alias.into(),
            kind,
            flow: 0.0,
            loads: Loads::default(),
            bias: LayoutBias::default(),
            display: DisplayPolicy::default(),
            role: None,
        }
    }

    pub fn flow(mut self, flow: Real) -> Self {
        self.flow = flow;
        self
    }

    pub fn loads(mut self, loads: Loads) -> Self {
        self.loads = loads;
        self
    }

    pub fn bias(mut self, bias: LayoutBias) -> Self {
        self.bias = bias;
        self
    }

    pub fn display(mut self, display: DisplayPolicy) -> Self {
        self.display = display;
        self
    }

    pub fn role(mut self, role: NodeRole) -> Self {
        self.role = Some(role);
        self
    }
}

/// Construction description of one directed edge, by node key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeSpec {
    pub source: String,
    pub target: String,
}

impl EdgeSpec {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Full static topology description consumed once at load.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TopologySpec {
    pub nodes: Vec<NodeSpec>,
    pub edges: Vec<EdgeSpec>,
}
