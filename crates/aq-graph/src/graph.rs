//! The frozen flow graph.

use std::collections::HashMap;

use aq_core::{NodeId, Real};

use crate::error::{GraphError, GraphResult};
use crate::node::{InputAttribute, Node, NodeKind, NodeRole, Substance};
use crate::spec::TopologySpec;
use crate::validate;

/// A directed reference from a source node to a target node.
///
/// Edges carry no independent attributes; direction arrow, thickness and
/// dash style are all derived from the source node at draw time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
}

/// A validated, frozen flow network.
///
/// The topology (node set, edge set, evaluation order, role bindings) is
/// immutable after `load`. Only input-node scalar attributes mutate, and
/// only through [`FlowGraph::set_input`].
#[derive(Debug, Clone)]
pub struct FlowGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    key_to_idx: HashMap<String, usize>,

    /// Offsets into `in_sources`: node i's incoming sources are in
    /// in_sources[in_offsets[i]..in_offsets[i+1]].
    in_offsets: Vec<usize>,

    /// Flat list of source node ids, grouped by target node index.
    in_sources: Vec<NodeId>,

    /// Calculated node ids in dependency order.
    calc_order: Vec<NodeId>,

    roles: HashMap<NodeRole, NodeId>,
}

impl FlowGraph {
    /// Validate a topology description and freeze it into a graph.
    ///
    /// Fails on duplicate node keys, edges referencing unknown nodes, or
    /// a cyclic calculated subgraph. The initial propagation pass is run
    /// before returning, so calculated values are valid from the start.
    pub fn load(spec: TopologySpec) -> GraphResult<Self> {
        let key_to_idx = validate::index_keys(&spec.nodes)?;
        let resolved = validate::resolve_edges(&spec.edges, &key_to_idx)?;
        let calc_order_idx = validate::calculated_order(&spec.nodes, &resolved)?;

        let nodes: Vec<Node> = spec
            .nodes
            .into_iter()
            .enumerate()
            .map(|(i, n)| Node {
                id: NodeId::from_index(i as u32),
                key: n.key,
                alias: n.alias,
                kind: n.kind,
                flow: n.flow,
                loads: n.loads,
                bias: n.bias,
                display: n.display,
                role: n.role,
            })
            .collect();

        let edges: Vec<Edge> = resolved
            .iter()
            .map(|&(s, t)| Edge {
                source: NodeId::from_index(s as u32),
                target: NodeId::from_index(t as u32),
            })
            .collect();

        let (in_offsets, in_sources) = Self::build_incoming(nodes.len(), &resolved);

        let mut roles = HashMap::new();
        for node in &nodes {
            if let Some(role) = node.role {
                roles.entry(role).or_insert(node.id);
            }
        }

        let mut graph = Self {
            nodes,
            edges,
            key_to_idx,
            in_offsets,
            in_sources,
            calc_order: calc_order_idx
                .into_iter()
                .map(|i| NodeId::from_index(i as u32))
                .collect(),
            roles,
        };
        graph.propagate();
        Ok(graph)
    }

    /// Group incoming edges by target into a compact offset/flat-list pair.
    fn build_incoming(node_count: usize, edges: &[(usize, usize)]) -> (Vec<usize>, Vec<NodeId>) {
        let mut by_target: Vec<Vec<NodeId>> = vec![Vec::new(); node_count];
        for &(source, target) in edges {
            by_target[target].push(NodeId::from_index(source as u32));
        }

        let mut offsets = Vec::with_capacity(node_count + 1);
        let mut flat = Vec::with_capacity(edges.len());
        offsets.push(0);
        for sources in by_target {
            flat.extend_from_slice(&sources);
            offsets.push(flat.len());
        }
        (offsets, flat)
    }

    /// Return all nodes, indexed by `NodeId::index`.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    /// Return all edges in declaration order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Get a node by id (returns None if out of bounds).
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index() as usize)
    }

    /// Get a node by its short key.
    pub fn node_by_key(&self, key: &str) -> Option<&Node> {
        self.key_to_idx.get(key).map(|&i| &self.nodes[i])
    }

    /// Resolve a key to a node id, failing fast on unknown keys.
    pub fn node_id(&self, key: &str) -> GraphResult<NodeId> {
        self.key_to_idx
            .get(key)
            .map(|&i| NodeId::from_index(i as u32))
            .ok_or_else(|| GraphError::UnknownNode {
                key: key.to_string(),
            })
    }

    /// Resolve a business-policy role to its bound node.
    ///
    /// A missing role is a configuration error: downstream policy code
    /// assumes every referenced node exists.
    pub fn role(&self, role: NodeRole) -> GraphResult<NodeId> {
        self.roles
            .get(&role)
            .copied()
            .ok_or(GraphError::RoleNotBound { role })
    }

    /// Incoming edge sources for a node.
    pub fn incoming_sources(&self, id: NodeId) -> &[NodeId] {
        let idx = id.index() as usize;
        if idx >= self.nodes.len() {
            return &[];
        }
        &self.in_sources[self.in_offsets[idx]..self.in_offsets[idx + 1]]
    }

    /// Calculated node ids in dependency order.
    pub fn calculated_order(&self) -> &[NodeId] {
        &self.calc_order
    }

    /// The sole mutation entry point for input-node scalar attributes.
    ///
    /// Rejects calculated nodes: their values are owned by propagation.
    /// Callers are responsible for running [`FlowGraph::propagate`] (or a
    /// policy pass that ends in one) before treating the graph state as
    /// valid again.
    pub fn set_input(&mut self, id: NodeId, attr: InputAttribute, value: Real) -> GraphResult<()> {
        let value = aq_core::ensure_finite(value, "input attribute value")?;
        let idx = id.index() as usize;
        let node = self
            .nodes
            .get_mut(idx)
            .ok_or_else(|| GraphError::UnknownNode {
                key: format!("#{}", id),
            })?;
        if node.kind != NodeKind::Input {
            return Err(GraphError::NotAnInputNode {
                key: node.key.clone(),
            });
        }
        match attr {
            InputAttribute::Flow => node.flow = value,
            InputAttribute::LoadCod => node.loads.set(Substance::Cod, value),
            InputAttribute::LoadN => node.loads.set(Substance::Nitrogen, value),
            InputAttribute::LoadP => node.loads.set(Substance::Phosphorus, value),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{EdgeSpec, NodeSpec};

    fn two_node_spec() -> TopologySpec {
        TopologySpec {
            nodes: vec![
                NodeSpec::input("A", "Source").flow(1.0),
                NodeSpec::calculated("M", "Mixer"),
            ],
            edges: vec![EdgeSpec::new("A", "M")],
        }
    }

    #[test]
    fn load_builds_incoming_adjacency() {
        let graph = FlowGraph::load(two_node_spec()).unwrap();
        let m = graph.node_id("M").unwrap();
        let a = graph.node_id("A").unwrap();
        assert_eq!(graph.incoming_sources(m), &[a]);
        assert!(graph.incoming_sources(a).is_empty());
    }

    #[test]
    fn unknown_key_fails_fast() {
        let graph = FlowGraph::load(two_node_spec()).unwrap();
        let err = graph.node_id("Z").unwrap_err();
        assert!(matches!(err, GraphError::UnknownNode { key } if key == "Z"));
    }

    #[test]
    fn calculated_node_rejects_direct_mutation() {
        let mut graph = FlowGraph::load(two_node_spec()).unwrap();
        let m = graph.node_id("M").unwrap();
        let err = graph.set_input(m, InputAttribute::Flow, 2.0).unwrap_err();
        assert!(matches!(err, GraphError::NotAnInputNode { key } if key == "M"));
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let mut graph = FlowGraph::load(two_node_spec()).unwrap();
        let a = graph.node_id("A").unwrap();
        let err = graph
            .set_input(a, InputAttribute::Flow, f64::NAN)
            .unwrap_err();
        assert!(matches!(err, GraphError::NonFinite(_)));
        // The stored value is untouched.
        assert_eq!(graph.node_by_key("A").unwrap().flow, 1.0);
    }

    #[test]
    fn role_lookup_is_fatal_when_unbound() {
        let graph = FlowGraph::load(two_node_spec()).unwrap();
        let err = graph.role(NodeRole::Sludge).unwrap_err();
        assert!(matches!(err, GraphError::RoleNotBound { .. }));
    }
}
