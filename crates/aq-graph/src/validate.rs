//! Topology validation logic.
//!
//! Validation happens once, at load time. Declaration order in a topology
//! file is never trusted as an evaluation order; the order is computed
//! explicitly and a cycle is a load-time error.

use std::collections::HashMap;

use petgraph::algo::toposort;
use petgraph::graph::DiGraph;

use crate::error::{GraphError, GraphResult};
use crate::node::NodeKind;
use crate::spec::{EdgeSpec, NodeSpec};

/// Check key uniqueness and build the key -> node index map.
pub(crate) fn index_keys(nodes: &[NodeSpec]) -> GraphResult<HashMap<String, usize>> {
    let mut map = HashMap::with_capacity(nodes.len());
    for (i, node) in nodes.iter().enumerate() {
        if map.insert(node.key.clone(), i).is_some() {
            return Err(GraphError::DuplicateNodeKey {
                key: node.key.clone(),
            });
        }
    }
    Ok(map)
}

/// Resolve edge endpoints to node indices.
pub(crate) fn resolve_edges(
    edges: &[EdgeSpec],
    key_to_idx: &HashMap<String, usize>,
) -> GraphResult<Vec<(usize, usize)>> {
    let mut resolved = Vec::with_capacity(edges.len());
    for edge in edges {
        let source = *key_to_idx
            .get(&edge.source)
            .ok_or_else(|| GraphError::UnknownEdgeEndpoint {
                key: edge.source.clone(),
            })?;
        let target = *key_to_idx
            .get(&edge.target)
            .ok_or_else(|| GraphError::UnknownEdgeEndpoint {
                key: edge.target.clone(),
            })?;
        resolved.push((source, target));
    }
    Ok(resolved)
}

/// Compute a topological evaluation order over the calculated nodes.
///
/// Only edges whose target is calculated create a dependency, and only
/// calculated sources participate (input nodes are pure leaves: their
/// values never depend on propagation). A cycle among calculated nodes
/// is a fatal topology error.
pub(crate) fn calculated_order(
    nodes: &[NodeSpec],
    edges: &[(usize, usize)],
) -> GraphResult<Vec<usize>> {
    let mut dep_graph: DiGraph<usize, ()> = DiGraph::new();
    let mut petgraph_idx = vec![None; nodes.len()];

    for (i, node) in nodes.iter().enumerate() {
        if node.kind == NodeKind::Calculated {
            petgraph_idx[i] = Some(dep_graph.add_node(i));
        }
    }

    for &(source, target) in edges {
        if let (Some(s), Some(t)) = (petgraph_idx[source], petgraph_idx[target]) {
            dep_graph.add_edge(s, t, ());
        }
    }

    match toposort(&dep_graph, None) {
        Ok(order) => Ok(order.into_iter().map(|ix| dep_graph[ix]).collect()),
        Err(cycle) => {
            let node_idx = dep_graph[cycle.node_id()];
            Err(GraphError::CyclicCalculatedSubgraph {
                key: nodes[node_idx].key.clone(),
            })
        }
    }
}
