//! Per-tick derivation of node and edge visual attributes.

use aq_core::{NodeId, Real};
use aq_graph::{FlowGraph, Node, NodeKind, Substance};
use aq_layout::PositionSnapshot;

use crate::scale::ThicknessScale;

/// Quantity that edge thickness encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThicknessBasis {
    /// Volumetric flow.
    #[default]
    Flow,
    /// Flow times COD concentration.
    FlowCod,
    /// Flow times nitrogen concentration.
    FlowN,
    /// Flow times phosphorus concentration.
    FlowP,
}

impl ThicknessBasis {
    fn magnitude(self, node: &Node) -> Real {
        match self {
            Self::Flow => node.flow.abs(),
            Self::FlowCod => (node.flow * node.loads.get(Substance::Cod)).abs(),
            Self::FlowN => (node.flow * node.loads.get(Substance::Nitrogen)).abs(),
            Self::FlowP => (node.flow * node.loads.get(Substance::Phosphorus)).abs(),
        }
    }
}

/// Which way the arrowhead points relative to the declared edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowDirection {
    Forward,
    Reverse,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeVisual {
    pub source: NodeId,
    pub target: NodeId,
    pub width: Real,
    pub direction: ArrowDirection,
    pub dashed: bool,
}

/// Label texts a node carries; `None` means the label is suppressed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeLabels {
    pub name: Option<String>,
    pub flow: Option<String>,
    pub concentration: Option<String>,
    pub mass: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeVisual {
    pub id: NodeId,
    pub x: Real,
    pub y: Real,
    pub opacity: Real,
    pub highlight_concentration: bool,
    pub labels: NodeLabels,
}

/// Full renderable attribute set for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualAttributeSet {
    pub nodes: Vec<NodeVisual>,
    pub edges: Vec<EdgeVisual>,
}

/// Derives visual attributes from current graph values and positions.
///
/// The thickness scale is fitted to the magnitudes of all nodes under
/// `basis`, so widths stay comparable across edges within one frame.
pub fn derive_visuals(
    graph: &FlowGraph,
    snapshot: &PositionSnapshot,
    basis: ThicknessBasis,
    log_scale: bool,
) -> VisualAttributeSet {
    let scale = ThicknessScale::fit(graph.nodes().iter().map(|n| basis.magnitude(n)), log_scale);

    let nodes = graph
        .nodes()
        .iter()
        .zip(snapshot.positions.iter())
        .map(|(node, pos)| NodeVisual {
            id: node.id,
            x: pos.x,
            y: pos.y,
            opacity: node_opacity(node),
            highlight_concentration: node.display.highlight_concentration,
            labels: node_labels(node),
        })
        .collect();

    let edges = graph
        .edges()
        .iter()
        .map(|edge| {
            // Edge endpoints come from the same frozen graph, so the
            // index is always in range.
            let source = &graph.nodes()[edge.source.index() as usize];
            EdgeVisual {
                source: edge.source,
                target: edge.target,
                width: scale.width(basis.magnitude(source)),
                direction: if source.flow >= 0.0 {
                    ArrowDirection::Forward
                } else {
                    ArrowDirection::Reverse
                },
                dashed: source.display.dashed_outgoing,
            }
        })
        .collect();

    VisualAttributeSet { nodes, edges }
}

fn node_opacity(node: &Node) -> Real {
    if node.display.hidden || (node.kind == NodeKind::Input && node.flow == 0.0) {
        0.0
    } else {
        1.0
    }
}

fn node_labels(node: &Node) -> NodeLabels {
    let mut labels = NodeLabels::default();
    if !node.display.hide_name {
        labels.name = Some(node.alias.clone());
    }
    if !node.display.hide_flow_label {
        labels.flow = Some(format!("{:.1} L/d", node.flow.abs()));
    }
    if !node.display.hide_concentration_label {
        let p = node.loads.get(Substance::Phosphorus);
        labels.concentration = Some(if p < 10.0 {
            format!("{p:.2} mg/L P")
        } else {
            format!("{p:.0} mg/L P")
        });
    }
    if node.display.show_mass_label {
        let grams_per_day = (node.loads.get(Substance::Phosphorus) * node.flow).abs() / 1_000.0;
        labels.mass = Some(format!("{grams_per_day:.2} g/d P"));
    }
    labels
}
