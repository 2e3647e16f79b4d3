//! The value-propagation pass.

use crate::graph::FlowGraph;
use crate::node::Loads;

impl FlowGraph {
    /// Recompute flow and loads for every calculated node, in place.
    ///
    /// Per calculated node, processed in the validated dependency order:
    /// total flow is the signed sum of incoming sources' flows (reversed
    /// edges contribute negatively), and each load is the flow-weighted
    /// average of the sources' loads. A node with no net positive inflow
    /// carries no defined concentration: its loads are reset to zero.
    ///
    /// Idempotent: a second call with no intervening mutation reproduces
    /// the same values exactly. Never fails on a loaded topology.
    pub fn propagate(&mut self) {
        for k in 0..self.calculated_order().len() {
            let target = self.calculated_order()[k];
            let idx = target.index() as usize;

            let mut total_flow = 0.0;
            let mut weighted = Loads::default();
            for &source in self.incoming_sources(target) {
                let src = &self.nodes()[source.index() as usize];
                total_flow += src.flow;
                weighted.cod += src.flow * src.loads.cod;
                weighted.n += src.flow * src.loads.n;
                weighted.p += src.flow * src.loads.p;
            }

            let loads = if total_flow > 0.0 {
                Loads::new(
                    weighted.cod / total_flow,
                    weighted.n / total_flow,
                    weighted.p / total_flow,
                )
            } else {
                Loads::default()
            };
            self.write_calculated(idx, total_flow, loads);
        }
    }

    fn write_calculated(&mut self, idx: usize, flow: f64, loads: Loads) {
        let node = &mut self.nodes_mut()[idx];
        node.flow = flow;
        node.loads = loads;
    }
}

#[cfg(test)]
mod tests {
    use crate::spec::{EdgeSpec, NodeSpec, TopologySpec};
    use crate::{FlowGraph, InputAttribute, Loads};

    fn merge_spec() -> TopologySpec {
        TopologySpec {
            nodes: vec![
                NodeSpec::input("A", "Urine")
                    .flow(0.7)
                    .loads(Loads::new(15000.0, 15000.0, 1200.0)),
                NodeSpec::input("B", "Washwater")
                    .flow(0.2)
                    .loads(Loads::new(500.0, 33.0, 3000.0)),
                NodeSpec::calculated("M", "Mixer"),
            ],
            edges: vec![EdgeSpec::new("A", "M"), EdgeSpec::new("B", "M")],
        }
    }

    #[test]
    fn merge_is_flow_weighted() {
        // Spec scenario: Q 0.7 + 0.2 merge, P 1200/3000 -> 0.9 and ~1600.
        let graph = FlowGraph::load(merge_spec()).unwrap();
        let m = graph.node_by_key("M").unwrap();
        assert!((m.flow - 0.9).abs() < 1e-12);
        let expected_p = (0.7 * 1200.0 + 0.2 * 3000.0) / 0.9;
        assert!((m.loads.p - expected_p).abs() < 1e-9);
        assert!((expected_p - 1600.0).abs() < 1.0);
    }

    #[test]
    fn zero_net_inflow_resets_loads() {
        let mut graph = FlowGraph::load(merge_spec()).unwrap();
        let a = graph.node_id("A").unwrap();
        let b = graph.node_id("B").unwrap();
        graph.set_input(a, InputAttribute::Flow, 0.5).unwrap();
        graph.set_input(b, InputAttribute::Flow, -0.5).unwrap();
        graph.propagate();

        let m = graph.node_by_key("M").unwrap();
        assert_eq!(m.flow, 0.0);
        assert_eq!(m.loads, Loads::default());
    }

    #[test]
    fn propagate_is_idempotent() {
        let mut graph = FlowGraph::load(merge_spec()).unwrap();
        graph.propagate();
        let first: Vec<_> = graph
            .nodes()
            .iter()
            .map(|n| (n.flow, n.loads))
            .collect();
        graph.propagate();
        let second: Vec<_> = graph
            .nodes()
            .iter()
            .map(|n| (n.flow, n.loads))
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn negative_upstream_flow_subtracts() {
        let mut graph = FlowGraph::load(merge_spec()).unwrap();
        let b = graph.node_id("B").unwrap();
        graph.set_input(b, InputAttribute::Flow, -0.2).unwrap();
        graph.propagate();
        let m = graph.node_by_key("M").unwrap();
        assert!((m.flow - 0.5).abs() < 1e-12);
    }
}
