//! Builtin single-household demonstration network.
//!
//! A two-stream household (urine diversion and composting toilet
//! upstream of on-site treatment) discharging through a lake. Useful as
//! a demo and as the default network when no file is given.

use crate::schema::{DisplayDef, EdgeDef, NodeDef, NodeKindDef, Project, RoleDef};

pub fn household() -> Project {
    Project {
        version: 1,
        name: "household".to_string(),
        nodes: vec![
            input("A", "Urine")
                .values(0.7, 15_000.0, 15_000.0, 1_200.0)
                .layout(0.1, -800.0)
                .role(RoleDef::Urine)
                .display(MASS),
            input("H", "Valorisation")
                .values(-0.01, 15_000.0, 15_000.0, 1_200.0)
                .layout(0.1, -500.0)
                .role(RoleDef::UrineValorisation)
                .display(MASS),
            input("N", "Composting toilet")
                .values(-0.01, 350_000.0, 5_000.0, 3_000.0)
                .layout(0.1, -300.0)
                .role(RoleDef::FecalValorisation)
                .display(MASS),
            input("C", "Washwater")
                .values(120.0, 500.0, 33.0, 0.15)
                .layout(0.1, -200.0)
                .role(RoleDef::Washwater)
                .display(MASS),
            input("B", "Fecal matter")
                .values(0.2, 350_000.0, 5_000.0, 3_000.0)
                .layout(0.1, -600.0)
                .role(RoleDef::Fecal)
                .display(MASS_ONLY),
            input("K", "Upstream")
                .values(10_000_000.0, 1.0, 0.1, 0.04)
                .layout(0.0, 200.0)
                .role(RoleDef::Upstream)
                .display(MASS_HIGHLIGHT),
            input("J", "Sludge and mineralisation")
                .values(-0.01, 150_000.0, 1_000.0, 3_000.0)
                .layout(5.0, -10.0)
                .role(RoleDef::Sludge)
                .display(MASS_ONLY),
            calculated("G", "Urine diversion").display(HIDDEN),
            calculated("M", "Fecal diversion").display(HIDDEN),
            calculated("D", "Influent")
                .layout(0.05, 0.0)
                .role(RoleDef::Influent)
                .display(MASS),
            calculated("E", "On-site treatment")
                .layout(0.05, 100.0)
                .role(RoleDef::Treatment)
                .display(MASS_HIGHLIGHT),
            calculated("F", "Lake")
                .layout(0.05, 200.0)
                .role(RoleDef::Lake)
                .display(QUIET),
            calculated("L", "Downstream")
                .layout(-0.2, -200.0)
                .role(RoleDef::Downstream)
                .display(MASS_HIGHLIGHT),
        ],
        edges: vec![
            edge("A", "G"),
            edge("G", "M"),
            edge("M", "D"),
            edge("H", "G"),
            edge("N", "M"),
            edge("B", "M"),
            edge("C", "D"),
            edge("D", "E"),
            edge("J", "E"),
            edge("E", "F"),
            edge("K", "F"),
            edge("F", "L"),
        ],
    }
}

/// Mass label on top of the standard labels.
const MASS: DisplayDef = DisplayDef {
    hidden: false,
    hide_name: false,
    hide_flow_label: false,
    hide_concentration_label: false,
    show_mass_label: true,
    dashed_outgoing: false,
    highlight_concentration: false,
};

/// Mass label only; flow and concentration suppressed.
const MASS_ONLY: DisplayDef = DisplayDef {
    hide_flow_label: true,
    hide_concentration_label: true,
    ..MASS
};

/// Mass label plus emphasized concentration.
const MASS_HIGHLIGHT: DisplayDef = DisplayDef {
    highlight_concentration: true,
    ..MASS
};

/// Name only; the node is a junction, not a point of interest.
const QUIET: DisplayDef = DisplayDef {
    hide_flow_label: true,
    hide_concentration_label: true,
    show_mass_label: false,
    ..MASS
};

/// Invisible junction node.
const HIDDEN: DisplayDef = DisplayDef {
    hidden: true,
    hide_name: true,
    hide_flow_label: true,
    hide_concentration_label: true,
    show_mass_label: false,
    ..MASS
};

fn input(id: &str, alias: &str) -> NodeDef {
    node(id, alias, NodeKindDef::Input)
}

fn calculated(id: &str, alias: &str) -> NodeDef {
    node(id, alias, NodeKindDef::Calculated)
}

fn node(id: &str, alias: &str, kind: NodeKindDef) -> NodeDef {
    NodeDef {
        id: id.to_string(),
        alias: alias.to_string(),
        kind,
        flow: 0.0,
        cod: 0.0,
        n: 0.0,
        p: 0.0,
        gravity: 0.05,
        x_bias: 0.0,
        role: None,
        display: DisplayDef::default(),
    }
}

fn edge(source: &str, target: &str) -> EdgeDef {
    EdgeDef {
        source: source.to_string(),
        target: target.to_string(),
    }
}

impl NodeDef {
    fn values(mut self, flow: f64, cod: f64, n: f64, p: f64) -> Self {
        self.flow = flow;
        self.cod = cod;
        self.n = n;
        self.p = p;
        self
    }

    fn layout(mut self, gravity: f64, x_bias: f64) -> Self {
        self.gravity = gravity;
        self.x_bias = x_bias;
        self
    }

    fn role(mut self, role: RoleDef) -> Self {
        self.role = Some(role);
        self
    }

    fn display(mut self, display: DisplayDef) -> Self {
        self.display = display;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aq_graph::{FlowGraph, NodeRole};

    #[test]
    fn household_network_loads() {
        let graph = FlowGraph::load(household().to_topology()).unwrap();
        assert_eq!(graph.nodes().len(), 13);
        assert_eq!(graph.edges().len(), 12);
    }

    #[test]
    fn every_policy_role_is_bound() {
        let graph = FlowGraph::load(household().to_topology()).unwrap();
        for role in [
            NodeRole::Washwater,
            NodeRole::Urine,
            NodeRole::Fecal,
            NodeRole::UrineValorisation,
            NodeRole::FecalValorisation,
            NodeRole::Influent,
            NodeRole::Sludge,
            NodeRole::Treatment,
            NodeRole::Lake,
            NodeRole::Upstream,
            NodeRole::Downstream,
        ] {
            graph.role(role).unwrap();
        }
    }

    #[test]
    fn initial_propagation_reaches_the_outlet() {
        let graph = FlowGraph::load(household().to_topology()).unwrap();
        let downstream = graph.node_by_key("L").unwrap();
        // Upstream dominates the outlet volume.
        assert!(downstream.flow > 10_000_000.0 - 1.0);
    }
}
