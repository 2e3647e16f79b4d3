//! Network schema definitions.

use aq_graph::{DisplayPolicy, LayoutBias, Loads, NodeRole, NodeSpec, TopologySpec};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<NodeDef>,
    #[serde(default)]
    pub edges: Vec<EdgeDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeDef {
    pub id: String,
    pub alias: String,
    pub kind: NodeKindDef,
    /// Signed volumetric flow, litres per day.
    #[serde(default)]
    pub flow: f64,
    /// COD concentration, mg/L.
    #[serde(default)]
    pub cod: f64,
    /// Nitrogen concentration, mg/L.
    #[serde(default)]
    pub n: f64,
    /// Phosphorus concentration, mg/L.
    #[serde(default)]
    pub p: f64,
    #[serde(default = "default_gravity")]
    pub gravity: f64,
    #[serde(default)]
    pub x_bias: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<RoleDef>,
    #[serde(default)]
    pub display: DisplayDef,
}

fn default_gravity() -> f64 {
    0.05
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NodeKindDef {
    Input,
    Calculated,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RoleDef {
    Washwater,
    Urine,
    Fecal,
    UrineValorisation,
    FecalValorisation,
    Influent,
    Sludge,
    Treatment,
    Lake,
    Upstream,
    Downstream,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DisplayDef {
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub hide_name: bool,
    #[serde(default)]
    pub hide_flow_label: bool,
    #[serde(default)]
    pub hide_concentration_label: bool,
    #[serde(default)]
    pub show_mass_label: bool,
    #[serde(default)]
    pub dashed_outgoing: bool,
    #[serde(default)]
    pub highlight_concentration: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EdgeDef {
    pub source: String,
    pub target: String,
}

impl Project {
    /// Lower the file format into the graph crate's topology description.
    pub fn to_topology(&self) -> TopologySpec {
        TopologySpec {
            nodes: self.nodes.iter().map(NodeDef::to_spec).collect(),
            edges: self
                .edges
                .iter()
                .map(|e| aq_graph::EdgeSpec::new(&e.source, &e.target))
                .collect(),
        }
    }
}

impl NodeDef {
    fn to_spec(&self) -> NodeSpec {
        let mut spec = match self.kind {
            NodeKindDef::Input => NodeSpec::input(&self.id, &self.alias),
            NodeKindDef::Calculated => NodeSpec::calculated(&self.id, &self.alias),
        };
        spec = spec
            .flow(self.flow)
            .loads(Loads::new(self.cod, self.n, self.p))
            .bias(LayoutBias {
                gravity_strength: self.gravity,
                horizontal_bias: self.x_bias,
            })
            .display(self.display.to_policy());
        if let Some(role) = self.role {
            spec = spec.role(role.to_role());
        }
        spec
    }
}

impl RoleDef {
    fn to_role(self) -> NodeRole {
        match self {
            Self::Washwater => NodeRole::Washwater,
            Self::Urine => NodeRole::Urine,
            Self::Fecal => NodeRole::Fecal,
            Self::UrineValorisation => NodeRole::UrineValorisation,
            Self::FecalValorisation => NodeRole::FecalValorisation,
            Self::Influent => NodeRole::Influent,
            Self::Sludge => NodeRole::Sludge,
            Self::Treatment => NodeRole::Treatment,
            Self::Lake => NodeRole::Lake,
            Self::Upstream => NodeRole::Upstream,
            Self::Downstream => NodeRole::Downstream,
        }
    }
}

impl DisplayDef {
    fn to_policy(self) -> DisplayPolicy {
        DisplayPolicy {
            hidden: self.hidden,
            hide_name: self.hide_name,
            hide_flow_label: self.hide_flow_label,
            hide_concentration_label: self.hide_concentration_label,
            show_mass_label: self.show_mass_label,
            dashed_outgoing: self.dashed_outgoing,
            highlight_concentration: self.highlight_concentration,
        }
    }
}
