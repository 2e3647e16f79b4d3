//! Node data model.

use aq_core::{NodeId, Real};

/// Whether a node's values come from outside or from propagation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Externally set, user-editable.
    Input,
    /// Derived; overwritten by every propagation pass.
    Calculated,
}

/// One of the three dissolved substances tracked per node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Substance {
    Cod,
    Nitrogen,
    Phosphorus,
}

/// Concentration-like scalars (mass/volume) for the three substances.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Loads {
    pub cod: Real,
    pub n: Real,
    pub p: Real,
}

impl Loads {
    pub fn new(cod: Real, n: Real, p: Real) -> Self {
        Self { cod, n, p }
    }

    pub fn get(&self, substance: Substance) -> Real {
        match substance {
            Substance::Cod => self.cod,
            Substance::Nitrogen => self.n,
            Substance::Phosphorus => self.p,
        }
    }

    pub fn set(&mut self, substance: Substance, value: Real) {
        match substance {
            Substance::Cod => self.cod = value,
            Substance::Nitrogen => self.n = value,
            Substance::Phosphorus => self.p = value,
        }
    }
}

/// Per-node custom force parameters, static after construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutBias {
    /// Pull toward the baseline vertical line. May be negative (push away).
    pub gravity_strength: Real,
    /// Offset from the canvas center the node is pulled toward horizontally.
    pub horizontal_bias: Real,
}

impl Default for LayoutBias {
    fn default() -> Self {
        Self {
            gravity_strength: 0.05,
            horizontal_bias: 0.0,
        }
    }
}

/// Declarative presentation tag assigned once at topology load.
///
/// Replaces alias-keyed exception lists: `derive_visuals` consults these
/// flags uniformly and never matches on display names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayPolicy {
    /// Suppressed unconditionally, regardless of flow.
    pub hidden: bool,
    /// Suppress the alias label.
    pub hide_name: bool,
    /// Suppress the volumetric flow-rate label.
    pub hide_flow_label: bool,
    /// Suppress the concentration label.
    pub hide_concentration_label: bool,
    /// Show the mass-flow (g/d) label. Off by default.
    pub show_mass_label: bool,
    /// Draw outgoing edges dashed.
    pub dashed_outgoing: bool,
    /// Emphasize the concentration label.
    pub highlight_concentration: bool,
}

/// Business-policy role of a node in the treatment chain.
///
/// Policy code resolves roles through the graph and fails fast when a
/// required role is unbound, instead of matching aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRole {
    Washwater,
    Urine,
    Fecal,
    UrineValorisation,
    FecalValorisation,
    /// Combined wastewater entering treatment.
    Influent,
    /// Settled sludge and mineralisation helper.
    Sludge,
    Treatment,
    Lake,
    Upstream,
    Downstream,
}

/// Attribute of an input node settable through the mutation entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAttribute {
    Flow,
    LoadCod,
    LoadN,
    LoadP,
}

/// A vertex in the flow network.
///
/// `flow` is signed: positive means flow travels along the node's
/// outgoing edges in their declared direction, negative means the
/// physical flow is reversed relative to the declared direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    /// Unique short key, stable for lookups and edge references.
    pub key: String,
    /// Display name; not unique.
    pub alias: String,
    pub kind: NodeKind,
    /// Signed volumetric rate (volume/time).
    pub flow: Real,
    pub loads: Loads,
    pub bias: LayoutBias,
    pub display: DisplayPolicy,
    pub role: Option<NodeRole>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_accessors_round_trip() {
        let mut loads = Loads::new(1.0, 2.0, 3.0);
        assert_eq!(loads.get(Substance::Cod), 1.0);
        assert_eq!(loads.get(Substance::Nitrogen), 2.0);
        assert_eq!(loads.get(Substance::Phosphorus), 3.0);

        loads.set(Substance::Phosphorus, 9.0);
        assert_eq!(loads.p, 9.0);
    }

    #[test]
    fn default_bias_matches_baseline() {
        let bias = LayoutBias::default();
        assert_eq!(bias.gravity_strength, 0.05);
        assert_eq!(bias.horizontal_bias, 0.0);
    }
}
