//! Interactive session state.

use aq_core::Real;
use aq_graph::{FlowGraph, InputAttribute, NodeRole, Substance, TopologySpec};
use aq_layout::{LayoutConfig, LayoutSolver, PositionSnapshot};
use aq_visuals::{derive_visuals, ThicknessBasis, VisualAttributeSet};
use tracing::{debug, info, warn};

use crate::error::SessionResult;
use crate::policy::{HouseholdSettings, TreatmentPolicy};

/// Owns one loaded network plus everything interactive around it.
///
/// All mutation goes through this type so the graph values, the policy
/// passes and the layout energy never drift apart: each setter ends in a
/// refresh that re-runs the dependent passes and nudges the solver.
pub struct Session {
    graph: FlowGraph,
    solver: LayoutSolver,
    household: HouseholdSettings,
    treatment: TreatmentPolicy,
    urine_diversion: bool,
    fecal_diversion: bool,
}

impl Session {
    /// Load a topology and bring the session to a consistent initial
    /// state: diversions start disabled (their outputs carry zero) and
    /// the treatment pass runs once so the sludge stream starts
    /// populated. Other declared input values are kept as-is.
    pub fn load(spec: TopologySpec, layout: LayoutConfig) -> SessionResult<Self> {
        let graph = FlowGraph::load(spec)?;
        let solver = LayoutSolver::new(&graph, layout);
        info!(nodes = graph.nodes().len(), edges = graph.edges().len(), "session loaded");
        let mut session = Self {
            graph,
            solver,
            household: HouseholdSettings::default(),
            treatment: TreatmentPolicy::default(),
            urine_diversion: false,
            fecal_diversion: false,
        };
        session.refresh();
        Ok(session)
    }

    pub fn graph(&self) -> &FlowGraph {
        &self.graph
    }

    pub fn household(&self) -> HouseholdSettings {
        self.household
    }

    pub fn treatment(&self) -> TreatmentPolicy {
        self.treatment
    }

    /// Set one scalar attribute of an input node, then re-run the
    /// dependent passes.
    pub fn set_input_attribute(
        &mut self,
        key: &str,
        attr: InputAttribute,
        value: Real,
    ) -> SessionResult<()> {
        let id = self.graph.node_id(key)?;
        self.graph.set_input(id, attr, value)?;
        debug!(key, ?attr, value, "input changed");
        self.refresh();
        Ok(())
    }

    /// Apply occupancy figures to the household input nodes.
    ///
    /// Requires the washwater, urine and fecal roles to be bound.
    pub fn set_household(&mut self, settings: HouseholdSettings) -> SessionResult<()> {
        self.household = settings;
        for (role, flow) in [
            (NodeRole::Washwater, settings.washwater_flow()),
            (NodeRole::Urine, settings.urine_flow()),
            (NodeRole::Fecal, settings.fecal_flow()),
        ] {
            let id = self.graph.role(role)?;
            self.graph.set_input(id, InputAttribute::Flow, flow)?;
        }
        debug!(people = settings.people, litres = settings.litres_per_person, "household changed");
        self.refresh();
        Ok(())
    }

    /// Route urine into its valorisation output instead of treatment.
    pub fn set_urine_diversion(&mut self, on: bool) -> SessionResult<()> {
        self.urine_diversion = on;
        debug!(on, "urine diversion toggled");
        self.refresh();
        Ok(())
    }

    /// Route fecal matter into its valorisation output instead of
    /// treatment.
    pub fn set_fecal_diversion(&mut self, on: bool) -> SessionResult<()> {
        self.fecal_diversion = on;
        debug!(on, "fecal diversion toggled");
        self.refresh();
        Ok(())
    }

    /// Replace the treatment constants and re-run the dependent passes.
    pub fn set_treatment_policy(&mut self, policy: TreatmentPolicy) -> SessionResult<()> {
        self.treatment = policy;
        self.refresh();
        Ok(())
    }

    /// Advance the layout and return current positions.
    pub fn tick_layout(&mut self, elapsed_ms: Real) -> PositionSnapshot {
        self.solver.tick(elapsed_ms)
    }

    /// Current positions without advancing the layout.
    pub fn layout_snapshot(&self) -> PositionSnapshot {
        self.solver.snapshot()
    }

    /// Begin or update a drag on a node.
    pub fn pin_node(&mut self, key: &str, x: Real, y: Real) -> SessionResult<()> {
        let id = self.graph.node_id(key)?;
        self.solver.pin(id, x, y);
        Ok(())
    }

    /// Release a dragged node.
    pub fn unpin_node(&mut self, key: &str) -> SessionResult<()> {
        let id = self.graph.node_id(key)?;
        self.solver.unpin(id);
        Ok(())
    }

    /// Visual attributes for the current values and positions.
    pub fn derive_visuals(&self, basis: ThicknessBasis, log_scale: bool) -> VisualAttributeSet {
        derive_visuals(&self.graph, &self.solver.snapshot(), basis, log_scale)
    }

    /// Re-run every value pass that depends on current inputs, then
    /// re-animate the layout.
    ///
    /// Order matters: diversion outputs only read and write input
    /// nodes, so they go first; the treatment pass reads the influent
    /// values the propagation produced, and its writes need a second
    /// propagation to reach the nodes downstream of the sludge stream.
    fn refresh(&mut self) {
        self.apply_diversions();
        self.graph.propagate();
        self.apply_treatment();
        self.graph.propagate();
        self.solver.nudge();
    }

    /// Populate the sludge stream from the influent.
    ///
    /// The sludge node withdraws a fixed volume; each substance's
    /// concentration is chosen so the sludge carries the configured
    /// fraction of the influent mass. Skipped when the topology binds
    /// neither role.
    fn apply_treatment(&mut self) {
        let (Ok(influent), Ok(sludge)) = (
            self.graph.role(NodeRole::Influent),
            self.graph.role(NodeRole::Sludge),
        ) else {
            return;
        };
        let Some(influent) = self.graph.node(influent) else {
            return;
        };
        let (in_flow, in_loads) = (influent.flow, influent.loads);
        let policy = self.treatment;
        if policy.sludge_flow == 0.0 {
            return;
        }

        let writes = [
            (InputAttribute::Flow, policy.sludge_flow),
            (
                InputAttribute::LoadCod,
                policy.cod_capture * in_loads.get(Substance::Cod) * in_flow / -policy.sludge_flow,
            ),
            (
                InputAttribute::LoadN,
                policy.n_capture * in_loads.get(Substance::Nitrogen) * in_flow
                    / -policy.sludge_flow,
            ),
            (
                InputAttribute::LoadP,
                policy.p_capture * in_loads.get(Substance::Phosphorus) * in_flow
                    / -policy.sludge_flow,
            ),
        ];
        // A topology that binds the sludge role to a calculated node
        // turns the pass into a logged no-op.
        for (attr, value) in writes {
            if let Err(err) = self.graph.set_input(sludge, attr, value) {
                warn!(%err, "sludge stream is not settable, skipping treatment pass");
                return;
            }
        }
    }

    /// Drive the valorisation outputs from the diversion toggles.
    ///
    /// An enabled diversion pulls the full source volume out through the
    /// valorisation node (negative flow); a disabled one carries nothing.
    fn apply_diversions(&mut self) {
        for (on, source_role, out_role) in [
            (self.urine_diversion, NodeRole::Urine, NodeRole::UrineValorisation),
            (self.fecal_diversion, NodeRole::Fecal, NodeRole::FecalValorisation),
        ] {
            let (Ok(source), Ok(out)) = (self.graph.role(source_role), self.graph.role(out_role))
            else {
                continue;
            };
            let flow = if on {
                self.graph.node(source).map_or(0.0, |n| -n.flow)
            } else {
                0.0
            };
            if let Err(err) = self.graph.set_input(out, InputAttribute::Flow, flow) {
                warn!(%err, ?out_role, "valorisation output is not settable, skipping");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aq_graph::{EdgeSpec, Loads, NodeSpec};

    // Urine and fecal feed a mixer; washwater joins at the influent;
    // sludge and valorisation outputs hang off their junctions.
    fn topology() -> TopologySpec {
        TopologySpec {
            nodes: vec![
                NodeSpec::input("U", "Urine")
                    .flow(0.7)
                    .loads(Loads::new(15_000.0, 15_000.0, 1_200.0))
                    .role(NodeRole::Urine),
                NodeSpec::input("F", "Fecal")
                    .flow(0.2)
                    .loads(Loads::new(350_000.0, 5_000.0, 3_000.0))
                    .role(NodeRole::Fecal),
                NodeSpec::input("W", "Washwater")
                    .flow(120.0)
                    .loads(Loads::new(500.0, 33.0, 0.15))
                    .role(NodeRole::Washwater),
                NodeSpec::input("UV", "Urine valorisation").role(NodeRole::UrineValorisation),
                NodeSpec::input("FV", "Fecal valorisation").role(NodeRole::FecalValorisation),
                NodeSpec::input("S", "Sludge").role(NodeRole::Sludge),
                NodeSpec::calculated("M", "Mixer"),
                NodeSpec::calculated("D", "Influent").role(NodeRole::Influent),
                NodeSpec::calculated("E", "Treated"),
            ],
            edges: vec![
                EdgeSpec::new("U", "M"),
                EdgeSpec::new("F", "M"),
                EdgeSpec::new("UV", "M"),
                EdgeSpec::new("FV", "M"),
                EdgeSpec::new("M", "D"),
                EdgeSpec::new("W", "D"),
                EdgeSpec::new("D", "E"),
                EdgeSpec::new("S", "E"),
            ],
        }
    }

    fn session() -> Session {
        Session::load(topology(), LayoutConfig::default()).unwrap()
    }

    #[test]
    fn load_populates_the_sludge_stream() {
        let s = session();
        let sludge = s.graph().node_by_key("S").unwrap();
        assert_eq!(sludge.flow, -0.2);
        assert!(sludge.loads.cod > 0.0);
        assert!(sludge.loads.p > 0.0);
    }

    #[test]
    fn sludge_carries_the_captured_mass_fraction() {
        let s = session();
        let influent = s.graph().node_by_key("D").unwrap();
        let sludge = s.graph().node_by_key("S").unwrap();
        let captured = 0.3 * influent.loads.p * influent.flow;
        let carried = sludge.loads.p * -sludge.flow;
        assert!(
            (captured - carried).abs() < 1e-9 * captured.abs().max(1.0),
            "captured {captured} vs carried {carried}"
        );
    }

    #[test]
    fn household_change_rewrites_the_input_flows() {
        let mut s = session();
        s.set_household(HouseholdSettings {
            people: 4,
            litres_per_person: 100.0,
        })
        .unwrap();
        assert_eq!(s.graph().node_by_key("W").unwrap().flow, 400.0);
        assert!((s.graph().node_by_key("U").unwrap().flow - 2.8).abs() < 1e-12);
        assert!((s.graph().node_by_key("F").unwrap().flow - 0.8).abs() < 1e-12);
    }

    #[test]
    fn urine_diversion_pulls_the_urine_back_out() {
        let mut s = session();
        let mixer_before = s.graph().node_by_key("M").unwrap().flow;
        s.set_urine_diversion(true).unwrap();
        let uv = s.graph().node_by_key("UV").unwrap();
        assert_eq!(uv.flow, -0.7);
        let mixer_after = s.graph().node_by_key("M").unwrap().flow;
        assert!((mixer_before - mixer_after - 0.7).abs() < 1e-12);

        s.set_urine_diversion(false).unwrap();
        assert_eq!(s.graph().node_by_key("UV").unwrap().flow, 0.0);
        assert!((s.graph().node_by_key("M").unwrap().flow - mixer_before).abs() < 1e-12);
    }

    #[test]
    fn input_change_reaches_downstream_nodes() {
        let mut s = session();
        s.set_input_attribute("W", InputAttribute::Flow, 0.0).unwrap();
        let influent = s.graph().node_by_key("D").unwrap();
        // Only urine + fecal remain upstream of the influent.
        assert!((influent.flow - 0.9).abs() < 1e-12);
    }

    #[test]
    fn mutation_reanimates_the_layout() {
        let mut s = session();
        for _ in 0..2_000 {
            s.tick_layout(16.67);
        }
        let idle_alpha = s.layout_snapshot().alpha;
        s.set_urine_diversion(true).unwrap();
        assert!(s.layout_snapshot().alpha > idle_alpha);
    }

    #[test]
    fn diversion_tolerates_a_calculated_valorisation_output() {
        // Misconfigured binding: the valorisation role on a calculated
        // node. The toggle must still succeed and leave the network
        // consistent rather than stomping a propagated value.
        let spec = TopologySpec {
            nodes: vec![
                NodeSpec::input("U", "Urine").flow(0.7).role(NodeRole::Urine),
                NodeSpec::calculated("UV", "Valorisation").role(NodeRole::UrineValorisation),
                NodeSpec::calculated("M", "Mixer"),
            ],
            edges: vec![EdgeSpec::new("U", "M"), EdgeSpec::new("UV", "M")],
        };
        let mut s = Session::load(spec, LayoutConfig::default()).unwrap();
        s.set_urine_diversion(true).unwrap();
        assert_eq!(s.graph().node_by_key("UV").unwrap().flow, 0.0);
        assert!((s.graph().node_by_key("M").unwrap().flow - 0.7).abs() < 1e-12);
    }

    #[test]
    fn unknown_key_surfaces_a_graph_error() {
        let mut s = session();
        let err = s
            .set_input_attribute("ZZ", InputAttribute::Flow, 1.0)
            .unwrap_err();
        assert!(matches!(
            err,
            crate::SessionError::Graph(aq_graph::GraphError::UnknownNode { .. })
        ));
    }
}
