//! Velocity-integration position solver.

use aq_core::{NodeId, Real};
use aq_graph::{FlowGraph, NodeKind};
use nalgebra::Vector2;

use crate::config::LayoutConfig;
use crate::forces::{self, Body};

/// Position of one node at snapshot time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodePosition {
    pub id: NodeId,
    pub x: Real,
    pub y: Real,
}

/// Positions for all nodes after a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionSnapshot {
    pub positions: Vec<NodePosition>,
    /// Current energy scalar; zero-ish means the layout is at rest.
    pub alpha: Real,
}

#[derive(Debug, Clone, Copy)]
struct Pin {
    position: Vector2<Real>,
    /// Velocity captured at pin start, restored on release so the node
    /// resumes natural motion rather than snapping.
    held_velocity: Vector2<Real>,
}

/// Iterative force-directed solver over a frozen topology.
///
/// Owns all transient simulation state (positions, velocities, pins).
/// The graph's flow values never enter the force model; a value change
/// only matters insofar as the host calls [`LayoutSolver::nudge`].
#[derive(Debug, Clone)]
pub struct LayoutSolver {
    cfg: LayoutConfig,
    bodies: Vec<Body>,
    edges: Vec<(usize, usize)>,
    positions: Vec<Vector2<Real>>,
    velocities: Vec<Vector2<Real>>,
    pins: Vec<Option<Pin>>,
    alpha: Real,
    alpha_target: Real,
}

impl LayoutSolver {
    /// Capture the static layout parameters of a graph.
    ///
    /// Initial positions follow a deterministic phyllotaxis spiral around
    /// the canvas center so no two nodes start coincident.
    pub fn new(graph: &FlowGraph, cfg: LayoutConfig) -> Self {
        let mut rank = 0usize;
        let bodies: Vec<Body> = graph
            .nodes()
            .iter()
            .map(|node| {
                let calculated = node.kind == NodeKind::Calculated;
                let body = Body {
                    calculated,
                    gravity_strength: node.bias.gravity_strength,
                    horizontal_bias: node.bias.horizontal_bias,
                    rank: calculated.then_some(rank),
                };
                if calculated {
                    rank += 1;
                }
                body
            })
            .collect();

        let edges = graph
            .edges()
            .iter()
            .map(|e| (e.source.index() as usize, e.target.index() as usize))
            .collect();

        let center = Vector2::new(cfg.width / 2.0, cfg.height / 2.0);
        let positions = (0..bodies.len())
            .map(|i| {
                let radius = 10.0 * ((0.5 + i as Real).sqrt());
                let angle = (i as Real) * 2.399_963_229_728_653;
                center + Vector2::new(radius * angle.cos(), radius * angle.sin())
            })
            .collect();

        let n = bodies.len();
        Self {
            cfg,
            bodies,
            edges,
            positions,
            velocities: vec![Vector2::zeros(); n],
            pins: vec![None; n],
            alpha: 1.0,
            alpha_target: 0.0,
        }
    }

    /// Current energy scalar.
    pub fn alpha(&self) -> Real {
        self.alpha
    }

    /// True when the energy has decayed below the idle threshold and no
    /// drag is holding a target.
    pub fn is_idle(&self) -> bool {
        self.alpha < self.cfg.alpha_min && self.alpha_target < self.cfg.alpha_min
    }

    /// Reset the energy upward after an external mutation, re-animating
    /// the layout toward a new equilibrium without a full restart.
    pub fn nudge(&mut self) {
        self.alpha = self.alpha.max(self.cfg.reheat_alpha);
    }

    /// Begin or update a drag: the node's position is taken verbatim from
    /// the pin and it is excluded from integration. Velocity is captured
    /// once, at pin start.
    pub fn pin(&mut self, id: NodeId, x: Real, y: Real) {
        let idx = id.index() as usize;
        if idx >= self.positions.len() {
            return;
        }
        let position = Vector2::new(x, y);
        match &mut self.pins[idx] {
            Some(pin) => pin.position = position,
            None => {
                self.pins[idx] = Some(Pin {
                    position,
                    held_velocity: self.velocities[idx],
                });
                self.alpha_target = self.cfg.drag_alpha_target;
                self.alpha = self.alpha.max(self.cfg.reheat_alpha);
            }
        }
    }

    /// End a drag. The held velocity is already in place, so motion
    /// resumes from the pre-pin state.
    pub fn unpin(&mut self, id: NodeId) {
        let idx = id.index() as usize;
        if idx >= self.pins.len() {
            return;
        }
        self.pins[idx] = None;
        if self.pins.iter().all(Option::is_none) {
            self.alpha_target = 0.0;
        }
    }

    /// Advance the simulation and return current positions.
    ///
    /// One fixed-step iteration per nominal tick interval; the elapsed
    /// time only saturates catch-up (at most 3 sub-steps) so a stalled
    /// host cannot inject an energy spike. When idle, integration is
    /// skipped entirely.
    pub fn tick(&mut self, elapsed_ms: Real) -> PositionSnapshot {
        if !self.is_idle() {
            let steps = (elapsed_ms / self.cfg.tick_interval_ms).round().max(1.0) as usize;
            for _ in 0..steps.min(3) {
                self.step();
            }
        }
        self.snapshot()
    }

    /// Current positions without advancing the simulation.
    pub fn snapshot(&self) -> PositionSnapshot {
        PositionSnapshot {
            positions: self
                .positions
                .iter()
                .enumerate()
                .map(|(i, p)| NodePosition {
                    id: NodeId::from_index(i as u32),
                    x: p.x,
                    y: p.y,
                })
                .collect(),
            alpha: self.alpha,
        }
    }

    fn step(&mut self) {
        self.alpha += (self.alpha_target - self.alpha) * self.cfg.alpha_decay;

        let toggles = self.cfg.forces;
        if toggles.link {
            forces::link_spring(
                &self.edges,
                &self.positions,
                &mut self.velocities,
                self.alpha,
                &self.cfg,
            );
        }
        if toggles.repulsion {
            forces::repulsion(&self.positions, &mut self.velocities, self.alpha, &self.cfg);
        }
        if toggles.centering {
            forces::centering(&self.positions, &mut self.velocities, self.alpha, &self.cfg);
        }
        if toggles.kind_gravity {
            forces::kind_gravity(
                &self.bodies,
                &self.positions,
                &mut self.velocities,
                self.alpha,
                &self.cfg,
            );
        }
        if toggles.spread {
            forces::spread(
                &self.bodies,
                &self.positions,
                &mut self.velocities,
                self.alpha,
                &self.cfg,
            );
        }
        if toggles.vertical_bias {
            forces::vertical_bias(
                &self.bodies,
                &self.positions,
                &mut self.velocities,
                self.alpha,
                &self.cfg,
            );
        }
        if toggles.horizontal_bias {
            forces::horizontal_bias(
                &self.bodies,
                &self.positions,
                &mut self.velocities,
                self.alpha,
                &self.cfg,
            );
        }

        // Integrate, skipping pinned nodes.
        for i in 0..self.positions.len() {
            if let Some(pin) = self.pins[i] {
                self.positions[i] = pin.position;
                self.velocities[i] = pin.held_velocity;
                continue;
            }
            self.velocities[i] *= self.cfg.velocity_decay;
            self.positions[i] += self.velocities[i];
        }

        if toggles.collision {
            forces::collision(&mut self.positions, &self.cfg);
        }

        // Non-finite recovery: reset the offending node, not the world.
        let center = Vector2::new(self.cfg.width / 2.0, self.cfg.height / 2.0);
        for i in 0..self.positions.len() {
            let p = self.positions[i];
            if !(p.x.is_finite() && p.y.is_finite()) {
                self.positions[i] = center;
                self.velocities[i] = Vector2::zeros();
            }
        }
    }
}
