//! Additive force terms.
//!
//! Each term contributes a velocity delta per node for the current tick;
//! the solver sums them and integrates. Terms scale with alpha so the
//! layout settles as the energy decays.

use aq_core::Real;
use nalgebra::Vector2;

use crate::config::LayoutConfig;

/// Static per-node simulation parameters, captured from the graph once.
#[derive(Debug, Clone)]
pub struct Body {
    pub calculated: bool,
    /// Pull toward the baseline vertical line; may be negative.
    pub gravity_strength: Real,
    /// Horizontal offset from the canvas center this node is pulled toward.
    pub horizontal_bias: Real,
    /// Left-to-right rank among calculated nodes, if calculated.
    pub rank: Option<usize>,
}

/// Pulls each edge's endpoints toward the rest distance.
pub fn link_spring(
    edges: &[(usize, usize)],
    positions: &[Vector2<Real>],
    velocities: &mut [Vector2<Real>],
    alpha: Real,
    cfg: &LayoutConfig,
) {
    for &(s, t) in edges {
        let delta = positions[t] - positions[s];
        let dist = delta.norm().max(cfg.charge_min_distance);
        let stretch = (dist - cfg.link_distance) / dist;
        let push = delta * (stretch * cfg.link_strength * alpha * 0.5);
        velocities[s] += push;
        velocities[t] -= push;
    }
}

/// All node pairs repel, decaying with squared distance.
///
/// The distance is floored so coincident nodes produce a large but
/// finite impulse instead of NaN.
pub fn repulsion(
    positions: &[Vector2<Real>],
    velocities: &mut [Vector2<Real>],
    alpha: Real,
    cfg: &LayoutConfig,
) {
    let n = positions.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let mut delta = positions[j] - positions[i];
            let mut dist = delta.norm();
            if dist < cfg.charge_min_distance {
                // Deterministic nudge for perfectly coincident nodes.
                delta = Vector2::new(cfg.charge_min_distance, 0.0);
                dist = cfg.charge_min_distance;
            }
            let w = cfg.charge_strength * alpha / (dist * dist);
            let push = delta * (w / dist);
            // Negative charge: i pushed away from j and vice versa.
            velocities[i] += push;
            velocities[j] -= push;
        }
    }
}

/// Weak pull of every node toward the canvas center.
pub fn centering(
    positions: &[Vector2<Real>],
    velocities: &mut [Vector2<Real>],
    alpha: Real,
    cfg: &LayoutConfig,
) {
    let center = Vector2::new(cfg.width / 2.0, cfg.height / 2.0);
    for (pos, vel) in positions.iter().zip(velocities.iter_mut()) {
        *vel += (center - *pos) * (cfg.center_strength * alpha);
    }
}

/// Calculated nodes sink toward a lower band than input nodes.
pub fn kind_gravity(
    bodies: &[Body],
    positions: &[Vector2<Real>],
    velocities: &mut [Vector2<Real>],
    alpha: Real,
    cfg: &LayoutConfig,
) {
    let band_y = cfg.height * cfg.calc_band_fraction;
    for (i, body) in bodies.iter().enumerate() {
        if body.calculated {
            velocities[i].y += (band_y - positions[i].y) * (cfg.calc_gravity_strength * alpha);
        }
    }
}

/// Distributes calculated nodes evenly along the horizontal axis by rank.
pub fn spread(
    bodies: &[Body],
    positions: &[Vector2<Real>],
    velocities: &mut [Vector2<Real>],
    alpha: Real,
    cfg: &LayoutConfig,
) {
    let count = bodies.iter().filter(|b| b.calculated).count();
    for (i, body) in bodies.iter().enumerate() {
        let Some(rank) = body.rank else { continue };
        let slot = if count > 1 {
            let span = cfg.width - 2.0 * cfg.spread_margin;
            cfg.spread_margin + span * (rank as Real) / ((count - 1) as Real)
        } else {
            cfg.width / 2.0
        };
        velocities[i].x += (slot - positions[i].x) * (cfg.spread_strength * alpha);
    }
}

/// Per-node pull toward the baseline vertical line.
pub fn vertical_bias(
    bodies: &[Body],
    positions: &[Vector2<Real>],
    velocities: &mut [Vector2<Real>],
    alpha: Real,
    cfg: &LayoutConfig,
) {
    let baseline_y = cfg.height / 2.0;
    for (i, body) in bodies.iter().enumerate() {
        velocities[i].y += (baseline_y - positions[i].y) * (body.gravity_strength * alpha);
    }
}

/// Per-node pull toward `center_x + horizontal_bias`, constant strength.
pub fn horizontal_bias(
    bodies: &[Body],
    positions: &[Vector2<Real>],
    velocities: &mut [Vector2<Real>],
    alpha: Real,
    cfg: &LayoutConfig,
) {
    for (i, body) in bodies.iter().enumerate() {
        let target_x = cfg.width / 2.0 + body.horizontal_bias;
        velocities[i].x += (target_x - positions[i].x) * (cfg.bias_x_strength * alpha);
    }
}

/// Hard circle-circle separation, applied in position space after
/// integration. Overlapping pairs are pushed apart symmetrically.
pub fn collision(positions: &mut [Vector2<Real>], cfg: &LayoutConfig) {
    let min_sep = 2.0 * cfg.collision_radius;
    let n = positions.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let mut delta = positions[j] - positions[i];
            let mut dist = delta.norm();
            if dist < cfg.charge_min_distance {
                delta = Vector2::new(cfg.charge_min_distance, 0.0);
                dist = cfg.charge_min_distance;
            }
            if dist < min_sep {
                let correction = delta * ((min_sep - dist) / dist * 0.5);
                positions[i] -= correction;
                positions[j] += correction;
            }
        }
    }
}
