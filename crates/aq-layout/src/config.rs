//! Solver configuration.

use aq_core::Real;

/// Per-term enable switches. All terms are additive and independent.
#[derive(Debug, Clone, Copy)]
pub struct ForceToggles {
    pub link: bool,
    pub repulsion: bool,
    pub centering: bool,
    pub collision: bool,
    pub kind_gravity: bool,
    pub spread: bool,
    pub vertical_bias: bool,
    pub horizontal_bias: bool,
}

impl Default for ForceToggles {
    fn default() -> Self {
        Self {
            link: true,
            repulsion: true,
            centering: true,
            collision: true,
            kind_gravity: true,
            spread: true,
            vertical_bias: true,
            horizontal_bias: true,
        }
    }
}

/// Options for the layout simulation.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Canvas width (pixels).
    pub width: Real,
    /// Canvas height (pixels).
    pub height: Real,

    /// Rest distance of the link spring.
    pub link_distance: Real,
    /// Spring stiffness.
    pub link_strength: Real,

    /// Pairwise charge; negative repels.
    pub charge_strength: Real,
    /// Minimum pair distance used in the repulsion denominator.
    /// Guards coincident nodes against non-finite forces.
    pub charge_min_distance: Real,

    /// Weak pull of every node toward the canvas center.
    pub center_strength: Real,

    /// Hard minimum-separation radius per node (circle-circle).
    pub collision_radius: Real,

    /// Calculated nodes are pulled toward `height * calc_band_fraction`.
    pub calc_gravity_strength: Real,
    pub calc_band_fraction: Real,

    /// Calculated nodes spread over [margin, width - margin] by rank.
    pub spread_strength: Real,
    pub spread_margin: Real,

    /// Strength of the per-node horizontal bias term.
    pub bias_x_strength: Real,

    /// Velocity retained per tick after damping.
    pub velocity_decay: Real,

    /// Energy schedule: alpha relaxes toward alpha_target by alpha_decay
    /// per tick; below alpha_min with a zero target the solver idles.
    pub alpha_min: Real,
    pub alpha_decay: Real,
    /// Alpha restored by an external mutation.
    pub reheat_alpha: Real,
    /// Alpha target held while a node is being dragged.
    pub drag_alpha_target: Real,

    /// Nominal tick interval used to convert elapsed time to sub-steps.
    pub tick_interval_ms: Real,

    pub forces: ForceToggles,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            link_distance: 100.0,
            link_strength: 0.3,
            charge_strength: -200.0,
            charge_min_distance: 1.0,
            center_strength: 0.05,
            collision_radius: 30.0,
            calc_gravity_strength: 0.2,
            calc_band_fraction: 0.75,
            spread_strength: 0.3,
            spread_margin: 100.0,
            bias_x_strength: 0.1,
            velocity_decay: 0.6,
            alpha_min: 1e-3,
            // 1 - alpha_min^(1/300): ~300 ticks from 1.0 to idle.
            alpha_decay: 0.0228,
            reheat_alpha: 0.3,
            drag_alpha_target: 0.3,
            tick_interval_ms: 16.67,
            forces: ForceToggles::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_force_constants() {
        let cfg = LayoutConfig::default();
        assert_eq!(cfg.charge_strength, -200.0);
        assert_eq!(cfg.collision_radius, 30.0);
        assert_eq!(cfg.link_distance, 100.0);
        assert_eq!(cfg.calc_gravity_strength, 0.2);
        assert_eq!(cfg.spread_strength, 0.3);
        assert_eq!(cfg.bias_x_strength, 0.1);
    }
}
