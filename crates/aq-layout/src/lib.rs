//! aq-layout: force-directed position solver for the flow network.
//!
//! The solver is continuous rather than one-shot: the host calls
//! [`LayoutSolver::tick`] once per display refresh and the internal
//! energy scalar decays toward idle. Any mutation of the underlying flow
//! values reheats it through [`LayoutSolver::nudge`].

pub mod config;
pub mod forces;
pub mod solver;

pub use config::{ForceToggles, LayoutConfig};
pub use solver::{LayoutSolver, NodePosition, PositionSnapshot};
