//! aq-core: numeric and identifier conventions for the aquaflow
//! workspace.
//!
//! Holds the scalar type, the finite-value gate applied to external
//! inputs, the tolerances used by conservation checks and the node
//! identifier. Domain types live in the crates that own them.

pub mod ids;
pub mod numeric;

pub use ids::NodeId;
pub use numeric::{ensure_finite, NonFiniteError, Real, Tolerances};
