//! aq-session: interactive state over a loaded flow network.
//!
//! A [`Session`] owns the graph, the layout solver and the policy
//! settings, and keeps them consistent: every input mutation triggers a
//! value refresh and re-animates the layout.

pub mod error;
pub mod policy;
pub mod session;

pub use error::{SessionError, SessionResult};
pub use policy::{HouseholdSettings, TreatmentPolicy};
pub use session::Session;
