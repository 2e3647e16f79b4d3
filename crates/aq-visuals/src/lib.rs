//! aq-visuals: derived visual attributes for the flow network.
//!
//! Pure derivation from current graph values + solver positions to a
//! renderable attribute set. Owns no state and is safe to re-run every
//! tick.

pub mod scale;
pub mod visuals;

pub use scale::ThicknessScale;
pub use visuals::{
    derive_visuals, ArrowDirection, EdgeVisual, NodeLabels, NodeVisual, ThicknessBasis,
    VisualAttributeSet,
};
