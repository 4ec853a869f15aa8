//! Pure stage functions of the counting pipeline, in execution order.
//!
//! Each stage takes the previous stage's image or mask plus its parameter
//! group and returns fresh images; none of them mutate their inputs. The two
//! stages that consume randomness take the generator explicitly.

pub mod components;
pub mod extremity;
pub mod normalize;
pub mod overlay;
pub mod refine;
pub mod suppress;
pub mod threshold;

pub use components::{
    decide, filter_components, label_candidates, retain_accepted, ComponentFilter,
    FilterDecision, Palette,
};
pub use extremity::{extremity_masks, Extremity};
pub use normalize::{normalize, Normalized};
pub use overlay::{annotate, blend_overlay, draw_segment};
pub use refine::{refine_mask, Refinement};
pub use suppress::{
    background_noise, fill_with_noise, find_artifacts, suppress_artifacts, ArtifactMask,
    NoiseModel, Suppression,
};
pub use threshold::select_brighter;
