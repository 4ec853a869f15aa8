#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod types;

// Building blocks – public for tools and tests, less stable.
pub mod config;
pub mod filters;
pub mod stats;

// --- High-level re-exports -------------------------------------------------

// Main entry points: counter + results.
pub use crate::detector::{CellCounter, CountParams};
pub use crate::error::{CountError, Result};
pub use crate::types::{CountResult, DetectedCell};

// Trace and report returned by the counter.
pub use crate::diagnostics::{CountOutput, CountReport, Trace, TraceEntry, TraceImage};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use erythro_count::prelude::*;
///
/// # fn main() -> erythro_count::Result<()> {
/// let (w, h) = (320usize, 240usize);
/// let rgb = vec![200u8; w * h * 3];
/// let img = ImageRgbU8::packed(w, h, &rgb);
///
/// let counter = CellCounter::new(CountParams::default());
/// let out = counter.process_seeded(img, 7)?;
/// println!("count={} latency_ms={:.3}", out.result.count, out.result.latency_ms);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::ImageRgbU8;
    pub use crate::{CellCounter, CountOutput, CountParams, CountResult};
}

// --- Stage-level API (for tools & advanced users) ---------------------------

pub mod stages {
    // Stage functions in execution order.
    pub use crate::detector::stages::{
        annotate, blend_overlay, extremity_masks, filter_components, find_artifacts,
        label_candidates, normalize, refine_mask, retain_accepted, select_brighter,
        suppress_artifacts,
    };

    // Stage outputs.
    pub use crate::detector::stages::{
        ArtifactMask, ComponentFilter, Extremity, FilterDecision, NoiseModel, Normalized,
        Palette, Refinement, Suppression,
    };

    pub use crate::diagnostics::{StageTiming, TimingBreakdown};
}
