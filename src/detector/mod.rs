//! Erythrocyte counter built from classical image operations.
//!
//! Overview
//! - Normalizes the RGB input and derives a channel-mean grayscale image.
//! - Finds large dark artifacts (lymphocytes) as the complement of the eroded
//!   bright field and replaces them with background-like noise.
//! - Marks pixels brighter than their local mean, then keeps neighbourhoods
//!   that are almost uniformly bright or almost uniformly dark.
//! - Intersects the dilated bright/dark masks, refines the result by
//!   neighbourhood support and dilates it back.
//! - Labels the low-valued pixels of the refined mask and keeps components
//!   whose area lies strictly between the bounds and whose mean refined
//!   value stays at or below the polarity bound.
//! - Renders an overlay with `×` marks for the trace; the count never depends
//!   on the rendering or on the random display colors.
//!
//! Modules
//! - [`params`] – grouped constants driving every stage.
//! - [`stages`] – one pure function per stage, testable in isolation.
//! - `pipeline` – the [`CellCounter`] tying the stages together.
//!
//! Key Ideas
//! - Randomness is injected: [`CellCounter::process`] takes any `rand::Rng`,
//!   [`CellCounter::process_seeded`] builds a `StdRng` from a seed. Equal
//!   seeds give identical traces.
//! - Stained cells are darker than the plasma. The polarity of every mask
//!   follows from the literal thresholds, so retuning one usually means
//!   retuning its neighbours as well.

pub mod params;
mod pipeline;
pub mod stages;

pub use params::{
    CountParams, ExtremityParams, FilterParams, OverlayParams, RefinementParams,
    SuppressionParams, ThresholdParams,
};
pub use pipeline::CellCounter;
pub use stages::{ComponentFilter, FilterDecision};
