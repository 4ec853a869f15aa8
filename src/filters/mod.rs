//! Primitive image operations consumed by the counting pipeline.
//!
//! - [`box_blur`] – normalized mean filter, reflect-101 borders.
//! - [`erode`] / [`dilate`] / [`dilate_labels`] – rectangular min/max filters
//!   restricted to in-image samples.
//! - [`label_components`] – 4/8-connected labeling with area and centroid.
//!
//! All window-based operations share [`KernelSize`] and its anchor convention
//! (`size / 2`), which decides where even-sized windows sit relative to the
//! centre pixel. Row passes run on `rayon` when the `parallel` feature is on;
//! the output does not depend on it.

pub mod blur;
pub mod kernel;
pub mod labeling;
pub mod morphology;

pub use blur::box_blur;
pub use kernel::KernelSize;
pub use labeling::{
    label_components, ComponentId, ComponentSet, ComponentStats, Connectivity, LabelRaster,
};
pub use morphology::{dilate, dilate_labels, erode};
