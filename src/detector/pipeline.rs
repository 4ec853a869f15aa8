//! [`CellCounter`] chains the stage functions and records the trace.
//!
//! Typical usage:
//! ```no_run
//! use erythro_count::{CellCounter, CountParams};
//! use erythro_count::image::ImageRgbU8;
//!
//! # fn example(rgb: &[u8], w: usize, h: usize) -> erythro_count::Result<()> {
//! let counter = CellCounter::new(CountParams::default());
//! let output = counter.process_seeded(ImageRgbU8::packed(w, h, rgb), 42)?;
//! println!("{} erythrocytes", output.count());
//! # Ok(())
//! # }
//! ```

// Stages
// - Normalize: u8 RGB -> [0,1] RGB + channel-mean gray.
// - Suppress: blur/threshold/erode the bright field, refill its complement with noise.
// - Threshold: local-mean threshold on the suppressed gray.
// - Extremity: uniformly bright / dark neighbourhoods, each dilated.
// - Refine: intersection, neighbourhood support, dilation.
// - Components: label candidates, color them, decide per component.
// - Overlay: dilate accepted ids, tint over orig, draw centroid marks.

use super::params::CountParams;
use super::stages::{
    annotate, blend_overlay, extremity_masks, filter_components, label_candidates, normalize,
    refine_mask, retain_accepted, select_brighter, suppress_artifacts, Palette,
};
use crate::diagnostics::{CountOutput, TimingBreakdown, Trace};
use crate::error::Result;
use crate::filters::dilate_labels;
use crate::image::ImageRgbU8;
use crate::types::{CountResult, DetectedCell};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

/// Counts erythrocytes in one RGB image per call; holds no state between calls.
#[derive(Clone, Debug, Default)]
pub struct CellCounter {
    params: CountParams,
}

impl CellCounter {
    pub fn new(params: CountParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &CountParams {
        &self.params
    }

    pub fn set_params(&mut self, params: CountParams) {
        self.params = params;
    }

    /// Run the pipeline with a generator seeded from `seed`.
    pub fn process_seeded(&self, image: ImageRgbU8<'_>, seed: u64) -> Result<CountOutput> {
        log::debug!("CellCounter::process_seeded seed={seed}");
        let mut rng = StdRng::seed_from_u64(seed);
        self.process(image, &mut rng)
    }

    /// Run every stage on `image`, drawing suppression noise and display
    /// colors from `rng`.
    pub fn process<R: Rng + ?Sized>(
        &self,
        image: ImageRgbU8<'_>,
        rng: &mut R,
    ) -> Result<CountOutput> {
        image.validate()?;
        self.params.validate()?;
        let total_start = Instant::now();
        let p = &self.params;
        let (w, h) = (image.w, image.h);
        log::debug!("CellCounter::process start w={w} h={h}");

        let mut trace = Trace::new();
        let mut timings = TimingBreakdown::default();

        let norm = timings.measure("normalize", || normalize(&image));
        trace.push("Grayscaled Image", norm.gray.clone());

        let sup = timings.measure("suppress", || {
            suppress_artifacts(&norm.gray, &p.suppression, &mut *rng)
        });
        log::debug!(
            "suppression: masked={} fill={:.4} sigma={:.4}",
            sup.artifacts.mask.data.iter().filter(|&&v| v > 0.5).count(),
            sup.noise.fill_level,
            sup.noise.sigma
        );
        trace.push("Find Lymphocyte", sup.artifacts.mask.clone());
        trace.push("Delete Lymphocyte", sup.suppressed.clone());

        let bright = timings.measure("threshold", || select_brighter(&sup.suppressed, &p.threshold));
        trace.push("Select brighter pixels", bright.clone());

        let ext = timings.measure("extremity", || extremity_masks(&bright, &p.extremity));
        trace.push("Most Bright", ext.white.clone());
        trace.push("Most Dark", ext.black.clone());
        trace.push("Dilate contours for most bright fragments", ext.white_dilated.clone());
        trace.push("Dilate contours for most dark fragments", ext.black_dilated.clone());

        let refined = timings.measure("refine", || {
            refine_mask(&ext.white_dilated, &ext.black_dilated, &p.refinement)
        });
        trace.push("Intersection of two previous images", refined.intersection.clone());
        trace.push("Erode contours", refined.eroded.clone());
        trace.push("Dilate contours", refined.refined.clone());

        let set = timings.measure("label", || {
            label_candidates(
                &refined.refined,
                p.refinement.foreground_threshold,
                p.filter.connectivity,
            )
        });
        let palette = Palette::random(set.len() as u32, &mut *rng);
        trace.push("Find components", palette.colorize(&set.labels));

        let filter = timings.measure("filter", || {
            filter_components(&set, &refined.refined, &p.filter)
        });
        let kept = retain_accepted(&set.labels, &filter);
        trace.push("Delete biggest and smallest components", palette.colorize(&kept));

        let cells: Vec<DetectedCell> = filter
            .accepted()
            .filter_map(|id| {
                set.get(id).map(|stats| DetectedCell {
                    id,
                    area: stats.area,
                    centroid: stats.centroid,
                    mean_mask: filter.mean_mask.get(&id).copied().unwrap_or(0.0),
                })
            })
            .collect();

        let overlay = timings.measure("overlay", || {
            let dilated = dilate_labels(&kept, p.overlay.dilate);
            let colored = palette.colorize(&dilated);
            let blended = blend_overlay(&dilated, &palette, &norm.orig, p.overlay.opacity);
            (colored, blended)
        });
        trace.push("Dilated components", overlay.0);
        let annotated = timings.measure("annotate", || {
            annotate(&overlay.1, cells.iter().map(|c| c.centroid), &p.overlay)
        });
        trace.push("Overlay with orig image", overlay.1);
        trace.push("Found erythrocytes", annotated);

        let latency_ms = total_start.elapsed().as_secs_f64() * 1000.0;
        timings.total_ms = latency_ms;
        let result = CountResult {
            count: cells.len(),
            cells,
            width: w,
            height: h,
            components_total: set.len(),
            latency_ms,
        };
        log::debug!(
            "CellCounter::process done count={} components={} latency_ms={:.3}",
            result.count,
            result.components_total,
            latency_ms
        );

        Ok(CountOutput {
            result,
            trace,
            timings,
        })
    }
}
