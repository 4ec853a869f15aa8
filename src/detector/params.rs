//! Parameter types configuring the counting stages.
//!
//! Every constant of the pipeline lives here, grouped by stage. The defaults
//! are the values tuned for bright-field smears at roughly 100× magnification;
//! other microscopes or stains usually need the kernel sizes and the area
//! bounds rescaled together.

use crate::error::{CountError, Result};
use crate::filters::{Connectivity, KernelSize};
use serde::{Deserialize, Serialize};

/// Detector-wide parameters controlling the nine-stage pipeline.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountParams {
    /// Large dark artifact (lymphocyte) suppression.
    pub suppression: SuppressionParams,
    /// Local-mean threshold selecting brighter pixels.
    pub threshold: ThresholdParams,
    /// Near-uniform bright/dark neighbourhood masks.
    pub extremity: ExtremityParams,
    /// Contour refinement of the bright/dark intersection.
    pub refinement: RefinementParams,
    /// Labeling and component acceptance.
    pub filter: FilterParams,
    /// Display-only overlay and centroid marks.
    pub overlay: OverlayParams,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuppressionParams {
    /// Box blur applied before the candidate threshold.
    pub blur: KernelSize,
    /// Blurred intensity above which a pixel belongs to the bright field.
    pub candidate_threshold: f32,
    /// Erosion removing small bright clusters from the bright field.
    pub erode: KernelSize,
    /// Quantile of the grayscale image used as fill level.
    pub fill_quantile: f64,
}

impl Default for SuppressionParams {
    fn default() -> Self {
        Self {
            blur: KernelSize::square(40),
            candidate_threshold: 0.4,
            erode: KernelSize::square(30),
            fill_quantile: 0.9,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdParams {
    /// Window of the local mean.
    pub blur: KernelSize,
    /// Subtracted from the local mean before comparing.
    pub bias: f32,
}

impl Default for ThresholdParams {
    fn default() -> Self {
        Self {
            blur: KernelSize::square(20),
            bias: 0.001,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtremityParams {
    pub blur: KernelSize,
    /// Blurred brightness above which a neighbourhood counts as uniformly bright.
    pub white_threshold: f32,
    /// Blurred brightness below which a neighbourhood counts as uniformly dark.
    pub black_threshold: f32,
    pub dilate: KernelSize,
}

impl Default for ExtremityParams {
    fn default() -> Self {
        Self {
            blur: KernelSize::square(6),
            white_threshold: 0.95,
            black_threshold: 0.1,
            dilate: KernelSize::square(7),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefinementParams {
    pub blur: KernelSize,
    /// A pixel survives when its blurred value exceeds `support_ratio` times its own.
    pub support_ratio: f32,
    pub dilate: KernelSize,
    /// Refined values below this are cell candidates.
    pub foreground_threshold: f32,
}

impl Default for RefinementParams {
    fn default() -> Self {
        Self {
            blur: KernelSize::square(6),
            support_ratio: 0.9,
            dilate: KernelSize::square(6),
            foreground_threshold: 0.5,
        }
    }
}

/// Component acceptance: `min_area < area < max_area` and mean refined-mask
/// value over the component `<= max_mean_mask`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterParams {
    pub connectivity: Connectivity,
    pub min_area: usize,
    pub max_area: usize,
    pub max_mean_mask: f64,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            connectivity: Connectivity::Eight,
            min_area: 40,
            max_area: 10_000,
            max_mean_mask: 0.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayParams {
    /// Dilation of the id raster, for display thickness only.
    pub dilate: KernelSize,
    /// Weight of the component colors added on top of the original.
    pub opacity: f32,
    /// Half-length of each diagonal of the `×` mark.
    pub mark_radius: i32,
    /// Stroke width of the mark in pixels.
    pub mark_thickness: u32,
    pub mark_color: [f32; 3],
}

impl Default for OverlayParams {
    fn default() -> Self {
        Self {
            dilate: KernelSize::square(15),
            opacity: 0.2,
            mark_radius: 10,
            mark_thickness: 5,
            mark_color: [1.0, 1.0, 1.0],
        }
    }
}

impl CountParams {
    /// Reject parameter sets that cannot drive the pipeline.
    pub fn validate(&self) -> Result<()> {
        let kernels = [
            ("suppression.blur", self.suppression.blur),
            ("suppression.erode", self.suppression.erode),
            ("threshold.blur", self.threshold.blur),
            ("extremity.blur", self.extremity.blur),
            ("extremity.dilate", self.extremity.dilate),
            ("refinement.blur", self.refinement.blur),
            ("refinement.dilate", self.refinement.dilate),
            ("overlay.dilate", self.overlay.dilate),
        ];
        for (name, k) in kernels {
            if k.is_empty() {
                return Err(CountError::InvalidParams(format!(
                    "{name} must be at least 1x1, got {}x{}",
                    k.width, k.height
                )));
            }
        }

        let scalars = [
            ("suppression.candidate_threshold", self.suppression.candidate_threshold as f64),
            ("suppression.fill_quantile", self.suppression.fill_quantile),
            ("threshold.bias", self.threshold.bias as f64),
            ("extremity.white_threshold", self.extremity.white_threshold as f64),
            ("extremity.black_threshold", self.extremity.black_threshold as f64),
            ("refinement.support_ratio", self.refinement.support_ratio as f64),
            ("refinement.foreground_threshold", self.refinement.foreground_threshold as f64),
            ("filter.max_mean_mask", self.filter.max_mean_mask),
            ("overlay.opacity", self.overlay.opacity as f64),
        ];
        for (name, v) in scalars {
            if !v.is_finite() {
                return Err(CountError::InvalidParams(format!("{name} must be finite")));
            }
        }
        if !(0.0..=1.0).contains(&self.suppression.fill_quantile) {
            return Err(CountError::InvalidParams(format!(
                "suppression.fill_quantile must lie in [0, 1], got {}",
                self.suppression.fill_quantile
            )));
        }
        if self.filter.min_area >= self.filter.max_area {
            return Err(CountError::InvalidParams(format!(
                "filter.min_area ({}) must be below filter.max_area ({})",
                self.filter.min_area, self.filter.max_area
            )));
        }
        if self.overlay.mark_radius < 0 {
            return Err(CountError::InvalidParams(
                "overlay.mark_radius must be non-negative".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        CountParams::default().validate().unwrap();
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let params: CountParams =
            serde_json::from_str(r#"{"filter": {"min_area": 10}}"#).unwrap();
        assert_eq!(params.filter.min_area, 10);
        assert_eq!(params.filter.max_area, 10_000);
        assert_eq!(params.suppression, SuppressionParams::default());
    }

    #[test]
    fn zero_kernel_is_rejected() {
        let mut params = CountParams::default();
        params.extremity.dilate = KernelSize::new(0, 7);
        assert!(matches!(params.validate(), Err(CountError::InvalidParams(_))));
    }

    #[test]
    fn inverted_area_bounds_are_rejected() {
        let mut params = CountParams::default();
        params.filter.min_area = 500;
        params.filter.max_area = 100;
        assert!(params.validate().is_err());
    }
}
