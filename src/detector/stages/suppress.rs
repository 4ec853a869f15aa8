//! Replacement of large dark artifacts (lymphocytes) with background noise.
//!
//! The bright plasma field is found with a wide blur and a threshold, then
//! eroded so that small bright gaps between packed cells drop out of it. The
//! complement of that eroded field is the artifact mask. Pixels under the mask
//! are overwritten with a high quantile of the grayscale image plus Gaussian
//! noise whose spread matches the darker half of the image, which keeps the
//! local-mean threshold downstream from reacting to a hard edge.

use crate::detector::params::SuppressionParams;
use crate::filters::{box_blur, erode};
use crate::image::ImageF32;
use crate::stats;
use rand::Rng;
use std::f64::consts::PI;

/// Intermediate masks of the artifact search.
#[derive(Clone, Debug)]
pub struct ArtifactMask {
    /// `blur(gray) > candidate_threshold`.
    pub candidate: ImageF32,
    /// Candidate after erosion; always a subset of `candidate`.
    pub eroded: ImageF32,
    /// `1 - eroded`: pixels to be replaced.
    pub mask: ImageF32,
}

/// Fill level and noise spread used for the replacement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseModel {
    pub fill_level: f64,
    pub sigma: f64,
}

#[derive(Clone, Debug)]
pub struct Suppression {
    pub artifacts: ArtifactMask,
    pub noise: NoiseModel,
    pub suppressed: ImageF32,
}

pub fn find_artifacts(gray: &ImageF32, params: &SuppressionParams) -> ArtifactMask {
    let candidate = box_blur(gray, params.blur).threshold_above(params.candidate_threshold);
    let eroded = erode(&candidate, params.erode);
    let mask = eroded.map(|v| 1.0 - v);
    ArtifactMask {
        candidate,
        eroded,
        mask,
    }
}

/// Fill level (`fill_quantile` of all pixels) and the population standard
/// deviation of the pixels strictly below the median.
///
/// An empty below-median set (constant image, or more than half the pixels
/// tied at the minimum) gives `sigma = 0`.
pub fn background_noise(gray: &ImageF32, fill_quantile: f64) -> NoiseModel {
    let sorted = stats::sorted_samples(&gray.data);
    let fill_level = stats::quantile_sorted(&sorted, fill_quantile).unwrap_or(0.0);
    let median = stats::median_sorted(&sorted).unwrap_or(0.0);
    let below = sorted.iter().copied().take_while(|&v| v < median);
    let sigma = match stats::std_dev(below) {
        Some(s) => s,
        None => {
            log::debug!("no samples below median {median:.4}; using zero noise spread");
            0.0
        }
    };
    NoiseModel { fill_level, sigma }
}

/// Standard normal sample (Box–Muller, cosine branch).
pub(crate) fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // 1 - U maps [0, 1) onto (0, 1], keeping ln finite.
    let u1 = 1.0 - rng.gen::<f64>();
    let u2 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Overwrite masked pixels with `fill_level + N(0, sigma²)`, drawing one
/// sample per masked pixel in raster order.
pub fn fill_with_noise<R: Rng + ?Sized>(
    gray: &ImageF32,
    mask: &ImageF32,
    noise: NoiseModel,
    rng: &mut R,
) -> ImageF32 {
    let mut out = gray.clone();
    for (i, v) in out.data.iter_mut().enumerate() {
        if mask.is_set(i) {
            *v = (noise.fill_level + noise.sigma * standard_normal(rng)) as f32;
        }
    }
    out
}

pub fn suppress_artifacts<R: Rng + ?Sized>(
    gray: &ImageF32,
    params: &SuppressionParams,
    rng: &mut R,
) -> Suppression {
    let artifacts = find_artifacts(gray, params);
    let noise = background_noise(gray, params.fill_quantile);
    let suppressed = fill_with_noise(gray, &artifacts.mask, noise, rng);
    Suppression {
        artifacts,
        noise,
        suppressed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::KernelSize;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn dark_blob(w: usize, h: usize) -> ImageF32 {
        ImageF32::from_fn(w, h, |x, y| {
            let dx = x as f32 - 40.0;
            let dy = y as f32 - 40.0;
            if dx * dx + dy * dy <= 20.0 * 20.0 {
                0.1
            } else {
                0.8
            }
        })
    }

    #[test]
    fn eroded_field_is_contained_in_candidate() {
        let gray = dark_blob(100, 90);
        let art = find_artifacts(&gray, &SuppressionParams::default());
        for i in 0..gray.data.len() {
            if art.eroded.is_set(i) {
                assert!(art.candidate.is_set(i));
                assert!(!art.mask.is_set(i));
            }
            if !art.candidate.is_set(i) {
                assert!(art.mask.is_set(i));
            }
        }
        // blob centre is suppressed, far corner is not
        assert!(art.mask.is_set(gray.idx(40, 40)));
        assert!(!art.mask.is_set(gray.idx(95, 85)));
    }

    #[test]
    fn noise_model_uses_quantile_and_below_median_spread() {
        let gray = ImageF32 {
            w: 5,
            h: 1,
            stride: 5,
            data: vec![0.0, 0.2, 0.5, 0.6, 1.0],
        };
        let noise = background_noise(&gray, 0.9);
        assert!((noise.fill_level - 0.84).abs() < 1e-6);
        // below median 0.5: {0.0, 0.2} -> population std 0.1
        assert!((noise.sigma - 0.1).abs() < 1e-6);
    }

    #[test]
    fn constant_image_has_zero_sigma() {
        let noise = background_noise(&ImageF32::new(12, 12), 0.9);
        assert_eq!(noise, NoiseModel { fill_level: 0.0, sigma: 0.0 });
    }

    #[test]
    fn only_masked_pixels_change() {
        let gray = dark_blob(100, 90);
        let params = SuppressionParams {
            erode: KernelSize::square(10),
            ..SuppressionParams::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        let out = suppress_artifacts(&gray, &params, &mut rng);
        for i in 0..gray.data.len() {
            if !out.artifacts.mask.is_set(i) {
                assert_eq!(out.suppressed.data[i], gray.data[i]);
            }
        }
        let c = gray.idx(40, 40);
        assert!((out.suppressed.data[c] - 0.8).abs() < 0.5);
    }

    #[test]
    fn same_seed_gives_same_noise() {
        let gray = dark_blob(80, 80);
        let params = SuppressionParams::default();
        let a = suppress_artifacts(&gray, &params, &mut StdRng::seed_from_u64(9));
        let b = suppress_artifacts(&gray, &params, &mut StdRng::seed_from_u64(9));
        assert_eq!(a.suppressed, b.suppressed);
    }

    #[test]
    fn standard_normal_has_unit_moments() {
        let mut rng = StdRng::seed_from_u64(17);
        let n = 20_000;
        let samples: Vec<f64> = (0..n).map(|_| standard_normal(&mut rng)).collect();
        let mean = samples.iter().sum::<f64>() / n as f64;
        let sd = stats::std_dev(samples.iter().copied()).unwrap();
        assert!(mean.abs() < 0.05);
        assert!((sd - 1.0).abs() < 0.05);
    }
}
