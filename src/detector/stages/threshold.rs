use crate::detector::params::ThresholdParams;
use crate::filters::box_blur;
use crate::image::ImageF32;

/// Local-mean threshold: 1 where `gray > blur(gray) - bias`, else 0.
pub fn select_brighter(gray: &ImageF32, params: &ThresholdParams) -> ImageF32 {
    let local_mean = box_blur(gray, params.blur);
    gray.zip_map(&local_mean, |v, m| if v > m - params.bias { 1.0 } else { 0.0 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_image_is_entirely_bright() {
        let out = select_brighter(&ImageF32::filled(30, 30, 0.4), &ThresholdParams::default());
        assert!(out.data.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn adapts_to_illumination_gradient() {
        // Ramp with a dip every 10 columns: dips are dark relative to
        // their neighbourhood regardless of the global level.
        let gray = ImageF32::from_fn(60, 20, |x, _| {
            let base = x as f32 / 60.0;
            if x % 10 == 5 {
                base - 0.2
            } else {
                base
            }
        });
        let out = select_brighter(&gray, &ThresholdParams::default());
        for x in (5..55).step_by(10) {
            assert_eq!(out.get(x, 10), 0.0, "dip at x={x}");
        }
    }
}
