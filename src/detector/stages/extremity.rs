use crate::detector::params::ExtremityParams;
use crate::filters::{box_blur, dilate};
use crate::image::ImageF32;

/// Near-uniform neighbourhoods of the brighter-pixel mask.
#[derive(Clone, Debug)]
pub struct Extremity {
    /// `blur(bright) > white_threshold`.
    pub white: ImageF32,
    /// `blur(bright) < black_threshold`.
    pub black: ImageF32,
    pub white_dilated: ImageF32,
    pub black_dilated: ImageF32,
}

pub fn extremity_masks(bright: &ImageF32, params: &ExtremityParams) -> Extremity {
    let blurred = box_blur(bright, params.blur);
    let white = blurred.threshold_above(params.white_threshold);
    let black = blurred.threshold_below(params.black_threshold);
    let white_dilated = dilate(&white, params.dilate);
    let black_dilated = dilate(&black, params.dilate);
    Extremity {
        white,
        black,
        white_dilated,
        black_dilated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_planes_split_into_white_and_black() {
        let bright = ImageF32::from_fn(40, 10, |x, _| if x < 20 { 1.0 } else { 0.0 });
        let ext = extremity_masks(&bright, &ExtremityParams::default());
        assert_eq!(ext.white.get(5, 5), 1.0);
        assert_eq!(ext.black.get(5, 5), 0.0);
        assert_eq!(ext.black.get(35, 5), 1.0);
        // mixed neighbourhoods at the edge are neither
        assert_eq!(ext.white.get(19, 5), 0.0);
        assert_eq!(ext.black.get(19, 5), 0.0);
        // dilation closes the gap so both masks overlap at the edge
        assert_eq!(ext.white_dilated.get(20, 5), 1.0);
        assert_eq!(ext.black_dilated.get(20, 5), 1.0);
    }
}
