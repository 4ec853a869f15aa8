use crate::detector::params::RefinementParams;
use crate::filters::{box_blur, dilate};
use crate::image::ImageF32;

/// Masks produced while refining the bright/dark intersection.
#[derive(Clone, Debug)]
pub struct Refinement {
    /// Product of the dilated white and black masks.
    pub intersection: ImageF32,
    /// `blur(intersection) > support_ratio * intersection`.
    pub eroded: ImageF32,
    /// Dilated `eroded`; cell candidates are its values below the foreground threshold.
    pub refined: ImageF32,
}

pub fn refine_mask(
    white_dilated: &ImageF32,
    black_dilated: &ImageF32,
    params: &RefinementParams,
) -> Refinement {
    let intersection = white_dilated.zip_map(black_dilated, |a, b| a * b);
    let support = box_blur(&intersection, params.blur);
    let ratio = params.support_ratio;
    let eroded = support.zip_map(&intersection, |s, v| if s > ratio * v { 1.0 } else { 0.0 });
    let refined = dilate(&eroded, params.dilate);
    Refinement {
        intersection,
        eroded,
        refined,
    }
}
