use crate::image::{ImageF32, ImageRgbF32, ImageRgbU8};

/// Normalized color frame plus its grayscale companion.
#[derive(Clone, Debug)]
pub struct Normalized {
    /// Input scaled to `[0, 1]`, kept for the final overlay.
    pub orig: ImageRgbF32,
    /// Unweighted channel mean of `orig`.
    pub gray: ImageF32,
}

/// Scale 8-bit RGB samples by `1/255` and derive the grayscale image.
///
/// The view must already be validated (non-empty and fully backed).
pub fn normalize(image: &ImageRgbU8<'_>) -> Normalized {
    let mut orig = ImageRgbF32::new(image.w, image.h);
    for y in 0..image.h {
        for x in 0..image.w {
            let [r, g, b] = image.get(x, y);
            orig.set(
                x,
                y,
                [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0],
            );
        }
    }
    let gray = orig.to_gray();
    Normalized { orig, gray }
}
