//! Owned interleaved RGB f32 image with samples nominally in `[0, 1]`.
//!
//! Used for the normalized original frame, the component color maps and the
//! final overlay. Values are not clamped: the overlay stage adds a tinted
//! layer on top of the original and may exceed 1.0.
use super::{ImageF32, ImageView, ImageViewMut};

#[derive(Clone, Debug, PartialEq)]
pub struct ImageRgbF32 {
    pub w: usize,
    pub h: usize,
    /// Samples between consecutive rows (equals `3 * w`)
    pub stride: usize,
    pub data: Vec<f32>,
}

impl ImageRgbF32 {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            stride: w * 3,
            data: vec![0.0; w * h * 3],
        }
    }

    /// Replicate a grayscale image into three identical channels.
    pub fn from_gray(gray: &ImageF32) -> Self {
        let mut out = Self::new(gray.w, gray.h);
        for (dst, &v) in out.data.chunks_exact_mut(3).zip(gray.data.iter()) {
            dst.fill(v);
        }
        out
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x * 3
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [f32; 3] {
        let i = self.idx(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, px: [f32; 3]) {
        let i = self.idx(x, y);
        self.data[i..i + 3].copy_from_slice(&px);
    }

    /// Unweighted per-pixel mean of the three channels.
    pub fn to_gray(&self) -> ImageF32 {
        let mut gray = ImageF32::new(self.w, self.h);
        for y in 0..self.h {
            let src = self.row(y);
            let dst = gray.row_mut(y);
            for (d, px) in dst.iter_mut().zip(src.chunks_exact(3)) {
                *d = (px[0] + px[1] + px[2]) / 3.0;
            }
        }
        gray
    }
}

impl ImageView for ImageRgbF32 {
    type Pixel = f32;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn channels(&self) -> usize {
        3
    }
    #[inline]
    fn row(&self, y: usize) -> &[f32] {
        let start = y * self.stride;
        &self.data[start..start + self.w * 3]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[f32]> {
        Some(&self.data[..self.w * self.h * 3])
    }
}

impl ImageViewMut for ImageRgbF32 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [f32] {
        let start = y * self.stride;
        let end = start + self.w * 3;
        &mut self.data[start..end]
    }
}
