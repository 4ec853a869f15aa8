//! Owned single-channel f32 image in row-major layout (stride == width).
//!
//! Every grayscale frame and binary mask of the counting pipeline lives in this
//! type. Masks keep the `{0.0, 1.0}` convention so that they can be blurred,
//! multiplied and thresholded like any other intensity image.
use crate::image::traits::{ImageView, ImageViewMut};

#[derive(Clone, Debug, PartialEq)]
pub struct ImageF32 {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Number of f32 elements between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<f32>,
}

impl ImageF32 {
    /// Construct a zero-initialized buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self::filled(w, h, 0.0)
    }

    /// Construct a buffer of size `w × h` with every sample set to `value`.
    pub fn filled(w: usize, h: usize, value: f32) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![value; w * h],
        }
    }

    /// Build an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(w: usize, h: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut data = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                data.push(f(x, y));
            }
        }
        Self {
            w,
            h,
            stride: w,
            data,
        }
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }
    #[inline]
    /// Get the pixel value at (x, y).
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.idx(x, y)]
    }
    #[inline]
    /// Set the pixel value at (x, y).
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// Apply `f` to every sample, producing a new image of the same shape.
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            w: self.w,
            h: self.h,
            stride: self.stride,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Combine two equally sized images sample by sample.
    pub fn zip_map(&self, other: &ImageF32, f: impl Fn(f32, f32) -> f32) -> Self {
        debug_assert_eq!((self.w, self.h), (other.w, other.h));
        Self {
            w: self.w,
            h: self.h,
            stride: self.stride,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
        }
    }

    /// Mask of samples strictly above `threshold` (1.0 where true).
    pub fn threshold_above(&self, threshold: f32) -> Self {
        self.map(|v| if v > threshold { 1.0 } else { 0.0 })
    }

    /// Mask of samples strictly below `threshold` (1.0 where true).
    pub fn threshold_below(&self, threshold: f32) -> Self {
        self.map(|v| if v < threshold { 1.0 } else { 0.0 })
    }

    /// Arithmetic mean of all samples (0 for an empty image).
    pub fn mean(&self) -> f32 {
        let denom = (self.w * self.h).max(1) as f64;
        let sum: f64 = self.rows().flat_map(|r| r.iter()).map(|&v| v as f64).sum();
        (sum / denom) as f32
    }

    /// `true` when the pixel at linear index `i` counts as set in a `{0,1}` mask.
    #[inline]
    pub fn is_set(&self, i: usize) -> bool {
        self.data[i] > 0.5
    }
}

impl ImageView for ImageF32 {
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
    fn row(&self, y: usize) -> &[f32] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[f32]> {
        (self.stride == self.w).then_some(&self.data[..self.w * self.h])
    }
}

impl ImageViewMut for ImageF32 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [f32] {
        let start = y * self.stride;
        let end = start + self.w;
        &mut self.data[start..end]
    }

    #[inline]
    fn as_mut_slice(&mut self) -> Option<&mut [f32]> {
        if self.stride == self.w {
            Some(&mut self.data[..self.w * self.h])
        } else {
            None
        }
    }
}
