//! Borrowed 8-bit interleaved RGB view (`H × W × 3`).
//!
//! This is the input contract of the counter: callers hand over any RGB byte
//! buffer (decoded file, camera frame, synthetic test image) without copying.
use crate::error::{CountError, Result};

#[derive(Clone, Debug)]
pub struct ImageRgbU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows, >= 3 * w
    pub data: &'a [u8],
}

impl<'a> ImageRgbU8<'a> {
    /// Tightly packed view over `data` (`stride == 3 * w`).
    pub fn packed(w: usize, h: usize, data: &'a [u8]) -> Self {
        Self {
            w,
            h,
            stride: w * 3,
            data,
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [u8; 3] {
        let i = y * self.stride + x * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Check that the view describes a non-empty, fully backed 3-channel image.
    pub fn validate(&self) -> Result<()> {
        if self.w == 0 || self.h == 0 {
            return Err(CountError::InvalidInput(format!(
                "image must be non-empty, got {}x{}",
                self.w, self.h
            )));
        }
        if self.stride < self.w * 3 {
            return Err(CountError::InvalidInput(format!(
                "stride {} is smaller than 3 * width ({})",
                self.stride,
                self.w * 3
            )));
        }
        let needed = (self.h - 1) * self.stride + self.w * 3;
        if self.data.len() < needed {
            return Err(CountError::InvalidInput(format!(
                "buffer holds {} bytes, {}x{}x3 with stride {} needs {}",
                self.data.len(),
                self.w,
                self.h,
                self.stride,
                needed
            )));
        }
        Ok(())
    }
}

impl<'a> crate::image::traits::ImageView for ImageRgbU8<'a> {
    type Pixel = u8;

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
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w * 3]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[u8]> {
        (self.stride == self.w * 3).then_some(&self.data[..self.w * self.h * 3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_short_buffers() {
        let data = vec![0u8; 12];
        assert!(ImageRgbU8::packed(0, 4, &data).validate().is_err());
        assert!(ImageRgbU8::packed(2, 3, &data).validate().is_err());
        assert!(ImageRgbU8::packed(2, 2, &data).validate().is_ok());
    }

    #[test]
    fn rejects_stride_narrower_than_row() {
        let data = vec![0u8; 64];
        let view = ImageRgbU8 {
            w: 4,
            h: 2,
            stride: 8,
            data: &data,
        };
        assert!(matches!(view.validate(), Err(CountError::InvalidInput(_))));
    }

    #[test]
    fn padded_rows_are_addressed_by_stride() {
        let mut data = vec![0u8; 2 * 8];
        data[8..11].copy_from_slice(&[7, 8, 9]);
        let view = ImageRgbU8 {
            w: 2,
            h: 2,
            stride: 8,
            data: &data,
        };
        assert!(view.validate().is_ok());
        assert_eq!(view.get(0, 1), [7, 8, 9]);
    }
}
