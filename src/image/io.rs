//! I/O helpers for RGB inputs, trace images and JSON.
//!
//! These sit outside the counting core; they exist for the demo tools.
//! - `load_rgb_image`: read a PNG/JPEG/etc. into an owned 8-bit RGB buffer.
//! - `save_trace_image`: write a trace entry (gray or RGB, float) to a PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ImageF32, ImageRgbF32, ImageRgbU8, ImageView};
use crate::diagnostics::TraceImage;
use crate::error::Result;
use image::{GrayImage, Luma, Rgb, RgbImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Owned 8-bit RGB buffer with borrowed view conversion.
#[derive(Clone, Debug)]
pub struct OwnedRgbU8 {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl OwnedRgbU8 {
    /// Construct an owned, tightly packed RGB buffer given raw bytes.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Borrow as a read-only `ImageRgbU8` view
    pub fn as_view(&self) -> ImageRgbU8<'_> {
        ImageRgbU8::packed(self.width, self.height, &self.data)
    }
}

/// Load an image from disk and convert to 8-bit RGB (channel order R, G, B).
pub fn load_rgb_image(path: &Path) -> Result<OwnedRgbU8> {
    let img = image::open(path)?.into_rgb8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    Ok(OwnedRgbU8::new(width, height, img.into_raw()))
}

/// Save a trace image to PNG, clamping samples to `[0, 1]` before scaling.
pub fn save_trace_image(image: &TraceImage, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    match image {
        TraceImage::Gray(gray) => gray_to_u8(gray).save(path)?,
        TraceImage::Rgb(rgb) => rgb_to_u8(rgb).save(path)?,
    }
    Ok(())
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

#[inline]
fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0) as u8
}

fn gray_to_u8(image: &ImageF32) -> GrayImage {
    let mut out = GrayImage::new(image.w as u32, image.h as u32);
    for (y, row) in image.rows().enumerate() {
        for (x, &px) in row.iter().enumerate() {
            out.put_pixel(x as u32, y as u32, Luma([to_byte(px)]));
        }
    }
    out
}

fn rgb_to_u8(image: &ImageRgbF32) -> RgbImage {
    let mut out = RgbImage::new(image.w as u32, image.h as u32);
    for (y, row) in image.rows().enumerate() {
        for (x, px) in row.chunks_exact(3).enumerate() {
            out.put_pixel(
                x as u32,
                y as u32,
                Rgb([to_byte(px[0]), to_byte(px[1]), to_byte(px[2])]),
            );
        }
    }
    out
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_clamps_out_of_range_samples() {
        let img = ImageF32::from_fn(3, 1, |x, _| [-0.5, 0.5, 1.7][x]);
        let out = gray_to_u8(&img);
        assert_eq!(out.get_pixel(0, 0)[0], 0);
        assert_eq!(out.get_pixel(1, 0)[0], 127);
        assert_eq!(out.get_pixel(2, 0)[0], 255);
    }
}
