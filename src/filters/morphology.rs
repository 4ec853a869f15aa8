//! Erosion and dilation with a full rectangular structuring element.
//!
//! A rectangle decomposes exactly into a row pass followed by a column pass.
//! Only in-image samples take part in the min/max, so the border never
//! erodes or grows a region. Besides `{0,1}` masks, dilation also runs on
//! integer label rasters where it spreads the largest id in the window.
use super::kernel::KernelSize;
use super::labeling::LabelRaster;
use crate::image::ImageF32;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Minimum over the window (binary erosion for `{0,1}` masks).
pub fn erode(src: &ImageF32, ksize: KernelSize) -> ImageF32 {
    ImageF32 {
        w: src.w,
        h: src.h,
        stride: src.w,
        data: rect_extremum(&src.data, src.w, src.h, ksize, f32::min),
    }
}

/// Maximum over the window (binary dilation for `{0,1}` masks).
pub fn dilate(src: &ImageF32, ksize: KernelSize) -> ImageF32 {
    ImageF32 {
        w: src.w,
        h: src.h,
        stride: src.w,
        data: rect_extremum(&src.data, src.w, src.h, ksize, f32::max),
    }
}

/// Maximum id over the window of a label raster.
pub fn dilate_labels(src: &LabelRaster, ksize: KernelSize) -> LabelRaster {
    LabelRaster {
        w: src.w,
        h: src.h,
        data: rect_extremum(&src.data, src.w, src.h, ksize, u32::max),
    }
}

fn rect_extremum<T>(data: &[T], w: usize, h: usize, ksize: KernelSize, pick: fn(T, T) -> T) -> Vec<T>
where
    T: Copy + Send + Sync,
{
    if w == 0 || h == 0 || ksize.is_empty() {
        return data.to_vec();
    }
    let (x0, x1) = ksize.x_span();
    let (y0, y1) = ksize.y_span();

    let mut rows = data.to_vec();
    let horizontal = |(y, dst): (usize, &mut [T])| {
        let src = &data[y * w..(y + 1) * w];
        for (x, d) in dst.iter_mut().enumerate() {
            let (lo, hi) = clip(x, x0, x1, w);
            *d = src[lo + 1..=hi].iter().fold(src[lo], |m, &v| pick(m, v));
        }
    };
    #[cfg(feature = "parallel")]
    rows.par_chunks_mut(w).enumerate().for_each(horizontal);
    #[cfg(not(feature = "parallel"))]
    rows.chunks_mut(w).enumerate().for_each(horizontal);

    let mut out = rows.clone();
    let vertical = |(y, dst): (usize, &mut [T])| {
        let (lo, hi) = clip(y, y0, y1, h);
        dst.copy_from_slice(&rows[lo * w..(lo + 1) * w]);
        for yy in lo + 1..=hi {
            for (d, &v) in dst.iter_mut().zip(&rows[yy * w..(yy + 1) * w]) {
                *d = pick(*d, v);
            }
        }
    };
    #[cfg(feature = "parallel")]
    out.par_chunks_mut(w).enumerate().for_each(vertical);
    #[cfg(not(feature = "parallel"))]
    out.chunks_mut(w).enumerate().for_each(vertical);

    out
}

#[inline]
fn clip(c: usize, lo: isize, hi: isize, n: usize) -> (usize, usize) {
    let a = (c as isize + lo).max(0) as usize;
    let b = ((c as isize + hi).min(n as isize - 1)) as usize;
    (a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_mask(w: usize, h: usize, x0: usize, y0: usize, side: usize) -> ImageF32 {
        ImageF32::from_fn(w, h, |x, y| {
            let inside = (x0..x0 + side).contains(&x) && (y0..y0 + side).contains(&y);
            if inside {
                1.0
            } else {
                0.0
            }
        })
    }

    #[test]
    fn dilate_grows_square_by_kernel_extent() {
        let mask = square_mask(20, 20, 8, 8, 2);
        let out = dilate(&mask, KernelSize::square(7));
        let count = out.data.iter().filter(|&&v| v > 0.5).count();
        assert_eq!(count, 8 * 8);
        assert_eq!(out.get(5, 5), 1.0);
        assert_eq!(out.get(12, 12), 1.0);
        assert_eq!(out.get(4, 5), 0.0);
    }

    #[test]
    fn erode_ignores_the_border() {
        let full = ImageF32::filled(10, 6, 1.0);
        let out = erode(&full, KernelSize::square(30));
        assert!(out.data.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn erosion_never_grows_a_region() {
        let mask = ImageF32::from_fn(32, 24, |x, y| ((x / 5 + y / 3) % 2) as f32);
        let eroded = erode(&mask, KernelSize::square(3));
        for (e, m) in eroded.data.iter().zip(mask.data.iter()) {
            assert!(e <= m);
        }
    }

    #[test]
    fn label_dilation_spreads_largest_id() {
        let mut labels = LabelRaster::new(9, 9);
        labels.data[4 * 9 + 4] = 3;
        labels.data[4 * 9 + 5] = 7;
        let out = dilate_labels(&labels, KernelSize::square(3));
        assert_eq!(out.get(3, 3), 3);
        assert_eq!(out.get(5, 5), 7);
        assert_eq!(out.get(6, 4), 7);
        assert_eq!(out.get(0, 0), 0);
    }
}
