//! Normalized box blur (local mean over a rectangular window).
//!
//! Separable: a horizontal running sum per row, then a vertical running sum
//! over the row sums. Accumulation happens in f64 so the sliding update does
//! not drift on large kernels. Borders use reflect-101.
//!
//! Complexity: O(W·H) independent of the kernel size.
use super::kernel::{reflect101, KernelSize};
use crate::image::{ImageF32, ImageView, ImageViewMut};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Mean of every `ksize` window around each pixel.
pub fn box_blur(src: &ImageF32, ksize: KernelSize) -> ImageF32 {
    let (w, h) = (src.w, src.h);
    if w == 0 || h == 0 || ksize.is_empty() {
        return src.clone();
    }

    let row_sums = horizontal_sums(src, ksize);

    let (y0, y1) = ksize.y_span();
    let norm = 1.0 / (ksize.width * ksize.height) as f64;
    let mut acc = vec![0.0f64; w];
    for dy in y0..=y1 {
        let r = &row_sums[reflect101(dy, h) * w..][..w];
        for (a, &v) in acc.iter_mut().zip(r) {
            *a += v;
        }
    }

    let mut out = ImageF32::new(w, h);
    for y in 0..h {
        for (d, &a) in out.row_mut(y).iter_mut().zip(acc.iter()) {
            *d = (a * norm) as f32;
        }
        if y + 1 < h {
            let enter = reflect101(y as isize + 1 + y1, h);
            let leave = reflect101(y as isize + y0, h);
            let (enter, leave) = (&row_sums[enter * w..][..w], &row_sums[leave * w..][..w]);
            for ((a, &e), &l) in acc.iter_mut().zip(enter).zip(leave) {
                *a += e - l;
            }
        }
    }
    out
}

fn horizontal_sums(src: &ImageF32, ksize: KernelSize) -> Vec<f64> {
    let w = src.w;
    let mut sums = vec![0.0f64; w * src.h];
    let run = |(y, dst): (usize, &mut [f64])| row_window_sums(src.row(y), ksize, dst);

    #[cfg(feature = "parallel")]
    sums.par_chunks_mut(w).enumerate().for_each(run);
    #[cfg(not(feature = "parallel"))]
    sums.chunks_mut(w).enumerate().for_each(run);

    sums
}

fn row_window_sums(row: &[f32], ksize: KernelSize, dst: &mut [f64]) {
    let w = row.len();
    let (x0, x1) = ksize.x_span();
    let padded: Vec<f64> = (x0..w as isize + x1)
        .map(|p| row[reflect101(p, w)] as f64)
        .collect();
    let k = ksize.width;
    let mut s: f64 = padded[..k].iter().sum();
    dst[0] = s;
    for x in 1..w {
        s += padded[x + k - 1] - padded[x - 1];
        dst[x] = s;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force(src: &ImageF32, ksize: KernelSize) -> ImageF32 {
        let (x0, x1) = ksize.x_span();
        let (y0, y1) = ksize.y_span();
        ImageF32::from_fn(src.w, src.h, |x, y| {
            let mut s = 0.0f64;
            for dy in y0..=y1 {
                for dx in x0..=x1 {
                    let sx = reflect101(x as isize + dx, src.w);
                    let sy = reflect101(y as isize + dy, src.h);
                    s += src.get(sx, sy) as f64;
                }
            }
            (s / (ksize.width * ksize.height) as f64) as f32
        })
    }

    #[test]
    fn constant_image_is_preserved() {
        let img = ImageF32::filled(17, 9, 0.8);
        let out = box_blur(&img, KernelSize::square(40));
        assert!(out.data.iter().all(|&v| (v - 0.8).abs() < 1e-6));
    }

    #[test]
    fn matches_direct_window_sum() {
        let img = ImageF32::from_fn(23, 15, |x, y| ((x * 31 + y * 17) % 13) as f32 / 12.0);
        for ksize in [
            KernelSize::square(6),
            KernelSize::square(7),
            KernelSize::new(20, 3),
            KernelSize::square(40),
        ] {
            let fast = box_blur(&img, ksize);
            let slow = brute_force(&img, ksize);
            for (a, b) in fast.data.iter().zip(slow.data.iter()) {
                assert!((a - b).abs() < 1e-5, "{ksize:?}: {a} vs {b}");
            }
        }
    }

    #[test]
    fn even_window_is_anchored_left_of_center() {
        // Single bright pixel at x = 5; a width-2 window covers offsets -1..=0,
        // so the response shows up at x = 5 and x = 6.
        let img = ImageF32::from_fn(12, 1, |x, _| if x == 5 { 1.0 } else { 0.0 });
        let out = box_blur(&img, KernelSize::new(2, 1));
        assert_eq!(out.get(4, 0), 0.0);
        assert!((out.get(5, 0) - 0.5).abs() < 1e-6);
        assert!((out.get(6, 0) - 0.5).abs() < 1e-6);
    }
}
