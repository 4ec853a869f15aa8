//! Display-only rendering: tinted component overlay and `×` centroid marks.
//!
//! Nothing here feeds back into the count.

use super::components::Palette;
use crate::detector::params::OverlayParams;
use crate::filters::LabelRaster;
use crate::image::ImageRgbF32;
use nalgebra::Point2;

/// `palette(labels) * opacity + orig`, unclamped.
pub fn blend_overlay(
    labels: &LabelRaster,
    palette: &Palette,
    orig: &ImageRgbF32,
    opacity: f32,
) -> ImageRgbF32 {
    let tint = palette.colorize(labels);
    let mut out = orig.clone();
    for (o, &t) in out.data.iter_mut().zip(tint.data.iter()) {
        *o += t * opacity;
    }
    out
}

/// Copy of `base` with one `×` per centre, each centre rounded half-to-even.
pub fn annotate(
    base: &ImageRgbF32,
    centers: impl IntoIterator<Item = Point2<f64>>,
    params: &OverlayParams,
) -> ImageRgbF32 {
    let mut out = base.clone();
    let r = params.mark_radius as f64;
    for c in centers {
        let cx = c.x.round_ties_even();
        let cy = c.y.round_ties_even();
        draw_segment(
            &mut out,
            Point2::new(cx - r, cy - r),
            Point2::new(cx + r, cy + r),
            params.mark_thickness,
            params.mark_color,
        );
        draw_segment(
            &mut out,
            Point2::new(cx - r, cy + r),
            Point2::new(cx + r, cy - r),
            params.mark_thickness,
            params.mark_color,
        );
    }
    out
}

/// Paint every pixel within `thickness / 2` of the segment `a`–`b`, clipped
/// to the image.
pub fn draw_segment(
    img: &mut ImageRgbF32,
    a: Point2<f64>,
    b: Point2<f64>,
    thickness: u32,
    color: [f32; 3],
) {
    if img.w == 0 || img.h == 0 {
        return;
    }
    let half = thickness.max(1) as f64 / 2.0;
    let x_lo = (a.x.min(b.x) - half).floor().max(0.0);
    let y_lo = (a.y.min(b.y) - half).floor().max(0.0);
    let x_hi = (a.x.max(b.x) + half).ceil().min((img.w - 1) as f64);
    let y_hi = (a.y.max(b.y) + half).ceil().min((img.h - 1) as f64);
    if x_lo > x_hi || y_lo > y_hi {
        return;
    }
    let ab = b - a;
    let len2 = ab.norm_squared();
    for y in y_lo as usize..=y_hi as usize {
        for x in x_lo as usize..=x_hi as usize {
            let p = Point2::new(x as f64, y as f64);
            let t = if len2 > 0.0 {
                ((p - a).dot(&ab) / len2).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let closest = a + ab * t;
            if (p - closest).norm() <= half {
                img.set(x, y, color);
            }
        }
    }
}
