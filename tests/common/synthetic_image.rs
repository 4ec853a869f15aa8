/// Plasma level of the synthetic smears (0.8 after normalization).
pub const BACKGROUND: u8 = 204;
/// Stained cell level (0.4 after normalization).
pub const CELL: u8 = 102;

/// Filled disc `(cx, cy, radius, value)` painted onto a synthetic image.
#[derive(Clone, Copy, Debug)]
pub struct Disc {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub value: u8,
}

impl Disc {
    pub fn cell(cx: f64, cy: f64, radius: f64) -> Self {
        Self {
            cx,
            cy,
            radius,
            value: CELL,
        }
    }

    fn contains(&self, x: usize, y: usize) -> bool {
        let dx = x as f64 - self.cx;
        let dy = y as f64 - self.cy;
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

/// Generates a tightly packed gray-valued RGB image with discs painted in
/// order over a uniform background (later discs win where they overlap).
pub fn discs_rgb_u8(width: usize, height: usize, background: u8, discs: &[Disc]) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");

    let mut img = vec![background; width * height * 3];
    for y in 0..height {
        for x in 0..width {
            if let Some(d) = discs.iter().rev().find(|d| d.contains(x, y)) {
                let i = (y * width + x) * 3;
                img[i..i + 3].fill(d.value);
            }
        }
    }
    img
}
