use serde::{Deserialize, Serialize};

/// Rectangular window size `(width, height)` shared by blur and morphology.
///
/// The anchor sits at `(width / 2, height / 2)`, so even-sized windows extend
/// one sample further towards negative offsets than towards positive ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KernelSize {
    pub width: usize,
    pub height: usize,
}

impl KernelSize {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub const fn square(size: usize) -> Self {
        Self::new(size, size)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Window offsets along x: `-anchor ..= width - 1 - anchor`.
    #[inline]
    pub(crate) fn x_span(&self) -> (isize, isize) {
        span(self.width)
    }

    /// Window offsets along y: `-anchor ..= height - 1 - anchor`.
    #[inline]
    pub(crate) fn y_span(&self) -> (isize, isize) {
        span(self.height)
    }
}

#[inline]
fn span(size: usize) -> (isize, isize) {
    let anchor = (size / 2) as isize;
    (-anchor, size as isize - 1 - anchor)
}

/// Reflect-101 border mapping (`-1 → 1`, `n → n - 2`).
///
/// Repeats the reflection until the index lands inside `[0, n)`, so windows
/// wider than the image stay well defined. A single-sample axis maps to 0.
#[inline]
pub(crate) fn reflect101(mut p: isize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let n = n as isize;
    while p < 0 || p >= n {
        p = if p < 0 { -p } else { 2 * n - 2 - p };
    }
    p as usize
}
