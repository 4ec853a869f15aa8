//! Connected-component labeling of binary masks.
//!
//! Seeds are visited in raster order and grown with an explicit stack, so
//! component ids follow the first pixel of each component in scan order
//! (1, 2, 3, ...). Area and centroid are accumulated while growing.
//!
//! Id 0 is the background. It is never stored in [`ComponentSet::components`]:
//! [`ComponentId`] wraps a `NonZeroU32`, so the id → stats map cannot hold it.
use crate::image::ImageF32;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::num::NonZeroU32;

const NEIGH_4: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const NEIGH_8: [(isize, isize); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Pixel adjacency used when growing components.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Connectivity {
    Four,
    #[default]
    Eight,
}

impl Connectivity {
    fn offsets(self) -> &'static [(isize, isize)] {
        match self {
            Connectivity::Four => &NEIGH_4,
            Connectivity::Eight => &NEIGH_8,
        }
    }
}

/// Identifier of a foreground component; never the background.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub struct ComponentId(NonZeroU32);

impl ComponentId {
    /// `None` for the background id 0.
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl From<ComponentId> for u32 {
    fn from(id: ComponentId) -> Self {
        id.get()
    }
}

impl TryFrom<u32> for ComponentId {
    type Error = String;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        ComponentId::new(raw).ok_or_else(|| "component id 0 is reserved for background".into())
    }
}

/// Per-pixel component ids (0 = background).
#[derive(Clone, Debug, PartialEq)]
pub struct LabelRaster {
    pub w: usize,
    pub h: usize,
    pub data: Vec<u32>,
}

impl LabelRaster {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0; w * h],
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.data[y * self.w + x]
    }

    /// Reset every pixel whose id fails `keep` to the background.
    pub fn retain(&mut self, mut keep: impl FnMut(ComponentId) -> bool) {
        for v in &mut self.data {
            if let Some(id) = ComponentId::new(*v) {
                if !keep(id) {
                    *v = 0;
                }
            }
        }
    }
}

/// Area and centroid of one component.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComponentStats {
    pub area: usize,
    /// Mean pixel coordinate `(x, y)`.
    pub centroid: Point2<f64>,
}

/// Full labeling result: id raster plus stats keyed by component id.
#[derive(Clone, Debug)]
pub struct ComponentSet {
    pub labels: LabelRaster,
    pub components: BTreeMap<ComponentId, ComponentStats>,
}

impl ComponentSet {
    /// Number of foreground components (background excluded).
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Number of labels including the background, as labeling libraries report it.
    pub fn num_labels(&self) -> usize {
        self.components.len() + 1
    }

    pub fn get(&self, id: ComponentId) -> Option<&ComponentStats> {
        self.components.get(&id)
    }

    /// Mean of `values` over the pixels of every component, keyed by id.
    pub fn mean_over(&self, values: &ImageF32) -> BTreeMap<ComponentId, f64> {
        let mut sums: BTreeMap<ComponentId, f64> = BTreeMap::new();
        for (&raw, &v) in self.labels.data.iter().zip(values.data.iter()) {
            if let Some(id) = ComponentId::new(raw) {
                *sums.entry(id).or_insert(0.0) += v as f64;
            }
        }
        for (id, sum) in sums.iter_mut() {
            if let Some(stats) = self.components.get(id) {
                *sum /= stats.area.max(1) as f64;
            }
        }
        sums
    }
}

struct ComponentAccumulator {
    area: usize,
    sum_x: f64,
    sum_y: f64,
}

impl ComponentAccumulator {
    fn new() -> Self {
        Self {
            area: 0,
            sum_x: 0.0,
            sum_y: 0.0,
        }
    }

    fn push(&mut self, x: usize, y: usize) {
        self.area += 1;
        self.sum_x += x as f64;
        self.sum_y += y as f64;
    }

    fn finish(self) -> ComponentStats {
        let n = self.area.max(1) as f64;
        ComponentStats {
            area: self.area,
            centroid: Point2::new(self.sum_x / n, self.sum_y / n),
        }
    }
}

/// Label the pixels of `mask` for which `is_foreground` holds.
pub fn label_components(
    mask: &ImageF32,
    is_foreground: impl Fn(f32) -> bool,
    connectivity: Connectivity,
) -> ComponentSet {
    let (w, h) = (mask.w, mask.h);
    let fg: Vec<bool> = mask.data.iter().map(|&v| is_foreground(v)).collect();
    let mut labels = LabelRaster::new(w, h);
    let mut components = BTreeMap::new();
    let mut stack: Vec<usize> = Vec::with_capacity(64);
    let mut next_id: u32 = 1;

    for seed in 0..w * h {
        if !fg[seed] || labels.data[seed] != 0 {
            continue;
        }
        let id = next_id;
        next_id += 1;
        let mut acc = ComponentAccumulator::new();
        labels.data[seed] = id;
        stack.clear();
        stack.push(seed);
        while let Some(idx) = stack.pop() {
            let (x, y) = (idx % w, idx / w);
            acc.push(x, y);
            for &(dx, dy) in connectivity.offsets() {
                let xn = x as isize + dx;
                let yn = y as isize + dy;
                if xn < 0 || yn < 0 || xn >= w as isize || yn >= h as isize {
                    continue;
                }
                let n = yn as usize * w + xn as usize;
                if fg[n] && labels.data[n] == 0 {
                    labels.data[n] = id;
                    stack.push(n);
                }
            }
        }
        if let Some(cid) = ComponentId::new(id) {
            components.insert(cid, acc.finish());
        }
    }

    ComponentSet { labels, components }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_from(rows: &[&str]) -> ImageF32 {
        let h = rows.len();
        let w = rows[0].len();
        ImageF32::from_fn(w, h, |x, y| {
            if rows[y].as_bytes()[x] == b'#' {
                1.0
            } else {
                0.0
            }
        })
    }

    #[test]
    fn diagonal_neighbors_join_under_eight_connectivity() {
        let mask = mask_from(&["#...", ".#..", "...#", "...#"]);
        let eight = label_components(&mask, |v| v > 0.5, Connectivity::Eight);
        let four = label_components(&mask, |v| v > 0.5, Connectivity::Four);
        assert_eq!(eight.len(), 2);
        assert_eq!(four.len(), 3);
    }

    #[test]
    fn ids_follow_raster_order_and_stats_are_exact() {
        let mask = mask_from(&["..##", "..##", "#...", "##.."]);
        let set = label_components(&mask, |v| v > 0.5, Connectivity::Eight);
        let first = ComponentId::new(1).unwrap();
        let second = ComponentId::new(2).unwrap();
        assert_eq!(set.get(first).unwrap().area, 4);
        assert_eq!(set.get(first).unwrap().centroid, Point2::new(2.5, 0.5));
        assert_eq!(set.get(second).unwrap().area, 3);
        assert_eq!(set.labels.get(0, 3), 2);
        assert_eq!(set.labels.get(0, 0), 0);
        assert_eq!(set.num_labels(), 3);
    }

    #[test]
    fn background_id_is_not_representable() {
        assert!(ComponentId::new(0).is_none());
        assert!(ComponentId::try_from(0u32).is_err());
    }

    #[test]
    fn empty_mask_has_no_components() {
        let set = label_components(&ImageF32::new(8, 8), |v| v > 0.5, Connectivity::Eight);
        assert!(set.is_empty());
        assert!(set.labels.data.iter().all(|&v| v == 0));
    }

    #[test]
    fn retain_clears_rejected_ids() {
        let mask = mask_from(&["#.#", "...", "#.#"]);
        let mut set = label_components(&mask, |v| v > 0.5, Connectivity::Eight);
        set.labels.retain(|id| id.get() % 2 == 0);
        assert_eq!(set.labels.data.iter().filter(|&&v| v != 0).count(), 2);
    }

    #[test]
    fn mean_over_reports_per_component_average() {
        let mask = mask_from(&["##..", "....", "..##"]);
        let set = label_components(&mask, |v| v > 0.5, Connectivity::Eight);
        let values = ImageF32::from_fn(4, 3, |x, _| x as f32);
        let means = set.mean_over(&values);
        assert_eq!(means[&ComponentId::new(1).unwrap()], 0.5);
        assert_eq!(means[&ComponentId::new(2).unwrap()], 2.5);
    }
}
