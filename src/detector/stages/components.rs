//! Candidate labeling, display colors and the component filter.
//!
//! Candidates are the pixels of the refined mask below the foreground
//! threshold. Each component receives a [`FilterDecision`]; only
//! [`FilterDecision::Accepted`] components count as erythrocytes. The size
//! bounds are exclusive on both ends, the mean-mask bound is inclusive.

use crate::detector::params::FilterParams;
use crate::filters::{label_components, ComponentId, ComponentSet, Connectivity, LabelRaster};
use crate::image::{ImageF32, ImageRgbF32};
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;

/// Label every pixel of `refined` strictly below `foreground_threshold`.
pub fn label_candidates(
    refined: &ImageF32,
    foreground_threshold: f32,
    connectivity: Connectivity,
) -> ComponentSet {
    label_components(refined, |v| v < foreground_threshold, connectivity)
}

/// Per-id display colors; the background is always black.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colors: Vec<[f32; 3]>,
}

impl Palette {
    /// One uniform `[0, 1)` RGB triple per id `1..=max_id`, drawn in id order.
    pub fn random<R: Rng + ?Sized>(max_id: u32, rng: &mut R) -> Self {
        let mut colors = Vec::with_capacity(max_id as usize + 1);
        colors.push([0.0; 3]);
        for _ in 0..max_id {
            colors.push([rng.gen(), rng.gen(), rng.gen()]);
        }
        Self { colors }
    }

    pub fn color(&self, raw_id: u32) -> [f32; 3] {
        self.colors
            .get(raw_id as usize)
            .copied()
            .unwrap_or([0.0; 3])
    }

    /// Paint every pixel of `labels` with the color of its id.
    pub fn colorize(&self, labels: &LabelRaster) -> ImageRgbF32 {
        let mut out = ImageRgbF32::new(labels.w, labels.h);
        for (dst, &id) in out.data.chunks_exact_mut(3).zip(labels.data.iter()) {
            dst.copy_from_slice(&self.color(id));
        }
        out
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterDecision {
    Accepted,
    /// `area <= min_area`.
    TooSmall,
    /// `area >= max_area`.
    TooLarge,
    /// Size is plausible but the component mostly covers set refined-mask pixels.
    BackgroundPolarity,
}

/// Decision for every labeled component.
#[derive(Clone, Debug, Default)]
pub struct ComponentFilter {
    pub decisions: BTreeMap<ComponentId, FilterDecision>,
    /// Mean refined-mask value over each component.
    pub mean_mask: BTreeMap<ComponentId, f64>,
}

impl ComponentFilter {
    pub fn is_accepted(&self, id: ComponentId) -> bool {
        self.decisions.get(&id) == Some(&FilterDecision::Accepted)
    }

    pub fn accepted(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.decisions
            .iter()
            .filter(|(_, d)| **d == FilterDecision::Accepted)
            .map(|(&id, _)| id)
    }

    /// Number of accepted components: the cell count.
    pub fn count(&self) -> usize {
        self.accepted().count()
    }
}

pub fn decide(area: usize, mean_mask: f64, params: &FilterParams) -> FilterDecision {
    if area <= params.min_area {
        FilterDecision::TooSmall
    } else if area >= params.max_area {
        FilterDecision::TooLarge
    } else if mean_mask > params.max_mean_mask {
        FilterDecision::BackgroundPolarity
    } else {
        FilterDecision::Accepted
    }
}

pub fn filter_components(
    set: &ComponentSet,
    refined: &ImageF32,
    params: &FilterParams,
) -> ComponentFilter {
    let mean_mask = set.mean_over(refined);
    let mut decisions = BTreeMap::new();
    for (&id, stats) in &set.components {
        let mean = mean_mask.get(&id).copied().unwrap_or(0.0);
        let decision = decide(stats.area, mean, params);
        log::trace!(
            "component {} area={} centroid=({:.1}, {:.1}) mean_mask={:.3} -> {:?}",
            id.get(),
            stats.area,
            stats.centroid.x,
            stats.centroid.y,
            mean,
            decision
        );
        decisions.insert(id, decision);
    }
    ComponentFilter {
        decisions,
        mean_mask,
    }
}

/// Id raster with every non-accepted component reset to the background.
pub fn retain_accepted(labels: &LabelRaster, filter: &ComponentFilter) -> LabelRaster {
    let mut out = labels.clone();
    out.retain(|id| filter.is_accepted(id));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn disk_mask(w: usize, h: usize, cx: f32, cy: f32, r: f32) -> ImageF32 {
        // 0 inside the disk (candidate), 1 outside
        ImageF32::from_fn(w, h, |x, y| {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            if dx * dx + dy * dy <= r * r {
                0.0
            } else {
                1.0
            }
        })
    }

    #[test]
    fn size_bounds_are_exclusive() {
        let p = FilterParams::default();
        assert_eq!(decide(40, 0.0, &p), FilterDecision::TooSmall);
        assert_eq!(decide(41, 0.0, &p), FilterDecision::Accepted);
        assert_eq!(decide(9_999, 0.0, &p), FilterDecision::Accepted);
        assert_eq!(decide(10_000, 0.0, &p), FilterDecision::TooLarge);
        assert_eq!(decide(500, 0.5, &p), FilterDecision::Accepted);
        assert_eq!(decide(500, 0.51, &p), FilterDecision::BackgroundPolarity);
    }

    #[test]
    fn oversized_disk_is_rejected_as_too_large() {
        let refined = disk_mask(200, 200, 100.0, 100.0, 60.0);
        let set = label_candidates(&refined, 0.5, Connectivity::Eight);
        assert_eq!(set.len(), 1);
        let id = ComponentId::new(1).unwrap();
        assert!(set.get(id).unwrap().area > 10_000);
        let filter = filter_components(&set, &refined, &FilterParams::default());
        assert_eq!(filter.decisions[&id], FilterDecision::TooLarge);
        assert_eq!(filter.count(), 0);
    }

    #[test]
    fn medium_disk_is_accepted_and_small_one_rejected() {
        let mut refined = disk_mask(120, 120, 30.0, 30.0, 10.0);
        let small = disk_mask(120, 120, 90.0, 90.0, 3.0);
        refined = refined.zip_map(&small, f32::min);
        let set = label_candidates(&refined, 0.5, Connectivity::Eight);
        let filter = filter_components(&set, &refined, &FilterParams::default());
        assert_eq!(filter.count(), 1);
        let accepted: Vec<_> = filter.accepted().collect();
        let stats = set.get(accepted[0]).unwrap();
        assert!((stats.centroid.x - 30.0).abs() < 1e-9);
        assert!((stats.centroid.y - 30.0).abs() < 1e-9);
        assert_eq!(filter.mean_mask[&accepted[0]], 0.0);

        let kept = retain_accepted(&set.labels, &filter);
        assert_eq!(kept.get(90, 90), 0);
        assert_eq!(kept.get(30, 30), accepted[0].get());
    }

    #[test]
    fn palette_keeps_background_black() {
        let mut rng = StdRng::seed_from_u64(5);
        let palette = Palette::random(3, &mut rng);
        assert_eq!(palette.color(0), [0.0; 3]);
        assert_eq!(palette.color(99), [0.0; 3]);
        for id in 1..=3 {
            assert!(palette.color(id).iter().all(|c| (0.0..1.0).contains(c)));
        }
        let mut labels = LabelRaster::new(2, 1);
        labels.data[1] = 2;
        let img = palette.colorize(&labels);
        assert_eq!(img.get(0, 0), [0.0; 3]);
        assert_eq!(img.get(1, 0), palette.color(2));
    }
}
