use crate::filters::ComponentId;
use nalgebra::Point2;
use serde::Serialize;

/// One counted erythrocyte.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedCell {
    pub id: ComponentId,
    pub area: usize,
    /// Mean pixel coordinate `(x, y)` of the component.
    pub centroid: Point2<f64>,
    /// Mean refined-mask value over the component's pixels.
    pub mean_mask: f64,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountResult {
    pub count: usize,
    pub cells: Vec<DetectedCell>,
    pub width: usize,
    pub height: usize,
    /// Components found by labeling (background excluded), before filtering.
    pub components_total: usize,
    pub latency_ms: f64,
}
