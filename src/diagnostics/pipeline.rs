use super::{Trace, TraceEntrySummary, TimingBreakdown};
use crate::types::CountResult;
use serde::Serialize;

/// Everything one run of [`CellCounter`](crate::CellCounter) produces: the
/// count, the image trace and the per-stage timings.
#[derive(Clone, Debug)]
pub struct CountOutput {
    pub result: CountResult,
    pub trace: Trace,
    pub timings: TimingBreakdown,
}

impl CountOutput {
    pub fn count(&self) -> usize {
        self.result.count
    }

    /// Serializable summary of the run (pixels are left out).
    pub fn report(&self, seed: Option<u64>) -> CountReport {
        CountReport {
            input: InputDescriptor {
                width: self.result.width,
                height: self.result.height,
                seed,
            },
            result: self.result.clone(),
            trace: self.trace.summaries(),
            timings: self.timings.clone(),
        }
    }
}

/// JSON-friendly description of a run, written by the demo tools.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountReport {
    pub input: InputDescriptor,
    pub result: CountResult,
    pub trace: Vec<TraceEntrySummary>,
    pub timings: TimingBreakdown,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}
