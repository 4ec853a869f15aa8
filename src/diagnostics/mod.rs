//! Diagnostics data model returned next to the count.
//!
//! `CountOutput` bundles the [`CountResult`](crate::CountResult), the ordered
//! image [`Trace`] of every stage, and a [`TimingBreakdown`]. `CountReport` is
//! its serializable summary used by the demo tools.

pub mod pipeline;
pub mod timing;
pub mod trace;

pub use pipeline::{CountOutput, CountReport, InputDescriptor};
pub use timing::{StageTiming, TimingBreakdown};
pub use trace::{Trace, TraceEntry, TraceEntrySummary, TraceImage};
