//! Plain data row types written by output backends.

use apiary_colony::BeeState;

/// Position and activity of one live bee at a snapshot step.  This is the
/// visualization boundary: an external renderer needs nothing else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeeSnapshotRow {
    pub bee_id: u32,
    pub step: u64,
    pub x: f32,
    pub y: f32,
    pub state: BeeState,
}

/// Colony-level metrics for one simulation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepSummaryRow {
    pub step: u64,
    /// Live bees after this step.
    pub bee_count: u64,
    /// Whether a storm was active at the end of the step.
    pub storm: bool,
    /// Per-state shares of the live population, in `BeeState::ALL` order.
    pub proportions: [f64; 6],
    /// Mean of all live bees' private nectar estimates.
    pub mean_perceived_nectar: f32,
    /// Combined stock of all live hives.
    pub total_nectar: f32,
    /// Cumulative nectar extracted since the start of the run.
    pub extracted_total: f32,
}
