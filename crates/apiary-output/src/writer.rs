//! The `OutputWriter` trait implemented by all backend writers.

use crate::{BeeSnapshotRow, OutputResult, StepSummaryRow};

/// Trait implemented by CSV, SQLite, and Parquet writers.
///
/// Errors never reach the simulation loop — [`SimOutputObserver`]
/// [`crate::SimOutputObserver`] stores the first failure internally and hands
/// it back after the run via `take_error`.
pub trait OutputWriter {
    /// Write a batch of per-bee snapshot rows.
    fn write_snapshots(&mut self, rows: &[BeeSnapshotRow]) -> OutputResult<()>;

    /// Write one step-summary row.
    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
