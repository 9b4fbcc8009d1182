//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `bee_snapshots.csv`
//! - `step_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{BeeSnapshotRow, OutputResult, StepSummaryRow};

/// Writes run data to two CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("bee_snapshots.csv"))?;
        snapshots.write_record(["bee_id", "step", "x", "y", "state"])?;

        let mut summaries = Writer::from_path(dir.join("step_summaries.csv"))?;
        summaries.write_record([
            "step",
            "bee_count",
            "storm",
            "resting",
            "returning",
            "exploring",
            "carrying",
            "dancing",
            "following",
            "mean_perceived_nectar",
            "total_nectar",
            "extracted_total",
        ])?;

        Ok(Self {
            snapshots,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[BeeSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.bee_id.to_string(),
                row.step.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.state.as_str().to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()> {
        let mut record = vec![
            row.step.to_string(),
            row.bee_count.to_string(),
            (row.storm as u8).to_string(),
        ];
        record.extend(row.proportions.iter().map(|p| p.to_string()));
        record.push(row.mean_perceived_nectar.to_string());
        record.push(row.total_nectar.to_string());
        record.push(row.extracted_total.to_string());
        self.summaries.write_record(&record)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
