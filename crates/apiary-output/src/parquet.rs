//! Parquet output backend (feature `parquet`).
//!
//! Creates two files in the configured output directory:
//! - `bee_snapshots.parquet`
//! - `step_summaries.parquet`

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{BooleanBuilder, Float32Builder, Float64Builder, StringBuilder, UInt32Builder, UInt64Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::OutputWriter;
use crate::{BeeSnapshotRow, OutputResult, StepSummaryRow};

fn snapshot_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("bee_id", DataType::UInt32, false),
        Field::new("step", DataType::UInt64, false),
        Field::new("x", DataType::Float32, false),
        Field::new("y", DataType::Float32, false),
        Field::new("state", DataType::Utf8, false),
    ]))
}

fn summary_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("step", DataType::UInt64, false),
        Field::new("bee_count", DataType::UInt64, false),
        Field::new("storm", DataType::Boolean, false),
        Field::new("resting", DataType::Float64, false),
        Field::new("returning", DataType::Float64, false),
        Field::new("exploring", DataType::Float64, false),
        Field::new("carrying", DataType::Float64, false),
        Field::new("dancing", DataType::Float64, false),
        Field::new("following", DataType::Float64, false),
        Field::new("mean_perceived_nectar", DataType::Float32, false),
        Field::new("total_nectar", DataType::Float32, false),
        Field::new("extracted_total", DataType::Float32, false),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// Writes run data to two Parquet files.
///
/// `finish()` **must** be called to write the Parquet file footer; files
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    snapshots: Option<ArrowWriter<File>>,
    summaries: Option<ArrowWriter<File>>,
    snap_schema: Arc<Schema>,
    summ_schema: Arc<Schema>,
}

impl ParquetWriter {
    /// Create both Parquet files in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let snap_schema = snapshot_schema();
        let summ_schema = summary_schema();

        let snap_file = File::create(dir.join("bee_snapshots.parquet"))?;
        let snapshots = ArrowWriter::try_new(snap_file, Arc::clone(&snap_schema), Some(snappy_props()))?;

        let summ_file = File::create(dir.join("step_summaries.parquet"))?;
        let summaries = ArrowWriter::try_new(summ_file, Arc::clone(&summ_schema), Some(snappy_props()))?;

        Ok(Self {
            snapshots: Some(snapshots),
            summaries: Some(summaries),
            snap_schema,
            summ_schema,
        })
    }
}

impl OutputWriter for ParquetWriter {
    fn write_snapshots(&mut self, rows: &[BeeSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.snapshots.as_mut() else {
            return Ok(());
        };

        let mut bee_ids = UInt32Builder::new();
        let mut steps = UInt64Builder::new();
        let mut xs = Float32Builder::new();
        let mut ys = Float32Builder::new();
        let mut states = StringBuilder::new();

        for row in rows {
            bee_ids.append_value(row.bee_id);
            steps.append_value(row.step);
            xs.append_value(row.x);
            ys.append_value(row.y);
            states.append_value(row.state.as_str());
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.snap_schema),
            vec![
                Arc::new(bee_ids.finish()),
                Arc::new(steps.finish()),
                Arc::new(xs.finish()),
                Arc::new(ys.finish()),
                Arc::new(states.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()> {
        let Some(writer) = self.summaries.as_mut() else {
            return Ok(());
        };

        let mut steps = UInt64Builder::new();
        let mut bee_counts = UInt64Builder::new();
        let mut storms = BooleanBuilder::new();
        let mut proportions: Vec<Float64Builder> = (0..6).map(|_| Float64Builder::new()).collect();
        let mut perceived = Float32Builder::new();
        let mut nectar = Float32Builder::new();
        let mut extracted = Float32Builder::new();

        steps.append_value(row.step);
        bee_counts.append_value(row.bee_count);
        storms.append_value(row.storm);
        for (builder, &p) in proportions.iter_mut().zip(row.proportions.iter()) {
            builder.append_value(p);
        }
        perceived.append_value(row.mean_perceived_nectar);
        nectar.append_value(row.total_nectar);
        extracted.append_value(row.extracted_total);

        let mut columns: Vec<arrow::array::ArrayRef> = vec![
            Arc::new(steps.finish()),
            Arc::new(bee_counts.finish()),
            Arc::new(storms.finish()),
        ];
        for mut builder in proportions {
            columns.push(Arc::new(builder.finish()));
        }
        columns.push(Arc::new(perceived.finish()));
        columns.push(Arc::new(nectar.finish()));
        columns.push(Arc::new(extracted.finish()));

        let batch = RecordBatch::try_new(Arc::clone(&self.summ_schema), columns)?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if let Some(w) = self.snapshots.take() {
            w.close()?;
        }
        if let Some(w) = self.summaries.take() {
            w.close()?;
        }
        Ok(())
    }
}
