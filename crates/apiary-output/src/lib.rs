//! `apiary-output` — run-data writers for the apiary simulation.
//!
//! Three backends are provided behind Cargo features:
//!
//! | Feature   | Backend | Files created                                      |
//! |-----------|---------|----------------------------------------------------|
//! | *(none)*  | CSV     | `bee_snapshots.csv`, `step_summaries.csv`          |
//! | `sqlite`  | SQLite  | `run.db`                                           |
//! | `parquet` | Parquet | `bee_snapshots.parquet`, `step_summaries.parquet`  |
//!
//! All backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `apiary_sim::SimObserver` and
//! pulls everything it records through the world's read-only metrics
//! accessors — no simulation state is touched.
//!
//! # Usage
//!
//! ```rust,ignore
//! use apiary_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! world.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "parquet")]
pub mod parquet;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{BeeSnapshotRow, StepSummaryRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;

#[cfg(feature = "parquet")]
pub use parquet::ParquetWriter;
