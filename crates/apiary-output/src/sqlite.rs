//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `run.db` file in the configured output directory with
//! two tables: `bee_snapshots` and `step_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{BeeSnapshotRow, OutputResult, StepSummaryRow};

/// Writes run data to an SQLite database.
pub struct SqliteWriter {
    conn: Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `run.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("run.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS bee_snapshots (
                 bee_id INTEGER NOT NULL,
                 step   INTEGER NOT NULL,
                 x      REAL    NOT NULL,
                 y      REAL    NOT NULL,
                 state  TEXT    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS step_summaries (
                 step                  INTEGER PRIMARY KEY,
                 bee_count             INTEGER NOT NULL,
                 storm                 INTEGER NOT NULL,
                 resting               REAL    NOT NULL,
                 returning             REAL    NOT NULL,
                 exploring             REAL    NOT NULL,
                 carrying              REAL    NOT NULL,
                 dancing               REAL    NOT NULL,
                 following             REAL    NOT NULL,
                 mean_perceived_nectar REAL    NOT NULL,
                 total_nectar          REAL    NOT NULL,
                 extracted_total       REAL    NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_snapshots(&mut self, rows: &[BeeSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO bee_snapshots (bee_id, step, x, y, state) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.bee_id,
                    row.step,
                    row.x as f64,
                    row.y as f64,
                    row.state.as_str(),
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO step_summaries \
             (step, bee_count, storm, resting, returning, exploring, carrying, \
              dancing, following, mean_perceived_nectar, total_nectar, extracted_total) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            rusqlite::params![
                row.step,
                row.bee_count,
                row.storm as i64,
                row.proportions[0],
                row.proportions[1],
                row.proportions[2],
                row.proportions[3],
                row.proportions[4],
                row.proportions[5],
                row.mean_perceived_nectar as f64,
                row.total_nectar as f64,
                row.extracted_total as f64,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
