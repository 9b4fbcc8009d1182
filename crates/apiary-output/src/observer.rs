//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use apiary_core::Tick;
use apiary_sim::{SimObserver, World};

use crate::row::{BeeSnapshotRow, StepSummaryRow};
use crate::writer::OutputWriter;
use crate::OutputError;

/// A [`SimObserver`] that writes step summaries and bee snapshots to any
/// [`OutputWriter`] backend (CSV, SQLite, Parquet, …).
///
/// Errors from the writer are stored internally because `SimObserver`
/// methods have no return value.  After `world.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer: W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after the run completes.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_step_end(&mut self, tick: Tick, world: &World) {
        let census = world.state_census();
        let row = StepSummaryRow {
            step: tick.0,
            bee_count: world.live_bee_count() as u64,
            storm: world.is_storm(),
            proportions: census.proportions(),
            mean_perceived_nectar: world.mean_perceived_nectar(),
            total_nectar: world.total_nectar(),
            extracted_total: world.extracted_total(),
        };
        let result = self.writer.write_step_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, world: &World) {
        let rows: Vec<BeeSnapshotRow> = world
            .bees
            .live_ids()
            .map(|bee| {
                let i = bee.index();
                let pos = world.bees.pos[i];
                BeeSnapshotRow {
                    bee_id: bee.0,
                    step: tick.0,
                    x: pos.x,
                    y: pos.y,
                    state: world.bees.state[i],
                }
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_run_end(&mut self, _final_tick: Tick, _world: &World) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
