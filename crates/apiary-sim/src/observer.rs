//! Simulation observer trait for progress reporting and data collection.

use apiary_core::Tick;

use crate::World;

/// Callbacks invoked by [`World::run`] at key points in the step loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  The `&World` handed to each hook is
/// the post-step state; read it through the metrics accessors.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_step_end(&mut self, tick: Tick, world: &World) {
///         if tick.0 % self.interval == 0 {
///             println!("{tick}: {} bees, {:.2} nectar", world.live_bee_count(), world.total_nectar());
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each step, before any phase runs.
    fn on_step_start(&mut self, _tick: Tick) {}

    /// Called after the weather phase completes each step.
    fn on_step_end(&mut self, _tick: Tick, _world: &World) {}

    /// Called at snapshot intervals (every `run.snapshot_interval_steps`
    /// steps), for writers that record per-bee positions and states.
    fn on_snapshot(&mut self, _tick: Tick, _world: &World) {}

    /// Called once after the final step completes.
    fn on_run_end(&mut self, _final_tick: Tick, _world: &World) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run`
/// but don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
