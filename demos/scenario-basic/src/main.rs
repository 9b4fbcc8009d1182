//! scenario-basic — the baseline foraging run.
//!
//! One hive of 200 foragers in a 200 × 200 field, two depletable resource
//! patches 50 units out, occasional storms.  Writes per-step summaries and
//! periodic position snapshots to `output/scenario-basic/`, then prints the
//! colony's trajectory in broad strokes.
//!
//! Set `RUST_LOG=debug` to watch storms arrive and patches run dry.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use apiary_colony::{BeeState, HiveParams, PatchParams};
use apiary_core::RunConfig;
use apiary_output::{CsvWriter, SimOutputObserver};
use apiary_sim::{PatchPlacement, WeatherParams, WorldBuilder};

// ── Constants ─────────────────────────────────────────────────────────────────

const BEES: usize = 200;
const SEED: u64 = 42;
const TOTAL_STEPS: u64 = 20_000;
const SNAPSHOT_INTERVAL: u64 = 100;
const PATCH_DISTANCE: f32 = 50.0;

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== scenario-basic — apiary foraging simulation ===");
    println!("Bees: {BEES}  |  Steps: {TOTAL_STEPS}  |  Seed: {SEED}");
    println!();

    // 1. Configure the run.
    let run = RunConfig {
        dt_secs: 1.0,
        total_steps: TOTAL_STEPS,
        seed: SEED,
        snapshot_interval_steps: SNAPSHOT_INTERVAL,
    };

    // 2. Build the world: default 200-square field, centre hive.
    let mut world = WorldBuilder::new(run)
        .bees_per_hive(BEES)
        .hive_params(HiveParams {
            initial_nectar: 2.0,
            capacity: 50.0,
            initial_young: 50,
            ..HiveParams::default()
        })
        .patch_params(PatchParams {
            base_quantity: 100.0,
            replenish_rate: 0.001,
            ..PatchParams::default()
        })
        .placement(PatchPlacement::FixedDistance { count: 2, distance: PATCH_DISTANCE })
        .weather(WeatherParams { p_storm: 0.000_5, storm_duration_secs: 60.0 })
        .build()?;

    println!(
        "World: {:.0} × {:.0}, {} patches at distance {PATCH_DISTANCE}, hive at {}",
        world.bounds.width,
        world.bounds.height,
        world.live_patch_count(),
        world.hives[0].pos,
    );

    // 3. Set up CSV output.
    std::fs::create_dir_all("output/scenario-basic")?;
    let writer = CsvWriter::new(Path::new("output/scenario-basic"))?;
    let mut obs = SimOutputObserver::new(writer);

    // 4. Run.
    let t0 = Instant::now();
    world.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }

    // 5. Summary.
    println!();
    println!("Run complete in {:.3} s", elapsed.as_secs_f64());
    println!("  steps            : {}", world.step_count());
    println!("  bees alive       : {} (born {}, died {})", world.live_bee_count(), world.total_born(), world.total_died());
    println!("  hive stock       : {:.3} / {:.0}", world.total_nectar(), world.hives[0].capacity);
    println!("  nectar extracted : {:.3}", world.extracted_total());
    println!("  patches left     : {}", world.live_patch_count());
    println!("  mean perceived   : {:.3}", world.mean_perceived_nectar());
    println!();

    // 6. Final state census.
    let census = world.state_census();
    println!("{:<12} {:>6} {:>8}", "State", "Bees", "Share");
    println!("{}", "-".repeat(28));
    for state in BeeState::ALL {
        println!(
            "{:<12} {:>6} {:>7.1}%",
            state.as_str(),
            census.count(state),
            census.proportion(state) * 100.0
        );
    }

    println!();
    println!("Wrote output/scenario-basic/{{step_summaries,bee_snapshots}}.csv");
    Ok(())
}
