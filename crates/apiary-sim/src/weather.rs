//! The two-state storm process.
//!
//! NORMAL transitions to STORM with probability `p_storm · dt` per step; a
//! storm then runs for exactly `storm_duration_secs` of simulated time and
//! reverts.  No re-trigger draw happens while a storm is active, so
//! back-to-back storms require a fresh draw after the revert.  Bees read
//! the state through [`Weather::is_storm`]; only the scheduler's weather
//! phase mutates it.

use apiary_core::{SimRng, Tick};

/// Configuration of the storm process.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeatherParams {
    /// Storm-trigger rate per simulated second.
    pub p_storm: f64,
    /// How long each storm lasts, in simulated seconds.
    pub storm_duration_secs: f32,
}

impl Default for WeatherParams {
    fn default() -> Self {
        Self {
            p_storm: 0.005,
            storm_duration_secs: 20.0,
        }
    }
}

impl WeatherParams {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.p_storm >= 0.0 && self.p_storm.is_finite()) {
            return Err(format!("p_storm must be a finite non-negative rate, got {}", self.p_storm));
        }
        if !(self.storm_duration_secs > 0.0) {
            return Err(format!(
                "storm_duration_secs must be positive, got {}",
                self.storm_duration_secs
            ));
        }
        Ok(())
    }
}

/// The storm process itself.  One per world.
#[derive(Clone, Debug)]
pub struct Weather {
    params: WeatherParams,
    storm: bool,
    elapsed_secs: f32,
}

impl Weather {
    pub fn new(params: WeatherParams) -> Self {
        Self {
            params,
            storm: false,
            elapsed_secs: 0.0,
        }
    }

    #[inline]
    pub fn is_storm(&self) -> bool {
        self.storm
    }

    /// Seconds the current storm has been running; 0 in fair weather.
    #[inline]
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed_secs
    }

    /// Advance the process by one step.
    pub fn step(&mut self, dt: f32, rng: &mut SimRng, tick: Tick) {
        if self.storm {
            self.elapsed_secs += dt;
            if self.elapsed_secs >= self.params.storm_duration_secs {
                self.storm = false;
                self.elapsed_secs = 0.0;
                tracing::debug!(%tick, "storm passed");
            }
        } else if rng.gen_bool((self.params.p_storm * dt as f64).clamp(0.0, 1.0)) {
            self.storm = true;
            self.elapsed_secs = 0.0;
            tracing::debug!(%tick, duration = self.params.storm_duration_secs, "storm rolling in");
        }
    }
}
