//! Bench simulator configuration.
//!
//! All tunable parameters for the simulated chamber and the serial front
//! end. Defaults reproduce the reference bench rig; any subset can be
//! overridden from a JSON file passed on the command line.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// RGB colour preset for the status indicator.
pub type Rgb = (u8, u8, u8);

/// Core simulator configuration.
///
/// Delay and period fields are expressed in ticks of the scheduler time
/// base (`tick_rate_hz`, 1 kHz by default), matching how the transition
/// delays behave on the wire: a 500-tick heat-on delay holds a pending
/// Heat transition for 500 ms.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // --- Chamber model ---
    /// Temperature the chamber drifts toward when idle (°C).
    pub ambient_temp_c: f32,
    /// Relative humidity reported before the first engine tick (%).
    pub ambient_rh_pct: f32,
    /// Temperature rise rate while the heater is on (°C/s).
    pub heat_ramp_c_per_s: f32,
    /// Temperature fall rate while the compressor is on (°C/s).
    pub cool_ramp_c_per_s: f32,
    /// Drift rate toward ambient while idle (°C/s).
    pub passive_ramp_c_per_s: f32,
    /// Half-width of the bang-bang hysteresis band around the setpoint (°C).
    pub temp_hysteresis_c: f32,
    /// Hard floor for the simulated temperature (°C).
    pub min_temp_c: f32,
    /// Hard ceiling for the simulated temperature (°C).
    pub max_temp_c: f32,
    /// Whether the chamber has a compressor at all.
    pub enable_active_cooling: bool,

    // --- Setpoint defaults at power-on ---
    pub default_temp_setpoint_c: f32,
    pub default_rh_setpoint_pct: f32,

    // --- Transition delays (time-base ticks) ---
    pub heat_on_delay_ticks: u32,
    pub heat_off_delay_ticks: u32,
    pub cool_on_delay_ticks: u32,
    pub cool_off_delay_ticks: u32,

    // --- Timing ---
    /// Engine update period, in time-base ticks.
    pub update_period_ticks: u32,
    /// Scheduler time base (ticks per second).
    pub tick_rate_hz: u32,

    // --- Serial front end ---
    /// Echo every received byte back over the link.
    pub enable_echo: bool,
    /// Liveness marker period in seconds; 0 disables it. The marker
    /// interleaves with protocol replies on the same stream, so it is off
    /// unless a human is watching the port.
    pub heartbeat_period_secs: u64,

    // --- Status indicator presets ---
    pub colour_idle: Rgb,
    pub colour_heat: Rgb,
    pub colour_cool: Rgb,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ambient_temp_c: 22.0,
            ambient_rh_pct: 45.0,
            heat_ramp_c_per_s: 0.30,
            cool_ramp_c_per_s: 0.40,
            passive_ramp_c_per_s: 0.05,
            temp_hysteresis_c: 0.5,
            min_temp_c: 0.0,
            max_temp_c: 80.0,
            enable_active_cooling: true,

            default_temp_setpoint_c: 22.0,
            default_rh_setpoint_pct: 45.0,

            heat_on_delay_ticks: 500,
            heat_off_delay_ticks: 500,
            cool_on_delay_ticks: 500,
            cool_off_delay_ticks: 500,

            update_period_ticks: 100,
            tick_rate_hz: 1000,

            enable_echo: false,
            heartbeat_period_secs: 0,

            colour_idle: (2, 2, 2),
            colour_heat: (16, 2, 0),
            colour_cool: (0, 2, 16),
        }
    }
}

impl SimConfig {
    /// Seconds of simulated time per engine tick.
    pub fn dt_secs(&self) -> f32 {
        self.update_period_ticks as f32 / self.tick_rate_hz as f32
    }

    /// Reject configurations the engine cannot run on. Invalid values are
    /// refused outright rather than clamped, so a bad config file cannot
    /// silently change the bench behaviour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.update_period_ticks == 0 {
            return Err(ConfigError("update_period_ticks must be > 0"));
        }
        if self.tick_rate_hz == 0 {
            return Err(ConfigError("tick_rate_hz must be > 0"));
        }
        if !(self.min_temp_c < self.max_temp_c) {
            return Err(ConfigError("min_temp_c must be below max_temp_c"));
        }
        if !(self.temp_hysteresis_c > 0.0) {
            return Err(ConfigError("temp_hysteresis_c must be > 0"));
        }
        for (value, name) in [
            (self.heat_ramp_c_per_s, "heat_ramp_c_per_s must be >= 0"),
            (self.cool_ramp_c_per_s, "cool_ramp_c_per_s must be >= 0"),
            (self.passive_ramp_c_per_s, "passive_ramp_c_per_s must be >= 0"),
        ] {
            if !(value >= 0.0) {
                return Err(ConfigError(name));
            }
        }
        if !self.ambient_temp_c.is_finite() || !self.ambient_rh_pct.is_finite() {
            return Err(ConfigError("ambient values must be finite"));
        }
        Ok(())
    }
}
