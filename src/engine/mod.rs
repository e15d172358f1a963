//! Thermal simulation engine.
//!
//! A fixed-period state machine over three modes (Idle / Heat / Cool) with
//! two wrinkles that make the simulated chamber behave like the real one:
//!
//! - **Delayed transitions** — a desired mode change is scheduled, not
//!   applied; it commits only once the tick counter reaches a deadline
//!   derived from the per-edge delay (relay and compressor spin-up times).
//!   While one transition is pending, no new one is scheduled.
//! - **Cooling rest** — once active cooling overshoots down to half a
//!   hysteresis band below the setpoint, cooling is suspended until passive
//!   drift brings the chamber back up half a band *above* the setpoint.
//!   Without this the compressor would short-cycle around the band edge.
//!
//! Temperature moves on linear ramps; humidity is not independent state but
//! a deterministic log-curve function of temperature. All timing is in
//! ticks of the configured time base, so every behaviour here is exactly
//! reproducible in tests without a clock.

pub mod runner;

use log::{debug, info};

use crate::config::SimConfig;
use crate::state::{Mode, ProcessState};

/// Tick counter type. Wraps; comparisons go through [`tick_reached`].
pub type Tick = u32;

/// A scheduled mode change. At most one exists at a time.
#[derive(Debug, Clone, Copy)]
struct PendingTransition {
    target: Mode,
    deadline: Tick,
}

/// Wrap-safe "now >= target" on the tick counter.
fn tick_reached(now: Tick, target: Tick) -> bool {
    now.wrapping_sub(target) < 0x8000_0000
}

/// Relative humidity as a pure function of temperature.
///
/// Anchored at (0 °C, 100 %) and (20 °C, 50 %), following
/// `100 − (50 / ln 21) · ln(t + 1)` between the anchors and constant
/// outside them.
pub fn humidity_for(temp_c: f32) -> f32 {
    const MIN_RH: f32 = 50.0;
    const MAX_RH: f32 = 100.0;
    const T_CUTOFF: f32 = 20.0;

    if temp_c <= 0.0 {
        return MAX_RH;
    }
    if temp_c >= T_CUTOFF {
        return MIN_RH;
    }
    let factor = (MAX_RH - MIN_RH) / (T_CUTOFF + 1.0).ln();
    (MAX_RH - factor * (temp_c + 1.0).ln()).clamp(MIN_RH, MAX_RH)
}

/// The chamber model. Owns mode, pending transition, and the tick clock;
/// reads setpoints from and writes readings/actuators to [`ProcessState`].
pub struct ThermalEngine {
    config: SimConfig,
    dt_secs: f32,
    mode: Mode,
    pending: Option<PendingTransition>,
    cooling_rest: bool,
    now: Tick,
}

impl ThermalEngine {
    pub fn new(config: SimConfig) -> Self {
        let dt_secs = config.dt_secs();
        Self {
            config,
            dt_secs,
            mode: Mode::Idle,
            pending: None,
            cooling_rest: false,
            now: 0,
        }
    }

    /// Currently committed mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Advance the simulation by one update period.
    pub fn step(&mut self, state: &mut ProcessState) {
        self.now = self.now.wrapping_add(self.config.update_period_ticks);

        let sp = state.temperature_setpoint_c;
        let t = state.temperature_c;
        let h = self.config.temp_hysteresis_c;

        // Cooling undershoot latch: rest below sp - h/2, resume above sp + h/2.
        if self.mode == Mode::Cool && t <= sp - h / 2.0 {
            self.cooling_rest = true;
        }
        if self.cooling_rest && t >= sp + h / 2.0 {
            self.cooling_rest = false;
        }

        let want = if self.cooling_rest {
            Mode::Idle
        } else {
            self.desired_mode(t, sp)
        };

        // An in-flight transition is never preempted; a changed desire
        // waits until the pending one resolves.
        if self.pending.is_none() && want != self.mode {
            let delay = self.transition_delay(self.mode, want);
            self.pending = Some(PendingTransition {
                target: want,
                deadline: self.now.wrapping_add(delay),
            });
            debug!("transition {:?} -> {want:?} in {delay} ticks", self.mode);
        }
        if let Some(pending) = self.pending {
            if tick_reached(self.now, pending.deadline) {
                info!("mode {:?} -> {:?}", self.mode, pending.target);
                self.mode = pending.target;
                self.pending = None;
            }
        }

        state.heater_on = self.mode == Mode::Heat;
        state.compressor_on = self.mode == Mode::Cool;
        state.mode = self.mode;
        state.alarm = false;

        let mut next_t = t;
        match self.mode {
            Mode::Heat => next_t += self.config.heat_ramp_c_per_s * self.dt_secs,
            Mode::Cool => next_t -= self.config.cool_ramp_c_per_s * self.dt_secs,
            Mode::Idle => {
                // Drift toward ambient, clamped so it cannot overshoot.
                let ambient = self.config.ambient_temp_c;
                let step = self.config.passive_ramp_c_per_s * self.dt_secs;
                if next_t < ambient {
                    next_t = (next_t + step).min(ambient);
                } else if next_t > ambient {
                    next_t = (next_t - step).max(ambient);
                }
            }
        }
        state.temperature_c = next_t.clamp(self.config.min_temp_c, self.config.max_temp_c);
        state.humidity_pct = humidity_for(state.temperature_c);

        debug_assert!(!(state.heater_on && state.compressor_on));
    }

    /// Bang-bang mode selection around the hysteresis band.
    fn desired_mode(&self, t: f32, sp: f32) -> Mode {
        let h = self.config.temp_hysteresis_c;
        if t < sp - h {
            return Mode::Heat;
        }
        if self.config.enable_active_cooling && t > sp + h {
            return Mode::Cool;
        }
        if (sp - h..=sp + h).contains(&t) {
            return self.mode;
        }
        Mode::Idle
    }

    /// Delay for a mode edge. Entering Heat/Cool uses the on-delay of the
    /// target; returning to Idle uses the off-delay of the departing mode.
    fn transition_delay(&self, from: Mode, to: Mode) -> Tick {
        match (from, to) {
            (_, Mode::Heat) => self.config.heat_on_delay_ticks,
            (_, Mode::Cool) => self.config.cool_on_delay_ticks,
            (Mode::Heat, Mode::Idle) => self.config.heat_off_delay_ticks,
            (Mode::Cool, Mode::Idle) => self.config.cool_off_delay_ticks,
            (Mode::Idle, Mode::Idle) => 0,
        }
    }
}
