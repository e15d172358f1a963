//! Periodic engine activity.
//!
//! Runs [`ThermalEngine::step`] on a drift-free schedule: every deadline is
//! computed from the previous deadline, never from "now", so the average
//! period stays exact even when individual wakeups jitter. A late wakeup
//! is followed by catch-up ticks without sleeping, the usual delay-until
//! contract.

use std::thread;
use std::time::{Duration, Instant};

use crate::app::ports::StatusIndicator;
use crate::config::{Rgb, SimConfig};
use crate::state::{Mode, SharedState};

use super::ThermalEngine;

/// Owns one engine, its shared-state handle, and the status indicator.
/// Spawned onto a dedicated thread by the binary.
pub struct EngineRunner<I: StatusIndicator> {
    engine: ThermalEngine,
    shared: SharedState,
    indicator: I,
    period: Duration,
    colour_idle: Rgb,
    colour_heat: Rgb,
    colour_cool: Rgb,
}

impl<I: StatusIndicator> EngineRunner<I> {
    pub fn new(config: &SimConfig, shared: SharedState, indicator: I) -> Self {
        Self {
            engine: ThermalEngine::new(config.clone()),
            shared,
            indicator,
            period: Duration::from_secs_f64(f64::from(config.dt_secs())),
            colour_idle: config.colour_idle,
            colour_heat: config.colour_heat,
            colour_cool: config.colour_cool,
        }
    }

    /// Run the simulation forever. There is no cancellation: the activity
    /// lives for the process lifetime, exactly like the task it replaces.
    pub fn run(mut self) -> ! {
        // Show the idle preset immediately so the bench lamp is defined
        // before the first tick lands.
        self.indicator.set_colour(self.colour_idle);

        let mut deadline = Instant::now() + self.period;
        loop {
            let now = Instant::now();
            if deadline > now {
                thread::sleep(deadline - now);
            }
            deadline += self.period;

            self.tick();
        }
    }

    /// One scheduled tick: step the model under the state lock, then
    /// publish the indicator colour outside it.
    fn tick(&mut self) {
        let engine = &mut self.engine;
        let mode = self.shared.update(|state| {
            engine.step(state);
            engine.mode()
        });
        let colour = match mode {
            Mode::Idle => self.colour_idle,
            Mode::Heat => self.colour_heat,
            Mode::Cool => self.colour_cool,
        };
        self.indicator.set_colour(colour);
    }
}
