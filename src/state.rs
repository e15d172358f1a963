//! Shared process state — the single record both activities work against.
//!
//! The interpreter writes the two setpoints; the simulation engine writes
//! everything else (readings, actuator flags, mode, alarm). That field
//! ownership is enforced by the narrow [`SharedState`] API rather than by
//! convention: command handlers never see a `&mut ProcessState`, and the
//! engine mutates under exactly one short lock per tick.

use std::sync::{Arc, Mutex};

use crate::config::SimConfig;

/// Operating mode committed by the simulation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Heat,
    Cool,
}

/// Externally visible state code, rendered in `Q0` telemetry.
///
/// The engine only ever produces `Idle` and `Run`; `Stop` and `Fault` are
/// reserved codes kept so the rendering boundary matches every value the
/// protocol documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum StateCode {
    Idle = 0,
    Run = 1,
    Stop = 2,
    Fault = 3,
}

impl StateCode {
    /// Protocol name for the code, as it appears in the `STATE=` field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Run => "RUN",
            Self::Stop => "STOP",
            Self::Fault => "FAULT",
        }
    }
}

impl From<Mode> for StateCode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Idle => Self::Idle,
            Mode::Heat | Mode::Cool => Self::Run,
        }
    }
}

/// The chamber's live state: setpoints, readings, actuators, alarm.
///
/// `Copy` on purpose — `SharedState::snapshot` hands the whole record out
/// by value so rendering never holds the lock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessState {
    /// Commanded temperature, °C. Written only by the interpreter.
    pub temperature_setpoint_c: f32,
    /// Commanded relative humidity, %. Written only by the interpreter.
    pub humidity_setpoint_pct: f32,
    /// Simulated chamber temperature, °C.
    pub temperature_c: f32,
    /// Simulated relative humidity, %.
    pub humidity_pct: f32,
    /// Heater actuator flag. Mutually exclusive with `compressor_on`.
    pub heater_on: bool,
    /// Compressor (active cooling) actuator flag.
    pub compressor_on: bool,
    /// Committed engine mode.
    pub mode: Mode,
    /// Alarm flag. The bench model has no fault conditions, so the engine
    /// clears this every tick; it exists for protocol completeness.
    pub alarm: bool,
}

impl ProcessState {
    /// Initial state at power-on: chamber sits at ambient, setpoints at
    /// the bench defaults, everything off.
    pub fn new(config: &SimConfig) -> Self {
        Self {
            temperature_setpoint_c: config.default_temp_setpoint_c,
            humidity_setpoint_pct: config.default_rh_setpoint_pct,
            temperature_c: config.ambient_temp_c,
            humidity_pct: config.ambient_rh_pct,
            heater_on: false,
            compressor_on: false,
            mode: Mode::Idle,
            alarm: false,
        }
    }
}

/// Clone-able handle to the mutex-guarded [`ProcessState`].
///
/// Both activities hold a clone of this handle; every method takes the
/// lock for a handful of field accesses and releases it before returning.
#[derive(Clone)]
pub struct SharedState(Arc<Mutex<ProcessState>>);

impl SharedState {
    pub fn new(initial: ProcessState) -> Self {
        Self(Arc::new(Mutex::new(initial)))
    }

    /// Copy of the full record for rendering or inspection.
    pub fn snapshot(&self) -> ProcessState {
        *self.lock()
    }

    /// Interpreter-side write: temperature setpoint, °C.
    pub fn set_temperature_setpoint(&self, value_c: f32) {
        self.lock().temperature_setpoint_c = value_c;
    }

    /// Interpreter-side write: humidity setpoint, %.
    pub fn set_humidity_setpoint(&self, value_pct: f32) {
        self.lock().humidity_setpoint_pct = value_pct;
    }

    /// Engine-side access: run `f` with the state locked for one tick.
    pub fn update<R>(&self, f: impl FnOnce(&mut ProcessState) -> R) -> R {
        f(&mut self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ProcessState> {
        // A poisoned lock only means some holder panicked mid-update; the
        // state itself is a plain-old-data record and stays usable.
        self.0.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_sits_at_ambient() {
        let config = SimConfig::default();
        let s = ProcessState::new(&config);
        assert_eq!(s.temperature_c, config.ambient_temp_c);
        assert_eq!(s.humidity_pct, config.ambient_rh_pct);
        assert_eq!(s.mode, Mode::Idle);
        assert!(!s.heater_on && !s.compressor_on && !s.alarm);
    }

    #[test]
    fn setpoint_writers_touch_only_setpoints() {
        let shared = SharedState::new(ProcessState::new(&SimConfig::default()));
        let before = shared.snapshot();
        shared.set_temperature_setpoint(40.0);
        shared.set_humidity_setpoint(60.0);
        let after = shared.snapshot();
        assert_eq!(after.temperature_setpoint_c, 40.0);
        assert_eq!(after.humidity_setpoint_pct, 60.0);
        assert_eq!(after.temperature_c, before.temperature_c);
        assert_eq!(after.mode, before.mode);
    }

    #[test]
    fn state_code_names_are_exhaustive() {
        assert_eq!(StateCode::Idle.as_str(), "IDLE");
        assert_eq!(StateCode::Run.as_str(), "RUN");
        assert_eq!(StateCode::Stop.as_str(), "STOP");
        assert_eq!(StateCode::Fault.as_str(), "FAULT");
    }

    #[test]
    fn active_modes_map_to_run() {
        assert_eq!(StateCode::from(Mode::Idle), StateCode::Idle);
        assert_eq!(StateCode::from(Mode::Heat), StateCode::Run);
        assert_eq!(StateCode::from(Mode::Cool), StateCode::Run);
    }
}
