//! End-to-end bench scenarios: a scripted controller session against the
//! full parser → interpreter → state → engine stack.
//!
//! The engine is stepped manually between commands so each scenario is
//! deterministic — one step equals one 100 ms update period of simulated
//! time.

use std::collections::VecDeque;

use bakesim::app::LineSession;
use bakesim::app::ports::{LinkPoll, SerialLink};
use bakesim::buildinfo::BuildInfo;
use bakesim::config::SimConfig;
use bakesim::engine::ThermalEngine;
use bakesim::state::{ProcessState, SharedState};
use bakesim::tcode::{Interpreter, xor_checksum};

// ── Recording bench link ──────────────────────────────────────

struct BenchLink {
    input: VecDeque<u8>,
    lines: Vec<String>,
}

impl BenchLink {
    fn new() -> Self {
        Self {
            input: VecDeque::new(),
            lines: Vec::new(),
        }
    }
}

impl SerialLink for BenchLink {
    fn poll_byte(&mut self) -> LinkPoll {
        match self.input.pop_front() {
            Some(byte) => LinkPoll::Byte(byte),
            None => LinkPoll::Closed,
        }
    }

    fn write_byte(&mut self, _byte: u8) {}

    fn write_line(&mut self, line: &str) {
        self.lines.push(line.to_owned());
    }
}

// ── Bench rig: session + manually stepped engine ──────────────

struct Bench {
    session: LineSession<BenchLink>,
    engine: ThermalEngine,
    shared: SharedState,
}

impl Bench {
    fn new(config: SimConfig) -> Self {
        let shared = SharedState::new(ProcessState::new(&config));
        let interpreter = Interpreter::new(shared.clone(), BuildInfo::current());
        Self {
            session: LineSession::new(BenchLink::new(), interpreter, false),
            engine: ThermalEngine::new(config),
            shared,
        }
    }

    /// Send one line (terminator added) and return the replies it drew.
    fn send(&mut self, line: &str) -> Vec<String> {
        for byte in line.bytes() {
            self.session.accept_byte(byte);
        }
        self.session.accept_byte(b'\n');
        // accept_byte writes straight through; drain what accumulated.
        std::mem::take(&mut link_of(&mut self.session).lines)
    }

    fn step_engine(&mut self, steps: usize) {
        let engine = &mut self.engine;
        for _ in 0..steps {
            self.shared.update(|state| engine.step(state));
        }
    }

    fn temperature(&self) -> f32 {
        self.shared.snapshot().temperature_c
    }
}

fn link_of<L: SerialLink>(session: &mut LineSession<L>) -> &mut L {
    session.link_mut()
}

// ── Scenarios ─────────────────────────────────────────────────

/// Bake-oven shape: no compressor, instant relay switching.
fn oven_config() -> SimConfig {
    SimConfig {
        enable_active_cooling: false,
        heat_on_delay_ticks: 0,
        heat_off_delay_ticks: 0,
        cool_on_delay_ticks: 0,
        cool_off_delay_ticks: 0,
        ..SimConfig::default()
    }
}

#[test]
fn bake_cycle_heats_to_setpoint_and_settles() {
    let mut bench = Bench::new(oven_config());

    assert_eq!(xor_checksum("T40"), 0x50);
    assert_eq!(bench.send("T40*50"), ["ok"]);

    // One second of simulated time: the heater must be on and ramping.
    bench.step_engine(10);
    let status = bench.send("Q0");
    assert_eq!(status.len(), 2);
    assert!(status[0].contains("HEAT=true"));
    assert!(status[0].contains("COOL=false"));
    assert!(status[0].contains("STATE=RUN"));
    assert!(status[0].contains("SET_TEMP=40.0"));
    assert_eq!(status[1], "ok");
    assert!(bench.temperature() > 22.0);

    // Ride the ramp until the heater shuts off past the top of the band.
    bench.step_engine(650);
    let status = bench.send("Q0");
    assert!(status[0].contains("HEAT=false"));
    assert!(status[0].contains("STATE=IDLE"));
    assert!(bench.temperature() > 40.0);
}

#[test]
fn chilled_cycle_engages_the_compressor() {
    let config = SimConfig {
        heat_on_delay_ticks: 0,
        heat_off_delay_ticks: 0,
        cool_on_delay_ticks: 0,
        cool_off_delay_ticks: 0,
        ..SimConfig::default()
    };
    let mut bench = Bench::new(config);

    assert_eq!(bench.send("T5"), ["ok"]);
    bench.step_engine(10);
    let status = bench.send("Q0");
    assert!(status[0].contains("COOL=true"));
    assert!(status[0].contains("HEAT=false"));
    assert!(status[0].contains("STATE=RUN"));
    assert!(bench.temperature() < 22.0);
}

#[test]
fn humidity_tracks_the_cooling_chamber() {
    let config = SimConfig {
        heat_on_delay_ticks: 0,
        heat_off_delay_ticks: 0,
        cool_on_delay_ticks: 0,
        cool_off_delay_ticks: 0,
        ..SimConfig::default()
    };
    let mut bench = Bench::new(config);

    assert_eq!(bench.send("T-20"), ["ok"]);
    // Cool from 22 °C down past the 0 °C clamp floor (~55 s + margin).
    bench.step_engine(700);
    let status = bench.send("Q0");
    assert!(status[0].contains("TEMP=0.0"), "{status:?}");
    assert!(status[0].contains("RH=100.0"), "{status:?}");
}

#[test]
fn setpoint_change_mid_run_is_acked_while_engine_holds_state() {
    let mut bench = Bench::new(oven_config());

    assert_eq!(bench.send("N1 T60"), ["ok"]);
    bench.step_engine(5);
    assert_eq!(bench.send("N2 T30"), ["ok"]);
    assert_eq!(bench.shared.snapshot().temperature_setpoint_c, 30.0);

    // The engine keeps running on the new target without a restart.
    bench.step_engine(5);
    assert!(bench.shared.snapshot().heater_on);
}

#[test]
fn rejected_commands_leave_the_run_untouched() {
    let mut bench = Bench::new(oven_config());

    assert_eq!(bench.send("T40"), ["ok"]);
    bench.step_engine(10);

    assert_eq!(bench.send("Z2 T90"), ["Error: zone not supported", "ok"]);
    assert_eq!(bench.send("T999"), ["Error: temp out of range", "ok"]);
    assert_eq!(
        bench.send("T40*00"),
        ["ERROR: Wrong checksum! (got 50, expected 00)"]
    );
    assert_eq!(bench.shared.snapshot().temperature_setpoint_c, 40.0);
}

#[test]
fn build_metadata_round_trip() {
    let mut bench = Bench::new(oven_config());
    let build = BuildInfo::current();

    assert_eq!(
        bench.send("Q1 BUILD"),
        [format!("data: BUILD={}", build.build), "ok".to_owned()]
    );
    assert_eq!(
        bench.send("Q1 NOPE"),
        ["error:UNKNOWN_KEY NOPE".to_owned(), "ok".to_owned()]
    );
}

#[test]
fn machine_commands_pass_through_with_ack() {
    let mut bench = Bench::new(oven_config());
    assert_eq!(
        bench.send("M G28"),
        ["Machine command: G28".to_owned(), "ok".to_owned()]
    );
}
