//! Fuzz target: TCODE command interpreter.
//!
//! Runs arbitrary parsed lines through the interpreter and verifies:
//! - No panics for any token soup
//! - Setpoints in the shared state stay inside their documented ranges
//!
//! cargo fuzz run fuzz_interpreter

#![no_main]

use bakesim::app::ports::ResponseSink;
use bakesim::buildinfo::BuildInfo;
use bakesim::config::SimConfig;
use bakesim::state::{ProcessState, SharedState};
use bakesim::tcode::{self, Interpreter};
use libfuzzer_sys::fuzz_target;

struct NullSink;

impl ResponseSink for NullSink {
    fn line(&mut self, _line: &str) {}
}

fuzz_target!(|data: &[u8]| {
    let Ok(line) = core::str::from_utf8(data) else {
        return;
    };
    let Ok(parsed) = tcode::parse(line) else {
        return;
    };

    let state = SharedState::new(ProcessState::new(&SimConfig::default()));
    let interpreter = Interpreter::new(state.clone(), BuildInfo::current());
    interpreter.interpret(&parsed, &mut NullSink);

    let snapshot = state.snapshot();
    assert!((-45.0..=90.0).contains(&snapshot.temperature_setpoint_c));
    assert!((0.0..=100.0).contains(&snapshot.humidity_setpoint_pct));
});
