//! Bench simulator entry point.
//!
//! Protocol bytes flow over stdin/stdout so the binary can sit behind a
//! pty (`socat PTY,link=/tmp/chamber EXEC:bakesim`) and look exactly like
//! the chamber's serial port to a controller under test. Diagnostics go to
//! stderr via `env_logger` (`RUST_LOG=debug` for the firehose).

use std::io::Write;
use std::time::Duration;
use std::{io, thread};

use anyhow::{Context, Result};
use log::info;

use bakesim::adapters::{LogIndicator, StdioLink};
use bakesim::app::LineSession;
use bakesim::buildinfo::BuildInfo;
use bakesim::config::SimConfig;
use bakesim::engine::runner::EngineRunner;
use bakesim::state::{ProcessState, SharedState};
use bakesim::tcode::Interpreter;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let build = BuildInfo::current();
    info!("{} — bake chamber bench simulator", build.build);

    // ── 1. Configuration ──────────────────────────────────────
    let config = match std::env::args().nth(1) {
        Some(path) => load_config(&path).with_context(|| format!("loading config file {path}"))?,
        None => SimConfig::default(),
    };
    config.validate()?;
    info!(
        "chamber model: ambient {:.1} C, band ±{:.1} C, clamp [{:.1}, {:.1}] C, tick {} ms",
        config.ambient_temp_c,
        config.temp_hysteresis_c,
        config.min_temp_c,
        config.max_temp_c,
        u64::from(config.update_period_ticks) * 1000 / u64::from(config.tick_rate_hz),
    );

    // ── 2. Shared state + engine activity ─────────────────────
    let shared = SharedState::new(ProcessState::new(&config));
    let runner = EngineRunner::new(&config, shared.clone(), LogIndicator::new());
    thread::Builder::new()
        .name("sim-engine".into())
        .spawn(move || runner.run())
        .context("spawning engine thread")?;

    // ── 3. Optional liveness heartbeat ────────────────────────
    if config.heartbeat_period_secs > 0 {
        let period = Duration::from_secs(config.heartbeat_period_secs);
        thread::Builder::new()
            .name("heartbeat".into())
            .spawn(move || {
                loop {
                    thread::sleep(period);
                    let mut out = io::stdout();
                    let _ = writeln!(out, ".");
                    let _ = out.flush();
                }
            })
            .context("spawning heartbeat thread")?;
    }

    // ── 4. Serial session (main thread, until the peer hangs up)
    let link = StdioLink::new().context("attaching stdin/stdout link")?;
    let interpreter = Interpreter::new(shared, build);
    let mut session = LineSession::new(link, interpreter, config.enable_echo);
    session.run();

    info!("peer disconnected — shutting down");
    Ok(())
}

fn load_config(path: &str) -> Result<SimConfig> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
