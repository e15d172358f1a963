//! Command interpreter: runs a parsed token list against the process state.
//!
//! The grammar is consumed positionally, left to right, through a small
//! cursor — an optional `N<digits>` line number, then exactly one command
//! group. A line never matches more than one group: tokens trailing a
//! setpoint command are never re-examined as M or Q commands.
//!
//! Semantic failures (bad zone, out-of-range value, unknown key, …) each
//! produce one descriptive reply line and leave the state untouched.
//! Interpretation is best-effort and never aborts the serial session; the
//! caller still acknowledges the line afterwards.

use log::{debug, info};

use crate::app::ports::ResponseSink;
use crate::buildinfo::BuildInfo;
use crate::state::{SharedState, StateCode};

use super::parser::ParsedLine;

/// Accepted temperature setpoint range, °C (inclusive).
pub const TEMP_SETPOINT_RANGE: core::ops::RangeInclusive<i32> = -45..=90;
/// Accepted humidity setpoint range, % (inclusive).
pub const RH_SETPOINT_RANGE: core::ops::RangeInclusive<i32> = 0..=100;

/// Positional cursor over the token list. Never backtracks.
struct Cursor<'l, 'a> {
    tokens: &'l [&'a str],
    index: usize,
}

impl<'l, 'a> Cursor<'l, 'a> {
    fn new(tokens: &'l [&'a str]) -> Self {
        Self { tokens, index: 0 }
    }

    fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.index).copied()
    }

    fn next(&mut self) -> Option<&'a str> {
        let token = self.peek()?;
        self.index += 1;
        Some(token)
    }
}

/// Interprets TCODE command lines against the shared chamber state.
pub struct Interpreter {
    state: SharedState,
    build: BuildInfo,
}

impl Interpreter {
    pub fn new(state: SharedState, build: BuildInfo) -> Self {
        Self { state, build }
    }

    /// Run one parsed line, writing any reply lines to `out`.
    pub fn interpret(&self, line: &ParsedLine<'_>, out: &mut impl ResponseSink) {
        let mut cursor = Cursor::new(line.tokens());

        if let Some(token) = cursor.peek() {
            if let Some(number) = line_number(token) {
                // Accepted and discarded; nothing consumes line numbers yet.
                debug!("line number {number}");
                cursor.next();
            }
        }

        let Some(command) = cursor.peek() else {
            // The line held only a line number — a no-op, still acked.
            return;
        };

        match command.chars().next() {
            Some('Z' | 'T' | 'H') => self.setpoint(&mut cursor, out),
            Some('M') => self.machine(&mut cursor, out),
            Some('Q') => self.query(&mut cursor, out),
            _ => out.line(&format!("Error: unknown command {command}")),
        }
    }

    /// `T<v>` / `H<v>`, optionally preceded by an explicit `Z<zone>` token.
    ///
    /// Checks run in a fixed order: token shape first, then zone support,
    /// then value range. The first failure reports and stops.
    fn setpoint(&self, cursor: &mut Cursor<'_, '_>, out: &mut impl ResponseSink) {
        let Some(command) = cursor.next() else { return };

        let (zone, target) = if let Some(zone_digits) = command.strip_prefix('Z') {
            if zone_digits.is_empty() {
                out.line("Error: expected Z0 T15");
                return;
            }
            let Some(zone) = parse_unsigned(zone_digits) else {
                out.line("Error: bad zone");
                return;
            };
            let Some(target) = cursor.next() else {
                out.line("Error: expected T/H after Z");
                return;
            };
            (zone, target)
        } else {
            // Bare T/H token is implicitly zone 0.
            (0, command)
        };

        let mut chars = target.chars();
        let kind = chars.next();
        let value_str = chars.as_str();
        if !matches!(kind, Some('T' | 'H')) || value_str.is_empty() {
            out.line("Error: bad setpoint");
            return;
        }
        if zone != 0 {
            out.line("Error: zone not supported");
            return;
        }
        let Ok(value) = value_str.parse::<i32>() else {
            out.line("Error: bad setpoint");
            return;
        };

        match kind {
            Some('T') => {
                if TEMP_SETPOINT_RANGE.contains(&value) {
                    self.state.set_temperature_setpoint(value as f32);
                    info!("temperature setpoint -> {value} C");
                } else {
                    out.line("Error: temp out of range");
                }
            }
            Some('H') => {
                if RH_SETPOINT_RANGE.contains(&value) {
                    self.state.set_humidity_setpoint(value as f32);
                    info!("humidity setpoint -> {value} %");
                } else {
                    out.line("Error: humidity out of range");
                }
            }
            _ => unreachable!("kind checked above"),
        }
    }

    /// `M<value>` or `M <value>` — the argument is acknowledged verbatim;
    /// no machine commands are defined at this layer.
    fn machine(&self, cursor: &mut Cursor<'_, '_>, out: &mut impl ResponseSink) {
        let Some(command) = cursor.next() else { return };
        let argument = match command.strip_prefix('M') {
            Some("") => cursor.next(),
            Some(rest) => Some(rest),
            None => None,
        };
        match argument {
            Some(arg) => out.line(&format!("Machine command: {arg}")),
            None => out.line("Error: Missing M command argument"),
        }
    }

    /// `Q<digits>` — the query number must be appended to the `Q`.
    fn query(&self, cursor: &mut Cursor<'_, '_>, out: &mut impl ResponseSink) {
        let Some(command) = cursor.next() else { return };
        let argument = command.strip_prefix('Q').unwrap_or("");

        if argument.is_empty() || !argument.bytes().all(|b| b.is_ascii_digit()) {
            let shown = if argument.is_empty() { "(missing)" } else { argument };
            out.line(&format!("Error: {shown} not a valid query command"));
            return;
        }

        match argument {
            "0" => self.report_status(out),
            "1" => self.report_build_info(cursor.next(), out),
            other => out.line(&format!("Error: {other} not a valid query command")),
        }
    }

    /// `Q0`: one telemetry line with the full chamber snapshot.
    fn report_status(&self, out: &mut impl ResponseSink) {
        let s = self.state.snapshot();
        out.line(&format!(
            "data: TEMP={:.1} RH={:.1} HEAT={} COOL={} STATE={} SET_TEMP={:.1} SET_RH={:.1} ALARM={}",
            s.temperature_c,
            s.humidity_pct,
            s.heater_on,
            s.compressor_on,
            StateCode::from(s.mode).as_str(),
            s.temperature_setpoint_c,
            s.humidity_setpoint_pct,
            u8::from(s.alarm),
        ));
    }

    /// `Q1 <KEY>`: build metadata lookup.
    fn report_build_info(&self, key: Option<&str>, out: &mut impl ResponseSink) {
        let Some(key) = key else {
            out.line("Error: expected key after Q1");
            return;
        };
        let value = match key {
            "BUILD" => self.build.build,
            "BUILDER" => self.build.builder,
            "BUILD_DATE" => self.build.build_date,
            unknown => {
                out.line(&format!("error:UNKNOWN_KEY {unknown}"));
                return;
            }
        };
        out.line(&format!("data: {key}={value}"));
    }
}

/// `N` followed by one or more digits. A bare `N` is not a line number.
fn line_number(token: &str) -> Option<u32> {
    let digits = token.strip_prefix('N')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Saturate absurd values instead of rejecting the line over them.
    Some(digits.parse::<u32>().unwrap_or(u32::MAX))
}

/// All-digits zone string, rejecting anything that does not fit `u32`.
fn parse_unsigned(digits: &str) -> Option<u32> {
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u32>().ok()
}
