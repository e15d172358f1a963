//! TCODE — the chamber's line-oriented ASCII command protocol.
//!
//! One command per line, CR/LF terminated:
//!
//! ```text
//! [N<digits>] <command> [*HH]
//!
//! T<int>  / H<int>        setpoint, implicit zone 0
//! Z0 T<int> / Z0 H<int>   setpoint with explicit zone (only zone 0 exists)
//! M<value> / M <value>    machine command, argument passed through
//! Q0                      telemetry query
//! Q1 <KEY>                build-metadata query (BUILD / BUILDER / BUILD_DATE)
//! ```
//!
//! `*HH` is two hex digits: the XOR of every byte on the line before the
//! `*`. Lines that fail the checksum are rejected before interpretation.
//!
//! [`parser`] turns one raw line into a bounded token list; [`interpreter`]
//! runs the token list against the shared process state and renders reply
//! lines. The split mirrors the two failure tiers: parse errors abort the
//! line, semantic errors are reported per command and the line is still
//! acknowledged.

pub mod interpreter;
pub mod parser;

pub use interpreter::Interpreter;
pub use parser::{MAX_TOKENS, ParsedLine, parse, xor_checksum};
