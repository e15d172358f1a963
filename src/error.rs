//! Typed error set for the TCODE line layer.
//!
//! Parse failures are a normal part of serial traffic — a controller under
//! development will send garbage — so every variant is `Copy`, carries the
//! bytes needed for a diagnostic reply, and is reported to the peer as a
//! one-line message. Nothing here is fatal to the process.

use core::fmt;

/// Outcome of running the line parser over one received line.
///
/// `ChecksumMismatch` keeps both byte values: the wire reply quotes the
/// locally calculated checksum alongside the one given on the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Line was empty after stripping, or contained no tokens.
    /// Dropped silently — not even an error reply.
    EmptyLine,
    /// More tokens than the fixed capacity of the token list.
    TooManyTokens,
    /// A `*` delimiter was present but not followed by two hex digits.
    ChecksumFormat,
    /// Checksum parsed fine but does not match the line contents.
    ChecksumMismatch {
        /// XOR of every byte preceding the `*`, computed locally.
        calculated: u8,
        /// The two hex digits given on the wire.
        given: u8,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLine => write!(f, "empty line"),
            Self::TooManyTokens => write!(f, "too many tokens"),
            Self::ChecksumFormat => write!(f, "malformed checksum"),
            Self::ChecksumMismatch { calculated, given } => {
                write!(
                    f,
                    "checksum mismatch (calculated {calculated:02X}, given {given:02X})"
                )
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Rejection reason from [`SimConfig::validate`](crate::config::SimConfig::validate).
///
/// The `&'static str` names the offending field and the constraint, so the
/// bench operator sees exactly which knob to fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigError(pub &'static str);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid config: {}", self.0)
    }
}

impl std::error::Error for ConfigError {}
