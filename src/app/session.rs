//! Serial line session: byte accumulation, echo, and the acknowledgement
//! policy.
//!
//! The session assembles CR/LF-terminated lines from the link, hands each
//! line to the parser and interpreter, and decides what the peer hears
//! back:
//!
//! - parse succeeds → interpreter replies (possibly a semantic error),
//!   then a literal `ok`. Semantic errors do **not** suppress the `ok` —
//!   the controller's sender only retries on missing acknowledgement, and
//!   a mis-typed setpoint should not stall its queue.
//! - parse fails → one error line, no `ok` (an empty line produces
//!   nothing at all).
//!
//! Lines are capped at [`MAX_LINE_BYTES`]; overflow is reported as a named
//! error at end-of-line instead of silently truncating.

use log::{info, warn};

use crate::error::ParseError;
use crate::tcode::{self, Interpreter, MAX_TOKENS};

use super::ports::{LinkPoll, SerialLink};

/// Receive buffer capacity per line.
pub const MAX_LINE_BYTES: usize = 256;

/// One serial session over a [`SerialLink`].
pub struct LineSession<L: SerialLink> {
    link: L,
    interpreter: Interpreter,
    echo: bool,
    buffer: heapless::Vec<u8, MAX_LINE_BYTES>,
    overflowed: bool,
}

impl<L: SerialLink> LineSession<L> {
    pub fn new(link: L, interpreter: Interpreter, echo: bool) -> Self {
        Self {
            link,
            interpreter,
            echo,
            buffer: heapless::Vec::new(),
            overflowed: false,
        }
    }

    /// Direct access to the link adapter (bench rigs inspect what was
    /// written; the stdio adapter needs no such access in production).
    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    /// Poll the link until it closes. Yields briefly when no bytes are
    /// pending so an idle bench does not spin a core.
    pub fn run(&mut self) {
        loop {
            match self.link.poll_byte() {
                LinkPoll::Byte(byte) => self.accept_byte(byte),
                LinkPoll::Idle => std::thread::sleep(std::time::Duration::from_millis(1)),
                LinkPoll::Closed => {
                    info!("serial link closed");
                    return;
                }
            }
        }
    }

    /// Feed one received byte through the accumulator.
    pub fn accept_byte(&mut self, byte: u8) {
        if self.echo {
            self.link.write_byte(byte);
        }
        if byte == b'\n' || byte == b'\r' {
            self.finish_line();
        } else if self.overflowed {
            // Swallowing the rest of an over-long line.
        } else if self.buffer.push(byte).is_err() {
            self.overflowed = true;
        }
    }

    fn finish_line(&mut self) {
        // Split borrows: the dispatch path reads the buffer while writing
        // to the link.
        let Self {
            link,
            interpreter,
            buffer,
            overflowed,
            ..
        } = self;

        if *overflowed {
            warn!("dropping over-long line ({MAX_LINE_BYTES} byte cap)");
            link.write_line(&format!("Error: line too long (max {MAX_LINE_BYTES} bytes)"));
        } else if !buffer.is_empty() {
            match core::str::from_utf8(buffer) {
                Ok(line) => dispatch_line(interpreter, link, line),
                Err(_) => link.write_line("Error: line is not valid UTF-8"),
            }
        }

        buffer.clear();
        *overflowed = false;
    }
}

/// Parse-then-interpret one complete line, applying the acknowledgement
/// policy described in the module docs.
fn dispatch_line<L: SerialLink>(interpreter: &Interpreter, link: &mut L, line: &str) {
    match tcode::parse(line) {
        Ok(parsed) => {
            interpreter.interpret(&parsed, link);
            link.write_line("ok");
        }
        Err(ParseError::EmptyLine) => {}
        Err(ParseError::ChecksumMismatch { calculated, given }) => {
            link.write_line(&format!(
                "ERROR: Wrong checksum! (got {calculated:02X}, expected {given:02X})"
            ));
        }
        Err(ParseError::ChecksumFormat) => {
            link.write_line("Error: malformed checksum (want *HH)");
        }
        Err(ParseError::TooManyTokens) => {
            link.write_line(&format!("Error: too many tokens on line (max {MAX_TOKENS})"));
        }
    }
}
