//! Host-side adapters for the port traits.
//!
//! On the bench the "serial port" is the process's stdin/stdout pair and
//! the status lamp is a log line. Anything that wants to present the
//! simulator differently (a pty, a TCP socket, a real LED) implements the
//! same ports.

pub mod console;
pub mod indicator;

pub use console::StdioLink;
pub use indicator::LogIndicator;
