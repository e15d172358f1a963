//! stdin/stdout serial link.
//!
//! A dedicated reader thread pulls bytes off stdin and hands them over an
//! in-process channel, so [`SerialLink::poll_byte`] never blocks the
//! session. EOF on stdin (the bench harness hung up) surfaces as
//! [`LinkPoll::Closed`] once the channel drains.

use std::io::{Read, Write};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::{io, thread};

use log::warn;

use crate::app::ports::{LinkPoll, SerialLink};

pub struct StdioLink {
    rx: Receiver<u8>,
    stdout: io::Stdout,
}

impl StdioLink {
    /// Attach to the process's stdin/stdout and start the reader thread.
    pub fn new() -> io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("stdin-reader".into())
            .spawn(move || {
                let mut stdin = io::stdin().lock();
                let mut byte = [0u8; 1];
                loop {
                    match stdin.read(&mut byte) {
                        Ok(0) => break, // EOF — drop tx, the link reads Closed
                        Ok(_) => {
                            if tx.send(byte[0]).is_err() {
                                break;
                            }
                        }
                        Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                        Err(e) => {
                            warn!("stdin read failed: {e}");
                            break;
                        }
                    }
                }
            })?;
        Ok(Self {
            rx,
            stdout: io::stdout(),
        })
    }
}

impl SerialLink for StdioLink {
    fn poll_byte(&mut self) -> LinkPoll {
        match self.rx.try_recv() {
            Ok(byte) => LinkPoll::Byte(byte),
            Err(TryRecvError::Empty) => LinkPoll::Idle,
            Err(TryRecvError::Disconnected) => LinkPoll::Closed,
        }
    }

    fn write_byte(&mut self, byte: u8) {
        // A closed stdout means the harness is gone; there is nowhere left
        // to report to, so write errors are dropped.
        let _ = self.stdout.write_all(&[byte]);
        let _ = self.stdout.flush();
    }

    fn write_line(&mut self, line: &str) {
        let _ = writeln!(self.stdout, "{line}");
        let _ = self.stdout.flush();
    }
}
