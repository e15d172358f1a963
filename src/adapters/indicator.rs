//! Log-backed status indicator.
//!
//! The engine publishes a colour every tick; repeating that at 10 Hz would
//! drown the log, so this adapter tracks the current colour and only
//! reports changes.

use log::info;

use crate::app::ports::StatusIndicator;
use crate::config::Rgb;

pub struct LogIndicator {
    current: Option<Rgb>,
}

impl LogIndicator {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Colour most recently published, if any.
    pub fn current(&self) -> Option<Rgb> {
        self.current
    }
}

impl StatusIndicator for LogIndicator {
    fn set_colour(&mut self, colour: Rgb) {
        if self.current != Some(colour) {
            let (r, g, b) = colour;
            info!("status colour -> #{r:02X}{g:02X}{b:02X}");
            self.current = Some(colour);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_the_latest_colour() {
        let mut led = LogIndicator::new();
        assert_eq!(led.current(), None);
        led.set_colour((16, 2, 0));
        led.set_colour((16, 2, 0));
        assert_eq!(led.current(), Some((16, 2, 0)));
        led.set_colour((0, 2, 16));
        assert_eq!(led.current(), Some((0, 2, 16)));
    }
}
