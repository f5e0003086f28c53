//! Test doubles standing in for output pins and the pulse timer.

use crate::pulse::PulseTimer;
use core::convert::Infallible;
use embassy_time::Duration;
use embedded_hal::digital::{ErrorType, OutputPin};

/// An output line which remembers its level.
#[derive(Debug, Default)]
pub struct MockLine {
    high: bool,
}

impl MockLine {
    pub fn high() -> Self {
        Self { high: true }
    }

    pub fn is_high(&self) -> bool {
        self.high
    }
}

impl ErrorType for MockLine {
    type Error = Infallible;
}

impl OutputPin for MockLine {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        Ok(())
    }
}

/// A pulse timer whose elapsed time is set by the test rather than by the passage of time.
#[derive(Debug, Default)]
pub struct MockTimer {
    pub elapsed: Duration,
    pub running: bool,
    pub compare: Option<Duration>,
    pub restarts: u32,
}

impl PulseTimer for MockTimer {
    fn elapsed(&self) -> Duration {
        self.elapsed
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn set_compare(&mut self, width: Duration) {
        self.compare = Some(width);
    }

    fn restart(&mut self) {
        self.elapsed = Duration::from_ticks(0);
        self.running = true;
        self.restarts += 1;
    }
}
