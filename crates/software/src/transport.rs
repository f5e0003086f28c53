//! The run/stop half of DIN Sync.

use core::convert::Infallible;
use embedded_hal::digital::OutputPin;

/// Whether the attached sequencer should be playing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportState {
    /// Run line low.
    #[default]
    Stopped,
    /// Run line high.
    Running,
}

/// Owns the Run output line and keeps it in step with the [`TransportState`].
pub struct Transport<R> {
    state: TransportState,
    run_line: R,
}

impl<R: OutputPin<Error = Infallible>> Transport<R> {
    /// Construct a stopped `Transport`, driving the run line low.
    pub fn new(mut run_line: R) -> Self {
        let Ok(()) = run_line.set_low();
        Self {
            state: TransportState::Stopped,
            run_line,
        }
    }

    /// Enter [`TransportState::Running`] and raise the run line. Starting while already running is harmless.
    pub fn start(&mut self) {
        let Ok(()) = self.run_line.set_high();
        self.state = TransportState::Running;
    }

    /// Enter [`TransportState::Stopped`] and lower the run line.
    pub fn stop(&mut self) {
        let Ok(()) = self.run_line.set_low();
        self.state = TransportState::Stopped;
    }

    /// Returns the current state.
    pub fn state(&self) -> TransportState {
        self.state
    }

    /// Convenience function to test whether the transport is running.
    pub fn is_running(&self) -> bool {
        self.state == TransportState::Running
    }

    /// Returns the run line.
    pub fn run_line(&self) -> &R {
        &self.run_line
    }
}
