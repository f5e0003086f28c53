//! The clock half of DIN Sync: one pulse per MIDI clock, held high for half the interval between clocks.
//!
//! The width of a pulse can only be known once the next clock arrives, so each pulse is sized from the interval that
//! just ended. That interval is measured with a free-running microsecond [`PulseTimer`], which is also what ends the
//! pulse: its compare event fires once the computed width has elapsed.

use core::convert::Infallible;
use embassy_time::Duration;
use embedded_hal::digital::OutputPin;

mod schedule;
pub use schedule::*;

/// A microsecond counter able to raise a one-shot compare event, as found on most microcontroller timer peripherals.
///
/// Implementors are expected to call back into [`ClockPulse::end`] when the compare event fires, and into
/// [`ClockPulse::time_out`] if the counter overflows before being restarted.
pub trait PulseTimer {
    /// Time counted since the last [`restart`](Self::restart).
    fn elapsed(&self) -> Duration;

    /// Stop counting. No overflow will be reported for a stopped timer.
    fn stop(&mut self);

    /// Arrange for the compare event to fire once `width` has been counted.
    fn set_compare(&mut self, width: Duration);

    /// Reset the count to zero and start counting.
    fn restart(&mut self);
}

/// Whether the interval since the previous clock can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum Interval {
    /// No previous clock, the transport changed, or the timer overflowed.
    Unknown,
    /// The timer has been counting since the previous clock.
    Measuring,
}

/// Produces a 50% duty cycle pulse on the clock output line for each MIDI clock.
pub struct ClockPulse<T, C> {
    pub(crate) timer: T,
    clock_line: C,
    interval: Interval,
    default_width: Duration,
    measurable_interval: Duration,
}

impl<T: PulseTimer, C: OutputPin<Error = Infallible>> ClockPulse<T, C> {
    /// Construct a `ClockPulse` with the clock line low and no known interval.
    pub fn new(
        timer: T,
        mut clock_line: C,
        default_width: Duration,
        measurable_interval: Duration,
    ) -> Self {
        let Ok(()) = clock_line.set_low();
        Self {
            timer,
            clock_line,
            interval: Interval::Unknown,
            default_width,
            measurable_interval,
        }
    }

    /// Starts a pulse in response to a MIDI clock and returns the width it was scheduled for.
    ///
    /// The clock line goes high before anything else happens; everything after it only affects when the line falls.
    pub fn begin(&mut self) -> Duration {
        let Ok(()) = self.clock_line.set_high();

        let width = match self.interval {
            Interval::Measuring => {
                let elapsed = self.timer.elapsed();
                self.timer.stop();
                self.width_for(elapsed)
            }
            Interval::Unknown => self.default_width,
        };

        self.timer.set_compare(width);
        self.timer.restart();
        self.interval = Interval::Measuring;

        width
    }

    /// Ends the pulse. Called when the timer's compare event fires.
    pub fn end(&mut self) {
        let Ok(()) = self.clock_line.set_low();
    }

    /// Gives up on the interval in progress. Called when the timer overflows, meaning the clock has stalled or is
    /// too slow to measure; the next pulse gets the default width instead of a stale one.
    pub fn time_out(&mut self) {
        self.timer.stop();
        self.interval = Interval::Unknown;
    }

    /// Discards the interval in progress without touching the timer, so a pulse already underway still ends on time.
    pub fn forget_interval(&mut self) {
        self.interval = Interval::Unknown;
    }

    /// True when the next pulse will be sized from a measured interval rather than the default width.
    pub fn has_known_interval(&self) -> bool {
        self.interval == Interval::Measuring
    }

    /// Returns the clock output line.
    pub fn clock_line(&self) -> &C {
        &self.clock_line
    }

    fn width_for(&self, elapsed: Duration) -> Duration {
        // an overflow that hasn't been reported yet is still an overflow
        if elapsed > self.measurable_interval {
            self.default_width
        } else {
            elapsed / 2
        }
    }
}
