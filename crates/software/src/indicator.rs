//! Millisecond countdowns behind the two indicator LEDs.
//!
//! The MIDI path only ever re-arms a countdown. Decrementing happens in the housekeeping loop, once per millisecond,
//! which is what eventually turns an LED off.

/// A countdown in housekeeping ticks (milliseconds) which never goes below zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Countdown {
    remaining: u16,
}

impl Countdown {
    /// Construct an expired `Countdown`.
    pub const fn new() -> Self {
        Self { remaining: 0 }
    }

    /// Restart the countdown from `ms`, discarding whatever was left.
    pub fn arm(&mut self, ms: u16) {
        self.remaining = ms;
    }

    /// Count down by one millisecond, stopping at zero.
    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    /// True until the countdown reaches zero.
    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    /// Milliseconds left.
    pub fn remaining(&self) -> u16 {
        self.remaining
    }
}

/// The levels both indicator LEDs should show for the current housekeeping tick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Indicators {
    /// MIDI activity: lit briefly after every clock message.
    pub activity: bool,
    /// Beat: lit briefly on each quarter note, only while the transport is running.
    pub beat: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_inactive() {
        assert!(!Countdown::new().is_active());
    }

    #[test]
    fn counts_down_to_zero_and_stays_there() {
        let mut countdown = Countdown::new();
        countdown.arm(2);
        assert!(countdown.is_active());

        countdown.tick();
        assert_eq!(1, countdown.remaining(), "Expected left but got right");
        assert!(countdown.is_active());

        countdown.tick();
        assert!(!countdown.is_active());

        countdown.tick();
        assert_eq!(0, countdown.remaining(), "Countdown should floor at zero");
    }

    #[test]
    fn rearm_restarts() {
        let mut countdown = Countdown::new();
        countdown.arm(30);
        for _ in 0..20 {
            countdown.tick();
        }
        countdown.arm(30);
        assert_eq!(30, countdown.remaining(), "Expected left but got right");
    }
}
