//! Debouncing for the momentary run/stop switch.
//!
//! Mechanical contacts bounce for a few milliseconds when pressed. The [`Switch`] registers a press on the first
//! closed reading, then ignores the contacts for the debounce period and until they are released, so each physical
//! press yields exactly one event no matter how it bounces or how long it is held.

/// Where the switch is in its press cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SwitchState {
    /// Released and ready to register the next press.
    Idle,
    /// A press was just registered; the contacts are ignored for this many more milliseconds.
    Debouncing(u16),
    /// Ignoring the contacts until they read released.
    WaitingForRelease,
}

/// A debounced momentary switch, advanced once per millisecond from the housekeeping loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Switch {
    state: SwitchState,
    debounce_ms: u16,
}

impl Switch {
    /// Construct a `Switch` which ignores its contacts for `debounce_ms` after each press.
    ///
    /// The switch starts out waiting for release, so one held down at power-up must be let go before it counts.
    pub fn new(debounce_ms: u16) -> Self {
        Self {
            state: SwitchState::WaitingForRelease,
            debounce_ms,
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> SwitchState {
        self.state
    }

    /// Advance by one millisecond given the raw reading of the contacts. Returns `true` when a new press is registered.
    ///
    /// The tick that ends the debounce period does not look at the contacts, so release is first noticed on the
    /// following tick.
    pub fn tick(&mut self, pressed: bool) -> bool {
        match self.state {
            SwitchState::Idle if pressed => {
                self.state = match self.debounce_ms {
                    0 => SwitchState::WaitingForRelease,
                    ms => SwitchState::Debouncing(ms),
                };
                return true;
            }
            SwitchState::Idle => {}
            SwitchState::Debouncing(remaining) => {
                self.state = match remaining.saturating_sub(1) {
                    0 => SwitchState::WaitingForRelease,
                    remaining => SwitchState::Debouncing(remaining),
                };
            }
            SwitchState::WaitingForRelease if !pressed => {
                self.state = SwitchState::Idle;
            }
            SwitchState::WaitingForRelease => {}
        }
        false
    }
}
