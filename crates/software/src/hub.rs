use crate::{
    configuration::{CLOCKS_PER_BEAT, HubConfig},
    indicator::{Countdown, Indicators},
    message::SyncMessage,
    pulse::{ClockPulse, PulseTimer},
    transport::{Transport, TransportState},
};
use core::{cell::RefCell, convert::Infallible};
use embassy_sync::blocking_mutex::{Mutex, raw::CriticalSectionRawMutex};
use embassy_time::Duration;
use embedded_hal::digital::OutputPin;

/// Everything the device knows, owned in one place.
///
/// State is touched from two directions: events (MIDI bytes, pulse timer compare and overflow) and the millisecond
/// housekeeping loop. `Hub` itself is not synchronized; share it through [`SharedHub`].
pub struct Hub<T, C, R> {
    config: HubConfig,
    pulse: ClockPulse<T, C>,
    transport: Transport<R>,
    /// Clocks received since the last quarter note, `0..CLOCKS_PER_BEAT`.
    beat_count: u8,
    activity_led: Countdown,
    beat_led: Countdown,
}

impl<T, C, R> Hub<T, C, R>
where
    T: PulseTimer,
    C: OutputPin<Error = Infallible>,
    R: OutputPin<Error = Infallible>,
{
    /// Construct a stopped `Hub` with both output lines low.
    pub fn new(config: HubConfig, timer: T, clock_line: C, run_line: R) -> Self {
        Self {
            config,
            pulse: ClockPulse::new(
                timer,
                clock_line,
                config.default_pulse_width,
                config.measurable_interval,
            ),
            transport: Transport::new(run_line),
            beat_count: 0,
            activity_led: Countdown::new(),
            beat_led: Countdown::new(),
        }
    }

    /// Acts on a single byte from the MIDI input. Returns the message it was recognized as, if any; unrecognized
    /// bytes leave the state untouched.
    pub fn receive(&mut self, byte: u8) -> Option<SyncMessage> {
        let message = SyncMessage::decode(byte)?;
        match message {
            SyncMessage::Clock => {
                self.clock();
            }
            SyncMessage::Start => self.start(),
            SyncMessage::Stop => self.stop(),
        }
        Some(message)
    }

    /// Emits a clock pulse and advances the beat position. Returns the width of the pulse.
    pub fn clock(&mut self) -> Duration {
        let width = self.pulse.begin();

        self.beat_count += 1;
        if self.beat_count >= CLOCKS_PER_BEAT {
            self.beat_count = 0;
            self.beat_led.arm(self.config.beat_led_ms);
        }
        self.activity_led.arm(self.config.activity_led_ms);

        width
    }

    /// Starts the transport from the top of a beat, flashing the beat LED right away rather than 24 clocks later.
    ///
    /// Start and Continue are treated alike, as is the manual switch.
    pub fn start(&mut self) {
        self.transport.start();
        self.beat_count = 0;
        self.beat_led.arm(self.config.beat_led_ms);
        self.pulse.forget_interval();
    }

    /// Stops the transport. The beat position is left alone; the next start resets it anyway.
    pub fn stop(&mut self) {
        self.transport.stop();
        self.pulse.forget_interval();
    }

    /// Flips between running and stopped, as the manual switch does. Returns the new state.
    pub fn toggle_transport(&mut self) -> TransportState {
        match self.transport.state() {
            TransportState::Running => self.stop(),
            TransportState::Stopped => self.start(),
        }
        self.transport.state()
    }

    /// Ends the current clock pulse. Called on the pulse timer's compare event.
    pub fn end_pulse(&mut self) {
        self.pulse.end();
    }

    /// Abandons interval measurement. Called on the pulse timer's overflow event.
    pub fn pulse_timer_overflowed(&mut self) {
        self.pulse.time_out();
    }

    /// Advances the indicator countdowns by one millisecond, returning the LED levels for this tick.
    ///
    /// Levels are sampled before counting down, so an LED armed for N milliseconds is lit for N ticks.
    pub fn tick(&mut self) -> Indicators {
        let indicators = Indicators {
            activity: self.activity_led.is_active(),
            beat: self.transport.is_running() && self.beat_led.is_active(),
        };
        self.activity_led.tick();
        self.beat_led.tick();
        indicators
    }

    /// Returns the transport state.
    pub fn transport_state(&self) -> TransportState {
        self.transport.state()
    }

    /// Returns the number of clocks received since the last quarter note.
    pub fn beat_count(&self) -> u8 {
        self.beat_count
    }

    /// Returns the clock output line.
    pub fn clock_line(&self) -> &C {
        self.pulse.clock_line()
    }

    /// True when the next clock will be sized from a measured interval rather than the default width.
    pub fn has_known_interval(&self) -> bool {
        self.pulse.has_known_interval()
    }

    /// Returns the timing configuration.
    pub fn config(&self) -> &HubConfig {
        &self.config
    }
}

/// A [`Hub`] which may be shared between the MIDI, pulse timer and housekeeping tasks.
///
/// Every operation runs start to finish inside a critical section, which on a single-core microcontroller means with
/// interrupts masked. The critical sections are short: none of them waits on anything.
pub struct SharedHub<T, C, R> {
    hub: Mutex<CriticalSectionRawMutex, RefCell<Hub<T, C, R>>>,
}

impl<T, C, R> SharedHub<T, C, R> {
    /// Wrap a `Hub` for sharing.
    pub const fn new(hub: Hub<T, C, R>) -> Self {
        Self {
            hub: Mutex::new(RefCell::new(hub)),
        }
    }

    /// Runs `f` with exclusive access to the `Hub`.
    ///
    /// `f` must not call back into this `SharedHub`.
    pub fn lock<U>(&self, f: impl FnOnce(&mut Hub<T, C, R>) -> U) -> U {
        self.hub.lock(|hub| f(&mut *hub.borrow_mut()))
    }
}

impl<T, C, R> SharedHub<T, C, R>
where
    T: PulseTimer,
    C: OutputPin<Error = Infallible>,
    R: OutputPin<Error = Infallible>,
{
    /// See [`Hub::receive`].
    pub fn receive(&self, byte: u8) -> Option<SyncMessage> {
        self.lock(|hub| hub.receive(byte))
    }

    /// See [`Hub::end_pulse`].
    pub fn end_pulse(&self) {
        self.lock(|hub| hub.end_pulse())
    }

    /// See [`Hub::pulse_timer_overflowed`].
    pub fn pulse_timer_overflowed(&self) {
        self.lock(|hub| hub.pulse_timer_overflowed())
    }

    /// See [`Hub::toggle_transport`].
    pub fn toggle_transport(&self) -> TransportState {
        self.lock(|hub| hub.toggle_transport())
    }

    /// See [`Hub::tick`].
    pub fn tick(&self) -> Indicators {
        self.lock(|hub| hub.tick())
    }
}
