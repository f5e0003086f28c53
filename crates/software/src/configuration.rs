//! Timing constants that shape the device's outputs, gathered in one place so the firmware and the tests agree on them.

use embassy_time::Duration;

/// MIDI sends 24 clock messages per quarter note, which is also the DIN Sync 24 pulse rate.
pub const CLOCKS_PER_BEAT: u8 = 24;

/// Timing configuration for a [`Hub`](crate::hub::Hub).
///
/// Durations applied to the clock output are expressed as [`Duration`]s. Those driving the indicators and the switch
/// are counted in housekeeping ticks, which occur once per millisecond.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HubConfig {
    /// Width of a clock pulse when no interval to the previous clock is known, e.g., the first clock after a start.
    pub default_pulse_width: Duration,
    /// Longest interval the pulse timer can measure before it overflows. Intervals beyond this are considered
    /// unknown, so a stalled clock falls back to [`default_pulse_width`](Self::default_pulse_width).
    pub measurable_interval: Duration,
    /// How long the activity LED stays lit after each clock message, in milliseconds.
    pub activity_led_ms: u16,
    /// How long the beat LED stays lit at each quarter note, in milliseconds.
    pub beat_led_ms: u16,
    /// How long the switch is ignored after a press is registered, in milliseconds.
    pub debounce_ms: u16,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            default_pulse_width: Duration::from_micros(5_000),
            // a 16-bit counter ticking at 1 MHz
            measurable_interval: Duration::from_micros(u16::MAX as u64),
            activity_led_ms: 1,
            beat_led_ms: 30,
            debounce_ms: 50,
        }
    }
}
