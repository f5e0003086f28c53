//! This crate contains architecture-agnostic logic for the DIN Sync Hub, a device which lets vintage analog sequencers
//! and drum machines follow modern MIDI gear by translating the [MIDI](https://midi.org/midi-1-0) real-time clock into
//! [DIN Sync 24](https://en.wikipedia.org/wiki/DIN_sync) clock pulses and a run/stop level.
//!
//! Nothing here touches registers. Output lines are [`embedded_hal`] pins and the microsecond timer that shapes each
//! clock pulse is abstracted behind [`pulse::PulseTimer`], so the timing engine can be exercised on the host.

#![deny(missing_docs)]
#![no_std]

pub mod configuration;

/// The shared state container tying the decoder, pulse engine, transport and indicators together.
pub mod hub;

pub mod indicator;

/// Classification of bytes arriving from the MIDI input.
pub mod message;

pub mod pulse;

pub mod switch;

pub mod transport;

#[cfg(test)]
mod mock;
