//! Reception of the MIDI input.

use crate::SharedFirmwareHub;
use defmt::{info, warn};
use din_sync_hub_lib::message::SyncMessage;
use embassy_stm32::{mode::Async, usart::UartRx};

/// Task responsible for feeding every byte from the MIDI input to the hub.
///
/// Bytes are read one at a time so that the clock line rises as soon as a clock message has been received, rather
/// than when some buffer fills up.
#[embassy_executor::task]
pub async fn midi_in(mut rx: UartRx<'static, Async>, hub: &'static SharedFirmwareHub) -> ! {
    let mut byte = [0_u8; 1];
    loop {
        if let Err(e) = rx.read(&mut byte).await {
            // every real-time message is a single byte, so the stream recovers on its own
            warn!("Discarding byte after MIDI receive error: {}", e);
            continue;
        }

        match hub.receive(byte[0]) {
            Some(SyncMessage::Start) => info!("Received Start/Continue, transport running"),
            Some(SyncMessage::Stop) => info!("Received Stop, transport stopped"),
            // clocks arrive 24 times per beat and would swamp the log
            Some(SyncMessage::Clock) | None => {}
        }
    }
}
