//! Controls the indicator LEDs and the run/stop switch, neither of which is timing-critical.

use crate::SharedFirmwareHub;
use defmt::info;
use din_sync_hub_lib::switch::Switch;
use embassy_stm32::gpio::{Input, Output};
use embassy_time::{Duration, Ticker, Timer};

/// Task responsible for the millisecond housekeeping loop.
///
/// Each tick refreshes both LEDs from the hub's countdowns and samples the switch, toggling the transport once per
/// debounced press.
#[embassy_executor::task]
pub async fn housekeeping(
    hub: &'static SharedFirmwareHub,
    button: Input<'static>,
    mut activity_led: Output<'static>,
    mut beat_led: Output<'static>,
) -> ! {
    let mut switch = Switch::new(hub.lock(|hub| hub.config().debounce_ms));
    let mut ticker = Ticker::every(Duration::from_millis(1));

    loop {
        ticker.next().await;

        let indicators = hub.tick();
        activity_led.set_level(indicators.activity.into());
        beat_led.set_level(indicators.beat.into());

        if switch.tick(button.is_high()) {
            let state = hub.toggle_transport();
            info!("Run/stop switch pressed, transport now {}", state);
        }
    }
}

/// Blinks the activity LED twice to show the device has powered up.
pub async fn flash_startup(led: &mut Output<'static>) {
    const FLASH_MS: u64 = 200;

    led.set_high();
    Timer::after_millis(FLASH_MS).await;
    led.set_low();
    Timer::after_millis(FLASH_MS).await;
    led.set_high();
    Timer::after_millis(FLASH_MS).await;
    led.set_low();
}
