//! DIN Sync Hub is [Embassy](https://embassy.dev)-based firmware which converts a MIDI clock into
//! [DIN Sync 24](https://en.wikipedia.org/wiki/DIN_sync), the clock and run/stop signals understood by vintage
//! analog sequencers and drum machines such as the Roland TR-808 and TB-303. The firmware runs on the
//! [Nucleo-F767ZI development board](https://www.st.com/en/evaluation-tools/nucleo-f767zi.html), which is powered by
//! an F7-series STM32 microcontroller.
//!
//! MIDI clock messages are turned into clock pulses with a 50% duty cycle, the width of each pulse being derived from
//! the interval since the previous clock. Start, Continue and Stop drive the run line, which can also be toggled with
//! the board's user button. Two LEDs show MIDI activity and the beat.
//!
//! All timing logic lives in `din_sync_hub_lib`; this crate only binds it to the hardware.

#![no_std]
#![no_main]

mod housekeeping;
mod midi_in;
mod pulse_timer;

use crate::pulse_timer::InstantPulseTimer;
use defmt::*;
use din_sync_hub_lib::{
    configuration::HubConfig,
    hub::{Hub, SharedHub},
};
use embassy_executor::Spawner;
use embassy_stm32::{
    Config, bind_interrupts,
    gpio::{Input, Level, Output, Pull, Speed},
    peripherals,
    time::Hertz,
    usart::{self, UartRx},
};
use static_cell::StaticCell;

use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(
    #[doc(hidden)]
    struct Irqs {
        USART2 => usart::InterruptHandler<peripherals::USART2>;
    }
);

/// The hub as wired on this board: pulse timer emulated with Embassy time, clock and run lines on GPIO.
type SharedFirmwareHub = SharedHub<InstantPulseTimer, Output<'static>, Output<'static>>;

/// MIDI runs at 31.25 kbaud, 8-N-1.
const MIDI_BAUD_RATE: u32 = 31_250;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!(
        "Initializing DIN Sync Hub v{}",
        env!("CARGO_PKG_VERSION")
    );

    let mut config = Config::default();
    {
        use embassy_stm32::rcc::*;
        // hse: high-speed external clock
        config.rcc.hse = Some(Hse {
            freq: Hertz(8_000_000),
            mode: HseMode::Bypass,
        });

        // pll: phase-locked loop, crucial for dividing clock
        config.rcc.pll_src = PllSource::HSE;
        config.rcc.pll = Some(Pll {
            prediv: PllPreDiv::DIV4,
            mul: PllMul::MUL216,
            divp: Some(PllPDiv::DIV2), // 8mhz / 4 * 216 / 2 = 216Mhz
            divq: None,
            divr: None,
        });
        config.rcc.ahb_pre = AHBPrescaler::DIV1;
        config.rcc.apb1_pre = APBPrescaler::DIV4;
        config.rcc.apb2_pre = APBPrescaler::DIV2;
        config.rcc.sys = Sysclk::PLL1_P;
    }
    let p = embassy_stm32::init(config);

    // the clock line's edges are what the attached sequencer counts, so it gets the fastest slew rate
    let clock_line = Output::new(p.PG0, Level::Low, Speed::VeryHigh);
    let run_line = Output::new(p.PG1, Level::Low, Speed::Low);

    // LD1 (green) and LD2 (blue) on the Nucleo board
    let mut activity_led = Output::new(p.PB0, Level::Low, Speed::Low);
    let beat_led = Output::new(p.PB7, Level::Low, Speed::Low);

    // B1, the blue user button, reads high while pressed
    let button = Input::new(p.PC13, Pull::Down);

    housekeeping::flash_startup(&mut activity_led).await;

    let hub_config = HubConfig::default();
    static HUB: StaticCell<SharedFirmwareHub> = StaticCell::new();
    let hub: &'static SharedFirmwareHub = HUB.init(SharedHub::new(Hub::new(
        hub_config,
        InstantPulseTimer::new(hub_config.measurable_interval),
        clock_line,
        run_line,
    )));

    let mut uart_config = usart::Config::default();
    uart_config.baudrate = MIDI_BAUD_RATE;
    // per RM0410, USART2_RX is available on port D, pin 6 and served by DMA1 stream 5
    let rx = unwrap!(UartRx::new(
        p.USART2,
        Irqs,
        p.PD6,
        p.DMA1_CH5,
        uart_config
    ));

    unwrap!(spawner.spawn(pulse_timer::pulse_timer(hub)));
    unwrap!(spawner.spawn(housekeeping::housekeeping(
        hub,
        button,
        activity_led,
        beat_led
    )));
    unwrap!(spawner.spawn(midi_in::midi_in(rx, hub)));

    info!("Listening for MIDI clock");
}
