//! The pulse timer, emulated on top of Embassy's 1 MHz time driver.
//!
//! [`InstantPulseTimer`] keeps the count as the [`Instant`] it was last restarted and publishes its deadlines through
//! a [`Signal`]. The [`pulse_timer`] task waits on those deadlines and delivers the compare and overflow events to the
//! hub, replanning whenever a newer schedule is published.

use crate::SharedFirmwareHub;
use din_sync_hub_lib::pulse::{PulseTimer, Schedule, TimerEvent};
use embassy_futures::select::{Either, select};
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
use embassy_time::{Duration, Instant, Timer};

/// Carries the latest [`Schedule`] to the [`pulse_timer`] task. Only the most recent one matters.
static SCHEDULE: Signal<CriticalSectionRawMutex, Schedule> = Signal::new();

/// A [`PulseTimer`] counting from the [`Instant`] it was last restarted.
pub struct InstantPulseTimer {
    started: Option<Instant>,
    compare: Option<Duration>,
    range: Duration,
}

impl InstantPulseTimer {
    /// Construct a stopped timer which overflows once `range` has been counted.
    pub const fn new(range: Duration) -> Self {
        Self {
            started: None,
            compare: None,
            range,
        }
    }
}

impl PulseTimer for InstantPulseTimer {
    fn elapsed(&self) -> Duration {
        self.started
            .map_or(Duration::from_ticks(0), |started| started.elapsed())
    }

    fn stop(&mut self) {
        self.started = None;
        SCHEDULE.signal(Schedule::Halted);
    }

    fn set_compare(&mut self, width: Duration) {
        self.compare = Some(width);
    }

    fn restart(&mut self) {
        let now = Instant::now();
        self.started = Some(now);
        SCHEDULE.signal(Schedule::armed(now, self.compare, self.range));
    }
}

/// Task responsible for ending clock pulses and for reporting when the interval between clocks grows too long to
/// measure.
#[embassy_executor::task]
pub async fn pulse_timer(hub: &'static SharedFirmwareHub) -> ! {
    let mut schedule = Schedule::Halted;
    loop {
        schedule = match schedule.deadline() {
            None => SCHEDULE.wait().await,
            Some(deadline) => match select(Timer::at(deadline), SCHEDULE.wait()).await {
                Either::First(()) => {
                    let (event, next) = schedule.expire(SCHEDULE.try_take());
                    match event {
                        Some(TimerEvent::Compare) => hub.end_pulse(),
                        Some(TimerEvent::Overflow) => hub.pulse_timer_overflowed(),
                        None => {}
                    }
                    next
                }
                Either::Second(rescheduled) => rescheduled,
            },
        };
    }
}
