//! Planning of the pulse timer's compare and overflow events for timers emulated in software.
//!
//! A timer emulated on a time driver publishes a [`Schedule`] whenever it is restarted or stopped, and a waiting task
//! sleeps until [`Schedule::deadline`]. Publishing and waiting happen in different tasks, so by the time a deadline
//! expires a newer schedule may already be pending. [`Schedule::expire`] decides what the expired deadline still
//! means in that case.

use embassy_time::{Duration, Instant};

/// Deadlines of a running pulse timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Schedule {
    /// The timer is stopped; nothing will fire.
    Halted,
    /// The timer is counting.
    Armed {
        /// When the compare event fires, or `None` once it has been delivered.
        compare_at: Option<Instant>,
        /// When the counter overflows.
        overflow_at: Instant,
    },
}

/// An event to deliver to the hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerEvent {
    /// Deliver to [`Hub::end_pulse`](crate::hub::Hub::end_pulse).
    Compare,
    /// Deliver to [`Hub::pulse_timer_overflowed`](crate::hub::Hub::pulse_timer_overflowed).
    Overflow,
}

impl Schedule {
    /// The schedule of a timer restarted at `now`, with its compare set to `compare` and overflowing after `range`.
    pub fn armed(now: Instant, compare: Option<Duration>, range: Duration) -> Self {
        Self::Armed {
            compare_at: compare.map(|width| now + width),
            overflow_at: now + range,
        }
    }

    /// The next instant at which something fires, if any.
    pub fn deadline(&self) -> Option<Instant> {
        match *self {
            Self::Halted => None,
            Self::Armed {
                compare_at,
                overflow_at,
            } => Some(compare_at.unwrap_or(overflow_at)),
        }
    }

    /// Called once [`deadline`](Self::deadline) has passed, with whatever newer schedule has been published since.
    /// Returns the event to deliver, if any, and the schedule to wait on next.
    ///
    /// A pending schedule means the timer was restarted or stopped after this deadline was planned. The expired
    /// deadline then belongs to a count that no longer exists and is dropped: a clock arriving while its predecessor's
    /// pulse is high retriggers the pulse rather than having it cut short, and a clock arriving on top of an overflow
    /// keeps the timer it just restarted.
    pub fn expire(self, pending: Option<Schedule>) -> (Option<TimerEvent>, Schedule) {
        if let Some(rescheduled) = pending {
            return (None, rescheduled);
        }

        match self {
            Self::Halted => (None, Self::Halted),
            Self::Armed {
                compare_at: Some(_),
                overflow_at,
            } => (
                Some(TimerEvent::Compare),
                Self::Armed {
                    compare_at: None,
                    overflow_at,
                },
            ),
            Self::Armed {
                compare_at: None, ..
            } => (Some(TimerEvent::Overflow), Self::Halted),
        }
    }
}
