//! Rest timer state machine.
//!
//! A countdown that ticks once per elapsed second while active and reports
//! expiry exactly once. The timer itself is pure state; the periodic drive
//! comes from [`crate::ticker`] and the expiry side effect is delegated to
//! an [`Alert`] implementation supplied by the caller.

use crate::{Error, Result};

/// Outcome of a single timer tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerTick {
    /// Timer is not running; nothing happened
    Idle,
    /// Still counting down; this many seconds remain
    Counting(u32),
    /// The countdown just reached zero. Reported exactly once per
    /// completed countdown, never after a skip.
    Expired,
}

/// Best-effort expiry side effect (audible alert, notification)
///
/// Implementations must swallow their own failures; an alert that cannot
/// be delivered never affects timer state.
pub trait Alert {
    fn rest_complete(&mut self);
}

/// Alert sink that does nothing; useful for tests and non-interactive runs
#[derive(Default)]
pub struct SilentAlert;

impl Alert for SilentAlert {
    fn rest_complete(&mut self) {}
}

/// Countdown state for the rest period between sets
///
/// States: `Idle` (inactive, remaining 0) -> `Counting` -> `Idle` again on
/// expiry or skip. Only one timer exists at a time; `start` supersedes any
/// countdown already running.
#[derive(Clone, Debug, Default)]
pub struct RestTimer {
    remaining: u32,
    active: bool,
}

impl RestTimer {
    pub fn new() -> Self {
        Self {
            remaining: 0,
            active: false,
        }
    }

    /// Begin a countdown of `seconds`, replacing any running countdown
    pub fn start(&mut self, seconds: u32) -> Result<()> {
        if seconds == 0 {
            return Err(Error::InvalidTransition(
                "rest timer requires a positive duration".into(),
            ));
        }
        self.remaining = seconds;
        self.active = true;
        tracing::debug!("Rest timer started: {}s", seconds);
        Ok(())
    }

    /// Advance the countdown by one second
    ///
    /// Returns [`TimerTick::Expired`] on the tick that reaches zero, after
    /// which the timer is idle and further ticks are no-ops.
    pub fn tick(&mut self) -> TimerTick {
        if !self.active {
            return TimerTick::Idle;
        }

        if self.remaining > 0 {
            self.remaining -= 1;
        }

        if self.remaining == 0 {
            self.active = false;
            TimerTick::Expired
        } else {
            TimerTick::Counting(self.remaining)
        }
    }

    /// Cancel the countdown without firing the expiry side effect
    pub fn skip(&mut self) {
        if self.active {
            tracing::debug!("Rest timer skipped with {}s remaining", self.remaining);
        }
        self.remaining = 0;
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining
    }

    /// Format the remaining time as `MM:SS` for display
    pub fn formatted(&self) -> String {
        format!("{:02}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}
