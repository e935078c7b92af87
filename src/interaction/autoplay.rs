use crate::{config::AutoplayConfig, foundation::core::Direction};

/// Fixed-interval stepping driver.
///
/// Only its own successful steps reschedule it, so manual navigation between two autoplay
/// steps does not shift the cadence. While suspended nothing fires; resuming restarts the
/// interval from the resume time.
#[derive(Clone, Debug, PartialEq)]
pub struct Autoplay {
    interval: f64,
    direction: Direction,
    next_due: Option<f64>,
    suspended: bool,
}

impl Autoplay {
    /// Scheduler for `cfg`, not yet started.
    pub fn new(cfg: AutoplayConfig) -> Self {
        Self {
            interval: cfg.interval_secs,
            direction: cfg.direction,
            next_due: None,
            suspended: false,
        }
    }

    /// Schedule the first step one interval after `now`.
    pub fn start(&mut self, now: f64) {
        self.suspended = false;
        self.next_due = Some(now + self.interval);
    }

    /// Cancel scheduling until [`Self::start`] or [`Self::resume`].
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    /// Hold off steps while something else owns the track.
    pub fn suspend(&mut self) {
        if !self.suspended {
            tracing::debug!("autoplay suspended");
        }
        self.suspended = true;
    }

    /// Lift a suspension; the next step is one full interval away.
    pub fn resume(&mut self, now: f64) {
        if !self.suspended {
            return;
        }
        self.suspended = false;
        if self.next_due.is_some() {
            self.next_due = Some(now + self.interval);
        }
        tracing::debug!(now, "autoplay resumed");
    }

    /// Whether a step is scheduled, suspended or not. `false` after [`Self::stop`].
    pub fn is_scheduled(&self) -> bool {
        self.next_due.is_some()
    }

    /// Whether steps are currently held off.
    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Wall-clock time of the next step, if scheduled and not suspended.
    pub fn next_due(&self) -> Option<f64> {
        if self.suspended { None } else { self.next_due }
    }

    /// The step direction if one is due at `now`.
    pub fn due(&self, now: f64) -> Option<Direction> {
        match self.next_due() {
            Some(at) if now >= at => Some(self.direction),
            _ => None,
        }
    }

    /// Record a successful step at `now` and restart the interval.
    pub fn stepped(&mut self, now: f64) {
        self.next_due = Some(now + self.interval);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/autoplay.rs"]
mod tests;
