use crate::animation::ease::Ease;

/// A timed transition of one scalar (timeline time) from `from` to `to`.
///
/// Values are unwrapped; callers wrap when reading.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    start: f64,
    duration: f64,
    ease: Ease,
}

impl Tween {
    /// Start a tween at wall-clock `start`. A zero duration completes on the first sample.
    pub fn new(from: f64, to: f64, start: f64, duration: f64, ease: Ease) -> Self {
        Self {
            from,
            to,
            start,
            duration: duration.max(0.0),
            ease,
        }
    }

    /// Start value.
    pub fn from(&self) -> f64 {
        self.from
    }

    /// End value.
    pub fn to(&self) -> f64 {
        self.to
    }

    /// Easing curve.
    pub fn ease(&self) -> Ease {
        self.ease
    }

    /// Linear progress in `[0, 1]` at wall-clock `now`.
    pub fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.start) / self.duration).clamp(0.0, 1.0)
    }

    /// Eased value at wall-clock `now`.
    pub fn sample(&self, now: f64) -> f64 {
        let p = self.progress(now);
        if p >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * self.ease.apply(p)
    }

    /// Whether the tween has reached its end value.
    pub fn is_done(&self, now: f64) -> bool {
        self.progress(now) >= 1.0
    }

    /// Wall-clock seconds left until completion.
    pub fn remaining(&self, now: f64) -> f64 {
        (self.start + self.duration - now).max(0.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
