/// Momentum coasting after a thrown drag.
///
/// Velocity decays geometrically per reference frame (`v_n = v_0 * decay^n`). The coast ends
/// when velocity drops below the stop threshold or the hard cap is reached, whichever is
/// first. The resting point is snapped, and the decay curve is rescaled so the coast lands
/// exactly on the snapped value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Momentum {
    from: f64,
    to: f64,
    start: f64,
    frames: f64,
    frame_secs: f64,
    decay: f64,
}

/// Inputs for [`Momentum::plan`]; velocities are in value units per reference frame.
#[derive(Clone, Copy, Debug)]
pub struct MomentumPlan {
    /// Current value.
    pub from: f64,
    /// Release velocity.
    pub velocity: f64,
    /// Velocity magnitude at which coasting ends.
    pub stop_velocity: f64,
    /// Fraction of velocity kept per reference frame.
    pub decay: f64,
    /// Reference frame length in seconds.
    pub frame_secs: f64,
    /// Hard cap on coasting time in seconds.
    pub max_secs: f64,
}

impl Momentum {
    /// Plan a coast starting at wall-clock `now`. `snap` maps the projected resting point to
    /// the final target.
    pub fn plan(plan: MomentumPlan, now: f64, snap: impl FnOnce(f64) -> f64) -> Self {
        let speed = plan.velocity.abs();
        let log_decay = plan.decay.ln();
        let natural = if speed > plan.stop_velocity && plan.stop_velocity > 0.0 {
            (plan.stop_velocity / speed).ln() / log_decay
        } else if speed > 0.0 && plan.stop_velocity <= 0.0 {
            f64::INFINITY
        } else {
            0.0
        };
        let cap = (plan.max_secs / plan.frame_secs).max(1.0);
        let frames = natural.min(cap).max(1.0);

        let coast = plan.velocity * (1.0 - plan.decay.powf(frames)) / (1.0 - plan.decay);
        let to = snap(plan.from + coast);

        Self {
            from: plan.from,
            to,
            start: now,
            frames,
            frame_secs: plan.frame_secs,
            decay: plan.decay,
        }
    }

    /// Snapped resting value.
    pub fn target(&self) -> f64 {
        self.to
    }

    /// Total coasting time in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.frames * self.frame_secs
    }

    /// Wall-clock seconds left until the coast ends.
    pub fn remaining(&self, now: f64) -> f64 {
        (self.start + self.duration_secs() - now).max(0.0)
    }

    /// Value at wall-clock `now`.
    pub fn sample(&self, now: f64) -> f64 {
        let n = ((now - self.start) / self.frame_secs).max(0.0);
        if n >= self.frames {
            return self.to;
        }
        let done = (1.0 - self.decay.powf(n)) / (1.0 - self.decay.powf(self.frames));
        self.from + (self.to - self.from) * done
    }

    /// Whether the coast has reached its target.
    pub fn is_done(&self, now: f64) -> bool {
        now - self.start >= self.duration_secs()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/momentum.rs"]
mod tests;
