use crate::{
    animation::momentum::{Momentum, MomentumPlan},
    config::DragConfig,
    navigation::{navigator::Navigate, state::NavigationState},
};

/// Upper bound on coasting time at `drag_factor == 1.0`.
pub const MOMENTUM_BASE_SECS: f64 = 1.5;

/// Weight of the newest sample in the smoothed velocity estimate.
const VELOCITY_SMOOTHING: f64 = 0.8;

/// Observable phase of the drag/inertia state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DragPhase {
    /// No gesture in progress.
    Idle,
    /// Pointer is down and moving the track.
    Dragging,
    /// Released with velocity; momentum is coasting.
    Releasing,
    /// Released without velocity; snapping to the closest slide.
    SettledDirectly,
}

/// What a pointer release turns into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Release {
    /// Coast with the captured velocity (pixels per reference frame).
    Momentum {
        /// Smoothed pointer velocity at release.
        velocity_px: f64,
    },
    /// Snap straight to the closest slide.
    Settle,
}

/// One pointer gesture, from pointer-down to release.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    start_pointer: f64,
    start_time: f64,
    last_pointer: f64,
    last_sample_time: f64,
    velocity: f64,
    anchor_index: usize,
}

impl DragSession {
    /// Start a gesture at `pointer`, snapshotting `raw_time` as the drag origin.
    pub fn begin(pointer: f64, now: f64, raw_time: f64, anchor_index: usize) -> Self {
        tracing::debug!(pointer, raw_time, anchor_index, "drag started");
        Self {
            start_pointer: pointer,
            start_time: raw_time,
            last_pointer: pointer,
            last_sample_time: now,
            velocity: 0.0,
            anchor_index,
        }
    }

    /// Timeline time at pointer-down.
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Closest slide at pointer-down.
    pub fn anchor_index(&self) -> usize {
        self.anchor_index
    }

    /// Pointer travel since pointer-down.
    pub fn delta_px(&self) -> f64 {
        self.last_pointer - self.start_pointer
    }

    /// Smoothed velocity in pixels per reference frame.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Record a pointer sample. Velocity is normalized to the reference frame so it does not
    /// depend on how often the host delivers samples.
    pub fn update(&mut self, pointer: f64, now: f64, cfg: &DragConfig) {
        let dt = now - self.last_sample_time;
        let dx = pointer - self.last_pointer;
        if dt > 0.0 {
            let sample = dx / dt * cfg.reference_frame_secs;
            self.velocity = sample * VELOCITY_SMOOTHING + self.velocity * (1.0 - VELOCITY_SMOOTHING);
            self.last_sample_time = now;
        }
        self.last_pointer = pointer;
    }

    /// Unwrapped timeline time implied by the pointer travel so far. Pixels convert through
    /// the loop length, so a resize mid-drag keeps the same proportional motion.
    pub fn raw_time(&self, nav: &dyn Navigate, cfg: &DragConfig) -> f64 {
        self.start_time - nav.timeline().pixels_to_time(self.delta_px() * cfg.sensitivity)
    }

    /// Finish the gesture. A pointer that rested before release loses velocity as if it had
    /// been coasting for the idle time.
    pub fn release(&mut self, pointer: f64, now: f64, cfg: &DragConfig) -> Release {
        if pointer != self.last_pointer {
            self.update(pointer, now, cfg);
        } else {
            let idle_frames = (now - self.last_sample_time).max(0.0) / cfg.reference_frame_secs;
            self.velocity *= cfg.decay.powf(idle_frames);
        }
        let px_per_sec = self.velocity.abs() / cfg.reference_frame_secs;
        if px_per_sec > cfg.velocity_threshold {
            tracing::debug!(px_per_sec, "drag released with momentum");
            Release::Momentum {
                velocity_px: self.velocity,
            }
        } else {
            tracing::debug!(px_per_sec, "drag released without momentum");
            Release::Settle
        }
    }

    /// Move the drag origin, keeping the pointer travel. Used after a rebuild.
    pub(crate) fn reanchor(&mut self, start_time: f64) {
        self.start_time = start_time;
    }
}

/// Plan the momentum coast for a release with `velocity_px` (pixels per reference frame).
pub fn plan_momentum(
    nav: &dyn Navigate,
    state: &NavigationState,
    velocity_px: f64,
    now: f64,
    cfg: &DragConfig,
    snap_increment: Option<f64>,
) -> Momentum {
    let timeline = nav.timeline();
    let velocity = -timeline.pixels_to_time(velocity_px * cfg.sensitivity);
    let stop_velocity = timeline
        .pixels_to_time(cfg.velocity_threshold * cfg.reference_frame_secs * cfg.sensitivity);
    let plan = MomentumPlan {
        from: state.raw_time(),
        velocity,
        stop_velocity,
        decay: cfg.decay,
        frame_secs: cfg.reference_frame_secs,
        max_secs: cfg.drag_factor * MOMENTUM_BASE_SECS,
    };
    Momentum::plan(plan, now, |rest| {
        nav.snap_time(state, nav.normalize(state, rest), snap_increment)
    })
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/drag.rs"]
mod tests;
