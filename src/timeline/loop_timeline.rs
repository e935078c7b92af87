use crate::{
    foundation::error::{TrackError, TrackResult},
    foundation::math::wrap_time,
    layout::measure::Layout,
};

/// Virtual wrap-around time axis over one loop of the track.
///
/// Moving forward through time at `speed` traces the slides in index order and then wraps
/// to slide 0. Only one tile is materialized; every position is taken modulo `duration`.
#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    layout: Layout,
    speed: f64,
    duration: f64,
    labels: Vec<f64>,
}

impl Timeline {
    /// Build labels for `layout` at `speed` pixels per timeline second.
    #[tracing::instrument(skip(layout), fields(slides = layout.len()))]
    pub fn build(layout: &Layout, speed: f64) -> TrackResult<Self> {
        if !(speed.is_finite() && speed > 0.0) {
            return Err(TrackError::config("timeline speed must be > 0"));
        }
        let duration = layout.total_length() / speed;
        let labels = layout.slides().iter().map(|s| s.offset / speed).collect();
        tracing::debug!(duration, "timeline built");
        Ok(Self {
            layout: layout.clone(),
            speed,
            duration,
            labels,
        })
    }

    /// Geometry this timeline was built from.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Number of slides.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always `false`: a layout has at least one slide.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Length of one loop in timeline seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Pixels per timeline second.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Time at which each slide's leading edge reaches the track origin.
    pub fn labels(&self) -> &[f64] {
        &self.labels
    }

    /// Label of slide `index`. Panics on an out-of-range index.
    pub fn label(&self, index: usize) -> f64 {
        self.labels[index]
    }

    /// Map `t` into `[0, duration)`.
    pub fn wrap(&self, t: f64) -> f64 {
        wrap_time(t, self.duration)
    }

    /// Convert a pointer delta into a timeline delta, independent of the current speed.
    pub fn pixels_to_time(&self, px: f64) -> f64 {
        px / self.layout.total_length() * self.duration
    }

    /// Convert a timeline delta into pixels.
    pub fn time_to_pixels(&self, t: f64) -> f64 {
        t * self.speed
    }

    /// Leading-edge pixel position of every slide relative to the viewport start.
    ///
    /// With `wrapped`, each slide is placed in `[-size, total_length - size)` so a slide that
    /// fully leaves the leading side re-enters on the trailing side.
    pub fn slide_offsets(&self, raw_time: f64, wrapped: bool) -> Vec<f64> {
        let shift = self.time_to_pixels(raw_time);
        let total = self.layout.total_length();
        self.layout
            .slides()
            .iter()
            .map(|s| {
                let x = s.offset - shift;
                if wrapped {
                    wrap_time(x + s.size, total) - s.size
                } else {
                    x
                }
            })
            .collect()
    }
}

/// Relative slack when comparing accumulated travel to a full loop.
const TRAVEL_EPSILON: f64 = 1e-9;

/// Remaining full traversals before a looping track stops.
///
/// Only net travel counts: movement is accumulated with its sign and a traversal is charged
/// each time the accumulated travel reaches one loop duration in either direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct RepeatBudget {
    remaining: Option<u32>,
    travel: f64,
}

impl RepeatBudget {
    /// `None` repeats forever.
    pub fn new(repeat: Option<u32>) -> Self {
        Self {
            remaining: repeat,
            travel: 0.0,
        }
    }

    /// Signed travel, in timeline seconds, since the last charged traversal.
    pub fn travel(&self) -> f64 {
        self.travel
    }

    /// Traversals left, or `None` when unbounded.
    pub fn remaining(&self) -> Option<u32> {
        self.remaining
    }

    /// Whether the budget has run out.
    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }

    /// Accumulate the move from `prev` to `next` (unwrapped times) and charge every full
    /// loop of net travel. Returns `true` when this call exhausts the budget.
    pub fn record(&mut self, timeline: &Timeline, prev: f64, next: f64) -> bool {
        let Some(mut left) = self.remaining else {
            return false;
        };
        let duration = timeline.duration();
        if left == 0 || duration <= 0.0 {
            return false;
        }
        self.travel += next - prev;
        let full = duration * (1.0 - TRAVEL_EPSILON);
        while left > 0 && self.travel.abs() >= full {
            self.travel -= duration.copysign(self.travel);
            left -= 1;
            tracing::debug!(remaining = left, "traversal recorded");
        }
        self.remaining = Some(left);
        left == 0
    }

    /// Carry accumulated travel into a timeline whose duration changed by `factor`.
    pub(crate) fn rescale(&mut self, factor: f64) {
        if factor.is_finite() && factor > 0.0 {
            self.travel *= factor;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/loop_timeline.rs"]
mod tests;
