use crate::{
    animation::{ease::Ease, tween::Tween},
    config::TransitionConfig,
    foundation::core::{OutOfRangePolicy, TrackMode},
    foundation::error::{TrackError, TrackResult},
    foundation::math::{circular_distance, forward_distance, quantize},
    navigation::state::NavigationState,
    timeline::{centering::Centering, loop_timeline::Timeline},
};

/// Timing for one navigator-issued transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionOpts {
    /// Wall-clock seconds.
    pub duration_secs: f64,
    /// Easing curve.
    pub ease: Ease,
}

impl From<TransitionConfig> for TransitionOpts {
    fn from(cfg: TransitionConfig) -> Self {
        Self {
            duration_secs: cfg.duration_secs,
            ease: cfg.ease,
        }
    }
}

/// Handle for an issued transition. The owner of the navigation state drives it; issuing
/// a new one replaces it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    /// Slide the transition lands on.
    pub index: usize,
    /// Unwrapped timeline motion.
    pub tween: Tween,
}

/// Index/time queries and commands over one built timeline.
///
/// Implemented once for looping and once for finite tracks; [`create_navigator`] picks the
/// implementation when a layout is built. Navigators hold no mutable state of their own.
pub trait Navigate: std::fmt::Debug {
    /// Topology this navigator implements.
    fn mode(&self) -> TrackMode;

    /// Timeline the navigator was built over.
    fn timeline(&self) -> &Timeline;

    /// Centering offsets folded into every label lookup.
    fn centering(&self) -> &Centering;

    /// Slide count.
    fn len(&self) -> usize {
        self.timeline().len()
    }

    /// Always `false`: a layout has at least one slide.
    fn is_empty(&self) -> bool {
        self.timeline().is_empty()
    }

    /// Resting time for slide `index` in the first loop tile (label minus centering offset).
    fn target_time(&self, index: usize) -> f64 {
        self.timeline().label(index) - self.centering().offset(index)
    }

    /// Issue a transition to `target`, updating the cached index immediately.
    fn to_index(
        &self,
        state: &mut NavigationState,
        target: i64,
        now: f64,
        opts: TransitionOpts,
    ) -> TrackResult<Transition>;

    /// `to_index(current + 1)`.
    fn next(
        &self,
        state: &mut NavigationState,
        now: f64,
        opts: TransitionOpts,
    ) -> TrackResult<Transition> {
        let cur = self.current(state) as i64;
        self.to_index(state, cur + 1, now, opts)
    }

    /// `to_index(current - 1)`.
    fn previous(
        &self,
        state: &mut NavigationState,
        now: f64,
        opts: TransitionOpts,
    ) -> TrackResult<Transition> {
        let cur = self.current(state) as i64;
        self.to_index(state, cur - 1, now, opts)
    }

    /// Slide whose resting time is nearest `time` (default: the current raw time). Ties go
    /// to the lowest index.
    fn closest_index(&self, state: &NavigationState, time: Option<f64>) -> usize;

    /// Cached active index, recomputed first if the position moved outside bookkeeping.
    fn current(&self, state: &mut NavigationState) -> usize {
        if state.is_dirty() {
            let index = self.closest_index(state, None);
            state.commit_index(index);
        }
        state.cached_index()
    }

    /// Clamp an unwrapped time into the span the track may occupy.
    fn normalize(&self, state: &NavigationState, raw: f64) -> f64;

    /// Nearest snap point to `raw`: a slide's resting time, or a multiple of `increment`.
    fn snap_time(&self, state: &NavigationState, raw: f64, increment: Option<f64>) -> f64;

    /// Time as seen by the rendering layer.
    fn display_time(&self, raw: f64) -> f64;

    /// Leading-edge pixel offset of every slide at `raw`.
    fn slide_offsets(&self, raw: f64) -> Vec<f64>;

    /// Stop wrapping: pin the state to the loop tile it is currently in.
    fn enter_terminal(&self, _state: &mut NavigationState) {}
}

/// Build the navigator for `mode` over a freshly built timeline.
pub fn create_navigator(
    mode: TrackMode,
    timeline: Timeline,
    centering: Centering,
    policy: OutOfRangePolicy,
) -> Box<dyn Navigate> {
    match mode {
        TrackMode::Loop => Box::new(LoopNavigator {
            timeline,
            centering,
            policy,
        }),
        TrackMode::Finite => Box::new(FiniteNavigator {
            timeline,
            centering,
            policy,
        }),
    }
}

/// Navigator for a seamless wrap-around track.
#[derive(Clone, Debug)]
pub struct LoopNavigator {
    timeline: Timeline,
    centering: Centering,
    policy: OutOfRangePolicy,
}

impl Navigate for LoopNavigator {
    fn mode(&self) -> TrackMode {
        TrackMode::Loop
    }

    fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    fn centering(&self) -> &Centering {
        &self.centering
    }

    fn to_index(
        &self,
        state: &mut NavigationState,
        target: i64,
        now: f64,
        opts: TransitionOpts,
    ) -> TrackResult<Transition> {
        if let Some(base) = state.terminal_base() {
            return bounded_to_index(self, state, target, base, self.policy, now, opts);
        }

        let n = self.len() as i64;
        let current = self.current(state) as i64;
        let index = target.rem_euclid(n);
        let mut delta = (index - current).rem_euclid(n);
        if 2 * delta > n {
            delta -= n;
        }
        let index = index as usize;

        let duration = self.timeline.duration();
        let goal = self.timeline.wrap(self.target_time(index));
        let from = state.raw_time();
        let here = self.timeline.wrap(from);
        let dest = if delta > 0 {
            from + forward_distance(here, goal, duration)
        } else if delta < 0 {
            from - forward_distance(goal, here, duration)
        } else {
            from + shortest_offset(here, goal, duration)
        };

        tracing::debug!(from = current, to = index, delta, "loop transition");
        state.commit_index(index);
        Ok(Transition {
            index,
            tween: Tween::new(from, dest, now, opts.duration_secs, opts.ease),
        })
    }

    fn closest_index(&self, state: &NavigationState, time: Option<f64>) -> usize {
        let t = time.unwrap_or_else(|| state.raw_time());
        let duration = self.timeline.duration();
        let mut best = 0;
        let mut best_d = f64::INFINITY;
        for i in 0..self.len() {
            let d = circular_distance(t, self.target_time(i), duration);
            if d < best_d {
                best = i;
                best_d = d;
            }
        }
        best
    }

    fn normalize(&self, state: &NavigationState, raw: f64) -> f64 {
        match state.terminal_base() {
            Some(base) => clamp_to_span(self, base, raw),
            None => raw,
        }
    }

    fn snap_time(&self, state: &NavigationState, raw: f64, increment: Option<f64>) -> f64 {
        let duration = self.timeline.duration();
        let snapped = match increment {
            Some(inc) => quantize(raw, self.target_time(0), inc),
            None => {
                let index = self.closest_index(state, Some(raw));
                let goal = self.timeline.wrap(self.target_time(index));
                raw + shortest_offset(self.timeline.wrap(raw), goal, duration)
            }
        };
        self.normalize(state, snapped)
    }

    fn display_time(&self, raw: f64) -> f64 {
        self.timeline.wrap(raw)
    }

    fn slide_offsets(&self, raw: f64) -> Vec<f64> {
        self.timeline.slide_offsets(raw, true)
    }

    fn enter_terminal(&self, state: &mut NavigationState) {
        if state.is_terminal() {
            return;
        }
        let origin = self.target_time(0);
        let duration = self.timeline.duration();
        let base = ((state.raw_time() - origin) / duration).floor() * duration;
        state.set_terminal_base(Some(base));
        let pinned = clamp_to_span(self, base, state.raw_time());
        state.set_raw_time(pinned);
        tracing::info!(base, "repeat budget exhausted; track stopped");
    }
}

/// Navigator for a bounded track: indices are not modular and time never wraps.
#[derive(Clone, Debug)]
pub struct FiniteNavigator {
    timeline: Timeline,
    centering: Centering,
    policy: OutOfRangePolicy,
}

impl Navigate for FiniteNavigator {
    fn mode(&self) -> TrackMode {
        TrackMode::Finite
    }

    fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    fn centering(&self) -> &Centering {
        &self.centering
    }

    fn to_index(
        &self,
        state: &mut NavigationState,
        target: i64,
        now: f64,
        opts: TransitionOpts,
    ) -> TrackResult<Transition> {
        bounded_to_index(self, state, target, 0.0, self.policy, now, opts)
    }

    fn closest_index(&self, state: &NavigationState, time: Option<f64>) -> usize {
        let t = time.unwrap_or_else(|| state.raw_time());
        let mut best = 0;
        let mut best_d = f64::INFINITY;
        for i in 0..self.len() {
            let d = (t - self.target_time(i)).abs();
            if d < best_d {
                best = i;
                best_d = d;
            }
        }
        best
    }

    fn normalize(&self, _state: &NavigationState, raw: f64) -> f64 {
        clamp_to_span(self, 0.0, raw)
    }

    fn snap_time(&self, state: &NavigationState, raw: f64, increment: Option<f64>) -> f64 {
        let snapped = match increment {
            Some(inc) => quantize(raw, self.target_time(0), inc),
            None => self.target_time(self.closest_index(state, Some(raw))),
        };
        self.normalize(state, snapped)
    }

    fn display_time(&self, raw: f64) -> f64 {
        raw
    }

    fn slide_offsets(&self, raw: f64) -> Vec<f64> {
        self.timeline.slide_offsets(raw, false)
    }
}

/// Signed offset of smallest magnitude moving from `from` to `to` on the circle.
fn shortest_offset(from: f64, to: f64, duration: f64) -> f64 {
    let d = forward_distance(from, to, duration);
    if d > duration / 2.0 { d - duration } else { d }
}

fn clamp_to_span(nav: &dyn Navigate, base: f64, raw: f64) -> f64 {
    let lo = base + nav.target_time(0);
    let hi = base + nav.target_time(nav.len() - 1);
    raw.clamp(lo, hi)
}

/// Non-wrapping `to_index`, shared by finite tracks and stopped loops.
fn bounded_to_index(
    nav: &dyn Navigate,
    state: &mut NavigationState,
    target: i64,
    base: f64,
    policy: OutOfRangePolicy,
    now: f64,
    opts: TransitionOpts,
) -> TrackResult<Transition> {
    let len = nav.len();
    let index = match usize::try_from(target) {
        Ok(i) if i < len => i,
        _ => match policy {
            OutOfRangePolicy::Reject => {
                tracing::debug!(target, len, "rejected out-of-range target");
                return Err(TrackError::out_of_range(target, len));
            }
            OutOfRangePolicy::Clamp => target.clamp(0, len as i64 - 1) as usize,
        },
    };

    let from = state.raw_time();
    let dest = base + nav.target_time(index);
    tracing::debug!(to = index, "bounded transition");
    state.commit_index(index);
    Ok(Transition {
        index,
        tween: Tween::new(from, dest, now, opts.duration_secs, opts.ease),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/navigation/navigator.rs"]
mod tests;
