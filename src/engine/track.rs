use crate::{
    animation::{ease::Ease, momentum::Momentum},
    config::TrackConfig,
    engine::{
        command::{Command, TrackEvent},
        resize::{Geometry, PendingResize, ResizeOutcome, build_navigator, reexpress},
    },
    foundation::core::{Direction, TrackMode},
    foundation::error::{TrackError, TrackResult},
    interaction::{
        autoplay::Autoplay,
        drag::{DragPhase, DragSession, Release, plan_momentum},
    },
    layout::measure::Layout,
    navigation::{
        navigator::{Navigate, Transition, TransitionOpts},
        state::NavigationState,
    },
    timeline::loop_timeline::Timeline,
};

/// Who issued the transition currently driving the track.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TransitionOrigin {
    Command,
    Autoplay,
    Snap,
}

/// The single writer of `raw_time` at any moment. Replacing it cancels the previous writer.
#[derive(Clone, Debug)]
enum Owner {
    Idle,
    Transition {
        transition: Transition,
        origin: TransitionOrigin,
    },
    Drag(DragSession),
    Momentum(Momentum),
}

impl Owner {
    fn is_gesture(&self) -> bool {
        matches!(self, Self::Drag(_) | Self::Momentum(_))
    }
}

/// Tick-driven carousel engine.
///
/// Owns the navigation state, the current navigator and every controller that may move the
/// track. Hosts feed it [`Command`]s and periodic [`Self::tick`] calls with a monotonic
/// wall-clock time in seconds, and render from the [`TrackEvent`]s it returns.
#[derive(Debug)]
pub struct TrackEngine {
    config: TrackConfig,
    nav: Box<dyn Navigate>,
    state: NavigationState,
    owner: Owner,
    drag_phase: DragPhase,
    autoplay: Option<Autoplay>,
    geometry: Geometry,
    pending: Option<PendingResize>,
    clock: f64,
    last_notified: Option<usize>,
    last_tick_raw: Option<f64>,
    events: Vec<TrackEvent>,
}

impl TrackEngine {
    /// Build an engine over `sizes` inside a `container`-long viewport, resting on slide 0.
    ///
    /// Invalid slide sizes fall back to a single slide filling the container; the container
    /// itself must be measurable.
    pub fn new(config: TrackConfig, sizes: &[f64], container: f64, now: f64) -> TrackResult<Self> {
        config.validate()?;
        let geometry = Geometry {
            sizes: sizes.to_vec(),
            gap: config.gap,
            container,
        };
        if !geometry.is_measurable() {
            return Err(TrackError::invalid_layout(format!(
                "container must be > 0, got {container}"
            )));
        }
        let nav = build_navigator(&config, &geometry)?;
        let state = NavigationState::new(0, nav.target_time(0), config.repeat);
        let autoplay = config.autoplay.map(|cfg| {
            let mut autoplay = Autoplay::new(cfg);
            autoplay.start(now);
            autoplay
        });

        Ok(Self {
            config,
            nav,
            state,
            owner: Owner::Idle,
            drag_phase: DragPhase::Idle,
            autoplay,
            geometry,
            pending: None,
            clock: now,
            last_notified: None,
            last_tick_raw: None,
            events: Vec::new(),
        })
    }

    /// Apply `command` at wall-clock `now`, then advance to `now` and return the events
    /// produced. A rejected command leaves the state untouched.
    pub fn dispatch(&mut self, command: Command, now: f64) -> TrackResult<Vec<TrackEvent>> {
        match command {
            Command::SetLayout {
                sizes,
                gap,
                container,
            } => {
                self.set_layout(&sizes, gap, container, now)?;
            }
            Command::GoToIndex { index } => self.go_to_index(index, now)?,
            Command::StepNext => self.step_next(now)?,
            Command::StepPrevious => self.step_previous(now)?,
            Command::BeginDrag { pointer } => self.begin_drag(pointer, now),
            Command::UpdateDrag { pointer } => self.update_drag(pointer, now),
            Command::EndDrag { pointer } => self.end_drag(pointer, now)?,
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
        }
        Ok(self.tick(now))
    }

    /// Advance every controller to `now` and return the events produced since the last drain.
    pub fn tick(&mut self, now: f64) -> Vec<TrackEvent> {
        let dt = (now - self.clock).max(0.0);
        self.clock = self.clock.max(now);

        self.apply_pending(now);
        self.advance_owner(now, dt);
        self.drive_autoplay(now);
        self.notify();
        self.drain_events()
    }

    /// Take buffered events without advancing.
    pub fn drain_events(&mut self) -> Vec<TrackEvent> {
        std::mem::take(&mut self.events)
    }

    /// New geometry from the host renderer.
    ///
    /// Unmeasurable containers are ignored; geometry arriving during a drag or momentum coast
    /// waits until it has been quiet for `resize_debounce_secs`.
    pub fn set_layout(
        &mut self,
        sizes: &[f64],
        gap: f64,
        container: f64,
        now: f64,
    ) -> TrackResult<ResizeOutcome> {
        let geometry = Geometry {
            sizes: sizes.to_vec(),
            gap,
            container,
        };
        if !geometry.is_measurable() {
            tracing::debug!(container, "resize deferred: container not measurable");
            return Ok(ResizeOutcome::Deferred);
        }
        if self.owner.is_gesture() {
            tracing::debug!(now, "resize queued behind gesture");
            self.pending = Some(PendingResize { geometry, at: now });
            return Ok(ResizeOutcome::Queued);
        }
        self.pending = None;
        self.apply_geometry(geometry, now)?;
        Ok(ResizeOutcome::Applied)
    }

    /// Transition to `index` (wrapping on looping tracks).
    pub fn go_to_index(&mut self, index: i64, now: f64) -> TrackResult<()> {
        let opts = TransitionOpts::from(self.config.transition);
        let transition = self.nav.to_index(&mut self.state, index, now, opts)?;
        self.take_transition(transition, TransitionOrigin::Command, now);
        Ok(())
    }

    /// Transition to the slide after the current one.
    pub fn step_next(&mut self, now: f64) -> TrackResult<()> {
        let opts = TransitionOpts::from(self.config.transition);
        let transition = self.nav.next(&mut self.state, now, opts)?;
        self.take_transition(transition, TransitionOrigin::Command, now);
        Ok(())
    }

    /// Transition to the slide before the current one.
    pub fn step_previous(&mut self, now: f64) -> TrackResult<()> {
        let opts = TransitionOpts::from(self.config.transition);
        let transition = self.nav.previous(&mut self.state, now, opts)?;
        self.take_transition(transition, TransitionOrigin::Command, now);
        Ok(())
    }

    /// Pointer-down: cancel whatever is moving the track and follow the pointer.
    pub fn begin_drag(&mut self, pointer: f64, now: f64) {
        let anchor = self.nav.closest_index(&self.state, None);
        let session = DragSession::begin(pointer, now, self.state.raw_time(), anchor);
        self.owner = Owner::Drag(session);
        self.drag_phase = DragPhase::Dragging;
        if let Some(autoplay) = self.autoplay.as_mut() {
            autoplay.suspend();
        }
    }

    /// Pointer moved. Ignored when no drag is in progress.
    pub fn update_drag(&mut self, pointer: f64, now: f64) {
        let Owner::Drag(session) = &mut self.owner else {
            tracing::debug!(pointer, "drag update without an active drag");
            return;
        };
        session.update(pointer, now, &self.config.drag);
        let raw = session.raw_time(self.nav.as_ref(), &self.config.drag);
        let raw = self.nav.normalize(&self.state, raw);
        self.move_to(raw);
    }

    /// Pointer released: coast with momentum or snap to the closest slide.
    pub fn end_drag(&mut self, pointer: f64, now: f64) -> TrackResult<()> {
        let mut session = match std::mem::replace(&mut self.owner, Owner::Idle) {
            Owner::Drag(session) => session,
            other => {
                tracing::debug!(pointer, "drag end without an active drag");
                self.owner = other;
                return Ok(());
            }
        };

        let release = session.release(pointer, now, &self.config.drag);
        let raw = session.raw_time(self.nav.as_ref(), &self.config.drag);
        let raw = self.nav.normalize(&self.state, raw);
        self.move_to(raw);

        match release {
            Release::Momentum { velocity_px } => {
                let momentum = plan_momentum(
                    self.nav.as_ref(),
                    &self.state,
                    velocity_px,
                    now,
                    &self.config.drag,
                    self.config.snap_increment,
                );
                tracing::debug!(target = momentum.target(), "momentum coast");
                self.owner = Owner::Momentum(momentum);
                self.drag_phase = DragPhase::Releasing;
            }
            Release::Settle => {
                let index = self.nav.closest_index(&self.state, None);
                let opts = TransitionOpts {
                    duration_secs: self.config.drag.snap_duration_secs,
                    ease: Ease::OutCubic,
                };
                let transition = self.nav.to_index(&mut self.state, index as i64, now, opts)?;
                self.owner = Owner::Transition {
                    transition,
                    origin: TransitionOrigin::Snap,
                };
                self.drag_phase = DragPhase::SettledDirectly;
            }
        }
        Ok(())
    }

    /// Stop the timeline's own progression and autoplay. Transitions still complete.
    pub fn pause(&mut self) {
        self.state.set_paused(true);
    }

    /// Undo [`Self::pause`].
    pub fn resume(&mut self) {
        self.state.set_paused(false);
    }

    /// Active slide.
    pub fn current(&mut self) -> usize {
        self.nav.current(&mut self.state)
    }

    /// Slide nearest the current position.
    pub fn closest_index(&self) -> usize {
        self.nav.closest_index(&self.state, None)
    }

    /// Unwrapped timeline position.
    pub fn raw_time(&self) -> f64 {
        self.state.raw_time()
    }

    /// Timeline position as the rendering layer sees it.
    pub fn time(&self) -> f64 {
        self.nav.display_time(self.state.raw_time())
    }

    /// Per-slide leading-edge pixel offsets at the current position.
    pub fn slide_offsets(&self) -> Vec<f64> {
        self.nav.slide_offsets(self.state.raw_time())
    }

    /// Phase of the pointer gesture state machine.
    pub fn drag_phase(&self) -> DragPhase {
        self.drag_phase
    }

    /// Whether a transition, drag or coast currently owns the position.
    pub fn is_animating(&self) -> bool {
        !matches!(self.owner, Owner::Idle)
    }

    /// Wall-clock time of the next autoplay step, if one is scheduled.
    pub fn next_autoplay_at(&self) -> Option<f64> {
        self.autoplay.as_ref().and_then(Autoplay::next_due)
    }

    /// Whether a queued resize is waiting for its debounce period.
    pub fn has_pending_resize(&self) -> bool {
        self.pending.is_some()
    }

    /// Navigator for the current layout.
    pub fn navigator(&self) -> &dyn Navigate {
        self.nav.as_ref()
    }

    /// Navigation state.
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Current timeline.
    pub fn timeline(&self) -> &Timeline {
        self.nav.timeline()
    }

    /// Current layout.
    pub fn layout(&self) -> &Layout {
        self.nav.timeline().layout()
    }

    /// Geometry the current layout was built from.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Engine configuration.
    pub fn config(&self) -> &TrackConfig {
        &self.config
    }

    fn take_transition(&mut self, transition: Transition, origin: TransitionOrigin, now: f64) {
        tracing::debug!(index = transition.index, ?origin, "transition issued");
        self.owner = Owner::Transition { transition, origin };
        self.drag_phase = DragPhase::Idle;
        // A finite track halts autoplay at its end; navigating by hand re-arms it.
        if self.nav.mode() != TrackMode::Finite {
            return;
        }
        if let Some(autoplay) = self.autoplay.as_mut().filter(|a| !a.is_scheduled()) {
            autoplay.start(now);
        }
    }

    /// Write an untracked position change and charge the repeat budget for it.
    fn move_to(&mut self, raw: f64) {
        let prev = self.state.raw_time();
        self.state.set_raw_time(raw);
        self.charge_repeats(prev);
    }

    fn charge_repeats(&mut self, prev: f64) {
        let next = self.state.raw_time();
        if self.nav.mode() != TrackMode::Loop || self.state.is_terminal() || next == prev {
            return;
        }
        let exhausted = self
            .state
            .repeats_mut()
            .record(self.nav.timeline(), prev, next);
        if exhausted {
            self.stop_repeating();
        }
    }

    fn stop_repeating(&mut self) {
        self.nav.enter_terminal(&mut self.state);
        if !matches!(self.owner, Owner::Drag(_)) {
            self.owner = Owner::Idle;
            self.drag_phase = DragPhase::Idle;
        }
        let index = self.nav.closest_index(&self.state, None);
        self.state.commit_index(index);
        if let Some(autoplay) = self.autoplay.as_mut() {
            autoplay.stop();
        }
        self.events.push(TrackEvent::Stopped);
    }

    fn apply_pending(&mut self, now: f64) {
        let debounce = self.config.resize_debounce_secs;
        if !self
            .pending
            .as_ref()
            .is_some_and(|p| p.is_settled(now, debounce))
        {
            return;
        }
        let Some(pending) = self.pending.take() else {
            return;
        };
        if let Err(err) = self.apply_geometry(pending.geometry, now) {
            tracing::warn!(%err, "queued resize failed; keeping the previous layout");
        }
    }

    /// Rebuild over `geometry` and carry the position and any in-flight motion across.
    #[tracing::instrument(skip(self, geometry), fields(slides = geometry.sizes.len(), container = geometry.container))]
    fn apply_geometry(&mut self, geometry: Geometry, now: f64) -> TrackResult<()> {
        let nav = build_navigator(&self.config, &geometry)?;
        let was_paused = self.state.is_paused();
        self.state.set_paused(true);

        let index = self.nav.current(&mut self.state);
        let raw = self.state.raw_time();
        let anchor = self.nav.closest_index(&self.state, None);
        let old = std::mem::replace(&mut self.nav, nav);
        self.state
            .repeats_mut()
            .rescale(self.nav.timeline().duration() / old.timeline().duration());
        let last = self.nav.len() - 1;
        let index = index.min(last);
        if self.state.is_terminal() {
            self.state.set_terminal_base(Some(0.0));
        }

        let owner = std::mem::replace(&mut self.owner, Owner::Idle);
        let result = self.carry_owner(old.as_ref(), owner, raw, anchor, index, now);

        self.geometry = geometry;
        self.state.set_paused(was_paused);
        self.last_tick_raw = None;
        self.events.push(TrackEvent::LayoutApplied {
            slides: self.nav.len(),
            duration: self.nav.timeline().duration(),
        });
        result
    }

    fn carry_owner(
        &mut self,
        old: &dyn Navigate,
        owner: Owner,
        raw: f64,
        anchor: usize,
        index: usize,
        now: f64,
    ) -> TrackResult<()> {
        let last = self.nav.len() - 1;
        match owner {
            Owner::Idle => {
                let t = self.nav.normalize(&self.state, self.nav.target_time(index));
                self.state.set_raw_time_tracked(t);
                self.state.commit_index(index);
            }
            Owner::Transition { transition, origin } => {
                let here = reexpress(old, self.nav.as_ref(), raw, anchor);
                let here = self.nav.normalize(&self.state, here);
                self.state.set_raw_time_tracked(here);
                let dest = transition.index.min(last);
                self.state.commit_index(dest);
                let opts = TransitionOpts {
                    duration_secs: transition.tween.remaining(now),
                    ease: transition.tween.ease(),
                };
                let transition = self.nav.to_index(&mut self.state, dest as i64, now, opts)?;
                self.owner = Owner::Transition { transition, origin };
            }
            Owner::Drag(mut session) => {
                let start = reexpress(
                    old,
                    self.nav.as_ref(),
                    session.start_time(),
                    session.anchor_index(),
                );
                session.reanchor(start);
                let t = session.raw_time(self.nav.as_ref(), &self.config.drag);
                let t = self.nav.normalize(&self.state, t);
                self.state.set_raw_time(t);
                self.owner = Owner::Drag(session);
            }
            Owner::Momentum(momentum) => {
                let dest = old
                    .closest_index(&self.state, Some(momentum.target()))
                    .min(last);
                let here = reexpress(old, self.nav.as_ref(), raw, anchor);
                let here = self.nav.normalize(&self.state, here);
                self.state.set_raw_time_tracked(here);
                self.state.commit_index(dest);
                let opts = TransitionOpts {
                    duration_secs: momentum.remaining(now),
                    ease: Ease::OutCubic,
                };
                let transition = self.nav.to_index(&mut self.state, dest as i64, now, opts)?;
                self.owner = Owner::Transition {
                    transition,
                    origin: TransitionOrigin::Snap,
                };
            }
        }
        Ok(())
    }

    fn advance_owner(&mut self, now: f64, dt: f64) {
        let prev = self.state.raw_time();
        let mut settled = None;
        match &self.owner {
            Owner::Idle => {
                if self.config.auto_scroll && !self.state.is_paused() && !self.state.is_terminal() {
                    let raw = self.nav.normalize(&self.state, prev + dt * self.config.direction.sign());
                    self.state.set_raw_time(raw);
                }
            }
            Owner::Transition { transition, origin } => {
                self.state.set_raw_time_tracked(transition.tween.sample(now));
                if transition.tween.is_done(now) {
                    tracing::debug!(index = transition.index, ?origin, "transition settled");
                    settled = Some(transition.index);
                }
            }
            Owner::Momentum(momentum) => {
                self.state.set_raw_time(momentum.sample(now));
                if momentum.is_done(now) {
                    settled = Some(self.nav.closest_index(&self.state, None));
                }
            }
            Owner::Drag(_) => {}
        }

        if let Some(index) = settled {
            self.state.commit_index(index);
            self.owner = Owner::Idle;
            self.drag_phase = DragPhase::Idle;
            self.events.push(TrackEvent::Settled { index });
        }
        self.charge_repeats(prev);
    }

    fn drive_autoplay(&mut self, now: f64) {
        let blocked =
            self.state.is_paused() || self.owner.is_gesture() || self.state.is_terminal();
        let Some(autoplay) = self.autoplay.as_mut() else {
            return;
        };
        if blocked {
            autoplay.suspend();
            return;
        }
        autoplay.resume(now);
        let Some(direction) = autoplay.due(now) else {
            return;
        };
        if self.nav.mode() == TrackMode::Finite {
            let current = self.nav.current(&mut self.state);
            let at_end = match direction {
                Direction::Forward => current + 1 >= self.nav.len(),
                Direction::Reverse => current == 0,
            };
            if at_end {
                tracing::debug!(current, "autoplay halted at the end of the track");
                autoplay.stop();
                return;
            }
        }

        let opts = TransitionOpts::from(self.config.transition);
        let step = match direction {
            Direction::Forward => self.nav.next(&mut self.state, now, opts),
            Direction::Reverse => self.nav.previous(&mut self.state, now, opts),
        };
        match step {
            Ok(transition) => {
                autoplay.stepped(now);
                tracing::debug!(index = transition.index, "autoplay step");
                self.owner = Owner::Transition {
                    transition,
                    origin: TransitionOrigin::Autoplay,
                };
                self.drag_phase = DragPhase::Idle;
            }
            Err(err) => {
                tracing::debug!(%err, "autoplay reached the end of the track");
                autoplay.stop();
            }
        }
    }

    fn notify(&mut self) {
        let index = self.nav.current(&mut self.state);
        if self.last_notified != Some(index) {
            self.last_notified = Some(index);
            self.events.push(TrackEvent::ActiveIndexChanged { index });
        }
        let raw = self.state.raw_time();
        if self.last_tick_raw != Some(raw) {
            self.last_tick_raw = Some(raw);
            self.events.push(TrackEvent::PositionTick {
                time: self.nav.display_time(raw),
                offsets: self.nav.slide_offsets(raw),
            });
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/track.rs"]
mod tests;
