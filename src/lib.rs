//! Looptrack is a positioning engine for seamless wrap-around carousels.
//!
//! Slides are laid out along one axis and mapped onto a looping timeline. The engine is
//! tick-driven and renderer-agnostic:
//!
//! - Build a [`TrackEngine`] from a [`TrackConfig`] and measured slide sizes
//! - Feed it [`Command`]s (index navigation, pointer drags, resizes) and periodic ticks
//! - Place slides from the [`TrackEvent`]s it returns
#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub(crate) mod animation;
pub(crate) mod config;
pub(crate) mod engine;
pub(crate) mod foundation;
pub(crate) mod interaction;
pub(crate) mod layout;
pub(crate) mod navigation;
pub(crate) mod timeline;

pub use crate::foundation::core::{Direction, OutOfRangePolicy, TrackMode};
pub use crate::foundation::error::{TrackError, TrackResult};
pub use crate::foundation::math::{circular_distance, wrap_time};

pub use crate::animation::ease::Ease;
pub use crate::animation::momentum::{Momentum, MomentumPlan};
pub use crate::animation::tween::Tween;
pub use crate::config::{AutoplayConfig, DragConfig, TrackConfig, TransitionConfig};
pub use crate::engine::command::{Command, TrackEvent};
pub use crate::engine::resize::{Geometry, ResizeOutcome, build_navigator};
pub use crate::engine::track::TrackEngine;
pub use crate::interaction::autoplay::Autoplay;
pub use crate::interaction::drag::{
    DragPhase, DragSession, MOMENTUM_BASE_SECS, Release, plan_momentum,
};
pub use crate::layout::measure::{Layout, Slide, measure, measure_or_degenerate};
pub use crate::navigation::navigator::{
    FiniteNavigator, LoopNavigator, Navigate, Transition, TransitionOpts, create_navigator,
};
pub use crate::navigation::state::NavigationState;
pub use crate::timeline::centering::Centering;
pub use crate::timeline::loop_timeline::{RepeatBudget, Timeline};
