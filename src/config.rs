use std::path::Path;

use crate::{
    animation::ease::Ease,
    foundation::core::{Direction, OutOfRangePolicy, TrackMode},
    foundation::error::{TrackError, TrackResult},
};

/// Engine configuration, read once per layout build.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    /// Track travel speed; one timeline second covers this many pixels.
    pub speed_px_per_sec: f64,
    /// Optional snap quantum in timeline seconds. `None` snaps to the nearest slide.
    pub snap_increment: Option<f64>,
    /// Align the active slide's center (not its leading edge) with the viewport center.
    pub centered: bool,
    /// Gap between consecutive slides, in pixels. Also used as the trailing wrap gap.
    pub gap: f64,
    /// Space before slide 0 on the track, in pixels.
    pub leading_padding: f64,
    /// Travel direction for autoplay and auto-scroll.
    pub direction: Direction,
    /// Number of full traversals before the track stops. `None` repeats forever.
    pub repeat: Option<u32>,
    /// Loop or finite topology.
    pub mode: TrackMode,
    /// How non-wrapping navigation handles out-of-range targets.
    pub out_of_range: OutOfRangePolicy,
    /// Let the timeline progress on its own while idle and not paused.
    pub auto_scroll: bool,
    /// Timing for index transitions.
    pub transition: TransitionConfig,
    /// Fixed-interval stepping; disabled when `None`.
    pub autoplay: Option<AutoplayConfig>,
    /// Pointer drag and momentum tuning.
    pub drag: DragConfig,
    /// Quiet period before a resize that arrived mid-gesture is applied.
    pub resize_debounce_secs: f64,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            speed_px_per_sec: 100.0,
            snap_increment: None,
            centered: true,
            gap: 0.0,
            leading_padding: 0.0,
            direction: Direction::Forward,
            repeat: None,
            mode: TrackMode::Loop,
            out_of_range: OutOfRangePolicy::Reject,
            auto_scroll: false,
            transition: TransitionConfig::default(),
            autoplay: None,
            drag: DragConfig::default(),
            resize_debounce_secs: 0.15,
        }
    }
}

impl TrackConfig {
    /// Parse a config from JSON; missing fields take their defaults.
    pub fn from_json_str(s: &str) -> TrackResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and parse a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> TrackResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|e| {
            TrackError::Other(anyhow::Error::new(e).context(format!(
                "read config '{}'",
                path.display()
            )))
        })?;
        Self::from_json_str(&s)
    }

    /// Reject values the engine cannot build a timeline from.
    pub fn validate(&self) -> TrackResult<()> {
        if !(self.speed_px_per_sec.is_finite() && self.speed_px_per_sec > 0.0) {
            return Err(TrackError::config("speed_px_per_sec must be > 0"));
        }
        if let Some(inc) = self.snap_increment {
            if !(inc.is_finite() && inc > 0.0) {
                return Err(TrackError::config("snap_increment must be > 0"));
            }
        }
        if !(self.gap.is_finite() && self.gap >= 0.0) {
            return Err(TrackError::config("gap must be >= 0"));
        }
        if !(self.leading_padding.is_finite() && self.leading_padding >= 0.0) {
            return Err(TrackError::config("leading_padding must be >= 0"));
        }
        if self.repeat == Some(0) {
            return Err(TrackError::config("repeat must be >= 1 when set"));
        }
        if !(self.resize_debounce_secs.is_finite() && self.resize_debounce_secs >= 0.0) {
            return Err(TrackError::config("resize_debounce_secs must be >= 0"));
        }
        self.transition.validate()?;
        if let Some(autoplay) = &self.autoplay {
            autoplay.validate()?;
        }
        self.drag.validate()
    }
}

/// Timing for navigator-issued transitions.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    /// Seconds of wall-clock time per transition.
    pub duration_secs: f64,
    /// Easing curve.
    pub ease: Ease,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            duration_secs: 0.8,
            ease: Ease::InOutCubic,
        }
    }
}

impl TransitionConfig {
    fn validate(&self) -> TrackResult<()> {
        if !(self.duration_secs.is_finite() && self.duration_secs >= 0.0) {
            return Err(TrackError::config("transition.duration_secs must be >= 0"));
        }
        Ok(())
    }
}

/// Fixed-interval autoplay.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AutoplayConfig {
    /// Seconds between two consecutive autoplay steps.
    pub interval_secs: f64,
    /// `Forward` calls `next()`, `Reverse` calls `previous()`.
    pub direction: Direction,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            interval_secs: 3.0,
            direction: Direction::Forward,
        }
    }
}

impl AutoplayConfig {
    fn validate(&self) -> TrackResult<()> {
        if !(self.interval_secs.is_finite() && self.interval_secs > 0.0) {
            return Err(TrackError::config("autoplay.interval_secs must be > 0"));
        }
        Ok(())
    }
}

/// Pointer drag and momentum tuning.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Multiplier applied to pointer deltas before they move the timeline.
    pub sensitivity: f64,
    /// Scales the hard cap on momentum coasting time.
    pub drag_factor: f64,
    /// Release speed (px/s) below which the track settles without momentum.
    pub velocity_threshold: f64,
    /// Fraction of velocity kept per reference frame while coasting, in `(0, 1)`.
    pub decay: f64,
    /// Frame interval that velocity samples are normalized to.
    pub reference_frame_secs: f64,
    /// Duration of the snap that follows a low-velocity release. `0` jumps.
    pub snap_duration_secs: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            sensitivity: 1.0,
            drag_factor: 1.0,
            velocity_threshold: 50.0,
            decay: 0.95,
            reference_frame_secs: 1.0 / 60.0,
            snap_duration_secs: 0.3,
        }
    }
}

impl DragConfig {
    fn validate(&self) -> TrackResult<()> {
        if !(self.sensitivity.is_finite() && self.sensitivity > 0.0) {
            return Err(TrackError::config("drag.sensitivity must be > 0"));
        }
        if !(self.drag_factor.is_finite() && self.drag_factor > 0.0) {
            return Err(TrackError::config("drag.drag_factor must be > 0"));
        }
        if !(self.velocity_threshold.is_finite() && self.velocity_threshold >= 0.0) {
            return Err(TrackError::config("drag.velocity_threshold must be >= 0"));
        }
        if !(self.decay > 0.0 && self.decay < 1.0) {
            return Err(TrackError::config("drag.decay must be in (0, 1)"));
        }
        if !(self.reference_frame_secs.is_finite() && self.reference_frame_secs > 0.0) {
            return Err(TrackError::config("drag.reference_frame_secs must be > 0"));
        }
        if !(self.snap_duration_secs.is_finite() && self.snap_duration_secs >= 0.0) {
            return Err(TrackError::config("drag.snap_duration_secs must be >= 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
