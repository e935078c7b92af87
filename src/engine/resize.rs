use crate::{
    config::TrackConfig,
    foundation::core::TrackMode,
    foundation::error::TrackResult,
    foundation::math::wrap_time,
    layout::measure::measure_or_degenerate,
    navigation::navigator::{Navigate, create_navigator},
    timeline::{centering::Centering, loop_timeline::Timeline},
};

/// Geometry reported by the host renderer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Geometry {
    /// Slide sizes along the track axis.
    pub sizes: Vec<f64>,
    /// Gap between slides.
    pub gap: f64,
    /// Viewport length along the track axis.
    pub container: f64,
}

impl Geometry {
    /// Whether the container can be laid out against. A zero or non-finite container is a
    /// transient measurement; the last good layout is held until a valid one arrives.
    pub fn is_measurable(&self) -> bool {
        self.container.is_finite() && self.container > 0.0
    }
}

/// What [`crate::TrackEngine::set_layout`] did with new geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeOutcome {
    /// Rebuilt immediately.
    Applied,
    /// Held back until the gesture in flight has been quiet for the debounce period.
    Queued,
    /// Ignored: the container was not measurable. The last good layout stays.
    Deferred,
}

/// Geometry waiting for a gesture to settle.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PendingResize {
    pub(crate) geometry: Geometry,
    pub(crate) at: f64,
}

impl PendingResize {
    pub(crate) fn is_settled(&self, now: f64, debounce: f64) -> bool {
        now - self.at >= debounce
    }
}

/// Measure, build the timeline, resolve centering and pick the navigator for `geometry`.
///
/// Invalid slide sizes fall back to a single slide filling the container.
#[tracing::instrument(skip(config, geometry), fields(slides = geometry.sizes.len(), container = geometry.container))]
pub fn build_navigator(config: &TrackConfig, geometry: &Geometry) -> TrackResult<Box<dyn Navigate>> {
    let layout = measure_or_degenerate(
        &geometry.sizes,
        geometry.gap,
        config.leading_padding,
        geometry.container,
    );
    let timeline = Timeline::build(&layout, config.speed_px_per_sec)?;
    let centering = Centering::resolve(
        geometry.container,
        &layout,
        config.speed_px_per_sec,
        config.centered,
    );
    tracing::info!(
        slides = layout.len(),
        total_length = layout.total_length(),
        duration = timeline.duration(),
        "layout built"
    );
    Ok(create_navigator(
        config.mode,
        timeline,
        centering,
        config.out_of_range,
    ))
}

/// Carry an unwrapped time from `old` into `new` coordinates.
///
/// The time is expressed as an offset from the nearest slide's resting time, scaled by the
/// loop durations, and re-applied to that slide's resting time in the new timeline. Returns
/// the new unwrapped time; callers clamp it through the new navigator.
pub(crate) fn reexpress(old: &dyn Navigate, new: &dyn Navigate, raw: f64, anchor: usize) -> f64 {
    let old_duration = old.timeline().duration();
    let mut offset = raw - old.target_time(anchor);
    if old.mode() == TrackMode::Loop && old_duration > 0.0 {
        offset = wrap_time(offset + old_duration / 2.0, old_duration) - old_duration / 2.0;
    }
    let scale = if old_duration > 0.0 {
        new.timeline().duration() / old_duration
    } else {
        1.0
    };
    let anchor = anchor.min(new.len() - 1);
    new.target_time(anchor) + offset * scale
}

#[cfg(test)]
#[path = "../../tests/unit/engine/resize.rs"]
mod tests;
