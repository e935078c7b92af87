/// A request delivered into the engine. Wall-clock time travels alongside in
/// [`crate::TrackEngine::dispatch`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// New slide sizes, gap and container length from the host renderer.
    SetLayout {
        /// Slide sizes along the track axis.
        sizes: Vec<f64>,
        /// Gap between slides.
        gap: f64,
        /// Viewport length along the track axis.
        container: f64,
    },
    /// Transition to a slide index.
    GoToIndex {
        /// Target index; wraps on looping tracks.
        index: i64,
    },
    /// Transition to the next slide.
    StepNext,
    /// Transition to the previous slide.
    StepPrevious,
    /// Pointer-down inside the track.
    BeginDrag {
        /// Pointer position along the track axis.
        pointer: f64,
    },
    /// Pointer moved while down.
    UpdateDrag {
        /// Pointer position along the track axis.
        pointer: f64,
    },
    /// Pointer released.
    EndDrag {
        /// Pointer position along the track axis.
        pointer: f64,
    },
    /// Stop the timeline's own progression and autoplay.
    Pause,
    /// Undo [`Command::Pause`].
    Resume,
}

/// A notification for the rendering layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TrackEvent {
    /// The active slide changed.
    ActiveIndexChanged {
        /// New active slide.
        index: usize,
    },
    /// The track moved; place slides at `offsets`.
    PositionTick {
        /// Display time (wrapped on looping tracks).
        time: f64,
        /// Leading-edge pixel offset of each slide relative to the viewport start.
        offsets: Vec<f64>,
    },
    /// A transition, snap or momentum coast came to rest.
    Settled {
        /// Slide the track rests on.
        index: usize,
    },
    /// A rebuilt layout took effect.
    LayoutApplied {
        /// Slide count of the new layout.
        slides: usize,
        /// Loop duration of the new timeline.
        duration: f64,
    },
    /// The repeat budget ran out; the track no longer wraps.
    Stopped,
}

#[cfg(test)]
#[path = "../../tests/unit/engine/command.rs"]
mod tests;
