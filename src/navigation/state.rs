use crate::timeline::loop_timeline::RepeatBudget;

/// Where the track is and which slide is active.
///
/// `raw_time` is unwrapped; readers wrap it through the navigator before comparing or
/// rendering. Writes are crate-private and funnel through the navigator, the drag controller
/// and the engine that owns this value.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct NavigationState {
    current_index: usize,
    raw_time: f64,
    is_paused: bool,
    dirty: bool,
    terminal_base: Option<f64>,
    repeats: RepeatBudget,
}

impl NavigationState {
    /// Resting at `raw_time` on slide `index`.
    pub fn new(index: usize, raw_time: f64, repeat: Option<u32>) -> Self {
        Self {
            current_index: index,
            raw_time,
            is_paused: false,
            dirty: false,
            terminal_base: None,
            repeats: RepeatBudget::new(repeat),
        }
    }

    /// Cached active index; may be stale while [`Self::is_dirty`].
    pub fn cached_index(&self) -> usize {
        self.current_index
    }

    /// Unwrapped timeline position.
    pub fn raw_time(&self) -> f64 {
        self.raw_time
    }

    /// Whether the timeline's own progression is paused.
    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    /// Whether `raw_time` moved without index bookkeeping since the last resolve.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Whether a finite repeat budget has run out and the track has stopped wrapping.
    pub fn is_terminal(&self) -> bool {
        self.terminal_base.is_some()
    }

    /// Start of the loop tile the track stopped in.
    pub fn terminal_base(&self) -> Option<f64> {
        self.terminal_base
    }

    /// Remaining traversal budget.
    pub fn repeats(&self) -> &RepeatBudget {
        &self.repeats
    }

    pub(crate) fn repeats_mut(&mut self) -> &mut RepeatBudget {
        &mut self.repeats
    }

    /// Move the position outside index bookkeeping (drag, momentum, auto-scroll).
    pub(crate) fn set_raw_time(&mut self, t: f64) {
        if t != self.raw_time {
            self.raw_time = t;
            self.dirty = true;
        }
    }

    /// Move the position as part of index bookkeeping; the cached index stays authoritative.
    pub(crate) fn set_raw_time_tracked(&mut self, t: f64) {
        self.raw_time = t;
    }

    pub(crate) fn commit_index(&mut self, index: usize) {
        self.current_index = index;
        self.dirty = false;
    }

    pub(crate) fn set_paused(&mut self, paused: bool) {
        self.is_paused = paused;
    }

    pub(crate) fn set_terminal_base(&mut self, base: Option<f64>) {
        self.terminal_base = base;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/navigation/state.rs"]
mod tests;
