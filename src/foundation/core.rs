/// Travel direction for autoplay and auto-scroll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Increasing index / increasing timeline time.
    #[default]
    Forward,
    /// Decreasing index / decreasing timeline time.
    Reverse,
}

impl Direction {
    /// `+1.0` for forward, `-1.0` for reverse.
    pub fn sign(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Reverse => -1.0,
        }
    }
}

/// Track topology, chosen once per layout build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackMode {
    /// Seamless wrap-around track; every index is valid modulo the slide count.
    #[default]
    Loop,
    /// Bounded track; indices are not modular.
    Finite,
}

/// What a non-wrapping track does with a target outside `[0, len)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutOfRangePolicy {
    /// Refuse the command with [`crate::TrackError::IndexOutOfRange`].
    #[default]
    Reject,
    /// Move to the nearest valid index instead.
    Clamp,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
