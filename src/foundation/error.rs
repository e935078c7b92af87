/// Convenience result type used across looptrack.
pub type TrackResult<T> = Result<T, TrackError>;

/// Top-level error taxonomy used by engine APIs.
///
/// None of these are fatal: callers recover locally (degenerate layout, rejected command,
/// deferred resize) and the rendering layer never sees them.
#[derive(thiserror::Error, Debug)]
pub enum TrackError {
    /// Zero slides, a non-positive slide size, or an invalid gap.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    /// A navigation target outside `[0, len)` on a non-wrapping track.
    #[error("index {index} is out of range for {len} slides")]
    IndexOutOfRange {
        /// Requested index.
        index: i64,
        /// Slide count of the current layout.
        len: usize,
    },

    /// Invalid user-provided configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TrackError {
    /// Build a [`TrackError::InvalidLayout`] value.
    pub fn invalid_layout(msg: impl Into<String>) -> Self {
        Self::InvalidLayout(msg.into())
    }

    /// Build a [`TrackError::IndexOutOfRange`] value.
    pub fn out_of_range(index: i64, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// Build a [`TrackError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`TrackError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for TrackError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
