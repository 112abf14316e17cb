use thiserror::Error;

/// Errors returned when a playback session cannot be started.
///
/// Nothing inside a running session is fallible; these are all
/// configuration or lifecycle misuse.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlaybackError {
    #[error("a playback session is already active on this engine")]
    AlreadyActive,

    #[error("invalid playback timing: {0}")]
    InvalidTiming(String),

    #[error("playback must be started from within a tokio runtime")]
    NoRuntime,
}
