//! Error types for Playhead Core

use thiserror::Error;

/// Result type alias for session operations
pub type Result<T> = std::result::Result<T, Error>;

/// Session error types
///
/// Only synchronous failures surface here: misconfiguration detectable
/// before engine preparation starts, and misuse of a disposed session.
/// Asynchronous playback failures never raise an error across the async
/// boundary; they arrive as a single `PlaybackEvent::Error` on the
/// outbound queue.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported format hint: {hint}")]
    UnsupportedFormat { hint: String },

    #[error("Invalid asset URI: {0}")]
    InvalidUri(#[from] url::ParseError),

    #[error("Invalid playback speed: {speed}")]
    InvalidPlaybackSpeed { speed: f32 },

    #[error("Session already disposed")]
    SessionDisposed,
}

impl Error {
    /// Returns the error code used in outbound error records
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            Error::InvalidUri(_) => "INVALID_URI",
            Error::InvalidPlaybackSpeed { .. } => "INVALID_SPEED",
            Error::SessionDisposed => "SESSION_DISPOSED",
        }
    }
}
