//! Core types for Playhead sessions

use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Unique identifier for a playback session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Playback states reported by the native engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineState {
    /// No source prepared, or preparation was abandoned
    Idle,
    /// Loading media ahead of the playback position
    Buffering,
    /// Decoding pipeline primed; playback can begin or resume
    Ready,
    /// End of the asset reached
    Ended,
}

impl std::fmt::Display for EngineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineState::Idle => write!(f, "idle"),
            EngineState::Buffering => write!(f, "buffering"),
            EngineState::Ready => write!(f, "ready"),
            EngineState::Ended => write!(f, "ended"),
        }
    }
}

/// Error codes reported by the native engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineErrorCode {
    /// A live-stream seek fell behind the live window. Recoverable by
    /// repositioning to the default live position and re-preparing.
    BehindLiveWindow,
    /// Any other engine failure, passed through verbatim.
    Other(String),
}

/// A single notification delivered by the engine's listener
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCallback {
    StateChanged(EngineState),
    IsPlayingChanged(bool),
    Error { code: EngineErrorCode, message: String },
}

/// Video geometry as reported by the engine decoder, uncorrected.
///
/// All zeros while the geometry is not yet known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawGeometry {
    pub width: u32,
    pub height: u32,
    pub rotation_degrees: u32,
}

/// Video geometry normalized for presentation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VideoGeometry {
    pub width: u32,
    pub height: u32,
    /// Compensating rotation the presentation layer must apply, in degrees
    pub rotation_correction: u32,
}

/// Repeat behavior forwarded to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatMode {
    Off,
    All,
}

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Stall deadline for the very first load, while the engine is still cold
    pub first_load_deadline: Duration,
    /// Stall deadline for reloads and recovery re-prepares on a warm engine
    pub reload_deadline: Duration,
    /// Mix engine audio with other applications instead of taking audio focus
    pub mix_with_others: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            first_load_deadline: Duration::from_secs(30),
            reload_deadline: Duration::from_secs(8),
            mix_with_others: false,
        }
    }
}
