//! Outbound playback lifecycle events
//!
//! Events are serialized as key/value records with an `"event"`
//! discriminator, e.g.
//! `{"event":"initialized","width":1920,"height":1080,"duration":12345,"rotationCorrection":0}`.
//! Ordering between events for the same session is significant and is
//! preserved end-to-end by the [`EventQueue`](crate::queue::EventQueue).

use crate::types::VideoGeometry;
use serde::{Deserialize, Serialize};

/// A playback lifecycle event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum PlaybackEvent {
    /// First successful ready transition: the asset is decodable and its
    /// geometry and duration are known
    #[serde(rename_all = "camelCase")]
    Initialized {
        width: u32,
        height: u32,
        /// Asset duration in milliseconds
        duration: u64,
        rotation_correction: u32,
    },

    /// The engine started loading ahead of the playback position
    BufferingStart,

    /// Currently buffered ranges as `[start_ms, end_ms]` pairs
    BufferingUpdate { values: Vec<(u64, u64)> },

    /// The engine caught up; playback can proceed
    BufferingEnd,

    /// End of the asset reached
    Completed,

    /// The engine started or stopped advancing the playback position
    #[serde(rename = "isPlayingStateUpdate", rename_all = "camelCase")]
    IsPlayingUpdate { is_playing: bool },

    /// A new asset is being loaded into the existing session
    ReloadingStart,

    /// The reloaded asset reached its ready transition
    #[serde(rename_all = "camelCase")]
    ReloadingEnd {
        width: u32,
        height: u32,
        duration: u64,
        rotation_correction: u32,
    },

    /// Terminal failure of the current load attempt
    Error { code: String, message: String },
}

impl PlaybackEvent {
    pub fn initialized(geometry: VideoGeometry, duration_ms: u64) -> Self {
        PlaybackEvent::Initialized {
            width: geometry.width,
            height: geometry.height,
            duration: duration_ms,
            rotation_correction: geometry.rotation_correction,
        }
    }

    pub fn reloading_end(geometry: VideoGeometry, duration_ms: u64) -> Self {
        PlaybackEvent::ReloadingEnd {
            width: geometry.width,
            height: geometry.height,
            duration: duration_ms,
            rotation_correction: geometry.rotation_correction,
        }
    }

    /// Discriminator value used on the wire
    pub fn name(&self) -> &'static str {
        match self {
            PlaybackEvent::Initialized { .. } => "initialized",
            PlaybackEvent::BufferingStart => "bufferingStart",
            PlaybackEvent::BufferingUpdate { .. } => "bufferingUpdate",
            PlaybackEvent::BufferingEnd => "bufferingEnd",
            PlaybackEvent::Completed => "completed",
            PlaybackEvent::IsPlayingUpdate { .. } => "isPlayingStateUpdate",
            PlaybackEvent::ReloadingStart => "reloadingStart",
            PlaybackEvent::ReloadingEnd { .. } => "reloadingEnd",
            PlaybackEvent::Error { .. } => "error",
        }
    }
}
