//! Native engine interface
//!
//! The decoding/rendering engine is an external collaborator, consumed
//! through this narrow command/query surface plus the listener callbacks
//! routed to [`VideoSession::on_engine_callback`](crate::session::VideoSession::on_engine_callback).
//! Protocol-specific source objects (progressive, HLS, DASH, smooth
//! streaming) are built on the engine side; this crate only resolves
//! which format a source should be opened as.

use crate::error::{Error, Result};
use crate::types::{RawGeometry, RepeatMode};
use async_trait::async_trait;
use std::collections::HashMap;
use url::Url;

/// Streaming format a media source is opened as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaFormat {
    SmoothStreaming,
    Dash,
    Hls,
    Progressive,
}

impl std::fmt::Display for MediaFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaFormat::SmoothStreaming => write!(f, "ss"),
            MediaFormat::Dash => write!(f, "dash"),
            MediaFormat::Hls => write!(f, "hls"),
            MediaFormat::Progressive => write!(f, "other"),
        }
    }
}

/// Resolve a caller-supplied format hint, inferring from the URI path
/// when no hint is given. An unrecognized hint fails here, before any
/// engine work starts.
pub fn resolve_format(hint: Option<&str>, uri: &Url) -> Result<MediaFormat> {
    match hint {
        Some("ss") => Ok(MediaFormat::SmoothStreaming),
        Some("dash") => Ok(MediaFormat::Dash),
        Some("hls") => Ok(MediaFormat::Hls),
        Some("other") => Ok(MediaFormat::Progressive),
        Some(other) => Err(Error::UnsupportedFormat {
            hint: other.to_owned(),
        }),
        None => Ok(infer_format(uri)),
    }
}

fn infer_format(uri: &Url) -> MediaFormat {
    let path = uri.path().to_lowercase();
    if path.ends_with(".m3u8") || path.ends_with(".m3u") {
        MediaFormat::Hls
    } else if path.ends_with(".mpd") {
        MediaFormat::Dash
    } else if path.ends_with(".ism") || path.ends_with(".isml") {
        MediaFormat::SmoothStreaming
    } else {
        MediaFormat::Progressive
    }
}

/// A resolved source handed to the engine.
///
/// Headers are carried through untouched; injecting them into the
/// transport is the engine's concern.
#[derive(Debug, Clone)]
pub struct MediaSource {
    pub uri: Url,
    pub format: MediaFormat,
    pub headers: HashMap<String, String>,
}

/// Command/query surface of the native media engine.
///
/// One engine instance is owned exclusively by one session for the
/// session's whole lifetime; on reload it is reconfigured in place via
/// [`set_source`](Self::set_source) + [`prepare`](Self::prepare), never
/// recreated. Commands are fire-and-forget: asynchronous failures are
/// reported through the listener callbacks, not as return values.
#[async_trait]
pub trait MediaEngine: Send + Sync {
    /// Install a new source on the engine without releasing it
    async fn set_source(&self, source: &MediaSource);

    /// Begin (or restart) asynchronous preparation of the current source
    async fn prepare(&self);

    async fn set_play_when_ready(&self, play: bool);

    async fn seek_to(&self, position_ms: u64);

    /// Reposition to the default live position (live-window recovery)
    async fn seek_to_live_edge(&self);

    async fn set_volume(&self, volume: f32);

    async fn set_playback_speed(&self, speed: f32);

    async fn set_repeat_mode(&self, mode: RepeatMode);

    /// Whether engine audio mixes with other applications
    async fn set_mix_with_others(&self, mix: bool);

    async fn position_ms(&self) -> u64;

    async fn buffered_position_ms(&self) -> u64;

    /// Total duration of the current asset, in milliseconds
    async fn duration_ms(&self) -> u64;

    /// Raw decoder-reported geometry; all zeros while unknown
    async fn video_geometry(&self) -> RawGeometry;

    async fn stop(&self);

    async fn release(&self);
}
