//! Engine callback translation
//!
//! Converts one native engine callback plus the current session flags
//! into the ordered outbound events and the updated flags. The function
//! is pure: engine values it needs are sampled by the caller into an
//! [`EngineProbe`] beforehand, and timer control is reported back as
//! instructions on the [`Translation`] rather than performed here.

use crate::event::PlaybackEvent;
use crate::types::{EngineCallback, EngineErrorCode, EngineState, RawGeometry, VideoGeometry};

/// Mutable per-session lifecycle flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionFlags {
    /// True after the first successful ready transition; set at most once
    /// per session lifetime.
    pub is_initialized: bool,
    /// True between a reload request and the next observed ready
    /// transition.
    pub is_loading_new_asset: bool,
    /// Last reported buffering state; start/end events fire only on a
    /// change of this flag.
    pub is_buffering: bool,
}

/// Engine values sampled at callback time
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineProbe {
    pub buffered_position_ms: u64,
    pub duration_ms: u64,
    pub geometry: RawGeometry,
}

/// Result of translating one callback
#[derive(Debug, Default)]
pub struct Translation {
    /// Outbound events, in emission order
    pub events: Vec<PlaybackEvent>,
    /// Updated session flags
    pub flags: SessionFlags,
    /// The load attempt is over (ready observed or terminally failed);
    /// the active stall watchdog must be canceled.
    pub cancel_watchdog: bool,
    /// Recoverable live-window violation: reposition to the default live
    /// position and restart preparation instead of surfacing an error.
    pub reposition_to_live_edge: bool,
}

/// Translate one engine callback into outbound events and updated flags
pub fn translate(
    flags: SessionFlags,
    probe: EngineProbe,
    callback: EngineCallback,
) -> Translation {
    let mut out = Translation {
        flags,
        ..Translation::default()
    };

    match callback {
        EngineCallback::StateChanged(EngineState::Buffering) => {
            if !out.flags.is_buffering {
                out.flags.is_buffering = true;
                out.events.push(PlaybackEvent::BufferingStart);
            }
            // Reported on every buffering callback, not only the first.
            out.events.push(PlaybackEvent::BufferingUpdate {
                values: vec![(0, probe.buffered_position_ms)],
            });
        }
        EngineCallback::StateChanged(EngineState::Ready) => {
            out.cancel_watchdog = true;
            end_buffering(&mut out);
            if out.flags.is_loading_new_asset && out.flags.is_initialized {
                out.flags.is_loading_new_asset = false;
                out.events.push(PlaybackEvent::reloading_end(
                    normalize_geometry(probe.geometry),
                    probe.duration_ms,
                ));
            } else if !out.flags.is_initialized {
                out.flags.is_initialized = true;
                out.events.push(PlaybackEvent::initialized(
                    normalize_geometry(probe.geometry),
                    probe.duration_ms,
                ));
            }
            // Already initialized and not mid-reload: a no-op ready.
        }
        EngineCallback::StateChanged(EngineState::Ended) => {
            out.events.push(PlaybackEvent::Completed);
            end_buffering(&mut out);
        }
        EngineCallback::StateChanged(EngineState::Idle) => {
            end_buffering(&mut out);
        }
        EngineCallback::IsPlayingChanged(is_playing) => {
            // Passed through as delivered, duplicates included; the
            // engine's own notification semantics are preserved.
            out.events.push(PlaybackEvent::IsPlayingUpdate { is_playing });
        }
        EngineCallback::Error { code, message } => {
            end_buffering(&mut out);
            match code {
                EngineErrorCode::BehindLiveWindow => {
                    out.reposition_to_live_edge = true;
                }
                EngineErrorCode::Other(code) => {
                    // A terminal error ends the current load attempt.
                    out.flags.is_loading_new_asset = false;
                    out.cancel_watchdog = true;
                    out.events.push(PlaybackEvent::Error { code, message });
                }
            }
        }
    }

    out
}

fn end_buffering(out: &mut Translation) {
    if out.flags.is_buffering {
        out.flags.is_buffering = false;
        out.events.push(PlaybackEvent::BufferingEnd);
    }
}

/// Normalize decoder geometry for presentation.
///
/// Portrait recordings are reported in landscape orientation with a 90 or
/// 270 degree rotation, so width and height are swapped. The engine
/// cannot rotate a raw surface itself, so a 180 degree source is reported
/// with a compensating `rotation_correction` for the presentation layer
/// to apply. Unknown geometry (either dimension zero) normalizes to all
/// zeros.
pub fn normalize_geometry(raw: RawGeometry) -> VideoGeometry {
    if raw.width == 0 || raw.height == 0 {
        return VideoGeometry::default();
    }

    let (width, height) = match raw.rotation_degrees {
        90 | 270 => (raw.height, raw.width),
        _ => (raw.width, raw.height),
    };
    let rotation_correction = if raw.rotation_degrees == 180 { 180 } else { 0 };

    VideoGeometry {
        width,
        height,
        rotation_correction,
    }
}
