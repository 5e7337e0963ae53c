//! Video session controller
//!
//! Owns the single native engine handle for a session's lifetime, routes
//! engine callbacks through the translator, arms the stall watchdog
//! around loads, and drives the outbound event queue.
//!
//! The engine delivers callbacks on its own thread while commands arrive
//! from the host, so all mutable session state lives behind one lock.
//! Engine commands are issued after that lock is released; events are
//! pushed and flags/watchdog mutated under it.

use crate::engine::{resolve_format, MediaEngine, MediaSource};
use crate::error::{Error, Result};
use crate::event::PlaybackEvent;
use crate::queue::{EventQueue, EventSink};
use crate::translator::{translate, EngineProbe, SessionFlags};
use crate::types::{EngineCallback, RepeatMode, SessionId, SessionOptions};
use crate::watchdog::StallWatchdog;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Mutable session state, guarded by the per-session lock
struct SessionState {
    asset_uri: Option<Url>,
    flags: SessionFlags,
    watchdog: StallWatchdog,
    queue: EventQueue,
    disposed: bool,
}

/// Playback session around a single engine handle
pub struct VideoSession {
    id: SessionId,
    options: SessionOptions,
    engine: Arc<dyn MediaEngine>,
    state: Arc<Mutex<SessionState>>,
}

impl VideoSession {
    pub fn new(engine: Arc<dyn MediaEngine>, options: SessionOptions) -> Self {
        Self {
            id: SessionId::new(),
            options,
            engine,
            state: Arc::new(Mutex::new(SessionState {
                asset_uri: None,
                flags: SessionFlags::default(),
                watchdog: StallWatchdog::new(),
                queue: EventQueue::new(),
                disposed: false,
            })),
        }
    }

    /// Get session ID
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Attach the outbound consumer, replaying any buffered events first
    pub async fn attach_sink(&self, sink: Box<dyn EventSink>) {
        self.state.lock().await.queue.attach(sink);
    }

    /// Detach the outbound consumer; events buffer until the next attach
    pub async fn detach_sink(&self) {
        self.state.lock().await.queue.detach();
    }

    /// Load an asset into the session.
    ///
    /// The first load prepares the fresh engine under the long stall
    /// deadline. Later loads reconfigure the same engine handle in
    /// place: the reload is announced with `ReloadingStart` and watched
    /// under the short deadline until the next ready transition.
    #[instrument(skip(self, headers), fields(session_id = %self.id))]
    pub async fn load(
        &self,
        uri: &str,
        format_hint: Option<&str>,
        headers: HashMap<String, String>,
    ) -> Result<()> {
        let uri = Url::parse(uri)?;
        let format = resolve_format(format_hint, &uri)?;
        let source = MediaSource {
            uri: uri.clone(),
            format,
            headers,
        };

        let mut state = self.state.lock().await;
        if state.disposed {
            return Err(Error::SessionDisposed);
        }
        let first_load = state.asset_uri.is_none();
        state.asset_uri = Some(uri);

        if first_load {
            info!(format = %format, "loading first asset");
            self.arm_watchdog(&mut state, self.options.first_load_deadline);
        } else {
            info!(format = %format, "reloading with new asset");
            state.flags.is_loading_new_asset = true;
            state.queue.push(PlaybackEvent::ReloadingStart);
            self.arm_watchdog(&mut state, self.options.reload_deadline);
        }
        drop(state);

        if first_load {
            self.engine
                .set_mix_with_others(self.options.mix_with_others)
                .await;
        }
        self.engine.set_source(&source).await;
        self.engine.prepare().await;
        Ok(())
    }

    /// Forward the play intent; the resulting engine notification comes
    /// back as an `IsPlayingUpdate` event
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub async fn play(&self) -> Result<()> {
        self.ensure_live().await?;
        self.engine.set_play_when_ready(true).await;
        Ok(())
    }

    #[instrument(skip(self), fields(session_id = %self.id))]
    pub async fn pause(&self) -> Result<()> {
        self.ensure_live().await?;
        self.engine.set_play_when_ready(false).await;
        Ok(())
    }

    #[instrument(skip(self), fields(session_id = %self.id))]
    pub async fn seek_to(&self, position_ms: u64) -> Result<()> {
        self.ensure_live().await?;
        self.engine.seek_to(position_ms).await;
        Ok(())
    }

    #[instrument(skip(self), fields(session_id = %self.id))]
    pub async fn set_looping(&self, looping: bool) -> Result<()> {
        self.ensure_live().await?;
        let mode = if looping {
            RepeatMode::All
        } else {
            RepeatMode::Off
        };
        self.engine.set_repeat_mode(mode).await;
        Ok(())
    }

    /// Set the volume. Out-of-range values are clamped to [0, 1] rather
    /// than rejected.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub async fn set_volume(&self, volume: f32) -> Result<()> {
        self.ensure_live().await?;
        self.engine.set_volume(volume.clamp(0.0, 1.0)).await;
        Ok(())
    }

    /// Set the playback speed. Non-finite or non-positive speeds are
    /// rejected before reaching the engine.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub async fn set_playback_speed(&self, speed: f32) -> Result<()> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(Error::InvalidPlaybackSpeed { speed });
        }
        self.ensure_live().await?;
        self.engine.set_playback_speed(speed).await;
        Ok(())
    }

    /// Current playback position in milliseconds
    pub async fn position_ms(&self) -> Result<u64> {
        self.ensure_live().await?;
        Ok(self.engine.position_ms().await)
    }

    /// Release the session. Safe to call more than once.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub async fn dispose(&self) {
        let mut state = self.state.lock().await;
        if state.disposed {
            return;
        }
        state.disposed = true;
        state.watchdog.cancel();
        state.queue.detach();
        let prepared = state.asset_uri.is_some();
        drop(state);

        if prepared {
            self.engine.stop().await;
        }
        self.engine.release().await;
        info!("session disposed");
    }

    /// Route one native engine callback.
    ///
    /// Engine values needed by the translator are sampled before the
    /// state lock is taken; the engine delivers callbacks from a single
    /// thread, so sampling cannot be reordered against another callback
    /// for this session.
    pub async fn on_engine_callback(&self, callback: EngineCallback) {
        let probe = EngineProbe {
            buffered_position_ms: self.engine.buffered_position_ms().await,
            duration_ms: self.engine.duration_ms().await,
            geometry: self.engine.video_geometry().await,
        };

        let mut state = self.state.lock().await;
        if state.disposed {
            debug!(session_id = %self.id, "callback after dispose ignored");
            return;
        }

        let translation = translate(state.flags, probe, callback);
        state.flags = translation.flags;
        if translation.cancel_watchdog {
            state.watchdog.cancel();
        }
        for event in translation.events {
            debug!(session_id = %self.id, event = event.name(), "emitting");
            state.queue.push(event);
        }

        if translation.reposition_to_live_edge {
            // A stall after the recovery re-prepare is reported the same
            // way as a stall after a reload.
            self.arm_watchdog(&mut state, self.options.reload_deadline);
            drop(state);
            warn!(session_id = %self.id, "behind live window, repositioning to live edge");
            self.engine.seek_to_live_edge().await;
            self.engine.prepare().await;
        }
    }

    fn arm_watchdog(&self, state: &mut SessionState, deadline: Duration) {
        let weak = Arc::downgrade(&self.state);
        state
            .watchdog
            .arm(deadline, move |generation| Self::on_stall(weak, generation));
    }

    /// Watchdog expiry. A genuine late ready racing this firing is
    /// settled by the session lock: if the ready won, the generation has
    /// moved on and this firing is a no-op.
    async fn on_stall(state: Weak<Mutex<SessionState>>, generation: u64) {
        let Some(state) = state.upgrade() else {
            return;
        };
        let mut state = state.lock().await;
        if state.disposed || state.watchdog.generation() != generation {
            return;
        }

        warn!(generation, "no engine callback before the stall deadline");
        state.flags.is_loading_new_asset = false;
        state.queue.push(PlaybackEvent::Error {
            code: "stalled".to_owned(),
            message: "no playback progress before deadline".to_owned(),
        });
    }

    async fn ensure_live(&self) -> Result<()> {
        if self.state.lock().await.disposed {
            return Err(Error::SessionDisposed);
        }
        Ok(())
    }
}
