//! Playhead Core - playback lifecycle sessions over a native media engine
//!
//! This crate provides the lifecycle state machine between a native
//! media-playback engine and a host application that wants a stable,
//! ordered stream of lifecycle events per video asset:
//! - Ordered, replay-safe outbound event delivery
//! - Buffering transition de-duplication
//! - Exactly-once initialization and in-place asset reload
//! - Normalized video geometry (portrait swap, 180-degree correction)
//! - Stall detection with a restartable watchdog
//!
//! Decoding, rendering, and networking are the engine's job; it is
//! consumed only through the [`MediaEngine`] command surface and the
//! listener callbacks routed into [`VideoSession::on_engine_callback`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                     Playhead Core                       │
//! ├─────────────────────────────────────────────────────────┤
//! │                                                         │
//! │  ┌──────────────┐              ┌──────────────┐         │
//! │  │    State     │              │    Stall     │         │
//! │  │  Translator  │              │   Watchdog   │         │
//! │  └──────┬───────┘              └──────┬───────┘         │
//! │         │                             │                 │
//! │         └──────────────┬──────────────┘                 │
//! │                        │                                │
//! │                 ┌──────┴──────┐        ┌─────────────┐  │
//! │   engine ──────▶│    Video    │───────▶│    Event    │──┼──▶ host
//! │   callbacks     │   Session   │        │    Queue    │  │
//! │                 └──────┬──────┘        └─────────────┘  │
//! │                        │                                │
//! │                        ▼                                │
//! │                 engine commands                         │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod engine;
pub mod error;
pub mod event;
pub mod queue;
pub mod session;
pub mod translator;
pub mod types;
pub mod watchdog;

pub use engine::{resolve_format, MediaEngine, MediaFormat, MediaSource};
pub use error::{Error, Result};
pub use event::PlaybackEvent;
pub use queue::{EventQueue, EventSink};
pub use session::VideoSession;
pub use translator::{normalize_geometry, translate, EngineProbe, SessionFlags, Translation};
pub use types::*;
pub use watchdog::StallWatchdog;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library with default configuration
pub fn init() {
    tracing::info!(version = VERSION, "Playhead Core initialized");
}
