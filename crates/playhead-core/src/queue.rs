//! Ordered, replay-safe outbound event delivery
//!
//! The transport to the outside world may not be listening yet when the
//! first events are produced (construction can race the subscriber
//! attaching). Events pushed while no consumer is attached are buffered
//! and replayed in original order on attach; dropping early events would
//! be observably wrong.

use crate::event::PlaybackEvent;
use std::collections::VecDeque;
use tracing::debug;

/// Consumer side of the outbound event channel
pub trait EventSink: Send {
    fn send(&mut self, event: PlaybackEvent);
}

impl<F> EventSink for F
where
    F: FnMut(PlaybackEvent) + Send,
{
    fn send(&mut self, event: PlaybackEvent) {
        self(event)
    }
}

/// Ordered outbound queue, buffering while no consumer is attached.
///
/// At most one consumer is attached at a time. The queue itself never
/// drops or reorders events.
#[derive(Default)]
pub struct EventQueue {
    pending: VecDeque<PlaybackEvent>,
    sink: Option<Box<dyn EventSink>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward immediately when a consumer is attached, buffer otherwise
    pub fn push(&mut self, event: PlaybackEvent) {
        match self.sink.as_mut() {
            Some(sink) => sink.send(event),
            None => self.pending.push_back(event),
        }
    }

    /// Attach a consumer, replaying buffered events in original order
    /// before forwarding subsequent pushes live
    pub fn attach(&mut self, mut sink: Box<dyn EventSink>) {
        if !self.pending.is_empty() {
            debug!(replayed = self.pending.len(), "replaying buffered events");
        }
        for event in self.pending.drain(..) {
            sink.send(event);
        }
        self.sink = Some(sink);
    }

    /// Detach the consumer; subsequent pushes buffer again
    pub fn detach(&mut self) {
        self.sink = None;
    }

    pub fn is_attached(&self) -> bool {
        self.sink.is_some()
    }

    /// Number of buffered events awaiting a consumer
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}
