//! Stall detection timer
//!
//! A single-shot, cancelable, restartable countdown. A session owns at
//! most one live timer at any instant; arming always replaces the
//! previous one. Expiry and cancellation can race across threads, so
//! every arm/cancel bumps a generation counter and the expiry callback
//! receives the generation it was armed with: a callback whose
//! generation no longer matches has been superseded and must treat its
//! firing as a no-op.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Restartable single-shot countdown backed by a spawned timer task
#[derive(Default)]
pub struct StallWatchdog {
    task: Option<JoinHandle<()>>,
    generation: u64,
}

impl StallWatchdog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any previous timer and start a new countdown.
    ///
    /// On expiry the callback runs exactly once, receiving the generation
    /// it was armed with; compare it against [`generation`](Self::generation)
    /// under the session lock to detect a superseded firing. Returns the
    /// new generation.
    pub fn arm<F, Fut>(&mut self, deadline: Duration, on_expire: F) -> u64
    where
        F: FnOnce(u64) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let generation = self.generation;
        self.task = Some(tokio::spawn(async move {
            tokio::time::sleep(deadline).await;
            on_expire(generation).await;
        }));
        generation
    }

    /// Stop delivery if the timer has not fired yet.
    ///
    /// Idempotent: canceling an already-fired, already-canceled, or
    /// never-armed watchdog is a no-op.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.generation += 1;
    }

    /// Generation of the most recent arm or cancel. An expiry carrying an
    /// older generation lost the race and must not act.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_armed(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for StallWatchdog {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recording(
        dog: &mut StallWatchdog,
        deadline_ms: u64,
        fired: &Arc<Mutex<Vec<u64>>>,
    ) -> u64 {
        let fired = Arc::clone(fired);
        dog.arm(Duration::from_millis(deadline_ms), move |generation| async move {
            fired.lock().unwrap().push(generation);
        })
    }

    #[tokio::test(start_paused = true)]
    async fn fires_exactly_once_after_the_deadline() {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let mut dog = StallWatchdog::new();
        let generation = recording(&mut dog, 100, &fired);
        assert!(dog.is_armed());

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(fired.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(*fired.lock().unwrap(), vec![generation]);
        assert!(!dog.is_armed());
        assert_eq!(dog.generation(), generation);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_before_the_deadline_suppresses_firing() {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let mut dog = StallWatchdog::new();
        recording(&mut dog, 100, &fired);

        tokio::time::sleep(Duration::from_millis(50)).await;
        dog.cancel();
        dog.cancel(); // idempotent

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(fired.lock().unwrap().is_empty());
        assert!(!dog.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn rearming_replaces_the_previous_timer() {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let mut dog = StallWatchdog::new();
        let first = recording(&mut dog, 100, &fired);
        let second = recording(&mut dog, 100, &fired);
        assert!(second > first);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(*fired.lock().unwrap(), vec![second]);
    }

    #[tokio::test(start_paused = true)]
    async fn a_superseded_firing_is_detectable_by_generation() {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let mut dog = StallWatchdog::new();
        let armed = recording(&mut dog, 100, &fired);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(*fired.lock().unwrap(), vec![armed]);

        // Cancel after the fact: the recorded generation is now stale,
        // which is how a locked-out consumer knows to ignore it.
        dog.cancel();
        assert!(dog.generation() > armed);
    }
}
