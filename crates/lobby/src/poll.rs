//! Fixed-interval polling tied to an owner's lifetime.
//!
//! A poll loop runs its task immediately, then once per interval, and hands
//! each result to a callback. Stopping the loop also drops whatever request is
//! in flight, so a slow response can never be delivered after the owner has
//! gone away.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::log;

/// Shortest interval a poll loop will run at.
pub const MIN_INTERVAL: Duration = Duration::from_secs(1);

pub struct Poller;

impl Poller {
    /// Start polling on the current tokio runtime. Intervals shorter than
    /// [`MIN_INTERVAL`] are raised to it.
    pub fn spawn<F, Fut, T, R>(interval: Duration, mut task: F, mut on_result: R) -> PollHandle
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Send + 'static,
        R: FnMut(T) + Send + 'static,
    {
        if interval < MIN_INTERVAL {
            log::warn!("Poll interval {interval:?} is too short, using {MIN_INTERVAL:?}");
        }
        let interval = interval.max(MIN_INTERVAL);
        let refresh = Arc::new(Notify::new());
        let wake = refresh.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    _ = wake.notified() => ticker.reset(),
                }

                // A refresh while a poll is in flight drops that poll and
                // starts over, so only the newest result is delivered.
                loop {
                    tokio::select! {
                        result = task() => {
                            on_result(result);
                            break;
                        }
                        _ = wake.notified() => {
                            log::debug!("Poll superseded by refresh");
                            ticker.reset();
                        }
                    }
                }
            }
        });

        PollHandle {
            task: handle,
            refresh,
        }
    }
}

/// Owns a running poll loop. Dropping it aborts the loop.
pub struct PollHandle {
    task: JoinHandle<()>,
    refresh: Arc<Notify>,
}

impl PollHandle {
    /// Poll now instead of waiting for the next tick. An in-flight poll is
    /// cancelled and its result discarded.
    pub fn refresh(&self) {
        self.refresh.notify_one();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Cancel the loop and any in-flight request. Once this returns the
    /// result callback will not run again.
    pub async fn stop(mut self) {
        self.task.abort();
        match (&mut self.task).await {
            Err(err) if err.is_panic() => log::error!("Poll task panicked: {err}"),
            _ => {}
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
