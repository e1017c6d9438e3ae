//! Periodic auto-advance
//!
//! A tokio task that calls [`RankSession::tick`] once per period while the
//! session is running. A firing that finds the session locked is skipped, so
//! two advances never overlap. Cancellation takes effect between iterations.

use super::RankSession;
use crate::algo::RankRecord;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::debug;

/// Session shared between the embedding and the auto-advance task
pub type SharedSession = Arc<Mutex<RankSession>>;

/// Handle to a running auto-advance task
pub struct AutoAdvance {
    cancel: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl AutoAdvance {
    /// Spawn the task. Records produced by each advance arrive on the returned receiver.
    ///
    /// The task ends on its own once the session stops running (paused, reset
    /// or terminal). The session should already be started.
    pub fn spawn(session: SharedSession) -> (Self, mpsc::UnboundedReceiver<RankRecord>) {
        let (cancel, cancel_rx) = watch::channel(false);
        let (updates, updates_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run(session, cancel_rx, updates));
        (AutoAdvance { cancel, handle }, updates_rx)
    }

    /// Ask the task to stop; the session is paused before it exits.
    pub fn cancel(&self) {
        let _ = self.cancel.send(true);
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Cancel and wait until no further advance can happen
    pub async fn stop(self) {
        self.cancel();
        let _ = self.handle.await;
    }

    /// Wait for the task to end by itself
    pub async fn join(self) {
        let _ = self.handle.await;
    }
}

fn ticker(period: Duration) -> Interval {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}

async fn run(
    session: SharedSession,
    mut cancel: watch::Receiver<bool>,
    updates: mpsc::UnboundedSender<RankRecord>,
) {
    let mut period = session.lock().await.config().speed.period();
    let mut timer = ticker(period);

    loop {
        tokio::select! {
            changed = cancel.changed() => {
                if changed.is_err() || *cancel.borrow() {
                    session.lock().await.pause();
                    debug!("Auto-advance cancelled");
                    return;
                }
            }
            _ = timer.tick() => {
                let Ok(mut guard) = session.try_lock() else {
                    debug!("Skipping tick, session busy");
                    continue;
                };

                if let Some(record) = guard.tick() {
                    // The receiver may have gone away; advancing still counts
                    let _ = updates.send(record);
                }
                if !guard.is_running() {
                    debug!("Auto-advance finished in state {}", guard.state());
                    return;
                }

                let next = guard.config().speed.period();
                drop(guard);
                if next != period {
                    period = next;
                    timer = ticker(period);
                }
            }
        }
    }
}
