//! Timer task driving a notification center.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::notification_center::NotificationCenter;
use crate::domain::ToastEvent;

/// Drives a [`NotificationCenter`] from the tokio timer.
///
/// Stops once the center is empty. Dropping the ticker aborts the task, so
/// no timer outlives its owner.
pub struct ToastTicker {
    handle: JoinHandle<()>,
}

impl ToastTicker {
    /// Spawns the ticking task and returns it with its event stream.
    #[must_use]
    pub fn spawn(
        center: Arc<Mutex<NotificationCenter>>,
        period: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<ToastEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;

                let (events, done) = {
                    let mut center = center.lock();
                    let events = center.tick();
                    (events, !center.has_notification())
                };

                for event in events {
                    if tx.send(event).is_err() {
                        return;
                    }
                }

                if done {
                    return;
                }
            }
        });

        (Self { handle }, rx)
    }

    /// Returns whether the ticker task has stopped.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits until the center has no notification left.
    pub async fn finished(mut self) {
        let _ = (&mut self.handle).await;
    }
}

impl Drop for ToastTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
