//! The periodic scheduler collaborator.
//!
//! [`every`] runs a callback on a `tokio` interval until the callback asks to
//! stop or the returned [`CancelHandle`] is cancelled (or dropped).

use std::ops::ControlFlow;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Cancels a spawned periodic or feed task.  Dropping the handle cancels too.
#[derive(Debug)]
pub struct CancelHandle {
    token: CancellationToken,
    task:  Option<JoinHandle<()>>,
}

impl CancelHandle {
    pub(crate) fn new(token: CancellationToken, task: JoinHandle<()>) -> Self {
        Self { token, task: Some(task) }
    }

    /// Request cancellation.  The task exits at its next await point.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// `true` once the task has returned, for whatever reason.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(|t| t.is_finished())
    }

    /// Wait for the task to exit without cancelling it.
    pub async fn join(mut self) {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                log::error!("scheduled task failed: {e}");
            }
        }
    }
}

impl Drop for CancelHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Call `task` every `period`, starting one period from now.
///
/// The callback returns [`ControlFlow::Break`] to end the schedule.  Late
/// ticks are delayed rather than bunched up.  Must be called from within a
/// `tokio` runtime.
pub fn every<F>(period: Duration, mut task: F) -> CancelHandle
where
    F: FnMut() -> ControlFlow<()> + Send + 'static,
{
    let token = CancellationToken::new();
    let cancelled = token.clone();

    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; skip it.
        interval.tick().await;

        loop {
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => break,
                _ = interval.tick() => {
                    if task().is_break() {
                        break;
                    }
                }
            }
        }
        log::trace!("periodic task exited");
    });

    CancelHandle::new(token, handle)
}
