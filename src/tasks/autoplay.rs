use std::time::Duration;

use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::events::CarouselCommand;

/// Handle to a running autoplay timer.
///
/// Dropping the handle does not stop the timer; call [`AutoplayHandle::stop`]
/// or cancel the parent token passed to [`start`].
#[derive(Debug)]
pub struct AutoplayHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl AutoplayHandle {
    /// Stop issuing advances. Calling this more than once has no further effect.
    pub fn stop(&self) {
        if !self.cancel.is_cancelled() {
            debug!("autoplay stop requested");
        }
        self.cancel.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled() || self.task.is_finished()
    }

    /// Wait for the timer task to wind down.
    pub async fn join(self) {
        if let Err(err) = self.task.await {
            warn!("autoplay task join failed: {err}");
        }
    }
}

/// Send [`CarouselCommand::Advance`] every `period`, first one `period` after start.
///
/// The timer ends when the handle is stopped, `cancel` fires, or the carousel
/// side of the channel goes away.
pub fn start(
    period: Duration,
    to_carousel: Sender<CarouselCommand>,
    cancel: &CancellationToken,
) -> AutoplayHandle {
    let cancel = cancel.child_token();
    let period = period.max(Duration::from_millis(1));
    let period_ms = period.as_millis().min(u128::from(u64::MAX)) as u64;
    info!(period_ms, "autoplay started");

    let task = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        if to_carousel.send(CarouselCommand::Advance).await.is_err() {
                            warn!("carousel channel closed; stopping autoplay");
                            break;
                        }
                    }
                }
            }
            debug!("autoplay stopped");
        }
    });

    AutoplayHandle { cancel, task }
}
