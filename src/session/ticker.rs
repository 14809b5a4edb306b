//! One-second tick subscriptions
//!
//! Every timer in a session (elapsed clock, rest countdown, exercise
//! countdown) runs off its own one-second repeating tick. Each subscription
//! owns a spawned task guarded by a handle, so cancelling one timer never
//! disturbs the others.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// What a tick is driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickSource {
    /// The session elapsed clock
    Clock,
    /// The rest countdown
    Rest,
    /// The timed-exercise countdown
    Exercise,
}

/// One tick from a subscription.
///
/// `epoch` identifies the subscription that produced the tick. A consumer
/// that replaces a subscription must drop ticks from earlier epochs, since a
/// tick may already be queued when its subscription is cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickEvent {
    pub source: TickSource,
    pub epoch: u64,
}

/// Fans ticks from all active subscriptions into one channel.
pub struct Ticker {
    tx: mpsc::UnboundedSender<TickEvent>,
}

/// Guard for one active subscription. Dropping it aborts the tick task.
pub struct TickSubscription {
    epoch: u64,
    task: JoinHandle<()>,
}

impl TickSubscription {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

impl Drop for TickSubscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl Ticker {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TickEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Start a one-second repeating tick. The first tick arrives a full
    /// second after subscription.
    pub fn subscribe(&self, source: TickSource, epoch: u64) -> TickSubscription {
        let tx = self.tx.clone();
        let period = Duration::from_secs(1);
        let start = tokio::time::Instant::now() + period;
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(start, period);
            loop {
                interval.tick().await;
                if tx.send(TickEvent { source, epoch }).is_err() {
                    break;
                }
            }
        });

        TickSubscription { epoch, task }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn settle() {
        // Let spawned tick tasks run after virtual time moves.
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_arrive_once_per_second() {
        let (ticker, mut rx) = Ticker::new();
        let _sub = ticker.subscribe(TickSource::Clock, 1);

        tokio::time::advance(Duration::from_secs(3)).await;
        settle().await;

        let mut count = 0;
        while rx.try_recv().is_ok() {
            count += 1;
        }
        assert_eq!(count, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_subscription_stops_ticks() {
        let (ticker, mut rx) = Ticker::new();
        let sub = ticker.subscribe(TickSource::Rest, 1);

        tokio::time::advance(Duration::from_secs(2)).await;
        settle().await;
        drop(sub);
        tokio::time::advance(Duration::from_secs(5)).await;
        settle().await;

        let mut count = 0;
        while rx.try_recv().is_ok() {
            count += 1;
        }
        assert_eq!(count, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn subscriptions_are_independent() {
        let (ticker, mut rx) = Ticker::new();
        let _clock = ticker.subscribe(TickSource::Clock, 1);
        let rest = ticker.subscribe(TickSource::Rest, 2);

        tokio::time::advance(Duration::from_secs(1)).await;
        settle().await;
        drop(rest);
        tokio::time::advance(Duration::from_secs(1)).await;
        settle().await;

        let mut clock_ticks = 0;
        let mut rest_ticks = 0;
        while let Ok(event) = rx.try_recv() {
            match event.source {
                TickSource::Clock => clock_ticks += 1,
                TickSource::Rest => rest_ticks += 1,
                TickSource::Exercise => {}
            }
        }
        assert_eq!(clock_ticks, 2);
        assert_eq!(rest_ticks, 1);
    }
}
