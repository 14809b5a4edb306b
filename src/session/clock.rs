//! Session elapsed-time tracking

use tokio::time::Instant;

/// Monotonic elapsed time since the session opened.
///
/// Elapsed seconds are always recomputed from the fixed start instant rather
/// than accumulated per tick, so countdowns starting and stopping around the
/// clock cannot introduce drift.
#[derive(Debug, Clone, Copy)]
pub struct SessionClock {
    started_at: Instant,
}

impl SessionClock {
    pub fn start() -> Self {
        Self {
            started_at: Instant::now(),
        }
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn elapsed_tracks_virtual_time() {
        let clock = SessionClock::start();
        assert_eq!(clock.elapsed_secs(), 0);

        tokio::time::advance(Duration::from_secs(5)).await;
        assert_eq!(clock.elapsed_secs(), 5);

        tokio::time::advance(Duration::from_secs(55)).await;
        assert_eq!(clock.elapsed_secs(), 60);
    }
}
