//! Minimum-interval gate between outbound requests.
//!
//! Both pipelines call [`Pacer::wait`] before each request. The first call
//! returns immediately; later calls sleep until at least `interval` has passed
//! since the previous call returned. A zero interval never sleeps.

use std::time::Duration;
use tokio::time::{Instant, sleep_until};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Pacer {
    interval: Duration,
    last: Option<Instant>,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// A gate that never waits.
    pub fn unpaced() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Block until the next request may be sent.
    pub async fn wait(&mut self) {
        if let Some(last) = self.last {
            if !self.interval.is_zero() {
                let ready_at = last + self.interval;
                if ready_at > Instant::now() {
                    debug!(interval = ?self.interval, "Pacing before next request");
                    sleep_until(ready_at).await;
                }
            }
        }
        self.last = Some(Instant::now());
    }
}
