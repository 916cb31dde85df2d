//! Background job that forgets idle rate-limited clients.

use std::sync::Arc;

use metrics::gauge;
use tracing::debug;

use super::scheduler::{Job, JobFrequency};
use crate::middleware::RateLimiterState;

/// How often idle client entries are dropped from the auth limiter.
pub const RATE_LIMIT_SWEEP_INTERVAL_SECS: u64 = 60;

/// Drops limiter entries for clients whose quota has fully replenished.
pub struct RateLimitSweepJob {
    limiter: Arc<RateLimiterState>,
}

impl RateLimitSweepJob {
    pub fn new(limiter: Arc<RateLimiterState>) -> Self {
        Self { limiter }
    }
}

#[async_trait::async_trait]
impl Job for RateLimitSweepJob {
    fn name(&self) -> &'static str {
        "rate_limit_sweep"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Seconds(RATE_LIMIT_SWEEP_INTERVAL_SECS)
    }

    async fn execute(&self) -> Result<(), String> {
        let before = self.limiter.tracked_clients();
        let tracked = self.limiter.evict_idle();
        gauge!("auth_rate_limit_tracked_clients").set(tracked as f64);

        debug!(
            evicted = before.saturating_sub(tracked),
            tracked, "Idle rate limit entries evicted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    #[tokio::test]
    async fn test_sweep_keeps_clients_still_limited() {
        let limiter = Arc::new(RateLimiterState::new(1, false).unwrap());
        limiter
            .check(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)))
            .unwrap();

        let job = RateLimitSweepJob::new(limiter.clone());
        job.execute().await.unwrap();

        assert_eq!(limiter.tracked_clients(), 1);
        assert_eq!(job.name(), "rate_limit_sweep");
        assert_eq!(job.frequency(), JobFrequency::Seconds(60));
    }
}
