//! Background job that purges expired one-time codes.

use std::sync::Arc;

use chrono::Utc;
use domain::stores::OtpStore;
use metrics::gauge;
use tracing::debug;

use super::scheduler::{Job, JobFrequency};

/// Removes expired entries from the OTP store.
///
/// Verification already treats expired entries as absent; the sweep keeps
/// codes that are never verified from piling up.
pub struct OtpSweepJob {
    store: Arc<dyn OtpStore>,
    interval_secs: u64,
}

impl OtpSweepJob {
    pub fn new(store: Arc<dyn OtpStore>, interval_secs: u64) -> Self {
        Self {
            store,
            interval_secs,
        }
    }
}

#[async_trait::async_trait]
impl Job for OtpSweepJob {
    fn name(&self) -> &'static str {
        "otp_sweep"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Seconds(self.interval_secs)
    }

    async fn execute(&self) -> Result<(), String> {
        let purged = self.store.purge_expired(Utc::now()).await;
        let live = self.store.live_count().await;
        gauge!("otp_live_codes").set(live as f64);

        if purged > 0 {
            debug!(purged, live, "Expired OTP entries purged");
        }
        Ok(())
    }
}
