//! Background job scheduler and job implementations.

mod otp_sweep;
mod pool_metrics;
mod rate_limit_sweep;
mod scheduler;

pub use otp_sweep::OtpSweepJob;
pub use pool_metrics::{PoolMetricsJob, POOL_METRICS_INTERVAL_SECS};
pub use rate_limit_sweep::{RateLimitSweepJob, RATE_LIMIT_SWEEP_INTERVAL_SECS};
pub use scheduler::{Job, JobFrequency, JobScheduler};
