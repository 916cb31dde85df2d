//! One-time code models.

use chrono::{DateTime, Utc};

/// A live one-time code for an external ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpEntry {
    pub code: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl OtpEntry {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Outcome of an atomic compare-and-consume against the OTP store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpCheck {
    /// Code matched; the entry has been removed.
    Matched,
    /// Code did not match; the entry stays live.
    Mismatch,
    /// No entry, or the entry had expired (and has been removed).
    Missing,
}

/// A freshly issued code, returned to the caller of `request_code`.
#[derive(Debug, Clone)]
pub struct IssuedOtp {
    pub external_id: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
}
