//! One-time code issuance and verification.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use tracing::debug;

use super::error::AuthError;
use super::identity::require_external_id;
use crate::models::{IssuedOtp, OtpCheck, OtpEntry};
use crate::stores::OtpStore;

/// Default lifetime of an issued code.
pub const DEFAULT_OTP_TTL_SECS: i64 = 300;

const CODE_RANGE: std::ops::RangeInclusive<u32> = 100_000..=999_999;

/// Issues and checks six-digit codes against an [`OtpStore`].
#[derive(Clone)]
pub struct OtpService {
    store: Arc<dyn OtpStore>,
    ttl: Duration,
}

impl OtpService {
    pub fn new(store: Arc<dyn OtpStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn request_code(&self, raw_external_id: &str) -> Result<IssuedOtp, AuthError> {
        self.request_code_at(raw_external_id, Utc::now()).await
    }

    /// Issues a code as of `now`, replacing any live code for the same ID.
    pub async fn request_code_at(
        &self,
        raw_external_id: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedOtp, AuthError> {
        let external_id = require_external_id(raw_external_id)?;
        let code = rand::thread_rng().gen_range(CODE_RANGE).to_string();
        let expires_at = now + self.ttl;

        self.store
            .put(
                &external_id,
                OtpEntry {
                    code: code.clone(),
                    issued_at: now,
                    expires_at,
                },
            )
            .await;

        debug!(external_id = %external_id, expires_at = %expires_at, "OTP issued");

        Ok(IssuedOtp {
            external_id,
            code,
            expires_at,
        })
    }

    pub async fn verify_code(&self, raw_external_id: &str, code: &str) -> Result<(), AuthError> {
        self.verify_code_at(raw_external_id, code, Utc::now()).await
    }

    /// Checks a submitted code as of `now`. A match consumes the code.
    pub async fn verify_code_at(
        &self,
        raw_external_id: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        let external_id = require_external_id(raw_external_id)?;
        if code.trim().is_empty() {
            return Err(AuthError::InvalidInput("OTP is required".to_string()));
        }

        match self.store.consume(&external_id, code, now).await {
            OtpCheck::Matched => Ok(()),
            OtpCheck::Mismatch => Err(AuthError::InvalidInput("Invalid OTP".to_string())),
            OtpCheck::Missing => Err(AuthError::NotFound("OTP not found or expired".to_string())),
        }
    }
}
