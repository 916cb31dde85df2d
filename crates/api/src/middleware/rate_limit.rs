//! Rate limiting middleware.
//!
//! Per-client limits on the unauthenticated identity routes (verify-id, OTP,
//! register, login). Clients are keyed by peer IP address. With
//! `security.trust_forwarded_for` set, the last `X-Forwarded-For` hop (the
//! one written by the reverse proxy) is used instead.

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use governor::{
    clock::{Clock, DefaultClock},
    DefaultKeyedRateLimiter, Quota, RateLimiter as GovRateLimiter,
};
use serde_json::json;
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    num::NonZeroU32,
};

use crate::app::AppState;

/// Header carrying the original client address behind a proxy.
pub const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

/// Key used when neither a peer address nor a trusted header is available.
const UNKNOWN_CLIENT: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Rate limiter state shared across all requests, keyed by client IP.
pub struct RateLimiterState {
    limiter: DefaultKeyedRateLimiter<IpAddr>,
    rate_limit_per_minute: u32,
    trust_forwarded_for: bool,
}

impl RateLimiterState {
    /// Returns `None` when the limit is zero, which disables limiting.
    pub fn new(rate_limit_per_minute: u32, trust_forwarded_for: bool) -> Option<Self> {
        let per_minute = NonZeroU32::new(rate_limit_per_minute)?;
        Some(Self {
            limiter: GovRateLimiter::keyed(Quota::per_minute(per_minute)),
            rate_limit_per_minute,
            trust_forwarded_for,
        })
    }

    pub fn rate_limit_per_minute(&self) -> u32 {
        self.rate_limit_per_minute
    }

    /// Returns `Err(retry_after_secs)` when the client is over its limit.
    pub fn check(&self, client: IpAddr) -> Result<(), u64> {
        self.limiter.check_key(&client).map_err(|not_until| {
            let wait_time = not_until.wait_time_from(DefaultClock::default().now());
            wait_time.as_secs().max(1)
        })
    }

    /// Drops clients whose quota has fully replenished. Returns how many
    /// clients are still tracked.
    pub fn evict_idle(&self) -> usize {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
        self.limiter.len()
    }

    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }

    /// Identifies the caller for rate limiting purposes.
    pub fn client_ip(&self, req: &Request<Body>) -> IpAddr {
        if self.trust_forwarded_for {
            if let Some(ip) = forwarded_for(req) {
                return ip;
            }
        }

        req.extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip())
            .unwrap_or(UNKNOWN_CLIENT)
    }
}

impl std::fmt::Debug for RateLimiterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiterState")
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .field("trust_forwarded_for", &self.trust_forwarded_for)
            .field("tracked_clients", &self.tracked_clients())
            .finish()
    }
}

/// Last hop of `X-Forwarded-For`, if it parses as an IP address.
fn forwarded_for(req: &Request<Body>) -> Option<IpAddr> {
    req.headers()
        .get(FORWARDED_FOR_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.rsplit(',').next())
        .and_then(|v| v.trim().parse().ok())
}

/// Middleware that applies the per-client auth limit.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(ref rate_limiter) = state.rate_limiter {
        let client = rate_limiter.client_ip(&req);
        if let Err(retry_after) = rate_limiter.check(client) {
            tracing::warn!(client = %client, retry_after, "Auth rate limit exceeded");
            return rate_limited_response(rate_limiter.rate_limit_per_minute(), retry_after);
        }
    }

    next.run(req).await
}

fn rate_limited_response(limit: u32, retry_after: u64) -> Response {
    let body = json!({
        "success": false,
        "error": "rate_limited",
        "message": format!("Rate limit of {} requests/minute exceeded", limit),
        "retryAfter": retry_after
    });

    let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::RETRY_AFTER, HeaderValue::from(retry_after));

    response
}
