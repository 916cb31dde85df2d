//! Identity routes: verify an external ID, issue and check one-time codes,
//! sign up and log in.

use axum::{extract::State, http::StatusCode, Json};
use domain::models::identity::{ExternalIdRequest, SendOtpResponse, VerifyOtpRequest};
use domain::models::user::{LoginRequest, LoginResponse, SignupRequest, SignupResponse};
use domain::models::IdentityResolution;
use domain::services::AuthError;
use serde::Serialize;
use tracing::{info, warn};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::middleware::metrics::{
    record_login, record_otp_issued, record_otp_verified, record_signup,
};

/// Plain `{message}` body.
#[derive(Debug, Clone, Serialize)]
pub struct MessageBody {
    pub message: String,
}

/// Classify an external ID as registered or allowed.
///
/// POST /verify-id
pub async fn verify_id(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ExternalIdRequest>,
) -> Result<Json<IdentityResolution>, ApiError> {
    let resolution = state.identity_service().resolve(&request.external_id).await?;
    Ok(Json(resolution))
}

/// Issue a one-time code for an external ID.
///
/// POST /send-otp
///
/// The code is echoed back only while `otp.expose_code` is enabled.
pub async fn send_otp(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ExternalIdRequest>,
) -> Result<Json<SendOtpResponse>, ApiError> {
    let otp = state.otp_service();
    let issued = otp.request_code(&request.external_id).await?;
    record_otp_issued();

    info!(external_id = %issued.external_id, "OTP issued");

    Ok(Json(SendOtpResponse {
        message: "OTP sent successfully".to_string(),
        code: state.config.otp.expose_code.then_some(issued.code),
        expires_in_secs: otp.ttl().num_seconds(),
    }))
}

/// Check a one-time code. A match consumes it.
///
/// POST /verify-otp
pub async fn verify_otp(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<VerifyOtpRequest>,
) -> Result<Json<MessageBody>, ApiError> {
    state
        .otp_service()
        .verify_code(&request.external_id, &request.code)
        .await?;
    record_otp_verified();

    Ok(Json(MessageBody {
        message: "OTP verified successfully".to_string(),
    }))
}

/// Create an account for an allow-listed student or teacher.
///
/// POST /register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    request.validate()?;

    let user = state.signup_service().sign_up(request).await?;
    record_signup();

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User registered successfully".to_string(),
            user_id: user.id,
        }),
    ))
}

/// Authenticate with external ID and secret.
///
/// POST /login
///
/// Unknown IDs, missing hashes and wrong secrets all produce the same 401.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    match state
        .login_service()
        .login(&request.external_id, &request.secret)
        .await
    {
        Ok(profile) => {
            record_login(true);
            info!(user_id = %profile.id, role = profile.role.as_str(), "Login succeeded");
            Ok(Json(LoginResponse {
                message: "Login successful".to_string(),
                user: profile,
            }))
        }
        Err(err) => {
            record_login(false);
            if matches!(err, AuthError::InvalidCredentials) {
                warn!("Login rejected");
            }
            Err(err.into())
        }
    }
}
