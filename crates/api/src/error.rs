use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::services::{AuthError, RegistrationError};
use domain::stores::StoreError;
use persistence::error::{sql_state, FOREIGN_KEY_VIOLATION, UNIQUE_VIOLATION};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    message: String,
}

impl ApiError {
    /// Status and machine-readable code for this error.
    ///
    /// Uniqueness conflicts are reported as 400, like other rejected input.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::Conflict(_) => (StatusCode::BAD_REQUEST, "conflict"),
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            ApiError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, "rate_limited"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
            ApiError::ServiceUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status_and_code();
        let message = match self {
            ApiError::Unauthorized(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::Validation(msg)
            | ApiError::ServiceUnavailable(msg) => msg,
            ApiError::RateLimited => "Too many requests. Please try again later.".into(),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".into()
            }
        };

        let body = ErrorBody {
            success: false,
            error: error_code.into(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::RowNotFound = err {
            return ApiError::NotFound("Resource not found".into());
        }
        match sql_state(&err).as_deref() {
            Some(UNIQUE_VIOLATION) => ApiError::Conflict("Resource already exists".into()),
            Some(FOREIGN_KEY_VIOLATION) => {
                ApiError::NotFound("Referenced resource not found".into())
            }
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {}", field))
                })
            })
            .collect();
        messages.sort();

        let message = if messages.len() == 1 {
            messages.remove(0)
        } else {
            format!("{} validation errors: {}", messages.len(), messages.join("; "))
        };

        ApiError::Validation(message)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(_) => ApiError::Conflict("Resource already exists".into()),
            StoreError::MissingReference(_) => {
                ApiError::NotFound("Referenced resource not found".into())
            }
            StoreError::Backend(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidInput(msg) => ApiError::Validation(msg),
            AuthError::NotFound(msg) => ApiError::NotFound(msg),
            AuthError::InvalidCredentials => {
                ApiError::Unauthorized(AuthError::InvalidCredentials.to_string())
            }
            AuthError::Conflict(msg) => ApiError::Conflict(msg),
            AuthError::Secret(e) => ApiError::Internal(e.to_string()),
            AuthError::Store(e) => e.into(),
        }
    }
}

impl From<RegistrationError> for ApiError {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::InvalidInput(msg) => ApiError::Validation(msg),
            RegistrationError::EventNotFound | RegistrationError::UserNotFound => {
                ApiError::NotFound(err.to_string())
            }
            RegistrationError::AlreadyRegistered => ApiError::Conflict(err.to_string()),
            RegistrationError::Store(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_api_error_unauthorized() {
        let response = ApiError::Unauthorized("test message".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_api_error_not_found() {
        let response = ApiError::NotFound("resource not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_is_bad_request() {
        let response = ApiError::Conflict("already exists".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_api_error_validation() {
        let response = ApiError::Validation("invalid input".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_api_error_rate_limited() {
        let response = ApiError::RateLimited.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_api_error_service_unavailable() {
        let response = ApiError::ServiceUnavailable("maintenance".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = ApiError::Conflict("User already registered".into()).into_response();
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "conflict");
        assert_eq!(body["message"], "User already registered");
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let response = ApiError::Internal("connection refused".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["message"], "An internal error occurred");
    }

    #[test]
    fn test_from_sqlx_row_not_found() {
        let error: ApiError = sqlx::Error::RowNotFound.into();
        match error {
            ApiError::NotFound(msg) => assert_eq!(msg, "Resource not found"),
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_from_sqlx_pool_timeout_is_internal() {
        let error: ApiError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(error, ApiError::Internal(_)));
    }

    #[test]
    fn test_auth_error_mapping() {
        assert!(matches!(
            ApiError::from(AuthError::InvalidInput("Invalid ID format".into())),
            ApiError::Validation(_)
        ));
        assert!(matches!(
            ApiError::from(AuthError::NotFound("Student ID not found in records".into())),
            ApiError::NotFound(_)
        ));
        match ApiError::from(AuthError::InvalidCredentials) {
            ApiError::Unauthorized(msg) => assert_eq!(msg, "Invalid credentials"),
            other => panic!("Expected Unauthorized, got {:?}", other),
        }
        assert!(matches!(
            ApiError::from(AuthError::Store(StoreError::Backend("down".into()))),
            ApiError::Internal(_)
        ));
    }

    #[test]
    fn test_registration_error_mapping() {
        match ApiError::from(RegistrationError::AlreadyRegistered) {
            ApiError::Conflict(msg) => assert_eq!(msg, "User already registered for this event"),
            other => panic!("Expected Conflict, got {:?}", other),
        }
        match ApiError::from(RegistrationError::EventNotFound) {
            ApiError::NotFound(msg) => assert_eq!(msg, "Event not found"),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_store_duplicate_is_conflict() {
        let error: ApiError = StoreError::Duplicate("users_email_key".into()).into();
        assert!(matches!(error, ApiError::Conflict(_)));
    }

    #[test]
    fn test_missing_reference_is_not_found() {
        let missing = StoreError::MissingReference("registrations_user_id_fkey".into());
        let error: ApiError = RegistrationError::Store(missing).into();
        assert!(matches!(error, ApiError::NotFound(_)));
    }

    #[test]
    fn test_api_error_display() {
        assert_eq!(
            format!("{}", ApiError::Unauthorized("test".to_string())),
            "Unauthorized: test"
        );
        assert_eq!(
            format!("{}", ApiError::Conflict("test".to_string())),
            "Conflict: test"
        );
        assert_eq!(format!("{}", ApiError::RateLimited), "Rate limited");
    }
}
