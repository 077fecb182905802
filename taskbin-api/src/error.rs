/// HTTP error mapping
///
/// Handlers return `ApiResult<T>`; `?` lifts every lower-level failure
/// (store, password, token, database) into [`ApiError`], which renders as a
/// uniform `{error, message}` JSON body.
///
/// The mapping the rest of the system relies on:
///
/// - duplicate username → 409
/// - bad credentials or bad/missing token → 401, one indistinguishable body
/// - absent user, task mutation matching no row → 404
/// - rejected request payload → 422 with per-field detail
/// - pool exhausted or backend unreachable → 503
/// - everything else database-shaped → 500, details logged and withheld

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use taskbin_shared::auth::{password::PasswordError, token::TokenError};
use taskbin_shared::models::user::UserError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Everything a handler can fail with
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    Conflict(String),
    ValidationError(Vec<ValidationErrorDetail>),
    InternalError(String),
    ServiceUnavailable(String),
}

/// One field that failed request validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    pub field: String,
    pub message: String,
}

/// Wire shape of every error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable machine-readable code, e.g. `conflict`
    pub error: String,

    /// Human-readable explanation
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::NotFound(_) => "not_found",
            ApiError::Conflict(_) => "conflict",
            ApiError::ValidationError(_) => "validation_error",
            ApiError::InternalError(_) => "internal_error",
            ApiError::ServiceUnavailable(_) => "service_unavailable",
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::ValidationError(details) => {
                write!(f, "{}: {} field(s) rejected", self.code(), details.len())
            }
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::InternalError(msg)
            | ApiError::ServiceUnavailable(msg) => write!(f, "{}: {}", self.code(), msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let (message, details) = match self {
            // Internals are logged server-side; the client gets a stock line
            ApiError::InternalError(msg) => {
                tracing::error!(error = %msg, "internal error");
                ("an internal error occurred".to_string(), None)
            }
            ApiError::ValidationError(details) => {
                ("request validation failed".to_string(), Some(details))
            }
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::ServiceUnavailable(msg) => (msg, None),
        };

        let body = Json(ErrorResponse {
            error: code.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("no such record".to_string()),

            // Exhausted pool or a dead backend: fatal to this request,
            // worth retrying later
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                ApiError::ServiceUnavailable("database temporarily unavailable".to_string())
            }

            sqlx::Error::Database(db_err) => match db_err.constraint() {
                Some(name) if name.contains("username") => {
                    ApiError::Conflict("username already taken".to_string())
                }
                Some(name) => ApiError::Conflict(format!("constraint violated: {name}")),
                None => ApiError::InternalError(db_err.to_string()),
            },

            other => ApiError::InternalError(other.to_string()),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::DuplicateUsername => {
                ApiError::Conflict("username already taken".to_string())
            }
            UserError::Password(e) => e.into(),
            UserError::Database(e) => e.into(),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => ApiError::Unauthorized("token expired".to_string()),
            TokenError::Invalid(_) => ApiError::Unauthorized("invalid token".to_string()),
            TokenError::Sign(msg) => ApiError::InternalError(msg),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        let details = err
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| ValidationErrorDetail {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "invalid value".to_string()),
                })
            })
            .collect();

        ApiError::ValidationError(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_track_variants() {
        assert_eq!(ApiError::NotFound("x".into()).code(), "not_found");
        assert_eq!(ApiError::Conflict("x".into()).code(), "conflict");
        assert_eq!(
            ApiError::NotFound("x".into()).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn duplicate_username_is_a_conflict() {
        let err: ApiError = UserError::DuplicateUsername.into();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[test]
    fn exhausted_pool_is_service_unavailable() {
        let err: ApiError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, ApiError::ServiceUnavailable(_)));
    }

    #[test]
    fn expired_token_is_unauthorized() {
        let err: ApiError = TokenError::Expired.into();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[test]
    fn display_includes_code_and_message() {
        let err = ApiError::BadRequest("expected Bearer token".into());
        assert_eq!(err.to_string(), "bad_request: expected Bearer token");
    }
}
