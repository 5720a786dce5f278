use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Failure taxonomy for the JSON API routes.
///
/// Session failures are not represented here; the auth gate rejects those
/// with a redirect before a handler ever runs.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed input on an otherwise well-formed request.
    #[error("{0}")]
    Validation(String),
    /// Unknown username or wrong password. One message for both, so the
    /// response never reveals whether the account exists.
    #[error("Invalid username or password.")]
    InvalidCredentials,
    /// A unique column (username or email) is already taken.
    #[error("Username or Email already exists.")]
    Conflict,
    /// The row does not exist, or it belongs to someone else. The two cases
    /// are indistinguishable on purpose.
    #[error("Expense not found or not authorized.")]
    NotFoundOrUnauthorized,
    /// Anything unexpected. The cause is logged server-side and withheld
    /// from the client.
    #[error("Internal server error.")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidCredentials => StatusCode::BAD_REQUEST,
            ApiError::Conflict => StatusCode::CONFLICT,
            ApiError::NotFoundOrUnauthorized => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(e) = &self {
            error!(error = %e, "request failed");
        }
        (self.status(), Json(json!({ "message": self.to_string() }))).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) {
                return ApiError::Conflict;
            }
        }
        ApiError::Internal(e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_taxonomy() {
        assert_eq!(
            ApiError::Validation("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::InvalidCredentials.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Conflict.status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::NotFoundOrUnauthorized.status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_message_is_generic() {
        let err = ApiError::Internal(anyhow::anyhow!("connection refused on 5432"));
        assert_eq!(err.to_string(), "Internal server error.");
    }

    #[test]
    fn credential_failure_message_does_not_name_the_cause() {
        assert_eq!(
            ApiError::InvalidCredentials.to_string(),
            "Invalid username or password."
        );
    }
}
