use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error as ThisError;

use super::accounts::SignUpError;
use super::attendance::AttendanceError;

#[derive(Debug, ThisError)]
pub enum JamboreeError {
    #[error("Sign-in required")]
    Unauthenticated,

    #[error("Admin role required")]
    Forbidden,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{0} not found")]
    NotFound(String),

    #[error("An account already exists for {0}")]
    EmailTaken(String),

    #[error("duplicate membership for artist {artist_id} and gig {gig_id}")]
    DuplicateMembership { artist_id: i64, gig_id: i64 },

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    SignUp(#[from] SignUpError),

    #[error(transparent)]
    Attendance(#[from] AttendanceError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Ractor error: {0}")]
    RactorError(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl IntoResponse for JamboreeError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            JamboreeError::DatabaseError(_)
            | JamboreeError::RactorError(_)
            | JamboreeError::IoError(_)
            | JamboreeError::JsonError(_)
            | JamboreeError::Attendance(AttendanceError::ControlUnavailable(_)) => {
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                let body = ApiErrorObject {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                    details: None,
                };
                (status, body)
            }

            JamboreeError::Unauthenticated | JamboreeError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ApiErrorObject::new("UNAUTHENTICATED", self.to_string()),
            ),

            JamboreeError::Attendance(AttendanceError::Unauthenticated) => (
                StatusCode::UNAUTHORIZED,
                ApiErrorObject::new("UNAUTHENTICATED", self.to_string()),
            ),

            JamboreeError::Forbidden => (
                StatusCode::FORBIDDEN,
                ApiErrorObject::new("FORBIDDEN", self.to_string()),
            ),

            JamboreeError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                ApiErrorObject::new("NOT_FOUND", self.to_string()),
            ),

            JamboreeError::EmailTaken(_) => (
                StatusCode::CONFLICT,
                ApiErrorObject::new("EMAIL_TAKEN", self.to_string()),
            ),

            JamboreeError::DuplicateMembership { .. } => (
                StatusCode::CONFLICT,
                ApiErrorObject::new("DUPLICATE_MEMBERSHIP", self.to_string()),
            ),

            JamboreeError::Attendance(AttendanceError::ControlDisabled) => (
                StatusCode::CONFLICT,
                ApiErrorObject::new("CONTROL_DISABLED", self.to_string()),
            ),

            JamboreeError::Attendance(AttendanceError::MutationFailed { .. }) => (
                StatusCode::CONFLICT,
                ApiErrorObject::new("MUTATION_FAILED", self.to_string()),
            ),

            JamboreeError::SignUp(ref err) => {
                let details = json!({ "field": err.field(), "rule": err.code() });
                (
                    StatusCode::BAD_REQUEST,
                    ApiErrorObject {
                        code: "REGISTRATION_FAILED".to_string(),
                        message: err.to_string(),
                        details: Some(details),
                    },
                )
            }

            JamboreeError::BadRequest(_) => (
                StatusCode::BAD_REQUEST,
                ApiErrorObject::new("BAD_REQUEST", self.to_string()),
            ),
        };
        (status, Json(ApiErrorBody { inner: error_body })).into_response()
    }
}

/// Standardized API error response payload.
#[derive(Serialize)]
pub struct ApiErrorObject {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ApiErrorObject {
    fn new(code: &str, message: String) -> Self {
        Self {
            code: code.to_string(),
            message,
            details: None,
        }
    }
}

#[derive(Serialize)]
pub struct ApiErrorBody {
    #[serde(rename = "error")]
    pub inner: ApiErrorObject,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MembershipAction;
    use axum::body::to_bytes;

    async fn render(err: JamboreeError) -> (StatusCode, Value) {
        let resp = err.into_response();
        let status = resp.status();
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn mutation_failure_surfaces_reason() {
        let err = JamboreeError::from(AttendanceError::MutationFailed {
            action: MembershipAction::Join,
            reason: "duplicate".to_string(),
        });
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "MUTATION_FAILED");
        assert!(body["error"]["message"].as_str().unwrap().contains("duplicate"));
    }

    #[tokio::test]
    async fn internal_errors_hide_details() {
        let (status, body) = render(JamboreeError::RactorError("mailbox closed".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["message"], "An internal server error occurred.");
    }

    #[tokio::test]
    async fn signup_errors_name_the_field() {
        let (status, body) = render(SignUpError::PasswordMismatch.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Passwords do not match");
        assert_eq!(body["error"]["details"]["field"], "verifyPassword");
        assert_eq!(body["error"]["details"]["rule"], "passwordMismatch");
    }
}
