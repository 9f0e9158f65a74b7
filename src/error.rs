use axum::response::{IntoResponse, Response};
use http::StatusCode;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Unauthorized(String),

    #[error(transparent)]
    Database(#[from] DbErr),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()).into_response(),
            AppError::Unauthorized(message) => {
                (StatusCode::UNAUTHORIZED, message).into_response()
            }
            AppError::Database(err) => {
                tracing::error!("Database error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
                    .into_response()
            }
            AppError::Internal(err) => {
                tracing::error!("Internal error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
                    .into_response()
            }
        }
    }
}

/// Whether a repository failure was a unique index rejecting the write.
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<DbErr>()
        .and_then(DbErr::sql_err)
        .is_some_and(|sql_err| matches!(sql_err, SqlErr::UniqueConstraintViolation(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_renders_entity_name() {
        let response = AppError::NotFound("Student").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::NotFound("Student").to_string(), "Student not found");
    }

    #[test]
    fn plain_errors_are_not_unique_violations() {
        assert!(!is_unique_violation(&anyhow::anyhow!("boom")));
        let err: anyhow::Error = DbErr::RecordNotFound("grade".to_string()).into();
        assert!(!is_unique_violation(&err));
    }
}
