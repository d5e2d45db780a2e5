use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

/// Request-scoped failure taxonomy. Every variant maps to one status code so
/// callers can tell a duplicate email from a dangling user id from a plain
/// store outage.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    #[error("foreign key violated: {0}")]
    ForeignKeyViolation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::UniqueViolation(_) => StatusCode::CONFLICT,
            AppError::ForeignKeyViolation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Postgres error codes for unique / foreign key constraint violations.
const PG_UNIQUE_VIOLATION: &str = "23505";
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

/// Re-read a store error into the taxonomy. Constraint violations are
/// contract-level outcomes here, not internal failures.
pub fn classify_db_error(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db) = &err {
        match db.code().as_deref() {
            Some(PG_UNIQUE_VIOLATION) => {
                return AppError::UniqueViolation(db.message().to_string())
            }
            Some(PG_FOREIGN_KEY_VIOLATION) => {
                return AppError::ForeignKeyViolation(db.message().to_string())
            }
            _ => {}
        }
    }
    AppError::Database(err)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        (status, self.to_string()).into_response()
    }
}
