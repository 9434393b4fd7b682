use thiserror::Error;
use actix_web::{ResponseError, HttpResponse, http::StatusCode};
use serde_json::json;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("User already exists")]
    UserExists,

    // Deliberately covers both "no such user" and "wrong password".
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Migration error: {0}")]
    MigrationError(String),

    #[error("Record not found")]
    NotFound,

    #[error("Duplicate record")]
    Duplicate,
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::Database(DatabaseError::NotFound),
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Database(DatabaseError::Duplicate)
            }
            _ => AppError::Database(DatabaseError::QueryError(err.to_string())),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::Database(DatabaseError::MigrationError(err.to_string()))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AppError::Internal(err.to_string())
    }
}

// Token signing failures only; verification maps decode errors to
// Unauthorized itself.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // Unexpected failures are logged with their cause but surfaced as a
        // generic message so internals never reach the client.
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Internal error: {}", self);
            return HttpResponse::build(status).json(json!({
                "error": {
                    "status": status.as_u16(),
                    "message": "Something went wrong"
                }
            }));
        }

        let mut response = json!({
            "error": {
                "status": status.as_u16(),
                "message": self.to_string()
            }
        });
        if let AppError::Validation(violations) = self {
            response["error"]["details"] = json!(violations);
        }
        HttpResponse::build(status).json(response)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::UserExists | AppError::InvalidCredentials => {
                StatusCode::BAD_REQUEST
            }
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Database(_) | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_conversion() {
        // Test IO error conversion
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Internal(_)));

        // Test config error conversion
        let config_err = config::ConfigError::NotFound(String::from("key not found"));
        let app_err: AppError = config_err.into();
        assert!(matches!(app_err, AppError::Config(_)));

        // Test database error conversion
        let db_err = sqlx::Error::RowNotFound;
        let app_err: AppError = db_err.into();
        assert!(matches!(app_err, AppError::Database(DatabaseError::NotFound)));
    }

    #[test]
    fn test_error_status_codes() {
        let err = AppError::Validation(vec!["email must be a valid email address".to_string()]);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = AppError::UserExists;
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = AppError::InvalidCredentials;
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = AppError::Unauthorized("missing token".to_string());
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);

        let err = AppError::Database(DatabaseError::Duplicate);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_display() {
        let err = AppError::Validation(vec![
            "firstName is required".to_string(),
            "lastName is required".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: firstName is required, lastName is required"
        );

        let err = AppError::InvalidCredentials;
        assert_eq!(err.to_string(), "Invalid credentials");

        let err = AppError::Database(DatabaseError::Duplicate);
        assert_eq!(err.to_string(), "Database error: Duplicate record");
    }
}
