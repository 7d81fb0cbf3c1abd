use std::fmt;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Authentication and password errors
    ArgonError(argon2::Error),
    PasswordHashError(argon2::password_hash::Error),
    InvalidCredentials,
    Unauthenticated,

    // Database errors
    DatabaseError(String),
    DuplicateUsername(String),

    // Rendering errors
    TemplateError(String),

    // Startup errors
    Config(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::ArgonError(e) => write!(f, "Argon2 error: {}", e),
            AppError::PasswordHashError(e) => write!(f, "Password hash error: {}", e),
            AppError::InvalidCredentials => write!(f, "Invalid credentials"),
            AppError::Unauthenticated => write!(f, "Authentication required"),

            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppError::DuplicateUsername(username) => write!(f, "Username already exists: {}", username),

            AppError::TemplateError(msg) => write!(f, "Template error: {}", msg),

            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // The two user-facing failures are plain text on a 200, like the form pages expect.
        match &self {
            AppError::DuplicateUsername(username) => {
                tracing::info!(username = %username, "signup rejected, username taken");
                return "⚠️ Username already exists!".into_response();
            }
            AppError::InvalidCredentials => {
                return "❌ Invalid credentials!".into_response();
            }
            AppError::Unauthenticated => {
                return Redirect::to("/login").into_response();
            }
            _ => {}
        }

        // Everything else is a server fault: log the detail, never leak it
        tracing::error!(error = %self, "request failed");

        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let body = Json(json!({
            "error": {
                "message": "Internal server error",
                "code": status.as_u16()
            }
        }));

        (status, body).into_response()
    }
}

impl AppError {
    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::DatabaseError(msg.into())
    }

    /// Create a duplicate username error
    pub fn duplicate_username(username: impl Into<String>) -> Self {
        Self::DuplicateUsername(username.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

// Conversion from database errors
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        Self::DatabaseError(err.to_string())
    }
}

impl From<minijinja::Error> for AppError {
    fn from(err: minijinja::Error) -> Self {
        Self::TemplateError(err.to_string())
    }
}

// Conversion from argon2 errors
impl From<argon2::Error> for AppError {
    fn from(err: argon2::Error) -> Self {
        Self::ArgonError(err)
    }
}

impl From<argon2::password_hash::Error> for AppError {
    fn from(err: argon2::password_hash::Error) -> Self {
        Self::PasswordHashError(err)
    }
}
