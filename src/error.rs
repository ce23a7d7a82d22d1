//! Error types for kb
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, unknown task, duplicate account)
//! - 3: Sign-in required or refused
//! - 4: Operation failed (terminal, IO)

use thiserror::Error;

/// Exit codes for the kb CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const AUTH_REFUSED: i32 = 3;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for kb operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Task title cannot be empty")]
    EmptyTitle,

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("An account already exists for {0}")]
    EmailTaken(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Sign-in failures (exit code 3)
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Not signed in: {0} requires an account")]
    IdentityRequired(&'static str),

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors
            Error::EmptyTitle
            | Error::TaskNotFound(_)
            | Error::EmailTaken(_)
            | Error::InvalidArgument(_)
            | Error::InvalidConfig(_) => exit_codes::USER_ERROR,

            // Sign-in failures
            Error::InvalidCredentials | Error::IdentityRequired(_) => exit_codes::AUTH_REFUSED,

            // Operation failures
            Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::OperationFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Structured payload for the JSON error envelope, when the variant
    /// carries something worth machine-reading.
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::TaskNotFound(id) => Some(serde_json::json!({ "task": id })),
            Error::EmailTaken(email) => Some(serde_json::json!({ "email": email })),
            _ => None,
        }
    }
}

/// Result type alias for kb operations
pub type Result<T> = std::result::Result<T, Error>;
