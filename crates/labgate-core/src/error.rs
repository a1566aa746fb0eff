//! Shared error type across labgate crates.

use thiserror::Error;

/// Caller-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid input / malformed config.
    BadRequest,
    /// Credentials rejected by the backend (HTTP 401).
    AuthFailed,
    /// Username or email already taken (HTTP 409).
    Conflict,
    /// Any other non-2xx answer from the backend.
    Status,
    /// Network failure before a status was received.
    Transport,
    /// Session storage could not be read or written.
    Storage,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in logs and CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::AuthFailed => "AUTH_FAILED",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::Status => "HTTP_STATUS",
            ErrorCode::Transport => "TRANSPORT",
            ErrorCode::Storage => "STORAGE",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, LabgateError>;

/// Unified error type used by core and client.
#[derive(Debug, Error)]
pub enum LabgateError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("auth failed")]
    AuthFailed,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("transport: {0}")]
    Transport(String),
    #[error("storage: {0}")]
    Storage(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl LabgateError {
    /// Map a non-2xx backend answer onto the error taxonomy.
    /// 401 and 409 get their own variants because callers branch on them.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        match status {
            401 => LabgateError::AuthFailed,
            409 => LabgateError::Conflict(body.into()),
            _ => LabgateError::Status {
                status,
                body: body.into(),
            },
        }
    }

    /// Map internal error to a stable caller-facing code.
    pub fn code(&self) -> ErrorCode {
        match self {
            LabgateError::BadRequest(_) => ErrorCode::BadRequest,
            LabgateError::AuthFailed => ErrorCode::AuthFailed,
            LabgateError::Conflict(_) => ErrorCode::Conflict,
            LabgateError::Status { .. } => ErrorCode::Status,
            LabgateError::Transport(_) => ErrorCode::Transport,
            LabgateError::Storage(_) => ErrorCode::Storage,
            LabgateError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            LabgateError::Internal(_) => ErrorCode::Internal,
        }
    }

    /// HTTP status carried by the error, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            LabgateError::AuthFailed => Some(401),
            LabgateError::Conflict(_) => Some(409),
            LabgateError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// User-facing message for a failed login.
pub fn login_failure_message(err: &LabgateError) -> &'static str {
    match err {
        LabgateError::AuthFailed => "Invalid credentials.",
        _ => "Login failed. Please try again.",
    }
}

/// User-facing message for a failed registration.
pub fn register_failure_message(err: &LabgateError) -> &'static str {
    match err {
        LabgateError::Conflict(_) => "Username or email is already in use.",
        _ => "Registration failed. Please try again.",
    }
}
