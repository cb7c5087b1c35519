//! Client error types

use thiserror::Error;

/// Generic text shown for network failures
pub const NETWORK_ERROR_TEXT: &str = "Error de conexión. Verifica tu conexión a internet.";

/// Text shown when the session is no longer valid
pub const SESSION_EXPIRED_TEXT: &str = "Tu sesión ha expirado. Inicia sesión nuevamente.";

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (not a connect or timeout failure)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Could not reach the backend
    #[error("Connection error: {0}")]
    Connection(String),

    /// Request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Backend answered 401
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The session was expired by an earlier 401 or by logout
    #[error("Session expired")]
    SessionExpired,

    /// Credentials rejected at login
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Business error reported by the backend (duplicate code, ...)
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Local validation error, never sent to the network
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The owning view was torn down before the request finished
    #[error("Request cancelled")]
    Cancelled,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Operation not allowed in the current state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Local I/O (export files, token file)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse error class, used to decide how a failure is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Field-scoped, stays inside the form
    Validation,
    /// Retryable banner
    Network,
    /// Forces a new login
    Authorization,
    /// Backend message shown verbatim
    Business,
    /// Anything else
    Internal,
}

impl ClientError {
    /// Classify a reqwest failure by its cause
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else {
            Self::Http(err)
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Validation(_) => ErrorClass::Validation,
            Self::Http(_) | Self::Connection(_) | Self::Timeout => ErrorClass::Network,
            Self::Unauthorized(_) | Self::SessionExpired => ErrorClass::Authorization,
            Self::Auth(_) | Self::Forbidden(_) | Self::NotFound(_) | Self::Api { .. } => {
                ErrorClass::Business
            }
            _ => ErrorClass::Internal,
        }
    }

    /// Whether the user must log in again
    pub fn is_session_expired(&self) -> bool {
        self.class() == ErrorClass::Authorization
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Text to show to the user
    pub fn user_message(&self) -> String {
        match self {
            Self::Http(_) | Self::Connection(_) | Self::Timeout => NETWORK_ERROR_TEXT.to_string(),
            Self::Unauthorized(_) | Self::SessionExpired => SESSION_EXPIRED_TEXT.to_string(),
            Self::Auth(msg) | Self::Forbidden(msg) | Self::NotFound(msg) | Self::Validation(msg) => {
                msg.clone()
            }
            Self::Api { message, .. } => message.clone(),
            Self::Cancelled => "Operación cancelada".to_string(),
            _ => "Error inesperado".to_string(),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
