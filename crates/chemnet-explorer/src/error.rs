//! Error types for the ChemNet explorer.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.
//! `ClientError` describes what went wrong on the wire; `PanelError` is what a panel
//! shows to the user.

/// Shown when a request never reached the backend.
pub const NETWORK_MESSAGE: &str = "Unable to connect to the backend server.";

/// Shown when the backend answered with something that is not the expected JSON.
pub const MALFORMED_MESSAGE: &str = "Unexpected response from the backend server.";

/// Errors from the HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// A non-JSON document (typically an HTML error page) where JSON was expected.
    #[error("Expected JSON but received {content_type}")]
    UnexpectedContent {
        /// Content type reported or sniffed from the body.
        content_type: String,
    },

    /// Endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Resource not found (404 response).
    #[error("Resource not found: {}", message.as_deref().unwrap_or("no details"))]
    NotFound {
        /// `message` field of the JSON error body, if any.
        message: Option<String>,
    },

    /// Invalid request parameters (400 response).
    #[error("Bad request: {}", message.as_deref().unwrap_or("no details"))]
    BadRequest {
        /// `message` field of the JSON error body, if any.
        message: Option<String>,
    },

    /// Server error (5xx response).
    #[error("Server error ({status}): {}", message.as_deref().unwrap_or("no details"))]
    Server {
        /// HTTP status code
        status: u16,
        /// `message` field of the JSON error body, if any.
        message: Option<String>,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {}", message.as_deref().unwrap_or("no details"))]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// `message` field of the JSON error body, if any.
        message: Option<String>,
    },
}

impl ClientError {
    /// Create an error for a non-success status, keeping the backend's message.
    #[must_use]
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            404 => Self::NotFound { message },
            400 => Self::BadRequest { message },
            500..=599 => Self::Server { status, message },
            _ => Self::UnexpectedStatus { status, message },
        }
    }

    /// Returns true if the request never produced a response.
    ///
    /// Failures while reading a body the backend already started sending are
    /// not network errors.
    #[must_use]
    pub fn is_network(&self) -> bool {
        match self {
            Self::Http(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            _ => false,
        }
    }

    /// HTTP status of the failed response, if the backend answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::BadRequest { .. } => Some(400),
            Self::Server { status, .. } | Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The backend's own explanation, when its error body carried one.
    #[must_use]
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::NotFound { message }
            | Self::BadRequest { message }
            | Self::Server { message, .. }
            | Self::UnexpectedStatus { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Errors surfaced by a search panel.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PanelError {
    /// The request never reached the server.
    #[error("Network error: {message}")]
    Network {
        /// Underlying transport message, for logs.
        message: String,
    },

    /// Non-2xx status or a malformed payload.
    #[error("Server error: {message}")]
    Server {
        /// HTTP status, absent for malformed payloads.
        status: Option<u16>,
        /// User-facing message.
        message: String,
    },

    /// The backend answered `success: false`.
    #[error("{message}")]
    DomainMiss {
        /// Backend message or the panel's default.
        message: String,
        /// Alternate queries offered by the backend.
        suggestions: Vec<String>,
    },

    /// Input rejected before any request was made.
    #[error("Validation error: {message}")]
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },
}

impl PanelError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation { field: field.into(), message: message.into() }
    }

    /// Create a domain miss.
    #[must_use]
    pub fn domain_miss(message: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self::DomainMiss { message: message.into(), suggestions }
    }

    /// Suggestions carried by a domain miss; empty for every other kind.
    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        match self {
            Self::DomainMiss { suggestions, .. } => suggestions,
            _ => &[],
        }
    }

    /// Convert to the message a panel displays.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::Network { .. } => NETWORK_MESSAGE.to_string(),
            Self::Server { message, .. } | Self::DomainMiss { message, .. } => message.clone(),
            Self::Validation { field, message } => {
                format!("Invalid input for '{field}': {message}")
            }
        }
    }
}

impl From<ClientError> for PanelError {
    fn from(err: ClientError) -> Self {
        if err.is_network() {
            return Self::Network { message: err.to_string() };
        }

        if let Some(status) = err.status() {
            let message = err
                .backend_message()
                .map(str::to_string)
                .unwrap_or_else(|| format!("Server error: {status}"));
            return Self::Server { status: Some(status), message };
        }

        match err {
            ClientError::InvalidUrl(e) => Self::Server { status: None, message: e.to_string() },
            _ => Self::Server { status: None, message: MALFORMED_MESSAGE.to_string() },
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for panel operations.
pub type PanelResult<T> = Result<T, PanelError>;
