//! Catalog-specific error types.

use thiserror::Error;

use super::model::ProductId;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while loading, editing or deleting products.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    /// A form field failed client-side validation. No request was sent.
    #[error("The field '{field}' {reason}.")]
    Validation {
        /// Wire name of the offending field.
        field: String,
        /// Human-readable reason, phrased to follow the field name.
        reason: String,
    },

    /// The request could not be completed (connection, timeout, bad body).
    #[error("Network error: {0}")]
    Network(String),

    /// The API answered with a non-2xx status.
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Server-provided message, or a generic one.
        message: String,
    },

    /// The requested product does not exist.
    #[error("Product {0} not found")]
    NotFound(ProductId),

    /// The form has no loaded record to submit.
    #[error("The product has not been loaded yet")]
    FormNotReady,

    /// A submit is already in flight for this form.
    #[error("A save is already in progress")]
    SubmitInProgress,
}

impl CatalogError {
    /// Create a validation error for a field.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a "field is empty" validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        Self::validation(field, "cannot be empty")
    }

    /// Create a network error.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a server error.
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    /// Whether this error was raised before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// The field named by a validation error.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }

    /// The single message shown to the user for this failure.
    ///
    /// Server errors show only the server's message; the status code is
    /// kept for logs.
    pub fn user_message(&self) -> String {
        match self {
            Self::Server { message, .. } => message.clone(),
            Self::Network(_) => "Could not reach the catalog server.".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Network(format!("request timed out: {}", err))
        } else if err.is_decode() {
            Self::Network(format!("invalid response body: {}", err))
        } else {
            Self::Network(err.to_string())
        }
    }
}
