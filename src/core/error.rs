//! Error types and handling for the catalog client.
//!
//! This module defines a unified error type that can represent errors from
//! the catalog domain and from the console's own I/O.

use thiserror::Error;

/// A specialized Result type for catalog client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the catalog client.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the catalog domain.
    #[error("Catalog error: {0}")]
    Catalog(#[from] crate::domains::catalog::CatalogError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors from the terminal streams.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
