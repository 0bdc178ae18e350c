//! Error types for Tether operations.
//!
//! This module provides the main error type [`TetherError`] which wraps
//! the failures a host or the connector registry can report.

use thiserror::Error;

use tether_core::anchor::AttachmentParseError;

use crate::registry::ConnectorId;

/// The main error type for Tether operations.
#[derive(Debug, Error)]
pub enum TetherError {
    #[error("Host error: {0}")]
    Host(String),

    #[error("Unknown connector: {0}")]
    UnknownConnector(ConnectorId),

    #[error("Unknown element: {0}")]
    UnknownElement(String),

    #[error(transparent)]
    Attachment(#[from] AttachmentParseError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for Tether operations
pub type Result<T> = std::result::Result<T, TetherError>;
