//! Error types for zonemgr
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for zonemgr operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for zonemgr
#[derive(Error, Debug)]
pub enum Error {
    /// Network-level failures (timeout, connection refused, DNS)
    #[error("network error: {0}")]
    Network(String),

    /// Provider rate limiting, surfaced only after internal retries
    /// are exhausted
    #[error("rate limited by provider: {0}")]
    RateLimited(String),

    /// Provider rejected the request (4xx/5xx with a structured body)
    #[error("provider rejected request (status {status}): {message}")]
    Provider {
        /// HTTP status of the response
        status: u16,
        /// Provider-supplied error code, when present in the body
        code: Option<u32>,
        /// Provider-supplied or synthesized message
        message: String,
    },

    /// A record had the wrong type for the requested operation
    #[error("invalid record type: expected {expected}, found {actual}")]
    InvalidRecordType {
        /// The type the operation requires
        expected: String,
        /// The type the record actually has
        actual: String,
    },

    /// Configuration errors (unreadable file, invalid values)
    #[error("configuration error: {0}")]
    Config(String),

    /// A required credential or setting is absent; fatal at startup
    #[error("missing configuration: {0}")]
    ConfigMissing(String),

    /// Local file store errors that were not recoverable in place
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Public IP resolution failed on both the primary and fallback
    /// sources; terminal for the calling operation
    #[error("public IP resolution failed: {0}")]
    IpResolution(String),

    /// Zone or record not found
    #[error("not found: {0}")]
    NotFound(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors from local file access
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a rate-limit error
    pub fn rate_limited(msg: impl Into<String>) -> Self {
        Self::RateLimited(msg.into())
    }

    /// Create a provider rejection error
    pub fn provider(status: u16, code: Option<u32>, message: impl Into<String>) -> Self {
        Self::Provider {
            status,
            code,
            message: message.into(),
        }
    }

    /// Create an invalid-record-type error
    pub fn invalid_record_type(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::InvalidRecordType {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a missing-configuration error
    pub fn config_missing(msg: impl Into<String>) -> Self {
        Self::ConfigMissing(msg.into())
    }

    /// Create a persistence error
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Create an IP resolution error
    pub fn ip_resolution(msg: impl Into<String>) -> Self {
        Self::IpResolution(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}
