//! Custom error types for Wheelboard
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// Message shown for every failed tag verification.
///
/// Wrong password and corrupted ciphertext must be indistinguishable.
pub const AUTHENTICATION_MESSAGE: &str = "wrong password";

/// The main error type for Wheelboard operations
#[derive(Error, Debug)]
pub enum WheelboardError {
    /// Payload could not be serialized for encryption
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Envelope is malformed (bad base64, wrong field length, bad payload)
    #[error("Corrupted data: {0}")]
    Format(String),

    /// Tag verification failed
    #[error("Decryption failed: {}", AUTHENTICATION_MESSAGE)]
    Authentication,

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Page template errors
    #[error("Template error: {0}")]
    Template(String),

    /// Validation errors for inputs
    #[error("Validation error: {0}")]
    Validation(String),
}

impl WheelboardError {
    /// Check if this is a tag verification failure
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication)
    }

    /// Check if this is a malformed envelope error
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Whether a human can fix the failure by supplying another password
    pub fn is_retryable(&self) -> bool {
        self.is_authentication()
    }

    /// Short classification suitable for showing to the end user.
    ///
    /// Never contains plaintext or key material.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Authentication => AUTHENTICATION_MESSAGE,
            Self::Format(_) => "corrupted data",
            Self::Serialization(_) => "payload cannot be serialized",
            Self::Config(_) => "configuration error",
            Self::Io(_) => "file error",
            Self::Json(_) => "invalid JSON",
            Self::Template(_) => "template error",
            Self::Validation(_) => "invalid input",
        }
    }
}

impl From<std::io::Error> for WheelboardError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for WheelboardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Wheelboard operations
pub type WheelboardResult<T> = Result<T, WheelboardError>;
