//! Error types for document acquisition and extraction
//!
//! Search misses are never errors: an absent container, anchor or field is
//! represented by an empty sequence or an empty string. Only failures that
//! prevent building any result at all end up here.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScrapeError {
    #[error("Failed to read document: {message}")]
    DocumentRead { message: String },

    #[error("Document is not valid UTF-8 (valid up to byte {valid_up_to})")]
    InvalidEncoding { valid_up_to: usize },

    #[error("Unknown extraction profile '{name}'")]
    UnknownProfile { name: String, available: Vec<String> },

    #[error("Invalid extraction profile '{profile}': {reason}")]
    InvalidProfile { profile: String, reason: String },

    #[error("HTTP request failed: {url} - {message}")]
    HttpRequestFailed { url: String, message: String },

    #[error("HTTP request did not succeed: {status} - {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Failed to read response body: {url} - {message}")]
    ResponseReadFailed { url: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String, field: String },
}

impl ScrapeError {
    /// Create a document read error from an I/O failure
    pub fn document_read(err: &std::io::Error) -> Self {
        Self::DocumentRead {
            message: err.to_string(),
        }
    }

    /// Create an unknown profile error listing the registered names
    pub fn unknown_profile(name: &str, available: Vec<String>) -> Self {
        Self::UnknownProfile {
            name: name.to_string(),
            available,
        }
    }

    pub fn invalid_profile(profile: &str, reason: impl Into<String>) -> Self {
        Self::InvalidProfile {
            profile: profile.to_string(),
            reason: reason.into(),
        }
    }

    pub fn configuration(field: &str, message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
            field: field.to_string(),
        }
    }

    /// Whether the error came from the upstream fetch rather than the document itself.
    ///
    /// A fetch failure means the extraction core never ran for that site.
    pub const fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::HttpRequestFailed { .. } | Self::HttpStatus { .. } | Self::ResponseReadFailed { .. }
        )
    }
}

pub type ScrapeResult<T> = Result<T, ScrapeError>;
