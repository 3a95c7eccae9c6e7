//! Error types for container ingestion

use thiserror::Error;

/// Errors that terminate a whole parse call
#[derive(Error, Debug)]
pub enum ParseError {
    /// The container file could not be opened or decoded
    #[error("Failed to open/parse container: {0}")]
    ContainerOpen(String),

    /// Any other failure during orchestration
    #[error("General error processing container: {0}")]
    Processing(String),

    /// The file extension is not a supported container type
    #[error("Unsupported container type: {0}")]
    UnsupportedExtension(String),

    /// `.eml` uploads are recognised but not decoded yet
    #[error("EML container parsing is not implemented; supply a .msg container")]
    EmlNotImplemented,
}

impl ParseError {
    /// The structured error payload handed back over the call boundary.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "error": self.to_string() })
    }
}

/// Error surfaced by a container decoder when a file cannot be opened
#[derive(Error, Debug)]
#[error("{0}")]
pub struct ContainerError(pub String);

/// Failures of the downstream member lookup contract
#[derive(Error, Debug)]
pub enum MemberLookupError {
    /// Neither `email_from` nor `raw_from` yields a bare address
    #[error("Could not extract sender email address from email")]
    NoSenderAddress,

    /// No active member has the sender's address
    #[error("No active member matches {0}")]
    NoMatch(String),
}

/// Result type for parse operations
pub type Result<T> = std::result::Result<T, ParseError>;
