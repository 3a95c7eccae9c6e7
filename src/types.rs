//! Output records for parsed containers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Display form used when no sender field survives resolution.
pub const UNKNOWN_SENDER: &str = "Unknown Sender";

/// Display form used when the recipient field is empty.
pub const UNKNOWN_RECIPIENTS: &str = "Unknown Recipient(s)";

/// Display form used when the subject is missing.
pub const NO_SUBJECT: &str = "(No Subject)";

/// Display form used when rendering produced an empty body.
pub const NO_BODY: &str = "(No body content)";

/// A fully normalised message, ready for the enquiry-tracking layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedEmail {
    /// Sender field exactly as stored in the container, for audit.
    pub raw_from: String,

    /// Canonical `"Name <email>"` display form; never empty.
    pub email_from: String,

    /// Semicolon-joined canonical recipient list; never empty.
    pub email_to: String,

    /// Semicolon-joined carbon-copy list; may be empty.
    pub email_cc: String,

    /// Subject line; never empty.
    pub subject: String,

    /// The single authoritative timestamp, stored in UTC.
    pub email_date: DateTime<Utc>,

    /// Display rendering of the timestamp, e.g. `"Jun 15, 2024 10:00 BST"`.
    pub email_date_str: String,

    /// Rendered body; shape depends on the requested mode. Never empty.
    pub body_content: String,

    /// Classified traffic direction.
    pub direction: Direction,

    /// Whether the container carried any raw attachments at all.
    pub has_attachments: bool,

    /// True only when `body_content` is HTML (full mode).
    pub is_html: bool,

    /// Records for the attachments written to storage, in source order.
    pub image_attachments: Vec<AttachmentRecord>,
}

impl ParsedEmail {
    /// Recover the bare sender address for the downstream member lookup.
    ///
    /// Tries the canonical `email_from` first, then the raw field.
    #[must_use]
    pub fn sender_address(&self) -> Option<String> {
        crate::sender::bare_address(&self.email_from)
            .or_else(|| crate::sender::bare_address(&self.raw_from))
    }
}

/// Whether a message was addressed to or sent from the monitored inbox
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Incoming,
    Outgoing,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Incoming => write!(f, "INCOMING"),
            Self::Outgoing => write!(f, "OUTGOING"),
        }
    }
}

/// How the body should be rendered
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BodyMode {
    /// Truncated plain-text preview for form population.
    #[default]
    Snippet,

    /// Full plain text with reconstructed paragraphs, for history notes.
    Plain,

    /// HTML rendering of the whole message.
    Full,
}

impl BodyMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Snippet => "snippet",
            Self::Plain => "plain",
            Self::Full => "full",
        }
    }
}

impl FromStr for BodyMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "snippet" => Ok(Self::Snippet),
            "plain" => Ok(Self::Plain),
            "full" => Ok(Self::Full),
            other => Err(ParseError::Processing(format!(
                "unknown body content mode: {other}"
            ))),
        }
    }
}

impl fmt::Display for BodyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Category an extracted attachment was classified into
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Image,
    Document,
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Document => write!(f, "document"),
        }
    }
}

/// Metadata for one attachment written to storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentRecord {
    /// Filename as it appeared in the container.
    pub original_filename: String,

    /// Generated collision-free name the bytes were stored under.
    pub saved_filename: String,

    /// Relative, date-bucketed path (forward slashes) under the media root.
    pub file_path: String,

    /// Bytes actually written, after any resizing.
    pub file_size: u64,

    /// Public URL of the stored file.
    pub file_url: String,

    pub file_type: FileType,

    /// Provenance marker; always `"extracted"` for this pipeline.
    pub upload_type: String,

    /// Whether the image was re-encoded to fit the size bounds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub was_resized: Option<bool>,

    /// Pre-resize byte count, for images.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_size: Option<u64>,
}
