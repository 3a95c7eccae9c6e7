//! The container capability boundary
//!
//! The legacy compound-document format is decoded by an external
//! collaborator. This module defines the capability that decoder must
//! expose: every field the pipeline reads, typed as `Option` where the
//! format makes it optional. The pipeline never touches the binary format
//! itself.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use std::path::Path;

use crate::error::ContainerError;

/// A timestamp as a decoder found it in the container.
///
/// Delivery times carry an offset in some producer versions and are naive
/// in others; the pipeline decides how to interpret each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerTime {
    /// No timezone information attached.
    Naive(NaiveDateTime),

    /// Already carries an offset.
    Zoned(DateTime<FixedOffset>),
}

impl From<DateTime<Utc>> for ContainerTime {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Zoned(value.fixed_offset())
    }
}

/// The submit-time field as a raw calendar tuple, year through second.
///
/// Values are taken verbatim from the container and may not form a valid
/// date; [`SentTime::to_naive`] returns `None` in that case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl SentTime {
    /// Interpret the tuple as a naive datetime, if the fields form one.
    #[must_use]
    pub fn to_naive(self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)?
            .and_hms_opt(self.hour, self.minute, self.second)
    }
}

/// One undecoded attachment as stored in the container.
#[derive(Debug, Clone, Default)]
pub struct RawAttachment {
    /// Long-form filename, when the producer recorded one.
    pub long_filename: Option<String>,

    /// 8.3-style short filename fallback.
    pub short_filename: Option<String>,

    /// The attachment payload. Empty payloads are skipped.
    pub data: Vec<u8>,
}

/// An opened mail container.
///
/// One container is opened per parse call and released when the value is
/// dropped, whichever way the call exits. Accessors return `None` for
/// fields the message simply does not carry; they never fail.
pub trait MessageContainer {
    /// Raw sender field as stored, unprocessed.
    fn sender(&self) -> Option<&str>;

    /// Pre-split sender display name, if the container has one.
    fn sender_name(&self) -> Option<&str>;

    /// Pre-split sender address, if the container has one.
    fn sender_email(&self) -> Option<&str>;

    /// Semicolon-separated primary recipient field.
    fn to(&self) -> Option<&str>;

    /// Semicolon-separated carbon-copy field.
    fn cc(&self) -> Option<&str>;

    /// Semicolon-separated blind-copy field.
    fn bcc(&self) -> Option<&str>;

    fn subject(&self) -> Option<&str>;

    fn plain_body(&self) -> Option<&str>;

    fn html_body(&self) -> Option<&str>;

    /// Delivery timestamp, preferred over the submit time when present.
    fn received_time(&self) -> Option<ContainerTime>;

    /// Submit timestamp as a raw calendar tuple.
    fn sent_time_parts(&self) -> Option<SentTime>;

    fn attachments(&self) -> &[RawAttachment];
}

/// Decodes container files into [`MessageContainer`] values.
///
/// Implemented by the external decoder; injected into the orchestrator.
pub trait ContainerOpener {
    /// Open and decode the container at `path`.
    ///
    /// Failure here is fatal for the parse call.
    fn open(&self, path: &Path) -> std::result::Result<Box<dyn MessageContainer>, ContainerError>;
}

/// An in-memory [`MessageContainer`] for tests and downstream fixtures.
///
/// Fill in the fields a scenario needs and leave the rest defaulted. This
/// is a stand-in for a decoded message, not a decoder.
#[derive(Debug, Clone, Default)]
pub struct StaticContainer {
    pub sender: Option<String>,
    pub sender_name: Option<String>,
    pub sender_email: Option<String>,
    pub to: Option<String>,
    pub cc: Option<String>,
    pub bcc: Option<String>,
    pub subject: Option<String>,
    pub plain_body: Option<String>,
    pub html_body: Option<String>,
    pub received_time: Option<ContainerTime>,
    pub sent_time_parts: Option<SentTime>,
    pub attachments: Vec<RawAttachment>,
}

impl MessageContainer for StaticContainer {
    fn sender(&self) -> Option<&str> {
        self.sender.as_deref()
    }

    fn sender_name(&self) -> Option<&str> {
        self.sender_name.as_deref()
    }

    fn sender_email(&self) -> Option<&str> {
        self.sender_email.as_deref()
    }

    fn to(&self) -> Option<&str> {
        self.to.as_deref()
    }

    fn cc(&self) -> Option<&str> {
        self.cc.as_deref()
    }

    fn bcc(&self) -> Option<&str> {
        self.bcc.as_deref()
    }

    fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    fn plain_body(&self) -> Option<&str> {
        self.plain_body.as_deref()
    }

    fn html_body(&self) -> Option<&str> {
        self.html_body.as_deref()
    }

    fn received_time(&self) -> Option<ContainerTime> {
        self.received_time
    }

    fn sent_time_parts(&self) -> Option<SentTime> {
        self.sent_time_parts
    }

    fn attachments(&self) -> &[RawAttachment] {
        &self.attachments
    }
}

/// Opener that hands out clones of a fixed [`StaticContainer`].
#[derive(Debug, Clone)]
pub struct StaticOpener {
    container: StaticContainer,
}

impl StaticOpener {
    #[must_use]
    pub const fn new(container: StaticContainer) -> Self {
        Self { container }
    }
}

impl ContainerOpener for StaticOpener {
    fn open(&self, _path: &Path) -> std::result::Result<Box<dyn MessageContainer>, ContainerError> {
        Ok(Box::new(self.container.clone()))
    }
}
