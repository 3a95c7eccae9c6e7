// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Legacy Mail-Container Ingestion
//!
//! Converts legacy compound-document mail containers into normalised,
//! sanitised records for an enquiry-tracking system.
//!
//! # Features
//!
//! - Canonical sender and recipient resolution from fragmentary fields
//! - A single authoritative UTC timestamp with a civil-time display string
//! - Incoming/outgoing classification from addresses and gateway banners
//! - Three body renderings: snippet, plain, full HTML
//! - Attachment extraction with size-bounded image resizing
//!
//! The binary container format itself is decoded by an external
//! collaborator implementing [`ContainerOpener`]; this crate owns
//! everything after the decode, and no malformed message ever surfaces as
//! anything but a structured error.
//!
//! # Example
//!
//! ```rust
//! use enquiry_mail::{BodyMode, EmailParser, ParserConfig, StaticContainer, StaticOpener};
//!
//! let container = StaticContainer {
//!     sender: Some("Jane Doe <jane@example.com>".into()),
//!     to: Some("Enquiries <enquiries@example.gov.uk>".into()),
//!     subject: Some("Pothole on High Street".into()),
//!     plain_body: Some("There is a deep pothole outside number 12.".into()),
//!     ..StaticContainer::default()
//! };
//!
//! let parser = EmailParser::new(
//!     Box::new(StaticOpener::new(container)),
//!     ParserConfig::new("enquiries@example.gov.uk", "/var/media", "/media/"),
//! );
//!
//! let email = parser
//!     .parse("message.msg".as_ref(), BodyMode::Snippet, true)
//!     .unwrap();
//!
//! assert_eq!(email.email_from, "Jane Doe <jane@example.com>");
//! assert_eq!(email.direction.to_string(), "INCOMING");
//! ```

mod attachments;
mod config;
mod container;
mod date;
mod direction;
mod directory;
mod error;
mod layout;
mod oplog;
mod parser;
mod render;
mod resize;
mod sanitize;
mod sender;
mod types;

pub use attachments::{AttachmentFailure, Extraction, extract_attachments};
pub use config::{ImageLimits, ParserConfig};
pub use container::*;
pub use directory::{MemberDirectory, MemberRef, resolve_member};
pub use error::{ContainerError, MemberLookupError, ParseError, Result};
pub use oplog::{FileOperationLog, TracingFileLog};
pub use parser::{EmailParser, validate_container_path};
pub use resize::{ResizedImage, resize_if_needed};
pub use sanitize::{remove_angle_bracket_links, remove_banners};
pub use sender::format_recipient_list;
pub use types::*;
