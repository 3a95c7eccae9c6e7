//! Parse orchestration

use chrono::Utc;
use std::path::Path;
use tracing::debug;

use crate::attachments::{self, Extraction};
use crate::config::ParserConfig;
use crate::container::ContainerOpener;
use crate::date;
use crate::direction;
use crate::error::{ParseError, Result};
use crate::oplog::{FileOperationLog, TracingFileLog};
use crate::render;
use crate::sender;
use crate::types::{BodyMode, NO_BODY, NO_SUBJECT, ParsedEmail, UNKNOWN_RECIPIENTS};

/// Container extensions accepted at the upload boundary.
const SUPPORTED_EXTENSIONS: [&str; 2] = ["msg", "eml"];

/// Sequences the full ingestion pipeline over one container per call.
///
/// Holds no state between calls; concurrent parses only share the
/// filesystem, where generated attachment names never collide.
pub struct EmailParser {
    opener: Box<dyn ContainerOpener>,
    config: ParserConfig,
    oplog: Box<dyn FileOperationLog>,
}

impl EmailParser {
    /// Build a parser around an injected container decoder.
    ///
    /// File operations are reported through [`TracingFileLog`] unless
    /// [`Self::with_file_log`] replaces it.
    #[must_use]
    pub fn new(opener: Box<dyn ContainerOpener>, config: ParserConfig) -> Self {
        Self {
            opener,
            config,
            oplog: Box::new(TracingFileLog),
        }
    }

    /// Replace the file-operation log port.
    #[must_use]
    pub fn with_file_log(mut self, oplog: Box<dyn FileOperationLog>) -> Self {
        self.oplog = oplog;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse one container into a normalised record.
    ///
    /// A failure to open the container, or any unexpected processing
    /// failure, comes back as a structured [`ParseError`]; every other
    /// problem degrades to a logged fallback inside the affected
    /// component. The container is released on every path out of this
    /// call. Safe to re-run: identical input yields an identical record,
    /// apart from freshly generated attachment names.
    pub fn parse(
        &self,
        path: &Path,
        mode: BodyMode,
        skip_attachments: bool,
    ) -> Result<ParsedEmail> {
        debug!(path = %path.display(), %mode, skip_attachments, "parsing container");

        let container = self
            .opener
            .open(path)
            .map_err(|err| ParseError::ContainerOpen(err.to_string()))?;
        let container = &*container;

        let (email_from, raw_from) = sender::resolve_sender(container);
        let (email_date, email_date_str) = date::resolve_date(container, &self.config);

        let plain_body = container.plain_body().unwrap_or_default().to_string();
        let html_body = container.html_body().filter(|body| !body.is_empty());

        let direction = direction::classify(container, &plain_body, &self.config.inbox_address);

        let body_content = match mode {
            BodyMode::Snippet => render::render_snippet(&plain_body),
            BodyMode::Plain => render::render_plain(&plain_body),
            BodyMode::Full => render::render_full(html_body, &plain_body),
        };
        let is_html = mode == BodyMode::Full;

        let has_attachments = !container.attachments().is_empty();
        let extraction = if skip_attachments {
            debug!("skipping attachment extraction as requested");
            Extraction::default()
        } else {
            attachments::extract_attachments(
                container.attachments(),
                &self.config,
                &*self.oplog,
                Utc::now().date_naive(),
            )
        };

        let email_to = sender::format_recipient_list(container.to().unwrap_or_default());
        let email_cc = sender::format_recipient_list(container.cc().unwrap_or_default());

        Ok(ParsedEmail {
            raw_from,
            email_from,
            email_to: fallback(email_to, UNKNOWN_RECIPIENTS),
            email_cc,
            subject: fallback(
                container.subject().unwrap_or_default().to_string(),
                NO_SUBJECT,
            ),
            email_date,
            email_date_str,
            body_content: fallback(body_content, NO_BODY),
            direction,
            has_attachments,
            is_html,
            image_attachments: extraction.saved,
        })
    }
}

/// Check an upload path against the supported container types.
///
/// `.eml` is recognised but reported as unimplemented; everything other
/// than the supported extensions is rejected outright.
pub fn validate_container_path(path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ParseError::UnsupportedExtension(
            path.display().to_string(),
        ));
    }
    if extension == "eml" {
        return Err(ParseError::EmlNotImplemented);
    }
    Ok(())
}

fn fallback(value: String, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}
