//! Attachment extraction to date-bucketed storage

use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tracing::{error, info};
use uuid::Uuid;

use crate::config::ParserConfig;
use crate::container::RawAttachment;
use crate::oplog::FileOperationLog;
use crate::resize;
use crate::types::{AttachmentRecord, FileType};

/// Extensions classified as images. Everything else that is not a
/// document is skipped silently.
const IMAGE_EXTENSIONS: [&str; 8] = ["jpg", "jpeg", "png", "gif", "bmp", "webp", "tiff", "tif"];

const DOCUMENT_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];

/// Storage category for extracted images.
const IMAGE_CATEGORY: &str = "enquiry_photos";

/// Storage category for extracted documents.
const DOCUMENT_CATEGORY: &str = "enquiry_attachments/documents";

/// Provenance marker stamped on every record this pipeline emits.
const UPLOAD_TYPE: &str = "extracted";

/// What happened to each attachment in a container.
///
/// One failing attachment never aborts the rest: failures are collected
/// alongside the records that did get written.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Records for attachments written to storage, in source order.
    pub saved: Vec<AttachmentRecord>,

    /// Attachments that errored and were skipped.
    pub skipped: Vec<AttachmentFailure>,
}

/// One attachment that could not be extracted.
#[derive(Debug, Clone)]
pub struct AttachmentFailure {
    pub filename: String,
    pub reason: String,
}

/// Extract supported attachments, resizing images, writing each under a
/// date bucket for `today`.
pub fn extract_attachments(
    attachments: &[RawAttachment],
    config: &ParserConfig,
    oplog: &dyn FileOperationLog,
    today: NaiveDate,
) -> Extraction {
    let mut extraction = Extraction::default();

    for attachment in attachments {
        match process_one(attachment, config, oplog, today) {
            Ok(Some(record)) => {
                info!(
                    original = %record.original_filename,
                    path = %record.file_path,
                    kind = %record.file_type,
                    "extracted attachment"
                );
                extraction.saved.push(record);
            }
            Ok(None) => {}
            Err(err) => {
                let filename = resolve_filename(attachment);
                error!(%filename, %err, "failed to extract attachment, skipping");
                oplog.operation_failed("extract", &filename, &err.to_string());
                extraction.skipped.push(AttachmentFailure {
                    filename,
                    reason: err.to_string(),
                });
            }
        }
    }

    extraction
}

/// Classify, process, and store a single attachment.
///
/// Returns `Ok(None)` for attachments outside the supported types or with
/// empty payloads.
fn process_one(
    attachment: &RawAttachment,
    config: &ParserConfig,
    oplog: &dyn FileOperationLog,
    today: NaiveDate,
) -> std::io::Result<Option<AttachmentRecord>> {
    let filename = resolve_filename(attachment);
    let Some(extension) = extension_of(&filename) else {
        return Ok(None);
    };
    let Some(file_type) = classify(&extension) else {
        return Ok(None);
    };
    if attachment.data.is_empty() {
        return Ok(None);
    }

    let original_size = attachment.data.len() as u64;
    let (data, was_resized, saved_extension) = match file_type {
        FileType::Image => {
            let resized = resize::resize_if_needed(attachment.data.clone(), &config.image);
            // A format-changing re-encode must not keep the old extension.
            let saved_extension =
                if resized.was_resized && extension != "jpg" && extension != "jpeg" {
                    "jpg".to_string()
                } else {
                    extension
                };
            (resized.data, resized.was_resized, saved_extension)
        }
        FileType::Document => (attachment.data.clone(), false, extension),
    };

    let saved_filename = format!("{}.{saved_extension}", Uuid::new_v4());
    let category = match file_type {
        FileType::Image => IMAGE_CATEGORY,
        FileType::Document => DOCUMENT_CATEGORY,
    };
    let relative_path = format!(
        "{category}/{}/{saved_filename}",
        today.format("%Y/%m/%d")
    );

    let absolute_path = config.media_root.join(&relative_path);
    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&absolute_path, &data)?;

    let file_size = data.len() as u64;
    oplog.file_written(&relative_path, file_size);
    if was_resized {
        oplog.image_resized(&relative_path, original_size, file_size);
    }

    let record = AttachmentRecord {
        original_filename: filename,
        saved_filename,
        file_url: format!("{}{relative_path}", config.media_url),
        file_path: relative_path,
        file_size,
        file_type,
        upload_type: UPLOAD_TYPE.to_string(),
        was_resized: match file_type {
            FileType::Image => Some(was_resized),
            FileType::Document => None,
        },
        original_size: match file_type {
            FileType::Image => Some(if was_resized { original_size } else { file_size }),
            FileType::Document => None,
        },
    };

    Ok(Some(record))
}

/// Prefer the long filename, fall back to the short one.
fn resolve_filename(attachment: &RawAttachment) -> String {
    attachment
        .long_filename
        .clone()
        .filter(|name| !name.is_empty())
        .or_else(|| {
            attachment
                .short_filename
                .clone()
                .filter(|name| !name.is_empty())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

/// Lowercased extension of a filename, if it has one.
fn extension_of(filename: &str) -> Option<String> {
    Path::new(&filename.to_lowercase())
        .extension()
        .and_then(|ext| ext.to_str())
        .map(ToString::to_string)
}

fn classify(extension: &str) -> Option<FileType> {
    if IMAGE_EXTENSIONS.contains(&extension) {
        Some(FileType::Image)
    } else if DOCUMENT_EXTENSIONS.contains(&extension) {
        Some(FileType::Document)
    } else {
        None
    }
}
