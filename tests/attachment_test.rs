use chrono::NaiveDate;
use enquiry_mail::{
    BodyMode, EmailParser, FileType, ImageLimits, ParserConfig, RawAttachment, StaticContainer,
    StaticOpener, TracingFileLog, extract_attachments, resize_if_needed,
};
use image::GenericImageView;
use std::fs;
use std::io::Cursor;
use std::path::Path;

fn config_under(root: &Path) -> ParserConfig {
    ParserConfig::new("enquiries@example.gov.uk", root, "/media/")
}

fn bucket_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn attachment(name: &str, data: Vec<u8>) -> RawAttachment {
    RawAttachment {
        long_filename: Some(name.into()),
        short_filename: None,
        data,
    }
}

/// An uncompressed image comfortably over the 2 MB threshold.
fn oversized_bmp() -> Vec<u8> {
    let pixels = image::RgbImage::from_fn(3000, 2000, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(pixels)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Bmp)
        .unwrap();
    bytes
}

// --- Classification and storage layout ---

#[test]
fn test_document_written_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_under(dir.path());
    let data = b"%PDF-1.4 fake report".to_vec();

    let extraction = extract_attachments(
        &[attachment("report.pdf", data.clone())],
        &config,
        &TracingFileLog,
        bucket_date(),
    );

    assert_eq!(extraction.saved.len(), 1);
    let record = &extraction.saved[0];
    assert_eq!(record.file_type, FileType::Document);
    assert_eq!(record.original_filename, "report.pdf");
    assert!(record.saved_filename.ends_with(".pdf"));
    assert_eq!(
        record.file_path,
        format!("enquiry_attachments/documents/2024/06/15/{}", record.saved_filename)
    );
    assert_eq!(record.file_url, format!("/media/{}", record.file_path));
    assert_eq!(record.upload_type, "extracted");
    assert_eq!(record.file_size, data.len() as u64);
    assert!(record.was_resized.is_none());
    assert!(record.original_size.is_none());

    let written = fs::read(dir.path().join(&record.file_path)).unwrap();
    assert_eq!(written, data);
}

#[test]
fn test_duplicate_filenames_get_distinct_saved_names() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_under(dir.path());

    let extraction = extract_attachments(
        &[
            attachment("photo.png", vec![1, 2, 3, 4]),
            attachment("photo.png", vec![5, 6, 7, 8]),
        ],
        &config,
        &TracingFileLog,
        bucket_date(),
    );

    assert_eq!(extraction.saved.len(), 2);
    assert_ne!(
        extraction.saved[0].saved_filename,
        extraction.saved[1].saved_filename
    );
    for record in &extraction.saved {
        assert!(dir.path().join(&record.file_path).exists());
        assert!(record.file_path.starts_with("enquiry_photos/2024/06/15/"));
    }
}

#[test]
fn test_unsupported_and_empty_attachments_skipped_silently() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_under(dir.path());

    let extraction = extract_attachments(
        &[
            attachment("notes.txt", vec![1, 2, 3]),
            attachment("archive.zip", vec![4, 5, 6]),
            attachment("empty.png", Vec::new()),
            attachment("no_extension", vec![7, 8, 9]),
        ],
        &config,
        &TracingFileLog,
        bucket_date(),
    );

    assert!(extraction.saved.is_empty());
    assert!(extraction.skipped.is_empty());
}

#[test]
fn test_short_filename_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_under(dir.path());

    let extraction = extract_attachments(
        &[RawAttachment {
            long_filename: None,
            short_filename: Some("IMAG01~1.JPG".into()),
            data: vec![1, 2, 3],
        }],
        &config,
        &TracingFileLog,
        bucket_date(),
    );

    assert_eq!(extraction.saved.len(), 1);
    assert_eq!(extraction.saved[0].original_filename, "IMAG01~1.JPG");
    assert!(extraction.saved[0].saved_filename.ends_with(".jpg"));
}

// --- Image resizing ---

#[test]
fn test_small_image_stored_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_under(dir.path());
    let data = vec![9u8; 64];

    let extraction = extract_attachments(
        &[attachment("small.png", data.clone())],
        &config,
        &TracingFileLog,
        bucket_date(),
    );

    let record = &extraction.saved[0];
    assert_eq!(record.was_resized, Some(false));
    assert_eq!(record.original_size, Some(data.len() as u64));
    assert!(record.saved_filename.ends_with(".png"));

    let written = fs::read(dir.path().join(&record.file_path)).unwrap();
    assert_eq!(written, data);
}

#[test]
fn test_oversized_image_resized_and_reencoded() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_under(dir.path());
    config.image = ImageLimits {
        max_size_mb: 2,
        max_dimension: 1920,
        quality: 85,
    };

    let bmp = oversized_bmp();
    let original_len = bmp.len() as u64;

    let extraction = extract_attachments(
        &[attachment("site-photo.bmp", bmp)],
        &config,
        &TracingFileLog,
        bucket_date(),
    );

    assert_eq!(extraction.saved.len(), 1);
    let record = &extraction.saved[0];
    assert_eq!(record.was_resized, Some(true));
    assert_eq!(record.original_size, Some(original_len));
    // The re-encode changed format, so the saved name must say jpg.
    assert!(record.saved_filename.ends_with(".jpg"));

    let path = dir.path().join(&record.file_path);
    assert_eq!(record.file_size, fs::metadata(&path).unwrap().len());

    let reloaded = image::load_from_memory(&fs::read(&path).unwrap()).unwrap();
    let (width, height) = reloaded.dimensions();
    assert_eq!(width, 1920);
    assert!(height <= 1920);
}

#[test]
fn test_corrupt_oversized_image_kept_as_original() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_under(dir.path());
    let data = vec![0u8; 3 * 1024 * 1024];

    let extraction = extract_attachments(
        &[attachment("broken.jpg", data.clone())],
        &config,
        &TracingFileLog,
        bucket_date(),
    );

    let record = &extraction.saved[0];
    assert_eq!(record.was_resized, Some(false));
    assert_eq!(record.file_size, data.len() as u64);
}

#[test]
fn test_resize_if_needed_under_threshold_is_identity() {
    let data = vec![1u8, 2, 3, 4];
    let result = resize_if_needed(data.clone(), &ImageLimits::default());

    assert!(!result.was_resized);
    assert_eq!(result.data, data);
    assert_eq!(result.size(), 4);
}

// --- Failure isolation ---

#[test]
fn test_write_failures_collected_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let blocking_file = dir.path().join("not-a-directory");
    fs::write(&blocking_file, b"occupied").unwrap();

    let config = config_under(&blocking_file);
    let extraction = extract_attachments(
        &[
            attachment("one.png", vec![1, 2, 3]),
            attachment("two.pdf", vec![4, 5, 6]),
        ],
        &config,
        &TracingFileLog,
        bucket_date(),
    );

    assert!(extraction.saved.is_empty());
    assert_eq!(extraction.skipped.len(), 2);
    assert_eq!(extraction.skipped[0].filename, "one.png");
}

#[test]
fn test_parse_with_attachments_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let container = StaticContainer {
        sender: Some("Jane Doe <jane@example.com>".into()),
        plain_body: Some("Photo attached.".into()),
        attachments: vec![
            attachment("evidence.png", vec![1, 2, 3]),
            attachment("notes.txt", vec![4, 5, 6]),
        ],
        ..StaticContainer::default()
    };

    let parser = EmailParser::new(
        Box::new(StaticOpener::new(container)),
        config_under(dir.path()),
    );
    let email = parser
        .parse(Path::new("message.msg"), BodyMode::Snippet, false)
        .unwrap();

    assert!(email.has_attachments);
    assert_eq!(email.image_attachments.len(), 1);
    assert_eq!(
        email.image_attachments[0].original_filename,
        "evidence.png"
    );
    assert!(
        dir.path()
            .join(&email.image_attachments[0].file_path)
            .exists()
    );
}
