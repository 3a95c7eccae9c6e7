use chrono::Utc;
use enquiry_mail::*;
use std::path::Path;

fn sample_email() -> ParsedEmail {
    ParsedEmail {
        raw_from: "Jane Doe <jane@example.com>".into(),
        email_from: "Jane Doe <jane@example.com>".into(),
        email_to: "enquiries@example.gov.uk".into(),
        email_cc: String::new(),
        subject: "Pothole".into(),
        email_date: Utc::now(),
        email_date_str: "Jun 15, 2024 10:00 BST".into(),
        body_content: "Hello".into(),
        direction: Direction::Incoming,
        has_attachments: false,
        is_html: false,
        image_attachments: Vec::new(),
    }
}

// --- Direction ---

#[test]
fn test_direction_display() {
    assert_eq!(Direction::Incoming.to_string(), "INCOMING");
    assert_eq!(Direction::Outgoing.to_string(), "OUTGOING");
}

#[test]
fn test_direction_serializes_upper_case() {
    assert_eq!(
        serde_json::to_value(Direction::Incoming).unwrap(),
        serde_json::json!("INCOMING")
    );
    assert_eq!(
        serde_json::to_value(Direction::Outgoing).unwrap(),
        serde_json::json!("OUTGOING")
    );
}

// --- BodyMode ---

#[test]
fn test_body_mode_from_str() {
    assert_eq!("snippet".parse::<BodyMode>().unwrap(), BodyMode::Snippet);
    assert_eq!("plain".parse::<BodyMode>().unwrap(), BodyMode::Plain);
    assert_eq!("full".parse::<BodyMode>().unwrap(), BodyMode::Full);
    assert!("conversation".parse::<BodyMode>().is_err());
}

#[test]
fn test_body_mode_default_is_snippet() {
    assert_eq!(BodyMode::default(), BodyMode::Snippet);
}

#[test]
fn test_body_mode_display() {
    assert_eq!(BodyMode::Full.to_string(), "full");
}

// --- ParsedEmail ---

#[test]
fn test_sender_address_from_email_from() {
    let email = sample_email();
    assert_eq!(email.sender_address().as_deref(), Some("jane@example.com"));
}

#[test]
fn test_sender_address_falls_back_to_raw() {
    let email = ParsedEmail {
        email_from: String::new(),
        raw_from: "bob@example.org".into(),
        ..sample_email()
    };
    assert_eq!(email.sender_address().as_deref(), Some("bob@example.org"));
}

#[test]
fn test_sender_address_none_when_empty() {
    let email = ParsedEmail {
        email_from: String::new(),
        raw_from: String::new(),
        ..sample_email()
    };
    assert!(email.sender_address().is_none());
}

// --- AttachmentRecord ---

#[test]
fn test_attachment_record_serialization_skips_image_fields() {
    let record = AttachmentRecord {
        original_filename: "report.pdf".into(),
        saved_filename: "abc.pdf".into(),
        file_path: "enquiry_attachments/documents/2024/06/15/abc.pdf".into(),
        file_size: 10,
        file_url: "/media/enquiry_attachments/documents/2024/06/15/abc.pdf".into(),
        file_type: FileType::Document,
        upload_type: "extracted".into(),
        was_resized: None,
        original_size: None,
    };

    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["file_type"], "document");
    assert_eq!(value["upload_type"], "extracted");
    assert!(value.get("was_resized").is_none());
    assert!(value.get("original_size").is_none());
}

#[test]
fn test_attachment_record_serialization_keeps_image_fields() {
    let record = AttachmentRecord {
        original_filename: "photo.png".into(),
        saved_filename: "abc.jpg".into(),
        file_path: "enquiry_photos/2024/06/15/abc.jpg".into(),
        file_size: 100,
        file_url: "/media/enquiry_photos/2024/06/15/abc.jpg".into(),
        file_type: FileType::Image,
        upload_type: "extracted".into(),
        was_resized: Some(true),
        original_size: Some(4000),
    };

    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["file_type"], "image");
    assert_eq!(value["was_resized"], true);
    assert_eq!(value["original_size"], 4000);
}

// --- Recipient formatting ---

#[test]
fn test_format_recipient_list_round_trip() {
    assert_eq!(
        format_recipient_list("Name1 <email1@a.com>; email2@b.com"),
        "Name1 <email1@a.com>; email2@b.com"
    );
}

#[test]
fn test_format_recipient_list_skips_empty_entries() {
    assert_eq!(
        format_recipient_list("a@a.com; ; b@b.com;"),
        "a@a.com; b@b.com"
    );
}

#[test]
fn test_format_recipient_list_empty() {
    assert_eq!(format_recipient_list(""), "");
}

// --- Config ---

#[test]
fn test_image_limits_defaults() {
    let limits = ImageLimits::default();
    assert_eq!(limits.max_size_mb, 2);
    assert_eq!(limits.max_dimension, 2048);
    assert_eq!(limits.quality, 85);
    assert_eq!(limits.max_size_bytes(), 2 * 1024 * 1024);
}

#[test]
fn test_parser_config_deserializes_with_defaults() {
    let config: ParserConfig = serde_json::from_value(serde_json::json!({
        "inbox_address": "enquiries@example.gov.uk",
        "media_root": "/var/media",
        "media_url": "/media/"
    }))
    .unwrap();

    assert_eq!(config.inbox_address, "enquiries@example.gov.uk");
    assert_eq!(config.local_timezone, chrono_tz::Tz::Europe__London);
    assert_eq!(config.display_timezone, chrono_tz::Tz::Europe__London);
    assert_eq!(config.image.max_dimension, 2048);
}

// --- Container types ---

#[test]
fn test_sent_time_to_naive() {
    let parts = SentTime {
        year: 2024,
        month: 6,
        day: 15,
        hour: 10,
        minute: 30,
        second: 0,
    };
    assert!(parts.to_naive().is_some());
}

#[test]
fn test_sent_time_invalid_parts() {
    let parts = SentTime {
        year: 2024,
        month: 13,
        day: 1,
        hour: 0,
        minute: 0,
        second: 0,
    };
    assert!(parts.to_naive().is_none());
}

// --- Upload validation ---

#[test]
fn test_validate_container_path_accepts_msg() {
    assert!(validate_container_path(Path::new("mail/message.MSG")).is_ok());
}

#[test]
fn test_validate_container_path_rejects_eml_as_unimplemented() {
    assert!(matches!(
        validate_container_path(Path::new("message.eml")),
        Err(ParseError::EmlNotImplemented)
    ));
}

#[test]
fn test_validate_container_path_rejects_other_types() {
    assert!(matches!(
        validate_container_path(Path::new("message.pdf")),
        Err(ParseError::UnsupportedExtension(_))
    ));
    assert!(matches!(
        validate_container_path(Path::new("message")),
        Err(ParseError::UnsupportedExtension(_))
    ));
}

// --- Member lookup ---

struct FixedDirectory(Vec<MemberRef>);

impl MemberDirectory for FixedDirectory {
    fn active_members_by_email(&self, email: &str) -> Vec<MemberRef> {
        self.0
            .iter()
            .filter(|member| member.email.eq_ignore_ascii_case(email))
            .cloned()
            .collect()
    }
}

#[test]
fn test_resolve_member_case_insensitive() {
    let directory = FixedDirectory(vec![MemberRef {
        id: 7,
        name: "Jane Doe".into(),
        email: "JANE@example.com".into(),
    }]);

    let member = resolve_member(&sample_email(), &directory).unwrap();
    assert_eq!(member.id, 7);
}

#[test]
fn test_resolve_member_no_match() {
    let directory = FixedDirectory(Vec::new());
    let err = resolve_member(&sample_email(), &directory).unwrap_err();
    assert!(matches!(err, MemberLookupError::NoMatch(_)));
}

#[test]
fn test_resolve_member_no_sender_address() {
    let email = ParsedEmail {
        email_from: String::new(),
        raw_from: String::new(),
        ..sample_email()
    };
    let directory = FixedDirectory(Vec::new());
    assert!(matches!(
        resolve_member(&email, &directory),
        Err(MemberLookupError::NoSenderAddress)
    ));
}

#[test]
fn test_resolve_member_ambiguity_takes_first() {
    let directory = FixedDirectory(vec![
        MemberRef {
            id: 1,
            name: "Jane Doe".into(),
            email: "jane@example.com".into(),
        },
        MemberRef {
            id: 2,
            name: "Jane Other".into(),
            email: "jane@example.com".into(),
        },
    ]);

    let member = resolve_member(&sample_email(), &directory).unwrap();
    assert_eq!(member.id, 1);
}
