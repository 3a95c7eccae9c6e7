//! Removal of injected banners and auto-link artifacts
//!
//! Mail infrastructure stamps externally-originated messages with warning
//! banners, and clients wrap bare URLs in angle brackets when auto-linking.
//! Both are noise by the time a message reaches the enquiry system, but the
//! banners double as a direction signal, so the exact texts live here.

use regex::Regex;
use std::sync::LazyLock;

/// Complete external-mail warning banner, as injected by the mail gateway.
pub(crate) const EXTERNAL_WARNING_BANNER: &str = "WARNING: This email came from outside of the \
     organisation. Do not provide login or password details. Always be cautious opening links \
     and attachments wherever the email appears to come from. If you have any doubts about \
     this email, contact ICT.";

/// First sentence of the warning banner; enough to identify a banner line.
pub(crate) const WARNING_SENTENCE: &str = "WARNING: This email came from outside of the organisation.";

/// Opening fragment of the first-contact hint banner.
pub(crate) const FIRST_CONTACT_START: &str = "You don't often get email from";

/// Closing fragment of the first-contact hint banner.
pub(crate) const FIRST_CONTACT_END: &str = "Learn why this is important";

/// First-contact banner with the sender address in the middle, matched
/// against the head of the body for direction classification.
pub(crate) static FIRST_CONTACT_BANNER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)You don't often get email from [\s\S]+?\. Learn why this is important\.")
        .expect("first-contact banner pattern")
});

static LINE_ENDINGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n|\r").expect("line ending pattern"));

static WHITESPACE_ONLY_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]+\n").expect("whitespace line pattern"));

static BLANK_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("blank run pattern"));

static ANGLE_BRACKET_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<https?://[^>]+>").expect("angle link pattern"));

/// Drop known banner lines, passing every other line through unchanged.
#[must_use]
pub fn remove_banners(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let warning = WARNING_SENTENCE.to_lowercase();
    let hint_start = FIRST_CONTACT_START.to_lowercase();
    let hint_end = FIRST_CONTACT_END.to_lowercase();

    let normalized = normalize_newlines(text);
    let mut lines: Vec<&str> = normalized.split('\n').collect();
    // A trailing newline is not an extra empty line.
    if lines.last() == Some(&"") {
        lines.pop();
    }

    lines
        .into_iter()
        .filter(|line| {
            let lower = line.to_lowercase();
            if lower.contains(&warning) {
                return false;
            }
            !(lower.contains(&hint_start) && lower.contains(&hint_end))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strip `<http://…>` and `<https://…>` auto-link artifacts.
///
/// Bracketed email addresses are left alone.
#[must_use]
pub fn remove_angle_bracket_links(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    ANGLE_BRACKET_LINK.replace_all(text, "").into_owned()
}

/// Normalise every line-ending variant to a single `\n`.
pub(crate) fn normalize_newlines(text: &str) -> String {
    LINE_ENDINGS.replace_all(text, "\n").into_owned()
}

/// Newline normalisation plus collapse of whitespace-only lines.
pub(crate) fn normalize_plain_text(text: &str) -> String {
    let text = normalize_newlines(text);
    WHITESPACE_ONLY_LINE.replace_all(&text, "\n").into_owned()
}

/// Collapse runs of three or more newlines to a paragraph break.
pub(crate) fn collapse_blank_runs(text: &str) -> String {
    BLANK_RUNS.replace_all(text, "\n\n").into_owned()
}
