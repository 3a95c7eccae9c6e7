//! Paragraph reconstruction for flattened plain text
//!
//! Mailbox exports flatten paragraphs into single newlines, so the original
//! boundaries have to be guessed back from line shape. The thresholds and
//! word lists here are tuned against real enquiry mailboxes; treat them as
//! heuristics with known false positives, not a grammar.

use regex::Regex;
use std::sync::LazyLock;

/// Lines shorter than this count as "short" for break detection.
const SHORT_LINE_LIMIT: usize = 15;

/// A short line ending in one of these suggests a completed sentence.
const TERMINAL_PUNCTUATION: &[char] = &['.', '!', '?', ':', ';'];

/// Lines that are exactly a sign-off word always end a paragraph.
const CLOSING_LINES: [&str; 4] = ["thanks", "Thanks", "regards", "Regards"];

/// Words that mark a line as the start of a signature block.
const SIGNATURE_KEYWORDS: [&str; 3] = ["Team", "Department", "Officer"];

/// Two capitalised words and nothing else, the usual shape of a signed name.
static SIGNATURE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-z]+ [A-Z][a-z]+$").expect("signature name pattern"));

static REPLY_FROM_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^From:").expect("reply header pattern"));

/// Decide whether a paragraph break belongs between two adjacent lines.
pub(crate) fn needs_paragraph_break(line: &str, next_line: &str) -> bool {
    if CLOSING_LINES.contains(&line) {
        return true;
    }

    if line.chars().count() >= SHORT_LINE_LIMIT {
        return false;
    }

    if line.ends_with(TERMINAL_PUNCTUATION) {
        return true;
    }

    SIGNATURE_NAME.is_match(next_line)
        || SIGNATURE_KEYWORDS
            .iter()
            .any(|keyword| next_line.contains(keyword))
}

/// Whether a line opens an embedded reply (`From:` header).
pub(crate) fn is_reply_header_line(line: &str) -> bool {
    REPLY_FROM_HEADER.is_match(line)
}

/// Skip blank lines starting at `start`, returning the next content index.
fn next_content_index(lines: &[&str], start: usize) -> usize {
    let mut index = start;
    while index < lines.len() && lines[index].trim().is_empty() {
        index += 1;
    }
    index
}

/// Rebuild paragraph structure from a flat run of lines.
///
/// Returns trimmed content lines with empty-string markers where a
/// paragraph break was detected. Blank input lines are consumed; breaks
/// come only from the heuristics, plus a mandatory one before each
/// embedded reply header.
pub(crate) fn reconstruct(lines: &[&str]) -> Vec<String> {
    let mut processed = Vec::new();
    let mut index = 0;

    while index < lines.len() {
        let line = lines[index].trim();
        if line.is_empty() {
            index += 1;
            continue;
        }

        processed.push(line.to_string());

        let next = next_content_index(lines, index + 1);
        if next < lines.len() {
            let next_line = lines[next].trim();
            if needs_paragraph_break(line, next_line) {
                processed.push(String::new());
            }
            if is_reply_header_line(next_line) {
                processed.push(String::new());
            }
            index = next;
        } else {
            index = lines.len();
        }
    }

    processed
}
