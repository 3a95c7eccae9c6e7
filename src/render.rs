//! Body rendering in the three presentation modes

use regex::Regex;
use std::sync::LazyLock;

use crate::layout;
use crate::sanitize;

/// Bodies longer than this many characters are truncated in snippet mode.
const SNIPPET_LIMIT: usize = 250;

/// Characters kept before the ellipsis when a snippet is truncated.
const SNIPPET_KEEP: usize = 247;

/// Header lines that open an embedded reply inside a flattened thread.
static REPLY_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(&gt;\s*)*(From|Sent|To|Subject|Date|Original Message|Forwarded message):")
        .expect("reply header pattern")
});

/// A line that is nothing but a dash or underscore rule.
static RULE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(-{5,}|_{5,})\s*$").expect("rule line pattern"));

/// Truncated plain-text preview: banner-stripped, normalised, capped.
pub(crate) fn render_snippet(plain_body: &str) -> String {
    let cleaned = sanitize::remove_banners(plain_body);
    let text = sanitize::normalize_plain_text(&cleaned);
    let text = sanitize::collapse_blank_runs(&text);

    let content = if text.chars().count() > SNIPPET_LIMIT {
        let mut truncated: String = text.chars().take(SNIPPET_KEEP).collect();
        truncated.push_str("...");
        truncated
    } else {
        text
    };

    content.trim_start().to_string()
}

/// Full plain text with paragraph structure rebuilt.
pub(crate) fn render_plain(plain_body: &str) -> String {
    let cleaned = sanitize::remove_banners(plain_body);
    let text = sanitize::normalize_plain_text(&cleaned);

    let lines: Vec<&str> = text.split('\n').collect();
    let processed = layout::reconstruct(&lines);

    let joined = processed.join("\n");
    sanitize::collapse_blank_runs(joined.trim())
}

/// HTML rendering: native HTML when the container has it, otherwise the
/// plain body converted for display.
pub(crate) fn render_full(html_body: Option<&str>, plain_body: &str) -> String {
    html_body.map_or_else(
        || {
            let cleaned = sanitize::remove_banners(plain_body);
            let cleaned = sanitize::remove_angle_bracket_links(&cleaned);
            plain_text_to_html(&cleaned)
        },
        sanitize::remove_banners,
    )
}

/// Convert a plain-text body to display HTML: escape, rebuild paragraphs,
/// mark embedded replies with rules, and wrap quoted blocks.
fn plain_text_to_html(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let text = sanitize::normalize_plain_text(text);
    let lines: Vec<&str> = text.split('\n').collect();
    let processed = layout::reconstruct(&lines);

    let escaped: Vec<String> = processed.iter().map(|line| escape_html(line)).collect();
    let separated = insert_reply_separators(&escaped);
    let built = build_paragraphs(&separated);
    wrap_quoted_blocks(&built)
}

/// Escape text for embedding in HTML, quotes included.
pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Insert `<hr>` before reply headers and rule lines.
///
/// Only beyond the third line, and only on a fresh paragraph boundary, so
/// a message that opens with its own headers is not split.
fn insert_reply_separators(escaped_lines: &[String]) -> Vec<String> {
    let mut html_lines: Vec<String> = Vec::with_capacity(escaped_lines.len());
    for (index, line) in escaped_lines.iter().enumerate() {
        if index > 2
            && (REPLY_HEADER.is_match(line) || RULE_LINE.is_match(line))
            && html_lines.last().is_some_and(|last| last.trim().is_empty())
        {
            html_lines.push("<hr>".to_string());
        }
        html_lines.push(line.clone());
    }
    html_lines
}

/// Join lines into `<br>`-separated paragraphs split on break markers.
fn build_paragraphs(html_lines: &[String]) -> String {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in html_lines {
        if line.is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("<br>"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("<br>"));
    }

    paragraphs.join("<br><br>")
}

/// Wrap maximal runs of quoted lines in a quote container.
///
/// Operates on `<br>`-separated content: consecutive lines starting with
/// the escaped quote marker are stripped of one marker layer and wrapped;
/// any unquoted line ends the run.
fn wrap_quoted_blocks(html_text: &str) -> String {
    let mut output: Vec<String> = Vec::new();
    let mut quoted_run: Vec<String> = Vec::new();

    let flush = |run: &mut Vec<String>, out: &mut Vec<String>| {
        if !run.is_empty() {
            out.push(format!(
                "<div class=\"email-quote\">{}</div>",
                run.join("<br>")
            ));
            run.clear();
        }
    };

    for line in html_text.split("<br>") {
        if line.starts_with("&gt;") {
            quoted_run.push(strip_quote_marker(line).to_string());
        } else {
            flush(&mut quoted_run, &mut output);
            output.push(line.to_string());
        }
    }
    flush(&mut quoted_run, &mut output);

    output.join("<br>")
}

/// Remove one layer of escaped quote marker from a line.
fn strip_quote_marker(line: &str) -> &str {
    line.strip_prefix("&gt; ")
        .or_else(|| line.strip_prefix("&gt;"))
        .unwrap_or(line)
}
