//! Sender and recipient resolution

use crate::container::MessageContainer;
use crate::types::UNKNOWN_SENDER;

/// Build the canonical sender display form and keep the raw field for audit.
///
/// An explicit (name, email) pair on the container wins; otherwise the raw
/// field is parsed to recover what it can. Returns
/// `(email_from, raw_from)` and never fails.
pub(crate) fn resolve_sender(container: &dyn MessageContainer) -> (String, String) {
    let raw_from = container.sender().unwrap_or("").to_string();

    let mut name = container
        .sender_name()
        .filter(|s| !s.is_empty())
        .map(ToString::to_string);
    let mut email = container
        .sender_email()
        .filter(|s| !s.is_empty())
        .map(ToString::to_string);

    if email.is_none()
        && !raw_from.is_empty()
        && let Some((parsed_name, parsed_addr)) = parse_address(&raw_from)
    {
        email = Some(parsed_addr);
        if name.is_none() {
            name = parsed_name;
        }
    }

    let email_from = match (name, email) {
        (Some(name), Some(email)) => format!("{name} <{email}>"),
        (None, Some(email)) => email,
        _ if !raw_from.is_empty() => raw_from.clone(),
        _ => UNKNOWN_SENDER.to_string(),
    };

    (email_from, raw_from)
}

/// Canonicalise a semicolon-separated recipient field.
///
/// Each entry is re-parsed into name and address; entries that cannot be
/// parsed are carried through unchanged rather than dropped.
#[must_use]
pub fn format_recipient_list(recipients: &str) -> String {
    if recipients.is_empty() {
        return String::new();
    }

    let mut formatted = Vec::new();
    for entry in recipients.split(';') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }

        match parse_address(entry) {
            Some((Some(name), addr)) => formatted.push(format!("{name} <{addr}>")),
            Some((None, addr)) => formatted.push(addr),
            None => formatted.push(entry.to_string()),
        }
    }

    formatted.join("; ")
}

/// Pull the bare address out of a display form like `"Name <a@b.com>"`.
#[must_use]
pub(crate) fn bare_address(field: &str) -> Option<String> {
    parse_address(field).map(|(_, addr)| addr)
}

/// Split one address entry into optional display name and address.
fn parse_address(entry: &str) -> Option<(Option<String>, String)> {
    let parsed = mailparse::addrparse(entry).ok()?;
    parsed.iter().find_map(|addr| match addr {
        mailparse::MailAddr::Single(single) => Some((
            single.display_name.clone().filter(|n| !n.is_empty()),
            single.addr.clone(),
        )),
        mailparse::MailAddr::Group(_) => None,
    })
}
