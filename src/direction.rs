//! Traffic direction classification

use tracing::debug;

use crate::container::MessageContainer;
use crate::sanitize::{EXTERNAL_WARNING_BANNER, FIRST_CONTACT_BANNER};
use crate::sender::format_recipient_list;
use crate::types::Direction;

/// How far into the body banners are searched for.
const BANNER_SCAN_CHARS: usize = 400;

/// Label a message as addressed to or sent from the monitored inbox.
///
/// Address fields are checked first, in to/cc/bcc order; the body is only
/// scanned for gateway banners when none of them match, since banners are a
/// heuristic signal (forwarded mail can carry them) while an address match
/// is definitive. Defaults to outgoing.
pub(crate) fn classify(
    container: &dyn MessageContainer,
    plain_body: &str,
    inbox_address: &str,
) -> Direction {
    let inbox = inbox_address.trim().to_lowercase();

    if field_contains(container.to(), &inbox)
        || field_contains(container.cc(), &inbox)
        || field_contains(container.bcc(), &inbox)
    {
        return Direction::Incoming;
    }

    if has_external_banner(plain_body) {
        debug!("no address match; classified incoming from gateway banner");
        return Direction::Incoming;
    }

    Direction::Outgoing
}

/// Case-insensitive substring match of the inbox address in a recipient
/// field, after canonicalising the field.
fn field_contains(field: Option<&str>, inbox: &str) -> bool {
    if inbox.is_empty() {
        return false;
    }
    let Some(value) = field else {
        return false;
    };
    if value.is_empty() {
        return false;
    }

    format_recipient_list(value).to_lowercase().contains(inbox)
}

/// Whether the head of the body carries a known external-mail banner.
fn has_external_banner(plain_body: &str) -> bool {
    if plain_body.is_empty() {
        return false;
    }

    let head: String = plain_body.chars().take(BANNER_SCAN_CHARS).collect();
    head.contains(EXTERNAL_WARNING_BANNER) || FIRST_CONTACT_BANNER.is_match(&head)
}
