//! Member lookup boundary
//!
//! The enquiry-tracking layer resolves parsed senders to members. The
//! store behind the lookup is not this crate's concern; the contract is:
//! match on email case-insensitively, active members only, and report
//! failures as values rather than crashing on messy input.

use tracing::warn;

use crate::error::MemberLookupError;
use crate::types::ParsedEmail;

/// A member as the lookup store describes one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRef {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Lookup capability provided by the enquiry-tracking layer.
pub trait MemberDirectory {
    /// All active members whose email equals `email`, compared
    /// case-insensitively.
    fn active_members_by_email(&self, email: &str) -> Vec<MemberRef>;
}

/// Resolve a parsed message's sender to an active member.
///
/// An unextractable sender address or a sender with no active member is a
/// reported error. Several active members sharing the address resolves to
/// the first, with a warning.
pub fn resolve_member(
    parsed: &ParsedEmail,
    directory: &dyn MemberDirectory,
) -> Result<MemberRef, MemberLookupError> {
    let address = parsed
        .sender_address()
        .ok_or(MemberLookupError::NoSenderAddress)?;

    let mut matches = directory.active_members_by_email(&address);
    match matches.len() {
        0 => Err(MemberLookupError::NoMatch(address)),
        1 => Ok(matches.remove(0)),
        _ => {
            warn!(%address, "multiple active members share address, using first");
            Ok(matches.remove(0))
        }
    }
}
