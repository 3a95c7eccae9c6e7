//! Timestamp resolution
//!
//! Containers carry up to two timestamp sources of different shapes. The
//! resolvers are tried in a fixed order, each yielding `Option`, with a
//! guaranteed now-in-UTC fallback at the end; this function cannot fail.

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::warn;

use crate::config::ParserConfig;
use crate::container::{ContainerTime, MessageContainer};

/// Display format for the human-readable date, e.g. `"Jun 15, 2024 10:00 BST"`.
const DISPLAY_FORMAT: &str = "%b %d, %Y %H:%M %Z";

/// Resolve the authoritative timestamp and its display string.
///
/// Preference order: the delivery time (what a recipient sees in their
/// client), then the submit-time tuple. Naive values are assumed to be in
/// the deployment's local timezone; zoned values are used as-is. The
/// stored value is UTC, the display string is rendered in the configured
/// display timezone with its civil-time abbreviation.
pub(crate) fn resolve_date(
    container: &dyn MessageContainer,
    config: &ParserConfig,
) -> (DateTime<Utc>, String) {
    best_available(container, config.local_timezone).map_or_else(
        || {
            warn!("no usable date source in container, falling back to current time");
            let now = Utc::now();
            (now, display_string(now, config.display_timezone))
        },
        |resolved| (resolved, display_string(resolved, config.display_timezone)),
    )
}

/// First resolvable timestamp source, localized and converted to UTC.
fn best_available(container: &dyn MessageContainer, local_timezone: Tz) -> Option<DateTime<Utc>> {
    let found = container.received_time().or_else(|| {
        container
            .sent_time_parts()
            .and_then(|parts| parts.to_naive())
            .map(ContainerTime::Naive)
    })?;

    match found {
        ContainerTime::Zoned(zoned) => Some(zoned.with_timezone(&Utc)),
        ContainerTime::Naive(naive) => local_timezone
            .from_local_datetime(&naive)
            .earliest()
            .map(|localized| localized.with_timezone(&Utc)),
    }
}

/// Render a stored timestamp in the display timezone.
fn display_string(instant: DateTime<Utc>, display_timezone: Tz) -> String {
    instant
        .with_timezone(&display_timezone)
        .format(DISPLAY_FORMAT)
        .to_string()
}
