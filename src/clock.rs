//! Wall-clock time rendered in a named timezone.

use time::macros::format_description;
use time::OffsetDateTime;
use time_tz::{Offset, OffsetDateTimeExt, TimeZone, Tz};

/// Current time in `tz`, e.g. `2026-10-16 14:03:59 CEST`.
pub fn now_in(tz: &Tz) -> String {
    format_in(OffsetDateTime::now_utc(), tz)
}

/// Render `instant` in `tz` with the zone's abbreviation.
pub fn format_in(instant: OffsetDateTime, tz: &Tz) -> String {
    let local = instant.to_timezone(tz);
    let abbreviation = tz.get_offset_utc(&instant).name().to_string();
    let stamp = local
        .format(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        ))
        .unwrap_or_else(|_| local.to_string());

    format!("{stamp} {abbreviation}")
}
