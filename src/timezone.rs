use time::{PrimitiveDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

/// Get the UTC offset that `canonical_timezone` observes at the wall-clock time `local`.
///
/// The offset is looked up as if `local` were a UTC instant, which can be off by
/// the DST shift within a few hours of a transition.
pub fn get_local_offset_at(canonical_timezone: &str, local: PrimitiveDateTime) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&local.assume_utc()).to_utc())
}
