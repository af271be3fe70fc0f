//! Month selection for the monthly reports.
//!
//! Clients pick a month either by English name ("March") or by number (3),
//! with an optional year. A month covers the half-open range from local
//! midnight on its first day up to, but not including, local midnight on the
//! first day of the next month.

use std::ops::Range;

use serde::Deserialize;
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime};

use crate::{Error, timezone::get_local_offset_at};

/// English month names in calendar order.
const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// The query parameters shared by the monthly report endpoints.
#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    /// An English month name (case-sensitive) or a month number from 1 to 12.
    pub month: String,
    /// The year of the month. Defaults to the configured reference year.
    pub year: Option<i32>,
}

/// A calendar month in a specific year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthSelection {
    year: i32,
    month: Month,
}

impl MonthSelection {
    /// Build a selection from a query, using `reference_year` when the query
    /// has no year.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonth] if the month is not a case-sensitive
    /// English month name or a number from 1 to 12.
    pub fn from_query(query: &MonthQuery, reference_year: i32) -> Result<Self, Error> {
        Ok(Self {
            year: query.year.unwrap_or(reference_year),
            month: parse_month(&query.month)?,
        })
    }

    /// The instants covered by this month in `canonical_timezone`, as a
    /// half-open range.
    ///
    /// # Errors
    /// Returns a:
    /// - [Error::InvalidYear] if the month or the month after it falls outside
    ///   the supported calendar,
    /// - or [Error::InvalidTimezone] if `canonical_timezone` is not a known timezone.
    pub fn instant_range(&self, canonical_timezone: &str) -> Result<Range<OffsetDateTime>, Error> {
        let first_day = Date::from_calendar_date(self.year, self.month, 1)
            .map_err(|_| Error::InvalidYear(self.year))?;

        let next_month_year = if self.month == Month::December {
            self.year.checked_add(1).ok_or(Error::InvalidYear(self.year))?
        } else {
            self.year
        };
        let next_first_day = Date::from_calendar_date(next_month_year, self.month.next(), 1)
            .map_err(|_| Error::InvalidYear(self.year))?;

        let start = local_midnight(first_day, canonical_timezone)?;
        let end = local_midnight(next_first_day, canonical_timezone)?;

        Ok(start..end)
    }
}

/// Parse a case-sensitive English month name or a month number from 1 to 12.
fn parse_month(text: &str) -> Result<Month, Error> {
    if let Some(index) = MONTH_NAMES.iter().position(|name| *name == text) {
        // Index is in 0..12, so this cannot fail.
        return Month::try_from(index as u8 + 1).map_err(|_| Error::InvalidMonth(text.to_owned()));
    }

    text.parse::<u8>()
        .ok()
        .and_then(|number| Month::try_from(number).ok())
        .ok_or_else(|| Error::InvalidMonth(text.to_owned()))
}

fn local_midnight(date: Date, canonical_timezone: &str) -> Result<OffsetDateTime, Error> {
    let midnight: PrimitiveDateTime = date.midnight();

    let offset = get_local_offset_at(canonical_timezone, midnight).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", canonical_timezone);
        Error::InvalidTimezone(canonical_timezone.to_owned())
    })?;

    Ok(midnight.assume_offset(offset))
}

#[cfg(test)]
mod tests {
    use time::{Month, macros::datetime};

    use crate::Error;

    use super::{MonthQuery, MonthSelection, parse_month};

    fn query(month: &str, year: Option<i32>) -> MonthQuery {
        MonthQuery {
            month: month.to_owned(),
            year,
        }
    }

    #[test]
    fn parses_month_names() {
        assert_eq!(parse_month("January"), Ok(Month::January));
        assert_eq!(parse_month("March"), Ok(Month::March));
        assert_eq!(parse_month("December"), Ok(Month::December));
    }

    #[test]
    fn parses_month_numbers() {
        assert_eq!(parse_month("1"), Ok(Month::January));
        assert_eq!(parse_month("12"), Ok(Month::December));
    }

    #[test]
    fn rejects_unrecognized_months() {
        for text in ["march", "MARCH", "Marchh", "Mar", "0", "13", "-1", ""] {
            assert_eq!(
                parse_month(text),
                Err(Error::InvalidMonth(text.to_owned())),
                "want {text:?} to be rejected"
            );
        }
    }

    #[test]
    fn uses_reference_year_by_default() {
        let selection = MonthSelection::from_query(&query("March", None), 2023).unwrap();

        let range = selection.instant_range("Etc/UTC").unwrap();

        assert_eq!(range.start, datetime!(2023-03-01 00:00 UTC));
        assert_eq!(range.end, datetime!(2023-04-01 00:00 UTC));
    }

    #[test]
    fn explicit_year_overrides_reference_year() {
        let selection = MonthSelection::from_query(&query("2", Some(2024)), 2023).unwrap();

        let range = selection.instant_range("Etc/UTC").unwrap();

        assert_eq!(range.start, datetime!(2024-02-01 00:00 UTC));
        assert_eq!(range.end, datetime!(2024-03-01 00:00 UTC));
    }

    #[test]
    fn december_rolls_over_to_next_year() {
        let selection = MonthSelection::from_query(&query("December", None), 2023).unwrap();

        let range = selection.instant_range("Etc/UTC").unwrap();

        assert_eq!(range.end, datetime!(2024-01-01 00:00 UTC));
    }

    #[test]
    fn range_is_half_open() {
        let march = MonthSelection::from_query(&query("March", None), 2023)
            .unwrap()
            .instant_range("Etc/UTC")
            .unwrap();
        let april = MonthSelection::from_query(&query("April", None), 2023)
            .unwrap()
            .instant_range("Etc/UTC")
            .unwrap();

        let first_instant_of_april = datetime!(2023-04-01 00:00 UTC);

        assert!(!march.contains(&first_instant_of_april));
        assert!(april.contains(&first_instant_of_april));
    }

    #[test]
    fn month_starts_at_local_midnight() {
        let selection = MonthSelection::from_query(&query("July", None), 2023).unwrap();

        let range = selection.instant_range("Pacific/Auckland").unwrap();

        // NZST is UTC+12.
        assert_eq!(range.start, datetime!(2023-06-30 12:00 UTC));
    }

    #[test]
    fn rejects_unknown_timezone() {
        let selection = MonthSelection::from_query(&query("July", None), 2023).unwrap();

        let result = selection.instant_range("Not/AZone");

        assert_eq!(result, Err(Error::InvalidTimezone("Not/AZone".to_owned())));
    }

    #[test]
    fn rejects_year_outside_calendar() {
        let selection = MonthSelection::from_query(&query("July", Some(i32::MAX)), 2023).unwrap();

        assert_eq!(
            selection.instant_range("Etc/UTC"),
            Err(Error::InvalidYear(i32::MAX))
        );
    }
}
