//! Settings that control how monthly reports and seeding behave.

use crate::seed::DEFAULT_SEED_URL;

/// The year month names are resolved against when a query does not give one.
pub const DEFAULT_REFERENCE_YEAR: i32 = 2023;

/// The timezone month boundaries are computed in when none is configured.
pub const DEFAULT_TIMEZONE: &str = "Etc/UTC";

/// The config for the monthly reports and the seed source.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// The year to use for queries that only give a month.
    pub reference_year: i32,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// A month starts at local midnight on its first day.
    pub local_timezone: String,
    /// Where `POST /api/initialize` downloads the seed transactions from.
    pub seed_url: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            reference_year: DEFAULT_REFERENCE_YEAR,
            local_timezone: DEFAULT_TIMEZONE.to_owned(),
            seed_url: DEFAULT_SEED_URL.to_owned(),
        }
    }
}
