//! This modules defines the common functionality for paging data.

use crate::Error;

/// The largest page size returned. Larger requests are cut down to this.
pub const MAX_PAGE_SIZE: u64 = 100;

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The maximum transactions to return per page when not specified in a request.
    pub default_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
        }
    }
}

/// A validated, 1-based page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: u64,
    size: u64,
}

impl Page {
    /// Create a page from an optional page number and page size, filling in
    /// the defaults from `config`.
    ///
    /// A page size larger than [MAX_PAGE_SIZE] is clamped to it.
    ///
    /// # Errors
    /// Returns [Error::InvalidPagination] if the page number or page size is zero.
    pub fn new(
        number: Option<u64>,
        size: Option<u64>,
        config: &PaginationConfig,
    ) -> Result<Self, Error> {
        let number = number.unwrap_or(config.default_page);
        let size = size.unwrap_or(config.default_page_size).min(MAX_PAGE_SIZE);

        if number == 0 {
            return Err(Error::InvalidPagination(
                "page numbers start at 1".to_owned(),
            ));
        }

        if size == 0 {
            return Err(Error::InvalidPagination(
                "perPage must be at least 1".to_owned(),
            ));
        }

        Ok(Self { number, size })
    }

    /// The maximum number of items on the page.
    pub fn limit(&self) -> u64 {
        self.size
    }

    /// The number of items that come before this page.
    pub fn offset(&self) -> u64 {
        (self.number - 1).saturating_mul(self.size)
    }
}
