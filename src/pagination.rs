//! This modules defines the common functionality for paging data.

use crate::Error;

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

/// A 1-indexed page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: u64,
    size: u64,
}

impl Page {
    /// Create a page of `size` items, where `number` starts from 1.
    ///
    /// # Errors
    /// Returns [Error::InvalidPagination] if either `number` or `size` is zero.
    pub fn new(number: u64, size: u64) -> Result<Self, Error> {
        if number == 0 {
            return Err(Error::InvalidPagination(
                "page numbers start from 1".to_owned(),
            ));
        }

        if size == 0 {
            return Err(Error::InvalidPagination(
                "perPage must be at least 1".to_owned(),
            ));
        }

        Ok(Self { number, size })
    }

    /// Create a page from optional request parameters, falling back to the defaults in `config`.
    ///
    /// # Errors
    /// Returns [Error::InvalidPagination] if the resulting page number or size is zero.
    pub fn from_params(
        number: Option<u64>,
        size: Option<u64>,
        config: &PaginationConfig,
    ) -> Result<Self, Error> {
        Self::new(
            number.unwrap_or(config.default_page),
            size.unwrap_or(config.default_page_size),
        )
    }

    /// The page number, starting from 1.
    pub fn number(&self) -> u64 {
        self.number
    }

    /// The maximum number of items on the page.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// The number of items that come before this page.
    pub fn offset(&self) -> u64 {
        (self.number - 1).saturating_mul(self.size)
    }
}
