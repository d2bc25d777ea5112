//! This modules defines the common functionality for paging data.

use serde::{Deserialize, Deserializer};

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The number of records to return per page when not specified in a request.
    pub default_page_size: u64,
    /// The largest page size a request may ask for.
    pub max_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

/// A resolved page request: which page to return and how many records per page.
///
/// Pages are 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// The page number, starting from 1.
    pub page: u64,
    /// The maximum number of records on a page.
    pub per_page: u64,
}

impl Pagination {
    /// Resolve the raw request parameters against `config`.
    ///
    /// Missing or zero values fall back to the configured defaults and
    /// `per_page` is capped at [PaginationConfig::max_page_size].
    pub fn resolve(page: Option<u64>, per_page: Option<u64>, config: &PaginationConfig) -> Self {
        let page = page.filter(|&page| page > 0).unwrap_or(config.default_page);
        let per_page = per_page
            .filter(|&per_page| per_page > 0)
            .unwrap_or(config.default_page_size)
            .min(config.max_page_size);

        Self { page, per_page }
    }

    /// The first page with the default page size from `config`.
    pub fn first_page(config: &PaginationConfig) -> Self {
        Self::resolve(None, None, config)
    }

    /// The number of records to skip, clamped to what SQLite accepts.
    pub fn offset(&self) -> i64 {
        let offset = self.page.saturating_sub(1).saturating_mul(self.per_page);
        i64::try_from(offset).unwrap_or(i64::MAX)
    }

    /// The maximum number of records to return, clamped to what SQLite accepts.
    pub fn limit(&self) -> i64 {
        i64::try_from(self.per_page).unwrap_or(i64::MAX)
    }
}

/// Deserialize an optional page number from a query string, treating
/// anything that is not a non-negative integer as missing.
pub(crate) fn deserialize_page_number<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;

    Ok(raw.and_then(|value| value.trim().parse().ok()))
}
