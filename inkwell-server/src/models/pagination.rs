//! Pagination types

use serde::Serialize;

/// Default page number
pub const DEFAULT_PAGE: u32 = 1;

/// Default items per page
pub const DEFAULT_LIMIT: u32 = 10;

/// Pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-indexed)
    pub page: u32,
    /// Items per page
    pub limit: u32,
}

impl Pagination {
    /// Create pagination.
    ///
    /// Page and limit are clamped to a minimum of 1. There is no upper
    /// bound on limit.
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Build from optional query parameters, filling in defaults.
    pub fn from_params(page: Option<u32>, limit: Option<u32>) -> Self {
        Self::new(
            page.unwrap_or(DEFAULT_PAGE),
            limit.unwrap_or(DEFAULT_LIMIT),
        )
    }

    /// Calculate SQL OFFSET value.
    pub fn offset(&self) -> i64 {
        (self.page as i64 - 1).saturating_mul(self.limit as i64)
    }

    /// Get LIMIT value.
    pub fn limit(&self) -> i64 {
        self.limit as i64
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Paginated result wrapper
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    /// Items for current page
    pub items: Vec<T>,
    /// Total count across all pages
    pub total: i64,
    /// Current page number
    pub page: u32,
    /// Items per page
    pub limit: u32,
}

impl<T> Paginated<T> {
    /// Total number of pages, `ceil(total / limit)`. Zero when empty.
    pub fn total_pages(&self) -> u32 {
        let limit = self.limit.max(1) as i64;
        ((self.total.max(0) + limit - 1) / limit) as u32
    }

    /// Convert items while keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
        }
    }
}
