//! Offset pagination shared by the public and moderation listings.

use serde::Serialize;

/// Default page size for the public listing.
pub const PUBLIC_PAGE_LIMIT: u64 = 10;
/// Default page size for the moderation queue.
pub const MODERATION_PAGE_LIMIT: u64 = 20;
/// Upper bound on any requested page size.
pub const MAX_PAGE_LIMIT: u64 = 100;
/// Upper bound on the page number. Keeps every offset within a signed
/// 64-bit SQL `OFFSET`.
pub const MAX_PAGE: u64 = i64::MAX as u64 / MAX_PAGE_LIMIT;

/// A validated page request. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl PageRequest {
    /// Build a request, clamping zero values, oversized limits and pages
    /// past `MAX_PAGE`.
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: page.clamp(1, MAX_PAGE),
            limit: limit.clamp(1, MAX_PAGE_LIMIT),
        }
    }

    /// Parse raw query-string values. Missing, non-numeric or non-positive
    /// values fall back to page 1 and `default_limit`.
    pub fn from_params(page: Option<&str>, limit: Option<&str>, default_limit: u64) -> Self {
        let page = parse_positive(page).unwrap_or(1);
        let limit = parse_positive(limit).unwrap_or(default_limit);
        Self::new(page, limit)
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.limit
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|n| *n > 0)
}

/// One page of results plus the totals needed to render pagination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            page: request.page(),
            limit: request.limit(),
            total,
            pages: total.div_ceil(request.limit()),
        }
    }
}
