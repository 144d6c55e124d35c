// src/pagination.rs
use serde::Deserialize;

const DEFAULT_PER_PAGE: u32 = 10;
const MAX_PER_PAGE: u32 = 100;

/// Limit/offset scope applied to list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Pagination {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.per_page)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, DEFAULT_PER_PAGE)
    }
}

/// Raw `?page=&per_page=` strings. Anything that does not parse falls back to
/// the defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub per_page: Option<String>,
}

impl From<PageQuery> for Pagination {
    fn from(query: PageQuery) -> Self {
        let parse = |raw: Option<String>| raw.and_then(|s| s.trim().parse::<u32>().ok());
        Pagination::new(
            parse(query.page).unwrap_or(1),
            parse(query.per_page).unwrap_or(DEFAULT_PER_PAGE),
        )
    }
}
