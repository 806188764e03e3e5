//! Simple pagination: a bounded window plus a has-more flag, no total count.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A validated request for one page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_size: u64,
    page: u64,
}

impl PageRequest {
    /// Build a request for the 1-indexed `page` holding up to `page_size` items.
    pub fn new(page_size: u64, page: u64) -> Result<Self, DomainError> {
        if page_size == 0 {
            return Err(DomainError::InvalidArgument(
                "page size must be a positive integer".to_string(),
            ));
        }
        if page == 0 {
            return Err(DomainError::InvalidArgument(
                "page number must be a positive integer".to_string(),
            ));
        }
        Ok(Self { page_size, page })
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    /// Number of items to skip. Saturates so huge page numbers simply land past the end.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// Rows to fetch so that `has_more` can be decided without a count query.
    pub fn fetch_limit(&self) -> u64 {
        self.page_size.saturating_add(1)
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    pub has_more: bool,
}

impl<T> Page<T> {
    /// An empty page, as returned for out-of-range page numbers.
    pub fn empty(request: PageRequest) -> Self {
        Self {
            items: Vec::new(),
            page: request.page(),
            page_size: request.page_size(),
            has_more: false,
        }
    }

    /// Build a page from up to `fetch_limit()` rows read at the request offset.
    pub fn from_overfetch(mut rows: Vec<T>, request: PageRequest) -> Self {
        let limit = usize::try_from(request.page_size()).unwrap_or(usize::MAX);
        let has_more = rows.len() > limit;
        rows.truncate(limit);
        Self {
            items: rows,
            page: request.page(),
            page_size: request.page_size(),
            has_more,
        }
    }

    pub fn next_page(&self) -> Option<u64> {
        self.has_more.then(|| self.page + 1)
    }

    pub fn previous_page(&self) -> Option<u64> {
        (self.page > 1).then(|| self.page - 1)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            has_more: self.has_more,
        }
    }
}
