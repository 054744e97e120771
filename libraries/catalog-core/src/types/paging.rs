//! Pagination types for listing queries

use serde::{Deserialize, Serialize};

/// Default number of records per page
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Pagination request parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (0-indexed)
    pub page: u32,
    /// Number of records per page
    pub size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    /// SQL OFFSET value
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }

    /// SQL LIMIT value
    pub fn limit(&self) -> u32 {
        self.size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of results plus totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    /// Number of records across all pages
    pub total_elements: u64,
    pub total_pages: u32,
    /// Current page number (0-indexed)
    pub page: u32,
    pub size: u32,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, total_elements: u64, request: PageRequest) -> Self {
        let total_pages = if request.size == 0 {
            0
        } else {
            total_elements.div_ceil(u64::from(request.size)) as u32
        };

        Self {
            content,
            total_elements,
            total_pages,
            page: request.page,
            size: request.size,
        }
    }

    /// Whether a page exists after this one
    pub fn has_next(&self) -> bool {
        self.page.saturating_add(1) < self.total_pages
    }

    /// Whether a page exists before this one
    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    /// Map the records to a different type
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            page: self.page,
            size: self.size,
        }
    }
}
