//! Offset-addressed pagination.

use serde::{Deserialize, Serialize};

/// Pagination parameters for listing queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Zero-based page number.
    pub page: u32,
    /// Items per page (at least 1).
    pub size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 0, size: 10 }
    }
}

impl PageRequest {
    /// Build a request from raw (possibly absent or out-of-range) input.
    ///
    /// Negative pages clamp to 0, size clamps into `1..=1000`.
    pub fn new(page: Option<i64>, size: Option<i64>) -> Self {
        let page = page.unwrap_or(0).max(0).min(u32::MAX as i64) as u32;
        let size = size.unwrap_or(10).clamp(1, 1000) as u32;
        Self { page, size }
    }

    /// Offset of the first item on this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

/// A bounded slice of the full record set plus total-count metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    /// Zero-based page number.
    pub number: u32,
    pub size: u32,
}

impl<T> Page<T> {
    /// Assemble a page from the slice the store returned and the total count.
    ///
    /// A hand-built `PageRequest` with `size: 0` is treated as size 1; the
    /// clamp in `PageRequest::new` keeps the normal path away from it.
    pub fn new(content: Vec<T>, total_elements: u64, request: PageRequest) -> Self {
        Self {
            content,
            total_elements,
            total_pages: total_elements.div_ceil(u64::from(request.size.max(1))),
            number: request.page,
            size: request.size,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
