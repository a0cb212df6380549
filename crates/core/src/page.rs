//! Pagination contract of the backend (Spring-style `Page<T>`).

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Page size used by list screens when the caller does not pick one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Zero-based page index plus an explicit page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
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

/// One page of results as returned by the list endpoints.
///
/// Unknown fields sent by the backend (`pageable`, `sort`, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    pub size: u32,
    /// Zero-based page index.
    pub number: u32,
    pub first: bool,
    pub last: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty: Option<bool>,
}

impl<T> Page<T> {
    /// Slice an already-loaded collection into a page.
    ///
    /// Used for endpoints without server-side pagination (`/categorias`).
    /// A zero size is treated as one element per page.
    pub fn paginate(items: Vec<T>, request: PageRequest) -> Self {
        let size = request.size.max(1);
        let total_elements = items.len() as u64;
        let total_pages = total_elements.div_ceil(u64::from(size)) as u32;
        let number = request.page;

        let start = (number as usize).saturating_mul(size as usize);
        let content: Vec<T> = items.into_iter().skip(start).take(size as usize).collect();
        let empty = content.is_empty();

        Self {
            content,
            total_elements,
            total_pages,
            size,
            number,
            first: number == 0,
            last: number.saturating_add(1) >= total_pages,
            empty: Some(empty),
        }
    }

    /// Convert the content while keeping every pagination field untouched.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            size: self.size,
            number: self.number,
            first: self.first,
            last: self.last,
            empty: self.empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Check the structural invariants of a page.
    ///
    /// - `first == (number == 0)`
    /// - `last == (number == total_pages - 1)` for in-range pages
    /// - `content.len() <= size`
    /// - `empty == content.is_empty()` when `empty` is present
    ///
    /// A page past the end (`number >= total_pages`) must be empty; its
    /// `last` flag is not checked.
    pub fn check_invariants(&self) -> DomainResult<()> {
        if self.first != (self.number == 0) {
            return Err(DomainError::invariant(format!(
                "page {} has first={}",
                self.number, self.first
            )));
        }

        if self.total_pages > 0 && self.number < self.total_pages {
            let expected_last = self.number == self.total_pages - 1;
            if self.last != expected_last {
                return Err(DomainError::invariant(format!(
                    "page {} of {} has last={}",
                    self.number, self.total_pages, self.last
                )));
            }
        } else if !self.content.is_empty() {
            return Err(DomainError::invariant(format!(
                "page {} is past the last page ({}) but has content",
                self.number, self.total_pages
            )));
        }

        if self.content.len() > self.size as usize {
            return Err(DomainError::invariant(format!(
                "page carries {} elements but size is {}",
                self.content.len(),
                self.size
            )));
        }

        if let Some(empty) = self.empty {
            if empty != self.content.is_empty() {
                return Err(DomainError::invariant(format!(
                    "page has empty={} with {} elements",
                    empty,
                    self.content.len()
                )));
            }
        }

        Ok(())
    }
}
