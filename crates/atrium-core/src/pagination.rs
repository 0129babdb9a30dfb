//! Pagination types for list operations.

use serde::{Deserialize, Serialize};

/// A request for a page of results.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageRequest {
    /// The page number (0-indexed).
    pub page: usize,
    /// The number of items per page.
    pub size: usize,
}

impl PageRequest {
    /// The default page size.
    pub const DEFAULT_SIZE: usize = 10;
    /// The maximum allowed page size.
    pub const MAX_SIZE: usize = 100;

    /// Creates a new page request.
    #[must_use]
    pub fn new(page: usize, size: usize) -> Self {
        Self {
            page,
            size: size.min(Self::MAX_SIZE),
        }
    }

    /// Creates a page request for the first page with default size.
    #[must_use]
    pub fn first() -> Self {
        Self::new(0, Self::DEFAULT_SIZE)
    }

    /// Returns the offset for database queries.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.page * self.size
    }

    /// Returns the limit for database queries.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// A page of results with paging metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// The current page number (0-indexed).
    pub page: usize,
    /// The requested page size.
    pub size: usize,
    /// The total number of items across all pages.
    pub total_elements: u64,
    /// The total number of pages.
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Creates a page from the items of the current page and the total count.
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let total_pages = if request.size == 0 {
            0
        } else {
            (total_elements as f64 / request.size as f64).ceil() as u64
        };
        Self {
            items,
            page: request.page,
            size: request.size,
            total_elements,
            total_pages,
        }
    }

    /// Creates an empty page.
    #[must_use]
    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    /// Whether a previous page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 0
    }

    /// Whether a following page exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        (self.page as u64) + 1 < self.total_pages
    }

    /// Maps the items of this page, preserving the paging metadata.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_clamps_size() {
        let request = PageRequest::new(0, 1000);
        assert_eq!(request.size, PageRequest::MAX_SIZE);
    }

    #[test]
    fn test_page_request_offset() {
        let request = PageRequest::new(3, 10);
        assert_eq!(request.offset(), 30);
        assert_eq!(request.limit(), 10);
    }

    #[test]
    fn test_page_metadata() {
        let request = PageRequest::new(1, 10);
        let page = Page::new(vec![1, 2, 3], request, 25);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_previous());
        assert!(page.has_next());
    }

    #[test]
    fn test_last_page_has_no_next() {
        let request = PageRequest::new(2, 10);
        let page = Page::new(vec![1, 2, 3, 4, 5], request, 25);
        assert!(!page.has_next());
        assert!(page.has_previous());
    }

    #[test]
    fn test_empty_page() {
        let page: Page<u32> = Page::empty(PageRequest::first());
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn test_page_map() {
        let page = Page::new(vec![1, 2], PageRequest::first(), 2);
        let mapped = page.map(|n| n.to_string());
        assert_eq!(mapped.items, vec!["1".to_string(), "2".to_string()]);
        assert_eq!(mapped.total_elements, 2);
    }
}
