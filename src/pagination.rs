//! Page containers returned by list queries.

use serde::Serialize;

/// Upper bound applied to any requested page size.
pub const MAX_PAGE_SIZE: usize = 100;

/// Page size used when the caller has no preference.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// An ordered slice of results plus the metadata needed to navigate.
///
/// `page` is zero-based and `total` is the number of rows matching the
/// query across all pages.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page: usize, per_page: usize, total: usize) -> Self {
        Self {
            items,
            page,
            per_page: per_page.max(1),
            total,
        }
    }

    /// Converts every item while keeping order and metadata intact.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
        }
    }

    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.per_page)
    }

    pub fn is_last(&self) -> bool {
        self.page.saturating_add(1) >= self.total_pages()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
