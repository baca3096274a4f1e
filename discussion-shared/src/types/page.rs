use serde::{Deserialize, Serialize};

/// One page of a server-paginated collection.
///
/// `total` counts matching items across all pages, not the items in this page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Create a page, deriving `total_pages` from `total` and `per_page`.
    pub fn new(items: Vec<T>, page: u32, per_page: u32, total: u64) -> Self {
        let total_pages = if per_page == 0 {
            0
        } else {
            u32::try_from(total.div_ceil(u64::from(per_page))).unwrap_or(u32::MAX)
        };

        Self {
            items,
            page,
            per_page,
            total,
            total_pages,
        }
    }

    /// An empty first page.
    pub fn empty(per_page: u32) -> Self {
        Self::new(Vec::new(), 1, per_page, 0)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn next_page(&self) -> Option<u32> {
        self.has_next().then_some(self.page + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty(0)
    }
}
