use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub page_number: u64,
    pub page_size: u64,
    /// Rows matching the filter, independent of pagination.
    pub total_elements: u64,
    pub total_pages: u64,
    pub first: bool,
    pub last: bool,
}

impl PageInfo {
    /// Derive totals and boundary flags for `page_number` of a result set of
    /// `total_elements` rows split into pages of `page_size`.
    pub fn new(page_number: u64, page_size: u64, total_elements: u64) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total_elements.div_ceil(page_size)
        };
        Self {
            page_number,
            page_size,
            total_elements,
            total_pages,
            first: page_number == 0,
            last: total_pages <= 1 || page_number >= total_pages - 1,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_info: PageInfo,
}

impl<T> Page<T> {
    /// Create a new page with items and page info
    pub fn new(items: Vec<T>, page_info: PageInfo) -> Self {
        Self { items, page_info }
    }

    /// Empty page that still reports the totals of the underlying set.
    pub fn empty(page_number: u64, page_size: u64, total_elements: u64) -> Self {
        Self {
            items: Vec::new(),
            page_info: PageInfo::new(page_number, page_size, total_elements),
        }
    }
}

/// Row offset of the first item of `page_number`; saturates instead of overflowing.
pub fn page_offset(page_number: u64, page_size: u64) -> u64 {
    page_number.saturating_mul(page_size)
}
