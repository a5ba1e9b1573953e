/// Page-at-a-time views over an ordered list

use serde::Serialize;
use crate::domain::DomainError;

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// One page of a larger, already ordered list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-indexed page number as requested (not clamped)
    pub current_page: u32,
    pub page_size: u32,
    pub total_items: u32,
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Slice page `page_number` out of `all`
    ///
    /// Page numbers are not checked against the total: a page past the end
    /// simply has no items. Page 0 is treated like page 1 for slicing but is
    /// reported back as requested.
    pub fn paginate(all: Vec<T>, page_number: u32, page_size: u32) -> Result<Self, DomainError> {
        if page_size == 0 {
            return Err(DomainError::InvalidValue {
                message: "Page size must be at least 1".to_string(),
            });
        }

        let total_items = all.len() as u32;
        let total_pages = total_items.div_ceil(page_size);
        let skip = page_number.saturating_sub(1) as usize * page_size as usize;

        let items = all.into_iter().skip(skip).take(page_size as usize).collect();

        Ok(Self {
            items,
            current_page: page_number,
            page_size,
            total_items,
            total_pages,
        })
    }

    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages
    }
}
