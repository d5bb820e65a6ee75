use crate::error::{ProductError, ProductResult};
use crate::models::{PageMeta, PageRequest};

/// A bounds-checked page over a result set of known size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u32,
    pub limit: u32,
    pub total_items: u64,
    pub total_pages: u64,
}

/// `ceil(total_items / limit)`, never less than one. A zero limit counts as one.
pub fn total_pages(total_items: u64, limit: u32) -> u64 {
    if total_items == 0 {
        return 1;
    }
    total_items.div_ceil(u64::from(limit.max(1)))
}

impl PageWindow {
    /// Fails with `InvalidPage` when `request.page` is past the last page.
    pub fn resolve(request: PageRequest, total_items: u64) -> ProductResult<Self> {
        let total_pages = total_pages(total_items, request.limit);

        if u64::from(request.page) > total_pages {
            return Err(ProductError::InvalidPage {
                page: request.page,
                total_pages,
            });
        }

        Ok(Self {
            page: request.page,
            limit: request.limit,
            total_items,
            total_pages,
        })
    }

    /// Rows to skip; page 0 is treated as page 1.
    pub fn skip(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    pub fn take(&self) -> u64 {
        u64::from(self.limit)
    }

    pub fn meta(&self) -> PageMeta {
        PageMeta {
            total_items: self.total_items,
            total_pages: self.total_pages,
            page: self.page,
            limit: self.limit,
        }
    }
}
