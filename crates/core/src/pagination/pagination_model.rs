//! Page models.

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::settings::ListingSettings;

/// A bounded, 1-based slice of an ordered collection together with the size
/// of the full collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

impl<T> Page<T> {
    /// Number of pages needed for `total` items. An empty collection has zero pages.
    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.page_size.max(1))
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Transforms the items while keeping the counts of the original page.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// Validated page coordinates for a listing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page: usize,
    pub page_size: usize,
}

impl PageRequest {
    pub fn new(page: usize, page_size: usize) -> Result<Self> {
        if page < 1 {
            return Err(Error::InvalidArgument(format!(
                "page must be at least 1, got {}",
                page
            )));
        }
        if page_size < 1 {
            return Err(Error::InvalidArgument(format!(
                "page size must be at least 1, got {}",
                page_size
            )));
        }
        Ok(Self { page, page_size })
    }

    /// Builds a request from optional query values, falling back to page 1 and
    /// the configured default page size.
    pub fn from_optional(
        page: Option<usize>,
        page_size: Option<usize>,
        settings: &ListingSettings,
    ) -> Result<Self> {
        Self::new(
            page.unwrap_or(1),
            page_size.unwrap_or(settings.default_page_size),
        )
    }

    /// Zero-based index of the first item on this page, `None` on overflow.
    pub fn offset(&self) -> Option<usize> {
        (self.page - 1).checked_mul(self.page_size)
    }
}
