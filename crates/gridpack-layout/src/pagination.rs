#![forbid(unsafe_code)]

//! Page sizing driven by column-count changes.
//!
//! Pages hold `columns * rows_per_page` items, so a wider window means larger
//! pages. When a column change grows the page beyond what the host has
//! loaded, [`Pagination::on_column_count_changed`] asks for the remainder.

use crate::config::GridConfig;
use crate::event::ColumnCountChanged;

/// Request for more items from the host's data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    /// Index of the first missing item.
    pub offset: usize,
    /// Number of items to fetch.
    pub count: usize,
}

/// Items-per-page bookkeeping for a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    rows_per_page: usize,
    columns: usize,
    loaded: usize,
}

impl Pagination {
    /// Create pagination with a fixed number of rows per page (at least 1).
    pub fn new(rows_per_page: usize) -> Self {
        Self {
            rows_per_page: rows_per_page.max(1),
            columns: 0,
            loaded: 0,
        }
    }

    /// Create pagination using the configured rows per page.
    pub fn from_config(config: &GridConfig) -> Self {
        Self::new(config.rows_per_page)
    }

    /// Rows that make up one page.
    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    /// Column count from the most recent event.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Items the host reports as loaded.
    pub fn loaded(&self) -> usize {
        self.loaded
    }

    /// Items that fill one page.
    pub fn items_per_page(&self) -> usize {
        self.columns.saturating_mul(self.rows_per_page)
    }

    /// Record how many items the host currently holds.
    pub fn record_loaded(&mut self, loaded: usize) {
        self.loaded = loaded;
    }

    /// Apply a column change. Returns a fetch request when the first page is
    /// no longer fully loaded.
    pub fn on_column_count_changed(&mut self, event: &ColumnCountChanged) -> Option<FetchRequest> {
        self.columns = event.columns;
        let wanted = self.items_per_page();
        (self.loaded < wanted).then(|| FetchRequest {
            offset: self.loaded,
            count: wanted - self.loaded,
        })
    }

    /// Zero-based page holding the item at `index`, or `None` without columns.
    pub fn page_of(&self, index: usize) -> Option<usize> {
        match self.items_per_page() {
            0 => None,
            per_page => Some(index / per_page),
        }
    }

    /// Pages needed for `total` items. 0 without columns.
    pub fn page_count(&self, total: usize) -> usize {
        match self.items_per_page() {
            0 => 0,
            per_page => total.div_ceil(per_page),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::from_config(&GridConfig::default())
    }
}
