#![forbid(unsafe_code)]

//! Responsive grid packing.
//!
//! This crate lays out an ordered set of items into equal-width columns:
//!
//! - [`GridPanel`] - derives the column count from the available width,
//!   places items row by row, and computes the container height
//! - [`GridItem`] - the measure/arrange contract items implement ([`Tile`] is
//!   a ready-made fixed-size item)
//! - [`ColumnCountChanged`] - emitted synchronously whenever the derived
//!   column count changes
//! - [`Pagination`] - sizes pages as `columns * rows_per_page` in response to
//!   column changes
//! - [`GridConfig`] - column width, fallback height and rows per page, with
//!   environment overrides
//!
//! # Example
//!
//! ```
//! use gridpack_layout::{GridPanel, Pagination, Size, Tile};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let mut panel = GridPanel::default();
//! let pages = Rc::new(RefCell::new(Pagination::new(3)));
//! let sink = pages.clone();
//! panel.subscribe(move |event| {
//!     sink.borrow_mut().on_column_count_changed(event);
//! });
//!
//! let mut posters: Vec<Tile> = (0..7).map(|_| Tile::new(200.0, 300.0)).collect();
//! let size = panel.layout(&mut posters, Size::new(700.0, 0.0));
//!
//! assert_eq!(panel.column_count(), 3);
//! assert_eq!(pages.borrow().items_per_page(), 9);
//! assert_eq!(size.height, 900.0);
//! ```

pub mod config;
pub mod event;
pub mod item;
pub mod pagination;
pub mod panel;

pub use config::{ConfigError, GridConfig};
pub use event::{ColumnCountChanged, ColumnObservers, ObserverId};
pub use gridpack_core::geometry::{Rect, Size};
pub use item::{GridItem, Tile};
pub use pagination::{FetchRequest, Pagination};
pub use panel::{GridPanel, LayoutError, column_count_for};
