#![forbid(unsafe_code)]

//! Responsive column-packing panel.
//!
//! A [`GridPanel`] fits as many equal-width columns as the available width
//! allows, drops items into cells left to right, top to bottom, and reports
//! the height needed to contain them.
//!
//! # Passes
//!
//! A layout pass is two phases:
//!
//! 1. **Sizing** ([`GridPanel::measure`]): derive
//!    `columns = floor(width / desired_column_width)`, notify observers if
//!    that changed, then measure every item against the *full* available
//!    size. Only the intrinsic height survives into placement.
//! 2. **Placement** ([`GridPanel::arrange`]): give every item a slot of
//!    width `floor(width / columns)` and accumulate the container height.
//!
//! # Height accumulation
//!
//! While walking items, the running row height is folded into a running
//! total after every item. When the set holds at least one full row the
//! fold is `max`; for a single incomplete row it is `min` starting from 0,
//! which always yields 0 for non-negative heights. That collapse is kept as
//! is; hosts that lay out fewer items than columns get a zero height.
//!
//! At the first full row that is followed by a short final row, the current
//! row height is recorded as *overflow*, added once, and accumulation stops.
//! For at least one full row the result is `total / columns + overflow`.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | `desired_column_width <= 0` | Rejected when configured |
//! | `columns == 0` | Placement skipped, previous height retained |
//! | no items | Height 0, no slots |

use std::fmt;

use gridpack_core::geometry::{Rect, Size};
use gridpack_core::{debug, layout_span, trace, warn};

use crate::config::{self, ConfigError, GridConfig};
use crate::event::{ColumnCountChanged, ColumnObservers, ObserverId};
use crate::item::GridItem;

/// Rejected panel configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// Column width was not a finite positive number.
    InvalidColumnWidth(f64),
    /// Fallback height was not positive.
    InvalidMaxHeight(f64),
    /// A full configuration failed validation.
    Config(Vec<ConfigError>),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidColumnWidth(width) => {
                write!(f, "desired column width must be finite and > 0, got {width}")
            }
            Self::InvalidMaxHeight(height) => {
                write!(f, "max height fallback must be > 0, got {height}")
            }
            Self::Config(errors) => {
                write!(f, "invalid grid configuration: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{err}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(errors) => errors
                .first()
                .map(|err| err as &(dyn std::error::Error + 'static)),
            _ => None,
        }
    }
}

/// Number of columns of `desired_column_width` that fit in `available_width`.
///
/// Yields 0 (the degenerate layout) for a non-finite available width or a
/// desired width that is not finite and positive. Negative or NaN available
/// widths also yield 0.
#[inline]
pub fn column_count_for(available_width: f64, desired_column_width: f64) -> usize {
    if !available_width.is_finite() || config::check_column_width(desired_column_width).is_err()
    {
        return 0;
    }
    // `as` saturates: negatives become 0.
    (available_width / desired_column_width).floor() as usize
}

/// Equal-width column packing panel.
///
/// The panel keeps the last derived column count and height between passes;
/// all other accumulators are local to one pass.
#[derive(Debug)]
pub struct GridPanel {
    config: GridConfig,
    column_count: usize,
    column_width: f64,
    height: f64,
    overflow: f64,
    intrinsic: Vec<Size>,
    slots: Vec<Rect>,
    last_available: Size,
    dirty: bool,
    observers: ColumnObservers,
}

impl Default for GridPanel {
    fn default() -> Self {
        Self::with_valid_config(GridConfig::default())
    }
}

impl GridPanel {
    /// Create a panel, validating the configuration.
    pub fn new(config: GridConfig) -> Result<Self, LayoutError> {
        config.validate().map_err(LayoutError::Config)?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: GridConfig) -> Self {
        Self {
            config,
            column_count: 0,
            column_width: 0.0,
            height: 0.0,
            overflow: 0.0,
            intrinsic: Vec::new(),
            slots: Vec::new(),
            last_available: Size::ZERO,
            dirty: true,
            observers: ColumnObservers::new(),
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Target column width.
    pub fn desired_column_width(&self) -> f64 {
        self.config.desired_column_width
    }

    /// Change the target column width.
    ///
    /// Non-finite or non-positive widths are rejected and the previous value
    /// is kept. An accepted change marks the panel dirty.
    pub fn set_desired_column_width(&mut self, width: f64) -> Result<(), LayoutError> {
        if config::check_column_width(width).is_err() {
            warn!(field = "desired_column_width", value = width, "rejected grid configuration");
            return Err(LayoutError::InvalidColumnWidth(width));
        }
        if width != self.config.desired_column_width {
            self.config.desired_column_width = width;
            self.dirty = true;
        }
        Ok(())
    }

    /// Height substituted during sizing when the available height is 0.
    pub fn max_height_fallback(&self) -> f64 {
        self.config.max_height_fallback
    }

    /// Change the fallback height. Non-positive or NaN heights are rejected.
    pub fn set_max_height_fallback(&mut self, height: f64) -> Result<(), LayoutError> {
        if config::check_max_height(height).is_err() {
            warn!(field = "max_height_fallback", value = height, "rejected grid configuration");
            return Err(LayoutError::InvalidMaxHeight(height));
        }
        if height != self.config.max_height_fallback {
            self.config.max_height_fallback = height;
            self.dirty = true;
        }
        Ok(())
    }

    /// Mark the panel dirty after the host changed its item set.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Whether configuration or items changed since the last completed pass.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Register a column-count observer.
    pub fn subscribe<F>(&mut self, callback: F) -> ObserverId
    where
        F: FnMut(&ColumnCountChanged) + 'static,
    {
        self.observers.subscribe(callback)
    }

    /// Remove a column-count observer.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Column count derived by the last sizing phase.
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Slot width used by the last placement.
    pub fn column_width(&self) -> f64 {
        self.column_width
    }

    /// Container height computed by the last placement that ran.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Overflow reserved for a short final row in the last placement.
    pub fn overflow(&self) -> f64 {
        self.overflow
    }

    /// Slots assigned by the last placement, in item order.
    pub fn slots(&self) -> &[Rect] {
        &self.slots
    }

    /// Run a full pass: sizing followed by placement at the available width.
    pub fn layout<I: GridItem>(&mut self, items: &mut [I], available: Size) -> Size {
        let span = layout_span!(items.len(), available.width);
        let _guard = span.enter();

        self.measure(items, available);
        self.arrange(items, available.width)
    }

    /// Sizing phase.
    ///
    /// Returns the constraint every item was measured against: the available
    /// width and, if the available height was 0, the fallback height.
    pub fn measure<I: GridItem>(&mut self, items: &mut [I], available: Size) -> Size {
        self.last_available = available;
        let constraint = if available.height == 0.0 {
            available.with_height(self.config.max_height_fallback)
        } else {
            available
        };

        let columns = column_count_for(available.width, self.config.desired_column_width);
        if columns != self.column_count {
            let event = ColumnCountChanged {
                previous: self.column_count,
                columns,
            };
            self.column_count = columns;
            debug!(
                previous = event.previous,
                columns = event.columns,
                "column count changed"
            );
            self.observers.notify(&event);
        }

        self.intrinsic.clear();
        self.intrinsic
            .extend(items.iter_mut().map(|item| item.measure(constraint)));
        constraint
    }

    /// Placement phase.
    ///
    /// Re-runs sizing against the last available size if the item count no
    /// longer matches what was measured. With zero columns nothing is placed
    /// and the previous height is reported.
    pub fn arrange<I: GridItem>(&mut self, items: &mut [I], final_width: f64) -> Size {
        if self.intrinsic.len() != items.len() {
            self.measure(items, self.last_available);
        }
        self.dirty = false;
        self.slots.clear();

        let columns = self.column_count;
        if columns == 0 {
            return Size::new(final_width, self.height);
        }

        let column_width = (final_width / columns as f64).floor();
        let total = items.len();
        let has_full_row = total >= columns;

        let mut column = 0usize;
        let mut top = 0.0_f64;
        let mut row_height = 0.0_f64;
        let mut total_height = 0.0_f64;
        let mut overflow = 0.0_f64;
        let mut placed = 0usize;
        let mut overflow_counted = false;

        for (item, intrinsic) in items.iter_mut().zip(&self.intrinsic) {
            let slot = Rect::new(
                column_width * column as f64,
                top,
                column_width,
                intrinsic.height,
            );
            item.arrange(slot);
            self.slots.push(slot);

            column += 1;
            row_height = if has_full_row {
                row_height.max(intrinsic.height)
            } else {
                row_height.min(intrinsic.height)
            };
            placed += 1;

            let row_complete = column == columns;
            // The next row is the last one and it is short.
            let short_row_next = placed != total && total - placed < columns;
            if row_complete && short_row_next && !overflow_counted {
                overflow = row_height;
                total_height += row_height;
                overflow_counted = true;
            } else if !overflow_counted {
                total_height += row_height;
            }

            if row_complete {
                column = 0;
                top += row_height;
                row_height = 0.0;
            }
        }

        if has_full_row {
            total_height = total_height / columns as f64 + overflow;
        }

        self.column_width = column_width;
        self.height = total_height;
        self.overflow = overflow;
        trace!(
            items = total,
            columns,
            height = total_height,
            overflow,
            "grid placement complete"
        );
        Size::new(final_width, total_height)
    }
}
