#![forbid(unsafe_code)]

//! The item contract the panel lays out.

use gridpack_core::geometry::{Rect, Size};

/// Something the panel can measure and place.
///
/// The panel never owns the lifetime of an item. It asks for an intrinsic
/// size during sizing and hands back a slot during placement.
pub trait GridItem {
    /// Report the natural size of this item given the available space.
    ///
    /// Measurement is a pure geometry query and cannot fail.
    fn measure(&mut self, available: Size) -> Size;

    /// Receive the slot assigned by the placement phase.
    fn arrange(&mut self, slot: Rect);
}

impl<T: GridItem + ?Sized> GridItem for &mut T {
    fn measure(&mut self, available: Size) -> Size {
        (**self).measure(available)
    }

    fn arrange(&mut self, slot: Rect) {
        (**self).arrange(slot);
    }
}

impl<T: GridItem + ?Sized> GridItem for Box<T> {
    fn measure(&mut self, available: Size) -> Size {
        (**self).measure(available)
    }

    fn arrange(&mut self, slot: Rect) {
        (**self).arrange(slot);
    }
}

/// An item with a fixed intrinsic size.
///
/// Records the constraint it was last measured against and the slot it was
/// last given, so hosts can read placements back after a pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tile {
    intrinsic: Size,
    measured_against: Option<Size>,
    slot: Option<Rect>,
}

impl Tile {
    /// Create a tile with the given intrinsic size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            intrinsic: Size::new(width, height),
            measured_against: None,
            slot: None,
        }
    }

    /// The size this tile reports from [`GridItem::measure`].
    pub const fn intrinsic(&self) -> Size {
        self.intrinsic
    }

    /// Available size passed to the most recent measure call.
    pub const fn measured_against(&self) -> Option<Size> {
        self.measured_against
    }

    /// Slot assigned by the most recent placement.
    pub const fn slot(&self) -> Option<Rect> {
        self.slot
    }
}

impl GridItem for Tile {
    fn measure(&mut self, available: Size) -> Size {
        self.measured_against = Some(available);
        self.intrinsic
    }

    fn arrange(&mut self, slot: Rect) {
        self.slot = Some(slot);
    }
}
