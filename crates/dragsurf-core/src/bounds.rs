#![forbid(unsafe_code)]

//! Bounds tracking: the element's current screen rectangle.
//!
//! The tracker owns the element [`Size`]. Size is updated out of band by
//! layout reports; until the first report a default size stands in.
//!
//! # Invariants
//!
//! 1. `rect(offset)` is always `from_origin_size(base + offset, size)`.
//! 2. The stored size is always finite and non-negative.
//!
//! # Failure Modes
//!
//! A layout report with a non-finite or negative dimension is dropped and
//! the last-known size is kept.

use crate::geometry::{Position, Rect, Size};

/// Default element size used before the first layout report.
pub const DEFAULT_SIZE: Size = Size::new(36.0, 36.0);

/// Compute the on-screen rectangle for an element at `base` shifted by
/// `offset`.
#[inline]
#[must_use]
pub fn current_rect(base: Position, offset: Position, size: Size) -> Rect {
    Rect::from_origin_size(base + offset, size)
}

/// Outcome of a layout report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutOutcome {
    /// The size was stored.
    Accepted,
    /// Same size as before; nothing changed.
    Unchanged,
    /// The report carried unusable dimensions and was dropped.
    Rejected,
}

/// Tracks base position and measured size.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundsTracker {
    base: Position,
    size: Size,
    measured: bool,
}

impl BoundsTracker {
    /// Create a tracker at `base` using `default_size` until layout reports.
    ///
    /// An invalid `default_size` falls back to [`DEFAULT_SIZE`].
    #[must_use]
    pub fn new(base: Position, default_size: Size) -> Self {
        let size = if default_size.is_valid() {
            default_size
        } else {
            DEFAULT_SIZE
        };
        Self {
            base,
            size,
            measured: false,
        }
    }

    #[inline]
    #[must_use]
    pub fn base(&self) -> Position {
        self.base
    }

    pub fn set_base(&mut self, base: Position) {
        self.base = base;
    }

    #[inline]
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Whether at least one layout report has been accepted.
    #[inline]
    #[must_use]
    pub fn is_measured(&self) -> bool {
        self.measured
    }

    /// Record a layout report.
    pub fn on_layout(&mut self, size: Size) -> LayoutOutcome {
        if !size.is_valid() {
            crate::warn!(
                width = size.width,
                height = size.height,
                "layout report rejected, keeping last-known size"
            );
            return LayoutOutcome::Rejected;
        }
        if self.measured && size == self.size {
            return LayoutOutcome::Unchanged;
        }
        self.size = size;
        self.measured = true;
        crate::trace!(width = size.width, height = size.height, "layout accepted");
        LayoutOutcome::Accepted
    }

    /// Current rectangle for the given accumulated offset.
    #[inline]
    #[must_use]
    pub fn rect(&self, offset: Position) -> Rect {
        current_rect(self.base, offset, self.size)
    }
}

impl Default for BoundsTracker {
    fn default() -> Self {
        Self::new(Position::ZERO, DEFAULT_SIZE)
    }
}
