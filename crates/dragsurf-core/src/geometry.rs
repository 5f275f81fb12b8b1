#![forbid(unsafe_code)]

//! Geometric primitives in host layout units.
//!
//! All coordinates are `f32`. A [`Rect`] is always derived from a base
//! position, an offset and a [`Size`]; nothing stores one independently.

use std::ops::{Add, Sub};

/// A 2D point or offset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Position {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Element size as reported by layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    #[inline]
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Both dimensions are finite and non-negative.
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
    }
}

/// An on-screen bounding box given by its four edges.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    #[inline]
    #[must_use]
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rect with its top-left corner at `origin`.
    #[inline]
    #[must_use]
    pub fn from_origin_size(origin: Position, size: Size) -> Self {
        Self::new(
            origin.x,
            origin.y,
            origin.x + size.width,
            origin.y + size.height,
        )
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    #[inline]
    #[must_use]
    pub fn origin(&self) -> Position {
        Position::new(self.left, self.top)
    }

    /// Shift every edge by `by`.
    #[inline]
    #[must_use]
    pub fn translate(&self, by: Position) -> Self {
        Self::new(
            self.left + by.x,
            self.top + by.y,
            self.right + by.x,
            self.bottom + by.y,
        )
    }

    /// Whether `other` lies entirely inside `self` (edges inclusive).
    #[inline]
    #[must_use]
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right <= self.right
            && other.bottom <= self.bottom
    }
}

/// Optional screen-coordinate limits for a dragged element.
///
/// `min_*` bound the leading edge (`left`/`top`), `max_*` bound the trailing
/// edge (`right`/`bottom`). An absent side is unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BoundsConstraints {
    pub min_x: Option<f32>,
    pub min_y: Option<f32>,
    pub max_x: Option<f32>,
    pub max_y: Option<f32>,
}

impl BoundsConstraints {
    /// No limits on any side.
    pub const NONE: Self = Self {
        min_x: None,
        min_y: None,
        max_x: None,
        max_y: None,
    };

    #[must_use]
    pub const fn with_min_x(mut self, v: f32) -> Self {
        self.min_x = Some(v);
        self
    }

    #[must_use]
    pub const fn with_min_y(mut self, v: f32) -> Self {
        self.min_y = Some(v);
        self
    }

    #[must_use]
    pub const fn with_max_x(mut self, v: f32) -> Self {
        self.max_x = Some(v);
        self
    }

    #[must_use]
    pub const fn with_max_y(mut self, v: f32) -> Self {
        self.max_y = Some(v);
        self
    }

    /// True when no side is constrained.
    #[inline]
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.min_x.is_none() && self.min_y.is_none() && self.max_x.is_none() && self.max_y.is_none()
    }

    /// The permitted region, with undefined sides at infinity.
    #[must_use]
    pub fn region(&self) -> Rect {
        Rect::new(
            self.min_x.unwrap_or(f32::NEG_INFINITY),
            self.min_y.unwrap_or(f32::NEG_INFINITY),
            self.max_x.unwrap_or(f32::INFINITY),
            self.max_y.unwrap_or(f32::INFINITY),
        )
    }
}
