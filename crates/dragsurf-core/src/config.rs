#![forbid(unsafe_code)]

//! Drag surface configuration.

use std::fmt;
use std::time::Duration;

use crate::animation::{SpringSpec, SpringSpecError};
use crate::bounds::DEFAULT_SIZE;
use crate::geometry::{BoundsConstraints, Position, Size};
use crate::gesture::{DEFAULT_DRAG_THRESHOLD, DEFAULT_LONG_PRESS_DELAY};

/// Configuration for a [`DragSurface`](crate::surface::DragSurface).
///
/// Every field has a usable default. Values are not checked on
/// construction; call [`DragConfig::validate`] to reject anomalies up front.
/// Unchecked anomalies fall back silently where they are consumed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DragConfig {
    /// Screen position of the element before any drag (default: origin).
    pub base: Position,
    /// Stacking hint forwarded to the renderer (default: 1).
    pub z_index: i32,
    /// Screen-coordinate limits for the element's edges (default: none).
    pub constraints: BoundsConstraints,
    /// Refuse new presses and drags (default: false).
    pub disabled: bool,
    /// Spring back after release instead of staying put (default: false).
    pub should_reverse: bool,
    /// Size used until the first layout report (default: 36x36).
    pub default_size: Size,
    /// Expose constraint and bounds geometry for an overlay (default: false).
    pub debug: bool,
    /// Per-axis movement a press must exceed to become a drag (default: 2).
    pub drag_threshold: f32,
    /// Hold time in milliseconds before a press counts as long (default: 500).
    pub long_press_delay_ms: u64,
    /// Spring used for spring-back after release.
    pub release_spring: SpringSpec,
    /// Spring used by `animate_to`.
    pub animate_spring: SpringSpec,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            base: Position::ZERO,
            z_index: 1,
            constraints: BoundsConstraints::NONE,
            disabled: false,
            should_reverse: false,
            default_size: DEFAULT_SIZE,
            debug: false,
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            long_press_delay_ms: DEFAULT_LONG_PRESS_DELAY.as_millis() as u64,
            release_spring: SpringSpec::DEFAULT,
            animate_spring: SpringSpec::responsive(),
        }
    }
}

impl DragConfig {
    #[must_use]
    pub fn with_base(mut self, base: Position) -> Self {
        self.base = base;
        self
    }

    #[must_use]
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    #[must_use]
    pub fn with_constraints(mut self, constraints: BoundsConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn with_reverse(mut self, should_reverse: bool) -> Self {
        self.should_reverse = should_reverse;
        self
    }

    #[must_use]
    pub fn with_default_size(mut self, size: Size) -> Self {
        self.default_size = size;
        self
    }

    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.drag_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_long_press_delay(mut self, delay: Duration) -> Self {
        self.long_press_delay_ms = delay.as_millis() as u64;
        self
    }

    #[must_use]
    pub fn with_release_spring(mut self, spec: SpringSpec) -> Self {
        self.release_spring = spec;
        self
    }

    #[must_use]
    pub fn with_animate_spring(mut self, spec: SpringSpec) -> Self {
        self.animate_spring = spec;
        self
    }

    #[must_use]
    pub fn long_press_delay(&self) -> Duration {
        Duration::from_millis(self.long_press_delay_ms)
    }

    /// Check the configuration. Bounds are deliberately not checked.
    pub fn validate(&self) -> Result<(), DragConfigError> {
        if !self.drag_threshold.is_finite() || self.drag_threshold < 0.0 {
            return Err(DragConfigError::InvalidDragThreshold {
                threshold: self.drag_threshold,
            });
        }
        if !self.default_size.is_valid() {
            return Err(DragConfigError::InvalidDefaultSize {
                width: self.default_size.width,
                height: self.default_size.height,
            });
        }
        self.release_spring
            .validate()
            .map_err(DragConfigError::InvalidReleaseSpring)?;
        self.animate_spring
            .validate()
            .map_err(DragConfigError::InvalidAnimateSpring)?;
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragConfigError {
    InvalidDragThreshold { threshold: f32 },
    InvalidDefaultSize { width: f32, height: f32 },
    InvalidReleaseSpring(SpringSpecError),
    InvalidAnimateSpring(SpringSpecError),
}

impl fmt::Display for DragConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDragThreshold { threshold } => {
                write!(f, "drag threshold must be finite and >= 0 (got {threshold})")
            }
            Self::InvalidDefaultSize { width, height } => write!(
                f,
                "default size must be finite and non-negative (got {width}x{height})"
            ),
            Self::InvalidReleaseSpring(error) => write!(f, "invalid release spring: {error}"),
            Self::InvalidAnimateSpring(error) => write!(f, "invalid animate-to spring: {error}"),
        }
    }
}

impl std::error::Error for DragConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidReleaseSpring(error) | Self::InvalidAnimateSpring(error) => Some(error),
            _ => None,
        }
    }
}
