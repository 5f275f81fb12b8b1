#![forbid(unsafe_code)]

//! Draggable surface public facade crate.
//!
//! Re-exports the types most hosts need from `dragsurf-core` and offers a
//! prelude plus a top-level error type.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use dragsurf_core::animation::{
    AnimatedOffset, ListenerId, PositionAnimator, SettleCallback, SpringSpec, SpringSpecError,
};
pub use dragsurf_core::bounds::{BoundsTracker, LayoutOutcome};
pub use dragsurf_core::config::{DragConfig, DragConfigError};
pub use dragsurf_core::event::{PointerEvent, PointerPhase};
pub use dragsurf_core::geometry::{BoundsConstraints, Position, Rect, Size};
pub use dragsurf_core::gesture::{
    GestureEffect, GestureNoopReason, GesturePhase, GestureState, GestureTransition,
};
pub use dragsurf_core::reverse::ReversePolicy;
pub use dragsurf_core::surface::{DebugOverlay, DragHandler, DragSurface, DragUpdate};

#[cfg(feature = "harness")]
pub use dragsurf_harness::replay::{ReplayError, ReplayLog, TraceStep};

// --- Errors ---------------------------------------------------------------

/// Top-level error type.
#[derive(Debug)]
pub enum Error {
    /// I/O failure while reading configuration or traces.
    Io(std::io::Error),
    /// Configuration rejected by [`DragConfig::validate`].
    Config(DragConfigError),
    /// Trace replay failure.
    #[cfg(feature = "harness")]
    Replay(ReplayError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "invalid drag config: {err}"),
            #[cfg(feature = "harness")]
            Self::Replay(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Config(err) => Some(err),
            #[cfg(feature = "harness")]
            Self::Replay(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<DragConfigError> for Error {
    fn from(err: DragConfigError) -> Self {
        Self::Config(err)
    }
}

#[cfg(feature = "harness")]
impl From<ReplayError> for Error {
    fn from(err: ReplayError) -> Self {
        Self::Replay(err)
    }
}

/// Standard result type for dragsurf APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Validate `config` and mount a surface with it.
pub fn mount<H: DragHandler>(config: DragConfig, handler: H) -> Result<DragSurface<H>> {
    config.validate()?;
    Ok(DragSurface::new(config, handler))
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        BoundsConstraints, DragConfig, DragHandler, DragSurface, DragUpdate, Error, PointerEvent,
        PointerPhase, Position, Rect, Result, Size, SpringSpec,
    };

    pub use crate::core;
}

pub use dragsurf_core as core;
