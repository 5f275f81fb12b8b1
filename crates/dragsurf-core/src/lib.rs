#![forbid(unsafe_code)]

//! Core: gesture lifecycle, bounds tracking, clamping, and spring-driven offsets
//! for draggable surfaces.

pub mod animation;
pub mod bounds;
pub mod clamp;
pub mod config;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod logging;
pub mod reverse;
pub mod surface;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
