#![forbid(unsafe_code)]

//! Reverse policy: where a released element springs back to.

use std::fmt;

use crate::geometry::Position;

/// Host-supplied reverse target. Returning `None` means "use the origin".
pub type ReverseFn = Box<dyn FnMut() -> Option<Position>>;

/// Computes the spring-back target when reversal is enabled.
#[derive(Default)]
pub struct ReversePolicy {
    custom: Option<ReverseFn>,
}

impl fmt::Debug for ReversePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReversePolicy")
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

impl ReversePolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_fn(mut self, f: impl FnMut() -> Option<Position> + 'static) -> Self {
        self.set_fn(f);
        self
    }

    pub fn set_fn(&mut self, f: impl FnMut() -> Option<Position> + 'static) {
        self.custom = Some(Box::new(f));
    }

    pub fn clear_fn(&mut self) {
        self.custom = None;
    }

    #[must_use]
    pub fn has_custom(&self) -> bool {
        self.custom.is_some()
    }

    /// Target offset: the custom function's value, or the origin.
    pub fn target_offset(&mut self) -> Position {
        let target = self
            .custom
            .as_mut()
            .and_then(|f| f())
            .unwrap_or(Position::ZERO);
        crate::debug!(x = target.x, y = target.y, "reverse target");
        target
    }
}
