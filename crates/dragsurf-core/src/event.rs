#![forbid(unsafe_code)]

//! Pointer events consumed by the gesture machine.
//!
//! Platform recognizers are expected to deliver one [`PointerEvent`] per
//! phase, carrying the cumulative movement since touch-down. Nothing here
//! performs hit testing or velocity estimation.

use crate::geometry::Position;

/// Phase of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PointerPhase {
    /// Pointer went down on the element.
    Down,
    /// Pointer moved while down.
    Move,
    /// Pointer lifted.
    Up,
    /// The platform took the gesture away (system gesture, focus loss).
    Cancel,
}

/// A single pointer event.
///
/// `delta` is the cumulative movement since the `Down` that started this
/// gesture, not the movement since the previous event.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerEvent {
    pub phase: PointerPhase,
    /// Platform pointer identifier; stable for the life of one gesture.
    pub pointer_id: u32,
    /// Absolute screen position of the pointer.
    pub position: Position,
    /// Cumulative movement since touch-down.
    pub delta: Position,
}

impl PointerEvent {
    #[must_use]
    pub const fn new(phase: PointerPhase, pointer_id: u32, position: Position, delta: Position) -> Self {
        Self {
            phase,
            pointer_id,
            position,
            delta,
        }
    }

    /// Touch-down at `position`; the delta is zero by definition.
    #[must_use]
    pub const fn down(pointer_id: u32, position: Position) -> Self {
        Self::new(PointerPhase::Down, pointer_id, position, Position::ZERO)
    }

    /// Move with cumulative `delta` from the touch-down point `origin`.
    #[must_use]
    pub fn moved(pointer_id: u32, origin: Position, delta: Position) -> Self {
        Self::new(PointerPhase::Move, pointer_id, origin + delta, delta)
    }

    #[must_use]
    pub fn up(pointer_id: u32, origin: Position, delta: Position) -> Self {
        Self::new(PointerPhase::Up, pointer_id, origin + delta, delta)
    }

    #[must_use]
    pub fn cancel(pointer_id: u32, origin: Position, delta: Position) -> Self {
        Self::new(PointerPhase::Cancel, pointer_id, origin + delta, delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn down_has_zero_delta() {
        let ev = PointerEvent::down(7, Position::new(10.0, 20.0));
        assert_eq!(ev.phase, PointerPhase::Down);
        assert_eq!(ev.pointer_id, 7);
        assert_eq!(ev.delta, Position::ZERO);
    }

    #[test]
    fn moved_position_tracks_origin_plus_delta() {
        let origin = Position::new(10.0, 20.0);
        let ev = PointerEvent::moved(1, origin, Position::new(5.0, -3.0));
        assert_eq!(ev.position, Position::new(15.0, 17.0));
        assert_eq!(ev.delta, Position::new(5.0, -3.0));
    }
}
