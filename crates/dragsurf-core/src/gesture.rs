#![forbid(unsafe_code)]

//! Gesture lifecycle: deciding whether a touch becomes a drag.
//!
//! ```text
//! Idle -> Pressed -> Dragging -> Idle
//!            \-------------------> Idle (tap, long press, cancel)
//! ```
//!
//! The machine is pure bookkeeping. It never touches the animator; every
//! step returns a [`GestureTransition`] whose [`GestureEffect`] tells the
//! caller what happened. Ignored input yields [`GestureEffect::Noop`] with an
//! explicit reason instead of an error.
//!
//! # Invariants
//!
//! 1. A [`GestureSession`] exists iff the state is [`GestureState::Dragging`].
//! 2. Only the pointer that went down can move, lift or cancel the gesture.
//! 3. A grant requires the cumulative delta since touch-down to exceed the
//!    threshold strictly on at least one axis.
//! 4. `transition_id` increases by one for every processed input.

use std::fmt;
use std::time::Duration;

use crate::clamp::clamp_delta;
use crate::event::{PointerEvent, PointerPhase};
use crate::geometry::{BoundsConstraints, Position, Rect};

/// Movement (per axis, in layout units) a press must exceed to become a drag.
pub const DEFAULT_DRAG_THRESHOLD: f32 = 2.0;

/// Hold time after which a press counts as a long press.
pub const DEFAULT_LONG_PRESS_DELAY: Duration = Duration::from_millis(500);

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Data captured when a drag is granted; lives until release or cancel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    pub pointer_id: u32,
    /// Element rectangle at grant. All clamping is relative to this.
    pub start_rect: Rect,
    /// Constraints in force for the whole session.
    pub constraints: BoundsConstraints,
    /// Cumulative pointer delta (since touch-down) at the grant.
    pub grant_delta: Position,
}

impl GestureSession {
    /// Movement since the grant for an event carrying cumulative `delta`.
    #[inline]
    #[must_use]
    pub fn delta_since_grant(&self, delta: Position) -> Position {
        delta - self.grant_delta
    }

    /// `delta_since_grant` limited by the session constraints.
    #[inline]
    #[must_use]
    pub fn clamp(&self, raw: Position) -> Position {
        clamp_delta(raw, &self.start_rect, &self.constraints)
    }
}

/// What the host must supply for a grant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrantSnapshot {
    pub start_rect: Rect,
    pub constraints: BoundsConstraints,
}

/// Lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureState {
    Idle,
    Pressed {
        down: PointerEvent,
        held: Duration,
        long_pressed: bool,
    },
    Dragging {
        session: GestureSession,
    },
}

impl GestureState {
    #[must_use]
    pub const fn phase(&self) -> GesturePhase {
        match self {
            Self::Idle => GesturePhase::Idle,
            Self::Pressed { .. } => GesturePhase::Pressed,
            Self::Dragging { .. } => GesturePhase::Dragging,
        }
    }

    #[must_use]
    pub const fn session(&self) -> Option<&GestureSession> {
        match self {
            Self::Dragging { session } => Some(session),
            _ => None,
        }
    }
}

/// Data-free view of [`GestureState`], for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GesturePhase {
    Idle,
    Pressed,
    Dragging,
}

// ---------------------------------------------------------------------------
// Effects
// ---------------------------------------------------------------------------

/// Why an input was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GestureNoopReason {
    Disabled,
    IdleWithoutPress,
    PointerMismatch,
    ThresholdNotReached,
    SessionAlreadyActive,
}

/// Effect of one lifecycle step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEffect {
    /// Touch-down accepted.
    Pressed { pointer_id: u32 },
    /// The press became a drag.
    DragStarted { session: GestureSession },
    /// Movement during a drag. `raw` is the delta since grant; `clamped`
    /// is what the bounds permit.
    DragMoved {
        session: GestureSession,
        raw: Position,
        clamped: Position,
    },
    /// Pointer lifted after a drag.
    DragReleased {
        session: GestureSession,
        raw: Position,
        clamped: Position,
    },
    /// Pointer lifted without crossing the threshold.
    Tapped { long_pressed: bool },
    /// The press was held past the long-press delay.
    LongPressed { down: PointerEvent },
    /// The platform canceled the gesture.
    Canceled { session: Option<GestureSession> },
    Noop { reason: GestureNoopReason },
}

impl GestureEffect {
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        matches!(self, Self::Noop { .. })
    }
}

/// One machine step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureTransition {
    pub transition_id: u64,
    pub from: GesturePhase,
    pub to: GesturePhase,
    pub effect: GestureEffect,
}

// ---------------------------------------------------------------------------
// Machine
// ---------------------------------------------------------------------------

/// Drag lifecycle machine.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureMachine {
    state: GestureState,
    drag_threshold: f32,
    long_press_delay: Duration,
    disabled: bool,
    transition_counter: u64,
}

impl Default for GestureMachine {
    fn default() -> Self {
        Self {
            state: GestureState::Idle,
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            long_press_delay: DEFAULT_LONG_PRESS_DELAY,
            disabled: false,
            transition_counter: 0,
        }
    }
}

impl GestureMachine {
    /// Construct a machine with an explicit threshold and long-press delay.
    pub fn new(drag_threshold: f32, long_press_delay: Duration) -> Result<Self, GestureMachineError> {
        if !drag_threshold.is_finite() || drag_threshold < 0.0 {
            return Err(GestureMachineError::InvalidDragThreshold {
                threshold: drag_threshold,
            });
        }
        Ok(Self {
            drag_threshold,
            long_press_delay,
            ..Self::default()
        })
    }

    #[must_use]
    pub const fn state(&self) -> GestureState {
        self.state
    }

    #[must_use]
    pub const fn phase(&self) -> GesturePhase {
        self.state.phase()
    }

    #[must_use]
    pub const fn drag_threshold(&self) -> f32 {
        self.drag_threshold
    }

    #[must_use]
    pub const fn long_press_delay(&self) -> Duration {
        self.long_press_delay
    }

    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    #[must_use]
    pub const fn transition_count(&self) -> u64 {
        self.transition_counter
    }

    /// Enable or disable drag recognition.
    ///
    /// Disabling drops a pending press without effects. An active drag is
    /// left to finish.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled && matches!(self.state, GestureState::Pressed { .. }) {
            self.state = GestureState::Idle;
        }
    }

    /// Return to `Idle`, discarding any press or session.
    pub fn reset(&mut self) {
        self.state = GestureState::Idle;
    }

    /// Capture-phase query: would this event grant a drag?
    #[must_use]
    pub fn wants_capture(&self, event: &PointerEvent) -> bool {
        match self.state {
            GestureState::Pressed { down, .. } => {
                !self.disabled
                    && event.phase == PointerPhase::Move
                    && event.pointer_id == down.pointer_id
                    && crossed_drag_threshold(event.delta, self.drag_threshold)
            }
            _ => false,
        }
    }

    /// Apply one pointer event. `snapshot` is consulted only on a grant.
    pub fn handle(
        &mut self,
        event: &PointerEvent,
        snapshot: impl FnOnce() -> GrantSnapshot,
    ) -> GestureTransition {
        let from = self.state.phase();
        let effect = match (self.state, event.phase) {
            (GestureState::Idle, PointerPhase::Down) => {
                if self.disabled {
                    GestureEffect::Noop {
                        reason: GestureNoopReason::Disabled,
                    }
                } else {
                    self.state = GestureState::Pressed {
                        down: *event,
                        held: Duration::ZERO,
                        long_pressed: false,
                    };
                    GestureEffect::Pressed {
                        pointer_id: event.pointer_id,
                    }
                }
            }
            (GestureState::Idle, _) => GestureEffect::Noop {
                reason: GestureNoopReason::IdleWithoutPress,
            },
            (GestureState::Pressed { .. } | GestureState::Dragging { .. }, PointerPhase::Down) => {
                GestureEffect::Noop {
                    reason: GestureNoopReason::SessionAlreadyActive,
                }
            }
            (GestureState::Pressed { down, .. }, _) if down.pointer_id != event.pointer_id => {
                GestureEffect::Noop {
                    reason: GestureNoopReason::PointerMismatch,
                }
            }
            (GestureState::Pressed { .. }, PointerPhase::Move) => {
                if !crossed_drag_threshold(event.delta, self.drag_threshold) {
                    GestureEffect::Noop {
                        reason: GestureNoopReason::ThresholdNotReached,
                    }
                } else if self.disabled {
                    GestureEffect::Noop {
                        reason: GestureNoopReason::Disabled,
                    }
                } else {
                    let GrantSnapshot {
                        start_rect,
                        constraints,
                    } = snapshot();
                    let session = GestureSession {
                        pointer_id: event.pointer_id,
                        start_rect,
                        constraints,
                        grant_delta: event.delta,
                    };
                    self.state = GestureState::Dragging { session };
                    crate::debug!(
                        pointer_id = event.pointer_id,
                        dx = event.delta.x,
                        dy = event.delta.y,
                        "drag granted"
                    );
                    GestureEffect::DragStarted { session }
                }
            }
            (GestureState::Pressed { long_pressed, .. }, PointerPhase::Up) => {
                self.state = GestureState::Idle;
                GestureEffect::Tapped { long_pressed }
            }
            (GestureState::Pressed { .. }, PointerPhase::Cancel) => {
                self.state = GestureState::Idle;
                GestureEffect::Canceled { session: None }
            }
            (GestureState::Dragging { session }, _) if session.pointer_id != event.pointer_id => {
                GestureEffect::Noop {
                    reason: GestureNoopReason::PointerMismatch,
                }
            }
            (GestureState::Dragging { session }, PointerPhase::Move) => {
                let raw = session.delta_since_grant(event.delta);
                let clamped = session.clamp(raw);
                crate::trace!(
                    raw_x = raw.x,
                    raw_y = raw.y,
                    x = clamped.x,
                    y = clamped.y,
                    "drag moved"
                );
                GestureEffect::DragMoved {
                    session,
                    raw,
                    clamped,
                }
            }
            (GestureState::Dragging { session }, PointerPhase::Up) => {
                self.state = GestureState::Idle;
                let raw = session.delta_since_grant(event.delta);
                let clamped = session.clamp(raw);
                crate::debug!(x = clamped.x, y = clamped.y, "drag released");
                GestureEffect::DragReleased {
                    session,
                    raw,
                    clamped,
                }
            }
            (GestureState::Dragging { session }, PointerPhase::Cancel) => {
                self.state = GestureState::Idle;
                crate::debug!(pointer_id = session.pointer_id, "drag canceled");
                GestureEffect::Canceled {
                    session: Some(session),
                }
            }
        };

        self.finish(from, effect)
    }

    /// Advance the long-press timer. Returns a transition only when the long
    /// press fires.
    pub fn advance(&mut self, dt: Duration) -> Option<GestureTransition> {
        let GestureState::Pressed {
            down,
            held,
            long_pressed,
        } = self.state
        else {
            return None;
        };
        let held = held.saturating_add(dt);
        let fire = !long_pressed && held >= self.long_press_delay;
        self.state = GestureState::Pressed {
            down,
            held,
            long_pressed: long_pressed || fire,
        };
        if !fire {
            return None;
        }
        crate::debug!(held_ms = held.as_millis() as u64, "long press");
        Some(self.finish(GesturePhase::Pressed, GestureEffect::LongPressed { down }))
    }

    /// Whether the long-press timer is still waiting to fire.
    #[must_use]
    pub const fn awaiting_long_press(&self) -> bool {
        matches!(
            self.state,
            GestureState::Pressed {
                long_pressed: false,
                ..
            }
        )
    }

    fn finish(&mut self, from: GesturePhase, effect: GestureEffect) -> GestureTransition {
        self.transition_counter = self.transition_counter.saturating_add(1);
        GestureTransition {
            transition_id: self.transition_counter,
            from,
            to: self.state.phase(),
            effect,
        }
    }
}

/// Strictly greater than `threshold` on either axis.
#[inline]
#[must_use]
pub fn crossed_drag_threshold(delta: Position, threshold: f32) -> bool {
    delta.x.abs() > threshold || delta.y.abs() > threshold
}

/// Gesture machine construction errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureMachineError {
    InvalidDragThreshold { threshold: f32 },
}

impl fmt::Display for GestureMachineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDragThreshold { threshold } => {
                write!(f, "drag threshold must be finite and >= 0 (got {threshold})")
            }
        }
    }
}

impl std::error::Error for GestureMachineError {}
