#![forbid(unsafe_code)]

//! The drag surface: gesture machine, bounds tracker, clamp policy,
//! animator and reverse policy behind one host-facing type.
//!
//! # Usage
//!
//! ```
//! use dragsurf_core::config::DragConfig;
//! use dragsurf_core::event::PointerEvent;
//! use dragsurf_core::geometry::{BoundsConstraints, Position};
//! use dragsurf_core::surface::DragSurface;
//!
//! let config = DragConfig::default().with_constraints(BoundsConstraints::NONE.with_max_x(100.0));
//! let mut surface = DragSurface::new(config, ());
//!
//! let origin = Position::ZERO;
//! surface.handle_pointer(&PointerEvent::down(1, origin));
//! surface.handle_pointer(&PointerEvent::moved(1, origin, Position::new(4.0, 0.0)));
//! surface.handle_pointer(&PointerEvent::moved(1, origin, Position::new(84.0, 0.0)));
//! assert_eq!(surface.value(), Position::new(64.0, 0.0));
//! ```
//!
//! # Release
//!
//! With reversal off, release folds the drag into the animator base so the
//! element stays where it was dropped. With reversal on, the animator
//! springs to the reverse target, which also becomes the resting offset the
//! next drag starts from.
//!
//! # Failure Modes
//!
//! After [`DragSurface::teardown`] every input is ignored and logged at
//! `warn`.

use std::time::Duration;

use crate::animation::{ListenerId, PositionAnimator, SettleCallback};
use crate::bounds::{BoundsTracker, LayoutOutcome};
use crate::config::DragConfig;
use crate::event::PointerEvent;
use crate::geometry::{BoundsConstraints, Position, Rect, Size};
use crate::gesture::{
    GestureEffect, GestureMachine, GesturePhase, GestureSession, GestureState, GestureTransition,
    GrantSnapshot,
};
use crate::reverse::ReversePolicy;

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// Geometry passed to drag callbacks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragUpdate {
    /// Pointer movement since the grant.
    pub delta: Position,
    /// `delta` after clamping; this is what the animator received.
    pub clamped: Position,
    /// Element rectangle at the grant.
    pub start_rect: Rect,
    /// Element rectangle after applying `clamped`.
    pub current_rect: Rect,
}

/// Host callbacks. Every method defaults to a no-op.
///
/// Callbacks run synchronously on the thread that fed the event.
pub trait DragHandler {
    /// A drag moved.
    fn on_drag(&mut self, _event: &PointerEvent, _update: &DragUpdate) {}

    /// A drag ended with the pointer lifting.
    fn on_drag_release(&mut self, _event: &PointerEvent, _update: &DragUpdate) {}

    /// A press ended without becoming a drag or a long press.
    fn on_short_press_release(&mut self, _event: &PointerEvent) {}

    /// A press was held past the long-press delay.
    fn on_long_press(&mut self, _event: &PointerEvent) {}

    /// The pointer went down.
    fn on_press_in(&mut self, _event: &PointerEvent) {}

    /// The press ended, either by lifting or by turning into a drag.
    fn on_press_out(&mut self, _event: &PointerEvent) {}

    /// The pointer lifted. `was_dragged` tells drags from taps.
    fn on_release(&mut self, _event: &PointerEvent, _was_dragged: bool) {}
}

impl DragHandler for () {}

// ---------------------------------------------------------------------------
// Debug overlay
// ---------------------------------------------------------------------------

/// Geometry for a debug overlay painter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugOverlay {
    /// Permitted region; undefined sides are infinite.
    pub region: Rect,
    /// Current element rectangle.
    pub current: Rect,
    pub z_index: i32,
}

// ---------------------------------------------------------------------------
// DragSurface
// ---------------------------------------------------------------------------

/// A draggable element.
pub struct DragSurface<H: DragHandler = ()> {
    config: DragConfig,
    tracker: BoundsTracker,
    machine: GestureMachine,
    animator: PositionAnimator,
    reverse: ReversePolicy,
    /// Offset the element rests at when reversal is on.
    rest_offset: Position,
    handler: H,
    torn_down: bool,
}

impl<H: DragHandler> std::fmt::Debug for DragSurface<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragSurface")
            .field("config", &self.config)
            .field("tracker", &self.tracker)
            .field("machine", &self.machine)
            .field("animator", &self.animator)
            .field("reverse", &self.reverse)
            .field("rest_offset", &self.rest_offset)
            .field("torn_down", &self.torn_down)
            .finish_non_exhaustive()
    }
}

impl<H: DragHandler> DragSurface<H> {
    /// Mount a surface with the default reverse policy.
    #[must_use]
    pub fn new(config: DragConfig, handler: H) -> Self {
        Self::with_reverse(config, handler, ReversePolicy::default())
    }

    /// Mount a surface with a custom reverse policy.
    ///
    /// When reversal is enabled from the start, the element springs to the
    /// reverse target right away.
    #[must_use]
    pub fn with_reverse(config: DragConfig, handler: H, reverse: ReversePolicy) -> Self {
        let machine = GestureMachine::new(config.drag_threshold, config.long_press_delay())
            .unwrap_or_else(|_err| {
                crate::warn!(error = %_err, "falling back to default drag threshold");
                GestureMachine::default()
            });
        let mut surface = Self {
            tracker: BoundsTracker::new(config.base, config.default_size),
            machine,
            animator: PositionAnimator::default(),
            reverse,
            rest_offset: Position::ZERO,
            handler,
            torn_down: false,
            config,
        };
        surface.machine.set_disabled(surface.config.disabled);
        if surface.config.should_reverse {
            surface.spring_to_reverse_target();
        }
        surface
    }

    /// Replace the custom reverse function.
    pub fn set_reverse_fn(&mut self, f: impl FnMut() -> Option<Position> + 'static) {
        self.reverse.set_fn(f);
    }

    // -- accessors ----------------------------------------------------------

    #[must_use]
    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    #[must_use]
    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    #[must_use]
    pub fn animator(&self) -> &PositionAnimator {
        &self.animator
    }

    /// Current drag offset.
    #[must_use]
    pub fn value(&self) -> Position {
        self.animator.value()
    }

    #[must_use]
    pub fn rest_offset(&self) -> Position {
        self.rest_offset
    }

    #[must_use]
    pub fn state(&self) -> GestureState {
        self.machine.state()
    }

    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.machine.phase()
    }

    #[must_use]
    pub fn size(&self) -> Size {
        self.tracker.size()
    }

    /// Current on-screen rectangle.
    #[must_use]
    pub fn current_rect(&self) -> Rect {
        self.tracker.rect(self.animator.value())
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    // -- input --------------------------------------------------------------

    /// Capture-phase query for the host dispatcher.
    #[must_use]
    pub fn wants_capture(&self, event: &PointerEvent) -> bool {
        !self.torn_down && self.machine.wants_capture(event)
    }

    /// Feed one pointer event. Returns `None` after teardown.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> Option<GestureTransition> {
        if self.torn_down {
            crate::warn!(pointer_id = event.pointer_id, "pointer event after teardown");
            return None;
        }
        let snapshot = self.grant_snapshot();
        let transition = self.machine.handle(event, || snapshot);
        self.apply(event, transition.effect);
        Some(transition)
    }

    /// Record a layout report.
    pub fn on_layout(&mut self, size: Size) -> LayoutOutcome {
        if self.torn_down {
            crate::warn!("layout after teardown");
            return LayoutOutcome::Rejected;
        }
        self.tracker.on_layout(size)
    }

    /// Drive springs and the long-press timer. Returns whether another frame
    /// is needed.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if self.torn_down {
            return false;
        }
        if let Some(transition) = self.machine.advance(dt)
            && let GestureEffect::LongPressed { down } = transition.effect
        {
            self.handler.on_long_press(&down);
        }
        let animating = self.animator.tick(dt);
        animating || self.machine.awaiting_long_press()
    }

    /// Spring to `target` (origin when `None`) with the animate-to spring.
    ///
    /// The target becomes the resting offset. Anything that writes the
    /// offset afterwards supersedes the spring and drops `on_settled`.
    pub fn animate_to(&mut self, target: Option<Position>, on_settled: Option<SettleCallback>) {
        if self.torn_down {
            crate::warn!("animate_to after teardown");
            return;
        }
        let target = target.unwrap_or(Position::ZERO);
        crate::debug!(x = target.x, y = target.y, "animate_to");
        self.rest_offset = target;
        self.animator
            .spring_to(Some(target), self.config.animate_spring, on_settled);
    }

    // -- runtime configuration ------------------------------------------------

    /// Toggle reversal.
    ///
    /// Turning it on springs to the reverse target now. Turning it off folds
    /// the offset in place; a running spring still finishes. During a drag
    /// the offset is left alone and the release applies the new setting.
    pub fn set_should_reverse(&mut self, should_reverse: bool) {
        if self.torn_down || self.config.should_reverse == should_reverse {
            return;
        }
        self.config.should_reverse = should_reverse;
        if self.machine.phase() == GesturePhase::Dragging {
            return;
        }
        if should_reverse {
            self.spring_to_reverse_target();
        } else {
            self.animator.flatten();
        }
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.config.disabled = disabled;
        self.machine.set_disabled(disabled);
    }

    pub fn set_base(&mut self, base: Position) {
        self.config.base = base;
        self.tracker.set_base(base);
    }

    /// Replace the constraints. An active drag keeps its snapshot.
    pub fn set_constraints(&mut self, constraints: BoundsConstraints) {
        self.config.constraints = constraints;
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.config.debug = debug;
    }

    // -- observation ------------------------------------------------------------

    pub fn subscribe(&mut self, listener: impl FnMut(Position) + 'static) -> ListenerId {
        self.animator.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.animator.unsubscribe(id)
    }

    /// Overlay geometry, when the debug toggle is on.
    #[must_use]
    pub fn debug_overlay(&self) -> Option<DebugOverlay> {
        self.config.debug.then(|| DebugOverlay {
            region: self.config.constraints.region(),
            current: self.current_rect(),
            z_index: self.config.z_index,
        })
    }

    /// Unmount: drop listeners and any transition. Later input is ignored.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        crate::debug!(listeners = self.animator.listener_count(), "teardown");
        self.animator.clear_listeners();
        self.animator.stop();
        self.machine.reset();
        self.torn_down = true;
    }

    // -- internals --------------------------------------------------------------

    fn accumulated_offset(&self) -> Position {
        if self.config.should_reverse {
            self.rest_offset
        } else {
            self.animator.value()
        }
    }

    fn grant_snapshot(&self) -> GrantSnapshot {
        GrantSnapshot {
            start_rect: self.tracker.rect(self.accumulated_offset()),
            constraints: self.config.constraints,
        }
    }

    fn spring_to_reverse_target(&mut self) {
        let target = self.reverse.target_offset();
        self.rest_offset = target;
        self.animator
            .spring_to(Some(target), self.config.release_spring, None);
    }

    fn update_for(&self, session: &GestureSession, delta: Position, clamped: Position) -> DragUpdate {
        DragUpdate {
            delta,
            clamped,
            start_rect: session.start_rect,
            current_rect: self.current_rect(),
        }
    }

    /// Rebase the animator so movement since the grant lands in the delta.
    fn grant(&mut self) {
        let base = self.accumulated_offset();
        self.animator.reset_to(base);
    }

    /// Commit in place, or spring back when reversal is on.
    fn settle(&mut self) {
        if self.config.should_reverse {
            self.spring_to_reverse_target();
        } else {
            self.animator.flatten();
        }
    }

    fn apply(&mut self, event: &PointerEvent, effect: GestureEffect) {
        match effect {
            GestureEffect::Pressed { .. } => self.handler.on_press_in(event),
            GestureEffect::DragStarted { .. } => {
                self.grant();
                self.handler.on_press_out(event);
            }
            GestureEffect::DragMoved {
                session,
                raw,
                clamped,
            } => {
                self.animator.set_instant(clamped);
                let update = self.update_for(&session, raw, clamped);
                self.handler.on_drag(event, &update);
            }
            GestureEffect::DragReleased {
                session,
                raw,
                clamped,
            } => {
                self.animator.set_instant(clamped);
                let update = self.update_for(&session, raw, clamped);
                self.settle();
                self.handler.on_drag_release(event, &update);
                self.handler.on_release(event, true);
            }
            GestureEffect::Tapped { long_pressed } => {
                self.handler.on_press_out(event);
                if !long_pressed {
                    self.handler.on_short_press_release(event);
                }
                self.handler.on_release(event, false);
            }
            GestureEffect::Canceled { session: Some(_) } => self.settle(),
            GestureEffect::Canceled { session: None } => self.handler.on_press_out(event),
            GestureEffect::LongPressed { .. } | GestureEffect::Noop { .. } => {}
        }
    }
}
