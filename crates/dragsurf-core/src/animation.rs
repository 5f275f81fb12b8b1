#![forbid(unsafe_code)]

//! Animatable drag offset with spring transitions.
//!
//! [`PositionAnimator`] holds a two-part [`AnimatedOffset`] (a base plus a
//! delta) and exposes a single observed value, `base + delta`. Writes are
//! either instantaneous ([`PositionAnimator::set_instant`]) or spring-driven
//! ([`PositionAnimator::spring_to`]). Springs are advanced by the host frame
//! clock through [`PositionAnimator::tick`].
//!
//! # Invariants
//!
//! 1. At most one transition is in flight; a new write supersedes it.
//! 2. A transition's settle callback fires exactly once, or never if the
//!    transition is superseded first.
//! 3. [`PositionAnimator::flatten`] never changes the observed value.
//! 4. Listeners are invoked once per change of the observed value.
//!
//! # Failure Modes
//!
//! - A listener that panics unwinds through the write that triggered it;
//!   the animator stays consistent because state is updated before
//!   listeners run.
//! - A spring spec with zero mass integrates to non-finite values. Use
//!   [`SpringSpec::validate`] (or `DragConfig::validate`) to reject it up
//!   front.

use std::fmt;
use std::time::Duration;

use crate::geometry::Position;

/// Fixed integration step for spring physics.
pub const SPRING_STEP: Duration = Duration::from_millis(1);

// ---------------------------------------------------------------------------
// AnimatedOffset
// ---------------------------------------------------------------------------

/// A drag offset, either folded into one value or split into base + delta.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimatedOffset {
    /// A single folded value; equivalent to `Split { base: p, delta: 0 }`.
    Absolute(Position),
    /// Base plus an in-progress delta.
    Split { base: Position, delta: Position },
}

impl AnimatedOffset {
    /// Observed value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> Position {
        match *self {
            Self::Absolute(p) => p,
            Self::Split { base, delta } => base + delta,
        }
    }

    #[inline]
    #[must_use]
    pub fn base(&self) -> Position {
        match *self {
            Self::Absolute(p) => p,
            Self::Split { base, .. } => base,
        }
    }

    #[inline]
    #[must_use]
    pub fn delta(&self) -> Position {
        match *self {
            Self::Absolute(_) => Position::ZERO,
            Self::Split { delta, .. } => delta,
        }
    }

    /// Merge the delta into the base.
    #[inline]
    #[must_use]
    pub fn flatten(self) -> Self {
        Self::Absolute(self.value())
    }

    #[inline]
    #[must_use]
    pub fn with_base(self, base: Position) -> Self {
        Self::Split {
            base,
            delta: self.delta(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_delta(self, delta: Position) -> Self {
        Self::Split {
            base: self.base(),
            delta,
        }
    }
}

impl Default for AnimatedOffset {
    fn default() -> Self {
        Self::Absolute(Position::ZERO)
    }
}

// ---------------------------------------------------------------------------
// SpringSpec
// ---------------------------------------------------------------------------

/// Physical parameters of a damped spring.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpringSpec {
    /// Spring constant `k`. Must be positive.
    pub stiffness: f32,
    /// Damping coefficient `c`. Must be non-negative.
    pub damping: f32,
    /// Mass `m`. Must be positive.
    pub mass: f32,
    /// Distance from target below which the spring may come to rest.
    pub rest_displacement: f32,
    /// Speed below which the spring may come to rest.
    pub rest_speed: f32,
    /// Stop as soon as the target is crossed instead of oscillating.
    pub overshoot_clamping: bool,
}

impl SpringSpec {
    /// Equivalent of an origami spring with tension 40 and friction 7.
    pub const DEFAULT: Self = Self {
        stiffness: 230.2,
        damping: 22.0,
        mass: 1.0,
        rest_displacement: 0.001,
        rest_speed: 0.001,
        overshoot_clamping: false,
    };

    /// Same physics as [`Self::DEFAULT`], resting within one layout unit.
    #[must_use]
    pub const fn responsive() -> Self {
        Self {
            rest_displacement: 1.0,
            rest_speed: 1.0,
            ..Self::DEFAULT
        }
    }

    #[must_use]
    pub const fn with_stiffness(mut self, stiffness: f32) -> Self {
        self.stiffness = stiffness;
        self
    }

    #[must_use]
    pub const fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    #[must_use]
    pub const fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    #[must_use]
    pub const fn with_rest_thresholds(mut self, displacement: f32, speed: f32) -> Self {
        self.rest_displacement = displacement;
        self.rest_speed = speed;
        self
    }

    #[must_use]
    pub const fn with_overshoot_clamping(mut self, clamp: bool) -> Self {
        self.overshoot_clamping = clamp;
        self
    }

    /// Damping ratio `c / (2 * sqrt(k * m))`. Below 1 the spring oscillates.
    #[must_use]
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Check that the parameters describe a spring that can settle.
    pub fn validate(&self) -> Result<(), SpringSpecError> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(SpringSpecError::NonPositiveMass { mass: self.mass });
        }
        if !(self.stiffness.is_finite() && self.stiffness > 0.0) {
            return Err(SpringSpecError::NonPositiveStiffness {
                stiffness: self.stiffness,
            });
        }
        if !(self.damping.is_finite() && self.damping >= 0.0) {
            return Err(SpringSpecError::NegativeDamping {
                damping: self.damping,
            });
        }
        if !(self.rest_displacement.is_finite() && self.rest_displacement >= 0.0)
            || !(self.rest_speed.is_finite() && self.rest_speed >= 0.0)
        {
            return Err(SpringSpecError::NegativeRestThreshold {
                displacement: self.rest_displacement,
                speed: self.rest_speed,
            });
        }
        Ok(())
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Rejected spring parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpringSpecError {
    NonPositiveMass { mass: f32 },
    NonPositiveStiffness { stiffness: f32 },
    NegativeDamping { damping: f32 },
    NegativeRestThreshold { displacement: f32, speed: f32 },
}

impl fmt::Display for SpringSpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveMass { mass } => {
                write!(f, "spring mass must be finite and > 0 (got {mass})")
            }
            Self::NonPositiveStiffness { stiffness } => {
                write!(f, "spring stiffness must be finite and > 0 (got {stiffness})")
            }
            Self::NegativeDamping { damping } => {
                write!(f, "spring damping must be finite and >= 0 (got {damping})")
            }
            Self::NegativeRestThreshold {
                displacement,
                speed,
            } => write!(
                f,
                "spring rest thresholds must be finite and >= 0 \
                 (got displacement={displacement}, speed={speed})"
            ),
        }
    }
}

impl std::error::Error for SpringSpecError {}

// ---------------------------------------------------------------------------
// PositionAnimator
// ---------------------------------------------------------------------------

/// Fired once when a spring transition comes to rest.
pub type SettleCallback = Box<dyn FnOnce()>;

/// Observer of the animator's value.
pub type Listener = Box<dyn FnMut(Position)>;

/// Handle returned by [`PositionAnimator::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

struct Transition {
    /// Absolute destination of the observed value.
    target: Position,
    spec: SpringSpec,
    /// Displacement from target when the transition started; used for
    /// overshoot detection.
    initial_gap: Position,
    on_settled: Option<SettleCallback>,
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("target", &self.target)
            .field("spec", &self.spec)
            .field("initial_gap", &self.initial_gap)
            .field("on_settled", &self.on_settled.is_some())
            .finish()
    }
}

/// The animatable offset of a drag surface.
pub struct PositionAnimator {
    offset: AnimatedOffset,
    velocity: Position,
    transition: Option<Transition>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl fmt::Debug for PositionAnimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PositionAnimator")
            .field("offset", &self.offset)
            .field("velocity", &self.velocity)
            .field("transition", &self.transition)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for PositionAnimator {
    fn default() -> Self {
        Self::new(Position::ZERO)
    }
}

impl PositionAnimator {
    /// Create an animator resting at `initial`.
    #[must_use]
    pub fn new(initial: Position) -> Self {
        Self {
            offset: AnimatedOffset::Absolute(initial),
            velocity: Position::ZERO,
            transition: None,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Observed value (`base + delta`).
    #[inline]
    #[must_use]
    pub fn value(&self) -> Position {
        self.offset.value()
    }

    #[inline]
    #[must_use]
    pub fn base(&self) -> Position {
        self.offset.base()
    }

    #[inline]
    #[must_use]
    pub fn delta(&self) -> Position {
        self.offset.delta()
    }

    #[inline]
    #[must_use]
    pub fn offset(&self) -> AnimatedOffset {
        self.offset
    }

    #[inline]
    #[must_use]
    pub fn velocity(&self) -> Position {
        self.velocity
    }

    /// Whether a spring transition is in flight.
    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Destination of the in-flight transition, if any.
    #[must_use]
    pub fn target(&self) -> Option<Position> {
        self.transition.as_ref().map(|t| t.target)
    }

    /// Write `delta` immediately, superseding any transition.
    pub fn set_instant(&mut self, delta: Position) {
        self.cancel_transition();
        self.velocity = Position::ZERO;
        self.write(self.offset.with_delta(delta));
    }

    /// Jump to `base` with a zero delta in one write, superseding any
    /// transition.
    pub fn reset_to(&mut self, base: Position) {
        self.cancel_transition();
        self.velocity = Position::ZERO;
        self.write(AnimatedOffset::Split {
            base,
            delta: Position::ZERO,
        });
    }

    /// Replace the delta without touching an in-flight transition.
    pub fn set_delta(&mut self, delta: Position) {
        self.write(self.offset.with_delta(delta));
    }

    /// Replace the base. A running spring keeps its absolute target.
    pub fn set_base(&mut self, base: Position) {
        self.write(self.offset.with_base(base));
    }

    /// Fold the delta into the base. The observed value is unchanged, so
    /// listeners are not notified.
    pub fn flatten(&mut self) {
        self.offset = self.offset.flatten();
    }

    /// Stop any transition where it stands, dropping its settle callback.
    pub fn stop(&mut self) {
        self.cancel_transition();
        self.velocity = Position::ZERO;
    }

    /// Start a spring from the current value to `target` (origin when
    /// `None`).
    ///
    /// A transition already in flight is replaced: its velocity carries over
    /// and its settle callback is dropped.
    pub fn spring_to(
        &mut self,
        target: Option<Position>,
        spec: SpringSpec,
        on_settled: Option<SettleCallback>,
    ) {
        let target = target.unwrap_or(Position::ZERO);
        if self.cancel_transition() {
            crate::trace!(vx = self.velocity.x, vy = self.velocity.y, "spring superseded");
        } else {
            self.velocity = Position::ZERO;
        }
        let initial_gap = self.value() - target;
        crate::debug!(
            from_x = self.value().x,
            from_y = self.value().y,
            to_x = target.x,
            to_y = target.y,
            "spring started"
        );
        self.transition = Some(Transition {
            target,
            spec,
            initial_gap,
            on_settled,
        });
    }

    /// Register a value observer.
    pub fn subscribe(&mut self, listener: impl FnMut(Position) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove an observer. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Advance the in-flight spring by `dt`. Returns whether more frames are
    /// needed.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let Some(transition) = self.transition.as_ref() else {
            return false;
        };
        let target = transition.target;
        let spec = transition.spec;
        let gap0 = transition.initial_gap;

        let mut value = self.value();
        let mut velocity = self.velocity;
        let mut remaining = dt;
        let mut settled = false;
        while !remaining.is_zero() {
            let step = remaining.min(SPRING_STEP);
            remaining -= step;
            let h = step.as_secs_f32();
            step_axis(&mut value.x, &mut velocity.x, target.x, &spec, h);
            step_axis(&mut value.y, &mut velocity.y, target.y, &spec, h);
            if axis_at_rest(value.x, velocity.x, target.x, gap0.x, &spec)
                && axis_at_rest(value.y, velocity.y, target.y, gap0.y, &spec)
            {
                settled = true;
                break;
            }
        }

        if settled {
            self.velocity = Position::ZERO;
            let done = self.transition.take();
            self.write(self.offset.with_delta(target - self.offset.base()));
            crate::trace!(x = target.x, y = target.y, "spring settled");
            if let Some(cb) = done.and_then(|t| t.on_settled) {
                cb();
            }
            false
        } else {
            self.velocity = velocity;
            self.write(self.offset.with_delta(value - self.offset.base()));
            true
        }
    }

    fn cancel_transition(&mut self) -> bool {
        self.transition.take().is_some()
    }

    fn write(&mut self, next: AnimatedOffset) {
        let before = self.value();
        self.offset = next;
        let after = self.value();
        if after != before {
            for (_, listener) in &mut self.listeners {
                listener(after);
            }
        }
    }
}

/// One semi-implicit Euler step.
#[inline]
fn step_axis(x: &mut f32, v: &mut f32, target: f32, spec: &SpringSpec, h: f32) {
    let force = -spec.stiffness * (*x - target) - spec.damping * *v;
    *v += force / spec.mass * h;
    *x += *v * h;
}

#[inline]
fn axis_at_rest(x: f32, v: f32, target: f32, initial_gap: f32, spec: &SpringSpec) -> bool {
    let gap = x - target;
    let overshot = spec.overshoot_clamping && initial_gap != 0.0 && gap * initial_gap <= 0.0;
    overshot || (v.abs() <= spec.rest_speed && gap.abs() <= spec.rest_displacement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    const MS_16: Duration = Duration::from_millis(16);

    fn run_until_rest(anim: &mut PositionAnimator) -> usize {
        let mut frames = 0;
        while anim.tick(MS_16) {
            frames += 1;
            assert!(frames < 1000, "spring failed to settle");
        }
        frames
    }

    #[test]
    fn offset_value_and_parts() {
        let a = AnimatedOffset::Absolute(Position::new(3.0, 4.0));
        assert_eq!(a.value(), Position::new(3.0, 4.0));
        assert_eq!(a.base(), Position::new(3.0, 4.0));
        assert_eq!(a.delta(), Position::ZERO);

        let s = AnimatedOffset::Split {
            base: Position::new(1.0, 1.0),
            delta: Position::new(2.0, -1.0),
        };
        assert_eq!(s.value(), Position::new(3.0, 0.0));
    }

    #[test]
    fn flatten_is_idempotent() {
        let s = AnimatedOffset::Split {
            base: Position::new(10.0, 0.0),
            delta: Position::new(0.0, -5.0),
        };
        let once = s.flatten();
        assert_eq!(once, AnimatedOffset::Absolute(Position::new(10.0, -5.0)));
        assert_eq!(once.flatten(), once);
        assert_eq!(once.value(), s.value());
    }

    #[test]
    fn default_spring_constants() {
        let s = SpringSpec::default();
        assert_eq!(s.stiffness, 230.2);
        assert_eq!(s.damping, 22.0);
        assert_eq!(s.mass, 1.0);
        assert_eq!(s.rest_displacement, 0.001);
        assert!(s.damping_ratio() < 1.0);

        let r = SpringSpec::responsive();
        assert_eq!(r.rest_displacement, 1.0);
        assert_eq!(r.rest_speed, 1.0);
        assert_eq!(r.stiffness, s.stiffness);
    }

    #[test]
    fn spring_spec_validation() {
        assert!(SpringSpec::default().validate().is_ok());
        assert!(matches!(
            SpringSpec::default().with_mass(0.0).validate(),
            Err(SpringSpecError::NonPositiveMass { .. })
        ));
        assert!(matches!(
            SpringSpec::default().with_stiffness(-1.0).validate(),
            Err(SpringSpecError::NonPositiveStiffness { .. })
        ));
        assert!(matches!(
            SpringSpec::default().with_damping(f32::NAN).validate(),
            Err(SpringSpecError::NegativeDamping { .. })
        ));
        assert!(matches!(
            SpringSpec::default().with_rest_thresholds(-0.1, 1.0).validate(),
            Err(SpringSpecError::NegativeRestThreshold { .. })
        ));
        assert!(SpringSpec::default().with_damping(0.0).validate().is_ok());
    }

    #[test]
    fn set_instant_writes_delta() {
        let mut a = PositionAnimator::new(Position::new(5.0, 5.0));
        a.set_instant(Position::new(1.0, 2.0));
        assert_eq!(a.base(), Position::new(5.0, 5.0));
        assert_eq!(a.delta(), Position::new(1.0, 2.0));
        assert_eq!(a.value(), Position::new(6.0, 7.0));
    }

    #[test]
    fn flatten_preserves_value() {
        let mut a = PositionAnimator::default();
        a.set_instant(Position::new(10.0, -5.0));
        a.flatten();
        assert_eq!(a.base(), Position::new(10.0, -5.0));
        assert_eq!(a.delta(), Position::ZERO);
        a.flatten();
        assert_eq!(a.value(), Position::new(10.0, -5.0));
    }

    #[test]
    fn tick_without_transition_is_idle() {
        let mut a = PositionAnimator::default();
        assert!(!a.tick(MS_16));
        assert!(!a.is_animating());
    }

    #[test]
    fn spring_reaches_target_and_settles_once() {
        let fired = Rc::new(Cell::new(0));
        let f = Rc::clone(&fired);
        let mut a = PositionAnimator::default();
        a.set_instant(Position::new(100.0, -40.0));
        a.spring_to(
            Some(Position::new(0.0, 0.0)),
            SpringSpec::default(),
            Some(Box::new(move || f.set(f.get() + 1))),
        );
        assert!(a.is_animating());
        let frames = run_until_rest(&mut a);
        assert!(frames > 0);
        assert_eq!(a.value(), Position::ZERO);
        assert_eq!(a.velocity(), Position::ZERO);
        assert_eq!(fired.get(), 1);
        assert!(!a.tick(MS_16));
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn spring_target_defaults_to_origin() {
        let mut a = PositionAnimator::new(Position::new(30.0, 30.0));
        a.spring_to(None, SpringSpec::responsive(), None);
        assert_eq!(a.target(), Some(Position::ZERO));
        run_until_rest(&mut a);
        assert_eq!(a.value(), Position::ZERO);
    }

    #[test]
    fn spring_target_is_absolute_across_base_changes() {
        let mut a = PositionAnimator::default();
        a.set_base(Position::new(50.0, 0.0));
        a.spring_to(Some(Position::new(20.0, 0.0)), SpringSpec::responsive(), None);
        a.tick(MS_16);
        a.set_base(Position::new(10.0, 0.0));
        run_until_rest(&mut a);
        assert_eq!(a.value(), Position::new(20.0, 0.0));
        assert_eq!(a.base(), Position::new(10.0, 0.0));
    }

    #[test]
    fn set_instant_supersedes_spring_and_drops_callback() {
        let fired = Rc::new(Cell::new(false));
        let f = Rc::clone(&fired);
        let mut a = PositionAnimator::new(Position::new(100.0, 0.0));
        a.spring_to(None, SpringSpec::default(), Some(Box::new(move || f.set(true))));
        a.tick(MS_16);
        a.set_instant(Position::new(3.0, 3.0));
        assert!(!a.is_animating());
        assert_eq!(a.velocity(), Position::ZERO);
        assert!(!a.tick(MS_16));
        assert!(!fired.get());
    }

    #[test]
    fn superseding_spring_inherits_velocity() {
        let first = Rc::new(Cell::new(false));
        let second = Rc::new(Cell::new(false));
        let (f1, f2) = (Rc::clone(&first), Rc::clone(&second));

        let mut a = PositionAnimator::new(Position::new(200.0, 0.0));
        a.spring_to(None, SpringSpec::default(), Some(Box::new(move || f1.set(true))));
        a.tick(MS_16);
        a.tick(MS_16);
        let v = a.velocity();
        assert!(v.x < 0.0);

        a.spring_to(
            Some(Position::new(300.0, 0.0)),
            SpringSpec::default(),
            Some(Box::new(move || f2.set(true))),
        );
        assert_eq!(a.velocity(), v);
        run_until_rest(&mut a);
        assert!(!first.get());
        assert!(second.get());
        assert_eq!(a.value(), Position::new(300.0, 0.0));
    }

    #[test]
    fn fresh_spring_starts_from_rest() {
        let mut a = PositionAnimator::new(Position::new(10.0, 0.0));
        a.spring_to(None, SpringSpec::default(), None);
        assert_eq!(a.velocity(), Position::ZERO);
    }

    #[test]
    fn overshoot_clamping_stops_at_target() {
        let spec = SpringSpec::default()
            .with_damping(2.0)
            .with_overshoot_clamping(true);
        let mut a = PositionAnimator::new(Position::new(100.0, 0.0));
        a.spring_to(None, spec, None);
        let mut min_seen = f32::MAX;
        while a.tick(MS_16) {
            min_seen = min_seen.min(a.value().x);
        }
        assert!(min_seen >= 0.0);
        assert_eq!(a.value(), Position::ZERO);
    }

    #[test]
    fn responsive_spring_settles_sooner() {
        let mut precise = PositionAnimator::new(Position::new(100.0, 0.0));
        precise.spring_to(None, SpringSpec::default(), None);
        let mut loose = PositionAnimator::new(Position::new(100.0, 0.0));
        loose.spring_to(None, SpringSpec::responsive(), None);
        assert!(run_until_rest(&mut loose) < run_until_rest(&mut precise));
    }

    #[test]
    fn listeners_observe_value_changes() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        let mut a = PositionAnimator::default();
        let id = a.subscribe(move |p| s.borrow_mut().push(p));

        a.set_instant(Position::new(1.0, 0.0));
        a.set_instant(Position::new(1.0, 0.0));
        a.flatten();
        a.set_base(Position::new(4.0, 0.0));
        assert_eq!(
            *seen.borrow(),
            vec![Position::new(1.0, 0.0), Position::new(4.0, 0.0)]
        );

        assert!(a.unsubscribe(id));
        assert!(!a.unsubscribe(id));
        a.set_instant(Position::new(9.0, 9.0));
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn multiple_listeners_and_clear() {
        let count = Rc::new(Cell::new(0));
        let mut a = PositionAnimator::default();
        for _ in 0..3 {
            let c = Rc::clone(&count);
            a.subscribe(move |_| c.set(c.get() + 1));
        }
        assert_eq!(a.listener_count(), 3);
        a.set_delta(Position::new(2.0, 2.0));
        assert_eq!(count.get(), 3);
        a.clear_listeners();
        a.set_delta(Position::new(0.0, 0.0));
        assert_eq!(count.get(), 3);
    }

    #[test]
    fn listeners_see_final_spring_value() {
        let last = Rc::new(Cell::new(Position::new(-1.0, -1.0)));
        let l = Rc::clone(&last);
        let mut a = PositionAnimator::new(Position::new(50.0, 50.0));
        a.subscribe(move |p| l.set(p));
        a.spring_to(None, SpringSpec::responsive(), None);
        run_until_rest(&mut a);
        assert_eq!(last.get(), Position::ZERO);
    }

    #[test]
    fn stop_freezes_in_place() {
        let mut a = PositionAnimator::new(Position::new(50.0, 0.0));
        a.spring_to(None, SpringSpec::default(), None);
        a.tick(MS_16);
        let mid = a.value();
        a.stop();
        assert!(!a.tick(MS_16));
        assert_eq!(a.value(), mid);
    }
}
