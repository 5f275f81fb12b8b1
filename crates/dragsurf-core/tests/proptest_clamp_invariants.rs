//! Property-based invariant tests for the clamp policy, drag threshold and
//! animated offset.
//!
//! These tests verify invariants that must hold for any finite inputs:
//!
//! 1. With both bounds defined on an axis, the translated rect stays inside.
//! 2. With no bounds, the delta passes through unchanged.
//! 3. A delta already inside the permitted range is untouched.
//! 4. Clamping is idempotent.
//! 5. Movement within the threshold on both axes never grants a drag.
//! 6. Movement beyond the threshold on either axis always grants.
//! 7. Flatten preserves the value and is idempotent.
//! 8. A drag through the surface never leaves the constraint region.
//! 9. Runtime toggles during a drag do not let it leave the region either.

use dragsurf_core::animation::AnimatedOffset;
use dragsurf_core::clamp::clamp_delta;
use dragsurf_core::config::DragConfig;
use dragsurf_core::event::PointerEvent;
use dragsurf_core::geometry::{BoundsConstraints, Position, Rect, Size};
use dragsurf_core::gesture::{
    GestureEffect, GestureMachine, GesturePhase, GrantSnapshot, crossed_drag_threshold,
};
use dragsurf_core::surface::DragSurface;
use proptest::prelude::*;
use std::time::Duration;

// ── Helpers ─────────────────────────────────────────────────────────────

fn coord() -> impl Strategy<Value = f32> {
    (-1000i32..=1000).prop_map(|v| v as f32)
}

fn delta_strategy() -> impl Strategy<Value = Position> {
    (-5000i32..=5000, -5000i32..=5000).prop_map(|(x, y)| Position::new(x as f32, y as f32))
}

/// A region and a start rect that fits inside it.
fn region_and_start() -> impl Strategy<Value = (BoundsConstraints, Rect)> {
    (coord(), coord(), 0i32..=200, 0i32..=200, 0i32..=400, 0i32..=400).prop_flat_map(
        |(min_x, min_y, w, h, extra_x, extra_y)| {
            let (w, h) = (w as f32, h as f32);
            let max_x = min_x + w + extra_x as f32;
            let max_y = min_y + h + extra_y as f32;
            let c = BoundsConstraints::NONE
                .with_min_x(min_x)
                .with_min_y(min_y)
                .with_max_x(max_x)
                .with_max_y(max_y);
            (0i32..=extra_x, 0i32..=extra_y).prop_map(move |(ox, oy)| {
                let left = min_x + ox as f32;
                let top = min_y + oy as f32;
                (c, Rect::new(left, top, left + w, top + h))
            })
        },
    )
}

fn snapshot() -> GrantSnapshot {
    GrantSnapshot {
        start_rect: Rect::new(0.0, 0.0, 36.0, 36.0),
        constraints: BoundsConstraints::NONE,
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Both bounds defined → edges stay inside
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn clamped_rect_stays_in_region((c, start) in region_and_start(), d in delta_strategy()) {
        let out = clamp_delta(d, &start, &c);
        let moved = start.translate(out);
        prop_assert!(
            c.region().contains_rect(&moved),
            "rect left region: start={:?} delta={:?} out={:?} moved={:?}",
            start, d, out, moved
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. No bounds → passthrough
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn unbounded_passthrough(d in delta_strategy(), x in coord(), y in coord()) {
        let start = Rect::from_origin_size(Position::new(x, y), Size::new(36.0, 36.0));
        prop_assert_eq!(clamp_delta(d, &start, &BoundsConstraints::NONE), d);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. In-range delta untouched
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn in_range_delta_untouched((c, start) in region_and_start(), tx in 0.0f32..=1.0, ty in 0.0f32..=1.0) {
        let region = c.region();
        let lower_x = region.left - start.left;
        let upper_x = region.right - start.right;
        let lower_y = region.top - start.top;
        let upper_y = region.bottom - start.bottom;
        let d = Position::new(
            lower_x + (upper_x - lower_x) * tx,
            lower_y + (upper_y - lower_y) * ty,
        );
        let out = clamp_delta(d, &start, &c);
        prop_assert_eq!(out, d);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn clamp_is_idempotent((c, start) in region_and_start(), d in delta_strategy()) {
        let once = clamp_delta(d, &start, &c);
        prop_assert_eq!(clamp_delta(once, &start, &c), once);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5–6. Threshold
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn within_threshold_never_grants(dx in -2.0f32..=2.0, dy in -2.0f32..=2.0) {
        let mut m = GestureMachine::default();
        m.handle(&PointerEvent::down(1, Position::ZERO), snapshot);
        let ev = PointerEvent::moved(1, Position::ZERO, Position::new(dx, dy));
        prop_assert!(!m.wants_capture(&ev));
        let t = m.handle(&ev, snapshot);
        prop_assert!(t.effect.is_noop(), "granted at {:?}", (dx, dy));
    }

    #[test]
    fn beyond_threshold_grants(mag in 2.01f32..=500.0, neg in any::<bool>(), on_x in any::<bool>()) {
        let v = if neg { -mag } else { mag };
        let d = if on_x { Position::new(v, 0.0) } else { Position::new(0.0, v) };
        prop_assert!(crossed_drag_threshold(d, 2.0));
        let mut m = GestureMachine::default();
        m.handle(&PointerEvent::down(1, Position::ZERO), snapshot);
        let t = m.handle(&PointerEvent::moved(1, Position::ZERO, d), snapshot);
        let granted = matches!(t.effect, GestureEffect::DragStarted { .. });
        prop_assert!(granted);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Flatten
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn flatten_preserves_value(b in delta_strategy(), d in delta_strategy()) {
        let split = AnimatedOffset::Split { base: b, delta: d };
        let flat = split.flatten();
        prop_assert_eq!(flat.value(), split.value());
        prop_assert_eq!(flat.delta(), Position::ZERO);
        prop_assert_eq!(flat.flatten(), flat);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. End-to-end: surface respects its region across drags
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn surface_stays_in_region(moves in prop::collection::vec(delta_strategy(), 1..20)) {
        let c = BoundsConstraints::NONE
            .with_min_x(-100.0)
            .with_min_y(-100.0)
            .with_max_x(300.0)
            .with_max_y(300.0);
        let mut s = DragSurface::new(DragConfig::default().with_constraints(c), ());
        let region = c.region();
        for d in moves {
            s.handle_pointer(&PointerEvent::down(1, Position::ZERO));
            s.handle_pointer(&PointerEvent::moved(1, Position::ZERO, Position::new(3.0, 3.0)));
            s.handle_pointer(&PointerEvent::moved(1, Position::ZERO, d));
            prop_assert!(region.contains_rect(&s.current_rect()));
            s.handle_pointer(&PointerEvent::up(1, Position::ZERO, d));
            prop_assert!(region.contains_rect(&s.current_rect()));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 9. End-to-end: runtime toggles mid-drag
// ═════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
enum Op {
    Move(Position),
    Reverse(bool),
    Disabled(bool),
    AnimateTo(Position),
    Advance(u64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => delta_strategy().prop_map(Op::Move),
        1 => any::<bool>().prop_map(Op::Reverse),
        1 => any::<bool>().prop_map(Op::Disabled),
        1 => (-100i32..=264, -100i32..=264)
            .prop_map(|(x, y)| Op::AnimateTo(Position::new(x as f32, y as f32))),
        1 => (0u64..=400).prop_map(Op::Advance),
    ]
}

/// Containment with slack for offsets folded from spring values.
fn inside(region: &Rect, r: &Rect) -> bool {
    const EPS: f32 = 1e-3;
    r.left >= region.left - EPS
        && r.top >= region.top - EPS
        && r.right <= region.right + EPS
        && r.bottom <= region.bottom + EPS
}

proptest! {
    #[test]
    fn toggles_mid_drag_stay_in_region(
        drags in prop::collection::vec(prop::collection::vec(op_strategy(), 0..12), 1..8),
        reverse in any::<bool>(),
    ) {
        let c = BoundsConstraints::NONE
            .with_min_x(-100.0)
            .with_min_y(-100.0)
            .with_max_x(300.0)
            .with_max_y(300.0);
        let cfg = DragConfig::default().with_constraints(c).with_reverse(reverse);
        let mut s = DragSurface::new(cfg, ());
        let region = c.region();
        for ops in drags {
            s.handle_pointer(&PointerEvent::down(1, Position::ZERO));
            s.handle_pointer(&PointerEvent::moved(1, Position::ZERO, Position::new(3.0, 3.0)));
            let mut last = Position::new(3.0, 3.0);
            for op in ops {
                match op {
                    Op::Move(d) => {
                        last = d;
                        s.handle_pointer(&PointerEvent::moved(1, Position::ZERO, d));
                        if s.phase() == GesturePhase::Dragging {
                            let r = s.current_rect();
                            prop_assert!(inside(&region, &r), "move escaped: {:?}", r);
                        }
                    }
                    Op::Reverse(on) => s.set_should_reverse(on),
                    Op::Disabled(on) => s.set_disabled(on),
                    Op::AnimateTo(target) => s.animate_to(Some(target), None),
                    Op::Advance(ms) => {
                        s.advance(Duration::from_millis(ms));
                    }
                }
            }
            let up = s.handle_pointer(&PointerEvent::up(1, Position::ZERO, last));
            if up.is_some_and(|t| matches!(t.effect, GestureEffect::DragReleased { .. })) {
                let r = s.current_rect();
                prop_assert!(inside(&region, &r), "release escaped: {:?}", r);
            }
            s.set_disabled(false);
        }
    }
}
