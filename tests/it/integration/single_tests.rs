//! Single-contact controller driven through host dispatch.

use crate::helpers::{Fixture, touches};
use unipointer::types::{ContactId, DeltaMode, EventKind, Gesture, TouchId};

fn down(id: ContactId, x: f64, y: f64) -> Gesture {
    Gesture::SingleDown {
        id,
        x,
        y,
        switching: false,
    }
}

// ============================================================================
// Mouse
// ============================================================================

#[test]
fn test_mouse_down_reports_adjusted_position() {
    let fx = Fixture::single();
    fx.mouse(EventKind::MouseDown, 12.0, 23.0);
    assert_eq!(fx.recorder.take(), vec![down(ContactId::Mouse, 1012.0, 2023.0)]);
}

#[test]
fn test_secondary_button_ignored() {
    let fx = Fixture::single();
    fx.mouse_button(EventKind::MouseDown, 12.0, 23.0, 2);
    assert!(fx.recorder.is_empty());
    assert!(fx.controller.active_contacts().is_empty());
}

#[test]
fn test_mouse_move_ignored_unless_down() {
    let fx = Fixture::single();
    fx.mouse(EventKind::MouseMove, 1.0, 2.0);
    assert_eq!(
        fx.recorder.count(|g| matches!(g, Gesture::SingleMove { .. })),
        0
    );
}

#[test]
fn test_mouse_move_while_down() {
    let fx = Fixture::single();
    fx.mouse(EventKind::MouseDown, 0.0, 0.0);
    fx.recorder.take();

    fx.mouse(EventKind::MouseMove, 1.0, 2.0);
    assert_eq!(
        fx.recorder.take(),
        vec![Gesture::SingleMove {
            id: ContactId::Mouse,
            x: 1001.0,
            y: 2002.0,
        }]
    );
}

#[test]
fn test_mouse_up_ignored_unless_down() {
    let fx = Fixture::single();
    fx.mouse(EventKind::MouseUp, 0.0, 0.0);
    assert!(fx.recorder.is_empty());
}

#[test]
fn test_mouse_down_then_up() {
    let fx = Fixture::single();
    fx.mouse(EventKind::MouseDown, 0.0, 0.0);
    fx.mouse(EventKind::MouseUp, 0.0, 0.0);
    assert_eq!(
        fx.recorder.take(),
        vec![
            down(ContactId::Mouse, 1000.0, 2000.0),
            Gesture::SingleUp {
                id: ContactId::Mouse,
                switching: false,
            },
        ]
    );
}

#[test]
fn test_mouse_up_dispatched_outside_start() {
    let fx = Fixture::single();
    fx.mouse(EventKind::MouseDown, 0.0, 0.0);
    fx.recorder.take();

    let up = unipointer::InputEvent::mouse(EventKind::MouseUp, 0.0, 0.0, 0);
    fx.root.dispatch(&up).unwrap();
    assert_eq!(fx.recorder.count(|g| matches!(g, Gesture::SingleUp { .. })), 1);
}

// ============================================================================
// Hover and leave
// ============================================================================

#[test]
fn test_hover_while_idle() {
    let fx = Fixture::single();
    fx.mouse(EventKind::MouseMove, 12.0, 23.0);
    assert_eq!(fx.recorder.take(), vec![Gesture::Hover { x: 1012.0, y: 2023.0 }]);
}

#[test]
fn test_no_hover_while_down() {
    let fx = Fixture::single();
    fx.mouse(EventKind::MouseDown, 0.0, 0.0);
    fx.mouse(EventKind::MouseMove, 123.0, 234.0);
    assert_eq!(fx.recorder.count(|g| matches!(g, Gesture::Hover { .. })), 0);
    assert_eq!(fx.recorder.count(|g| matches!(g, Gesture::SingleMove { .. })), 1);
}

#[test]
fn test_hover_resumes_after_up() {
    let fx = Fixture::single();
    fx.mouse(EventKind::MouseDown, 0.0, 0.0);
    fx.mouse(EventKind::MouseUp, 0.0, 0.0);
    fx.recorder.take();

    fx.mouse(EventKind::MouseMove, 5.0, 5.0);
    assert_eq!(fx.recorder.take(), vec![Gesture::Hover { x: 1005.0, y: 2005.0 }]);
}

#[test]
fn test_leave() {
    let fx = Fixture::single();
    fx.mouse(EventKind::MouseLeave, 12.0, 23.0);
    assert_eq!(fx.recorder.take(), vec![Gesture::Leave { x: 1012.0, y: 2023.0 }]);
}

#[test]
fn test_leave_fires_while_down() {
    let fx = Fixture::single();
    fx.mouse(EventKind::MouseDown, 0.0, 0.0);
    fx.mouse(EventKind::MouseLeave, 0.0, 0.0);
    assert_eq!(fx.recorder.count(|g| matches!(g, Gesture::Leave { .. })), 1);
}

// ============================================================================
// Touch
// ============================================================================

#[test]
fn test_touch_down() {
    let fx = Fixture::single();
    fx.touch(EventKind::TouchStart, vec![], touches(&[(123, 12.0, 23.0)]));
    assert_eq!(
        fx.recorder.take(),
        vec![down(ContactId::Touch(TouchId(123)), 1012.0, 2023.0)]
    );
}

#[test]
fn test_touch_start_without_changed_touches_ignored() {
    let fx = Fixture::single();
    fx.recorder.set_suppress(true);
    let event = fx.touch(EventKind::TouchStart, touches(&[(123, 12.0, 23.0)]), vec![]);
    assert!(fx.recorder.is_empty());
    assert!(!event.default_prevented());
    assert!(fx.controller.active_contacts().is_empty());
    assert_eq!(fx.listener_count(), 5);
}

#[test]
fn test_touch_start_repeating_tracked_touch_ignored() {
    let fx = Fixture::single();
    fx.touch(EventKind::TouchStart, vec![], touches(&[(123, 12.0, 23.0)]));
    fx.recorder.take();

    fx.touch(
        EventKind::TouchStart,
        touches(&[(123, 12.0, 23.0)]),
        touches(&[(123, 12.0, 23.0)]),
    );
    assert!(fx.recorder.is_empty());
    assert_eq!(
        fx.controller.active_contacts(),
        vec![ContactId::Touch(TouchId(123))]
    );
}

#[test]
fn test_second_touch_down_ignored() {
    let fx = Fixture::single();
    fx.touch(EventKind::TouchStart, vec![], touches(&[(123, 12.0, 23.0)]));
    fx.touch(EventKind::TouchStart, vec![], touches(&[(124, 12.0, 23.0)]));
    assert_eq!(fx.recorder.count(|g| matches!(g, Gesture::SingleDown { .. })), 1);
    assert_eq!(
        fx.controller.active_contacts(),
        vec![ContactId::Touch(TouchId(123))]
    );
}

#[test]
fn test_two_touches_in_one_event_tracks_first() {
    let fx = Fixture::single();
    fx.touch(
        EventKind::TouchStart,
        vec![],
        touches(&[(1, 0.0, 0.0), (2, 0.0, 0.0)]),
    );
    assert_eq!(fx.recorder.take().len(), 1);
    assert_eq!(fx.controller.active_contacts(), vec![ContactId::Touch(TouchId(1))]);
}

#[test]
fn test_touch_move_ignored_unless_started() {
    let fx = Fixture::single();
    fx.touch(EventKind::TouchMove, vec![], touches(&[(123, 12.0, 23.0)]));
    assert!(fx.recorder.is_empty());
}

#[test]
fn test_touch_move_ignored_for_other_id() {
    let fx = Fixture::single();
    fx.touch(EventKind::TouchStart, vec![], touches(&[(123, 12.0, 23.0)]));
    fx.recorder.take();
    fx.touch(EventKind::TouchMove, vec![], touches(&[(124, 12.0, 23.0)]));
    assert!(fx.recorder.is_empty());
}

#[test]
fn test_touch_move() {
    let fx = Fixture::single();
    fx.touch(EventKind::TouchStart, vec![], touches(&[(123, 12.0, 23.0)]));
    fx.recorder.take();
    fx.touch(EventKind::TouchMove, vec![], touches(&[(123, 12.0, 23.0)]));
    assert_eq!(
        fx.recorder.take(),
        vec![Gesture::SingleMove {
            id: ContactId::Touch(TouchId(123)),
            x: 1012.0,
            y: 2023.0,
        }]
    );
}

#[test]
fn test_touch_end_and_cancel() {
    for kind in [EventKind::TouchEnd, EventKind::TouchCancel] {
        let fx = Fixture::single();

        fx.touch(kind, vec![], touches(&[(123, 12.0, 23.0)]));
        assert!(fx.recorder.is_empty(), "{kind} before start");

        fx.touch(EventKind::TouchStart, vec![], touches(&[(123, 12.0, 23.0)]));
        fx.recorder.take();

        fx.touch(kind, vec![], touches(&[(124, 12.0, 23.0)]));
        assert!(fx.recorder.is_empty(), "{kind} for another id");

        fx.touch(kind, vec![], touches(&[(123, 12.0, 23.0)]));
        assert_eq!(
            fx.recorder.take(),
            vec![Gesture::SingleUp {
                id: ContactId::Touch(TouchId(123)),
                switching: false,
            }],
            "{kind}"
        );
        assert!(fx.controller.active_contacts().is_empty());
    }
}

#[test]
fn test_mouse_and_touch_are_independent() {
    let fx = Fixture::single();
    fx.mouse(EventKind::MouseDown, 0.0, 0.0);
    fx.touch(EventKind::TouchStart, vec![], touches(&[(5, 0.0, 0.0)]));
    assert_eq!(
        fx.controller.active_contacts(),
        vec![ContactId::Mouse, ContactId::Touch(TouchId(5))]
    );

    fx.touch(EventKind::TouchEnd, vec![], touches(&[(5, 0.0, 0.0)]));
    assert_eq!(fx.controller.active_contacts(), vec![ContactId::Mouse]);
}

// ============================================================================
// Wheel and suppression
// ============================================================================

#[test]
fn test_wheel() {
    let fx = Fixture::single();
    fx.wheel(1.0, 2.0, 3.0, DeltaMode::Pixel);
    assert_eq!(
        fx.recorder.take(),
        vec![Gesture::Wheel {
            dx: 1.0,
            dy: 2.0,
            dz: 3.0,
            x: 1012.0,
            y: 2023.0,
        }]
    );
}

#[test]
fn test_callback_result_prevents_default() {
    let fx = Fixture::single();
    let event = fx.mouse(EventKind::MouseDown, 0.0, 0.0);
    assert!(!event.default_prevented());

    fx.recorder.set_suppress(true);
    let event = fx.mouse(EventKind::MouseMove, 0.0, 0.0);
    assert!(event.default_prevented());
}

#[test]
fn test_ignored_event_never_prevents_default() {
    let fx = Fixture::single();
    fx.recorder.set_suppress(true);
    let event = fx.mouse(EventKind::MouseUp, 0.0, 0.0);
    assert!(!event.default_prevented());
}
