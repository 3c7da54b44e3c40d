use candlewick::interaction::{
    CursorState, DragState, EventKind, InputEvent, PointerEvent, ScrollMode, WheelEvent,
};

#[test]
fn drag_reports_deltas_only_while_armed() {
    let mut drag = DragState::default();
    assert_eq!(drag.advance(10.0, 10.0), None);

    drag.arm(10.0, 10.0);
    assert_eq!(drag.advance(15.0, 8.0), Some((5.0, -2.0)));
    assert_eq!(drag.advance(15.0, 8.0), Some((0.0, 0.0)));

    drag.disarm();
    assert_eq!(drag.advance(20.0, 20.0), None);
}

#[test]
fn arming_always_selects_pan_mode() {
    // Zoom-drag slots exist but no input path arms them.
    let mut drag = DragState::default();
    drag.mode = ScrollMode::ZoomX;
    drag.arm(0.0, 0.0);
    assert_eq!(drag.mode, ScrollMode::Pan);
}

#[test]
fn cursor_tracks_pointer_presence() {
    let mut cursor = CursorState::default();
    assert!(!cursor.visible);

    cursor.on_pointer_move(PointerEvent::new(12.0, 34.0, 0));
    assert!(cursor.visible);
    assert_eq!((cursor.x, cursor.y), (12.0, 34.0));

    cursor.on_pointer_leave();
    assert!(!cursor.visible);
}

#[test]
fn events_expose_their_kind() {
    let cases = [
        (
            InputEvent::PointerMove(PointerEvent::new(0.0, 0.0, 0)),
            EventKind::PointerMove,
        ),
        (
            InputEvent::PointerDown(PointerEvent::new(0.0, 0.0, 1)),
            EventKind::PointerDown,
        ),
        (
            InputEvent::PointerUp(PointerEvent::new(0.0, 0.0, 0)),
            EventKind::PointerUp,
        ),
        (InputEvent::PointerLeave, EventKind::PointerLeave),
        (
            InputEvent::Wheel(WheelEvent::new(1.0, -1.0)),
            EventKind::Wheel,
        ),
    ];
    for (event, kind) in cases {
        assert_eq!(event.kind(), kind);
    }
}
