//! Integration tests: session-level behavior through the public API.
//!
//! Exercises tool selection, strokes, instruments and history together.

use kurbo::{Point, Vec2};
use rulerset_core::{
    DrawingSession, DrawingState, InputEvent, SessionConfig, SetSquareVariant, SnapReason, ToolKind,
};

fn unsnapped() -> DrawingSession {
    let mut config = SessionConfig::default();
    config.snap.enabled = false;
    DrawingSession::new(config)
}

fn stroke(session: &mut DrawingSession, points: &[(f64, f64)]) {
    let mut iter = points.iter().map(|&(x, y)| Point::new(x, y));
    if let Some(first) = iter.next() {
        session.pointer_down(first);
    }
    for p in iter {
        session.pointer_move(p);
    }
    session.pointer_up();
}

/// Shape geometry without the randomly generated ids.
fn geometry_of(state: &DrawingState) -> Vec<Vec<Point>> {
    state.shapes.iter().map(|s| s.vertices().to_vec()).collect()
}

// ─── Undo / redo round trip ─────────────────────────────────────────────

#[test]
fn undo_all_then_redo_all_round_trips() {
    let mut session = unsnapped();
    let initial = session.state().clone();

    // Each step is one logical operation that records exactly one snapshot.
    let steps: Vec<Box<dyn Fn(&mut DrawingSession)>> = vec![
        Box::new(|s: &mut DrawingSession| stroke(s, &[(0.0, 0.0), (50.0, 10.0), (90.0, 40.0)])),
        Box::new(|s: &mut DrawingSession| s.select_tool(ToolKind::Ruler)),
        Box::new(|s: &mut DrawingSession| {
            s.pointer_down(Point::new(400.0, 400.0));
            s.pointer_move(Point::new(300.0, 250.0));
            s.pointer_up();
        }),
        Box::new(|s: &mut DrawingSession| {
            s.begin_adjustment();
            s.set_ruler_length(120.0);
            s.rotate_ruler(60.0);
        }),
        Box::new(|s: &mut DrawingSession| s.select_tool(ToolKind::SetSquare)),
        Box::new(|s: &mut DrawingSession| {
            s.begin_adjustment();
            s.set_set_square_variant(SetSquareVariant::Deg30_60);
        }),
        Box::new(|s: &mut DrawingSession| {
            s.calibrate(400.0, 5.0);
        }),
        Box::new(|s: &mut DrawingSession| s.select_tool(ToolKind::Pen)),
        Box::new(|s: &mut DrawingSession| {
            s.transform_start();
            s.transform_update(Vec2::new(20.0, -10.0), 1.5, 0.0);
            s.transform_end();
        }),
        Box::new(|s: &mut DrawingSession| stroke(s, &[(10.0, 10.0), (10.0, 80.0)])),
    ];

    for step in &steps {
        step(&mut session);
    }
    let after = session.state().clone();
    assert_eq!(session.history().undo_len(), steps.len());

    for _ in 0..steps.len() {
        assert!(session.undo());
    }
    assert_eq!(session.state(), &initial);
    assert!(!session.undo());

    for _ in 0..steps.len() {
        assert!(session.redo());
    }
    assert_eq!(session.state(), &after);
    assert!(!session.redo());
}

#[test]
fn new_operation_after_undo_clears_redo() {
    let mut session = unsnapped();
    stroke(&mut session, &[(0.0, 0.0), (10.0, 0.0)]);
    session.undo();
    assert!(session.can_redo());

    session.select_tool(ToolKind::Compass);
    assert!(!session.can_redo());
    assert!(!session.redo());
}

#[test]
fn history_keeps_only_capacity_snapshots() {
    let mut session = unsnapped();
    let capacity = session.history().capacity();
    for i in 0..capacity + 5 {
        let x = i as f64 * 10.0;
        stroke(&mut session, &[(x, 0.0), (x, 50.0)]);
    }
    assert_eq!(session.history().undo_len(), capacity);

    let mut undone = 0;
    while session.undo() {
        undone += 1;
    }
    assert_eq!(undone, capacity);
    // The five oldest strokes could not be undone
    assert_eq!(session.shapes().len(), 5);
}

#[test]
fn cancelled_drag_leaves_history_untouched() {
    let mut session = DrawingSession::new(SessionConfig {
        history_capacity: 4,
        ..SessionConfig::default()
    });
    session.handle_event(InputEvent::LongPress);
    for i in 0..5 {
        let x = i as f64 * 10.0;
        stroke(&mut session, &[(x, 0.0), (x, 50.0)]);
    }
    session.undo();
    let undo: Vec<DrawingState> = session.history().undo_snapshots().cloned().collect();
    let redo_len = session.history().redo_len();

    let gestures = [
        vec![
            InputEvent::PointerDown {
                position: Point::new(200.0, 200.0),
            },
            InputEvent::PointerMove {
                position: Point::new(260.0, 240.0),
            },
            InputEvent::PointerCancel,
        ],
        vec![
            InputEvent::TransformStart,
            InputEvent::Transform {
                pan: Vec2::new(15.0, 0.0),
                zoom: 1.5,
                rotation: 0.0,
            },
            InputEvent::PointerCancel,
        ],
    ];
    for gesture in gestures {
        session.handle_events(gesture);
        let after: Vec<DrawingState> = session.history().undo_snapshots().cloned().collect();
        assert_eq!(after, undo);
        assert_eq!(session.history().redo_len(), redo_len);
        assert_eq!(session.shapes().len(), 4);
    }
    assert!(session.redo());
    assert_eq!(session.shapes().len(), 5);
}

// ─── Stroke commit threshold ────────────────────────────────────────────

#[test]
fn tap_without_moves_commits_nothing() {
    let mut session = unsnapped();
    stroke(&mut session, &[(25.0, 25.0)]);
    assert!(session.shapes().is_empty());
    assert!(session.state().stroke.is_empty());
}

#[test]
fn two_or_more_points_commit_one_polyline_in_order() {
    let mut session = unsnapped();
    stroke(&mut session, &[(1.0, 1.0), (2.0, 3.0), (5.0, 8.0), (13.0, 21.0)]);

    assert_eq!(session.shapes().len(), 1);
    assert_eq!(
        session.shapes()[0].vertices(),
        &[
            Point::new(1.0, 1.0),
            Point::new(2.0, 3.0),
            Point::new(5.0, 8.0),
            Point::new(13.0, 21.0)
        ]
    );
}

#[test]
fn committed_polylines_get_distinct_ids() {
    let mut session = unsnapped();
    stroke(&mut session, &[(0.0, 0.0), (10.0, 0.0)]);
    stroke(&mut session, &[(0.0, 10.0), (10.0, 10.0)]);
    let shapes = session.shapes();
    assert_ne!(shapes[0].id(), shapes[1].id());
}

// ─── Determinism ────────────────────────────────────────────────────────

#[test]
fn replaying_events_is_deterministic() {
    let events = vec![
        InputEvent::PointerDown {
            position: Point::new(12.0, 14.0),
        },
        InputEvent::PointerMove {
            position: Point::new(70.0, 17.0),
        },
        InputEvent::PointerMove {
            position: Point::new(120.0, 66.0),
        },
        InputEvent::PointerUp,
        InputEvent::SelectTool {
            tool: ToolKind::Protractor,
        },
        InputEvent::TransformStart,
        InputEvent::Transform {
            pan: Vec2::new(5.0, 5.0),
            zoom: 1.0,
            rotation: 10.0,
        },
        InputEvent::TransformEnd,
        InputEvent::SelectTool { tool: ToolKind::Pen },
        InputEvent::PointerDown {
            position: Point::new(121.0, 64.0),
        },
        InputEvent::PointerMove {
            position: Point::new(300.0, 70.0),
        },
        InputEvent::PointerUp,
    ];

    let run = || {
        let mut session = DrawingSession::default();
        session.handle_events(events.clone());
        session
    };
    let a = run();
    let b = run();

    assert_eq!(geometry_of(a.state()), geometry_of(b.state()));
    assert_eq!(a.state().protractor, b.state().protractor);
    assert_eq!(a.last_snap(), b.last_snap());
}

// ─── Snapping inside the session ────────────────────────────────────────

#[test]
fn stroke_end_snaps_to_existing_vertex() {
    let mut session = DrawingSession::default();
    let spacing = session.config().snap.grid_spacing_px();
    // Start on a grid node so the first point stays put
    stroke(&mut session, &[(spacing, spacing), (spacing * 4.0, spacing)]);
    let end = session.shapes()[0].vertices()[1];
    assert!((end.x - spacing * 4.0).abs() < 1e-9);

    session.pointer_down(Point::new(end.x + 3.0, end.y + 14.0));
    assert_eq!(session.state().stroke[0], end);
    assert_eq!(session.last_snap().unwrap().reason, SnapReason::Point);
}

#[test]
fn pen_follows_ruler_direction() {
    let mut config = SessionConfig::default();
    config.snap.grid_spacing_mm = 0.0;
    let mut session = DrawingSession::new(config);

    session.select_tool(ToolKind::Ruler);
    session.select_tool(ToolKind::Pen);
    session.pointer_down(Point::new(100.0, 100.0));
    session.pointer_move(Point::new(200.0, 104.0));
    session.pointer_up();

    let vertices = session.shapes()[0].vertices();
    let end = vertices[1];
    let expected_len = (100.0f64 * 100.0 + 4.0 * 4.0).sqrt();
    assert!((end.y - 100.0).abs() < 1e-9, "expected horizontal, got {end:?}");
    assert!((end.x - (100.0 + expected_len)).abs() < 1e-9);
}

#[test]
fn snapping_off_keeps_raw_points() {
    let mut session = DrawingSession::default();
    session.handle_event(InputEvent::LongPress);
    stroke(&mut session, &[(1.3, 2.7), (33.1, 29.9)]);
    assert_eq!(
        session.shapes()[0].vertices(),
        &[Point::new(1.3, 2.7), Point::new(33.1, 29.9)]
    );
}
