// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A detector driving a viewport.

use kurbo::{Point, Rect, Vec2};
use understory_gesture::{GestureDetector, GestureIntent, TouchEvent};
use understory_view2d::{ViewAnimation, Viewport2D};

fn setup() -> (GestureDetector, Viewport2D) {
    (
        GestureDetector::new(63.5).unwrap(),
        Viewport2D::new(Rect::new(0.0, 0.0, 400.0, 400.0)),
    )
}

fn run(
    detector: &mut GestureDetector,
    view: &mut Viewport2D,
    events: &[TouchEvent],
) -> Vec<GestureIntent> {
    let mut intents = Vec::new();
    for event in events {
        let mut produced = None;
        detector.dispatch(event, view, |intent, _| produced = Some(*intent));
        if let Some(intent) = produced {
            view.apply(&intent);
            intents.push(intent);
        }
    }
    intents
}

#[test]
fn pinch_keeps_the_world_under_the_fingers_centroid() {
    let (mut detector, mut view) = setup();
    let centroid = Point::new(100.0, 300.0);
    let world_before = view.view_to_world_point(centroid);

    let mut events = vec![
        TouchEvent::down(0, Point::new(50.0, 300.0)),
        TouchEvent::second_down(5, Point::new(50.0, 300.0), Point::new(150.0, 300.0)),
    ];
    for (i, half) in [60.0, 70.0, 80.0, 100.0].into_iter().enumerate() {
        let t = 10 * (i as u64 + 1);
        events.push(TouchEvent::moved2(
            t,
            Point::new(100.0 - half, 300.0),
            Point::new(100.0 + half, 300.0),
        ));
    }

    let mut zoomed = 0;
    for event in &events {
        if let Some(intent) = detector.on_touch_event(event, &mut view) {
            view.apply(&intent);
            zoomed += 1;
        }
    }

    assert_eq!(zoomed, 4);
    // 120 px became 200 px after the scaling entry frame.
    assert!((view.zoom() - 200.0 / 120.0).abs() < 1e-9);
    let world_after = view.view_to_world_point(centroid);
    assert!((world_after - world_before).hypot() < 1e-9);
}

#[test]
fn release_after_pan_requests_fling_and_next_touch_cancels_it() {
    let (mut detector, mut view) = setup();
    let events = [
        TouchEvent::down(0, Point::new(200.0, 200.0)),
        TouchEvent::moved(10, Point::new(210.0, 200.0)),
        TouchEvent::moved(20, Point::new(230.0, 200.0)),
        TouchEvent::moved(120, Point::new(260.0, 200.0)),
        TouchEvent::up(130, Point::new(270.0, 200.0)),
    ];
    let intents = run(&mut detector, &mut view, &events);

    assert!(matches!(intents.last(), Some(GestureIntent::Fling { .. })));
    assert_eq!(view.pan(), Vec2::new(60.0, 0.0));
    match view.pending_animation() {
        Some(ViewAnimation::Fling { velocity, .. }) => assert!(velocity.x > 0.0),
        other => panic!("expected a pending fling, got {other:?}"),
    }

    detector.on_touch_event(&TouchEvent::down(500, Point::new(10.0, 10.0)), &mut view);
    assert!(view.pending_animation().is_none());
}

#[test]
fn double_tap_requests_zoom_at_tap_point() {
    let (mut detector, mut view) = setup();
    let events = [
        TouchEvent::down(0, Point::new(300.0, 100.0)),
        TouchEvent::up(60, Point::new(300.0, 100.0)).with_double_tap(),
    ];
    run(&mut detector, &mut view, &events);

    assert_eq!(
        view.take_animation(),
        Some(ViewAnimation::zoom_in(Point::new(300.0, 100.0)))
    );
    assert_eq!(view.zoom(), 1.0);
}

#[test]
fn fix_on_center_zooms_about_view_center() {
    let (mut detector, mut view) = setup();
    detector.set_fix_on_center(true);
    let center = view.view_rect().center();
    let world_center = view.view_to_world_point(center);

    let events = [
        TouchEvent::down(0, Point::new(20.0, 20.0)),
        TouchEvent::second_down(5, Point::new(20.0, 20.0), Point::new(120.0, 20.0)),
        TouchEvent::moved2(10, Point::new(10.0, 20.0), Point::new(130.0, 20.0)),
        TouchEvent::moved2(20, Point::new(0.0, 20.0), Point::new(150.0, 20.0)),
    ];
    run(&mut detector, &mut view, &events);

    assert!((view.zoom() - 150.0 / 120.0).abs() < 1e-9);
    assert!((view.view_to_world_point(center) - world_center).hypot() < 1e-9);
}

#[test]
fn tilt_gesture_tilts_the_view() {
    let (mut detector, mut view) = setup();
    let events = [
        TouchEvent::down(0, Point::new(150.0, 200.0)),
        TouchEvent::second_down(5, Point::new(150.0, 200.0), Point::new(250.0, 200.0)),
        TouchEvent::moved2(10, Point::new(150.0, 215.0), Point::new(250.0, 215.0)),
        TouchEvent::moved2(20, Point::new(150.0, 240.0), Point::new(250.0, 240.0)),
    ];
    let intents = run(&mut detector, &mut view, &events);

    assert!(intents.iter().all(|i| matches!(i, GestureIntent::Tilt { .. })));
    // 40 px of vertical travel at 5 px per unit.
    assert!((view.tilt() - 8.0).abs() < 1e-9);
    assert_eq!(view.zoom(), 1.0);
}
