// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture replay.
//!
//! Feed scripted touch streams through `understory_gesture` into an
//! `understory_view2d` viewport and print what each stream did to the view.
//!
//! Run:
//! - `cargo run -p understory_demos --example gesture_replay`
//! - `RUST_LOG=debug cargo run -p understory_demos --example gesture_replay`
//!   to also see the detector's mode transitions.

use kurbo::{Point, Rect, Vec2};
use log::info;
use understory_gesture::{GestureDetector, TouchEvent};
use understory_view2d::Viewport2D;

const DPI: f64 = 160.0;

fn pan() -> Vec<TouchEvent> {
    let mut events = vec![TouchEvent::down(0, Point::new(200.0, 300.0))];
    for i in 1..=12_u64 {
        let x = 200.0 + 18.0 * i as f64;
        events.push(TouchEvent::moved(i * 16, Point::new(x, 300.0)));
    }
    events.push(TouchEvent::up(13 * 16, Point::new(416.0, 300.0)));
    events
}

fn pinch_and_twist() -> Vec<TouchEvent> {
    let center = Point::new(400.0, 300.0);
    let at = |half: f64, theta: f64| {
        let offset = Vec2::new(half * theta.cos(), half * theta.sin());
        (center + offset, center - offset)
    };
    let (a, b) = at(80.0, 0.0);
    let mut events = vec![TouchEvent::down(0, a), TouchEvent::second_down(10, a, b)];
    // Spread first, then keep twisting until rotation is picked up.
    for i in 1..=20_u64 {
        let f = i as f64;
        let (a, b) = at(80.0 + 6.0 * f.min(8.0), 0.04 * f);
        events.push(TouchEvent::moved2(10 + 16 * i, a, b));
    }
    let (a, _) = at(128.0, 0.8);
    events.push(TouchEvent::second_up(400, a));
    events.push(TouchEvent::up(420, a));
    events
}

fn tilt() -> Vec<TouchEvent> {
    let (a, b) = (Point::new(300.0, 300.0), Point::new(500.0, 300.0));
    let mut events = vec![TouchEvent::down(0, a), TouchEvent::second_down(10, a, b)];
    for i in 1..=10_u64 {
        let dy = 8.0 * i as f64;
        events.push(TouchEvent::moved2(
            10 + 16 * i,
            a + Vec2::new(0.0, dy),
            b + Vec2::new(0.0, dy),
        ));
    }
    events.push(TouchEvent::second_up(200, a));
    events.push(TouchEvent::up(210, a));
    events
}

fn double_tap_drag() -> Vec<TouchEvent> {
    let start = Point::new(400.0, 300.0);
    let mut events = vec![TouchEvent::down(0, start).with_double_tap()];
    for i in 1..=10_u64 {
        events.push(TouchEvent::moved(
            i * 16,
            start + Vec2::new(0.0, 10.0 * i as f64),
        ));
    }
    events.push(TouchEvent::up(176, start + Vec2::new(0.0, 100.0)));
    events
}

fn double_tap() -> Vec<TouchEvent> {
    let at = Point::new(600.0, 150.0);
    vec![
        TouchEvent::down(0, at),
        TouchEvent::up(70, at).with_double_tap(),
    ]
}

fn replay(name: &str, events: &[TouchEvent]) {
    let mut detector = match GestureDetector::new(DPI) {
        Ok(detector) => detector,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };
    let mut view = Viewport2D::new(Rect::new(0.0, 0.0, 800.0, 600.0));

    let mut produced = 0;
    for event in events {
        if let Some(intent) = detector.on_touch_event(event, &mut view) {
            info!("{name}: {:?} -> {intent:?}", event.kind);
            view.apply(&intent);
            produced += 1;
        }
    }

    let info = view.debug_info();
    println!(
        "{name:>16}: {produced:>2} intents | pan ({:>7.1}, {:>7.1}) zoom {:>5.3} rotation {:>6.3} tilt {:>5.2} | {}",
        info.pan.x,
        info.pan.y,
        info.zoom,
        info.rotation,
        info.tilt,
        match info.animation {
            Some(animation) => format!("pending {animation:?}"),
            None => "no animation".to_string(),
        }
    );
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== Understory gesture replay ===");
    replay("pan", &pan());
    replay("pinch and twist", &pinch_and_twist());
    replay("tilt", &tilt());
    replay("double tap drag", &double_tap_drag());
    replay("double tap", &double_tap());
}
