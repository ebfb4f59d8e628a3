// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Size, Vec2};
use understory_gesture::{GestureDetector, TouchEvent};
use understory_view2d::Viewport2D;

/// One-finger drag of `frames` moves at 60 Hz.
fn pan_stream(frames: u64) -> Vec<TouchEvent> {
    let mut events = vec![TouchEvent::down(0, Point::new(100.0, 100.0))];
    for i in 1..=frames {
        let f = i as f64;
        events.push(TouchEvent::moved(
            i * 16,
            Point::new(100.0 + 6.0 * f, 100.0 + 2.0 * f),
        ));
    }
    let last = events.last().map_or(Point::ZERO, |e| e.pointers[0].position);
    events.push(TouchEvent::up(frames * 16 + 16, last));
    events
}

/// Two-finger pinch that slowly twists, so it zooms and then rotates.
fn pinch_stream(frames: u64) -> Vec<TouchEvent> {
    let center = Point::new(400.0, 300.0);
    let at = |half: f64, theta: f64| {
        let offset = Vec2::new(half * theta.cos(), half * theta.sin());
        (center + offset, center - offset)
    };
    let (a, b) = at(100.0, 0.0);
    let mut events = vec![TouchEvent::down(0, a), TouchEvent::second_down(8, a, b)];
    for i in 1..=frames {
        let f = i as f64;
        let (a, b) = at(100.0 + 3.0 * f, 0.02 * f);
        events.push(TouchEvent::moved2(8 + i * 16, a, b));
    }
    events.push(TouchEvent::second_up(frames * 16 + 24, a));
    events.push(TouchEvent::up(frames * 16 + 40, a));
    events
}

fn replay(detector: &mut GestureDetector, viewport: &mut Size, events: &[TouchEvent]) -> usize {
    events
        .iter()
        .filter_map(|event| detector.on_touch_event(event, viewport))
        .count()
}

fn bench_gesture(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_gesture_detector");

    for &frames in &[16_u64, 128] {
        let pan = pan_stream(frames);
        let pinch = pinch_stream(frames);

        group.bench_function(format!("pan(frames={frames})"), |b| {
            let mut detector = GestureDetector::new(160.0).unwrap();
            let mut viewport = Size::new(800.0, 600.0);
            b.iter(|| black_box(replay(&mut detector, &mut viewport, &pan)));
        });

        group.bench_function(format!("pinch(frames={frames})"), |b| {
            let mut detector = GestureDetector::new(160.0).unwrap();
            let mut viewport = Size::new(800.0, 600.0);
            b.iter(|| black_box(replay(&mut detector, &mut viewport, &pinch)));
        });

        group.bench_function(format!("pinch_into_view2d(frames={frames})"), |b| {
            let mut detector = GestureDetector::new(160.0).unwrap();
            b.iter(|| {
                let mut view = Viewport2D::new(Rect::new(0.0, 0.0, 800.0, 600.0));
                for event in &pinch {
                    if let Some(intent) = detector.on_touch_event(event, &mut view) {
                        view.apply(&intent);
                    }
                }
                black_box(view.zoom())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_gesture);
criterion_main!(benches);
