// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Point;
use understory_gesture::{Axis, VelocityTracker};

/// A tracker that has seen `samples` movements of varying speed, 8 ms apart.
fn primed_tracker(samples: u64) -> VelocityTracker {
    let mut tracker = VelocityTracker::new();
    tracker.start(Point::ZERO, 0);
    let mut x = 0.0;
    for i in 1..=samples {
        x += (i % 7) as f64 + 1.0;
        tracker.update(Point::new(x, x * 0.5), i * 8);
    }
    tracker
}

fn bench_velocity(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_gesture_velocity");

    for &samples in &[4_u64, 32, 256] {
        group.bench_function(format!("update(n={samples})"), |b| {
            b.iter_batched(
                VelocityTracker::new,
                |mut tracker| {
                    tracker.start(Point::ZERO, 0);
                    for i in 1..=samples {
                        tracker.update(Point::new(i as f64, 0.0), i * 8);
                    }
                    black_box(tracker);
                },
                BatchSize::SmallInput,
            );
        });

        let tracker = primed_tracker(samples);
        group.bench_function(format!("velocity(n={samples})"), |b| {
            b.iter(|| black_box(tracker.velocity()));
        });
        group.bench_function(format!("velocity_along_x(n={samples})"), |b| {
            b.iter(|| black_box(tracker.velocity_along(Axis::X)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_velocity);
criterion_main!(benches);
