// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Velocity tracking for fling gestures.
//!
//! [`VelocityTracker`] keeps the last [`VELOCITY_HISTORY`] pointer movements
//! of a pan and turns the ones inside a [`VELOCITY_WINDOW_MS`] window into a
//! velocity in pixels per second.
//!
//! ## Usage
//!
//! 1) Call [`VelocityTracker::start`] when a pan begins.
//! 2) Call [`VelocityTracker::update`] for every subsequent pointer position.
//! 3) Read [`VelocityTracker::velocity`] when the pointer is released.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_gesture::VelocityTracker;
//!
//! let mut tracker = VelocityTracker::new();
//! tracker.start(Point::new(0.0, 0.0), 0);
//! tracker.update(Point::new(10.0, 0.0), 10);
//!
//! // 10 px in 10 ms.
//! let v = tracker.velocity();
//! assert_eq!(v.x, 1000.0);
//! assert_eq!(v.y, 0.0);
//! ```
//!
//! ## Weighting
//!
//! Walking from the newest movement backward, each movement is weighted by
//! its own duration divided by the total duration accumulated so far
//! (itself included). The newest movement therefore counts in full, and
//! older ones contribute progressively less. Fling tuning depends on this
//! exact curve.

use kurbo::{Point, Vec2};
use log::trace;

use crate::ring::SampleRing;

/// Number of movements retained by a [`VelocityTracker`].
pub const VELOCITY_HISTORY: usize = 32;

/// Time window, in milliseconds, that contributes to a velocity estimate.
///
/// The newest movement always contributes, even when it alone is longer.
pub const VELOCITY_WINDOW_MS: u64 = 200;

/// Axis selector for [`VelocityTracker::velocity_along`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}

impl Axis {
    fn component(self, v: Vec2) -> f64 {
        match self {
            Self::X => v.x,
            Self::Y => v.y,
        }
    }
}

/// One recorded movement: displacement and the time it took.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Movement {
    delta: Vec2,
    elapsed_ms: u64,
}

/// Estimates pointer velocity from a bounded history of movements.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    last_position: Point,
    last_time: u64,
    history: SampleRing<Movement, VELOCITY_HISTORY>,
}

impl VelocityTracker {
    /// Creates a tracker with no history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards all history and takes `position` at `time` as the reference.
    pub fn start(&mut self, position: Point, time: u64) {
        self.history.clear();
        self.last_position = position;
        self.last_time = time;
    }

    /// Records a movement to `position` at `time`.
    ///
    /// Returns `false` and records nothing when `time` does not advance past
    /// the previous sample; a zero-duration movement carries no velocity.
    pub fn update(&mut self, position: Point, time: u64) -> bool {
        if time <= self.last_time {
            trace!(
                "dropping velocity sample at {time} ms (previous at {} ms)",
                self.last_time
            );
            return false;
        }
        self.history.push(Movement {
            delta: position - self.last_position,
            elapsed_ms: time - self.last_time,
        });
        self.last_position = position;
        self.last_time = time;
        true
    }

    /// Number of movements currently retained.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.history.len()
    }

    /// Velocity along one axis, in pixels per second.
    ///
    /// Returns `0.0` when no movement has been recorded.
    #[must_use]
    pub fn velocity_along(&self, axis: Axis) -> f64 {
        let window = VELOCITY_WINDOW_MS as f64;
        let mut duration = 0.0;
        let mut amount = 0.0;

        for (i, movement) in self.history.iter().enumerate() {
            let elapsed = movement.elapsed_ms as f64;
            if i > 0 && duration + elapsed > window {
                break;
            }
            duration += elapsed;
            amount += axis.component(movement.delta) * (elapsed / duration);
        }

        if duration <= 0.0 {
            return 0.0;
        }
        amount * 1000.0 / duration
    }

    /// Velocity on both axes, in pixels per second.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.velocity_along(Axis::X), self.velocity_along(Axis::Y))
    }
}
