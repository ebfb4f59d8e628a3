// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Vec2};

/// Zoom factor of an animated double-tap zoom-in.
pub const ZOOM_IN_FACTOR: f64 = 2.0;

/// Duration of an animated double-tap zoom-in, in milliseconds.
pub const ZOOM_IN_DURATION_MS: u64 = 300;

/// An animation the viewport wants played.
///
/// [`Viewport2D`](crate::Viewport2D) records these instead of playing them;
/// the host takes the request and drives the view over time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewAnimation {
    /// Inertial pan continuing a released drag.
    Fling {
        /// Initial velocity in view pixels per second.
        velocity: Vec2,
        /// Travel limits relative to the current pan.
        bounds: Rect,
    },
    /// Zoom toward `anchor` over `duration_ms`.
    Zoom {
        /// Fixed point of the zoom, in view coordinates.
        anchor: Point,
        /// Total zoom factor at the end of the animation.
        factor: f64,
        /// Length of the animation.
        duration_ms: u64,
    },
}

impl ViewAnimation {
    /// The standard double-tap zoom-in about `anchor`.
    #[must_use]
    pub fn zoom_in(anchor: Point) -> Self {
        Self::Zoom {
            anchor,
            factor: ZOOM_IN_FACTOR,
            duration_ms: ZOOM_IN_DURATION_MS,
        }
    }
}
