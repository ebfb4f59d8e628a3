// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Vec2};

/// A viewport manipulation recognized from touch input.
///
/// Pivots are in viewport pixels measured from the viewport center, so the
/// origin is the center itself. With
/// [`GestureConfig::fix_on_center`](crate::GestureConfig::fix_on_center) set,
/// every pivot is the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureIntent {
    /// Pan the viewport by `delta` pixels.
    Move {
        /// Displacement since the previous frame.
        delta: Vec2,
    },
    /// Scale the viewport by `factor` about `pivot`.
    Zoom {
        /// Relative scale for this frame; `1.0` leaves the scale unchanged.
        factor: f64,
        /// Anchor of the scale.
        pivot: Point,
    },
    /// Rotate the viewport by `radians` about `pivot`.
    Rotate {
        /// Rotation for this frame.
        radians: f64,
        /// Anchor of the rotation.
        pivot: Point,
    },
    /// Scale and rotate together about `pivot`.
    ///
    /// Reported instead of [`GestureIntent::Rotate`] when a rotating pinch
    /// also changes finger separation on the same frame.
    Pinch {
        /// Relative scale for this frame.
        factor: f64,
        /// Rotation for this frame.
        radians: f64,
        /// Anchor of both.
        pivot: Point,
    },
    /// Tilt the viewport by `delta` units.
    Tilt {
        /// Tilt change for this frame.
        delta: f64,
    },
    /// A release that neither panned nor zoomed, at `position` in raw viewport pixels.
    Tap {
        /// Where the pointer was released.
        position: Point,
    },
    /// Animate a zoom-in step anchored at `pivot` (a completed double tap).
    AnimatedZoomIn {
        /// Anchor of the zoom.
        pivot: Point,
    },
    /// Continue a pan inertially.
    Fling {
        /// Release velocity in pixels per second.
        velocity: Vec2,
        /// Suggested bounds for the inertial travel, centered on the origin.
        bounds: Rect,
    },
}

impl GestureIntent {
    /// The pivot of a zoom, rotate, pinch, or animated zoom; `None` otherwise.
    #[must_use]
    pub fn pivot(&self) -> Option<Point> {
        match *self {
            Self::Zoom { pivot, .. }
            | Self::Rotate { pivot, .. }
            | Self::Pinch { pivot, .. }
            | Self::AnimatedZoomIn { pivot } => Some(pivot),
            Self::Move { .. } | Self::Tilt { .. } | Self::Tap { .. } | Self::Fling { .. } => None,
        }
    }

    /// Scale factor carried by a zoom or pinch; `None` otherwise.
    #[must_use]
    pub fn scale_factor(&self) -> Option<f64> {
        match *self {
            Self::Zoom { factor, .. } | Self::Pinch { factor, .. } => Some(factor),
            _ => None,
        }
    }

    /// Rotation carried by a rotate or pinch; `None` otherwise.
    #[must_use]
    pub fn rotation(&self) -> Option<f64> {
        match *self {
            Self::Rotate { radians, .. } | Self::Pinch { radians, .. } => Some(radians),
            _ => None,
        }
    }
}
