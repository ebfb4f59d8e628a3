// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory View 2D: a gesture-driven 2D viewport.
//!
//! This crate provides a small, headless model of a world‑space view whose
//! extents are expressed in device pixels. It focuses on:
//! - Camera state: pan, uniform zoom with limits, rotation, and tilt.
//! - Coordinate conversion between world and view/device (pixel) space.
//! - Applying [`GestureIntent`](understory_gesture::GestureIntent)s produced
//!   by `understory_gesture`, and acting as its
//!   [`ViewportController`](understory_gesture::ViewportController).
//!
//! It does **not** render or animate. Callers are expected to:
//! - Draw their own content through [`Viewport2D`]'s transforms.
//! - Take pending [`ViewAnimation`] requests (fling, animated zoom-in) and
//!   play them over time with their own frame clock.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_gesture::{GestureDetector, TouchEvent};
//! use understory_view2d::Viewport2D;
//!
//! let mut view = Viewport2D::new(Rect::new(0.0, 0.0, 800.0, 600.0));
//! let mut detector = GestureDetector::new(160.0).unwrap();
//!
//! let events = [
//!     TouchEvent::down(0, Point::new(400.0, 300.0)),
//!     TouchEvent::moved(16, Point::new(430.0, 300.0)),
//!     TouchEvent::moved(32, Point::new(460.0, 300.0)),
//! ];
//! for event in &events {
//!     if let Some(intent) = detector.on_touch_event(event, &mut view) {
//!         view.apply(&intent);
//!     }
//! }
//!
//! // The world origin followed the finger 60 px to the right.
//! assert_eq!(view.world_to_view_point(Point::ZERO), Point::new(60.0, 0.0));
//! ```
//!
//! ## Design notes
//!
//! - Gesture pivots are relative to the view rect center; [`Viewport2D::apply`]
//!   turns them into view-space anchors that stay fixed under zoom and
//!   rotation.
//! - Tilt is tracked in degrees for perspective renderers and has no effect on
//!   the 2D conversions.
//! - Starting a new touch contact cancels any pending animation through the
//!   controller seam.
//!
//! This crate is `no_std`.

#![no_std]

mod animation;
mod viewport2d;

pub use animation::{ViewAnimation, ZOOM_IN_DURATION_MS, ZOOM_IN_FACTOR};
pub use viewport2d::{DEFAULT_MAX_TILT, Viewport2D, Viewport2DDebugInfo};
