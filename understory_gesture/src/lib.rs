// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Gesture: multi-touch gesture disambiguation for 2D viewports.
//!
//! This crate turns a stream of raw pointer events into a small set of
//! mutually exclusive viewport manipulations: pan, pinch zoom, rotation,
//! tilt, tap, double-tap zoom, and inertial fling. The hard part is the
//! two-finger case, where the same motion could be read as a pinch, a twist,
//! or a vertical tilt; the detector picks one using distance and angle
//! thresholds scaled to the device's resolution.
//!
//! It does **not** render, animate, or detect double taps itself. Callers:
//! - Feed [`TouchEvent`]s into a [`GestureDetector`] from their input thread.
//! - Provide a [`ViewportController`] so the detector can read the viewport
//!   size and stop running animations when a new contact begins.
//! - Apply the returned [`GestureIntent`]s to their own view state (see
//!   `understory_view2d` for a reference viewport).
//! - Report platform double taps through [`TouchEvent::double_tap`] or
//!   [`GestureDetector::on_double_tap`].
//!
//! ## Usage
//!
//! 1) Build a detector with [`GestureDetector::new`] and the device DPI.
//! 2) Toggle gestures with the `set_*_enabled` methods as needed.
//! 3) Call [`GestureDetector::on_touch_event`] for each event and apply the
//!    intent it returns.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use understory_gesture::{GestureDetector, GestureIntent, TouchEvent};
//!
//! let mut detector = GestureDetector::new(160.0).unwrap();
//! let mut viewport = Size::new(800.0, 600.0);
//!
//! // A two-finger pinch: 300 px apart, then 200 px, then 150 px.
//! let a = Point::new(250.0, 300.0);
//! detector.on_touch_event(&TouchEvent::down(0, a), &mut viewport);
//! detector.on_touch_event(&TouchEvent::second_down(10, a, Point::new(550.0, 300.0)), &mut viewport);
//!
//! let start = detector.on_touch_event(
//!     &TouchEvent::moved2(20, Point::new(300.0, 300.0), Point::new(500.0, 300.0)),
//!     &mut viewport,
//! );
//! // Scaling was entered; the entry frame reports a neutral factor.
//! assert_eq!(start.and_then(|i| i.scale_factor()), Some(1.0));
//!
//! let step = detector.on_touch_event(
//!     &TouchEvent::moved2(30, Point::new(325.0, 300.0), Point::new(475.0, 300.0)),
//!     &mut viewport,
//! );
//! assert!(matches!(step, Some(GestureIntent::Zoom { factor, .. }) if (factor - 0.75).abs() < 1e-9));
//! ```
//!
//! ## Design notes
//!
//! - Processing is synchronous and infallible: each event yields zero or one
//!   intent. Malformed events and events outside a contact are ignored.
//! - Two-finger capabilities are fixed when the second pointer lands, so
//!   toggling a gesture mid-pinch applies from the next pinch onward.
//! - Thresholds are physical lengths (millimeters) converted to pixels once,
//!   at construction.
//! - Velocity is estimated from a bounded history; fling playback belongs to
//!   the viewport.
//!
//! This crate is `no_std`.

#![no_std]

mod config;
mod controller;
mod detector;
mod error;
mod event;
mod intent;
mod ring;
mod session;
mod velocity;

pub use config::{GestureConfig, Thresholds};
pub use controller::ViewportController;
pub use detector::GestureDetector;
pub use error::{InvalidDeviceScale, MalformedEvent};
pub use event::{PointerId, PointerSample, TouchEvent, TouchKind};
pub use intent::GestureIntent;
pub use ring::SampleRing;
pub use session::{Capabilities, GestureSession, Mode};
pub use velocity::{Axis, VELOCITY_HISTORY, VELOCITY_WINDOW_MS, VelocityTracker};
