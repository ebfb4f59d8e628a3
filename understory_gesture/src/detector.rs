// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The gesture detector: configuration plus one [`GestureSession`].

use log::{debug, trace};

use crate::config::{GestureConfig, Thresholds};
use crate::controller::ViewportController;
use crate::error::InvalidDeviceScale;
use crate::event::{TouchEvent, TouchKind};
use crate::intent::GestureIntent;
use crate::session::{Frame, GestureSession};

/// Turns a stream of [`TouchEvent`]s into [`GestureIntent`]s.
///
/// Each call to [`on_touch_event`](Self::on_touch_event) processes one event
/// completely and yields at most one intent. The detector never blocks and
/// holds no timers; callers feed it from their input thread.
///
/// ```
/// use kurbo::{Point, Size};
/// use understory_gesture::{GestureDetector, GestureIntent, TouchEvent};
///
/// let mut detector = GestureDetector::new(160.0).unwrap();
/// let mut viewport = Size::new(800.0, 600.0);
///
/// detector.on_touch_event(&TouchEvent::down(0, Point::new(100.0, 100.0)), &mut viewport);
/// let intent = detector.on_touch_event(&TouchEvent::up(80, Point::new(100.0, 100.0)), &mut viewport);
/// assert_eq!(intent, Some(GestureIntent::Tap { position: Point::new(100.0, 100.0) }));
/// ```
#[derive(Clone, Debug, Default)]
pub struct GestureDetector {
    config: GestureConfig,
    thresholds: Thresholds,
    session: GestureSession,
}

impl GestureDetector {
    /// Creates a detector for a device with `dpi` dots per inch.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDeviceScale`] if `dpi` is not finite or not positive.
    pub fn new(dpi: f64) -> Result<Self, InvalidDeviceScale> {
        Ok(Self::with_thresholds(Thresholds::from_dpi(dpi)?))
    }

    /// Creates a detector using already derived (or hand-tuned) thresholds.
    #[must_use]
    pub fn with_thresholds(thresholds: Thresholds) -> Self {
        Self {
            config: GestureConfig::default(),
            thresholds,
            session: GestureSession::default(),
        }
    }

    /// Current gesture toggles.
    #[must_use]
    pub fn config(&self) -> GestureConfig {
        self.config
    }

    /// Replaces all gesture toggles.
    ///
    /// Two-finger capabilities are derived when a second pointer lands, so a
    /// pinch already in progress keeps the capabilities it started with.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    /// Returns `true` if single-pointer panning is enabled.
    #[must_use]
    pub fn is_move_enabled(&self) -> bool {
        self.config.move_enabled
    }

    /// Enables or disables single-pointer panning and fling.
    pub fn set_move_enabled(&mut self, enabled: bool) {
        self.config.move_enabled = enabled;
    }

    /// Returns `true` if pinch zoom is enabled.
    #[must_use]
    pub fn is_zoom_enabled(&self) -> bool {
        self.config.zoom_enabled
    }

    /// Enables or disables pinch zoom.
    pub fn set_zoom_enabled(&mut self, enabled: bool) {
        self.config.zoom_enabled = enabled;
    }

    /// Returns `true` if two-finger rotation is enabled.
    #[must_use]
    pub fn is_rotate_enabled(&self) -> bool {
        self.config.rotate_enabled
    }

    /// Enables or disables two-finger rotation.
    pub fn set_rotate_enabled(&mut self, enabled: bool) {
        self.config.rotate_enabled = enabled;
    }

    /// Returns `true` if two-finger tilt is enabled.
    #[must_use]
    pub fn is_tilt_enabled(&self) -> bool {
        self.config.tilt_enabled
    }

    /// Enables or disables two-finger tilt.
    pub fn set_tilt_enabled(&mut self, enabled: bool) {
        self.config.tilt_enabled = enabled;
    }

    /// Returns `true` if manipulations pivot on the viewport center.
    #[must_use]
    pub fn is_fix_on_center(&self) -> bool {
        self.config.fix_on_center
    }

    /// Pivots zoom and rotation on the viewport center instead of the gesture.
    pub fn set_fix_on_center(&mut self, fix: bool) {
        self.config.fix_on_center = fix;
    }

    /// Thresholds derived at construction.
    #[must_use]
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// State of the current contact.
    #[must_use]
    pub fn session(&self) -> &GestureSession {
        &self.session
    }

    /// Signals that the platform recognized a double tap for the current
    /// contact.
    ///
    /// Arms drag-zoom: dragging past the slop zooms, releasing without a
    /// drag yields [`GestureIntent::AnimatedZoomIn`]. Returns `false`, and
    /// does nothing, when no contact is active.
    pub fn on_double_tap(&mut self) -> bool {
        self.session.arm_double_tap()
    }

    /// Processes one touch event and returns the intent it produced, if any.
    ///
    /// Events other than [`TouchKind::PointerDown`] are ignored until a
    /// contact has begun, and events failing [`TouchEvent::validate`] are
    /// ignored outright.
    pub fn on_touch_event<C>(
        &mut self,
        event: &TouchEvent,
        viewport: &mut C,
    ) -> Option<GestureIntent>
    where
        C: ViewportController + ?Sized,
    {
        if let Err(err) = event.validate() {
            trace!("ignoring {:?} event at {} ms: {err}", event.kind, event.time);
            return None;
        }

        if event.kind == TouchKind::PointerDown {
            viewport.cancel_animation();
            let position = event.position(0)?;
            self.session.begin(position, event.double_tap);
            debug!("contact began at {position:?}");
            return None;
        }

        if !self.session.is_active() {
            trace!("ignoring {:?} event outside a contact", event.kind);
            return None;
        }

        let frame = Frame {
            config: &self.config,
            thresholds: &self.thresholds,
            viewport: viewport.viewport_size(),
        };

        match event.kind {
            TouchKind::PointerMove => {
                if event.pointer_count() >= 2 {
                    let first = event.position(0)?;
                    let second = event.position(1)?;
                    self.session.move_pair(first, second, &frame)
                } else {
                    let position = event.position(0)?;
                    self.session.move_single(position, event.time, &frame)
                }
            }
            TouchKind::SecondPointerDown => {
                let first = event.position(0)?;
                let second = event.position(1)?;
                self.session.place_second_pointer(first, second, &self.config);
                None
            }
            TouchKind::SecondPointerUp => {
                let remaining = event.position(0)?;
                self.session.lift_second_pointer(remaining);
                None
            }
            TouchKind::PointerUp => {
                let position = event.pointers.first().map(|p| p.position);
                self.session
                    .release(position, event.time, event.double_tap, &frame)
            }
            TouchKind::Cancel => {
                self.session.reset();
                None
            }
            TouchKind::PointerDown => None,
        }
    }

    /// Processes one event and hands the resulting intent, with the event
    /// that produced it, to `listener`.
    ///
    /// `listener` is called at most once. Returns `true` if it was called.
    pub fn dispatch<C, F>(&mut self, event: &TouchEvent, viewport: &mut C, mut listener: F) -> bool
    where
        C: ViewportController + ?Sized,
        F: FnMut(&GestureIntent, &TouchEvent),
    {
        match self.on_touch_event(event, viewport) {
            Some(intent) => {
                listener(&intent, event);
                true
            }
            None => false,
        }
    }
}
