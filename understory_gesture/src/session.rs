// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-contact gesture state and its transitions.
//!
//! A [`GestureSession`] lives from the first pointer down to the final up or
//! cancel. Each transition reads the session, a [`Frame`] of configuration,
//! and the event's positions, mutates the session, and returns at most one
//! [`GestureIntent`].
//!
//! ## Two-finger arbitration
//!
//! While two pointers are down the session is in one of
//! [`Mode::TwoFingerEvaluating`], [`Mode::Scaling`], [`Mode::Rotating`],
//! [`Mode::ScalingRotating`], or [`Mode::Tilting`]. Which modes remain
//! reachable is tracked by [`Capabilities`], derived from the configuration
//! when the second pointer lands and only narrowed afterward:
//!
//! - Entering tilt removes scale and rotate.
//! - Entering rotate removes tilt.
//! - Entering scale removes rotate and tilt; rotation can come back only by
//!   turning past the higher re-entry threshold while rotation is enabled.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Size};
use log::debug;

use crate::config::{GestureConfig, Thresholds};
use crate::intent::GestureIntent;
use crate::velocity::VelocityTracker;

/// Angles this close to a threshold count as reaching it.
const ANGLE_TOLERANCE: f64 = 1e-9;

/// Scale factors this close to one are reported as pure rotation.
const UNIT_SCALE_TOLERANCE: f64 = 1e-9;

bitflags::bitflags! {
    /// Two-finger modes still reachable in the current pinch.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// Pinch zoom may start.
        const SCALE = 1 << 0;
        /// Rotation may start.
        const ROTATE = 1 << 1;
        /// Tilt may start.
        const TILT = 1 << 2;
    }
}

impl Capabilities {
    /// Capabilities granted by `config` when a second pointer goes down.
    #[must_use]
    pub fn from_config(config: &GestureConfig) -> Self {
        let mut caps = Self::empty();
        caps.set(Self::SCALE, config.zoom_enabled);
        caps.set(Self::ROTATE, config.rotate_enabled);
        caps.set(Self::TILT, config.tilt_enabled);
        caps
    }
}

/// The driving gesture mode of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// No contact.
    #[default]
    Idle,
    /// One pointer down; motion has stayed within the slop.
    Pressed,
    /// One pointer panning.
    Panning,
    /// A double tap was recognized; waiting to see whether a drag follows.
    DoubleTapArmed,
    /// Dragging after a double tap zooms.
    DoubleTapDragZoom,
    /// Two pointers down; no gesture chosen yet.
    TwoFingerEvaluating,
    /// Pinch zoom.
    Scaling,
    /// Two-finger rotation (finger separation still scales).
    Rotating,
    /// Pinch zoom that picked up rotation mid-gesture.
    ScalingRotating,
    /// Two-finger tilt.
    Tilting,
}

impl Mode {
    /// Returns `true` for the modes that need two pointers.
    #[must_use]
    pub fn is_two_finger(self) -> bool {
        matches!(
            self,
            Self::TwoFingerEvaluating
                | Self::Scaling
                | Self::Rotating
                | Self::ScalingRotating
                | Self::Tilting
        )
    }

    /// Returns `true` while pinch zoom is active.
    #[must_use]
    pub fn is_scaling(self) -> bool {
        matches!(self, Self::Scaling | Self::ScalingRotating)
    }

    /// Returns `true` while rotation is active.
    #[must_use]
    pub fn is_rotating(self) -> bool {
        matches!(self, Self::Rotating | Self::ScalingRotating)
    }

    /// Returns `true` while tilt is active.
    #[must_use]
    pub fn is_tilting(self) -> bool {
        self == Self::Tilting
    }
}

/// Everything a transition reads besides the session and the event.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Frame<'a> {
    pub(crate) config: &'a GestureConfig,
    pub(crate) thresholds: &'a Thresholds,
    pub(crate) viewport: Size,
}

impl Frame<'_> {
    /// Expresses `at` relative to the viewport center.
    fn pivot(&self, at: Point) -> Point {
        if self.config.fix_on_center {
            Point::ZERO
        } else {
            at - self.viewport.to_vec2() / 2.0
        }
    }
}

/// Mutable state of one continuous touch contact.
#[derive(Clone, Debug, Default)]
pub struct GestureSession {
    mode: Mode,
    capabilities: Capabilities,
    /// Baseline positions of the first and second pointer.
    prev: [Point; 2],
    /// Baseline inter-finger angle.
    angle: f64,
    /// Baseline inter-finger distance.
    pinch_width: f64,
    move_start: Option<u64>,
    double_tap: bool,
    drag_zoom: bool,
    /// The first move after arming has rebased the baseline.
    drag_zoom_primed: bool,
    /// Vertical offset from the frozen drag-zoom baseline, as of last frame.
    drag_zoom_offset: f64,
    tap_point: Point,
    tracker: VelocityTracker,
}

impl GestureSession {
    /// Current driving mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns `true` between a pointer down and the terminal up or cancel.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.mode != Mode::Idle
    }

    /// Two-finger modes still reachable.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Returns `true` while pinch zoom is active.
    #[must_use]
    pub fn is_scaling(&self) -> bool {
        self.mode.is_scaling()
    }

    /// Returns `true` while rotation is active.
    #[must_use]
    pub fn is_rotating(&self) -> bool {
        self.mode.is_rotating()
    }

    /// Returns `true` while tilt is active.
    #[must_use]
    pub fn is_tilting(&self) -> bool {
        self.mode.is_tilting()
    }

    /// Timestamp at which the current pan crossed the slop.
    #[must_use]
    pub fn move_start(&self) -> Option<u64> {
        self.move_start
    }

    /// Returns `true` once a double tap was recognized in this contact.
    #[must_use]
    pub fn is_double_tap(&self) -> bool {
        self.double_tap
    }

    /// Returns `true` once dragging after a double tap committed to zooming.
    #[must_use]
    pub fn is_drag_zoom(&self) -> bool {
        self.drag_zoom
    }

    /// Baseline position of the first pointer.
    #[must_use]
    pub fn baseline(&self) -> Point {
        self.prev[0]
    }

    /// Baseline inter-finger distance of the current pinch.
    #[must_use]
    pub fn pinch_width(&self) -> f64 {
        self.pinch_width
    }

    /// Baseline inter-finger angle of the current pinch, in radians.
    #[must_use]
    pub fn pinch_angle(&self) -> f64 {
        self.angle
    }

    /// Starts a contact with one pointer at `position`.
    pub(crate) fn begin(&mut self, position: Point, double_tap: bool) {
        *self = Self::default();
        self.mode = Mode::Pressed;
        self.prev = [position; 2];
        if double_tap {
            self.arm_double_tap();
        }
    }

    /// Ends the contact.
    pub(crate) fn reset(&mut self) {
        if self.is_active() {
            debug!("gesture session reset from {:?}", self.mode);
        }
        *self = Self::default();
    }

    /// Records an externally recognized double tap for the current contact.
    ///
    /// Returns `false` when no contact is active.
    pub(crate) fn arm_double_tap(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.double_tap = true;
        self.drag_zoom = false;
        self.drag_zoom_primed = false;
        self.drag_zoom_offset = 0.0;
        self.tap_point = self.prev[0];
        self.move_start = None;
        if !self.mode.is_two_finger() {
            self.mode = Mode::DoubleTapArmed;
        }
        debug!("double tap armed at {:?}", self.tap_point);
        true
    }

    /// Records a second pointer and derives the pinch baselines.
    pub(crate) fn place_second_pointer(
        &mut self,
        first: Point,
        second: Point,
        config: &GestureConfig,
    ) {
        let span = first - second;
        self.mode = Mode::TwoFingerEvaluating;
        self.capabilities = Capabilities::from_config(config);
        self.prev = [first, second];
        self.angle = span.atan2();
        self.pinch_width = span.hypot();
        self.move_start = None;
        debug!(
            "second pointer down: width {:.1}, angle {:.3}, capabilities {:?}",
            self.pinch_width, self.angle, self.capabilities
        );
    }

    /// Drops back to one pointer at `remaining`.
    pub(crate) fn lift_second_pointer(&mut self, remaining: Point) {
        self.prev = [remaining; 2];
        self.capabilities = Capabilities::empty();
        self.move_start = None;
        self.drag_zoom_offset = 0.0;
        self.mode = if self.drag_zoom {
            Mode::DoubleTapDragZoom
        } else if self.double_tap {
            Mode::DoubleTapArmed
        } else {
            Mode::Pressed
        };
        debug!("back to one pointer at {remaining:?}, mode {:?}", self.mode);
    }

    /// Handles a single-pointer move to `position` at `time`.
    pub(crate) fn move_single(
        &mut self,
        position: Point,
        time: u64,
        frame: &Frame<'_>,
    ) -> Option<GestureIntent> {
        let delta = position - self.prev[0];
        let thresholds = frame.thresholds;

        match self.mode {
            Mode::Idle => None,
            Mode::TwoFingerEvaluating
            | Mode::Scaling
            | Mode::Rotating
            | Mode::ScalingRotating
            | Mode::Tilting => {
                // The second pointer's up never arrived.
                self.lift_second_pointer(position);
                None
            }
            Mode::DoubleTapArmed => {
                let baseline = self.prev[0];
                self.prev[0] = position;
                if !self.drag_zoom_primed {
                    self.drag_zoom_primed = true;
                    return None;
                }
                if !thresholds.is_minimal_move(delta.x, delta.y) {
                    return None;
                }
                self.prev[0] = baseline;
                self.drag_zoom = true;
                self.drag_zoom_offset = 0.0;
                self.move_start = None;
                self.mode = Mode::DoubleTapDragZoom;
                debug!("drag zoom committed at {baseline:?}");
                Some(self.drag_zoom_step(position, frame))
            }
            Mode::DoubleTapDragZoom => Some(self.drag_zoom_step(position, frame)),
            Mode::Pressed => {
                self.prev[0] = position;
                if !frame.config.move_enabled || !thresholds.is_minimal_move(delta.x, delta.y) {
                    return None;
                }
                self.move_start = Some(time);
                self.tracker.start(position, time);
                self.mode = Mode::Panning;
                debug!("pan started at {time} ms with {delta:?}");
                Some(GestureIntent::Move { delta })
            }
            Mode::Panning => {
                self.prev[0] = position;
                if !frame.config.move_enabled {
                    return None;
                }
                self.tracker.update(position, time);
                Some(GestureIntent::Move { delta })
            }
        }
    }

    fn drag_zoom_step(&mut self, position: Point, frame: &Frame<'_>) -> GestureIntent {
        let offset = position.y - self.prev[0].y;
        let step = offset - self.drag_zoom_offset;
        self.drag_zoom_offset = offset;
        GestureIntent::Zoom {
            factor: 2.0_f64.powf(step / frame.thresholds.drag_zoom_distance),
            pivot: frame.pivot(self.tap_point),
        }
    }

    /// Handles a two-pointer move.
    pub(crate) fn move_pair(
        &mut self,
        first: Point,
        second: Point,
        frame: &Frame<'_>,
    ) -> Option<GestureIntent> {
        self.move_start = None;
        if !self.mode.is_two_finger() {
            // The second pointer's down never arrived.
            self.place_second_pointer(first, second, frame.config);
            return None;
        }

        let t = frame.thresholds;
        let span = first - second;
        let centroid_delta = first.midpoint(second) - self.prev[0].midpoint(self.prev[1]);

        let mut tilt_by = 0.0;
        let mut rotate_by = 0.0;
        let mut scale_by = 1.0;

        if self.capabilities.contains(Capabilities::TILT) {
            let slope = if span.x == 0.0 { 0.0 } else { span.y / span.x };
            if slope.abs() < t.tilt_slope {
                if self.mode.is_tilting() {
                    tilt_by = centroid_delta.y / t.tilt_damping;
                } else if centroid_delta.y.abs() > t.tilt_enter {
                    self.capabilities.remove(Capabilities::SCALE | Capabilities::ROTATE);
                    self.mode = Mode::Tilting;
                    tilt_by = centroid_delta.y / t.tilt_damping;
                    debug!("tilt started, centroid moved {:.1}", centroid_delta.y);
                }
            }
        }

        let pinch_width = span.hypot();
        let mut delta_pinch = pinch_width - self.pinch_width;

        if self.capabilities.contains(Capabilities::ROTATE) {
            let angle = span.atan2();
            let delta = normalize_angle(angle - self.angle);
            if self.mode.is_rotating() {
                if delta.abs() > t.rotate_noise {
                    rotate_by = delta;
                    self.angle = angle;
                    // Turning fingers changes their apparent separation.
                    delta_pinch = 0.0;
                }
            } else if delta.abs() + ANGLE_TOLERANCE >= t.rotate_enter {
                self.mode = if self.mode.is_scaling() {
                    Mode::ScalingRotating
                } else {
                    Mode::Rotating
                };
                self.capabilities.remove(Capabilities::TILT);
                self.angle = angle;
                debug!("rotation started after {delta:.3} rad");
            } else if !self.mode.is_scaling() {
                // Fade the pinch out as the decision nears the rotate threshold.
                delta_pinch *= 1.0 - delta.abs() / t.rotate_enter;
            } else {
                self.pinch_width = pinch_width;
            }
        } else if self.mode == Mode::Scaling && frame.config.rotate_enabled {
            let angle = span.atan2();
            let delta = normalize_angle(angle - self.angle);
            if delta.abs() + ANGLE_TOLERANCE >= t.rotate_reenter {
                self.mode = Mode::ScalingRotating;
                self.capabilities.insert(Capabilities::ROTATE);
                self.angle = angle;
                debug!("rotation picked up while scaling after {delta:.3} rad");
            }
        }

        if self.capabilities.contains(Capabilities::SCALE) || self.mode.is_rotating() {
            if !self.mode.is_scaling()
                && !self.mode.is_rotating()
                && delta_pinch.abs() > t.zoom_enter
            {
                self.pinch_width = pinch_width;
                self.capabilities.remove(Capabilities::ROTATE | Capabilities::TILT);
                self.mode = Mode::Scaling;
                debug!("scaling started after {delta_pinch:.1} px");
            }
            if self.mode.is_scaling() || self.mode.is_rotating() {
                scale_by = if self.pinch_width > 0.0 {
                    pinch_width / self.pinch_width
                } else {
                    1.0
                };
                self.pinch_width = pinch_width;
            }
        }

        let intent = match self.mode {
            Mode::Tilting => GestureIntent::Tilt { delta: tilt_by },
            Mode::Scaling => GestureIntent::Zoom {
                factor: scale_by,
                pivot: frame.pivot(first.midpoint(second)),
            },
            Mode::Rotating | Mode::ScalingRotating => {
                let pivot = frame.pivot(first.midpoint(second));
                if (scale_by - 1.0).abs() <= UNIT_SCALE_TOLERANCE {
                    GestureIntent::Rotate {
                        radians: rotate_by,
                        pivot,
                    }
                } else {
                    GestureIntent::Pinch {
                        factor: scale_by,
                        radians: rotate_by,
                        pivot,
                    }
                }
            }
            // Still evaluating: baselines stay put so deltas accumulate.
            _ => return None,
        };

        self.prev = [first, second];
        Some(intent)
    }

    /// Handles the final pointer up and ends the contact.
    ///
    /// `position` is the lifting pointer's final position, if reported.
    pub(crate) fn release(
        &mut self,
        position: Option<Point>,
        time: u64,
        double_tap: bool,
        frame: &Frame<'_>,
    ) -> Option<GestureIntent> {
        let position = position.unwrap_or(self.prev[0]);
        let t = frame.thresholds;

        let intent = if (self.double_tap || double_tap) && !self.drag_zoom {
            let tap = if self.double_tap {
                self.tap_point
            } else {
                position
            };
            Some(GestureIntent::AnimatedZoomIn {
                pivot: frame.pivot(tap),
            })
        } else if let Some(start) = self.move_start {
            // Fold the release position into the estimate.
            self.tracker.update(position, time);
            let mut velocity = self.tracker.velocity();
            let elapsed = time.saturating_sub(start) as f64;
            let min_duration = t.fling_min_duration_ms as f64;
            if elapsed < min_duration {
                // Short flicks overshoot; damp them quadratically.
                let s = elapsed / min_duration;
                velocity *= s * s;
            }
            Some(GestureIntent::Fling {
                velocity,
                bounds: t.fling_bounds(),
            })
        } else if self.drag_zoom {
            None
        } else {
            Some(GestureIntent::Tap { position })
        };

        self.reset();
        intent
    }
}

/// Wraps an angle difference into `(-π, π]`.
fn normalize_angle(mut radians: f64) -> f64 {
    use core::f64::consts::{PI, TAU};
    while radians > PI {
        radians -= TAU;
    }
    while radians <= -PI {
        radians += TAU;
    }
    radians
}

#[cfg(test)]
mod tests {
    use core::f64::consts::PI;

    use kurbo::{Point, Size};

    use super::{Capabilities, Frame, GestureSession, Mode, normalize_angle};
    use crate::config::{GestureConfig, Thresholds};
    use crate::intent::GestureIntent;

    fn thresholds() -> Thresholds {
        // 2.5 px per mm: slop 5 px, zoom and tilt enter at 10 px.
        Thresholds::from_dpi(63.5).unwrap()
    }

    fn frame<'a>(config: &'a GestureConfig, thresholds: &'a Thresholds) -> Frame<'a> {
        Frame {
            config,
            thresholds,
            viewport: Size::new(200.0, 100.0),
        }
    }

    #[test]
    fn capabilities_follow_config() {
        let config = GestureConfig {
            rotate_enabled: false,
            ..GestureConfig::default()
        };
        let caps = Capabilities::from_config(&config);
        assert!(caps.contains(Capabilities::SCALE));
        assert!(caps.contains(Capabilities::TILT));
        assert!(!caps.contains(Capabilities::ROTATE));
    }

    #[test]
    fn normalize_angle_wraps_across_branch_cut() {
        assert!((normalize_angle(2.0 * PI - 0.1) + 0.1).abs() < 1e-12);
        assert!((normalize_angle(-2.0 * PI + 0.1) - 0.1).abs() < 1e-12);
        assert_eq!(normalize_angle(0.3), 0.3);
        assert_eq!(normalize_angle(PI), PI);
    }

    #[test]
    fn begin_resets_everything() {
        let mut session = GestureSession::default();
        session.begin(Point::new(5.0, 5.0), false);
        assert_eq!(session.mode(), Mode::Pressed);
        assert_eq!(session.baseline(), Point::new(5.0, 5.0));
        assert_eq!(session.move_start(), None);
        assert!(!session.is_double_tap());
        assert!(!session.is_drag_zoom());
    }

    #[test]
    fn arming_needs_an_active_contact() {
        let mut session = GestureSession::default();
        assert!(!session.arm_double_tap());
        assert!(!session.is_double_tap());

        session.begin(Point::ZERO, false);
        assert!(session.arm_double_tap());
        assert_eq!(session.mode(), Mode::DoubleTapArmed);
    }

    #[test]
    fn pan_starts_at_slop_and_reports_frame_deltas() {
        let config = GestureConfig::default();
        let t = thresholds();
        let f = frame(&config, &t);
        let mut session = GestureSession::default();
        session.begin(Point::ZERO, false);

        assert_eq!(session.move_single(Point::new(2.0, 0.0), 5, &f), None);
        assert_eq!(session.baseline(), Point::new(2.0, 0.0));

        let first = session.move_single(Point::new(8.0, 0.0), 10, &f);
        assert_eq!(first, Some(GestureIntent::Move { delta: (6.0, 0.0).into() }));
        assert_eq!(session.mode(), Mode::Panning);
        assert_eq!(session.move_start(), Some(10));

        // Below-slop frames still pan once panning.
        let next = session.move_single(Point::new(9.0, 1.0), 20, &f);
        assert_eq!(next, Some(GestureIntent::Move { delta: (1.0, 1.0).into() }));
    }

    #[test]
    fn second_pointer_derives_baselines() {
        let config = GestureConfig::default();
        let mut session = GestureSession::default();
        session.begin(Point::ZERO, false);
        session.place_second_pointer(Point::new(0.0, 0.0), Point::new(-30.0, -40.0), &config);

        assert_eq!(session.mode(), Mode::TwoFingerEvaluating);
        assert!((session.pinch_width() - 50.0).abs() < 1e-12);
        assert!((session.pinch_angle() - (40.0_f64).atan2(30.0)).abs() < 1e-12);
        assert_eq!(session.capabilities(), Capabilities::all());
    }

    #[test]
    fn lifting_second_pointer_clears_two_finger_state() {
        let config = GestureConfig::default();
        let t = thresholds();
        let f = frame(&config, &t);
        let mut session = GestureSession::default();
        session.begin(Point::ZERO, false);
        session.place_second_pointer(Point::new(50.0, 50.0), Point::new(150.0, 50.0), &config);
        assert!(session.move_pair(Point::new(60.0, 50.0), Point::new(140.0, 50.0), &f).is_some());
        assert!(session.is_scaling());

        session.lift_second_pointer(Point::new(61.0, 51.0));
        assert_eq!(session.mode(), Mode::Pressed);
        assert_eq!(session.capabilities(), Capabilities::empty());
        assert_eq!(session.baseline(), Point::new(61.0, 51.0));
    }

    #[test]
    fn pivot_is_relative_to_viewport_center() {
        let config = GestureConfig::default();
        let t = thresholds();
        let f = frame(&config, &t);
        assert_eq!(f.pivot(Point::new(100.0, 50.0)), Point::ZERO);
        assert_eq!(f.pivot(Point::new(0.0, 0.0)), Point::new(-100.0, -50.0));

        let centered = GestureConfig {
            fix_on_center: true,
            ..config
        };
        let f = frame(&centered, &t);
        assert_eq!(f.pivot(Point::new(3.0, 4.0)), Point::ZERO);
    }

    #[test]
    fn release_after_pinch_is_a_tap() {
        let config = GestureConfig::default();
        let t = thresholds();
        let f = frame(&config, &t);
        let mut session = GestureSession::default();
        session.begin(Point::ZERO, false);
        session.place_second_pointer(Point::new(50.0, 50.0), Point::new(150.0, 50.0), &config);
        session.move_pair(Point::new(60.0, 50.0), Point::new(140.0, 50.0), &f);
        session.lift_second_pointer(Point::new(60.0, 50.0));

        assert_eq!(
            session.release(None, 50, false, &f),
            Some(GestureIntent::Tap {
                position: Point::new(60.0, 50.0),
            })
        );
        assert_eq!(session.mode(), Mode::Idle);
    }
}
