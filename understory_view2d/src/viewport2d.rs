// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};
use log::debug;
use understory_gesture::{GestureIntent, ViewportController};

use crate::animation::ViewAnimation;

/// Default upper limit for [`Viewport2D::tilt`], in degrees.
pub const DEFAULT_MAX_TILT: f64 = 65.0;

/// 2D viewport over a world‑space plane.
///
/// `Viewport2D` tracks a rectangular region in device/view space and a
/// pan, uniform zoom, and rotation mapping world coordinates into that
/// region. It also carries a tilt angle for renderers that draw the plane in
/// perspective; tilt does not affect the 2D conversions.
///
/// It can be used to:
/// - Apply [`GestureIntent`]s from a gesture detector.
/// - Convert points and rectangles between world and view coordinates.
/// - Record fling and zoom animation requests for the host to play.
#[derive(Clone, Debug)]
pub struct Viewport2D {
    view_rect: Rect,
    zoom: f64,
    pan: Vec2,
    rotation: f64,
    tilt: f64,
    min_zoom: f64,
    max_zoom: f64,
    max_tilt: f64,
    animation: Option<ViewAnimation>,
    world_to_view: Affine,
    view_to_world: Affine,
}

impl Viewport2D {
    /// Creates a new viewport covering `view_rect`.
    ///
    /// - Initial zoom is `1.0`, with rotation and tilt at zero.
    /// - Initial pan is zero (world origin maps to the view rect origin).
    /// - Zoom is clamped to the range `[1e-3, 1e3]` by default.
    /// - Tilt is clamped to `[0, 65]` degrees by default.
    #[must_use]
    pub fn new(view_rect: Rect) -> Self {
        let mut vp = Self {
            view_rect,
            zoom: 1.0,
            pan: Vec2::ZERO,
            rotation: 0.0,
            tilt: 0.0,
            min_zoom: 1e-3,
            max_zoom: 1e3,
            max_tilt: DEFAULT_MAX_TILT,
            animation: None,
            world_to_view: Affine::IDENTITY,
            view_to_world: Affine::IDENTITY,
        };
        vp.rebuild_transforms();
        vp
    }

    /// Returns the current view rectangle in device coordinates.
    #[must_use]
    pub fn view_rect(&self) -> Rect {
        self.view_rect
    }

    /// Sets the view rectangle in device coordinates.
    ///
    /// This does not change zoom, pan, or rotation, but it may affect the
    /// visible world region.
    pub fn set_view_rect(&mut self, rect: Rect) {
        if self.view_rect == rect {
            return;
        }
        self.view_rect = rect;
        self.rebuild_transforms();
    }

    /// Returns the current uniform zoom factor.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Returns the current pan offset in view coordinates.
    #[must_use]
    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    /// Returns the accumulated rotation in radians.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Returns the current tilt in degrees.
    #[must_use]
    pub fn tilt(&self) -> f64 {
        self.tilt
    }

    /// Sets the minimum and maximum zoom factors.
    ///
    /// The provided range is normalized so that `min_zoom <= max_zoom`. The
    /// current zoom is clamped into the new range.
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.set_zoom(self.zoom);
    }

    /// Sets the zoom factor, clamping it into the configured zoom range.
    pub fn set_zoom(&mut self, zoom: f64) {
        let clamped = zoom.clamp(self.min_zoom, self.max_zoom);
        if (self.zoom - clamped).abs() < f64::EPSILON {
            return;
        }
        self.zoom = clamped;
        self.rebuild_transforms();
    }

    /// Sets the largest allowed tilt in degrees; negative values clamp to zero.
    pub fn set_max_tilt(&mut self, max_tilt: f64) {
        self.max_tilt = max_tilt.max(0.0);
        self.tilt = self.tilt.min(self.max_tilt);
    }

    /// Sets the tilt in degrees, clamped to `[0, max_tilt]`.
    pub fn set_tilt(&mut self, tilt: f64) {
        self.tilt = tilt.clamp(0.0, self.max_tilt);
    }

    /// Pans the view by a delta in view/device space.
    pub fn pan_by_view(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        self.pan += delta;
        self.rebuild_transforms();
    }

    /// Zooms around a given anchor point in view/device coordinates.
    ///
    /// The anchor point remains fixed in view space as much as possible under
    /// the new zoom level.
    pub fn zoom_about_view_point(&mut self, anchor_view: Point, factor: f64) {
        self.transform_about(anchor_view, factor, 0.0);
    }

    /// Rotates by `radians` around a given anchor point in view coordinates.
    pub fn rotate_about_view_point(&mut self, anchor_view: Point, radians: f64) {
        self.transform_about(anchor_view, 1.0, radians);
    }

    /// Centers the view on the given world‑space point.
    pub fn center_on(&mut self, world_pt: Point) {
        let view_center = self.view_rect.center();
        let world_in_view = self.world_to_view_point(world_pt);
        self.pan_by_view(view_center - world_in_view);
    }

    /// Applies a gesture intent.
    ///
    /// Pivots are read relative to the view rect center. Fling and animated
    /// zoom intents replace the pending [`ViewAnimation`]; taps are ignored.
    /// Returns `true` if the view or the pending animation changed.
    pub fn apply(&mut self, intent: &GestureIntent) -> bool {
        match *intent {
            GestureIntent::Move { delta } => {
                self.pan_by_view(delta);
                delta != Vec2::ZERO
            }
            GestureIntent::Zoom { factor, pivot } => {
                self.transform_about(self.anchor(pivot), factor, 0.0)
            }
            GestureIntent::Rotate { radians, pivot } => {
                self.transform_about(self.anchor(pivot), 1.0, radians)
            }
            GestureIntent::Pinch {
                factor,
                radians,
                pivot,
            } => self.transform_about(self.anchor(pivot), factor, radians),
            GestureIntent::Tilt { delta } => {
                let before = self.tilt;
                self.set_tilt(self.tilt + delta);
                self.tilt != before
            }
            GestureIntent::Tap { .. } => false,
            GestureIntent::AnimatedZoomIn { pivot } => {
                self.request_animation(ViewAnimation::zoom_in(self.anchor(pivot)));
                true
            }
            GestureIntent::Fling { velocity, bounds } => {
                self.request_animation(ViewAnimation::Fling { velocity, bounds });
                true
            }
        }
    }

    /// The animation waiting to be played, if any.
    #[must_use]
    pub fn pending_animation(&self) -> Option<&ViewAnimation> {
        self.animation.as_ref()
    }

    /// Removes and returns the pending animation so the host can play it.
    pub fn take_animation(&mut self) -> Option<ViewAnimation> {
        self.animation.take()
    }

    /// Returns the visible world‑space rectangle.
    ///
    /// Under rotation this is the bounding box of the rotated view.
    #[must_use]
    pub fn visible_world_rect(&self) -> Rect {
        self.view_to_world_rect(self.view_rect)
    }

    /// Converts a world‑space point into view/device coordinates.
    #[must_use]
    pub fn world_to_view_point(&self, pt: Point) -> Point {
        self.world_to_view * pt
    }

    /// Converts a view/device‑space point into world coordinates.
    #[must_use]
    pub fn view_to_world_point(&self, pt: Point) -> Point {
        self.view_to_world * pt
    }

    /// Converts a world‑space rectangle into the view‑space box bounding it.
    #[must_use]
    pub fn world_to_view_rect(&self, rect: Rect) -> Rect {
        bounding_box(self.world_to_view, rect)
    }

    /// Converts a view/device‑space rectangle into the world‑space box bounding it.
    #[must_use]
    pub fn view_to_world_rect(&self, rect: Rect) -> Rect {
        bounding_box(self.view_to_world, rect)
    }

    /// Returns the current world‑units‑per‑pixel ratio.
    ///
    /// This is `1.0 / zoom`; rotation preserves lengths.
    #[must_use]
    pub fn world_units_per_pixel(&self) -> f64 {
        1.0 / self.zoom
    }

    /// Snapshot of the current viewport state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> Viewport2DDebugInfo {
        Viewport2DDebugInfo {
            view_rect: self.view_rect,
            visible_world_rect: self.visible_world_rect(),
            zoom: self.zoom,
            pan: self.pan,
            rotation: self.rotation,
            tilt: self.tilt,
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
            max_tilt: self.max_tilt,
            animation: self.animation,
        }
    }

    /// View-space point `pivot` away from the view rect center.
    fn anchor(&self, pivot: Point) -> Point {
        self.view_rect.center() + pivot.to_vec2()
    }

    fn request_animation(&mut self, animation: ViewAnimation) {
        debug!("animation requested: {animation:?}");
        self.animation = Some(animation);
    }

    /// Scales by `factor` and rotates by `radians` while keeping `anchor`
    /// fixed in view space.
    fn transform_about(&mut self, anchor: Point, factor: f64, radians: f64) -> bool {
        if !(factor > 0.0 && factor.is_finite() && radians.is_finite()) {
            return false;
        }
        let new_zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        let scale = new_zoom / self.zoom;
        if (scale - 1.0).abs() < f64::EPSILON && radians == 0.0 {
            return false;
        }

        let about = Affine::translate(anchor.to_vec2())
            * Affine::rotate(radians)
            * Affine::scale(scale)
            * Affine::translate(-anchor.to_vec2());
        let origin = self.view_rect.origin();
        self.pan = about * (origin + self.pan) - origin;
        self.zoom = new_zoom;
        self.rotation += radians;
        self.rebuild_transforms();
        true
    }

    fn rebuild_transforms(&mut self) {
        let view_origin = self.view_rect.origin().to_vec2();
        // World → view: scale, rotate, then translate by pan into the view rect.
        self.world_to_view = Affine::translate(view_origin + self.pan)
            * Affine::rotate(self.rotation)
            * Affine::scale(self.zoom);
        self.view_to_world = self.world_to_view.inverse();
    }
}

impl ViewportController for Viewport2D {
    fn viewport_size(&self) -> Size {
        self.view_rect.size()
    }

    fn cancel_animation(&mut self) {
        if let Some(animation) = self.animation.take() {
            debug!("animation cancelled: {animation:?}");
        }
    }
}

/// Transforms the four corners of `rect` and returns their bounding box.
fn bounding_box(transform: Affine, rect: Rect) -> Rect {
    let corners = [
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x0, rect.y1),
        Point::new(rect.x1, rect.y1),
    ];
    let first = transform * corners[0];
    corners[1..]
        .iter()
        .fold(Rect::from_points(first, first), |acc, &corner| {
            acc.union_pt(transform * corner)
        })
}

/// Debug snapshot of a [`Viewport2D`] state.
#[derive(Clone, Copy, Debug)]
pub struct Viewport2DDebugInfo {
    /// Current view rectangle in device coordinates.
    pub view_rect: Rect,
    /// World‑space rectangle bounding what is visible through the view.
    pub visible_world_rect: Rect,
    /// Current uniform zoom factor.
    pub zoom: f64,
    /// Current pan offset in view coordinates.
    pub pan: Vec2,
    /// Accumulated rotation in radians.
    pub rotation: f64,
    /// Current tilt in degrees.
    pub tilt: f64,
    /// Minimum zoom factor.
    pub min_zoom: f64,
    /// Maximum zoom factor.
    pub max_zoom: f64,
    /// Maximum tilt in degrees.
    pub max_tilt: f64,
    /// Animation waiting to be played.
    pub animation: Option<ViewAnimation>,
}
