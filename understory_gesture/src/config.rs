// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture toggles and device-scaled thresholds.

use kurbo::Rect;

use crate::error::InvalidDeviceScale;

const MM_PER_INCH: f64 = 25.4;

/// Persistent gesture toggles.
///
/// Capability for two-finger gestures is derived from these toggles each time
/// a second pointer goes down, so changes apply from the next pinch onward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GestureConfig {
    /// Allow single-pointer panning and fling.
    pub move_enabled: bool,
    /// Allow pinch zoom.
    pub zoom_enabled: bool,
    /// Allow two-finger rotation.
    pub rotate_enabled: bool,
    /// Allow two-finger tilt.
    pub tilt_enabled: bool,
    /// Anchor zoom and rotation on the viewport center instead of the gesture.
    pub fix_on_center: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            move_enabled: true,
            zoom_enabled: true,
            rotate_enabled: true,
            tilt_enabled: true,
            fix_on_center: false,
        }
    }
}

/// Tuning constants, with distances already converted to pixels.
///
/// Build with [`Thresholds::from_dpi`]; distance thresholds are physical
/// lengths scaled by the device resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thresholds {
    /// Device resolution the distances were derived from.
    pub dpi: f64,
    /// Minimum displacement (2 mm) before motion counts as intentional.
    pub slop: f64,
    /// Pinch width change (4 mm) needed to enter scaling.
    pub zoom_enter: f64,
    /// Vertical centroid travel (4 mm) needed to enter tilting.
    pub tilt_enter: f64,
    /// Largest inter-finger slope for which vertical motion reads as tilt.
    pub tilt_slope: f64,
    /// Divisor turning vertical centroid travel into tilt units.
    pub tilt_damping: f64,
    /// Angle change, in radians, needed to enter rotation.
    pub rotate_enter: f64,
    /// Angle change, in radians, needed to pick rotation up again while scaling.
    pub rotate_reenter: f64,
    /// Smallest per-frame rotation, in radians, that is reported.
    pub rotate_noise: f64,
    /// Pans shorter than this many milliseconds have their fling damped.
    pub fling_min_duration_ms: u64,
    /// Half-extent, in pixels, of the bounds hint attached to a fling.
    pub fling_extent: f64,
    /// Vertical drag, in pixels, that doubles (or halves) the zoom in drag-zoom.
    pub drag_zoom_distance: f64,
}

impl Thresholds {
    /// Resolution assumed when the host has no better information.
    pub const DEFAULT_DPI: f64 = 160.0;

    /// Derives thresholds for a device with `dpi` dots per inch.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDeviceScale`] if `dpi` is not finite or not positive.
    pub fn from_dpi(dpi: f64) -> Result<Self, InvalidDeviceScale> {
        if !dpi.is_finite() || dpi <= 0.0 {
            return Err(InvalidDeviceScale { dpi });
        }
        Ok(Self::scaled(dpi))
    }

    fn scaled(dpi: f64) -> Self {
        let px_per_mm = dpi / MM_PER_INCH;
        Self {
            dpi,
            slop: 2.0 * px_per_mm,
            zoom_enter: 4.0 * px_per_mm,
            tilt_enter: 4.0 * px_per_mm,
            tilt_slope: 0.75,
            tilt_damping: 5.0,
            rotate_enter: 0.2,
            rotate_reenter: 0.5,
            rotate_noise: 0.0001,
            fling_min_duration_ms: 100,
            // Five 256 px tiles in every direction.
            fling_extent: 5.0 * 256.0,
            drag_zoom_distance: dpi,
        }
    }

    /// Returns `true` if a displacement of (`dx`, `dy`) reaches the slop.
    #[must_use]
    pub fn is_minimal_move(&self, dx: f64, dy: f64) -> bool {
        dx * dx + dy * dy >= self.slop * self.slop
    }

    /// Bounds hint attached to every fling, centered on the origin.
    #[must_use]
    pub fn fling_bounds(&self) -> Rect {
        Rect::new(
            -self.fling_extent,
            -self.fling_extent,
            self.fling_extent,
            self.fling_extent,
        )
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::scaled(Self::DEFAULT_DPI)
    }
}
