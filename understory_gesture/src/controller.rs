// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;

/// The viewport a [`GestureDetector`](crate::GestureDetector) works against.
///
/// The detector only queries the viewport's size (to express pivots relative
/// to its center) and stops any running viewport animation when a new contact
/// begins. Applying intents is up to the host.
pub trait ViewportController {
    /// Current viewport size in pixels.
    fn viewport_size(&self) -> Size;

    /// Stops any in-progress viewport animation, such as a fling.
    fn cancel_animation(&mut self);
}

/// A bare size acts as a viewport with nothing to animate.
impl ViewportController for Size {
    fn viewport_size(&self) -> Size {
        *self
    }

    fn cancel_animation(&mut self) {}
}
