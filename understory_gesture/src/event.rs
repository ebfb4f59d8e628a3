// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch input consumed by the gesture detector.
//!
//! A [`TouchEvent`] carries one [`TouchKind`], the positions of the pointers
//! involved, a millisecond timestamp, and the platform's double-tap verdict.
//!
//! ## Pointer lists
//!
//! `pointers` lists the pointers in contact once the event has been applied,
//! in a stable order (the first pointer down comes first). The one exception
//! is [`TouchKind::PointerUp`], which carries the final position of the
//! lifting pointer, or nothing if the platform does not report it. Only the
//! first two pointers are ever consulted.
//!
//! ```
//! use kurbo::Point;
//! use understory_gesture::{TouchEvent, TouchKind};
//!
//! let down = TouchEvent::down(0, Point::new(10.0, 10.0));
//! assert_eq!(down.kind, TouchKind::PointerDown);
//! assert_eq!(down.pointer_count(), 1);
//!
//! let pinch = TouchEvent::second_down(5, Point::new(10.0, 10.0), Point::new(90.0, 10.0));
//! assert_eq!(pinch.pointer_count(), 2);
//! assert!(pinch.validate().is_ok());
//! ```

use kurbo::Point;
use smallvec::{SmallVec, smallvec};

use crate::error::MalformedEvent;

/// Platform identity of a pointer for the duration of its contact.
pub type PointerId = u64;

/// One pointer's identity and position, stamped by the event carrying it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    /// Pointer identity.
    pub id: PointerId,
    /// Position in viewport pixels.
    pub position: Point,
}

impl PointerSample {
    /// Creates a sample for pointer `id` at `position`.
    #[must_use]
    pub fn new(id: PointerId, position: Point) -> Self {
        Self { id, position }
    }
}

/// What happened to the set of pointers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TouchKind {
    /// The first pointer of a contact went down.
    PointerDown,
    /// One or more pointers moved.
    PointerMove,
    /// The last pointer of a contact went up.
    PointerUp,
    /// A second pointer went down while one was already in contact.
    SecondPointerDown,
    /// One of two pointers went up; one remains in contact.
    SecondPointerUp,
    /// The platform abandoned the contact.
    Cancel,
}

/// A single touch input frame.
#[derive(Clone, Debug, PartialEq)]
pub struct TouchEvent {
    /// What happened.
    pub kind: TouchKind,
    /// Pointers in contact after this event, first-down first.
    ///
    /// For [`TouchKind::PointerUp`] this is the lifting pointer's final
    /// position instead, and may be empty.
    pub pointers: SmallVec<[PointerSample; 2]>,
    /// Monotonic timestamp in milliseconds.
    pub time: u64,
    /// The platform recognized this tap sequence as a double tap.
    ///
    /// Honored on [`TouchKind::PointerUp`] and [`TouchKind::PointerDown`].
    pub double_tap: bool,
}

impl TouchEvent {
    /// Creates an event from its parts.
    #[must_use]
    pub fn new(kind: TouchKind, time: u64, pointers: &[PointerSample]) -> Self {
        Self {
            kind,
            pointers: pointers.iter().copied().collect(),
            time,
            double_tap: false,
        }
    }

    /// First pointer down at `position`.
    #[must_use]
    pub fn down(time: u64, position: Point) -> Self {
        Self::single(TouchKind::PointerDown, time, position)
    }

    /// Single pointer moved to `position`.
    #[must_use]
    pub fn moved(time: u64, position: Point) -> Self {
        Self::single(TouchKind::PointerMove, time, position)
    }

    /// Two pointers moved to `first` and `second`.
    #[must_use]
    pub fn moved2(time: u64, first: Point, second: Point) -> Self {
        Self::pair(TouchKind::PointerMove, time, first, second)
    }

    /// Last pointer lifted at `position`.
    #[must_use]
    pub fn up(time: u64, position: Point) -> Self {
        Self::single(TouchKind::PointerUp, time, position)
    }

    /// Second pointer placed; both pointers' positions.
    #[must_use]
    pub fn second_down(time: u64, first: Point, second: Point) -> Self {
        Self::pair(TouchKind::SecondPointerDown, time, first, second)
    }

    /// One of two pointers lifted; `remaining` stays in contact.
    #[must_use]
    pub fn second_up(time: u64, remaining: Point) -> Self {
        Self::single(TouchKind::SecondPointerUp, time, remaining)
    }

    /// Contact abandoned.
    #[must_use]
    pub fn cancel(time: u64) -> Self {
        Self {
            kind: TouchKind::Cancel,
            pointers: SmallVec::new(),
            time,
            double_tap: false,
        }
    }

    /// Marks this event as completing a double tap.
    #[must_use]
    pub fn with_double_tap(mut self) -> Self {
        self.double_tap = true;
        self
    }

    /// Number of pointers this event reports, capped at two.
    #[must_use]
    pub fn pointer_count(&self) -> usize {
        self.pointers.len().min(2)
    }

    /// Checks that the event carries the pointers its kind requires.
    ///
    /// # Errors
    ///
    /// - [`MalformedEvent::NoPointers`] for a down, move, or second-pointer-up
    ///   without positions.
    /// - [`MalformedEvent::TooFewPointers`] for a second-pointer-down with
    ///   fewer than two positions.
    pub fn validate(&self) -> Result<(), MalformedEvent> {
        match self.kind {
            TouchKind::Cancel | TouchKind::PointerUp => Ok(()),
            TouchKind::SecondPointerDown if self.pointers.len() < 2 => {
                Err(MalformedEvent::TooFewPointers {
                    found: self.pointers.len(),
                })
            }
            _ if self.pointers.is_empty() => Err(MalformedEvent::NoPointers),
            _ => Ok(()),
        }
    }

    /// Position of the pointer at `index`.
    ///
    /// Asking past the reported pointers is a caller bug: it asserts in debug
    /// builds and yields `None` otherwise.
    pub(crate) fn position(&self, index: usize) -> Option<Point> {
        debug_assert!(
            index < self.pointers.len(),
            "pointer {index} requested from a {:?} event with {} pointer(s)",
            self.kind,
            self.pointers.len()
        );
        self.pointers.get(index).map(|p| p.position)
    }

    fn single(kind: TouchKind, time: u64, position: Point) -> Self {
        Self {
            kind,
            pointers: smallvec![PointerSample::new(0, position)],
            time,
            double_tap: false,
        }
    }

    fn pair(kind: TouchKind, time: u64, first: Point, second: Point) -> Self {
        Self {
            kind,
            pointers: smallvec![PointerSample::new(0, first), PointerSample::new(1, second)],
            time,
            double_tap: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::{PointerSample, TouchEvent, TouchKind};
    use crate::error::MalformedEvent;

    #[test]
    fn constructors_set_kind_and_pointers() {
        let p = Point::new(1.0, 2.0);
        let q = Point::new(3.0, 4.0);

        assert_eq!(TouchEvent::down(0, p).kind, TouchKind::PointerDown);
        assert_eq!(TouchEvent::moved(1, p).kind, TouchKind::PointerMove);
        assert_eq!(TouchEvent::up(2, p).kind, TouchKind::PointerUp);
        assert_eq!(TouchEvent::second_up(3, p).kind, TouchKind::SecondPointerUp);

        let pair = TouchEvent::moved2(4, p, q);
        assert_eq!(pair.pointer_count(), 2);
        assert_eq!(pair.pointers[0].position, p);
        assert_eq!(pair.pointers[1].position, q);
        assert_ne!(pair.pointers[0].id, pair.pointers[1].id);

        let cancel = TouchEvent::cancel(5);
        assert_eq!(cancel.kind, TouchKind::Cancel);
        assert_eq!(cancel.pointer_count(), 0);
    }

    #[test]
    fn double_tap_flag_is_opt_in() {
        let up = TouchEvent::up(0, Point::ZERO);
        assert!(!up.double_tap);
        assert!(up.with_double_tap().double_tap);
    }

    #[test]
    fn pointer_count_is_capped_at_two() {
        let samples = [
            PointerSample::new(0, Point::ZERO),
            PointerSample::new(1, Point::ZERO),
            PointerSample::new(2, Point::ZERO),
        ];
        let event = TouchEvent::new(TouchKind::PointerMove, 0, &samples);
        assert_eq!(event.pointers.len(), 3);
        assert_eq!(event.pointer_count(), 2);
    }

    #[test]
    fn validate_requires_pointers_where_needed() {
        let empty_move = TouchEvent::new(TouchKind::PointerMove, 0, &[]);
        assert_eq!(empty_move.validate(), Err(MalformedEvent::NoPointers));

        let empty_down = TouchEvent::new(TouchKind::PointerDown, 0, &[]);
        assert_eq!(empty_down.validate(), Err(MalformedEvent::NoPointers));

        let lonely_second = TouchEvent::new(
            TouchKind::SecondPointerDown,
            0,
            &[PointerSample::new(0, Point::ZERO)],
        );
        assert_eq!(
            lonely_second.validate(),
            Err(MalformedEvent::TooFewPointers { found: 1 })
        );

        assert!(TouchEvent::new(TouchKind::PointerUp, 0, &[]).validate().is_ok());
        assert!(TouchEvent::cancel(0).validate().is_ok());
    }

    #[test]
    fn position_reads_reported_pointers() {
        let event = TouchEvent::moved2(0, Point::new(1.0, 1.0), Point::new(2.0, 2.0));
        assert_eq!(event.position(0), Some(Point::new(1.0, 1.0)));
        assert_eq!(event.position(1), Some(Point::new(2.0, 2.0)));
    }
}
