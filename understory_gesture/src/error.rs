// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for construction and event validation.

use core::fmt;

/// Error returned when a device scale factor cannot produce pixel thresholds.
///
/// The scale factor is expressed in dots per inch and must be finite and
/// strictly positive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InvalidDeviceScale {
    /// The rejected dots-per-inch value.
    pub dpi: f64,
}

impl fmt::Display for InvalidDeviceScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "device scale of {} dpi is not a finite positive number",
            self.dpi
        )
    }
}

impl core::error::Error for InvalidDeviceScale {}

/// Reasons a [`TouchEvent`](crate::TouchEvent) is rejected by
/// [`TouchEvent::validate`](crate::TouchEvent::validate).
///
/// Malformed events are absorbed by the detector: no state changes and no
/// intent is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MalformedEvent {
    /// The event kind needs at least one pointer position but carried none.
    NoPointers,
    /// A second-pointer-down carried fewer than two pointer positions.
    TooFewPointers {
        /// Number of pointer positions the event carried.
        found: usize,
    },
}

impl fmt::Display for MalformedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPointers => f.write_str("event carries no pointer positions"),
            Self::TooFewPointers { found } => {
                write!(f, "second pointer down carries {found} pointer position(s)")
            }
        }
    }
}

impl core::error::Error for MalformedEvent {}
