// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Model: core value types for the gantt engine.
//!
//! This crate defines the small, framework-free vocabulary shared by the rest
//! of the Trellis workspace:
//!
//! - [`Event`]: a time-boxed task bound to exactly one resource, with an
//!   arbitrary caller-defined payload.
//! - [`Resource`]: a named row/lane that events are organized under. The
//!   *array index* of a resource is semantically meaningful: multi-row drag
//!   reassignment is defined in terms of index offsets, never identity.
//! - [`Placeholder`]: a transient, non-canonical event representing a
//!   drag-in-progress position. Placeholders exist only between drag start
//!   and drop/cancel and are never part of the canonical event list.
//! - [`Interval`]: half-open `[start, end)` millisecond intervals and their
//!   overlap rules, including the zero-duration case.
//! - [`Timeboxed`]: the trait the packing engine and row composer use to
//!   accept events, placeholders, and application-specific types uniformly.
//!
//! The canonical event and resource lists are owned by the host application;
//! the engine treats them as read-only input per frame and only ever proposes
//! changes through return values.
//!
//! ## Overlap semantics
//!
//! Intervals are half-open: `[100, 200)` and `[200, 300)` do **not** overlap,
//! so events that merely touch share a display level. A zero-duration event
//! at `t` overlaps `[s, e)` only when it is strictly inside (`s < t < e`):
//!
//! ```
//! use trellis_model::Interval;
//!
//! let a = Interval::new(100, 200);
//! assert!(!a.overlaps(Interval::new(200, 300)));
//! assert!(!a.overlaps(Interval::new(200, 200)));
//! assert!(a.overlaps(Interval::new(150, 150)));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::string::String;
use core::fmt;

/// A half-open `[start_ms, end_ms)` interval in integer epoch milliseconds.
///
/// `Interval` does not enforce `start_ms <= end_ms` on construction; consumers
/// that require well-formed input (for example the packing engine) check
/// [`Interval::is_well_formed`] and fail fast on violation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Interval {
    /// Inclusive start, in epoch milliseconds.
    pub start_ms: i64,
    /// Exclusive end, in epoch milliseconds.
    pub end_ms: i64,
}

impl Interval {
    /// Creates an interval from raw millisecond bounds.
    #[must_use]
    pub const fn new(start_ms: i64, end_ms: i64) -> Self {
        Self { start_ms, end_ms }
    }

    /// Returns `true` when `start_ms <= end_ms`.
    #[must_use]
    pub const fn is_well_formed(self) -> bool {
        self.start_ms <= self.end_ms
    }

    /// Returns the duration in milliseconds (zero for degenerate intervals).
    #[must_use]
    pub const fn duration_ms(self) -> i64 {
        self.end_ms - self.start_ms
    }

    /// Half-open overlap test.
    ///
    /// Touching boundaries do not count as overlap. The test is evaluated in
    /// both directions so that a zero-duration interval overlaps another only
    /// when it lies strictly inside it.
    #[must_use]
    pub const fn overlaps(self, other: Self) -> bool {
        (self.end_ms > other.start_ms && self.start_ms < other.end_ms)
            || (other.end_ms > self.start_ms && other.start_ms < self.end_ms)
    }
}

/// Anything with a stable string key and a time interval.
///
/// Implemented by [`Event`] and [`Placeholder`]; hosts can implement it for
/// their own event representations to use the packing engine directly. The
/// key is what makes drag-preview stability work: an incoming item whose key
/// matches an already-placed item replaces it in place rather than competing
/// with it for a level.
pub trait Timeboxed {
    /// Stable identifier, unique within one packing input.
    fn key(&self) -> &str;

    /// Start of the occupied time span, in epoch milliseconds.
    fn start_ms(&self) -> i64;

    /// Exclusive end of the occupied time span, in epoch milliseconds.
    fn end_ms(&self) -> i64;

    /// The occupied span as an [`Interval`].
    fn interval(&self) -> Interval {
        Interval::new(self.start_ms(), self.end_ms())
    }
}

impl<T: Timeboxed + ?Sized> Timeboxed for &T {
    fn key(&self) -> &str {
        (**self).key()
    }

    fn start_ms(&self) -> i64 {
        (**self).start_ms()
    }

    fn end_ms(&self) -> i64 {
        (**self).end_ms()
    }
}

/// A time-boxed task assigned to exactly one resource row.
///
/// Events are immutable value objects from the engine's perspective: every
/// mutation (move, resize) produces a new event proposal which the host merges
/// into its own canonical store.
#[derive(Clone, Debug, PartialEq)]
pub struct Event<P = ()> {
    /// Unique identifier.
    pub id: String,
    /// Id of the owning [`Resource`].
    pub resource: String,
    /// Start timestamp, epoch milliseconds.
    pub start_ms: i64,
    /// End timestamp, epoch milliseconds. Expected `>= start_ms`.
    pub end_ms: i64,
    /// Arbitrary caller-defined payload carried through untouched.
    pub payload: P,
}

impl Event<()> {
    /// Creates an event with an empty payload.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        resource: impl Into<String>,
        start_ms: i64,
        end_ms: i64,
    ) -> Self {
        Self {
            id: id.into(),
            resource: resource.into(),
            start_ms,
            end_ms,
            payload: (),
        }
    }
}

impl<P> Event<P> {
    /// Creates an event carrying a caller-defined payload.
    #[must_use]
    pub fn with_payload(
        id: impl Into<String>,
        resource: impl Into<String>,
        start_ms: i64,
        end_ms: i64,
        payload: P,
    ) -> Self {
        Self {
            id: id.into(),
            resource: resource.into(),
            start_ms,
            end_ms,
            payload,
        }
    }
}

impl<P> Timeboxed for Event<P> {
    fn key(&self) -> &str {
        &self.id
    }

    fn start_ms(&self) -> i64 {
        self.start_ms
    }

    fn end_ms(&self) -> i64 {
        self.end_ms
    }
}

/// A named row/lane that events are organized under.
///
/// Display order is the order of the host-supplied resource slice; "distance"
/// between rows during multi-row drags is the difference of slice indices.
#[derive(Clone, Debug, PartialEq)]
pub struct Resource<P = ()> {
    /// Unique identifier.
    pub id: String,
    /// Arbitrary caller-defined payload carried through untouched.
    pub payload: P,
}

impl Resource<()> {
    /// Creates a resource with an empty payload.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            payload: (),
        }
    }
}

impl<P> Resource<P> {
    /// Creates a resource carrying a caller-defined payload.
    #[must_use]
    pub fn with_payload(id: impl Into<String>, payload: P) -> Self {
        Self {
            id: id.into(),
            payload,
        }
    }
}

/// Returns the index of the resource with the given id, if present.
#[must_use]
pub fn resource_index<P>(resources: &[Resource<P>], id: &str) -> Option<usize> {
    resources.iter().position(|r| r.id == id)
}

/// The tentative position of an event mid-drag.
///
/// A placeholder mirrors the dragged event's id so that re-packing a row with
/// the placeholder substituted for its source event keeps the level layout
/// stable. The `height` hint carries the dragged element's rendered height so
/// the host can size the preview; it has no layout meaning inside the engine.
#[derive(Clone, Debug, PartialEq)]
pub struct Placeholder {
    /// Id of the event this placeholder stands in for.
    pub id: String,
    /// Tentative resource row.
    pub resource: String,
    /// Tentative start timestamp, epoch milliseconds (already snapped).
    pub start_ms: i64,
    /// Tentative end timestamp, epoch milliseconds (already snapped).
    pub end_ms: i64,
    /// Rendered height of the dragged element, in pixels.
    pub height: f64,
}

impl Timeboxed for Placeholder {
    fn key(&self) -> &str {
        &self.id
    }

    fn start_ms(&self) -> i64 {
        self.start_ms
    }

    fn end_ms(&self) -> i64 {
        self.end_ms
    }
}

/// Error for an interval whose end precedes its start.
///
/// This is a programmer error from the host application; operations that
/// consume event lists fail fast with it rather than silently misplacing the
/// event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InvalidInterval {
    /// The offending interval.
    pub interval: Interval,
}

impl fmt::Display for InvalidInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "interval end {} precedes start {}",
            self.interval.end_ms, self.interval.start_ms
        )
    }
}

impl core::error::Error for InvalidInterval {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_boundaries_do_not_overlap() {
        let a = Interval::new(100, 200);
        let b = Interval::new(200, 300);
        assert!(!a.overlaps(b));
        assert!(!b.overlaps(a));
    }

    #[test]
    fn identical_intervals_overlap() {
        let a = Interval::new(100, 200);
        assert!(a.overlaps(a));
    }

    #[test]
    fn zero_duration_at_boundary_does_not_overlap() {
        let a = Interval::new(100, 200);
        let point = Interval::new(200, 200);
        assert!(!a.overlaps(point));
        assert!(!point.overlaps(a));
    }

    #[test]
    fn zero_duration_strictly_inside_overlaps() {
        let a = Interval::new(100, 200);
        let point = Interval::new(150, 150);
        assert!(a.overlaps(point));
        assert!(point.overlaps(a));
    }

    #[test]
    fn containment_overlaps() {
        let outer = Interval::new(0, 1000);
        let inner = Interval::new(400, 600);
        assert!(outer.overlaps(inner));
        assert!(inner.overlaps(outer));
    }

    #[test]
    fn well_formedness() {
        assert!(Interval::new(0, 0).is_well_formed());
        assert!(Interval::new(0, 10).is_well_formed());
        assert!(!Interval::new(10, 0).is_well_formed());
    }

    #[test]
    fn event_implements_timeboxed() {
        let ev = Event::new("a", "row-1", 100, 200);
        assert_eq!(ev.key(), "a");
        assert_eq!(ev.interval(), Interval::new(100, 200));
    }

    #[test]
    fn resource_index_lookup() {
        let resources = [Resource::new("a"), Resource::new("b")];
        assert_eq!(resource_index(&resources, "b"), Some(1));
        assert_eq!(resource_index(&resources, "z"), None);
    }
}
