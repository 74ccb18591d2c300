// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Drag: move and resize controllers for gantt events.
//!
//! Dragging is modeled as an explicit gesture the host feeds pointer samples
//! into, never as hidden global state:
//!
//! - [`MoveController`]: horizontal/vertical event movement. A gesture begins
//!   with a [`DragSession`] describing the grabbed events (rendered width,
//!   height, and the pointer's grab offset within each element), produces
//!   [`trellis_model::Placeholder`]s while the pointer moves, and on release
//!   proposes one [`EventUpdate`] per dragged event. Preview and commit run
//!   the exact same arithmetic, so what the user sees is what they get.
//! - [`ResizeController`]: boundary dragging. One boundary follows the
//!   (snapped) pointer while the opposite boundary stays fixed; dragging past
//!   the fixed boundary swaps the two rather than producing an inverted
//!   interval.
//! - [`resolve_distance`]: multi-event drops preserve each event's row
//!   *offset* from the grabbed event, clamped to the resource list.
//! - [`payload`]: a MIME-style type-string codec for carrying drag metadata
//!   across an external drag-and-drop boundary.
//!
//! ```
//! use kurbo::Point;
//! use trellis_drag::{DragSession, DraggedEvent, DropResolution, DropTarget, MoveController};
//! use trellis_timescale::TimeScale;
//!
//! // 10 ms per pixel, snap to 100 ms (= 10 px).
//! let scale = TimeScale::new(0, 10.0, 100);
//! let mut mover = MoveController::new(scale, DropResolution::SingleResource);
//!
//! // Grabbed 10 px from the element's left edge; the element is 100 px wide.
//! mover.begin(DragSession::single(DraggedEvent::new(
//!     "a", "row-1", 100.0, 45.0, 10.0,
//! )));
//!
//! // Pointer at x=150 over a row whose track starts at x=100.
//! let target = DropTarget::new("row-2", 100.0);
//! let updates = mover
//!     .finish::<()>(Point::new(150.0, 60.0), Some(&target), &[])
//!     .unwrap();
//! assert_eq!(updates[0].start_ms, 400);
//! assert_eq!(updates[0].end_ms, 1_400);
//! assert_eq!(updates[0].resource, "row-2");
//! ```
//!
//! If required geometry is missing on release (no hovered row, a dragged
//! event with non-finite metrics), the whole drop aborts: the controller
//! returns `None` and proposes nothing, never a partial update. The canonical
//! event list stays with the host; controllers only return proposals.
//!
//! This crate is `no_std` and uses `alloc`; building without `std` requires
//! the `libm` feature for Kurbo's float fallbacks.

#![no_std]

extern crate alloc;

mod distance;
mod movement;
mod resize;

pub mod payload;

pub use distance::resolve_distance;
pub use movement::MoveController;
pub use resize::{ResizeController, ResizeDirection};

use alloc::string::String;
use alloc::vec::Vec;

/// One grabbed event within a drag gesture.
///
/// Geometry is captured at drag start, in the host's rendered coordinates:
/// `grab_offset_x` is the pointer's distance from the element's left edge, and
/// `width_px`/`height_px` are the element's rendered size. The width, not the
/// event's stored duration, determines the dropped duration, so an event keeps
/// its on-screen extent through a drop.
#[derive(Clone, Debug, PartialEq)]
pub struct DraggedEvent {
    /// Id of the dragged event.
    pub id: String,
    /// Resource row the event occupied at drag start.
    pub resource: String,
    /// Rendered width of the dragged element, in pixels.
    pub width_px: f64,
    /// Rendered height of the dragged element, in pixels.
    pub height_px: f64,
    /// Pointer x minus element left x, captured at drag start.
    pub grab_offset_x: f64,
}

impl DraggedEvent {
    /// Creates a dragged-event record from drag-start geometry.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        resource: impl Into<String>,
        width_px: f64,
        height_px: f64,
        grab_offset_x: f64,
    ) -> Self {
        Self {
            id: id.into(),
            resource: resource.into(),
            width_px,
            height_px,
            grab_offset_x,
        }
    }
}

/// A move gesture: the grabbed events plus the row the grab happened in.
///
/// `anchor_resource` is the resource of the event under the pointer at drag
/// start; multi-row drops are computed relative to it (see
/// [`resolve_distance`]).
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession {
    /// Resource row of the event the pointer grabbed.
    pub anchor_resource: String,
    /// All events moving in this gesture (the grabbed one plus any selection).
    pub events: Vec<DraggedEvent>,
}

impl DragSession {
    /// Creates a session over an explicit anchor row and event set.
    #[must_use]
    pub fn new(anchor_resource: impl Into<String>, events: Vec<DraggedEvent>) -> Self {
        Self {
            anchor_resource: anchor_resource.into(),
            events,
        }
    }

    /// Creates a single-event session anchored at that event's own row.
    #[must_use]
    pub fn single(event: DraggedEvent) -> Self {
        Self {
            anchor_resource: event.resource.clone(),
            events: alloc::vec![event],
        }
    }
}

/// The row currently under the pointer, in the pointer's coordinate space.
///
/// `left_x` is the x position of the row track's left edge (pixel 0 of the
/// timeline); the controllers subtract it to get track-relative offsets.
#[derive(Clone, Debug, PartialEq)]
pub struct DropTarget {
    /// Id of the hovered resource row.
    pub resource: String,
    /// X of the row track's left edge, same space as the pointer.
    pub left_x: f64,
}

impl DropTarget {
    /// Creates a drop target from a resource id and track-left x.
    #[must_use]
    pub fn new(resource: impl Into<String>, left_x: f64) -> Self {
        Self {
            resource: resource.into(),
            left_x,
        }
    }
}

/// How a multi-event drop assigns resource rows.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DropResolution {
    /// Every dragged event lands on the hovered row.
    #[default]
    SingleResource,
    /// Each event keeps its row offset from the grabbed event, clamped to the
    /// resource list (see [`resolve_distance`]).
    AsSelected,
}

/// A proposed change to one event, produced by a completed gesture.
///
/// The host merges updates into its canonical event store by id; payloads and
/// any other host-side fields are untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct EventUpdate {
    /// Id of the event to update.
    pub id: String,
    /// New resource row.
    pub resource: String,
    /// New start timestamp, epoch milliseconds (snapped).
    pub start_ms: i64,
    /// New end timestamp, epoch milliseconds.
    pub end_ms: i64,
}
