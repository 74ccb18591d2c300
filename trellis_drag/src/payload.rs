// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! MIME-style type strings for external drag-and-drop interop.
//!
//! Some drag backends only let metadata travel *inside the type string* while
//! a drag is in flight, so the grabbed element's geometry is encoded into the
//! type itself: the base type, an optional data-type tag, and positional
//! numeric metadata, joined with `+`:
//!
//! ```text
//! application/vnd.trellis-event+json+12.5+100+45
//!                               ^     ^    ^   ^
//!                               data  grab  width height
//!                               type  offset
//! ```
//!
//! Decoding is strict: a payload with a wrong base type, missing fields, or
//! non-numeric metadata is rejected whole, never partially applied.

use alloc::string::String;
use alloc::vec::Vec;

/// Base MIME type identifying a Trellis event drag.
pub const EVENT_MIME: &str = "application/vnd.trellis-event";

/// Geometry of an externally dragged event element.
///
/// Mirrors the fields of [`crate::DraggedEvent`] that cannot be recovered on
/// the receiving side of an external drag.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ExternalDragData {
    /// Pointer x minus element left x, captured at drag start.
    pub grab_offset_x: f64,
    /// Rendered width of the dragged element, in pixels.
    pub width_px: f64,
    /// Rendered height of the dragged element, in pixels.
    pub height_px: f64,
}

/// Builds a type string from the base type, a data-type tag, and metadata.
#[must_use]
pub fn encode_type(data_type: Option<&str>, metadata: &[&str]) -> String {
    let mut parts = Vec::with_capacity(2 + metadata.len());
    parts.push(EVENT_MIME);
    if let Some(data_type) = data_type {
        parts.push(data_type);
    }
    parts.extend_from_slice(metadata);
    parts.join("+")
}

/// Encodes element geometry into an event type string.
#[must_use]
pub fn encode_external(data_type: &str, data: &ExternalDragData) -> String {
    let grab = alloc::format!("{}", data.grab_offset_x);
    let width = alloc::format!("{}", data.width_px);
    let height = alloc::format!("{}", data.height_px);
    encode_type(Some(data_type), &[&grab, &width, &height])
}

/// Returns `true` if a type string carries a Trellis event payload.
///
/// Used to probe the type list of an in-flight drag before any data is
/// available.
#[must_use]
pub fn is_event_type(type_string: &str) -> bool {
    type_string == EVENT_MIME
        || type_string
            .strip_prefix(EVENT_MIME)
            .is_some_and(|rest| rest.starts_with('+'))
}

/// Decodes element geometry from an event type string.
///
/// Expects the layout produced by [`encode_external`]; returns `None` for a
/// foreign base type, missing fields, or metadata that does not parse as a
/// finite number.
#[must_use]
pub fn decode_external(type_string: &str) -> Option<ExternalDragData> {
    if !is_event_type(type_string) {
        return None;
    }
    let parts: Vec<&str> = type_string.split('+').collect();
    // base, data type, then the three positional metadata fields.
    if parts.len() < 5 {
        return None;
    }
    let number = |s: &str| s.parse::<f64>().ok().filter(|n| n.is_finite());
    Some(ExternalDragData {
        grab_offset_x: number(parts[2])?,
        width_px: number(parts[3])?,
        height_px: number(parts[4])?,
    })
}
