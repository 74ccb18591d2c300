// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row-offset resolution for multi-event drops.

use trellis_model::{Resource, resource_index};

/// Resolves the destination row for one event of a multi-event drop.
///
/// The event's row offset from the anchor (the grabbed event's row) is
/// preserved: `destination = hovered + (event - anchor)`, computed in resource
/// list indices and clamped to the list. Ids that are not in the list count as
/// index `-1`, so a stale id degrades to an off-by-one rather than a panic.
///
/// Returns `None` only when the resource list itself is empty.
#[must_use]
pub fn resolve_distance<'r, P>(
    resources: &'r [Resource<P>],
    anchor: &str,
    event_resource: &str,
    hovered: &str,
) -> Option<&'r str> {
    if resources.is_empty() {
        return None;
    }
    let index = |id: &str| resource_index(resources, id).map_or(-1, |i| i as i64);

    let diff = index(event_resource) - index(anchor);
    let destination = (index(hovered) + diff).clamp(0, resources.len() as i64 - 1);
    Some(&resources[destination as usize].id)
}
