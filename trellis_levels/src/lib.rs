// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Levels: pack overlapping time-boxed events into display levels.
//!
//! A "level" is a display sub-row within a resource's lane. The packing rule
//! is greedy and deterministic: events are processed in ascending `start_ms`
//! order (stable, so equal starts keep their input order) and each event goes
//! to the **lowest-numbered** level where it overlaps nothing already placed,
//! creating a new level only when no existing one fits.
//!
//! Overlap is half-open `[start, end)`: touching boundaries share a level, and
//! a zero-duration event collides only when strictly inside another span. See
//! [`trellis_model::Interval::overlaps`].
//!
//! ## Minimal example
//!
//! ```
//! use trellis_levels::events_by_level;
//! use trellis_model::Event;
//!
//! let levels = events_by_level([
//!     Event::new("a", "r", 0, 100),
//!     Event::new("b", "r", 50, 150),
//!     Event::new("c", "r", 200, 300),
//! ])
//! .unwrap();
//!
//! // `a` and `c` fit together on level 0; `b` is pushed to level 1.
//! assert_eq!(levels.len(), 2);
//! assert_eq!(levels[0].iter().map(|e| e.id.as_str()).collect::<Vec<_>>(), ["a", "c"]);
//! assert_eq!(levels[1][0].id, "b");
//! ```
//!
//! ## Drag-preview stability
//!
//! An incoming item whose key matches an already-placed item **replaces** it
//! at its existing level slot instead of being packed again. Row composition
//! relies on this when it substitutes a live placeholder for the event being
//! dragged: the event must not fight its own placeholder for a level.
//!
//! ## Failure
//!
//! An item with `end_ms < start_ms` is a contract violation from the host
//! application; packing fails fast with [`PackError`] rather than silently
//! misplacing it.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use smallvec::SmallVec;
use trellis_model::{Interval, Timeboxed};

/// Packed levels: the outer sequence is level 0 upward, each level an ordered
/// list of non-overlapping items.
///
/// Most rows need only a handful of levels, so the outer sequence is inline
/// up to four entries.
pub type Levels<T> = SmallVec<[Vec<T>; 4]>;

/// Error raised when packing encounters an item whose end precedes its start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackError {
    /// Key of the offending item.
    pub key: String,
    /// The malformed interval.
    pub interval: Interval,
}

impl fmt::Display for PackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "event {:?} has end {} before start {}",
            self.key, self.interval.end_ms, self.interval.start_ms
        )
    }
}

impl core::error::Error for PackError {}

/// Returns the lowest level index at which `entry` fits without overlap.
///
/// Levels are scanned from index 0 upward; the first level containing no
/// overlapping item wins. If every existing level conflicts, the returned
/// index is `levels.len()`, i.e. a new level.
#[must_use]
pub fn check_level<T: Timeboxed>(entry: &impl Timeboxed, levels: &[Vec<T>]) -> usize {
    let span = entry.interval();
    let mut level = 0;
    loop {
        let Some(occupants) = levels.get(level) else {
            return level;
        };
        if !occupants.iter().any(|el| span.overlaps(el.interval())) {
            return level;
        }
        level += 1;
    }
}

/// Packs items into levels after a stable sort by ascending `start_ms`.
///
/// Equivalent to [`events_by_level_sorted_by`] with the default comparator.
pub fn events_by_level<T: Timeboxed>(
    events: impl IntoIterator<Item = T>,
) -> Result<Levels<T>, PackError> {
    events_by_level_sorted_by(events, |a, b| a.start_ms().cmp(&b.start_ms()))
}

/// Packs items into levels, ordering the input with a caller comparator.
///
/// The sort is stable, so items the comparator considers equal keep their
/// input order. Within a level, items keep insertion order (which is not
/// necessarily sorted once replace-by-key has happened).
pub fn events_by_level_sorted_by<T: Timeboxed>(
    events: impl IntoIterator<Item = T>,
    compare: impl FnMut(&T, &T) -> core::cmp::Ordering,
) -> Result<Levels<T>, PackError> {
    let mut sorted: Vec<T> = events.into_iter().collect();
    sorted.sort_by(compare);

    let mut levels: Levels<T> = SmallVec::new();
    for event in sorted {
        let span = event.interval();
        if !span.is_well_formed() {
            return Err(PackError {
                key: String::from(event.key()),
                interval: span,
            });
        }

        // Replace-by-key keeps an item's level slot stable when it is packed
        // again (for example a placeholder standing in for its source event).
        if let Some(slot) = find_slot(&levels, event.key()) {
            levels[slot.0][slot.1] = event;
            continue;
        }

        let level = check_level(&event, &levels);
        if level == levels.len() {
            levels.push(Vec::new());
        }
        levels[level].push(event);
    }

    Ok(levels)
}

fn find_slot<T: Timeboxed>(levels: &Levels<T>, key: &str) -> Option<(usize, usize)> {
    levels.iter().enumerate().find_map(|(li, level)| {
        level
            .iter()
            .position(|el| el.key() == key)
            .map(|ei| (li, ei))
    })
}
