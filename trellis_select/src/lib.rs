// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Select: marquee selection, hit-testing, and edge auto-scroll.
//!
//! Selection over a scrolling gantt grid splits into three pieces:
//!
//! - [`SelectionSet`]: the selected keys plus a revision counter. Writes go
//!   through change-detecting methods, so a hit-test that produces the same
//!   set (a *multiset* comparison, since duplicate keys are representable)
//!   does not bump the revision or trigger host re-renders.
//! - [`MarqueeController`]: the drag-rectangle state machine. The anchor is
//!   stored in *content* coordinates (viewport position plus scroll), so the
//!   rectangle stays pinned to the grid while auto-scroll moves the viewport
//!   under the pointer. A release that never left the click threshold is a
//!   click, which clears the selection.
//! - [`AutoScroll`]: pure edge-scroll arithmetic. Each tick maps a pointer
//!   near a viewport edge to a scroll delta, clamped to the remaining scroll
//!   range, and the host re-feeds the new scroll offset into the marquee.
//!
//! ```
//! use kurbo::{Point, Rect, Vec2};
//! use trellis_select::{EventBox, MarqueeController};
//!
//! let boxes = [
//!     EventBox::new("a", Rect::new(10.0, 10.0, 60.0, 40.0)),
//!     EventBox::new("b", Rect::new(300.0, 10.0, 350.0, 40.0)),
//! ];
//!
//! let mut marquee: MarqueeController<&str> = MarqueeController::new();
//! marquee.begin(Point::new(0.0, 0.0), Vec2::ZERO, false);
//! marquee.drag_to(Point::new(100.0, 100.0), Vec2::ZERO);
//! marquee.hit_test(&boxes);
//! marquee.release(Point::new(100.0, 100.0), Vec2::ZERO, &boxes);
//!
//! assert_eq!(marquee.selection().items(), ["a"]);
//! ```
//!
//! Hit-testing every pointer move is wasteful; hosts coalesce the calls with
//! `trellis_frame::FrameScheduler` so each frame hit-tests at most once, with
//! the latest rectangle.
//!
//! This crate is `no_std` and uses `alloc`; building without `std` requires
//! the `libm` feature for Kurbo's float fallbacks.

#![no_std]

extern crate alloc;

mod autoscroll;
mod hit;
mod marquee;

pub use autoscroll::{AutoScroll, Viewport};
pub use hit::{EventBox, hit_test, rects_intersect};
pub use marquee::{MarqueeController, MarqueeEnd};

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;

/// The set of selected keys, with change detection.
///
/// Keys are held in insertion order and may repeat; equality between
/// candidate sets is therefore multiset equality, not set equality. The
/// revision counter increments on every observable change and is what hosts
/// diff against to decide whether to re-render.
#[derive(Clone, Debug)]
pub struct SelectionSet<K> {
    items: Vec<K>,
    revision: u64,
}

impl<K> Default for SelectionSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> SelectionSet<K> {
    /// Creates an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            revision: 0,
        }
    }

    /// The selected keys, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[K] {
        &self.items
    }

    /// Number of selected keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Monotonic change counter; unchanged writes leave it untouched.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Unconditionally replaces the selection.
    pub fn replace(&mut self, items: Vec<K>) {
        self.items = items;
        self.revision = self.revision.wrapping_add(1);
    }

    /// Empties the selection. Returns `true` if it was non-empty.
    pub fn clear(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        self.items.clear();
        self.revision = self.revision.wrapping_add(1);
        true
    }
}

impl<K: PartialEq> SelectionSet<K> {
    /// Returns `true` if `key` is selected.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.items.contains(key)
    }

    /// Adds `key` if absent, removes it if present (ctrl-click semantics).
    ///
    /// Returns `true` if the key was added.
    pub fn toggle(&mut self, key: K) -> bool {
        self.revision = self.revision.wrapping_add(1);
        if let Some(at) = self.items.iter().position(|k| *k == key) {
            self.items.remove(at);
            false
        } else {
            self.items.push(key);
            true
        }
    }
}

impl<K: Eq + Hash> SelectionSet<K> {
    /// Replaces the selection only if `items` differs as a multiset.
    ///
    /// Returns `true` if a replacement happened. Order differences alone do
    /// not count as a change, so repeated identical hit-tests are free.
    pub fn replace_if_changed(&mut self, items: Vec<K>) -> bool {
        if same_multiset(&self.items, &items) {
            return false;
        }
        self.replace(items);
        true
    }
}

/// Multiset equality: same keys with the same multiplicities, order ignored.
fn same_multiset<K: Eq + Hash>(a: &[K], b: &[K]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut counts: HashMap<&K, usize> = HashMap::with_capacity(a.len());
    for key in a {
        *counts.entry(key).or_insert(0) += 1;
    }
    for key in b {
        let Some(count) = counts.get_mut(key) else {
            return false;
        };
        *count -= 1;
        if *count == 0 {
            counts.remove(key);
        }
    }
    counts.is_empty()
}
