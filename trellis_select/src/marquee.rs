// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The marquee drag state machine.

use alloc::vec::Vec;
use core::hash::Hash;

use kurbo::{Point, Rect, Vec2};

use crate::{EventBox, SelectionSet, hit_test};

/// Outcome of releasing the pointer at the end of a marquee gesture.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarqueeEnd {
    /// No gesture was in progress.
    Idle,
    /// The pointer never left the click threshold; the selection was cleared.
    Click,
    /// The rectangle committed; `changed` is `false` when the final hit-test
    /// matched the selection already in place.
    Select {
        /// Whether the selection actually changed on release.
        changed: bool,
    },
}

#[derive(Clone, Debug)]
struct Drag<K> {
    anchor: Point,
    current: Point,
    snapshot: Vec<K>,
}

/// Owns the selection and the in-flight marquee rectangle.
///
/// All pointer positions are *viewport*-relative; the controller adds the
/// current scroll offset to store content-relative geometry, which is what
/// keeps the rectangle's far corner pinned while auto-scroll shifts the
/// viewport (the host re-calls [`MarqueeController::drag_to`] with the new
/// scroll after each auto-scroll tick).
///
/// Selection writes funnel through [`SelectionSet::replace_if_changed`], so a
/// marquee wiggling inside the same set of events does not spam the host with
/// revisions.
#[derive(Clone, Debug)]
pub struct MarqueeController<K> {
    selection: SelectionSet<K>,
    drag: Option<Drag<K>>,
    click_threshold_px: f64,
}

impl<K> Default for MarqueeController<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> MarqueeController<K> {
    /// Pointer travel (per axis) below which a release counts as a click.
    pub const DEFAULT_CLICK_THRESHOLD_PX: f64 = 5.0;

    /// Creates an idle controller with an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            selection: SelectionSet::new(),
            drag: None,
            click_threshold_px: Self::DEFAULT_CLICK_THRESHOLD_PX,
        }
    }

    /// Overrides the click threshold.
    #[must_use]
    pub const fn with_click_threshold(mut self, px: f64) -> Self {
        self.click_threshold_px = px;
        self
    }

    /// The current selection.
    #[must_use]
    pub fn selection(&self) -> &SelectionSet<K> {
        &self.selection
    }

    /// Mutable selection access, for click/toggle paths outside the marquee.
    pub fn selection_mut(&mut self) -> &mut SelectionSet<K> {
        &mut self.selection
    }

    /// Returns `true` while a marquee gesture is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.drag.is_some()
    }

    /// The marquee rectangle in content coordinates, if a gesture is active.
    #[must_use]
    pub fn rect(&self) -> Option<Rect> {
        self.drag
            .as_ref()
            .map(|d| Rect::from_points(d.anchor, d.current))
    }
}

impl<K: Clone> MarqueeController<K> {
    /// Starts a gesture at a viewport position under a scroll offset.
    ///
    /// With `extend` set (shift held), the current selection is snapshotted
    /// and every later hit-test unions into it instead of replacing it.
    pub fn begin(&mut self, point: Point, scroll: Vec2, extend: bool) {
        let anchor = point + scroll;
        let snapshot = if extend {
            self.selection.items().to_vec()
        } else {
            Vec::new()
        };
        self.drag = Some(Drag {
            anchor,
            current: anchor,
            snapshot,
        });
    }

    /// Moves the rectangle's far corner; returns the content-space rectangle.
    ///
    /// Returns `None` (and does nothing) while idle.
    pub fn drag_to(&mut self, point: Point, scroll: Vec2) -> Option<Rect> {
        let drag = self.drag.as_mut()?;
        drag.current = point + scroll;
        Some(Rect::from_points(drag.anchor, drag.current))
    }
}

impl<K: Clone + Eq + Hash> MarqueeController<K> {
    /// Applies one hit-test pass over the current rectangle.
    ///
    /// Returns `true` if the selection changed. Hosts coalesce calls to one
    /// per frame with `trellis_frame::FrameScheduler`; calling every pointer
    /// move is correct but wasteful.
    pub fn hit_test(&mut self, boxes: &[EventBox<K>]) -> bool {
        let Some(drag) = &self.drag else {
            return false;
        };
        let area = Rect::from_points(drag.anchor, drag.current);
        let candidate = unioned(&drag.snapshot, hit_test(boxes, area));
        self.selection.replace_if_changed(candidate)
    }

    /// Ends the gesture at a final pointer position.
    ///
    /// A release within the click threshold on both axes is a click: the
    /// selection is cleared and no hit-test runs. Otherwise a final hit-test
    /// over the release rectangle commits the selection.
    pub fn release(&mut self, point: Point, scroll: Vec2, boxes: &[EventBox<K>]) -> MarqueeEnd {
        let Some(mut drag) = self.drag.take() else {
            return MarqueeEnd::Idle;
        };
        drag.current = point + scroll;
        let area = Rect::from_points(drag.anchor, drag.current);

        if area.width() < self.click_threshold_px && area.height() < self.click_threshold_px {
            self.selection.clear();
            return MarqueeEnd::Click;
        }

        let candidate = unioned(&drag.snapshot, hit_test(boxes, area));
        let changed = self.selection.replace_if_changed(candidate);
        MarqueeEnd::Select { changed }
    }

    /// Abandons the gesture without touching the selection.
    pub fn cancel(&mut self) {
        self.drag = None;
    }
}

/// Snapshot first, then hits not already present.
fn unioned<K: Clone + PartialEq>(snapshot: &[K], hits: Vec<K>) -> Vec<K> {
    let mut out = snapshot.to_vec();
    for key in hits {
        if !out.contains(&key) {
            out.push(key);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::{Point, Rect, Vec2};

    use super::{MarqueeController, MarqueeEnd};
    use crate::EventBox;

    fn boxes() -> [EventBox<&'static str>; 3] {
        [
            EventBox::new("a", Rect::new(10.0, 10.0, 60.0, 40.0)),
            EventBox::new("b", Rect::new(70.0, 10.0, 120.0, 40.0)),
            EventBox::new("c", Rect::new(10.0, 100.0, 60.0, 130.0)),
        ]
    }

    #[test]
    fn drag_selects_intersecting_boxes() {
        let boxes = boxes();
        let mut m: MarqueeController<&str> = MarqueeController::new();

        m.begin(Point::new(0.0, 0.0), Vec2::ZERO, false);
        m.drag_to(Point::new(80.0, 50.0), Vec2::ZERO);
        assert!(m.hit_test(&boxes));
        assert_eq!(m.selection().items(), ["a", "b"]);

        assert_eq!(
            m.release(Point::new(80.0, 50.0), Vec2::ZERO, &boxes),
            MarqueeEnd::Select { changed: false }
        );
        assert!(!m.is_active());
    }

    #[test]
    fn anchor_is_pinned_to_content_while_scrolling() {
        let boxes = boxes();
        let mut m: MarqueeController<&str> = MarqueeController::new();

        // Anchor at content (0, 90). The viewport then scrolls down by 30
        // while the pointer stays put, so the same viewport point now maps
        // 30 px deeper into the content.
        m.begin(Point::new(0.0, 90.0), Vec2::ZERO, false);
        m.drag_to(Point::new(65.0, 95.0), Vec2::ZERO);
        m.hit_test(&boxes);
        assert!(m.selection().is_empty());

        m.drag_to(Point::new(65.0, 95.0), Vec2::new(0.0, 30.0));
        assert_eq!(m.rect(), Some(Rect::new(0.0, 90.0, 65.0, 125.0)));
        assert!(m.hit_test(&boxes));
        assert_eq!(m.selection().items(), ["c"]);
    }

    #[test]
    fn sub_threshold_release_is_a_click_and_clears() {
        let boxes = boxes();
        let mut m: MarqueeController<&str> = MarqueeController::new();
        m.selection_mut().replace(vec!["a", "b"]);

        m.begin(Point::new(200.0, 200.0), Vec2::ZERO, false);
        m.drag_to(Point::new(203.0, 202.0), Vec2::ZERO);
        assert_eq!(
            m.release(Point::new(203.0, 202.0), Vec2::ZERO, &boxes),
            MarqueeEnd::Click
        );
        assert!(m.selection().is_empty());
    }

    #[test]
    fn shift_marquee_unions_with_the_snapshot() {
        let boxes = boxes();
        let mut m: MarqueeController<&str> = MarqueeController::new();
        m.selection_mut().replace(vec!["c"]);

        m.begin(Point::new(0.0, 0.0), Vec2::ZERO, true);
        m.drag_to(Point::new(65.0, 50.0), Vec2::ZERO);
        assert!(m.hit_test(&boxes));
        assert_eq!(m.selection().items(), ["c", "a"]);

        // Shrinking the rectangle away from "a" falls back to the snapshot.
        m.drag_to(Point::new(5.0, 5.0), Vec2::ZERO);
        assert!(m.hit_test(&boxes));
        assert_eq!(m.selection().items(), ["c"]);
    }

    #[test]
    fn hit_test_while_idle_is_a_no_op() {
        let boxes = boxes();
        let mut m: MarqueeController<&str> = MarqueeController::new();
        assert!(!m.hit_test(&boxes));
        assert_eq!(
            m.release(Point::new(0.0, 0.0), Vec2::ZERO, &boxes),
            MarqueeEnd::Idle
        );
    }

    #[test]
    fn cancel_keeps_the_selection() {
        let boxes = boxes();
        let mut m: MarqueeController<&str> = MarqueeController::new();
        m.begin(Point::new(0.0, 0.0), Vec2::ZERO, false);
        m.drag_to(Point::new(80.0, 50.0), Vec2::ZERO);
        m.hit_test(&boxes);

        m.cancel();
        assert!(!m.is_active());
        assert_eq!(m.selection().items(), ["a", "b"]);
    }
}
