// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle intersection hit-testing.

use alloc::vec::Vec;

use kurbo::Rect;

/// One selectable event's rendered bounds, in content coordinates.
///
/// Hosts rebuild the box list from the current row layout whenever geometry
/// changes; hit-testing is stateless over it.
#[derive(Clone, Debug, PartialEq)]
pub struct EventBox<K> {
    /// Selection key of the event.
    pub key: K,
    /// Rendered bounds, content-relative (scroll-independent).
    pub rect: Rect,
}

impl<K> EventBox<K> {
    /// Creates an event box.
    pub fn new(key: K, rect: Rect) -> Self {
        Self { key, rect }
    }
}

/// Boundary-inclusive axis-aligned intersection test.
///
/// Rectangles that merely share an edge count as intersecting: a marquee
/// dragged exactly to an event's border selects it, which reads as more
/// forgiving than strict overlap at typical zoom levels.
#[must_use]
pub fn rects_intersect(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

/// Keys of all boxes intersecting `area`, in box-list order.
#[must_use]
pub fn hit_test<K: Clone>(boxes: &[EventBox<K>], area: Rect) -> Vec<K> {
    boxes
        .iter()
        .filter(|b| rects_intersect(b.rect, area))
        .map(|b| b.key.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::Rect;

    use super::{EventBox, hit_test, rects_intersect};

    #[test]
    fn touching_edges_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rects_intersect(a, Rect::new(10.0, 0.0, 20.0, 10.0)));
        assert!(rects_intersect(a, Rect::new(0.0, 10.0, 10.0, 20.0)));
        assert!(rects_intersect(a, Rect::new(10.0, 10.0, 20.0, 20.0)));
    }

    #[test]
    fn separated_rects_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!rects_intersect(a, Rect::new(10.1, 0.0, 20.0, 10.0)));
        assert!(!rects_intersect(a, Rect::new(0.0, 50.0, 10.0, 60.0)));
    }

    #[test]
    fn containment_intersects_both_ways() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 60.0, 60.0);
        assert!(rects_intersect(outer, inner));
        assert!(rects_intersect(inner, outer));
    }

    #[test]
    fn hit_test_keeps_box_order() {
        let boxes = [
            EventBox::new("a", Rect::new(0.0, 0.0, 10.0, 10.0)),
            EventBox::new("b", Rect::new(200.0, 0.0, 210.0, 10.0)),
            EventBox::new("c", Rect::new(5.0, 5.0, 15.0, 15.0)),
        ];
        let hits = hit_test(&boxes, Rect::new(0.0, 0.0, 20.0, 20.0));
        assert_eq!(hits, ["a", "c"]);

        let none: Vec<&str> = hit_test(&boxes, Rect::new(500.0, 500.0, 600.0, 600.0));
        assert!(none.is_empty());
    }
}
