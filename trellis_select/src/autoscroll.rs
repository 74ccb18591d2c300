// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge auto-scroll during marquee drags.

use kurbo::{Point, Size, Vec2};

/// The scrollable viewport over the grid content.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Visible size of the viewport, in pixels.
    pub size: Size,
    /// Current scroll offset (content pixels hidden left/above).
    pub scroll: Vec2,
    /// Total content size, in pixels.
    pub content: Size,
}

impl Viewport {
    /// Remaining scroll range on each axis, never negative.
    #[must_use]
    pub fn max_scroll(&self) -> Vec2 {
        Vec2::new(
            (self.content.width - self.size.width).max(0.0),
            (self.content.height - self.size.height).max(0.0),
        )
    }
}

/// Per-tick edge-scroll arithmetic.
///
/// When the pointer sits within `edge_px` of a viewport edge during a marquee
/// drag, each tick scrolls `speed_px` toward that edge, clamped to the
/// remaining scroll range. The function is pure; the host applies the delta
/// to its scroll position and re-feeds the marquee with the new offset so the
/// rectangle's far corner tracks the still-stationary pointer.
///
/// ```
/// use kurbo::{Point, Size, Vec2};
/// use trellis_select::{AutoScroll, Viewport};
///
/// let view = Viewport {
///     size: Size::new(400.0, 300.0),
///     scroll: Vec2::ZERO,
///     content: Size::new(1_000.0, 300.0),
/// };
/// let delta = AutoScroll::default().tick(&view, Point::new(395.0, 150.0));
/// assert_eq!(delta, Vec2::new(20.0, 0.0));
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AutoScroll {
    /// Distance from a viewport edge that arms scrolling, in pixels.
    pub edge_px: f64,
    /// Scroll applied per tick, in pixels.
    pub speed_px: f64,
}

impl Default for AutoScroll {
    fn default() -> Self {
        Self {
            edge_px: 20.0,
            speed_px: 20.0,
        }
    }
}

impl AutoScroll {
    /// The scroll delta for one tick, given a viewport-relative pointer.
    ///
    /// Zero on an axis when the pointer is away from both edges or the
    /// viewport is already at the end of its range.
    #[must_use]
    pub fn tick(&self, view: &Viewport, mouse: Point) -> Vec2 {
        let max = view.max_scroll();
        Vec2::new(
            self.axis(mouse.x, view.size.width, view.scroll.x, max.x),
            self.axis(mouse.y, view.size.height, view.scroll.y, max.y),
        )
    }

    fn axis(&self, mouse: f64, extent: f64, scroll: f64, max_scroll: f64) -> f64 {
        if mouse >= extent - self.edge_px {
            self.speed_px.min(max_scroll - scroll).max(0.0)
        } else if mouse <= self.edge_px {
            (-self.speed_px).max(-scroll).min(0.0)
        } else {
            0.0
        }
    }
}
