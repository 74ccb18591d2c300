// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The resize-gesture controller.

use kurbo::Point;
use trellis_model::Interval;
use trellis_timescale::TimeScale;

/// Which event boundary a resize handle drags.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResizeDirection {
    /// The start boundary follows the pointer.
    Left,
    /// The end boundary follows the pointer.
    Right,
}

/// Computes resized intervals from pointer positions.
///
/// Stateless per gesture: the host calls [`ResizeController::propose`] with
/// each pointer sample for the live preview and once more on release for the
/// commit, so preview and commit cannot disagree.
///
/// The dragged boundary snaps to the scheduling threshold; the opposite
/// boundary stays fixed. Dragging past the fixed boundary swaps the two, so
/// the result is always well-formed:
///
/// ```
/// use kurbo::Point;
/// use trellis_drag::{ResizeController, ResizeDirection};
/// use trellis_model::Interval;
/// use trellis_timescale::TimeScale;
///
/// let sizer = ResizeController::new(TimeScale::new(0, 10.0, 100));
/// let current = Interval::new(400, 800);
///
/// // Dragging the right edge left past the start: boundaries swap.
/// let resized = sizer.propose(
///     Point::new(10.0, 0.0),
///     Some(0.0),
///     ResizeDirection::Right,
///     current,
/// );
/// assert_eq!(resized, Interval::new(100, 400));
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ResizeController {
    scale: TimeScale,
    min_duration_ms: Option<i64>,
}

impl ResizeController {
    /// Creates a controller with no minimum duration.
    #[must_use]
    pub fn new(scale: TimeScale) -> Self {
        Self {
            scale,
            min_duration_ms: None,
        }
    }

    /// Enforces a minimum duration on proposed intervals.
    ///
    /// When the pointer would produce a shorter interval, the dragged boundary
    /// is pushed back out to `min_ms` away from the fixed boundary.
    #[must_use]
    pub fn with_min_duration(mut self, min_ms: i64) -> Self {
        self.min_duration_ms = Some(min_ms.max(0));
        self
    }

    /// The scale used for snapping.
    #[must_use]
    pub fn scale(&self) -> TimeScale {
        self.scale
    }

    /// Proposes the resized interval for one pointer sample.
    ///
    /// `row_left_x` is the x of the row track's left edge in the pointer's
    /// coordinate space; when the host cannot provide it (`None`), the event
    /// is left untouched and `current` comes back unchanged rather than
    /// guessing a boundary.
    #[must_use]
    pub fn propose(
        &self,
        pointer: Point,
        row_left_x: Option<f64>,
        direction: ResizeDirection,
        current: Interval,
    ) -> Interval {
        let Some(row_left_x) = row_left_x else {
            return current;
        };

        let dragged = self.scale.snap_px_to_time(pointer.x - row_left_x);
        let fixed = match direction {
            ResizeDirection::Left => current.end_ms,
            ResizeDirection::Right => current.start_ms,
        };

        let mut start_ms = dragged.min(fixed);
        let mut end_ms = dragged.max(fixed);
        if let Some(min) = self.min_duration_ms
            && end_ms - start_ms < min
        {
            // Push the dragged boundary away from the fixed one; a dead-on
            // hit falls back to the handle's own side.
            let shrink_start = dragged < fixed
                || (dragged == fixed && direction == ResizeDirection::Left);
            if shrink_start {
                start_ms = end_ms - min;
            } else {
                end_ms = start_ms + min;
            }
        }
        Interval::new(start_ms, end_ms)
    }
}
