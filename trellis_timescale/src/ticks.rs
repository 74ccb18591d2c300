// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-axis tick generation and background-grid guidelines.
//!
//! A multi-resolution time axis is a stack of independent *tick levels*
//! (month boundaries, day boundaries, hour boundaries, …). Each level tiles
//! the same date range on its own, driven by a caller-supplied
//! `next_timestamp` function, and all levels share one `ms_per_pixel` scale
//! for duration → width conversion.
//!
//! ```
//! use trellis_model::Interval;
//! use trellis_timescale::ticks::tile_range;
//!
//! const DAY: i64 = 24 * 60 * 60 * 1000;
//!
//! let cells = tile_range(|prev| prev + DAY, Interval::new(0, 3 * DAY));
//! assert_eq!(cells.len(), 3);
//! assert!(cells.iter().all(|c| c.duration_ms == DAY));
//! ```
//!
//! The final cell is clamped so its duration never runs past the end of the
//! range; a range that does not divide evenly ends with a shorter cell.

use alloc::vec::Vec;

use peniko::Color;
use trellis_model::Interval;

/// One cell of a tick level: a boundary timestamp plus the span to the next.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TickCell {
    /// Boundary timestamp, epoch milliseconds.
    pub start_ms: i64,
    /// Distance to the next boundary, clamped to the end of the range.
    pub duration_ms: i64,
}

/// Visual weight of one tick level's guidelines.
///
/// Rendering is the host's concern; the engine only carries the style through
/// so layered grids (faint hour lines under bold day lines) keep their level
/// association.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GuidelineStyle {
    /// Line color.
    pub color: Color,
    /// Line width in pixels.
    pub width: f64,
}

impl Default for GuidelineStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

/// One tier of a multi-resolution time axis.
pub struct TickLevel {
    next: alloc::boxed::Box<dyn Fn(i64) -> i64>,
    /// Guideline style for this tier's boundaries.
    pub style: GuidelineStyle,
}

impl core::fmt::Debug for TickLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TickLevel")
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

impl TickLevel {
    /// Creates a tick level from a boundary successor function.
    ///
    /// `next` receives the previous boundary and returns the following one;
    /// it must be strictly increasing for the level to advance.
    #[must_use]
    pub fn new(next: impl Fn(i64) -> i64 + 'static, style: GuidelineStyle) -> Self {
        Self {
            next: alloc::boxed::Box::new(next),
            style,
        }
    }

    /// A fixed-step level (every `step_ms` milliseconds).
    #[must_use]
    pub fn fixed(step_ms: i64, style: GuidelineStyle) -> Self {
        let step = step_ms.max(1);
        Self::new(move |prev| prev + step, style)
    }

    /// Tiles `range` with this level's cells.
    #[must_use]
    pub fn cells(&self, range: Interval) -> Vec<TickCell> {
        tile_range(&self.next, range)
    }
}

/// Tiles a date range with cells produced by a boundary successor function.
///
/// Starting at `range.start_ms`, boundaries are accepted while they stay
/// below `range.end_ms`; the final cell's duration is clamped to the range
/// end. An empty or inverted range produces no cells, as does a successor
/// that fails to advance.
pub fn tile_range(next: impl Fn(i64) -> i64, range: Interval) -> Vec<TickCell> {
    if range.duration_ms() <= 0 {
        return Vec::new();
    }

    let mut boundaries = Vec::new();
    let mut stamp = range.start_ms;
    boundaries.push(stamp);
    loop {
        let candidate = next(stamp);
        if candidate <= stamp {
            // Non-advancing successor; bail out with what we have.
            break;
        }
        if candidate >= range.end_ms {
            break;
        }
        boundaries.push(candidate);
        stamp = candidate;
    }

    boundaries
        .iter()
        .map(|&start_ms| {
            let natural_end = next(start_ms).max(start_ms);
            TickCell {
                start_ms,
                duration_ms: natural_end.min(range.end_ms) - start_ms,
            }
        })
        .collect()
}

/// A single vertical guideline of the background grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Guideline {
    /// Track-relative x offset in pixels.
    pub x: f64,
    /// Style inherited from the owning tick level.
    pub style: GuidelineStyle,
}

/// Cumulative pixel offsets of one level's cell boundaries.
///
/// One guideline is emitted per cell *end*; a line that would land exactly at
/// `limit_px` (the track's total width) is skipped, since the track edge
/// already delimits the grid.
#[must_use]
pub fn guideline_offsets(cells: &[TickCell], ms_per_pixel: f64, limit_px: f64) -> Vec<f64> {
    let mut offset = 0.0;
    let mut out = Vec::new();
    for cell in cells {
        offset += cell.duration_ms as f64 / ms_per_pixel;
        if offset != limit_px {
            out.push(offset);
        }
    }
    out
}

/// Builds the layered background grid for a stack of tick levels.
///
/// Levels are tiled independently over `range` and flattened in input order,
/// so later (usually bolder) levels paint over earlier ones when the host
/// renders them in sequence. The track width is derived from the range and
/// scale, matching the width the row composer reports for the same range.
#[must_use]
pub fn background_guidelines(
    levels: &[TickLevel],
    range: Interval,
    ms_per_pixel: f64,
) -> Vec<Guideline> {
    let limit_px = range.duration_ms().max(0) as f64 / ms_per_pixel;
    let mut out = Vec::new();
    for level in levels {
        let cells = level.cells(range);
        for x in guideline_offsets(&cells, ms_per_pixel, limit_px) {
            out.push(Guideline {
                x,
                style: level.style,
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use trellis_model::Interval;

    use super::{GuidelineStyle, TickCell, TickLevel, background_guidelines, tile_range};

    const DAY: i64 = 24 * 60 * 60 * 1000;

    #[test]
    fn even_range_tiles_exactly() {
        let cells = tile_range(|prev| prev + DAY, Interval::new(0, 3 * DAY));
        assert_eq!(cells.len(), 3);
        for (i, cell) in cells.iter().enumerate() {
            assert_eq!(cell.start_ms, i as i64 * DAY);
            assert_eq!(cell.duration_ms, DAY);
        }
    }

    #[test]
    fn uneven_range_clamps_final_cell() {
        let cells = tile_range(|prev| prev + DAY, Interval::new(0, 2 * DAY + DAY / 2));
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[0].duration_ms, DAY);
        assert_eq!(cells[1].duration_ms, DAY);
        assert_eq!(cells[2].duration_ms, DAY / 2);
    }

    #[test]
    fn range_shorter_than_one_step_yields_one_clamped_cell() {
        let cells = tile_range(|prev| prev + DAY, Interval::new(100, 500));
        assert_eq!(
            cells,
            [TickCell {
                start_ms: 100,
                duration_ms: 400
            }]
        );
    }

    #[test]
    fn empty_range_yields_no_cells() {
        assert!(tile_range(|prev| prev + DAY, Interval::new(500, 500)).is_empty());
        assert!(tile_range(|prev| prev + DAY, Interval::new(500, 100)).is_empty());
    }

    #[test]
    fn non_advancing_successor_terminates() {
        let cells = tile_range(|prev| prev, Interval::new(0, 1_000));
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].duration_ms, 0);
    }

    #[test]
    fn irregular_steps_follow_the_successor() {
        // Month-like: alternating 3-unit and 1-unit steps.
        let next = |prev: i64| if (prev / 10) % 2 == 0 { prev + 30 } else { prev + 10 };
        let cells = tile_range(next, Interval::new(0, 55));
        let starts: Vec<i64> = cells.iter().map(|c| c.start_ms).collect();
        assert_eq!(starts, [0, 30, 40]);
        assert_eq!(cells.last().unwrap().duration_ms, 15);
    }

    #[test]
    fn guidelines_skip_the_track_edge() {
        let level = TickLevel::fixed(DAY, GuidelineStyle::default());
        // 3 days at 1 ms/px: lines at day 1 and day 2, none at the far edge.
        let lines = background_guidelines(
            core::slice::from_ref(&level),
            Interval::new(0, 3 * DAY),
            1.0,
        );
        let xs: Vec<f64> = lines.iter().map(|l| l.x).collect();
        assert_eq!(xs, [DAY as f64, 2.0 * DAY as f64]);
    }

    #[test]
    fn uneven_track_keeps_final_guideline_inside() {
        let level = TickLevel::fixed(100, GuidelineStyle::default());
        let lines = background_guidelines(core::slice::from_ref(&level), Interval::new(0, 250), 1.0);
        let xs: Vec<f64> = lines.iter().map(|l| l.x).collect();
        // Cell ends at 100, 200, 250; the 250 line sits on the edge and is skipped.
        assert_eq!(xs, [100.0, 200.0]);
    }

    #[test]
    fn layers_flatten_in_input_order() {
        let faint = GuidelineStyle {
            width: 1.0,
            ..GuidelineStyle::default()
        };
        let bold = GuidelineStyle {
            width: 3.0,
            ..GuidelineStyle::default()
        };
        let levels = [TickLevel::fixed(100, faint), TickLevel::fixed(200, bold)];
        let lines = background_guidelines(&levels, Interval::new(0, 400), 1.0);

        let widths: Vec<f64> = lines.iter().map(|l| l.style.width).collect();
        assert_eq!(widths, [1.0, 1.0, 1.0, 3.0]);
        assert_eq!(lines[3].x, 200.0);
    }
}
