// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Timescale: pixel/time conversion, snapping, and tick generation.
//!
//! A gantt timeline is a 1D mapping between epoch milliseconds and track
//! pixels, parameterized by an origin timestamp, a `ms_per_pixel` ratio, and
//! a *scheduling threshold* — the minimum time granularity drag and resize
//! operations snap to. [`TimeScale`] owns that mapping and is shared by the
//! drag controllers and the row composer, which keeps the drag preview and
//! the committed position computed with the same arithmetic.
//!
//! ```
//! use trellis_timescale::TimeScale;
//!
//! // Origin at t=0, 10 ms per pixel, snap to 100 ms.
//! let scale = TimeScale::new(0, 10.0, 100);
//!
//! assert_eq!(scale.time_to_px(2_000), 200.0);
//! assert_eq!(scale.px_to_time(200.0), 2_000);
//!
//! // 37 px ≙ 370 ms, snapped to the nearest 100 ms boundary.
//! assert_eq!(scale.snap_px_to_time(37.0), 400);
//! ```
//!
//! The [`ticks`] module tiles a date range with cells produced by caller
//! supplied boundary functions (hour/day/month tiers and so on) and derives
//! the layered guideline offsets for a background grid.
//!
//! This crate is `no_std` and uses `alloc`; building without `std` requires
//! the `libm` feature for Peniko's float fallbacks.

#![no_std]

extern crate alloc;

pub mod ticks;

use trellis_model::Interval;

/// Rounds half away from negative infinity (`0.5 → 1`, `-0.5 → 0`), the
/// rounding all snap arithmetic in this crate shares.
pub(crate) fn round_half_up(x: f64) -> i64 {
    let shifted = x + 0.5;
    let truncated = shifted as i64;
    if (truncated as f64) > shifted {
        truncated - 1
    } else {
        truncated
    }
}

/// How event geometry is laid out along the track.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutMode {
    /// Discrete columns, one per scheduling threshold; events occupy a column
    /// span derived from their snapped offsets.
    #[default]
    Grid,
    /// Continuous pixel positions; events get fractional left/width values.
    Free,
}

/// Bidirectional mapping between track pixels and epoch milliseconds.
///
/// All conversions are relative to `origin_ms`, the timestamp rendered at
/// pixel 0 of the track (the start of the visible date range).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimeScale {
    origin_ms: i64,
    ms_per_pixel: f64,
    threshold_ms: i64,
}

impl TimeScale {
    /// Creates a scale from an origin timestamp, a time-per-pixel ratio, and
    /// a scheduling threshold.
    ///
    /// Non-positive ratios and thresholds are normalized to the smallest
    /// usable value rather than rejected; both are configuration constants
    /// in practice.
    #[must_use]
    pub fn new(origin_ms: i64, ms_per_pixel: f64, threshold_ms: i64) -> Self {
        Self {
            origin_ms,
            ms_per_pixel: ms_per_pixel.max(f64::MIN_POSITIVE),
            threshold_ms: threshold_ms.max(1),
        }
    }

    /// The timestamp rendered at pixel 0.
    #[must_use]
    pub const fn origin_ms(&self) -> i64 {
        self.origin_ms
    }

    /// Milliseconds represented by one pixel.
    #[must_use]
    pub const fn ms_per_pixel(&self) -> f64 {
        self.ms_per_pixel
    }

    /// The snapping granularity in milliseconds.
    #[must_use]
    pub const fn threshold_ms(&self) -> i64 {
        self.threshold_ms
    }

    /// The snapping granularity in track pixels.
    #[must_use]
    pub fn threshold_px(&self) -> f64 {
        self.threshold_ms as f64 / self.ms_per_pixel
    }

    /// Converts a timestamp to a track-relative pixel offset.
    #[must_use]
    pub fn time_to_px(&self, t_ms: i64) -> f64 {
        (t_ms - self.origin_ms) as f64 / self.ms_per_pixel
    }

    /// Converts a track-relative pixel offset to a timestamp (unsnapped).
    #[must_use]
    pub fn px_to_time(&self, px: f64) -> i64 {
        self.origin_ms + round_half_up(px * self.ms_per_pixel)
    }

    /// Converts a pixel width to a millisecond duration (unsnapped).
    #[must_use]
    pub fn px_to_duration(&self, px: f64) -> i64 {
        round_half_up(px * self.ms_per_pixel)
    }

    /// Snaps a timestamp to the nearest threshold multiple relative to the
    /// timeline origin.
    #[must_use]
    pub fn snap_time(&self, t_ms: i64) -> i64 {
        let steps = round_half_up((t_ms - self.origin_ms) as f64 / self.threshold_ms as f64);
        self.origin_ms + steps * self.threshold_ms
    }

    /// Converts a track-relative pixel offset to a snapped timestamp.
    ///
    /// This is the one snapping routine shared by move preview, move commit,
    /// and resize; the preview disagreeing with the committed state would be
    /// a correctness bug, so all call sites go through here.
    #[must_use]
    pub fn snap_px_to_time(&self, px: f64) -> i64 {
        let steps = round_half_up(px / self.threshold_px());
        self.origin_ms + steps * self.threshold_ms
    }

    /// The grid column holding a (snapped) timestamp, zero-based.
    #[must_use]
    pub fn column(&self, t_ms: i64) -> i64 {
        round_half_up((t_ms - self.origin_ms) as f64 / self.threshold_ms as f64)
    }

    /// The half-open grid column span covering an interval.
    #[must_use]
    pub fn column_span(&self, interval: Interval) -> GridSpan {
        GridSpan {
            start: self.column(interval.start_ms),
            end: self.column(interval.end_ms),
        }
    }

    /// The number of grid columns needed to tile `range`.
    ///
    /// Partial trailing columns count, so a range that does not divide evenly
    /// still covers its full width.
    #[must_use]
    pub fn column_count(&self, range: Interval) -> i64 {
        let duration = range.duration_ms().max(0);
        duration / self.threshold_ms + i64::from(duration % self.threshold_ms != 0)
    }

    /// Continuous left/width pixel geometry for an interval.
    #[must_use]
    pub fn span_px(&self, interval: Interval) -> (f64, f64) {
        let left = self.time_to_px(interval.start_ms);
        let right = self.time_to_px(interval.end_ms);
        (left, right - left)
    }
}

/// A half-open `[start, end)` range of grid columns, zero-based.
///
/// CSS-style one-based grid lines are `start + 1 .. end + 1`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GridSpan {
    /// First occupied column.
    pub start: i64,
    /// One past the last occupied column.
    pub end: i64,
}
