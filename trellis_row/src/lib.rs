// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Row: composing drag state and canonical events into positioned rows.
//!
//! A rendered gantt row is not just the resource's events: mid-gesture it
//! hides the events being dragged, substitutes the resize preview's dates,
//! and adds the move gesture's placeholders, then packs the merged set into
//! display levels and assigns pixel (or grid-column) geometry. [`RowComposer`]
//! does that merge deterministically from inputs the host passes each frame,
//! so a row can always be rebuilt from scratch after any gesture ends.
//!
//! ```
//! use trellis_model::Event;
//! use trellis_row::RowComposer;
//! use trellis_timescale::{LayoutMode, TimeScale};
//!
//! let composer = RowComposer::new(TimeScale::new(0, 10.0, 100), LayoutMode::Free);
//! let events = [
//!     Event::new("a", "row-1", 400, 1_400),
//!     Event::new("b", "row-1", 600, 800),
//! ];
//!
//! let row = composer.compose(&events, &[], &[], None).unwrap();
//! assert_eq!(row.level_count, 2);
//! assert_eq!(row.height_px, 98.0); // 2 levels of 45 px plus an 8 px gap
//! ```
//!
//! Row heights are content-driven and change as packing changes;
//! [`HeightTracker`] turns the per-frame recomputed height into an
//! edge-triggered "height changed" signal for hosts that need to resize
//! surrounding chrome.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use trellis_levels::{PackError, events_by_level};
use trellis_model::{Event, Interval, Placeholder, Resource, Timeboxed};
use trellis_timescale::{GridSpan, LayoutMode, TimeScale};

/// Vertical sizing constants for a row's display levels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RowMetrics {
    /// Height of one display level, in pixels.
    pub level_height_px: f64,
    /// Vertical gap between adjacent levels, in pixels.
    pub level_gap_px: f64,
}

impl Default for RowMetrics {
    fn default() -> Self {
        Self {
            level_height_px: 45.0,
            level_gap_px: 8.0,
        }
    }
}

impl RowMetrics {
    /// Total row height for a level count.
    ///
    /// An empty row still renders one level tall, so empty resources keep a
    /// visible drop area.
    #[must_use]
    pub fn row_height_px(&self, level_count: usize) -> f64 {
        let levels = level_count.max(1) as f64;
        let gaps = level_count.saturating_sub(1) as f64;
        levels * self.level_height_px + gaps * self.level_gap_px
    }

    /// Y offset of a level's top edge in free layout.
    #[must_use]
    pub fn free_top_px(&self, level: usize) -> f64 {
        level as f64 * (self.level_height_px + self.level_gap_px) + self.level_gap_px
    }
}

/// Live dates for the event currently being resized.
///
/// While a resize gesture runs, the canonical store still holds the old
/// dates; the composer substitutes these so the row re-packs around the
/// preview.
#[derive(Clone, Debug, PartialEq)]
pub struct ResizePreview {
    /// Id of the resizing event.
    pub id: String,
    /// The proposed dates.
    pub interval: Interval,
}

impl ResizePreview {
    /// Creates a preview record.
    #[must_use]
    pub fn new(id: impl Into<String>, interval: Interval) -> Self {
        Self {
            id: id.into(),
            interval,
        }
    }
}

/// Horizontal (and free-mode vertical) geometry of one row cell.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum CellGeometry {
    /// Grid layout: the occupied column span, zero-based half-open. The
    /// vertical position is the cell's level (CSS grid lines are both `+ 1`).
    Grid(GridSpan),
    /// Free layout: continuous pixel geometry within the row.
    Free {
        /// Left edge, track-relative pixels.
        left_px: f64,
        /// Top edge within the row, pixels.
        top_px: f64,
        /// Width in pixels.
        width_px: f64,
    },
}

/// One positioned entry of a composed row.
#[derive(Clone, Debug, PartialEq)]
pub struct RowCell {
    /// Event (or placeholder) id.
    pub key: String,
    /// `true` for drag placeholders, `false` for canonical events.
    pub placeholder: bool,
    /// Display level, topmost is 0.
    pub level: usize,
    /// The dates this cell was packed with (preview dates mid-gesture).
    pub interval: Interval,
    /// Where the cell sits.
    pub geometry: CellGeometry,
    /// Rendered-height hint carried by placeholders.
    pub height_hint: Option<f64>,
}

/// A fully composed row: positioned cells plus the row's own height.
#[derive(Clone, Debug, PartialEq)]
pub struct RowLayout {
    /// Cells in level order, packed order within each level.
    pub cells: Vec<RowCell>,
    /// Number of display levels actually occupied.
    pub level_count: usize,
    /// Row height per [`RowMetrics::row_height_px`].
    pub height_px: f64,
}

/// Merges drag state into a resource's events and lays the result out.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RowComposer {
    scale: TimeScale,
    mode: LayoutMode,
    metrics: RowMetrics,
}

impl RowComposer {
    /// Creates a composer with default [`RowMetrics`].
    #[must_use]
    pub fn new(scale: TimeScale, mode: LayoutMode) -> Self {
        Self {
            scale,
            mode,
            metrics: RowMetrics::default(),
        }
    }

    /// Overrides the vertical sizing constants.
    #[must_use]
    pub fn with_metrics(mut self, metrics: RowMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// The scale geometry is derived from.
    #[must_use]
    pub fn scale(&self) -> TimeScale {
        self.scale
    }

    /// The active layout mode.
    #[must_use]
    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    /// The sizing constants in use.
    #[must_use]
    pub fn metrics(&self) -> RowMetrics {
        self.metrics
    }

    /// Composes one resource's row.
    ///
    /// `events` and `placeholders` are the resource's own; `dragged_ids`
    /// hides the originals of in-flight events (their placeholders stand in),
    /// and `resize` substitutes preview dates for the named event. Fails fast
    /// if any merged entry has `end < start`.
    pub fn compose<'a, P: 'a>(
        &self,
        events: impl IntoIterator<Item = &'a Event<P>>,
        placeholders: impl IntoIterator<Item = &'a Placeholder>,
        dragged_ids: &[&str],
        resize: Option<&ResizePreview>,
    ) -> Result<RowLayout, PackError> {
        let mut items: Vec<Item<'a>> = Vec::new();
        for event in events {
            if dragged_ids.contains(&event.id.as_str()) {
                continue;
            }
            let interval = match resize {
                Some(preview) if preview.id == event.id => preview.interval,
                _ => event.interval(),
            };
            items.push(Item {
                key: &event.id,
                interval,
                placeholder: false,
                height_hint: None,
            });
        }
        for placeholder in placeholders {
            items.push(Item {
                key: &placeholder.id,
                interval: placeholder.interval(),
                placeholder: true,
                height_hint: Some(placeholder.height),
            });
        }

        let levels = events_by_level(items)?;
        let level_count = levels.len();
        let mut cells = Vec::new();
        for (level, entries) in levels.iter().enumerate() {
            for item in entries {
                cells.push(RowCell {
                    key: item.key.into(),
                    placeholder: item.placeholder,
                    level,
                    interval: item.interval,
                    geometry: self.geometry(item.interval, level),
                    height_hint: item.height_hint,
                });
            }
        }

        Ok(RowLayout {
            cells,
            level_count,
            height_px: self.metrics.row_height_px(level_count),
        })
    }

    /// Composes every resource's row, in resource order.
    ///
    /// Events and placeholders are routed to rows by their `resource` field;
    /// entries pointing at unknown resources are simply not rendered.
    pub fn compose_all<'a, P: 'a, Q>(
        &self,
        resources: &[Resource<Q>],
        events: &'a [Event<P>],
        placeholders: &'a [Placeholder],
        dragged_ids: &[&str],
        resize: Option<&ResizePreview>,
    ) -> Result<Vec<RowLayout>, PackError> {
        resources
            .iter()
            .map(|resource| {
                self.compose(
                    events.iter().filter(|e| e.resource == resource.id),
                    placeholders.iter().filter(|p| p.resource == resource.id),
                    dragged_ids,
                    resize,
                )
            })
            .collect()
    }

    /// Track width in pixels for a visible date range.
    #[must_use]
    pub fn track_width_px(&self, range: Interval) -> f64 {
        range.duration_ms().max(0) as f64 / self.scale.ms_per_pixel()
    }

    fn geometry(&self, interval: Interval, level: usize) -> CellGeometry {
        match self.mode {
            LayoutMode::Grid => CellGeometry::Grid(self.scale.column_span(interval)),
            LayoutMode::Free => {
                let (left_px, width_px) = self.scale.span_px(interval);
                CellGeometry::Free {
                    left_px,
                    top_px: self.metrics.free_top_px(level),
                    width_px,
                }
            }
        }
    }
}

/// A merged packing entry borrowing from the host's lists.
#[derive(Copy, Clone, Debug)]
struct Item<'a> {
    key: &'a str,
    interval: Interval,
    placeholder: bool,
    height_hint: Option<f64>,
}

impl Timeboxed for Item<'_> {
    fn key(&self) -> &str {
        self.key
    }

    fn start_ms(&self) -> i64 {
        self.interval.start_ms
    }

    fn end_ms(&self) -> i64 {
        self.interval.end_ms
    }
}

/// Edge-triggers on row-height changes.
///
/// Rows recompute their height every frame; hosts that mirror the height
/// elsewhere only want to hear about it when it actually changes.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct HeightTracker {
    last: Option<f64>,
}

impl HeightTracker {
    /// Creates a tracker that treats the first report as a change.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Reports this frame's height; returns it only when it changed.
    pub fn report(&mut self, height_px: f64) -> Option<f64> {
        if self.last == Some(height_px) {
            return None;
        }
        self.last = Some(height_px);
        Some(height_px)
    }
}
