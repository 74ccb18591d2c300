// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders a small schedule as ASCII, drags an event to another row, and
//! renders the result: the whole engine pipeline without a GUI host.
//!
//! Run with `cargo run -p trellis_demos --bin ascii_gantt`.

use kurbo::Point;
use trellis_drag::{DragSession, DraggedEvent, DropResolution, DropTarget, MoveController};
use trellis_model::{Event, Resource, Timeboxed};
use trellis_row::{CellGeometry, RowComposer, RowLayout};
use trellis_timescale::{LayoutMode, TimeScale};

const HOUR: i64 = 60 * 60 * 1000;
/// One grid column (= one scheduling threshold) per ASCII character.
const PX_PER_COLUMN: f64 = 1.0;
const TRACK_COLUMNS: usize = 48;

fn render(resources: &[Resource], rows: &[RowLayout]) {
    println!("      {}", "+---".repeat(TRACK_COLUMNS / 4));
    for (resource, row) in resources.iter().zip(rows) {
        let levels = row.level_count.max(1);
        let mut lines = vec![vec![b' '; TRACK_COLUMNS]; levels];
        for cell in &row.cells {
            let CellGeometry::Grid(span) = cell.geometry else {
                continue;
            };
            let glyph = if cell.placeholder { b'.' } else { b'=' };
            let start = span.start.max(0) as usize;
            let end = (span.end.max(0) as usize).min(TRACK_COLUMNS);
            let line = &mut lines[cell.level];
            for slot in line.iter_mut().take(end).skip(start) {
                *slot = glyph;
            }
            if start < TRACK_COLUMNS {
                line[start] = cell.key.bytes().next().unwrap_or(b'?');
            }
        }
        for (i, line) in lines.iter().enumerate() {
            let label = if i == 0 { resource.id.as_str() } else { "" };
            println!("{label:>5} |{}|", String::from_utf8_lossy(line));
        }
    }
    println!();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // One ASCII column per hour.
    let scale = TimeScale::new(0, HOUR as f64 / PX_PER_COLUMN, HOUR);
    let composer = RowComposer::new(scale, LayoutMode::Grid);

    let resources = vec![
        Resource::new("ada"),
        Resource::new("bob"),
        Resource::new("cid"),
    ];
    let mut events = vec![
        Event::new("alpha", "ada", 2 * HOUR, 10 * HOUR),
        Event::new("build", "ada", 6 * HOUR, 14 * HOUR),
        Event::new("triage", "bob", 0, 5 * HOUR),
        Event::new("deploy", "cid", 20 * HOUR, 30 * HOUR),
    ];

    println!("before:");
    render(&resources, &composer.compose_all(&resources, &events, &[], &[], None)?);

    // Grab "build" 1 px from its left edge and drag it over bob's row.
    let mut mover = MoveController::new(scale, DropResolution::SingleResource);
    let build = events.iter().find(|e| e.id == "build").expect("seeded above");
    let (left_px, width_px) = scale.span_px(build.interval());
    mover.begin(DragSession::single(DraggedEvent::new(
        &build.id, &build.resource, width_px, 45.0, 1.0,
    )));

    let target = DropTarget::new("bob", 0.0);
    let pointer = Point::new(left_px + 1.0 + 26.0, 0.0);
    mover.update(pointer, Some(&target), &resources);

    let dragged = ["build"];
    println!("mid-drag (placeholder dotted):");
    render(
        &resources,
        &composer.compose_all(&resources, &events, mover.placeholders(), &dragged, None)?,
    );

    let updates = mover
        .finish(pointer, Some(&target), &resources)
        .expect("target row is known");
    for update in updates {
        if let Some(event) = events.iter_mut().find(|e| e.id == update.id) {
            event.resource = update.resource;
            event.start_ms = update.start_ms;
            event.end_ms = update.end_ms;
        }
    }

    println!("after dropping \"build\" on bob at +26h:");
    render(&resources, &composer.compose_all(&resources, &events, &[], &[], None)?);
    Ok(())
}
