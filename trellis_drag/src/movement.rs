// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The move-gesture controller.

use alloc::string::ToString;
use alloc::vec::Vec;

use kurbo::Point;
use trellis_model::{Placeholder, Resource};
use trellis_timescale::TimeScale;

use crate::distance::resolve_distance;
use crate::{DragSession, DropResolution, DropTarget, EventUpdate};

/// Drives one move gesture from grab to drop.
///
/// The host feeds pointer samples via [`MoveController::update`] and reads the
/// resulting [`Placeholder`]s back each frame; [`MoveController::finish`]
/// turns the final pointer position into committed [`EventUpdate`]s. Preview
/// and commit share one code path, so the placeholder a user sees is exactly
/// where the event lands.
///
/// Gesture state is destroyed atomically: `finish` and
/// [`MoveController::cancel`] both leave the controller idle with no
/// placeholders, on every exit path.
#[derive(Debug)]
pub struct MoveController {
    scale: TimeScale,
    resolution: DropResolution,
    session: Option<DragSession>,
    placeholders: Vec<Placeholder>,
}

impl MoveController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new(scale: TimeScale, resolution: DropResolution) -> Self {
        Self {
            scale,
            resolution,
            session: None,
            placeholders: Vec::new(),
        }
    }

    /// The scale used for snapping and duration conversion.
    #[must_use]
    pub fn scale(&self) -> TimeScale {
        self.scale
    }

    /// Replaces the scale (e.g. after a zoom change between gestures).
    pub fn set_scale(&mut self, scale: TimeScale) {
        self.scale = scale;
    }

    /// Returns `true` while a gesture is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// The current drag preview, one placeholder per dragged event.
    ///
    /// Empty while idle, and empty again after [`MoveController::finish`] or
    /// [`MoveController::cancel`].
    #[must_use]
    pub fn placeholders(&self) -> &[Placeholder] {
        &self.placeholders
    }

    /// Starts a gesture, replacing any gesture already in progress.
    pub fn begin(&mut self, session: DragSession) {
        self.session = Some(session);
        self.placeholders.clear();
    }

    /// Feeds a pointer sample, rewriting the placeholder set wholesale.
    ///
    /// With no hovered row (`target` is `None`), or when any dragged event
    /// carries non-finite geometry, the previous placeholders are kept
    /// untouched and `false` is returned. Hosts clear the preview explicitly
    /// via [`MoveController::clear_preview`] when the pointer leaves the grid.
    pub fn update<P>(
        &mut self,
        pointer: Point,
        target: Option<&DropTarget>,
        resources: &[Resource<P>],
    ) -> bool {
        let Some(session) = &self.session else {
            return false;
        };
        let Some(target) = target else {
            return false;
        };
        let Some(updates) =
            proposals(session, &self.scale, self.resolution, pointer, target, resources)
        else {
            return false;
        };

        self.placeholders = updates
            .iter()
            .zip(&session.events)
            .map(|(update, event)| Placeholder {
                id: update.id.clone(),
                resource: update.resource.clone(),
                start_ms: update.start_ms,
                end_ms: update.end_ms,
                height: event.height_px,
            })
            .collect();
        true
    }

    /// Drops placeholders without ending the gesture (pointer left the grid).
    pub fn clear_preview(&mut self) {
        self.placeholders.clear();
    }

    /// Ends the gesture and proposes the committed updates.
    ///
    /// Returns `None` when the drop cannot be resolved (no hovered row,
    /// non-finite event geometry, empty resource list in
    /// [`DropResolution::AsSelected`] mode); no partial update is ever
    /// produced. The controller is idle afterwards either way.
    pub fn finish<P>(
        &mut self,
        pointer: Point,
        target: Option<&DropTarget>,
        resources: &[Resource<P>],
    ) -> Option<Vec<EventUpdate>> {
        let session = self.session.take()?;
        self.placeholders.clear();
        let target = target?;
        proposals(&session, &self.scale, self.resolution, pointer, target, resources)
    }

    /// Abandons the gesture, discarding session and placeholders.
    pub fn cancel(&mut self) {
        self.session = None;
        self.placeholders.clear();
    }
}

/// Computes the per-event proposals for one pointer position.
///
/// All-or-nothing: any event that cannot be resolved aborts the whole set.
fn proposals<P>(
    session: &DragSession,
    scale: &TimeScale,
    resolution: DropResolution,
    pointer: Point,
    target: &DropTarget,
    resources: &[Resource<P>],
) -> Option<Vec<EventUpdate>> {
    let mut out = Vec::with_capacity(session.events.len());
    for event in &session.events {
        if !event.grab_offset_x.is_finite() || !event.width_px.is_finite() {
            return None;
        }
        // The grab offset keeps the element from jumping under the pointer:
        // the element's left edge, not the pointer, is what gets snapped.
        let row_relative_x = pointer.x - target.left_x - event.grab_offset_x;
        let start_ms = scale.snap_px_to_time(row_relative_x);
        let end_ms = start_ms + scale.px_to_duration(event.width_px);
        let resource = match resolution {
            DropResolution::SingleResource => target.resource.clone(),
            DropResolution::AsSelected => resolve_distance(
                resources,
                &session.anchor_resource,
                &event.resource,
                &target.resource,
            )?
            .to_string(),
        };
        out.push(EventUpdate {
            id: event.id.clone(),
            resource,
            start_ms,
            end_ms,
        });
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::Point;
    use trellis_model::Resource;
    use trellis_timescale::TimeScale;

    use super::MoveController;
    use crate::{DragSession, DraggedEvent, DropResolution, DropTarget};

    fn scale() -> TimeScale {
        // threshold_px = 100 / 10 = 10 px.
        TimeScale::new(0, 10.0, 100)
    }

    fn grabbed() -> DraggedEvent {
        DraggedEvent::new("ev-1", "row-1", 100.0, 45.0, 10.0)
    }

    const NO_ROWS: &[Resource] = &[];

    #[test]
    fn drop_snaps_the_element_edge_and_keeps_width() {
        let mut mover = MoveController::new(scale(), DropResolution::SingleResource);
        mover.begin(DragSession::single(grabbed()));

        // Pointer 150, track at 100, grab offset 10: element edge at 40 px,
        // snapped to 400 ms; 100 px of width is 1000 ms of duration.
        let target = DropTarget::new("row-2", 100.0);
        let updates = mover
            .finish(Point::new(150.0, 30.0), Some(&target), NO_ROWS)
            .unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].id, "ev-1");
        assert_eq!(updates[0].resource, "row-2");
        assert_eq!(updates[0].start_ms, 400);
        assert_eq!(updates[0].end_ms, 1_400);
        assert!(!mover.is_dragging());
    }

    #[test]
    fn preview_equals_commit() {
        let mut mover = MoveController::new(scale(), DropResolution::SingleResource);
        mover.begin(DragSession::single(grabbed()));

        let target = DropTarget::new("row-2", 150.0);
        let pointer = Point::new(200.0, 30.0);
        assert!(mover.update(pointer, Some(&target), NO_ROWS));
        let preview = mover.placeholders()[0].clone();

        let updates = mover.finish(pointer, Some(&target), NO_ROWS).unwrap();
        assert_eq!(preview.start_ms, updates[0].start_ms);
        assert_eq!(preview.end_ms, updates[0].end_ms);
        assert_eq!(preview.resource, updates[0].resource);
        assert_eq!(preview.start_ms, 400);
        assert_eq!(preview.height, 45.0);
        assert!(mover.placeholders().is_empty());
    }

    #[test]
    fn placeholders_are_rewritten_wholesale() {
        let mut mover = MoveController::new(scale(), DropResolution::SingleResource);
        mover.begin(DragSession::single(grabbed()));

        let target = DropTarget::new("row-2", 0.0);
        assert!(mover.update(Point::new(50.0, 0.0), Some(&target), NO_ROWS));
        assert_eq!(mover.placeholders()[0].start_ms, 400);

        assert!(mover.update(Point::new(95.0, 0.0), Some(&target), NO_ROWS));
        assert_eq!(mover.placeholders().len(), 1);
        assert_eq!(mover.placeholders()[0].start_ms, 900);
    }

    #[test]
    fn missing_target_keeps_the_previous_preview() {
        let mut mover = MoveController::new(scale(), DropResolution::SingleResource);
        mover.begin(DragSession::single(grabbed()));

        let target = DropTarget::new("row-2", 0.0);
        assert!(mover.update(Point::new(50.0, 0.0), Some(&target), NO_ROWS));
        assert!(!mover.update(Point::new(500.0, 0.0), None, NO_ROWS));
        assert_eq!(mover.placeholders()[0].start_ms, 400);

        mover.clear_preview();
        assert!(mover.placeholders().is_empty());
        assert!(mover.is_dragging());
    }

    #[test]
    fn drop_without_a_target_aborts_and_goes_idle() {
        let mut mover = MoveController::new(scale(), DropResolution::SingleResource);
        mover.begin(DragSession::single(grabbed()));
        let target = DropTarget::new("row-2", 0.0);
        mover.update(Point::new(50.0, 0.0), Some(&target), NO_ROWS);

        assert_eq!(mover.finish(Point::new(50.0, 0.0), None, NO_ROWS), None);
        assert!(!mover.is_dragging());
        assert!(mover.placeholders().is_empty());
    }

    #[test]
    fn non_finite_geometry_aborts_the_whole_drop() {
        let mut mover = MoveController::new(scale(), DropResolution::SingleResource);
        mover.begin(DragSession::new(
            "row-1",
            alloc::vec![
                grabbed(),
                DraggedEvent::new("ev-2", "row-1", f64::NAN, 45.0, 0.0),
            ],
        ));
        let target = DropTarget::new("row-2", 0.0);
        assert_eq!(mover.finish(Point::new(50.0, 0.0), Some(&target), NO_ROWS), None);
    }

    #[test]
    fn as_selected_preserves_row_offsets() {
        let rows: Vec<Resource> = ["r1", "r2", "r3", "r4"].into_iter().map(Resource::new).collect();
        let mut mover = MoveController::new(scale(), DropResolution::AsSelected);
        mover.begin(DragSession::new(
            "r2",
            alloc::vec![
                DraggedEvent::new("a", "r2", 50.0, 45.0, 0.0),
                DraggedEvent::new("b", "r3", 50.0, 45.0, 0.0),
            ],
        ));

        let target = DropTarget::new("r1", 0.0);
        let updates = mover
            .finish(Point::new(0.0, 0.0), Some(&target), &rows)
            .unwrap();
        assert_eq!(updates[0].resource, "r1");
        assert_eq!(updates[1].resource, "r2");
    }

    #[test]
    fn as_selected_clamps_at_the_list_edge() {
        let rows: Vec<Resource> = ["r1", "r2"].into_iter().map(Resource::new).collect();
        let mut mover = MoveController::new(scale(), DropResolution::AsSelected);
        mover.begin(DragSession::new(
            "r1",
            alloc::vec![DraggedEvent::new("a", "r2", 50.0, 45.0, 0.0)],
        ));

        // Offset +1 from a hover over the last row stays on the last row.
        let target = DropTarget::new("r2", 0.0);
        let updates = mover
            .finish(Point::new(0.0, 0.0), Some(&target), &rows)
            .unwrap();
        assert_eq!(updates[0].resource, "r2");
    }

    #[test]
    fn cancel_destroys_the_gesture() {
        let mut mover = MoveController::new(scale(), DropResolution::SingleResource);
        mover.begin(DragSession::single(grabbed()));
        let target = DropTarget::new("row-2", 0.0);
        mover.update(Point::new(50.0, 0.0), Some(&target), NO_ROWS);

        mover.cancel();
        assert!(!mover.is_dragging());
        assert!(mover.placeholders().is_empty());
        // Samples after cancel are ignored.
        assert!(!mover.update(Point::new(50.0, 0.0), Some(&target), NO_ROWS));
    }

    #[test]
    fn begin_replaces_a_gesture_in_progress() {
        let mut mover = MoveController::new(scale(), DropResolution::SingleResource);
        mover.begin(DragSession::single(grabbed()));
        let target = DropTarget::new("row-2", 0.0);
        mover.update(Point::new(50.0, 0.0), Some(&target), NO_ROWS);

        mover.begin(DragSession::single(DraggedEvent::new(
            "ev-9", "row-3", 20.0, 45.0, 0.0,
        )));
        assert!(mover.placeholders().is_empty());
        let updates = mover
            .finish(Point::new(10.0, 0.0), Some(&target), NO_ROWS)
            .unwrap();
        assert_eq!(updates[0].id, "ev-9");
        assert_eq!(updates[0].end_ms - updates[0].start_ms, 200);
    }
}
