//! Drag-to-reorder: the gesture state machine and drop-target resolution.
//!
//! A drag starts on a row's handle and ends on release. While it is in
//! flight, the host reports pointer positions together with the on-screen
//! rects of every row ([`DropZone`]s); the row whose center is closest to the
//! pointer becomes the provisional target. On release the controller yields
//! a [`Move`] expressed in identities, never indices, and [`apply_move`]
//! resolves both positions against the live sequence at that moment.

#[cfg(test)]
#[path = "reorder_test.rs"]
mod reorder_test;

use crate::doc::{FieldId, FieldStore};
use crate::layout::{Point, Rect};

/// The on-screen area of one row, as measured by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropZone {
    pub id: FieldId,
    pub rect: Rect,
}

/// A completed gesture: move `active` to wherever `over` currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub active: FieldId,
    pub over: FieldId,
}

/// Gesture state between drag start and release.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// A row is being dragged.
    Dragging {
        /// Row the gesture started on.
        active: FieldId,
        /// Current drop target, once one has been resolved.
        over: Option<FieldId>,
    },
}

/// Pick the drop zone whose center is nearest to `pointer`.
///
/// Ties go to the zone listed first. Returns `None` when there are no zones.
#[must_use]
pub fn closest_center(pointer: Point, zones: &[DropZone]) -> Option<FieldId> {
    let mut best: Option<(FieldId, f64)> = None;
    for zone in zones {
        let d = zone.rect.center().distance_sq(pointer);
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((zone.id, d));
        }
    }
    best.map(|(id, _)| id)
}

/// Tracks one drag gesture at a time.
#[derive(Debug, Clone, Default)]
pub struct ReorderController {
    state: DragState,
}

impl ReorderController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Row currently being dragged, if any.
    #[must_use]
    pub fn active(&self) -> Option<FieldId> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging { active, .. } => Some(active),
        }
    }

    /// Provisional drop target, if any.
    #[must_use]
    pub fn over(&self) -> Option<FieldId> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging { over, .. } => over,
        }
    }

    /// Begin dragging `id`. A gesture already in flight is abandoned.
    pub fn start(&mut self, id: FieldId) {
        self.state = DragState::Dragging { active: id, over: None };
    }

    /// Record an already-resolved drop target. Ignored when idle.
    pub fn set_over(&mut self, target: Option<FieldId>) {
        if let DragState::Dragging { over, .. } = &mut self.state {
            *over = target;
        }
    }

    /// Resolve the drop target from a pointer position. Returns the new
    /// target; ignored (and `None`) when idle.
    pub fn hover(&mut self, pointer: Point, zones: &[DropZone]) -> Option<FieldId> {
        if self.state == DragState::Idle {
            return None;
        }
        let target = closest_center(pointer, zones);
        self.set_over(target);
        target
    }

    /// Finish the gesture. Yields a move only when a target was resolved.
    pub fn end(&mut self) -> Option<Move> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging { active, over: Some(over) } => Some(Move { active, over }),
            _ => None,
        }
    }

    /// Abandon the gesture without moving anything.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}

/// Apply a gesture to the store.
///
/// Indices are looked up by identity at call time. Returns the `(from, to)`
/// pair that was applied, or `None` when the ids are equal or either one is
/// no longer in the store.
pub fn apply_move(store: &mut FieldStore, active: &FieldId, over: &FieldId) -> Option<(usize, usize)> {
    if active == over {
        return None;
    }
    let from = store.index_of(active)?;
    let to = store.index_of(over)?;
    store.reorder(from, to).then_some((from, to))
}
