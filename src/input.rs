//! Input model: pointer buttons and the drag state machine.
//!
//! `DragController` tracks the one gesture the canvas supports: dragging an
//! element by its handle. The controller never owns the element store; every
//! call that reads or writes elements takes the session's `ElementStore` as a
//! parameter, so a controller cannot act on elements outside a live session.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use tracing::trace;

use crate::doc::{ElementId, ElementPatch, ElementStore};
use crate::geom::Point;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// Drag gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// An element is following the pointer.
    Dragging {
        /// Id of the element being dragged.
        id: ElementId,
        /// Pointer position relative to the element's top-left corner at grab
        /// time. Held fixed for the whole drag.
        grab_offset: Point,
    },
}

/// Turns a stream of canvas-local pointer positions into element moves.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> DragState {
        self.state
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// The element being dragged, if any.
    #[must_use]
    pub fn dragged_id(&self) -> Option<ElementId> {
        match self.state {
            DragState::Dragging { id, .. } => Some(id),
            DragState::Idle => None,
        }
    }

    /// Start dragging `id` with the pointer at `pointer` (canvas-local).
    ///
    /// Captures the grab offset and selects the element. Returns `false` and
    /// stays idle when the element does not exist.
    pub fn begin(&mut self, store: &mut ElementStore, id: ElementId, pointer: Point) -> bool {
        let Some(el) = store.get(&id) else {
            return false;
        };
        let grab_offset = pointer.offset_from(el.position());
        store.select(Some(id));
        self.state = DragState::Dragging { id, grab_offset };
        trace!(%id, dx = grab_offset.x, dy = grab_offset.y, "drag started");
        true
    }

    /// Move the dragged element so its grab point follows `pointer`.
    ///
    /// Returns the clamped position written into the store, or `None` when
    /// idle or when the dragged element has since been removed.
    pub fn drag_to(&mut self, store: &mut ElementStore, pointer: Point) -> Option<Point> {
        let DragState::Dragging { id, grab_offset } = self.state else {
            return None;
        };
        let candidate = pointer.offset_from(grab_offset);
        if !store.update(&id, &ElementPatch::position(candidate)) {
            return None;
        }
        let pos = store.get(&id)?.position();
        trace!(%id, x = pos.x, y = pos.y, "drag moved");
        Some(pos)
    }

    /// Finish the drag. Returns the id that was being dragged, if any.
    pub fn end(&mut self) -> Option<ElementId> {
        let id = self.dragged_id();
        self.state = DragState::Idle;
        id
    }
}
