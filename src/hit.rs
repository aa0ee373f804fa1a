#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::{CONTROL_SIZE_PX, DELETE_CONTROL_OUTSET_PX};
use crate::doc::{Element, ElementId, ElementStore};
use crate::geom::Point;

/// Which part of an element was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    /// Move handle centred on the selected element.
    DragHandle,
    /// Remove button at the selected element's top-right corner.
    DeleteControl,
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub element_id: ElementId,
    pub part: HitPart,
}

/// Axis-aligned square control of side [`CONTROL_SIZE_PX`] with top-left at `origin`.
fn in_control(origin: Point, pt: Point) -> bool {
    pt.x >= origin.x && pt.x <= origin.x + CONTROL_SIZE_PX && pt.y >= origin.y && pt.y <= origin.y + CONTROL_SIZE_PX
}

/// Top-left of the drag handle for `el`.
#[must_use]
pub fn drag_handle_origin(el: &Element) -> Point {
    let c = el.center();
    Point::new(c.x - CONTROL_SIZE_PX / 2.0, c.y - CONTROL_SIZE_PX / 2.0)
}

/// Top-left of the delete control for `el`.
#[must_use]
pub fn delete_control_origin(el: &Element) -> Point {
    Point::new(
        el.x + el.width + DELETE_CONTROL_OUTSET_PX - CONTROL_SIZE_PX,
        el.y - DELETE_CONTROL_OUTSET_PX,
    )
}

/// Test which element (if any) is under the canvas-local point `pt`.
///
/// Controls only exist on the selected element and are checked first, delete
/// before drag. Bodies are checked top-most first.
#[must_use]
pub fn hit_test(pt: Point, store: &ElementStore) -> Option<Hit> {
    if let Some(sel) = store.selected_element() {
        if in_control(delete_control_origin(sel), pt) {
            return Some(Hit { element_id: sel.id, part: HitPart::DeleteControl });
        }
        if in_control(drag_handle_origin(sel), pt) {
            return Some(Hit { element_id: sel.id, part: HitPart::DragHandle });
        }
    }

    store
        .elements()
        .iter()
        .rev()
        .find(|el| el.contains(pt))
        .map(|el| Hit { element_id: el.id, part: HitPart::Body })
}
