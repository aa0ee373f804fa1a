use serde::Serialize;
use tracing::{debug, trace};

use crate::config::{ConfigError, EditorConfig};
use crate::doc::{CanvasExtents, Element, ElementId, ElementKind, ElementPatch, ElementStore, Style, TextAlign};
use crate::format::{self, FontToggle};
use crate::geom::{Point, Viewport};
use crate::hit::{self, HitPart};
use crate::input::{Button, DragController};
use crate::palette::Preset;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

const CURSOR_DEFAULT: &str = "default";
const CURSOR_MOVE: &str = "move";
const CURSOR_POINTER: &str = "pointer";

/// Actions returned from engine calls for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    ElementAdded { element: Element },
    /// `patch` carries the values as stored, after clamping.
    ElementUpdated { id: ElementId, patch: ElementPatch },
    /// The element's style was replaced wholesale.
    StyleReplaced { id: ElementId, style: Style },
    ElementRemoved { id: ElementId },
    SelectionChanged { id: Option<ElementId> },
    CanvasResized { width: f64, height: f64 },
    /// The user double-clicked a text element; the host should prompt for new
    /// text and hand it back through [`EngineCore::commit_text`].
    EditTextRequested { id: ElementId, text: String },
    SetCursor { cursor: String },
    RenderNeeded,
}

/// Read-only view of everything the render surface paints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<'a> {
    /// Elements in paint order.
    pub elements: &'a [Element],
    /// Selection reconciled against the element list.
    pub selection: Option<ElementId>,
    pub canvas: CanvasExtents,
    /// Incremented on every state change.
    pub revision: u64,
}

/// One editing session: the element store, the drag controller, and the
/// viewport mapping client coordinates onto the canvas.
///
/// The store is created together with the session and dropped with it; the
/// drag controller only ever sees it through this struct.
#[derive(Debug)]
pub struct EngineCore {
    store: ElementStore,
    drag: DragController,
    viewport: Viewport,
    cursor: &'static str,
    revision: u64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EngineCore {
    /// Start a session with the configured canvas extents.
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        Self {
            store: ElementStore::new(config.extents()),
            drag: DragController::new(),
            viewport: Viewport::default(),
            cursor: CURSOR_DEFAULT,
            revision: 0,
        }
    }

    fn bump(&mut self) {
        self.revision += 1;
    }

    // --- Element store commands ---

    /// Add an element of `kind` with `overrides` and select it.
    pub fn add(&mut self, kind: ElementKind, overrides: &ElementPatch) -> (ElementId, Vec<Action>) {
        let id = self.store.add(kind, overrides);
        self.bump();
        let mut actions = Vec::with_capacity(3);
        if let Some(el) = self.store.get(&id) {
            actions.push(Action::ElementAdded { element: el.clone() });
        }
        actions.push(Action::SelectionChanged { id: Some(id) });
        actions.push(Action::RenderNeeded);
        (id, actions)
    }

    /// Add an element from a palette preset.
    pub fn add_preset(&mut self, preset: Preset) -> (ElementId, Vec<Action>) {
        self.add(preset.kind(), &preset.overrides())
    }

    /// Apply a partial update. Unknown ids produce no actions.
    pub fn update(&mut self, id: &ElementId, patch: &ElementPatch) -> Vec<Action> {
        if !self.store.update(id, patch) {
            return Vec::new();
        }
        self.bump();
        vec![Action::ElementUpdated { id: *id, patch: self.settled(id, patch) }, Action::RenderNeeded]
    }

    /// Replace an element's style outright. Unknown ids produce no actions.
    pub fn replace_style(&mut self, id: &ElementId, style: Style) -> Vec<Action> {
        if !self.store.replace_style(id, style.clone()) {
            return Vec::new();
        }
        self.bump();
        vec![Action::StyleReplaced { id: *id, style }, Action::RenderNeeded]
    }

    /// Commit text from the host editor into the element's content.
    pub fn commit_text(&mut self, id: &ElementId, text: String) -> Vec<Action> {
        self.update(id, &ElementPatch::content(text))
    }

    /// Remove an element. Unknown ids produce no actions.
    pub fn remove(&mut self, id: &ElementId) -> Vec<Action> {
        let was_selected = self.store.selection();
        if self.store.remove(id).is_none() {
            return Vec::new();
        }
        self.bump();
        let mut actions = vec![Action::ElementRemoved { id: *id }];
        if was_selected != self.store.selection() {
            actions.push(Action::SelectionChanged { id: None });
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Set the selection. Re-selecting the current selection is a no-op.
    pub fn select(&mut self, id: Option<ElementId>) -> Vec<Action> {
        if self.store.selection() == id {
            return Vec::new();
        }
        self.store.select(id);
        self.bump();
        vec![Action::SelectionChanged { id }, Action::RenderNeeded]
    }

    /// Resize the canvas. Existing elements keep their positions.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] without touching the session when either
    /// dimension is not a positive finite number.
    pub fn resize_canvas(&mut self, width: f64, height: f64) -> Result<Vec<Action>, ConfigError> {
        self.store.resize_canvas(width, height)?;
        self.bump();
        Ok(vec![Action::CanvasResized { width, height }, Action::RenderNeeded])
    }

    /// Align the selected text element.
    pub fn align_text(&mut self, value: TextAlign) -> Vec<Action> {
        let applied = format::align(&mut self.store, value);
        self.applied(applied)
    }

    /// Toggle bold/italic/underline on the selected text element.
    pub fn toggle_font(&mut self, which: FontToggle) -> Vec<Action> {
        let applied = format::toggle(&mut self.store, which);
        self.applied(applied)
    }

    fn applied(&mut self, applied: Option<(ElementId, ElementPatch)>) -> Vec<Action> {
        let Some((id, patch)) = applied else {
            return Vec::new();
        };
        self.bump();
        vec![Action::ElementUpdated { id, patch }, Action::RenderNeeded]
    }

    /// `patch` with any geometry fields replaced by the stored values, which
    /// may differ after clamping or after an unusable size was dropped.
    fn settled(&self, id: &ElementId, patch: &ElementPatch) -> ElementPatch {
        let mut out = patch.clone();
        if let Some(el) = self.store.get(id) {
            if out.x.is_some() {
                out.x = Some(el.x);
            }
            if out.y.is_some() {
                out.y = Some(el.y);
            }
            if out.width.is_some() {
                out.width = Some(el.width);
            }
            if out.height.is_some() {
                out.height = Some(el.height);
            }
        }
        out
    }

    // --- Viewport ---

    /// Record where the canvas element sits in client coordinates.
    pub fn set_canvas_origin(&mut self, left: f64, top: f64) {
        self.viewport = Viewport { origin_x: left, origin_y: top };
    }

    // --- Pointer events ---

    /// Route a pointer press: delete control removes, drag handle starts a
    /// drag, a body selects, empty canvas clears the selection.
    pub fn on_pointer_down(&mut self, client: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let pt = self.viewport.client_to_canvas(client);
        let Some(hit) = hit::hit_test(pt, &self.store) else {
            trace!(x = pt.x, y = pt.y, "pointer down on empty canvas");
            return self.select(None);
        };
        match hit.part {
            HitPart::DeleteControl => self.remove(&hit.element_id),
            HitPart::Body => self.select(Some(hit.element_id)),
            // Handles only exist on the selected element, so beginning the
            // drag never changes the selection here.
            HitPart::DragHandle => {
                if !self.drag.begin(&mut self.store, hit.element_id, pt) {
                    return Vec::new();
                }
                debug!(id = %hit.element_id, "drag started");
                self.set_cursor(CURSOR_MOVE).into_iter().collect()
            }
        }
    }

    /// Drag the grabbed element, or update the hover cursor when idle.
    pub fn on_pointer_move(&mut self, client: Point) -> Vec<Action> {
        let pt = self.viewport.client_to_canvas(client);
        if !self.drag.is_dragging() {
            return self.hover(pt);
        }
        let Some(id) = self.drag.dragged_id() else {
            return Vec::new();
        };
        let Some(pos) = self.drag.drag_to(&mut self.store, pt) else {
            return Vec::new();
        };
        self.bump();
        vec![Action::ElementUpdated { id, patch: ElementPatch::position(pos) }, Action::RenderNeeded]
    }

    /// Release ends any drag in progress.
    pub fn on_pointer_up(&mut self, client: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        if let Some(id) = self.drag.end() {
            debug!(%id, "drag ended");
        }
        let pt = self.viewport.client_to_canvas(client);
        self.hover(pt)
    }

    /// Double-clicking a text element asks the host to edit its text.
    pub fn on_double_click(&mut self, client: Point) -> Vec<Action> {
        let pt = self.viewport.client_to_canvas(client);
        let Some(hit) = hit::hit_test(pt, &self.store) else {
            return Vec::new();
        };
        match self.store.get(&hit.element_id) {
            Some(el) if el.kind == ElementKind::Text => {
                vec![Action::EditTextRequested { id: el.id, text: el.content.clone() }]
            }
            _ => Vec::new(),
        }
    }

    fn hover(&mut self, pt: Point) -> Vec<Action> {
        let cursor = match hit::hit_test(pt, &self.store).map(|h| h.part) {
            Some(HitPart::DragHandle) => CURSOR_MOVE,
            Some(HitPart::DeleteControl) => CURSOR_POINTER,
            Some(HitPart::Body) | None => CURSOR_DEFAULT,
        };
        self.set_cursor(cursor).into_iter().collect()
    }

    fn set_cursor(&mut self, cursor: &'static str) -> Option<Action> {
        if self.cursor == cursor {
            return None;
        }
        self.cursor = cursor;
        Some(Action::SetCursor { cursor: cursor.to_string() })
    }

    // --- Queries ---

    /// Read-only access to the element store.
    #[must_use]
    pub fn store(&self) -> &ElementStore {
        &self.store
    }

    /// The selected element id, or `None` if nothing valid is selected.
    #[must_use]
    pub fn selection(&self) -> Option<ElementId> {
        self.store.selected_element().map(|el| el.id)
    }

    /// Look up an element by id.
    #[must_use]
    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.store.get(id)
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Current cursor name.
    #[must_use]
    pub fn cursor(&self) -> &str {
        self.cursor
    }

    /// Everything the render surface needs to paint.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            elements: self.store.elements(),
            selection: self.selection(),
            canvas: self.store.extents(),
            revision: self.revision,
        }
    }
}
