//! `wasm-bindgen` facade for the host page.
//!
//! The host passes ids, kinds, and partial elements as strings/JSON and gets
//! back JSON-encoded [`Action`] lists. Listeners registered with
//! [`Editor::subscribe`] receive the snapshot JSON after every call that
//! changed the session.

#[cfg(test)]
#[path = "bindings_test.rs"]
mod bindings_test;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;
use wasm_bindgen::prelude::*;

use crate::config::{ConfigError, EditorConfig};
use crate::doc::{ElementId, ElementKind, ElementPatch, Style, TextAlign};
use crate::engine::{Action, EngineCore};
use crate::format::FontToggle;
use crate::geom::Point;
use crate::input::Button;
use crate::palette::Preset;

/// Error surfaced to JavaScript as a thrown `Error`.
#[derive(Debug, thiserror::Error)]
pub enum BindingError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A JSON or enum payload from the host could not be decoded.
    #[error("invalid {what}: {source}")]
    Payload {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
    /// An element id was not a UUID.
    #[error("invalid element id {raw:?}")]
    InvalidId { raw: String },
    /// A result could not be encoded as JSON.
    #[error("failed to encode {what}: {source}")]
    Encode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl From<BindingError> for JsValue {
    fn from(err: BindingError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

/// Parse a host-supplied element id.
pub(crate) fn parse_id(raw: &str) -> Result<ElementId, BindingError> {
    ElementId::parse_str(raw).map_err(|_| BindingError::InvalidId { raw: raw.to_string() })
}

/// Parse a bare enum tag such as `"text"` or `"bold"`.
pub(crate) fn parse_tag<T: DeserializeOwned>(what: &'static str, raw: &str) -> Result<T, BindingError> {
    serde_json::from_value(serde_json::Value::String(raw.to_string()))
        .map_err(|source| BindingError::Payload { what, source })
}

/// Parse an optional JSON payload; absent or blank means `T::default()`.
pub(crate) fn parse_json<T: DeserializeOwned + Default>(
    what: &'static str,
    raw: Option<&str>,
) -> Result<T, BindingError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(T::default()),
        Some(s) => serde_json::from_str(s).map_err(|source| BindingError::Payload { what, source }),
    }
}

pub(crate) fn encode<T: Serialize + ?Sized>(what: &'static str, value: &T) -> Result<String, BindingError> {
    serde_json::to_string(value).map_err(|source| BindingError::Encode { what, source })
}

#[derive(Serialize)]
struct Added<'a> {
    id: ElementId,
    actions: &'a [Action],
}

/// One editing session exposed to JavaScript.
#[wasm_bindgen]
pub struct Editor {
    core: EngineCore,
    listeners: Vec<js_sys::Function>,
}

#[wasm_bindgen]
impl Editor {
    /// Start a session. `config` is optional JSON, e.g. `{"canvasWidth":1440}`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> Result<Editor, JsValue> {
        let config = match config.as_deref() {
            Some(raw) if !raw.trim().is_empty() => EditorConfig::from_json(raw).map_err(BindingError::from)?,
            _ => EditorConfig::default(),
        };
        Ok(Self { core: EngineCore::new(config), listeners: Vec::new() })
    }

    /// Register a callback invoked with the snapshot JSON after each change.
    pub fn subscribe(&mut self, listener: js_sys::Function) {
        self.listeners.push(listener);
    }

    /// Add an element. Returns `{"id": ..., "actions": [...]}`.
    pub fn add(&mut self, kind: &str, overrides: Option<String>) -> Result<String, JsValue> {
        let kind: ElementKind = parse_tag("element kind", kind)?;
        let overrides: ElementPatch = parse_json("overrides", overrides.as_deref())?;
        let (id, actions) = self.core.add(kind, &overrides);
        self.finish_added(id, &actions)
    }

    /// Add an element from a palette preset such as `"heading"` or `"circle"`.
    #[wasm_bindgen(js_name = addPreset)]
    pub fn add_preset(&mut self, preset: &str) -> Result<String, JsValue> {
        let preset: Preset = parse_tag("preset", preset)?;
        let (id, actions) = self.core.add_preset(preset);
        self.finish_added(id, &actions)
    }

    pub fn update(&mut self, id: &str, patch: &str) -> Result<String, JsValue> {
        let id = parse_id(id)?;
        let patch: ElementPatch = parse_json("patch", Some(patch))?;
        let actions = self.core.update(&id, &patch);
        self.finish(&actions)
    }

    #[wasm_bindgen(js_name = replaceStyle)]
    pub fn replace_style(&mut self, id: &str, style: &str) -> Result<String, JsValue> {
        let id = parse_id(id)?;
        let style: Style = parse_json("style", Some(style))?;
        let actions = self.core.replace_style(&id, style);
        self.finish(&actions)
    }

    pub fn remove(&mut self, id: &str) -> Result<String, JsValue> {
        let id = parse_id(id)?;
        let actions = self.core.remove(&id);
        self.finish(&actions)
    }

    /// Select an element, or clear the selection with `null`/`undefined`.
    pub fn select(&mut self, id: Option<String>) -> Result<String, JsValue> {
        let id = id.as_deref().map(parse_id).transpose()?;
        let actions = self.core.select(id);
        self.finish(&actions)
    }

    #[wasm_bindgen(js_name = resizeCanvas)]
    pub fn resize_canvas(&mut self, width: f64, height: f64) -> Result<String, JsValue> {
        let actions = self.core.resize_canvas(width, height).map_err(BindingError::from)?;
        self.finish(&actions)
    }

    #[wasm_bindgen(js_name = commitText)]
    pub fn commit_text(&mut self, id: &str, text: String) -> Result<String, JsValue> {
        let id = parse_id(id)?;
        let actions = self.core.commit_text(&id, text);
        self.finish(&actions)
    }

    /// Align the selected text element: `"left"`, `"center"`, or `"right"`.
    #[wasm_bindgen(js_name = alignText)]
    pub fn align_text(&mut self, align: &str) -> Result<String, JsValue> {
        let align: TextAlign = parse_tag("text alignment", align)?;
        let actions = self.core.align_text(align);
        self.finish(&actions)
    }

    /// Toggle `"bold"`, `"italic"`, or `"underline"` on the selected text element.
    #[wasm_bindgen(js_name = toggleFont)]
    pub fn toggle_font(&mut self, which: &str) -> Result<String, JsValue> {
        let which: FontToggle = parse_tag("font toggle", which)?;
        let actions = self.core.toggle_font(which);
        self.finish(&actions)
    }

    #[wasm_bindgen(js_name = setCanvasOrigin)]
    pub fn set_canvas_origin(&mut self, left: f64, top: f64) {
        self.core.set_canvas_origin(left, top);
    }

    /// Read the canvas origin from the canvas element's bounding rect.
    #[wasm_bindgen(js_name = syncCanvasOrigin)]
    pub fn sync_canvas_origin(&mut self, canvas: &web_sys::Element) {
        let rect = canvas.get_bounding_client_rect();
        self.core.set_canvas_origin(rect.left(), rect.top());
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, client_x: f64, client_y: f64, button: i16) -> Result<String, JsValue> {
        let actions = self.core.on_pointer_down(Point::new(client_x, client_y), Button::from_dom(button));
        self.finish(&actions)
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, client_x: f64, client_y: f64) -> Result<String, JsValue> {
        let actions = self.core.on_pointer_move(Point::new(client_x, client_y));
        self.finish(&actions)
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, client_x: f64, client_y: f64, button: i16) -> Result<String, JsValue> {
        let actions = self.core.on_pointer_up(Point::new(client_x, client_y), Button::from_dom(button));
        self.finish(&actions)
    }

    #[wasm_bindgen(js_name = doubleClick)]
    pub fn double_click(&mut self, client_x: f64, client_y: f64) -> Result<String, JsValue> {
        let actions = self.core.on_double_click(Point::new(client_x, client_y));
        self.finish(&actions)
    }

    /// Current elements, selection, canvas extents, and revision as JSON.
    pub fn snapshot(&self) -> Result<String, JsValue> {
        Ok(encode("snapshot", &self.core.snapshot())?)
    }

    pub fn revision(&self) -> u64 {
        self.core.revision()
    }
}

impl Editor {
    fn finish(&mut self, actions: &[Action]) -> Result<String, JsValue> {
        self.notify(actions)?;
        Ok(encode("actions", actions)?)
    }

    fn finish_added(&mut self, id: ElementId, actions: &[Action]) -> Result<String, JsValue> {
        self.notify(actions)?;
        Ok(encode("added element", &Added { id, actions })?)
    }

    /// Push the snapshot to listeners when `actions` changed anything
    /// visible. Cursor-only updates are not broadcast.
    fn notify(&self, actions: &[Action]) -> Result<(), BindingError> {
        if self.listeners.is_empty() || !actions.iter().any(|a| matches!(a, Action::RenderNeeded)) {
            return Ok(());
        }
        let json = JsValue::from_str(&encode("snapshot", &self.core.snapshot())?);
        for listener in &self.listeners {
            if let Err(err) = listener.call1(&JsValue::NULL, &json) {
                warn!(?err, "snapshot listener threw");
            }
        }
        Ok(())
    }

    /// The session behind this handle.
    #[must_use]
    pub fn core(&self) -> &EngineCore {
        &self.core
    }
}
