//! Document model: canvas elements, their styles, and the in-memory store.
//!
//! This module defines what is on the page (`Element`, `ElementKind`), the
//! fixed set of optional style fields (`Style`), a sparse-update type shared by
//! creation overrides and incremental edits (`ElementPatch`), and the runtime
//! store that owns every live element plus the current selection
//! (`ElementStore`).
//!
//! Mutations arrive from the palette and toolbars (add, style edits), from the
//! text editor (content), and from the drag controller (position). The render
//! surface reads `ElementStore::elements` in paint order.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::bounds;
use crate::config::{ConfigError, check_dimension};
use crate::consts::{
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_ELEMENT_X, DEFAULT_ELEMENT_Y, IMAGE_HEIGHT,
    IMAGE_PLACEHOLDER_URL, IMAGE_WIDTH, SHAPE_FILL, SHAPE_HEIGHT, SHAPE_WIDTH, TEXT_COLOR, TEXT_CONTENT,
    TEXT_FONT_SIZE, TEXT_HEIGHT, TEXT_WIDTH, ZERO_RADIUS,
};
use crate::geom::{Point, Size};

/// Unique identifier for a canvas element.
pub type ElementId = Uuid;

/// The kind of a canvas element. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Free text block.
    Text,
    /// Image loaded from the URL held in `content`.
    Image,
    /// Filled shape whose variant is named by `content`.
    Shape,
}

/// Shape variants understood by the render surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeVariant {
    Rectangle,
    Circle,
}

impl ShapeVariant {
    /// The tag stored in a shape element's `content`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
        }
    }

    /// Parse a `content` tag. Unknown tags yield `None`.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "rectangle" => Some(Self::Rectangle),
            "circle" => Some(Self::Circle),
            _ => None,
        }
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// CSS `font-style` values the toolbar toggles between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    Normal,
    Italic,
}

/// CSS `text-decoration` values the toolbar toggles between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDecoration {
    None,
    Underline,
}

/// Presentation properties of an element. Absent fields mean "use default".
///
/// CSS-valued fields keep their CSS string form (`"16px"`, `"50%"`, `"bold"`)
/// so the host can apply them without conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<TextDecoration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<String>,
}

impl Style {
    /// Shallow-merge `patch` into `self`: every field set in `patch` wins,
    /// every field it leaves unset is kept.
    pub fn merge(&mut self, patch: &Style) {
        merge_field(&mut self.color, patch.color.as_ref());
        merge_field(&mut self.font_size, patch.font_size.as_ref());
        merge_field(&mut self.font_weight, patch.font_weight.as_ref());
        merge_field(&mut self.font_style, patch.font_style.as_ref());
        merge_field(&mut self.background_color, patch.background_color.as_ref());
        merge_field(&mut self.corner_radius, patch.corner_radius.as_ref());
        merge_field(&mut self.opacity, patch.opacity.as_ref());
        merge_field(&mut self.text_align, patch.text_align.as_ref());
        merge_field(&mut self.text_decoration, patch.text_decoration.as_ref());
        merge_field(&mut self.line_height, patch.line_height.as_ref());
    }

    /// Default style for a freshly added element of `kind`.
    #[must_use]
    pub fn defaults_for(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Text => Self {
                color: Some(TEXT_COLOR.into()),
                font_size: Some(TEXT_FONT_SIZE.into()),
                font_weight: Some("normal".into()),
                ..Self::default()
            },
            ElementKind::Image => Self {
                corner_radius: Some(ZERO_RADIUS.into()),
                opacity: Some(1.0),
                ..Self::default()
            },
            ElementKind::Shape => Self {
                background_color: Some(SHAPE_FILL.into()),
                corner_radius: Some(ZERO_RADIUS.into()),
                opacity: Some(1.0),
                ..Self::default()
            },
        }
    }
}

fn merge_field<T: Clone>(dst: &mut Option<T>, src: Option<&T>) {
    if let Some(v) = src {
        *dst = Some(v.clone());
    }
}

/// An element placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Unique identifier, assigned at creation.
    pub id: ElementId,
    /// Text, image, or shape. Never changes.
    pub kind: ElementKind,
    /// Left edge in canvas pixels.
    pub x: f64,
    /// Top edge in canvas pixels.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Text for text elements, URL for images, variant tag for shapes.
    pub content: String,
    pub style: Style,
}

impl Element {
    /// A new element of `kind` carrying that kind's default size, content,
    /// and style at the default position.
    #[must_use]
    pub fn with_defaults(id: ElementId, kind: ElementKind) -> Self {
        let (width, height, content) = match kind {
            ElementKind::Text => (TEXT_WIDTH, TEXT_HEIGHT, TEXT_CONTENT),
            ElementKind::Image => (IMAGE_WIDTH, IMAGE_HEIGHT, IMAGE_PLACEHOLDER_URL),
            ElementKind::Shape => (SHAPE_WIDTH, SHAPE_HEIGHT, ShapeVariant::Rectangle.as_str()),
        };
        Self {
            id,
            kind,
            x: DEFAULT_ELEMENT_X,
            y: DEFAULT_ELEMENT_Y,
            width,
            height,
            content: content.to_string(),
            style: Style::defaults_for(kind),
        }
    }

    /// Top-left corner.
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Centre of the bounding box.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether `pt` lies inside the bounding box (edges inclusive).
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.x + self.width && pt.y >= self.y && pt.y <= self.y + self.height
    }

    /// The shape variant named by `content`, for shape elements only.
    #[must_use]
    pub fn shape_variant(&self) -> Option<ShapeVariant> {
        match self.kind {
            ElementKind::Shape => ShapeVariant::parse(&self.content),
            ElementKind::Text | ElementKind::Image => None,
        }
    }
}

/// Sparse update for an element. Only present fields are applied.
///
/// Used both as the override set passed to [`ElementStore::add`] and as the
/// edit passed to [`ElementStore::update`]. `style` is merged field-by-field,
/// never replacing the existing style wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
}

impl ElementPatch {
    /// A patch that only moves the element.
    #[must_use]
    pub fn position(pt: Point) -> Self {
        Self { x: Some(pt.x), y: Some(pt.y), ..Self::default() }
    }

    /// A patch that only replaces the content.
    #[must_use]
    pub fn content(content: impl Into<String>) -> Self {
        Self { content: Some(content.into()), ..Self::default() }
    }

    /// A patch that only merges style fields.
    #[must_use]
    pub fn style(style: Style) -> Self {
        Self { style: Some(style), ..Self::default() }
    }

    fn touches_position(&self) -> bool {
        self.x.is_some() || self.y.is_some()
    }

    /// Non-finite coordinates and sizes that are not positive finite numbers
    /// are dropped, so the half-extent clamp always sees usable values.
    fn apply_to(&self, el: &mut Element) {
        if let Some(x) = self.x.filter(|x| x.is_finite()) {
            el.x = x;
        }
        if let Some(y) = self.y.filter(|y| y.is_finite()) {
            el.y = y;
        }
        if let Some(w) = self.width {
            match check_dimension("width", w) {
                Ok(()) => el.width = w,
                Err(err) => warn!(id = %el.id, %err, "ignoring element size"),
            }
        }
        if let Some(h) = self.height {
            match check_dimension("height", h) {
                Ok(()) => el.height = h,
                Err(err) => warn!(id = %el.id, %err, "ignoring element size"),
            }
        }
        if let Some(ref content) = self.content {
            el.content.clone_from(content);
        }
        if let Some(ref style) = self.style {
            el.style.merge(style);
        }
    }
}

/// Width and height of the canvas in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasExtents {
    pub width: f64,
    pub height: f64,
}

impl Default for CanvasExtents {
    fn default() -> Self {
        Self { width: DEFAULT_CANVAS_WIDTH, height: DEFAULT_CANVAS_HEIGHT }
    }
}

/// In-memory store of canvas elements, the selection, and the canvas extents.
///
/// Elements are kept in insertion order, which is also paint order: later
/// elements paint on top.
#[derive(Debug, Clone, Default)]
pub struct ElementStore {
    elements: Vec<Element>,
    selected: Option<ElementId>,
    extents: CanvasExtents,
}

impl ElementStore {
    /// Create an empty store with the given canvas extents.
    #[must_use]
    pub fn new(extents: CanvasExtents) -> Self {
        Self { elements: Vec::new(), selected: None, extents }
    }

    /// Create an element of `kind`, apply `overrides` on top of the kind
    /// defaults, append it, and select it.
    pub fn add(&mut self, kind: ElementKind, overrides: &ElementPatch) -> ElementId {
        let id = Uuid::new_v4();
        let mut el = Element::with_defaults(id, kind);
        overrides.apply_to(&mut el);
        self.clamp_in_place(&mut el);
        debug!(%id, ?kind, x = el.x, y = el.y, "element added");
        self.elements.push(el);
        self.selected = Some(id);
        id
    }

    /// Apply a partial update. Returns `false` if no element has `id`.
    ///
    /// Position writes are clamped to the canvas.
    pub fn update(&mut self, id: &ElementId, patch: &ElementPatch) -> bool {
        let extents = self.extents;
        let Some(el) = self.get_mut(id) else {
            return false;
        };
        patch.apply_to(el);
        if patch.touches_position() {
            let p = bounds::clamp(el.position(), el.size(), extents);
            el.x = p.x;
            el.y = p.y;
        }
        true
    }

    /// Replace an element's style outright. Returns `false` if no element has `id`.
    pub fn replace_style(&mut self, id: &ElementId, style: Style) -> bool {
        let Some(el) = self.get_mut(id) else {
            return false;
        };
        el.style = style;
        true
    }

    /// Remove an element, returning it if it was present. Clears the
    /// selection when it pointed at the removed element.
    pub fn remove(&mut self, id: &ElementId) -> Option<Element> {
        let idx = self.elements.iter().position(|el| el.id == *id)?;
        let el = self.elements.remove(idx);
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        debug!(%id, remaining = self.elements.len(), "element removed");
        Some(el)
    }

    /// Set the selection. The id is not validated; see [`Self::selected_element`].
    pub fn select(&mut self, id: Option<ElementId>) {
        self.selected = id;
    }

    /// The raw selection, which may name an element that no longer exists.
    #[must_use]
    pub fn selection(&self) -> Option<ElementId> {
        self.selected
    }

    /// The selected element, or `None` when nothing is selected or the
    /// selection points at an element that is gone.
    #[must_use]
    pub fn selected_element(&self) -> Option<&Element> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    /// Set the canvas extents. Existing elements are not re-clamped.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDimension`] and keeps the old extents when
    /// either dimension is not a positive finite number.
    pub fn resize_canvas(&mut self, width: f64, height: f64) -> Result<(), ConfigError> {
        check_dimension("width", width)?;
        check_dimension("height", height)?;
        self.extents = CanvasExtents { width, height };
        debug!(width, height, "canvas resized");
        Ok(())
    }

    #[must_use]
    pub fn extents(&self) -> CanvasExtents {
        self.extents
    }

    /// Return a reference to an element by id.
    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|el| el.id == *id)
    }

    fn get_mut(&mut self, id: &ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|el| el.id == *id)
    }

    /// All elements in paint order (bottom first).
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Number of elements currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the store contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn clamp_in_place(&self, el: &mut Element) {
        let p = bounds::clamp(el.position(), el.size(), self.extents);
        el.x = p.x;
        el.y = p.y;
    }
}
