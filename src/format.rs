//! Text formatting toolbar operations.
//!
//! These only act on the selected element and only when it is a text
//! element; anything else is a silent no-op.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use serde::{Deserialize, Serialize};

use crate::doc::{Element, ElementId, ElementKind, ElementPatch, ElementStore, FontStyle, Style, TextAlign, TextDecoration};

/// Font property flipped by a toolbar toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontToggle {
    Bold,
    Italic,
    Underline,
}

/// Style change that flips `toggle` relative to `current`.
#[must_use]
pub fn toggled(current: &Style, toggle: FontToggle) -> Style {
    match toggle {
        FontToggle::Bold => {
            let weight = if current.font_weight.as_deref() == Some("bold") { "normal" } else { "bold" };
            Style { font_weight: Some(weight.into()), ..Style::default() }
        }
        FontToggle::Italic => {
            let style = if current.font_style == Some(FontStyle::Italic) { FontStyle::Normal } else { FontStyle::Italic };
            Style { font_style: Some(style), ..Style::default() }
        }
        FontToggle::Underline => {
            let deco = if current.text_decoration == Some(TextDecoration::Underline) {
                TextDecoration::None
            } else {
                TextDecoration::Underline
            };
            Style { text_decoration: Some(deco), ..Style::default() }
        }
    }
}

fn selected_text(store: &ElementStore) -> Option<&Element> {
    store.selected_element().filter(|el| el.kind == ElementKind::Text)
}

/// Set the alignment of the selected text element. Returns the applied patch.
pub fn align(store: &mut ElementStore, value: TextAlign) -> Option<(ElementId, ElementPatch)> {
    let id = selected_text(store)?.id;
    let patch = ElementPatch::style(Style { text_align: Some(value), ..Style::default() });
    store.update(&id, &patch);
    Some((id, patch))
}

/// Flip a font property on the selected text element. Returns the applied patch.
pub fn toggle(store: &mut ElementStore, which: FontToggle) -> Option<(ElementId, ElementPatch)> {
    let el = selected_text(store)?;
    let id = el.id;
    let patch = ElementPatch::style(toggled(&el.style, which));
    store.update(&id, &patch);
    Some((id, patch))
}
