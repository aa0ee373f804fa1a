#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;
use crate::doc::{FontStyle, Style};

// =============================================================
// Helpers
// =============================================================

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn has_action<F>(actions: &[Action], pred: F) -> bool
where
    F: Fn(&Action) -> bool,
{
    actions.iter().any(pred)
}

fn has_render_needed(actions: &[Action]) -> bool {
    has_action(actions, |a| matches!(a, Action::RenderNeeded))
}

fn has_selection_changed(actions: &[Action]) -> bool {
    has_action(actions, |a| matches!(a, Action::SelectionChanged { .. }))
}

fn has_element_updated(actions: &[Action]) -> bool {
    has_action(actions, |a| matches!(a, Action::ElementUpdated { .. }))
}

fn has_element_removed(actions: &[Action]) -> bool {
    has_action(actions, |a| matches!(a, Action::ElementRemoved { .. }))
}

/// Core with one selected 100x100 shape at (100, 100).
fn core_with_shape() -> (EngineCore, ElementId) {
    let mut core = EngineCore::default();
    let (id, _) = core.add(ElementKind::Shape, &ElementPatch::default());
    (core, id)
}

// =============================================================
// Construction
// =============================================================

#[test]
fn core_new_is_empty() {
    let core = EngineCore::default();
    assert!(core.store().is_empty());
    assert!(core.selection().is_none());
    assert!(!core.is_dragging());
    assert_eq!(core.revision(), 0);
    assert_eq!(core.cursor(), "default");
}

#[test]
fn core_uses_configured_extents() {
    let core = EngineCore::new(EditorConfig { canvas_width: 1440.0, canvas_height: 900.0 });
    assert_eq!(core.store().extents(), CanvasExtents { width: 1440.0, height: 900.0 });
}

// =============================================================
// Store commands
// =============================================================

#[test]
fn add_text_end_to_end() {
    let mut core = EngineCore::default();
    let (id, actions) = core.add(ElementKind::Text, &ElementPatch::default());
    let el = core.element(&id).unwrap();
    assert_eq!(el.kind, ElementKind::Text);
    assert_eq!((el.width, el.height), (200.0, 50.0));
    assert_eq!(el.content, "Edit this text");
    assert_eq!(el.style.color.as_deref(), Some("#000000"));
    assert_eq!(el.style.font_size.as_deref(), Some("16px"));
    assert_eq!(core.selection(), Some(id));

    assert!(matches!(&actions[0], Action::ElementAdded { element } if element.id == id));
    assert!(actions.contains(&Action::SelectionChanged { id: Some(id) }));
    assert!(has_render_needed(&actions));
}

#[test]
fn add_preset_circle() {
    let mut core = EngineCore::default();
    let (id, _) = core.add_preset(Preset::Circle);
    let el = core.element(&id).unwrap();
    assert_eq!(el.content, "circle");
    assert_eq!(el.style.corner_radius.as_deref(), Some("50%"));
}

#[test]
fn update_reports_clamped_position() {
    let mut core = EngineCore::default();
    let (id, _) = core.add(ElementKind::Text, &ElementPatch::default());
    let actions = core.update(&id, &ElementPatch::position(pt(1150.0, 780.0)));
    let expected = ElementPatch::position(pt(1100.0, 775.0));
    assert_eq!(actions[0], Action::ElementUpdated { id, patch: expected });
}

#[test]
fn update_unknown_id_emits_nothing() {
    let (mut core, _) = core_with_shape();
    let rev = core.revision();
    assert!(core.update(&Uuid::new_v4(), &ElementPatch::content("x")).is_empty());
    assert_eq!(core.revision(), rev);
}

#[test]
fn update_style_merges() {
    let (mut core, id) = core_with_shape();
    core.update(&id, &ElementPatch::style(Style { opacity: Some(0.4), ..Style::default() }));
    let style = &core.element(&id).unwrap().style;
    assert_eq!(style.opacity, Some(0.4));
    assert_eq!(style.background_color.as_deref(), Some("#3b82f6"));
}

#[test]
fn replace_style_drops_previous_fields() {
    let (mut core, id) = core_with_shape();
    let style = Style { opacity: Some(0.5), ..Style::default() };
    let actions = core.replace_style(&id, style.clone());
    assert_eq!(actions[0], Action::StyleReplaced { id, style: style.clone() });
    assert_eq!(core.element(&id).unwrap().style, style);
}

#[test]
fn replace_style_unknown_id_emits_nothing() {
    let (mut core, _) = core_with_shape();
    assert!(core.replace_style(&Uuid::new_v4(), Style::default()).is_empty());
}

#[test]
fn remove_selected_emits_selection_change() {
    let (mut core, id) = core_with_shape();
    let actions = core.remove(&id);
    assert_eq!(actions[0], Action::ElementRemoved { id });
    assert!(actions.contains(&Action::SelectionChanged { id: None }));
    assert!(core.selection().is_none());
}

#[test]
fn remove_unselected_keeps_selection() {
    let (mut core, first) = core_with_shape();
    let (second, _) = core.add(ElementKind::Text, &ElementPatch::default());
    let actions = core.remove(&first);
    assert!(!has_selection_changed(&actions));
    assert_eq!(core.selection(), Some(second));
}

#[test]
fn remove_unknown_id_emits_nothing() {
    let (mut core, _) = core_with_shape();
    assert!(core.remove(&Uuid::new_v4()).is_empty());
}

#[test]
fn select_twice_is_idempotent() {
    let (mut core, id) = core_with_shape();
    core.select(None);
    let first = core.select(Some(id));
    let snapshot_once = (core.selection(), core.revision());
    let second = core.select(Some(id));
    assert!(has_selection_changed(&first));
    assert!(second.is_empty());
    assert_eq!((core.selection(), core.revision()), snapshot_once);
}

#[test]
fn selecting_removed_element_shows_no_selection() {
    let (mut core, id) = core_with_shape();
    core.remove(&id);
    core.select(Some(id));
    assert!(core.selection().is_none());
    assert!(core.snapshot().selection.is_none());
}

#[test]
fn resize_canvas_emits_resize() {
    let mut core = EngineCore::default();
    let actions = core.resize_canvas(800.0, 600.0).unwrap();
    assert_eq!(actions[0], Action::CanvasResized { width: 800.0, height: 600.0 });
    assert_eq!(core.store().extents(), CanvasExtents { width: 800.0, height: 600.0 });
}

#[test]
fn invalid_resize_keeps_canvas_and_revision() {
    let (mut core, id) = core_with_shape();
    let before = core.revision();
    assert!(core.resize_canvas(f64::NAN, -10.0).is_err());
    assert_eq!(core.revision(), before);
    assert_eq!(core.store().extents(), CanvasExtents::default());

    core.update(&id, &ElementPatch::position(pt(5000.0, 5000.0)));
    assert_eq!(core.element(&id).unwrap().position(), pt(1150.0, 750.0));
}

#[test]
fn update_reports_stored_size_when_patch_size_is_dropped() {
    let (mut core, id) = core_with_shape();
    let patch = ElementPatch { width: Some(-4000.0), x: Some(2500.0), ..ElementPatch::default() };
    let actions = core.update(&id, &patch);
    let Action::ElementUpdated { patch: settled, .. } = &actions[0] else {
        panic!("expected ElementUpdated, got {actions:?}");
    };
    assert_eq!(settled.width, Some(100.0));
    assert_eq!(settled.x, Some(1150.0));
}

#[test]
fn commit_text_updates_content() {
    let mut core = EngineCore::default();
    let (id, _) = core.add(ElementKind::Text, &ElementPatch::default());
    let actions = core.commit_text(&id, "Hello, portfolio".into());
    assert!(has_element_updated(&actions));
    assert_eq!(core.element(&id).unwrap().content, "Hello, portfolio");
}

#[test]
fn align_and_toggle_on_selected_text() {
    let mut core = EngineCore::default();
    let (id, _) = core.add(ElementKind::Text, &ElementPatch::default());
    assert!(has_element_updated(&core.align_text(TextAlign::Center)));
    assert!(has_element_updated(&core.toggle_font(FontToggle::Italic)));
    let style = &core.element(&id).unwrap().style;
    assert_eq!(style.text_align, Some(TextAlign::Center));
    assert_eq!(style.font_style, Some(FontStyle::Italic));
}

#[test]
fn format_on_shape_is_noop() {
    let (mut core, _) = core_with_shape();
    assert!(core.align_text(TextAlign::Left).is_empty());
    assert!(core.toggle_font(FontToggle::Bold).is_empty());
}

// =============================================================
// Pointer routing
// =============================================================

#[test]
fn pointer_down_on_empty_canvas_deselects() {
    let (mut core, _) = core_with_shape();
    let actions = core.on_pointer_down(pt(900.0, 600.0), Button::Primary);
    assert!(actions.contains(&Action::SelectionChanged { id: None }));
    assert!(core.selection().is_none());
}

#[test]
fn pointer_down_on_body_selects() {
    let (mut core, id) = core_with_shape();
    core.select(None);
    let actions = core.on_pointer_down(pt(105.0, 105.0), Button::Primary);
    assert!(actions.contains(&Action::SelectionChanged { id: Some(id) }));
    assert!(!core.is_dragging());
}

#[test]
fn pointer_down_on_delete_control_removes() {
    let (mut core, id) = core_with_shape();
    let actions = core.on_pointer_down(pt(204.0, 96.0), Button::Primary);
    assert!(has_element_removed(&actions));
    assert!(core.element(&id).is_none());
}

#[test]
fn pointer_down_on_handle_starts_drag() {
    let (mut core, _) = core_with_shape();
    let actions = core.on_pointer_down(pt(150.0, 150.0), Button::Primary);
    assert!(core.is_dragging());
    assert!(actions.contains(&Action::SetCursor { cursor: "move".into() }));
}

#[test]
fn secondary_button_is_ignored() {
    let (mut core, _) = core_with_shape();
    assert!(core.on_pointer_down(pt(150.0, 150.0), Button::Secondary).is_empty());
    assert!(!core.is_dragging());
}

#[test]
fn full_drag_moves_element() {
    let (mut core, id) = core_with_shape();
    // Grab the handle 50px right and down from the top-left corner.
    core.on_pointer_down(pt(150.0, 150.0), Button::Primary);
    let actions = core.on_pointer_move(pt(400.0, 300.0));
    assert_eq!(actions[0], Action::ElementUpdated { id, patch: ElementPatch::position(pt(350.0, 250.0)) });
    core.on_pointer_up(pt(400.0, 300.0), Button::Primary);
    assert!(!core.is_dragging());
    assert_eq!(core.element(&id).unwrap().position(), pt(350.0, 250.0));
}

#[test]
fn drag_uses_canvas_local_coordinates() {
    let (mut core, id) = core_with_shape();
    core.set_canvas_origin(300.0, 50.0);
    core.on_pointer_down(pt(450.0, 200.0), Button::Primary);
    assert!(core.is_dragging());
    core.on_pointer_move(pt(650.0, 400.0));
    assert_eq!(core.element(&id).unwrap().position(), pt(300.0, 300.0));
}

#[test]
fn drag_is_clamped_to_canvas() {
    let (mut core, id) = core_with_shape();
    core.on_pointer_down(pt(150.0, 150.0), Button::Primary);
    core.on_pointer_move(pt(5000.0, -500.0));
    assert_eq!(core.element(&id).unwrap().position(), pt(1150.0, 0.0));
}

#[test]
fn drag_selects_grabbed_element() {
    let (mut core, below) = core_with_shape();
    core.add(ElementKind::Text, &ElementPatch::position(pt(600.0, 600.0)));
    core.select(Some(below));
    core.on_pointer_down(pt(150.0, 150.0), Button::Primary);
    assert_eq!(core.selection(), Some(below));
}

#[test]
fn move_after_delete_during_drag_is_noop() {
    let (mut core, id) = core_with_shape();
    core.on_pointer_down(pt(150.0, 150.0), Button::Primary);
    core.remove(&id);
    let rev = core.revision();
    assert!(core.on_pointer_move(pt(400.0, 400.0)).is_empty());
    assert_eq!(core.revision(), rev);
    assert!(core.is_dragging());
    core.on_pointer_up(pt(400.0, 400.0), Button::Primary);
    assert!(!core.is_dragging());
}

#[test]
fn pointer_up_without_drag_is_harmless() {
    let (mut core, _) = core_with_shape();
    let rev = core.revision();
    core.on_pointer_up(pt(10.0, 10.0), Button::Primary);
    assert_eq!(core.revision(), rev);
}

#[test]
fn hover_sets_cursor_only_on_change() {
    let (mut core, _) = core_with_shape();
    let over_handle = core.on_pointer_move(pt(150.0, 150.0));
    assert_eq!(over_handle, vec![Action::SetCursor { cursor: "move".into() }]);
    assert!(core.on_pointer_move(pt(151.0, 151.0)).is_empty());
    let over_delete = core.on_pointer_move(pt(204.0, 96.0));
    assert_eq!(over_delete, vec![Action::SetCursor { cursor: "pointer".into() }]);
    let away = core.on_pointer_move(pt(700.0, 700.0));
    assert_eq!(away, vec![Action::SetCursor { cursor: "default".into() }]);
}

#[test]
fn double_click_text_requests_edit() {
    let mut core = EngineCore::default();
    let (id, _) = core.add(ElementKind::Text, &ElementPatch::default());
    let actions = core.on_double_click(pt(110.0, 110.0));
    assert_eq!(actions, vec![Action::EditTextRequested { id, text: "Edit this text".into() }]);
}

#[test]
fn double_click_shape_does_nothing() {
    let (mut core, _) = core_with_shape();
    assert!(core.on_double_click(pt(110.0, 110.0)).is_empty());
}

// =============================================================
// Snapshot and actions on the wire
// =============================================================

#[test]
fn revision_counts_changes() {
    let mut core = EngineCore::default();
    let (id, _) = core.add(ElementKind::Text, &ElementPatch::default());
    core.update(&id, &ElementPatch::content("a"));
    core.select(None);
    assert_eq!(core.revision(), 3);
}

#[test]
fn snapshot_serializes_for_host() {
    let (core, id) = core_with_shape();
    let v = serde_json::to_value(core.snapshot()).unwrap();
    assert_eq!(v["elements"].as_array().unwrap().len(), 1);
    assert_eq!(v["selection"], id.to_string());
    assert_eq!(v["canvas"]["width"], 1200.0);
    assert_eq!(v["revision"], 1);
}

#[test]
fn action_serializes_with_type_tag() {
    let id = Uuid::new_v4();
    let v = serde_json::to_value(Action::ElementRemoved { id }).unwrap();
    assert_eq!(v["type"], "element_removed");
    assert_eq!(v["id"], id.to_string());

    let v = serde_json::to_value(Action::RenderNeeded).unwrap();
    assert_eq!(v, serde_json::json!({ "type": "render_needed" }));
}
