//! Browser tests for the wasm surface (`wasm-pack test --headless --chrome packages/wasm`)

#![cfg(target_arch = "wasm32")]

use liveedit_wasm::{parse_quiz_js, LiveEditor};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const MARKUP: &str = r#"<div><p style="top: 5px; left: 5px">Hi</p></div>"#;

#[wasm_bindgen_test]
fn edit_and_drag_in_browser() {
    let mut editor = LiveEditor::new(MARKUP, None).unwrap();
    assert!(editor.set_text("element-0", "Bye"));

    assert!(editor.pointer_down("element-0", 10.0, 10.0));
    editor.pointer_move(12.6, 10.0);
    assert!(editor.pointer_up());

    let markup = editor.markup();
    assert!(markup.contains(">Bye</p>"));
    assert!(markup.contains("left: 8px;"));
}

#[wasm_bindgen_test]
fn load_during_drag_starts_idle() {
    let mut editor = LiveEditor::new(MARKUP, None).unwrap();
    editor.pointer_down("element-0", 0.0, 0.0);
    editor.load(r#"<p style="top: 1px; left: 1px">Fresh</p>"#);

    assert!(!editor.pointer_move(40.0, 0.0));
    assert!(editor.markup().contains("left: 1px;"));
}

#[wasm_bindgen_test]
fn invalid_config_is_a_js_error() {
    assert!(LiveEditor::new(MARKUP, Some(r#"{"markerAttribute": "src"}"#.to_string())).is_err());
    assert!(parse_quiz_js("no quiz here").is_err());
}
