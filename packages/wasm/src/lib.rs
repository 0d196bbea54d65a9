use liveedit_editor::{
    style_controls, Direction, DragController, EditSession, EditorConfig, Mutation, PointerPosition,
};
use liveedit_generation::{
    extract_code_from_markdown, parse_quiz, response_text, GenerationConfig, GenerationRequest,
    ImageInput,
};
use std::fmt::Display;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn js_error(prefix: &str, e: impl Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", prefix, e))
}

/// Edit session plus pointer state for one preview surface
#[wasm_bindgen]
pub struct LiveEditor {
    session: EditSession,
    drag: DragController,
}

#[wasm_bindgen]
impl LiveEditor {
    /// Extract editable elements from `markup`. `config_json` uses the
    /// `liveedit.config.json` format.
    #[wasm_bindgen(constructor)]
    pub fn new(markup: &str, config_json: Option<String>) -> Result<LiveEditor, JsValue> {
        let config = match config_json {
            Some(json) => EditorConfig::from_json(&json).map_err(|e| js_error("Config error", e))?,
            None => EditorConfig::default(),
        };

        Ok(Self {
            session: EditSession::from_markup(markup, config),
            drag: DragController::new(),
        })
    }

    /// Replace the markup being edited
    pub fn load(&mut self, markup: &str) {
        self.drag.reset();
        self.session.load(markup);
    }

    #[wasm_bindgen(getter)]
    pub fn markup(&self) -> String {
        self.session.markup().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn version(&self) -> f64 {
        self.session.version() as f64
    }

    /// Element store as a JSON object keyed by element id
    #[wasm_bindgen(js_name = elementsJson)]
    pub fn elements_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.session.store()).map_err(|e| js_error("Serialization error", e))
    }

    #[wasm_bindgen(js_name = setText)]
    pub fn set_text(&mut self, id: &str, text: &str) -> bool {
        self.session.set_text(id, text).applied
    }

    #[wasm_bindgen(js_name = setStyle)]
    pub fn set_style(&mut self, id: &str, property: &str, value: &str) -> bool {
        self.session.set_style(id, property, value).applied
    }

    /// `direction` is `left`/`right`/`up`/`down` or an arrow key name
    pub fn nudge(&mut self, id: &str, direction: &str, amount: Option<i32>) -> Result<bool, JsValue> {
        let direction: Direction = direction.parse().map_err(|e| js_error("Nudge error", e))?;
        Ok(self.session.nudge(id, direction, amount.map(i64::from)).applied)
    }

    /// Apply a mutation given as JSON, e.g. `{"type":"dragBy","id":"element-0","dx":3,"dy":0}`
    #[wasm_bindgen(js_name = applyJson)]
    pub fn apply_json(&mut self, mutation_json: &str) -> Result<bool, JsValue> {
        let mutation: Mutation =
            serde_json::from_str(mutation_json).map_err(|e| js_error("Mutation error", e))?;
        Ok(self.session.apply(mutation).applied)
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, id: &str, x: f64, y: f64) -> bool {
        self.drag
            .pointer_down(&mut self.session, id, PointerPosition::from_client(x, y))
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.drag
            .pointer_move(&mut self.session, PointerPosition::from_client(x, y))
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) -> bool {
        self.drag.pointer_up(&mut self.session)
    }

    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&mut self) -> bool {
        self.drag.pointer_leave(&mut self.session)
    }

    pub fn select(&mut self, id: &str) -> bool {
        self.session.select(id)
    }

    #[wasm_bindgen(js_name = clearSelection)]
    pub fn clear_selection(&mut self) {
        self.session.clear_selection();
    }

    #[wasm_bindgen(getter)]
    pub fn selected(&self) -> Option<String> {
        self.session.selected().map(|id| id.to_string())
    }

    #[wasm_bindgen(js_name = previewHtml)]
    pub fn preview_html(&self) -> String {
        liveedit_editor::render_surface_html(&self.session.preview())
    }

    #[wasm_bindgen(js_name = previewJson)]
    pub fn preview_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.preview()).map_err(|e| js_error("Serialization error", e))
    }

    #[wasm_bindgen(js_name = exportCss)]
    pub fn export_css(&self) -> String {
        self.session.export_css()
    }
}

/// Editable style properties and their control kinds as JSON
#[wasm_bindgen(js_name = styleControls)]
pub fn style_controls_js() -> Result<String, JsValue> {
    serde_json::to_string(style_controls()).map_err(|e| js_error("Serialization error", e))
}

/// Request body for converting a `data:` image URL to markup
#[wasm_bindgen(js_name = buildImageRequest)]
pub fn build_image_request_js(data_url: &str) -> Result<String, JsValue> {
    let image = ImageInput::from_data_url(data_url).map_err(|e| js_error("Request error", e))?;
    let body = GenerationRequest::Markup { image }
        .body(&GenerationConfig::default())
        .map_err(|e| js_error("Request error", e))?;
    Ok(body.to_string())
}

/// Request body for a quiz about `topic`
#[wasm_bindgen(js_name = buildQuizRequest)]
pub fn build_quiz_request_js(topic: &str) -> Result<String, JsValue> {
    let body = GenerationRequest::Quiz {
        topic: topic.to_string(),
    }
    .body(&GenerationConfig::default())
    .map_err(|e| js_error("Request error", e))?;
    Ok(body.to_string())
}

/// Markup from a raw provider response
#[wasm_bindgen(js_name = markupFromResponse)]
pub fn markup_from_response_js(response_json: &str) -> Result<String, JsValue> {
    let response: serde_json::Value =
        serde_json::from_str(response_json).map_err(|e| js_error("Response error", e))?;
    let text = response_text(&response).map_err(|e| js_error("Response error", e))?;
    extract_code_from_markdown(&text).map_err(|e| js_error("Response error", e))
}

/// Quiz questions (as JSON) from the model's text
#[wasm_bindgen(js_name = parseQuiz)]
pub fn parse_quiz_js(text: &str) -> Result<String, JsValue> {
    let quiz = parse_quiz(text).map_err(|e| js_error("Quiz error", e))?;
    serde_json::to_string(&quiz).map_err(|e| js_error("Serialization error", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKUP: &str = r#"<div style="position: relative"><p style="top:5px;left:5px;">Hi</p><img src="https://placehold.co/40"></div>"#;

    #[test]
    fn test_edit_through_binding() {
        let mut editor = LiveEditor::new(MARKUP, None).unwrap();
        assert!(editor.set_text("element-0", "Bye"));
        assert!(editor.nudge("element-0", "ArrowRight", None).unwrap());

        let markup = editor.markup();
        assert!(markup.contains(">Bye</p>"));
        assert!(markup.contains("left: 15px;"));
        assert_eq!(editor.version(), 3.0);
    }

    #[test]
    fn test_pointer_drag() {
        let mut editor = LiveEditor::new(MARKUP, Some(r#"{"nudgeStep": 1}"#.to_string())).unwrap();
        assert!(editor.pointer_down("element-0", 0.0, 0.0));
        assert_eq!(editor.selected(), Some("element-0".to_string()));
        editor.pointer_move(4.4, 2.0);
        editor.pointer_move(9.6, 2.0);
        assert!(editor.pointer_up());

        assert!(editor.markup().contains("top: 7px; left: 15px;"));
        assert!(editor.preview_html().contains("border: 2px dashed #4f46e5;"));
    }

    #[test]
    fn test_elements_json() {
        let editor = LiveEditor::new(MARKUP, None).unwrap();
        let json: serde_json::Value = serde_json::from_str(&editor.elements_json().unwrap()).unwrap();
        assert_eq!(json["element-0"]["text"], "Hi");
        assert_eq!(json["element-1"]["kind"], "image");
    }

    #[test]
    fn test_generation_helpers() {
        let body = build_image_request_js("data:image/png;base64,AAAA").unwrap();
        assert!(body.contains(r#""inline_data":{"data":"AAAA","mime_type":"image/png"}"#));

        let response = r#"{"candidates":[{"content":{"parts":[{"text":"```html\n<p>x</p>\n```"}]}}]}"#;
        assert_eq!(markup_from_response_js(response).unwrap(), "<p>x</p>");

        let quiz = parse_quiz_js(r#"[{"question":"q","options":["a","b","c","d"],"correctAnswer":"a"}]"#).unwrap();
        assert!(quiz.contains(r#""correctAnswer":"a""#));

        assert!(style_controls_js().unwrap().starts_with(r#"[{"name":"color","type":"color"}"#));
    }
}
