//! # Edit Surface
//!
//! Renders the store as a flat surface of absolutely positioned items, one
//! per element, for the host to draw and hit-test. Placement comes from
//! `position`; the element's own `top`/`left` declarations are left out so
//! they cannot fight it.

use crate::{EditableElement, ElementId, ElementStore};
use liveedit_markup::entities::{escape_attribute, escape_text};
use serde::Serialize;

const SELECTED_BORDER: &str = "2px dashed #4f46e5";
const IDLE_BORDER: &str = "2px dashed transparent";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewItem {
    pub id: ElementId,

    /// Drawn as an `<img>` with `content` as its source
    pub is_image: bool,

    /// Text, or image source when `is_image`
    pub content: String,

    /// Ordered `(property, value)` pairs
    pub style: Vec<(String, String)>,

    pub selected: bool,
}

impl PreviewItem {
    pub fn style_attribute(&self) -> String {
        self.style
            .iter()
            .map(|(property, value)| format!("{}: {};", property, value))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn to_html(&self) -> String {
        let id = escape_attribute(self.id.as_str());
        let style = escape_attribute(&self.style_attribute());
        if self.is_image {
            format!(
                r#"<img data-edit-id="{}" src="{}" alt="Element" style="{}">"#,
                id,
                escape_attribute(&self.content),
                style
            )
        } else {
            format!(
                r#"<div data-edit-id="{}" style="{}">{}</div>"#,
                id,
                style,
                escape_text(&self.content)
            )
        }
    }
}

/// One item per element, in document order
pub fn render_preview(store: &ElementStore, selected: Option<&ElementId>) -> Vec<PreviewItem> {
    store
        .iter()
        .map(|element| preview_item(element, selected == Some(&element.id)))
        .collect()
}

/// The whole surface as one positioned container
pub fn render_surface_html(items: &[PreviewItem]) -> String {
    let mut html = String::from(
        r#"<div class="liveedit-surface" style="position: relative; min-height: 400px; padding: 20px;">"#,
    );
    for item in items {
        html.push_str(&item.to_html());
    }
    html.push_str("</div>");
    html
}

fn preview_item(element: &EditableElement, selected: bool) -> PreviewItem {
    let mut style = vec![
        ("position", "absolute".to_string()),
        ("top", format!("{}px", element.position.top)),
        ("left", format!("{}px", element.position.left)),
        ("padding", "2px".to_string()),
        ("cursor", "move".to_string()),
        ("border", if selected { SELECTED_BORDER } else { IDLE_BORDER }.to_string()),
        ("z-index", if selected { "10" } else { "1" }.to_string()),
    ];

    // Element styles override the base declarations, except placement
    for (property, value) in element.style.iter() {
        if property == "top" || property == "left" {
            continue;
        }
        match style.iter_mut().find(|(p, _)| *p == property) {
            Some((_, existing)) => *existing = value.to_string(),
            None => style.push((property, value.to_string())),
        }
    }

    PreviewItem {
        id: element.id.clone(),
        is_image: element.is_image(),
        content: element.text.clone(),
        style: style
            .into_iter()
            .map(|(property, value)| (property.to_string(), value))
            .collect(),
        selected,
    }
}
