//! Style properties offered by the element editor

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "options", rename_all = "camelCase")]
pub enum ControlKind {
    Color,
    Text,
    Select(&'static [&'static str]),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleControl {
    pub name: &'static str,
    #[serde(flatten)]
    pub kind: ControlKind,
}

const FONT_WEIGHTS: &[&str] = &["normal", "bold", "lighter", "bolder", "500", "600", "700"];
const TEXT_ALIGNMENTS: &[&str] = &["left", "center", "right", "justify"];

const CONTROLS: &[StyleControl] = &[
    control("color", ControlKind::Color),
    control("background-color", ControlKind::Color),
    control("font-size", ControlKind::Text),
    control("font-weight", ControlKind::Select(FONT_WEIGHTS)),
    control("text-align", ControlKind::Select(TEXT_ALIGNMENTS)),
    control("padding", ControlKind::Text),
    control("margin", ControlKind::Text),
    control("border", ControlKind::Text),
    control("border-radius", ControlKind::Text),
    control("width", ControlKind::Text),
    control("height", ControlKind::Text),
];

const fn control(name: &'static str, kind: ControlKind) -> StyleControl {
    StyleControl { name, kind }
}

/// The editable properties, in display order
pub fn style_controls() -> &'static [StyleControl] {
    CONTROLS
}

/// Control for `property`, if the editor offers one
pub fn style_control(property: &str) -> Option<&'static StyleControl> {
    CONTROLS.iter().find(|c| c.name == property)
}
