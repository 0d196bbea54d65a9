//! # Markup Extractor
//!
//! Finds the editable elements in generated markup and marks each with an id.
//!
//! An element is editable when it is an image or has a direct text child
//! that is not just whitespace. Non-editable elements are walked but not
//! recorded, so an editable element nested inside another is extracted on
//! its own.

use crate::serializer::write_style;
use crate::{EditableElement, EditorConfig, ElementId, ElementKind, ElementStore};
use liveedit_markup::tree::is_raw_text_element;
use liveedit_markup::{parse, serialize, MarkupTree, NodeId, StyleMap};
use tracing::debug;

/// Output of [`extract`]
#[derive(Debug, Clone)]
pub struct Extraction {
    pub store: ElementStore,

    /// The input markup with marker attributes and normalized styles written
    /// onto every editable element
    pub annotated: String,
}

/// Extract editable elements from markup.
///
/// Marker attributes already present in the input (for example when
/// re-extracting previously annotated markup) are stripped first, so every
/// id in the store appears on exactly one node. The normalized style is
/// written back onto each element as well, which makes serializing an
/// untouched store reproduce `annotated` exactly.
pub fn extract(markup: &str, config: &EditorConfig) -> Extraction {
    let mut tree = parse(markup);
    let nodes: Vec<NodeId> = tree.descendants(tree.root()).collect();

    let mut stale_markers = 0;
    for &node in &nodes {
        if let Some(el) = tree.element_mut(node) {
            if el.remove_attribute(&config.marker_attribute) {
                stale_markers += 1;
            }
        }
    }

    let mut store = ElementStore::new();
    for node in nodes {
        let Some(kind) = editable_kind(&tree, node) else {
            continue;
        };

        let id = ElementId::sequential(&config.id_prefix, store.len());
        let element = read_element(&tree, node, id, kind, config);

        if let Some(el) = tree.element_mut(node) {
            el.set_attribute(&config.marker_attribute, element.id.as_str());
            write_style(el, &element.style);
        }
        store.insert(element);
    }

    debug!(
        elements = store.len(),
        nodes = tree.len(),
        stale_markers,
        "Extracted editable elements"
    );

    Extraction {
        store,
        annotated: serialize(&tree),
    }
}

fn editable_kind(tree: &MarkupTree, node: NodeId) -> Option<ElementKind> {
    let el = tree.element(node)?;
    if el.is("img") {
        return Some(ElementKind::Image);
    }
    // Script and style bodies are not rendered content
    if is_raw_text_element(&el.tag) {
        return None;
    }

    let has_text = tree
        .text_children(node)
        .into_iter()
        .any(|child| tree.text(child).is_some_and(|t| !t.trim().is_empty()));
    has_text.then_some(ElementKind::Text)
}

fn read_element(
    tree: &MarkupTree,
    node: NodeId,
    id: ElementId,
    kind: ElementKind,
    config: &EditorConfig,
) -> EditableElement {
    let el = tree.element(node);
    let attribute = |name: &str| {
        el.and_then(|el| el.attribute(name))
            .map(|value| value.into_owned())
            .unwrap_or_default()
    };

    let mut style = StyleMap::parse(&attribute("style"));
    if config.inject_absolute_position && !style.contains("position") {
        style.insert("position", "absolute");
    }
    normalize_unitless(&mut style, "top");
    normalize_unitless(&mut style, "left");

    let text = match kind {
        ElementKind::Image => attribute("src"),
        ElementKind::Text => tree
            .text_children(node)
            .into_iter()
            .filter_map(|child| tree.text(child))
            .collect(),
    };

    EditableElement::new(id, kind, text, style, config.default_offset)
}

/// `top: 12` -> `top: 12px`; values with any unit are left alone
fn normalize_unitless(style: &mut StyleMap, property: &str) {
    let Some(value) = style.get(property) else {
        return;
    };
    let digits = value.strip_prefix('-').unwrap_or(value);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        let normalized = format!("{}px", value);
        style.insert(property, normalized);
    }
}
