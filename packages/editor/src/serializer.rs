//! # Store Serializer
//!
//! Writes the element store back onto the annotated markup.
//!
//! Each pass re-parses the canonical annotated string into a fresh tree, so
//! repeated serialization can never drift. Only the text, `src` and `style`
//! of marked elements are rewritten; every other node is emitted as parsed.

use crate::{EditableElement, EditorConfig, ElementStore};
use liveedit_markup::{parse, serialize, ElementData, MarkupTree, NodeId, StyleMap};
use std::collections::HashMap;
use tracing::{debug, trace, warn};

/// Produce markup reflecting the current state of every element in `store`.
///
/// Elements whose marker is not found in `annotated` are skipped; that is
/// expected after the markup has been replaced wholesale.
pub fn serialize_store(annotated: &str, store: &ElementStore, config: &EditorConfig) -> String {
    let mut tree = parse(annotated);
    let index = marker_index(&tree, &config.marker_attribute);

    let mut skipped = 0;
    for element in store {
        let Some(&node) = index.get(element.id.as_str()) else {
            trace!(id = %element.id, "No node carries this id, skipping");
            skipped += 1;
            continue;
        };
        apply_element(&mut tree, node, element, config);
    }

    debug!(elements = store.len(), skipped, "Serialized element store");
    serialize(&tree)
}

fn marker_index(tree: &MarkupTree, marker: &str) -> HashMap<String, NodeId> {
    let mut index = HashMap::new();
    for node in tree.descendants(tree.root()) {
        let Some(id) = tree.element(node).and_then(|el| el.attribute(marker)) else {
            continue;
        };
        if index.contains_key(id.as_ref()) {
            warn!(id = %id, "Duplicate marker in annotated markup, keeping the first node");
            continue;
        }
        index.insert(id.into_owned(), node);
    }
    index
}

fn apply_element(tree: &mut MarkupTree, node: NodeId, element: &EditableElement, config: &EditorConfig) {
    let is_image = tree.element(node).is_some_and(|el| el.is("img"));

    if is_image {
        // Placeholder text must never end up in `src`
        if config.is_image_source(&element.text) {
            if let Some(el) = tree.element_mut(node) {
                if el.attribute("src").as_deref() != Some(element.text.as_str()) {
                    el.set_attribute("src", &element.text);
                }
            }
        }
    } else {
        let text_nodes = tree.text_children(node);
        match text_nodes.as_slice() {
            [only] => {
                if tree.text(*only).as_deref() != Some(element.text.as_str()) {
                    tree.set_text(*only, &element.text);
                }
            }
            [] if !element.text.is_empty() => {
                tree.append_text(node, &element.text);
            }
            // Several text runs interleaved with markup are left alone
            _ => {}
        }
    }

    if let Some(el) = tree.element_mut(node) {
        write_style(el, &element.style);
    }
}

/// Rebuild the `style` attribute from a style map.
///
/// An element that has no `style` attribute and an empty map is left
/// without one.
pub(crate) fn write_style(el: &mut ElementData, style: &StyleMap) {
    if style.is_empty() && el.attribute("style").is_none() {
        return;
    }
    el.set_attribute("style", &style.to_declarations());
}
