use crate::tree::{ElementData, MarkupTree, NodeData, NodeId, QuoteStyle};

/// Serialize a tree back to markup text.
///
/// Text, comments, declarations and attribute values are written exactly as
/// they were parsed (or last set), so a parse/serialize round trip only
/// normalizes whitespace between attributes.
pub fn serialize(tree: &MarkupTree) -> String {
    let mut output = String::new();
    for &child in tree.children(tree.root()) {
        write_node(tree, child, &mut output);
    }
    output
}

fn write_node(tree: &MarkupTree, id: NodeId, output: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };

    match &node.data {
        NodeData::Root => {
            for &child in &node.children {
                write_node(tree, child, output);
            }
        }
        NodeData::Text(raw) | NodeData::Comment(raw) | NodeData::Declaration(raw) => {
            output.push_str(raw);
        }
        NodeData::Element(element) => {
            write_start_tag(element, output);
            if element.self_closing || (node.children.is_empty() && !element.has_end_tag) {
                return;
            }
            for &child in &node.children {
                write_node(tree, child, output);
            }
            if element.has_end_tag {
                output.push_str("</");
                output.push_str(&element.tag);
                output.push('>');
            }
        }
    }
}

fn write_start_tag(element: &ElementData, output: &mut String) {
    output.push('<');
    output.push_str(&element.tag);

    for attr in &element.attributes {
        output.push(' ');
        output.push_str(&attr.name);
        if let Some(value) = &attr.value {
            output.push('=');
            match attr.quote {
                QuoteStyle::Double => {
                    output.push('"');
                    output.push_str(value);
                    output.push('"');
                }
                QuoteStyle::Single => {
                    output.push('\'');
                    output.push_str(value);
                    output.push('\'');
                }
                QuoteStyle::Unquoted => output.push_str(value),
            }
        }
    }

    if element.self_closing {
        output.push_str(" />");
    } else {
        output.push('>');
    }
}
