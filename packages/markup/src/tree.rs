//! Markup tree (arena-based)
//!
//! Nodes live in a flat `Vec` and refer to each other by [`NodeId`].
//! Attribute and text edits are plain field writes on arena entries.

use crate::entities;
use std::borrow::Cow;

/// Node identifier (index into the arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The fragment root every parsed tree starts with
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Elements that never have children or an end tag
pub fn is_void_element(tag: &str) -> bool {
    const VOID: &[&str] = &[
        "img", "input", "br", "hr", "meta", "link", "area", "base", "col", "embed", "param",
        "source", "track", "wbr",
    ];
    VOID.iter().any(|v| v.eq_ignore_ascii_case(tag))
}

/// Elements whose content is raw text rather than markup
pub fn is_raw_text_element(tag: &str) -> bool {
    tag.eq_ignore_ascii_case("script") || tag.eq_ignore_ascii_case("style")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    Double,
    Single,
    Unquoted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    /// Raw value as written (character references not decoded); `None` for
    /// valueless attributes like `hidden`
    pub value: Option<String>,
    pub quote: QuoteStyle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// Tag name as authored
    pub tag: String,
    pub attributes: Vec<Attribute>,
    /// Written as `<tag ... />`
    pub self_closing: bool,
    /// An explicit `</tag>` closed this element in the source
    pub has_end_tag: bool,
}

impl ElementData {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            self_closing: false,
            has_end_tag: false,
        }
    }

    pub fn is(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    /// Decoded attribute value; valueless attributes read as `""`
    pub fn attribute(&self, name: &str) -> Option<Cow<'_, str>> {
        self.attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| match &a.value {
                Some(raw) => entities::decode(raw),
                None => Cow::Borrowed(""),
            })
    }

    /// Set an attribute from decoded text, keeping its slot if present
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        let escaped = entities::escape_attribute(value);
        match self
            .attributes
            .iter_mut()
            .find(|a| a.name.eq_ignore_ascii_case(name))
        {
            Some(attr) => {
                attr.value = Some(escaped);
                attr.quote = QuoteStyle::Double;
            }
            None => self.attributes.push(Attribute {
                name: name.to_string(),
                value: Some(escaped),
                quote: QuoteStyle::Double,
            }),
        }
    }

    pub fn remove_attribute(&mut self, name: &str) -> bool {
        let before = self.attributes.len();
        self.attributes.retain(|a| !a.name.eq_ignore_ascii_case(name));
        self.attributes.len() != before
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// Fragment root
    Root,
    Element(ElementData),
    /// Raw text as written
    Text(String),
    /// Full `<!-- ... -->` source
    Comment(String),
    /// Doctype, other `<!...>` declarations and processing instructions
    Declaration(String),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub data: NodeData,
}

/// Arena-based markup tree
#[derive(Debug, Clone)]
pub struct MarkupTree {
    nodes: Vec<Node>,
}

impl Default for MarkupTree {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupTree {
    /// Create a tree holding only the fragment root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                data: NodeData::Root,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Append a new node as the last child of `parent`
    pub fn append(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            data,
        });
        if let Some(p) = self.nodes.get_mut(parent.index()) {
            p.children.push(id);
        }
        id
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match &self.get(id)?.data {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match &mut self.get_mut(id)?.data {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Direct text children of a node
    pub fn text_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&child| matches!(self.get(child).map(|n| &n.data), Some(NodeData::Text(_))))
            .collect()
    }

    /// Decoded content of a text node
    pub fn text(&self, id: NodeId) -> Option<Cow<'_, str>> {
        match &self.get(id)?.data {
            NodeData::Text(raw) => Some(entities::decode(raw)),
            _ => None,
        }
    }

    /// Replace a text node's content with decoded `text`
    pub fn set_text(&mut self, id: NodeId, text: &str) -> bool {
        match self.get_mut(id).map(|n| &mut n.data) {
            Some(NodeData::Text(raw)) => {
                *raw = entities::escape_text(text);
                true
            }
            _ => false,
        }
    }

    /// Append a text child holding decoded `text`
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        if let Some(el) = self.element_mut(parent) {
            if el.self_closing {
                el.self_closing = false;
                el.has_end_tag = true;
            }
        }
        self.append(parent, NodeData::Text(entities::escape_text(text)))
    }

    /// Depth-first, pre-order walk of the subtree under `from` (excluded)
    pub fn descendants(&self, from: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(from).to_vec();
        stack.reverse();
        Descendants { tree: self, stack }
    }

    /// All elements bearing `name == value`, in document order
    pub fn find_all_by_attribute(&self, name: &str, value: &str) -> Vec<NodeId> {
        self.descendants(NodeId::ROOT)
            .filter(|&id| {
                self.element(id)
                    .and_then(|el| el.attribute(name))
                    .is_some_and(|v| v == value)
            })
            .collect()
    }
}

/// Pre-order iterator returned by [`MarkupTree::descendants`]
pub struct Descendants<'a> {
    tree: &'a MarkupTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
