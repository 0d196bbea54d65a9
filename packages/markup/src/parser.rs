use crate::lexer::{take_unquoted_value, ContentToken, TagToken};
use crate::tree::{
    is_raw_text_element, is_void_element, Attribute, ElementData, MarkupTree, NodeData, NodeId,
    QuoteStyle,
};
use logos::{Lexer, Logos};

/// Parse markup into a tree.
///
/// Parsing never fails. Malformed input is handled the way a forgiving
/// browser parser would, best-effort:
/// - end tags with no matching open element are dropped
/// - elements still open at end of input are closed without an end tag
/// - an unterminated comment runs to the end of input
pub fn parse(source: &str) -> MarkupTree {
    Parser::new(source).parse()
}

/// Builds a [`MarkupTree`] from logos tokens
pub struct Parser<'src> {
    source: &'src str,
    tree: MarkupTree,
    /// Open elements, innermost last
    open: Vec<NodeId>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            tree: MarkupTree::new(),
            open: Vec::new(),
        }
    }

    pub fn parse(mut self) -> MarkupTree {
        let mut lex = ContentToken::lexer(self.source);

        while let Some(token) = lex.next() {
            match token {
                Ok(ContentToken::Text(text)) => self.push_text(text),
                Ok(ContentToken::LessThan) => self.push_text("<"),
                Ok(ContentToken::Comment(raw)) => {
                    self.push_node(NodeData::Comment(raw.to_string()));
                }
                Ok(ContentToken::Declaration(raw)) | Ok(ContentToken::ProcessingInstruction(raw)) => {
                    self.push_node(NodeData::Declaration(raw.to_string()));
                }
                Ok(ContentToken::EndTag(name)) => self.close_element(name),
                Ok(ContentToken::StartTagOpen(name)) => {
                    let (element, tag_lex) = Self::parse_start_tag(name, lex.morph());
                    lex = tag_lex.morph();
                    self.open_element(element, &mut lex);
                }
                // Every byte matches some content token; this only guards
                // against future token changes
                Err(()) => self.push_text(lex.slice()),
            }
        }

        self.tree
    }

    fn current(&self) -> NodeId {
        self.open.last().copied().unwrap_or(NodeId::ROOT)
    }

    fn push_node(&mut self, data: NodeData) -> NodeId {
        let parent = self.current();
        self.tree.append(parent, data)
    }

    /// Adjacent text runs merge into one text node
    fn push_text(&mut self, text: &str) {
        let parent = self.current();
        if let Some(&last) = self.tree.children(parent).last() {
            if let Some(node) = self.tree.get_mut(last) {
                if let NodeData::Text(existing) = &mut node.data {
                    existing.push_str(text);
                    return;
                }
            }
        }
        self.tree.append(parent, NodeData::Text(text.to_string()));
    }

    fn parse_start_tag(
        name: &'src str,
        mut lex: Lexer<'src, TagToken<'src>>,
    ) -> (ElementData, Lexer<'src, TagToken<'src>>) {
        let mut element = ElementData::new(name);

        while let Some(token) = lex.next() {
            match token {
                Ok(TagToken::Name(attr_name)) => {
                    element.attributes.push(Attribute {
                        name: attr_name.to_string(),
                        value: None,
                        quote: QuoteStyle::Unquoted,
                    });
                }
                Ok(TagToken::Equals) => {
                    // A value belongs to the attribute just read; `=` without
                    // one is ignored
                    let Some(attr) = element.attributes.last_mut() else {
                        continue;
                    };
                    if let Some(value) = take_unquoted_value(&mut lex) {
                        attr.value = Some(value.to_string());
                        attr.quote = QuoteStyle::Unquoted;
                        continue;
                    }
                    match lex.next() {
                        Some(Ok(TagToken::DoubleQuoted(value))) => {
                            attr.value = Some(value.to_string());
                            attr.quote = QuoteStyle::Double;
                        }
                        Some(Ok(TagToken::SingleQuoted(value))) => {
                            attr.value = Some(value.to_string());
                            attr.quote = QuoteStyle::Single;
                        }
                        Some(Ok(TagToken::Close)) | None => break,
                        Some(Ok(TagToken::SelfClose)) => {
                            element.self_closing = true;
                            break;
                        }
                        _ => {}
                    }
                }
                Ok(TagToken::Close) => break,
                Ok(TagToken::SelfClose) => {
                    element.self_closing = true;
                    break;
                }
                // Stray `/` and unbalanced quotes are skipped
                Ok(TagToken::Slash) | Ok(TagToken::DoubleQuoted(_)) | Ok(TagToken::SingleQuoted(_)) | Err(()) => {}
            }
        }

        (element, lex)
    }

    fn open_element(&mut self, element: ElementData, lex: &mut Lexer<'src, ContentToken<'src>>) {
        let is_void = is_void_element(&element.tag);
        let self_closing = element.self_closing;
        let raw_text = is_raw_text_element(&element.tag);
        let tag = element.tag.clone();

        let id = self.push_node(NodeData::Element(element));
        if is_void || self_closing {
            return;
        }

        if raw_text {
            // Everything up to `</script` / `</style` is one text node
            let remainder = lex.remainder();
            let end = find_raw_text_end(remainder, &tag).unwrap_or(remainder.len());
            if end > 0 {
                self.tree.append(id, NodeData::Text(remainder[..end].to_string()));
                lex.bump(end);
            }
        }

        self.open.push(id);
    }

    fn close_element(&mut self, name: &str) {
        let matching = self.open.iter().rposition(|&id| {
            self.tree.element(id).is_some_and(|el| el.is(name))
        });

        // No open element of that name: the end tag is dropped
        let Some(index) = matching else {
            return;
        };

        let id = self.open[index];
        if let Some(el) = self.tree.element_mut(id) {
            el.has_end_tag = true;
        }
        self.open.truncate(index);
    }
}

fn find_raw_text_end(remainder: &str, tag: &str) -> Option<usize> {
    let bytes = remainder.as_bytes();
    let needle_len = tag.len() + 2;
    (0..bytes.len()).find(|&i| {
        bytes[i] == b'<'
            && bytes.get(i + 1) == Some(&b'/')
            && i + needle_len <= bytes.len()
            && bytes[i + 2..i + needle_len].eq_ignore_ascii_case(tag.as_bytes())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(tree: &MarkupTree) -> Vec<String> {
        tree.descendants(NodeId::ROOT)
            .filter_map(|id| tree.element(id).map(|el| el.tag.clone()))
            .collect()
    }

    #[test]
    fn test_nested_elements() {
        let tree = parse(r#"<div class="wrap"><p>Hi</p><span>There</span></div>"#);
        assert_eq!(tags(&tree), vec!["div", "p", "span"]);

        let div = tree.children(NodeId::ROOT)[0];
        let el = tree.element(div).unwrap();
        assert_eq!(el.attribute("class").unwrap(), "wrap");
        assert!(el.has_end_tag);
        assert_eq!(tree.children(div).len(), 2);
    }

    #[test]
    fn test_void_and_self_closing() {
        let tree = parse(r#"<div><img src="a.png"><br/><p>x</p></div>"#);
        let div = tree.children(NodeId::ROOT)[0];
        let children = tree.children(div);
        assert_eq!(children.len(), 3);

        let img = tree.element(children[0]).unwrap();
        assert!(!img.self_closing);
        assert!(tree.children(children[0]).is_empty());

        let br = tree.element(children[1]).unwrap();
        assert!(br.self_closing);
    }

    #[test]
    fn test_attribute_forms() {
        let tree = parse(r#"<input type=text disabled value='a "b"' data-x="1">"#);
        let input = tree.element(tree.children(NodeId::ROOT)[0]).unwrap();

        let quotes: Vec<_> = input.attributes.iter().map(|a| a.quote).collect();
        assert_eq!(
            quotes,
            vec![QuoteStyle::Unquoted, QuoteStyle::Unquoted, QuoteStyle::Single, QuoteStyle::Double]
        );
        assert_eq!(input.attribute("type").unwrap(), "text");
        assert_eq!(input.attribute("disabled").unwrap(), "");
        assert_eq!(input.attribute("value").unwrap(), r#"a "b""#);
    }

    #[test]
    fn test_raw_text_elements_are_not_tokenized() {
        let tree = parse("<style>p > span { color: red }</style><p>Hi</p>");
        let style = tree.children(NodeId::ROOT)[0];
        let text = tree.children(style)[0];
        assert_eq!(tree.text(text).unwrap(), "p > span { color: red }");
        assert_eq!(tags(&tree), vec!["style", "p"]);
    }

    #[test]
    fn test_stray_end_tag_dropped() {
        let tree = parse("<p>a</span>b</p>");
        let p = tree.children(NodeId::ROOT)[0];
        assert_eq!(tree.children(p).len(), 1);
        assert_eq!(tree.text(tree.children(p)[0]).unwrap(), "ab");
    }

    #[test]
    fn test_unclosed_element_at_eof() {
        let tree = parse("<div><p>open");
        let div = tree.children(NodeId::ROOT)[0];
        let p = tree.children(div)[0];
        assert!(!tree.element(div).unwrap().has_end_tag);
        assert!(!tree.element(p).unwrap().has_end_tag);
    }

    #[test]
    fn test_mismatched_end_tag_closes_inner_elements() {
        let tree = parse("<div><b>bold</div><p>after</p>");
        let root_children = tree.children(NodeId::ROOT);
        assert_eq!(root_children.len(), 2);
        let b = tree.children(root_children[0])[0];
        assert!(!tree.element(b).unwrap().has_end_tag);
    }

    #[test]
    fn test_comments_and_doctype() {
        let tree = parse("<!DOCTYPE html><!-- c --><p>x</p>");
        let kids = tree.children(NodeId::ROOT);
        assert!(matches!(tree.get(kids[0]).unwrap().data, NodeData::Declaration(_)));
        assert!(matches!(tree.get(kids[1]).unwrap().data, NodeData::Comment(_)));
    }
}
