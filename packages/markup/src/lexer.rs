//! Lexer for generated markup using logos
//!
//! Markup needs two token sets: one for content between tags and one for
//! the inside of a start tag. The parser switches between them with
//! [`logos::Lexer::morph`].

use logos::{Lexer, Logos};

/// Tokens found between tags
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
pub enum ContentToken<'src> {
    /// `<!-- ... -->`, consumed up to the terminator (or end of input)
    #[token("<!--", lex_comment)]
    Comment(&'src str),

    /// `<!DOCTYPE html>` and other `<!...>` declarations
    #[regex(r"<![a-zA-Z][^>]*>", |lex| lex.slice())]
    Declaration(&'src str),

    /// `<?xml ... ?>` processing instructions
    #[regex(r"<\?[^>]*>", |lex| lex.slice())]
    ProcessingInstruction(&'src str),

    /// `</name>` - carries the tag name only
    #[regex(r"</[a-zA-Z][a-zA-Z0-9:_.-]*[ \t\r\n\f]*>", lex_end_tag)]
    EndTag(&'src str),

    /// `<name` - attributes follow in [`TagToken`] mode
    #[regex(r"<[a-zA-Z][a-zA-Z0-9:_.-]*", |lex| &lex.slice()[1..])]
    StartTagOpen(&'src str),

    /// A `<` that does not open a tag is plain text
    #[token("<")]
    LessThan,

    #[regex(r"[^<]+", |lex| lex.slice())]
    Text(&'src str),
}

/// Tokens inside a start tag
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TagToken<'src> {
    #[regex(r#"[^ \t\r\n\f"'>/=]+"#, |lex| lex.slice())]
    Name(&'src str),

    #[token("=")]
    Equals,

    #[regex(r#""[^"]*""#, |lex| { let s = lex.slice(); &s[1..s.len() - 1] })]
    DoubleQuoted(&'src str),

    #[regex(r"'[^']*'", |lex| { let s = lex.slice(); &s[1..s.len() - 1] })]
    SingleQuoted(&'src str),

    #[token(">")]
    Close,

    #[token("/>")]
    SelfClose,

    #[token("/")]
    Slash,
}

fn lex_comment<'src>(lex: &mut Lexer<'src, ContentToken<'src>>) -> &'src str {
    let remainder = lex.remainder();
    match remainder.find("-->") {
        Some(end) => lex.bump(end + 3),
        None => lex.bump(remainder.len()),
    }
    lex.slice()
}

fn lex_end_tag<'src>(lex: &mut Lexer<'src, ContentToken<'src>>) -> &'src str {
    let inner = &lex.slice()[2..];
    let end = inner
        .find(|c: char| c.is_ascii_whitespace() || c == '>')
        .unwrap_or(inner.len());
    &inner[..end]
}

/// Consume an unquoted attribute value directly from the source.
///
/// Unquoted values may contain `/` and `=`, which the tag token set treats
/// as punctuation, so they are scanned by hand up to whitespace or `>`.
pub fn take_unquoted_value<'src>(lex: &mut Lexer<'src, TagToken<'src>>) -> Option<&'src str> {
    let remainder = lex.remainder();
    let leading = remainder.len() - remainder.trim_start_matches([' ', '\t', '\r', '\n', '\x0c']).len();
    let rest = &remainder[leading..];
    if rest.is_empty() || rest.starts_with(['"', '\'', '>']) {
        return None;
    }

    let end = rest
        .find(|c: char| c.is_ascii_whitespace() || c == '>')
        .unwrap_or(rest.len());
    lex.bump(leading + end);
    Some(&rest[..end])
}
