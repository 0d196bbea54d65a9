//! # Liveedit Markup
//!
//! Forgiving parser and lossless serializer for AI-generated markup.
//!
//! ```text
//! markup text ──lexer (logos)──▶ parser ──▶ MarkupTree (arena) ──▶ serializer ──▶ markup text
//! ```
//!
//! This is not a general HTML parser. It keeps exactly what an editor needs
//! to rewrite a few attributes and text nodes without disturbing anything
//! else: tags, attributes with their quoting, text, comments and
//! declarations. There is no implied-end-tag or foster-parenting logic.

pub mod entities;
pub mod lexer;
pub mod parser;
pub mod serializer;
pub mod style;
pub mod tree;

pub use parser::{parse, Parser};
pub use serializer::serialize;
pub use style::{parse_leading_int, raw_declarations, StyleMap};
pub use tree::{Attribute, ElementData, MarkupTree, Node, NodeData, NodeId, QuoteStyle};
