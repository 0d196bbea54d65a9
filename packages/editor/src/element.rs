//! Editable element model

use liveedit_markup::{parse_leading_int, StyleMap};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier written onto a node as its marker attribute (`element-<n>`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub(crate) fn sequential(prefix: &str, n: usize) -> Self {
        Self(format!("{}-{}", prefix, n))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    /// `text` holds the image source
    Image,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub top: i64,
    pub left: i64,
}

/// Nudge direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// `(dx, dy)` for a move of `amount` pixels
    pub fn delta(self, amount: i64) -> (i64, i64) {
        match self {
            Direction::Left => (amount.saturating_neg(), 0),
            Direction::Right => (amount, 0),
            Direction::Up => (0, amount.saturating_neg()),
            Direction::Down => (0, amount),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" | "arrowleft" => Ok(Direction::Left),
            "right" | "arrowright" => Ok(Direction::Right),
            "up" | "arrowup" => Ok(Direction::Up),
            "down" | "arrowdown" => Ok(Direction::Down),
            other => Err(format!("unknown direction: {}", other)),
        }
    }
}

/// One element exposed for editing.
///
/// `position` and the `top`/`left` style entries are two views of one fact.
/// All writes go through the methods below, which keep
/// `position.top == parseInt(style.top)` (and likewise for `left`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditableElement {
    pub id: ElementId,
    pub text: String,
    pub style: StyleMap,
    pub position: Position,
    pub kind: ElementKind,
}

impl EditableElement {
    pub fn new(id: ElementId, kind: ElementKind, text: impl Into<String>, style: StyleMap, default_offset: i64) -> Self {
        let read = |property: &str| {
            style
                .get(property)
                .and_then(parse_leading_int)
                .unwrap_or(default_offset)
        };
        let position = Position {
            top: read("top"),
            left: read("left"),
        };

        Self {
            id,
            text: text.into(),
            style,
            position,
            kind,
        }
    }

    pub fn is_image(&self) -> bool {
        self.kind == ElementKind::Image
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Upsert a style property.
    ///
    /// `top` and `left` also move the element. A value for them with no
    /// leading integer is ignored entirely and `false` is returned.
    pub fn set_style(&mut self, property: &str, value: &str) -> bool {
        match property {
            "top" | "left" => {
                let Some(n) = parse_leading_int(value) else {
                    return false;
                };
                if property == "top" {
                    self.position.top = n;
                } else {
                    self.position.left = n;
                }
                self.style.insert(property, value);
            }
            _ => {
                self.style.insert(property, value);
            }
        }
        true
    }

    /// Move to an absolute position, re-deriving `top`/`left` as `<n>px`
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
        self.style.insert("top", format!("{}px", position.top));
        self.style.insert("left", format!("{}px", position.left));
    }

    /// Move by a raw pixel delta, stopping at the `i64` bounds
    pub fn move_by(&mut self, dx: i64, dy: i64) {
        self.set_position(Position {
            top: self.position.top.saturating_add(dy),
            left: self.position.left.saturating_add(dx),
        });
    }

    /// The invariant every mutation must preserve; absent entries read as
    /// `default_offset`
    pub fn position_matches_style(&self, default_offset: i64) -> bool {
        let read = |property: &str| match self.style.get(property) {
            Some(value) => parse_leading_int(value),
            None => Some(default_offset),
        };
        read("top") == Some(self.position.top) && read("left") == Some(self.position.left)
    }
}
