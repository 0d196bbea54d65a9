//! # Element Mutations
//!
//! The operations a user can perform on an extracted element.
//!
//! ## Mutation Semantics
//!
//! ### SetText
//! - Atomic replacement of the element text (image source for images)
//!
//! ### SetStyle
//! - Upsert of one property, last write wins
//! - `top`/`left` also move the element; values without a leading integer
//!   are ignored so position and style never disagree
//!
//! ### Nudge / DragBy
//! - Relative moves; `top`/`left` are re-derived as `<n>px`
//! - Five `DragBy { dx: 3 }` land exactly where one `DragBy { dx: 15 }` does
//!
//! A mutation naming an id that is not in the store is a no-op.

use crate::{Direction, ElementId, ElementStore};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mutation {
    /// Replace the element text
    SetText { id: ElementId, text: String },

    /// Set an inline style property
    SetStyle {
        id: ElementId,
        property: String,
        value: String,
    },

    /// Move one step in a direction; `None` uses the configured step
    Nudge {
        id: ElementId,
        direction: Direction,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        amount: Option<i64>,
    },

    /// Move by a raw pixel delta
    DragBy { id: ElementId, dx: i64, dy: i64 },
}

impl Mutation {
    pub fn id(&self) -> &ElementId {
        match self {
            Mutation::SetText { id, .. }
            | Mutation::SetStyle { id, .. }
            | Mutation::Nudge { id, .. }
            | Mutation::DragBy { id, .. } => id,
        }
    }

    /// Apply to the store. Returns whether anything changed.
    pub fn apply(&self, store: &mut ElementStore, nudge_step: i64) -> bool {
        let Some(element) = store.get_mut(self.id()) else {
            return false;
        };

        match self {
            Mutation::SetText { text, .. } => {
                element.set_text(text.as_str());
                true
            }
            Mutation::SetStyle { property, value, .. } => element.set_style(property, value),
            Mutation::Nudge {
                direction, amount, ..
            } => {
                let (dx, dy) = direction.delta(amount.unwrap_or(nudge_step));
                element.move_by(dx, dy);
                true
            }
            Mutation::DragBy { dx, dy, .. } => {
                element.move_by(*dx, *dy);
                true
            }
        }
    }
}

/// Result of applying a mutation through a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationResult {
    /// The store changed
    pub applied: bool,

    /// Session version after the mutation
    pub version: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EditableElement, ElementKind, Position};
    use liveedit_markup::StyleMap;

    fn store() -> ElementStore {
        let mut store = ElementStore::new();
        store.insert(EditableElement::new(
            ElementId::new("element-0"),
            ElementKind::Text,
            "Hi",
            StyleMap::parse("top: 20px; left: 20px; position: absolute"),
            0,
        ));
        store
    }

    fn position(store: &ElementStore) -> Position {
        store.get(&"element-0".into()).unwrap().position
    }

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::Nudge {
            id: "element-3".into(),
            direction: Direction::Left,
            amount: None,
        };

        let json = serde_json::to_string(&mutation).unwrap();
        assert_eq!(json, r#"{"type":"nudge","id":"element-3","direction":"left"}"#);

        let deserialized: Mutation = serde_json::from_str(&json).unwrap();
        assert_eq!(mutation, deserialized);
    }

    #[test]
    fn test_nudge_directions() {
        let cases = [
            (Direction::Left, Position { top: 20, left: 10 }),
            (Direction::Right, Position { top: 20, left: 30 }),
            (Direction::Up, Position { top: 10, left: 20 }),
            (Direction::Down, Position { top: 30, left: 20 }),
        ];

        for (direction, expected) in cases {
            let mut store = store();
            let nudge = Mutation::Nudge {
                id: "element-0".into(),
                direction,
                amount: Some(10),
            };
            assert!(nudge.apply(&mut store, 10));
            assert_eq!(position(&store), expected, "{:?}", direction);
        }
    }

    #[test]
    fn test_nudge_uses_configured_step() {
        let mut store = store();
        let nudge = Mutation::Nudge {
            id: "element-0".into(),
            direction: Direction::Down,
            amount: None,
        };
        nudge.apply(&mut store, 4);
        assert_eq!(position(&store).top, 24);
    }

    #[test]
    fn test_absent_id_is_noop() {
        let mut store = store();
        let before = store.clone();
        let mutation = Mutation::SetText {
            id: "element-42".into(),
            text: "nope".to_string(),
        };
        assert!(!mutation.apply(&mut store, 10));
        assert_eq!(store, before);
    }

    #[test]
    fn test_set_style_invalid_top_is_not_applied() {
        let mut store = store();
        let mutation = Mutation::SetStyle {
            id: "element-0".into(),
            property: "top".to_string(),
            value: "calc(1px)".to_string(),
        };
        assert!(!mutation.apply(&mut store, 10));
        assert_eq!(position(&store).top, 20);
    }
}
