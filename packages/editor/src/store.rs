//! # Element Store
//!
//! Single source of truth for editable state during a session. Elements are
//! kept in extraction (document) order; lookups by id go through an index.

use crate::{EditableElement, ElementId};
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementStore {
    elements: Vec<EditableElement>,
    index: HashMap<ElementId, usize>,
}

/// What [`ElementStore::insert`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// Another element already had this id; the new one replaced it
    Replaced(EditableElement),
}

impl ElementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an element. An id collision is last-write-wins: the earlier
    /// element is replaced in its slot and handed back.
    pub fn insert(&mut self, element: EditableElement) -> InsertOutcome {
        match self.index.get(&element.id) {
            Some(&slot) => {
                warn!(id = %element.id, "Element id collision, keeping the last element");
                let previous = std::mem::replace(&mut self.elements[slot], element);
                InsertOutcome::Replaced(previous)
            }
            None => {
                self.index.insert(element.id.clone(), self.elements.len());
                self.elements.push(element);
                InsertOutcome::Inserted
            }
        }
    }

    pub fn get(&self, id: &ElementId) -> Option<&EditableElement> {
        self.index.get(id).map(|&slot| &self.elements[slot])
    }

    pub fn get_mut(&mut self, id: &ElementId) -> Option<&mut EditableElement> {
        let slot = *self.index.get(id)?;
        self.elements.get_mut(slot)
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EditableElement> {
        self.elements.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ElementId> {
        self.elements.iter().map(|el| &el.id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<'a> IntoIterator for &'a ElementStore {
    type Item = &'a EditableElement;
    type IntoIter = std::slice::Iter<'a, EditableElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

/// Serializes as a JSON object keyed by id, in document order
impl Serialize for ElementStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.elements.iter().map(|el| (&el.id, el)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ElementKind;
    use liveedit_markup::StyleMap;

    fn element(id: &str, text: &str) -> EditableElement {
        EditableElement::new(ElementId::new(id), ElementKind::Text, text, StyleMap::new(), 0)
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut store = ElementStore::new();
        assert_eq!(store.insert(element("element-0", "a")), InsertOutcome::Inserted);
        assert_eq!(store.insert(element("element-1", "b")), InsertOutcome::Inserted);

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&"element-1".into()).unwrap().text, "b");
        assert!(store.get(&"element-9".into()).is_none());
    }

    #[test]
    fn test_collision_is_last_write_wins() {
        let mut store = ElementStore::new();
        store.insert(element("element-0", "first"));
        store.insert(element("element-1", "other"));

        let outcome = store.insert(element("element-0", "second"));
        assert_eq!(outcome, InsertOutcome::Replaced(element("element-0", "first")));

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&"element-0".into()).unwrap().text, "second");
        let order: Vec<_> = store.ids().map(|id| id.as_str()).collect();
        assert_eq!(order, vec!["element-0", "element-1"]);
    }

    #[test]
    fn test_serializes_in_document_order() {
        let mut store = ElementStore::new();
        for i in [0, 1, 2, 10] {
            store.insert(element(&format!("element-{}", i), "x"));
        }
        let json = serde_json::to_string(&store).unwrap();
        let keys: Vec<_> = ["element-0", "element-1", "element-2", "element-10"]
            .iter()
            .map(|k| json.find(k).unwrap())
            .collect();
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }
}
