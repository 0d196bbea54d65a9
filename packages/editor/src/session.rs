//! # Edit Session
//!
//! Owns everything one editing session needs: the annotated markup produced
//! by extraction, the element store, the selection and the latest
//! serialized markup. There is no ambient state; callers hold the session
//! and pass it to whatever drives it.

use crate::css_export::export_css;
use crate::preview::{render_preview, PreviewItem};
use crate::{
    extract, serialize_store, Direction, EditableElement, EditorConfig, ElementId, ElementStore,
    Mutation, MutationResult,
};
use tracing::debug;

/// Single-user edit session over one piece of generated markup
#[derive(Debug, Clone)]
pub struct EditSession {
    config: EditorConfig,

    /// Canonical markup every serialization starts from
    annotated: String,

    store: ElementStore,

    selected: Option<ElementId>,

    /// Latest serialized markup
    markup: String,

    /// Increments on each applied mutation and on each load
    version: u64,

    /// Mutations applied since the last serialization
    pending: usize,

    /// Increments on each load; ids from an earlier load are stale
    loads: u64,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditSession {
    /// Create an empty session
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            annotated: String::new(),
            store: ElementStore::new(),
            selected: None,
            markup: String::new(),
            version: 0,
            pending: 0,
            loads: 0,
        }
    }

    /// Create a session and load `markup` into it
    pub fn from_markup(markup: &str, config: EditorConfig) -> Self {
        let mut session = Self::new(config);
        session.load(markup);
        session
    }

    /// Replace the session contents with freshly extracted markup.
    ///
    /// Ids are not stable across extractions, so the selection is cleared.
    pub fn load(&mut self, markup: &str) {
        let extraction = extract(markup, &self.config);
        self.markup = extraction.annotated.clone();
        self.annotated = extraction.annotated;
        self.store = extraction.store;
        self.selected = None;
        self.pending = 0;
        self.version += 1;
        self.loads += 1;

        debug!(elements = self.store.len(), version = self.version, "Loaded markup");
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn store(&self) -> &ElementStore {
        &self.store
    }

    pub fn element(&self, id: &ElementId) -> Option<&EditableElement> {
        self.store.get(id)
    }

    /// Markup as produced by extraction, before any edits
    pub fn annotated(&self) -> &str {
        &self.annotated
    }

    /// Current markup. Lags behind the store only while deferred
    /// mutations are pending (see [`EditSession::apply_deferred`]).
    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Number of loads so far
    pub fn loads(&self) -> u64 {
        self.loads
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Apply a mutation and re-serialize immediately
    pub fn apply(&mut self, mutation: Mutation) -> MutationResult {
        let result = self.apply_deferred(mutation);
        if result.applied {
            self.commit();
        }
        result
    }

    /// Apply a mutation without re-serializing.
    ///
    /// Used for high-frequency input such as pointer moves; [`commit`]
    /// produces exactly the markup eager application would have.
    ///
    /// [`commit`]: EditSession::commit
    pub fn apply_deferred(&mut self, mutation: Mutation) -> MutationResult {
        let applied = mutation.apply(&mut self.store, self.config.nudge_step);
        if applied {
            self.version += 1;
            self.pending += 1;
        }
        MutationResult {
            applied,
            version: self.version,
        }
    }

    /// Serialize pending mutations. Returns whether anything was written.
    pub fn commit(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        self.markup = serialize_store(&self.annotated, &self.store, &self.config);
        debug!(mutations = self.pending, version = self.version, "Committed edits");
        self.pending = 0;
        true
    }

    pub fn has_pending(&self) -> bool {
        self.pending > 0
    }

    pub fn set_text(&mut self, id: impl Into<ElementId>, text: impl Into<String>) -> MutationResult {
        self.apply(Mutation::SetText {
            id: id.into(),
            text: text.into(),
        })
    }

    pub fn set_style(
        &mut self,
        id: impl Into<ElementId>,
        property: impl Into<String>,
        value: impl Into<String>,
    ) -> MutationResult {
        self.apply(Mutation::SetStyle {
            id: id.into(),
            property: property.into(),
            value: value.into(),
        })
    }

    /// Nudge by `amount`, or by the configured step when `None`
    pub fn nudge(&mut self, id: impl Into<ElementId>, direction: Direction, amount: Option<i64>) -> MutationResult {
        self.apply(Mutation::Nudge {
            id: id.into(),
            direction,
            amount,
        })
    }

    pub fn drag_by(&mut self, id: impl Into<ElementId>, dx: i64, dy: i64) -> MutationResult {
        self.apply(Mutation::DragBy { id: id.into(), dx, dy })
    }

    /// Select an element; unknown ids are ignored
    pub fn select(&mut self, id: impl Into<ElementId>) -> bool {
        let id = id.into();
        if !self.store.contains(&id) {
            return false;
        }
        self.selected = Some(id);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&ElementId> {
        self.selected.as_ref()
    }

    pub fn selected_element(&self) -> Option<&EditableElement> {
        self.selected.as_ref().and_then(|id| self.store.get(id))
    }

    /// Edit-surface rendering of every element
    pub fn preview(&self) -> Vec<PreviewItem> {
        render_preview(&self.store, self.selected.as_ref())
    }

    /// Inline styles of the current markup as a stylesheet
    pub fn export_css(&self) -> String {
        export_css(&self.markup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"<div><p style="top:5px;left:5px;">Hi</p><img src="https://placehold.co/1"></div>"#;

    #[test]
    fn test_session_creation() {
        let session = EditSession::from_markup(SOURCE, EditorConfig::default());
        assert_eq!(session.store().len(), 2);
        assert_eq!(session.markup(), session.annotated());
        assert_eq!(session.version(), 1);
        assert!(session.selected().is_none());
    }

    #[test]
    fn test_every_mutation_reserializes() {
        let mut session = EditSession::from_markup(SOURCE, EditorConfig::default());

        let result = session.set_text("element-0", "Bye");
        assert!(result.applied);
        assert_eq!(result.version, 2);
        assert!(session.markup().contains(">Bye</p>"));

        session.nudge("element-0", Direction::Down, None);
        assert!(session.markup().contains("top: 15px;"));
        assert!(!session.has_pending());
    }

    #[test]
    fn test_absent_id_leaves_session_untouched() {
        let mut session = EditSession::from_markup(SOURCE, EditorConfig::default());
        let result = session.set_style("element-99", "color", "red");
        assert!(!result.applied);
        assert_eq!(result.version, 1);
        assert_eq!(session.markup(), session.annotated());
    }

    #[test]
    fn test_deferred_mutations_commit_once() {
        let mut session = EditSession::from_markup(SOURCE, EditorConfig::default());
        let mut eager = session.clone();

        for _ in 0..5 {
            session.apply_deferred(Mutation::DragBy {
                id: "element-0".into(),
                dx: 3,
                dy: 0,
            });
            eager.drag_by("element-0", 3, 0);
        }
        assert!(session.has_pending());
        assert_eq!(session.markup(), session.annotated());

        assert!(session.commit());
        assert!(!session.commit());
        assert_eq!(session.markup(), eager.markup());
    }

    #[test]
    fn test_reload_replaces_store_and_clears_selection() {
        let mut session = EditSession::from_markup(SOURCE, EditorConfig::default());
        assert!(session.select("element-1"));
        assert!(!session.select("element-9"));
        assert_eq!(session.selected_element().unwrap().text, "https://placehold.co/1");

        session.load("<h1>New</h1>");
        assert_eq!(session.store().len(), 1);
        assert!(session.selected().is_none());
        assert_eq!(session.element(&"element-0".into()).unwrap().text, "New");
    }
}
