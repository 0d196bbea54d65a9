//! # Liveedit Editor
//!
//! Visual editing of generated markup: pick out the editable elements, let
//! the user change their text, styles and position, and write the changes
//! back into the markup without disturbing anything else.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ extractor: markup → ElementStore            │
//! │  - marks each editable node (data-edit-id)  │
//! │  - produces the annotated markup            │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ session: ElementStore + mutations           │
//! │  - setText / setStyle / nudge / dragBy      │
//! │  - drag controller batches pointer moves    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ serializer: annotated markup + store → text │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The store is the source of truth**: markup is always re-derived
//!    from the annotated markup and the store
//! 2. **Position and style agree**: `position` always matches the numeric
//!    part of `style.top`/`style.left`
//! 3. **Unmarked content is untouchable**: serialization only rewrites
//!    marked elements
//! 4. **Editing never fails**: unknown ids are no-ops, malformed input is
//!    skipped
//!
//! ## Usage
//!
//! ```rust
//! use liveedit_editor::{Direction, EditSession, EditorConfig};
//!
//! let mut session = EditSession::from_markup(
//!     r#"<div><p style="top:5px;left:5px;">Hi</p></div>"#,
//!     EditorConfig::default(),
//! );
//!
//! session.set_text("element-0", "Bye");
//! session.nudge("element-0", Direction::Right, None);
//!
//! assert!(session.markup().contains(">Bye</p>"));
//! assert!(session.markup().contains("left: 15px;"));
//! ```

mod config;
mod controls;
mod css_export;
mod drag;
mod element;
mod errors;
mod extractor;
mod mutations;
mod preview;
mod serializer;
mod session;
mod store;

pub use config::{EditorConfig, DEFAULT_CONFIG_NAME};
pub use controls::{style_control, style_controls, ControlKind, StyleControl};
pub use css_export::export_css;
pub use drag::{DragController, DragState, PointerPosition};
pub use element::{Direction, EditableElement, ElementId, ElementKind, Position};
pub use errors::EditorError;
pub use extractor::{extract, Extraction};
pub use mutations::{Mutation, MutationResult};
pub use preview::{render_preview, render_surface_html, PreviewItem};
pub use serializer::serialize_store;
pub use session::EditSession;
pub use store::{ElementStore, InsertOutcome};

// Re-export markup types for convenience
pub use liveedit_markup::StyleMap;
