//! # Drag/Pointer Controller
//!
//! ```text
//!            pointer down on element
//!   ┌──────┐ ───────────────────────▶ ┌──────────┐ ◀─┐
//!   │ Idle │                          │ Dragging │   │ pointer move: DragBy(delta)
//!   └──────┘ ◀─────────────────────── └──────────┘ ──┘
//!            pointer up / pointer leave
//!            (one serialization)
//! ```
//!
//! Deltas are incremental: the anchor moves to the current pointer position
//! after every move, so the element tracks the pointer however often moves
//! are reported.
//!
//! A drag belongs to the load it started in. Once the session loads new
//! markup the drag is dropped without committing; hosts may also call
//! [`DragController::reset`] when they load.

use crate::{EditSession, ElementId, Mutation};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Pointer coordinates in whole pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i64,
    pub y: i64,
}

impl PointerPosition {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Round fractional client coordinates. Rounding absolute positions
    /// (rather than each delta) keeps the sum of deltas exact.
    pub fn from_client(x: f64, y: f64) -> Self {
        Self {
            x: x.round() as i64,
            y: y.round() as i64,
        }
    }

    fn delta_from(self, anchor: PointerPosition) -> (i64, i64) {
        (self.x.saturating_sub(anchor.x), self.y.saturating_sub(anchor.y))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        element: ElementId,
        anchor: PointerPosition,
        /// `EditSession::loads` at pointer down
        load: u64,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Drop any drag in progress without committing it
    pub fn reset(&mut self) {
        self.state = DragState::Idle;
    }

    /// Drop a drag whose element came from an earlier load
    fn discard_stale(&mut self, session: &EditSession) {
        if let DragState::Dragging { element, load, .. } = &self.state {
            if *load != session.loads() {
                warn!(id = %element, "Drag dropped after reload");
                self.reset();
            }
        }
    }

    /// Start dragging `id`, selecting it. Unknown ids leave the controller
    /// idle. A drag already in progress is committed first.
    pub fn pointer_down(&mut self, session: &mut EditSession, id: impl Into<ElementId>, at: PointerPosition) -> bool {
        let id = id.into();
        self.discard_stale(session);
        if self.is_dragging() {
            self.end(session);
        }
        if !session.select(id.clone()) {
            return false;
        }

        debug!(id = %id, x = at.x, y = at.y, "Drag started");
        self.state = DragState::Dragging {
            element: id,
            anchor: at,
            load: session.loads(),
        };
        true
    }

    /// Move the dragged element by the pointer delta. Ignored while idle.
    pub fn pointer_move(&mut self, session: &mut EditSession, at: PointerPosition) -> bool {
        self.discard_stale(session);
        let DragState::Dragging { element, anchor, .. } = &mut self.state else {
            return false;
        };

        let (dx, dy) = at.delta_from(*anchor);
        *anchor = at;
        if dx == 0 && dy == 0 {
            return false;
        }

        session
            .apply_deferred(Mutation::DragBy {
                id: element.clone(),
                dx,
                dy,
            })
            .applied
    }

    /// Finish the drag and serialize once. Ignored while idle.
    pub fn pointer_up(&mut self, session: &mut EditSession) -> bool {
        self.end(session)
    }

    /// Leaving the surface ends the drag exactly like releasing the pointer
    pub fn pointer_leave(&mut self, session: &mut EditSession) -> bool {
        self.end(session)
    }

    fn end(&mut self, session: &mut EditSession) -> bool {
        self.discard_stale(session);
        match std::mem::take(&mut self.state) {
            DragState::Idle => false,
            DragState::Dragging { element, .. } => {
                let committed = session.commit();
                debug!(id = %element, committed, "Drag ended");
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EditorConfig, Position};

    fn session() -> EditSession {
        EditSession::from_markup(
            r#"<p style="top: 10px; left: 10px">Drag me</p><p>Other</p>"#,
            EditorConfig::default(),
        )
    }

    fn position(session: &EditSession, id: &str) -> Position {
        session.element(&id.into()).unwrap().position
    }

    #[test]
    fn test_drag_sequence() {
        let mut session = session();
        let mut drag = DragController::new();

        assert!(drag.pointer_down(&mut session, "element-0", PointerPosition::new(100, 100)));
        assert_eq!(session.selected().map(|id| id.as_str()), Some("element-0"));

        drag.pointer_move(&mut session, PointerPosition::new(103, 101));
        drag.pointer_move(&mut session, PointerPosition::new(110, 95));
        assert_eq!(position(&session, "element-0"), Position { top: 5, left: 20 });

        // Markup is only written when the drag ends
        assert!(!session.markup().contains("left: 20px"));
        assert!(drag.pointer_up(&mut session));
        assert!(session.markup().contains("top: 5px; left: 20px;"));
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_move_while_idle_is_ignored() {
        let mut session = session();
        let mut drag = DragController::new();

        assert!(!drag.pointer_move(&mut session, PointerPosition::new(50, 50)));
        assert!(!drag.pointer_up(&mut session));
        assert_eq!(position(&session, "element-0"), Position { top: 10, left: 10 });
    }

    #[test]
    fn test_pointer_leave_ends_drag() {
        let mut session = session();
        let mut drag = DragController::new();

        drag.pointer_down(&mut session, "element-0", PointerPosition::new(0, 0));
        drag.pointer_move(&mut session, PointerPosition::new(7, 0));
        assert!(drag.pointer_leave(&mut session));
        assert!(!drag.is_dragging());
        assert!(session.markup().contains("left: 17px;"));

        // Further moves do nothing
        drag.pointer_move(&mut session, PointerPosition::new(50, 0));
        assert_eq!(position(&session, "element-0").left, 17);
    }

    #[test]
    fn test_unknown_element_stays_idle() {
        let mut session = session();
        let mut drag = DragController::new();
        assert!(!drag.pointer_down(&mut session, "element-9", PointerPosition::new(0, 0)));
        assert_eq!(drag.state(), &DragState::Idle);
    }

    #[test]
    fn test_new_pointer_down_commits_running_drag() {
        let mut session = session();
        let mut drag = DragController::new();

        drag.pointer_down(&mut session, "element-0", PointerPosition::new(0, 0));
        drag.pointer_move(&mut session, PointerPosition::new(0, 4));
        drag.pointer_down(&mut session, "element-1", PointerPosition::new(0, 4));

        assert!(!session.has_pending());
        assert!(session.markup().contains("top: 14px;"));
        assert_eq!(session.selected().map(|id| id.as_str()), Some("element-1"));
    }

    #[test]
    fn test_fractional_pointer_deltas_sum_exactly() {
        let mut session = session();
        let mut drag = DragController::new();

        drag.pointer_down(&mut session, "element-0", PointerPosition::from_client(0.0, 0.0));
        for step in 1..=10 {
            let x = step as f64 * 0.4;
            drag.pointer_move(&mut session, PointerPosition::from_client(x, 0.0));
        }
        drag.pointer_up(&mut session);
        assert_eq!(position(&session, "element-0").left, 10 + 4);
    }

    #[test]
    fn test_extreme_pointer_coordinates_saturate() {
        let mut session = session();
        let mut drag = DragController::new();

        drag.pointer_down(&mut session, "element-0", PointerPosition::from_client(-1e300, 0.0));
        drag.pointer_move(&mut session, PointerPosition::from_client(1e300, 0.0));
        drag.pointer_move(&mut session, PointerPosition::from_client(f64::INFINITY, 0.0));
        assert!(drag.pointer_up(&mut session));

        let el = session.element(&"element-0".into()).unwrap();
        assert_eq!(el.position.left, i64::MAX);
        assert!(el.position_matches_style(0));
    }

    #[test]
    fn test_reload_drops_running_drag() {
        let mut session = session();
        let mut drag = DragController::new();

        drag.pointer_down(&mut session, "element-0", PointerPosition::new(0, 0));
        drag.pointer_move(&mut session, PointerPosition::new(5, 0));
        session.load(r#"<p style="top: 1px; left: 1px">Fresh</p>"#);

        assert!(!drag.pointer_move(&mut session, PointerPosition::new(20, 0)));
        assert!(!drag.is_dragging());
        assert!(!drag.pointer_up(&mut session));
        assert_eq!(position(&session, "element-0"), Position { top: 1, left: 1 });
    }

    #[test]
    fn test_reset_discards_without_commit() {
        let mut session = session();
        let mut drag = DragController::new();

        drag.pointer_down(&mut session, "element-0", PointerPosition::new(0, 0));
        drag.pointer_move(&mut session, PointerPosition::new(3, 0));
        drag.reset();

        assert_eq!(drag.state(), &DragState::Idle);
        assert!(!drag.pointer_up(&mut session));
        assert!(session.has_pending());
    }
}
