//! Annotation editor core: document ownership, selection, the in-progress
//! slot, and the change notification hook the render layer subscribes to.

pub mod controller;
pub mod hit;
pub mod history;
pub mod transform;

pub use controller::{EditorController, EraserMode, InteractionState, TextInputEvent, Tool};
pub use hit::Handle;
pub use history::History;
pub use transform::TransformSession;

use crate::annotation::{Annotation, Shape, StrokeStyle};
use crate::geometry::Point;

/// Toolbar enablement flags derived from the current document state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Availability {
    pub selection: bool,
    pub undo: bool,
    pub redo: bool,
    pub clear: bool,
}

/// The engine object. Owns the committed list, the single in-progress slot,
/// the selection and the id/callout counters. Every mutation goes through a
/// method here, fires the change hook, and completes within the input event
/// that triggered it.
pub struct AnnotationEditor {
    history: History,
    draft: Option<Annotation>,
    selection: Option<u64>,
    next_id: u64,
    next_callout_number: u32,
    change_hook: Option<Box<dyn FnMut()>>,
}

impl AnnotationEditor {
    pub fn new() -> Self {
        Self {
            history: History::new(),
            draft: None,
            selection: None,
            next_id: 1,
            next_callout_number: 1,
            change_hook: None,
        }
    }

    /// Register the change notification hook. The render layer subscribes
    /// here instead of coupling to any UI framework's re-render cycle.
    pub fn set_change_hook(&mut self, hook: impl FnMut() + 'static) {
        self.change_hook = Some(Box::new(hook));
    }

    fn notify(&mut self) {
        if let Some(hook) = &mut self.change_hook {
            hook();
        }
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    pub fn next_callout_number(&mut self) -> u32 {
        let number = self.next_callout_number;
        self.next_callout_number = self.next_callout_number.saturating_add(1);
        number
    }

    pub fn annotations(&self) -> &[Annotation] {
        self.history.annotations()
    }

    pub fn find(&self, id: u64) -> Option<&Annotation> {
        self.history.find(id)
    }

    pub fn draft(&self) -> Option<&Annotation> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut Annotation> {
        self.draft.as_mut()
    }

    pub fn selection(&self) -> Option<u64> {
        self.selection
    }

    pub fn selected(&self) -> Option<&Annotation> {
        self.selection.and_then(|id| self.history.find(id))
    }

    pub fn select(&mut self, id: Option<u64>) {
        let next = id.filter(|id| self.history.contains(*id));
        if next != self.selection {
            self.selection = next;
            self.notify();
        }
    }

    /// Start drawing. The shape occupies the in-progress slot and is not yet
    /// part of history; the previous draft, if any, is discarded.
    pub fn begin_draft(&mut self, style: StrokeStyle, shape: Shape) -> u64 {
        let id = self.allocate_id();
        self.draft = Some(Annotation::new(id, style, shape));
        self.notify();
        id
    }

    pub fn discard_draft(&mut self) -> bool {
        let dropped = self.draft.take().is_some();
        if dropped {
            self.notify();
        }
        dropped
    }

    /// Move the in-progress annotation into the committed list. A degenerate
    /// draft (zero-length gesture) is dropped silently.
    pub fn commit_draft(&mut self) -> Option<u64> {
        let draft = self.draft.take()?;
        if draft.is_degenerate() {
            tracing::debug!(id = draft.id, kind = ?draft.kind(), "dropping degenerate draft");
            self.notify();
            return None;
        }
        let id = draft.id;
        self.history.commit(draft);
        self.notify();
        Some(id)
    }

    /// Replace a committed annotation in place (transform or move). A
    /// vanished id is a no-op, not an error.
    pub fn replace(&mut self, annotation: Annotation) -> bool {
        let id = annotation.id;
        if self.history.replace(annotation) {
            self.notify();
            true
        } else {
            tracing::debug!(id, "replace target no longer exists; ignoring");
            false
        }
    }

    pub fn undo(&mut self) -> bool {
        let applied = self.history.undo();
        if applied {
            self.prune_selection();
            self.notify();
        }
        applied
    }

    pub fn redo(&mut self) -> bool {
        let applied = self.history.redo();
        if applied {
            self.notify();
        }
        applied
    }

    pub fn erase(&mut self, id: u64) -> bool {
        let removed = self.history.erase(id).is_some();
        if removed {
            self.prune_selection();
            self.notify();
        }
        removed
    }

    /// Stroke-mode eraser pass over every freehand annotation. Strokes that
    /// lose all points are removed entirely. Any change forecloses redo.
    pub fn erase_stroke_at(&mut self, at: Point, radius: f64) -> bool {
        let mut rewritten = Vec::new();
        let mut emptied = Vec::new();
        for annotation in self.history.annotations() {
            let mut candidate = annotation.clone();
            if transform::erase_stroke_points(&mut candidate, at, radius) {
                if candidate
                    .shape
                    .as_freehand()
                    .is_some_and(|stroke| stroke.points.is_empty())
                {
                    emptied.push(candidate.id);
                } else {
                    rewritten.push(candidate);
                }
            }
        }
        if rewritten.is_empty() && emptied.is_empty() {
            return false;
        }
        for annotation in rewritten {
            self.history.replace(annotation);
        }
        for id in emptied {
            self.history.erase(id);
        }
        self.history.clear_redo();
        self.prune_selection();
        self.notify();
        true
    }

    pub fn clear_all(&mut self) -> usize {
        let removed = self.history.clear_all();
        let had_transient = self.draft.is_some() || self.selection.is_some();
        self.draft = None;
        self.selection = None;
        if removed > 0 || had_transient {
            self.notify();
        }
        removed
    }

    /// Clone the selected annotation offset by the fixed duplicate vector.
    /// The copy becomes the new selection.
    pub fn duplicate_selected(&mut self) -> Option<u64> {
        let source = self.selected()?.clone();
        let id = self.allocate_id();
        let copy = transform::duplicated(&source, id);
        self.history.commit(copy);
        self.selection = Some(id);
        self.notify();
        Some(id)
    }

    pub fn availability(&self) -> Availability {
        Availability {
            selection: self.selected().is_some(),
            undo: self.history.can_undo(),
            redo: self.history.can_redo(),
            clear: !self.history.is_empty(),
        }
    }

    fn prune_selection(&mut self) {
        if let Some(id) = self.selection {
            if !self.history.contains(id) {
                self.selection = None;
            }
        }
    }
}

impl Default for AnnotationEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AnnotationEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotationEditor")
            .field("annotations", &self.history.annotations().len())
            .field("draft", &self.draft.is_some())
            .field("selection", &self.selection)
            .field("next_id", &self.next_id)
            .finish()
    }
}
