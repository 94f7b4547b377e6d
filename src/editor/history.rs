use crate::annotation::Annotation;

/// Committed annotation list plus the redo stack. The list itself is the undo
/// stack: undo pops its most recent entry onto `redo_stack`, and any
/// destructive edit (commit, erase, clear) invalidates redo entirely.
#[derive(Debug, Default)]
pub struct History {
    annotations: Vec<Annotation>,
    redo_stack: Vec<Annotation>,
}

impl History {
    pub const fn new() -> Self {
        Self {
            annotations: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn find(&self, id: u64) -> Option<&Annotation> {
        self.annotations
            .iter()
            .find(|annotation| annotation.id == id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.find(id).is_some()
    }

    /// Finalize a new annotation. Committing forecloses redo.
    pub fn commit(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
        self.redo_stack.clear();
    }

    pub fn undo(&mut self) -> bool {
        match self.annotations.pop() {
            Some(annotation) => {
                self.redo_stack.push(annotation);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.redo_stack.pop() {
            Some(annotation) => {
                self.annotations.push(annotation);
                true
            }
            None => false,
        }
    }

    /// Remove one annotation by id. Destructive: not restorable via redo.
    pub fn erase(&mut self, id: u64) -> Option<Annotation> {
        let index = self
            .annotations
            .iter()
            .position(|annotation| annotation.id == id)?;
        let removed = self.annotations.remove(index);
        self.redo_stack.clear();
        Some(removed)
    }

    /// Drop everything. Destructive: not restorable via redo.
    pub fn clear_all(&mut self) -> usize {
        let removed = self.annotations.len();
        self.annotations.clear();
        self.redo_stack.clear();
        removed
    }

    /// Replace an annotation in place (transform or move). Replacement is not
    /// a commit, so the redo stack survives.
    pub fn replace(&mut self, annotation: Annotation) -> bool {
        match self
            .annotations
            .iter_mut()
            .find(|existing| existing.id == annotation.id)
        {
            Some(existing) => {
                *existing = annotation;
                true
            }
            None => false,
        }
    }

    /// Foreclose redo without touching the list. Used by destructive edits
    /// that rewrite annotations in place, such as stroke-mode erasing.
    pub fn clear_redo(&mut self) {
        self.redo_stack.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.annotations.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn max_id(&self) -> Option<u64> {
        self.annotations
            .iter()
            .map(|annotation| annotation.id)
            .chain(self.redo_stack.iter().map(|annotation| annotation.id))
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{Point, Shape, SpanElement, StrokeStyle};

    fn rectangle(id: u64) -> Annotation {
        Annotation::new(
            id,
            StrokeStyle::default(),
            Shape::Rectangle(SpanElement::new(
                Point::new(0.0, 0.0),
                Point::new(10.0 + id as f64, 10.0),
            )),
        )
    }

    fn ids(history: &History) -> Vec<u64> {
        history
            .annotations()
            .iter()
            .map(|annotation| annotation.id)
            .collect()
    }

    #[test]
    fn history_n_commits_n_undos_then_redos_restore_exact_order() {
        let mut history = History::new();
        for id in 1..=5 {
            history.commit(rectangle(id));
        }
        assert_eq!(ids(&history), vec![1, 2, 3, 4, 5]);

        for _ in 0..5 {
            assert!(history.undo());
        }
        assert!(history.is_empty());
        assert!(!history.undo());

        for _ in 0..5 {
            assert!(history.redo());
        }
        assert_eq!(ids(&history), vec![1, 2, 3, 4, 5]);
        assert!(!history.redo());
    }

    #[test]
    fn history_commit_after_undo_forecloses_redo() {
        let mut history = History::new();
        history.commit(rectangle(1));
        history.commit(rectangle(2));
        assert!(history.undo());
        assert!(history.can_redo());

        history.commit(rectangle(3));
        assert!(!history.can_redo());
        assert!(!history.redo());
        assert_eq!(ids(&history), vec![1, 3]);
    }

    #[test]
    fn history_erase_and_clear_also_invalidate_redo() {
        let mut history = History::new();
        history.commit(rectangle(1));
        history.commit(rectangle(2));
        assert!(history.undo());
        assert!(history.can_redo());

        assert!(history.erase(1).is_some());
        assert!(!history.can_redo());

        history.commit(rectangle(4));
        assert!(history.undo());
        assert!(history.can_redo());
        assert_eq!(history.clear_all(), 0);
        assert!(!history.can_redo());
    }

    #[test]
    fn history_erase_unknown_id_is_a_noop_that_keeps_redo() {
        let mut history = History::new();
        history.commit(rectangle(1));
        history.commit(rectangle(2));
        assert!(history.undo());

        assert!(history.erase(99).is_none());
        assert!(history.can_redo());
    }

    #[test]
    fn history_replace_keeps_redo_and_swaps_in_place() {
        let mut history = History::new();
        history.commit(rectangle(1));
        history.commit(rectangle(2));
        history.commit(rectangle(3));
        assert!(history.undo());

        let mut replacement = rectangle(2);
        replacement.rotation = 1.0;
        assert!(history.replace(replacement));
        assert!(history.can_redo());
        assert_eq!(ids(&history), vec![1, 2]);
        let replaced = history.find(2).expect("replaced annotation exists");
        assert!((replaced.rotation - 1.0).abs() < f64::EPSILON);

        assert!(!history.replace(rectangle(42)));
    }

    #[test]
    fn history_max_id_sees_both_stacks() {
        let mut history = History::new();
        history.commit(rectangle(3));
        history.commit(rectangle(7));
        assert!(history.undo());
        assert_eq!(history.max_id(), Some(7));
    }
}
