use std::collections::BTreeSet;

use crate::session::cursor::{self, CursorPosition};
use crate::session::target::TargetText;

/// Typing progress against one `TargetText`. Mutated only through
/// [`crate::session::input`], which keeps the index and error set
/// consistent with each other.
#[derive(Clone, Debug)]
pub struct TypingSession {
    target: TargetText,
    current_index: usize,
    error_indices: BTreeSet<usize>,
    completed: bool,
}

impl TypingSession {
    pub fn new(target: TargetText) -> Self {
        let completed = target.is_empty();
        Self {
            target,
            current_index: 0,
            error_indices: BTreeSet::new(),
            completed,
        }
    }

    pub fn target(&self) -> &TargetText {
        &self.target
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn error_indices(&self) -> &BTreeSet<usize> {
        &self.error_indices
    }

    pub fn error_count(&self) -> usize {
        self.error_indices.len()
    }

    pub fn is_error(&self, idx: usize) -> bool {
        self.error_indices.contains(&idx)
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// The character the user should type next, if any.
    pub fn expected(&self) -> Option<char> {
        self.target.get(self.current_index)
    }

    pub fn cursor_position(&self) -> CursorPosition {
        cursor::locate(&self.target, self.current_index)
    }

    /// Fraction of the text typed; an empty text is already done.
    pub fn progress(&self) -> f64 {
        if self.target.is_empty() {
            return 1.0;
        }
        self.current_index as f64 / self.target.len() as f64
    }

    /// Consume the expected character. Completion happens on the increment
    /// that reaches the end of the text.
    pub(crate) fn advance(&mut self) {
        self.current_index += 1;
        if self.current_index == self.target.len() {
            self.completed = true;
        }
    }

    /// Step back one position, forgetting the error recorded there and any
    /// pending error at the position being vacated.
    pub(crate) fn retreat(&mut self) {
        if self.current_index == 0 {
            return;
        }
        let vacated = self.current_index;
        self.current_index -= 1;
        self.error_indices.remove(&self.current_index);
        self.error_indices.remove(&vacated);
    }

    /// Record a mistake at the current position. Returns true the first
    /// time this position is marked.
    pub(crate) fn mark_error(&mut self) -> bool {
        self.error_indices.insert(self.current_index)
    }
}
