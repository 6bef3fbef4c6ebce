/// A single reversible edit, positioned by character offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    /// Text inserted at `offset`
    Insert { offset: usize, text: String },
    /// Text removed from `offset`
    Delete { offset: usize, text: String },
}

impl EditOp {
    /// The op that undoes this one.
    pub fn inverse(&self) -> EditOp {
        match self {
            EditOp::Insert { offset, text } => EditOp::Delete {
                offset: *offset,
                text: text.clone(),
            },
            EditOp::Delete { offset, text } => EditOp::Insert {
                offset: *offset,
                text: text.clone(),
            },
        }
    }

    /// Whether `next` continues this op so the two can undo as one step.
    ///
    /// Typing merges single characters appended right after the previous
    /// insertion; backspacing merges single characters removed right before
    /// the previous deletion. Newlines always start a new step.
    fn can_merge_with(&self, next: &EditOp) -> bool {
        match (self, next) {
            (
                EditOp::Insert { offset, text },
                EditOp::Insert {
                    offset: next_offset,
                    text: next_text,
                },
            ) => {
                next_text.chars().count() == 1
                    && !next_text.contains('\n')
                    && !text.contains('\n')
                    && *next_offset == offset + text.chars().count()
            }
            (
                EditOp::Delete { offset, text },
                EditOp::Delete {
                    offset: next_offset,
                    text: next_text,
                },
            ) => {
                next_text.chars().count() == 1
                    && !next_text.contains('\n')
                    && !text.contains('\n')
                    && next_offset + 1 == *offset
            }
            _ => false,
        }
    }

    fn merge(&mut self, next: EditOp) {
        match (self, next) {
            (
                EditOp::Insert { text, .. },
                EditOp::Insert {
                    text: next_text, ..
                },
            ) => text.push_str(&next_text),
            (
                EditOp::Delete { offset, text },
                EditOp::Delete {
                    offset: next_offset,
                    text: next_text,
                },
            ) => {
                // Backspace walks left; the merged op starts where it ended
                *offset = next_offset;
                text.insert_str(0, &next_text);
            }
            _ => {}
        }
    }
}

/// Undo/redo history over [`EditOp`]s.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: Vec<EditOp>,
    redo_stack: Vec<EditOp>,
    limit: usize,
    /// Op still accumulating merges (committed on navigation or undo)
    pending: Option<EditOp>,
}

impl History {
    pub fn new() -> Self {
        Self::with_limit(1000)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            limit,
            pending: None,
        }
    }

    /// Record an edit. New edits clear the redo stack.
    pub fn push(&mut self, op: EditOp) {
        self.redo_stack.clear();

        if let Some(pending) = &mut self.pending {
            if pending.can_merge_with(&op) {
                pending.merge(op);
                return;
            }
            let completed = self.pending.take().expect("pending checked above");
            self.undo_stack.push(completed);
        }
        self.pending = Some(op);

        if self.undo_stack.len() > self.limit {
            self.undo_stack.remove(0);
        }
    }

    /// Close the accumulating merge group.
    pub fn commit_pending(&mut self) {
        if let Some(op) = self.pending.take() {
            self.undo_stack.push(op);
        }
    }

    /// Pop the last step, returning the op that reverses it.
    pub fn undo(&mut self) -> Option<EditOp> {
        self.commit_pending();
        let op = self.undo_stack.pop()?;
        let inverse = op.inverse();
        self.redo_stack.push(op);
        Some(inverse)
    }

    /// Re-apply the last undone step, returning the original op.
    pub fn redo(&mut self) -> Option<EditOp> {
        self.commit_pending();
        let op = self.redo_stack.pop()?;
        self.undo_stack.push(op.clone());
        Some(op)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty() || self.pending.is_some()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
