use crate::{
    completion, indent::leading_whitespace, Cursor, EditOp, History, Selection, TextBuffer,
};

/// Per-surface behavior options.
#[derive(Debug, Clone)]
pub struct SurfaceOptions {
    /// Text inserted by the indent key
    pub indent_unit: String,
    /// Soft-wrap long lines to the viewport width
    pub word_wrap: bool,
    /// Show the line-number gutter
    pub show_line_numbers: bool,
    /// Minimum rendered height in rows
    pub min_height: u16,
    /// Undo history capacity
    pub history_limit: usize,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            indent_unit: "  ".to_string(),
            word_wrap: true,
            show_line_numbers: true,
            min_height: 16,
            history_limit: 1000,
        }
    }
}

/// A rich editing surface over a plain text document.
///
/// Owns the document buffer, cursor, optional selection, and undo history.
/// The buffer is seeded once at creation from the backing field's value and
/// from then on mutated only through user edits and programmatic restores.
#[derive(Debug, Clone)]
pub struct Surface {
    buffer: TextBuffer,
    cursor: Cursor,
    selection: Option<Selection>,
    history: History,
    options: SurfaceOptions,
}

impl Surface {
    /// Create a surface seeded with `text`.
    pub fn from_text(text: &str, options: SurfaceOptions) -> Self {
        Self {
            buffer: TextBuffer::from_str(text),
            cursor: Cursor::new(),
            selection: None,
            history: History::with_limit(options.history_limit),
            options,
        }
    }

    /// Full document text.
    pub fn text(&self) -> String {
        self.buffer.text()
    }

    /// Document length in characters.
    pub fn len_chars(&self) -> usize {
        self.buffer.len_chars()
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Cursor position as a character offset.
    pub fn cursor_offset(&self) -> usize {
        self.buffer.offset_of(self.cursor)
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn options(&self) -> &SurfaceOptions {
        &self.options
    }

    /// The primary selection as `(from, to)` character offsets.
    ///
    /// A bare cursor reports as a collapsed range, so an attached surface
    /// always has a primary selection.
    pub fn primary_selection(&self) -> Option<(usize, usize)> {
        match self.selection {
            Some(sel) => Some((
                self.buffer.offset_of(sel.start()),
                self.buffer.offset_of(sel.end()),
            )),
            None => {
                let offset = self.cursor_offset();
                Some((offset, offset))
            }
        }
    }

    /// Collapse the selection at a character offset (clamped to the
    /// document). Used for cursor restoration; bounds policy is the
    /// caller's.
    pub fn set_cursor_offset(&mut self, offset: usize) {
        self.history.commit_pending();
        self.cursor = self.buffer.cursor_at(offset);
        self.selection = None;
    }

    // === Movement ===

    pub fn move_left(&mut self, extend: bool) {
        let offset = self.cursor_offset();
        self.apply_move(extend, self.buffer.cursor_at(offset.saturating_sub(1)));
    }

    pub fn move_right(&mut self, extend: bool) {
        let offset = self.cursor_offset();
        self.apply_move(extend, self.buffer.cursor_at(offset + 1));
    }

    pub fn move_up(&mut self, extend: bool) {
        let target = if self.cursor.line == 0 {
            Cursor::new()
        } else {
            self.clamped(self.cursor.line - 1, self.cursor.column)
        };
        self.apply_move(extend, target);
    }

    pub fn move_down(&mut self, extend: bool) {
        let last = self.buffer.len_lines().saturating_sub(1);
        let target = if self.cursor.line >= last {
            self.clamped(last, usize::MAX)
        } else {
            self.clamped(self.cursor.line + 1, self.cursor.column)
        };
        self.apply_move(extend, target);
    }

    pub fn move_line_start(&mut self, extend: bool) {
        self.apply_move(extend, Cursor::at(self.cursor.line, 0));
    }

    pub fn move_line_end(&mut self, extend: bool) {
        let line = self.cursor.line;
        self.apply_move(extend, Cursor::at(line, self.buffer.line_len_chars(line)));
    }

    pub fn move_doc_start(&mut self, extend: bool) {
        self.apply_move(extend, Cursor::new());
    }

    pub fn move_doc_end(&mut self, extend: bool) {
        let end = self.buffer.cursor_at(self.buffer.len_chars());
        self.apply_move(extend, end);
    }

    fn clamped(&self, line: usize, column: usize) -> Cursor {
        Cursor::at(line, column.min(self.buffer.line_len_chars(line)))
    }

    fn apply_move(&mut self, extend: bool, target: Cursor) {
        if extend {
            let anchor = self.selection.map(|s| s.anchor).unwrap_or(self.cursor);
            self.selection = Some(Selection {
                anchor,
                head: target,
            });
        } else {
            self.selection = None;
        }
        self.cursor = target;
        self.history.commit_pending();
    }

    // === Editing ===

    /// Insert a character, replacing the selection if one exists.
    pub fn insert_char(&mut self, c: char) {
        self.replace_selection(&c.to_string());
    }

    /// Insert text, replacing the selection if one exists.
    pub fn insert_text(&mut self, text: &str) {
        self.replace_selection(text);
    }

    /// Insert a newline; the new line inherits the current line's leading
    /// whitespace up to the cursor.
    pub fn insert_newline(&mut self) {
        let line = self.buffer.line_text(self.cursor.line);
        let inherited: String = leading_whitespace(&line)
            .chars()
            .take(self.cursor.column)
            .collect();
        self.replace_selection(&format!("\n{inherited}"));
    }

    /// Insert one indent unit.
    pub fn insert_indent(&mut self) {
        let unit = self.options.indent_unit.clone();
        self.replace_selection(&unit);
    }

    pub fn backspace(&mut self) {
        if self.delete_selection() {
            return;
        }
        let offset = self.cursor_offset();
        if offset == 0 {
            return;
        }
        let removed = self.buffer.remove(offset - 1..offset);
        self.history.push(EditOp::Delete {
            offset: offset - 1,
            text: removed,
        });
        self.cursor = self.buffer.cursor_at(offset - 1);
    }

    pub fn delete_forward(&mut self) {
        if self.delete_selection() {
            return;
        }
        let offset = self.cursor_offset();
        if offset >= self.buffer.len_chars() {
            return;
        }
        let removed = self.buffer.remove(offset..offset + 1);
        self.history.push(EditOp::Delete {
            offset,
            text: removed,
        });
        self.cursor = self.buffer.cursor_at(offset);
    }

    pub fn undo(&mut self) {
        if let Some(op) = self.history.undo() {
            self.apply_op(op);
        }
    }

    pub fn redo(&mut self) {
        if let Some(op) = self.history.redo() {
            self.apply_op(op);
        }
    }

    fn replace_selection(&mut self, text: &str) {
        self.delete_selection();
        let offset = self.cursor_offset();
        self.buffer.insert(offset, text);
        self.history.push(EditOp::Insert {
            offset,
            text: text.to_string(),
        });
        self.cursor = self.buffer.cursor_at(offset + text.chars().count());
    }

    /// Remove the selected range, if a non-collapsed selection exists.
    fn delete_selection(&mut self) -> bool {
        let Some(sel) = self.selection.take() else {
            return false;
        };
        if sel.is_collapsed() {
            return false;
        }
        let from = self.buffer.offset_of(sel.start());
        let to = self.buffer.offset_of(sel.end());
        let removed = self.buffer.remove(from..to);
        self.history.push(EditOp::Delete {
            offset: from,
            text: removed,
        });
        self.cursor = self.buffer.cursor_at(from);
        true
    }

    fn apply_op(&mut self, op: EditOp) {
        self.selection = None;
        match op {
            EditOp::Insert { offset, text } => {
                self.buffer.insert(offset, &text);
                self.cursor = self.buffer.cursor_at(offset + text.chars().count());
            }
            EditOp::Delete { offset, text } => {
                self.buffer.remove(offset..offset + text.chars().count());
                self.cursor = self.buffer.cursor_at(offset);
            }
        }
    }

    // === Completion ===

    /// Candidate words extending the fragment before the cursor.
    pub fn completion_candidates(&self) -> Vec<String> {
        let line = self.buffer.line_text(self.cursor.line);
        let Some(prefix) = completion::completion_prefix(&line, self.cursor.column) else {
            return Vec::new();
        };
        completion::completion_candidates(&self.buffer.text(), &prefix)
    }

    /// Accept the first completion candidate, inserting its remainder.
    /// Returns false when there is nothing to complete.
    pub fn complete(&mut self) -> bool {
        let line = self.buffer.line_text(self.cursor.line);
        let Some(prefix) = completion::completion_prefix(&line, self.cursor.column) else {
            return false;
        };
        let candidates = completion::completion_candidates(&self.buffer.text(), &prefix);
        let Some(candidate) = candidates.first() else {
            return false;
        };
        let remainder: String = candidate.chars().skip(prefix.chars().count()).collect();
        self.insert_text(&remainder);
        true
    }
}
