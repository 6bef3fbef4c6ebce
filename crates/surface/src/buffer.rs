use std::ops::Range;

use ropey::Rope;

use crate::Cursor;

/// Document buffer backed by a rope.
///
/// All positions are character offsets (Unicode scalar values) or
/// line/column [`Cursor`]s; columns count characters, not bytes. Conversions
/// clamp to the document rather than panic, since callers routinely hold
/// positions that a concurrent edit has invalidated.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    rope: Rope,
}

impl TextBuffer {
    /// Empty buffer.
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Buffer initialized from text.
    pub fn from_str(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Document length in characters.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Number of lines. A trailing newline counts an extra empty line,
    /// matching how the cursor can sit past it.
    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Full document text.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Text of one line, without its line ending.
    pub fn line_text(&self, line: usize) -> String {
        if line >= self.rope.len_lines() {
            return String::new();
        }
        let mut text = self.rope.line(line).to_string();
        while text.ends_with('\n') || text.ends_with('\r') {
            text.pop();
        }
        text
    }

    /// Line length in characters, without the line ending.
    pub fn line_len_chars(&self, line: usize) -> usize {
        self.line_text(line).chars().count()
    }

    /// Character offset of the first character of a line.
    pub fn line_to_char(&self, line: usize) -> usize {
        let line = line.min(self.rope.len_lines().saturating_sub(1));
        self.rope.line_to_char(line)
    }

    /// Byte offset of the first byte of a line.
    pub fn line_to_byte(&self, line: usize) -> usize {
        let line = line.min(self.rope.len_lines().saturating_sub(1));
        self.rope.line_to_byte(line)
    }

    /// Character offset of a cursor position, column clamped to the line.
    pub fn offset_of(&self, cursor: Cursor) -> usize {
        let line = cursor.line.min(self.rope.len_lines().saturating_sub(1));
        let column = cursor.column.min(self.line_len_chars(line));
        self.rope.line_to_char(line) + column
    }

    /// Cursor position at a character offset, clamped to the document.
    pub fn cursor_at(&self, offset: usize) -> Cursor {
        let offset = offset.min(self.rope.len_chars());
        let line = self.rope.char_to_line(offset);
        Cursor::at(line, offset - self.rope.line_to_char(line))
    }

    /// Insert text at a character offset.
    pub fn insert(&mut self, offset: usize, text: &str) {
        let offset = offset.min(self.rope.len_chars());
        self.rope.insert(offset, text);
    }

    /// Remove a character range, returning the removed text.
    pub fn remove(&mut self, range: Range<usize>) -> String {
        let end = range.end.min(self.rope.len_chars());
        let start = range.start.min(end);
        let removed = self.rope.slice(start..end).to_string();
        self.rope.remove(start..end);
        removed
    }

    /// Copy of a character range.
    pub fn slice(&self, range: Range<usize>) -> String {
        let end = range.end.min(self.rope.len_chars());
        let start = range.start.min(end);
        self.rope.slice(start..end).to_string()
    }

    /// Character at an offset, if in bounds.
    pub fn char_at(&self, offset: usize) -> Option<char> {
        if offset < self.rope.len_chars() {
            Some(self.rope.char(offset))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_roundtrip() {
        let buffer = TextBuffer::from_str("body {\n  color: red;\n}");
        assert_eq!(buffer.text(), "body {\n  color: red;\n}");
        assert_eq!(buffer.len_lines(), 3);
    }

    #[test]
    fn test_line_text_strips_ending() {
        let buffer = TextBuffer::from_str("one\ntwo\n");
        assert_eq!(buffer.line_text(0), "one");
        assert_eq!(buffer.line_text(1), "two");
        assert_eq!(buffer.line_text(2), "");
    }

    #[test]
    fn test_offset_cursor_conversion() {
        let buffer = TextBuffer::from_str("ab\ncd");
        assert_eq!(buffer.offset_of(Cursor::at(1, 1)), 4);
        assert_eq!(buffer.cursor_at(4), Cursor::at(1, 1));
        assert_eq!(buffer.cursor_at(3), Cursor::at(1, 0));
    }

    #[test]
    fn test_offset_clamps_column() {
        let buffer = TextBuffer::from_str("ab\ncd");
        assert_eq!(buffer.offset_of(Cursor::at(0, 99)), 2);
        assert_eq!(buffer.cursor_at(999), Cursor::at(1, 2));
    }

    #[test]
    fn test_insert_remove() {
        let mut buffer = TextBuffer::from_str("hello world");
        buffer.insert(5, ",");
        assert_eq!(buffer.text(), "hello, world");
        let removed = buffer.remove(5..6);
        assert_eq!(removed, ",");
        assert_eq!(buffer.text(), "hello world");
    }

    #[test]
    fn test_unicode_offsets() {
        let buffer = TextBuffer::from_str("héllo\nwörld");
        assert_eq!(buffer.len_chars(), 11);
        assert_eq!(buffer.offset_of(Cursor::at(1, 2)), 8);
        assert_eq!(buffer.char_at(7), Some('ö'));
    }

    #[test]
    fn test_empty_buffer() {
        let buffer = TextBuffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.len_lines(), 1);
        assert_eq!(buffer.cursor_at(0), Cursor::at(0, 0));
    }
}
