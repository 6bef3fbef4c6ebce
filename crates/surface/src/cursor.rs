/// Cursor position in the document, in lines and character columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Cursor {
    pub line: usize,
    pub column: usize,
}

impl Cursor {
    /// Cursor at the document start.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cursor at the given line and column.
    pub fn at(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Text selection between an anchor and a head.
///
/// The anchor is where the selection started; the head follows the cursor.
/// A collapsed selection (anchor == head) is how a bare cursor position is
/// reported as the primary selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Cursor,
    pub head: Cursor,
}

impl Selection {
    /// Collapsed selection at a single position.
    pub fn collapsed(at: Cursor) -> Self {
        Self {
            anchor: at,
            head: at,
        }
    }

    /// Whether the selection spans no text.
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.head
    }

    /// Earlier end of the selection in document order.
    pub fn start(&self) -> Cursor {
        self.anchor.min(self.head)
    }

    /// Later end of the selection in document order.
    pub fn end(&self) -> Cursor {
        self.anchor.max(self.head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_ordering() {
        assert!(Cursor::at(0, 5) < Cursor::at(1, 0));
        assert!(Cursor::at(2, 3) < Cursor::at(2, 4));
    }

    #[test]
    fn test_selection_start_end() {
        let sel = Selection {
            anchor: Cursor::at(3, 1),
            head: Cursor::at(1, 4),
        };
        assert_eq!(sel.start(), Cursor::at(1, 4));
        assert_eq!(sel.end(), Cursor::at(3, 1));
        assert!(!sel.is_collapsed());
    }

    #[test]
    fn test_collapsed_selection() {
        let sel = Selection::collapsed(Cursor::at(0, 7));
        assert!(sel.is_collapsed());
        assert_eq!(sel.start(), sel.end());
    }
}
