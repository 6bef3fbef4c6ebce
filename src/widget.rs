//! Ratatui widget rendering an editing surface.
//!
//! Draws a bordered frame with an optional line-number gutter, soft-wrapped
//! text, syntax highlighting for the surface's content type, selection
//! shading, and a reversed cursor cell when focused. Renders cell by cell so
//! wide graphemes and per-character styles compose correctly.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Widget};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use fieldmirror_highlight::{global_highlighter, style_for_highlight, ContentType, HighlightSpan};
use fieldmirror_surface::{wrap_points, Surface};

/// Widget over a borrowed surface.
pub struct SurfaceWidget<'a> {
    surface: &'a Surface,
    content: ContentType,
    title: &'a str,
    focused: bool,
}

/// One visual row: a slice of a document line after soft wrapping.
struct VisualRow {
    line: usize,
    /// Grapheme range of the line shown on this row
    graphemes: std::ops::Range<usize>,
    /// True for the first row of a line (gets the line number)
    first: bool,
}

impl<'a> SurfaceWidget<'a> {
    pub fn new(surface: &'a Surface, content: ContentType) -> Self {
        Self {
            surface,
            content,
            title: "",
            focused: false,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Lay out the document as visual rows for the given text width,
    /// returning the rows and the row index holding the cursor.
    fn layout_rows(&self, text_width: usize) -> (Vec<VisualRow>, usize) {
        let buffer = self.surface.buffer();
        let cursor = self.surface.cursor();
        let wrap = self.surface.options().word_wrap;

        let mut rows = Vec::new();
        let mut cursor_row = 0;

        for line in 0..buffer.len_lines() {
            let text = buffer.line_text(line);
            let grapheme_count = text.graphemes(true).count();
            let points = if wrap {
                wrap_points(&text, text_width)
            } else {
                Vec::new()
            };

            let mut starts = vec![0];
            starts.extend(&points);
            for (i, &start) in starts.iter().enumerate() {
                let end = starts.get(i + 1).copied().unwrap_or(grapheme_count);
                if line == cursor.line {
                    // The cursor sits on the row covering its column; a
                    // cursor exactly at a wrap point belongs to the next row
                    let col = grapheme_column(&text, cursor.column);
                    if col >= start && (col < end || i + 1 == starts.len()) {
                        cursor_row = rows.len();
                    }
                }
                rows.push(VisualRow {
                    line,
                    graphemes: start..end,
                    first: i == 0,
                });
            }
        }

        (rows, cursor_row)
    }
}

/// Column as a grapheme index into the line (columns are char-based).
fn grapheme_column(line: &str, column: usize) -> usize {
    let mut chars = 0;
    for (i, g) in line.graphemes(true).enumerate() {
        if chars >= column {
            return i;
        }
        chars += g.chars().count();
    }
    line.graphemes(true).count()
}

/// Style for the byte offset, advancing the span pointer. Spans arrive in
/// document order so the pointer never moves backwards within one render.
fn highlight_at(spans: &[HighlightSpan], next: &mut usize, byte: usize, base: Style) -> Style {
    while *next < spans.len() && spans[*next].range.end <= byte {
        *next += 1;
    }
    match spans.get(*next) {
        Some(span) if span.range.start <= byte => style_for_highlight(span.highlight, Color::Reset),
        _ => base,
    }
}

impl Widget for SurfaceWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(self.title);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let surface = self.surface;
        let buffer = surface.buffer();
        let options = surface.options();

        let gutter_width = if options.show_line_numbers {
            buffer.len_lines().to_string().len() as u16 + 1
        } else {
            0
        };
        if inner.width <= gutter_width {
            return;
        }
        let text_width = (inner.width - gutter_width) as usize;

        let (rows, cursor_row) = self.layout_rows(text_width);

        // Vertical scroll keeping the cursor row visible
        let height = inner.height as usize;
        let top = cursor_row.saturating_sub(height.saturating_sub(1));

        let text = surface.text();
        let spans = global_highlighter().highlight(self.content, &text);
        let mut next_span = 0;

        let cursor_offset = surface.cursor_offset();
        let selection = surface
            .primary_selection()
            .filter(|(from, to)| from != to);

        let base = Style::default();
        let gutter_style = Style::default().fg(Color::DarkGray);
        let selection_style = Style::default().bg(Color::DarkGray);

        for (screen_row, row) in rows.iter().skip(top).take(height).enumerate() {
            let y = inner.y + screen_row as u16;
            let line_text = buffer.line_text(row.line);
            let graphemes: Vec<&str> = line_text.graphemes(true).collect();

            if gutter_width > 0 && row.first {
                let number = format!(
                    "{:>width$} ",
                    row.line + 1,
                    width = gutter_width as usize - 1
                );
                buf.set_string(inner.x, y, number, gutter_style);
            }

            // Char and byte offsets of the row's first grapheme
            let mut char_offset = buffer.line_to_char(row.line)
                + graphemes[..row.graphemes.start]
                    .iter()
                    .map(|g| g.chars().count())
                    .sum::<usize>();
            let mut byte_offset = buffer.line_to_byte(row.line)
                + graphemes[..row.graphemes.start]
                    .iter()
                    .map(|g| g.len())
                    .sum::<usize>();

            let mut x = inner.x + gutter_width;
            for g in &graphemes[row.graphemes.clone()] {
                let width = g.width().max(1) as u16;
                if x + width > inner.x + inner.width {
                    break;
                }

                let mut style = highlight_at(&spans, &mut next_span, byte_offset, base);
                if let Some((from, to)) = selection {
                    if char_offset >= from && char_offset < to {
                        style = style.patch(selection_style);
                    }
                }
                if self.focused && char_offset == cursor_offset {
                    style = style.add_modifier(Modifier::REVERSED);
                }

                buf.set_string(x, y, *g, style);
                x += width;
                char_offset += g.chars().count();
                byte_offset += g.len();
            }

            // Cursor past the last grapheme of the line renders on the
            // trailing cell
            if self.focused
                && char_offset == cursor_offset
                && row.line == surface.cursor().line
                && row.graphemes.end == graphemes.len()
                && x < inner.x + inner.width
            {
                buf.set_string(x, y, " ", base.add_modifier(Modifier::REVERSED));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldmirror_surface::SurfaceOptions;

    fn render(widget: SurfaceWidget, width: u16, height: u16) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        buf
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_renders_text_with_line_numbers() {
        let surface = Surface::from_text("hello\nworld", SurfaceOptions::default());
        let buf = render(SurfaceWidget::new(&surface, ContentType::Plain), 20, 6);

        assert!(row_text(&buf, 1).contains("1 hello"));
        assert!(row_text(&buf, 2).contains("2 world"));
    }

    #[test]
    fn test_line_numbers_hidden_when_disabled() {
        let options = SurfaceOptions {
            show_line_numbers: false,
            ..SurfaceOptions::default()
        };
        let surface = Surface::from_text("hello", options);
        let buf = render(SurfaceWidget::new(&surface, ContentType::Plain), 20, 4);

        assert!(!row_text(&buf, 1).contains("1 "));
        assert!(row_text(&buf, 1).contains("hello"));
    }

    #[test]
    fn test_soft_wrap_produces_continuation_rows() {
        let surface = Surface::from_text("alpha beta gamma delta", SurfaceOptions::default());
        // Inner width 10 minus a 2-cell gutter leaves 8 text cells
        let buf = render(SurfaceWidget::new(&surface, ContentType::Plain), 12, 8);

        assert!(row_text(&buf, 1).contains("alpha "));
        // Continuation row has no line number
        let continuation = row_text(&buf, 2);
        assert!(!continuation.contains('1'));
        assert!(continuation.contains("beta"));
    }

    #[test]
    fn test_cursor_cell_reversed_when_focused() {
        let surface = Surface::from_text("ab", SurfaceOptions::default());
        let buf = render(
            SurfaceWidget::new(&surface, ContentType::Plain).focused(true),
            20,
            4,
        );

        let cursor_cell = &buf[(3, 1)];
        assert_eq!(cursor_cell.symbol(), "a");
        assert!(cursor_cell.style().add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_no_cursor_when_unfocused() {
        let surface = Surface::from_text("ab", SurfaceOptions::default());
        let buf = render(SurfaceWidget::new(&surface, ContentType::Plain), 20, 4);

        for x in 0..20 {
            assert!(!buf[(x, 1)]
                .style()
                .add_modifier
                .contains(Modifier::REVERSED));
        }
    }

    #[test]
    fn test_empty_document_renders_cursor_on_blank_row() {
        let surface = Surface::from_text("", SurfaceOptions::default());
        let buf = render(
            SurfaceWidget::new(&surface, ContentType::Plain).focused(true),
            20,
            4,
        );

        let cursor_cell = &buf[(3, 1)];
        assert!(cursor_cell.style().add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_tiny_area_does_not_panic() {
        let surface = Surface::from_text("text", SurfaceOptions::default());
        render(SurfaceWidget::new(&surface, ContentType::Plain), 2, 2);
        render(SurfaceWidget::new(&surface, ContentType::Plain), 0, 0);
    }
}
