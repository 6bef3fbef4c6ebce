//! Soft line wrapping by display width.
//!
//! Breaks prefer word boundaries but fall back to a hard break when a single
//! word is wider than the available width. Widths are display cells
//! (CJK-aware) over grapheme clusters, not bytes or chars.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Whether a character can be broken after.
pub fn is_word_boundary(c: char) -> bool {
    !c.is_alphanumeric()
}

/// Grapheme indices where the line breaks into new visual rows.
///
/// Empty when the line fits. Each returned index is the first grapheme of a
/// continuation row.
pub fn wrap_points(line: &str, max_width: usize) -> Vec<usize> {
    if max_width == 0 || line.width() <= max_width {
        return Vec::new();
    }

    let graphemes: Vec<&str> = line.graphemes(true).collect();
    let mut points = Vec::new();
    let mut row_start = 0;

    while row_start < graphemes.len() {
        let next = row_end(&graphemes, row_start, max_width);
        if next >= graphemes.len() {
            break;
        }
        points.push(next);
        row_start = next;
    }

    points
}

/// First grapheme index past the visual row starting at `start`.
fn row_end(graphemes: &[&str], start: usize, max_width: usize) -> usize {
    let mut width = 0;
    let mut overflow = graphemes.len();

    for (i, g) in graphemes.iter().enumerate().skip(start) {
        let g_width = g.width();
        if width + g_width > max_width {
            overflow = i;
            break;
        }
        width += g_width;
    }
    if overflow >= graphemes.len() {
        return graphemes.len();
    }

    let boundary = |g: &str| g.chars().next().is_none_or(is_word_boundary);

    // Break right after a boundary grapheme when one fits in the row
    if boundary(graphemes[overflow]) {
        return overflow + 1;
    }
    for i in (start + 1..overflow).rev() {
        if boundary(graphemes[i]) {
            return i + 1;
        }
    }

    // One long word: hard break, keeping at least one grapheme per row
    overflow.max(start + 1)
}
