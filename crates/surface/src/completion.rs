//! Word completion over the document's own vocabulary.
//!
//! Candidates are words already present in the buffer that extend the word
//! fragment immediately before the cursor. Hyphens and underscores count as
//! word characters so CSS idents and snake_case names complete whole.

use std::collections::BTreeSet;

/// Whether a character belongs to a completable word.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

/// The word fragment ending at `column` (a character index into `line`).
///
/// `None` when the cursor does not follow a word character.
pub fn completion_prefix(line: &str, column: usize) -> Option<String> {
    let chars: Vec<char> = line.chars().collect();
    let column = column.min(chars.len());

    let mut start = column;
    while start > 0 && is_word_char(chars[start - 1]) {
        start -= 1;
    }
    if start == column {
        return None;
    }
    Some(chars[start..column].iter().collect())
}

/// Words in `text` that strictly extend `prefix`, sorted and deduplicated.
pub fn completion_candidates(text: &str, prefix: &str) -> Vec<String> {
    if prefix.is_empty() {
        return Vec::new();
    }
    let words: BTreeSet<&str> = text
        .split(|c: char| !is_word_char(c))
        .filter(|w| w.len() > prefix.len() && w.starts_with(prefix))
        .collect();
    words.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_at_word_end() {
        assert_eq!(completion_prefix("color: re", 9), Some("re".to_string()));
    }

    #[test]
    fn test_prefix_includes_hyphen() {
        assert_eq!(
            completion_prefix("font-fam", 8),
            Some("font-fam".to_string())
        );
    }

    #[test]
    fn test_no_prefix_after_boundary() {
        assert_eq!(completion_prefix("color: ", 7), None);
        assert_eq!(completion_prefix("", 0), None);
    }

    #[test]
    fn test_candidates_sorted_unique() {
        let text = "background: blue;\nborder: blue solid;\nbackground-color: red;";
        let candidates = completion_candidates(text, "ba");
        assert_eq!(candidates, vec!["background", "background-color"]);
    }

    #[test]
    fn test_candidates_exclude_exact_prefix() {
        let candidates = completion_candidates("red red red", "red");
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_empty_prefix_no_candidates() {
        assert!(completion_candidates("anything here", "").is_empty());
    }
}
