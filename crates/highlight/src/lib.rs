//! Syntax highlighting for fieldmirror editing surfaces, using tree-sitter.
//!
//! Content types cover what plain fields in a web form typically carry:
//! stylesheets, markup, JSON data, and markdown. Unknown types render
//! unstyled.

use std::collections::HashMap;
use std::ops::Range;
use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};
use tree_sitter_highlight::{HighlightConfiguration, HighlightEvent};

/// Global highlighter, built once (grammar compilation is not free).
static GLOBAL_HIGHLIGHTER: OnceLock<Highlighter> = OnceLock::new();

/// Get the global highlighter.
pub fn global_highlighter() -> &'static Highlighter {
    GLOBAL_HIGHLIGHTER.get_or_init(Highlighter::new)
}

/// Content type of a bound field, detected from its name's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentType {
    Css,
    Html,
    Json,
    Markdown,
    #[default]
    Plain,
}

impl ContentType {
    /// Detect from a field name such as `content.css` or `data.json`.
    pub fn from_field_name(name: &str) -> Self {
        let ext = name.rsplit('.').next().unwrap_or("");
        match ext.to_lowercase().as_str() {
            "css" => Self::Css,
            "html" | "htm" => Self::Html,
            "json" => Self::Json,
            "md" | "markdown" => Self::Markdown,
            _ => Self::Plain,
        }
    }

    /// Grammar name, `None` for plain text.
    pub fn grammar(self) -> Option<&'static str> {
        match self {
            Self::Css => Some("css"),
            Self::Html => Some("html"),
            Self::Json => Some("json"),
            Self::Markdown => Some("markdown"),
            Self::Plain => None,
        }
    }
}

/// Highlight categories recognized by the styling table.
pub const HIGHLIGHT_NAMES: &[&str] = &[
    "attribute",
    "comment",
    "constant",
    "constant.builtin",
    "function",
    "keyword",
    "number",
    "operator",
    "property",
    "punctuation",
    "punctuation.bracket",
    "punctuation.delimiter",
    "string",
    "string.special",
    "tag",
    "type",
    "variable",
];

/// One highlighted byte range of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSpan {
    /// Byte range into the highlighted text
    pub range: Range<usize>,
    /// Index into [`HIGHLIGHT_NAMES`]
    pub highlight: usize,
}

/// Style for a highlight category index.
pub fn style_for_highlight(index: usize, base_fg: Color) -> Style {
    let name = HIGHLIGHT_NAMES.get(index).copied().unwrap_or("");

    let color = match name {
        "comment" => Color::DarkGray,
        "keyword" => Color::Magenta,
        "string" | "string.special" => Color::Green,
        "number" | "constant" | "constant.builtin" => Color::Yellow,
        "function" => Color::Blue,
        "type" => Color::Cyan,
        "property" | "attribute" => Color::LightBlue,
        "tag" => Color::LightMagenta,
        "operator" => Color::LightCyan,
        _ => base_fg,
    };

    let mut style = Style::default().fg(color);
    if name == "keyword" {
        style = style.add_modifier(Modifier::BOLD);
    }
    style
}

/// Highlighter holding the grammar configurations for all content types.
pub struct Highlighter {
    configs: HashMap<&'static str, HighlightConfiguration>,
}

impl Highlighter {
    pub fn new() -> Self {
        let names: Vec<String> = HIGHLIGHT_NAMES.iter().map(|s| s.to_string()).collect();
        let mut configs = HashMap::new();

        Self::load(
            &mut configs,
            "css",
            tree_sitter_css::LANGUAGE.into(),
            tree_sitter_css::HIGHLIGHTS_QUERY,
            "",
            &names,
        );
        Self::load(
            &mut configs,
            "html",
            tree_sitter_html::LANGUAGE.into(),
            tree_sitter_html::HIGHLIGHTS_QUERY,
            tree_sitter_html::INJECTIONS_QUERY,
            &names,
        );
        Self::load(
            &mut configs,
            "json",
            tree_sitter_json::LANGUAGE.into(),
            tree_sitter_json::HIGHLIGHTS_QUERY,
            "",
            &names,
        );
        Self::load(
            &mut configs,
            "markdown",
            tree_sitter_md::LANGUAGE.into(),
            tree_sitter_md::HIGHLIGHT_QUERY_BLOCK,
            tree_sitter_md::INJECTION_QUERY_BLOCK,
            &names,
        );

        Self { configs }
    }

    fn load(
        configs: &mut HashMap<&'static str, HighlightConfiguration>,
        name: &'static str,
        language: tree_sitter::Language,
        highlights_query: &str,
        injections_query: &str,
        names: &[String],
    ) {
        if let Ok(mut config) =
            HighlightConfiguration::new(language, name, highlights_query, injections_query, "")
        {
            config.configure(names);
            configs.insert(name, config);
        }
    }

    /// Highlight the full document, returning styled byte spans in order.
    ///
    /// Plain content, unknown grammars, and parse failures all produce an
    /// empty span list (unstyled text), never an error.
    pub fn highlight(&self, content: ContentType, text: &str) -> Vec<HighlightSpan> {
        let Some(config) = content.grammar().and_then(|g| self.configs.get(g)) else {
            return Vec::new();
        };

        let mut highlighter = tree_sitter_highlight::Highlighter::new();
        let Ok(events) = highlighter.highlight(config, text.as_bytes(), None, |_| None) else {
            return Vec::new();
        };

        let mut spans = Vec::new();
        let mut stack: Vec<usize> = Vec::new();
        for event in events {
            match event {
                Ok(HighlightEvent::HighlightStart(h)) => stack.push(h.0),
                Ok(HighlightEvent::HighlightEnd) => {
                    stack.pop();
                }
                Ok(HighlightEvent::Source { start, end }) => {
                    if let Some(&highlight) = stack.last() {
                        spans.push(HighlightSpan {
                            range: start..end,
                            highlight,
                        });
                    }
                }
                Err(_) => return Vec::new(),
            }
        }
        spans
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}
