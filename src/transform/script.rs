//! Single-pass lexical highlighting for the script editor pane.
//!
//! This is deliberately not a grammar: one left-to-right scan with a small
//! mode state is enough for keyword, string and comment coloring. Keyword
//! lookup goes through the offset map so it always sees the original text;
//! tab expansion can never change word boundaries semantically.

use std::collections::HashMap;

use super::{Highlight, Highlighted, OffsetMap, Style, StyledText};
use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    InString,
    InComment,
}

/// Highlighter for script source. Built once from the resolved colors and
/// the loaded keyword dictionary; immutable afterwards.
pub struct ScriptHighlighter {
    default_color: Color,
    string_color: Color,
    comment_color: Color,
    keywords: HashMap<String, Color>,
}

impl ScriptHighlighter {
    pub fn new(
        default_color: Color,
        string_color: Color,
        comment_color: Color,
        keywords: HashMap<String, Color>,
    ) -> Self {
        ScriptHighlighter {
            default_color,
            string_color,
            comment_color,
            keywords,
        }
    }

    /// Swap in a freshly loaded dictionary (wholesale replacement).
    pub fn set_keywords(&mut self, keywords: HashMap<String, Color>) {
        self.keywords = keywords;
    }

    fn mode_color(&self, mode: Mode) -> Color {
        match mode {
            Mode::InString => self.string_color,
            Mode::InComment => self.comment_color,
            Mode::Normal => self.default_color,
        }
    }
}

impl Highlight for ScriptHighlighter {
    fn highlight(&self, text: &str) -> Highlighted {
        let (transformed, map) = OffsetMap::expand_tabs(text);
        let chars: Vec<char> = transformed.chars().collect();
        let original: Vec<char> = text.chars().collect();
        let mut styled = StyledText::with_capacity(transformed.len());
        let mut mode = Mode::Normal;

        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            if c == '"' && mode != Mode::InComment {
                // Quotes toggle string mode; `\"` is not treated as an
                // escape. Both delimiters take the string color.
                mode = if mode == Mode::InString {
                    Mode::Normal
                } else {
                    Mode::InString
                };
                styled.push(c, Style::plain(self.string_color));
                i += 1;
            } else if c == '/'
                && i + 1 < chars.len()
                && chars[i + 1] == '/'
                && mode != Mode::InString
            {
                // The second slash falls through to the mode-colored arm.
                mode = Mode::InComment;
                styled.push(c, Style::plain(self.comment_color));
                i += 1;
            } else if c == '\n' {
                // Comments end at the line; an open string carries over.
                if mode == Mode::InComment {
                    mode = Mode::Normal;
                }
                styled.push(c, Style::plain(self.default_color));
                i += 1;
            } else if mode == Mode::Normal && c.is_alphanumeric() {
                let start = i;
                while i < chars.len() && chars[i].is_alphanumeric() {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                // Look the word up in the original text, not the expanded one.
                let original_start = map.transformed_to_original(start);
                let len = (i - start).min(original.len() - original_start);
                let original_word: String =
                    original[original_start..original_start + len].iter().collect();
                let color = self
                    .keywords
                    .get(&original_word)
                    .copied()
                    .unwrap_or(self.default_color);
                styled.push_str(&word, Style::plain(color));
            } else {
                styled.push(c, Style::plain(self.mode_color(mode)));
                i += 1;
            }
        }

        Highlighted {
            styled,
            annotations: Vec::new(),
            map,
        }
    }
}

#[cfg(test)]
#[path = "script_tests.rs"]
mod tests;
