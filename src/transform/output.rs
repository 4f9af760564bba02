//! Highlighting and annotation of process output.
//!
//! Two independent per-line passes: lines starting with the configured
//! error prefix take the error color and an `Error` annotation; substrings
//! matching `<scriptPath>:<line>[:<col>]` become underlined `Url`
//! annotations. A line can carry both, with the link underline overlaying
//! the error coloring for the matched span.

use regex::Regex;
use std::path::Path;

use super::{Annotation, AnnotationTag, Highlight, Highlighted, OffsetMap, Style, StyledText};
use crate::color::Color;

/// Highlighter for the output pane. The location pattern matches the exact
/// configured script path (regex-escaped, not a glob), a 1-based line and
/// an optional 0-based column.
pub struct OutputHighlighter {
    default_color: Color,
    error_color: Color,
    error_prefix: String,
    location: Regex,
}

impl OutputHighlighter {
    pub fn new(
        default_color: Color,
        error_color: Color,
        error_prefix: impl Into<String>,
        script_path: &Path,
    ) -> Self {
        let pattern = format!(
            r"{}:(\d+)(?::(\d+))?",
            regex::escape(&script_path.display().to_string())
        );
        OutputHighlighter {
            default_color,
            error_color,
            error_prefix: error_prefix.into(),
            // The pattern is an escaped literal plus a fixed tail.
            location: Regex::new(&pattern).expect("location pattern is valid"),
        }
    }

    /// Resolve a click at `offset` (transformed coordinates) in `text` to a
    /// 0-based script line and column. The annotation payload is re-parsed
    /// against the same location pattern; a reference whose line number is
    /// 0 or unparsable is treated as no match.
    pub fn lookup(&self, text: &str, offset: usize) -> Option<(usize, usize)> {
        let highlighted = self.highlight(text);
        let annotation = highlighted.annotation_at(AnnotationTag::Url, offset)?;
        let captures = self.location.captures(&annotation.payload)?;
        let line: usize = captures[1].parse().ok()?;
        if line == 0 {
            return None;
        }
        let column = captures
            .get(2)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0);
        Some((line - 1, column))
    }
}

impl Highlight for OutputHighlighter {
    fn highlight(&self, text: &str) -> Highlighted {
        let (transformed, map) = OffsetMap::expand_tabs(text);
        let mut styled = StyledText::with_capacity(transformed.len());
        let mut annotations = Vec::new();

        // Character offset of the current line in the transformed text.
        let mut cursor = 0;
        let mut first = true;
        for line in transformed.split('\n') {
            if !first {
                styled.push('\n', Style::plain(self.default_color));
                cursor += 1;
            }
            first = false;

            let chars: Vec<char> = line.chars().collect();
            let is_error = !self.error_prefix.is_empty() && line.starts_with(&self.error_prefix);
            let base = if is_error {
                self.error_color
            } else {
                self.default_color
            };
            let mut styles = vec![Style::plain(base); chars.len()];
            if is_error {
                annotations.push(Annotation {
                    tag: AnnotationTag::Error,
                    range: cursor..cursor + chars.len(),
                    payload: line.to_string(),
                });
            }

            for m in self.location.find_iter(line) {
                let start = line[..m.start()].chars().count();
                let end = start + m.as_str().chars().count();
                for style in &mut styles[start..end] {
                    style.underline = true;
                }
                annotations.push(Annotation {
                    tag: AnnotationTag::Url,
                    range: cursor + start..cursor + end,
                    payload: m.as_str().to_string(),
                });
            }

            for (c, style) in chars.iter().zip(styles) {
                styled.push(*c, style);
            }
            cursor += chars.len();
        }

        Highlighted {
            styled,
            annotations,
            map,
        }
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
