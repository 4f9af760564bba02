//! The text transformation engine.
//!
//! Everything the tool renders goes through one of two transformations:
//! [`ScriptHighlighter`] for the editor pane and [`OutputHighlighter`] for
//! the process-output pane. Both expand tabs through [`OffsetMap`] and
//! produce styled spans over the transformed text, so style coordinates and
//! click coordinates always live in transformed space while edits stay in
//! original space.
//!
//! Transformations are stateless pure functions over a text snapshot: every
//! call recomputes from scratch, there is no incremental patching and no
//! shared derived state to lock.

mod offset_map;
mod output;
mod script;

pub use offset_map::{OffsetMap, TAB_WIDTH};
pub use output::OutputHighlighter;
pub use script::ScriptHighlighter;

use crate::color::Color;
use std::ops::Range;

/// Display style for a run of transformed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub color: Color,
    pub underline: bool,
}

impl Style {
    pub const fn plain(color: Color) -> Self {
        Style {
            color,
            underline: false,
        }
    }
}

/// A contiguous styled run. Ranges are character offsets into the
/// transformed text; the spans of a [`StyledText`] cover it gaplessly in
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub range: Range<usize>,
    pub style: Style,
}

/// Transformed text plus its styled runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledText {
    pub text: String,
    pub spans: Vec<StyledSpan>,
}

impl StyledText {
    pub fn with_capacity(capacity: usize) -> Self {
        StyledText {
            text: String::with_capacity(capacity),
            spans: Vec::new(),
        }
    }

    /// Append one character, extending the last span when the style matches.
    pub fn push(&mut self, c: char, style: Style) {
        self.text.push(c);
        match self.spans.last_mut() {
            Some(last) if last.style == style => last.range.end += 1,
            _ => {
                let start = self.char_len();
                self.spans.push(StyledSpan {
                    range: start..start + 1,
                    style,
                });
            }
        }
    }

    pub fn push_str(&mut self, s: &str, style: Style) {
        for c in s.chars() {
            self.push(c, style);
        }
    }

    /// Style at a transformed character offset, if any text is there.
    pub fn style_at(&self, offset: usize) -> Option<Style> {
        let index = self
            .spans
            .partition_point(|span| span.range.end <= offset);
        self.spans
            .get(index)
            .filter(|span| span.range.contains(&offset))
            .map(|span| span.style)
    }

    /// Length in characters (spans are char-indexed, text is a UTF-8 string).
    pub fn char_len(&self) -> usize {
        self.spans.last().map_or(0, |span| span.range.end)
    }
}

/// Classification attached to a range of transformed output text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationTag {
    /// The whole line matched the configured error prefix.
    Error,
    /// The range is a clickable `path:line[:col]` location reference.
    Url,
}

/// A tagged range over transformed text carrying navigation or
/// classification metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub tag: AnnotationTag,
    pub range: Range<usize>,
    /// The error line text, or the matched location reference.
    pub payload: String,
}

/// Result of one transformation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighted {
    pub styled: StyledText,
    pub annotations: Vec<Annotation>,
    pub map: OffsetMap,
}

impl Highlighted {
    /// Annotations with the given tag whose range contains `offset`.
    pub fn annotation_at(&self, tag: AnnotationTag, offset: usize) -> Option<&Annotation> {
        self.annotations
            .iter()
            .find(|a| a.tag == tag && a.range.contains(&offset))
    }
}

/// The one capability both panes need: transform a text snapshot into
/// styled, annotated display text plus the offset map back to the original.
/// The closed set of implementors is [`ScriptHighlighter`] and
/// [`OutputHighlighter`]; callers pick one explicitly.
pub trait Highlight {
    fn highlight(&self, text: &str) -> Highlighted;
}
