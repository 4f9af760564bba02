//! Click-to-source navigation.
//!
//! A click in the rendered output resolves, through the output
//! highlighter's annotations, to a line and column in the original script
//! text, clamped to what the script actually contains.

use crate::transform::OutputHighlighter;

/// Where the edit cursor should land, in original-script coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorTarget {
    /// 0-based line index, clamped into the script's lines.
    pub line: usize,
    /// 0-based column, clamped into the target line's length.
    pub column: usize,
    /// Flat character offset into the script text.
    pub offset: usize,
}

/// Clamp `(line, column)` into `script` and compute the flat offset
/// (preceding line lengths plus one per newline, plus the column).
pub fn resolve(script: &str, line: usize, column: usize) -> CursorTarget {
    let lines: Vec<&str> = script.split('\n').collect();
    let line = line.min(lines.len() - 1);
    let column = column.min(lines[line].chars().count());
    let offset = lines[..line]
        .iter()
        .map(|l| l.chars().count() + 1)
        .sum::<usize>()
        + column;
    CursorTarget {
        line,
        column,
        offset,
    }
}

/// Resolve a click at `offset` in the rendered output, or `None` when it
/// hits no location reference.
pub fn click(
    output: &OutputHighlighter,
    output_text: &str,
    offset: usize,
    script: &str,
) -> Option<CursorTarget> {
    let (line, column) = output.lookup(output_text, offset)?;
    Some(resolve(script, line, column))
}
