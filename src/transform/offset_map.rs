//! Bidirectional index translation between original and transformed text.
//!
//! The transformed text is the display form after tab expansion. Every
//! transformed character position carries the index of the original
//! character it came from; a tab collapses four transformed positions onto
//! one original index. All offsets count characters, not bytes.

/// Spaces a tab expands to.
pub const TAB_WIDTH: usize = 4;

/// One entry per transformed character position, giving the corresponding
/// index in the original text. Entries are non-decreasing, which is what
/// makes the reverse query a binary search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetMap {
    to_original: Vec<usize>,
    original_len: usize,
}

impl OffsetMap {
    /// Expand tabs in `original` and build the map alongside. Deterministic,
    /// pure, O(n).
    pub fn expand_tabs(original: &str) -> (String, OffsetMap) {
        let mut transformed = String::with_capacity(original.len());
        let mut to_original = Vec::with_capacity(original.len());
        let mut original_len = 0;
        for (index, c) in original.chars().enumerate() {
            if c == '\t' {
                for _ in 0..TAB_WIDTH {
                    transformed.push(' ');
                    to_original.push(index);
                }
            } else {
                transformed.push(c);
                to_original.push(index);
            }
            original_len = index + 1;
        }
        (
            transformed,
            OffsetMap {
                to_original,
                original_len,
            },
        )
    }

    /// Map a transformed offset back to its original index. Offsets past the
    /// end clamp to the original length; an empty map answers 0.
    pub fn transformed_to_original(&self, offset: usize) -> usize {
        if self.to_original.is_empty() {
            return 0;
        }
        self.to_original
            .get(offset)
            .copied()
            .unwrap_or(self.original_len)
    }

    /// Map an original offset to the first transformed index whose mapped
    /// original index is `>= offset`, or `len()` if none exists.
    pub fn original_to_transformed(&self, offset: usize) -> usize {
        self.to_original.partition_point(|&original| original < offset)
    }

    /// Number of transformed character positions.
    pub fn len(&self) -> usize {
        self.to_original.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_original.is_empty()
    }

    /// Length of the original text in characters.
    pub fn original_len(&self) -> usize {
        self.original_len
    }
}

#[cfg(test)]
#[path = "offset_map_tests.rs"]
mod tests;
