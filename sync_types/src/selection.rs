//! Selection ranges carried alongside text in both directions

use serde::{Deserialize, Serialize};
use std::fmt;

/// A selection range within a surface's text, in character offsets
///
/// `start == end` is a bare caret. Offsets are interpreted by the surface
/// that owns the text; this type never inspects the text itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Offset of the selection start
    pub start: usize,
    /// Offset of the selection end
    pub end: usize,
}

impl Selection {
    /// Creates a selection spanning `start..end`
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Creates a collapsed selection (a caret) at `offset`
    pub fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Checks whether the selection is collapsed to a caret
    pub fn is_caret(&self) -> bool {
        self.start == self.end
    }

    /// Returns the selection length in characters
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Checks whether the selection covers no characters
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::caret(0)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{}]", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caret_is_collapsed() {
        let sel = Selection::caret(5);
        assert!(sel.is_caret());
        assert!(sel.is_empty());
        assert_eq!(sel.start, 5);
        assert_eq!(sel.end, 5);
    }

    #[test]
    fn test_range_length() {
        let sel = Selection::new(2, 7);
        assert!(!sel.is_caret());
        assert_eq!(sel.len(), 5);
    }

    #[test]
    fn test_inverted_range_saturates() {
        // A host handing us end < start should not underflow.
        let sel = Selection::new(7, 2);
        assert_eq!(sel.len(), 0);
        assert!(sel.is_empty());
    }

    #[test]
    fn test_serialization_shape() {
        let sel = Selection::new(1, 4);
        let json = serde_json::to_value(&sel).unwrap();
        assert_eq!(json["start"], 1);
        assert_eq!(json["end"], 4);
    }
}
