//! Primitive edit operations.
//!
//! Every higher-level editing command decomposes into a sequence of these
//! two variants. Keeping the set closed is what makes exact inverses (and
//! therefore undo) cheap to compute: the inverse of an insert is a delete of
//! the inserted span, and the inverse of a delete is an insert of the
//! removed text.

use super::position::{Position, Range};

/// A primitive, reversible operation against the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Insert `text` at `position`. Line breaks must be `\n`; callers
    /// normalize CRLF before constructing the edit.
    Insert { position: Position, text: String },
    /// Remove everything inside `range`.
    Delete { range: Range },
}

impl Edit {
    /// Create an insert edit
    pub fn insert(position: Position, text: impl Into<String>) -> Self {
        Self::Insert {
            position,
            text: text.into(),
        }
    }

    /// Create a delete edit
    pub fn delete(range: Range) -> Self {
        Self::Delete { range }
    }

    /// The position at which the edit begins
    pub fn start(&self) -> Position {
        match self {
            Self::Insert { position, .. } => *position,
            Self::Delete { range } => range.start,
        }
    }
}

/// The result of successfully applying an [`Edit`] to a buffer: the range
/// the applied text now occupies, and the edit that exactly reverses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedEdit {
    /// For inserts, the span the new text occupies; for deletes, the
    /// collapsed range at the deletion point.
    pub range: Range,
    /// Applying this restores the buffer text to its prior value.
    pub inverse: Edit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_constructors() {
        let ins = Edit::insert(Position::new(0, 3), "def");
        assert_eq!(ins.start(), Position::new(0, 3));

        let del = Edit::delete(Range::new(Position::new(0, 3), Position::new(0, 6)));
        assert_eq!(del.start(), Position::new(0, 3));
    }
}
