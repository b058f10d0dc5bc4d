//! The editing command vocabulary.
//!
//! Commands are the only way callers mutate an editor: each one maps to
//! cursor motion, a transaction of primitive edits, or an undo/redo
//! replay. Boundary cases (backspace at the document start, motion past
//! an edge) are absorbed as no-ops rather than errors.

/// A single user-level editing action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Text entry
    InsertChar(char),
    InsertText(String),
    InsertNewline,

    // Deletion
    Backspace,
    DeleteForward,
    DeleteWordBack,
    DeleteWordForward,

    // Cursor motion. `extend` grows the selection instead of collapsing it.
    MoveLeft { extend: bool },
    MoveRight { extend: bool },
    MoveUp { extend: bool },
    MoveDown { extend: bool },
    MoveWordLeft { extend: bool },
    MoveWordRight { extend: bool },
    MoveLineStart { extend: bool },
    MoveLineEnd { extend: bool },
    MoveDocumentStart { extend: bool },
    MoveDocumentEnd { extend: bool },
    SelectAll,

    // History
    Undo,
    Redo,
}

impl Command {
    /// Short name for log output
    pub fn label(&self) -> &'static str {
        match self {
            Self::InsertChar(_) => "insert-char",
            Self::InsertText(_) => "insert-text",
            Self::InsertNewline => "insert-newline",
            Self::Backspace => "backspace",
            Self::DeleteForward => "delete-forward",
            Self::DeleteWordBack => "delete-word-back",
            Self::DeleteWordForward => "delete-word-forward",
            Self::MoveLeft { .. } => "move-left",
            Self::MoveRight { .. } => "move-right",
            Self::MoveUp { .. } => "move-up",
            Self::MoveDown { .. } => "move-down",
            Self::MoveWordLeft { .. } => "move-word-left",
            Self::MoveWordRight { .. } => "move-word-right",
            Self::MoveLineStart { .. } => "move-line-start",
            Self::MoveLineEnd { .. } => "move-line-end",
            Self::MoveDocumentStart { .. } => "move-document-start",
            Self::MoveDocumentEnd { .. } => "move-document-end",
            Self::SelectAll => "select-all",
            Self::Undo => "undo",
            Self::Redo => "redo",
        }
    }

    /// Whether this command can change buffer contents.
    pub fn is_edit(&self) -> bool {
        matches!(
            self,
            Self::InsertChar(_)
                | Self::InsertText(_)
                | Self::InsertNewline
                | Self::Backspace
                | Self::DeleteForward
                | Self::DeleteWordBack
                | Self::DeleteWordForward
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_edit_splits_mutation_from_motion() {
        assert!(Command::InsertChar('x').is_edit());
        assert!(Command::Backspace.is_edit());
        assert!(!Command::MoveLeft { extend: false }.is_edit());
        assert!(!Command::SelectAll.is_edit());
        assert!(!Command::Undo.is_edit());
    }
}
