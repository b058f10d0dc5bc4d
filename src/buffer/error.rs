//! Error types for buffer mutation and inspection.

use super::position::Position;

/// Errors produced by line store and buffer operations.
///
/// `OutOfRange` means an index or position argument fell outside the valid
/// bounds of the current document; the operation performed no mutation.
/// `MalformedEdit` covers structurally invalid arguments: a range whose
/// endpoints are out of order, or an edit whose inverse cannot be computed.
/// It should never occur for edits derived from prior successful operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// A line index outside `[0, line_count())` (or `[0, line_count()]` for inserts).
    LineOutOfRange { index: usize, line_count: usize },
    /// A position whose column exceeds the length of its line.
    PositionOutOfRange { position: Position, line_len: usize },
    /// An inverted range, or an edit whose inverse could not be computed.
    MalformedEdit(String),
}

impl std::fmt::Display for EditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LineOutOfRange { index, line_count } => {
                write!(f, "line {} out of range (document has {})", index, line_count)
            }
            Self::PositionOutOfRange { position, line_len } => {
                write!(
                    f,
                    "position {} out of range (line is {} chars)",
                    position, line_len
                )
            }
            Self::MalformedEdit(msg) => write!(f, "malformed edit: {}", msg),
        }
    }
}

impl std::error::Error for EditError {}
