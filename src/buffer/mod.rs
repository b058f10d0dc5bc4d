//! The text model: line storage, positions, edits, and undo history.
//!
//! `Buffer` is the central type. It owns a `LineStore`, applies primitive
//! `Edit`s, and keeps per-line lex results fresh by relexing incrementally
//! after each change. `UndoEngine` sits alongside it, replaying recorded
//! inverses through the same edit path.

pub mod document;
pub mod edit;
pub mod error;
pub mod history;
pub mod line_store;
pub mod position;

pub use document::{Buffer, RelexStats};
pub use edit::{AppliedEdit, Edit};
pub use error::EditError;
pub use history::{Transaction, UndoEngine};
pub use line_store::{Line, LineStore};
pub use position::{Position, Range};
