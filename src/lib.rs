//! Quill - a text buffer engine with incremental syntax highlighting
//!
//! This crate provides the core types of a desktop editor backend: a
//! line-based buffer with per-line token caches, an incremental lexer,
//! transactional undo/redo, and a command layer driving a cursor and
//! selection over the buffer.

pub mod buffer;
pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod editor;
pub mod syntax;
pub mod tracing;
pub mod util;

// Re-export commonly used types
pub use buffer::{Buffer, Edit, EditError, Position, Range, UndoEngine};
pub use commands::Command;
pub use config::EditorConfig;
pub use editor::Editor;
pub use syntax::{LanguageId, LexState, Token, TokenKind};
