//! Utility modules

pub mod file_validation;
pub mod text;

pub use file_validation::{validate_text_file, FileOpenError, MAX_FILE_SIZE};
pub use text::{classify, word_end_after, word_start_before, CharClass};
