//! Incremental lexing for syntax highlighting.
//!
//! The lexer works strictly line-at-a-time: [`lex_line`] maps one line plus
//! the previous line's exit [`LexState`] to that line's tokens and its own
//! exit state. The buffer threads exit states from line to line, which is
//! how block comments and unterminated strings highlight correctly without
//! any token ever crossing a line break.

mod languages;
mod lexer;
mod token;

pub use languages::{Grammar, LanguageId};
pub use lexer::lex_line;
pub use token::{LexState, Token, TokenKind};
