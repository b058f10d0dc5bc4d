//! Token and lexer state types.
//!
//! Tokens are relative to a single line and never span line breaks;
//! multi-line constructs (block comments, unterminated strings) are carried
//! across lines through [`LexState`] instead.

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Number,
    String,
    Comment,
    Operator,
    Punctuation,
    /// Input no rule matched. The lexer emits these and keeps going;
    /// they are data, not failures.
    Unknown,
}

/// A single token within one line: category, start column, and length,
/// all in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Start column (0-indexed, inclusive)
    pub start: usize,
    /// Length in characters
    pub len: usize,
}

impl Token {
    pub const fn new(kind: TokenKind, start: usize, len: usize) -> Self {
        Self { kind, start, len }
    }

    /// End column (exclusive)
    pub const fn end(&self) -> usize {
        self.start + self.len
    }
}

/// The lexer's mode at a line boundary.
///
/// A line's lex begins in the previous line's exit state; line 0 always
/// begins in `Default`. Comparing the recomputed exit state with the cached
/// one is what bounds incremental relexing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LexState {
    /// Ordinary code
    #[default]
    Default,
    /// Inside a block comment whose closer has not been seen yet
    InBlockComment,
    /// Inside a string opened with `quote` and not yet terminated
    InString { quote: char },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_end() {
        let tok = Token::new(TokenKind::Keyword, 4, 2);
        assert_eq!(tok.end(), 6);
    }

    #[test]
    fn test_lex_state_default() {
        assert_eq!(LexState::default(), LexState::Default);
    }

    #[test]
    fn test_lex_state_equality_includes_quote() {
        let single = LexState::InString { quote: '\'' };
        let double = LexState::InString { quote: '"' };
        assert_ne!(single, double);
        assert_eq!(double, LexState::InString { quote: '"' });
    }
}
