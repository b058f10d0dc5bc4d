//! Per-line maximal-munch lexer.
//!
//! `lex_line` is a pure function from (line text, start state) to (tokens,
//! end state). It is total: malformed input produces `Unknown` tokens, never
//! errors. It never reads any text outside the line it was given — multi-line
//! constructs are threaded through [`LexState`] only, which is what makes
//! incremental relexing possible.

use super::languages::Grammar;
use super::token::{LexState, Token, TokenKind};

/// Characters that can form (and combine into) operator tokens.
fn is_operator_char(ch: char) -> bool {
    matches!(
        ch,
        '+' | '-' | '*' | '/' | '%' | '=' | '<' | '>' | '!' | '&' | '|' | '^' | '~' | '?' | ':'
    )
}

/// Single-character punctuation.
fn is_punctuation_char(ch: char) -> bool {
    matches!(
        ch,
        '(' | ')' | '[' | ']' | '{' | '}' | ',' | ';' | '.' | '#' | '@' | '$' | '\\' | '\'' | '`'
            | '"'
    )
}

fn is_ident_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}

fn is_ident_continue(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Check whether `pat` occurs at `pos` in `chars`.
fn matches_at(chars: &[char], pos: usize, pat: &str) -> bool {
    let mut i = pos;
    for pch in pat.chars() {
        if i >= chars.len() || chars[i] != pch {
            return false;
        }
        i += 1;
    }
    true
}

/// Find the first occurrence of `pat` at or after `from`.
fn find_at_or_after(chars: &[char], from: usize, pat: &str) -> Option<usize> {
    (from..chars.len()).find(|&i| matches_at(chars, i, pat))
}

/// Scan for the closing `quote` starting at `from`, honoring backslash
/// escapes. Returns the index just past the closing quote, or None if the
/// string runs off the end of the line.
fn scan_string_end(chars: &[char], from: usize, quote: char) -> Option<usize> {
    let mut i = from;
    while i < chars.len() {
        if chars[i] == '\\' {
            i += 2;
            continue;
        }
        if chars[i] == quote {
            return Some(i + 1);
        }
        i += 1;
    }
    None
}

/// Lex one line of text.
///
/// `start` is the exit state of the previous line (or `LexState::Default`
/// for line 0). Tokens carry columns relative to this line and never span
/// it; an unterminated construct shows up in the returned end state instead.
pub fn lex_line(text: &str, start: LexState, grammar: &Grammar) -> (Vec<Token>, LexState) {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut state = start;
    let mut i = 0;

    while i < chars.len() {
        match state {
            LexState::InBlockComment => {
                let close = grammar.block_comment.map(|(_, close)| close);
                match close.and_then(|c| find_at_or_after(&chars, i, c)) {
                    Some(pos) => {
                        let end = pos + close.map(|c| c.chars().count()).unwrap_or(0);
                        tokens.push(Token::new(TokenKind::Comment, i, end - i));
                        state = LexState::Default;
                        i = end;
                    }
                    None => {
                        // Still inside the comment at end of line
                        tokens.push(Token::new(TokenKind::Comment, i, chars.len() - i));
                        i = chars.len();
                    }
                }
            }
            LexState::InString { quote } => match scan_string_end(&chars, i, quote) {
                Some(end) => {
                    tokens.push(Token::new(TokenKind::String, i, end - i));
                    state = LexState::Default;
                    i = end;
                }
                None => {
                    tokens.push(Token::new(TokenKind::String, i, chars.len() - i));
                    i = chars.len();
                }
            },
            LexState::Default => {
                let ch = chars[i];

                if ch.is_whitespace() {
                    while i < chars.len() && chars[i].is_whitespace() {
                        i += 1;
                    }
                    continue;
                }

                // Block comment open beats line comment beats everything else
                if let Some((open, close)) = grammar.block_comment {
                    if matches_at(&chars, i, open) {
                        let body_start = i + open.chars().count();
                        match find_at_or_after(&chars, body_start, close) {
                            Some(pos) => {
                                let end = pos + close.chars().count();
                                tokens.push(Token::new(TokenKind::Comment, i, end - i));
                                i = end;
                            }
                            None => {
                                tokens.push(Token::new(TokenKind::Comment, i, chars.len() - i));
                                state = LexState::InBlockComment;
                                i = chars.len();
                            }
                        }
                        continue;
                    }
                }

                if let Some(prefix) = grammar.line_comment {
                    if matches_at(&chars, i, prefix) {
                        tokens.push(Token::new(TokenKind::Comment, i, chars.len() - i));
                        i = chars.len();
                        continue;
                    }
                }

                if grammar.string_quotes.contains(&ch) {
                    match scan_string_end(&chars, i + 1, ch) {
                        Some(end) => {
                            tokens.push(Token::new(TokenKind::String, i, end - i));
                            i = end;
                        }
                        None => {
                            tokens.push(Token::new(TokenKind::String, i, chars.len() - i));
                            state = LexState::InString { quote: ch };
                            i = chars.len();
                        }
                    }
                    continue;
                }

                if ch.is_ascii_digit() {
                    let start_col = i;
                    i += 1;
                    // Covers 1_000, 0xFF, 3.14 without a full numeric grammar
                    while i < chars.len()
                        && (chars[i].is_ascii_alphanumeric() || chars[i] == '_' || chars[i] == '.')
                    {
                        i += 1;
                    }
                    tokens.push(Token::new(TokenKind::Number, start_col, i - start_col));
                    continue;
                }

                if is_ident_start(ch) {
                    let start_col = i;
                    while i < chars.len() && is_ident_continue(chars[i]) {
                        i += 1;
                    }
                    let word: String = chars[start_col..i].iter().collect();
                    let kind = if grammar.keywords.contains(&word.as_str()) {
                        TokenKind::Keyword
                    } else {
                        TokenKind::Identifier
                    };
                    tokens.push(Token::new(kind, start_col, i - start_col));
                    continue;
                }

                if is_operator_char(ch) {
                    let start_col = i;
                    // Munch a run of operator chars, but stop if a comment
                    // opens mid-run ("x+//y" must not eat the slashes)
                    while i < chars.len() && is_operator_char(chars[i]) {
                        let comment_here = grammar
                            .line_comment
                            .map(|p| matches_at(&chars, i, p))
                            .unwrap_or(false)
                            || grammar
                                .block_comment
                                .map(|(open, _)| matches_at(&chars, i, open))
                                .unwrap_or(false);
                        if comment_here && i > start_col {
                            break;
                        }
                        i += 1;
                    }
                    tokens.push(Token::new(TokenKind::Operator, start_col, i - start_col));
                    continue;
                }

                if is_punctuation_char(ch) {
                    tokens.push(Token::new(TokenKind::Punctuation, i, 1));
                    i += 1;
                    continue;
                }

                // Nothing matched; emit an error token and keep going
                tokens.push(Token::new(TokenKind::Unknown, i, 1));
                i += 1;
            }
        }
    }

    (tokens, state)
}
