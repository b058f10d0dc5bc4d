//! Incremental lexing tests - relex propagation and convergence

mod common;

use quill::buffer::{Buffer, Edit, Position, Range};
use quill::syntax::{LanguageId, LexState, TokenKind};

fn rust_buffer(text: &str) -> Buffer {
    Buffer::from_text(text, LanguageId::Rust)
}

/// Every line's cached tokens must equal what a from-scratch lex of the
/// current text produces.
fn assert_matches_fresh_lex(buffer: &Buffer) {
    let fresh = Buffer::from_text(&buffer.text(), buffer.language());
    for line in 0..buffer.line_count() {
        assert_eq!(
            buffer.tokens(line).unwrap(),
            fresh.tokens(line).unwrap(),
            "cached tokens diverge from fresh lex on line {}",
            line
        );
        assert_eq!(
            buffer.end_state(line).unwrap(),
            fresh.end_state(line).unwrap(),
            "cached end state diverges on line {}",
            line
        );
    }
}

// ========================================================================
// State propagation
// ========================================================================

#[test]
fn test_block_comment_open_propagates_to_end() {
    let mut buffer = rust_buffer("let a = 1;\nlet b = 2;\nlet c = 3;");
    buffer
        .apply_edit(&Edit::insert(Position::new(0, 0), "/* "))
        .unwrap();

    for line in 0..3 {
        assert_eq!(
            buffer.end_state(line).unwrap(),
            LexState::InBlockComment,
            "line {} should carry the comment state",
            line
        );
        let tokens = buffer.tokens(line).unwrap();
        assert!(
            tokens.iter().all(|t| t.kind == TokenKind::Comment),
            "line {} should lex entirely as comment",
            line
        );
    }
    assert_matches_fresh_lex(&buffer);
}

#[test]
fn test_block_comment_close_restores_following_lines() {
    let mut buffer = rust_buffer("/* one\ntwo\nthree\nlet x = 1;");
    assert_eq!(buffer.end_state(3).unwrap(), LexState::InBlockComment);

    // Close the comment on line 1; lines 2..3 must relex back to code.
    buffer
        .apply_edit(&Edit::insert(Position::new(1, 3), " */"))
        .unwrap();

    assert_eq!(buffer.end_state(1).unwrap(), LexState::Default);
    assert_eq!(buffer.end_state(3).unwrap(), LexState::Default);
    let kinds: Vec<TokenKind> = buffer
        .tokens(3)
        .unwrap()
        .iter()
        .map(|t| t.kind)
        .collect();
    assert!(kinds.contains(&TokenKind::Keyword)); // "let" is code again
    assert_matches_fresh_lex(&buffer);
}

#[test]
fn test_unterminated_string_state_carries_over() {
    let mut buffer = rust_buffer("let s = ;\nnext line");
    buffer
        .apply_edit(&Edit::insert(Position::new(0, 8), "\"oops"))
        .unwrap();

    assert_eq!(
        buffer.end_state(0).unwrap(),
        LexState::InString { quote: '"' }
    );
    assert_matches_fresh_lex(&buffer);
}

// ========================================================================
// Propagation boundedness
// ========================================================================

#[test]
fn test_local_edit_relexes_single_line() {
    let lines: Vec<String> = (0..100).map(|i| format!("let x{} = {};", i, i)).collect();
    let mut buffer = rust_buffer(&lines.join("\n"));

    buffer
        .apply_edit(&Edit::insert(Position::new(50, 0), "y"))
        .unwrap();

    let stats = buffer.last_relex_stats();
    assert_eq!(stats.lines_relexed, 1);
    assert!(!stats.reached_end);
    assert_matches_fresh_lex(&buffer);
}

#[test]
fn test_propagation_stops_at_existing_comment_boundary() {
    // Lines 2.. are already inside an unrelated block comment that opens
    // on line 1. Editing line 0 must not cascade past line 1.
    let mut buffer = rust_buffer("let a = 1;\n/* open\nstill\nstill");
    buffer
        .apply_edit(&Edit::insert(Position::new(0, 0), "x"))
        .unwrap();

    let stats = buffer.last_relex_stats();
    assert!(stats.lines_relexed <= 2);
    assert_matches_fresh_lex(&buffer);
}

// ========================================================================
// Structural edits
// ========================================================================

#[test]
fn test_multiline_delete_relexes_merged_line() {
    let mut buffer = rust_buffer("let a /* = 1;\nmiddle\nend */ ;");
    // Delete from inside the comment opener through the closer.
    buffer
        .apply_edit(&Edit::delete(Range::new(
            Position::new(0, 6),
            Position::new(2, 6),
        )))
        .unwrap();

    assert_eq!(buffer.text(), "let a  ;");
    assert_eq!(buffer.end_state(0).unwrap(), LexState::Default);
    assert_matches_fresh_lex(&buffer);
}

#[test]
fn test_newline_split_inside_comment() {
    let mut buffer = rust_buffer("/* abc */ let x = 1;");
    buffer
        .apply_edit(&Edit::insert(Position::new(0, 5), "\n"))
        .unwrap();

    // The split leaves line 0 with an unterminated opener.
    assert_eq!(buffer.end_state(0).unwrap(), LexState::InBlockComment);
    assert_matches_fresh_lex(&buffer);
}

#[test]
fn test_language_switch_relexes_whole_buffer() {
    let mut buffer = rust_buffer("# comment in python\nx = 1");
    // Under the Rust grammar '#' is not a comment opener.
    assert_ne!(buffer.tokens(0).unwrap()[0].kind, TokenKind::Comment);

    buffer.set_language(LanguageId::Python);
    assert_eq!(buffer.tokens(0).unwrap()[0].kind, TokenKind::Comment);
    let stats = buffer.last_relex_stats();
    assert_eq!(stats.lines_relexed, buffer.line_count());
    assert_matches_fresh_lex(&buffer);
}

// ========================================================================
// Convergence under edit sequences
// ========================================================================

#[test]
fn test_random_edit_sequence_converges() {
    let mut buffer = rust_buffer("fn main() {\n    let s = \"abc\";\n}");
    let edits = [
        Edit::insert(Position::new(1, 4), "/* "),
        Edit::insert(Position::new(2, 0), "let y = 2;\n"),
        Edit::delete(Range::new(Position::new(1, 4), Position::new(1, 7))),
        Edit::insert(Position::new(0, 11), "\n"),
        Edit::delete(Range::new(Position::new(0, 0), Position::new(1, 0))),
    ];

    for edit in edits {
        buffer.apply_edit(&edit).unwrap();
        assert_matches_fresh_lex(&buffer);
    }
}
