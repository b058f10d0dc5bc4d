//! Undo/redo tests - transaction grouping, inverse application, stack rules

mod common;

use common::{run, select_to, test_editor, text};
use quill::buffer::Position;
use quill::commands::Command;

// ========================================================================
// Basic undo/redo
// ========================================================================

#[test]
fn test_undo_single_insert() {
    let mut editor = test_editor("hello", 0, 5);
    run(&mut editor, &[Command::InsertChar('!'), Command::Undo]);

    assert_eq!(text(&editor), "hello");
    assert_eq!(editor.cursor(), Position::new(0, 5));
}

#[test]
fn test_redo_single_insert() {
    let mut editor = test_editor("hello", 0, 5);
    run(
        &mut editor,
        &[Command::InsertChar('!'), Command::Undo, Command::Redo],
    );

    assert_eq!(text(&editor), "hello!");
    assert_eq!(editor.cursor(), Position::new(0, 6));
}

#[test]
fn test_undo_on_empty_history_is_noop() {
    let mut editor = test_editor("hello", 0, 0);
    run(&mut editor, &[Command::Undo]);
    assert_eq!(text(&editor), "hello");
}

#[test]
fn test_redo_on_empty_future_is_noop() {
    let mut editor = test_editor("hello", 0, 0);
    run(&mut editor, &[Command::Redo]);
    assert_eq!(text(&editor), "hello");
}

#[test]
fn test_undo_delete_restores_text() {
    let mut editor = test_editor("hello world", 0, 11);
    run(
        &mut editor,
        &[Command::DeleteWordBack, Command::Undo],
    );

    assert_eq!(text(&editor), "hello world");
}

#[test]
fn test_undo_newline_restores_single_line() {
    let mut editor = test_editor("hello", 0, 2);
    run(&mut editor, &[Command::InsertNewline, Command::Undo]);

    assert_eq!(text(&editor), "hello");
    assert_eq!(editor.buffer().line_count(), 1);
}

// ========================================================================
// Transaction grouping
// ========================================================================

#[test]
fn test_selection_replacement_undoes_as_one_step() {
    // Replacing a selection records a delete and an insert in one
    // transaction; a single undo reverts both.
    let mut editor = test_editor("hello world", 0, 0);
    select_to(&mut editor, 0, 5);
    run(
        &mut editor,
        &[Command::InsertText("goodbye".to_string()), Command::Undo],
    );

    assert_eq!(text(&editor), "hello world");
}

#[test]
fn test_selection_replacement_redoes_as_one_step() {
    let mut editor = test_editor("hello world", 0, 0);
    select_to(&mut editor, 0, 5);
    run(
        &mut editor,
        &[
            Command::InsertText("goodbye".to_string()),
            Command::Undo,
            Command::Redo,
        ],
    );

    assert_eq!(text(&editor), "goodbye world");
}

// ========================================================================
// Stack rules
// ========================================================================

#[test]
fn test_new_edit_clears_redo() {
    let mut editor = test_editor("", 0, 0);
    run(
        &mut editor,
        &[
            Command::InsertChar('a'),
            Command::InsertChar('b'),
            Command::Undo,
            Command::InsertChar('c'),
        ],
    );

    assert_eq!(text(&editor), "ac");
    assert!(!editor.can_redo());
    run(&mut editor, &[Command::Redo]);
    assert_eq!(text(&editor), "ac");
}

#[test]
fn test_undo_sequence_walks_back_in_order() {
    let mut editor = test_editor("", 0, 0);
    run(
        &mut editor,
        &[
            Command::InsertChar('a'),
            Command::InsertChar('b'),
            Command::InsertChar('c'),
        ],
    );
    assert_eq!(text(&editor), "abc");

    run(&mut editor, &[Command::Undo]);
    assert_eq!(text(&editor), "ab");
    run(&mut editor, &[Command::Undo]);
    assert_eq!(text(&editor), "a");
    run(&mut editor, &[Command::Undo]);
    assert_eq!(text(&editor), "");
}

#[test]
fn test_boundary_noops_do_not_pollute_history() {
    let mut editor = test_editor("ab", 0, 0);
    run(
        &mut editor,
        &[
            Command::InsertChar('x'),
            // At 0:1 after... move home, backspace at document start
            Command::MoveDocumentStart { extend: false },
            Command::Backspace,
            Command::Undo,
        ],
    );

    // The no-op backspace left nothing on the stack, so undo reverts
    // the insert.
    assert_eq!(text(&editor), "ab");
}

// ========================================================================
// Round trips
// ========================================================================

#[test]
fn test_full_session_round_trip() {
    let original = "fn main() {\n    println!(\"hi\");\n}";
    let mut editor = test_editor(original, 0, 0);

    run(
        &mut editor,
        &[
            Command::MoveLineEnd { extend: false },
            Command::InsertText(" // entry".to_string()),
            Command::MoveDown { extend: false },
            Command::DeleteWordForward,
        ],
    );
    let edited = text(&editor);
    assert_ne!(edited, original);

    run(&mut editor, &[Command::Undo, Command::Undo]);
    assert_eq!(text(&editor), original);

    run(&mut editor, &[Command::Redo, Command::Redo]);
    assert_eq!(text(&editor), edited);
}

#[test]
fn test_undo_preserves_highlighting_consistency() {
    // After undoing an edit that opened a block comment, tokens must
    // match a fresh lex of the restored text.
    let source = "let a = 1;\nlet b = 2;";
    let mut editor = test_editor(source, 0, 0);
    run(
        &mut editor,
        &[Command::InsertText("/* ".to_string()), Command::Undo],
    );

    let fresh = quill::buffer::Buffer::from_text(source, quill::syntax::LanguageId::Rust);
    for line in 0..editor.buffer().line_count() {
        assert_eq!(
            editor.buffer().tokens(line).unwrap(),
            fresh.tokens(line).unwrap(),
            "token mismatch on line {}",
            line
        );
    }
}
