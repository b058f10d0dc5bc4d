//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use quill::buffer::Position;
use quill::commands::Command;
use quill::editor::Editor;
use quill::syntax::LanguageId;

/// Create an editor over the given text with the cursor at `line:column`.
pub fn test_editor(text: &str, line: usize, column: usize) -> Editor {
    test_editor_with_language(text, line, column, LanguageId::Rust)
}

pub fn test_editor_with_language(
    text: &str,
    line: usize,
    column: usize,
    language: LanguageId,
) -> Editor {
    let mut editor = Editor::from_text(text, language);
    move_cursor_to(&mut editor, line, column);
    editor
}

/// Walk the cursor to a position using movement commands only.
pub fn move_cursor_to(editor: &mut Editor, line: usize, column: usize) {
    editor
        .submit(Command::MoveDocumentStart { extend: false })
        .unwrap();
    for _ in 0..line {
        editor.submit(Command::MoveDown { extend: false }).unwrap();
    }
    editor
        .submit(Command::MoveLineStart { extend: false })
        .unwrap();
    for _ in 0..column {
        editor.submit(Command::MoveRight { extend: false }).unwrap();
    }
    assert_eq!(editor.cursor(), Position::new(line, column));
}

/// Extend the selection from the current cursor to `line:column`.
pub fn select_to(editor: &mut Editor, line: usize, column: usize) {
    let target = Position::new(line, column);
    while editor.cursor() < target {
        editor.submit(Command::MoveRight { extend: true }).unwrap();
    }
    while editor.cursor() > target {
        editor.submit(Command::MoveLeft { extend: true }).unwrap();
    }
    assert_eq!(editor.cursor(), target);
}

/// Run a sequence of commands, failing the test on any error.
pub fn run(editor: &mut Editor, commands: &[Command]) {
    for command in commands {
        editor.submit(command.clone()).unwrap();
    }
}

/// Buffer contents as a single string.
pub fn text(editor: &Editor) -> String {
    editor.buffer().text()
}
