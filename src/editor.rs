//! Editor state: a buffer plus cursor, selection, and undo history,
//! driven entirely through [`Command`]s.

use crate::buffer::{Buffer, Edit, EditError, Position, Range, UndoEngine};
use crate::commands::Command;
use crate::syntax::LanguageId;
use crate::util::text::{word_end_after, word_start_before};

/// A cursor position with a remembered column for vertical movement.
///
/// `desired_column` survives moves through short lines so that moving
/// down past a short line and back recovers the original column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub line: usize,
    pub column: usize,
    desired_column: Option<usize>,
}

impl Cursor {
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            line,
            column,
            desired_column: None,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn set(&mut self, position: Position) {
        self.line = position.line;
        self.column = position.column;
        self.desired_column = None;
    }
}

/// An anchor/head pair. The anchor stays where the selection started;
/// the head follows the cursor. Empty when the two coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Position,
    pub head: Position,
}

impl Selection {
    pub fn collapsed(position: Position) -> Self {
        Self {
            anchor: position,
            head: position,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    /// The selection as a normalized range.
    pub fn range(&self) -> Range {
        Range::new(self.anchor, self.head)
    }
}

/// A single-cursor editor over one buffer.
#[derive(Debug)]
pub struct Editor {
    buffer: Buffer,
    history: UndoEngine,
    cursor: Cursor,
    selection: Selection,
}

impl Editor {
    pub fn new(language: LanguageId) -> Self {
        Self::with_buffer(Buffer::with_language(language))
    }

    pub fn from_text(text: &str, language: LanguageId) -> Self {
        Self::with_buffer(Buffer::from_text(text, language))
    }

    fn with_buffer(buffer: Buffer) -> Self {
        Self {
            buffer,
            history: UndoEngine::new(),
            cursor: Cursor::new(0, 0),
            selection: Selection::collapsed(Position::zero()),
        }
    }

    /// Cap the undo history depth (oldest transactions are evicted).
    pub fn set_undo_limit(&mut self, limit: usize) {
        self.history = UndoEngine::with_max_depth(limit);
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn cursor(&self) -> Position {
        self.cursor.position()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Execute one command. Motion past a document edge and deletion at a
    /// document edge are no-ops; errors surface only for internal
    /// inconsistencies.
    pub fn submit(&mut self, command: Command) -> Result<(), EditError> {
        tracing::trace!(
            command = command.label(),
            edit = command.is_edit(),
            cursor = %self.cursor.position()
        );
        match command {
            Command::InsertChar(ch) => {
                let mut tmp = [0u8; 4];
                self.insert_str(ch.encode_utf8(&mut tmp))
            }
            Command::InsertText(text) => {
                // Pasted text may carry CRLF; line storage is LF-only.
                self.insert_str(&text.replace("\r\n", "\n"))
            }
            Command::InsertNewline => self.insert_str("\n"),
            Command::Backspace => self.backspace(),
            Command::DeleteForward => self.delete_forward(),
            Command::DeleteWordBack => self.delete_word_back(),
            Command::DeleteWordForward => self.delete_word_forward(),
            Command::MoveLeft { extend } => {
                self.move_left(extend);
                Ok(())
            }
            Command::MoveRight { extend } => {
                self.move_right(extend);
                Ok(())
            }
            Command::MoveUp { extend } => {
                self.move_vertical(-1, extend);
                Ok(())
            }
            Command::MoveDown { extend } => {
                self.move_vertical(1, extend);
                Ok(())
            }
            Command::MoveWordLeft { extend } => self.move_word_left(extend),
            Command::MoveWordRight { extend } => self.move_word_right(extend),
            Command::MoveLineStart { extend } => {
                self.move_to(Position::new(self.cursor.line, 0), extend);
                Ok(())
            }
            Command::MoveLineEnd { extend } => {
                let len = self.buffer.line_len(self.cursor.line)?;
                self.move_to(Position::new(self.cursor.line, len), extend);
                Ok(())
            }
            Command::MoveDocumentStart { extend } => {
                self.move_to(Position::zero(), extend);
                Ok(())
            }
            Command::MoveDocumentEnd { extend } => {
                self.move_to(self.buffer.end_position(), extend);
                Ok(())
            }
            Command::SelectAll => {
                self.selection = Selection {
                    anchor: Position::zero(),
                    head: self.buffer.end_position(),
                };
                self.cursor.set(self.buffer.end_position());
                Ok(())
            }
            Command::Undo => {
                if let Some(position) = self.history.undo(&mut self.buffer) {
                    self.cursor.set(self.clamp(position));
                    self.collapse_selection();
                }
                Ok(())
            }
            Command::Redo => {
                if let Some(position) = self.history.redo(&mut self.buffer) {
                    self.cursor.set(self.clamp(position));
                    self.collapse_selection();
                }
                Ok(())
            }
        }
    }

    // ========================================================================
    // Editing
    // ========================================================================

    fn insert_str(&mut self, text: &str) -> Result<(), EditError> {
        self.history.begin_transaction(self.cursor.position());
        self.delete_selection_if_any()?;
        let edit = Edit::insert(self.cursor.position(), text);
        let applied = self.buffer.apply_edit(&edit)?;
        self.cursor.set(applied.range.end);
        self.history.record_edit(edit, applied.inverse);
        self.finish_edit();
        Ok(())
    }

    fn backspace(&mut self) -> Result<(), EditError> {
        if self.has_selection() {
            return self.delete_selection_transaction();
        }
        let Position { line, column } = self.cursor.position();
        let range = if column > 0 {
            Range::new(Position::new(line, column - 1), self.cursor.position())
        } else if line > 0 {
            let prev_len = self.buffer.line_len(line - 1)?;
            Range::new(Position::new(line - 1, prev_len), self.cursor.position())
        } else {
            return Ok(()); // document start
        };
        self.delete_range_transaction(range)
    }

    fn delete_forward(&mut self) -> Result<(), EditError> {
        if self.has_selection() {
            return self.delete_selection_transaction();
        }
        let Position { line, column } = self.cursor.position();
        let line_len = self.buffer.line_len(line)?;
        let range = if column < line_len {
            Range::new(self.cursor.position(), Position::new(line, column + 1))
        } else if line + 1 < self.buffer.line_count() {
            Range::new(self.cursor.position(), Position::new(line + 1, 0))
        } else {
            return Ok(()); // document end
        };
        self.delete_range_transaction(range)
    }

    fn delete_word_back(&mut self) -> Result<(), EditError> {
        if self.has_selection() {
            return self.delete_selection_transaction();
        }
        let Position { line, column } = self.cursor.position();
        if column == 0 {
            return self.backspace(); // joins with the previous line
        }
        let text = self.buffer.line_text(line)?.to_string();
        let start = word_start_before(&text, column);
        self.delete_range_transaction(Range::new(
            Position::new(line, start),
            self.cursor.position(),
        ))
    }

    fn delete_word_forward(&mut self) -> Result<(), EditError> {
        if self.has_selection() {
            return self.delete_selection_transaction();
        }
        let Position { line, column } = self.cursor.position();
        let text = self.buffer.line_text(line)?.to_string();
        let end = word_end_after(&text, column);
        if end == column {
            return self.delete_forward(); // at line end, joins forward
        }
        self.delete_range_transaction(Range::new(self.cursor.position(), Position::new(line, end)))
    }

    fn delete_selection_transaction(&mut self) -> Result<(), EditError> {
        self.history.begin_transaction(self.cursor.position());
        self.delete_selection_if_any()?;
        self.finish_edit();
        Ok(())
    }

    fn delete_range_transaction(&mut self, range: Range) -> Result<(), EditError> {
        self.history.begin_transaction(self.cursor.position());
        let edit = Edit::delete(range);
        let applied = self.buffer.apply_edit(&edit)?;
        self.cursor.set(range.start);
        self.history.record_edit(edit, applied.inverse);
        self.finish_edit();
        Ok(())
    }

    /// Delete the selected text inside an open transaction, moving the
    /// cursor to the selection start. No-op when the selection is empty.
    fn delete_selection_if_any(&mut self) -> Result<(), EditError> {
        if self.selection.is_empty() {
            return Ok(());
        }
        let range = self.selection.range();
        let edit = Edit::delete(range);
        let applied = self.buffer.apply_edit(&edit)?;
        self.cursor.set(range.start);
        self.history.record_edit(edit, applied.inverse);
        Ok(())
    }

    fn finish_edit(&mut self) {
        self.history.commit_transaction(self.cursor.position());
        self.collapse_selection();
    }

    // ========================================================================
    // Movement
    // ========================================================================

    fn move_left(&mut self, extend: bool) {
        if !extend && self.has_selection() {
            let start = self.selection.range().start;
            self.cursor.set(start);
            self.collapse_selection();
            return;
        }
        if self.cursor.column > 0 {
            self.cursor.column -= 1;
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.column = self.line_len_or_zero(self.cursor.line);
        }
        self.cursor.desired_column = None;
        self.after_move(extend);
    }

    fn move_right(&mut self, extend: bool) {
        if !extend && self.has_selection() {
            let end = self.selection.range().end;
            self.cursor.set(end);
            self.collapse_selection();
            return;
        }
        let line_len = self.line_len_or_zero(self.cursor.line);
        if self.cursor.column < line_len {
            self.cursor.column += 1;
        } else if self.cursor.line + 1 < self.buffer.line_count() {
            self.cursor.line += 1;
            self.cursor.column = 0;
        }
        self.cursor.desired_column = None;
        self.after_move(extend);
    }

    fn move_vertical(&mut self, delta: isize, extend: bool) {
        let target_column = self.cursor.desired_column.unwrap_or(self.cursor.column);
        let line = self.cursor.line as isize + delta;
        if line < 0 || line as usize >= self.buffer.line_count() {
            return;
        }
        self.cursor.line = line as usize;
        self.cursor.column = target_column.min(self.line_len_or_zero(self.cursor.line));
        self.cursor.desired_column = Some(target_column);
        self.after_move(extend);
    }

    fn move_word_left(&mut self, extend: bool) -> Result<(), EditError> {
        let Position { line, column } = self.cursor.position();
        if column == 0 {
            // Line start: fall back to a plain left move onto the
            // previous line's end.
            self.move_left(extend);
            return Ok(());
        }
        let text = self.buffer.line_text(line)?.to_string();
        self.cursor.column = word_start_before(&text, column);
        self.cursor.desired_column = None;
        self.after_move(extend);
        Ok(())
    }

    fn move_word_right(&mut self, extend: bool) -> Result<(), EditError> {
        let Position { line, column } = self.cursor.position();
        let text = self.buffer.line_text(line)?.to_string();
        let end = word_end_after(&text, column);
        if end == column {
            self.move_right(extend);
            return Ok(());
        }
        self.cursor.column = end;
        self.cursor.desired_column = None;
        self.after_move(extend);
        Ok(())
    }

    fn move_to(&mut self, position: Position, extend: bool) {
        self.cursor.set(self.clamp(position));
        self.after_move(extend);
    }

    fn after_move(&mut self, extend: bool) {
        if extend {
            self.selection.head = self.cursor.position();
        } else {
            self.collapse_selection();
        }
    }

    fn collapse_selection(&mut self) {
        self.selection = Selection::collapsed(self.cursor.position());
    }

    fn line_len_or_zero(&self, line: usize) -> usize {
        self.buffer.line_len(line).unwrap_or(0)
    }

    /// Clamp a position into the current document bounds. Used for cursor
    /// restore after undo/redo; buffer edits themselves never clamp.
    fn clamp(&self, position: Position) -> Position {
        let line = position.line.min(self.buffer.line_count() - 1);
        let column = position.column.min(self.line_len_or_zero(line));
        Position::new(line, column)
    }
}
