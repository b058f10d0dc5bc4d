//! Line-oriented document storage.
//!
//! The document is held as an ordered sequence of [`Line`]s. Each line owns
//! its text plus the cached lexer artifacts for that line: its tokens and
//! the state the lexer exits the line in. Lines have no stable identity —
//! they are addressed purely by index, which shifts when lines are inserted
//! or deleted above.

use crate::syntax::{LexState, Token};

use super::error::EditError;
use super::position::Position;

/// One line of the document with its cached lex results.
///
/// `dirty` means the cached tokens/end state may not reflect the current
/// text (or the previous line's end state) and the line must be relexed
/// before either is read.
#[derive(Debug, Clone)]
pub struct Line {
    text: String,
    tokens: Vec<Token>,
    start_state: LexState,
    end_state: LexState,
    dirty: bool,
}

impl Line {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tokens: Vec::new(),
            start_state: LexState::Default,
            end_state: LexState::Default,
            dirty: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in characters (there is never a line break inside a line)
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The state this line's cached lex began in (the previous line's exit
    /// state at the time it was lexed).
    pub fn start_state(&self) -> LexState {
        self.start_state
    }

    pub fn end_state(&self) -> LexState {
        self.end_state
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
        self.dirty = true;
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn store_lex_result(
        &mut self,
        tokens: Vec<Token>,
        start_state: LexState,
        end_state: LexState,
    ) {
        self.tokens = tokens;
        self.start_state = start_state;
        self.end_state = end_state;
        self.dirty = false;
    }
}

/// Ordered sequence of lines backing a buffer.
///
/// Backed by a contiguous `Vec`, so structural insertion/deletion near the
/// top of a large document costs O(n) in the line count. The incremental
/// design does not depend on this choice; a gap buffer or rope of lines
/// could replace it behind the same interface.
#[derive(Debug, Clone)]
pub struct LineStore {
    lines: Vec<Line>,
}

impl LineStore {
    /// A store always holds at least one (possibly empty) line.
    pub fn new() -> Self {
        Self {
            lines: vec![Line::new("")],
        }
    }

    /// Build a store from lines of text, marking everything dirty.
    pub fn from_lines(texts: Vec<String>) -> Self {
        if texts.is_empty() {
            return Self::new();
        }
        Self {
            lines: texts.into_iter().map(Line::new).collect(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Get a line by index.
    pub fn line(&self, index: usize) -> Result<&Line, EditError> {
        self.lines.get(index).ok_or(EditError::LineOutOfRange {
            index,
            line_count: self.lines.len(),
        })
    }

    pub(crate) fn line_mut(&mut self, index: usize) -> Result<&mut Line, EditError> {
        let line_count = self.lines.len();
        self.lines
            .get_mut(index)
            .ok_or(EditError::LineOutOfRange { index, line_count })
    }

    /// Insert a new line before `index` (`index == line_count()` appends).
    pub fn insert_line(&mut self, index: usize, text: impl Into<String>) -> Result<(), EditError> {
        if index > self.lines.len() {
            return Err(EditError::LineOutOfRange {
                index,
                line_count: self.lines.len(),
            });
        }
        self.lines.insert(index, Line::new(text));
        Ok(())
    }

    /// Remove the line at `index`, returning its text.
    pub fn delete_line(&mut self, index: usize) -> Result<String, EditError> {
        if index >= self.lines.len() {
            return Err(EditError::LineOutOfRange {
                index,
                line_count: self.lines.len(),
            });
        }
        Ok(self.lines.remove(index).text)
    }

    /// Replace the text of the line at `index`.
    pub fn set_line_text(&mut self, index: usize, text: impl Into<String>) -> Result<(), EditError> {
        self.line_mut(index)?.set_text(text.into());
        Ok(())
    }

    /// Break the line at `index` into two at `column`. The tail becomes a
    /// new line at `index + 1`. Total character count is preserved modulo
    /// the implied line break.
    pub fn split_line(&mut self, index: usize, column: usize) -> Result<(), EditError> {
        let line = self.line(index)?;
        let len = line.char_len();
        if column > len {
            return Err(EditError::PositionOutOfRange {
                position: Position::new(index, column),
                line_len: len,
            });
        }
        let byte_col = char_to_byte(line.text(), column);
        let line = self.line_mut(index)?;
        let tail = line.text[byte_col..].to_string();
        line.text.truncate(byte_col);
        line.dirty = true;
        self.lines.insert(index + 1, Line::new(tail));
        Ok(())
    }

    /// Join the line at `index` with the one after it, removing the line
    /// break between them.
    pub fn merge_line(&mut self, index: usize) -> Result<(), EditError> {
        if index + 1 >= self.lines.len() {
            return Err(EditError::LineOutOfRange {
                index: index + 1,
                line_count: self.lines.len(),
            });
        }
        let tail = self.lines.remove(index + 1).text;
        let line = &mut self.lines[index];
        line.text.push_str(&tail);
        line.dirty = true;
        Ok(())
    }

    /// Iterate over lines in order.
    pub fn iter(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }
}

impl Default for LineStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a char column to a byte offset within `text`.
pub(crate) fn char_to_byte(text: &str, column: usize) -> usize {
    text.char_indices()
        .nth(column)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}
