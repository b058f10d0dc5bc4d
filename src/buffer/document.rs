//! The buffer: line store + lexer engine + edit application.
//!
//! All mutation goes through [`Buffer::apply_edit`], which updates the line
//! store, computes the exact inverse edit for the undo engine, and then
//! relexes the smallest suffix of affected lines. Reads (`text_in`,
//! `tokens`, `line_text`) never mutate and always observe a fully-lexed
//! document, because relexing completes before `apply_edit` returns.

use crate::syntax::{lex_line, LanguageId, LexState, Token};

use super::edit::{AppliedEdit, Edit};
use super::error::EditError;
use super::line_store::{char_to_byte, LineStore};
use super::position::{Position, Range};

/// How much work the last relex pass did. Interesting to tests and to
/// latency instrumentation: a keystroke that does not change any line's
/// exit state relexes exactly the edited lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelexStats {
    /// Number of lines the propagation pass re-tokenized
    pub lines_relexed: usize,
    /// Whether propagation ran all the way to the last line
    pub reached_end: bool,
}

/// A text document with incremental syntax highlighting.
#[derive(Debug, Clone)]
pub struct Buffer {
    store: LineStore,
    language: LanguageId,
    /// Incremented on every successful mutation; lets readers detect staleness
    revision: u64,
    /// Whether the buffer has unsaved changes
    modified: bool,
    last_relex: RelexStats,
}

impl Buffer {
    /// Create an empty plain-text buffer (one empty line).
    pub fn new() -> Self {
        Self::with_language(LanguageId::PlainText)
    }

    /// Create an empty buffer lexed with the given language.
    pub fn with_language(language: LanguageId) -> Self {
        let mut buffer = Self {
            store: LineStore::new(),
            language,
            revision: 0,
            modified: false,
            last_relex: RelexStats::default(),
        };
        buffer.relex_from(0);
        buffer
    }

    /// Create a buffer from initial text.
    pub fn from_text(text: &str, language: LanguageId) -> Self {
        let mut buffer = Self::with_language(language);
        buffer.load_text(text);
        buffer
    }

    /// Replace the entire document, resetting the line store and lexer
    /// cache, and run one full lex pass. Used by file load.
    pub fn load_text(&mut self, text: &str) {
        let lines: Vec<String> = text
            .split('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
            .collect();
        self.store = LineStore::from_lines(lines);
        self.revision = self.revision.wrapping_add(1);
        self.modified = false;
        self.relex_from(0);
        tracing::debug!(
            lines = self.store.line_count(),
            language = self.language.display_name(),
            "loaded buffer"
        );
    }

    // ========================================================================
    // Read access
    // ========================================================================

    /// Number of lines; always at least 1.
    pub fn line_count(&self) -> usize {
        self.store.line_count()
    }

    /// Text of one line, without any line break.
    pub fn line_text(&self, index: usize) -> Result<&str, EditError> {
        Ok(self.store.line(index)?.text())
    }

    /// Length of one line in characters.
    pub fn line_len(&self, index: usize) -> Result<usize, EditError> {
        Ok(self.store.line(index)?.char_len())
    }

    /// Cached tokens for one line. Always current: relexing happens before
    /// any edit returns.
    pub fn tokens(&self, index: usize) -> Result<&[Token], EditError> {
        let line = self.store.line(index)?;
        debug_assert!(!line.is_dirty());
        Ok(line.tokens())
    }

    /// The lexer state the given line exits in.
    pub fn end_state(&self, index: usize) -> Result<LexState, EditError> {
        Ok(self.store.line(index)?.end_state())
    }

    /// Full document text, lines joined with `\n`.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for (i, line) in self.store.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(line.text());
        }
        out
    }

    /// Text within `range`, lines joined with `\n`.
    pub fn text_in(&self, range: Range) -> Result<String, EditError> {
        self.validate_range(range)?;

        if range.is_single_line() {
            let text = self.store.line(range.start.line)?.text();
            let start = char_to_byte(text, range.start.column);
            let end = char_to_byte(text, range.end.column);
            return Ok(text[start..end].to_string());
        }

        let first = self.store.line(range.start.line)?.text();
        let mut out = first[char_to_byte(first, range.start.column)..].to_string();
        for index in range.start.line + 1..range.end.line {
            out.push('\n');
            out.push_str(self.store.line(index)?.text());
        }
        let last = self.store.line(range.end.line)?.text();
        out.push('\n');
        out.push_str(&last[..char_to_byte(last, range.end.column)]);
        Ok(out)
    }

    /// The range covering the whole document.
    pub fn full_range(&self) -> Range {
        Range::new(Position::zero(), self.end_position())
    }

    /// Position just past the last character of the document.
    pub fn end_position(&self) -> Position {
        let last = self.store.line_count() - 1;
        let len = self.store.line(last).map(|l| l.char_len()).unwrap_or(0);
        Position::new(last, len)
    }

    pub fn language(&self) -> LanguageId {
        self.language
    }

    /// Switch lexing grammar and re-highlight the whole document.
    pub fn set_language(&mut self, language: LanguageId) {
        if self.language == language {
            return;
        }
        self.language = language;
        for index in 0..self.store.line_count() {
            if let Ok(line) = self.store.line_mut(index) {
                line.mark_dirty();
            }
        }
        self.relex_from(0);
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Clear the modified flag (after a successful save).
    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    /// Work done by the most recent relex pass.
    pub fn last_relex_stats(&self) -> RelexStats {
        self.last_relex
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Apply one primitive edit. On success the buffer text, line store, and
    /// token caches are all updated, and the returned [`AppliedEdit`] holds
    /// the affected range plus the exact inverse edit. On error the buffer
    /// is untouched.
    pub fn apply_edit(&mut self, edit: &Edit) -> Result<AppliedEdit, EditError> {
        let applied = match edit {
            Edit::Insert { position, text } => self.apply_insert(*position, text)?,
            Edit::Delete { range } => self.apply_delete(*range)?,
        };
        self.revision = self.revision.wrapping_add(1);
        self.modified = true;
        tracing::trace!(
            edit = ?edit,
            relexed = self.last_relex.lines_relexed,
            "applied edit"
        );
        Ok(applied)
    }

    fn apply_insert(&mut self, position: Position, text: &str) -> Result<AppliedEdit, EditError> {
        self.validate_position(position)?;

        let line_text = self.store.line(position.line)?.text();
        let split = char_to_byte(line_text, position.column);
        let head = line_text[..split].to_string();
        let tail = line_text[split..].to_string();

        let segments: Vec<&str> = text.split('\n').collect();
        let end = if segments.len() == 1 {
            self.store
                .set_line_text(position.line, format!("{}{}{}", head, text, tail))?;
            Position::new(position.line, position.column + text.chars().count())
        } else {
            let last_index = segments.len() - 1;
            self.store
                .set_line_text(position.line, format!("{}{}", head, segments[0]))?;
            for (offset, segment) in segments[1..last_index].iter().enumerate() {
                self.store
                    .insert_line(position.line + 1 + offset, segment.to_string())?;
            }
            let end_column = segments[last_index].chars().count();
            self.store.insert_line(
                position.line + last_index,
                format!("{}{}", segments[last_index], tail),
            )?;
            Position::new(position.line + last_index, end_column)
        };

        self.relex_from(position.line);
        Ok(AppliedEdit {
            range: Range::new(position, end),
            inverse: Edit::delete(Range::new(position, end)),
        })
    }

    fn apply_delete(&mut self, range: Range) -> Result<AppliedEdit, EditError> {
        self.validate_range(range)?;

        let removed = self.text_in(range)?;

        if range.is_single_line() {
            let text = self.store.line(range.start.line)?.text();
            let start = char_to_byte(text, range.start.column);
            let end = char_to_byte(text, range.end.column);
            let new_text = format!("{}{}", &text[..start], &text[end..]);
            self.store.set_line_text(range.start.line, new_text)?;
        } else {
            // Merge first-line head and last-line tail, drop everything between
            let first = self.store.line(range.start.line)?.text();
            let head = first[..char_to_byte(first, range.start.column)].to_string();
            let last = self.store.line(range.end.line)?.text();
            let tail = last[char_to_byte(last, range.end.column)..].to_string();
            for _ in range.start.line + 1..=range.end.line {
                self.store.delete_line(range.start.line + 1)?;
            }
            self.store
                .set_line_text(range.start.line, format!("{}{}", head, tail))?;
        }

        self.relex_from(range.start.line);
        Ok(AppliedEdit {
            range: Range::collapsed(range.start),
            inverse: Edit::insert(range.start, removed),
        })
    }

    /// Check that a position names an existing line and a column within it
    /// (one past the last character is valid, as an insertion point).
    pub fn validate_position(&self, pos: Position) -> Result<(), EditError> {
        let line = self.store.line(pos.line)?;
        let len = line.char_len();
        if pos.column > len {
            return Err(EditError::PositionOutOfRange {
                position: pos,
                line_len: len,
            });
        }
        Ok(())
    }

    /// Check that both endpoints of a range are valid positions and that
    /// they are in order. `Range::new` normalizes endpoints, but the fields
    /// are public, so an inverted range can still reach the buffer.
    pub fn validate_range(&self, range: Range) -> Result<(), EditError> {
        self.validate_position(range.start)?;
        self.validate_position(range.end)?;
        if range.end < range.start {
            return Err(EditError::MalformedEdit(format!(
                "inverted range {}",
                range
            )));
        }
        Ok(())
    }

    // ========================================================================
    // Incremental relexing
    // ========================================================================

    /// Relex from `first_line` downward, stopping at the first line whose
    /// cache is still valid: not dirty and lexed with the same incoming
    /// state we would hand it now. Worst case this reaches the end of the
    /// document (e.g. typing `/*`); the typical keystroke stops after the
    /// edited line.
    fn relex_from(&mut self, first_line: usize) {
        let grammar = self.language.grammar();
        let line_count = self.store.line_count();

        let mut state = if first_line == 0 {
            LexState::Default
        } else {
            self.store
                .line(first_line - 1)
                .map(|l| l.end_state())
                .unwrap_or_default()
        };

        let mut relexed = 0;
        let mut index = first_line;
        while index < line_count {
            let line = match self.store.line_mut(index) {
                Ok(line) => line,
                Err(_) => break,
            };
            if !line.is_dirty() && line.start_state() == state {
                break;
            }
            let (tokens, end_state) = lex_line(line.text(), state, grammar);
            line.store_lex_result(tokens, state, end_state);
            state = end_state;
            relexed += 1;
            index += 1;
        }

        self.last_relex = RelexStats {
            lines_relexed: relexed,
            reached_end: index == line_count,
        };
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}
