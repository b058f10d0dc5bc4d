//! Transactional undo/redo over primitive edits.
//!
//! The engine records applied/inverse edit pairs as the command layer
//! performs them, grouped into transactions that undo and redo as one
//! user-visible step. History is a pair of stacks: undoing pops a
//! transaction off the past and onto the future; any fresh recording
//! clears the future.

use super::document::Buffer;
use super::edit::Edit;
use super::position::Position;

/// One applied edit together with its exact inverse.
#[derive(Debug, Clone)]
pub struct EditRecord {
    pub applied: Edit,
    pub inverse: Edit,
}

/// A group of edits applied atomically from the user's perspective,
/// with the cursor positions bracketing the group.
#[derive(Debug, Clone)]
pub struct Transaction {
    edits: Vec<EditRecord>,
    cursor_before: Position,
    cursor_after: Position,
}

impl Transaction {
    pub fn edit_count(&self) -> usize {
        self.edits.len()
    }
}

/// Undo/redo history for one buffer.
#[derive(Debug, Clone)]
pub struct UndoEngine {
    past: Vec<Transaction>,
    future: Vec<Transaction>,
    open: Option<Transaction>,
    max_depth: usize,
}

impl UndoEngine {
    /// Create an undo engine with the default history depth.
    pub fn new() -> Self {
        Self::with_max_depth(1000)
    }

    /// Create an undo engine keeping at most `max_depth` past transactions.
    /// Older transactions are evicted silently; undo just bottoms out
    /// earlier.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            past: Vec::new(),
            future: Vec::new(),
            open: None,
            max_depth,
        }
    }

    /// Start a transaction, noting where the cursor was. Clears the redo
    /// future: a new edit invalidates it. A begin while a transaction is
    /// already open is ignored.
    pub fn begin_transaction(&mut self, cursor_before: Position) {
        self.future.clear();
        if self.open.is_none() {
            self.open = Some(Transaction {
                edits: Vec::new(),
                cursor_before,
                cursor_after: cursor_before,
            });
        }
    }

    /// Record one applied edit and its inverse into the open transaction.
    /// Recording without an open transaction opens one implicitly.
    pub fn record_edit(&mut self, applied: Edit, inverse: Edit) {
        self.future.clear();
        let transaction = self.open.get_or_insert_with(|| Transaction {
            edits: Vec::new(),
            cursor_before: applied.start(),
            cursor_after: applied.start(),
        });
        transaction.edits.push(EditRecord { applied, inverse });
    }

    /// Close the open transaction, noting where the cursor ended up. An
    /// empty transaction commits as a no-op and is not pushed onto history.
    pub fn commit_transaction(&mut self, cursor_after: Position) {
        let Some(mut transaction) = self.open.take() else {
            return;
        };
        if transaction.edits.is_empty() {
            return;
        }
        transaction.cursor_after = cursor_after;
        tracing::trace!(edits = transaction.edit_count(), "committed transaction");
        self.past.push(transaction);
        while self.past.len() > self.max_depth {
            self.past.remove(0);
        }
    }

    /// Undo the most recent transaction: apply its inverse edits to the
    /// buffer in reverse recorded order, in one step. Returns the cursor
    /// position from before the transaction, or `None` if the past stack
    /// is empty (the documented empty-history signal, not an error).
    ///
    /// If replaying an inverse fails the buffer no longer corresponds to
    /// any recorded transaction, so all history is discarded and `None`
    /// is returned. That can only happen when a caller records an edit
    /// pair whose inverse was not produced by the buffer.
    pub fn undo(&mut self, buffer: &mut Buffer) -> Option<Position> {
        let transaction = self.past.pop()?;
        for record in transaction.edits.iter().rev() {
            if let Err(err) = buffer.apply_edit(&record.inverse) {
                // An inverse derived from a successful edit must apply;
                // anything else means the recorded history is untrustworthy.
                tracing::error!(error = %err, "undo replay failed, discarding history");
                self.clear();
                return None;
            }
        }
        let cursor = transaction.cursor_before;
        self.future.push(transaction);
        Some(cursor)
    }

    /// Redo the most recently undone transaction: reapply its original
    /// edits in original order. Returns the cursor position from after the
    /// transaction, or `None` if the future stack is empty. Replay failure
    /// discards all history, as in [`UndoEngine::undo`].
    pub fn redo(&mut self, buffer: &mut Buffer) -> Option<Position> {
        let transaction = self.future.pop()?;
        for record in transaction.edits.iter() {
            if let Err(err) = buffer.apply_edit(&record.applied) {
                tracing::error!(error = %err, "redo replay failed, discarding history");
                self.clear();
                return None;
            }
        }
        let cursor = transaction.cursor_after;
        self.past.push(transaction);
        Some(cursor)
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Number of transactions available to undo
    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    /// Number of transactions available to redo
    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }

    /// Drop all history (e.g. after loading a new file).
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
        self.open = None;
    }
}

impl Default for UndoEngine {
    fn default() -> Self {
        Self::new()
    }
}
