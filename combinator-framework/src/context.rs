use crate::cursor::Cursor;
use combinator_core::{Checkpoint, Position, TextSlice};
use std::cell::RefCell;
use std::rc::Rc;

/// Shared configuration carried by a [`ParseContext`].
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Whether units are recorded on the active-unit stack while they run.
    /// Disabling this removes the diagnostic bookkeeping from hot parses.
    pub track_active_units: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            track_active_units: true,
        }
    }
}

/// Mutable interpretation-time state threaded through every unit.
///
/// The context owns the cursor (current position over the shared input) and
/// an active-unit stack used for diagnostics. Ownership transfers strictly
/// in call order: the unit currently executing is the only mutator, and no
/// unit retains the context beyond the call that received it.
pub struct ParseContext {
    cursor: Cursor,
    active: Rc<RefCell<Vec<&'static str>>>,
    options: ParseOptions,
}

impl ParseContext {
    /// Creates a context over the given input with default options.
    pub fn new<S: Into<String>>(input: S) -> Self {
        Self::with_options(input, ParseOptions::default())
    }

    /// Creates a context with explicit options.
    pub fn with_options<S: Into<String>>(input: S, options: ParseOptions) -> Self {
        Self {
            cursor: Cursor::new(input),
            active: Rc::new(RefCell::new(Vec::new())),
            options,
        }
    }

    /// Returns a reference to the cursor.
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Returns a mutable reference to the cursor.
    pub fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    /// Returns the current position.
    pub fn position(&self) -> Position {
        self.cursor.position()
    }

    /// Returns the current byte offset.
    pub fn offset(&self) -> usize {
        self.cursor.offset()
    }

    /// Returns true if at end of input.
    pub fn is_eof(&self) -> bool {
        self.cursor.is_eof()
    }

    /// Peeks at the next character without advancing.
    pub fn peek(&self) -> Option<char> {
        self.cursor.peek()
    }

    /// Advances the cursor and returns the character.
    pub fn advance(&mut self) -> Option<char> {
        self.cursor.advance()
    }

    /// Consumes characters while the predicate returns true.
    pub fn consume_while<F>(&mut self, predicate: F) -> TextSlice
    where
        F: FnMut(char) -> bool,
    {
        self.cursor.consume_while(predicate)
    }

    /// Returns a slice of the input by byte range.
    pub fn slice(&self, start: usize, end: usize) -> TextSlice {
        self.cursor.slice(start, end)
    }

    /// Creates a checkpoint of the current state.
    pub fn checkpoint(&self) -> Checkpoint {
        self.cursor.checkpoint()
    }

    /// Restores the cursor to a checkpoint.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.cursor.restore(checkpoint);
    }

    /// Records the named unit on the active stack for the duration of the
    /// returned guard. The guard pops the entry on drop, so push and pop
    /// balance on every exit path, failure included.
    pub fn enter(&self, name: &'static str) -> ActiveGuard {
        if !self.options.track_active_units {
            return ActiveGuard { stack: None };
        }
        tracing::trace!(unit = name, depth = self.depth(), "entering unit");
        self.active.borrow_mut().push(name);
        ActiveGuard {
            stack: Some(Rc::clone(&self.active)),
        }
    }

    /// Returns a snapshot of the units currently executing, outermost first.
    pub fn active_units(&self) -> Vec<&'static str> {
        self.active.borrow().clone()
    }

    /// Returns the current nesting depth of active units.
    pub fn depth(&self) -> usize {
        self.active.borrow().len()
    }
}

/// Scoped entry on the context's active-unit stack.
///
/// Holding the stack through an `Rc` rather than a borrow lets the unit keep
/// using the context while the guard is alive.
pub struct ActiveGuard {
    stack: Option<Rc<RefCell<Vec<&'static str>>>>,
}

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        if let Some(stack) = &self.stack {
            stack.borrow_mut().pop();
        }
    }
}
