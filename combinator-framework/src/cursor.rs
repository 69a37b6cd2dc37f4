use combinator_core::{Checkpoint, Position, TextSlice};
use std::sync::Arc;

/// A cursor over the shared input buffer.
///
/// The cursor is the only holder of the "current position" during a parse.
/// Units advance it character by character and rewind it through
/// [`Checkpoint`]s when an attempt fails.
#[derive(Debug, Clone)]
pub struct Cursor {
    buffer: Arc<str>,
    current: usize,
    position: Position,
}

impl Cursor {
    /// Creates a new cursor from the input string.
    pub fn new<S: Into<String>>(input: S) -> Self {
        let owned = input.into();
        Self::with_arc(Arc::<str>::from(owned))
    }

    /// Creates a cursor from an existing shared buffer.
    pub fn with_arc(buffer: Arc<str>) -> Self {
        Self {
            current: 0,
            position: Position::new(),
            buffer,
        }
    }

    /// Returns the current position in the source.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the current offset in bytes.
    pub fn offset(&self) -> usize {
        self.current
    }

    /// Returns the underlying shared buffer.
    pub fn buffer(&self) -> Arc<str> {
        Arc::clone(&self.buffer)
    }

    /// Returns true if the cursor is at the end of the input.
    pub fn is_eof(&self) -> bool {
        self.current >= self.buffer.len()
    }

    /// Returns the next character without advancing the cursor.
    pub fn peek(&self) -> Option<char> {
        self.buffer[self.current..].chars().next()
    }

    /// Advances the cursor by one character.
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        let len = ch.len_utf8();

        if ch == '\n' {
            self.position.line += 1;
            self.position.column = 1;
        } else {
            self.position.column += 1;
        }
        self.position.offset += len;
        self.current += len;

        Some(ch)
    }

    /// Consumes characters while the predicate returns true.
    pub fn consume_while<F>(&mut self, mut predicate: F) -> TextSlice
    where
        F: FnMut(char) -> bool,
    {
        let start = self.current;
        while let Some(ch) = self.peek() {
            if !predicate(ch) {
                break;
            }
            self.advance();
        }
        TextSlice::new(Arc::clone(&self.buffer), start, self.current)
    }

    /// Returns a slice of the buffer by byte range.
    pub fn slice(&self, start: usize, end: usize) -> TextSlice {
        TextSlice::new(Arc::clone(&self.buffer), start, end)
    }

    /// Creates a checkpoint of the current state.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint::new(self.current, self.position)
    }

    /// Restores the cursor to a checkpoint.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.current = checkpoint.offset();
        self.position = checkpoint.position();
    }
}
