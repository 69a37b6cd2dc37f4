use crate::Position;

/// A saved cursor state used to rewind after a failed parse attempt.
///
/// Every unit owes its caller the rewind-on-failure guarantee: if the
/// attempt fails, the context position must be exactly what it was on entry.
/// Units implement that by taking a checkpoint before consuming input and
/// restoring it on the failure path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    /// Byte offset into the input at this checkpoint.
    offset: usize,
    /// The position in the source at this checkpoint.
    position: Position,
}

impl Checkpoint {
    /// Creates a new checkpoint with the given offset and position.
    pub fn new(offset: usize, position: Position) -> Self {
        Self { offset, position }
    }

    /// Returns the byte offset stored in this checkpoint.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the position stored in this checkpoint.
    pub fn position(&self) -> Position {
        self.position
    }
}
