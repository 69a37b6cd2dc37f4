use std::cmp::Ordering;

/// Marks a location in the source text.
///
/// Positions have value semantics: they are copied freely and never shared.
/// Units hand them out as part of a parse outcome and the context tracks one
/// as its current location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
    /// Byte offset from the start of the input
    pub offset: usize,
}

impl Position {
    /// Creates a new position at the start of the input.
    pub fn new() -> Self {
        Self {
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    /// Creates a position with the given values.
    pub fn at(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

/// Positions are totally ordered by byte offset, with line and column as
/// tie-breakers so the order agrees with equality. Within one input the
/// line/column pair is derived from the offset, so the tie-breakers never
/// decide; comparing positions taken from different inputs is meaningless.
impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.offset
            .cmp(&other.offset)
            .then_with(|| self.line.cmp(&other.line))
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
