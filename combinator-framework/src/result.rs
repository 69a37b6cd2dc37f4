use combinator_core::Position;

/// The outcome of a successful parse attempt.
///
/// An outcome is only ever constructed whole: start, end and value are set
/// together, and the success channel is `Option<ParseResult<T>>`, so a
/// partially populated outcome is unrepresentable. The caller that receives
/// an outcome owns it; the producing unit never retains it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult<T> {
    /// Position of the first consumed character.
    pub start: Position,
    /// Position one past the last consumed character.
    pub end: Position,
    /// The value produced by the unit.
    pub value: T,
}

impl<T> ParseResult<T> {
    /// Creates a new outcome covering the given span.
    pub fn new(start: Position, end: Position, value: T) -> Self {
        Self { start, end, value }
    }

    /// Returns the (start, end) span of this outcome.
    pub fn span(&self) -> (Position, Position) {
        (self.start, self.end)
    }

    /// Converts the produced value to a declared common result type,
    /// preserving the span. Widening is always explicit; there is no
    /// structural coercion anywhere in the framework.
    pub fn widen<U>(self) -> ParseResult<U>
    where
        T: Into<U>,
    {
        ParseResult {
            start: self.start,
            end: self.end,
            value: self.value.into(),
        }
    }
}
