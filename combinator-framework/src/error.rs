use thiserror::Error;

/// Construction-time programming errors.
///
/// Parse-time mismatch is never an error; it is the ordinary `None` outcome
/// that drives ordered choice. Only grammar-construction contract violations
/// surface here, and they are never retried.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GrammarError {
    /// A combinator was built without the operands it requires.
    #[error("{combinator} requires at least one operand")]
    MissingOperand { combinator: &'static str },
}
