use crate::compilation::{CompilationContext, CompiledFragment};
use crate::context::ParseContext;
use crate::result::ParseResult;

/// The minimal contract of an interpretable unit.
///
/// A unit is stateless across calls (`&self` receiver); everything mutable
/// lives in the [`ParseContext`]. On success the context position rests at
/// the outcome's end; on failure the position must be exactly what it was on
/// entry. Rewinding is each unit's own responsibility, not its caller's.
pub trait Parser<T> {
    /// Attempts to consume input and produce an outcome.
    /// Returns `None` on mismatch, leaving the context position unchanged.
    fn parse(&self, ctx: &mut ParseContext) -> Option<ParseResult<T>>;

    /// Diagnostic name recorded on the context's active-unit stack.
    fn name(&self) -> &'static str {
        "<unit>"
    }

    /// Capability discovery hook for the fragment builder. Units that can
    /// emit an equivalent compiled fragment return `Some(self)`; everything
    /// else is transparently bridged through the interpreter.
    fn as_compilable(&self) -> Option<&dyn Compilable<T>> {
        None
    }
}

impl<T> std::fmt::Debug for dyn Parser<T> + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser").field("name", &self.name()).finish()
    }
}

/// Optional capability: emit a compiled fragment equivalent to the unit's
/// interpreted behavior.
///
/// The fragment must be semantically indistinguishable from [`Parser::parse`]
/// for any input: same success or failure, same final position, and (unless
/// built under the discard flag) the same produced value. Fragments are
/// pass-specific; a fragment built in one compilation pass is never reused
/// in another.
pub trait Compilable<T>: Parser<T> {
    /// Builds this unit's fragment, drawing symbol names from the context.
    fn compile(&self, ctx: &mut CompilationContext) -> CompiledFragment<T>;
}
