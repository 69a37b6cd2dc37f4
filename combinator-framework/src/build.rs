use crate::compilation::{CompilationContext, CompiledFragment, Slot};
use crate::context::ParseContext;
use crate::result::ParseResult;
use crate::traits::Parser;
use std::rc::Rc;

/// Builds the fragment for any unit.
///
/// Units exposing the [`Compilable`](crate::traits::Compilable) capability
/// compile natively; everything else gets a bridging fragment whose body
/// invokes the interpreter at the splice point and copies the success flag
/// and (unless discarding) the value into symbols unique to that splice.
/// Bridging costs one interpreter indirection per occurrence, so hot-path
/// units should provide the capability themselves.
pub fn build<T>(parser: &Rc<dyn Parser<T>>, ctx: &mut CompilationContext) -> CompiledFragment<T>
where
    T: Default + 'static,
{
    if let Some(compilable) = parser.as_compilable() {
        return compilable.compile(ctx);
    }

    tracing::trace!(unit = parser.name(), "bridging unit through the interpreter");

    let id = ctx.next_id();
    let success = ctx.declare_flag(id);
    let value = (!ctx.discard_result()).then(|| ctx.declare_slot::<T>(id));
    let mut fragment = CompiledFragment::new(success.clone(), value.clone());

    let unit = Rc::clone(parser);
    fragment.push(Box::new(move |pctx| match unit.parse(pctx) {
        Some(outcome) => {
            success.set(true);
            if let Some(slot) = &value {
                slot.set(outcome.value);
            }
        }
        None => success.set(false),
    }));

    fragment
}

/// The finalized executable form of a compiled pipeline.
///
/// Owns the root fragment of one compilation pass and runs its flattened
/// body without any interpreter dispatch at combinator boundaries. Exposes
/// the same outcome surface as the interpreter, so the two modes are
/// interchangeable; it also implements [`Parser`], which lets compiled and
/// interpreted units mix inside one grammar.
pub struct CompiledParser<T> {
    fragment: CompiledFragment<T>,
    symbols: Vec<String>,
}

impl<T> CompiledParser<T>
where
    T: Clone + Default + 'static,
{
    /// Compiles the unit in a fresh compilation pass.
    pub fn compile(parser: &Rc<dyn Parser<T>>) -> Self {
        let mut ctx = CompilationContext::new();
        Self::compile_in(parser, &mut ctx)
    }

    /// Compiles the unit with the discard flag set: the resulting parser
    /// still advances the position and reports success exactly as the
    /// interpreter would, but leaves the produced value at its default.
    pub fn compile_discarding(parser: &Rc<dyn Parser<T>>) -> Self {
        let mut ctx = CompilationContext::new();
        ctx.set_discard_result(true);
        Self::compile_in(parser, &mut ctx)
    }

    /// Compiles the unit within a caller-managed pass.
    pub fn compile_in(parser: &Rc<dyn Parser<T>>, ctx: &mut CompilationContext) -> Self {
        let fragment = build(parser, ctx);
        Self {
            fragment,
            symbols: ctx.allocated_symbols().to_vec(),
        }
    }

    /// Runs the compiled body against the context.
    ///
    /// The outcome spans from the entry position to the position the body
    /// left the context at; on failure the rewind contract of every embedded
    /// fragment guarantees those are equal and `None` is returned.
    pub fn run(&self, ctx: &mut ParseContext) -> Option<ParseResult<T>> {
        let start = ctx.position();
        self.fragment.run_body(ctx);
        if !self.fragment.success().get() {
            return None;
        }
        let value = self.fragment.value().map(Slot::get).unwrap_or_default();
        Some(ParseResult::new(start, ctx.position(), value))
    }

    /// Every symbol name allocated during this parser's compilation pass.
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }
}

impl<T> Parser<T> for CompiledParser<T>
where
    T: Clone + Default + 'static,
{
    fn parse(&self, ctx: &mut ParseContext) -> Option<ParseResult<T>> {
        let _guard = ctx.enter(self.name());
        self.run(ctx)
    }

    fn name(&self) -> &'static str {
        "compiled"
    }
}
