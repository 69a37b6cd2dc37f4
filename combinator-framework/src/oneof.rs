use crate::build::build;
use crate::compilation::{CompilationContext, CompiledFragment};
use crate::context::ParseContext;
use crate::error::GrammarError;
use crate::result::ParseResult;
use crate::traits::{Compilable, Parser};
use std::marker::PhantomData;
use std::rc::Rc;

/// Ordered choice between two units: first match wins.
///
/// `A` and `B` are the operand result types, both widenable to the declared
/// common result type `T`. The widening requirement is a construction-time
/// constraint expressed in the trait bounds, never a runtime check.
///
/// Choice is strict left-to-right and short-circuiting: if the first operand
/// matches at all, the second is never attempted, which grammars rely on
/// when they are ambiguous by construction (a keyword literal ordered before
/// a generic identifier, say). This is not longest-match.
pub struct OneOf<A, B, T> {
    first: Rc<dyn Parser<A>>,
    second: Rc<dyn Parser<B>>,
    _result: PhantomData<fn() -> T>,
}

impl<A, B, T> OneOf<A, B, T> {
    /// Creates the combinator from its two operands. Both are required;
    /// their presence is guaranteed by the signature.
    pub fn new(first: Rc<dyn Parser<A>>, second: Rc<dyn Parser<B>>) -> Self {
        Self {
            first,
            second,
            _result: PhantomData,
        }
    }
}

impl<A, B, T> Parser<T> for OneOf<A, B, T>
where
    A: Into<T> + Clone + Default + 'static,
    B: Into<T> + Clone + Default + 'static,
    T: Clone + Default + 'static,
{
    fn parse(&self, ctx: &mut ParseContext) -> Option<ParseResult<T>> {
        let _guard = ctx.enter(self.name());

        if let Some(outcome) = self.first.parse(ctx) {
            return Some(outcome.widen());
        }

        // The first operand's failure contract guarantees the position is
        // unchanged here, so the second starts from the same spot.
        self.second.parse(ctx).map(|outcome| outcome.widen())
    }

    fn name(&self) -> &'static str {
        "one_of"
    }

    fn as_compilable(&self) -> Option<&dyn Compilable<T>> {
        Some(self)
    }
}

impl<A, B, T> Compilable<T> for OneOf<A, B, T>
where
    A: Into<T> + Clone + Default + 'static,
    B: Into<T> + Clone + Default + 'static,
    T: Clone + Default + 'static,
{
    fn compile(&self, ctx: &mut CompilationContext) -> CompiledFragment<T> {
        let id = ctx.next_id();
        let success = ctx.declare_flag(id);
        let value = (!ctx.discard_result()).then(|| ctx.declare_slot::<T>(id));
        let mut fragment = CompiledFragment::new(success.clone(), value.clone());

        // Sub-fragments are built first, in operand order, and embedded
        // whole; their declarations stay scoped to their own bodies.
        let first = build(&self.first, ctx);
        let second = build(&self.second, ctx);

        // Re-initialize our declarations at the start of every run so a
        // compiled parser stays reusable across inputs.
        {
            let success = success.clone();
            let value = value.clone();
            fragment.push(Box::new(move |_ctx| {
                success.set(false);
                if let Some(slot) = &value {
                    slot.set(T::default());
                }
            }));
        }

        fragment.push(Box::new(move |pctx| {
            first.run_body(pctx);
            if first.success().get() {
                success.set(true);
                if let (Some(slot), Some(inner)) = (&value, first.value()) {
                    slot.set(inner.get().into());
                }
            } else {
                second.run_body(pctx);
                if second.success().get() {
                    success.set(true);
                    if let (Some(slot), Some(inner)) = (&value, second.value()) {
                        slot.set(inner.get().into());
                    }
                }
            }
        }));

        fragment
    }
}

/// Creates an ordered choice over two operands with heterogeneous result
/// types, widened to the declared `T`.
pub fn one_of<A, B, T>(first: Rc<dyn Parser<A>>, second: Rc<dyn Parser<B>>) -> Rc<dyn Parser<T>>
where
    A: Into<T> + Clone + Default + 'static,
    B: Into<T> + Clone + Default + 'static,
    T: Clone + Default + 'static,
{
    Rc::new(OneOf::new(first, second))
}

/// Creates an ordered choice over any number of operands of one result
/// type, decomposed into a right-nested chain of the binary combinator.
/// Each operand is attempted only after all preceding ones failed.
///
/// Building a choice with no operands is a programming-contract violation
/// and fails immediately.
pub fn any_of<T>(operands: Vec<Rc<dyn Parser<T>>>) -> Result<Rc<dyn Parser<T>>, GrammarError>
where
    T: Clone + Default + 'static,
{
    let mut rest = operands.into_iter().rev();
    let Some(innermost) = rest.next() else {
        return Err(GrammarError::MissingOperand {
            combinator: "any_of",
        });
    };

    let mut chain = innermost;
    for operand in rest {
        chain = Rc::new(OneOf::<T, T, T>::new(operand, chain));
    }
    Ok(chain)
}
