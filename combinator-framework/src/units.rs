use crate::compilation::{CompilationContext, CompiledFragment};
use crate::context::ParseContext;
use crate::result::ParseResult;
use crate::traits::{Compilable, Parser};
use combinator_core::TextSlice;
use std::rc::Rc;

fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_ident_continue(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Matches an exact piece of text.
pub struct Literal {
    text: String,
}

impl Literal {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Parser<TextSlice> for Literal {
    fn parse(&self, ctx: &mut ParseContext) -> Option<ParseResult<TextSlice>> {
        let _guard = ctx.enter(self.name());
        let checkpoint = ctx.checkpoint();
        let start = ctx.position();
        let from = ctx.offset();

        for expected in self.text.chars() {
            if ctx.advance() != Some(expected) {
                ctx.restore(checkpoint);
                return None;
            }
        }

        let value = ctx.slice(from, ctx.offset());
        Some(ParseResult::new(start, ctx.position(), value))
    }

    fn name(&self) -> &'static str {
        "literal"
    }

    fn as_compilable(&self) -> Option<&dyn Compilable<TextSlice>> {
        Some(self)
    }
}

impl Compilable<TextSlice> for Literal {
    fn compile(&self, ctx: &mut CompilationContext) -> CompiledFragment<TextSlice> {
        let id = ctx.next_id();
        let success = ctx.declare_flag(id);
        let value = (!ctx.discard_result()).then(|| ctx.declare_slot::<TextSlice>(id));
        let mut fragment = CompiledFragment::new(success.clone(), value.clone());

        let text = self.text.clone();
        fragment.push(Box::new(move |pctx| {
            let checkpoint = pctx.checkpoint();
            let from = pctx.offset();
            for expected in text.chars() {
                if pctx.advance() != Some(expected) {
                    pctx.restore(checkpoint);
                    success.set(false);
                    return;
                }
            }
            success.set(true);
            if let Some(slot) = &value {
                slot.set(pctx.slice(from, pctx.offset()));
            }
        }));

        fragment
    }
}

/// Matches an exact piece of text that is not immediately followed by an
/// identifier character, so `"if"` matches in `"if("` but not in `"iffy"`.
pub struct Keyword {
    text: String,
}

impl Keyword {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Parser<TextSlice> for Keyword {
    fn parse(&self, ctx: &mut ParseContext) -> Option<ParseResult<TextSlice>> {
        let _guard = ctx.enter(self.name());
        let checkpoint = ctx.checkpoint();
        let start = ctx.position();
        let from = ctx.offset();

        for expected in self.text.chars() {
            if ctx.advance() != Some(expected) {
                ctx.restore(checkpoint);
                return None;
            }
        }
        if ctx.peek().is_some_and(is_ident_continue) {
            ctx.restore(checkpoint);
            return None;
        }

        let value = ctx.slice(from, ctx.offset());
        Some(ParseResult::new(start, ctx.position(), value))
    }

    fn name(&self) -> &'static str {
        "keyword"
    }

    fn as_compilable(&self) -> Option<&dyn Compilable<TextSlice>> {
        Some(self)
    }
}

impl Compilable<TextSlice> for Keyword {
    fn compile(&self, ctx: &mut CompilationContext) -> CompiledFragment<TextSlice> {
        let id = ctx.next_id();
        let success = ctx.declare_flag(id);
        let value = (!ctx.discard_result()).then(|| ctx.declare_slot::<TextSlice>(id));
        let mut fragment = CompiledFragment::new(success.clone(), value.clone());

        let text = self.text.clone();
        fragment.push(Box::new(move |pctx| {
            let checkpoint = pctx.checkpoint();
            let from = pctx.offset();
            for expected in text.chars() {
                if pctx.advance() != Some(expected) {
                    pctx.restore(checkpoint);
                    success.set(false);
                    return;
                }
            }
            if pctx.peek().is_some_and(is_ident_continue) {
                pctx.restore(checkpoint);
                success.set(false);
                return;
            }
            success.set(true);
            if let Some(slot) = &value {
                slot.set(pctx.slice(from, pctx.offset()));
            }
        }));

        fragment
    }
}

/// Matches an identifier: an ASCII letter or underscore followed by any run
/// of letters, digits and underscores.
pub struct Ident;

impl Ident {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Ident {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser<TextSlice> for Ident {
    fn parse(&self, ctx: &mut ParseContext) -> Option<ParseResult<TextSlice>> {
        let _guard = ctx.enter(self.name());
        let start = ctx.position();
        let from = ctx.offset();

        match ctx.peek() {
            Some(ch) if is_ident_start(ch) => {
                ctx.advance();
            }
            _ => return None,
        }
        ctx.consume_while(is_ident_continue);

        let value = ctx.slice(from, ctx.offset());
        Some(ParseResult::new(start, ctx.position(), value))
    }

    fn name(&self) -> &'static str {
        "ident"
    }

    fn as_compilable(&self) -> Option<&dyn Compilable<TextSlice>> {
        Some(self)
    }
}

impl Compilable<TextSlice> for Ident {
    fn compile(&self, ctx: &mut CompilationContext) -> CompiledFragment<TextSlice> {
        let id = ctx.next_id();
        let success = ctx.declare_flag(id);
        let value = (!ctx.discard_result()).then(|| ctx.declare_slot::<TextSlice>(id));
        let mut fragment = CompiledFragment::new(success.clone(), value.clone());

        fragment.push(Box::new(move |pctx| {
            let from = pctx.offset();
            match pctx.peek() {
                Some(ch) if is_ident_start(ch) => {
                    pctx.advance();
                }
                _ => {
                    success.set(false);
                    return;
                }
            }
            pctx.consume_while(is_ident_continue);
            success.set(true);
            if let Some(slot) = &value {
                slot.set(pctx.slice(from, pctx.offset()));
            }
        }));

        fragment
    }
}

/// Creates an exact-text unit.
pub fn literal<S: Into<String>>(text: S) -> Rc<dyn Parser<TextSlice>> {
    Rc::new(Literal::new(text))
}

/// Creates a keyword unit (exact text with an identifier-boundary check).
pub fn keyword<S: Into<String>>(text: S) -> Rc<dyn Parser<TextSlice>> {
    Rc::new(Keyword::new(text))
}

/// Creates an identifier unit.
pub fn ident() -> Rc<dyn Parser<TextSlice>> {
    Rc::new(Ident::new())
}
