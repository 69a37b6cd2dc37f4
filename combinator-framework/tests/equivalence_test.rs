//! Property tests pinning the interpreted and compiled modes to each other.

use combinator_framework::{
    any_of, ident, keyword, literal, one_of, CompiledParser, ParseContext, Parser, TextSlice,
};
use proptest::prelude::*;
use std::rc::Rc;

fn input_strategy() -> BoxedStrategy<String> {
    prop_oneof![
        Just("if".to_string()).boxed(),
        Just("iffy".to_string()).boxed(),
        Just("123".to_string()).boxed(),
        "[a-z0-9_+ ]{0,12}".boxed(),
        "[A-Za-z_][A-Za-z0-9_]{0,6}".boxed(),
    ]
    .boxed()
}

fn grammar() -> Rc<dyn Parser<TextSlice>> {
    any_of(vec![keyword("if"), keyword("in"), literal("+"), ident()])
        .expect("operands were supplied")
}

proptest! {
    #[test]
    fn compiled_equals_interpreted(input in input_strategy()) {
        let unit = grammar();

        let mut interp_ctx = ParseContext::new(input.as_str());
        let interpreted = unit.parse(&mut interp_ctx);

        let compiled = CompiledParser::compile(&unit);
        let mut compiled_ctx = ParseContext::new(input.as_str());
        let compiled_outcome = compiled.run(&mut compiled_ctx);

        prop_assert_eq!(interpreted, compiled_outcome);
        prop_assert_eq!(interp_ctx.offset(), compiled_ctx.offset());
    }

    #[test]
    fn failure_never_advances(input in "[0-9]{0,12}") {
        let unit = one_of::<TextSlice, TextSlice, TextSlice>(keyword("if"), ident());
        let mut ctx = ParseContext::new(input.as_str());
        if unit.parse(&mut ctx).is_none() {
            prop_assert_eq!(ctx.offset(), 0);
        }
    }

    #[test]
    fn discard_preserves_success_and_position(input in input_strategy()) {
        let unit = grammar();

        let keeping = CompiledParser::compile(&unit);
        let mut keep_ctx = ParseContext::new(input.as_str());
        let kept = keeping.run(&mut keep_ctx);

        let discarding = CompiledParser::compile_discarding(&unit);
        let mut discard_ctx = ParseContext::new(input.as_str());
        let discarded = discarding.run(&mut discard_ctx);

        prop_assert_eq!(kept.is_some(), discarded.is_some());
        prop_assert_eq!(keep_ctx.offset(), discard_ctx.offset());
        if let (Some(kept), Some(discarded)) = (kept, discarded) {
            prop_assert_eq!(kept.span(), discarded.span());
            prop_assert_eq!(discarded.value, TextSlice::default());
        }
    }
}
