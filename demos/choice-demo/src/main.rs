use combinator_core::TextSlice;
use combinator_framework::{
    any_of, ident, keyword, CompiledParser, ParseContext, ParseResult, Parser,
};
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

fn describe(outcome: &Option<ParseResult<TextSlice>>) -> String {
    match outcome {
        Some(result) => format!(
            "matched {:?} spanning bytes {}..{}",
            result.value.as_ref(),
            result.start.offset,
            result.end.offset
        ),
        None => "no match".to_string(),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Keywords ordered before the identifier pattern: on "let" the keyword
    // branch wins, on "letter" the keyword fails its boundary check and the
    // identifier branch matches the whole word.
    let grammar: Rc<dyn Parser<TextSlice>> =
        any_of(vec![keyword("let"), keyword("if"), ident()])
            .expect("operands were supplied");

    let compiled = CompiledParser::compile(&grammar);
    println!("compiled pass declared symbols: {:?}", compiled.symbols());
    println!();

    for input in ["let", "letter", "if", "iffy", "123"] {
        let mut interp_ctx = ParseContext::new(input);
        let interpreted = grammar.parse(&mut interp_ctx);

        let mut compiled_ctx = ParseContext::new(input);
        let compiled_outcome = compiled.run(&mut compiled_ctx);

        println!("input {input:?}");
        println!("  interpreted: {}", describe(&interpreted));
        println!("  compiled:    {}", describe(&compiled_outcome));
        assert_eq!(interpreted, compiled_outcome);
        assert_eq!(interp_ctx.offset(), compiled_ctx.offset());
    }

    // Discard compilation: same success and position, no value materialized.
    let discarding = CompiledParser::compile_discarding(&grammar);
    let mut ctx = ParseContext::new("iffy");
    if let Some(result) = discarding.run(&mut ctx) {
        println!();
        println!(
            "discarding run over \"iffy\": advanced to byte {}, value left at {:?}",
            ctx.offset(),
            result.value.as_ref()
        );
    }
}
