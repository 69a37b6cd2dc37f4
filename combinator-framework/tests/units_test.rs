use combinator_framework::{ident, keyword, literal, ParseContext, Parser, Position};

#[test]
fn test_literal_match() {
    let unit = literal("if");
    let mut ctx = ParseContext::new("if x");
    let outcome = unit.parse(&mut ctx).expect("literal should match");
    assert_eq!(outcome.value, "if");
    assert_eq!(outcome.start, Position::at(1, 1, 0));
    assert_eq!(outcome.end, Position::at(1, 3, 2));
    assert_eq!(ctx.position(), outcome.end);
}

#[test]
fn test_literal_failure_rewinds() {
    let unit = literal("iffy");
    let mut ctx = ParseContext::new("if x");
    let before = ctx.position();
    assert!(unit.parse(&mut ctx).is_none());
    assert_eq!(ctx.position(), before);
    assert_eq!(ctx.peek(), Some('i'));
}

#[test]
fn test_keyword_respects_identifier_boundary() {
    let unit = keyword("if");

    let mut ctx = ParseContext::new("if(x)");
    assert!(unit.parse(&mut ctx).is_some());

    let mut ctx = ParseContext::new("iffy");
    let before = ctx.position();
    assert!(unit.parse(&mut ctx).is_none());
    assert_eq!(ctx.position(), before);
}

#[test]
fn test_keyword_match_at_eof() {
    let unit = keyword("if");
    let mut ctx = ParseContext::new("if");
    let outcome = unit.parse(&mut ctx).expect("keyword should match at eof");
    assert_eq!(outcome.value, "if");
    assert_eq!(outcome.end.offset, 2);
}

#[test]
fn test_ident_match() {
    let unit = ident();
    let mut ctx = ParseContext::new("iffy + 1");
    let outcome = unit.parse(&mut ctx).expect("identifier should match");
    assert_eq!(outcome.value, "iffy");
    assert_eq!(outcome.end.offset, 4);
}

#[test]
fn test_ident_rejects_leading_digit() {
    let unit = ident();
    let mut ctx = ParseContext::new("123");
    assert!(unit.parse(&mut ctx).is_none());
    assert_eq!(ctx.position(), Position::new());
}

#[test]
fn test_unit_names_appear_on_active_stack() {
    struct Probe;
    impl Parser<()> for Probe {
        fn parse(
            &self,
            ctx: &mut ParseContext,
        ) -> Option<combinator_framework::ParseResult<()>> {
            let _guard = ctx.enter(self.name());
            assert_eq!(ctx.active_units(), vec!["probe"]);
            None
        }
        fn name(&self) -> &'static str {
            "probe"
        }
    }

    let mut ctx = ParseContext::new("x");
    assert!(Probe.parse(&mut ctx).is_none());
    assert_eq!(ctx.depth(), 0);
}
