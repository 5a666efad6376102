//! Tests for selector list parsing and canonical rendering.

use sieve_select::{
    AttributeConstraint, AttributeTest, Combinator, ParseError, Selector, SimpleForm,
    SimpleSelector, TypeSelector, parse, parse_selector, parse_with_diagnostics, try_parse,
};

// ========== grammar forms ==========

#[test]
fn test_form_precedence() {
    let cases = [
        ("div", SimpleForm::Bare),
        ("#id", SimpleForm::Bare),
        (".c", SimpleForm::Bare),
        ("*", SimpleForm::Bare),
        ("div#id", SimpleForm::Compound),
        ("div.c", SimpleForm::Compound),
        (".a.b", SimpleForm::Compound),
        ("a[href]", SimpleForm::Attribute),
        ("a.ext[href$='.pdf']", SimpleForm::Attribute),
    ];
    for (text, form) in cases {
        let selector = parse_selector(text).unwrap();
        assert!(selector.is_simple(), "{text}");
        assert_eq!(selector.head().form(), form, "{text}");
    }
}

#[test]
fn test_every_operator_parses() {
    let selector = parse_selector("a[a][b=1][c^=2][d$=3][e~=4][f|=5][g*=6]").unwrap();
    let tests: Vec<&AttributeTest> = selector.head().attributes.iter().map(|a| &a.test).collect();
    assert_eq!(
        tests,
        vec![
            &AttributeTest::Exists,
            &AttributeTest::Equals("1".into()),
            &AttributeTest::Prefix("2".into()),
            &AttributeTest::Suffix("3".into()),
            &AttributeTest::Includes("4".into()),
            &AttributeTest::DashMatch("5".into()),
            &AttributeTest::Substring("6".into()),
        ]
    );
}

#[test]
fn test_quoted_values_keep_special_characters() {
    let selector = parse_selector(r#"a[title="x > y, z"]"#).unwrap();
    assert!(selector.is_simple());
    assert_eq!(
        selector.head().attributes,
        vec![AttributeConstraint::with_operator("title", "=", "x > y, z")]
    );
}

#[test]
fn test_unknown_operator_parses_but_is_unsupported() {
    let selector = parse_selector("a[rel!=nofollow]").unwrap();
    assert!(matches!(
        &selector.head().attributes[0].test,
        AttributeTest::Unsupported { operator, value } if operator == "!=" && value == "nofollow"
    ));
}

// ========== combinators ==========

#[test]
fn test_combinator_spacing_normalizes() {
    let expected = Selector::new(SimpleSelector::tag("div"))
        .then(Combinator::Child, SimpleSelector::tag("p"));
    for text in ["div>p", "div > p", "div  >   p", "  div>\tp  "] {
        assert_eq!(parse_selector(text.trim()).unwrap(), expected, "{text}");
    }
}

#[test]
fn test_whitespace_run_is_single_descendant() {
    let selector = parse_selector("ul \n\t li").unwrap();
    assert_eq!(
        selector,
        Selector::new(SimpleSelector::tag("ul"))
            .then(Combinator::Descendant, SimpleSelector::tag("li"))
    );
}

#[test]
fn test_all_combinators() {
    let selector = parse_selector("a b > c < d + e ~ f").unwrap();
    let combinators: Vec<Combinator> = selector.combinators().collect();
    assert_eq!(
        combinators,
        vec![
            Combinator::Descendant,
            Combinator::Child,
            Combinator::ReverseChild,
            Combinator::NextSibling,
            Combinator::SubsequentSibling,
        ]
    );
    assert_eq!(selector.len(), 6);
}

// ========== lists and invalid clauses ==========

#[test]
fn test_list_order_is_preserved() {
    let list = parse("h1, #x , .y");
    let heads: Vec<&SimpleSelector> = list.selectors().iter().map(Selector::head).collect();
    assert_eq!(
        heads,
        vec![
            &SimpleSelector::tag("h1"),
            &SimpleSelector::id("x"),
            &SimpleSelector::class("y"),
        ]
    );
}

#[test]
fn test_invalid_clause_does_not_abort_siblings() {
    let (list, rejected) = parse_with_diagnostics("p, div >, ###not-a-selector!!, span");
    assert_eq!(list.len(), 2);
    assert_eq!(rejected.len(), 2);
    assert_eq!(
        rejected[0].error,
        ParseError::MissingOperand {
            combinator: ">".into()
        }
    );
    assert_eq!(rejected[1].clause, "###not-a-selector!!");
}

#[test]
fn test_try_parse_reports_first_failure() {
    let err = try_parse("p, a[href, div").unwrap_err();
    assert!(matches!(err.error, ParseError::UnterminatedAttribute { .. }));
    assert_eq!(err.to_string(), format!("invalid selector 'a[href': {}", err.error));
}

#[test]
fn test_unclosed_bracket_rejects_only_its_clause() {
    let (list, rejected) = parse_with_diagnostics("a[href, p, span");
    assert_eq!(list.to_string(), "p, span");
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].clause, "a[href");

    let (list, rejected) = parse_with_diagnostics("a[x='1, p");
    assert_eq!(list.to_string(), "p");
    assert_eq!(rejected[0].clause, "a[x='1");
}

#[test]
fn test_type_name_is_kept_as_written() {
    let selector = parse_selector("DIV").unwrap();
    assert_eq!(selector.head().tag, Some(TypeSelector::Name("DIV".into())));
}

// ========== display ==========

#[test]
fn test_display_reparses_to_equal_ast() {
    let texts = [
        "div",
        "*",
        "div#main.a.b",
        "[href]",
        "a[href^='https'][rel~=no]",
        r#"a[title='say "hi"']"#,
        "ul > li + li",
        "section p ~ span < em",
        "h1, h2 , .title",
        "x[y!=z]",
    ];
    for text in texts {
        let list = parse(text);
        let rendered = list.to_string();
        assert_eq!(parse(&rendered), list, "{text} -> {rendered}");
    }
}
