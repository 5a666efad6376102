//! Tests for selector matching over the arena tree.

use sieve_dom::{DomTree, NodeId};
use sieve_select::{AnchorMode, Context, Engine, QueryOptions, SiblingResult, query, unique};

fn q(tree: &DomTree, selector: &str) -> Vec<NodeId> {
    query(tree, selector, Context::Root)
}

/// Helper to build `div > section > p`.
fn nested() -> (DomTree, NodeId, NodeId, NodeId) {
    let mut tree = DomTree::new();
    let div = tree.append_element(NodeId::ROOT, "div", &[]);
    let section = tree.append_element(div, "section", &[]);
    let p = tree.append_element(section, "p", &[]);
    (tree, div, section, p)
}

/// Helper to build siblings `p#p1, "text", span, p#p2` under one `div`.
fn siblings() -> (DomTree, NodeId, NodeId, NodeId) {
    let mut tree = DomTree::new();
    let div = tree.append_element(NodeId::ROOT, "div", &[]);
    let p1 = tree.append_element(div, "p", &[("id", "p1")]);
    let _ = tree.append_text(div, "text");
    let span = tree.append_element(div, "span", &[]);
    let p2 = tree.append_element(div, "p", &[("id", "p2")]);
    (tree, p1, span, p2)
}

// ========== simple selectors ==========

#[test]
fn test_wildcard_returns_every_element() {
    let (tree, div, section, p) = nested();
    assert_eq!(q(&tree, "*"), vec![div, section, p]);
    assert_eq!(query(&tree, "*", Context::Node(section)), vec![section, p]);
}

#[test]
fn test_tag_match_is_case_insensitive() {
    let (tree, _, section, _) = nested();
    assert_eq!(q(&tree, "SECTION"), vec![section]);
}

#[test]
fn test_id_returns_at_most_one() {
    let mut tree = DomTree::new();
    let a = tree.append_element(NodeId::ROOT, "div", &[("id", "x")]);
    let _ = tree.append_element(NodeId::ROOT, "div", &[("id", "x")]);
    assert_eq!(q(&tree, "#x"), vec![a]);
    assert!(q(&tree, "#y").is_empty());
}

#[test]
fn test_class_and_semantics() {
    let mut tree = DomTree::new();
    let both = tree.append_element(NodeId::ROOT, "div", &[("class", "a b")]);
    let _only_a = tree.append_element(NodeId::ROOT, "div", &[("class", "a")]);
    let _span = tree.append_element(NodeId::ROOT, "span", &[("class", "a b")]);
    assert_eq!(q(&tree, "div.a.b"), vec![both]);
    assert_eq!(q(&tree, ".b.a").len(), 2);
}

#[test]
fn test_attribute_operators_on_hyphenated_value() {
    let mut tree = DomTree::new();
    let node = tree.append_element(NodeId::ROOT, "div", &[("attr", "foo-bar")]);

    for matching in [
        "[attr]",
        "[attr^=foo]",
        "[attr$=bar]",
        "[attr=foo-bar]",
        "[attr|=foo]",
        "[attr~=o-b]",
        "[attr*=o-b]",
        "div[attr='foo-bar']",
    ] {
        assert_eq!(q(&tree, matching), vec![node], "{matching}");
    }
    for failing in ["[attr=foo]", "[attr|=fo]", "[other]", "[attr!=x]", "span[attr]"] {
        assert!(q(&tree, failing).is_empty(), "{failing}");
    }
}

// ========== combinators ==========

#[test]
fn test_child_vs_descendant() {
    let (tree, _, section, p) = nested();
    assert!(q(&tree, "div > p").is_empty());
    assert_eq!(q(&tree, "div p"), vec![p]);
    assert_eq!(q(&tree, "div > section"), vec![section]);
    assert_eq!(q(&tree, "section > p"), vec![p]);
}

#[test]
fn test_descendant_excludes_anchor() {
    let (tree, ..) = nested();
    assert!(q(&tree, "p p").is_empty());
}

#[test]
fn test_reverse_child_selects_parent() {
    let (tree, div, section, _) = nested();
    assert_eq!(q(&tree, "section < p"), vec![section]);
    assert_eq!(q(&tree, "div < section"), vec![div]);
    assert!(q(&tree, "div < p").is_empty());
}

#[test]
fn test_child_relation_includes_anchor_itself() {
    let mut tree = DomTree::new();
    let outer = tree.append_element(NodeId::ROOT, "div", &[]);
    let inner = tree.append_element(outer, "div", &[]);
    assert_eq!(q(&tree, "div > div"), vec![outer, inner]);
    assert_eq!(q(&tree, "div < div"), vec![outer]);
}

#[test]
fn test_next_sibling_skips_text() {
    let (tree, _, span, p2) = siblings();
    assert_eq!(q(&tree, "#p1 + span"), vec![span]);
    assert!(q(&tree, "#p1 + #p2").is_empty());
    assert_eq!(q(&tree, "span + p"), vec![p2]);
}

#[test]
fn test_subsequent_sibling() {
    let (tree, p1, _, p2) = siblings();
    // The anchor is reported by default.
    assert_eq!(q(&tree, "#p1 ~ #p2"), vec![p1]);
    assert_eq!(q(&tree, "#p1 ~ p"), vec![p1]);
    assert!(q(&tree, "#p2 ~ p").is_empty());

    let engine = Engine::new(&tree)
        .with_options(QueryOptions::default().with_sibling_result(SiblingResult::Candidate));
    assert_eq!(engine.query("#p1 ~ p", Context::Root), vec![p2]);
}

#[test]
fn test_unresolvable_anchor_yields_empty() {
    let (tree, ..) = nested();
    assert!(q(&tree, "article p").is_empty());
    assert!(q(&tree, "article > p").is_empty());
}

#[test]
fn test_every_anchor_mode() {
    let mut tree = DomTree::new();
    let first = tree.append_element(NodeId::ROOT, "ul", &[]);
    let a = tree.append_element(first, "li", &[]);
    let second = tree.append_element(NodeId::ROOT, "ul", &[]);
    let b = tree.append_element(second, "li", &[]);

    assert_eq!(q(&tree, "ul li"), vec![a]);

    let engine =
        Engine::new(&tree).with_options(QueryOptions::default().with_anchor_mode(AnchorMode::Every));
    assert_eq!(engine.query("ul li", Context::Root), vec![a, b]);
    assert_eq!(engine.query("ul < li", Context::Root), vec![first, second]);
}

// ========== lists ==========

#[test]
fn test_union_is_not_deduplicated() {
    let (tree, _, section, p) = nested();
    assert_eq!(q(&tree, "p, section, p"), vec![p, section, p]);
    assert_eq!(unique(&q(&tree, "p, section, p")), vec![p, section]);
}

#[test]
fn test_invalid_selector_is_tolerated() {
    let (tree, _, _, p) = nested();
    assert!(q(&tree, "###not-a-selector!!").is_empty());
    assert!(q(&tree, "").is_empty());
    assert!(q(&tree, "   ").is_empty());
    assert_eq!(q(&tree, "###not-a-selector!!, p"), vec![p]);
}

#[test]
fn test_unclosed_clause_keeps_later_alternatives() {
    let mut tree = DomTree::new();
    let p = tree.append_element(NodeId::ROOT, "p", &[]);
    let _ = tree.append_element(NodeId::ROOT, "a", &[("href", "/")]);
    for selector in ["a[href, p", "a[x='1, p"] {
        let mut separate = Vec::new();
        for clause in selector.split(", ") {
            separate.extend(q(&tree, clause));
        }
        assert_eq!(q(&tree, selector), separate);
        assert_eq!(q(&tree, selector), vec![p]);
    }
}

#[test]
fn test_text_and_comment_nodes_never_match() {
    let tree = DomTree::from_json(
        r#"[{ "tag": "p", "children": [{ "text": "p" }, { "comment": "p" }] }]"#,
    )
    .unwrap();
    assert_eq!(q(&tree, "*").len(), 1);
    assert_eq!(q(&tree, "p").len(), 1);
}
