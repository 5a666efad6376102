//! Property tests for the query laws: determinism, union, parse
//! idempotence and wildcard totality.

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use sieve_dom::{DomTree, NodeId};
use sieve_select::{Context, TreeAdapter, parse, query};

const TAGS: &[&str] = &["div", "p", "span", "li"];
const CLASSES: &[&str] = &["a", "b", "a b", ""];
const COMBINATORS: &[&str] = &[" ", " > ", " < ", " + ", " ~ "];
const ATTRIBUTES: &[&str] = &["", "[title]", "[title^=x]", "[title|=x]", "[title*=-]"];

fn pick<'a>(g: &mut Gen, items: &[&'a str]) -> &'a str {
    g.choose(items).copied().unwrap_or_default()
}

/// A random tree of up to 24 elements.
#[derive(Clone, Debug)]
struct RandomTree(DomTree);

impl Arbitrary for RandomTree {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut tree = DomTree::new();
        let mut elements = vec![NodeId::ROOT];
        let count = usize::arbitrary(g) % 24;
        for _ in 0..count {
            let parent = *g.choose(&elements).unwrap_or(&NodeId::ROOT);
            let class = pick(g, CLASSES);
            let title = pick(g, &["x", "x-y", "y"]);
            let mut attrs = vec![("title", title)];
            if !class.is_empty() {
                attrs.push(("class", class));
            }
            let node = tree.append_element(parent, pick(g, TAGS), &attrs);
            elements.push(node);
        }
        Self(tree)
    }
}

/// A random selector drawn from the supported grammar.
#[derive(Clone, Debug)]
struct RandomSelector(String);

impl Arbitrary for RandomSelector {
    fn arbitrary(g: &mut Gen) -> Self {
        let simple = |g: &mut Gen| {
            let tag = pick(g, &["div", "p", "span", "li", "*", ""]);
            let class = pick(g, &["", ".a", ".b"]);
            let attribute = pick(g, ATTRIBUTES);
            let text = format!("{tag}{class}{attribute}");
            if text.is_empty() { "*".to_string() } else { text }
        };
        let mut text = simple(g);
        for _ in 0..usize::arbitrary(g) % 3 {
            text.push_str(pick(g, COMBINATORS));
            text.push_str(&simple(g));
        }
        Self(text)
    }
}

#[quickcheck]
fn query_is_deterministic(tree: RandomTree, selector: RandomSelector) -> bool {
    query(&tree.0, &selector.0, Context::Root) == query(&tree.0, &selector.0, Context::Root)
}

#[quickcheck]
fn union_is_concatenation(tree: RandomTree, a: RandomSelector, b: RandomSelector) -> bool {
    let combined = query(&tree.0, &format!("{}, {}", a.0, b.0), Context::Root);
    let mut separate = query(&tree.0, &a.0, Context::Root);
    separate.extend(query(&tree.0, &b.0, Context::Root));
    combined == separate
}

#[quickcheck]
fn parsing_is_idempotent(selector: RandomSelector) -> bool {
    let list = parse(&selector.0);
    list == parse(&selector.0) && parse(&list.to_string()) == list && list.len() == 1
}

#[quickcheck]
fn wildcard_returns_all_elements(tree: RandomTree, pick_context: usize) -> bool {
    let tree = tree.0;
    let context = NodeId(pick_context % tree.len());
    let expected: Vec<NodeId> = tree
        .descendants_or_self(context)
        .into_iter()
        .filter(|&node| tree.is_element(node))
        .collect();
    query(&tree, "*", Context::Node(context)) == expected
}
