//! Terminal and JSON rendering for query and parse results.

use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use sieve_dom::{AttributesMap, DomTree, NodeId, format_start_tag};
use sieve_select::{InvalidClause, Selector, SelectorList};

/// One matched element in `--json` output.
#[derive(Debug, Serialize)]
struct MatchRecord<'a> {
    node: usize,
    tag: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    attrs: Option<&'a AttributesMap>,
}

/// A rejected clause in `parse --json` output.
#[derive(Debug, Serialize)]
struct RejectedRecord<'a> {
    clause: &'a str,
    error: String,
}

/// `parse --json` output.
#[derive(Debug, Serialize)]
struct ParseReport<'a> {
    canonical: String,
    selectors: &'a SelectorList,
    rejected: Vec<RejectedRecord<'a>>,
}

/// `[node] <tag attr="...">`, uncolored.
pub fn describe_match(tree: &DomTree, node: NodeId) -> String {
    match tree.as_element(node) {
        Some(data) => format!("[{}] {}", node.0, format_start_tag(data)),
        None => format!("[{}]", node.0),
    }
}

pub fn print_matches(tree: &DomTree, matches: &[NodeId]) {
    for &node in matches {
        println!("{}", describe_match(tree, node).green());
    }
    let summary = match matches.len() {
        1 => "1 match".to_string(),
        n => format!("{n} matches"),
    };
    println!("{}", summary.dimmed());
}

pub fn matches_json(tree: &DomTree, matches: &[NodeId]) -> Result<String> {
    let records: Vec<MatchRecord<'_>> = matches
        .iter()
        .filter_map(|&node| {
            tree.as_element(node).map(|data| MatchRecord {
                node: node.0,
                tag: &data.tag_name,
                attrs: (!data.attrs.is_empty()).then_some(&data.attrs),
            })
        })
        .collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

/// Simple selectors annotated with their grammar form, joined by
/// combinators: `div#a (compound) > p (bare)`.
pub fn describe_selector(selector: &Selector) -> String {
    let mut out = format!("{} ({})", selector.head(), selector.head().form());
    for (combinator, simple) in selector.rest() {
        let symbol = combinator.to_string();
        let symbol = if symbol.trim().is_empty() { "␣" } else { symbol.as_str() };
        out.push_str(&format!(" {symbol} {simple} ({})", simple.form()));
    }
    out
}

pub fn print_parse(list: &SelectorList, rejected: &[InvalidClause]) {
    println!("{}", list.to_string().bold());
    for selector in list {
        println!("  {}", describe_selector(selector));
    }
    for invalid in rejected {
        println!("  {} {}", "rejected:".red(), invalid);
    }
}

pub fn parse_json(list: &SelectorList, rejected: &[InvalidClause]) -> Result<String> {
    let report = ParseReport {
        canonical: list.to_string(),
        selectors: list,
        rejected: rejected
            .iter()
            .map(|invalid| RejectedRecord {
                clause: &invalid.clause,
                error: invalid.error.to_string(),
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sieve_select::{parse, parse_with_diagnostics};

    #[test]
    fn test_describe_match() {
        let mut tree = DomTree::new();
        let a = tree.append_element(NodeId::ROOT, "a", &[("href", "/")]);
        let text = tree.append_text(a, "home");
        assert_eq!(describe_match(&tree, a), "[1] <a href=\"/\">");
        assert_eq!(describe_match(&tree, text), "[2]");
    }

    #[test]
    fn test_describe_selector_marks_forms() {
        let list = parse("div#a.b > p [x]");
        assert_eq!(
            describe_selector(&list.selectors()[0]),
            "div#a.b (compound) > p (bare) ␣ [x] (attribute)"
        );
    }

    #[test]
    fn test_matches_json_skips_empty_attrs() {
        let mut tree = DomTree::new();
        let p = tree.append_element(NodeId::ROOT, "p", &[]);
        let json = matches_json(&tree, &[p]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value, serde_json::json!([{ "node": 1, "tag": "p" }]));
    }

    #[test]
    fn test_parse_json_lists_rejected_clauses() {
        let (list, rejected) = parse_with_diagnostics("p, >");
        let json = parse_json(&list, &rejected).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["canonical"], "p");
        assert_eq!(value["rejected"][0]["clause"], ">");
    }
}
