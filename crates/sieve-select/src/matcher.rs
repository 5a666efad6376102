//! Selector evaluation against a [`TreeAdapter`].
//!
//! A single simple selector is resolved with the cheapest lookup the adapter
//! offers (by id, else by the first class, else by tag) and the remaining
//! constraints are applied as a filter.
//!
//! A chain `left OP right...` is evaluated the way it is parsed: the left
//! simple selector gives the anchors, the right-hand remainder is evaluated
//! recursively against the same context to give the candidates, and the
//! combinator decides which candidates (or anchors) survive.

use tracing::trace;

use crate::adapter::{DocumentOrder, TreeAdapter};
use crate::options::{AnchorMode, QueryOptions, SiblingResult};
use crate::selector::{Combinator, Selector, SelectorList, SimpleSelector};

/// Evaluates parsed selectors over one tree.
pub struct Matcher<'t, A: TreeAdapter + ?Sized> {
    adapter: &'t A,
    options: QueryOptions,
}

impl<'t, A: TreeAdapter + ?Sized> Matcher<'t, A> {
    /// Create a matcher reading through `adapter`.
    #[must_use]
    pub const fn new(adapter: &'t A, options: QueryOptions) -> Self {
        Self { adapter, options }
    }

    /// The tree this matcher reads.
    #[must_use]
    pub const fn adapter(&self) -> &'t A {
        self.adapter
    }

    /// Options in effect.
    #[must_use]
    pub const fn options(&self) -> QueryOptions {
        self.options
    }

    /// Evaluate every alternative and concatenate the results in list order.
    /// Nodes matched by more than one alternative appear more than once.
    #[must_use]
    pub fn match_list(&self, list: &SelectorList, context: A::Node) -> Vec<A::Node> {
        list.selectors()
            .iter()
            .flat_map(|selector| self.match_selector(selector, context))
            .collect()
    }

    /// Evaluate one combinator chain within `context`.
    #[must_use]
    pub fn match_selector(&self, selector: &Selector, context: A::Node) -> Vec<A::Node> {
        self.match_chain(selector.head(), selector.rest(), context)
    }

    /// Whether `node` satisfies every constraint of `simple`.
    #[must_use]
    pub fn matches_simple(&self, simple: &SimpleSelector, node: A::Node) -> bool {
        simple.matches(self.adapter, node)
    }

    /// Elements in `context` (inclusive) matching `simple`, in document order.
    #[must_use]
    pub fn resolve_simple(&self, simple: &SimpleSelector, context: A::Node) -> Vec<A::Node> {
        let candidates = if let Some(id) = &simple.id {
            self.adapter.find_by_id(context, id).into_iter().collect()
        } else if let Some(class_name) = simple.classes.first() {
            self.adapter.find_by_class(context, class_name)
        } else {
            let tag = match &simple.tag {
                Some(tag) => tag.to_string(),
                None => "*".to_string(),
            };
            self.adapter.find_by_tag(context, &tag)
        };
        candidates
            .into_iter()
            .filter(|&node| self.matches_simple(simple, node))
            .collect()
    }

    fn match_chain(
        &self,
        head: &SimpleSelector,
        rest: &[(Combinator, SimpleSelector)],
        context: A::Node,
    ) -> Vec<A::Node> {
        let Some(((combinator, right_head), right_rest)) = rest.split_first() else {
            return self.resolve_simple(head, context);
        };

        let mut anchors = self.resolve_simple(head, context);
        if anchors.is_empty() {
            trace!(left = %head, "no anchor");
            return Vec::new();
        }
        if self.options.anchor_mode == AnchorMode::First {
            anchors.truncate(1);
        }
        let candidates = self.match_chain(right_head, right_rest, context);
        trace!(
            %combinator,
            anchors = anchors.len(),
            candidates = candidates.len(),
            "evaluating combinator"
        );

        let relates = |anchor: A::Node, candidate: A::Node| {
            self.relation_holds(*combinator, right_head, anchor, candidate)
        };
        let emit_anchor = match combinator {
            Combinator::ReverseChild => true,
            Combinator::SubsequentSibling => self.options.sibling_result == SiblingResult::Anchor,
            _ => false,
        };

        if emit_anchor {
            anchors
                .into_iter()
                .filter(|&anchor| candidates.iter().any(|&c| relates(anchor, c)))
                .collect()
        } else {
            candidates
                .into_iter()
                .filter(|&c| anchors.iter().any(|&anchor| relates(anchor, c)))
                .collect()
        }
    }

    /// The per-combinator relation between an anchor and a candidate.
    /// `right` is the simple selector immediately right of the combinator;
    /// its type constraint is re-checked for `>`, `<` and `~`.
    fn relation_holds(
        &self,
        combinator: Combinator,
        right: &SimpleSelector,
        anchor: A::Node,
        candidate: A::Node,
    ) -> bool {
        let adapter = self.adapter;
        let tag_matches = || {
            adapter
                .tag_name(candidate)
                .is_some_and(|tag| right.tag_matches(tag))
        };
        match combinator {
            Combinator::Descendant => {
                // Strict: the root and the anchor itself never qualify.
                adapter.is_descendant_of(candidate, anchor)
            }
            Combinator::Child | Combinator::ReverseChild => {
                (adapter.parent(candidate) == Some(anchor) || candidate == anchor) && tag_matches()
            }
            Combinator::NextSibling => adapter.next_element_sibling(anchor) == Some(candidate),
            Combinator::SubsequentSibling => {
                adapter.parent(candidate).is_some()
                    && adapter.parent(candidate) == adapter.parent(anchor)
                    && tag_matches()
                    && adapter.compare_document_order(anchor, candidate) == DocumentOrder::Precedes
            }
        }
    }
}

/// Drop repeated nodes, keeping the first occurrence of each.
#[must_use]
pub fn unique<N: Copy + Eq>(nodes: &[N]) -> Vec<N> {
    let mut seen: Vec<N> = Vec::with_capacity(nodes.len());
    for &node in nodes {
        if !seen.contains(&node) {
            seen.push(node);
        }
    }
    seen
}
