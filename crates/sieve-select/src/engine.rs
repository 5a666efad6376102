//! The query entry point.
//!
//! [`Engine`] ties a tree, a cache and a set of options together: it parses
//! (or recalls) the selector, resolves the context and runs the matcher.

use std::rc::Rc;

use sieve_common::warning::warn_once;
use tracing::debug;

use crate::adapter::TreeAdapter;
use crate::cache::{NoCache, SelectorCache};
use crate::matcher::Matcher;
use crate::options::{AnchorMode, QueryOptions, SiblingResult};
use crate::parser::parse_with_diagnostics;
use crate::selector::SelectorList;

/// Where a query starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context<'s, N> {
    /// The tree root.
    Root,
    /// A specific node.
    Node(N),
    /// The first node of a sequence; an empty sequence resolves to nothing.
    Nodes(&'s [N]),
    /// The first result of querying this selector from the root.
    Selector(&'s str),
}

/// A query engine over one tree.
///
/// ```ignore
/// let engine = Engine::new(&tree).with_cache(MemoryCache::new());
/// let links = engine.query("nav a[href^=https]", Context::Root);
/// ```
pub struct Engine<'t, A: TreeAdapter + ?Sized, C: SelectorCache = NoCache> {
    adapter: &'t A,
    cache: C,
    options: QueryOptions,
}

impl<'t, A: TreeAdapter + ?Sized> Engine<'t, A> {
    /// An engine with default options and no cache.
    #[must_use]
    pub const fn new(adapter: &'t A) -> Self {
        Self {
            adapter,
            cache: NoCache,
            options: QueryOptions {
                anchor_mode: AnchorMode::First,
                sibling_result: SiblingResult::Anchor,
            },
        }
    }
}

impl<'t, A: TreeAdapter + ?Sized, C: SelectorCache> Engine<'t, A, C> {
    /// Replace the cache. Pass `&cache` to keep ownership of it.
    #[must_use]
    pub fn with_cache<D: SelectorCache>(self, cache: D) -> Engine<'t, A, D> {
        Engine {
            adapter: self.adapter,
            cache,
            options: self.options,
        }
    }

    /// Replace the options.
    #[must_use]
    pub fn with_options(mut self, options: QueryOptions) -> Self {
        self.options = options;
        self
    }

    /// Options in effect.
    #[must_use]
    pub const fn options(&self) -> QueryOptions {
        self.options
    }

    /// The cache in use.
    #[must_use]
    pub const fn cache(&self) -> &C {
        &self.cache
    }

    /// The tree being queried.
    #[must_use]
    pub const fn adapter(&self) -> &'t A {
        self.adapter
    }

    /// Parse `selector`, consulting the cache first. Rejected clauses are
    /// reported once each through the warning channel and left out.
    #[must_use]
    pub fn parse(&self, selector: &str) -> Rc<SelectorList> {
        if let Some(list) = self.cache.get(selector) {
            debug!(selector, "selector cache hit");
            return list;
        }
        debug!(selector, "selector cache miss");

        let (list, rejected) = parse_with_diagnostics(selector);
        for invalid in &rejected {
            warn_once("Selector", &invalid.to_string());
        }
        let list = Rc::new(list);
        self.cache.put(selector, Rc::clone(&list));
        list
    }

    /// The node a [`Context`] stands for, if it resolves.
    #[must_use]
    pub fn resolve_context(&self, context: Context<'_, A::Node>) -> Option<A::Node> {
        match context {
            Context::Root => Some(self.adapter.root()),
            Context::Node(node) => Some(node),
            Context::Nodes(nodes) => nodes.first().copied(),
            Context::Selector(selector) => self.query_first(selector, Context::Root),
        }
    }

    /// All nodes matching `selector` within `context`, in list order.
    ///
    /// Never fails: invalid clauses contribute nothing and an unresolvable
    /// context yields an empty result.
    #[must_use]
    pub fn query(&self, selector: &str, context: Context<'_, A::Node>) -> Vec<A::Node> {
        let Some(scope) = self.resolve_context(context) else {
            debug!(selector, "query context did not resolve");
            return Vec::new();
        };
        let list = self.parse(selector);
        let results = Matcher::new(self.adapter, self.options).match_list(&list, scope);
        debug!(selector, matches = results.len(), "query finished");
        results
    }

    /// The first node [`query`](Self::query) would return.
    #[must_use]
    pub fn query_first(&self, selector: &str, context: Context<'_, A::Node>) -> Option<A::Node> {
        self.query(selector, context).into_iter().next()
    }
}
