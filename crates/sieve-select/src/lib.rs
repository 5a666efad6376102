//! Selector parsing and tree matching for the Sieve query engine.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tokenizer**: one selector clause to a token stream, top-level comma
//!   splitting that respects brackets and quotes
//! - **Parser**: token streams to a [`SelectorList`] AST; invalid clauses are
//!   dropped, never fatal
//! - **Tree Adapter**: the [`TreeAdapter`] trait through which every tree is
//!   read, with an implementation for [`sieve_dom::DomTree`]
//! - **Matcher**: evaluation of simple selectors and combinator chains
//!   (descendant, `>`, `<`, `+`, `~`)
//! - **Engine**: cache-aware parsing, context resolution and the
//!   [`query`] entry point
//!
//! # Grammar
//!
//! ```text
//! selector-list  := selector ("," selector)*
//! selector       := simple (combinator simple)*
//! combinator     := WS | ">" | "<" | "+" | "~"
//! simple         := ("#" ident | "." ident | ident | "*") attr-clause*
//! attr-clause    := "[" ident (op value)? "]"
//! op             := "=" | "^=" | "$=" | "~=" | "|=" | "*="
//! ```
//!
//! # Not Implemented
//!
//! - Pseudo-classes and pseudo-elements
//! - Namespaces
//! - Escapes in identifiers

/// Tree access trait and document-order comparison.
pub mod adapter;
/// Parsed-selector caches.
pub mod cache;
/// Query engine and context resolution.
pub mod engine;
/// Parse errors.
pub mod error;
/// Selector evaluation.
pub mod matcher;
/// Combinator evaluation options.
pub mod options;
/// Selector list parsing.
pub mod parser;
/// Selector AST.
pub mod selector;
/// Clause tokenizer.
pub mod tokenizer;

pub use adapter::{DocumentOrder, TreeAdapter};
pub use cache::{CacheStats, MemoryCache, NoCache, SelectorCache};
pub use engine::{Context, Engine};
pub use error::{InvalidClause, ParseError};
pub use matcher::{Matcher, unique};
pub use options::{AnchorMode, QueryOptions, SiblingResult};
pub use parser::{parse, parse_selector, parse_with_diagnostics, try_parse};
pub use selector::{
    AttributeConstraint, AttributeTest, Combinator, Selector, SelectorList, SimpleForm,
    SimpleSelector, TypeSelector,
};

/// Run `selector` against `adapter` with default options and no cache.
///
/// Never fails; see [`Engine::query`].
#[must_use]
pub fn query<A: TreeAdapter + ?Sized>(
    adapter: &A,
    selector: &str,
    context: Context<'_, A::Node>,
) -> Vec<A::Node> {
    Engine::new(adapter).query(selector, context)
}
