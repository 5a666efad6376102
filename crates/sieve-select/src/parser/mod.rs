//! Selector parser.
//!
//! Grammar forms are tried in a fixed order: bare (`#id`, `.class`, `tag`,
//! `*`), compound (`tag#id.class`), attribute (`...[attr op value]`), and
//! finally the combinator form, which splits on the first combinator and
//! recurses into the right-hand side.

mod selector_parser;

pub use selector_parser::{parse, parse_selector, parse_with_diagnostics, try_parse};
