//! Selector tokenizer.

/// Token types produced by the tokenizer.
pub mod token;

mod lexer;

pub use lexer::{SelectorTokenizer, split_clauses, tokenize};
pub use token::{RawAttribute, SelectorToken};
