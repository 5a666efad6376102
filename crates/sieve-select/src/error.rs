//! Parse errors.
//!
//! The lenient entry points never surface these; they are reported through
//! the warning channel and exposed by the strict parsing functions.

use thiserror::Error;

/// Why a single comma-separated clause could not be parsed.
///
/// Offsets are character positions within the clause, not the whole list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A character that starts no token.
    #[error("unexpected character '{ch}' at offset {offset}")]
    UnexpectedCharacter {
        /// The offending character.
        ch: char,
        /// Position of the character.
        offset: usize,
    },

    /// `#`, `.` or `[` not followed by an identifier.
    #[error("expected an identifier after '{after}' at offset {offset}")]
    ExpectedIdentifier {
        /// The sigil that needed a name.
        after: char,
        /// Position just past the sigil.
        offset: usize,
    },

    /// `[` with no matching `]`.
    #[error("attribute clause opened at offset {offset} is never closed")]
    UnterminatedAttribute {
        /// Position of the `[`.
        offset: usize,
    },

    /// A quoted attribute value with no closing quote.
    #[error("quoted value starting at offset {offset} is never closed")]
    UnterminatedString {
        /// Position of the opening quote.
        offset: usize,
    },

    /// A combinator at the start or end of a clause, or two in a row.
    #[error("combinator '{combinator}' is missing an operand")]
    MissingOperand {
        /// The combinator as written (`" "` for descendant).
        combinator: String,
    },

    /// More than one `#id` in a simple selector.
    #[error("a simple selector may carry only one id")]
    DuplicateId,

    /// Anything other than another `[...]` after an attribute clause.
    #[error("'{token}' may not follow an attribute clause")]
    AttributeNotLast {
        /// The token that followed.
        token: String,
    },

    /// A type or universal selector after an id or class.
    #[error("type selector '{name}' must come first in a simple selector")]
    MisplacedType {
        /// The type name as written.
        name: String,
    },

    /// Nothing between two commas, or at either end of the list.
    #[error("empty selector")]
    EmptyClause,
}

/// A comma-separated clause the parser rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid selector '{clause}': {error}")]
pub struct InvalidClause {
    /// The clause text, trimmed.
    pub clause: String,
    /// What went wrong.
    pub error: ParseError,
}
