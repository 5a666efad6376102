//! Selector token types.

use core::fmt;

use crate::selector::Combinator;

/// An attribute clause as lexed, before its operator is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAttribute {
    /// Attribute name.
    pub name: String,
    /// Operator and operand, `None` for a bare `[name]`.
    pub operator: Option<(String, String)>,
}

/// One lexical unit of a selector clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorToken {
    /// A type name, e.g. `div`.
    Ident(String),
    /// `*`
    Universal,
    /// `#id`, holding the id without the sigil.
    Hash(String),
    /// `.class`, holding the class name without the sigil.
    Class(String),
    /// A complete `[...]` clause.
    Attribute(RawAttribute),
    /// A combinator; whitespace runs arrive as a single
    /// [`Combinator::Descendant`].
    Combinator(Combinator),
}

impl SelectorToken {
    /// True for [`SelectorToken::Combinator`].
    #[must_use]
    pub const fn is_combinator(&self) -> bool {
        matches!(self, Self::Combinator(_))
    }
}

impl fmt::Display for RawAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.operator {
            None => write!(f, "[{}]", self.name),
            Some((operator, value)) => write!(f, "[{}{operator}{value}]", self.name),
        }
    }
}

impl fmt::Display for SelectorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(name) => f.write_str(name),
            Self::Universal => f.write_str("*"),
            Self::Hash(id) => write!(f, "#{id}"),
            Self::Class(class_name) => write!(f, ".{class_name}"),
            Self::Attribute(attribute) => write!(f, "{attribute}"),
            Self::Combinator(combinator) => write!(f, "{combinator}"),
        }
    }
}
