//! Selector AST.
//!
//! The grammar is a deliberately small subset of
//! [Selectors Level 4](https://www.w3.org/TR/selectors-4/): type, universal,
//! id, class and attribute selectors, joined by combinators. AST values are
//! immutable once parsed and hold no reference to any tree.

use std::fmt;

use serde::Serialize;
use strum_macros::{Display, EnumString};

use crate::adapter::TreeAdapter;

/// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
/// and [§ 5.2 Universal selector](https://www.w3.org/TR/selectors-4/#universal-selector)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum TypeSelector {
    /// `*` matches any element.
    Universal,
    /// A tag name, compared ASCII case-insensitively.
    ///
    /// Examples: `div`, `p`, `my-widget`
    Name(String),
}

impl TypeSelector {
    /// Whether an element with tag `tag_name` satisfies this type selector.
    #[must_use]
    pub fn matches(&self, tag_name: &str) -> bool {
        match self {
            Self::Universal => true,
            Self::Name(name) => name.eq_ignore_ascii_case(tag_name),
        }
    }
}

/// [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
///
/// The test applied to an attribute's value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum AttributeTest {
    /// `[attr]`: attribute present, any value.
    Exists,
    /// `[attr=val]`: value is exactly `val`.
    Equals(String),
    /// `[attr^=val]`: value starts with `val`.
    Prefix(String),
    /// `[attr$=val]`: value ends with `val`.
    Suffix(String),
    /// `[attr~=val]`: `val` occurs anywhere in the value.
    ///
    /// NOTE: Selectors Level 4 defines `~=` as a whitespace-separated word
    /// match. This engine keeps the substring reading, making `~=` an alias
    /// of `*=`.
    Includes(String),
    /// `[attr|=val]`: value is `val` or starts with `val-`.
    ///
    /// Example: `[lang|=en]` matches `lang="en"` and `lang="en-US"`
    DashMatch(String),
    /// `[attr*=val]`: `val` occurs anywhere in the value.
    Substring(String),
    /// Any other operator. Kept so the clause still parses; it never matches.
    Unsupported {
        /// Operator text as written, e.g. `!=`.
        operator: String,
        /// Operand as written.
        value: String,
    },
}

impl AttributeTest {
    /// Build the test for an operator token and its operand.
    #[must_use]
    pub fn from_operator(operator: &str, value: String) -> Self {
        match operator {
            "=" => Self::Equals(value),
            "^=" => Self::Prefix(value),
            "$=" => Self::Suffix(value),
            "~=" => Self::Includes(value),
            "|=" => Self::DashMatch(value),
            "*=" => Self::Substring(value),
            _ => Self::Unsupported {
                operator: operator.to_string(),
                value,
            },
        }
    }

    /// Operator and operand, `None` for [`AttributeTest::Exists`].
    #[must_use]
    pub fn operator(&self) -> Option<(&str, &str)> {
        match self {
            Self::Exists => None,
            Self::Equals(v) => Some(("=", v)),
            Self::Prefix(v) => Some(("^=", v)),
            Self::Suffix(v) => Some(("$=", v)),
            Self::Includes(v) => Some(("~=", v)),
            Self::DashMatch(v) => Some(("|=", v)),
            Self::Substring(v) => Some(("*=", v)),
            Self::Unsupported { operator, value } => Some((operator, value)),
        }
    }

    /// Evaluate the test against an attribute value (`None` when absent).
    #[must_use]
    pub fn matches(&self, value: Option<&str>) -> bool {
        let Some(actual) = value else {
            return false;
        };
        match self {
            Self::Exists => true,
            Self::Equals(v) => actual == v,
            Self::Prefix(v) => actual.starts_with(v.as_str()),
            Self::Suffix(v) => actual.ends_with(v.as_str()),
            Self::Includes(v) | Self::Substring(v) => actual.contains(v.as_str()),
            Self::DashMatch(v) => {
                actual == v
                    || actual
                        .strip_prefix(v.as_str())
                        .is_some_and(|rest| rest.starts_with('-'))
            }
            Self::Unsupported { .. } => false,
        }
    }
}

/// One bracketed clause: an attribute name and the test on its value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AttributeConstraint {
    /// Attribute name, matched exactly.
    pub name: String,
    /// Test applied to the attribute's value.
    pub test: AttributeTest,
}

impl AttributeConstraint {
    /// `[name]`
    #[must_use]
    pub fn exists(name: &str) -> Self {
        Self {
            name: name.to_string(),
            test: AttributeTest::Exists,
        }
    }

    /// `[name<op>value]`
    #[must_use]
    pub fn with_operator(name: &str, operator: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            test: AttributeTest::from_operator(operator, value.to_string()),
        }
    }
}

/// Grammar form of a simple selector, in the order the parser tries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SimpleForm {
    /// Exactly one of `#id`, `.class`, `tag` or `*`.
    Bare,
    /// A type followed by id and/or class tokens, e.g. `div#main.wide`.
    Compound,
    /// Anything ending in one or more `[...]` clauses.
    Attribute,
}

/// A predicate over a single element. All present constraints are ANDed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct SimpleSelector {
    /// Optional type constraint.
    pub tag: Option<TypeSelector>,
    /// Optional id constraint.
    pub id: Option<String>,
    /// The element must carry every one of these classes.
    pub classes: Vec<String>,
    /// Every clause must hold.
    pub attributes: Vec<AttributeConstraint>,
}

impl SimpleSelector {
    /// `tag`
    #[must_use]
    pub fn tag(name: &str) -> Self {
        Self {
            tag: Some(TypeSelector::Name(name.to_string())),
            ..Self::default()
        }
    }

    /// `*`
    #[must_use]
    pub fn universal() -> Self {
        Self {
            tag: Some(TypeSelector::Universal),
            ..Self::default()
        }
    }

    /// `#id`
    #[must_use]
    pub fn id(id: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            ..Self::default()
        }
    }

    /// `.class`
    #[must_use]
    pub fn class(class_name: &str) -> Self {
        Self::default().with_class(class_name)
    }

    /// Add an id constraint.
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Add a class constraint.
    #[must_use]
    pub fn with_class(mut self, class_name: &str) -> Self {
        self.classes.push(class_name.to_string());
        self
    }

    /// Add an attribute clause.
    #[must_use]
    pub fn with_attribute(mut self, constraint: AttributeConstraint) -> Self {
        self.attributes.push(constraint);
        self
    }

    /// True when no constraint at all is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tag.is_none() && self.id.is_none() && self.classes.is_empty() && self.attributes.is_empty()
    }

    /// The grammar form this selector was (or would be) parsed as.
    #[must_use]
    pub fn form(&self) -> SimpleForm {
        if !self.attributes.is_empty() {
            return SimpleForm::Attribute;
        }
        let components =
            usize::from(self.tag.is_some()) + usize::from(self.id.is_some()) + self.classes.len();
        if components <= 1 {
            SimpleForm::Bare
        } else {
            SimpleForm::Compound
        }
    }

    /// Whether `tag_name` satisfies the type constraint. An absent
    /// constraint accepts every tag.
    #[must_use]
    pub fn tag_matches(&self, tag_name: &str) -> bool {
        self.tag.as_ref().is_none_or(|t| t.matches(tag_name))
    }

    /// Evaluate every constraint against `node`. Non-elements never match.
    #[must_use]
    pub fn matches<A: TreeAdapter + ?Sized>(&self, adapter: &A, node: A::Node) -> bool {
        let Some(tag_name) = adapter.tag_name(node) else {
            return false;
        };
        self.tag_matches(tag_name)
            && self
                .id
                .as_deref()
                .is_none_or(|id| adapter.get_attribute(node, "id") == Some(id))
            && self.classes.iter().all(|c| adapter.has_class(node, c))
            && self
                .attributes
                .iter()
                .all(|a| a.test.matches(adapter.get_attribute(node, &a.name)))
    }
}

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
///
/// "A combinator is punctuation that represents a particular kind of
/// relationship between the selectors on either side."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
pub enum Combinator {
    /// `A B`: B is a descendant of A.
    #[strum(to_string = " ")]
    Descendant,
    /// `A > B`: B is a child of A.
    #[strum(to_string = ">")]
    Child,
    /// `A < B`: non-standard mirror of `>`: selects A when B is its child.
    #[strum(to_string = "<")]
    ReverseChild,
    /// `A + B`: B is the element immediately after A.
    #[strum(to_string = "+")]
    NextSibling,
    /// `A ~ B`: B follows A among the same parent's children.
    #[strum(to_string = "~")]
    SubsequentSibling,
}

impl Combinator {
    /// The explicit combinator spelled by `symbol`, if any. Whitespace is
    /// not a symbol; the tokenizer handles descendant runs itself.
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        if symbol.is_whitespace() {
            return None;
        }
        let mut buf = [0u8; 4];
        symbol.encode_utf8(&mut buf).parse().ok()
    }
}

/// A chain of simple selectors joined by combinators, read left to right.
///
/// The last simple selector is the subject. `div > p a` is stored as
/// `head = div`, `rest = [(Child, p), (Descendant, a)]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Selector {
    head: SimpleSelector,
    rest: Vec<(Combinator, SimpleSelector)>,
}

impl Selector {
    /// A chain of one simple selector.
    #[must_use]
    pub const fn new(head: SimpleSelector) -> Self {
        Self {
            head,
            rest: Vec::new(),
        }
    }

    /// Extend the chain on the right.
    #[must_use]
    pub fn then(mut self, combinator: Combinator, simple: SimpleSelector) -> Self {
        self.push(combinator, simple);
        self
    }

    /// Extend the chain on the right in place.
    pub fn push(&mut self, combinator: Combinator, simple: SimpleSelector) {
        self.rest.push((combinator, simple));
    }

    /// Leftmost simple selector.
    #[must_use]
    pub const fn head(&self) -> &SimpleSelector {
        &self.head
    }

    /// Combinator/simple-selector pairs following the head.
    #[must_use]
    pub fn rest(&self) -> &[(Combinator, SimpleSelector)] {
        &self.rest
    }

    /// Rightmost simple selector; the one whose matches are normally returned.
    #[must_use]
    pub fn subject(&self) -> &SimpleSelector {
        self.rest.last().map_or(&self.head, |(_, simple)| simple)
    }

    /// True when the chain has no combinator.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        self.rest.is_empty()
    }

    /// Number of simple selectors in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rest.len() + 1
    }

    /// Always false: a chain holds at least its head.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Simple selectors from left to right.
    pub fn simple_selectors(&self) -> impl Iterator<Item = &SimpleSelector> {
        std::iter::once(&self.head).chain(self.rest.iter().map(|(_, simple)| simple))
    }

    /// Combinators from left to right.
    pub fn combinators(&self) -> impl Iterator<Item = Combinator> + '_ {
        self.rest.iter().map(|&(combinator, _)| combinator)
    }
}

/// Comma-separated alternatives, matched as an ordered union.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct SelectorList(Vec<Selector>);

impl SelectorList {
    /// Empty list; matches nothing.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append an alternative.
    pub fn push(&mut self, selector: Selector) {
        self.0.push(selector);
    }

    /// Alternatives in source order.
    #[must_use]
    pub fn selectors(&self) -> &[Selector] {
        &self.0
    }

    /// Number of alternatives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no alternatives.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Selector> for SelectorList {
    fn from_iter<I: IntoIterator<Item = Selector>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SelectorList {
    type Item = &'a Selector;
    type IntoIter = std::slice::Iter<'a, Selector>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// Display renders canonical text that parses back to an equal AST.

impl fmt::Display for TypeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Universal => f.write_str("*"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

impl fmt::Display for AttributeConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.test.operator() {
            None => write!(f, "[{}]", self.name),
            Some((operator, value)) => {
                let quote = if value.contains('"') { '\'' } else { '"' };
                write!(f, "[{}{operator}{quote}{value}{quote}]", self.name)
            }
        }
    }
}

impl fmt::Display for SimpleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("*");
        }
        if let Some(tag) = &self.tag {
            write!(f, "{tag}")?;
        }
        if let Some(id) = &self.id {
            write!(f, "#{id}")?;
        }
        for class_name in &self.classes {
            write!(f, ".{class_name}")?;
        }
        for attribute in &self.attributes {
            write!(f, "{attribute}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.head)?;
        for (combinator, simple) in &self.rest {
            match combinator {
                Combinator::Descendant => write!(f, " {simple}")?,
                _ => write!(f, " {combinator} {simple}")?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, selector) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{selector}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_operators_on_hyphenated_value() {
        let value = Some("foo-bar");
        assert!(AttributeTest::Prefix("foo".into()).matches(value));
        assert!(AttributeTest::Suffix("bar".into()).matches(value));
        assert!(AttributeTest::Equals("foo-bar".into()).matches(value));
        assert!(!AttributeTest::Equals("foo".into()).matches(value));
        assert!(AttributeTest::DashMatch("foo".into()).matches(value));
        assert!(AttributeTest::Includes("o-b".into()).matches(value));
        assert!(AttributeTest::Substring("o-b".into()).matches(value));
    }

    #[test]
    fn test_dash_match_requires_hyphen_boundary() {
        let test = AttributeTest::DashMatch("en".into());
        assert!(test.matches(Some("en")));
        assert!(test.matches(Some("en-US")));
        assert!(!test.matches(Some("english")));
        assert!(!test.matches(Some("fr-en")));
    }

    #[test]
    fn test_absent_attribute_never_matches() {
        assert!(!AttributeTest::Exists.matches(None));
        assert!(!AttributeTest::Equals(String::new()).matches(None));
        assert!(AttributeTest::Exists.matches(Some("")));
    }

    #[test]
    fn test_unsupported_operator_fails_closed() {
        let test = AttributeTest::from_operator("!=", "x".into());
        assert!(matches!(&test, AttributeTest::Unsupported { operator, .. } if operator == "!="));
        assert!(!test.matches(Some("x")));
        assert!(!test.matches(Some("y")));
    }

    #[test]
    fn test_simple_form_classification() {
        assert_eq!(SimpleSelector::tag("div").form(), SimpleForm::Bare);
        assert_eq!(SimpleSelector::universal().form(), SimpleForm::Bare);
        assert_eq!(SimpleSelector::id("x").form(), SimpleForm::Bare);
        assert_eq!(SimpleSelector::tag("div").with_class("a").form(), SimpleForm::Compound);
        assert_eq!(
            SimpleSelector::tag("a")
                .with_attribute(AttributeConstraint::exists("href"))
                .form(),
            SimpleForm::Attribute
        );
    }

    #[test]
    fn test_type_selector_is_case_insensitive() {
        assert!(TypeSelector::Name("DIV".into()).matches("div"));
        assert!(TypeSelector::Universal.matches("anything"));
        assert!(!TypeSelector::Name("div".into()).matches("span"));
    }

    #[test]
    fn test_combinator_symbols() {
        assert_eq!(Combinator::from_symbol('>'), Some(Combinator::Child));
        assert_eq!(Combinator::from_symbol('<'), Some(Combinator::ReverseChild));
        assert_eq!(Combinator::from_symbol('+'), Some(Combinator::NextSibling));
        assert_eq!(Combinator::from_symbol('~'), Some(Combinator::SubsequentSibling));
        assert_eq!(Combinator::from_symbol(' '), None);
        assert_eq!(Combinator::from_symbol('x'), None);
        assert_eq!(Combinator::Child.to_string(), ">");
    }

    #[test]
    fn test_display_canonical_text() {
        let selector = Selector::new(SimpleSelector::tag("div").with_id("main").with_class("a"))
            .then(Combinator::Child, SimpleSelector::tag("p"))
            .then(
                Combinator::Descendant,
                SimpleSelector::tag("a").with_attribute(AttributeConstraint::with_operator(
                    "href", "^=", "https",
                )),
            );
        assert_eq!(selector.to_string(), "div#main.a > p a[href^=\"https\"]");
        assert_eq!(selector.subject(), &selector.rest()[1].1);
        assert_eq!(selector.len(), 3);
    }
}
