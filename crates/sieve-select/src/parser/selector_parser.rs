use crate::error::{InvalidClause, ParseError};
use crate::selector::{
    AttributeConstraint, AttributeTest, Selector, SelectorList, SimpleSelector, TypeSelector,
};
use crate::tokenizer::{SelectorToken, split_clauses, tokenize};

/// Parse a selector list, dropping clauses that do not parse.
///
/// Never fails: an empty or whitespace-only string, or a string in which no
/// clause is valid, yields an empty list.
#[must_use]
pub fn parse(text: &str) -> SelectorList {
    parse_with_diagnostics(text).0
}

/// Parse a selector list, returning the valid alternatives together with
/// every rejected clause.
#[must_use]
pub fn parse_with_diagnostics(text: &str) -> (SelectorList, Vec<InvalidClause>) {
    let mut list = SelectorList::new();
    let mut rejected = Vec::new();
    for clause in split_clauses(text) {
        match parse_selector(clause) {
            Ok(selector) => list.push(selector),
            Err(error) => rejected.push(InvalidClause {
                clause: clause.to_string(),
                error,
            }),
        }
    }
    (list, rejected)
}

/// Parse a selector list, failing on the first invalid clause.
///
/// # Errors
///
/// Returns the first clause that does not parse.
pub fn try_parse(text: &str) -> Result<SelectorList, InvalidClause> {
    let (list, rejected) = parse_with_diagnostics(text);
    match rejected.into_iter().next() {
        Some(invalid) => Err(invalid),
        None => Ok(list),
    }
}

/// Parse one comma-free clause into a combinator chain.
///
/// # Errors
///
/// Returns a [`ParseError`] for lexical errors, a combinator without an
/// operand on either side, or a malformed simple selector.
pub fn parse_selector(clause: &str) -> Result<Selector, ParseError> {
    let tokens = tokenize(clause)?;
    if tokens.is_empty() {
        return Err(ParseError::EmptyClause);
    }
    parse_chain(&tokens)
}

/// Combinator form: split on the first combinator, parse the left side as a
/// simple selector and the right side recursively. Without a combinator the
/// tokens must form a single simple selector.
fn parse_chain(tokens: &[SelectorToken]) -> Result<Selector, ParseError> {
    let first_combinator = tokens.iter().enumerate().find_map(|(index, token)| match token {
        SelectorToken::Combinator(combinator) => Some((index, *combinator)),
        _ => None,
    });
    let Some((split, combinator)) = first_combinator else {
        return parse_simple(tokens).map(Selector::new);
    };

    let (left, right) = (&tokens[..split], &tokens[split + 1..]);
    if left.is_empty() || right.is_empty() || right[0].is_combinator() {
        return Err(ParseError::MissingOperand {
            combinator: combinator.to_string(),
        });
    }

    let right = parse_chain(right)?;
    let mut chain = Selector::new(parse_simple(left)?).then(combinator, right.head().clone());
    for (combinator, simple) in right.rest() {
        chain.push(*combinator, simple.clone());
    }
    Ok(chain)
}

/// Bare, compound or attribute form.
///
/// An optional type or universal selector comes first, followed by id and
/// class tokens in any order (at most one id), followed by attribute
/// clauses.
fn parse_simple(tokens: &[SelectorToken]) -> Result<SimpleSelector, ParseError> {
    let mut simple = SimpleSelector::default();

    for (index, token) in tokens.iter().enumerate() {
        if !simple.attributes.is_empty() && !matches!(token, SelectorToken::Attribute(_)) {
            return Err(ParseError::AttributeNotLast {
                token: token.to_string(),
            });
        }
        match token {
            SelectorToken::Ident(_) | SelectorToken::Universal if index > 0 => {
                return Err(ParseError::MisplacedType {
                    name: token.to_string(),
                });
            }
            SelectorToken::Ident(name) => simple.tag = Some(TypeSelector::Name(name.clone())),
            SelectorToken::Universal => simple.tag = Some(TypeSelector::Universal),
            SelectorToken::Hash(id) => {
                if simple.id.is_some() {
                    return Err(ParseError::DuplicateId);
                }
                simple.id = Some(id.clone());
            }
            SelectorToken::Class(class_name) => simple.classes.push(class_name.clone()),
            SelectorToken::Attribute(raw) => simple.attributes.push(AttributeConstraint {
                name: raw.name.clone(),
                test: raw
                    .operator
                    .as_ref()
                    .map_or(AttributeTest::Exists, |(operator, value)| {
                        AttributeTest::from_operator(operator, value.clone())
                    }),
            }),
            SelectorToken::Combinator(combinator) => {
                return Err(ParseError::MissingOperand {
                    combinator: combinator.to_string(),
                });
            }
        }
    }
    Ok(simple)
}
