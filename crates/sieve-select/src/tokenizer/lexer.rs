use super::token::{RawAttribute, SelectorToken};
use crate::error::ParseError;
use crate::selector::Combinator;

/// Tokenizer for a single selector clause (no top-level commas).
///
/// Whitespace is significant only between two compound parts, where it is
/// the descendant combinator. Whitespace next to an explicit combinator, or
/// at either end of the clause, produces no token.
pub struct SelectorTokenizer {
    /// The clause being tokenized
    input: Vec<char>,
    /// Current position in the input
    position: usize,
    /// Collected tokens
    tokens: Vec<SelectorToken>,
}

impl SelectorTokenizer {
    /// Create a tokenizer for `input`.
    #[must_use]
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into().chars().collect(),
            position: 0,
            tokens: Vec::new(),
        }
    }

    /// Tokenize the whole clause.
    ///
    /// # Errors
    ///
    /// Returns the first lexical error; tokens collected up to that point
    /// stay available through [`tokens`](Self::tokens).
    pub fn run(&mut self) -> Result<(), ParseError> {
        while let Some(c) = self.consume() {
            match c {
                c if is_whitespace(c) => self.consume_whitespace(),

                '>' | '<' | '+' | '~' => {
                    if let Some(combinator) = Combinator::from_symbol(c) {
                        self.tokens.push(SelectorToken::Combinator(combinator));
                    }
                }

                '*' => self.tokens.push(SelectorToken::Universal),

                '#' => {
                    let id = self.consume_name('#')?;
                    self.tokens.push(SelectorToken::Hash(id));
                }

                '.' => {
                    let class_name = self.consume_name('.')?;
                    self.tokens.push(SelectorToken::Class(class_name));
                }

                '[' => {
                    let attribute = self.consume_attribute()?;
                    self.tokens.push(SelectorToken::Attribute(attribute));
                }

                c if is_ident_start(c) => {
                    self.reconsume();
                    let name = self.consume_ident();
                    self.tokens.push(SelectorToken::Ident(name));
                }

                ch => {
                    return Err(ParseError::UnexpectedCharacter {
                        ch,
                        offset: self.position - 1,
                    });
                }
            }
        }
        Ok(())
    }

    /// Return the collected tokens.
    #[must_use]
    pub fn into_tokens(self) -> Vec<SelectorToken> {
        self.tokens
    }

    /// Return a reference to the collected tokens.
    #[must_use]
    pub fn tokens(&self) -> &[SelectorToken] {
        &self.tokens
    }

    /// Consume a whitespace run and decide whether it is a descendant
    /// combinator.
    fn consume_whitespace(&mut self) {
        while self.peek().is_some_and(is_whitespace) {
            let _ = self.consume();
        }
        let after_combinator = self.tokens.last().is_none_or(SelectorToken::is_combinator);
        let before_combinator = self
            .peek()
            .is_none_or(|c| Combinator::from_symbol(c).is_some());
        if !after_combinator && !before_combinator {
            self.tokens
                .push(SelectorToken::Combinator(Combinator::Descendant));
        }
    }

    /// Consume the name following a `#` or `.` sigil.
    fn consume_name(&mut self, sigil: char) -> Result<String, ParseError> {
        let name = self.consume_ident();
        if name.is_empty() {
            return Err(ParseError::ExpectedIdentifier {
                after: sigil,
                offset: self.position,
            });
        }
        Ok(name)
    }

    fn consume_ident(&mut self) -> String {
        let mut name = String::new();
        while let Some(c) = self.peek().filter(|&c| is_ident_char(c)) {
            name.push(c);
            self.position += 1;
        }
        name
    }

    /// Consume `name]`, `name op value]` or `name op "value"]`; the `[` has
    /// already been consumed.
    fn consume_attribute(&mut self) -> Result<RawAttribute, ParseError> {
        let open = self.position - 1;
        self.skip_whitespace();
        let name = self.consume_ident();
        if name.is_empty() {
            return match self.peek() {
                None => Err(ParseError::UnterminatedAttribute { offset: open }),
                Some(_) => Err(ParseError::ExpectedIdentifier {
                    after: '[',
                    offset: self.position,
                }),
            };
        }
        self.skip_whitespace();

        match self.peek() {
            None => return Err(ParseError::UnterminatedAttribute { offset: open }),
            Some(']') => {
                self.position += 1;
                return Ok(RawAttribute {
                    name,
                    operator: None,
                });
            }
            Some(_) => {}
        }

        let operator = self.consume_operator();
        if operator.is_empty() {
            return Err(self.unexpected_or_unterminated(open));
        }
        self.skip_whitespace();

        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                let value = self.consume_quoted(quote)?;
                self.skip_whitespace();
                match self.consume() {
                    Some(']') => value,
                    Some(ch) => {
                        return Err(ParseError::UnexpectedCharacter {
                            ch,
                            offset: self.position - 1,
                        });
                    }
                    None => return Err(ParseError::UnterminatedAttribute { offset: open }),
                }
            }
            _ => self.consume_unquoted(open)?,
        };

        Ok(RawAttribute {
            name,
            operator: Some((operator, value)),
        })
    }

    /// Operator text: every character up to whitespace, a quote, `]` or the
    /// start of a name. Unknown operators are returned as written.
    fn consume_operator(&mut self) -> String {
        let mut operator = String::new();
        while let Some(c) = self
            .peek()
            .filter(|&c| !is_whitespace(c) && !is_ident_char(c) && !matches!(c, '"' | '\'' | ']'))
        {
            operator.push(c);
            self.position += 1;
        }
        operator
    }

    fn consume_quoted(&mut self, quote: char) -> Result<String, ParseError> {
        let start = self.position;
        self.position += 1;
        let mut value = String::new();
        loop {
            match self.consume() {
                Some(c) if c == quote => return Ok(value),
                Some(c) => value.push(c),
                None => return Err(ParseError::UnterminatedString { offset: start }),
            }
        }
    }

    /// Bare value running to `]`, trimmed. Quotes are not allowed inside.
    fn consume_unquoted(&mut self, open: usize) -> Result<String, ParseError> {
        let mut value = String::new();
        loop {
            match self.consume() {
                Some(']') => break,
                Some(ch @ ('"' | '\'' | '[')) => {
                    return Err(ParseError::UnexpectedCharacter {
                        ch,
                        offset: self.position - 1,
                    });
                }
                Some(c) => value.push(c),
                None => return Err(ParseError::UnterminatedAttribute { offset: open }),
            }
        }
        let value = value.trim_end();
        if value.is_empty() {
            return Err(ParseError::UnexpectedCharacter {
                ch: ']',
                offset: self.position - 1,
            });
        }
        Ok(value.to_string())
    }

    fn unexpected_or_unterminated(&self, open: usize) -> ParseError {
        match self.peek() {
            Some(ch) => ParseError::UnexpectedCharacter {
                ch,
                offset: self.position,
            },
            None => ParseError::UnterminatedAttribute { offset: open },
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_whitespace) {
            let _ = self.consume();
        }
    }

    /// Consume the next character.
    fn consume(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += 1;
        Some(c)
    }

    /// Put back the last consumed character.
    fn reconsume(&mut self) {
        if self.position > 0 {
            self.position -= 1;
        }
    }

    /// Peek at the next character without consuming it.
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }
}

/// Tokenize one clause.
///
/// # Errors
///
/// Returns the first lexical error in the clause.
pub fn tokenize(clause: &str) -> Result<Vec<SelectorToken>, ParseError> {
    let mut tokenizer = SelectorTokenizer::new(clause);
    tokenizer.run()?;
    Ok(tokenizer.into_tokens())
}

/// Split a selector list on top-level commas.
///
/// Commas inside `[...]` or inside quotes do not split. Each clause is
/// trimmed; empty clauses are kept so the parser can report them. Text that
/// is empty or only whitespace yields no clauses at all.
///
/// A bracket or quote left open at the end of the text ends its clause at
/// the first comma after the opener, and the rest is split again, so one
/// malformed clause cannot absorb the clauses after it.
#[must_use]
pub fn split_clauses(text: &str) -> Vec<&str> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut clauses = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    // Offset of the opener that left top level, while still open.
    let mut opened_at: Option<usize> = None;

    for (index, c) in text.char_indices() {
        let was_top_level = depth == 0 && quote.is_none();
        match (quote, c) {
            (Some(open), c) if c == open => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '[') => depth += 1,
            (None, ']') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                clauses.push(text[start..index].trim());
                start = index + 1;
            }
            _ => {}
        }
        if depth == 0 && quote.is_none() {
            opened_at = None;
        } else if was_top_level {
            opened_at = Some(index);
        }
    }

    let comma = opened_at.and_then(|open| text[open..].find(',').map(|offset| open + offset));
    match comma {
        Some(comma) => {
            clauses.push(text[start..comma].trim());
            let rest = &text[comma + 1..];
            if rest.trim().is_empty() {
                clauses.push("");
            } else {
                clauses.extend(split_clauses(rest));
            }
        }
        None => clauses.push(text[start..].trim()),
    }
    clauses
}

/// Space, tab or a line break (LF, CR or FF).
const fn is_whitespace(c: char) -> bool {
    matches!(c, '\n' | '\t' | ' ' | '\r' | '\x0C')
}

/// A letter, a non-ASCII code point, or `_`.
const fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

/// Ident start, a digit, or `-`.
const fn is_ident_char(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit() || c == '-'
}
