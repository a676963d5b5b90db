//! Raw contract clauses and the invocation shape behind them.
//!
//! A clause arrives as the text of one declarative statement, e.g.
//! `Contract.Requires<ArgumentException>(x < 100, "x too large");`.
//! [`ClauseCall::parse`] splits it into marker, type argument and top-level
//! arguments without needing a full expression parser.

use crate::scan::matching_angle;

/// One declarative clause attached to a member.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Clause {
    text: String,
    position: usize,
}

impl Clause {
    pub fn new(text: impl Into<String>) -> Self {
        Self::at(text, 0)
    }

    /// A clause at a given source position; clauses are ordered by position.
    pub fn at(text: impl Into<String>, position: usize) -> Self {
        Self {
            text: text.into(),
            position,
        }
    }

    /// Clause text without surrounding whitespace or a trailing `;`.
    pub fn text(&self) -> &str {
        let text = self.text.trim();
        text.strip_suffix(';').map(str::trim_end).unwrap_or(text)
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Split the clause into its invocation parts, if it is a well-formed call.
    pub fn call(&self) -> Option<ClauseCall<'_>> {
        ClauseCall::parse(self.text())
    }
}

/// A clause invocation: `Marker<TypeArgument>(arg0, arg1, ...)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseCall<'a> {
    pub marker: &'a str,
    pub type_argument: Option<&'a str>,
    pub arguments: Vec<&'a str>,
}

impl<'a> ClauseCall<'a> {
    /// Parse `text` as a single call. Returns `None` for anything else:
    /// unbalanced delimiters, trailing text after the closing parenthesis,
    /// or empty arguments.
    pub fn parse(text: &'a str) -> Option<Self> {
        let text = text.trim();

        let marker_end = text
            .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.'))
            .unwrap_or(text.len());
        let marker = &text[..marker_end];
        if marker.is_empty() {
            return None;
        }

        let mut rest = &text[marker_end..];
        let mut type_argument = None;
        if rest.starts_with('<') {
            let close = matching_angle(rest)?;
            let argument = rest[1..close].trim();
            if argument.is_empty() {
                return None;
            }
            type_argument = Some(argument);
            rest = &rest[close + 1..];
        }

        let rest = rest.trim_start();
        let body = rest.strip_prefix('(')?;
        let (arguments, consumed) = split_arguments(body)?;
        if !body[consumed..].trim().is_empty() {
            return None;
        }

        Some(ClauseCall {
            marker,
            type_argument,
            arguments,
        })
    }

    /// First argument: the asserted condition.
    pub fn condition(&self) -> Option<&'a str> {
        self.arguments.first().copied()
    }

    /// Second argument: the user-supplied message expression.
    pub fn message(&self) -> Option<&'a str> {
        self.arguments.get(1).copied()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Lex {
    Code,
    Str,
    Verbatim,
    Char,
}

/// Split the text following an opening `(` into top-level arguments.
///
/// Returns the trimmed arguments and the byte offset just past the matching
/// `)`. Commas nested in brackets or literals do not split.
fn split_arguments(body: &str) -> Option<(Vec<&str>, usize)> {
    let mut arguments = Vec::new();
    let mut depth = 0usize;
    let mut state = Lex::Code;
    let mut start = 0;
    let mut prev = '\0';
    let mut chars = body.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match state {
            Lex::Code => match c {
                '"' if prev == '@' => state = Lex::Verbatim,
                '"' => state = Lex::Str,
                '\'' => state = Lex::Char,
                '(' | '[' | '{' => depth += 1,
                ')' if depth == 0 => {
                    let last = body[start..i].trim();
                    if last.is_empty() {
                        // `()` has no arguments; `(a, )` is malformed
                        if !arguments.is_empty() {
                            return None;
                        }
                    } else {
                        arguments.push(last);
                    }
                    if arguments.is_empty() {
                        return None;
                    }
                    return Some((arguments, i + 1));
                }
                ']' | '}' if depth == 0 => return None,
                ')' | ']' | '}' => depth -= 1,
                ',' if depth == 0 => {
                    let argument = body[start..i].trim();
                    if argument.is_empty() {
                        return None;
                    }
                    arguments.push(argument);
                    start = i + 1;
                }
                _ => {}
            },
            Lex::Str | Lex::Char => match c {
                '\\' => {
                    chars.next();
                }
                '"' if state == Lex::Str => state = Lex::Code,
                '\'' if state == Lex::Char => state = Lex::Code,
                _ => {}
            },
            Lex::Verbatim => {
                if c == '"' {
                    if matches!(chars.peek(), Some((_, '"'))) {
                        chars.next();
                    } else {
                        state = Lex::Code;
                    }
                }
            }
        }
        prev = c;
    }

    None
}
