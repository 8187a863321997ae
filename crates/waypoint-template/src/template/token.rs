// Copyright (c) 2025 Zensical and contributors

// SPDX-License-Identifier: MIT
// Third-party contributions licensed under DCO

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to
// deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NON-INFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
// FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS
// IN THE SOFTWARE.

// ----------------------------------------------------------------------------

//! Template tokenizer.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::error::{Error, Result};

use super::Syntax;
use super::operator::Operator;

// ----------------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------------

/// Variable regex for JAX-RS syntax, i.e. `{name}` or `{name:pattern}`.
///
/// Patterns might contain balanced pairs of braces, which allows for the use
/// of escaped braces and quantifiers, e.g. `{var:(a\{b\}c)*}`.
static JAXRS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\{[ \t]*(?P<name>[0-9A-Za-z_][0-9A-Za-z_.\-]*)[ \t]*",
        r"(?::[ \t]*(?P<pattern>(?:[^{}]|\{[^{}]*\})*)[ \t]*)?\}",
    ))
    .unwrap()
});

/// Variable and operator regex for operator syntax, i.e. `{name}`,
/// `{name=default}` or `{-operator|separator|name,name=default}`.
static OPERATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\{(?:",
        r"(?P<name>[0-9A-Za-z_][0-9A-Za-z_.\-]*)",
        r"(?:=(?P<default>(?:[0-9A-Za-z_.!~*'()\-]|%[0-9A-Fa-f][0-9A-Fa-f])*))?",
        r"|-(?P<operator>[A-Za-z]+)\|",
        r"(?P<separator>(?:[;/?:@&=+$,]|[0-9A-Za-z_.!~*'()\-]",
        r"|%[0-9A-Fa-f][0-9A-Fa-f])+)\|",
        r"(?P<variables>[0-9A-Za-z_][0-9A-Za-z_.\-]*",
        r"(?:=(?:[0-9A-Za-z_.!~*'()\-]|%[0-9A-Fa-f][0-9A-Fa-f])*)?",
        r"(?:,[0-9A-Za-z_][0-9A-Za-z_.\-]*",
        r"(?:=(?:[0-9A-Za-z_.!~*'()\-]|%[0-9A-Fa-f][0-9A-Fa-f])*)?)*)",
        r")\}",
    ))
    .unwrap()
});

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Template token.
///
/// Tokenizing a template yields an alternating sequence of literals and
/// placeholders, which always starts and ends with a literal, so adjacent
/// placeholders are separated by an empty literal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    /// Literal text.
    Literal(&'a str),
    /// Variable.
    Variable {
        /// Variable name.
        name: &'a str,
        /// Explicit pattern (JAX-RS syntax).
        pattern: Option<&'a str>,
        /// Default value (operator syntax).
        default: Option<&'a str>,
    },
    /// Operator applied to variables (operator syntax).
    Operator {
        /// Operator.
        operator: Operator,
        /// Separator.
        separator: &'a str,
        /// Variable names and default values.
        variables: Vec<(&'a str, Option<&'a str>)>,
    },
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Splits a template into tokens.
///
/// # Errors
///
/// This function returns an error if the template contains braces that are
/// not part of a valid variable or operator, or if an operator is unknown or
/// applied to the wrong number of variables.
///
/// # Examples
///
/// ```
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// use waypoint_template::{Syntax, Token};
/// use waypoint_template::template::tokenize;
///
/// // Split template into tokens
/// let tokens = tokenize("/books/{id:[0-9]+}", Syntax::JaxRs)?;
/// assert_eq!(tokens, [
///     Token::Literal("/books/"),
///     Token::Variable { name: "id", pattern: Some("[0-9]+"), default: None },
///     Token::Literal(""),
/// ]);
/// # Ok(())
/// # }
/// ```
pub fn tokenize(template: &str, syntax: Syntax) -> Result<Vec<Token<'_>>> {
    let regex = match syntax {
        Syntax::JaxRs => &*JAXRS_RE,
        Syntax::Operator => &*OPERATOR_RE,
    };

    // Emit the literal before each placeholder, then the placeholder
    let mut tokens = Vec::new();
    let mut start = 0;
    for captures in regex.captures_iter(template) {
        let range = captures.get_match().range();
        tokens.push(literal(&template[start..range.start], syntax)?);
        tokens.push(match syntax {
            Syntax::JaxRs => variable(&captures),
            Syntax::Operator => placeholder(&captures)?,
        });
        start = range.end;
    }

    // Emit trailing literal, which might be empty
    tokens.push(literal(&template[start..], syntax)?);
    Ok(tokens)
}

// ----------------------------------------------------------------------------

/// Creates a literal token, ensuring that it doesn't contain braces.
fn literal(value: &str, syntax: Syntax) -> Result<Token<'_>> {
    if value.contains(['{', '}']) {
        Err(diagnose(value, syntax))
    } else {
        Ok(Token::Literal(value))
    }
}

/// Creates a variable token from JAX-RS syntax.
fn variable<'a>(captures: &Captures<'a>) -> Token<'a> {
    Token::Variable {
        name: captures.name("name").map_or("", |m| m.as_str()),
        pattern: captures
            .name("pattern")
            .map(|m| m.as_str())
            .filter(|pattern| !pattern.is_empty()),
        default: None,
    }
}

/// Creates a variable or operator token from operator syntax.
fn placeholder<'a>(captures: &Captures<'a>) -> Result<Token<'a>> {
    let Some(operator) = captures.name("operator") else {
        return Ok(Token::Variable {
            name: captures.name("name").map_or("", |m| m.as_str()),
            pattern: None,
            default: captures.name("default").map(|m| m.as_str()),
        });
    };

    // Variables are separated by `,`, default values by `=`
    let operator: Operator = operator.as_str().parse()?;
    let list = captures.name("variables").map_or("", |m| m.as_str());
    let mut variables: Vec<(&str, Option<&str>)> = Vec::new();
    for var in list.split(',') {
        let (name, default) = match var.split_once('=') {
            Some((name, default)) => (name, Some(default)),
            None => (var, None),
        };
        if variables.iter().all(|(other, _)| *other != name) {
            variables.push((name, default));
        }
    }

    // Ensure operator is applied to the right number of variables
    if operator.is_single() && variables.len() > 1 {
        return Err(Error::OperatorArity(operator.as_str()));
    }
    Ok(Token::Operator {
        operator,
        separator: captures.name("separator").map_or("", |m| m.as_str()),
        variables,
    })
}

/// Determines the error for a literal containing braces.
fn diagnose(value: &str, syntax: Syntax) -> Error {
    let Some(start) = value.find('{') else {
        return Error::Syntax(value.to_string());
    };

    // The block ends at the next brace, which must be a closing one
    let rest = &value[start + 1..];
    let body = match rest.find(['{', '}']) {
        Some(end) if rest[end..].starts_with('}') => &rest[..end],
        _ => return Error::Unclosed(value[start..].to_string()),
    };
    if body.trim().is_empty() {
        return Error::EmptyVariable(value.to_string());
    }

    // Operators are split into exactly three parts, and need a separator
    let Some(op) = body.strip_prefix('-') else {
        return Error::Syntax(body.to_string());
    };
    if syntax != Syntax::Operator {
        return Error::Syntax(body.to_string());
    }
    let parts: Vec<_> = op.split('|').collect();
    match parts.as_slice() {
        [_, "", _] => Error::OperatorSyntax(body.to_string()),
        [name, _, list] => match name.parse::<Operator>() {
            Err(err) => err,
            Ok(operator) if list.is_empty() => {
                Error::OperatorVariables(operator.as_str().to_string())
            }
            Ok(_) => Error::Syntax(body.to_string()),
        },
        _ => Error::OperatorSyntax(body.to_string()),
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
