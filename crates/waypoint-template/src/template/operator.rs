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

//! Template operator.

use std::fmt;
use std::str::FromStr;
use waypoint_uri::Params;
use waypoint_uri::encoding::encode_string;

use crate::error::{Error, Result};

use super::pattern::VALUE;
use super::variable::Variable;

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Template operator.
///
/// Operators are written as `{-operator|separator|variables}`, and control how
/// optional, repeated or joined values are matched and expanded. Operators are
/// resolved once when a template is compiled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Values joined by the separator.
    List,
    /// `name=value` pairs joined by the separator.
    Join,
    /// Separator, if none of the variables is bound.
    Neg,
    /// Separator, if any of the variables is bound.
    Opt,
    /// Separator before each value.
    Prefix,
    /// Separator after each value.
    Suffix,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Operator {
    /// Returns the operator name.
    ///
    /// # Examples
    ///
    /// ```
    /// use waypoint_template::Operator;
    ///
    /// // Obtain operator name
    /// assert_eq!(Operator::Prefix.as_str(), "prefix");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Operator::List => "list",
            Operator::Join => "join",
            Operator::Neg => "neg",
            Operator::Opt => "opt",
            Operator::Prefix => "prefix",
            Operator::Suffix => "suffix",
        }
    }

    /// Returns whether the operator accepts exactly one variable.
    #[must_use]
    pub const fn is_single(self) -> bool {
        matches!(self, Operator::List | Operator::Prefix | Operator::Suffix)
    }

    /// Returns the pattern for the given capture group.
    pub(crate) fn pattern(
        self, group: &str, separator: &str, variables: &[Variable],
    ) -> String {
        let sep = regex::escape(separator);
        match self {
            Operator::Neg | Operator::Opt => format!("(?P<{group}>{sep})?"),
            Operator::Prefix => format!("(?P<{group}>(?:{sep}{VALUE})*)"),
            Operator::Suffix => format!("(?P<{group}>(?:{VALUE}{sep})*)"),
            Operator::List => {
                format!("(?P<{group}>{VALUE}(?:{sep}{VALUE})*)")
            }
            Operator::Join => {
                let pair = variables
                    .iter()
                    .map(|var| format!("(?:{}={VALUE})", regex::escape(var.name())))
                    .collect::<Vec<_>>()
                    .join("|");
                format!("(?P<{group}>(?:{pair})(?:{sep}(?:{pair}))*)?")
            }
        }
    }

    /// Binds the values captured for the operator.
    ///
    /// The captured string is `None` if the operator's group didn't take part
    /// in the match, which can only happen for optional groups. Values are
    /// appended to those bound by earlier occurrences of the same variable.
    pub(crate) fn capture(
        self, separator: &str, variables: &[Variable], matched: Option<&str>,
        values: &mut Params,
    ) {
        let matched = matched.unwrap_or_default();
        match self {
            Operator::Neg | Operator::Opt => {}

            // Empty matches are bound to `None`, otherwise the first (prefix)
            // or last (suffix) split is empty and must be skipped
            Operator::Prefix | Operator::Suffix => {
                let Some(var) = variables.first() else { return };
                if matched.is_empty() {
                    values.add_null(var.name());
                } else {
                    let mut parts: Vec<_> = matched.split(separator).collect();
                    if self == Operator::Prefix {
                        parts.remove(0);
                    } else {
                        parts.pop();
                    }
                    values.add_all(var.name(), owned(parts));
                }
            }

            // Empty matches are bound to an empty string
            Operator::List => {
                let Some(var) = variables.first() else { return };
                values.add_all(var.name(), owned(matched.split(separator)));
            }

            // Pairs might appear in any order, and all variables are bound,
            // but variables without pair are bound to `None`
            Operator::Join => {
                let pairs: Vec<_> = matched
                    .split(separator)
                    .filter(|pair| !pair.is_empty())
                    .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
                    .collect();
                for var in variables {
                    let value = pairs
                        .iter()
                        .rev()
                        .find(|(name, _)| *name == var.name())
                        .map(|(_, value)| (*value).to_string());
                    values.add_all(var.name(), [value]);
                }
            }
        }
    }

    /// Expands the operator with the given values.
    pub(crate) fn expand(
        self, separator: &str, variables: &[Variable], values: &Params,
        output: &mut String,
    ) -> Result {
        let bound = || {
            variables
                .iter()
                .any(|var| !values.get_all(var.name()).is_empty())
        };
        match self {
            Operator::Neg => {
                if !bound() {
                    output.push_str(separator);
                }
            }
            Operator::Opt => {
                if bound() {
                    output.push_str(separator);
                }
            }

            // Operators accepting a single variable ignore `None` values
            Operator::Prefix | Operator::Suffix | Operator::List => {
                let Some(var) = variables.first() else {
                    return Ok(());
                };
                let iter = values.get_all(var.name()).iter().flatten();
                for (i, value) in iter.enumerate() {
                    match self {
                        Operator::Prefix => output.push_str(separator),
                        Operator::List if i > 0 => output.push_str(separator),
                        _ => {}
                    }
                    output.push_str(&encode_string(value));
                    if self == Operator::Suffix {
                        output.push_str(separator);
                    }
                }
            }

            // Pairs are expanded in the order of the variables
            Operator::Join => {
                let mut first = true;
                for var in variables {
                    let value = match values.get_all(var.name()) {
                        [] | [None] => continue,
                        [Some(value)] => value,
                        _ => {
                            let name = var.name().to_string();
                            return Err(Error::MultipleValues(name));
                        }
                    };
                    if !first {
                        output.push_str(separator);
                    }
                    output.push_str(var.name());
                    output.push('=');
                    output.push_str(&encode_string(value));
                    first = false;
                }
            }
        }

        // No errors occurred
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl FromStr for Operator {
    type Err = Error;

    /// Attempts to create an operator from a string.
    ///
    /// # Errors
    ///
    /// If the operator is not known, [`Error::UnknownOperator`] is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use waypoint_template::Operator;
    ///
    /// // Create operator from string
    /// let operator: Operator = "join".parse()?;
    /// assert_eq!(operator, Operator::Join);
    /// # Ok(())
    /// # }
    /// ```
    fn from_str(value: &str) -> Result<Self> {
        match value {
            "list" => Ok(Operator::List),
            "join" => Ok(Operator::Join),
            "neg" => Ok(Operator::Neg),
            "opt" => Ok(Operator::Opt),
            "prefix" => Ok(Operator::Prefix),
            "suffix" => Ok(Operator::Suffix),
            _ => Err(Error::UnknownOperator(value.to_string())),
        }
    }
}

// ----------------------------------------------------------------------------

impl fmt::Display for Operator {
    /// Formats the operator for display.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Converts borrowed strings into owned values for binding.
fn owned<'a, I>(iter: I) -> impl Iterator<Item = Option<String>>
where
    I: IntoIterator<Item = &'a str>,
{
    iter.into_iter().map(|value| Some(value.to_string()))
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
