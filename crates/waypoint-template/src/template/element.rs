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

//! Template element.

use waypoint_uri::Params;
use waypoint_uri::encoding::encode_string;

use crate::error::{Error, Result};

use super::operator::Operator;
use super::pattern::{DEFAULT, GROUP_PREFIX, non_capturing};
use super::variable::Variable;

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Template element.
#[derive(Clone, Debug)]
pub enum Element {
    /// Literal text, as matched and expanded.
    Literal(String),
    /// Variable.
    Variable(Variable),
    /// Operator applied to variables.
    Operation {
        /// Operator.
        operator: Operator,
        /// Separator.
        separator: String,
        /// Variables.
        variables: Vec<Variable>,
    },
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Element {
    /// Appends the element's pattern, using the given index for its group.
    pub fn write_pattern(&self, index: usize, output: &mut String) {
        let group = format!("{GROUP_PREFIX}{index}");
        match self {
            Element::Literal(value) => output.push_str(&regex::escape(value)),
            Element::Variable(var) => {
                let pattern = var.pattern().map_or(DEFAULT.into(), non_capturing);
                output.push_str(&format!("(?P<{group}>{pattern})"));
            }
            Element::Operation { operator, separator, variables } => {
                output.push_str(&operator.pattern(&group, separator, variables));
            }
        }
    }

    /// Binds the value captured by the element's group.
    pub fn capture(&self, matched: Option<&str>, values: &mut Params) {
        match self {
            Element::Literal(_) => {}
            Element::Variable(var) => match matched {
                Some(value) => values.add(var.name(), value),
                None => values.add_null(var.name()),
            },
            Element::Operation { operator, separator, variables } => {
                operator.capture(separator, variables, matched, values);
            }
        }
    }

    /// Appends the element's expansion with the given values.
    ///
    /// Plain variables use their first value, or their default value if the
    /// variable is unbound, bound to an empty list or its first value is
    /// `None`. Values are percent-encoded, literals are written as they are.
    pub fn expand(&self, values: &Params, output: &mut String) -> Result {
        match self {
            Element::Literal(value) => output.push_str(value),
            Element::Variable(var) => {
                let value = values
                    .get(var.name())
                    .or(var.default())
                    .ok_or_else(|| {
                        Error::MissingVariable(var.name().to_string())
                    })?;
                output.push_str(&encode_string(value));
            }
            Element::Operation { operator, separator, variables } => {
                operator.expand(separator, variables, values, output)?;
            }
        }

        // No errors occurred
        Ok(())
    }

    /// Returns an iterator over the element's variables.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        let variables = match self {
            Element::Literal(_) => &[][..],
            Element::Variable(var) => std::slice::from_ref(var),
            Element::Operation { variables, .. } => variables.as_slice(),
        };
        variables.iter()
    }
}
