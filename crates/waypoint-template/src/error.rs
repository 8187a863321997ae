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

//! Template error.

use std::result;
use thiserror::Error;

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Template error.
#[derive(Debug, Error)]
pub enum Error {
    /// No template was provided.
    #[error("no template provided")]
    Missing,

    /// Opening brace without matching closing brace.
    #[error("unclosed variable: {0}")]
    Unclosed(String),

    /// Variable without name.
    #[error("empty variable: {0}")]
    EmptyVariable(String),

    /// Operator block without exactly three parts, or with an empty separator.
    #[error("invalid operator syntax: {0}")]
    OperatorSyntax(String),

    /// Operator is not known.
    #[error("unknown operator: {0}")]
    UnknownOperator(String),

    /// Operator accepts exactly one variable.
    #[error("operator '{0}' accepts exactly one variable")]
    OperatorArity(&'static str),

    /// Operator block without variables.
    #[error("operator '{0}' requires at least one variable")]
    OperatorVariables(String),

    /// Other invalid syntax.
    #[error("invalid template syntax: {0}")]
    Syntax(String),

    /// Variable pattern is not a valid regular expression.
    #[error(transparent)]
    Pattern(#[from] regex::Error),

    /// Variable has neither a value nor a default value.
    #[error("variable '{0}' not supplied a value")]
    MissingVariable(String),

    /// Variable has multiple values, but the operator accepts only one.
    #[error("variable '{0}' has multiple values")]
    MultipleValues(String),

    /// Matcher was queried without a successful match.
    #[error("no successful match")]
    State,
}

// ----------------------------------------------------------------------------
// Type aliases
// ----------------------------------------------------------------------------

/// Template result.
pub type Result<T = ()> = result::Result<T, Error>;
