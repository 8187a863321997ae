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

//! URI templates for matching and expansion.
//!
//! Templates come in two syntaxes: JAX-RS syntax, which allows variables to
//! carry a regular expression, e.g. `/books/{id:[0-9]+}`, and operator syntax,
//! which allows variables to carry a default value, and supports operators to
//! match and expand optional, repeated and joined values, e.g.
//! `/feed{-prefix|/|categories}{-opt|?|q}{-join|&|q,lang}`.
//!
//! Every template is compiled into a regular expression once, and can then
//! be used to match URIs, extracting the variable values, or to expand the
//! template with given values. Templates also define a specificity order,
//! which can be used to sort a route table, so that the most specific
//! template is tried first.

#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]

mod error;
pub mod matcher;
pub mod template;

pub use error::{Error, Result};
pub use matcher::{Match, Matcher};
pub use template::{Operator, Syntax, Template, Token, Variable};
pub use waypoint_uri::Params;
