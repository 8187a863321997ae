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

//! Template variable.

use std::fmt;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Template variable.
///
/// Variables are named placeholders, which might carry an explicit pattern
/// (JAX-RS syntax, e.g. `{id:[0-9]+}`) or a default value (operator syntax,
/// e.g. `{id=0}`). The same name might appear more than once in a template,
/// in which case all occurrences contribute values to the same binding.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Variable {
    /// Variable name.
    name: String,
    /// Explicit pattern, if any.
    pattern: Option<String>,
    /// Default value, if any.
    default: Option<String>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Variable {
    /// Creates a variable.
    pub(crate) fn new(
        name: &str, pattern: Option<&str>, default: Option<&str>,
    ) -> Self {
        Self {
            name: name.to_string(),
            pattern: pattern.map(ToString::to_string),
            default: default.map(ToString::to_string),
        }
    }
}

#[allow(clippy::must_use_candidate)]
impl Variable {
    /// Returns the variable name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the explicit pattern, if any.
    #[inline]
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    /// Returns the default value, if any.
    #[inline]
    pub fn default(&self) -> Option<&str> {
        self.default.as_deref()
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl fmt::Display for Variable {
    /// Formats the variable for display.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(pattern) = &self.pattern {
            write!(f, ":{pattern}")?;
        }
        if let Some(default) = &self.default {
            write!(f, "={default}")?;
        }
        Ok(())
    }
}
