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

//! Match result.

use std::borrow::Cow;
use std::sync::OnceLock;
use waypoint_uri::Params;
use waypoint_uri::encoding::decode;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Match result.
///
/// A match result holds the variable values extracted from a URI, together
/// with the head, i.e., the part of the URI matched by the template, and the
/// tail, i.e., the unmatched remainder. All accessors return decoded values,
/// and have a `_raw` counterpart returning the values as they appeared in the
/// URI. Decoded variable values are computed once, on first access, while the
/// head and tail are decoded on every call, borrowing from the match result
/// if they contain no escapes.
#[derive(Debug)]
pub struct Match {
    /// Matched head.
    head: String,
    /// Unmatched tail.
    tail: String,
    /// Variable values.
    variables: Params,
    /// Decoded variable values.
    decoded: OnceLock<Params>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Match {
    /// Creates a match result.
    ///
    /// If the template ends with a slash, and the tail consists of only a
    /// slash, the tail is considered part of the head.
    pub(crate) fn new(
        head: &str, tail: &str, slash: bool, variables: Params,
    ) -> Self {
        let mut head = head.to_string();
        if slash && tail == "/" {
            head.push('/');
        }
        Self {
            head,
            tail: tail.to_string(),
            variables,
            decoded: OnceLock::new(),
        }
    }

    /// Returns the first decoded value of the given variable.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use waypoint_template::Template;
    ///
    /// // Create template and match URI
    /// let template: Template = "/books/{id}".parse()?;
    /// let result = template.resolve("/books/a%20b").unwrap();
    /// assert_eq!(result.variable("id"), Some("a b"));
    /// assert_eq!(result.variable_raw("id"), Some("a%20b"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn variable<K>(&self, name: K) -> Option<&str>
    where
        K: AsRef<str>,
    {
        self.decoded().get(name)
    }

    /// Returns the first value of the given variable.
    pub fn variable_raw<K>(&self, name: K) -> Option<&str>
    where
        K: AsRef<str>,
    {
        self.variables.get(name)
    }

    /// Returns all decoded values of the given variable.
    ///
    /// If a variable appears more than once in the template, the values are
    /// returned in order of appearance.
    pub fn values<K>(&self, name: K) -> &[Option<String>]
    where
        K: AsRef<str>,
    {
        self.decoded().get_all(name)
    }

    /// Returns all values of the given variable.
    pub fn values_raw<K>(&self, name: K) -> &[Option<String>]
    where
        K: AsRef<str>,
    {
        self.variables.get_all(name)
    }

    /// Returns the decoded variable values.
    pub fn variables(&self) -> &Params {
        self.decoded()
    }

    /// Returns the variable values.
    pub fn variables_raw(&self) -> &Params {
        &self.variables
    }

    /// Returns the decoded head.
    ///
    /// The head is not cached, but decoded on every call.
    pub fn head(&self) -> Cow<'_, str> {
        decode(&self.head)
    }

    /// Returns the decoded tail.
    ///
    /// The tail is not cached, but decoded on every call.
    pub fn tail(&self) -> Cow<'_, str> {
        decode(&self.tail)
    }

    /// Returns the decoded variable values, decoding them if necessary.
    fn decoded(&self) -> &Params {
        self.decoded.get_or_init(|| self.variables.decoded())
    }
}

#[allow(clippy::must_use_candidate)]
impl Match {
    /// Returns the head.
    #[inline]
    pub fn head_raw(&self) -> &str {
        &self.head
    }

    /// Returns the tail.
    #[inline]
    pub fn tail_raw(&self) -> &str {
        &self.tail
    }

    /// Returns whether the match is exact, i.e., the tail is empty or `/`.
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.tail.is_empty() || self.tail == "/"
    }

    /// Consumes the match result, returning the variable values.
    #[inline]
    pub fn into_variables(self) -> Params {
        self.variables
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
