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

//! Template matcher.

use std::borrow::Cow;
use waypoint_uri::Params;

use crate::error::{Error, Result};
use crate::template::Template;

mod result;

pub use result::Match;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Template matcher.
///
/// A matcher keeps the result of the last match attempt, which can then be
/// queried through its accessors. Querying a matcher before any attempt, or
/// after an unsuccessful one, returns [`Error::State`]. Since matching needs
/// exclusive access, a matcher can't be shared across concurrent attempts,
/// but any number of matchers can be created for the same template.
///
/// # Examples
///
/// ```
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// use waypoint_template::Template;
///
/// // Create template and matcher
/// let template: Template = "/prefix/{varA}/root/{variableB}/suffix".parse()?;
/// let mut matcher = template.matcher();
///
/// // Match URI and obtain variable values
/// assert!(matcher.matches("/prefix/aaaaaa/root/BbBbB/suffix"));
/// assert_eq!(matcher.variable("varA")?, Some("aaaaaa"));
/// assert_eq!(matcher.variable("variableB")?, Some("BbBbB"));
///
/// // Unsuccessful matches invalidate the previous result
/// assert!(!matcher.matches("aprefix/value/suffix"));
/// assert!(matcher.variable("varA").is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Matcher<'a> {
    /// Template to match against.
    template: &'a Template,
    /// Result of the last match attempt.
    last: Option<Match>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<'a> Matcher<'a> {
    /// Creates a matcher for the given template.
    #[must_use]
    pub fn new(template: &'a Template) -> Self {
        Self { template, last: None }
    }

    /// Returns whether the given URI matches the template.
    ///
    /// The result of the attempt replaces the previous one.
    pub fn matches(&mut self, uri: &str) -> bool {
        self.resolve(uri).is_some()
    }

    /// Matches the given URI against the template.
    ///
    /// The result of the attempt replaces the previous one, and a reference to
    /// it is returned if the match was successful.
    pub fn resolve(&mut self, uri: &str) -> Option<&Match> {
        self.last = self.template.resolve(uri);
        self.last.as_ref()
    }

    /// Returns the result of the last successful match.
    ///
    /// # Errors
    ///
    /// If no match was attempted, or the last one was unsuccessful, this
    /// method returns [`Error::State`].
    pub fn last(&self) -> Result<&Match> {
        self.last.as_ref().ok_or(Error::State)
    }

    /// Returns the first decoded value of the given variable.
    pub fn variable<K>(&self, name: K) -> Result<Option<&str>>
    where
        K: AsRef<str>,
    {
        self.last().map(|last| last.variable(name))
    }

    /// Returns the first value of the given variable.
    pub fn variable_raw<K>(&self, name: K) -> Result<Option<&str>>
    where
        K: AsRef<str>,
    {
        self.last().map(|last| last.variable_raw(name))
    }

    /// Returns all decoded values of the given variable.
    pub fn values<K>(&self, name: K) -> Result<&[Option<String>]>
    where
        K: AsRef<str>,
    {
        self.last().map(|last| last.values(name))
    }

    /// Returns all values of the given variable.
    pub fn values_raw<K>(&self, name: K) -> Result<&[Option<String>]>
    where
        K: AsRef<str>,
    {
        self.last().map(|last| last.values_raw(name))
    }

    /// Returns the decoded variable values.
    pub fn variables(&self) -> Result<&Params> {
        self.last().map(Match::variables)
    }

    /// Returns the variable values.
    pub fn variables_raw(&self) -> Result<&Params> {
        self.last().map(Match::variables_raw)
    }

    /// Returns the decoded head.
    pub fn head(&self) -> Result<Cow<'_, str>> {
        self.last().map(Match::head)
    }

    /// Returns the head.
    pub fn head_raw(&self) -> Result<&str> {
        self.last().map(Match::head_raw)
    }

    /// Returns the decoded tail.
    pub fn tail(&self) -> Result<Cow<'_, str>> {
        self.last().map(Match::tail)
    }

    /// Returns the tail.
    pub fn tail_raw(&self) -> Result<&str> {
        self.last().map(Match::tail_raw)
    }

    /// Returns whether the last match was exact.
    pub fn is_exact(&self) -> Result<bool> {
        self.last().map(Match::is_exact)
    }
}

#[allow(clippy::must_use_candidate)]
impl<'a> Matcher<'a> {
    /// Returns the template.
    #[inline]
    pub fn template(&self) -> &'a Template {
        self.template
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
