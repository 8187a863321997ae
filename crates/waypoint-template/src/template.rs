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

//! URI template.

use regex::Regex;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use waypoint_uri::Params;
use waypoint_uri::encoding::encode_uri_template;
use waypoint_uri::path::{remove_dot_segments, remove_trailing_slash};

use crate::error::{Error, Result};
use crate::matcher::{Match, Matcher};

mod element;
mod operator;
mod pattern;
mod token;
mod variable;

use element::Element;
pub use operator::Operator;
pub use pattern::non_capturing;
use pattern::{GROUP_PREFIX, HEAD_GROUP, TAIL, TAIL_EMPTY, TAIL_GROUP};
pub use token::{Token, tokenize};
pub use variable::Variable;

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Template syntax.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Syntax {
    /// JAX-RS syntax, i.e. `{name}` and `{name:pattern}`.
    #[default]
    JaxRs,
    /// Operator syntax, i.e. `{name}`, `{name=default}` and operators, e.g.
    /// `{-prefix|/|name}`.
    Operator,
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// URI template.
///
/// Templates are compiled into a single regular expression, which consists of
/// the head, i.e., all elements of the template, and the tail, which captures
/// the remainder of the URI after the head, if it starts with a slash. This
/// allows for matching URIs of sub-resources, where the tail is handed over to
/// the next template. Templates are immutable, and can be shared freely.
///
/// In JAX-RS syntax, literals are percent-encoded before they are matched or
/// expanded, so templates can be written with characters like spaces, which
/// are matched in their encoded form. A trailing slash is removed from the
/// last literal, so `/books/` and `/books` match the same URIs.
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
/// let result = template.resolve("/books/42/chapters").unwrap();
/// assert_eq!(result.variable("id"), Some("42"));
/// assert_eq!(result.tail(), "/chapters");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Template {
    /// Template string.
    template: String,
    /// Template syntax.
    syntax: Syntax,
    /// Compiled regular expression.
    regex: Regex,
    /// Template elements.
    elements: Vec<Element>,
    /// Element indices and their capture group slots.
    groups: Vec<(usize, usize)>,
    /// Capture group slot of the head.
    head: usize,
    /// Capture group slot of the tail.
    tail: usize,
    /// Distinct variable names, in order of appearance.
    names: Vec<String>,
    /// Number of literal characters.
    literals: usize,
    /// Number of variables with explicit patterns.
    explicit: usize,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Template {
    /// Creates a template.
    ///
    /// # Errors
    ///
    /// This function returns an error if the template syntax is invalid, or a
    /// variable pattern is not a valid regular expression.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use waypoint_template::{Syntax, Template};
    ///
    /// // Create template
    /// let template = Template::new(
    ///     "/feed{-prefix|;page=|page}",
    ///     Syntax::Operator,
    /// )?;
    /// # Ok(())
    /// # }
    /// ```
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn new(template: &str, syntax: Syntax) -> Result<Self> {
        let tokens = tokenize(template, syntax)?;
        let count = tokens.len();

        // Convert tokens into elements and assemble the head pattern
        let mut source = format!("^(?P<{HEAD_GROUP}>");
        let mut elements = Vec::with_capacity(count);
        let mut literals = 0;
        let mut explicit = 0;
        for (index, token) in tokens.into_iter().enumerate() {
            let element = match token {
                Token::Literal(value) => {
                    let value = if index + 1 == count {
                        remove_trailing_slash(value)
                    } else {
                        value
                    };
                    if value.is_empty() {
                        continue;
                    }

                    // Literals in JAX-RS syntax are matched encoded
                    let value = match syntax {
                        Syntax::JaxRs => encode_uri_template(value, true),
                        Syntax::Operator => Cow::Borrowed(value),
                    };
                    literals += value.chars().count();
                    Element::Literal(value.into_owned())
                }
                Token::Variable { name, pattern, default } => {
                    if let Some(pattern) = pattern {
                        Regex::new(pattern)?;
                        explicit += 1;
                    }
                    Element::Variable(Variable::new(name, pattern, default))
                }
                Token::Operator { operator, separator, variables } => {
                    Element::Operation {
                        operator,
                        separator: separator.to_string(),
                        variables: variables
                            .into_iter()
                            .map(|(name, default)| {
                                Variable::new(name, None, default)
                            })
                            .collect(),
                    }
                }
            };
            element.write_pattern(elements.len(), &mut source);
            elements.push(element);
        }

        // The empty template in JAX-RS syntax matches everything as tail
        let remainder = if template.is_empty() && syntax == Syntax::JaxRs {
            TAIL_EMPTY
        } else {
            TAIL
        };
        source.push_str(&format!(")(?P<{TAIL_GROUP}>{remainder})$"));
        let regex = Regex::new(&source)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(template, pattern = %source, "compiled template");

        // Determine capture group slots of head, tail and elements
        let mut groups = Vec::new();
        let mut head = 0;
        let mut tail = 0;
        for (slot, name) in regex.capture_names().enumerate() {
            match name {
                Some(HEAD_GROUP) => head = slot,
                Some(TAIL_GROUP) => tail = slot,
                Some(name) => {
                    let index = name
                        .strip_prefix(GROUP_PREFIX)
                        .and_then(|index| index.parse().ok());
                    if let Some(index) = index {
                        groups.push((index, slot));
                    }
                }
                None => {}
            }
        }

        // Collect distinct variable names
        let mut names: Vec<String> = Vec::new();
        for var in elements.iter().flat_map(Element::variables) {
            if !names.iter().any(|name| name == var.name()) {
                names.push(var.name().to_string());
            }
        }

        // No errors occurred
        Ok(Self {
            template: template.to_string(),
            syntax,
            regex,
            elements,
            groups,
            head,
            tail,
            names,
            literals,
            explicit,
        })
    }

    /// Creates a template in JAX-RS syntax from its normalized form.
    ///
    /// Dot segments are removed from the template, as well as a leading slash,
    /// so `/` and the empty string result in the same template.
    ///
    /// # Errors
    ///
    /// This function returns an error if the template syntax is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use waypoint_template::Template;
    ///
    /// // Create template from normalized form
    /// let template = Template::normalized("/path1/path2/./../path3")?;
    /// assert_eq!(template.as_str(), "path1/path3");
    /// # Ok(())
    /// # }
    /// ```
    pub fn normalized(template: &str) -> Result<Self> {
        let normalized = remove_dot_segments(template);
        let normalized = normalized.strip_prefix('/').unwrap_or(&normalized);
        Self::new(normalized, Syntax::JaxRs)
    }

    /// Creates a matcher for the template.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use waypoint_template::Template;
    ///
    /// // Create template and matcher
    /// let template: Template = "/books/{id}".parse()?;
    /// let mut matcher = template.matcher();
    /// assert!(matcher.matches("/books/42"));
    /// assert_eq!(matcher.variable("id")?, Some("42"));
    /// # Ok(())
    /// # }
    /// ```
    #[inline]
    #[must_use]
    pub fn matcher(&self) -> Matcher<'_> {
        Matcher::new(self)
    }

    /// Matches the given URI against the template.
    ///
    /// The URI is expected to be percent-encoded. If the template matches,
    /// the variable values are extracted, and can be obtained encoded as well
    /// as decoded from the returned [`Match`].
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    #[must_use]
    pub fn resolve(&self, uri: &str) -> Option<Match> {
        let captures = self.regex.captures(uri)?;

        // Let each element bind the values it captured
        let mut variables = Params::new();
        for &(index, slot) in &self.groups {
            if let Some(element) = self.elements.get(index) {
                let matched = captures.get(slot).map(|m| m.as_str());
                element.capture(matched, &mut variables);
            }
        }

        // Extract head and tail
        let head = captures.get(self.head).map_or("", |m| m.as_str());
        let tail = captures.get(self.tail).map_or("", |m| m.as_str());
        let slash = self.template.ends_with('/');
        Some(Match::new(head, tail, slash, variables))
    }

    /// Returns whether the given URI matches the template.
    #[inline]
    #[must_use]
    pub fn is_match(&self, uri: &str) -> bool {
        self.regex.is_match(uri)
    }

    /// Expands the template with the given values.
    ///
    /// # Errors
    ///
    /// This function returns [`Error::MissingVariable`] if a variable is not
    /// bound and has no default value, and [`Error::MultipleValues`] if a
    /// variable of a `join` operator is bound to multiple values.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use waypoint_template::{Params, Template};
    ///
    /// // Create template and expand it
    /// let template: Template = "/books/{id}".parse()?;
    /// let uri = template.expand(&Params::from_iter([("id", "a b")]))?;
    /// assert_eq!(uri, "/books/a%20b");
    /// # Ok(())
    /// # }
    /// ```
    pub fn expand(&self, values: &Params) -> Result<String> {
        let mut output = String::with_capacity(self.template.len());
        self.expand_into(values, &mut output)?;
        Ok(output)
    }

    /// Expands the template with the given values, appending to a buffer.
    ///
    /// The buffer is left untouched if expansion fails.
    ///
    /// # Errors
    ///
    /// This function returns the same errors as [`Template::expand`].
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn expand_into(&self, values: &Params, output: &mut String) -> Result {
        let mut buffer = String::with_capacity(self.template.len());
        for element in &self.elements {
            element.expand(values, &mut buffer)?;
        }
        output.push_str(&buffer);
        Ok(())
    }

    /// Compares the specificity of two templates.
    ///
    /// Templates with more literal characters are more specific, then those
    /// with more distinct variables. If both templates use JAX-RS syntax, the
    /// number of variables with explicit patterns is compared last. More
    /// specific templates compare as [`Ordering::Greater`], so a route table
    /// is sorted in descending order. Note that templates that only differ in
    /// variable names compare as [`Ordering::Equal`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use std::cmp::Ordering;
    /// use waypoint_template::Template;
    ///
    /// // Create and compare templates
    /// let a: Template = "/path1/path2/{var1}".parse()?;
    /// let b: Template = "/path1/{variable1}/path2".parse()?;
    /// assert_eq!(a.compare(&b), Ordering::Equal);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        let ordering = self
            .literals
            .cmp(&other.literals)
            .then(self.names.len().cmp(&other.names.len()));
        if self.syntax == Syntax::JaxRs && other.syntax == Syntax::JaxRs {
            ordering.then(self.explicit.cmp(&other.explicit))
        } else {
            ordering
        }
    }

    /// Returns an iterator over all variables, in order of appearance.
    ///
    /// Variables that appear more than once are returned for every occurrence,
    /// use [`Template::variable_names`] to obtain distinct names.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.elements.iter().flat_map(Element::variables)
    }

    /// Returns an iterator over the distinct variable names.
    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

#[allow(clippy::must_use_candidate)]
impl Template {
    /// Returns the template string.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Returns the template syntax.
    #[inline]
    pub fn syntax(&self) -> Syntax {
        self.syntax
    }

    /// Returns the compiled pattern.
    #[inline]
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl FromStr for Template {
    type Err = Error;

    /// Attempts to create a template in JAX-RS syntax from a string.
    ///
    /// # Errors
    ///
    /// In case compilation fails, an [`Error`] is returned.
    #[inline]
    fn from_str(value: &str) -> Result<Self> {
        Self::new(value, Syntax::JaxRs)
    }
}

impl TryFrom<Option<&str>> for Template {
    type Error = Error;

    /// Attempts to create a template in JAX-RS syntax from an optional string.
    ///
    /// # Errors
    ///
    /// If no template is given, [`Error::Missing`] is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use waypoint_template::{Error, Template};
    ///
    /// // Attempt to create template from nothing
    /// let result = Template::try_from(None);
    /// assert!(matches!(result, Err(Error::Missing)));
    /// ```
    fn try_from(value: Option<&str>) -> Result<Self> {
        value.ok_or(Error::Missing)?.parse()
    }
}

// ----------------------------------------------------------------------------

impl PartialEq for Template {
    /// Compares two templates for equality.
    ///
    /// Templates are equal if their strings and syntaxes are equal.
    fn eq(&self, other: &Self) -> bool {
        self.syntax == other.syntax && self.template == other.template
    }
}

impl Eq for Template {}

impl Hash for Template {
    /// Hashes the template.
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.syntax.hash(state);
        self.template.hash(state);
    }
}

// ----------------------------------------------------------------------------

impl fmt::Display for Template {
    /// Formats the template for display.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn params(entries: &[(&str, &[Option<&str>])]) -> Params {
        let mut params = Params::new();
        for (name, values) in entries {
            let values = values.iter().map(|value| value.map(str::to_string));
            params.set_all(*name, values);
        }
        params
    }

    fn resolve(template: &Template, uri: &str) -> Option<String> {
        template
            .resolve(uri)
            .map(|result| result.variables_raw().to_string())
    }

    #[test]
    #[rustfmt::skip]
    fn test_resolve_jaxrs() {
        let test_cases = vec![
            ("/prefix/{varA}/root/{variableB}/suffix", "/prefix/aaaaaa/root/BbBbB/suffix", Some("{varA=[aaaaaa], variableB=[BbBbB]}")),
            ("/prefix/{variable}/suffix", "aprefix/value/suffix", None),
            ("/prefix/{varA}/root/{varA}/suffix", "/prefix/aaaaaa/root/aaaaaa/suffix", Some("{varA=[aaaaaa, aaaaaa]}")),
            ("/path1/{var1}/path2{var2:[ab]*}/tail", "/path1/value1/path2/tail", Some("{var1=[value1], var2=[]}")),
            ("/path1/{var1}/path2{var2:[ab]*}/tail", "/path1/value1/path2ababab/tail", Some("{var1=[value1], var2=[ababab]}")),
            ("/path1/{var1}/path2{var2:[ab]*}/tail", "/path1/value1/path2c/tail", None),
            ("/path1/{var1}/path2{var2:[ab]*}/tail", "/path2/value1/path2ab/tail", None),
            ("/path1/{var1}/path2{var2:[ab]*}/tail", "/path1/value1/path2c/tailZ", None),
            ("/path1/{var1}/{var2:(a)(b)*}/path2/{var3}/tail", "/path1/cc/abb/path2/dd/tail", Some("{var1=[cc], var2=[abb], var3=[dd]}")),
            ("/path1/{var1}/{var2:(a)(b)*}/path2/{var3}/tail", "/path1/cc/bb/path2/dd/tail", None),
            ("/prefix/{varA}", "/prefix/a.b", Some("{varA=[a.b]}")),
            ("/prefix/{varA}", "/prefix/a~b", Some("{varA=[a~b]}")),
            ("/prefix/{varA}", "/prefix/a:b", Some("{varA=[a:b]}")),
            ("/prefix/{varA}", "/prefix/a%3Ab", Some("{varA=[a%3Ab]}")),
            ("/prefix/{varA}", "/prefix/a%2Fb", Some("{varA=[a%2Fb]}")),
            ("/prefix/{varA}", "/prefix/%3F%23%5B%5D%40%21%24%26%27%28%29%2A%2B%2C%3B%3D", Some("{varA=[%3F%23%5B%5D%40%21%24%26%27%28%29%2A%2B%2C%3B%3D]}")),
            ("/prefix/{varA}", "/Prefix/a", None),
            ("/my docs/{id}", "/my%20docs/1", Some("{id=[1]}")),
            ("/books/", "/books", Some("{}")),
            ("/books/", "/books/", Some("{}")),
        ];
        for (template, uri, expected) in test_cases {
            let template: Template = template.parse().unwrap();
            assert_eq!(
                resolve(&template, uri).as_deref(),
                expected,
                "Failed for {template}: {uri}"
            );
        }
    }

    #[test]
    #[rustfmt::skip]
    fn test_resolve_operator() {
        let feed1 = "artifacts{-prefix|;datetime=|datetime}{-prefix|;lc=|lc}{-prefix|;approved=|approved}";
        let feed2 = "artifacts{-opt|;|datetime,lc,approved}{-join|;|datetime,lc,approved}";
        let entry1 = format!("{feed1}/{{artifact}}{{-prefix|;rev=|revision}}");
        let entry2 = format!("{feed2}/{{artifact}}{{-prefix|;rev=|revision}}");

        let all_null = "{datetime=[null], lc=[null], approved=[null]}";
        let test_cases = vec![
            // Feeds
            (feed1, "artifacts/", Some(all_null)),
            (feed2, "artifacts/", Some(all_null)),
            (feed1, "artifacts;", None),
            (feed2, "artifacts;", Some(all_null)),
            (feed1, "artifacts;datetime", None),
            (feed2, "artifacts;datetime", None),
            (feed1, "artifacts;datetime;", None),
            (feed2, "artifacts;datetime;", None),
            (feed1, "artifacts", Some(all_null)),
            (feed2, "artifacts", Some(all_null)),
            (feed1, "artifacts;datetime=date", Some("{datetime=[date], lc=[null], approved=[null]}")),
            (feed2, "artifacts;datetime=date", Some("{datetime=[date], lc=[null], approved=[null]}")),
            (feed1, "artifacts;datetime=date;lc=lc;approved=stage", Some("{datetime=[date], lc=[lc], approved=[stage]}")),
            (feed2, "artifacts;datetime=date;lc=lc;approved=stage", Some("{datetime=[date], lc=[lc], approved=[stage]}")),
            (feed1, "artifacts;lc=lc;approved=stage;datetime=date", Some("{datetime=[null], lc=[lc], approved=[stage;datetime=date]}")),
            (feed2, "artifacts;lc=lc;approved=stage;datetime=date", Some("{datetime=[date], lc=[lc], approved=[stage]}")),

            // Entries
            (entry1.as_str(), "artifacts/", None),
            (entry2.as_str(), "artifacts/", None),
            (entry1.as_str(), "artifacts/13", Some("{datetime=[null], lc=[null], approved=[null], artifact=[13], revision=[null]}")),
            (entry2.as_str(), "artifacts/13", Some("{datetime=[null], lc=[null], approved=[null], artifact=[13], revision=[null]}")),
            (entry1.as_str(), "artifacts/13;rev=7", Some("{datetime=[null], lc=[null], approved=[null], artifact=[13], revision=[7]}")),
            (entry2.as_str(), "artifacts/13;rev=7", Some("{datetime=[null], lc=[null], approved=[null], artifact=[13], revision=[7]}")),
            (entry1.as_str(), "artifacts;datetime=date;lc=lc;approved=stage/13;rev=7", Some("{datetime=[date], lc=[lc], approved=[stage], artifact=[13], revision=[7]}")),
            (entry2.as_str(), "artifacts;lc=lc;approved=stage;datetime=date/13;rev=7", Some("{datetime=[date], lc=[lc], approved=[stage], artifact=[13], revision=[7]}")),

            // List operator
            ("locations/{-list|/|var}", "locations", None),
            ("locations/{-list|/|var}", "locations/a", Some("{var=[a]}")),
            ("locations/{-list|/|var}", "locations/a/b", Some("{var=[a, b]}")),
            ("locations{-opt|/|var}{-list|/|var}", "locations/a/b/", Some("{var=[a, b, ]}")),
            ("locations{-opt|/|var}{-list|/|var}", "locations/a//c", Some("{var=[a, , c]}")),
            ("locations{-opt|/|var}{-list|/|var}", "locations//b/c", Some("{var=[, b, c]}")),
            ("telegram:{-list|stop|var}", "telegram:hellostopbabystopgostophome", Some("{var=[hello, baby, go, home]}")),

            // Optional and negated separators
            ("artifacts{-opt|;|var1,var2}", "artifact/", None),
            ("artifacts{-opt|;|var1,var2}", "artifacts", Some("{}")),
            ("artifacts{-opt|;|var1,var2}", "artifacts;", Some("{}")),
            ("artifacts{-opt|;|var1,var2}", "artifacts;;", None),
            ("artifacts{-neg|;|var1,var2}", "artifacts", Some("{}")),
            ("artifacts{-neg|;|var1,var2}", "artifacts;", Some("{}")),
            ("artifacts{-neg|;|var1,var2}", "artifacts;;", None),

            // Prefix and suffix operators
            ("/{-suffix|/|var}cat", "/animals/cat", Some("{var=[animals]}")),
            ("/{-suffix|/|var}cat", "/cat", Some("{var=[null]}")),
            ("/{-suffix|/|var}cat", "/animals;cat", None),
            ("/{-suffix|/|var}cat", "animals/cat", None),
            ("/{-suffix|/|var}cat", "/animals/domestic/cat", Some("{var=[animals, domestic]}")),
            ("telegram:{-suffix|stop|var}", "telegram:hellostopbabystopgostophomestop", Some("{var=[hello, baby, go, home]}")),
            ("{-prefix|/|var}/cat", "/animals/cat", Some("{var=[animals]}")),
            ("{-prefix|/|var}/cat", "/cat", Some("{var=[null]}")),
            ("{-prefix|/|var}/cat", "/animals;cat", None),
            ("{-prefix|/|var}/cat", "animals/cat", None),
            ("{-prefix|/|var}/cat", "/animals/domestic/cat", Some("{var=[animals, domestic]}")),
            ("telegram:{-prefix|stop|var}", "telegram:stophellostopbabystopgostophome", Some("{var=[hello, baby, go, home]}")),

            // Join operator
            ("people%3F{-join|&|var1,var2}", "people%3F/", Some("{var1=[null], var2=[null]}")),
            ("people%3F{-join|&|var1,var2}", "people%3F", Some("{var1=[null], var2=[null]}")),
            ("people%3F{-join|&|var1,var2}", "people%3Fvar1", None),
            ("people%3F{-join|&|var1,var2}", "people%3Fvar1&", None),
            ("people%3F{-join|&|var1,var2}", "people%3Fvar1=john", Some("{var1=[john], var2=[null]}")),
            ("people%3F{-join|&|var1,var2}", "people%3Fvar1=mary&var2=kate", Some("{var1=[mary], var2=[kate]}")),
            ("people%3F{-join|&|var1,var2}", "people%3Fvar2=kate&var1=mary", Some("{var1=[mary], var2=[kate]}")),
            ("people%3F{-join|&|var1,var2}", "people%3Fvar3=jin", None),

            // Reserved characters in literals and separators
            ("cars(old*new:good)my?{-join|&|car1,car2}", "cars(old*new:good)my?car1=Ford&car2=Opel", Some("{car1=[Ford], car2=[Opel]}")),
            ("vegetables|{-list|?|vegs}", "vegetables|carrot?leek", Some("{vegs=[carrot, leek]}")),
            ("vegetables{-prefix|?|vegs}", "vegetables?carrot?leek", Some("{vegs=[carrot, leek]}")),
            ("vegetables|{-suffix|?|vegs}", "vegetables|carrot?leek?", Some("{vegs=[carrot, leek]}")),
            ("translator({-join|?|czech,english})", "translator(english=dog?czech=pes)", Some("{czech=[pes], english=[dog]}")),
            ("food{-opt|?|meat,milk}", "food?", Some("{}")),
            ("food{-neg|()|meat,milk}", "food()", Some("{}")),

            // Values are extracted encoded
            ("/var/{var}", "/var/enc%3Aoded", Some("{var=[enc%3Aoded]}")),
            ("/join/{-join|;|join}", "/join/join=enc%3Aoded", Some("{join=[enc%3Aoded]}")),
            ("/list/{-list|/|list}", "/list/enc%3Aoded/enc%3Aoded", Some("{list=[enc%3Aoded, enc%3Aoded]}")),
            ("/prefix{-prefix|/|prefix}", "/prefix/enc%3Aoded/enc%3Aoded", Some("{prefix=[enc%3Aoded, enc%3Aoded]}")),
            ("/suffix/{-suffix|/|suffix}", "/suffix/enc%3Aoded/", Some("{suffix=[enc%3Aoded]}")),

            // Repeated variables collect values in order of appearance
            ("/{x}/{-list|/|x}", "/a/b/c", Some("{x=[a, b, c]}")),
            ("{-prefix|;|x}{-prefix|,|x}", ";a;b,c", Some("{x=[a, b, c]}")),
            ("{-prefix|;|x}{-suffix|,|x}", "", Some("{x=[null, null]}")),
            ("/{x}/{-join|&|x,y}", "/a/x=b&y=c", Some("{x=[a, b], y=[c]}")),
        ];
        for (template, uri, expected) in test_cases {
            let template = Template::new(template, Syntax::Operator).unwrap();
            assert_eq!(
                resolve(&template, uri).as_deref(),
                expected,
                "Failed for {template}: {uri}"
            );
        }
    }

    #[test]
    #[rustfmt::skip]
    fn test_resolve_empty_values() {
        let test_cases = vec![
            ("locations/{-list|/|var}", "locations/", "var", vec![Some("")]),
            ("locations{-opt|/|var}{-list|/|var}", "locations", "var", vec![Some("")]),
            ("/{-suffix|/|var}cat", "//cat", "var", vec![Some("")]),
            ("{-prefix|/|var}/cat", "//cat", "var", vec![Some("")]),
            ("people%3F{-join|&|var1,var2}", "people%3Fvar1=", "var1", vec![Some("")]),
            ("artifacts{-prefix|;rev=|rev}", "artifacts;rev=", "rev", vec![Some("")]),
        ];
        for (template, uri, name, expected) in test_cases {
            let template = Template::new(template, Syntax::Operator).unwrap();
            let result = template.resolve(uri).unwrap();
            let values: Vec<_> =
                result.values_raw(name).iter().map(Option::as_deref).collect();
            assert_eq!(values, expected, "Failed for {template}: {uri}");
        }
    }

    #[test]
    #[rustfmt::skip]
    fn test_expand_jaxrs() {
        let values = params(&[
            ("var1", &[Some("value1")]),
            ("var2", &[Some("value2")]),
            ("var3", &[Some("value3")]),
        ]);
        let test_cases = vec![
            ("/path1/{var1}/path2{var2:[ab]*}/tail", "/path1/value1/path2value2/tail"),
            ("/path1/and/tail", "/path1/and/tail"),
            ("{var1}{var2:[ab]+}{var3:(a\\{b\\}c)*}", "value1value2value3"),
            ("/my docs/{var1}", "/my%20docs/value1"),
            ("", ""),
        ];
        for (template, expected) in test_cases {
            let template: Template = template.parse().unwrap();
            assert_eq!(
                template.expand(&values).unwrap(),
                expected,
                "Failed for template: {template}"
            );
        }
    }

    #[test]
    #[rustfmt::skip]
    fn test_expand_operator() {
        let test_cases: &[(&str, &[(&str, &[Option<&str>])], &str)] = &[
            // Default values
            ("/part1/{variable=default_value}/part2", &[], "/part1/default_value/part2"),
            ("/part1/{variable=default_value}/part2", &[("variable", &[None])], "/part1/default_value/part2"),
            ("/part1/{variable=default_value}/part2", &[("variable", &[Some("my_value")])], "/part1/my_value/part2"),

            // List operator
            ("locations/{-list|/|var}", &[("var", &[])], "locations/"),
            ("locations{-opt|/|var}{-list|/|var}", &[("var", &[])], "locations"),
            ("locations/{-list|/|var}", &[("var", &[Some("d")])], "locations/d"),
            ("locations{-opt|/|var}{-list|/|var}", &[("var", &[Some("d"), Some("e")])], "locations/d/e"),
            ("locations/{-list|/|var}", &[("var", &[Some("d"), Some(""), Some("e")])], "locations/d//e"),
            ("locations/{-list|/|var}", &[("var", &[Some(""), Some("d"), Some("e")])], "locations//d/e"),
            ("locations/{-list|/|var}", &[("var", &[Some("d"), Some("e"), Some("")])], "locations/d/e/"),
            ("telegram:{-list|stop|var}", &[("var", &[Some("hello"), Some("baby"), Some("go"), Some("home")])], "telegram:hellostopbabystopgostophome"),

            // Optional separator
            ("artifacts{-opt|;|var1,var2}", &[("var1", &[Some("somevalue")])], "artifacts;"),
            ("artifacts{-opt|;|var1,var2}", &[("var2", &[Some("")])], "artifacts;"),
            ("artifacts{-opt|;|var1,var2}", &[("var1", &[None])], "artifacts;"),
            ("artifacts{-opt|;|var1,var2}", &[], "artifacts"),
            ("artifacts{-opt|;|var1,var2}", &[("var2", &[])], "artifacts"),
            ("artifacts{-opt|;|var1,var2}", &[("var2", &[Some("a"), Some("b")])], "artifacts;"),

            // Negated separator
            ("artifacts{-neg|;|var1,var2}", &[("var1", &[None])], "artifacts"),
            ("artifacts{-neg|;|var1,var2}", &[("var2", &[Some("")])], "artifacts"),
            ("artifacts{-neg|;|var1,var2}", &[], "artifacts;"),
            ("artifacts{-neg|;|var1,var2}", &[("var2", &[])], "artifacts;"),
            ("artifacts{-neg|;|var1,var2}", &[("var2", &[Some("a"), Some("b")])], "artifacts"),

            // Prefix and suffix operators
            ("/{-suffix|/|var}cat", &[("var", &[Some("animals")])], "/animals/cat"),
            ("/{-suffix|/|var}cat", &[("var", &[Some("")])], "//cat"),
            ("/{-suffix|/|var}cat", &[], "/cat"),
            ("/{-suffix|/|var}cat", &[("", &[Some("pets")])], "/cat"),
            ("/{-suffix|/|var}cat", &[("var", &[Some("animals"), Some("domestic")])], "/animals/domestic/cat"),
            ("{-prefix|/|var}/cat", &[("var", &[Some("animals")])], "/animals/cat"),
            ("{-prefix|/|var}/cat", &[("var", &[Some("")])], "//cat"),
            ("{-prefix|/|var}/cat", &[], "/cat"),
            ("telegram:{-prefix|stop|var}", &[("var", &[Some("hello"), Some("baby"), Some("go"), Some("home")])], "telegram:stophellostopbabystopgostophome"),
            ("telegram:{-suffix|stop|var}", &[("var", &[Some("hello"), Some("baby"), Some("go"), Some("home")])], "telegram:hellostopbabystopgostophomestop"),

            // Join operator
            ("people%3F{-join|&|var1,var2}", &[("var1", &[Some("")])], "people%3Fvar1="),
            ("people%3F{-join|&|var1,var2}", &[("var2", &[Some("joe")])], "people%3Fvar2=joe"),
            ("people%3F{-join|&|var1,var2}", &[("var2", &[Some("kate")]), ("var1", &[Some("mary")])], "people%3Fvar1=mary&var2=kate"),
            ("people%3F{-join|&|var1,var2}", &[("var3", &[Some("joe")])], "people%3F"),
            ("people%3F{-join|&|var1,var2}", &[], "people%3F"),
            ("translator({-join|?|czech,english})", &[("english", &[Some("dog")]), ("czech", &[Some("pes")])], "translator(czech=pes?english=dog)"),

            // Reserved characters in literals and separators
            ("cars(old*new:good)my?{-join|&|car1,car2}", &[("car1", &[Some("Ford")]), ("car2", &[Some("Opel")])], "cars(old*new:good)my?car1=Ford&car2=Opel"),
            ("vegetables|{-list|?|vegs}", &[("vegs", &[Some("carrot"), Some("leek")])], "vegetables|carrot?leek"),
            ("food{-opt|?|meat,milk}", &[("meat", &[Some("poultry")])], "food?"),
            ("food{-neg|()|meat,milk}", &[], "food()"),

            // Values are encoded
            ("/var/{var}", &[("var", &[Some("enc:oded")])], "/var/enc%3Aoded"),
            ("/join/{-join|;|join}", &[("join", &[Some("enc:oded")])], "/join/join=enc%3Aoded"),
            ("/list/{-list|/|list}", &[("list", &[Some("enc:oded"), Some("enc:oded")])], "/list/enc%3Aoded/enc%3Aoded"),
            ("/prefix{-prefix|/|prefix}", &[("prefix", &[Some("enc:oded")])], "/prefix/enc%3Aoded"),
            ("/suffix/{-suffix|/|suffix}", &[("suffix", &[Some("enc:oded")])], "/suffix/enc%3Aoded/"),
        ];
        for &(template, entries, expected) in test_cases {
            let template = Template::new(template, Syntax::Operator).unwrap();
            assert_eq!(
                template.expand(&params(entries)).unwrap(),
                expected,
                "Failed for {template}: {entries:?}"
            );
        }
    }

    #[test]
    fn test_expand_errors() {
        let template: Template = "/part1/{variableA}/part2/{variableB}".parse().unwrap();
        let values = params(&[("variableA", &[Some("value")])]);
        let mut output = String::from("prefix");
        let err = template.expand_into(&values, &mut output).unwrap_err();
        assert!(matches!(err, Error::MissingVariable(name) if name == "variableB"));
        assert_eq!(output, "prefix");

        let template: Template = "{var1}".parse().unwrap();
        let values = params(&[("var1", &[None])]);
        let err = template.expand(&values).unwrap_err();
        assert!(matches!(err, Error::MissingVariable(name) if name == "var1"));

        let template =
            Template::new("people%3F{-join|&|var1,var2}", Syntax::Operator)
                .unwrap();
        let values = params(&[("var1", &[Some("joe"), Some("max")])]);
        let err = template.expand(&values).unwrap_err();
        assert!(matches!(err, Error::MultipleValues(name) if name == "var1"));
    }

    #[test]
    fn test_expand_into() {
        let template: Template = "/path1/{var1}".parse().unwrap();
        let mut output = String::from("http://example.com");
        template
            .expand_into(&params(&[("var1", &[Some("xyz")])]), &mut output)
            .unwrap();
        assert_eq!(output, "http://example.com/path1/xyz");
    }

    #[test]
    fn test_new_errors() {
        let test_cases: &[(&str, Syntax, fn(&Error) -> bool)] = &[
            ("path/{var:?.*}", Syntax::JaxRs, |err| {
                matches!(err, Error::Pattern(_))
            }),
            ("/path{/{var:?.*}", Syntax::JaxRs, |err| {
                matches!(err, Error::Unclosed(_))
            }),
            ("/path{}/{var:?.*}", Syntax::JaxRs, |err| {
                matches!(err, Error::EmptyVariable(_))
            }),
            ("{unclosedVariableStill/goes/on", Syntax::Operator, |err| {
                matches!(err, Error::Unclosed(_))
            }),
            ("artifacts{}", Syntax::Operator, |err| {
                matches!(err, Error::EmptyVariable(_))
            }),
            ("artifacts{-opt|;|}", Syntax::Operator, |err| {
                matches!(err, Error::OperatorVariables(_))
            }),
            ("locations/{-list|/|var1,var2}", Syntax::Operator, |err| {
                matches!(err, Error::OperatorArity("list"))
            }),
            ("/{-suffix|/|var1,var2}cat", Syntax::Operator, |err| {
                matches!(err, Error::OperatorArity("suffix"))
            }),
            ("/{-prefix|/|var1,var2}cat", Syntax::Operator, |err| {
                matches!(err, Error::OperatorArity("prefix"))
            }),
            ("/{-prefix}cat", Syntax::Operator, |err| {
                matches!(err, Error::OperatorSyntax(_))
            }),
        ];
        for &(template, syntax, check) in test_cases {
            let err = Template::new(template, syntax).unwrap_err();
            assert!(check(&err), "Failed for template: {template}: {err:?}");
        }
        assert!(matches!(Template::try_from(None), Err(Error::Missing)));
    }

    #[test]
    fn test_normalized() {
        let template = Template::normalized("/path1/path2/./../path3").unwrap();
        assert_eq!(template.as_str(), "path1/path3");

        for value in ["", "/"] {
            let template = Template::normalized(value).unwrap();
            let result = template.resolve("").unwrap();
            assert!(result.is_exact(), "Failed for template: {value:?}");
        }
    }

    #[test]
    #[rustfmt::skip]
    fn test_compare() {
        let test_cases = vec![
            ("/path1/path2", "/path1/path2", Ordering::Equal),
            ("/path2/path1", "/path1/path2", Ordering::Equal),
            ("/path1/path2/path3", "/path1/path2", Ordering::Greater),
            ("/path1/path2", "/path1/path2/path3", Ordering::Less),
            ("/path1/path2/{var1}", "/path1/path2/{var1}", Ordering::Equal),
            ("/path1/path2/{var1}", "/path1/path2/{variable1}", Ordering::Equal),
            ("/path1/path2/{var1}", "/path1/{variable1}/path2", Ordering::Equal),
            ("/path1/path2/path3/{var1}", "/path1/path2/{var1}", Ordering::Greater),
            ("/path1/path2/{var1}", "/path1/path2/path3/{var1}", Ordering::Less),
            ("/path1/path2/{var1}/{var2}", "/path1/path2/{var1}", Ordering::Greater),
            ("/path1/path2/{var1}", "/path1/path2/{var1}/{var2}", Ordering::Less),
            ("/path1/path2/path3/{var1}", "/path1/path2/{var1}/{var2}", Ordering::Greater),
            ("/path1/path2/{var1}/{var2}", "/path1/path2/path3/{var1}", Ordering::Less),
            ("/path1/path2/{var1}/{var2:.*}", "/path1/path2/{var1}/{var2:.*}", Ordering::Equal),
            ("/path1/path2/{var1}/{var2:.*}", "/path1/path2/{var1}/{var2}", Ordering::Greater),
            ("/path1/path2/{var1}/{var2}", "/path1/path2/{var1}/{var2:.*}", Ordering::Less),
            ("/path1/path2/{var1:.*}/{var2}", "/path1/path2/{var1}/{var2:.*}", Ordering::Equal),

            // Empty patterns fall back to the default and don't count as explicit
            ("/path1/path2/{var1}/{var2:}", "/path1/path2/{var1}/{var2}", Ordering::Equal),
            ("/path1/path2/{var1}/{var2:}", "/path1/path2/{var1}/{var2:.*}", Ordering::Less),
        ];
        for (a, b, expected) in test_cases {
            let a: Template = a.parse().unwrap();
            let b: Template = b.parse().unwrap();
            assert_eq!(a.compare(&b), expected, "Failed for {a} and {b}");
            assert_eq!(b.compare(&a), expected.reverse(), "Failed for {b} and {a}");
        }
    }

    #[test]
    fn test_compare_sort() {
        let mut templates: Vec<Template> = [
            "/path1/{var1}",
            "/path1/path2/path3",
            "/path1/path2/{var1}/{var2:.*}",
            "/path1/path2/{var1}/{var2}",
            "/path1/path2",
        ]
        .into_iter()
        .map(|template| template.parse().unwrap())
        .collect();

        // Most specific templates come first
        templates.sort_by(|a, b| b.compare(a));
        let sorted: Vec<_> = templates.iter().map(Template::as_str).collect();
        assert_eq!(sorted, [
            "/path1/path2/path3",
            "/path1/path2/{var1}/{var2:.*}",
            "/path1/path2/{var1}/{var2}",
            "/path1/path2",
            "/path1/{var1}",
        ]);
    }

    #[test]
    fn test_compare_transitive() {
        let templates: Vec<Template> = [
            "",
            "/",
            "/path1",
            "/{var1}",
            "/{var1:[0-9]+}",
            "/path1/{var1}",
            "/path1/{var1:.*}",
            "/path1/{var1}/{var2}",
            "/path1/{var1:.*}/{var2:.*}",
            "/path1/path2",
            "/path1/path2/{var1}",
            "/path2/path1/{var2}",
            "/path1/path2/path3",
        ]
        .into_iter()
        .map(|template| template.parse().unwrap())
        .collect();

        // Check all triples, including repeated templates
        for a in &templates {
            for b in &templates {
                assert_eq!(
                    a.compare(b),
                    b.compare(a).reverse(),
                    "Failed for {a} and {b}"
                );
                for c in &templates {
                    if a.compare(b).is_le() && b.compare(c).is_le() {
                        assert!(
                            a.compare(c).is_le(),
                            "Failed for {a}, {b} and {c}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_variable_names() {
        let template: Template =
            "/prefix/{varA}/root/{variableB}/suffix/{Variable345}/{varA}"
                .parse()
                .unwrap();
        let names: Vec<_> = template.variable_names().collect();
        assert_eq!(names, ["varA", "variableB", "Variable345"]);
        assert_eq!(template.variables().count(), 4);
    }

    #[test]
    fn test_round_trip() {
        let test_cases = vec![
            ("/books/{id}/chapters/{chapter}", vec![("id", "a b"), ("chapter", "1")]),
            ("/users/{name}", vec![("name", "jane:doe")]),
            ("/{a}-{b:[0-9]+}", vec![("a", "x%y"), ("b", "42")]),
        ];
        for (template, entries) in test_cases {
            let template: Template = template.parse().unwrap();
            let values = Params::from_iter(entries);
            let uri = template.expand(&values).unwrap();
            let result = template.resolve(&uri).unwrap();
            assert_eq!(
                result.variables().to_string(),
                values.to_string(),
                "Failed for {template}: {uri}"
            );
        }
    }

    #[test]
    fn test_determinism() {
        let uris = [
            "/path1/value1/path2ab/tail",
            "/path1/value1/path2c/tail",
            "/path1/value%20a/path2abab/tail/more",
            "/path1",
        ];
        let source = "/path1/{var1}/path2{var2:[ab]*}/tail";
        let a: Template = source.parse().unwrap();
        let b: Template = source.parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.pattern(), b.pattern());
        for uri in uris {
            assert_eq!(resolve(&a, uri), resolve(&b, uri), "Failed for uri: {uri}");
        }
    }
}
