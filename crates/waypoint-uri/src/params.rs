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

//! Multi-valued parameters.

use std::{fmt, slice};

use crate::encoding::decode;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Multi-valued parameters.
///
/// Parameters map names to an ordered list of values, and are used for query
/// strings and matrix parameters, as well as for the bindings that templates
/// are matched against or expanded from. Names are kept in insertion order,
/// which makes iteration deterministic.
///
/// A value might be `None`, which models a parameter that is bound, but has no
/// value, e.g., a query parameter without `=`, or an optional template variable
/// that didn't participate in a match. This is distinct from a parameter that
/// is bound to an empty list, and from one that is not bound at all.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Params {
    /// List of entries.
    inner: Vec<Entry>,
}

/// Parameter entry.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Entry {
    /// Parameter name.
    name: String,
    /// Parameter values.
    values: Vec<Option<String>>,
}

/// Iterator over parameters.
#[derive(Debug)]
pub struct Iter<'a> {
    /// Inner iterator.
    inner: slice::Iter<'a, Entry>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Params {
    /// Creates parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use waypoint_uri::Params;
    ///
    /// // Create parameters
    /// let params = Params::new();
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the first value for the given name.
    ///
    /// This returns `None` if the parameter is not bound, bound to an empty
    /// list, or if its first value is `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use waypoint_uri::Params;
    ///
    /// // Create parameters and add values
    /// let mut params = Params::new();
    /// params.add("key", "a");
    /// params.add("key", "b");
    ///
    /// // Obtain first value
    /// assert_eq!(params.get("key"), Some("a"));
    /// ```
    pub fn get<K>(&self, name: K) -> Option<&str>
    where
        K: AsRef<str>,
    {
        self.entry(name.as_ref())
            .and_then(|entry| entry.values.first())
            .and_then(Option::as_deref)
    }

    /// Returns all values for the given name.
    ///
    /// If the parameter is not bound, an empty slice is returned, so use
    /// [`Params::contains`] to tell unbound and empty parameters apart.
    ///
    /// # Examples
    ///
    /// ```
    /// use waypoint_uri::Params;
    ///
    /// // Create parameters and add values
    /// let mut params = Params::new();
    /// params.add("key", "a");
    /// params.add_null("key");
    ///
    /// // Obtain all values
    /// let values = params.get_all("key");
    /// assert_eq!(values, [Some(String::from("a")), None]);
    /// ```
    pub fn get_all<K>(&self, name: K) -> &[Option<String>]
    where
        K: AsRef<str>,
    {
        self.entry(name.as_ref())
            .map_or(&[], |entry| entry.values.as_slice())
    }

    /// Returns whether the parameter is bound.
    pub fn contains<K>(&self, name: K) -> bool
    where
        K: AsRef<str>,
    {
        self.entry(name.as_ref()).is_some()
    }

    /// Adds a value to the given parameter.
    ///
    /// # Examples
    ///
    /// ```
    /// use waypoint_uri::Params;
    ///
    /// // Create parameters and add value
    /// let mut params = Params::new();
    /// params.add("key", "value");
    /// ```
    pub fn add<K, V>(&mut self, name: K, value: V)
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        self.entry_mut(name.as_ref()).push(Some(value.into()));
    }

    /// Adds a `None` value to the given parameter.
    pub fn add_null<K>(&mut self, name: K)
    where
        K: AsRef<str>,
    {
        self.entry_mut(name.as_ref()).push(None);
    }

    /// Adds optional values to the given parameter.
    ///
    /// The parameter is bound even if the iterator is empty.
    pub fn add_all<K, I>(&mut self, name: K, values: I)
    where
        K: AsRef<str>,
        I: IntoIterator<Item = Option<String>>,
    {
        self.entry_mut(name.as_ref()).extend(values);
    }

    /// Replaces all values of the given parameter.
    ///
    /// The parameter is bound even if the iterator is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use waypoint_uri::Params;
    ///
    /// // Create parameters and bind empty list
    /// let mut params = Params::new();
    /// params.insert("key", Vec::<String>::new());
    /// assert!(params.contains("key"));
    /// ```
    pub fn insert<K, I>(&mut self, name: K, values: I)
    where
        K: AsRef<str>,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let list = self.entry_mut(name.as_ref());
        list.clear();
        list.extend(values.into_iter().map(|value| Some(value.into())));
    }

    /// Replaces all values of the given parameter with a single value.
    pub fn set<K>(&mut self, name: K, value: Option<String>)
    where
        K: AsRef<str>,
    {
        let list = self.entry_mut(name.as_ref());
        list.clear();
        list.push(value);
    }

    /// Replaces all values of the given parameter with optional values.
    pub fn set_all<K, I>(&mut self, name: K, values: I)
    where
        K: AsRef<str>,
        I: IntoIterator<Item = Option<String>>,
    {
        let list = self.entry_mut(name.as_ref());
        list.clear();
        list.extend(values);
    }

    /// Removes the given parameter.
    pub fn remove<K>(&mut self, name: K)
    where
        K: AsRef<str>,
    {
        self.inner.retain(|entry| entry.name != name.as_ref());
    }

    /// Returns a copy of the parameters with all values percent-decoded.
    ///
    /// # Examples
    ///
    /// ```
    /// use waypoint_uri::Params;
    ///
    /// // Create parameters and decode them
    /// let params = Params::from_iter([("key", "a%20b")]);
    /// assert_eq!(params.decoded().get("key"), Some("a b"));
    /// ```
    #[must_use]
    pub fn decoded(&self) -> Self {
        let inner = self.inner.iter().map(|entry| Entry {
            name: entry.name.clone(),
            values: entry
                .values
                .iter()
                .map(|value| {
                    value.as_deref().map(|value| decode(value).into_owned())
                })
                .collect(),
        });
        Self { inner: inner.collect() }
    }

    /// Returns an iterator over the parameter names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.inner.iter().map(|entry| entry.name.as_str())
    }

    /// Returns an iterator over the parameters.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter { inner: self.inner.iter() }
    }

    /// Returns the entry for the given name.
    fn entry(&self, name: &str) -> Option<&Entry> {
        self.inner.iter().find(|entry| entry.name == name)
    }

    /// Returns the values for the given name, creating the entry if needed.
    fn entry_mut(&mut self, name: &str) -> &mut Vec<Option<String>> {
        let index = match self.inner.iter().position(|e| e.name == name) {
            Some(index) => index,
            None => {
                self.inner.push(Entry {
                    name: name.to_string(),
                    values: Vec::new(),
                });
                self.inner.len() - 1
            }
        };
        &mut self.inner[index].values
    }
}

#[allow(clippy::must_use_candidate)]
impl Params {
    /// Returns the number of bound parameters.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns whether there are any bound parameters.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl<K, V> FromIterator<(K, V)> for Params
where
    K: AsRef<str>,
    V: Into<String>,
{
    /// Creates parameters from an iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use waypoint_uri::Params;
    ///
    /// // Create parameters from iterator
    /// let params = Params::from_iter([
    ///     ("query", "search"),
    ///     ("limit", "25"),
    /// ]);
    /// ```
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = (K, V)>,
    {
        let mut params = Params::new();
        for (name, value) in iter {
            params.add(name, value);
        }
        params
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a str, &'a [Option<String>]);
    type IntoIter = Iter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ----------------------------------------------------------------------------

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a [Option<String>]);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|entry| (entry.name.as_str(), entry.values.as_slice()))
    }
}

// ----------------------------------------------------------------------------

impl fmt::Display for Params {
    /// Formats the parameters for display.
    ///
    /// Values are separated by `,` and `None` values are printed as `null`,
    /// e.g., `{a=[1, null], b=[]}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, values)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}=[")?;
            for (j, value) in values.iter().enumerate() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                f.write_str(value.as_deref().unwrap_or("null"))?;
            }
            f.write_str("]")?;
        }
        f.write_str("}")
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
