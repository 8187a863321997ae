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

//! Path segment.

use std::fmt;

use crate::Params;
use crate::encoding::{self, encode_matrix, encode_path_segment};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Path segment.
///
/// A path segment consists of the segment's path and its matrix parameters,
/// which are appended to the path with `;`, e.g., `cars;color=red;year`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Segment {
    /// Segment path.
    path: String,
    /// Matrix parameters.
    matrix: Params,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Segment {
    /// Parses a path segment.
    ///
    /// Matrix parameters without `=` are bound to `None`. If `decode` is set,
    /// the path as well as the names and values of matrix parameters are
    /// percent-decoded.
    ///
    /// # Examples
    ///
    /// ```
    /// use waypoint_uri::Segment;
    ///
    /// // Parse path segment
    /// let segment = Segment::parse("cars;color=red;year", false);
    /// assert_eq!(segment.path(), "cars");
    /// assert_eq!(segment.matrix().get("color"), Some("red"));
    /// ```
    #[must_use]
    pub fn parse(value: &str, decode: bool) -> Self {
        let convert = |value: &str| {
            if decode {
                encoding::decode(value).into_owned()
            } else {
                value.to_string()
            }
        };

        // The first part is the path, all further parts are parameters
        let mut parts = value.split(';');
        let path = parts.next().map(&convert).unwrap_or_default();
        let mut matrix = Params::new();
        for part in parts.filter(|part| !part.is_empty()) {
            match part.split_once('=') {
                Some((name, value)) => matrix.add(convert(name), convert(value)),
                None => matrix.add_null(convert(part)),
            }
        }
        Self { path, matrix }
    }
}

#[allow(clippy::must_use_candidate)]
impl Segment {
    /// Returns the segment path.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the matrix parameters.
    #[inline]
    pub fn matrix(&self) -> &Params {
        &self.matrix
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl fmt::Display for Segment {
    /// Formats the path segment for display, percent-encoding as necessary.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_path_segment(&self.path, true))?;
        for (name, values) in &self.matrix {
            for value in values {
                write!(f, ";{}", encode_matrix(name, true))?;
                if let Some(value) = value {
                    write!(f, "={}", encode_matrix(value, true))?;
                }
            }
        }
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Parses a path into segments.
///
/// A single leading slash is ignored, and a trailing slash results in an empty
/// last segment, so the number of segments always equals the number of path
/// separators plus one.
///
/// # Examples
///
/// ```
/// use waypoint_uri::path::parse_path;
///
/// // Parse path into segments
/// let segments = parse_path("a/b;m=1/c/", false);
/// assert_eq!(segments.len(), 4);
/// assert_eq!(segments[1].matrix().get("m"), Some("1"));
/// assert_eq!(segments[3].path(), "");
/// ```
#[must_use]
pub fn parse_path(path: &str, decode: bool) -> Vec<Segment> {
    let path = path.strip_prefix('/').unwrap_or(path);
    path.split('/')
        .map(|segment| Segment::parse(segment, decode))
        .collect()
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
