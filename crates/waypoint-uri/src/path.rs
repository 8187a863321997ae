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

//! Path normalization and helpers.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

mod segment;

pub use segment::{Segment, parse_path};

use crate::encoding::{is_escape, is_unreserved};

// ----------------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------------

/// URI reference regex, see RFC 3986, appendix B.
static URI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?:(?P<scheme>[^:/?#]+):)?(?://(?P<authority>[^/?#]*))?",
        r"(?P<path>[^?#]*)(?:\?(?P<query>[^#]*))?(?:#(?P<fragment>.*))?$"
    ))
    .unwrap()
});

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Normalizes a URI reference.
///
/// This implements syntax-based normalization as described in RFC 3986,
/// section 6.2.2: hex digits of escape sequences are converted to upper case,
/// escape sequences of unreserved characters are decoded, scheme and host are
/// converted to lower case, and dot segments are removed from the path.
///
/// # Examples
///
/// ```
/// use waypoint_uri::path::normalize;
///
/// // Normalize path
/// let path = normalize("ab%72c%2F123/d%2fdef/a/../b/./c%20sss");
/// assert_eq!(path, "abrc%2F123/d%2Fdef/b/c%20sss");
///
/// // Normalize URI
/// let uri = normalize("HTTP://Example.COM/a/./b/../c?q=%7e");
/// assert_eq!(uri, "http://example.com/a/c?q=~");
/// ```
#[must_use]
pub fn normalize(uri: &str) -> String {
    let Some(captures) = URI_RE.captures(uri) else {
        return remove_dot_segments(&normalize_escapes(uri));
    };

    // Scheme and authority are case-insensitive, except for user info
    let mut output = String::with_capacity(uri.len());
    if let Some(scheme) = captures.name("scheme") {
        output.push_str(&scheme.as_str().to_ascii_lowercase());
        output.push(':');
    }
    if let Some(authority) = captures.name("authority") {
        let authority = normalize_escapes(authority.as_str());
        output.push_str("//");
        match authority.rsplit_once('@') {
            Some((user, host)) => {
                output.push_str(user);
                output.push('@');
                output.push_str(&host.to_ascii_lowercase());
            }
            None => output.push_str(&authority.to_ascii_lowercase()),
        }
    }

    // Remove dot segments from path and normalize the rest
    let path = captures.name("path").map_or("", |path| path.as_str());
    output.push_str(&remove_dot_segments(&normalize_escapes(path)));
    if let Some(query) = captures.name("query") {
        output.push('?');
        output.push_str(&normalize_escapes(query.as_str()));
    }
    if let Some(fragment) = captures.name("fragment") {
        output.push('#');
        output.push_str(&normalize_escapes(fragment.as_str()));
    }
    output
}

/// Removes `.` and `..` segments from a path.
///
/// Segments that climb above the root of an absolute path are dropped, while
/// leading `..` segments of relative paths are retained. A trailing slash is
/// kept if the last segment is empty, `.` or a `..` that removed a segment,
/// so a retained `..` is never followed by an added slash.
///
/// # Examples
///
/// ```
/// use waypoint_uri::path::remove_dot_segments;
///
/// // Remove dot segments
/// let path = remove_dot_segments("/path1/path2/./../path3");
/// assert_eq!(path, "/path1/path3");
/// ```
#[must_use]
pub fn remove_dot_segments(path: &str) -> String {
    let absolute = path.starts_with('/');
    let segments = path.split('/').skip(usize::from(absolute));

    // Resolve segments, keeping track of a trailing slash
    let mut stack: Vec<&str> = Vec::new();
    let mut trailing = false;
    let mut iter = segments.peekable();
    while let Some(segment) = iter.next() {
        let last = iter.peek().is_none();
        match segment {
            "." => trailing = last,
            ".." => match stack.last() {
                Some(&top) if top != ".." => {
                    stack.pop();
                    trailing = last;
                }
                _ if !absolute => {
                    stack.push("..");
                    trailing = false;
                }
                _ => trailing = last,
            },
            "" if last => trailing = true,
            _ => {
                stack.push(segment);
                trailing = false;
            }
        }
    }

    // Assemble path from resolved segments
    let mut output = String::with_capacity(path.len());
    if absolute {
        output.push('/');
    }
    output.push_str(&stack.join("/"));
    if trailing && !stack.is_empty() {
        output.push('/');
    }
    output
}

/// Removes a single trailing slash.
///
/// # Examples
///
/// ```
/// use waypoint_uri::path::remove_trailing_slash;
///
/// // Remove trailing slash
/// assert_eq!(remove_trailing_slash("/path/"), "/path");
/// assert_eq!(remove_trailing_slash("/path//"), "/path/");
/// ```
#[inline]
#[must_use]
pub fn remove_trailing_slash(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}

/// Returns the URI without its query string and fragment.
#[must_use]
pub fn strip_query(uri: &str) -> &str {
    uri.find(['?', '#']).map_or(uri, |index| &uri[..index])
}

/// Returns the query string of the URI, if any.
///
/// # Examples
///
/// ```
/// use waypoint_uri::path::query_of;
///
/// // Extract query string
/// assert_eq!(query_of("/path?a=1#top"), Some("a=1"));
/// assert_eq!(query_of("/path#top?a=1"), None);
/// ```
#[must_use]
pub fn query_of(uri: &str) -> Option<&str> {
    let uri = uri.split_once('#').map_or(uri, |(uri, _)| uri);
    uri.split_once('?').map(|(_, query)| query)
}

/// Returns the relative path from the directory of `from` to `to`.
///
/// The directory of `from` is everything up to and including its last slash,
/// so `/a/b` is treated as a file `b` in the directory `/a/`. If `to` refers
/// to that directory, `.` is returned, and `..` for each level up.
///
/// # Examples
///
/// ```
/// use waypoint_uri::path::relativize;
///
/// // Compute relative path
/// let path = relativize("/domain/report/456", "/domain/service/ABC");
/// assert_eq!(path, "../service/ABC");
/// ```
#[must_use]
pub fn relativize(from: &str, to: &str) -> String {
    let mut dir: Vec<&str> = from.split('/').collect();
    dir.pop();
    let target: Vec<&str> = to.split('/').collect();

    // Determine number of common segments
    let common = dir
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();

    // Climb up to the common ancestor, then descend
    let mut parts = vec![".."; dir.len() - common];
    parts.extend(&target[common..]);
    if parts.is_empty() {
        String::from(".")
    } else {
        parts.join("/")
    }
}

/// Appends a path to a base URI, joined with exactly one slash.
///
/// # Examples
///
/// ```
/// use waypoint_uri::path::append;
///
/// // Append path to base URI
/// let uri = append("http://localhost:8080/", "/rest/");
/// assert_eq!(uri, "http://localhost:8080/rest/");
/// ```
#[must_use]
pub fn append(base: &str, path: &str) -> String {
    let base = remove_trailing_slash(base);
    let path = path.strip_prefix('/').unwrap_or(path);
    let mut output = String::with_capacity(base.len() + path.len() + 1);
    output.push_str(base);
    output.push('/');
    output.push_str(path);
    output
}

// ----------------------------------------------------------------------------

/// Upper-cases escape sequences and decodes those of unreserved characters.
fn normalize_escapes(value: &str) -> Cow<'_, str> {
    if !value.contains('%') {
        return Cow::Borrowed(value);
    }

    // Rewrite all valid escape sequences, leaving the rest as is
    let bytes = value.as_bytes();
    let mut output = String::with_capacity(value.len());
    let mut start = 0;
    let mut index = 0;
    while index < bytes.len() {
        if !is_escape(bytes, index) {
            index += 1;
            continue;
        }
        output.push_str(&value[start..index]);
        let escape = &value[index..index + 3];
        match u8::from_str_radix(&escape[1..], 16) {
            Ok(byte) if is_unreserved(char::from(byte)) => {
                output.push(char::from(byte));
            }
            _ => output.push_str(&escape.to_ascii_uppercase()),
        }
        index += 3;
        start = index;
    }
    output.push_str(&value[start..]);
    Cow::Owned(output)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
