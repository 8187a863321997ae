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

//! Query string parsing and formatting.

use crate::Params;
use crate::encoding::{decode_query, encode_query_param};

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Parses a query string into parameters.
///
/// The query string is expected without the initial `?` separator. Pairs are
/// separated by `&`, and names and values by the first `=`, so that values
/// might contain further `=` characters. Names without `=` are bound to `None`.
/// If `decode` is set, names and values are percent-decoded, with `+` being
/// decoded as a space.
///
/// # Examples
///
/// ```
/// use waypoint_uri::query::parse_query;
///
/// // Parse query string
/// let params = parse_query("a=1&b=2%203+4&b=5&c", true);
/// assert_eq!(params.get("a"), Some("1"));
/// assert_eq!(params.get_all("b").len(), 2);
/// assert_eq!(params.get("b"), Some("2 3 4"));
/// assert!(params.contains("c"));
/// ```
#[must_use]
pub fn parse_query(query: &str, decode: bool) -> Params {
    let convert = |value: &str| {
        if decode {
            decode_query(value).into_owned()
        } else {
            value.to_string()
        }
    };

    // Empty pairs, e.g., from `a=1&&b=2`, are skipped
    let mut params = Params::new();
    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        match pair.split_once('=') {
            Some((name, value)) => params.add(convert(name), convert(value)),
            None => params.add_null(convert(pair)),
        }
    }
    params
}

/// Formats parameters as a query string.
///
/// Names and values are percent-encoded, retaining escape sequences that are
/// already present. Parameters bound to `None` are written without `=`.
///
/// # Examples
///
/// ```
/// use waypoint_uri::Params;
/// use waypoint_uri::query::format_query;
///
/// // Create parameters and format them
/// let mut params = Params::from_iter([("q", "a b&c")]);
/// params.add_null("flag");
/// assert_eq!(format_query(&params), "q=a+b%26c&flag");
/// ```
#[must_use]
pub fn format_query(params: &Params) -> String {
    let mut output = String::new();
    for (name, values) in params {
        for value in values {
            if !output.is_empty() {
                output.push('&');
            }
            output.push_str(&encode_query_param(name, true));
            if let Some(value) = value {
                output.push('=');
                output.push_str(&encode_query_param(value, true));
            }
        }
    }
    output
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
