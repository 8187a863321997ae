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

//! Percent-encoding codec.
//!
//! Every URI component has its own set of characters that can appear without
//! being percent-encoded. Unreserved characters, i.e., letters, digits and
//! `-._~`, are never encoded, all other bytes, including every byte of a
//! non-ASCII character, are encoded as `%XX` with upper-case hex digits,
//! unless the component lists them as safe.

use percent_encoding::{
    AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode,
};
use std::borrow::Cow;

// ----------------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------------

/// Characters to encode in generic strings.
const STRING: &AsciiSet =
    &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Characters to encode in user info.
#[rustfmt::skip]
const USER_INFO: &AsciiSet = &STRING
    .remove(b'!').remove(b'$').remove(b'&').remove(b'\'').remove(b'(')
    .remove(b')').remove(b'*').remove(b'+').remove(b',').remove(b';')
    .remove(b'=').remove(b':');

/// Characters to encode in path segments.
const PATH_SEGMENT: &AsciiSet = &USER_INFO.remove(b'@');

/// Characters to encode in matrix parameters.
const MATRIX: &AsciiSet = &PATH_SEGMENT.add(b';').add(b'=');

/// Characters to encode in paths.
const PATH: &AsciiSet = &PATH_SEGMENT.remove(b'/');

/// Characters to encode in query strings and fragments.
const QUERY: &AsciiSet = &PATH.remove(b'?');

/// Characters to encode in query parameter names and values.
const QUERY_PARAM: &AsciiSet = &QUERY.add(b'&').add(b'=');

/// Characters to encode in URIs.
const URI: &AsciiSet = &QUERY.remove(b'#').remove(b'[').remove(b']');

/// Characters to encode in URI templates.
const URI_TEMPLATE: &AsciiSet = &URI.remove(b'{').remove(b'}');

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// URI component.
///
/// The component determines which characters are considered safe, and thus
/// are not percent-encoded by [`encode`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Component {
    /// Generic string, only unreserved characters are safe.
    #[default]
    String,
    /// User info.
    UserInfo,
    /// Path.
    Path,
    /// Path segment.
    PathSegment,
    /// Matrix parameter.
    Matrix,
    /// Query string.
    Query,
    /// Query parameter name or value.
    QueryParam,
    /// Fragment.
    Fragment,
    /// URI.
    Uri,
    /// URI template.
    UriTemplate,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Component {
    /// Returns the set of characters to encode.
    #[must_use]
    const fn set(self) -> &'static AsciiSet {
        match self {
            Component::String => STRING,
            Component::UserInfo => USER_INFO,
            Component::Path => PATH,
            Component::PathSegment => PATH_SEGMENT,
            Component::Matrix => MATRIX,
            Component::Query | Component::Fragment => QUERY,
            Component::QueryParam => QUERY_PARAM,
            Component::Uri => URI,
            Component::UriTemplate => URI_TEMPLATE,
        }
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Percent-encodes a string for the given URI component.
///
/// If `preserve` is set, valid escape sequences, i.e., `%` followed by two hex
/// digits, are kept as they are, which prevents double-encoding of values that
/// are already encoded. Otherwise, `%` is encoded as `%25` like any other
/// character that is not safe for the component.
///
/// # Examples
///
/// ```
/// use waypoint_uri::encoding::{encode, Component};
///
/// // Encode path segment
/// let value = encode("a b/c%20", Component::PathSegment, true);
/// assert_eq!(value, "a%20b%2Fc%20");
///
/// // Encode path segment, including escape sequences
/// let value = encode("a b/c%20", Component::PathSegment, false);
/// assert_eq!(value, "a%20b%2Fc%2520");
/// ```
#[must_use]
pub fn encode(value: &str, component: Component, preserve: bool) -> Cow<'_, str> {
    if !preserve {
        return encode_chunk(value, component);
    }

    // Split the value at valid escape sequences, which are copied verbatim,
    // and encode everything in between
    let bytes = value.as_bytes();
    let mut output: Option<String> = None;
    let mut start = 0;
    let mut index = 0;
    while index < bytes.len() {
        if is_escape(bytes, index) {
            let chunk = encode_chunk(&value[start..index], component);
            let buffer = output.get_or_insert_with(String::new);
            buffer.push_str(&chunk);
            buffer.push_str(&value[index..index + 3]);
            index += 3;
            start = index;
        } else {
            index += 1;
        }
    }

    // Values without escape sequences are encoded in one go
    match output {
        None => encode_chunk(value, component),
        Some(mut buffer) => {
            buffer.push_str(&encode_chunk(&value[start..], component));
            Cow::Owned(buffer)
        }
    }
}

/// Percent-encodes a string, leaving only unreserved characters.
///
/// Escape sequences are never preserved, so `%` is always encoded.
///
/// # Examples
///
/// ```
/// use waypoint_uri::encoding::encode_string;
///
/// // Encode string
/// let value = encode_string("enc:oded");
/// assert_eq!(value, "enc%3Aoded");
/// ```
#[inline]
#[must_use]
pub fn encode_string(value: &str) -> Cow<'_, str> {
    encode(value, Component::String, false)
}

/// Percent-encodes user info.
#[inline]
#[must_use]
pub fn encode_user_info(value: &str, preserve: bool) -> Cow<'_, str> {
    encode(value, Component::UserInfo, preserve)
}

/// Percent-encodes a path.
#[inline]
#[must_use]
pub fn encode_path(value: &str, preserve: bool) -> Cow<'_, str> {
    encode(value, Component::Path, preserve)
}

/// Percent-encodes a path segment.
#[inline]
#[must_use]
pub fn encode_path_segment(value: &str, preserve: bool) -> Cow<'_, str> {
    encode(value, Component::PathSegment, preserve)
}

/// Percent-encodes a matrix parameter.
#[inline]
#[must_use]
pub fn encode_matrix(value: &str, preserve: bool) -> Cow<'_, str> {
    encode(value, Component::Matrix, preserve)
}

/// Percent-encodes a query string.
#[inline]
#[must_use]
pub fn encode_query(value: &str, preserve: bool) -> Cow<'_, str> {
    encode(value, Component::Query, preserve)
}

/// Percent-encodes a query parameter name or value.
///
/// Spaces are encoded as `+`.
#[inline]
#[must_use]
pub fn encode_query_param(value: &str, preserve: bool) -> Cow<'_, str> {
    encode(value, Component::QueryParam, preserve)
}

/// Percent-encodes a fragment.
#[inline]
#[must_use]
pub fn encode_fragment(value: &str, preserve: bool) -> Cow<'_, str> {
    encode(value, Component::Fragment, preserve)
}

/// Percent-encodes a URI.
#[inline]
#[must_use]
pub fn encode_uri(value: &str, preserve: bool) -> Cow<'_, str> {
    encode(value, Component::Uri, preserve)
}

/// Percent-encodes a URI template, leaving `{` and `}` untouched.
#[inline]
#[must_use]
pub fn encode_uri_template(value: &str, preserve: bool) -> Cow<'_, str> {
    encode(value, Component::UriTemplate, preserve)
}

/// Decodes a percent-encoded string.
///
/// Decoding is lenient: escape sequences that are not followed by two hex
/// digits are kept as they are, and invalid UTF-8 is replaced with the
/// replacement character. Note that `+` is not decoded to a space, which is
/// only the case for query strings, see [`decode_query`].
///
/// # Examples
///
/// ```
/// use waypoint_uri::encoding::decode;
///
/// // Decode string
/// let value = decode("a%20b+c%2");
/// assert_eq!(value, "a b+c%2");
/// ```
#[inline]
#[must_use]
pub fn decode(value: &str) -> Cow<'_, str> {
    percent_decode_str(value).decode_utf8_lossy()
}

/// Decodes a percent-encoded query string, where `+` denotes a space.
#[inline]
#[must_use]
pub fn decode_query(value: &str) -> Cow<'_, str> {
    if value.contains('+') {
        percent_decode_str(&value.replace('+', " "))
            .decode_utf8_lossy()
            .into_owned()
            .into()
    } else {
        percent_decode_str(value).decode_utf8_lossy()
    }
}

/// Returns whether the given character is unreserved.
#[inline]
#[must_use]
pub fn is_unreserved(char: char) -> bool {
    char.is_ascii_alphanumeric() || matches!(char, '-' | '.' | '_' | '~')
}

// ----------------------------------------------------------------------------

/// Percent-encodes a string that doesn't contain escape sequences to retain.
fn encode_chunk(value: &str, component: Component) -> Cow<'_, str> {
    let encoded = utf8_percent_encode(value, component.set());
    if component == Component::QueryParam && value.contains(' ') {
        let mut buffer = String::with_capacity(value.len());
        for chunk in encoded {
            buffer.push_str(if chunk == "%20" { "+" } else { chunk });
        }
        Cow::Owned(buffer)
    } else {
        encoded.into()
    }
}

/// Returns whether a valid escape sequence starts at the given index.
pub(crate) fn is_escape(bytes: &[u8], index: usize) -> bool {
    bytes[index] == b'%'
        && bytes.get(index + 1).is_some_and(u8::is_ascii_hexdigit)
        && bytes.get(index + 2).is_some_and(u8::is_ascii_hexdigit)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
