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

//! Pattern construction.

use std::borrow::Cow;

// ----------------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------------

/// Pattern of variables without explicit pattern.
pub const DEFAULT: &str = "[^/]+?";

/// Pattern of values inside operators.
pub const VALUE: &str = "[^/]*?";

/// Pattern of the remainder after the head.
pub const TAIL: &str = "(?:/.*)?";

/// Pattern of the remainder after the head, if the template is empty.
pub const TAIL_EMPTY: &str = ".*";

/// Name of the capture group for the head.
pub const HEAD_GROUP: &str = "__head";

/// Name of the capture group for the tail.
pub const TAIL_GROUP: &str = "__tail";

/// Prefix of the capture group names for elements.
pub const GROUP_PREFIX: &str = "__";

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Converts all capturing groups of a pattern into non-capturing groups.
///
/// Capture groups are reserved for template elements, so groups that are part
/// of variable patterns must not capture. Named groups lose their name, while
/// escaped parentheses and parentheses inside character classes are left as
/// they are.
///
/// # Examples
///
/// ```
/// use waypoint_template::template::non_capturing;
///
/// // Convert capturing groups
/// let pattern = non_capturing(r"(a)(?:b)(?P<c>c)\([(]");
/// assert_eq!(pattern, r"(?:a)(?:b)(?:c)\([(]");
/// ```
#[must_use]
pub fn non_capturing(pattern: &str) -> Cow<'_, str> {
    if !pattern.contains('(') {
        return Cow::Borrowed(pattern);
    }

    // Track nesting of character classes, as they might contain parentheses
    let mut output = String::with_capacity(pattern.len() + 8);
    let mut depth = 0_usize;
    let mut chars = pattern.chars().peekable();
    while let Some(char) = chars.next() {
        match char {
            '\\' => {
                output.push(char);
                if let Some(next) = chars.next() {
                    output.push(next);
                }
            }

            // A closing bracket right at the start of a class is a literal
            '[' => {
                output.push(char);
                depth += 1;
                if chars.next_if_eq(&'^').is_some() {
                    output.push('^');
                }
                if chars.next_if_eq(&']').is_some() {
                    output.push(']');
                }
            }
            ']' if depth > 0 => {
                output.push(char);
                depth -= 1;
            }

            // Rewrite unnamed and named capturing groups
            '(' if depth == 0 => {
                output.push_str("(?:");
                if chars.next_if_eq(&'?').is_some() {
                    let named = chars.next_if_eq(&'P').is_some();
                    if chars.peek() == Some(&'<') || named {
                        chars.by_ref().take_while(|&c| c != '>').for_each(drop);
                    } else {
                        output.truncate(output.len() - 1);
                    }
                }
            }
            _ => output.push(char),
        }
    }
    Cow::Owned(output)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
