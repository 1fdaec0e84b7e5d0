//! Include directive recognition and line splitting
//!
//! Content is handled as raw bytes; nothing here assumes a text encoding.

use regex::bytes::Regex;

/// Matches a quoted include directive occupying a whole line
///
/// `#include "path"`, with optional whitespace around `#` and `include`,
/// optionally followed by a `//` comment or a `/* ... */` comment closed on
/// the same line. Angle-bracket includes and any other trailing text are not
/// directives. An unclosed `/*` keeps the line as text: replacing it would
/// drop the comment opener and leave the comment body as code.
pub struct IncludeMatcher {
    pattern: Regex,
}

impl IncludeMatcher {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(
                r#"(?-u)^\s*#\s*include\s*"([\w./\\]+)"\s*(?://.*|/\*[^*]*\*+(?:[^/*][^*]*\*+)*/\s*)?$"#,
            )
            .expect("include pattern is valid"),
        }
    }

    /// Quoted target of `line`, if it is an include directive
    ///
    /// `line` must not carry its terminator.
    pub fn target<'l>(&self, line: &'l [u8]) -> Option<&'l str> {
        let captures = self.pattern.captures(line)?;
        // The target class is ASCII-only
        std::str::from_utf8(captures.get(1)?.as_bytes()).ok()
    }
}

impl Default for IncludeMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// One line of content, without its terminator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub text: &'a [u8],
    /// Whether the line ended with `\n`, `\r\n` or `\r`
    pub terminated: bool,
}

/// Split `content` into lines
///
/// `\n`, `\r\n` and a lone `\r` all end a line. Content ending with a
/// terminator yields no trailing empty line.
pub fn lines(content: &[u8]) -> Lines<'_> {
    Lines { rest: content }
}

pub struct Lines<'a> {
    rest: &'a [u8],
}

impl<'a> Iterator for Lines<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Line<'a>> {
        if self.rest.is_empty() {
            return None;
        }

        match self.rest.iter().position(|&b| b == b'\n' || b == b'\r') {
            Some(end) => {
                let text = &self.rest[..end];
                let skip = if self.rest[end] == b'\r' && self.rest.get(end + 1) == Some(&b'\n') {
                    2
                } else {
                    1
                };
                self.rest = &self.rest[end + skip..];
                Some(Line {
                    text,
                    terminated: true,
                })
            }
            None => {
                let text = self.rest;
                self.rest = &[];
                Some(Line {
                    text,
                    terminated: false,
                })
            }
        }
    }
}
