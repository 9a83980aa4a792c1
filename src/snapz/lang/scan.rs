//! Shared lexical layer for both tag languages.
//!
//! ```text
//! kebab        := [A-Za-z0-9?]+('-'[A-Za-z0-9?]+)*
//! valueUnit    := valueList | tagValue          (bare value => singleton)
//! valueList    := '[' ws? (tagValue (ws tagValue)*)? ws? ']'
//! ```
//!
//! A `-` belongs to a kebab token only when another kebab character
//! follows it, so `a-b` is one token while `a-#` stops after `a`.

use crate::error::{Result, SnapzError};

pub(crate) fn is_kebab_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '?'
}

/// Cursor over the raw input. Positions are byte offsets, which is
/// what parse errors report.
pub(crate) struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Scanner { input, pos: 0 }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Rewind to an earlier position (backtracking).
    pub fn set_pos(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    pub fn peek_second(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    pub fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            return true;
        }
        false
    }

    pub fn eat_str(&mut self, expected: &str) -> bool {
        if self.input[self.pos..].starts_with(expected) {
            self.pos += expected.len();
            return true;
        }
        false
    }

    /// Consumes any whitespace; reports whether there was some.
    pub fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
        self.pos > start
    }

    /// Everything from the cursor to the end, consumed.
    pub fn take_rest(&mut self) -> &'a str {
        let rest = &self.input[self.pos..];
        self.pos = self.input.len();
        rest
    }

    pub fn error(&self, expected: &str) -> SnapzError {
        SnapzError::expected(self.pos, expected)
    }

    /// One kebab token, maximal munch. `label` names the grammar slot
    /// for the error message.
    pub fn kebab(&mut self, label: &str) -> Result<String> {
        let start = self.pos;
        if !self.peek().is_some_and(is_kebab_char) {
            return Err(self.error(label));
        }

        while let Some(ch) = self.peek() {
            if is_kebab_char(ch) {
                self.advance();
            } else if ch == '-' && self.peek_second().is_some_and(is_kebab_char) {
                self.advance();
            } else {
                break;
            }
        }

        Ok(self.input[start..self.pos].to_string())
    }

    /// A value unit: either one bare value or a bracketed,
    /// whitespace-separated list (which may be empty).
    pub fn value_unit(&mut self) -> Result<Vec<String>> {
        if !self.eat('[') {
            return Ok(vec![self.kebab("a tag value")?]);
        }

        self.skip_ws();
        let mut values = Vec::new();
        if self.peek().is_some_and(is_kebab_char) {
            values.push(self.kebab("a tag value")?);
            loop {
                let save = self.pos;
                if !self.skip_ws() {
                    break;
                }
                if !self.peek().is_some_and(is_kebab_char) {
                    self.set_pos(save);
                    break;
                }
                values.push(self.kebab("a tag value")?);
            }
        }

        self.skip_ws();
        if !self.eat(']') {
            return Err(self.error("\"]\""));
        }
        Ok(values)
    }
}
