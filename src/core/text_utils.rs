// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Shared text utilities for scanning expression source.

/// Check if a byte is a valid identifier start character (letter or underscore).
#[inline]
pub fn is_ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

/// Check if a byte is a valid identifier continuation character.
#[inline]
pub fn is_ident_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

/// Check if a byte is whitespace (space or tab).
#[inline]
pub fn is_space(c: u8) -> bool {
    c == b' ' || c == b'\t'
}

/// Value of `c` as a digit in `radix`, if it is one.
#[inline]
pub fn digit_value(c: u8, radix: u32) -> Option<u32> {
    (c as char).to_digit(radix)
}

/// A copyable scan position over one source line.
///
/// Recognizers work on a copy and store it back only on success, so a
/// failed match never moves the caller's cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor<'a> {
    line: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the start of the input.
    pub fn new(line: &'a str) -> Self {
        Self { line, pos: 0 }
    }

    /// Create a new cursor starting at a specific position.
    pub fn with_pos(line: &'a str, pos: usize) -> Self {
        Self {
            line,
            pos: pos.min(line.len()),
        }
    }

    /// Get the current position.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// The whole line this cursor scans.
    pub fn line(&self) -> &'a str {
        self.line
    }

    /// Text from the current position to the end of the line.
    pub fn rest(&self) -> &'a str {
        self.line.get(self.pos..).unwrap_or_default()
    }

    /// Text between `start` and the current position.
    pub fn since(&self, start: usize) -> &'a str {
        self.line.get(start.min(self.pos)..self.pos).unwrap_or_default()
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.line.len()
    }

    /// Skip whitespace characters.
    pub fn skip_ws(&mut self) -> &mut Self {
        while self.peek().is_some_and(is_space) {
            self.pos += 1;
        }
        self
    }

    /// Peek at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.peek_at(0)
    }

    /// Peek `offset` bytes ahead of the current position.
    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.line.as_bytes().get(self.pos + offset).copied()
    }

    /// Consume and return the current byte.
    ///
    /// A non-ASCII lead byte consumes its whole character, so the position
    /// always stays on a character boundary.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.pos += if c.is_ascii() {
            1
        } else {
            self.rest().chars().next().map_or(1, char::len_utf8)
        };
        Some(c)
    }

    /// Consume `c` if it is the current byte.
    pub fn expect(&mut self, c: u8) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume `text` if the line continues with it.
    pub fn expect_str(&mut self, text: &str) -> bool {
        if self.rest().starts_with(text) {
            self.pos += text.len();
            true
        } else {
            false
        }
    }

    /// Consume `word` (case-insensitive) when it is not followed by an identifier character.
    pub fn iexpect_word(&mut self, word: &str) -> bool {
        let rest = self.rest().as_bytes();
        if rest.len() < word.len() || !rest[..word.len()].eq_ignore_ascii_case(word.as_bytes()) {
            return false;
        }
        if rest.get(word.len()).copied().is_some_and(is_ident_char) {
            return false;
        }
        self.pos += word.len();
        true
    }

    /// Advance while `pred` holds, returning the consumed text.
    pub fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
        self.since(start)
    }
}
