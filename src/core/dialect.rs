// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Lexical dialect capabilities.
//!
//! Each vendor syntax family plugs one implementation of every capability
//! into a [`Dialect`]. Recognizers share one contract: on success they
//! advance the cursor past the token; when the text is not theirs they
//! return "not recognized" and leave the cursor alone, so the evaluator can
//! try the next alternative. `Err` means the token was theirs but malformed.

use crate::core::error::ErrorKind;
use crate::core::function::FunctionTable;
use crate::core::operator::Operator;
use crate::core::text_utils::Cursor;
use crate::core::value::Value;

/// Base of a numeric literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    Binary = 2,
    Octal = 8,
    Decimal = 10,
    Hex = 16,
}

impl Radix {
    pub fn base(self) -> u32 {
        self as u32
    }
}

/// A recognized numeric literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Number {
    pub value: u32,
    pub radix: Radix,
    /// The literal spells a signed quantity (IBM `F'-1'`).
    pub signed: bool,
}

impl Number {
    pub fn new(value: u32, radix: Radix) -> Self {
        Self {
            value,
            radix,
            signed: false,
        }
    }

    /// A literal whose bits are a two's complement `i32`.
    pub fn signed(value: i32, radix: Radix) -> Self {
        Self {
            value: value as u32,
            radix,
            signed: true,
        }
    }

    pub fn to_value(self) -> Value {
        if self.signed {
            Value::Signed(self.value as i32)
        } else {
            Value::from_magnitude(self.value)
        }
    }
}

/// Recognizes numeric literals.
pub trait NumberParser: Send + Sync {
    fn parse_number(&self, scan: &mut Cursor<'_>) -> Result<Option<Number>, ErrorKind>;
}

/// Recognizes quoted character constants.
pub trait LetterParser: Send + Sync {
    fn parse_letter(&self, scan: &mut Cursor<'_>) -> Result<Option<u32>, ErrorKind>;
}

/// Recognizes comment introducers.
pub trait CommentParser: Send + Sync {
    /// True if the whole line starting at `scan` is a comment.
    fn comment_line(&self, scan: &Cursor<'_>) -> bool;

    /// True if nothing but a comment (or nothing at all) follows `scan`.
    fn end_of_line(&self, scan: &Cursor<'_>) -> bool;
}

/// Recognizes the current-location pseudo-symbol.
pub trait LocationParser: Send + Sync {
    fn parse_location(&self, scan: &mut Cursor<'_>) -> bool;
}

/// Recognizes identifiers.
pub trait SymbolParser: Send + Sync {
    /// True if `c` may appear in a symbol; `head` selects the leading position.
    fn symbol_letter(&self, c: u8, head: bool) -> bool;

    fn parse_symbol<'a>(&self, scan: &mut Cursor<'a>) -> Option<&'a str> {
        let first = scan.peek()?;
        if !self.symbol_letter(first, true) {
            return None;
        }
        let start = scan.pos();
        scan.next();
        while scan.peek().is_some_and(|c| self.symbol_letter(c, false)) {
            scan.next();
        }
        Some(scan.since(start))
    }
}

/// Recognizes prefix and infix operators.
pub trait OperatorParser: Send + Sync {
    fn read_prefix(&self, scan: &mut Cursor<'_>) -> Option<&'static Operator>;
    fn read_infix(&self, scan: &mut Cursor<'_>) -> Option<&'static Operator>;
}

/// A complete set of recognizers for one vendor syntax family.
///
/// Selected once when a target is chosen; never modified afterward.
pub struct Dialect {
    pub name: &'static str,
    pub description: &'static str,
    pub number: &'static dyn NumberParser,
    pub letter: &'static dyn LetterParser,
    pub comment: &'static dyn CommentParser,
    pub location: &'static dyn LocationParser,
    pub symbol: &'static dyn SymbolParser,
    pub operator: &'static dyn OperatorParser,
    pub functions: &'static dyn FunctionTable,
}

impl std::fmt::Debug for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dialect").field("name", &self.name).finish()
    }
}
