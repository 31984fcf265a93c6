// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! RCA CDP1802 syntax.
//!
//! `A.0(addr)` and `A.1(addr)` select the low and high byte of an address,
//! so symbols may contain `.` after the first character.

use crate::core::dialect::{Dialect, LetterParser, Number, NumberParser, Radix};
use crate::core::error::ErrorKind;
use crate::core::function::{BuiltinFunction, BuiltinTable};
use crate::core::text_utils::Cursor;
use crate::core::value::Value;

use super::c_style::C_OPERATORS;
use super::{
    scan_decimal, scan_marked_char, scan_prefixed, scan_quoted_chars, scan_quoted_radix, Closing,
    LocationChars, SemicolonComment, SymbolChars,
};

const QUOTED: &[(u8, Radix)] = &[
    (b'X', Radix::Hex),
    (b'B', Radix::Binary),
    (b'D', Radix::Decimal),
];

/// `#1F`, `X'1F'`, `B'101'`, `D'99'` and plain decimal.
pub struct RcaNumberParser;

impl NumberParser for RcaNumberParser {
    fn parse_number(&self, scan: &mut Cursor<'_>) -> Result<Option<Number>, ErrorKind> {
        if let Some(number) = scan_prefixed(scan, b'#', Radix::Hex)? {
            return Ok(Some(number));
        }
        if let Some(number) = scan_quoted_radix(scan, QUOTED, Closing::Required)? {
            return Ok(Some(number));
        }
        scan_decimal(scan)
    }
}

/// `T'A'` or `'A'`.
pub struct RcaLetterParser;

impl LetterParser for RcaLetterParser {
    fn parse_letter(&self, scan: &mut Cursor<'_>) -> Result<Option<u32>, ErrorKind> {
        if let Some(letter) = scan_marked_char(scan, b'T')? {
            return Ok(Some(letter));
        }
        scan_quoted_chars(scan, 1, true)
    }
}

pub static A0: BuiltinFunction = BuiltinFunction::new("A.0", Value::low_byte);
pub static A1: BuiltinFunction = BuiltinFunction::new("A.1", Value::high_byte);

static FUNCTIONS: BuiltinTable = BuiltinTable {
    functions: &[&A0, &A1],
};

static LOCATION: LocationChars = LocationChars { chars: b"*$" };

static SYMBOLS: SymbolChars = SymbolChars {
    head: b"_",
    tail: b"_.",
};

pub static RCA: Dialect = Dialect {
    name: "rca",
    description: "RCA CDP1802 syntax",
    number: &RcaNumberParser,
    letter: &RcaLetterParser,
    comment: &SemicolonComment,
    location: &LOCATION,
    symbol: &SYMBOLS,
    operator: &C_OPERATORS,
    functions: &FUNCTIONS,
};
