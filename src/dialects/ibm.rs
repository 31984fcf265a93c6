// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! IBM System/370 self-defining terms.

use crate::core::dialect::{Dialect, LetterParser, Number, NumberParser, Radix};
use crate::core::error::ErrorKind;
use crate::core::function::NO_FUNCTIONS;
use crate::core::text_utils::Cursor;

use super::c_style::C_OPERATORS;
use super::{
    scan_decimal, scan_digits, scan_quoted_chars, scan_quoted_radix, Closing, LocationChars,
    StarComment, SymbolChars,
};

const QUOTED: &[(u8, Radix)] = &[(b'X', Radix::Hex), (b'B', Radix::Binary)];

/// `X'1F'`, `B'101'`, `F'-12'` and plain decimal.
pub struct IbmNumberParser;

impl IbmNumberParser {
    fn fixed_point(scan: &mut Cursor<'_>) -> Result<Option<Number>, ErrorKind> {
        if !scan.peek().is_some_and(|c| c.eq_ignore_ascii_case(&b'F')) || scan.peek_at(1) != Some(b'\'')
        {
            return Ok(None);
        }
        let mut probe = *scan;
        probe.next();
        probe.next();
        let negative = probe.expect(b'-');
        if !negative {
            probe.expect(b'+');
        }
        let value = scan_digits(&mut probe, Radix::Decimal)?.ok_or(ErrorKind::IllegalConstant)?;
        if !probe.expect(b'\'') {
            return Err(ErrorKind::MissingClosingQuote);
        }
        let value = if negative {
            0i32.checked_sub_unsigned(value)
        } else {
            i32::try_from(value).ok()
        };
        let value = value.ok_or(ErrorKind::OverflowRange)?;
        *scan = probe;
        Ok(Some(Number::signed(value, Radix::Decimal)))
    }
}

impl NumberParser for IbmNumberParser {
    fn parse_number(&self, scan: &mut Cursor<'_>) -> Result<Option<Number>, ErrorKind> {
        if let Some(number) = scan_quoted_radix(scan, QUOTED, Closing::Required)? {
            return Ok(Some(number));
        }
        if let Some(number) = Self::fixed_point(scan)? {
            return Ok(Some(number));
        }
        scan_decimal(scan)
    }
}

/// `C'A'` up to four characters; `''` is a quote.
pub struct IbmLetterParser;

impl LetterParser for IbmLetterParser {
    fn parse_letter(&self, scan: &mut Cursor<'_>) -> Result<Option<u32>, ErrorKind> {
        if !scan.peek().is_some_and(|c| c.eq_ignore_ascii_case(&b'C')) || scan.peek_at(1) != Some(b'\'')
        {
            return Ok(None);
        }
        let mut probe = *scan;
        probe.next();
        let value = scan_quoted_chars(&mut probe, 4, true)?;
        *scan = probe;
        Ok(value)
    }
}

static COMMENT: StarComment = StarComment { semicolon: false };

static LOCATION: LocationChars = LocationChars { chars: b"*" };

static SYMBOLS: SymbolChars = SymbolChars {
    head: b"_@#$",
    tail: b"_@#$",
};

pub static IBM: Dialect = Dialect {
    name: "ibm",
    description: "IBM System/370 syntax",
    number: &IbmNumberParser,
    letter: &IbmLetterParser,
    comment: &COMMENT,
    location: &LOCATION,
    symbol: &SYMBOLS,
    operator: &C_OPERATORS,
    functions: &NO_FUNCTIONS,
};
