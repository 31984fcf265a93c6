// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! National Semiconductor syntax (SC/MP, INS8070, NS32000).

use crate::core::dialect::{Dialect, LetterParser, Number, NumberParser, Radix};
use crate::core::error::ErrorKind;
use crate::core::function::{BuiltinFunction, BuiltinTable};
use crate::core::text_utils::Cursor;
use crate::core::value::Value;

use super::c_style::C_OPERATORS;
use super::{
    end_of_number, scan_decimal, scan_digits, scan_quoted_chars, scan_quoted_radix, Closing,
    LocationChars, SemicolonComment, SymbolChars,
};

const QUOTED: &[(u8, Radix)] = &[
    (b'X', Radix::Hex),
    (b'O', Radix::Octal),
    (b'B', Radix::Binary),
    (b'D', Radix::Decimal),
];

/// `X'1F'`, `O'17'`, `B'101'`, `D'99'` (closing quote optional), `0x1F`.
pub struct NationalNumberParser;

impl NumberParser for NationalNumberParser {
    fn parse_number(&self, scan: &mut Cursor<'_>) -> Result<Option<Number>, ErrorKind> {
        if let Some(number) = scan_quoted_radix(scan, QUOTED, Closing::Optional)? {
            return Ok(Some(number));
        }
        if scan.peek() == Some(b'0') && matches!(scan.peek_at(1), Some(b'x' | b'X')) {
            let mut probe = *scan;
            probe.next();
            probe.next();
            let value = scan_digits(&mut probe, Radix::Hex)?.ok_or(ErrorKind::IllegalConstant)?;
            end_of_number(&probe)?;
            *scan = probe;
            return Ok(Some(Number::new(value, Radix::Hex)));
        }
        scan_decimal(scan)
    }
}

pub struct NationalLetterParser;

impl LetterParser for NationalLetterParser {
    fn parse_letter(&self, scan: &mut Cursor<'_>) -> Result<Option<u32>, ErrorKind> {
        scan_quoted_chars(scan, 1, false)
    }
}

pub static H: BuiltinFunction = BuiltinFunction::new("H", Value::high_byte);
pub static L: BuiltinFunction = BuiltinFunction::new("L", Value::low_byte);

static FUNCTIONS: BuiltinTable = BuiltinTable {
    functions: &[&H, &L],
};

static LOCATION: LocationChars = LocationChars { chars: b".$" };

static SYMBOLS: SymbolChars = SymbolChars {
    head: b"_",
    tail: b"_$",
};

pub static NATIONAL: Dialect = Dialect {
    name: "national",
    description: "National Semiconductor SC/MP and NS32000 syntax",
    number: &NationalNumberParser,
    letter: &NationalLetterParser,
    comment: &SemicolonComment,
    location: &LOCATION,
    symbol: &SYMBOLS,
    operator: &C_OPERATORS,
    functions: &FUNCTIONS,
};
