// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Fairchild F8 (3850) syntax.

use crate::core::dialect::{Dialect, LetterParser, Number, NumberParser, Radix};
use crate::core::error::ErrorKind;
use crate::core::function::NO_FUNCTIONS;
use crate::core::text_utils::Cursor;

use super::c_style::C_OPERATORS;
use super::{
    ascii_letter, scan_decimal, scan_marked_char, scan_prefixed, scan_quoted_chars,
    scan_quoted_radix, Closing, LocationChars, SemicolonComment, SymbolChars,
};

const QUOTED: &[(u8, Radix)] = &[
    (b'H', Radix::Hex),
    (b'O', Radix::Octal),
    (b'B', Radix::Binary),
    (b'D', Radix::Decimal),
];

/// `H'1F'`, `$1F`, `O'17'`, `B'101'`, `D'99'` and plain decimal.
pub struct FairchildNumberParser;

impl NumberParser for FairchildNumberParser {
    fn parse_number(&self, scan: &mut Cursor<'_>) -> Result<Option<Number>, ErrorKind> {
        if let Some(number) = scan_quoted_radix(scan, QUOTED, Closing::Required)? {
            return Ok(Some(number));
        }
        if let Some(number) = scan_prefixed(scan, b'$', Radix::Hex)? {
            return Ok(Some(number));
        }
        scan_decimal(scan)
    }
}

/// `C'A'`, `#A` or `'A'`.
pub struct FairchildLetterParser;

impl LetterParser for FairchildLetterParser {
    fn parse_letter(&self, scan: &mut Cursor<'_>) -> Result<Option<u32>, ErrorKind> {
        if let Some(letter) = scan_marked_char(scan, b'C')? {
            return Ok(Some(letter));
        }
        if scan.peek() == Some(b'#') {
            let mut probe = *scan;
            probe.next();
            let letter = probe.next().ok_or(ErrorKind::IllegalConstant)?;
            let letter = ascii_letter(letter)?;
            *scan = probe;
            return Ok(Some(u32::from(letter)));
        }
        scan_quoted_chars(scan, 1, true)
    }
}

static LOCATION: LocationChars = LocationChars { chars: b"*$" };

static SYMBOLS: SymbolChars = SymbolChars {
    head: b"_",
    tail: b"_",
};

pub static FAIRCHILD: Dialect = Dialect {
    name: "fairchild",
    description: "Fairchild F8 syntax",
    number: &FairchildNumberParser,
    letter: &FairchildLetterParser,
    comment: &SemicolonComment,
    location: &LOCATION,
    symbol: &SYMBOLS,
    operator: &C_OPERATORS,
    functions: &NO_FUNCTIONS,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn number(text: &str) -> Result<Option<u32>, ErrorKind> {
        FairchildNumberParser
            .parse_number(&mut Cursor::new(text))
            .map(|n| n.map(|n| n.value))
    }

    fn letter(text: &str) -> Result<Option<u32>, ErrorKind> {
        FairchildLetterParser.parse_letter(&mut Cursor::new(text))
    }

    #[test]
    fn numbers() {
        assert_eq!(number("H'1F'"), Ok(Some(0x1f)));
        assert_eq!(number("$1F"), Ok(Some(0x1f)));
        assert_eq!(number("B'1010'"), Ok(Some(10)));
        assert_eq!(number("H'1F"), Err(ErrorKind::MissingClosingQuote));
        assert_eq!(number("12"), Ok(Some(12)));
        assert_eq!(number("$"), Ok(None));
    }

    #[test]
    fn letters() {
        assert_eq!(letter("C'A'"), Ok(Some(0x41)));
        assert_eq!(letter("#A"), Ok(Some(0x41)));
        assert_eq!(letter("'A'"), Ok(Some(0x41)));
        assert_eq!(letter("CA"), Ok(None));
    }
}
