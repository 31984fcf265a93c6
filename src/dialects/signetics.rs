// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Signetics 2650 syntax.
//!
//! Prefix `<` takes the high byte and prefix `>` the low byte of an
//! address; both bind like the other unary operators.

use crate::core::dialect::{Dialect, LetterParser, Number, NumberParser, Radix};
use crate::core::error::ErrorKind;
use crate::core::function::NO_FUNCTIONS;
use crate::core::operator::{self as op, Operator, OperatorTable};
use crate::core::text_utils::Cursor;

use super::c_style::C_OPERATORS;
use super::{
    scan_decimal, scan_marked_char, scan_quoted_chars, scan_quoted_radix, Closing,
    LayeredOperators, LocationChars, SemicolonComment, SymbolChars,
};

pub static HIGH_BYTE: Operator = Operator::prefix("<", 3, op::high_byte);
pub static LOW_BYTE: Operator = Operator::prefix(">", 3, op::low_byte);

static OWN_OPERATORS: OperatorTable = OperatorTable {
    prefix: &[("<", &HIGH_BYTE), (">", &LOW_BYTE)],
    infix: &[],
};

static OPERATORS: LayeredOperators = LayeredOperators {
    own: &OWN_OPERATORS,
    fallback: &C_OPERATORS,
};

const QUOTED: &[(u8, Radix)] = &[
    (b'H', Radix::Hex),
    (b'O', Radix::Octal),
    (b'B', Radix::Binary),
    (b'D', Radix::Decimal),
];

/// `H'1F'`, `O'17'`, `B'101'`, `D'99'` and plain decimal.
pub struct SigneticsNumberParser;

impl NumberParser for SigneticsNumberParser {
    fn parse_number(&self, scan: &mut Cursor<'_>) -> Result<Option<Number>, ErrorKind> {
        if let Some(number) = scan_quoted_radix(scan, QUOTED, Closing::Required)? {
            return Ok(Some(number));
        }
        scan_decimal(scan)
    }
}

/// `A'x'` or `'x'`.
pub struct SigneticsLetterParser;

impl LetterParser for SigneticsLetterParser {
    fn parse_letter(&self, scan: &mut Cursor<'_>) -> Result<Option<u32>, ErrorKind> {
        if let Some(letter) = scan_marked_char(scan, b'A')? {
            return Ok(Some(letter));
        }
        scan_quoted_chars(scan, 1, true)
    }
}

static LOCATION: LocationChars = LocationChars { chars: b"$*" };

static SYMBOLS: SymbolChars = SymbolChars {
    head: b"_",
    tail: b"_",
};

pub static SIGNETICS: Dialect = Dialect {
    name: "signetics",
    description: "Signetics 2650 syntax",
    number: &SigneticsNumberParser,
    letter: &SigneticsLetterParser,
    comment: &SemicolonComment,
    location: &LOCATION,
    symbol: &SYMBOLS,
    operator: &OPERATORS,
    functions: &NO_FUNCTIONS,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dialect::OperatorParser;

    #[test]
    fn numbers_and_letters() {
        let mut scan = Cursor::new("H'7F'");
        assert_eq!(
            SigneticsNumberParser.parse_number(&mut scan),
            Ok(Some(Number::new(0x7f, Radix::Hex)))
        );
        let mut scan = Cursor::new("A'Z'");
        assert_eq!(SigneticsLetterParser.parse_letter(&mut scan), Ok(Some(0x5a)));
    }

    #[test]
    fn byte_prefixes_only_in_prefix_position() {
        let mut scan = Cursor::new("<LABEL");
        assert_eq!(OPERATORS.read_prefix(&mut scan).map(|op| op.name), Some("<"));
        let mut scan = Cursor::new("< 3");
        assert_eq!(OPERATORS.read_infix(&mut scan).map(|op| op.prec), Some(9));
        let mut scan = Cursor::new("-1");
        assert_eq!(OPERATORS.read_prefix(&mut scan).map(|op| op.name), Some("-"));
    }
}
