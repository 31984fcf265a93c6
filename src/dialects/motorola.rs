// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Motorola syntax (6800, 6809, 68HC11 and the 6502 family assemblers).
//!
//! - `$1F` hex, `%101` binary, `@17` octal, `&10` decimal
//! - `'A` character constants; the closing quote may be omitted
//! - `*` is the location counter and starts a comment in column 1
//! - `!.` `!+` `!X` bitwise operators, `!<` `!>` shifts and `!L` `!R`
//!   16-bit rotates, evaluated with multiplication

use crate::core::dialect::{Dialect, LetterParser, Number, NumberParser, Radix};
use crate::core::error::ErrorKind;
use crate::core::function::{BuiltinTable, HIGH, LOW, LSW, MSW};
use crate::core::operator::Associativity::Left;
use crate::core::operator::{self as op, Operator, OperatorTable};
use crate::core::text_utils::Cursor;

use super::c_style::C_OPERATORS;
use super::{
    ascii_letter, scan_decimal, scan_prefixed, LayeredOperators, LocationChars, StarComment,
    SymbolChars,
};

pub static AND: Operator = Operator::binary("!.", 11, Left, op::bit_and);
pub static OR: Operator = Operator::binary("!+", 13, Left, op::bit_or);
pub static XOR: Operator = Operator::binary("!X", 12, Left, op::bit_xor);
pub static SHL: Operator = Operator::binary("!<", 5, Left, op::shift_left);
pub static SHR: Operator = Operator::binary("!>", 5, Left, op::shift_right);
pub static ROL: Operator = Operator::binary("!L", 5, Left, op::rotate_left);
pub static ROR: Operator = Operator::binary("!R", 5, Left, op::rotate_right);

static OWN_OPERATORS: OperatorTable = OperatorTable {
    prefix: &[],
    infix: &[
        ("!.", &AND),
        ("!+", &OR),
        ("!X", &XOR),
        ("!x", &XOR),
        ("!<", &SHL),
        ("!>", &SHR),
        ("!L", &ROL),
        ("!l", &ROL),
        ("!R", &ROR),
        ("!r", &ROR),
    ],
};

static OPERATORS: LayeredOperators = LayeredOperators {
    own: &OWN_OPERATORS,
    fallback: &C_OPERATORS,
};

pub struct MotorolaNumberParser;

impl NumberParser for MotorolaNumberParser {
    fn parse_number(&self, scan: &mut Cursor<'_>) -> Result<Option<Number>, ErrorKind> {
        match scan.peek() {
            Some(b'$') => scan_prefixed(scan, b'$', Radix::Hex),
            Some(b'%') => scan_prefixed(scan, b'%', Radix::Binary),
            Some(b'@') => scan_prefixed(scan, b'@', Radix::Octal),
            Some(b'&') => scan_prefixed(scan, b'&', Radix::Decimal),
            _ => scan_decimal(scan),
        }
    }
}

pub struct MotorolaLetterParser;

impl LetterParser for MotorolaLetterParser {
    fn parse_letter(&self, scan: &mut Cursor<'_>) -> Result<Option<u32>, ErrorKind> {
        if scan.peek() != Some(b'\'') {
            return Ok(None);
        }
        let mut probe = *scan;
        probe.next();
        let letter = probe.next().ok_or(ErrorKind::IllegalConstant)?;
        let letter = ascii_letter(letter)?;
        probe.expect(b'\'');
        *scan = probe;
        Ok(Some(u32::from(letter)))
    }
}

static COMMENT: StarComment = StarComment { semicolon: true };

static LOCATION: LocationChars = LocationChars { chars: b"*" };

static SYMBOLS: SymbolChars = SymbolChars {
    head: b"_.",
    tail: b"_.$",
};

static FUNCTIONS: BuiltinTable = BuiltinTable {
    functions: &[&HIGH, &LOW, &MSW, &LSW],
};

pub static MOTOROLA: Dialect = Dialect {
    name: "motorola",
    description: "Motorola 68xx / MOS 65xx syntax",
    number: &MotorolaNumberParser,
    letter: &MotorolaLetterParser,
    comment: &COMMENT,
    location: &LOCATION,
    symbol: &SYMBOLS,
    operator: &OPERATORS,
    functions: &FUNCTIONS,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dialect::OperatorParser;

    fn number(text: &str) -> Result<Option<u32>, ErrorKind> {
        MotorolaNumberParser
            .parse_number(&mut Cursor::new(text))
            .map(|n| n.map(|n| n.value))
    }

    #[test]
    fn prefixed_numbers() {
        assert_eq!(number("$1F"), Ok(Some(0x1f)));
        assert_eq!(number("%1010"), Ok(Some(10)));
        assert_eq!(number("@17"), Ok(Some(0o17)));
        assert_eq!(number("&99"), Ok(Some(99)));
        assert_eq!(number("42"), Ok(Some(42)));
        assert_eq!(number("$"), Ok(None));
        assert_eq!(number("%102"), Err(ErrorKind::IllegalConstant));
        assert_eq!(number("$1G"), Err(ErrorKind::IllegalConstant));
    }

    #[test]
    fn letters_with_optional_closing_quote() {
        let mut scan = Cursor::new("'A+1");
        assert_eq!(MotorolaLetterParser.parse_letter(&mut scan), Ok(Some(0x41)));
        assert_eq!(scan.rest(), "+1");
        let mut scan = Cursor::new("'A'");
        assert_eq!(MotorolaLetterParser.parse_letter(&mut scan), Ok(Some(0x41)));
        assert!(scan.at_end());
    }

    #[test]
    fn bang_operators_before_c_fallback() {
        let mut scan = Cursor::new("!x 3");
        assert_eq!(OPERATORS.read_infix(&mut scan).map(|op| op.name), Some("!X"));
        let mut scan = Cursor::new("!= 3");
        assert_eq!(OPERATORS.read_infix(&mut scan).map(|op| op.name), Some("!="));
        let mut scan = Cursor::new("!L 3");
        assert_eq!(OPERATORS.read_infix(&mut scan).map(|op| op.prec), Some(5));
    }
}
