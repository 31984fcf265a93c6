// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! C-style syntax: `0x1F`, `0b101`, `017`, `'\n'` and the C operator set.
//!
//! The operator table defined here is also the fallback for most other
//! vendor families.

use crate::core::dialect::{Dialect, LetterParser, Number, NumberParser, Radix};
use crate::core::error::ErrorKind;
use crate::core::function::{BuiltinTable, HIGH, LOW, LSW, MSW};
use crate::core::operator::Associativity::{Left, None as NonAssoc};
use crate::core::operator::{self as op, Operator, OperatorTable};
use crate::core::text_utils::{digit_value, Cursor};

use super::{
    ascii_letter, end_of_number, scan_decimal, scan_digits, LocationChars, SemicolonComment,
    SymbolChars,
};

pub static NEGATE: Operator = Operator::prefix("-", 3, op::negate);
pub static POSITIVE: Operator = Operator::prefix("+", 3, op::identity);
pub static COMPLEMENT: Operator = Operator::prefix("~", 3, op::complement);
pub static LOGICAL_NOT: Operator = Operator::prefix("!", 3, op::logical_not);

pub static MUL: Operator = Operator::binary("*", 5, Left, op::multiply);
pub static DIV: Operator = Operator::binary("/", 5, Left, op::division);
pub static MOD: Operator = Operator::binary("%", 5, Left, op::modulo);
pub static ADD: Operator = Operator::binary("+", 6, Left, op::add);
pub static SUB: Operator = Operator::binary("-", 6, Left, op::subtract);
pub static SHL: Operator = Operator::binary("<<", 7, Left, op::shift_left);
pub static SHR: Operator = Operator::binary(">>", 7, Left, op::shift_right);
pub static LT: Operator = Operator::binary("<", 9, NonAssoc, op::less);
pub static LE: Operator = Operator::binary("<=", 9, NonAssoc, op::less_eq);
pub static GT: Operator = Operator::binary(">", 9, NonAssoc, op::greater);
pub static GE: Operator = Operator::binary(">=", 9, NonAssoc, op::greater_eq);
pub static EQ: Operator = Operator::binary("==", 10, NonAssoc, op::equal);
pub static NE: Operator = Operator::binary("!=", 10, NonAssoc, op::not_equal);
pub static BIT_AND: Operator = Operator::binary("&", 11, Left, op::bit_and);
pub static BIT_XOR: Operator = Operator::binary("^", 12, Left, op::bit_xor);
pub static BIT_OR: Operator = Operator::binary("|", 13, Left, op::bit_or);
pub static LOGICAL_AND: Operator = Operator::binary("&&", 14, Left, op::logical_and);
pub static LOGICAL_OR: Operator = Operator::binary("||", 15, Left, op::logical_or);

pub static C_OPERATORS: OperatorTable = OperatorTable {
    prefix: &[
        ("-", &NEGATE),
        ("+", &POSITIVE),
        ("~", &COMPLEMENT),
        ("!", &LOGICAL_NOT),
    ],
    infix: &[
        ("<<", &SHL),
        ("<=", &LE),
        ("<", &LT),
        (">>", &SHR),
        (">=", &GE),
        (">", &GT),
        ("==", &EQ),
        ("!=", &NE),
        ("&&", &LOGICAL_AND),
        ("&", &BIT_AND),
        ("||", &LOGICAL_OR),
        ("|", &BIT_OR),
        ("^", &BIT_XOR),
        ("*", &MUL),
        ("/", &DIV),
        ("%", &MOD),
        ("+", &ADD),
        ("-", &SUB),
    ],
};

pub struct CStyleNumberParser;

impl NumberParser for CStyleNumberParser {
    fn parse_number(&self, scan: &mut Cursor<'_>) -> Result<Option<Number>, ErrorKind> {
        if scan.peek() != Some(b'0') {
            return scan_decimal(scan);
        }
        let radix = match scan.peek_at(1) {
            Some(b'x' | b'X') => Radix::Hex,
            Some(b'b' | b'B') => Radix::Binary,
            Some(c) if c.is_ascii_digit() => Radix::Octal,
            _ => return scan_decimal(scan),
        };
        let mut probe = *scan;
        probe.next();
        if radix != Radix::Octal {
            probe.next();
        }
        let value = scan_digits(&mut probe, radix)?.ok_or(ErrorKind::IllegalConstant)?;
        end_of_number(&probe)?;
        *scan = probe;
        Ok(Some(Number::new(value, radix)))
    }
}

pub struct CStyleLetterParser;

impl CStyleLetterParser {
    fn escape(scan: &mut Cursor<'_>) -> Result<u8, ErrorKind> {
        let c = scan.next().ok_or(ErrorKind::MissingClosingQuote)?;
        let value = match c {
            b'n' => b'\n',
            b't' => b'\t',
            b'r' => b'\r',
            b'a' => 0x07,
            b'b' => 0x08,
            b'f' => 0x0c,
            b'v' => 0x0b,
            b'\\' | b'\'' | b'"' | b'?' => c,
            b'x' | b'X' => {
                let mut value = 0u32;
                let mut count = 0;
                while count < 2 {
                    let Some(digit) = scan.peek().and_then(|d| digit_value(d, 16)) else {
                        break;
                    };
                    scan.next();
                    value = value * 16 + digit;
                    count += 1;
                }
                if count == 0 {
                    return Err(ErrorKind::UnknownEscapeSequence);
                }
                value as u8
            }
            b'0'..=b'7' => {
                let mut value = u32::from(c - b'0');
                let mut count = 1;
                while count < 3 {
                    let Some(digit) = scan.peek().and_then(|d| digit_value(d, 8)) else {
                        break;
                    };
                    scan.next();
                    value = value * 8 + digit;
                    count += 1;
                }
                if value > 0xff {
                    return Err(ErrorKind::OverflowRange);
                }
                value as u8
            }
            _ => return Err(ErrorKind::UnknownEscapeSequence),
        };
        Ok(value)
    }
}

impl LetterParser for CStyleLetterParser {
    fn parse_letter(&self, scan: &mut Cursor<'_>) -> Result<Option<u32>, ErrorKind> {
        if scan.peek() != Some(b'\'') {
            return Ok(None);
        }
        let mut probe = *scan;
        probe.next();
        let letter = match probe.next() {
            None => return Err(ErrorKind::MissingClosingQuote),
            Some(b'\'') => return Err(ErrorKind::IllegalConstant),
            Some(b'\\') => Self::escape(&mut probe)?,
            Some(c) => ascii_letter(c)?,
        };
        if !probe.expect(b'\'') {
            return Err(ErrorKind::MissingClosingQuote);
        }
        *scan = probe;
        Ok(Some(u32::from(letter)))
    }
}

static SYMBOLS: SymbolChars = SymbolChars {
    head: b"_.",
    tail: b"_.",
};

static LOCATION: LocationChars = LocationChars { chars: b".$" };

static FUNCTIONS: BuiltinTable = BuiltinTable {
    functions: &[&HIGH, &LOW, &MSW, &LSW],
};

pub static C_STYLE: Dialect = Dialect {
    name: "c",
    description: "C-style literals and operators",
    number: &CStyleNumberParser,
    letter: &CStyleLetterParser,
    comment: &SemicolonComment,
    location: &LOCATION,
    symbol: &SYMBOLS,
    operator: &C_OPERATORS,
    functions: &FUNCTIONS,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn number(text: &str) -> Result<Option<u32>, ErrorKind> {
        let mut scan = Cursor::new(text);
        CStyleNumberParser
            .parse_number(&mut scan)
            .map(|n| n.map(|n| n.value))
    }

    fn letter(text: &str) -> Result<Option<u32>, ErrorKind> {
        CStyleLetterParser.parse_letter(&mut Cursor::new(text))
    }

    #[test]
    fn numbers() {
        assert_eq!(number("0x1F"), Ok(Some(0x1f)));
        assert_eq!(number("0B1010"), Ok(Some(10)));
        assert_eq!(number("017"), Ok(Some(0o17)));
        assert_eq!(number("0"), Ok(Some(0)));
        assert_eq!(number("1234"), Ok(Some(1234)));
        assert_eq!(number("0x"), Err(ErrorKind::IllegalConstant));
        assert_eq!(number("0b102"), Err(ErrorKind::IllegalConstant));
        assert_eq!(number("09"), Err(ErrorKind::IllegalConstant));
        assert_eq!(number("0x100000000"), Err(ErrorKind::OverflowRange));
        assert_eq!(number("abc"), Ok(None));
    }

    #[test]
    fn letters() {
        assert_eq!(letter("'a'"), Ok(Some(0x61)));
        assert_eq!(letter("'\\n'"), Ok(Some(0x0a)));
        assert_eq!(letter("'\\x41'"), Ok(Some(0x41)));
        assert_eq!(letter("'\\101'"), Ok(Some(0x41)));
        assert_eq!(letter("'\\''"), Ok(Some(0x27)));
        assert_eq!(letter("'\\q'"), Err(ErrorKind::UnknownEscapeSequence));
        assert_eq!(letter("'ab'"), Err(ErrorKind::MissingClosingQuote));
        assert_eq!(letter("'a"), Err(ErrorKind::MissingClosingQuote));
        assert_eq!(letter("''"), Err(ErrorKind::IllegalConstant));
        assert_eq!(letter("a"), Ok(None));
    }

    #[test]
    fn operator_spellings() {
        let mut scan = Cursor::new("<<2");
        assert_eq!(C_OPERATORS.read_infix(&mut scan).map(|op| op.name), Some("<<"));
        let mut scan = Cursor::new("&&1");
        assert_eq!(C_OPERATORS.read_infix(&mut scan).map(|op| op.name), Some("&&"));
        let mut scan = Cursor::new("~1");
        assert_eq!(C_OPERATORS.read_prefix(&mut scan).map(|op| op.name), Some("~"));
    }
}
