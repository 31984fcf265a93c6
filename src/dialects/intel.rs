// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Intel syntax (8080/8085, 8086, 8048/8051 and Z80 in Intel mode).
//!
//! Numbers carry a radix suffix (`0FFH`, `17Q`, `1010B`, `99D`) and must
//! start with a decimal digit. Operators follow the ASM80 tiers:
//!
//! | tier | operators |
//! |------|-----------|
//! | 1 | `HIGH` `LOW` (prefix) |
//! | 2 | `*` `/` `MOD` `SHL` `SHR` |
//! | 3 | `+` `-` (prefix and infix) |
//! | 4 | `EQ` `NE` `LT` `LE` `GT` `GE` (non-associative) |
//! | 5 | `NOT` (prefix) |
//! | 6 | `AND` |
//! | 7 | `OR` `XOR` |
//!
//! C spellings (`<<`, `&`, `==`, ...) are accepted and placed on the same
//! tiers as their keyword equivalents.

use crate::core::dialect::{Dialect, LetterParser, Number, NumberParser, Radix};
use crate::core::error::ErrorKind;
use crate::core::function::NO_FUNCTIONS;
use crate::core::operator::Associativity::{Left, None as NonAssoc};
use crate::core::operator::{self as op, Operator, OperatorTable};
use crate::core::text_utils::Cursor;

use super::{
    digits_value, end_of_number, scan_quoted_chars, LocationChars, SemicolonComment, SymbolChars,
};

pub static HIGH: Operator = Operator::prefix("HIGH", 1, op::high_byte);
pub static LOW: Operator = Operator::prefix("LOW", 1, op::low_byte);
pub static NEGATE: Operator = Operator::prefix("-", 3, op::negate);
pub static POSITIVE: Operator = Operator::prefix("+", 3, op::identity);
pub static NOT: Operator = Operator::prefix("NOT", 5, op::complement);
pub static LOGICAL_NOT: Operator = Operator::prefix("!", 5, op::logical_not);

pub static MUL: Operator = Operator::binary("*", 2, Left, op::multiply);
pub static DIV: Operator = Operator::binary("/", 2, Left, op::division);
pub static MOD: Operator = Operator::binary("MOD", 2, Left, op::modulo);
pub static SHL: Operator = Operator::binary("SHL", 2, Left, op::shift_left);
pub static SHR: Operator = Operator::binary("SHR", 2, Left, op::shift_right);
pub static ADD: Operator = Operator::binary("+", 3, Left, op::add);
pub static SUB: Operator = Operator::binary("-", 3, Left, op::subtract);
pub static EQ: Operator = Operator::binary("EQ", 4, NonAssoc, op::equal);
pub static NE: Operator = Operator::binary("NE", 4, NonAssoc, op::not_equal);
pub static LT: Operator = Operator::binary("LT", 4, NonAssoc, op::less);
pub static LE: Operator = Operator::binary("LE", 4, NonAssoc, op::less_eq);
pub static GT: Operator = Operator::binary("GT", 4, NonAssoc, op::greater);
pub static GE: Operator = Operator::binary("GE", 4, NonAssoc, op::greater_eq);
pub static AND: Operator = Operator::binary("AND", 6, Left, op::bit_and);
pub static LOGICAL_AND: Operator = Operator::binary("&&", 6, Left, op::logical_and);
pub static OR: Operator = Operator::binary("OR", 7, Left, op::bit_or);
pub static XOR: Operator = Operator::binary("XOR", 7, Left, op::bit_xor);
pub static LOGICAL_OR: Operator = Operator::binary("||", 7, Left, op::logical_or);

pub static INTEL_OPERATORS: OperatorTable = OperatorTable {
    prefix: &[
        ("HIGH", &HIGH),
        ("LOW", &LOW),
        ("NOT", &NOT),
        ("-", &NEGATE),
        ("+", &POSITIVE),
        ("~", &NOT),
        ("!", &LOGICAL_NOT),
    ],
    infix: &[
        ("MOD", &MOD),
        ("SHL", &SHL),
        ("SHR", &SHR),
        ("EQ", &EQ),
        ("NE", &NE),
        ("LT", &LT),
        ("LE", &LE),
        ("GT", &GT),
        ("GE", &GE),
        ("AND", &AND),
        ("OR", &OR),
        ("XOR", &XOR),
        ("<<", &SHL),
        ("<=", &LE),
        ("<", &LT),
        (">>", &SHR),
        (">=", &GE),
        (">", &GT),
        ("==", &EQ),
        ("!=", &NE),
        ("&&", &LOGICAL_AND),
        ("&", &AND),
        ("||", &LOGICAL_OR),
        ("|", &OR),
        ("^", &XOR),
        ("*", &MUL),
        ("/", &DIV),
        ("%", &MOD),
        ("+", &ADD),
        ("-", &SUB),
    ],
};

/// Digits followed by an optional `H`, `O`/`Q`, `B` or `D` suffix.
pub struct IntelNumberParser;

impl NumberParser for IntelNumberParser {
    fn parse_number(&self, scan: &mut Cursor<'_>) -> Result<Option<Number>, ErrorKind> {
        if !scan.peek().is_some_and(|c| c.is_ascii_digit()) {
            return Ok(None);
        }
        let mut probe = *scan;
        let text = probe.take_while(|c| c.is_ascii_alphanumeric());
        let (digits, radix) = match text.as_bytes().last().map(u8::to_ascii_uppercase) {
            Some(b'H') => (&text[..text.len() - 1], Radix::Hex),
            Some(b'O' | b'Q') => (&text[..text.len() - 1], Radix::Octal),
            Some(b'B') => (&text[..text.len() - 1], Radix::Binary),
            Some(b'D') => (&text[..text.len() - 1], Radix::Decimal),
            _ => (text, Radix::Decimal),
        };
        let value = digits_value(digits, radix)?;
        end_of_number(&probe)?;
        *scan = probe;
        Ok(Some(Number::new(value, radix)))
    }
}

/// `'A'`, or two characters `'AB'` packed into a word; `''` is a quote.
pub struct IntelLetterParser;

impl LetterParser for IntelLetterParser {
    fn parse_letter(&self, scan: &mut Cursor<'_>) -> Result<Option<u32>, ErrorKind> {
        scan_quoted_chars(scan, 2, true)
    }
}

static LOCATION: LocationChars = LocationChars { chars: b"$" };

static SYMBOLS: SymbolChars = SymbolChars {
    head: b"_?@",
    tail: b"_?@",
};

pub static INTEL: Dialect = Dialect {
    name: "intel",
    description: "Intel suffix radixes and keyword operators",
    number: &IntelNumberParser,
    letter: &IntelLetterParser,
    comment: &SemicolonComment,
    location: &LOCATION,
    symbol: &SYMBOLS,
    operator: &INTEL_OPERATORS,
    functions: &NO_FUNCTIONS,
};
