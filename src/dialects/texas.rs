// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Texas Instruments syntax (TMS9900, TMS7000).
//!
//! The TI assemblers have no arithmetic precedence: `+ - * /` are applied
//! strictly left to right, so `1+2*3` is 9.

use crate::core::dialect::{Dialect, LetterParser, Number, NumberParser, Radix};
use crate::core::error::ErrorKind;
use crate::core::function::NO_FUNCTIONS;
use crate::core::operator::Associativity::Left;
use crate::core::operator::{self as op, Operator, OperatorTable};
use crate::core::text_utils::Cursor;

use super::c_style::C_OPERATORS;
use super::{
    scan_decimal, scan_prefixed, scan_quoted_chars, LayeredOperators, LocationChars,
    SemicolonComment, SymbolChars,
};

pub static ADD: Operator = Operator::binary("+", 6, Left, op::add);
pub static SUB: Operator = Operator::binary("-", 6, Left, op::subtract);
pub static MUL: Operator = Operator::binary("*", 6, Left, op::multiply);
pub static DIV: Operator = Operator::binary("/", 6, Left, op::division);

static OWN_OPERATORS: OperatorTable = OperatorTable {
    prefix: &[],
    infix: &[("+", &ADD), ("-", &SUB), ("*", &MUL), ("/", &DIV)],
};

static OPERATORS: LayeredOperators = LayeredOperators {
    own: &OWN_OPERATORS,
    fallback: &C_OPERATORS,
};

/// `>1F` hex and plain decimal.
pub struct TexasNumberParser;

impl NumberParser for TexasNumberParser {
    fn parse_number(&self, scan: &mut Cursor<'_>) -> Result<Option<Number>, ErrorKind> {
        if let Some(number) = scan_prefixed(scan, b'>', Radix::Hex)? {
            return Ok(Some(number));
        }
        scan_decimal(scan)
    }
}

/// `'A'` or `'AB'`; `''` is a quote.
pub struct TexasLetterParser;

impl LetterParser for TexasLetterParser {
    fn parse_letter(&self, scan: &mut Cursor<'_>) -> Result<Option<u32>, ErrorKind> {
        scan_quoted_chars(scan, 2, true)
    }
}

static LOCATION: LocationChars = LocationChars { chars: b"$" };

static SYMBOLS: SymbolChars = SymbolChars {
    head: b"_",
    tail: b"_$",
};

pub static TEXAS: Dialect = Dialect {
    name: "texas",
    description: "Texas Instruments TMS9900 / TMS7000 syntax",
    number: &TexasNumberParser,
    letter: &TexasLetterParser,
    comment: &SemicolonComment,
    location: &LOCATION,
    symbol: &SYMBOLS,
    operator: &OPERATORS,
    functions: &NO_FUNCTIONS,
};
