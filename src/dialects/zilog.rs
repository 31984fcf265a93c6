// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Zilog syntax (Z8, Z8000).
//!
//! `%` introduces hex (`%1F`) or an explicit base (`%(2)1010`, `%(8)17`);
//! otherwise numbers take Intel suffixes. Character constants use `%`
//! escapes, which is also why `%` is not a modulo operator here: `MOD` is.

use crate::core::dialect::{
    Dialect, LetterParser, Number, NumberParser, OperatorParser, Radix,
};
use crate::core::error::ErrorKind;
use crate::core::function::{BuiltinFunction, BuiltinTable, HIGH, LOW};
use crate::core::operator::Associativity::Left;
use crate::core::operator::{self as op, Operator, OperatorTable};
use crate::core::text_utils::{digit_value, Cursor};
use crate::core::value::Value;

use super::c_style::C_OPERATORS;
use super::intel::IntelNumberParser;
use super::{
    ascii_letter, end_of_number, scan_digits, LocationChars, SemicolonComment, SymbolChars,
};

pub static LNOT: Operator = Operator::prefix("LNOT", 3, op::logical_not);
pub static MOD: Operator = Operator::binary("MOD", 5, Left, op::modulo);
pub static SHL: Operator = Operator::binary("SHL", 7, Left, op::shift_left);
pub static SHR: Operator = Operator::binary("SHR", 7, Left, op::shift_right);
pub static LAND: Operator = Operator::binary("LAND", 14, Left, op::logical_and);
pub static LOR: Operator = Operator::binary("LOR", 15, Left, op::logical_or);

static OWN_OPERATORS: OperatorTable = OperatorTable {
    prefix: &[("LNOT", &LNOT)],
    infix: &[
        ("MOD", &MOD),
        ("SHL", &SHL),
        ("SHR", &SHR),
        ("LAND", &LAND),
        ("LOR", &LOR),
    ],
};

/// Zilog keywords first, then C operators except `%`.
pub struct ZilogOperatorParser;

impl OperatorParser for ZilogOperatorParser {
    fn read_prefix(&self, scan: &mut Cursor<'_>) -> Option<&'static Operator> {
        OWN_OPERATORS
            .read_prefix(scan)
            .or_else(|| C_OPERATORS.read_prefix(scan))
    }

    fn read_infix(&self, scan: &mut Cursor<'_>) -> Option<&'static Operator> {
        if let Some(op) = OWN_OPERATORS.read_infix(scan) {
            return Some(op);
        }
        if scan.peek() == Some(b'%') {
            return None;
        }
        C_OPERATORS.read_infix(scan)
    }
}

pub struct ZilogNumberParser;

impl ZilogNumberParser {
    fn explicit_radix(scan: &mut Cursor<'_>) -> Result<Option<Radix>, ErrorKind> {
        let mut probe = *scan;
        if !probe.expect(b'(') {
            return Ok(None);
        }
        let radix = match probe.take_while(|c| c.is_ascii_digit()) {
            "2" => Radix::Binary,
            "8" => Radix::Octal,
            "10" => Radix::Decimal,
            "16" => Radix::Hex,
            _ => return Err(ErrorKind::IllegalConstant),
        };
        if !probe.expect(b')') {
            return Err(ErrorKind::IllegalConstant);
        }
        *scan = probe;
        Ok(Some(radix))
    }
}

impl NumberParser for ZilogNumberParser {
    fn parse_number(&self, scan: &mut Cursor<'_>) -> Result<Option<Number>, ErrorKind> {
        if scan.peek() != Some(b'%') {
            return IntelNumberParser.parse_number(scan);
        }
        let mut probe = *scan;
        probe.next();
        let radix = match Self::explicit_radix(&mut probe)? {
            Some(radix) => radix,
            None if probe.peek().is_some_and(|c| digit_value(c, 16).is_some()) => Radix::Hex,
            None => return Ok(None),
        };
        let value = scan_digits(&mut probe, radix)?.ok_or(ErrorKind::IllegalConstant)?;
        end_of_number(&probe)?;
        *scan = probe;
        Ok(Some(Number::new(value, radix)))
    }
}

/// `'A'` with `%` escapes: `%%`, `%'`, `%L` (line feed), `%R` (return),
/// `%T` (tab), `%P` (form feed), `%Q` (quote) and `%hh`.
pub struct ZilogLetterParser;

impl ZilogLetterParser {
    fn escape(scan: &mut Cursor<'_>) -> Result<u8, ErrorKind> {
        let c = scan.next().ok_or(ErrorKind::MissingClosingQuote)?;
        if let (Some(hi), Some(lo)) = (
            digit_value(c, 16),
            scan.peek().and_then(|d| digit_value(d, 16)),
        ) {
            scan.next();
            return Ok((hi * 16 + lo) as u8);
        }
        match c.to_ascii_uppercase() {
            b'%' => Ok(b'%'),
            b'\'' | b'Q' => Ok(b'\''),
            b'L' => Ok(b'\n'),
            b'R' => Ok(b'\r'),
            b'T' => Ok(b'\t'),
            b'P' => Ok(0x0c),
            _ => Err(ErrorKind::UnknownEscapeSequence),
        }
    }
}

impl LetterParser for ZilogLetterParser {
    fn parse_letter(&self, scan: &mut Cursor<'_>) -> Result<Option<u32>, ErrorKind> {
        if scan.peek() != Some(b'\'') {
            return Ok(None);
        }
        let mut probe = *scan;
        probe.next();
        let letter = match probe.next() {
            None => return Err(ErrorKind::MissingClosingQuote),
            Some(b'\'') => return Err(ErrorKind::IllegalConstant),
            Some(b'%') => Self::escape(&mut probe)?,
            Some(c) => ascii_letter(c)?,
        };
        if !probe.expect(b'\'') {
            return Err(ErrorKind::MissingClosingQuote);
        }
        *scan = probe;
        Ok(Some(u32::from(letter)))
    }
}

pub static HIGH16: BuiltinFunction = BuiltinFunction::new("HIGH16", Value::high_word);
pub static LOW16: BuiltinFunction = BuiltinFunction::new("LOW16", Value::low_word);

static FUNCTIONS: BuiltinTable = BuiltinTable {
    functions: &[&HIGH, &LOW, &HIGH16, &LOW16],
};

static LOCATION: LocationChars = LocationChars { chars: b"$" };

static SYMBOLS: SymbolChars = SymbolChars {
    head: b"_.",
    tail: b"_.$",
};

pub static ZILOG: Dialect = Dialect {
    name: "zilog",
    description: "Zilog Z8 / Z8000 syntax",
    number: &ZilogNumberParser,
    letter: &ZilogLetterParser,
    comment: &SemicolonComment,
    location: &LOCATION,
    symbol: &SYMBOLS,
    operator: &ZilogOperatorParser,
    functions: &FUNCTIONS,
};
