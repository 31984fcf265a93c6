// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Vendor syntax families.
//!
//! Each submodule assembles one [`Dialect`] from recognizers. The pieces
//! that several vendors share (digit scanning, quoted literals, comment and
//! location conventions, symbol character sets) live here.
//!
//! # Families
//!
//! - [`c_style`] - `0x` / `0b` / leading-zero octal, C operators
//! - [`motorola`] - `$` / `%` / `@` / `&` prefixes, `!`-operators
//! - [`intel`] - radix suffixes, keyword operators
//! - [`zilog`] - `%` hex and `%(base)` forms, `%` character escapes
//! - [`national`] - `X'..'` style quoted radix prefixes
//! - [`fairchild`] - `H'..'` and `$` hex
//! - [`rca`] - `#` hex, `A.0` / `A.1` byte functions
//! - [`signetics`] - `<` / `>` byte selection prefixes
//! - [`texas`] - `>` hex, strict left-to-right arithmetic
//! - [`ibm`] - `X'..'` / `F'..'` self-defining terms

pub mod c_style;
pub mod fairchild;
pub mod ibm;
pub mod intel;
pub mod motorola;
pub mod national;
pub mod rca;
pub mod signetics;
pub mod texas;
pub mod zilog;

use crate::core::dialect::{
    CommentParser, Dialect, LocationParser, Number, OperatorParser, Radix, SymbolParser,
};
use crate::core::error::ErrorKind;
use crate::core::operator::{Operator, OperatorTable};
use crate::core::text_utils::{digit_value, is_ident_char, Cursor};

pub use c_style::C_STYLE;
pub use fairchild::FAIRCHILD;
pub use ibm::IBM;
pub use intel::INTEL;
pub use motorola::MOTOROLA;
pub use national::NATIONAL;
pub use rca::RCA;
pub use signetics::SIGNETICS;
pub use texas::TEXAS;
pub use zilog::ZILOG;

/// Every built-in dialect, in registration order.
pub static ALL_DIALECTS: [&Dialect; 10] = [
    &C_STYLE, &MOTOROLA, &INTEL, &ZILOG, &NATIONAL, &FAIRCHILD, &RCA, &SIGNETICS, &TEXAS, &IBM,
];

/// A character constant holds ASCII only.
pub(crate) fn ascii_letter(c: u8) -> Result<u8, ErrorKind> {
    if c.is_ascii() {
        Ok(c)
    } else {
        Err(ErrorKind::IllegalConstant)
    }
}

/// Accumulate digits of `radix` at `scan`; `Ok(None)` when there is none.
pub(crate) fn scan_digits(scan: &mut Cursor<'_>, radix: Radix) -> Result<Option<u32>, ErrorKind> {
    let base = radix.base();
    let mut probe = *scan;
    let mut value: u64 = 0;
    let mut any = false;
    while let Some(digit) = probe.peek().and_then(|c| digit_value(c, base)) {
        probe.next();
        value = value * u64::from(base) + u64::from(digit);
        if value > u64::from(u32::MAX) {
            return Err(ErrorKind::OverflowRange);
        }
        any = true;
    }
    if !any {
        return Ok(None);
    }
    *scan = probe;
    Ok(Some(value as u32))
}

/// Convert a complete digit string; any non-digit is an illegal constant.
pub(crate) fn digits_value(text: &str, radix: Radix) -> Result<u32, ErrorKind> {
    let mut scan = Cursor::new(text);
    match scan_digits(&mut scan, radix)? {
        Some(value) if scan.at_end() => Ok(value),
        _ => Err(ErrorKind::IllegalConstant),
    }
}

/// A literal must not run into an identifier character.
pub(crate) fn end_of_number(scan: &Cursor<'_>) -> Result<(), ErrorKind> {
    if scan.peek().is_some_and(is_ident_char) {
        Err(ErrorKind::IllegalConstant)
    } else {
        Ok(())
    }
}

/// Plain decimal digits, as every dialect accepts them.
pub(crate) fn scan_decimal(scan: &mut Cursor<'_>) -> Result<Option<Number>, ErrorKind> {
    if !scan.peek().is_some_and(|c| c.is_ascii_digit()) {
        return Ok(None);
    }
    let mut probe = *scan;
    let value = scan_digits(&mut probe, Radix::Decimal)?.unwrap_or(0);
    end_of_number(&probe)?;
    *scan = probe;
    Ok(Some(Number::new(value, Radix::Decimal)))
}

/// `prefix` followed by digits of `radix`, e.g. `$1F` or `#FF`.
pub(crate) fn scan_prefixed(
    scan: &mut Cursor<'_>,
    prefix: u8,
    radix: Radix,
) -> Result<Option<Number>, ErrorKind> {
    if scan.peek() != Some(prefix)
        || !scan.peek_at(1).is_some_and(|c| digit_value(c, radix.base()).is_some())
    {
        return Ok(None);
    }
    let mut probe = *scan;
    probe.next();
    let value = scan_digits(&mut probe, radix)?.unwrap_or(0);
    end_of_number(&probe)?;
    *scan = probe;
    Ok(Some(Number::new(value, radix)))
}

/// How a quoted literal ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Closing {
    Required,
    Optional,
}

/// `X'1F'` style literals: a radix letter, a quote, digits, a quote.
pub(crate) fn scan_quoted_radix(
    scan: &mut Cursor<'_>,
    prefixes: &[(u8, Radix)],
    closing: Closing,
) -> Result<Option<Number>, ErrorKind> {
    let Some(first) = scan.peek() else {
        return Ok(None);
    };
    if scan.peek_at(1) != Some(b'\'') {
        return Ok(None);
    }
    let Some(&(_, radix)) = prefixes
        .iter()
        .find(|(letter, _)| letter.eq_ignore_ascii_case(&first))
    else {
        return Ok(None);
    };
    let mut probe = *scan;
    probe.next();
    probe.next();
    let value = scan_digits(&mut probe, radix)?.ok_or(ErrorKind::IllegalConstant)?;
    if probe.peek().is_some_and(|c| c.is_ascii_alphanumeric()) {
        return Err(ErrorKind::IllegalConstant);
    }
    if !probe.expect(b'\'') {
        if closing == Closing::Required {
            return Err(ErrorKind::MissingClosingQuote);
        }
        end_of_number(&probe)?;
    }
    *scan = probe;
    Ok(Some(Number::new(value, radix)))
}

/// Characters of a `'..'` constant packed big-endian, at most `max` of them.
///
/// `''` inside the quotes stands for one quote when `doubled` is set.
pub(crate) fn scan_quoted_chars(
    scan: &mut Cursor<'_>,
    max: usize,
    doubled: bool,
) -> Result<Option<u32>, ErrorKind> {
    if scan.peek() != Some(b'\'') {
        return Ok(None);
    }
    let mut probe = *scan;
    probe.next();
    let mut value: u32 = 0;
    let mut count = 0;
    loop {
        let c = match probe.next() {
            None => return Err(ErrorKind::MissingClosingQuote),
            Some(b'\'') if doubled && probe.peek() == Some(b'\'') => {
                probe.next();
                b'\''
            }
            Some(b'\'') => break,
            Some(c) => ascii_letter(c)?,
        };
        count += 1;
        if count > max {
            return Err(ErrorKind::IllegalConstant);
        }
        value = (value << 8) | u32::from(c);
    }
    if count == 0 {
        return Err(ErrorKind::IllegalConstant);
    }
    *scan = probe;
    Ok(Some(value))
}

/// `C'x'` style constants: a marker letter followed by a quoted character.
pub(crate) fn scan_marked_char(
    scan: &mut Cursor<'_>,
    marker: u8,
) -> Result<Option<u32>, ErrorKind> {
    if !scan.peek().is_some_and(|c| c.eq_ignore_ascii_case(&marker)) || scan.peek_at(1) != Some(b'\'')
    {
        return Ok(None);
    }
    let mut probe = *scan;
    probe.next();
    let value = scan_quoted_chars(&mut probe, 1, true)?;
    *scan = probe;
    Ok(value)
}

/// `;` starts a comment anywhere.
pub struct SemicolonComment;

impl CommentParser for SemicolonComment {
    fn comment_line(&self, scan: &Cursor<'_>) -> bool {
        let mut probe = *scan;
        probe.skip_ws();
        probe.peek() == Some(b';')
    }

    fn end_of_line(&self, scan: &Cursor<'_>) -> bool {
        matches!(scan.peek(), None | Some(b';'))
    }
}

/// `*` in the first column marks a comment line; `;` optionally starts a
/// trailing comment.
pub struct StarComment {
    pub semicolon: bool,
}

impl CommentParser for StarComment {
    fn comment_line(&self, scan: &Cursor<'_>) -> bool {
        if scan.pos() == 0 && scan.peek() == Some(b'*') {
            return true;
        }
        self.semicolon && SemicolonComment.comment_line(scan)
    }

    fn end_of_line(&self, scan: &Cursor<'_>) -> bool {
        match scan.peek() {
            None => true,
            Some(b';') => self.semicolon,
            Some(_) => false,
        }
    }
}

/// Location counter spelled by any single character of `chars`.
pub struct LocationChars {
    pub chars: &'static [u8],
}

impl LocationParser for LocationChars {
    fn parse_location(&self, scan: &mut Cursor<'_>) -> bool {
        let Some(c) = scan.peek() else {
            return false;
        };
        if !self.chars.contains(&c) {
            return false;
        }
        let next = scan.peek_at(1);
        if next.is_some_and(|n| is_ident_char(n) || n == b'.' || n == c) {
            return false;
        }
        scan.next();
        true
    }
}

/// Identifier alphabet: ASCII letters plus `head` first, letters, digits
/// and `tail` after that.
pub struct SymbolChars {
    pub head: &'static [u8],
    pub tail: &'static [u8],
}

impl SymbolParser for SymbolChars {
    fn symbol_letter(&self, c: u8, head: bool) -> bool {
        if head {
            c.is_ascii_alphabetic() || self.head.contains(&c)
        } else {
            c.is_ascii_alphanumeric() || self.tail.contains(&c)
        }
    }
}

impl OperatorParser for OperatorTable {
    fn read_prefix(&self, scan: &mut Cursor<'_>) -> Option<&'static Operator> {
        OperatorTable::read_prefix(self, scan)
    }

    fn read_infix(&self, scan: &mut Cursor<'_>) -> Option<&'static Operator> {
        OperatorTable::read_infix(self, scan)
    }
}

/// Vendor operators tried first, then a fallback table.
pub struct LayeredOperators {
    pub own: &'static OperatorTable,
    pub fallback: &'static OperatorTable,
}

impl OperatorParser for LayeredOperators {
    fn read_prefix(&self, scan: &mut Cursor<'_>) -> Option<&'static Operator> {
        self.own
            .read_prefix(scan)
            .or_else(|| self.fallback.read_prefix(scan))
    }

    fn read_infix(&self, scan: &mut Cursor<'_>) -> Option<&'static Operator> {
        self.own
            .read_infix(scan)
            .or_else(|| self.fallback.read_infix(scan))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_accumulate_and_overflow() {
        let mut scan = Cursor::new("FFFFFFFF+");
        assert_eq!(scan_digits(&mut scan, Radix::Hex), Ok(Some(0xffff_ffff)));
        assert_eq!(scan.rest(), "+");
        let mut scan = Cursor::new("100000000");
        assert_eq!(
            scan_digits(&mut scan, Radix::Hex),
            Err(ErrorKind::OverflowRange)
        );
        assert_eq!(scan.pos(), 0);
        let mut scan = Cursor::new("xyz");
        assert_eq!(scan_digits(&mut scan, Radix::Decimal), Ok(None));
    }

    #[test]
    fn decimal_rejects_trailing_letters() {
        let mut scan = Cursor::new("12ab");
        assert_eq!(scan_decimal(&mut scan), Err(ErrorKind::IllegalConstant));
        assert_eq!(scan.pos(), 0);
        let mut scan = Cursor::new("12)");
        assert_eq!(
            scan_decimal(&mut scan),
            Ok(Some(Number::new(12, Radix::Decimal)))
        );
    }

    #[test]
    fn quoted_radix_closing_rules() {
        const PREFIXES: &[(u8, Radix)] = &[(b'X', Radix::Hex), (b'B', Radix::Binary)];
        let mut scan = Cursor::new("x'1F'");
        assert_eq!(
            scan_quoted_radix(&mut scan, PREFIXES, Closing::Required),
            Ok(Some(Number::new(0x1f, Radix::Hex)))
        );
        assert!(scan.at_end());
        let mut scan = Cursor::new("B'101+1");
        assert_eq!(
            scan_quoted_radix(&mut scan, PREFIXES, Closing::Required),
            Err(ErrorKind::MissingClosingQuote)
        );
        assert_eq!(
            scan_quoted_radix(&mut scan, PREFIXES, Closing::Optional),
            Ok(Some(Number::new(5, Radix::Binary)))
        );
        assert_eq!(scan.rest(), "+1");
        let mut scan = Cursor::new("Q'1'");
        assert_eq!(
            scan_quoted_radix(&mut scan, PREFIXES, Closing::Required),
            Ok(None)
        );
    }

    #[test]
    fn quoted_chars() {
        let mut scan = Cursor::new("'AB'");
        assert_eq!(scan_quoted_chars(&mut scan, 2, true), Ok(Some(0x4142)));
        let mut scan = Cursor::new("''''");
        assert_eq!(scan_quoted_chars(&mut scan, 1, true), Ok(Some(0x27)));
        let mut scan = Cursor::new("''");
        assert_eq!(
            scan_quoted_chars(&mut scan, 1, true),
            Err(ErrorKind::IllegalConstant)
        );
        let mut scan = Cursor::new("'A");
        assert_eq!(
            scan_quoted_chars(&mut scan, 1, true),
            Err(ErrorKind::MissingClosingQuote)
        );
        let mut scan = Cursor::new("C'z'");
        assert_eq!(scan_marked_char(&mut scan, b'C'), Ok(Some(0x7a)));
    }

    #[test]
    fn location_needs_a_boundary() {
        let dollar = LocationChars { chars: b"$" };
        let mut scan = Cursor::new("$+2");
        assert!(dollar.parse_location(&mut scan));
        assert_eq!(scan.rest(), "+2");
        let mut scan = Cursor::new("$1F");
        assert!(!dollar.parse_location(&mut scan));
        assert_eq!(scan.pos(), 0);
    }

    #[test]
    fn comment_conventions() {
        let star = StarComment { semicolon: true };
        assert!(star.comment_line(&Cursor::new("* note")));
        assert!(!star.comment_line(&Cursor::with_pos("a * b", 2)));
        assert!(star.end_of_line(&Cursor::new("; note")));
        let ibm = StarComment { semicolon: false };
        assert!(!ibm.end_of_line(&Cursor::new("; note")));
        assert!(SemicolonComment.end_of_line(&Cursor::new("")));
    }

    #[test]
    fn every_dialect_has_a_distinct_name() {
        let mut names: Vec<_> = ALL_DIALECTS.iter().map(|d| d.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ALL_DIALECTS.len());
    }
}
