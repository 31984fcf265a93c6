// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Operators and operator tables.
//!
//! An [`Operator`] carries its precedence (lower binds tighter), its
//! associativity, its arity and the stack function that implements it.
//! Dialects own static operator instances because the relative precedence
//! of shift, bitwise and arithmetic operators differs between vendors.

use std::fmt;

use crate::core::error::ErrorKind;
use crate::core::stack::ValueStack;
use crate::core::text_utils::{is_ident_start, Cursor};
use crate::core::value::Value;

/// Operator associativity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
    /// Two adjacent operators of the same precedence are rejected.
    None,
}

/// Stack function implementing an operator: pops its operands, pushes one result.
pub type OperatorFn = fn(&mut ValueStack) -> Result<(), ErrorKind>;

/// One unary or binary operation.
pub struct Operator {
    pub name: &'static str,
    pub prec: u8,
    pub assoc: Associativity,
    pub arity: u8,
    pub apply: OperatorFn,
}

/// Precedence of the "no operator" sentinel; looser than every real operator.
pub const SENTINEL_PREC: u8 = u8::MAX;

/// Shared instance of [`Operator::SENTINEL`].
pub static SENTINEL: Operator = Operator::SENTINEL;

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operator")
            .field("name", &self.name)
            .field("prec", &self.prec)
            .field("assoc", &self.assoc)
            .field("arity", &self.arity)
            .finish()
    }
}

impl Operator {
    /// Marker seeding the evaluator stack and ending a reduction.
    pub const SENTINEL: Operator = Operator {
        name: "",
        prec: SENTINEL_PREC,
        assoc: Associativity::Left,
        arity: 0,
        apply: nop,
    };

    pub const fn prefix(name: &'static str, prec: u8, apply: OperatorFn) -> Self {
        Self {
            name,
            prec,
            assoc: Associativity::Right,
            arity: 1,
            apply,
        }
    }

    pub const fn binary(
        name: &'static str,
        prec: u8,
        assoc: Associativity,
        apply: OperatorFn,
    ) -> Self {
        Self {
            name,
            prec,
            assoc,
            arity: 2,
            apply,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.arity == 0
    }

    /// True if `self`, arriving after `top`, must be pushed rather than
    /// reducing `top` first.
    pub fn binds_tighter(&self, top: &Operator) -> bool {
        self.prec < top.prec
            || (self.prec == top.prec
                && self.assoc == Associativity::Right
                && top.assoc == Associativity::Right)
    }

    /// True if `self` and `top` may not be chained.
    pub fn conflicts_with(&self, top: &Operator) -> bool {
        self.prec == top.prec
            && !top.is_sentinel()
            && (self.assoc == Associativity::None || top.assoc == Associativity::None)
    }

    pub fn eval(&self, stack: &mut ValueStack) -> Result<(), ErrorKind> {
        (self.apply)(stack)
    }
}

fn nop(_stack: &mut ValueStack) -> Result<(), ErrorKind> {
    Ok(())
}

fn unary(stack: &mut ValueStack, f: fn(Value) -> Value) -> Result<(), ErrorKind> {
    let v = stack.pop_value();
    stack.push(f(v))
}

fn binary(stack: &mut ValueStack, f: fn(Value, Value) -> Value) -> Result<(), ErrorKind> {
    let rhs = stack.pop_value();
    let lhs = stack.pop_value();
    stack.push(f(lhs, rhs))
}

/// Division-like operators keep the stack balanced on a zero divisor.
fn divide(
    stack: &mut ValueStack,
    f: fn(Value, Value) -> Option<Value>,
) -> Result<(), ErrorKind> {
    let rhs = stack.pop_value();
    let lhs = stack.pop_value();
    match f(lhs, rhs) {
        Some(v) => stack.push(v),
        None => {
            stack.push(Value::Undefined)?;
            Err(ErrorKind::DivideByZero)
        }
    }
}

pub fn negate(stack: &mut ValueStack) -> Result<(), ErrorKind> {
    unary(stack, Value::negate)
}

pub fn identity(stack: &mut ValueStack) -> Result<(), ErrorKind> {
    unary(stack, |v| v)
}

pub fn complement(stack: &mut ValueStack) -> Result<(), ErrorKind> {
    unary(stack, Value::complement)
}

pub fn logical_not(stack: &mut ValueStack) -> Result<(), ErrorKind> {
    unary(stack, Value::logical_not)
}

pub fn high_byte(stack: &mut ValueStack) -> Result<(), ErrorKind> {
    unary(stack, Value::high_byte)
}

pub fn low_byte(stack: &mut ValueStack) -> Result<(), ErrorKind> {
    unary(stack, Value::low_byte)
}

pub fn multiply(stack: &mut ValueStack) -> Result<(), ErrorKind> {
    binary(stack, Value::mul)
}

pub fn division(stack: &mut ValueStack) -> Result<(), ErrorKind> {
    divide(stack, Value::div)
}

pub fn modulo(stack: &mut ValueStack) -> Result<(), ErrorKind> {
    divide(stack, Value::rem)
}

pub fn add(stack: &mut ValueStack) -> Result<(), ErrorKind> {
    binary(stack, Value::add)
}

pub fn subtract(stack: &mut ValueStack) -> Result<(), ErrorKind> {
    binary(stack, Value::sub)
}

pub fn shift_left(stack: &mut ValueStack) -> Result<(), ErrorKind> {
    binary(stack, Value::shift_left)
}

pub fn shift_right(stack: &mut ValueStack) -> Result<(), ErrorKind> {
    binary(stack, Value::shift_right)
}

pub fn rotate_left(stack: &mut ValueStack) -> Result<(), ErrorKind> {
    binary(stack, Value::rotate_left16)
}

pub fn rotate_right(stack: &mut ValueStack) -> Result<(), ErrorKind> {
    binary(stack, Value::rotate_right16)
}

pub fn less(stack: &mut ValueStack) -> Result<(), ErrorKind> {
    binary(stack, Value::less)
}

pub fn less_eq(stack: &mut ValueStack) -> Result<(), ErrorKind> {
    binary(stack, Value::less_eq)
}

pub fn greater(stack: &mut ValueStack) -> Result<(), ErrorKind> {
    binary(stack, Value::greater)
}

pub fn greater_eq(stack: &mut ValueStack) -> Result<(), ErrorKind> {
    binary(stack, Value::greater_eq)
}

pub fn equal(stack: &mut ValueStack) -> Result<(), ErrorKind> {
    binary(stack, Value::equal)
}

pub fn not_equal(stack: &mut ValueStack) -> Result<(), ErrorKind> {
    binary(stack, Value::not_equal)
}

pub fn bit_and(stack: &mut ValueStack) -> Result<(), ErrorKind> {
    binary(stack, Value::bit_and)
}

pub fn bit_xor(stack: &mut ValueStack) -> Result<(), ErrorKind> {
    binary(stack, Value::bit_xor)
}

pub fn bit_or(stack: &mut ValueStack) -> Result<(), ErrorKind> {
    binary(stack, Value::bit_or)
}

pub fn logical_and(stack: &mut ValueStack) -> Result<(), ErrorKind> {
    binary(stack, Value::logical_and)
}

pub fn logical_or(stack: &mut ValueStack) -> Result<(), ErrorKind> {
    binary(stack, Value::logical_or)
}

pub fn logical_xor(stack: &mut ValueStack) -> Result<(), ErrorKind> {
    binary(stack, Value::logical_xor)
}

/// Spelling-to-operator lists for one position (prefix or infix).
///
/// Entries are tried in order, so longer spellings sharing a prefix must
/// come first. Alphabetic spellings are keywords and must end at an
/// identifier boundary.
pub struct OperatorTable {
    pub prefix: &'static [(&'static str, &'static Operator)],
    pub infix: &'static [(&'static str, &'static Operator)],
}

impl OperatorTable {
    pub fn read_prefix(&self, scan: &mut Cursor<'_>) -> Option<&'static Operator> {
        match_spelling(self.prefix, scan)
    }

    pub fn read_infix(&self, scan: &mut Cursor<'_>) -> Option<&'static Operator> {
        match_spelling(self.infix, scan)
    }
}

fn match_spelling(
    entries: &'static [(&'static str, &'static Operator)],
    scan: &mut Cursor<'_>,
) -> Option<&'static Operator> {
    for (spelling, op) in entries {
        let keyword = spelling.as_bytes().first().copied().is_some_and(is_ident_start);
        let mut probe = *scan;
        let matched = if keyword {
            probe.iexpect_word(spelling)
        } else {
            probe.expect_str(spelling)
        };
        if matched {
            *scan = probe;
            return Some(op);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    static PLUS: Operator = Operator::binary("+", 6, Associativity::Left, add);
    static LT: Operator = Operator::binary("<", 9, Associativity::None, less);
    static LE: Operator = Operator::binary("<=", 9, Associativity::None, less_eq);
    static POW: Operator = Operator::binary("**", 4, Associativity::Right, multiply);
    static AND: Operator = Operator::binary("AND", 11, Associativity::Left, bit_and);

    static TABLE: OperatorTable = OperatorTable {
        prefix: &[],
        infix: &[("<=", &LE), ("<", &LT), ("+", &PLUS), ("AND", &AND)],
    };

    #[test]
    fn precedence_and_associativity() {
        assert!(PLUS.binds_tighter(&LT));
        assert!(!LT.binds_tighter(&PLUS));
        assert!(!PLUS.binds_tighter(&PLUS));
        assert!(POW.binds_tighter(&POW));
        assert!(LE.conflicts_with(&LT));
        assert!(!PLUS.conflicts_with(&PLUS));
        assert!(PLUS.binds_tighter(&Operator::SENTINEL));
    }

    #[test]
    fn table_prefers_listed_order() {
        let mut scan = Cursor::new("<= 3");
        assert_eq!(TABLE.read_infix(&mut scan).map(|op| op.name), Some("<="));
        assert_eq!(scan.rest(), " 3");
    }

    #[test]
    fn keyword_operators_need_boundary() {
        let mut scan = Cursor::new("ANDY");
        assert!(TABLE.read_infix(&mut scan).is_none());
        assert_eq!(scan.pos(), 0);
        let mut scan = Cursor::new("and 1");
        assert_eq!(TABLE.read_infix(&mut scan).map(|op| op.name), Some("AND"));
    }

    #[test]
    fn divide_by_zero_keeps_stack_balanced() {
        let mut stack = ValueStack::new();
        stack.push(Value::Signed(100)).unwrap();
        stack.push(Value::Signed(0)).unwrap();
        assert_eq!(division(&mut stack), Err(ErrorKind::DivideByZero));
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.pop(), Some(Value::Undefined));
    }

    #[test]
    fn binary_operator_pops_two_pushes_one() {
        let mut stack = ValueStack::new();
        stack.push(Value::Signed(7)).unwrap();
        stack.push(Value::Signed(3)).unwrap();
        PLUS.eval(&mut stack).unwrap();
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.pop(), Some(Value::Signed(10)));
    }
}
