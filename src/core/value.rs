// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Tri-state numeric value produced by expression evaluation.
//!
//! A [`Value`] is either UNDEFINED (a forward reference that a later pass
//! may resolve), or a 32-bit magnitude tagged signed or unsigned. Arithmetic
//! is total: an UNDEFINED operand produces an UNDEFINED result instead of an
//! error, so a whole expression can still be checked for syntax while some
//! of its symbols are unknown.

use std::fmt;

/// Result of evaluating an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Value {
    #[default]
    Undefined,
    Signed(i32),
    Unsigned(u32),
}

/// Target width used by the overflow predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    Bits8,
    Bits16,
    Bits32,
}

impl Width {
    pub fn bits(self) -> u32 {
        match self {
            Width::Bits8 => 8,
            Width::Bits16 => 16,
            Width::Bits32 => 32,
        }
    }

    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            8 => Some(Width::Bits8),
            16 => Some(Width::Bits16),
            32 => Some(Width::Bits32),
            _ => None,
        }
    }
}

impl Value {
    /// Tag a literal or symbol magnitude: signed when it fits in `i32`.
    pub fn from_magnitude(magnitude: u32) -> Self {
        match i32::try_from(magnitude) {
            Ok(signed) => Value::Signed(signed),
            Err(_) => Value::Unsigned(magnitude),
        }
    }

    /// Build a value from raw bits, signed only when `signed` is set.
    pub fn from_bits(bits: u32, signed: bool) -> Self {
        if signed {
            Value::Signed(bits as i32)
        } else {
            Value::Unsigned(bits)
        }
    }

    pub fn from_bool(flag: bool) -> Self {
        Value::Signed(flag as i32)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_signed(&self) -> bool {
        matches!(self, Value::Signed(_))
    }

    pub fn is_unsigned(&self) -> bool {
        matches!(self, Value::Unsigned(_))
    }

    /// The stored 32-bit magnitude; 0 when undefined.
    pub fn magnitude(&self) -> u32 {
        match *self {
            Value::Undefined => 0,
            Value::Signed(v) => v as u32,
            Value::Unsigned(v) => v,
        }
    }

    /// Signed reading of the magnitude.
    pub fn as_signed(&self) -> i32 {
        self.magnitude() as i32
    }

    /// Unsigned reading of the magnitude.
    pub fn as_unsigned(&self) -> u32 {
        self.magnitude()
    }

    pub fn is_zero(&self) -> bool {
        !self.is_undefined() && self.magnitude() == 0
    }

    /// True if the stored magnitude is not representable as an unsigned or
    /// negative signed quantity of `width` bits, i.e. outside
    /// `[-2^(w-1), 2^w)`.
    pub fn overflow_uint(&self, width: Width) -> bool {
        let bits = width.bits();
        if bits >= 32 {
            return false;
        }
        let s = self.as_signed() as i64;
        let u = self.as_unsigned() as u64;
        s < -(1i64 << (bits - 1)) || (s >= 0 && u >= (1u64 << bits))
    }

    /// True if the stored magnitude is outside `[-2^(w-1), 2^(w-1))`.
    pub fn overflow_int(&self, width: Width) -> bool {
        let bits = width.bits();
        if bits >= 32 {
            return false;
        }
        let s = self.as_signed() as i64;
        let limit = 1i64 << (bits - 1);
        s < -limit || s >= limit
    }

    /// Overflow check for a relative (branch displacement) operand.
    pub fn overflow_rel(&self, width: Width) -> bool {
        self.overflow_int(width)
    }

    pub fn overflow_uint8(&self) -> bool {
        self.overflow_uint(Width::Bits8)
    }

    pub fn overflow_uint16(&self) -> bool {
        self.overflow_uint(Width::Bits16)
    }

    pub fn overflow_int8(&self) -> bool {
        self.overflow_int(Width::Bits8)
    }

    pub fn overflow_int16(&self) -> bool {
        self.overflow_int(Width::Bits16)
    }

    pub fn overflow_rel8(&self) -> bool {
        self.overflow_rel(Width::Bits8)
    }

    pub fn overflow_rel16(&self) -> bool {
        self.overflow_rel(Width::Bits16)
    }

    /// Propagate UNDEFINED through a binary operation.
    fn both(self, rhs: Value) -> Option<(Value, Value)> {
        if self.is_undefined() || rhs.is_undefined() {
            None
        } else {
            Some((self, rhs))
        }
    }

    fn signed_pair(self, rhs: Value) -> bool {
        self.is_signed() && rhs.is_signed()
    }

    pub fn add(self, rhs: Value) -> Value {
        self.arith(rhs, u32::wrapping_add)
    }

    pub fn sub(self, rhs: Value) -> Value {
        self.arith(rhs, u32::wrapping_sub)
    }

    pub fn mul(self, rhs: Value) -> Value {
        self.arith(rhs, u32::wrapping_mul)
    }

    fn arith(self, rhs: Value, op: fn(u32, u32) -> u32) -> Value {
        match self.both(rhs) {
            Some((l, r)) => {
                Value::from_bits(op(l.magnitude(), r.magnitude()), l.signed_pair(r))
            }
            None => Value::Undefined,
        }
    }

    /// Divide, or `None` when the divisor is a defined zero.
    pub fn div(self, rhs: Value) -> Option<Value> {
        self.divide(rhs, i32::wrapping_div, |l, r| l / r)
    }

    /// Remainder, or `None` when the divisor is a defined zero.
    pub fn rem(self, rhs: Value) -> Option<Value> {
        self.divide(rhs, i32::wrapping_rem, |l, r| l % r)
    }

    fn divide(
        self,
        rhs: Value,
        signed_op: fn(i32, i32) -> i32,
        unsigned_op: fn(u32, u32) -> u32,
    ) -> Option<Value> {
        if !rhs.is_undefined() && rhs.magnitude() == 0 {
            return None;
        }
        let Some((l, r)) = self.both(rhs) else {
            return Some(Value::Undefined);
        };
        Some(if l.signed_pair(r) {
            Value::Signed(signed_op(l.as_signed(), r.as_signed()))
        } else {
            Value::Unsigned(unsigned_op(l.as_unsigned(), r.as_unsigned()))
        })
    }

    pub fn bit_and(self, rhs: Value) -> Value {
        self.arith(rhs, |l, r| l & r)
    }

    pub fn bit_or(self, rhs: Value) -> Value {
        self.arith(rhs, |l, r| l | r)
    }

    pub fn bit_xor(self, rhs: Value) -> Value {
        self.arith(rhs, |l, r| l ^ r)
    }

    pub fn shift_left(self, rhs: Value) -> Value {
        match self.both(rhs) {
            Some((l, r)) => {
                let count = r.as_unsigned();
                let bits = if count >= 32 { 0 } else { l.as_unsigned() << count };
                Value::from_bits(bits, l.signed_pair(r))
            }
            None => Value::Undefined,
        }
    }

    /// Logical right shift; sign-extends when the left operand is signed and negative.
    pub fn shift_right(self, rhs: Value) -> Value {
        match self.both(rhs) {
            Some((l, r)) => {
                let count = r.as_unsigned();
                let bits = if l.is_signed() && l.as_signed() < 0 {
                    (l.as_signed() >> count.min(31)) as u32
                } else if count >= 32 {
                    0
                } else {
                    l.as_unsigned() >> count
                };
                Value::from_bits(bits, l.signed_pair(r))
            }
            None => Value::Undefined,
        }
    }

    /// Rotate the low 16 bits left.
    pub fn rotate_left16(self, rhs: Value) -> Value {
        match self.both(rhs) {
            Some((l, r)) => {
                let word = (l.as_unsigned() & 0xffff) as u16;
                let rotated = word.rotate_left(r.as_unsigned() % 16);
                Value::Unsigned(rotated as u32)
            }
            None => Value::Undefined,
        }
    }

    /// Rotate the low 16 bits right.
    pub fn rotate_right16(self, rhs: Value) -> Value {
        match self.both(rhs) {
            Some((l, r)) => {
                let word = (l.as_unsigned() & 0xffff) as u16;
                let rotated = word.rotate_right(r.as_unsigned() % 16);
                Value::Unsigned(rotated as u32)
            }
            None => Value::Undefined,
        }
    }

    fn compare(self, rhs: Value, pred: fn(std::cmp::Ordering) -> bool) -> Value {
        match self.both(rhs) {
            Some((l, r)) => {
                let ordering = if l.signed_pair(r) {
                    l.as_signed().cmp(&r.as_signed())
                } else {
                    l.as_unsigned().cmp(&r.as_unsigned())
                };
                Value::from_bool(pred(ordering))
            }
            None => Value::Undefined,
        }
    }

    pub fn less(self, rhs: Value) -> Value {
        self.compare(rhs, |o| o.is_lt())
    }

    pub fn less_eq(self, rhs: Value) -> Value {
        self.compare(rhs, |o| o.is_le())
    }

    pub fn greater(self, rhs: Value) -> Value {
        self.compare(rhs, |o| o.is_gt())
    }

    pub fn greater_eq(self, rhs: Value) -> Value {
        self.compare(rhs, |o| o.is_ge())
    }

    pub fn equal(self, rhs: Value) -> Value {
        self.compare(rhs, |o| o.is_eq())
    }

    pub fn not_equal(self, rhs: Value) -> Value {
        self.compare(rhs, |o| o.is_ne())
    }

    pub fn logical_and(self, rhs: Value) -> Value {
        match self.both(rhs) {
            Some((l, r)) => Value::from_bool(l.magnitude() != 0 && r.magnitude() != 0),
            None => Value::Undefined,
        }
    }

    pub fn logical_or(self, rhs: Value) -> Value {
        match self.both(rhs) {
            Some((l, r)) => Value::from_bool(l.magnitude() != 0 || r.magnitude() != 0),
            None => Value::Undefined,
        }
    }

    pub fn logical_xor(self, rhs: Value) -> Value {
        match self.both(rhs) {
            Some((l, r)) => Value::from_bool((l.magnitude() != 0) ^ (r.magnitude() != 0)),
            None => Value::Undefined,
        }
    }

    pub fn negate(self) -> Value {
        match self {
            Value::Undefined => Value::Undefined,
            v => Value::Signed(v.as_signed().wrapping_neg()),
        }
    }

    pub fn complement(self) -> Value {
        match self {
            Value::Undefined => Value::Undefined,
            Value::Signed(v) => Value::Signed(!v),
            Value::Unsigned(v) => Value::Unsigned(!v),
        }
    }

    pub fn logical_not(self) -> Value {
        match self {
            Value::Undefined => Value::Undefined,
            v => Value::from_bool(v.magnitude() == 0),
        }
    }

    pub fn high_byte(self) -> Value {
        self.extract(8, 0xff)
    }

    pub fn low_byte(self) -> Value {
        self.extract(0, 0xff)
    }

    pub fn high_word(self) -> Value {
        self.extract(16, 0xffff)
    }

    pub fn low_word(self) -> Value {
        self.extract(0, 0xffff)
    }

    fn extract(self, shift: u32, mask: u32) -> Value {
        match self {
            Value::Undefined => Value::Undefined,
            v => Value::Unsigned((v.as_unsigned() >> shift) & mask),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Signed(v) => write!(f, "{v}"),
            Value::Unsigned(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magnitude_tagging() {
        assert_eq!(Value::from_magnitude(42), Value::Signed(42));
        assert_eq!(Value::from_magnitude(0x8000_0000), Value::Unsigned(0x8000_0000));
        assert_eq!(Value::Undefined.magnitude(), 0);
    }

    #[test]
    fn undefined_propagates() {
        let u = Value::Undefined;
        let one = Value::Signed(1);
        assert!(u.add(one).is_undefined());
        assert!(one.sub(u).is_undefined());
        assert!(one.less(u).is_undefined());
        assert_eq!(one.div(u), Some(Value::Undefined));
        assert_eq!(u.div(Value::Signed(0)), None);
        assert_eq!(u.rem(Value::Unsigned(0)), None);
        assert_eq!(Value::Signed(0).div(u), Some(Value::Undefined));
        assert!(u.negate().is_undefined());
        assert!(u.high_byte().is_undefined());
    }

    #[test]
    fn sign_tag_requires_both_signed() {
        let s = Value::Signed(-1);
        let u = Value::Unsigned(1);
        assert!(s.add(s).is_signed());
        assert!(s.add(u).is_unsigned());
        assert!(u.add(s).is_unsigned());
    }

    #[test]
    fn division_truth_table() {
        assert_eq!(Value::Signed(-7).div(Value::Signed(2)), Some(Value::Signed(-3)));
        assert_eq!(
            Value::Unsigned(0xffff_fff9).div(Value::Signed(2)),
            Some(Value::Unsigned(0x7fff_fffc))
        );
        assert_eq!(Value::Signed(-7).rem(Value::Signed(2)), Some(Value::Signed(-1)));
        assert_eq!(Value::Signed(100).div(Value::Signed(0)), None);
        assert_eq!(Value::Signed(100).rem(Value::Unsigned(0)), None);
    }

    #[test]
    fn comparisons_follow_signedness() {
        assert_eq!(Value::Signed(-1).less(Value::Signed(0)), Value::Signed(1));
        assert_eq!(Value::Signed(-1).less(Value::Unsigned(0)), Value::Signed(0));
        assert_eq!(Value::Signed(2).equal(Value::Unsigned(2)), Value::Signed(1));
    }

    #[test]
    fn shifts() {
        assert_eq!(Value::Signed(1).shift_left(Value::Signed(4)), Value::Signed(16));
        assert_eq!(Value::Signed(1).shift_left(Value::Signed(40)), Value::Signed(0));
        assert_eq!(Value::Signed(-16).shift_right(Value::Signed(2)), Value::Signed(-4));
        assert_eq!(
            Value::Unsigned(0x8000_0000).shift_right(Value::Signed(31)),
            Value::Unsigned(1)
        );
        assert_eq!(Value::Signed(-1).shift_right(Value::Signed(40)), Value::Signed(-1));
    }

    #[test]
    fn rotates_16_bits() {
        assert_eq!(
            Value::Signed(0x8001).rotate_left16(Value::Signed(1)),
            Value::Unsigned(0x0003)
        );
        assert_eq!(
            Value::Signed(0x0003).rotate_right16(Value::Signed(1)),
            Value::Unsigned(0x8001)
        );
    }

    #[test]
    fn overflow_uint8_accepts_negative_bytes() {
        assert!(!Value::Signed(-128).overflow_uint8());
        assert!(Value::Signed(-129).overflow_uint8());
        assert!(!Value::Signed(255).overflow_uint8());
        assert!(Value::Signed(256).overflow_uint8());
        assert!(!Value::Unsigned(0xffff_ffff).overflow_uint16());
        assert!(!Value::Undefined.overflow_uint8());
    }

    #[test]
    fn overflow_rel_and_int() {
        assert!(!Value::Signed(127).overflow_rel8());
        assert!(Value::Signed(128).overflow_rel8());
        assert!(!Value::Signed(-128).overflow_int8());
        assert!(Value::Signed(-32769).overflow_int16());
        assert!(!Value::Unsigned(0xffff_ffff).overflow_uint(Width::Bits32));
    }

    #[test]
    fn overflow_ignores_tag() {
        let bits = 0xffff_ff7fu32;
        assert_eq!(
            Value::Signed(bits as i32).overflow_uint8(),
            Value::Unsigned(bits).overflow_uint8()
        );
    }

    #[test]
    fn byte_extraction() {
        assert_eq!(Value::Signed(0x1234).high_byte(), Value::Unsigned(0x12));
        assert_eq!(Value::Signed(0x1234).low_byte(), Value::Unsigned(0x34));
        assert_eq!(Value::Unsigned(0x1234_5678).high_word(), Value::Unsigned(0x1234));
        assert_eq!(Value::Unsigned(0x1234_5678).low_word(), Value::Unsigned(0x5678));
    }
}
