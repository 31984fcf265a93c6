// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Fixed-capacity stacks used by the evaluator.
//!
//! Capacity never grows: pushing onto a full stack fails with
//! [`ErrorKind::TooComplexExpression`], which makes "expression too complex"
//! a deterministic condition rather than a resource limit of the host.

use crate::core::error::ErrorKind;
use crate::core::value::Value;

/// Depth of every evaluator stack.
pub const STACK_CAPACITY: usize = 8;

/// Array-backed LIFO of at most `N` entries.
#[derive(Debug, Clone)]
pub struct Stack<T, const N: usize> {
    items: [Option<T>; N],
    len: usize,
}

impl<T, const N: usize> Default for Stack<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> Stack<T, N> {
    pub fn new() -> Self {
        Self {
            items: std::array::from_fn(|_| None),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == N
    }

    pub fn push(&mut self, item: T) -> Result<(), ErrorKind> {
        if self.is_full() {
            return Err(ErrorKind::TooComplexExpression);
        }
        self.items[self.len] = Some(item);
        self.len += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        self.items[self.len].take()
    }

    pub fn top(&self) -> Option<&T> {
        self.peek(0)
    }

    /// Entry `depth` places below the top (0 is the top).
    pub fn peek(&self, depth: usize) -> Option<&T> {
        if depth >= self.len {
            return None;
        }
        self.items[self.len - 1 - depth].as_ref()
    }

    pub fn clear(&mut self) {
        while self.pop().is_some() {}
    }
}

/// Operand stack; also the channel that carries arguments into functions.
pub type ValueStack = Stack<Value, STACK_CAPACITY>;

impl Stack<Value, STACK_CAPACITY> {
    /// Pop a value, treating an exhausted stack as UNDEFINED.
    pub fn pop_value(&mut self) -> Value {
        self.pop().unwrap_or_default()
    }

    /// Discard `count` values from the top.
    pub fn discard(&mut self, count: usize) {
        for _ in 0..count.min(self.len) {
            self.pop();
        }
    }
}
