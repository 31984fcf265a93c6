// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Expression evaluation by precedence climbing.
//!
//! The evaluator keeps a bounded stack of pending operators, each paired
//! with its left operand. An incoming infix operator first reduces every
//! pending operator that binds at least as tightly, then is pushed itself;
//! a sentinel at the bottom of the stack stops the reduction. All lexical
//! decisions are delegated to the [`Dialect`] chosen at construction.
//!
//! Undefined symbols do not abort evaluation: they evaluate to
//! [`Value::Undefined`], the rest of the expression is still checked, and
//! [`ErrorKind::UndefinedSymbol`] is recorded against the whole expression
//! so a later pass can retry it.

use std::cell::Cell;

use tracing::trace;

use crate::core::dialect::Dialect;
use crate::core::error::{ErrorKind, ExprError};
use crate::core::function::{Arity, FunctionContext, Functor};
use crate::core::operator::{Operator, SENTINEL, SENTINEL_PREC};
use crate::core::stack::{Stack, ValueStack, STACK_CAPACITY};
use crate::core::symbol_table::SymbolTable;
use crate::core::text_utils::Cursor;
use crate::core::value::Value;

/// Deepest allowed chain of nested evaluations (parentheses, prefix
/// operands, function arguments and function bodies).
pub const MAX_NESTING: usize = 32;

/// Per-evaluation bookkeeping of conditions that do not stop parsing.
#[derive(Debug, Default)]
struct EvalState {
    undefined: bool,
    soft: Option<ExprError>,
}

impl EvalState {
    fn record(&mut self, err: ExprError) {
        if self.soft.is_none() {
            self.soft = Some(err);
        }
    }
}

#[derive(Clone, Copy)]
struct Scope<'s> {
    symtab: &'s dyn SymbolTable,
    location: u32,
}

/// An operator waiting for its right operand.
struct Pending {
    op: &'static Operator,
    lhs: Value,
    lhs_at: usize,
    op_at: usize,
}

/// Dialect-driven expression evaluator.
#[derive(Debug)]
pub struct ExprEvaluator {
    dialect: &'static Dialect,
    depth: Cell<usize>,
    error: Cell<Option<ExprError>>,
}

impl ExprEvaluator {
    pub fn new(dialect: &'static Dialect) -> Self {
        Self {
            dialect,
            depth: Cell::new(0),
            error: Cell::new(None),
        }
    }

    pub fn dialect(&self) -> &'static Dialect {
        self.dialect
    }

    /// Error from the most recent [`eval`](Self::eval), including a deferred
    /// undefined-symbol report that accompanied a successful result.
    pub fn error(&self) -> Option<ExprError> {
        self.error.get()
    }

    pub fn clear_error(&self) {
        self.error.set(None);
    }

    /// Evaluate one expression starting at `scan`.
    ///
    /// On success the cursor is left just past the expression. On error it
    /// is left at the offending text. Text after the expression (a comma,
    /// a closing parenthesis, a comment) is not consumed.
    pub fn eval(
        &self,
        scan: &mut Cursor<'_>,
        symtab: &dyn SymbolTable,
        location: u32,
    ) -> Result<Value, ExprError> {
        self.error.set(None);
        scan.skip_ws();
        let start = scan.pos();
        let scope = Scope { symtab, location };
        let mut state = EvalState::default();
        let mut probe = *scan;
        match self.parse_expr(&mut probe, &mut state, scope, SENTINEL_PREC) {
            Err(err) => {
                self.error.set(Some(err));
                *scan = Cursor::with_pos(scan.line(), err.at);
                Err(err)
            }
            Ok(value) => {
                *scan = probe;
                if let Some(err) = state.soft {
                    self.error.set(Some(err));
                    return Err(err);
                }
                if state.undefined {
                    self.error
                        .set(Some(ExprError::new(ErrorKind::UndefinedSymbol, start)));
                }
                Ok(value)
            }
        }
    }

    /// Evaluate a whole line: anything but a comment after the expression is
    /// an error.
    pub fn eval_line(
        &self,
        line: &str,
        symtab: &dyn SymbolTable,
        location: u32,
    ) -> Result<Value, ExprError> {
        let mut scan = Cursor::new(line);
        let value = self.eval(&mut scan, symtab, location)?;
        scan.skip_ws();
        if !self.dialect.comment.end_of_line(&scan) {
            let err = ExprError::new(ErrorKind::UnknownExprOperator, scan.pos());
            self.error.set(Some(err));
            return Err(err);
        }
        Ok(value)
    }

    /// Evaluate the text of a function body against `symtab`.
    ///
    /// The body must be consumed completely. A body that touched an
    /// undefined name yields [`Value::Undefined`].
    pub fn eval_body(
        &self,
        body: &str,
        symtab: &dyn SymbolTable,
        location: u32,
    ) -> Result<Value, ErrorKind> {
        let mut scan = Cursor::new(body);
        let mut state = EvalState::default();
        let scope = Scope { symtab, location };
        let value = self
            .parse_expr(&mut scan, &mut state, scope, SENTINEL_PREC)
            .map_err(|err| err.kind)?;
        scan.skip_ws();
        if !self.dialect.comment.end_of_line(&scan) {
            return Err(ErrorKind::UnknownExprOperator);
        }
        if let Some(err) = state.soft {
            return Err(err.kind);
        }
        Ok(if state.undefined {
            Value::Undefined
        } else {
            value
        })
    }

    fn parse_expr(
        &self,
        scan: &mut Cursor<'_>,
        state: &mut EvalState,
        scope: Scope<'_>,
        limit: u8,
    ) -> Result<Value, ExprError> {
        let depth = self.depth.get();
        if depth >= MAX_NESTING {
            return Err(ExprError::new(ErrorKind::TooComplexExpression, scan.pos()));
        }
        self.depth.set(depth + 1);
        let result = self.climb(scan, state, scope, limit);
        self.depth.set(depth);
        result
    }

    /// Parse operands and infix operators binding tighter than `limit`.
    fn climb(
        &self,
        scan: &mut Cursor<'_>,
        state: &mut EvalState,
        scope: Scope<'_>,
        limit: u8,
    ) -> Result<Value, ExprError> {
        let mut pending: Stack<Pending, STACK_CAPACITY> = Stack::new();
        scan.skip_ws();
        let mut value_at = scan.pos();
        pending
            .push(Pending {
                op: &SENTINEL,
                lhs: Value::Undefined,
                lhs_at: value_at,
                op_at: value_at,
            })
            .map_err(|kind| ExprError::new(kind, value_at))?;
        let mut value = self.parse_atom(scan, state, scope)?;

        loop {
            let mut probe = *scan;
            probe.skip_ws();
            let op_at = probe.pos();
            let op = self.read_infix(&mut probe, limit);

            loop {
                let Some(top) = pending.top() else {
                    return Ok(value);
                };
                if op.binds_tighter(top.op) {
                    break;
                }
                if top.op.is_sentinel() {
                    return Ok(value);
                }
                if op.conflicts_with(top.op) {
                    return Err(ExprError::new(
                        ErrorKind::OperatorNotAssociative,
                        top.lhs_at,
                    ));
                }
                let Some(entry) = pending.pop() else {
                    return Ok(value);
                };
                value_at = entry.lhs_at;
                value = self.reduce(entry, value, state)?;
            }

            *scan = probe;
            pending
                .push(Pending {
                    op,
                    lhs: value,
                    lhs_at: value_at,
                    op_at,
                })
                .map_err(|kind| ExprError::new(kind, op_at))?;
            scan.skip_ws();
            value_at = scan.pos();
            value = self.parse_atom(scan, state, scope)?;
        }
    }

    /// Next infix operator if it binds tighter than `limit`, else the sentinel.
    fn read_infix(&self, probe: &mut Cursor<'_>, limit: u8) -> &'static Operator {
        if self.dialect.comment.end_of_line(probe) {
            return &SENTINEL;
        }
        let mut candidate = *probe;
        match self.dialect.operator.read_infix(&mut candidate) {
            Some(op) if op.prec < limit => {
                *probe = candidate;
                op
            }
            _ => &SENTINEL,
        }
    }

    fn reduce(
        &self,
        entry: Pending,
        rhs: Value,
        state: &mut EvalState,
    ) -> Result<Value, ExprError> {
        let at = entry.op_at;
        let mut stack = ValueStack::new();
        stack
            .push(entry.lhs)
            .map_err(|kind| ExprError::new(kind, at))?;
        stack.push(rhs).map_err(|kind| ExprError::new(kind, at))?;
        match entry.op.eval(&mut stack) {
            Ok(()) => {}
            Err(ErrorKind::DivideByZero) => {
                state.record(ExprError::new(ErrorKind::DivideByZero, at));
            }
            Err(kind) => return Err(ExprError::new(kind, at)),
        }
        Ok(stack.pop_value())
    }

    /// Parse one operand: a parenthesized expression, a character constant,
    /// a prefix operator applied to an operand, the location counter, a
    /// number, a function call or a symbol.
    fn parse_atom(
        &self,
        scan: &mut Cursor<'_>,
        state: &mut EvalState,
        scope: Scope<'_>,
    ) -> Result<Value, ExprError> {
        scan.skip_ws();
        let at = scan.pos();
        let fail = |kind: ErrorKind| ExprError::new(kind, at);

        if self.dialect.comment.end_of_line(scan) || matches!(scan.peek(), Some(b')' | b',')) {
            return Err(fail(ErrorKind::MissingOperand));
        }

        if scan.expect(b'(') {
            let value = self.parse_expr(scan, state, scope, SENTINEL_PREC)?;
            scan.skip_ws();
            if !scan.expect(b')') {
                return Err(fail(ErrorKind::MissingClosingParen));
            }
            return Ok(value);
        }

        if let Some(letter) = self.dialect.letter.parse_letter(scan).map_err(fail)? {
            return Ok(Value::from_magnitude(letter));
        }

        if let Some(op) = self.dialect.operator.read_prefix(scan) {
            let operand = self.parse_expr(scan, state, scope, op.prec)?;
            let mut stack = ValueStack::new();
            stack.push(operand).map_err(fail)?;
            op.eval(&mut stack).map_err(fail)?;
            return Ok(stack.pop_value());
        }

        if self.dialect.location.parse_location(scan) {
            return Ok(Value::Unsigned(scope.location));
        }

        if let Some(number) = self.dialect.number.parse_number(scan).map_err(fail)? {
            return Ok(number.to_value());
        }

        if let Some(name) = self.dialect.symbol.parse_symbol(scan) {
            if scan.peek() == Some(b'(') {
                if let Some(functor) = self.find_function(name, scope) {
                    return self.call_function(functor, at, scan, state, scope);
                }
            }
            return Ok(match scope.symtab.lookup_symbol(name) {
                Some(value) if !value.is_undefined() => value,
                _ => {
                    trace!(symbol = name, "undefined symbol");
                    state.undefined = true;
                    Value::Undefined
                }
            });
        }

        Err(fail(ErrorKind::UnknownExprOperator))
    }

    fn find_function<'s>(&self, name: &str, scope: Scope<'s>) -> Option<&'s dyn Functor> {
        match self.dialect.functions.lookup_function(name) {
            Some(functor) => Some(functor),
            None => scope.symtab.lookup_function(name),
        }
    }

    /// Collect the arguments at `scan` (positioned on `(`) and call `functor`.
    fn call_function(
        &self,
        functor: &dyn Functor,
        at: usize,
        scan: &mut Cursor<'_>,
        state: &mut EvalState,
        scope: Scope<'_>,
    ) -> Result<Value, ExprError> {
        scan.expect(b'(');
        let mut args = ValueStack::new();
        let mut probe = *scan;
        if probe.skip_ws().expect(b')') {
            *scan = probe;
        } else {
            loop {
                scan.skip_ws();
                if self.dialect.comment.end_of_line(scan)
                    || matches!(scan.peek(), Some(b')' | b','))
                {
                    return Err(ExprError::new(ErrorKind::MissingFuncArgument, scan.pos()));
                }
                let value = self.parse_expr(scan, state, scope, SENTINEL_PREC)?;
                args.push(value).map_err(|kind| ExprError::new(kind, at))?;
                scan.skip_ws();
                if scan.expect(b',') {
                    continue;
                }
                if scan.expect(b')') {
                    break;
                }
                return Err(ExprError::new(ErrorKind::MissingClosingParen, at));
            }
        }

        let argc = args.len();
        match functor.arity() {
            Arity::Fixed(n) if argc < n => {
                return Err(ExprError::new(ErrorKind::TooFewFuncArgument, at))
            }
            Arity::Fixed(n) if argc > n => {
                return Err(ExprError::new(ErrorKind::TooManyFuncArgument, at))
            }
            _ => {}
        }

        let ctx = FunctionContext {
            evaluator: self,
            symtab: scope.symtab,
            location: scope.location,
        };
        match functor.eval(&ctx, &mut args, argc) {
            Ok(()) => {}
            Err(ErrorKind::DivideByZero) => {
                state.record(ExprError::new(ErrorKind::DivideByZero, at));
                return Ok(Value::Undefined);
            }
            Err(kind) => return Err(ExprError::new(kind, at)),
        }
        let result = args.pop_value();
        if result.is_undefined() {
            state.undefined = true;
        }
        Ok(result)
    }
}
