// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Error kinds reported by the expression engine.

use std::fmt;

use thiserror::Error;

/// Categories of expression errors.
///
/// Every recognizer and every reduction step reports one of these. The
/// caller decides whether the condition is fatal for the current line or
/// can be retried on a later pass (normally only [`ErrorKind::UndefinedSymbol`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ErrorKind {
    #[error("Illegal constant")]
    IllegalConstant,
    #[error("Overflow range")]
    OverflowRange,
    #[error("Missing closing parenthesis")]
    MissingClosingParen,
    #[error("Missing closing quote")]
    MissingClosingQuote,
    #[error("Unknown escape sequence")]
    UnknownEscapeSequence,
    #[error("Unknown expression operator")]
    UnknownExprOperator,
    #[error("Operator is not associative")]
    OperatorNotAssociative,
    #[error("Divide by zero")]
    DivideByZero,
    #[error("Undefined symbol")]
    UndefinedSymbol,
    #[error("Too complex expression")]
    TooComplexExpression,
    #[error("Missing function argument")]
    MissingFuncArgument,
    #[error("Too many function arguments")]
    TooManyFuncArgument,
    #[error("Too few function arguments")]
    TooFewFuncArgument,
    #[error("Duplicate function")]
    DuplicateFunction,
    #[error("Missing operand")]
    MissingOperand,
}

impl ErrorKind {
    /// True for conditions a multi-pass driver may retry once more symbols are known.
    pub fn is_deferrable(self) -> bool {
        matches!(self, ErrorKind::UndefinedSymbol)
    }
}

/// An error kind anchored at a byte column of the source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExprError {
    pub kind: ErrorKind,
    pub at: usize,
}

impl ExprError {
    pub fn new(kind: ErrorKind, at: usize) -> Self {
        Self { kind, at }
    }

    /// The offending text: the remainder of `line` starting at the error column.
    pub fn remainder<'a>(&self, line: &'a str) -> &'a str {
        line.get(self.at..).unwrap_or("")
    }

    /// Render the message with the offending text appended.
    pub fn describe(&self, line: &str) -> String {
        let rest = self.remainder(line).trim_end();
        format_error(&self.kind.to_string(), (!rest.is_empty()).then_some(rest))
    }
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at column {}", self.kind, self.at + 1)
    }
}

impl std::error::Error for ExprError {}

/// Format an error message with an optional parameter.
pub fn format_error(msg: &str, param: Option<&str>) -> String {
    match param {
        Some(p) => format!("{msg}: {p}"),
        None => msg.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_appends_offending_text() {
        let err = ExprError::new(ErrorKind::UndefinedSymbol, 4);
        assert_eq!(err.describe("LDA undef+1"), "Undefined symbol: undef+1");
        assert_eq!(err.remainder("LDA undef+1"), "undef+1");
    }

    #[test]
    fn describe_without_remainder() {
        let err = ExprError::new(ErrorKind::MissingOperand, 3);
        assert_eq!(err.describe("1 +"), "Missing operand");
        assert_eq!(err.to_string(), "Missing operand at column 4");
    }

    #[test]
    fn only_undefined_symbol_is_deferrable() {
        assert!(ErrorKind::UndefinedSymbol.is_deferrable());
        assert!(!ErrorKind::DivideByZero.is_deferrable());
        assert!(!ErrorKind::OverflowRange.is_deferrable());
    }
}
