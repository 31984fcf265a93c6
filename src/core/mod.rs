// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Dialect-independent expression engine.
//!
//! # Components
//!
//! - [`value`] - tri-state values, arithmetic and overflow checks
//! - [`stack`] - fixed-capacity operand and operator stacks
//! - [`operator`] - operators, precedence and associativity
//! - [`dialect`] - lexical capabilities a vendor syntax plugs in
//! - [`function`] - built-in and user-defined functions
//! - [`symbol_table`] - name resolution and the concrete symbol store
//! - [`expr`] - the precedence-climbing evaluator
//! - [`registry`] - dialect lookup by name or CPU

pub mod dialect;
pub mod error;
pub mod expr;
pub mod function;
pub mod operator;
pub mod registry;
pub mod stack;
pub mod symbol_table;
pub mod text_utils;
pub mod value;

// Re-exports for convenience
pub use dialect::{Dialect, Number, Radix};
pub use error::{ErrorKind, ExprError};
pub use expr::{ExprEvaluator, MAX_NESTING};
pub use function::{Arity, Binding, FunctionContext, FunctionStore, Functor, UserFunction};
pub use operator::{Associativity, Operator};
pub use registry::{DialectRegistry, RegistryError};
pub use stack::{ValueStack, STACK_CAPACITY};
pub use symbol_table::{NoSymbols, SymbolTable, SymbolTableResult, Symbols};
pub use text_utils::Cursor;
pub use value::{Value, Width};
