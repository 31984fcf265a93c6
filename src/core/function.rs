// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Callable functions: dialect built-ins and user-defined expression macros.
//!
//! Arguments travel on a [`ValueStack`]: the call site pushes them left to
//! right, the functor pops `argc` values and pushes exactly one result.
//! User-defined functions keep their body as text and re-evaluate it on
//! every call, with a [`Binding`] layered over the caller's table so that
//! parameters shadow global symbols.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::core::error::ErrorKind;
use crate::core::expr::ExprEvaluator;
use crate::core::stack::ValueStack;
use crate::core::symbol_table::SymbolTable;
use crate::core::value::Value;

/// Number of arguments a function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Fixed(usize),
    Variadic,
}

/// What a function body may need from the call site.
pub struct FunctionContext<'a> {
    pub evaluator: &'a ExprEvaluator,
    pub symtab: &'a dyn SymbolTable,
    pub location: u32,
}

/// A callable entity.
pub trait Functor {
    fn arity(&self) -> Arity;

    /// Pop `argc` arguments from `stack` and push one result.
    fn eval(
        &self,
        ctx: &FunctionContext<'_>,
        stack: &mut ValueStack,
        argc: usize,
    ) -> Result<(), ErrorKind>;
}

/// Built-in functions a dialect provides.
pub trait FunctionTable: Send + Sync {
    fn lookup_function(&self, name: &str) -> Option<&'static dyn Functor>;
}

/// A single-argument built-in such as `HIGH(x)`.
pub struct BuiltinFunction {
    pub name: &'static str,
    pub apply: fn(Value) -> Value,
}

impl BuiltinFunction {
    pub const fn new(name: &'static str, apply: fn(Value) -> Value) -> Self {
        Self { name, apply }
    }
}

impl Functor for BuiltinFunction {
    fn arity(&self) -> Arity {
        Arity::Fixed(1)
    }

    fn eval(
        &self,
        _ctx: &FunctionContext<'_>,
        stack: &mut ValueStack,
        argc: usize,
    ) -> Result<(), ErrorKind> {
        let arg = stack.pop_value();
        stack.discard(argc.saturating_sub(1));
        stack.push((self.apply)(arg))
    }
}

pub static HIGH: BuiltinFunction = BuiltinFunction::new("HIGH", Value::high_byte);
pub static LOW: BuiltinFunction = BuiltinFunction::new("LOW", Value::low_byte);
pub static MSW: BuiltinFunction = BuiltinFunction::new("MSW", Value::high_word);
pub static LSW: BuiltinFunction = BuiltinFunction::new("LSW", Value::low_word);

/// Case-insensitive list of built-ins.
pub struct BuiltinTable {
    pub functions: &'static [&'static BuiltinFunction],
}

/// Table for dialects without built-in functions.
pub static NO_FUNCTIONS: BuiltinTable = BuiltinTable { functions: &[] };

impl FunctionTable for BuiltinTable {
    fn lookup_function(&self, name: &str) -> Option<&'static dyn Functor> {
        self.functions
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
            .map(|f| *f as &'static dyn Functor)
    }
}

/// A user-defined expression macro.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFunction {
    name: String,
    params: Vec<String>,
    body: String,
}

impl UserFunction {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Stack depth of parameter `name` counted from the last argument.
    fn param_depth(&self, name: &str) -> Option<usize> {
        let index = self
            .params
            .iter()
            .position(|p| p.eq_ignore_ascii_case(name))?;
        Some(self.params.len() - 1 - index)
    }
}

impl Functor for UserFunction {
    fn arity(&self) -> Arity {
        Arity::Fixed(self.params.len())
    }

    fn eval(
        &self,
        ctx: &FunctionContext<'_>,
        stack: &mut ValueStack,
        argc: usize,
    ) -> Result<(), ErrorKind> {
        trace!(function = %self.name, argc, "calling user function");
        // Parameters chain to the outermost table, so a body never sees the
        // parameters of the function that called it.
        let mut parent = ctx.symtab;
        while let Some(outer) = parent.enclosing() {
            parent = outer;
        }
        let result = {
            let binding = Binding::new(self, stack, parent);
            ctx.evaluator.eval_body(&self.body, &binding, ctx.location)
        };
        stack.discard(argc);
        stack.push(result?)
    }
}

/// Registry of user-defined functions, keyed case-insensitively.
#[derive(Debug, Default)]
pub struct FunctionStore {
    functions: HashMap<String, UserFunction>,
}

impl FunctionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name(params) = body`.
    ///
    /// A name already in use, or a parameter list naming the same parameter
    /// twice, is rejected with [`ErrorKind::DuplicateFunction`].
    pub fn define(&mut self, name: &str, params: &[&str], body: &str) -> Result<(), ErrorKind> {
        let key = name.to_ascii_uppercase();
        if self.functions.contains_key(&key) {
            return Err(ErrorKind::DuplicateFunction);
        }
        for (i, param) in params.iter().enumerate() {
            if params[..i].iter().any(|p| p.eq_ignore_ascii_case(param)) {
                return Err(ErrorKind::DuplicateFunction);
            }
        }
        debug!(function = name, params = params.len(), body, "defining function");
        self.functions.insert(
            key,
            UserFunction {
                name: name.to_string(),
                params: params.iter().map(|p| p.to_string()).collect(),
                body: body.trim().to_string(),
            },
        );
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&UserFunction> {
        self.functions.get(&name.to_ascii_uppercase())
    }

    /// Drop every definition; used between passes.
    pub fn reset(&mut self) {
        debug!(count = self.functions.len(), "resetting function store");
        self.functions.clear();
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Definitions sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &UserFunction> {
        let mut functions: Vec<_> = self.functions.values().collect();
        functions.sort_by(|a, b| a.name.cmp(&b.name));
        functions.into_iter()
    }
}

/// Parameter scope for one user-function call.
///
/// Resolves parameter names to the call's argument values and forwards
/// every other name to `parent`.
pub struct Binding<'a> {
    function: &'a UserFunction,
    args: &'a ValueStack,
    parent: &'a dyn SymbolTable,
}

impl<'a> Binding<'a> {
    pub fn new(function: &'a UserFunction, args: &'a ValueStack, parent: &'a dyn SymbolTable) -> Self {
        Self {
            function,
            args,
            parent,
        }
    }
}

impl SymbolTable for Binding<'_> {
    fn lookup_symbol(&self, name: &str) -> Option<Value> {
        match self.function.param_depth(name) {
            Some(depth) => Some(self.args.peek(depth).copied().unwrap_or_default()),
            None => self.parent.lookup_symbol(name),
        }
    }

    fn lookup_function(&self, name: &str) -> Option<&dyn Functor> {
        self.parent.lookup_function(name)
    }

    fn enclosing(&self) -> Option<&dyn SymbolTable> {
        Some(self.parent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_rejects_duplicates() {
        let mut store = FunctionStore::new();
        store.define("sub", &["a", "b"], "a-b").unwrap();
        assert_eq!(
            store.define("SUB", &["x"], "x"),
            Err(ErrorKind::DuplicateFunction)
        );
        assert_eq!(
            store.define("twice", &["x", "X"], "x+x"),
            Err(ErrorKind::DuplicateFunction)
        );
        assert_eq!(store.len(), 1);
        assert_eq!(store.lookup("Sub").map(|f| f.params().len()), Some(2));
    }

    #[test]
    fn reset_forgets_definitions() {
        let mut store = FunctionStore::new();
        store.define("one", &[], "1").unwrap();
        store.reset();
        assert!(store.is_empty());
        store.define("one", &[], "1").unwrap();
        assert!(store.lookup("one").is_some());
    }

    #[test]
    fn binding_indexes_parameters_from_the_end() {
        struct Globals;
        impl SymbolTable for Globals {
            fn lookup_symbol(&self, name: &str) -> Option<Value> {
                (name == "g").then_some(Value::Signed(42))
            }
        }

        let mut store = FunctionStore::new();
        store.define("f", &["a", "b", "c"], "a").unwrap();
        let function = store.lookup("f").unwrap();
        let mut args = ValueStack::new();
        for v in [1, 2, 3] {
            args.push(Value::Signed(v)).unwrap();
        }
        let binding = Binding::new(function, &args, &Globals);
        assert_eq!(binding.lookup_symbol("a"), Some(Value::Signed(1)));
        assert_eq!(binding.lookup_symbol("B"), Some(Value::Signed(2)));
        assert_eq!(binding.lookup_symbol("c"), Some(Value::Signed(3)));
        assert_eq!(binding.lookup_symbol("g"), Some(Value::Signed(42)));
        assert_eq!(binding.lookup_symbol("h"), None);
        assert!(binding.enclosing().is_some());
    }

    #[test]
    fn builtin_table_is_case_insensitive() {
        static TABLE: BuiltinTable = BuiltinTable {
            functions: &[&HIGH, &LOW],
        };
        assert!(TABLE.lookup_function("high").is_some());
        assert!(TABLE.lookup_function("Low").is_some());
        assert!(TABLE.lookup_function("msw").is_none());
        assert!(NO_FUNCTIONS.lookup_function("HIGH").is_none());
    }
}
