// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

// Symbol tables consulted by the evaluator.

use std::io::{self, Write};

use tracing::debug;

use crate::core::error::ErrorKind;
use crate::core::function::{FunctionStore, Functor};
use crate::core::value::Value;

/// Name resolution the evaluator needs from its caller.
pub trait SymbolTable {
    fn has_symbol(&self, name: &str) -> bool {
        self.lookup_symbol(name).is_some()
    }

    /// Value of `name`, or `None` if it is not (yet) defined.
    fn lookup_symbol(&self, name: &str) -> Option<Value>;

    /// User-defined function `name`, if any.
    fn lookup_function(&self, _name: &str) -> Option<&dyn Functor> {
        None
    }

    /// The table this one layers over, if any.
    fn enclosing(&self) -> Option<&dyn SymbolTable> {
        None
    }
}

/// A table that knows no names.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSymbols;

impl SymbolTable for NoSymbols {
    fn lookup_symbol(&self, _name: &str) -> Option<Value> {
        None
    }
}

#[derive(Debug, Clone)]
pub struct SymbolTableEntry {
    pub name: String,
    pub val: Value,
    /// Set by [`Symbols::update`]; cleared when a new pass starts.
    pub updated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum SymbolTableResult {
    Ok,
    Duplicate,
    NotFound,
}

/// Case-insensitive symbols plus the user functions defined alongside them.
#[derive(Debug, Default)]
pub struct Symbols {
    entries: Vec<SymbolTableEntry>,
    functions: FunctionStore,
}

impl Symbols {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Define `name` on the first pass. A name is defined once.
    pub fn add(&mut self, name: &str, val: Value) -> SymbolTableResult {
        if self.entry(name).is_some() {
            return SymbolTableResult::Duplicate;
        }

        self.entries.push(SymbolTableEntry {
            name: name.to_string(),
            val,
            updated: false,
        });
        SymbolTableResult::Ok
    }

    /// Redefine `name` on a later pass, at most once per pass.
    pub fn update(&mut self, name: &str, val: Value) -> SymbolTableResult {
        if let Some(entry) = self.entry_mut(name) {
            if !entry.updated {
                entry.val = val;
                entry.updated = true;
                return SymbolTableResult::Ok;
            }
            return SymbolTableResult::Duplicate;
        }
        SymbolTableResult::NotFound
    }

    /// Look up a symbol by name (case-insensitive).
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.entry(name).map(|e| e.val)
    }

    #[must_use]
    pub fn entry(&self, name: &str) -> Option<&SymbolTableEntry> {
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
    }

    pub fn entry_mut(&mut self, name: &str) -> Option<&mut SymbolTableEntry> {
        self.entries
            .iter_mut()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn functions(&self) -> &FunctionStore {
        &self.functions
    }

    /// Define a user function; see [`FunctionStore::define`].
    pub fn define_function(
        &mut self,
        name: &str,
        params: &[&str],
        body: &str,
    ) -> Result<(), ErrorKind> {
        self.functions.define(name, params, body)
    }

    /// Start a new pass: symbols keep their values, functions are redefined.
    pub fn reset_pass(&mut self) {
        debug!(symbols = self.entries.len(), "starting new pass");
        for entry in &mut self.entries {
            entry.updated = false;
        }
        self.functions.reset();
    }

    pub fn dump<W: Write>(&self, mut out: W) -> io::Result<()> {
        for entry in &self.entries {
            writeln!(
                out,
                "{:<16}: {:04x} ({})",
                entry.name,
                entry.val.magnitude(),
                entry.val
            )?;
        }
        for function in self.functions.iter() {
            writeln!(
                out,
                "{:<16}: ({}) = {}",
                function.name(),
                function.params().join(", "),
                function.body()
            )?;
        }
        Ok(())
    }
}

impl SymbolTable for Symbols {
    fn lookup_symbol(&self, name: &str) -> Option<Value> {
        self.lookup(name)
    }

    fn lookup_function(&self, name: &str) -> Option<&dyn Functor> {
        self.functions.lookup(name).map(|f| f as &dyn Functor)
    }
}

#[cfg(test)]
mod tests {
    use super::{NoSymbols, SymbolTable, SymbolTableResult, Symbols};
    use crate::core::value::Value;

    #[test]
    fn add_and_lookup_are_case_insensitive() {
        let mut table = Symbols::new();
        assert_eq!(
            table.add("Foo", Value::Signed(0x10)),
            SymbolTableResult::Ok
        );
        assert_eq!(table.lookup("foo"), Some(Value::Signed(0x10)));
        assert_eq!(table.lookup("FOO"), Some(Value::Signed(0x10)));
        assert!(table.has_symbol("fOO"));
    }

    #[test]
    fn duplicate_definitions_are_rejected() {
        let mut table = Symbols::new();
        assert_eq!(table.add("Val", Value::Signed(1)), SymbolTableResult::Ok);
        assert_eq!(
            table.add("val", Value::Signed(2)),
            SymbolTableResult::Duplicate
        );
        assert_eq!(table.lookup("VAL"), Some(Value::Signed(1)));
    }

    #[test]
    fn update_rules() {
        let mut table = Symbols::new();
        assert_eq!(
            table.update("missing", Value::Signed(1)),
            SymbolTableResult::NotFound
        );
        assert_eq!(table.add("Once", Value::Signed(1)), SymbolTableResult::Ok);
        assert_eq!(table.update("once", Value::Signed(2)), SymbolTableResult::Ok);
        assert_eq!(
            table.update("ONCE", Value::Signed(3)),
            SymbolTableResult::Duplicate
        );
        assert_eq!(table.lookup("once"), Some(Value::Signed(2)));

        assert_eq!(table.lookup("nope"), None);
    }

    #[test]
    fn reset_pass_clears_functions_and_update_marks() {
        let mut table = Symbols::new();
        assert_eq!(table.add("Once", Value::Signed(1)), SymbolTableResult::Ok);
        assert_eq!(table.update("once", Value::Signed(2)), SymbolTableResult::Ok);
        table.define_function("twice", &["x"], "x*2").unwrap();
        assert!(table.lookup_function("TWICE").is_some());

        table.reset_pass();
        assert!(table.lookup_function("twice").is_none());
        assert_eq!(table.update("once", Value::Signed(3)), SymbolTableResult::Ok);
        assert_eq!(table.lookup("once"), Some(Value::Signed(3)));
    }

    #[test]
    fn dump_lists_symbols_and_functions() {
        let mut table = Symbols::new();
        assert_eq!(table.add("start", Value::Unsigned(0x100)), SymbolTableResult::Ok);
        table.define_function("sub", &["a", "b"], "a-b").unwrap();
        let mut out = Vec::new();
        table.dump(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("start"));
        assert!(text.contains("0100"));
        assert!(text.contains("(a, b) = a-b"));
    }

    #[test]
    fn empty_table_knows_nothing() {
        assert!(!NoSymbols.has_symbol("x"));
        assert!(NoSymbols.lookup_function("x").is_none());
        assert!(NoSymbols.enclosing().is_none());
    }
}
