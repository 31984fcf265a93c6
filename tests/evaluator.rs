// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

use opforge_expr::core::{
    Cursor, DialectRegistry, ErrorKind, ExprEvaluator, SymbolTable, SymbolTableResult, Symbols,
    Value,
};

fn evaluator_for_cpu(cpu: &str) -> ExprEvaluator {
    let registry = DialectRegistry::with_defaults();
    let dialect = registry.resolve_cpu(cpu).expect("known cpu");
    ExprEvaluator::new(dialect)
}

fn define(symbols: &mut Symbols, name: &str, value: Value) {
    assert_eq!(symbols.add(name, value), SymbolTableResult::Ok);
}

#[test]
fn same_value_in_every_vendor_syntax() {
    let cases = [
        ("6809", "$1F+%11"),
        ("z80", "1FH+11B"),
        ("z8", "%1F+%(2)11"),
        ("ins8070", "X'1F'+B'11'"),
        ("f3850", "H'1F'+B'11'"),
        ("cdp1802", "#1F+B'11'"),
        ("2650", "H'1F'+B'11'"),
        ("tms9900", ">1F+3"),
        ("i370", "X'1F'+B'11'"),
    ];
    for (cpu, text) in cases {
        let evaluator = evaluator_for_cpu(cpu);
        assert_eq!(
            evaluator.eval_line(text, &Symbols::new(), 0),
            Ok(Value::Signed(34)),
            "{cpu}: {text}"
        );
    }
}

#[test]
fn two_pass_forward_reference() {
    let evaluator = evaluator_for_cpu("8085");
    let mut symbols = Symbols::new();
    let line = "END - START + 1";

    define(&mut symbols, "START", Value::Unsigned(0x100));
    assert_eq!(evaluator.eval_line(line, &symbols, 0x100), Ok(Value::Undefined));
    let deferred = evaluator.error().expect("deferred error");
    assert!(deferred.kind.is_deferrable());
    assert_eq!(deferred.remainder(line), line);

    symbols.reset_pass();
    define(&mut symbols, "END", Value::Unsigned(0x1ff));
    assert_eq!(
        evaluator.eval_line(line, &symbols, 0x100),
        Ok(Value::Unsigned(0x100))
    );
    assert_eq!(evaluator.error(), None);
}

#[test]
fn operand_lists_are_scanned_one_expression_at_a_time() {
    let evaluator = evaluator_for_cpu("6502");
    let symbols = Symbols::new();
    let mut scan = Cursor::new("$10, (2+3)*4 ; data");
    let mut values = Vec::new();
    loop {
        values.push(evaluator.eval(&mut scan, &symbols, 0).expect("operand"));
        scan.skip_ws();
        if !scan.expect(b',') {
            break;
        }
    }
    assert_eq!(values, vec![Value::Signed(0x10), Value::Signed(20)]);
    assert_eq!(scan.rest(), "; data");
}

#[test]
fn functions_are_redefined_each_pass() {
    let evaluator = evaluator_for_cpu("6809");
    let mut symbols = Symbols::new();
    symbols.define_function("page", &["addr"], "addr!>8").unwrap();
    assert_eq!(
        evaluator.eval_line("page($1234)", &symbols, 0),
        Ok(Value::Signed(0x12))
    );
    assert_eq!(
        symbols.define_function("PAGE", &["a"], "a"),
        Err(ErrorKind::DuplicateFunction)
    );

    symbols.reset_pass();
    assert!(symbols.lookup_function("page").is_none());
    symbols.define_function("page", &["addr"], "addr!>8").unwrap();
    assert_eq!(symbols.functions().len(), 1);
}

#[test]
fn error_columns_point_into_the_line() {
    let evaluator = evaluator_for_cpu("z80");
    let line = "  10H + (3 * 4";
    let err = evaluator
        .eval_line(line, &Symbols::new(), 0)
        .expect_err("unbalanced");
    assert_eq!(err.kind, ErrorKind::MissingClosingParen);
    assert_eq!(err.remainder(line), "(3 * 4");
    assert_eq!(
        err.describe(line),
        "Missing closing parenthesis: (3 * 4"
    );
    assert_eq!(err.to_string(), "Missing closing parenthesis at column 9");
}

#[test]
fn dump_lists_symbols_then_functions() {
    let mut symbols = Symbols::new();
    define(&mut symbols, "START", Value::Unsigned(0x100));
    symbols.define_function("sub", &["a", "b"], "a-b").unwrap();
    let mut out = Vec::new();
    symbols.dump(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("START"));
    assert!(lines[0].ends_with(": 0100 (256)"));
    assert!(lines[1].starts_with("sub"));
    assert!(lines[1].ends_with(": (a, b) = a-b"));
}
