// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Command-line interface parsing and the expression run loop.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use thiserror::Error;
use tracing::{debug, info};

use crate::core::dialect::Dialect;
use crate::core::error::{ErrorKind, ExprError};
use crate::core::expr::ExprEvaluator;
use crate::core::registry::{DialectRegistry, RegistryError};
use crate::core::symbol_table::{NoSymbols, SymbolTableResult, Symbols};
use crate::core::text_utils::Cursor;
use crate::core::value::{Value, Width};

pub const VERSION: &str = "0.3";

pub const DEFAULT_DIALECT: &str = "c";

const LONG_ABOUT: &str = "Evaluate assembler expressions in the syntax of a vendor assembler.

Each EXPR is evaluated with the selected dialect and printed as
`hex decimal (signed|unsigned)`. Select the dialect with -d/--dialect or
let -c/--cpu pick the vendor syntax for a processor. Symbols and functions
given with -D and -F are visible to every expression; definitions may
refer to each other in any order.";

#[derive(Parser, Debug)]
#[command(
    name = "opforge-expr",
    version = VERSION,
    about = "Dialect-aware assembler expression evaluator",
    long_about = LONG_ABOUT
)]
pub struct Cli {
    #[arg(
        short = 'd',
        long = "dialect",
        value_name = "NAME",
        conflicts_with = "cpu",
        long_help = "Expression dialect (c, motorola, intel, zilog, national, fairchild, rca, signetics, texas, ibm). Defaults to c."
    )]
    pub dialect: Option<String>,
    #[arg(
        short = 'c',
        long = "cpu",
        value_name = "CPU",
        long_help = "Select the dialect used by the assembler for CPU, e.g. 6809, z80, cdp1802."
    )]
    pub cpu: Option<String>,
    #[arg(
        short = 'l',
        long = "location",
        value_name = "EXPR",
        long_help = "Current location counter, written in the selected dialect. Defaults to 0."
    )]
    pub location: Option<String>,
    #[arg(
        short = 'D',
        long = "define",
        value_name = "NAME[=EXPR]",
        action = ArgAction::Append,
        long_help = "Predefine a symbol (repeatable). If EXPR is omitted, defaults to 1."
    )]
    pub defines: Vec<String>,
    #[arg(
        short = 'F',
        long = "function",
        value_name = "NAME(P1,P2)=BODY",
        action = ArgAction::Append,
        long_help = "Define a user function (repeatable). The body is evaluated on every call with the parameters bound to the arguments."
    )]
    pub functions: Vec<String>,
    #[arg(
        short = 'w',
        long = "width",
        value_name = "BITS",
        value_parser = parse_width,
        long_help = "Report results that do not fit in BITS (8, 16 or 32) as errors."
    )]
    pub width: Option<Width>,
    #[arg(
        short = 'f',
        long = "file",
        value_name = "FILE",
        action = ArgAction::Append,
        long_help = "Evaluate every line of FILE after the EXPR arguments (repeatable). Blank lines and comment lines of the dialect are skipped."
    )]
    pub files: Vec<PathBuf>,
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value_t = tracing::Level::WARN,
        long_help = "Diagnostic log level written to stderr (error, warn, info, debug, trace)."
    )]
    pub log_level: tracing::Level,
    #[arg(
        long = "list-dialects",
        action = ArgAction::SetTrue,
        long_help = "List the known dialects and the CPU to dialect mapping, then exit."
    )]
    pub list_dialects: bool,
    #[arg(value_name = "EXPR")]
    pub exprs: Vec<String>,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("Invalid definition {text}: {message}")]
    Definition { text: String, message: String },
    #[error("Invalid location {text}: {message}")]
    Location { text: String, message: String },
    #[error("No expressions given")]
    NoExpressions,
    #[error(transparent)]
    Io(#[from] io::Error),
}

fn parse_width(text: &str) -> Result<Width, String> {
    text.trim()
        .parse::<u32>()
        .ok()
        .and_then(Width::from_bits)
        .ok_or_else(|| format!("width must be 8, 16 or 32, not {text}"))
}

/// A `-F` argument split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSpec {
    pub name: String,
    pub params: Vec<String>,
    pub body: String,
}

/// Split `NAME(P1,P2)=BODY`.
pub fn parse_function_arg(arg: &str) -> Result<FunctionSpec, &'static str> {
    let (head, body) = arg
        .split_once('=')
        .ok_or("expected NAME(P1,P2)=BODY")?;
    let head = head.trim();
    let open = head.find('(').ok_or("missing parameter list")?;
    let inner = head[open + 1..]
        .strip_suffix(')')
        .ok_or("missing closing parenthesis")?;
    let name = head[..open].trim();
    if name.is_empty() {
        return Err("missing function name");
    }
    let params: Vec<String> = if inner.trim().is_empty() {
        Vec::new()
    } else {
        inner.split(',').map(|p| p.trim().to_string()).collect()
    };
    if params.iter().any(String::is_empty) {
        return Err("empty parameter name");
    }
    if body.trim().is_empty() {
        return Err("missing function body");
    }
    Ok(FunctionSpec {
        name: name.to_string(),
        params,
        body: body.trim().to_string(),
    })
}

/// Split `NAME[=EXPR]`; a bare name defines the symbol as 1.
pub fn parse_define_arg(arg: &str) -> (&str, &str) {
    match arg.split_once('=') {
        Some((name, expr)) => (name.trim(), expr.trim()),
        None => (arg.trim(), "1"),
    }
}

/// True if `name` is exactly one symbol in `dialect`'s spelling.
fn is_symbol_name(dialect: &Dialect, name: &str) -> bool {
    let mut scan = Cursor::new(name);
    dialect.symbol.parse_symbol(&mut scan).is_some() && scan.at_end()
}

/// Validated CLI configuration.
pub struct CliConfig {
    pub dialect: &'static Dialect,
    pub location: u32,
    pub symbols: Symbols,
}

impl std::fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliConfig")
            .field("dialect", &self.dialect.name)
            .field("location", &self.location)
            .field("symbols", &self.symbols.len())
            .finish()
    }
}

fn definition_error(arg: &str, message: String) -> CliError {
    CliError::Definition {
        text: arg.to_string(),
        message,
    }
}

/// Define every `-F` function; called again after each pass reset.
fn define_functions(
    cli: &Cli,
    dialect: &Dialect,
    symbols: &mut Symbols,
) -> Result<(), CliError> {
    for arg in &cli.functions {
        let def = parse_function_arg(arg).map_err(|msg| definition_error(arg, msg.to_string()))?;
        if !is_symbol_name(dialect, &def.name) {
            return Err(definition_error(arg, format!("bad function name {}", def.name)));
        }
        let params: Vec<&str> = def.params.iter().map(String::as_str).collect();
        symbols
            .define_function(&def.name, &params, &def.body)
            .map_err(|kind| definition_error(arg, kind.to_string()))?;
    }
    Ok(())
}

/// Resolve the dialect and build the symbol table from the definitions.
pub fn validate_cli(cli: &Cli) -> Result<CliConfig, CliError> {
    let registry = DialectRegistry::with_defaults();
    let dialect = registry.resolve(cli.dialect.as_deref(), cli.cpu.as_deref(), DEFAULT_DIALECT)?;
    let evaluator = ExprEvaluator::new(dialect);

    let location = match cli.location.as_deref() {
        None => 0,
        Some(text) => {
            let value = evaluator
                .eval_line(text, &NoSymbols, 0)
                .map_err(|err| CliError::Location {
                    text: text.to_string(),
                    message: err.describe(text),
                })?;
            if value.is_undefined() {
                return Err(CliError::Location {
                    text: text.to_string(),
                    message: "location must be a constant".to_string(),
                });
            }
            value.as_unsigned()
        }
    };

    let mut defines = Vec::with_capacity(cli.defines.len());
    for arg in &cli.defines {
        let (name, expr) = parse_define_arg(arg);
        if !is_symbol_name(dialect, name) {
            return Err(definition_error(arg, format!("bad symbol name {name}")));
        }
        defines.push((arg, name, expr));
    }

    // Symbols may refer to later definitions; keep passing over them while
    // each pass resolves more of them.
    let mut symbols = Symbols::new();
    let mut unresolved = usize::MAX;
    for pass in 1.. {
        if pass > 1 {
            symbols.reset_pass();
        }
        define_functions(cli, dialect, &mut symbols)?;

        let mut deferred = Vec::new();
        for &(arg, name, expr) in &defines {
            let value = evaluator
                .eval_line(expr, &symbols, location)
                .map_err(|err| definition_error(arg, err.describe(expr)))?;
            if let Some(err) = evaluator.error() {
                deferred.push(definition_error(arg, err.describe(expr)));
            }
            let result = if pass == 1 {
                symbols.add(name, value)
            } else {
                symbols.update(name, value)
            };
            match result {
                SymbolTableResult::Ok => {}
                SymbolTableResult::Duplicate => {
                    return Err(definition_error(arg, format!("duplicate symbol {name}")))
                }
                SymbolTableResult::NotFound => {
                    return Err(definition_error(arg, format!("unknown symbol {name}")))
                }
            }
        }

        debug!(pass, unresolved = deferred.len(), "definitions evaluated");
        if deferred.is_empty() {
            break;
        }
        if deferred.len() >= unresolved {
            return Err(deferred.swap_remove(0));
        }
        unresolved = deferred.len();
    }

    debug!(
        dialect = dialect.name,
        location,
        symbols = symbols.len(),
        functions = symbols.functions().len(),
        "configuration ready"
    );
    Ok(CliConfig {
        dialect,
        location,
        symbols,
    })
}

/// One line of output for a successful evaluation.
pub fn format_value(value: Value) -> String {
    match value {
        Value::Undefined => "undefined".to_string(),
        Value::Signed(v) => format!("{:08x} {} (signed)", v as u32, v),
        Value::Unsigned(v) => format!("{v:08x} {v} (unsigned)"),
    }
}

fn format_failure(err: &ExprError, text: &str) -> String {
    format!("column {}: {}", err.at + 1, err.describe(text))
}

/// Print the dialect table and CPU mapping.
pub fn list_dialects<W: Write>(out: &mut W) -> io::Result<()> {
    let registry = DialectRegistry::with_defaults();
    for dialect in registry.dialects() {
        writeln!(out, "{:<10} {}", dialect.name, dialect.description)?;
    }
    writeln!(out)?;
    for (cpu, dialect) in registry.cpus() {
        writeln!(out, "{cpu:<10} -> {dialect}")?;
    }
    Ok(())
}

/// Evaluate every expression on the command line.
///
/// Results go to `out`, per-expression errors to `err`. Returns the number
/// of expressions that failed.
pub fn run_with<W: Write, E: Write>(
    cli: &Cli,
    out: &mut W,
    err: &mut E,
) -> Result<usize, CliError> {
    if cli.list_dialects {
        list_dialects(out)?;
        return Ok(0);
    }
    if cli.exprs.is_empty() && cli.files.is_empty() {
        return Err(CliError::NoExpressions);
    }
    let config = validate_cli(cli)?;
    let evaluator = ExprEvaluator::new(config.dialect);
    let runner = Runner {
        evaluator: &evaluator,
        config: &config,
        width: cli.width,
    };

    let mut failures = 0;
    for text in &cli.exprs {
        if !runner.report(text, "", out, err)? {
            failures += 1;
        }
    }
    for path in &cli.files {
        let source = fs::read_to_string(path)?;
        for (index, line) in source.lines().enumerate() {
            let comment = config.dialect.comment.comment_line(&Cursor::new(line));
            if comment || line.trim().is_empty() {
                continue;
            }
            let label = format!("{}:{}: ", path.display(), index + 1);
            if !runner.report(line, &label, out, err)? {
                failures += 1;
            }
        }
    }
    Ok(failures)
}

struct Runner<'a> {
    evaluator: &'a ExprEvaluator,
    config: &'a CliConfig,
    width: Option<Width>,
}

impl Runner<'_> {
    /// Print the value of `text` or its failure, prefixed with `label`.
    /// Returns false on failure.
    fn report<W: Write, E: Write>(
        &self,
        text: &str,
        label: &str,
        out: &mut W,
        err: &mut E,
    ) -> io::Result<bool> {
        info!(expr = %text, "evaluating");
        let value = match self
            .evaluator
            .eval_line(text, &self.config.symbols, self.config.location)
        {
            Ok(value) => value,
            Err(failure) => {
                writeln!(err, "{label}{}", format_failure(&failure, text))?;
                return Ok(false);
            }
        };
        writeln!(out, "{}", format_value(value))?;
        if let Some(deferred) = self.evaluator.error() {
            writeln!(err, "{label}{}", format_failure(&deferred, text))?;
            return Ok(false);
        }
        if let Some(width) = self.width {
            if value.overflow_uint(width) {
                let start = text.len() - text.trim_start().len();
                let overflow = ExprError::new(ErrorKind::OverflowRange, start);
                let failure = format_failure(&overflow, text);
                writeln!(err, "{label}{failure} ({} bits)", width.bits())?;
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Evaluate the expressions of `cli` on stdout/stderr.
pub fn run(cli: &Cli) -> Result<usize, CliError> {
    let stdout = io::stdout();
    let stderr = io::stderr();
    run_with(cli, &mut stdout.lock(), &mut stderr.lock())
}
