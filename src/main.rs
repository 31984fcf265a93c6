// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

// CLI entrypoint for opforge-expr.

use std::io;
use std::process::ExitCode;

use clap::Parser;

use opforge_expr::cli::{self, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_writer(io::stderr)
        .init();

    match cli::run(&cli) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failures) => {
            tracing::debug!(failures, "expressions failed");
            ExitCode::FAILURE
        }
        Err(err) => {
            tracing::error!("{err}");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
