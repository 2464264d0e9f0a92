// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Rill Project Developers

//! rill CLI - a tiny scripting runtime with live module reload.
//!
//! Runs a script file, evaluates inline code, or starts the interactive
//! REPL. Imported modules are re-checked between inputs and reloaded in
//! place when their source files change.

mod repl;

use clap::Parser;
use owo_colors::OwoColorize;
use rill_runtime::{ModuleResolver, SearchPath, Session};
use rill_script::Value;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "rill",
    about = "A tiny scripting runtime with live module reload",
    version
)]
struct Cli {
    /// Script file to execute
    script: Option<PathBuf>,

    /// Evaluate code from the command line
    #[arg(short = 'e', long = "eval")]
    eval: Option<String>,

    /// Start the interactive REPL
    #[arg(short = 'i', long = "interactive", alias = "repl")]
    interactive: bool,

    /// Extra module directories, searched before RILL_PATH
    #[arg(long = "path", value_name = "DIR")]
    path: Vec<PathBuf>,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "rill=debug,rill_runtime=debug,rill_script=debug"
    } else {
        "rill=warn,rill_runtime=warn,rill_script=warn"
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut search = SearchPath::from_env();
    // --path entries take priority over RILL_PATH, last flag highest.
    for dir in cli.path {
        search.prepend(dir);
    }
    let base_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut session = Session::new(ModuleResolver::new(base_dir, search));

    if let Some(code) = cli.eval {
        eval_and_report(&mut session, |s| s.eval(&code))
    } else if let Some(script) = cli.script {
        if !script.exists() {
            eprintln!(
                "{}: file not found '{}'",
                "Error".red().bold(),
                script.display().cyan()
            );
            return ExitCode::FAILURE;
        }
        eval_and_report(&mut session, |s| s.run_file(&script))
    } else if cli.interactive || std::io::stdin().is_terminal() {
        run_repl(session)
    } else {
        // Piped input: evaluate stdin as a script.
        let mut code = String::new();
        if let Err(e) = std::io::Read::read_to_string(&mut std::io::stdin(), &mut code) {
            eprintln!("{}: {}", "Error".red().bold(), e);
            return ExitCode::FAILURE;
        }
        eval_and_report(&mut session, |s| s.eval(&code))
    }
}

fn eval_and_report<F>(session: &mut Session, run: F) -> ExitCode
where
    F: FnOnce(&mut Session) -> rill_runtime::Result<Value>,
{
    match run(session) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.to_string().red());
            ExitCode::FAILURE
        }
    }
}

fn run_repl(session: Session) -> ExitCode {
    match repl::Repl::new(session) {
        Ok(mut repl) => {
            if let Err(e) = repl.run() {
                eprintln!("{}: {:?}", "REPL Error".red().bold(), e);
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!(
                "{}: Failed to initialize REPL: {:?}",
                "Error".red().bold(),
                e
            );
            ExitCode::FAILURE
        }
    }
}
