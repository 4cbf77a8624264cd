#![forbid(unsafe_code)]
#![deny(unused_must_use, missing_debug_implementations)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]
#![allow(missing_docs)]

//! Command-line surface of lspgen.

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

pub mod commands;

/// Crates whose logs a plain `LSPGEN_LOG` level applies to.
const LOG_TARGETS: [&str; 3] = ["lspgen", "lspgen_cli", "lspgen_core"];

#[derive(Parser, Debug)]
#[command(
    name = "lspgen",
    version,
    about = "Generate LuaLS type annotations from the LSP meta-model"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the annotation file and optionally patch the methods file
    Gen(commands::generate::GenArgs),
}

/// Parse `args` (including the program name) and run the chosen command.
///
/// Returns the process exit code.
pub fn run_cli(args: Vec<String>) -> i32 {
    match Cli::try_parse_from(args) {
        Ok(cli) => match cli.command {
            Some(Commands::Gen(args)) => commands::generate::run(args),
            None => {
                let mut cmd = Cli::command();
                let _ = cmd.print_help();
                println!();
                0
            }
        },
        Err(e) => {
            let code = e.exit_code();
            let _ = e.print();
            code
        }
    }
}

/// Run a fallible command body, mapping an error to stderr and exit code 1.
pub(crate) fn run_command<F>(f: F) -> i32
where
    F: FnOnce() -> Result<(), String>,
{
    match f() {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

/// Build the filter directive from the `LSPGEN_LOG` value.
fn log_filter(value: Option<&str>) -> String {
    // LSPGEN_LOG is either a plain level ("trace" .. "error") or a full
    // tracing filter spec like "lspgen_core=debug,reqwest=warn"
    match value {
        Some(level) if is_plain_level(level) => LOG_TARGETS
            .iter()
            .map(|target| format!("{target}={level}"))
            .collect::<Vec<_>>()
            .join(","),
        Some(spec) => spec.to_string(),
        None => LOG_TARGETS
            .iter()
            .map(|target| format!("{target}=info"))
            .collect::<Vec<_>>()
            .join(","),
    }
}

/// Install the stderr tracing subscriber.
pub fn init_tracing() {
    let value = std::env::var("LSPGEN_LOG").ok();
    let filter = log_filter(value.as_deref());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}
