pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod processor;
pub mod runner;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

pub use config::Config;
pub use error::EvalError;
pub use model::EvalOutcome;

use model::Prepared;
use runner::{CommandToolchain, DiagnosticClassifier, GoClassifier, Toolchain};

/// Evaluate a snippet with the configured `go` toolchain.
///
/// Never fails: problems at any stage come back as `EvalOutcome::error`.
pub fn eval(code: &str, config: &Config) -> EvalOutcome {
    let toolchain = CommandToolchain::from_config(config);
    eval_with(code, config, &toolchain, &GoClassifier)
}

/// [`eval`] with the toolchain and diagnostic reader supplied by the caller.
pub fn eval_with(
    code: &str,
    config: &Config,
    toolchain: &dyn Toolchain,
    classifier: &dyn DiagnosticClassifier,
) -> EvalOutcome {
    let result = processor::prepare(code, config)
        .and_then(|prepared| runner::execute(prepared, toolchain, classifier));
    match result {
        Ok(outcome) => outcome,
        Err(e) => EvalOutcome::from_error(&e),
    }
}

/// The program that the first compile attempt would see.
pub fn emit(code: &str, config: &Config) -> Result<String, EvalError> {
    match processor::prepare(code, config)? {
        Prepared::PassThrough(src) => Ok(src),
        Prepared::Snippet(mut partition) => {
            partition
                .imports
                .insert(processor::assemble::SUPPORT_IMPORT.to_string());
            Ok(processor::assemble::assemble(&partition))
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // logs go to stderr so they never mix with the program's output
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn report(outcome: &EvalOutcome, json: bool) -> anyhow::Result<ExitCode> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
    } else if outcome.is_success() {
        print!("{}", outcome.output);
    } else {
        eprintln!("{}", outcome.error);
    }
    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

pub fn run() -> anyhow::Result<ExitCode> {
    let args = cli::Cli::parse();
    init_logging(args.verbose);

    // 1. ── Configure ──────────────────────────────────────────────────
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(program) = args.toolchain {
        config.toolchain.program = program;
    }
    if let Some(dir) = args.temp_dir {
        config.temp_dir = Some(dir);
    }

    // 2. ── Read ───────────────────────────────────────────────────────
    let code = parser::load_source(args.code.as_deref(), args.file.as_deref())
        .with_context(|| "Loading snippet")?;

    // 3. ── Emit or evaluate ───────────────────────────────────────────
    if args.emit {
        return match emit(&code, &config) {
            Ok(src) if !args.json => {
                print!("{src}");
                Ok(ExitCode::SUCCESS)
            }
            Ok(src) => report(&EvalOutcome::success(src), true),
            Err(e) => report(&EvalOutcome::from_error(&e), args.json),
        };
    }

    report(&eval(&code, &config), args.json)
}
