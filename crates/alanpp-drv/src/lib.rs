//! alanpp-drv - the `alanppc` command-line driver.
//!
//! Wires the CLI surface ([`cli`]), the optional TOML [`config::Config`],
//! and the per-program [`pipeline`] together: read each input file, split
//! it into `$`-delimited programs, compile each independently, and render
//! the result per `--emit`.

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;

use std::fs;

use clap::Parser as _;

pub use cli::{Cli, Command, CompileArgs, EmitKind};
pub use config::Config;
pub use error::DriverError;

/// Parses the command line and runs it. Returns the process exit code on
/// success (`0` clean, `1` one or more programs had compile errors).
/// `Err` means a driver-level failure (bad config, unreadable file) that
/// never reached a program's own diagnostic sink — [`DriverError`] wrapped
/// in `anyhow::Error` at this boundary.
pub fn run() -> anyhow::Result<i32> {
    let cli = Cli::parse();
    let code = match cli.command {
        Command::Compile(args) => run_compile(args)?,
    };
    Ok(code)
}

fn run_compile(args: CompileArgs) -> Result<i32, DriverError> {
    if args.files.is_empty() {
        return Err(DriverError::NoInputFiles);
    }

    let config = match &args.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };

    let verbose = args.verbose || config.verbose.unwrap_or(false);
    init_logging(verbose);

    let warnings_as_errors = args.warnings_as_errors || config.warnings_as_errors.unwrap_or(false);
    let emit_kind = args.emit.or(config.emit).unwrap_or_default();

    let mut any_failures = false;

    for file in &args.files {
        let source =
            fs::read_to_string(file).map_err(|e| DriverError::ReadFailed(file.clone(), e))?;
        let stem = file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "a".to_string());

        let programs = pipeline::split_programs(&source);
        tracing::info!(file = %file.display(), programs = programs.len(), "compiling");

        for (index, program_source) in programs.iter().enumerate() {
            let result = pipeline::compile_program(program_source, index);
            let failed = result.handler.has_errors()
                || (warnings_as_errors && result.handler.warning_count() > 0);
            if failed {
                any_failures = true;
            }
            output::print_diagnostics(file, &result.handler);
            output::emit(&result, emit_kind, &args.output, &stem, programs.len())?;
        }
    }

    Ok(if any_failures { 1 } else { 0 })
}

fn init_logging(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .without_time()
        .try_init();
}
