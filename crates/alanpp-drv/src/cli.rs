//! The `alanppc` command-line surface: one top-level `Cli` with a
//! subcommand, flags as plain derived fields rather than hand-rolled
//! argument parsing.
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(name = "alanppc", version, about = "Alan++ compiler driver")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile one or more source files, one independent VM image per
    /// `$`-delimited program.
    Compile(CompileArgs),
}

#[derive(clap::Args, Debug)]
pub struct CompileArgs {
    /// Source files to compile.
    pub files: Vec<PathBuf>,

    /// Output path (or stem, when a file contains more than one program).
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// What to emit instead of (or in addition to inspecting) the byte image.
    #[arg(long = "emit", value_enum)]
    pub emit: Option<EmitKind>,

    /// Raise the log filter from `info` to `debug`.
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Treat warnings as compile errors for exit-code purposes.
    #[arg(short = 'W', long = "warnings-as-errors")]
    pub warnings_as_errors: bool,

    /// Path to a TOML config file (default: `alanppc.toml` in the working directory).
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,
}

/// What `--emit` produces. `Bytes` is the default: the raw VM image,
/// written to disk. Every other variant prints a debug rendering to
/// stdout instead.
#[derive(ValueEnum, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
#[value(rename_all = "kebab-case")]
pub enum EmitKind {
    Tokens,
    Cst,
    Ast,
    Symbols,
    #[default]
    Bytes,
    Disasm,
    DisasmFull,
}
