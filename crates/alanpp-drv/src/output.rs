//! Rendering a [`ProgramResult`] for `--emit`, and diagnostics for stderr.
use std::fs;
use std::path::{Path, PathBuf};

use alanpp_gen::Disassembler;
use alanpp_sem::ScopeTree;
use alanpp_util::Handler;

use crate::cli::EmitKind;
use crate::error::DriverError;
use crate::pipeline::ProgramResult;

/// `<file>:<line>:<column>: <severity>[<stage>]: <message>`, one line per
/// diagnostic, in the order the stages raised them.
pub fn print_diagnostics(file: &Path, handler: &Handler) {
    for diag in handler.diagnostics() {
        let stage = diag.stage.map(|s| s.name()).unwrap_or("driver");
        eprintln!(
            "{}:{}:{}: {}[{}]: {}",
            file.display(),
            diag.span.line,
            diag.span.column,
            diag.level.name(),
            stage,
            diag.message,
        );
    }
}

/// A symbol table dump: one block per scope, in creation order, each entry
/// showing the bookkeeping an AST alone can't ([`initialized`]/[`used`]).
fn format_symbols(scopes: &ScopeTree) -> String {
    let mut out = String::new();
    for (id, scope) in scopes.all_scopes().enumerate() {
        out.push_str(&format!(
            "scope {id} (level {}, parent {:?}):\n",
            scope.scope_level, scope.parent
        ));
        for (name, entry) in &scope.entries {
            out.push_str(&format!(
                "  {}: {} initialized={} used={} at {}:{}\n",
                name.as_str(),
                entry.ty.as_str(),
                entry.initialized,
                entry.used,
                entry.line,
                entry.column,
            ));
        }
    }
    out
}

fn header(index: usize, total: usize) {
    if total > 1 {
        println!("=== program {index} ===");
    }
}

/// Handles every `--emit` variant for one compiled program. `bytes` is the
/// only variant that writes a file; everything else prints to stdout and
/// leaves the filesystem untouched.
pub fn emit(
    result: &ProgramResult,
    emit: EmitKind,
    output: &Option<PathBuf>,
    input_stem: &str,
    total_programs: usize,
) -> Result<(), DriverError> {
    match emit {
        EmitKind::Tokens => {
            header(result.index, total_programs);
            println!("{:#?}", result.tokens);
        }
        EmitKind::Cst => {
            header(result.index, total_programs);
            match &result.cst {
                Some(cst) => println!("{cst:#?}"),
                None => println!("(no CST — parsing failed)"),
            }
        }
        EmitKind::Ast => {
            header(result.index, total_programs);
            match &result.ast {
                Some(ast) => println!("{ast:#?}"),
                None => println!("(no AST — parsing failed)"),
            }
        }
        EmitKind::Symbols => {
            header(result.index, total_programs);
            match &result.scopes {
                Some(scopes) => print!("{}", format_symbols(scopes)),
                None => println!("(no symbol table — analysis did not run)"),
            }
        }
        EmitKind::Disasm | EmitKind::DisasmFull => {
            header(result.index, total_programs);
            match &result.image {
                Some(image) => {
                    let full = matches!(emit, EmitKind::DisasmFull);
                    print!("{}", Disassembler::new().disassemble(&image.to_bytes(), full));
                }
                None => println!("(no image — codegen did not run)"),
            }
        }
        EmitKind::Bytes => {
            if let Some(image) = &result.image {
                let path = bin_path(output, input_stem, result.index, total_programs);
                fs::write(&path, image.to_bytes())
                    .map_err(|e| DriverError::WriteFailed(path, e))?;
            }
        }
    }
    Ok(())
}

/// `<stem>.bin` for a single-program file, `<stem>.<index>.bin` once more
/// than one program shares the input. `-o`/`--output` overrides the stem
/// (and directory) but never the `.bin` extension or the index suffix.
fn bin_path(output: &Option<PathBuf>, input_stem: &str, index: usize, total: usize) -> PathBuf {
    let stem = output
        .as_ref()
        .and_then(|p| p.file_stem())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| input_stem.to_string());
    let dir = output
        .as_ref()
        .and_then(|p| p.parent())
        .filter(|p| !p.as_os_str().is_empty())
        .map(PathBuf::from)
        .unwrap_or_default();
    let name = if total > 1 {
        format!("{stem}.{index}.bin")
    } else {
        format!("{stem}.bin")
    };
    dir.join(name)
}
