//! End-to-end tests driving the `alanppc` binary itself, via `assert_cmd`.
use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn alanppc() -> Command {
    Command::cargo_bin("alanppc").expect("alanppc binary should build")
}

fn write_source(dir: &std::path::Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn hello_world_compiles_to_a_bin_file_with_exit_code_zero() {
    let dir = tempdir().unwrap();
    let src = write_source(dir.path(), "hello.app", "{print(\"hello\")}$");

    alanppc()
        .current_dir(dir.path())
        .args(["compile", src.to_str().unwrap()])
        .assert()
        .success();

    let bytes = fs::read(dir.path().join("hello.bin")).expect("hello.bin should exist");
    assert!(bytes.contains(&0xFFu8), "image should contain a SYS byte");
    assert!(bytes.contains(&0x00u8), "image should contain a BRK byte");
}

#[test]
fn arithmetic_assignment_compiles_cleanly() {
    let dir = tempdir().unwrap();
    let src = write_source(dir.path(), "sum.app", "{int a a=1+2 print(a)}$");

    alanppc()
        .current_dir(dir.path())
        .args(["compile", src.to_str().unwrap()])
        .assert()
        .success();

    assert!(dir.path().join("sum.bin").exists());
}

#[test]
fn a_type_mismatch_reports_a_semantic_error_and_exits_nonzero() {
    let dir = tempdir().unwrap();
    let src = write_source(dir.path(), "bad.app", "{int a a=\"no\"}$");

    alanppc()
        .current_dir(dir.path())
        .args(["compile", src.to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("semantic"));

    assert!(!dir.path().join("bad.bin").exists());
}

#[test]
fn an_undeclared_variable_reports_a_semantic_error() {
    let dir = tempdir().unwrap();
    let src = write_source(dir.path(), "undeclared.app", "{print(y)}$");

    alanppc()
        .current_dir(dir.path())
        .args(["compile", src.to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not declared"));
}

#[test]
fn a_missing_end_of_program_marker_reports_a_parse_error() {
    let dir = tempdir().unwrap();
    let src = write_source(dir.path(), "noeop.app", "{int a}");

    alanppc()
        .current_dir(dir.path())
        .args(["compile", src.to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("parser"));
}

#[test]
fn a_multi_program_file_writes_one_bin_per_program_and_indexes_them() {
    let dir = tempdir().unwrap();
    let src = write_source(
        dir.path(),
        "two.app",
        "{print(\"a\")}$\n{print(\"b\")}$",
    );

    alanppc()
        .current_dir(dir.path())
        .args(["compile", src.to_str().unwrap()])
        .assert()
        .success();

    assert!(dir.path().join("two.0.bin").exists());
    assert!(dir.path().join("two.1.bin").exists());
    assert!(!dir.path().join("two.bin").exists());
}

#[test]
fn a_failure_in_one_program_does_not_block_the_next() {
    let dir = tempdir().unwrap();
    let src = write_source(
        dir.path(),
        "mixed.app",
        "{print(y)}$\n{print(\"ok\")}$",
    );

    alanppc()
        .current_dir(dir.path())
        .args(["compile", src.to_str().unwrap()])
        .assert()
        .code(1);

    assert!(!dir.path().join("mixed.0.bin").exists());
    assert!(dir.path().join("mixed.1.bin").exists());
}

#[test]
fn emit_disasm_prints_mnemonics_instead_of_writing_a_file() {
    let dir = tempdir().unwrap();
    let src = write_source(dir.path(), "disasm.app", "{print(\"hi\")}$");

    alanppc()
        .current_dir(dir.path())
        .args(["compile", "--emit", "disasm", src.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("BRK"));

    assert!(!dir.path().join("disasm.bin").exists());
}

#[test]
fn emit_symbols_shows_shadowed_entries_at_different_scope_levels() {
    let dir = tempdir().unwrap();
    let src = write_source(
        dir.path(),
        "shadow.app",
        "{int x x=1{string x x=\"hi\"print(x)}print(x)}$",
    );

    alanppc()
        .current_dir(dir.path())
        .args(["compile", "--emit", "symbols", src.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("level 0")
                .and(predicate::str::contains("level 1"))
                .and(predicate::str::contains("initialized=true")),
        );
}

#[test]
fn missing_input_files_is_a_driver_level_failure_not_a_diagnostic() {
    alanppc()
        .args(["compile"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no input files"));
}
