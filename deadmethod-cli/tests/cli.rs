//! Integration tests for the `deadmethod` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn deadmethod_cmd() -> Command {
    let mut cmd = Command::cargo_bin("deadmethod").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Project with a default tsconfig.json and an empty `src`.
fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "tsconfig.json", "{}");
    fs::create_dir_all(temp.path().join("src")).unwrap();
    temp
}

fn display(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[test]
fn test_missing_path_prints_usage() {
    deadmethod_cmd()
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Usage: deadmethod"));
}

#[test]
fn test_unused_method_reported() {
    let temp = project();
    write_file(temp.path(), "src/foo.ts", "export class Foo {\n  bar() {}\n}\n");

    let expected = format!(
        "Potentially unused methods:\n- Foo.bar in {}:2\n",
        display(&temp.path().join("src/foo.ts"))
    );

    deadmethod_cmd()
        .arg(temp.path())
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn test_used_method_not_reported() {
    let temp = project();
    write_file(temp.path(), "src/foo.ts", "export class Foo {\n  bar() {}\n}\n");
    write_file(
        temp.path(),
        "src/main.ts",
        "import { Foo } from './foo';\nnew Foo().bar();\n",
    );

    deadmethod_cmd()
        .arg(temp.path())
        .assert()
        .success()
        .stdout("No unused methods found.\n");
}

#[test]
fn test_private_method_not_reported() {
    let temp = project();
    write_file(temp.path(), "src/foo.ts", "export class Foo {\n  private baz() {}\n}\n");

    deadmethod_cmd()
        .arg(temp.path())
        .assert()
        .success()
        .stdout("No unused methods found.\n");
}

#[test]
fn test_source_dir_argument() {
    let temp = project();
    write_file(temp.path(), "src/foo.ts", "export class Foo {\n  bar() {}\n}\n");

    deadmethod_cmd()
        .arg(temp.path().join("src"))
        .assert()
        .success()
        .stdout(predicate::str::contains("- Foo.bar in "));
}

#[test]
fn test_missing_manifest_fails() {
    let temp = TempDir::new().unwrap();
    let nested = temp.path().join("nested");
    fs::create_dir_all(&nested).unwrap();

    deadmethod_cmd()
        .arg(&nested)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Could not find tsconfig.json in"));
}

#[test]
fn test_missing_source_dir_fails() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "tsconfig.json", "{}");

    deadmethod_cmd()
        .arg(temp.path())
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Source directory does not exist"));
}

#[test]
fn test_empty_project() {
    let temp = project();

    deadmethod_cmd()
        .arg(temp.path())
        .assert()
        .success()
        .stdout("No unused methods found.\n");
}

#[test]
fn test_exclude_flag() {
    let temp = project();
    write_file(temp.path(), "src/foo.spec.ts", "export class FooSpec {\n  check() {}\n}\n");

    deadmethod_cmd()
        .arg(temp.path())
        .args(["--exclude", "**/*.spec.ts"])
        .assert()
        .success()
        .stdout("No unused methods found.\n");
}

#[test]
fn test_parse_error_fails_without_partial_output() {
    let temp = project();
    write_file(temp.path(), "src/ok.ts", "export class Ok {\n  run() {}\n}\n");
    write_file(temp.path(), "src/broken.ts", "export class {\n");

    deadmethod_cmd()
        .arg(temp.path())
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Parse error in"));
}

#[test]
fn test_keep_going_reports_remaining_files() {
    let temp = project();
    write_file(temp.path(), "src/ok.ts", "export class Ok {\n  run() {}\n}\n");
    write_file(temp.path(), "src/broken.ts", "export class {\n");

    deadmethod_cmd()
        .arg(temp.path())
        .arg("--keep-going")
        .assert()
        .success()
        .stdout(predicate::str::contains("- Ok.run in "));
}
