//! Error handling integration tests for ctree CLI.
//!
//! Failures are logged on stderr and the process exits with status 1.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_missing_source_fails() {
    let dst = TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("ctree");
    cmd.arg(dst.path().join("does-not-exist"))
        .arg(dst.path().join("out"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to copy"));

    assert!(!dst.path().join("out").exists());
}

#[test]
fn test_missing_destination_is_usage_error() {
    let src = TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("ctree");
    cmd.arg(src.path()).assert().failure().code(2);
}

#[test]
fn test_invalid_pattern_fails() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("ctree");
    cmd.arg(src.path())
        .arg(dst.path().join("out"))
        .args(["--ignore", "[unclosed"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid ignore pattern"));
}

#[test]
fn test_same_file_fails() {
    let src = TempDir::new().unwrap();
    let file = src.path().join("same.txt");
    fs::write(&file, "keep me").unwrap();

    let mut cmd = cargo_bin_cmd!("ctree");
    cmd.arg(&file)
        .arg(&file)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("are the same file"));

    assert_eq!(fs::read_to_string(&file).unwrap(), "keep me");
}

#[cfg(target_os = "linux")]
#[test]
fn test_fifo_in_tree_is_reported() {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();
    fs::write(src.path().join("regular.txt"), "data").unwrap();

    let fifo = src.path().join("pipe");
    let c_path = CString::new(fifo.as_os_str().as_bytes()).unwrap();
    // SAFETY: c_path is a valid NUL-terminated path
    let rc = unsafe { libc::mkfifo(c_path.as_ptr(), 0o644) };
    assert_eq!(rc, 0);

    let mut cmd = cargo_bin_cmd!("ctree");
    cmd.arg(src.path())
        .arg(dst.path().join("out"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is a named pipe"))
        .stderr(predicate::str::contains("Failed to copy 1 entries"));

    // The rest of the tree is still copied
    assert_eq!(
        fs::read_to_string(dst.path().join("out/regular.txt")).unwrap(),
        "data"
    );
    assert!(!dst.path().join("out/pipe").exists());
}

#[test]
fn test_remove_missing_path_fails() {
    let dir = TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("ctree");
    cmd.arg("--remove")
        .arg(dir.path().join("missing"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("lstat failed"));
}

#[test]
fn test_remove_missing_path_ignore_errors() {
    let dir = TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("ctree");
    cmd.arg("--remove")
        .arg("--ignore-errors")
        .arg(dir.path().join("missing"))
        .assert()
        .success();
}

#[test]
fn test_ignore_errors_requires_remove() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("ctree");
    cmd.arg("--ignore-errors")
        .arg(src.path())
        .arg(dst.path().join("out"))
        .assert()
        .failure()
        .code(2);
}
