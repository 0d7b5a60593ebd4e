//! Basic functionality integration tests for ctree CLI.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn make_tree(root: &std::path::Path) {
    fs::write(root.join("a"), "alpha").unwrap();
    fs::write(root.join("b"), "bravo").unwrap();
    fs::create_dir(root.join("c")).unwrap();
    fs::write(root.join("c/d"), "delta").unwrap();
}

#[test]
fn test_copy_tree() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();
    make_tree(src.path());

    let mut cmd = cargo_bin_cmd!("ctree");
    cmd.arg(src.path())
        .arg(dst.path().join("copied"))
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(dst.path().join("copied/a")).unwrap(),
        "alpha"
    );
    assert_eq!(
        fs::read_to_string(dst.path().join("copied/b")).unwrap(),
        "bravo"
    );
    assert_eq!(
        fs::read_to_string(dst.path().join("copied/c/d")).unwrap(),
        "delta"
    );
}

#[test]
fn test_copy_empty_tree() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("ctree");
    cmd.arg(src.path())
        .arg(dst.path().join("empty"))
        .assert()
        .success();

    let target = dst.path().join("empty");
    assert!(target.is_dir());
    assert_eq!(fs::read_dir(&target).unwrap().count(), 0);
}

#[test]
fn test_copy_single_file_into_directory() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();
    fs::write(src.path().join("note.txt"), "hello world").unwrap();

    let mut cmd = cargo_bin_cmd!("ctree");
    cmd.arg(src.path().join("note.txt"))
        .arg(dst.path())
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(dst.path().join("note.txt")).unwrap(),
        "hello world"
    );
}

#[test]
fn test_ignore_patterns() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();
    make_tree(src.path());
    fs::write(src.path().join("build.o"), "obj").unwrap();
    fs::write(src.path().join("c/nested.o"), "obj").unwrap();

    let mut cmd = cargo_bin_cmd!("ctree");
    cmd.arg(src.path())
        .arg(dst.path().join("copied"))
        .args(["--ignore", "*.o", "--ignore", "a"])
        .assert()
        .success();

    let copied = dst.path().join("copied");
    assert!(!copied.join("a").exists());
    assert!(!copied.join("build.o").exists());
    assert!(!copied.join("c/nested.o").exists());
    assert!(copied.join("b").exists());
    assert!(copied.join("c/d").exists());
}

#[test]
fn test_copy_preserves_mtime() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();
    make_tree(src.path());

    let mut cmd = cargo_bin_cmd!("ctree");
    cmd.arg(src.path())
        .arg(dst.path().join("copied"))
        .assert()
        .success();

    let src_mtime = fs::metadata(src.path().join("a"))
        .unwrap()
        .modified()
        .unwrap();
    let dst_mtime = fs::metadata(dst.path().join("copied/a"))
        .unwrap()
        .modified()
        .unwrap();
    assert_eq!(src_mtime, dst_mtime);
}

#[test]
fn test_verbose_logs_directories() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();
    make_tree(src.path());

    let mut cmd = cargo_bin_cmd!("ctree");
    cmd.arg("-v")
        .arg(src.path())
        .arg(dst.path().join("copied"))
        .assert()
        .success()
        .stderr(predicate::str::contains("copying directory"));
}

#[test]
fn test_remove_tree() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("tree");
    fs::create_dir(&root).unwrap();
    make_tree(&root);

    let mut cmd = cargo_bin_cmd!("ctree");
    cmd.arg("--remove").arg(&root).assert().success();

    assert!(!root.exists());
    assert!(dir.path().exists());
}

#[test]
fn test_help() {
    let mut cmd = cargo_bin_cmd!("ctree");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--ignore"))
        .stdout(predicate::str::contains("--remove"));
}
