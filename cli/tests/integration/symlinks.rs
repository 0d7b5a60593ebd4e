//! Symlink handling integration tests for ctree CLI.
//!
//! - Default behavior: follow symlinks and copy what they point to
//! - -s/--symlinks: recreate symlinks
//! - Dangling symlinks fail unless --ignore-dangling-symlinks is given

#[cfg(unix)]
mod unix_tests {
    use assert_cmd::cargo::cargo_bin_cmd;
    use predicates::prelude::*;
    use std::fs;
    use std::os::unix::fs::symlink;
    use tempfile::TempDir;

    #[test]
    fn test_symlink_followed_by_default() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();

        fs::write(src.path().join("target.txt"), "target content").unwrap();
        symlink("target.txt", src.path().join("link")).unwrap();

        let mut cmd = cargo_bin_cmd!("ctree");
        cmd.arg(src.path())
            .arg(dst.path().join("copied"))
            .assert()
            .success();

        let link_path = dst.path().join("copied/link");
        let metadata = fs::symlink_metadata(&link_path).unwrap();
        assert!(metadata.file_type().is_file(), "Should be a regular file");
        assert_eq!(fs::read_to_string(&link_path).unwrap(), "target content");
    }

    #[test]
    fn test_symlink_recreated_with_flag() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();

        fs::write(src.path().join("target.txt"), "target content").unwrap();
        symlink("target.txt", src.path().join("link")).unwrap();

        let mut cmd = cargo_bin_cmd!("ctree");
        cmd.arg("--symlinks")
            .arg(src.path())
            .arg(dst.path().join("copied"))
            .assert()
            .success();

        let link_path = dst.path().join("copied/link");
        let metadata = fs::symlink_metadata(&link_path).unwrap();
        assert!(metadata.file_type().is_symlink(), "Should be a symlink");
        assert_eq!(
            fs::read_link(&link_path).unwrap(),
            std::path::PathBuf::from("target.txt")
        );
    }

    #[test]
    fn test_dangling_symlink_fails() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();

        fs::write(src.path().join("file.txt"), "content").unwrap();
        symlink("nowhere", src.path().join("dangling")).unwrap();

        let mut cmd = cargo_bin_cmd!("ctree");
        cmd.arg(src.path())
            .arg(dst.path().join("copied"))
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Dangling symlink"));

        assert!(dst.path().join("copied/file.txt").exists());
    }

    #[test]
    fn test_dangling_symlink_skipped() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();

        fs::write(src.path().join("file.txt"), "content").unwrap();
        symlink("nowhere", src.path().join("dangling")).unwrap();

        let mut cmd = cargo_bin_cmd!("ctree");
        cmd.arg("--ignore-dangling-symlinks")
            .arg(src.path())
            .arg(dst.path().join("copied"))
            .assert()
            .success()
            .stderr(predicate::str::contains("Skipping dangling symlink"));

        assert!(dst.path().join("copied/file.txt").exists());
        assert!(fs::symlink_metadata(dst.path().join("copied/dangling")).is_err());
    }

    #[test]
    fn test_dangling_symlink_recreated_with_flag() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();

        symlink("nowhere", src.path().join("dangling")).unwrap();

        let mut cmd = cargo_bin_cmd!("ctree");
        cmd.arg("--symlinks")
            .arg(src.path())
            .arg(dst.path().join("copied"))
            .assert()
            .success();

        let meta = fs::symlink_metadata(dst.path().join("copied/dangling")).unwrap();
        assert!(meta.file_type().is_symlink());
    }

    #[test]
    fn test_symlink_loop_reported() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();

        fs::create_dir(src.path().join("sub")).unwrap();
        symlink("..", src.path().join("sub/up")).unwrap();

        let mut cmd = cargo_bin_cmd!("ctree");
        cmd.arg(src.path())
            .arg(dst.path().join("copied"))
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Symlink loop detected"));

        assert!(dst.path().join("copied/sub").is_dir());
    }

    #[test]
    fn test_remove_does_not_follow_symlinks() {
        let dir = TempDir::new().unwrap();
        let outside = dir.path().join("outside");
        fs::create_dir(&outside).unwrap();
        fs::write(outside.join("keep.txt"), "keep").unwrap();

        let root = dir.path().join("tree");
        fs::create_dir(&root).unwrap();
        symlink(&outside, root.join("link")).unwrap();

        let mut cmd = cargo_bin_cmd!("ctree");
        cmd.arg("--remove").arg(&root).assert().success();

        assert!(!root.exists());
        assert_eq!(fs::read_to_string(outside.join("keep.txt")).unwrap(), "keep");
    }
}
