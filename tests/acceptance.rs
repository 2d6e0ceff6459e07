//! End-to-end checks that change the process working directory.
//! Kept to a single test so nothing else in this binary races on the cwd.

use hostfs_kit::{Result, directory, file, path};
use std::fs;
use tempdir::TempDir;

fn setup_test_env() -> TempDir {
    TempDir::new("acceptance_test").unwrap()
}

#[test]
fn test_directory_round_trip_through_current_directory() -> Result<()> {
    let temp_dir = setup_test_env();
    let start = path::current_directory();
    assert!(!start.is_empty());

    assert!(path::set_current_directory(temp_dir.path()));
    let root = path::current_directory();

    assert!(directory::create("testdir", false));
    assert!(path::set_current_directory("testdir"));
    let inside = path::current_directory();
    assert_eq!(path::name(&inside), "testdir");

    assert!(directory::create("testdir2", false));
    fs::write("note.txt", b"hello")?;
    assert_eq!(file::size("note.txt"), 5);
    assert_eq!(directory::get_directories(".", None, false).len(), 1);

    // Relative names resolve against the current directory.
    assert_eq!(path::absolute("note.txt"), format!("{inside}{}note.txt", path::DELIMITER));
    assert_eq!(path::parent("."), root);

    assert!(path::set_current_directory(path::parent(".")));
    assert_eq!(path::current_directory(), root);
    assert!(directory::delete(path::name(&inside)));
    assert!(!directory::exists("testdir"));

    assert!(!path::set_current_directory("testdir"));
    assert_eq!(path::current_directory(), root);

    assert!(path::set_current_directory(&start));
    assert_eq!(path::current_directory(), start);

    Ok(())
}

#[test]
fn test_path_text_helpers() {
    assert_eq!(path::set_extension(r"C:\Test.txt", "a"), r"C:\Test.a");
    assert_eq!(path::set_extension(r"C:\Test.txt", ".a"), r"C:\Test.a");
    assert_eq!(path::extension(r"C:\autoexec.bat"), ".bat");
    assert!(path::is_relative("a"));
    assert!(path::is_relative("a/b"));

    #[cfg(windows)]
    assert!(path::is_absolute(r"C:\a"));
    #[cfg(not(windows))]
    assert!(path::is_absolute("/a"));
}
