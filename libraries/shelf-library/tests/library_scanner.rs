
use shelf_library::{EngineConfig, FileScanner, LibraryError};
use std::fs;
use tempfile::TempDir;
use test_helpers::init_tracing;

#[test]
fn finds_audiobooks_recursively_and_case_insensitively() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("Ann/Saga")).unwrap();
    fs::write(root.join("Ann/Saga/01.m4b"), b"").unwrap();
    fs::write(root.join("Ann/Saga/02.M4B"), b"").unwrap();
    fs::write(root.join("Ann/solo.m4a"), b"").unwrap();
    fs::write(root.join("Ann/cover.jpg"), b"").unwrap();
    fs::write(root.join("Ann/Saga/metadata.json"), b"{}").unwrap();
    fs::write(root.join("track.mp3"), b"").unwrap();

    let files = FileScanner::new(EngineConfig::default())
        .scan_directory(root)
        .unwrap();

    assert_eq!(files.len(), 3);
    assert!(files.contains(&root.join("Ann/Saga/01.m4b")));
    assert!(files.contains(&root.join("Ann/Saga/02.M4B")));
    assert!(files.contains(&root.join("Ann/solo.m4a")));
}

#[test]
fn custom_extensions_are_honoured() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.m4b"), b"").unwrap();
    fs::write(dir.path().join("b.aax"), b"").unwrap();

    let config = EngineConfig {
        extensions: vec!["aax".to_string()],
        ..EngineConfig::default()
    };
    let files = FileScanner::new(config).scan_directory(dir.path()).unwrap();

    assert_eq!(files, vec![dir.path().join("b.aax")]);
}

#[test]
fn empty_root_yields_no_files() {
    let dir = TempDir::new().unwrap();
    let files = FileScanner::new(EngineConfig::default())
        .scan_directory(dir.path())
        .unwrap();
    assert!(files.is_empty());
}

#[test]
fn missing_root_is_a_structural_failure() {
    let dir = TempDir::new().unwrap();
    let result =
        FileScanner::new(EngineConfig::default()).scan_directory(&dir.path().join("gone"));
    assert!(matches!(result, Err(LibraryError::RootNotFound(_))));
}

#[test]
fn file_root_is_not_a_directory() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("book.m4b");
    fs::write(&file, b"").unwrap();

    let result = FileScanner::new(EngineConfig::default()).scan_directory(&file);
    assert!(matches!(result, Err(LibraryError::NotADirectory(_))));
}

#[cfg(unix)]
#[test]
fn unreadable_root_fails_the_scan() {
    use std::os::unix::fs::PermissionsExt;

    init_tracing();
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("library");
    fs::create_dir_all(root.join("sub")).unwrap();
    fs::write(root.join("sub/a.m4b"), b"").unwrap();
    fs::set_permissions(&root, fs::Permissions::from_mode(0o000)).unwrap();

    // Permission bits do not bind a privileged user
    if fs::read_dir(&root).is_ok() {
        fs::set_permissions(&root, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let result = FileScanner::new(EngineConfig::default()).scan_directory(&root);
    fs::set_permissions(&root, fs::Permissions::from_mode(0o755)).unwrap();

    assert!(matches!(result, Err(LibraryError::RootUnreadable { .. })));
}

#[cfg(unix)]
#[test]
fn unreadable_subdirectory_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("locked")).unwrap();
    fs::write(root.join("locked/hidden.m4b"), b"").unwrap();
    fs::write(root.join("open.m4b"), b"").unwrap();
    fs::set_permissions(root.join("locked"), fs::Permissions::from_mode(0o000)).unwrap();

    let result = FileScanner::new(EngineConfig::default()).scan_directory(root);
    fs::set_permissions(root.join("locked"), fs::Permissions::from_mode(0o755)).unwrap();

    let files = result.unwrap();
    assert!(files.contains(&root.join("open.m4b")));
}
