/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::fs;
use vnscript::file_utils::FileManager;
use crate::common;

/// Test file and directory existence checks
#[test]
fn test_fileExists_withExistingAndMissingPaths_shouldReportCorrectly() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file_path = common::create_test_file(temp_dir.path(), "script.rpy", "label start:")?;

    assert!(FileManager::file_exists(&file_path));
    assert!(!FileManager::file_exists(temp_dir.path()));
    assert!(FileManager::dir_exists(temp_dir.path()));
    assert!(!FileManager::dir_exists(temp_dir.path().join("missing")));
    Ok(())
}

/// Test recursive script discovery
#[test]
fn test_collectScripts_withNestedDirectory_shouldReturnSortedScripts() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_test_file(root, "b.rpy", "")?;
    common::create_test_file(root, "a.rpy", "")?;
    common::create_test_file(root, "sub/c.RPY", "")?;
    common::create_test_file(root, "notes.txt", "")?;
    common::create_test_file(root, "a.rpyc", "")?;

    let found = FileManager::collect_scripts(root)?;
    let names: Vec<String> = found.iter().map(|p| FileManager::storage_path(root, p)).collect();
    assert_eq!(names, vec!["a.rpy", "b.rpy", "sub/c.RPY"]);
    Ok(())
}

/// Test single file and missing input
#[test]
fn test_collectScripts_withFileOrMissingPath_shouldHandleBoth() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file_path = common::create_test_file(temp_dir.path(), "notes.txt", "")?;

    // An explicit file is taken whatever its extension
    assert_eq!(FileManager::collect_scripts(&file_path)?, vec![file_path.clone()]);
    assert!(FileManager::collect_scripts(temp_dir.path().join("missing")).is_err());
    Ok(())
}

/// Test size and encoding checks when reading
#[test]
fn test_readScript_withLimitsAndBadBytes_shouldRejectThem() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file_path = common::create_sample_script(temp_dir.path(), "script.rpy")?;

    assert_eq!(FileManager::read_script(&file_path, 1 << 20)?, common::SAMPLE_SCRIPT);
    assert!(FileManager::read_script(&file_path, 10).is_err());

    let binary = temp_dir.path().join("binary.rpy");
    fs::write(&binary, [0xff, 0xfe, 0x00, 0x80])?;
    assert!(FileManager::read_script(&binary, 1 << 20).is_err());
    Ok(())
}

/// Test writing into a missing directory
#[test]
fn test_writeToFile_withMissingParent_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = temp_dir.path().join("out/tl/french/script.rpy");

    FileManager::write_to_file(&target, "content")?;
    assert_eq!(fs::read_to_string(&target)?, "content");
    Ok(())
}

/// Test relative storage paths
#[test]
fn test_storagePath_shouldBeRelativeWithForwardSlashes() {
    let root = std::path::Path::new("/game/tl");
    assert_eq!(FileManager::storage_path(root, root.join("french").join("script.rpy")), "french/script.rpy");
    assert_eq!(FileManager::storage_path("/game/tl/a.rpy", "/game/tl/a.rpy"), "a.rpy");
}
