/*!
 * Tests for file utility functions
 */

use std::fs;
use std::path::Path;
use anyhow::Result;
use captext::file_utils::FileManager;
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    // Create a temporary test file
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(&temp_dir.path().to_path_buf(), "test_file_exists.tmp", "test content")?;

    // Test that file_exists works correctly
    assert!(FileManager::file_exists(test_file.to_str().unwrap()));

    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

/// Test that dir_exists returns true for existing directories
#[test]
fn test_dir_exists_withExistingDir_shouldReturnTrue() -> Result<()> {
    // Use the current directory which definitely exists
    let current_dir = ".";

    // Test that dir_exists works correctly
    assert!(FileManager::dir_exists(current_dir));

    Ok(())
}

/// Test that dir_exists returns false for non-existent directories
#[test]
fn test_dir_exists_withNonExistentDir_shouldReturnFalse() {
    assert!(!FileManager::dir_exists("./non_existent_directory_12345"));
}

/// Test that ensure_dir creates directories as needed
#[test]
fn test_ensure_dir_withNonExistentDir_shouldCreateDirectory() -> Result<()> {
    // Create a temporary directory for testing
    let temp_dir = common::create_temp_dir()?;
    let test_subdir = temp_dir.path().join("test_subdir");

    // Ensure the subdirectory exists (should create it)
    FileManager::ensure_dir(test_subdir.to_str().unwrap())?;

    // Verify the directory was created
    assert!(test_subdir.exists());
    assert!(test_subdir.is_dir());

    Ok(())
}

/// Test that read_to_string returns file content correctly
#[test]
fn test_read_to_string_withValidFile_shouldReturnContent() -> Result<()> {
    // Create a temporary test file
    let temp_dir = common::create_temp_dir()?;
    let content = "Hello, World!";
    let test_file = common::create_test_file(&temp_dir.path().to_path_buf(), "test_read_file.tmp", content)?;

    // Test read_to_string
    let read_content = FileManager::read_to_string(test_file.to_str().unwrap())?;
    assert_eq!(read_content, content);

    Ok(())
}

/// Test that write_to_file creates file with content correctly
#[test]
fn test_write_to_file_withValidInput_shouldCreateFileWithContent() -> Result<()> {
    // Create a temporary directory for testing
    let temp_dir = common::create_temp_dir()?;
    let test_file = temp_dir.path().join("test_write_file.tmp");
    let content = "Test write content";

    // Test write_to_file
    FileManager::write_to_file(test_file.to_str().unwrap(), content)?;

    // Verify file was created with correct content
    assert!(test_file.exists());
    let read_content = fs::read_to_string(&test_file)?;
    assert_eq!(read_content, content);

    Ok(())
}

/// Test that write_to_file creates missing parent directories
#[test]
fn test_write_to_file_withMissingParentDir_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested_file = temp_dir.path().join("transcripts").join("out.txt");

    FileManager::write_to_file(nested_file.to_str().unwrap(), "nested")?;

    assert!(nested_file.exists());

    Ok(())
}

/// Test video title sanitization for filename use
#[test]
fn test_sanitize_title_withSpecialCharacters_shouldReplaceThem() {
    assert_eq!(FileManager::sanitize_title("Plain Title"), "Plain Title");
    assert_eq!(FileManager::sanitize_title("What?! A: Video/Title"), "What__ A_ Video_Title");
    assert_eq!(FileManager::sanitize_title("snake_case-kept"), "snake_case-kept");
    assert_eq!(FileManager::sanitize_title("  padded  "), "padded");
}

/// Test that transcript_output_path builds the expected filename
#[test]
fn test_transcript_output_path_withValidInputs_shouldCreateCorrectPath() {
    let output_path = FileManager::transcript_output_path("/tmp/output", "My Video", "en");

    assert_eq!(output_path, Path::new("/tmp/output/transcript_My Video_en.txt"));
}

/// Test that overly long titles are capped in the output filename
#[test]
fn test_transcript_output_path_withLongTitle_shouldTruncateTitle() {
    let long_title = "x".repeat(80);
    let output_path = FileManager::transcript_output_path(".", &long_title, "en");

    let file_name = output_path.file_name().unwrap().to_str().unwrap();
    let expected = format!("transcript_{}_en.txt", "x".repeat(50));
    assert_eq!(file_name, expected);
}

/// Test locating a caption file by its exact language component
#[test]
fn test_find_caption_file_withExactLanguageMarker_shouldFindIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_test_file(&dir, "captions.en.ttml", "data")?;
    common::create_test_file(&dir, "unrelated.txt", "noise")?;

    let found = FileManager::find_caption_file(&dir, "captions", "en")?;
    assert_eq!(found.unwrap().file_name().unwrap(), "captions.en.ttml");

    Ok(())
}

/// Test locating an auto-generated caption file
#[test]
fn test_find_caption_file_withAutoMarker_shouldFindIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_test_file(&dir, "captions.en-auto.vtt", "data")?;

    let found = FileManager::find_caption_file(&dir, "captions", "en")?;
    assert_eq!(found.unwrap().file_name().unwrap(), "captions.en-auto.vtt");

    Ok(())
}

/// Test the loose second pass catching regional variants
#[test]
fn test_find_caption_file_withRegionalVariant_shouldFallBackToLooseMatch() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_test_file(&dir, "captions.pt-BR.ttml", "data")?;

    // No exact ".pt." component, but the name mentions the language
    let found = FileManager::find_caption_file(&dir, "captions", "pt")?;
    assert_eq!(found.unwrap().file_name().unwrap(), "captions.pt-BR.ttml");

    Ok(())
}

/// Test that files not matching the stem are never picked up
#[test]
fn test_find_caption_file_withWrongStem_shouldReturnNone() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_test_file(&dir, "other.en.ttml", "data")?;

    let found = FileManager::find_caption_file(&dir, "captions", "en")?;
    assert!(found.is_none());

    Ok(())
}

/// Test searching an empty workspace directory
#[test]
fn test_find_caption_file_withEmptyDir_shouldReturnNone() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let found = FileManager::find_caption_file(temp_dir.path(), "captions", "en")?;
    assert!(found.is_none());

    Ok(())
}
