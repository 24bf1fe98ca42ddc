/*!
 * Common test utilities for the captext test suite
 */

use std::path::PathBuf;
use std::fs;
use anyhow::Result;
use tempfile::TempDir;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Sample TTML caption document with inline markup, a duplicate paragraph
/// and an escaped ampersand
pub fn sample_ttml() -> &'static str {
    r#"<?xml version="1.0" encoding="utf-8"?>
<tt xmlns="http://www.w3.org/ns/ttml" xml:lang="en">
  <body>
    <div>
      <p begin="00:00:00.500" end="00:00:02.000">Hello <span style="s1">world</span></p>
      <p begin="00:00:02.000" end="00:00:04.000">Hello world</p>
      <p begin="00:00:04.000" end="00:00:06.000">Fish &amp; chips</p>
    </div>
  </body>
</tt>
"#
}

/// Sample WebVTT caption document with the rolling duplicates auto-generated
/// captions produce
pub fn sample_vtt() -> &'static str {
    "WEBVTT\nKind: captions\n\n00:00:00.500 --> 00:00:02.000\nHello world\n\n00:00:02.000 --> 00:00:04.000\nHello world\n\n00:00:04.000 --> 00:00:06.000\n<c.colorE5E5E5>Second line</c>\n"
}

/// Sample SubRip caption document with a numbered duplicate cue
pub fn sample_srt() -> &'static str {
    "1\n00:00:00,500 --> 00:00:02,000\nHello world\n\n2\n00:00:02,000 --> 00:00:04,000\nHello world\n\n3\n00:00:04,000 --> 00:00:06,000\n<i>Second line</i>\n"
}

/// Sample TTML document cut off mid-paragraph, as a dropped connection
/// leaves it
pub fn truncated_ttml() -> &'static str {
    r#"<?xml version="1.0" encoding="utf-8"?>
<tt xmlns="http://www.w3.org/ns/ttml">
  <body>
    <div>
      <p begin="00:00:00.500" end="00:00:02.000">First caption</p>
      <p begin="00:00:02.000" end="00:00:04.000">Second capt"#
}
