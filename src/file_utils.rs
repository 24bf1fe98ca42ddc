use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Make a video title safe for use in a filename
    ///
    /// Alphanumeric characters, spaces, underscores and hyphens pass through;
    /// everything else becomes an underscore. Leading and trailing whitespace
    /// is dropped.
    pub fn sanitize_title(title: &str) -> String {
        title
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || matches!(c, ' ' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect::<String>()
            .trim()
            .to_string()
    }

    // @generates: Output path for a transcript file
    // @params: output_dir, video title, language tag
    pub fn transcript_output_path<P: AsRef<Path>>(
        output_dir: P,
        title: &str,
        language: &str,
    ) -> PathBuf {
        // Sanitized title capped at 50 characters
        let safe_title: String = Self::sanitize_title(title).chars().take(50).collect();

        output_dir
            .as_ref()
            .join(format!("transcript_{}_{}.txt", safe_title, language))
    }

    /// Locate the caption file yt-dlp wrote into a workspace directory
    ///
    /// yt-dlp names caption files `<stem>.<lang>.<ext>`, sometimes with an
    /// `-auto` marker for generated tracks. The first pass requires an exact
    /// language component; the second pass accepts any filename mentioning
    /// the language, which catches regional variants like `pt-BR` when bare
    /// `pt` was requested.
    pub fn find_caption_file<P: AsRef<Path>>(
        dir: P,
        stem: &str,
        language: &str,
    ) -> Result<Option<PathBuf>> {
        let mut candidates = Vec::new();
        for entry in WalkDir::new(dir.as_ref()).max_depth(1).sort_by_file_name() {
            let entry = entry.context("Failed to read directory entry")?;
            if entry.path().is_file() {
                candidates.push(entry.path().to_path_buf());
            }
        }

        let exact_markers = [format!(".{}.", language), format!(".{}-auto.", language)];
        for path in &candidates {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name.starts_with(stem)
                    && exact_markers.iter().any(|marker| name.contains(marker.as_str()))
                {
                    return Ok(Some(path.clone()));
                }
            }
        }

        for path in &candidates {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name.starts_with(stem) && name.contains(language) {
                    return Ok(Some(path.clone()));
                }
            }
        }

        Ok(None)
    }
}
