use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Caption language tag to request (ISO 639 code, optionally with a
    /// region subtag like "pt-BR")
    pub language: String,

    /// Directory transcripts are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Download config
    pub download: DownloadConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Configuration for the yt-dlp caption download step
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DownloadConfig {
    // @field: yt-dlp binary name or full path
    #[serde(default = "default_ytdlp_path")]
    pub ytdlp_path: String,

    // @field: Preferred caption container format requested from the platform
    #[serde(default = "default_subtitle_format")]
    pub subtitle_format: String,

    // @field: Whether auto-generated (speech recognition) tracks count
    #[serde(default = "default_true")]
    pub include_auto_captions: bool,

    // @field: Subprocess timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            ytdlp_path: default_ytdlp_path(),
            subtitle_format: default_subtitle_format(),
            include_auto_captions: default_true(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Information about an available caption track
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptionTrack {
    /// The language tag the platform keys this track by (e.g. "en", "pt-BR")
    pub language: String,
    /// Container formats the track can be served in
    pub formats: Vec<String>,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_ytdlp_path() -> String {
    "yt-dlp".to_string()
}

fn default_subtitle_format() -> String {
    // TTML preserves the full caption text, which the extractor handles best
    "ttml".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    120
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate the requested caption language
        let _language_name = crate::language_utils::get_language_name(&self.language)?;

        if self.download.ytdlp_path.trim().is_empty() {
            return Err(anyhow!("yt-dlp path must not be empty"));
        }

        let format = self.download.subtitle_format.to_lowercase();
        if !matches!(format.as_str(), "ttml" | "vtt" | "srt" | "best") {
            return Err(anyhow!(
                "Unsupported caption format '{}', expected one of: ttml, vtt, srt, best",
                self.download.subtitle_format
            ));
        }

        if self.download.timeout_secs == 0 {
            return Err(anyhow!("Download timeout must be at least 1 second"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            language: "en".to_string(),
            output_dir: default_output_dir(),
            download: DownloadConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
