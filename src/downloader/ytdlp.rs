/*!
 * yt-dlp backed caption source.
 *
 * Uses the yt-dlp command line tool for both steps of caption acquisition:
 * a JSON metadata probe (`-J`) that lists the available tracks, and a
 * subtitle-only download that writes the chosen track into a workspace
 * directory.
 */

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use serde_json::Value;
use tokio::process::Command;

use crate::app_config::{CaptionTrack, DownloadConfig};
use crate::downloader::{CaptionSource, FetchRequest, VideoMetadata};
use crate::errors::DownloadError;
use crate::file_utils::FileManager;

/// Filename stem yt-dlp writes caption files under; the language and
/// extension get appended by the tool (`captions.en.ttml`)
pub const CAPTION_FILE_STEM: &str = "captions";

/// Caption source backed by the yt-dlp command line tool
#[derive(Debug, Clone)]
pub struct YtDlpSource {
    // @field: yt-dlp binary name or full path
    binary: String,

    // @field: Subprocess timeout
    timeout: Duration,
}

impl YtDlpSource {
    /// Create a source from the download section of the configuration
    pub fn new(config: &DownloadConfig) -> Self {
        YtDlpSource {
            binary: config.ytdlp_path.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Arguments for the metadata probe call
    pub fn probe_args(url: &str) -> Vec<String> {
        vec![
            "-J".to_string(),
            "--skip-download".to_string(),
            "--no-warnings".to_string(),
            url.to_string(),
        ]
    }

    /// Arguments for the caption download call
    pub fn fetch_args(request: &FetchRequest) -> Vec<String> {
        let mut args = vec![
            "--skip-download".to_string(),
            "--write-subs".to_string(),
        ];

        if request.include_auto {
            args.push("--write-auto-subs".to_string());
        }

        args.push("--sub-langs".to_string());
        args.push(request.language.clone());
        args.push("--sub-format".to_string());
        args.push(request.format.clone());
        args.push("--quiet".to_string());
        args.push("--no-warnings".to_string());
        args.push("--no-progress".to_string());
        args.push("-o".to_string());
        args.push(
            request
                .workspace
                .join(CAPTION_FILE_STEM)
                .to_string_lossy()
                .to_string(),
        );
        args.push(request.url.clone());

        args
    }

    /// Parse a yt-dlp info dump into video metadata
    pub fn parse_info_json(raw: &str) -> Result<VideoMetadata, DownloadError> {
        let json: Value =
            serde_json::from_str(raw).map_err(|e| DownloadError::ParseError(e.to_string()))?;

        let title = json
            .get("title")
            .and_then(|v| v.as_str())
            .unwrap_or("video")
            .to_string();

        let subtitles = Self::parse_caption_tracks(&json, "subtitles");
        let auto_captions = Self::parse_caption_tracks(&json, "automatic_captions");

        Ok(VideoMetadata {
            title,
            subtitles,
            auto_captions,
        })
    }

    /// Collect the caption tracks listed under one key of the info dump
    ///
    /// Both `subtitles` and `automatic_captions` map language tags to arrays
    /// of format variants.
    fn parse_caption_tracks(json: &Value, key: &str) -> Vec<CaptionTrack> {
        let mut tracks = Vec::new();

        if let Some(map) = json.get(key).and_then(|v| v.as_object()) {
            for (language, variants) in map {
                let formats = variants
                    .as_array()
                    .map(|entries| {
                        entries
                            .iter()
                            .filter_map(|entry| entry.get("ext").and_then(|v| v.as_str()))
                            .map(|ext| ext.to_string())
                            .collect()
                    })
                    .unwrap_or_default();

                tracks.push(CaptionTrack {
                    language: language.clone(),
                    formats,
                });
            }
        }

        tracks
    }

    /// Filter yt-dlp stderr to only show meaningful error lines, stripping
    /// extractor progress and warning noise.
    pub fn filter_ytdlp_stderr(stderr: &str) -> String {
        let noise_prefixes = [
            "[youtube]",
            "[info]",
            "[download]",
            "[generic]",
            "[debug]",
            "WARNING:",
            "Deleting original file",
        ];

        let meaningful: Vec<&str> = stderr
            .lines()
            .filter(|line| {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    return false;
                }
                !noise_prefixes.iter().any(|p| trimmed.starts_with(p))
            })
            .collect();

        if meaningful.is_empty() {
            "unknown yt-dlp error (stderr was empty after filtering)".to_string()
        } else {
            meaningful.join("\n")
        }
    }

    /// Run yt-dlp with the given arguments, enforcing the configured timeout
    async fn run_with_timeout(&self, args: Vec<String>) -> Result<std::process::Output, DownloadError> {
        debug!("Running {} {}", self.binary, args.join(" "));

        let ytdlp_future = Command::new(&self.binary).args(&args).output();

        let output = tokio::select! {
            result = ytdlp_future => {
                result.map_err(|e| match e.kind() {
                    std::io::ErrorKind::NotFound => {
                        DownloadError::LaunchFailed(format!("{} not found on PATH", self.binary))
                    }
                    _ => DownloadError::LaunchFailed(e.to_string()),
                })?
            },
            _ = tokio::time::sleep(self.timeout) => {
                return Err(DownloadError::Timeout(self.timeout.as_secs()));
            }
        };

        Ok(output)
    }
}

#[async_trait]
impl CaptionSource for YtDlpSource {
    async fn probe(&self, url: &str) -> Result<VideoMetadata, DownloadError> {
        let output = self.run_with_timeout(Self::probe_args(url)).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let filtered = Self::filter_ytdlp_stderr(&stderr);
            error!("Metadata probe failed: {}", filtered);
            return Err(DownloadError::ProcessFailed {
                exit_code: output.status.code().unwrap_or(-1),
                message: filtered,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        if stdout.trim().is_empty() {
            return Err(DownloadError::ParseError(
                "yt-dlp produced no metadata output".to_string(),
            ));
        }

        Self::parse_info_json(&stdout)
    }

    async fn fetch(&self, request: &FetchRequest) -> Result<PathBuf, DownloadError> {
        let output = self.run_with_timeout(Self::fetch_args(request)).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let filtered = Self::filter_ytdlp_stderr(&stderr);
            error!("Caption download failed: {}", filtered);
            return Err(DownloadError::ProcessFailed {
                exit_code: output.status.code().unwrap_or(-1),
                message: filtered,
            });
        }

        // yt-dlp picks the final filename, so scan the workspace for it
        let found =
            FileManager::find_caption_file(&request.workspace, CAPTION_FILE_STEM, &request.language)
                .map_err(|e| DownloadError::MissingOutput(e.to_string()))?;

        found.ok_or_else(|| {
            DownloadError::MissingOutput(format!(
                "no caption file for language '{}' in {}",
                request.language,
                request.workspace.display()
            ))
        })
    }
}
