/*!
 * Mock caption source implementations for testing.
 *
 * This module provides mock sources that simulate different behaviors:
 * - `MockSource::working()` - Lists one manual track and writes a caption file
 * - `MockSource::auto_only()` - Lists the track as auto-generated only
 * - `MockSource::no_captions()` - Lists no tracks at all
 * - `MockSource::missing_output()` - Succeeds but never produces a file
 * - `MockSource::failing()` - Always fails with an error
 */

// Allow dead code - mock sources are only constructed by tests
#![allow(dead_code)]

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::app_config::CaptionTrack;
use crate::downloader::ytdlp::CAPTION_FILE_STEM;
use crate::downloader::{CaptionSource, FetchRequest, VideoMetadata};
use crate::errors::DownloadError;

/// Default caption payload served by a working mock. Contains a duplicated
/// paragraph so pipeline tests can observe deduplication.
pub const DEFAULT_TTML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<tt xmlns="http://www.w3.org/ns/ttml">
  <body>
    <div>
      <p begin="00:00:00.000" end="00:00:02.000">Hello world</p>
      <p begin="00:00:02.000" end="00:00:04.000">Hello world</p>
      <p begin="00:00:04.000" end="00:00:06.000">Second line</p>
    </div>
  </body>
</tt>
"#;

/// Behavior mode for the mock source
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockSourceBehavior {
    /// Lists one caption track and writes the payload on fetch
    Working,
    /// Lists no caption tracks at all
    NoCaptions,
    /// Lists a track but the fetch produces no file
    MissingOutput,
    /// Always fails with a process error
    Failing,
    /// Simulates a slow download (for timeout testing)
    Slow { delay_ms: u64 },
}

/// Mock caption source for testing extraction behavior
#[derive(Debug)]
pub struct MockSource {
    /// Behavior mode
    behavior: MockSourceBehavior,
    /// Caption payload written by a working fetch
    payload: String,
    /// File extension of the written caption file
    extension: String,
    /// Language tag the track is listed and written under
    language: String,
    /// List the track as auto-generated instead of manual
    auto_track: bool,
    /// Call counter shared across clones
    call_count: Arc<AtomicUsize>,
}

impl MockSource {
    /// Create a new mock source with the specified behavior
    pub fn new(behavior: MockSourceBehavior) -> Self {
        Self {
            behavior,
            payload: DEFAULT_TTML.to_string(),
            extension: "ttml".to_string(),
            language: "en".to_string(),
            auto_track: false,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working mock source with one manual track
    pub fn working() -> Self {
        Self::new(MockSourceBehavior::Working)
    }

    /// Create a working mock source whose track is auto-generated only
    pub fn auto_only() -> Self {
        let mut source = Self::new(MockSourceBehavior::Working);
        source.auto_track = true;
        source
    }

    /// Create a mock source that lists no caption tracks
    pub fn no_captions() -> Self {
        Self::new(MockSourceBehavior::NoCaptions)
    }

    /// Create a mock source whose fetch never produces a file
    pub fn missing_output() -> Self {
        Self::new(MockSourceBehavior::MissingOutput)
    }

    /// Create a failing mock source that always errors
    pub fn failing() -> Self {
        Self::new(MockSourceBehavior::Failing)
    }

    /// Create a mock source that sleeps before answering
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockSourceBehavior::Slow { delay_ms })
    }

    /// Replace the caption payload and its file extension
    pub fn with_payload(mut self, payload: impl Into<String>, extension: impl Into<String>) -> Self {
        self.payload = payload.into();
        self.extension = extension.into();
        self
    }

    /// Replace the language tag the track is listed under
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Number of probe and fetch calls across all clones
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    fn metadata(&self) -> VideoMetadata {
        let track = CaptionTrack {
            language: self.language.clone(),
            formats: vec![self.extension.clone()],
        };

        let (subtitles, auto_captions) = if self.auto_track {
            (Vec::new(), vec![track])
        } else {
            (vec![track], Vec::new())
        };

        VideoMetadata {
            title: "Sample Video".to_string(),
            subtitles,
            auto_captions,
        }
    }
}

impl Clone for MockSource {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            payload: self.payload.clone(),
            extension: self.extension.clone(),
            language: self.language.clone(),
            auto_track: self.auto_track,
            call_count: Arc::clone(&self.call_count),
        }
    }
}

#[async_trait]
impl CaptionSource for MockSource {
    async fn probe(&self, _url: &str) -> Result<VideoMetadata, DownloadError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockSourceBehavior::Failing => Err(DownloadError::ProcessFailed {
                exit_code: 1,
                message: "Simulated metadata probe failure".to_string(),
            }),

            MockSourceBehavior::NoCaptions => Ok(VideoMetadata {
                title: "Sample Video".to_string(),
                ..Default::default()
            }),

            MockSourceBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                Ok(self.metadata())
            }

            _ => Ok(self.metadata()),
        }
    }

    async fn fetch(&self, request: &FetchRequest) -> Result<PathBuf, DownloadError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockSourceBehavior::Working | MockSourceBehavior::Slow { .. } => {
                if let MockSourceBehavior::Slow { delay_ms } = self.behavior {
                    tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                }

                let file_name =
                    format!("{}.{}.{}", CAPTION_FILE_STEM, self.language, self.extension);
                let path = request.workspace.join(file_name);

                std::fs::write(&path, &self.payload).map_err(|e| {
                    DownloadError::MissingOutput(format!(
                        "failed to write mock caption file: {}",
                        e
                    ))
                })?;

                Ok(path)
            }

            MockSourceBehavior::NoCaptions => Err(DownloadError::MissingOutput(
                "no caption tracks available".to_string(),
            )),

            MockSourceBehavior::MissingOutput => Err(DownloadError::MissingOutput(format!(
                "no caption file for language '{}' in {}",
                request.language,
                request.workspace.display()
            ))),

            MockSourceBehavior::Failing => Err(DownloadError::ProcessFailed {
                exit_code: 1,
                message: "Simulated caption download failure".to_string(),
            }),
        }
    }
}
