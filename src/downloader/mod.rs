/*!
 * Caption source implementations.
 *
 * This module contains the boundary to external caption providers:
 * - ytdlp: drives the yt-dlp command line tool
 * - mock: scriptable in-memory source for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::path::PathBuf;

use crate::app_config::CaptionTrack;
use crate::errors::DownloadError;

/// Metadata about a video and its available caption tracks
#[derive(Debug, Clone, Default)]
pub struct VideoMetadata {
    /// Video title as reported by the platform
    pub title: String,
    /// Manually authored caption tracks
    pub subtitles: Vec<CaptionTrack>,
    /// Auto-generated (speech recognition) caption tracks
    pub auto_captions: Vec<CaptionTrack>,
}

/// A request to fetch one caption track into a workspace directory
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// Video URL
    pub url: String,
    /// Language tag of the track to download
    pub language: String,
    /// Preferred caption container format
    pub format: String,
    /// Whether auto-generated tracks may satisfy the request
    pub include_auto: bool,
    /// Directory the caption file gets written into
    pub workspace: PathBuf,
}

/// Common trait for caption sources
///
/// This trait defines the interface a caption source must follow, allowing
/// the real yt-dlp driver and the test mock to be used interchangeably by
/// the controller.
#[async_trait]
pub trait CaptionSource: Send + Sync + Debug {
    /// Probe a video for its title and available caption tracks
    ///
    /// # Arguments
    /// * `url` - The video URL to inspect
    ///
    /// # Returns
    /// * `Result<VideoMetadata, DownloadError>` - The video metadata or an error
    async fn probe(&self, url: &str) -> Result<VideoMetadata, DownloadError>;

    /// Fetch a caption track into the request's workspace directory
    ///
    /// # Arguments
    /// * `request` - Which track to download and where to put it
    ///
    /// # Returns
    /// * `Result<PathBuf, DownloadError>` - Path of the downloaded caption file
    async fn fetch(&self, request: &FetchRequest) -> Result<PathBuf, DownloadError>;
}

pub mod mock;
pub mod ytdlp;
