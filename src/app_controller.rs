use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use tempfile::TempDir;

use crate::app_config::{CaptionTrack, Config};
use crate::downloader::ytdlp::YtDlpSource;
use crate::downloader::{CaptionSource, FetchRequest, VideoMetadata};
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::subtitle_extractor::{SubtitleDocument, Transcript};

// @module: Application controller for caption extraction

/// Main application controller for the caption extraction workflow
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let controller = Self { config };

        Ok(controller)
    }

    /// Check if the controller is properly initialized with configuration
    pub fn is_initialized(&self) -> bool {
        !self.config.language.is_empty()
    }

    /// Run the extraction workflow against yt-dlp
    pub async fn run(&self, url: &str, write_file: bool) -> Result<Transcript> {
        let source = YtDlpSource::new(&self.config.download);
        self.run_with_source(&source, url, write_file).await
    }

    /// Run the extraction workflow with the given caption source
    pub async fn run_with_source(
        &self,
        source: &dyn CaptionSource,
        url: &str,
        write_file: bool,
    ) -> Result<Transcript> {
        // Start timing the process
        let start_time = std::time::Instant::now();

        // Progress bar over the three pipeline steps: probe, download, extract
        let progress_bar = ProgressBar::new(3);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} steps {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{bar:40}] {pos}/{len} {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar.set_message("Fetching video information");

        // Probe the video metadata to learn which caption tracks exist
        let metadata = source
            .probe(url)
            .await
            .context("Failed to fetch video information")?;

        info!("Processing: {}", metadata.title);
        debug!(
            "{} manual and {} auto-generated caption tracks listed",
            metadata.subtitles.len(),
            metadata.auto_captions.len()
        );
        for line in Self::track_listing(&metadata) {
            debug!("Available: {}", line);
        }
        progress_bar.inc(1);

        // Pick the caption track matching the configured language
        let (track, is_auto) = match self.select_track(&metadata) {
            Some(selection) => selection,
            None => {
                progress_bar.finish_and_clear();
                return Err(anyhow::anyhow!(
                    "No '{}' captions available for this video (available: {})",
                    self.config.language,
                    Self::describe_available_tracks(&metadata)
                ));
            }
        };

        if is_auto {
            info!("Using auto-generated captions ({})", track.language);
        } else {
            debug!("Using manual captions ({})", track.language);
        }

        // Download the caption file into a scoped workspace that is removed
        // when extraction finishes
        let workspace = TempDir::new().context("Failed to create caption workspace")?;

        let request = FetchRequest {
            url: url.to_string(),
            language: track.language.clone(),
            format: self.config.download.subtitle_format.clone(),
            include_auto: is_auto,
            workspace: workspace.path().to_path_buf(),
        };

        progress_bar.set_message("Downloading captions");
        let caption_path = source
            .fetch(&request)
            .await
            .context("Failed to download captions")?;
        progress_bar.inc(1);

        // Extract and normalize the caption text
        progress_bar.set_message("Extracting text");
        let document = SubtitleDocument::from_path(&caption_path)?;
        debug!("Detected {} captions", document.format);

        let transcript = document.extract();
        progress_bar.inc(1);
        progress_bar.finish_and_clear();

        if transcript.is_empty() {
            warn!("No caption text found, skipping transcript file");
        } else if write_file {
            let output_path = FileManager::transcript_output_path(
                &self.config.output_dir,
                &metadata.title,
                &self.config.language,
            );
            FileManager::write_to_file(&output_path, &transcript.to_string())?;
            info!("Success: {}", output_path.display());
        }

        // Calculate and display the elapsed time
        let elapsed = start_time.elapsed();
        info!(
            "Extraction complete. {} lines in {}",
            transcript.len(),
            Self::format_duration(elapsed)
        );

        Ok(transcript)
    }

    /// List the caption languages available for a video
    pub async fn list_languages(&self, url: &str) -> Result<()> {
        let source = YtDlpSource::new(&self.config.download);
        self.list_languages_with_source(&source, url).await
    }

    /// List the caption languages using the given caption source
    pub async fn list_languages_with_source(
        &self,
        source: &dyn CaptionSource,
        url: &str,
    ) -> Result<()> {
        let metadata = source
            .probe(url)
            .await
            .context("Failed to fetch video information")?;

        info!("Caption tracks for: {}", metadata.title);

        if metadata.subtitles.is_empty() && metadata.auto_captions.is_empty() {
            info!("No caption tracks available");
            return Ok(());
        }

        for line in Self::track_listing(&metadata) {
            info!(" - {}", line);
        }

        Ok(())
    }

    /// One description line per listed caption track, manual tracks first
    pub fn track_listing(metadata: &VideoMetadata) -> Vec<String> {
        let mut lines: Vec<String> = metadata
            .subtitles
            .iter()
            .map(|track| format!("{} [{}]", track.language, track.formats.join(", ")))
            .collect();
        lines.extend(metadata.auto_captions.iter().map(|track| {
            format!(
                "{} (auto-generated) [{}]",
                track.language,
                track.formats.join(", ")
            )
        }));

        lines
    }

    /// Pick the caption track for the configured language
    ///
    /// Manual tracks are preferred over auto-generated ones, and an exact tag
    /// match is preferred over a base-subtag match (`pt` matching `pt-BR`).
    /// Auto-generated tracks are only considered when the configuration
    /// allows them.
    fn select_track<'a>(&self, metadata: &'a VideoMetadata) -> Option<(&'a CaptionTrack, bool)> {
        let requested = &self.config.language;

        if let Some(track) = Self::match_track(&metadata.subtitles, requested) {
            return Some((track, false));
        }

        if self.config.download.include_auto_captions {
            if let Some(track) = Self::match_track(&metadata.auto_captions, requested) {
                return Some((track, true));
            }
        }

        None
    }

    /// Find a track matching the requested language within one track list
    fn match_track<'a>(tracks: &'a [CaptionTrack], requested: &str) -> Option<&'a CaptionTrack> {
        tracks
            .iter()
            .find(|track| track.language.eq_ignore_ascii_case(requested))
            .or_else(|| {
                tracks
                    .iter()
                    .find(|track| language_utils::language_codes_match(&track.language, requested))
            })
    }

    /// Human-readable summary of every listed caption track
    fn describe_available_tracks(metadata: &VideoMetadata) -> String {
        let mut tags: Vec<String> = metadata
            .subtitles
            .iter()
            .map(|track| track.language.clone())
            .collect();
        tags.extend(
            metadata
                .auto_captions
                .iter()
                .map(|track| format!("{} (auto)", track.language)),
        );

        if tags.is_empty() {
            "none".to_string()
        } else {
            tags.join(", ")
        }
    }

    // Format duration in a human-readable format (HH:MM:SS)
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
