/*!
 * Tests for caption source implementations
 */

use std::path::PathBuf;
use anyhow::Result;
use tokio_test;
use captext::downloader::mock::MockSource;
use captext::downloader::ytdlp::YtDlpSource;
use captext::downloader::{CaptionSource, FetchRequest};
use captext::errors::DownloadError;
use crate::common;

fn sample_fetch_request(include_auto: bool) -> FetchRequest {
    FetchRequest {
        url: "https://example.com/watch?v=abc123".to_string(),
        language: "en".to_string(),
        format: "ttml".to_string(),
        include_auto,
        workspace: PathBuf::from("/tmp/workspace"),
    }
}

/// Test the metadata probe argument list
#[test]
fn test_probe_args_withUrl_shouldRequestJsonWithoutDownload() {
    let args = YtDlpSource::probe_args("https://example.com/watch?v=abc123");

    assert_eq!(args[0], "-J");
    assert!(args.contains(&"--skip-download".to_string()));
    assert!(args.contains(&"--no-warnings".to_string()));
    assert_eq!(args.last().unwrap(), "https://example.com/watch?v=abc123");
}

/// Test the caption download argument list for a manual track
#[test]
fn test_fetch_args_withManualTrack_shouldOmitAutoSubs() {
    let args = YtDlpSource::fetch_args(&sample_fetch_request(false));

    assert!(args.contains(&"--write-subs".to_string()));
    assert!(!args.contains(&"--write-auto-subs".to_string()));
    assert_eq!(args.last().unwrap(), "https://example.com/watch?v=abc123");

    // Language and format flags carry the request values
    let lang_pos = args.iter().position(|a| a == "--sub-langs").unwrap();
    assert_eq!(args[lang_pos + 1], "en");
    let format_pos = args.iter().position(|a| a == "--sub-format").unwrap();
    assert_eq!(args[format_pos + 1], "ttml");
}

/// Test the caption download argument list for an auto-generated track
#[test]
fn test_fetch_args_withAutoTrack_shouldRequestAutoSubs() {
    let args = YtDlpSource::fetch_args(&sample_fetch_request(true));

    assert!(args.contains(&"--write-subs".to_string()));
    assert!(args.contains(&"--write-auto-subs".to_string()));

    // Output template points into the workspace
    let output_pos = args.iter().position(|a| a == "-o").unwrap();
    assert!(args[output_pos + 1].starts_with("/tmp/workspace"));
    assert!(args[output_pos + 1].contains("captions"));
}

/// Test parsing a yt-dlp info dump with both track kinds
#[test]
fn test_parse_info_json_withTrackLists_shouldCollectLanguagesAndFormats() -> Result<()> {
    let raw = r#"{
        "title": "A Sample Video",
        "subtitles": {
            "en": [ {"ext": "ttml"}, {"ext": "vtt"} ],
            "pt-BR": [ {"ext": "vtt"} ]
        },
        "automatic_captions": {
            "es": [ {"ext": "vtt"} ]
        }
    }"#;

    let metadata = YtDlpSource::parse_info_json(raw)?;

    assert_eq!(metadata.title, "A Sample Video");

    assert_eq!(metadata.subtitles.len(), 2);
    assert_eq!(metadata.subtitles[0].language, "en");
    assert_eq!(metadata.subtitles[0].formats, vec!["ttml", "vtt"]);
    assert_eq!(metadata.subtitles[1].language, "pt-BR");

    assert_eq!(metadata.auto_captions.len(), 1);
    assert_eq!(metadata.auto_captions[0].language, "es");

    Ok(())
}

/// Test that a missing title falls back to a placeholder
#[test]
fn test_parse_info_json_withMissingFields_shouldUseFallbacks() -> Result<()> {
    let metadata = YtDlpSource::parse_info_json("{}")?;

    assert_eq!(metadata.title, "video");
    assert!(metadata.subtitles.is_empty());
    assert!(metadata.auto_captions.is_empty());

    Ok(())
}

/// Test that invalid JSON reports a parse error
#[test]
fn test_parse_info_json_withInvalidJson_shouldReturnParseError() {
    let result = YtDlpSource::parse_info_json("not json at all");
    assert!(matches!(result, Err(DownloadError::ParseError(_))));
}

/// Test that extractor noise is stripped from yt-dlp stderr
#[test]
fn test_filter_ytdlp_stderr_withMixedOutput_shouldKeepErrorLines() {
    let stderr = "[youtube] abc123: Downloading webpage\n\
                  WARNING: unable to download video thumbnail\n\
                  ERROR: This video is unavailable\n\
                  \n\
                  ERROR: no suitable subtitles found\n\
                  [download] Finished downloading playlist\n";

    let filtered = YtDlpSource::filter_ytdlp_stderr(stderr);

    assert_eq!(
        filtered,
        "ERROR: This video is unavailable\nERROR: no suitable subtitles found"
    );
}

/// Test that noise-only stderr falls back to a placeholder message
#[test]
fn test_filter_ytdlp_stderr_withOnlyNoise_shouldReturnFallbackMessage() {
    let stderr = "[youtube] abc123: Downloading webpage\n\
                  [info] Available subtitles for abc123\n\
                  WARNING: some warning\n\n";

    let filtered = YtDlpSource::filter_ytdlp_stderr(stderr);

    assert_eq!(
        filtered,
        "unknown yt-dlp error (stderr was empty after filtering)"
    );
}

/// Test that empty stderr also yields the placeholder message
#[test]
fn test_filter_ytdlp_stderr_withEmptyInput_shouldReturnFallbackMessage() {
    let filtered = YtDlpSource::filter_ytdlp_stderr("");
    assert!(filtered.contains("unknown yt-dlp error"));
}

/// Test driving a source through the trait object boundary
#[test]
fn test_caption_source_asTraitObject_shouldProbeAndFetch() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mock = MockSource::working();
    let source: &dyn CaptionSource = &mock;

    let metadata = tokio_test::block_on(source.probe("https://example.com/watch?v=abc123"))?;
    assert_eq!(metadata.subtitles.len(), 1);

    let request = FetchRequest {
        url: "https://example.com/watch?v=abc123".to_string(),
        language: "en".to_string(),
        format: "ttml".to_string(),
        include_auto: false,
        workspace: temp_dir.path().to_path_buf(),
    };
    let path = tokio_test::block_on(source.fetch(&request))?;
    assert!(path.exists());

    Ok(())
}
