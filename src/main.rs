// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::Path;
use std::io::Write;
use std::fs::File;
use std::io::BufReader;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::app_config::Config;
use app_controller::Controller;

mod app_config;
mod subtitle_extractor;
mod text_normalizer;
mod file_utils;
mod app_controller;
mod language_utils;
mod downloader;
mod errors;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract video captions as a text transcript (default command)
    Extract(ExtractArgs),

    /// Generate shell completions for captext
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ExtractArgs {
    /// Video URL to extract captions from
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// Caption language code (e.g., 'en', 'pt', 'pt-BR')
    #[arg(short, long)]
    language: Option<String>,

    /// Output directory for the transcript file
    #[arg(short, long)]
    output_dir: Option<String>,

    /// Print the transcript without saving it to a file
    #[arg(short, long)]
    no_save: bool,

    /// List available caption languages and exit
    #[arg(long)]
    list_languages: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// captext - Caption Text Extractor
///
/// A transcript extraction tool that downloads video captions with yt-dlp
/// and turns them into clean, deduplicated plain text.
#[derive(Parser, Debug)]
#[command(name = "captext")]
#[command(author = "captext contributors")]
#[command(version = "0.1.0")]
#[command(about = "Extract video captions as a clean text transcript")]
#[command(long_about = "captext downloads video captions with yt-dlp and turns them into a clean,
deduplicated text transcript.

EXAMPLES:
    captext https://youtu.be/abc123                  # Extract using default config
    captext -l pt https://youtu.be/abc123            # Extract Portuguese captions
    captext -n https://youtu.be/abc123               # Print transcript without saving
    captext --list-languages https://youtu.be/abc123 # Show available caption tracks
    captext -o transcripts https://youtu.be/abc123   # Save into a specific directory
    captext completions bash > captext.bash          # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.

SUPPORTED CAPTION FORMATS:
    ttml - Timed Text Markup Language (default, best text fidelity)
    vtt  - WebVTT
    srt  - SubRip
    best - Whatever format yt-dlp prefers for the track")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Video URL to extract captions from
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// Caption language code (e.g., 'en', 'pt', 'pt-BR')
    #[arg(short, long)]
    language: Option<String>,

    /// Output directory for the transcript file
    #[arg(short, long)]
    output_dir: Option<String>,

    /// Print the transcript without saving it to a file
    #[arg(short, long)]
    no_save: bool,

    /// List available caption languages and exit
    #[arg(long)]
    list_languages: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");

            let mut stderr = std::io::stderr();
            let _ = match record.level() {
                Level::Error => {
                    let emoji = Self::get_emoji_for_level(record.level());
                    writeln!(
                        stderr,
                        "\x1B[1;31m{} {} {}\x1B[0m",
                        now, emoji, record.args()
                    )
                },
                Level::Warn => {
                    let emoji = Self::get_emoji_for_level(record.level());
                    writeln!(
                        stderr,
                        "\x1B[1;33m{} {} {}\x1B[0m",
                        now, emoji, record.args()
                    )
                },
                Level::Info => {
                    let emoji = Self::get_emoji_for_level(record.level());
                    writeln!(
                        stderr,
                        "\x1B[1;32m{} {} {}\x1B[0m",
                        now, emoji, record.args()
                    )
                },
                Level::Debug => {
                    let emoji = Self::get_emoji_for_level(record.level());
                    writeln!(
                        stderr,
                        "\x1B[1;36m{} {} {}\x1B[0m",
                        now, emoji, record.args()
                    )
                },
                Level::Trace => {
                    let emoji = Self::get_emoji_for_level(record.level());
                    writeln!(
                        stderr,
                        "\x1B[1;35m{} {} {}\x1B[0m",
                        now, emoji, record.args()
                    )
                },
            };
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "captext", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Extract(args)) => {
            // Use the explicit extract subcommand args
            run_extract(args).await
        }
        None => {
            // Default behavior - use top-level args so the subcommand is optional
            let extract_args = ExtractArgs {
                url: cli.url,
                language: cli.language,
                output_dir: cli.output_dir,
                no_save: cli.no_save,
                list_languages: cli.list_languages,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_extract(extract_args).await
        }
    }
}

async fn run_extract(options: ExtractArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        let log_level = match config_log_level {
            app_config::LogLevel::Error => LevelFilter::Error,
            app_config::LogLevel::Warn => LevelFilter::Warn,
            app_config::LogLevel::Info => LevelFilter::Info,
            app_config::LogLevel::Debug => LevelFilter::Debug,
            app_config::LogLevel::Trace => LevelFilter::Trace,
        };
        log::set_max_level(log_level);
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        // Override config with CLI options if provided
        if let Some(language) = &options.language {
            config.language = language.clone();
        }

        if let Some(output_dir) = &options.output_dir {
            config.output_dir = output_dir.clone();
        }

        // Update log level in config if specified via command line
        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        config
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let mut config = Config::default();

        // Apply command line overrides to the default config if specified
        if let Some(language) = &options.language {
            config.language = language.clone();
        }

        if let Some(output_dir) = &options.output_dir {
            config.output_dir = output_dir.clone();
        }

        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        // Save default config
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Without a URL argument, fall back to prompting for the run parameters
    let url = match &options.url {
        Some(url) => url.clone(),
        None => {
            let url = prompt_for_input("Video URL", None)?;
            config.language = prompt_for_input("Caption language", Some(&config.language))?;
            url
        }
    };

    // Validate the configuration after loading and overriding
    config.validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        let log_level = match config.log_level {
            app_config::LogLevel::Error => LevelFilter::Error,
            app_config::LogLevel::Warn => LevelFilter::Warn,
            app_config::LogLevel::Info => LevelFilter::Info,
            app_config::LogLevel::Debug => LevelFilter::Debug,
            app_config::LogLevel::Trace => LevelFilter::Trace,
        };

        // Just update the max level without reinitializing the logger
        log::set_max_level(log_level);
    }

    // Create controller
    let controller = Controller::with_config(config)?;

    // Only list the available caption languages if requested
    if options.list_languages {
        return controller.list_languages(&url).await;
    }

    // Run the extraction workflow
    let transcript = controller.run(&url, !options.no_save).await?;

    // Print the transcript to stdout, logs go to stderr
    if !transcript.is_empty() {
        println!("\nExtracted text:");
        println!("{}", "-".repeat(50));
        print!("{}", transcript);
        println!("{}", "-".repeat(50));
    }

    Ok(())
}

// Helper function to read one interactive value from stdin
fn prompt_for_input(prompt: &str, default: Option<&str>) -> Result<String> {
    match default {
        Some(value) => print!("{} [{}]: ", prompt, value),
        None => print!("{}: ", prompt),
    }
    std::io::stdout().flush().context("Failed to flush stdout")?;

    let mut input = String::new();
    std::io::stdin()
        .read_line(&mut input)
        .context("Failed to read input")?;

    let trimmed = input.trim();
    if trimmed.is_empty() {
        match default {
            Some(value) => Ok(value.to_string()),
            None => Err(anyhow!("No value provided")),
        }
    } else {
        Ok(trimmed.to_string())
    }
}
