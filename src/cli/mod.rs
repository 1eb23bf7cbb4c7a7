use clap::Parser;
use std::path::PathBuf;

use crate::language::LanguagePreference;

const LONG_ABOUT: &str = "\
Download YouTube video transcripts as plain text. Picks the first available track \
from the requested languages, falls back to English, then to any transcript the video has.";

const AFTER_HELP: &str = "\
Examples:
  ytt https://www.youtube.com/watch?v=dQw4w9WgXcQ
  ytt dQw4w9WgXcQ -o transcript.txt
  ytt -l de,fr dQw4w9WgXcQ

Exit codes:
  0  Success
  1  Transcript retrieval or other runtime error
  2  Invalid command-line usage
  3  Invalid video URL or ID
  4  No transcript available
  5  Output could not be written";

#[derive(Parser, Debug)]
#[command(
    name = "ytt",
    about = "Download YouTube video transcripts as plain text",
    version,
    long_about = LONG_ABOUT,
    after_help = AFTER_HELP
)]
pub struct Cli {
    /// YouTube video URL or ID
    #[arg(value_name = "VIDEO")]
    pub video: String,

    /// Output file (prints to stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Preferred language(s), comma-separated (default: en)
    #[arg(short, long, value_name = "LANG")]
    pub lang: Option<String>,

    /// List the available transcript tracks instead of downloading one
    #[arg(long)]
    pub list_languages: bool,

    /// Path to cookies file for age-restricted videos
    #[arg(long, value_name = "FILE", env = "YOUTUBE_COOKIES")]
    pub cookies: Option<PathBuf>,

    /// HTTP proxy URL
    #[arg(long, value_name = "URL", env = "YOUTUBE_PROXY_HTTP")]
    pub proxy_http: Option<String>,

    /// HTTPS proxy URL (defaults to the HTTP proxy)
    #[arg(long, value_name = "URL", env = "YOUTUBE_PROXY_HTTPS")]
    pub proxy_https: Option<String>,

    /// Configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable progress indicators
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Languages from `--lang`, else the configured defaults, else English
    pub fn language_preference(&self, defaults: &[String]) -> LanguagePreference {
        match &self.lang {
            Some(list) => LanguagePreference::parse(list),
            None => LanguagePreference::new(defaults),
        }
    }
}
