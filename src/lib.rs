//! ytt - A Rust CLI tool for downloading YouTube video transcripts as plain text
//!
//! This library resolves video references, lists the caption tracks a video offers,
//! picks one by language preference and flattens its timed segments into plain text.
//! Caption retrieval is delegated to a [`TranscriptProvider`], by default backed by yt-dlp.

use std::path::PathBuf;

pub mod app;
pub mod cli;
pub mod config;
pub mod extractors;
pub mod language;
pub mod output;
pub mod transcript;
pub mod utils;
pub mod video;

pub use cli::Cli;
pub use config::{Config, RetrievalConfig};
pub use extractors::{CaptionSegment, TrackDescriptor, TrackKind, TranscriptProvider};
pub use language::LanguagePreference;
pub use transcript::{Transcript, TranscriptPipeline};
pub use video::VideoId;

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;

/// Error types specific to ytt
#[derive(thiserror::Error, Debug)]
pub enum TranscriptError {
    #[error("Invalid video URL or ID: {0}")]
    InvalidReference(String),

    #[error("No transcript available: {0}")]
    NoTranscriptAvailable(String),

    #[error("Invalid output path: {}", .0.display())]
    InvalidOutputPath(PathBuf),

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Transcript retrieval failed: {0}")]
    Retrieval(String),
}
