use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

pub mod json3;
pub mod youtube;

pub use youtube::YtDlpProvider;

use crate::video::VideoId;
use crate::Result;

/// How a caption track was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TrackKind {
    /// Uploaded by the video owner
    Manual,
    /// Speech recognition
    Generated,
}

impl TrackKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackKind::Manual => "manual",
            TrackKind::Generated => "generated",
        }
    }
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A caption track a video offers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackDescriptor {
    /// Language code as reported by the platform (`en`, `pt-BR`, ...)
    pub language: String,

    /// Human readable language name
    pub name: String,

    /// Manual or generated captions
    pub kind: TrackKind,

    /// Opaque handle the provider uses to fetch the segments
    pub url: String,
}

/// One timed fragment of caption text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaptionSegment {
    pub text: String,
    pub start: Duration,
    pub duration: Duration,
}

impl CaptionSegment {
    /// Segment with no timing information
    pub fn untimed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            start: Duration::ZERO,
            duration: Duration::ZERO,
        }
    }
}

/// Source of caption tracks and their segments
///
/// `list_tracks` must return tracks in a stable order: language selection
/// falls back to the first track when nothing else matches, and ties between
/// tracks of the same language go to the one listed first.
#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    /// List the caption tracks available for a video
    async fn list_tracks(&self, video: &VideoId) -> Result<Vec<TrackDescriptor>>;

    /// Fetch the segments of one track, in chronological order
    async fn fetch_segments(&self, track: &TrackDescriptor) -> Result<Vec<CaptionSegment>>;

    /// Get the name of this provider
    fn name(&self) -> &'static str;
}
