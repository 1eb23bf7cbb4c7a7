use serde::Serialize;

use crate::extractors::{CaptionSegment, TrackDescriptor, TranscriptProvider};
use crate::language::{self, LanguagePreference};
use crate::video::VideoId;
use crate::{Result, TranscriptError};

pub mod formatter;

pub use formatter::format;

/// A fetched and flattened transcript
#[derive(Debug, Clone, Serialize)]
pub struct Transcript {
    /// Video the transcript belongs to
    pub video: VideoId,

    /// Track that was selected
    pub track: TrackDescriptor,

    /// Raw segments as returned by the provider
    pub segments: Vec<CaptionSegment>,

    /// Plain text rendering of the segments
    pub text: String,
}

/// Main transcript pipeline: list, select, fetch, format
pub struct TranscriptPipeline<'a> {
    provider: &'a dyn TranscriptProvider,
}

impl<'a> TranscriptPipeline<'a> {
    pub fn new(provider: &'a dyn TranscriptProvider) -> Self {
        Self { provider }
    }

    /// List the tracks a video offers, in provider order
    pub async fn available_tracks(&self, video: &VideoId) -> Result<Vec<TrackDescriptor>> {
        tracing::debug!("Listing tracks for {} via {}", video, self.provider.name());
        self.provider.list_tracks(video).await
    }

    /// Fetch the best matching transcript for a video
    pub async fn fetch(
        &self,
        video: &VideoId,
        preferences: &LanguagePreference,
    ) -> Result<Transcript> {
        let tracks = self.available_tracks(video).await?;
        tracing::debug!("{} tracks available for {}", tracks.len(), video);

        if tracks.is_empty() {
            return Err(TranscriptError::NoTranscriptAvailable(format!(
                "video {} has no caption tracks",
                video
            ))
            .into());
        }

        let track = language::select(preferences, &tracks)?.clone();
        tracing::info!(
            "Using {} {} track ({}) for {}",
            track.kind,
            track.language,
            track.name,
            video
        );

        let segments = self.provider.fetch_segments(&track).await?;
        tracing::debug!("Fetched {} segments", segments.len());

        let text = format(&segments);

        Ok(Transcript {
            video: video.clone(),
            track,
            segments,
            text,
        })
    }
}
