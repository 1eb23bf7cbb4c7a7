//! Decoder for YouTube's `json3` timed-text documents.

use serde::Deserialize;
use std::time::Duration;

use super::CaptionSegment;
use crate::Result;

#[derive(Debug, Deserialize)]
struct TimedText {
    #[serde(default)]
    events: Vec<Event>,
}

#[derive(Debug, Deserialize)]
struct Event {
    #[serde(rename = "tStartMs", default)]
    start_ms: u64,
    #[serde(rename = "dDurationMs", default)]
    duration_ms: u64,
    segs: Option<Vec<Seg>>,
}

#[derive(Debug, Deserialize)]
struct Seg {
    #[serde(default)]
    utf8: String,
}

/// Parse a json3 document into caption segments.
///
/// Events without `segs` only carry window styling and are dropped.
pub fn parse(document: &str) -> Result<Vec<CaptionSegment>> {
    let timed_text: TimedText = serde_json::from_str(document)?;

    let segments = timed_text
        .events
        .into_iter()
        .filter_map(|event| {
            let segs = event.segs?;
            let text: String = segs.into_iter().map(|seg| seg.utf8).collect();
            Some(CaptionSegment {
                text,
                start: Duration::from_millis(event.start_ms),
                duration: Duration::from_millis(event.duration_ms),
            })
        })
        .collect();

    Ok(segments)
}
