use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::TranscriptError;

/// Length of every YouTube video identifier
pub const VIDEO_ID_LEN: usize = 11;

/// Inputs longer than this are rejected without parsing
const MAX_INPUT_LEN: usize = 500;

/// Hosts serving `/watch`, `/embed`, `/shorts` style URLs
const YOUTUBE_HOSTS: &[&str] = &[
    "youtube.com",
    "www.youtube.com",
    "m.youtube.com",
    "music.youtube.com",
    "youtube-nocookie.com",
    "www.youtube-nocookie.com",
];

const SHORT_LINK_HOST: &str = "youtu.be";

/// Path prefixes whose next segment is the video identifier
const ID_PATH_PREFIXES: &[&str] = &["embed", "v", "shorts", "live"];

/// A validated 11-character YouTube video identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch URL for this video
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for VideoId {
    type Err = TranscriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve(s)
    }
}

/// Check whether a string is a bare video identifier
pub fn is_bare_id(candidate: &str) -> bool {
    candidate.len() == VIDEO_ID_LEN
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Resolve a bare identifier or any accepted URL shape to a [`VideoId`]
pub fn resolve(input: &str) -> Result<VideoId, TranscriptError> {
    let invalid = || TranscriptError::InvalidReference(input.to_string());

    if input.len() > MAX_INPUT_LEN {
        return Err(invalid());
    }

    let trimmed = input.trim();
    if is_bare_id(trimmed) {
        return Ok(VideoId(trimmed.to_string()));
    }

    let url = parse_url(trimmed).ok_or_else(invalid)?;
    extract_from_url(&url)
        .filter(|id| is_bare_id(id))
        .map(VideoId)
        .ok_or_else(invalid)
}

fn parse_url(input: &str) -> Option<Url> {
    if input.is_empty() || input.chars().any(char::is_whitespace) {
        return None;
    }

    let parsed = if input.contains("://") {
        Url::parse(input).ok()?
    } else {
        // Scheme-less forms like youtu.be/<id>
        Url::parse(&format!("https://{}", input)).ok()?
    };

    matches!(parsed.scheme(), "http" | "https").then_some(parsed)
}

fn extract_from_url(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_ascii_lowercase();

    if host == SHORT_LINK_HOST {
        return url
            .path_segments()?
            .next()
            .filter(|seg| !seg.is_empty())
            .map(str::to_string);
    }

    if !YOUTUBE_HOSTS.contains(&host.as_str()) {
        return None;
    }

    let mut segments = url.path_segments()?;
    let first = segments.next().unwrap_or("");

    if first == "watch" {
        return url
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned());
    }

    if ID_PATH_PREFIXES.contains(&first) {
        return segments.next().map(str::to_string);
    }

    None
}
