use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Proxy, StatusCode};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::process::Stdio;
use tokio::process::Command;
use url::Url;

use super::{json3, CaptionSegment, TrackDescriptor, TrackKind, TranscriptProvider};
use crate::config::RetrievalConfig;
use crate::video::VideoId;
use crate::{utils, Result, TranscriptError};

/// Caption format requested from YouTube
const CAPTION_FORMAT: &str = "json3";

/// Suffix yt-dlp gives the untranslated speech-recognition track
const ORIGINAL_SUFFIX: &str = "-orig";

/// Pseudo-language under which yt-dlp reports live chat replays
const LIVE_CHAT: &str = "live_chat";

const YT_DLP_HOMEPAGE: &str = "https://github.com/yt-dlp/yt-dlp";

/// Subset of `yt-dlp --dump-json` output
#[derive(Debug, Default, Deserialize)]
pub(crate) struct VideoInfo {
    #[serde(default)]
    subtitles: BTreeMap<String, Vec<CaptionFormat>>,
    #[serde(default)]
    automatic_captions: BTreeMap<String, Vec<CaptionFormat>>,
}

#[derive(Debug, Deserialize)]
struct CaptionFormat {
    #[serde(default)]
    ext: String,
    #[serde(default)]
    url: String,
    name: Option<String>,
}

/// Caption provider backed by yt-dlp for discovery and a plain GET for download
pub struct YtDlpProvider {
    config: RetrievalConfig,
    client: Client,
}

impl YtDlpProvider {
    pub fn new(config: RetrievalConfig) -> Result<Self> {
        let mut builder = Client::builder();

        if let Some(proxy) = &config.proxy_http {
            builder = builder.proxy(Proxy::http(proxy).context("Invalid HTTP proxy")?);
        }
        if let Some(proxy) = config.effective_https_proxy() {
            builder = builder.proxy(Proxy::https(proxy).context("Invalid HTTPS proxy")?);
        }

        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { config, client })
    }

    /// Check if yt-dlp is available
    pub async fn check_availability(&self) -> bool {
        utils::check_command_available(&self.config.yt_dlp_path).await
    }

    fn dump_json_args(&self, video: &VideoId) -> Vec<String> {
        let mut args = vec![
            "--dump-json".to_string(),
            "--skip-download".to_string(),
            "--no-playlist".to_string(),
            "--no-warnings".to_string(),
        ];

        if let Some(cookies) = &self.config.cookies {
            args.push("--cookies".to_string());
            args.push(cookies.to_string_lossy().into_owned());
        }
        if let Some(proxy) = self.config.effective_https_proxy() {
            args.push("--proxy".to_string());
            args.push(proxy.to_string());
        }

        args.push(video.watch_url());
        args
    }

    /// Get video information using yt-dlp
    async fn get_video_info(&self, video: &VideoId) -> Result<VideoInfo> {
        tracing::debug!("Listing caption tracks for: {}", video);

        let output = Command::new(&self.config.yt_dlp_path)
            .args(self.dump_json_args(video))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .with_context(|| format!("Failed to run {}", self.config.yt_dlp_path))?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            return Err(TranscriptError::Retrieval(error.trim().to_string()).into());
        }

        let info: VideoInfo =
            serde_json::from_slice(&output.stdout).context("Failed to parse yt-dlp output")?;

        Ok(info)
    }
}

/// Turn yt-dlp's caption maps into an ordered track list.
///
/// Manual tracks come before generated ones, each group sorted by language code.
/// Machine translations of generated captions are skipped.
pub(crate) fn collect_tracks(info: VideoInfo) -> Vec<TrackDescriptor> {
    let mut tracks = Vec::new();
    let mut seen = HashSet::new();

    let groups = [
        (TrackKind::Manual, info.subtitles),
        (TrackKind::Generated, info.automatic_captions),
    ];

    for (kind, captions) in groups {
        let mut group = Vec::new();

        for (key, formats) in captions {
            if key == LIVE_CHAT {
                continue;
            }

            let Some(format) = formats
                .into_iter()
                .find(|f| f.ext == CAPTION_FORMAT && !f.url.is_empty())
            else {
                continue;
            };

            if kind == TrackKind::Generated && is_translation(&format.url) {
                continue;
            }

            let language = key
                .strip_suffix(ORIGINAL_SUFFIX)
                .unwrap_or(key.as_str())
                .to_string();
            if !seen.insert((language.clone(), kind)) {
                continue;
            }

            group.push(TrackDescriptor {
                name: format.name.unwrap_or_else(|| language.clone()),
                language,
                kind,
                url: format.url,
            });
        }

        group.sort_by(|a, b| a.language.cmp(&b.language));
        tracks.extend(group);
    }

    tracks
}

fn check_status(status: StatusCode) -> std::result::Result<(), TranscriptError> {
    if status.is_success() {
        return Ok(());
    }

    Err(TranscriptError::Retrieval(format!(
        "Failed to download captions: HTTP {}",
        status
    )))
}

fn is_translation(url: &str) -> bool {
    Url::parse(url)
        .map(|u| u.query_pairs().any(|(key, _)| key == "tlang"))
        .unwrap_or(false)
}

#[async_trait]
impl TranscriptProvider for YtDlpProvider {
    async fn list_tracks(&self, video: &VideoId) -> Result<Vec<TrackDescriptor>> {
        if !self.check_availability().await {
            return Err(TranscriptError::Retrieval(format!(
                "yt-dlp is not available. Please install it: {}",
                YT_DLP_HOMEPAGE
            ))
            .into());
        }

        let info = self.get_video_info(video).await?;
        let tracks = collect_tracks(info);

        tracing::debug!("Found {} caption tracks for {}", tracks.len(), video);
        Ok(tracks)
    }

    async fn fetch_segments(&self, track: &TrackDescriptor) -> Result<Vec<CaptionSegment>> {
        tracing::debug!(
            "Fetching {} {} captions from {}",
            track.kind,
            track.language,
            utils::extract_domain(&track.url).unwrap_or_default()
        );

        let response = self.client.get(&track.url).send().await?;
        check_status(response.status())?;

        let body = response.text().await?;
        json3::parse(&body).context("Failed to decode captions")
    }

    fn name(&self) -> &'static str {
        "yt-dlp"
    }
}
