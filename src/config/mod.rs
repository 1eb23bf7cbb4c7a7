use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

use crate::utils;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Settings handed to the transcript provider
    pub retrieval: RetrievalConfig,

    /// Languages to use when `--lang` is not given
    pub default_languages: Vec<String>,
}

/// Explicit retrieval settings; the provider never reads the environment itself
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// yt-dlp executable
    pub yt_dlp_path: String,

    /// Netscape cookie file for age-restricted or members-only videos
    pub cookies: Option<PathBuf>,

    /// Proxy for plain HTTP requests
    pub proxy_http: Option<String>,

    /// Proxy for HTTPS requests
    pub proxy_https: Option<String>,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            yt_dlp_path: "yt-dlp".to_string(),
            cookies: None,
            proxy_http: None,
            proxy_https: None,
        }
    }
}

impl RetrievalConfig {
    /// Proxy used for HTTPS requests, falling back to the HTTP one
    pub fn effective_https_proxy(&self) -> Option<&str> {
        self.proxy_https.as_deref().or(self.proxy_http.as_deref())
    }

    /// Apply overrides from the command line or environment.
    ///
    /// A cookie file that does not exist is ignored with a warning.
    pub fn with_overrides(
        mut self,
        cookies: Option<&Path>,
        proxy_http: Option<&str>,
        proxy_https: Option<&str>,
    ) -> Self {
        if let Some(cookies) = cookies {
            self.cookies = Some(cookies.to_path_buf());
        }
        if let Some(proxy) = proxy_http.filter(|p| !p.trim().is_empty()) {
            self.proxy_http = Some(proxy.trim().to_string());
        }
        if let Some(proxy) = proxy_https.filter(|p| !p.trim().is_empty()) {
            self.proxy_https = Some(proxy.trim().to_string());
        }

        self.cookies = self.cookies.take().and_then(|path| {
            let expanded = utils::expand_home(&path);
            if expanded.exists() {
                Some(expanded)
            } else {
                tracing::warn!(
                    "Cookie file {} not found, continuing without cookies",
                    expanded.display()
                );
                None
            }
        });

        self
    }

    fn validate(&self) -> Result<()> {
        if self.yt_dlp_path.trim().is_empty() {
            anyhow::bail!("retrieval.yt_dlp_path must not be empty");
        }

        for proxy in [&self.proxy_http, &self.proxy_https].into_iter().flatten() {
            Url::parse(proxy).with_context(|| format!("Invalid proxy URL: {}", proxy))?;
        }

        Ok(())
    }
}

impl Config {
    /// Load configuration from an explicit path, the default locations, or defaults.
    ///
    /// Unlike an explicit path, a missing default file is not an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match Self::config_path() {
                Some(path) if path.exists() => path,
                _ => {
                    tracing::debug!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        Self::from_file(&path)
    }

    /// Read and validate a YAML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs_err::read_to_string(path).context("Failed to read config file")?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty file deserializes to unit, not to an empty mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get configuration file path
    fn config_path() -> Option<PathBuf> {
        // First try current directory for easy testing
        let local_config = PathBuf::from("ytt.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir().map(|dir| dir.join("ytt").join("config.yaml"))
    }

    fn validate(&self) -> Result<()> {
        self.retrieval.validate()
    }
}
