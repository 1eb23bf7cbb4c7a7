use std::fmt;

use crate::extractors::TrackDescriptor;
use crate::TranscriptError;

/// Implicit fallback language
pub const FALLBACK_LANGUAGE: &str = "en";

/// Ordered language codes, highest priority first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagePreference {
    codes: Vec<String>,
}

impl LanguagePreference {
    /// Build from codes in priority order; blanks and duplicates are dropped
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for code in codes {
            let code = code.as_ref().trim().to_lowercase();
            if !code.is_empty() && !normalized.contains(&code) {
                normalized.push(code);
            }
        }

        if normalized.is_empty() {
            return Self::default();
        }

        Self { codes: normalized }
    }

    /// Parse a comma-separated list such as `de,fr`
    pub fn parse(list: &str) -> Self {
        Self::new(list.split(','))
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c.eq_ignore_ascii_case(code))
    }
}

impl Default for LanguagePreference {
    fn default() -> Self {
        Self {
            codes: vec![FALLBACK_LANGUAGE.to_string()],
        }
    }
}

impl fmt::Display for LanguagePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.codes.join(","))
    }
}

/// Pick the best track for the given preferences.
///
/// Preferences are tried in order, then English, then the first available track.
/// For each code an exact match is tried before a regional one (`en` matches `en-US`).
/// Ties go to whichever track the provider listed first.
pub fn select<'a>(
    preferences: &LanguagePreference,
    available: &'a [TrackDescriptor],
) -> Result<&'a TrackDescriptor, TranscriptError> {
    let first = available.first().ok_or_else(|| {
        TranscriptError::NoTranscriptAvailable("no caption tracks listed".to_string())
    })?;

    for code in preferences.codes() {
        if let Some(track) = find_language(code, available) {
            return Ok(track);
        }
    }

    if !preferences.contains(FALLBACK_LANGUAGE) {
        if let Some(track) = find_language(FALLBACK_LANGUAGE, available) {
            tracing::debug!("No preferred language available, falling back to English");
            return Ok(track);
        }
    }

    tracing::debug!(
        "No preferred language or English available, using {}",
        first.language
    );
    Ok(first)
}

fn find_language<'a>(code: &str, available: &'a [TrackDescriptor]) -> Option<&'a TrackDescriptor> {
    available
        .iter()
        .find(|track| track.language.eq_ignore_ascii_case(code))
        .or_else(|| {
            available
                .iter()
                .find(|track| is_regional_variant(&track.language, code))
        })
}

/// True for `en-US` given `en`, false for `eng` or `en`
fn is_regional_variant(language: &str, code: &str) -> bool {
    language.len() > code.len()
        && language.is_char_boundary(code.len())
        && language[..code.len()].eq_ignore_ascii_case(code)
        && language[code.len()..].starts_with('-')
}
