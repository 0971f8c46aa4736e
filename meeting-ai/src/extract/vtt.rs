//! WebVTT caption track extraction.

use crate::error::InputError;
use crate::types::transcript::{NormalizedTranscript, SourceFormat};
use once_cell::sync::Lazy;
use regex::Regex;

static HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\AWEBVTT\s*").expect("WEBVTT header pattern is valid")
});

// Start and end timestamps, hours optional, followed by optional cue settings.
static CUE_TIMING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\d{2,}:)?\d{2}:\d{2}\.\d{3}\s*-->\s*(?:\d{2,}:)?\d{2}:\d{2}\.\d{3}(?:\s.*)?$")
        .expect("cue timing pattern is valid")
});

/// Collapse a caption track into one spoken line per output line.
///
/// Removes the `WEBVTT` header and every cue timing line, trims each remaining line
/// and drops blank ones. Numeric cue identifiers are kept.
pub(super) fn extract(bytes: &[u8]) -> Result<NormalizedTranscript, InputError> {
    let decoded = String::from_utf8_lossy(bytes);
    let body = decoded.trim_start_matches('\u{feff}');
    let body = HEADER.replace(body, "");

    let text = body
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !CUE_TIMING.is_match(line))
        .collect::<Vec<_>>()
        .join("\n");

    NormalizedTranscript::try_new(text, SourceFormat::WebVtt).ok_or(InputError::EmptyContent)
}
