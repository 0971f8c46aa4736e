//! Types for uploaded transcripts and their normalized text.

use serde::Serialize;
use std::fmt;

/// An uploaded file as handed over by the upload boundary.
///
/// Size and presence are already validated upstream; the pipeline only reads it.
#[derive(Debug, Clone)]
pub struct RawUpload {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub declared_size: u64,
}

impl RawUpload {
    pub fn new(bytes: Vec<u8>, filename: impl Into<String>) -> Self {
        let declared_size = bytes.len() as u64;
        Self {
            bytes,
            filename: filename.into(),
            declared_size,
        }
    }
}

/// Which extractor produced a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    Plain,
    WebVtt,
    Document,
    Pdf,
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SourceFormat::Plain => write!(f, "plain text"),
            SourceFormat::WebVtt => write!(f, "WebVTT"),
            SourceFormat::Document => write!(f, "document"),
            SourceFormat::Pdf => write!(f, "PDF"),
        }
    }
}

/// Transcript text that is guaranteed to contain something other than whitespace.
///
/// Only the extractors in [`crate::extract`] can build one, so holding a value of
/// this type is proof that extraction succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedTranscript {
    text: String,
    source_format: SourceFormat,
}

impl NormalizedTranscript {
    /// Returns `None` when `text` is empty once trimmed.
    pub(crate) fn try_new(text: String, source_format: SourceFormat) -> Option<Self> {
        if text.trim().is_empty() {
            None
        } else {
            Some(Self {
                text,
                source_format,
            })
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source_format(&self) -> SourceFormat {
        self.source_format
    }

    pub fn into_text(self) -> String {
        self.text
    }
}
