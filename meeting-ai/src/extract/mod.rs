//! Format routing and text extraction for uploaded transcripts.
//!
//! The extension of the declared filename selects an extractor from a fixed table.
//! Every extractor either returns a [`NormalizedTranscript`] or fails with an
//! [`InputError`]; none of them can hand back empty text.

mod document;
mod pdf;
mod plain;
mod vtt;

use crate::error::InputError;
use crate::types::transcript::{NormalizedTranscript, RawUpload};
use log::*;

/// Signature shared by all extractors.
pub type Extractor = fn(&[u8]) -> Result<NormalizedTranscript, InputError>;

/// Extension to extractor table. Keys are lowercase and unique.
const EXTRACTORS: &[(&str, Extractor)] = &[
    ("txt", plain::extract),
    ("vtt", vtt::extract),
    ("docx", document::extract),
    ("doc", document::extract),
    ("pdf", pdf::extract),
];

/// Extensions accepted by [`extract`], without the leading dot.
pub fn supported_extensions() -> impl Iterator<Item = &'static str> {
    EXTRACTORS.iter().map(|(ext, _)| *ext)
}

/// Lowercase text after the final `.` of `filename`, or `None` when there is no dot.
pub fn extension_of(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
}

/// Select the extractor registered for `filename`'s extension.
pub fn route(filename: &str) -> Result<Extractor, InputError> {
    let extension = extension_of(filename).unwrap_or_default();

    EXTRACTORS
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, extractor)| *extractor)
        .ok_or_else(|| {
            debug!("No extractor registered for extension [{}]", extension);
            InputError::UnsupportedFormat(extension)
        })
}

/// Turn `bytes` into normalized transcript text using the extractor for `filename`.
pub fn extract(bytes: &[u8], filename: &str) -> Result<NormalizedTranscript, InputError> {
    let extractor = route(filename)?;
    let transcript = extractor(bytes)?;

    debug!(
        "Extracted {} characters of {} text from {} byte upload",
        transcript.text().len(),
        transcript.source_format(),
        bytes.len()
    );

    Ok(transcript)
}

/// Convenience wrapper over [`extract`] for a [`RawUpload`].
pub fn extract_upload(upload: &RawUpload) -> Result<NormalizedTranscript, InputError> {
    extract(&upload.bytes, &upload.filename)
}
