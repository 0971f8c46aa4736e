//! Plain text (.txt) extraction.

use crate::error::InputError;
use crate::types::transcript::{NormalizedTranscript, SourceFormat};

/// Decode as UTF-8 and keep the text as-is. Invalid sequences become U+FFFD.
pub(super) fn extract(bytes: &[u8]) -> Result<NormalizedTranscript, InputError> {
    let text = String::from_utf8_lossy(bytes).into_owned();
    NormalizedTranscript::try_new(text, SourceFormat::Plain).ok_or(InputError::EmptyContent)
}
