//! PDF text layer extraction. Scanned, image-only PDFs yield no text; there is no OCR.

use crate::error::InputError;
use crate::types::transcript::{NormalizedTranscript, SourceFormat};
use log::*;
use std::panic::{self, AssertUnwindSafe};

const FORMAT: &str = "pdf";

pub(super) fn extract(bytes: &[u8]) -> Result<NormalizedTranscript, InputError> {
    // pdf-extract panics on some malformed inputs instead of returning an error.
    let extracted = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(bytes)
    }))
    .map_err(|_| {
        warn!("PDF text extraction aborted on malformed input");
        InputError::unreadable(FORMAT, "malformed PDF structure")
    })?
    .map_err(|e| {
        warn!("Failed to extract PDF text: {:?}", e);
        InputError::unreadable(FORMAT, e)
    })?;

    NormalizedTranscript::try_new(extracted.trim().to_string(), SourceFormat::Pdf)
        .ok_or(InputError::NoTextContent)
}
