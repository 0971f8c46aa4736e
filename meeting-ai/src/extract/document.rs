//! Office document (.docx/.doc) extraction.
//!
//! Reads the main WordprocessingML part of the package and keeps only run text,
//! tabs and line breaks. Headers, footers, comments and media live in other parts
//! and are never opened.

use crate::error::InputError;
use crate::types::transcript::{NormalizedTranscript, SourceFormat};
use log::*;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use zip::ZipArchive;

const MAIN_DOCUMENT_PART: &str = "word/document.xml";
const FORMAT: &str = "document";

pub(super) fn extract(bytes: &[u8]) -> Result<NormalizedTranscript, InputError> {
    let xml = read_main_part(bytes)?;
    let text = paragraph_text(&xml)?;

    NormalizedTranscript::try_new(text.trim().to_string(), SourceFormat::Document)
        .ok_or(InputError::NoTextContent)
}

fn read_main_part(bytes: &[u8]) -> Result<String, InputError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| {
        warn!("Failed to open document package: {:?}", e);
        InputError::unreadable(FORMAT, e)
    })?;

    let mut part = archive.by_name(MAIN_DOCUMENT_PART).map_err(|e| {
        warn!("Document package has no {}: {:?}", MAIN_DOCUMENT_PART, e);
        InputError::unreadable(FORMAT, e)
    })?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| InputError::unreadable(FORMAT, e))?;
    Ok(xml)
}

/// Flatten the document body to text, one line per paragraph.
fn paragraph_text(xml: &str) -> Result<String, InputError> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_text_run = false;
    // Tab stop definitions inside paragraph properties are also named `tab`.
    let mut in_paragraph_props = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"t" => in_text_run = true,
                b"pPr" => in_paragraph_props = true,
                _ => {}
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text_run = false,
                b"pPr" => in_paragraph_props = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"tab" if !in_paragraph_props => text.push('\t'),
                b"br" | b"cr" => text.push('\n'),
                b"p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text_run => {
                let unescaped = t
                    .unescape()
                    .map_err(|e| InputError::unreadable(FORMAT, e))?;
                text.push_str(&unescaped);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                warn!(
                    "Malformed document XML at position {}: {:?}",
                    reader.buffer_position(),
                    e
                );
                return Err(InputError::unreadable(FORMAT, e));
            }
            _ => {}
        }
    }

    Ok(text)
}
