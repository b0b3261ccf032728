//! DOCX raw-text extraction.
//!
//! A .docx file is a ZIP archive; the document body lives in
//! `word/document.xml`. Text runs (`w:t`) are concatenated, paragraph ends
//! emit newlines, and explicit breaks/tabs emit whitespace.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use super::ExtractError;

pub fn extract(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractError::Parse(format!("not a DOCX archive: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractError::Parse(format!("DOCX has no document body: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractError::Parse(format!("failed to read document body: {e}")))?;

    document_text(&xml)
}

fn document_text(xml: &str) -> Result<String, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    // Only text inside w:t elements is document content; everything else in
    // the XML stream is markup or inter-tag whitespace.
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:t" => in_text_run = true,
                // Breaks and tabs are usually self-closing but need not be
                b"w:br" | b"w:tab" => out.push(' '),
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text_run => {
                let text = t
                    .unescape()
                    .map_err(|e| ExtractError::Parse(format!("invalid document XML: {e}")))?;
                out.push_str(&text);
            }
            Ok(Event::Empty(e)) if matches!(e.name().as_ref(), b"w:br" | b"w:tab") => {
                out.push(' ')
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(ExtractError::Parse(format!("invalid document XML: {e}")));
            }
        }
    }

    Ok(out.trim_end().to_string())
}
