//! Document Text Extractor — turns an uploaded CV (PDF, DOCX, or plain text)
//! into plain text for the generation pipeline.

mod docx;
pub mod handlers;
mod pdf;

use thiserror::Error;

/// Mime type of an Office Open XML word-processing document.
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
/// Mime type of a PDF document.
pub const PDF_MIME: &str = "application/pdf";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    Parse(String),
}

/// Extracts plain text from a document buffer based on its declared mime type.
///
/// An empty buffer is a degenerate but valid input and yields an empty string,
/// regardless of the declared type. Plain-text families (including Markdown)
/// are decoded verbatim as UTF-8 with no parsing.
pub fn extract_text(bytes: &[u8], mime_type: &str) -> Result<String, ExtractError> {
    if bytes.is_empty() {
        return Ok(String::new());
    }

    match mime_type {
        PDF_MIME => pdf::extract(bytes),
        DOCX_MIME => docx::extract(bytes),
        t if t.starts_with("text/") => String::from_utf8(bytes.to_vec())
            .map_err(|e| ExtractError::Parse(format!("file is not valid UTF-8 text: {e}"))),
        other => Err(ExtractError::UnsupportedFormat(other.to_string())),
    }
}

/// Resolves the effective mime type of an upload. Browsers sometimes send
/// `application/octet-stream` for known document types, so the filename
/// extension is consulted as a fallback.
pub fn resolve_mime(content_type: Option<&str>, filename: Option<&str>) -> String {
    match content_type {
        Some(ct) if ct != "application/octet-stream" => ct.to_string(),
        _ => match filename.and_then(extension_of) {
            Some("pdf") => PDF_MIME.to_string(),
            Some("docx") => DOCX_MIME.to_string(),
            Some("md") => "text/markdown".to_string(),
            Some("txt") => "text/plain".to_string(),
            _ => content_type
                .unwrap_or("application/octet-stream")
                .to_string(),
        },
    }
}

fn extension_of(filename: &str) -> Option<&str> {
    filename.rsplit_once('.').map(|(_, ext)| ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_round_trips_unchanged() {
        let input = "Jane Doe\nRust engineer since 2015.\n";
        let out = extract_text(input.as_bytes(), "text/plain").unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_markdown_is_treated_as_plain_text() {
        let input = "# CV\n\n- built *things*\n";
        let out = extract_text(input.as_bytes(), "text/markdown").unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_empty_buffer_yields_empty_string_for_any_mime() {
        for mime in [PDF_MIME, DOCX_MIME, "text/plain", "image/png"] {
            assert_eq!(extract_text(&[], mime).unwrap(), "");
        }
    }

    #[test]
    fn test_unsupported_mime_names_the_offender() {
        let err = extract_text(b"GIF89a", "image/gif").unwrap_err();
        match err {
            ExtractError::UnsupportedFormat(mime) => assert_eq!(mime, "image/gif"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_utf8_text_is_a_parse_error() {
        let err = extract_text(&[0xff, 0xfe, 0x00], "text/plain").unwrap_err();
        assert!(matches!(err, ExtractError::Parse(_)));
    }

    #[test]
    fn test_resolve_mime_prefers_declared_type() {
        assert_eq!(resolve_mime(Some("text/plain"), Some("cv.pdf")), "text/plain");
    }

    #[test]
    fn test_resolve_mime_falls_back_to_extension() {
        assert_eq!(
            resolve_mime(Some("application/octet-stream"), Some("cv.pdf")),
            PDF_MIME
        );
        assert_eq!(resolve_mime(None, Some("cv.docx")), DOCX_MIME);
        assert_eq!(resolve_mime(None, Some("notes.md")), "text/markdown");
    }
}
