//! PDF text extraction via the `pdf-extract` crate.

use super::ExtractError;

/// Extracts plain text from an in-memory PDF buffer.
///
/// The extractor's internal document resources are scoped to this call and
/// released on return, success or failure. Extraction failures are wrapped
/// with the underlying message, never swallowed.
pub fn extract(bytes: &[u8]) -> Result<String, ExtractError> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractError::Parse(format!("PDF extraction failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_are_a_parse_error() {
        let err = extract(b"this is not a pdf").unwrap_err();
        match err {
            ExtractError::Parse(msg) => assert!(msg.contains("PDF extraction failed")),
            other => panic!("expected Parse, got {other:?}"),
        }
    }
}
