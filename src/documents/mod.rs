// Résumé handling: binary document to plain text to draft candidate profile.

pub mod profile;

use std::panic::{AssertUnwindSafe, catch_unwind};

pub use profile::{CandidateProfile, extract_profile};

const PDF_SIGNATURE: &[u8] = b"%PDF-";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionError {
    #[error("Unsupported document format, expected application/pdf")]
    UnsupportedFormat,

    #[error("Could not read document: {0}")]
    CorruptDocument(String),
}

/// Text extraction engine consumed by the upload flow.
pub trait TextExtractor: Send + Sync {
    /// Plain UTF-8 text, pages concatenated in order, no layout reconstruction.
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// `pdf-extract` backed extractor. Works from memory.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        if !bytes.starts_with(PDF_SIGNATURE) {
            return Err(ExtractionError::UnsupportedFormat);
        }

        // pdf-extract panics on some malformed inputs instead of returning Err.
        match catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes))) {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(ExtractionError::CorruptDocument(e.to_string())),
            Err(_) => Err(ExtractionError::CorruptDocument(
                "PDF decoder aborted".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_pdf_bytes() {
        let err = PdfTextExtractor
            .extract_text(b"PK\x03\x04 this is a docx")
            .unwrap_err();
        assert_eq!(err, ExtractionError::UnsupportedFormat);
    }

    #[test]
    fn rejects_empty_upload_as_unsupported() {
        assert_eq!(
            PdfTextExtractor.extract_text(&[]).unwrap_err(),
            ExtractionError::UnsupportedFormat
        );
    }

    #[test]
    fn truncated_pdf_is_corrupt() {
        let err = PdfTextExtractor
            .extract_text(b"%PDF-1.7\n1 0 obj\n<< /Type /Catalog")
            .unwrap_err();
        assert!(matches!(err, ExtractionError::CorruptDocument(_)));
    }
}
