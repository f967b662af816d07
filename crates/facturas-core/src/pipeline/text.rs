//! Text providers for local files.

use std::fs;

use tracing::debug;

use super::{normalize_extracted_text, DocumentRef, TextProvider};
use crate::error::{FacturasError, PdfError};
use crate::Result;

/// Reads text from PDF files (text layer only) and plain `.txt` files.
#[derive(Debug, Clone, Default)]
pub struct FileTextProvider;

impl FileTextProvider {
    pub fn new() -> Self {
        Self
    }
}

impl TextProvider for FileTextProvider {
    fn text(&self, doc: &DocumentRef) -> Result<String> {
        let extension = doc
            .path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        let raw = match extension.as_str() {
            "pdf" => read_pdf(doc)?,
            "txt" => fs::read_to_string(&doc.path)?,
            _ => return Err(FacturasError::Unsupported(format!("{} ({})", doc.name, extension))),
        };

        // Scanned PDFs parse fine but have no text layer
        if normalize_extracted_text(&raw).is_empty() {
            return Err(PdfError::NoText.into());
        }

        debug!("Read {} characters from {}", raw.len(), doc.path.display());
        Ok(raw)
    }
}

#[cfg(feature = "pdf")]
fn read_pdf(doc: &DocumentRef) -> Result<String> {
    let data = fs::read(&doc.path)?;
    Ok(crate::pdf::PdfExtractor::text_from_bytes(&data)?)
}

#[cfg(not(feature = "pdf"))]
fn read_pdf(_doc: &DocumentRef) -> Result<String> {
    Err(PdfError::Disabled.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn doc(path: &Path) -> DocumentRef {
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        DocumentRef {
            id: name.clone(),
            name,
            path: path.to_path_buf(),
        }
    }

    #[test]
    fn test_reads_text_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("factura.TXT");
        fs::write(&path, "FACTURA A\nCUIT 30-12345678-9").unwrap();

        let text = FileTextProvider::new().text(&doc(&path)).unwrap();
        assert!(text.contains("CUIT 30-12345678-9"));
    }

    #[test]
    fn test_blank_text_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.txt");
        fs::write(&path, " \u{00A0}\n ").unwrap();

        let result = FileTextProvider::new().text(&doc(&path));
        assert!(matches!(result, Err(FacturasError::Pdf(PdfError::NoText))));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.png");
        fs::write(&path, [0u8; 4]).unwrap();

        let result = FileTextProvider::new().text(&doc(&path));
        assert!(matches!(result, Err(FacturasError::Unsupported(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");

        let result = FileTextProvider::new().text(&doc(&path));
        assert!(matches!(result, Err(FacturasError::Io(_))));
    }

    #[cfg(feature = "pdf")]
    #[test]
    fn test_corrupt_pdf_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.pdf");
        fs::write(&path, b"%PDF-garbage").unwrap();

        let result = FileTextProvider::new().text(&doc(&path));
        assert!(matches!(result, Err(FacturasError::Pdf(PdfError::Parse(_) | PdfError::NoPages))));
    }
}
