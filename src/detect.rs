//! Word document format detection and validation.

use crate::error::{Error, Result};
use crate::package::{DOCUMENT_PART, STYLES_PART};
use std::fs;
use std::io::Cursor;
use std::path::Path;
use zip::ZipArchive;

/// Zip local file header magic: PK\x03\x04
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// `.docx` container information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocxFormat {
    /// Number of parts in the container
    pub parts: usize,
    /// Whether the container carries a styles part
    pub has_styles: bool,
}

impl std::fmt::Display for DocxFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DOCX ({} parts)", self.parts)
    }
}

/// Detect a `.docx` container from a file path.
///
/// # Example
/// ```no_run
/// use vulnreport::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("report.docx").unwrap();
/// println!("Parts: {}", format.parts);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<DocxFormat> {
    let data = fs::read(path)?;
    detect_format_from_bytes(&data)
}

/// Detect a `.docx` container from bytes.
///
/// # Returns
/// * `Ok(DocxFormat)` if the data is a zip archive holding `word/document.xml`
/// * `Err(Error::NotDocx)` if the data is not a zip archive
/// * `Err(Error::MissingPart)` if the archive has no main document part
pub fn detect_format_from_bytes(data: &[u8]) -> Result<DocxFormat> {
    if !is_zip_bytes(data) {
        return Err(Error::NotDocx);
    }

    let archive = ZipArchive::new(Cursor::new(data))?;
    let mut has_document = false;
    let mut has_styles = false;
    for name in archive.file_names() {
        match name {
            DOCUMENT_PART => has_document = true,
            STYLES_PART => has_styles = true,
            _ => {}
        }
    }

    if !has_document {
        return Err(Error::MissingPart(DOCUMENT_PART.to_string()));
    }

    Ok(DocxFormat {
        parts: archive.len(),
        has_styles,
    })
}

/// Check if a file is a Word document container.
pub fn is_docx<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

/// Check if bytes start with a zip local file header.
pub fn is_zip_bytes(data: &[u8]) -> bool {
    data.starts_with(ZIP_MAGIC)
}
