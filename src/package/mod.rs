//! `.docx` package handling: the zip container and its parts.
//!
//! A package is loaded whole and kept in part order. Only
//! `word/document.xml` is rewritten on save; every other part (styles,
//! numbering, media, relationships) is carried through byte for byte.

mod styles;
pub(crate) mod wml;

use crate::detect::is_zip_bytes;
use crate::error::{Error, Result};
use crate::model::{Document, Styles};
use crate::xml::XmlDocument;
use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Main document part.
pub const DOCUMENT_PART: &str = "word/document.xml";

/// Style definitions part.
pub const STYLES_PART: &str = "word/styles.xml";

const NS_CT: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const NS_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// One named part of a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    /// Part name inside the archive
    pub name: String,
    /// Raw part content
    pub data: Vec<u8>,
}

/// The parts of a `.docx` container in archive order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Package {
    parts: Vec<Part>,
}

impl Package {
    /// Read every part of a zip container.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if !is_zip_bytes(data) {
            return Err(Error::NotDocx);
        }

        let mut archive = ZipArchive::new(Cursor::new(data))?;
        let mut parts = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let mut file = archive.by_index(index)?;
            if file.is_dir() {
                continue;
            }
            let name = file.name().to_string();
            let mut content = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut content)?;
            parts.push(Part {
                name,
                data: content,
            });
        }

        log::debug!("Loaded package with {} parts", parts.len());
        Ok(Self { parts })
    }

    /// A minimal package around a document part, with the given styles.
    pub fn minimal(styles: &Styles) -> Result<Self> {
        let mut package = Self::default();
        package.set_part("[Content_Types].xml", content_types_xml().into_bytes());
        package.set_part("_rels/.rels", package_rels_xml().into_bytes());
        package.set_part("word/_rels/document.xml.rels", document_rels_xml().into_bytes());
        package.set_part(STYLES_PART, styles::write_styles(styles).to_bytes()?);
        Ok(package)
    }

    /// Get a part's content.
    pub fn part(&self, name: &str) -> Option<&[u8]> {
        self.parts
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.data.as_slice())
    }

    /// Get a part's content as text (UTF-8, byte-order mark stripped).
    pub fn part_text(&self, name: &str) -> Result<Option<String>> {
        let Some(data) = self.part(name) else {
            return Ok(None);
        };
        let text = std::str::from_utf8(data)
            .map_err(|e| Error::Xml(format!("{} is not valid UTF-8: {}", name, e)))?;
        Ok(Some(text.trim_start_matches('\u{feff}').to_string()))
    }

    /// Replace a part's content, appending the part when it is new.
    pub fn set_part(&mut self, name: &str, data: Vec<u8>) {
        match self.parts.iter_mut().find(|p| p.name == name) {
            Some(part) => part.data = data,
            None => self.parts.push(Part {
                name: name.to_string(),
                data,
            }),
        }
    }

    /// Part names in archive order.
    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|p| p.name.as_str())
    }

    /// Write the package as a zip container.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for part in &self.parts {
            zip.start_file(part.name.as_str(), options)?;
            zip.write_all(&part.data)?;
        }
        Ok(zip.finish()?.into_inner())
    }
}

impl Document {
    /// Load a `.docx` file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Document> {
        let data = fs::read(path.as_ref())?;
        Self::from_bytes(&data)
    }

    /// Load a `.docx` document from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Document> {
        Self::from_package(Package::from_bytes(data)?)
    }

    /// Build a document from a loaded package.
    pub fn from_package(package: Package) -> Result<Document> {
        let xml = package
            .part_text(DOCUMENT_PART)?
            .ok_or_else(|| Error::MissingPart(DOCUMENT_PART.to_string()))?;
        let parsed = XmlDocument::parse(&xml)?;
        let (shell, body) = wml::read_document(parsed)?;

        let styles = match package.part_text(STYLES_PART)? {
            Some(text) => styles::parse_styles(&XmlDocument::parse(&text)?.root),
            None => Styles::default(),
        };

        Ok(Document {
            body,
            styles,
            shell: Some(shell),
            package: Some(package),
        })
    }

    /// Serialize the document as a `.docx` container.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let shell = self.shell.clone().unwrap_or_else(wml::empty_document);
        let part = wml::write_document(shell, &self.body).to_bytes()?;

        let mut package = match self.package {
            Some(ref package) => package.clone(),
            None => Package::minimal(&self.styles)?,
        };
        package.set_part(DOCUMENT_PART, part);
        package.to_bytes()
    }

    /// Save the document as a `.docx` file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        fs::write(path.as_ref(), bytes)?;
        log::info!("Saved document to {}", path.as_ref().display());
        Ok(())
    }
}

fn content_types_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="{}"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/></Types>"#,
        NS_CT
    )
}

fn package_rels_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#,
        NS_RELS
    )
}

fn document_rels_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#,
        NS_RELS
    )
}
