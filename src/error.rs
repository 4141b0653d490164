//! Error types for vulnreport library.

use std::io;
use thiserror::Error;

/// Result type alias for vulnreport operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while restyling a report.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not a Word document container.
    #[error("Unknown file format: not a valid .docx document")]
    NotDocx,

    /// Error reading or writing the zip container.
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Malformed XML or WordprocessingML markup.
    #[error("XML error: {0}")]
    Xml(String),

    /// A required package part is missing.
    #[error("Missing package part: {0}")]
    MissingPart(String),

    /// Configuration could not be read or deserialized.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The document type selector is not recognized.
    #[error("Unknown document type '{0}' (expected 'sum' or 'vul')")]
    UnknownDocumentType(String),

    /// A table does not have the shape the restructuring pass requires.
    #[error("Table {table} has an unexpected shape: {rows} rows, {cells} cells in row {row}")]
    TableShape {
        /// Index of the table in the document
        table: usize,
        /// Row count of the table
        rows: usize,
        /// Row whose cell count is too small
        row: usize,
        /// Cell count of that row
        cells: usize,
    },

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Config(err.to_string())
    }
}
