//! Document model types for WordprocessingML content.
//!
//! The model covers the parts of a `.docx` body the restyling passes read
//! and rewrite: paragraphs, runs, hyperlinks and tables. Everything else is
//! held as opaque [`Element`](crate::xml::Element)s and written back as
//! found.

mod document;
mod outline;
mod paragraph;
mod properties;
mod table;

pub use document::{Block, Document, Styles};
pub use outline::{BlockSummary, Outline};
pub use paragraph::{Hyperlink, Paragraph, ParagraphContent, Run, RunContent};
pub use properties::{Border, BorderSide, Rgb};
pub use table::{Table, TableCell, TableRow, DEFAULT_COLUMN_WIDTH};

pub(crate) use properties::{W_PPR, W_RPR, W_TBLPR, W_TCPR};
