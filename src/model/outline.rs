//! Structural outline of a document, for inspecting report templates.

use super::{Block, Document, Table};
use serde::Serialize;

/// Block-by-block summary of a document body.
#[derive(Debug, Clone, Serialize)]
pub struct Outline {
    /// Number of top-level tables
    pub table_count: usize,
    /// Number of top-level paragraphs
    pub paragraph_count: usize,
    /// Summaries of each block in order
    pub blocks: Vec<BlockSummary>,
}

/// Summary of one top-level block.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockSummary {
    /// A paragraph with its style and text
    Paragraph {
        /// Declared style id
        style: Option<String>,
        /// Declared style font size in points
        font_size: Option<f32>,
        /// Paragraph text
        text: String,
    },
    /// A table with its shape and header row
    Table {
        /// Index among top-level tables
        index: usize,
        /// Row count
        rows: usize,
        /// Column count
        columns: usize,
        /// Header row texts
        header: Vec<String>,
        /// Whether the table flows right-to-left
        right_to_left: bool,
    },
    /// Uninterpreted markup
    Other {
        /// Element name
        name: String,
    },
}

impl Document {
    /// Build a structural outline of the body.
    pub fn outline(&self) -> Outline {
        let mut table_index = 0;
        let blocks = self
            .body
            .iter()
            .map(|block| match block {
                Block::Paragraph(p) => BlockSummary::Paragraph {
                    style: p.style_id().map(str::to_string),
                    font_size: self.styles.font_size(p.style_id()),
                    text: p.text(),
                },
                Block::Table(t) => {
                    let summary = table_summary(table_index, t);
                    table_index += 1;
                    summary
                }
                Block::Other(e) => BlockSummary::Other {
                    name: e.name.clone(),
                },
            })
            .collect();

        Outline {
            table_count: self.table_count(),
            paragraph_count: self.paragraphs().count(),
            blocks,
        }
    }
}

fn table_summary(index: usize, table: &Table) -> BlockSummary {
    BlockSummary::Table {
        index,
        rows: table.row_count(),
        columns: table.column_count(),
        header: table.header_texts(),
        right_to_left: table.is_right_to_left(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Paragraph;

    #[test]
    fn test_outline_counts_blocks() {
        let mut doc = Document::new();
        doc.styles.add_paragraph_style("Title", Some(18.0));
        doc.add_paragraph(Paragraph::with_text("Report").styled("Title"));
        doc.add_table(Table::from_rows([["IP Address", "Port"], ["10.0.0.5", "443"]]));

        let outline = doc.outline();
        assert_eq!(outline.table_count, 1);
        assert_eq!(outline.paragraph_count, 1);
        match &outline.blocks[0] {
            BlockSummary::Paragraph { font_size, .. } => assert_eq!(*font_size, Some(18.0)),
            other => panic!("unexpected block {:?}", other),
        }
        match &outline.blocks[1] {
            BlockSummary::Table { header, columns, .. } => {
                assert_eq!(header, &["IP Address", "Port"]);
                assert_eq!(*columns, 2);
            }
            other => panic!("unexpected block {:?}", other),
        }
    }

    #[test]
    fn test_outline_serializes() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("x"));
        let json = serde_json::to_string(&doc.outline()).unwrap();
        assert!(json.contains("\"type\":\"paragraph\""));
    }
}
