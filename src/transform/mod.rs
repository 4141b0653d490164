//! Restyling passes over a loaded report.
//!
//! Passes mutate the document in place and run in a fixed order; the final
//! table styling overrides sizes set earlier, and pruning detaches tables,
//! so the order below is part of the contract.

pub mod classify;
pub mod labels;
mod finish;
mod paragraphs;
mod propagate;
mod prune;
mod relabel;
mod restructure;

pub use classify::{classify_table, ParagraphClassifier, ParagraphRule, TableRole};
pub use finish::{apply_page_size, apply_table_style};
pub use paragraphs::{normalize_paragraphs, rewrite_text};
pub use propagate::propagate_cell_text;
pub use prune::prune_tables;
pub use relabel::relabel_tables;
pub use restructure::{harvest_cve_numbers, restructure_tables, FindingAccumulator};

use crate::config::{DocumentKind, StyleConfig};
use crate::error::Result;
use crate::model::Document;
use std::fmt;

/// One pass of the restyling pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Paragraph heading rewrites and font styling
    Normalize,
    /// Component table widening (detail reports)
    Restructure,
    /// Header relabeling, shading and borders
    Relabel,
    /// Removal of empty and boilerplate tables
    Prune,
    /// Finding values copied down component tables (detail reports)
    Propagate,
    /// Uniform table background, font and size
    TableStyle,
    /// Page size of every section
    PageSetup,
}

impl Stage {
    /// Every stage in execution order.
    pub const ALL: [Stage; 7] = [
        Stage::Normalize,
        Stage::Restructure,
        Stage::Relabel,
        Stage::Prune,
        Stage::Propagate,
        Stage::TableStyle,
        Stage::PageSetup,
    ];

    /// Whether the stage runs for a report flavor.
    pub fn applies_to(&self, kind: DocumentKind) -> bool {
        match self {
            Stage::Restructure | Stage::Propagate => kind.is_detail(),
            _ => true,
        }
    }

    /// The stages run for a report flavor, in order.
    pub fn pipeline(kind: DocumentKind) -> Vec<Stage> {
        Self::ALL
            .into_iter()
            .filter(|stage| stage.applies_to(kind))
            .collect()
    }

    /// Run this stage over a document.
    pub fn run(&self, doc: &mut Document, kind: DocumentKind, style: &StyleConfig) -> Result<()> {
        match self {
            Stage::Normalize => {
                let rewritten = normalize_paragraphs(doc, kind, style);
                log::info!("Normalized paragraphs ({} rewritten)", rewritten);
            }
            Stage::Restructure => {
                let widened = restructure_tables(doc, style)?;
                log::info!("Restructured {} component tables", widened);
            }
            Stage::Relabel => {
                let hits = relabel_tables(doc, kind, style);
                log::info!("Relabeled {} header runs", hits);
            }
            Stage::Prune => {
                let removed = prune_tables(doc, kind);
                log::info!("Removed {} tables, {} left", removed, doc.table_count());
            }
            Stage::Propagate => {
                let filled = propagate_cell_text(doc);
                log::info!("Filled finding columns in {} tables", filled);
            }
            Stage::TableStyle => {
                apply_table_style(doc, style);
                log::info!("Applied table style");
            }
            Stage::PageSetup => {
                apply_page_size(doc, style);
                log::info!(
                    "Set page size to {}x{} pt",
                    style.page_width,
                    style.page_height
                );
            }
        }
        Ok(())
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Normalize => "Normalizing paragraphs",
            Stage::Restructure => "Restructuring component tables",
            Stage::Relabel => "Relabeling table headers",
            Stage::Prune => "Pruning tables",
            Stage::Propagate => "Propagating finding values",
            Stage::TableStyle => "Styling tables",
            Stage::PageSetup => "Setting page size",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_per_kind() {
        assert_eq!(
            Stage::pipeline(DocumentKind::ExecutiveSummary),
            [
                Stage::Normalize,
                Stage::Relabel,
                Stage::Prune,
                Stage::TableStyle,
                Stage::PageSetup
            ]
        );
        assert_eq!(Stage::pipeline(DocumentKind::VulnerabilityDetail), Stage::ALL);
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Prune.to_string(), "Pruning tables");
    }
}
