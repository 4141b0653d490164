//! Text-based classification of report tables and paragraphs.
//!
//! The scanner templates carry no semantic markup, so roles are decided by
//! exact-string and prefix matching over the human-readable labels. Each
//! rule is a named predicate; passes ask for roles instead of comparing
//! strings inline.

use crate::config::DocumentKind;
use crate::model::{Paragraph, Styles, Table};
use regex::Regex;
use serde::Serialize;

/// Header of the per-component table the restructuring pass widens.
pub const IP_ADDRESS_LABEL: &str = "IP Address";

/// Replacement heading for [`IP_ADDRESS_LABEL`].
pub const COMPONENT_LABEL: &str = "Component";

/// First-cell text of the customer/ASV details table.
pub const CUSTOMER_MARKER: &str = "Scan Customer Company";

/// First-cell prefix of the detail report's scan boilerplate table.
pub const BOILERPLATE_PREFIX: &str = "1 Scan";

/// Declared style size of report headings, in half points (18pt).
pub const HEADING_HALF_POINTS: u32 = 36;

/// Role of a top-level table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableRole {
    /// Empty or scan-boilerplate table, removed by the pruning pass
    Boilerplate,
    /// Per-component table still headed by "IP Address"
    ComponentTable,
    /// Restructured table headed by "Component" in its last column
    ComponentHeader,
    /// Customer and ASV company details
    CustomerDetails,
    /// Anything else
    Data,
}

impl std::fmt::Display for TableRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TableRole::Boilerplate => "boilerplate",
            TableRole::ComponentTable => "component table",
            TableRole::ComponentHeader => "component header",
            TableRole::CustomerDetails => "customer details",
            TableRole::Data => "data",
        };
        f.write_str(name)
    }
}

/// Classify a table. Earlier roles win when several predicates match.
pub fn classify_table(table: &Table, kind: DocumentKind) -> TableRole {
    if is_boilerplate(table, kind) {
        TableRole::Boilerplate
    } else if is_ip_address_table(table) {
        TableRole::ComponentTable
    } else if is_component_header(table) {
        TableRole::ComponentHeader
    } else if is_customer_table(table) {
        TableRole::CustomerDetails
    } else {
        TableRole::Data
    }
}

/// Empty first cell, or (detail reports) first cell starting with "1 Scan".
pub fn is_boilerplate(table: &Table, kind: DocumentKind) -> bool {
    match table.first_cell_text() {
        None => true,
        Some(text) if text.is_empty() => true,
        Some(text) => kind.is_detail() && text.starts_with(BOILERPLATE_PREFIX),
    }
}

/// First run of the first cell reads exactly "IP Address".
pub fn is_ip_address_table(table: &Table) -> bool {
    first_run_text(table).as_deref() == Some(IP_ADDRESS_LABEL)
}

/// More than two header cells and the last one reads exactly "Component".
pub fn is_component_header(table: &Table) -> bool {
    let Some(header) = table.rows.first() else {
        return false;
    };
    header.cells.len() > 2
        && header
            .cells
            .last()
            .is_some_and(|cell| cell.text() == COMPONENT_LABEL)
}

/// First cell mentions "Scan Customer Company".
pub fn is_customer_table(table: &Table) -> bool {
    table
        .cell(0, 0)
        .is_some_and(|cell| cell.text().contains(CUSTOMER_MARKER))
}

fn first_run_text(table: &Table) -> Option<String> {
    let paragraph = table.cell(0, 0)?.paragraphs().next()?;
    paragraph.runs().first().map(|run| run.text())
}

/// What the normalization pass does with a top-level paragraph's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphRule {
    /// Section marker or table of contents heading: clear the text
    Discard,
    /// "Part 2b..." heading: renumber to "Part 2"
    PartHeading,
    /// 18pt detail report heading with a leading number: strip it
    NumberedHeading,
    /// Leave the text alone
    Plain,
}

/// Paragraph classifier for one report flavor.
#[derive(Debug, Clone)]
pub struct ParagraphClassifier {
    kind: DocumentKind,
    toc_marker: Regex,
}

impl ParagraphClassifier {
    /// Create a classifier for a report flavor.
    pub fn new(kind: DocumentKind) -> Self {
        Self {
            kind,
            toc_marker: Regex::new(r"(?i)table of contents").unwrap(),
        }
    }

    /// Decide the rule for a paragraph text. `half_points` is the font
    /// size its style declares; only headings lose their number.
    pub fn classify(&self, text: &str, half_points: Option<u32>) -> ParagraphRule {
        if self.is_section_marker(text) {
            ParagraphRule::Discard
        } else if is_part_heading(text) {
            ParagraphRule::PartHeading
        } else if self.kind.is_detail()
            && half_points == Some(HEADING_HALF_POINTS)
            && is_numbered(text)
        {
            ParagraphRule::NumberedHeading
        } else {
            ParagraphRule::Plain
        }
    }

    /// Classify a paragraph by its text and declared style size.
    pub fn classify_paragraph(&self, paragraph: &Paragraph, styles: &Styles) -> ParagraphRule {
        self.classify(
            &paragraph.text(),
            styles.font_size_half_points(paragraph.style_id()),
        )
    }

    /// "Part 2a", a bare leading "2", or a table of contents heading.
    pub fn is_section_marker(&self, text: &str) -> bool {
        text.starts_with("Part 2a") || text.starts_with('2') || self.toc_marker.is_match(text)
    }
}

/// Starts with "Part 2b".
pub fn is_part_heading(text: &str) -> bool {
    text.starts_with("Part 2b")
}

/// Starts with an ASCII digit.
pub fn is_numbered(text: &str) -> bool {
    text.starts_with(|c: char| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Paragraph, Run, TableCell, TableRow};

    const SUM: DocumentKind = DocumentKind::ExecutiveSummary;
    const VUL: DocumentKind = DocumentKind::VulnerabilityDetail;

    #[test]
    fn test_boilerplate() {
        assert!(is_boilerplate(&Table::from_rows([[""]]), SUM));
        assert!(is_boilerplate(&Table::new(), SUM));
        assert!(is_boilerplate(&Table::from_rows([["1 Scan Information"]]), VUL));
        assert!(!is_boilerplate(&Table::from_rows([["1 Scan Information"]]), SUM));
        assert!(!is_boilerplate(&Table::from_rows([["Severity"]]), VUL));
    }

    #[test]
    fn test_ip_address_table_checks_first_run_only() {
        assert!(is_ip_address_table(&Table::from_rows([["IP Address", "Port"]])));
        assert!(!is_ip_address_table(&Table::from_rows([["IP Address – Host"]])));

        let mut paragraph = Paragraph::new();
        paragraph.add_run(Run::new("IP"));
        paragraph.add_run(Run::new(" Address"));
        let mut table = Table::new();
        table.add_row(TableRow::new(vec![TableCell {
            properties: None,
            content: vec![crate::model::Block::Paragraph(paragraph)],
        }]));
        assert!(!is_ip_address_table(&table));
    }

    #[test]
    fn test_component_header() {
        assert!(is_component_header(&Table::from_rows([["a", "b", "Component"]])));
        assert!(!is_component_header(&Table::from_rows([["b", "Component"]])));
        assert!(!is_component_header(&Table::from_rows([["Component", "a", "b"]])));
    }

    #[test]
    fn test_customer_table() {
        let table = Table::from_rows([["Scan Customer Company: ", "Acme"]]);
        assert!(is_customer_table(&table));
        assert_eq!(classify_table(&table, SUM), TableRole::CustomerDetails);
    }

    #[test]
    fn test_classify_table_precedence() {
        assert_eq!(classify_table(&Table::from_rows([[""]]), VUL), TableRole::Boilerplate);
        assert_eq!(
            classify_table(&Table::from_rows([["IP Address", "x", "y"]]), VUL),
            TableRole::ComponentTable
        );
        assert_eq!(
            classify_table(&Table::from_rows([["x", "y", "Component"]]), VUL),
            TableRole::ComponentHeader
        );
        assert_eq!(classify_table(&Table::from_rows([["Port"]]), VUL), TableRole::Data);
    }

    #[test]
    fn test_paragraph_rules() {
        let sum = ParagraphClassifier::new(SUM);
        let vul = ParagraphClassifier::new(VUL);

        let heading = Some(HEADING_HALF_POINTS);

        assert_eq!(sum.classify("2 Executive Summary", None), ParagraphRule::Discard);
        assert_eq!(sum.classify("Part 2a. Scan", heading), ParagraphRule::Discard);
        assert_eq!(sum.classify("Table Of Contents", None), ParagraphRule::Discard);
        assert_eq!(sum.classify("Part 2b. Findings", heading), ParagraphRule::PartHeading);
        assert_eq!(sum.classify("3 Details", heading), ParagraphRule::Plain);
        assert_eq!(vul.classify("3 Details", heading), ParagraphRule::NumberedHeading);
        assert_eq!(vul.classify("3 Details", Some(20)), ParagraphRule::Plain);
        assert_eq!(vul.classify("3 Details", None), ParagraphRule::Plain);
        assert_eq!(vul.classify("Details", heading), ParagraphRule::Plain);
        assert_eq!(vul.classify("", heading), ParagraphRule::Plain);
    }

    #[test]
    fn test_toc_marker_is_literal() {
        let sum = ParagraphClassifier::new(SUM);
        assert!(sum.is_section_marker("Report table of contents"));
        assert!(sum.is_section_marker("TABLE OF CONTENTS"));
        assert!(!sum.is_section_marker("Table of\nContents"));
        assert!(!sum.is_section_marker("Table  of contents"));
    }

    #[test]
    fn test_classify_paragraph_uses_declared_style() {
        let mut styles = Styles::new();
        styles.add_paragraph_style("Title", Some(18.0));
        styles.add_paragraph_style("Body", Some(10.0));
        let vul = ParagraphClassifier::new(VUL);

        let title = Paragraph::with_text("3 Vulnerability Details").styled("Title");
        let body = Paragraph::with_text("5 vulnerabilities were found").styled("Body");
        assert_eq!(vul.classify_paragraph(&title, &styles), ParagraphRule::NumberedHeading);
        assert_eq!(vul.classify_paragraph(&body, &styles), ParagraphRule::Plain);
    }
}
