//! Column restructuring for vulnerability detail reports.
//!
//! The scanner spreads one finding over several small tables: a label table
//! carrying severity, CVSS score and references, followed by a component
//! table headed "IP Address". This pass harvests the label values while
//! scanning and folds them into the component table as extra columns.

use super::classify::{is_ip_address_table, IP_ADDRESS_LABEL};
use crate::config::StyleConfig;
use crate::error::{Error, Result};
use crate::model::{Document, Paragraph, Table};

/// Value used when a finding lists no CVE references.
pub const NO_CVE: &str = "N/A";

/// Headers of the appended columns, in order.
pub const NEW_COLUMN_HEADERS: [&str; 6] = [
    "CVSS Score",
    "CVE Number",
    "Severity Level",
    "Vulnerability",
    "Evidence",
    "Port",
];

/// Per-row copies `(target, source)`; negative indices count from the end
/// of the widened row.
const COLUMN_COPIES: [(isize, isize); 4] = [(-1, 0), (-2, 1), (-3, 4), (2, 5)];

/// Columns of the original layout removed once every table is widened,
/// highest first.
const REDUNDANT_COLUMNS: [usize; 4] = [5, 4, 1, 0];

/// Cells every row of a component table needs for the copies above.
const MIN_ROW_CELLS: usize = 6;

/// Finding values collected since the last restructured table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindingAccumulator {
    /// Text following a "Severity" label
    pub severity: String,
    /// Numeric prefix of the text following a "CVSSv2 Score" label
    pub cvss_score: String,
    /// Comma-separated CVE identifiers from the references paragraph
    pub cve_numbers: String,
}

impl Default for FindingAccumulator {
    fn default() -> Self {
        Self {
            severity: String::new(),
            cvss_score: String::new(),
            cve_numbers: NO_CVE.to_string(),
        }
    }
}

impl FindingAccumulator {
    /// Forget the collected values.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Feed a run text given the text of the run before it.
    pub fn observe_run(&mut self, previous: &str, text: &str, references: &str) {
        match previous {
            "Severity" => self.severity = text.to_string(),
            "CVSSv2 Score" => self.cvss_score = cvss_prefix(text).to_string(),
            "References" => self.cve_numbers = references.to_string(),
            _ => {}
        }
    }
}

/// The scan's one-item look-behind.
#[derive(Debug, Clone)]
struct ScanWindow {
    previous_paragraph: String,
    previous_run: String,
    references: String,
}

impl Default for ScanWindow {
    fn default() -> Self {
        Self {
            previous_paragraph: String::new(),
            previous_run: String::new(),
            references: NO_CVE.to_string(),
        }
    }
}

/// Widen every component table with the finding values gathered before it,
/// then drop the original columns and flip those tables right-to-left.
///
/// Returns the number of widened tables.
pub fn restructure_tables(doc: &mut Document, style: &StyleConfig) -> Result<usize> {
    let mut accumulator = FindingAccumulator::default();
    let mut window = ScanWindow::default();
    let mut widened = 0;

    for (index, table) in doc.tables_mut().enumerate() {
        if !scan_table(table, &mut accumulator, &mut window) {
            continue;
        }
        log::debug!(
            "Table {}: widening with severity {:?}, CVSS {:?}, CVE {:?}",
            index,
            accumulator.severity,
            accumulator.cvss_score,
            accumulator.cve_numbers
        );
        widen_table(table, index, &accumulator, style)?;
        accumulator.reset();
        widened += 1;
    }

    for (index, table) in doc.tables_mut().enumerate() {
        if is_ip_address_table(table) {
            log::debug!("Table {}: dropping original columns", index);
            for column in REDUNDANT_COLUMNS {
                table.delete_column(column);
            }
            table.set_right_to_left();
        }
    }

    Ok(widened)
}

/// Walk a table's runs, feeding the accumulator. Returns true when a run
/// starting with "IP Address" marks the table as a component table; the
/// walk stops there.
fn scan_table(table: &Table, accumulator: &mut FindingAccumulator, window: &mut ScanWindow) -> bool {
    for cell in table.cells() {
        for paragraph in cell.paragraphs() {
            if window.previous_paragraph == "References" {
                window.references = harvest_cve_numbers(paragraph);
            }
            for run in paragraph.runs() {
                let text = run.text();
                accumulator.observe_run(&window.previous_run, &text, &window.references);
                if text.starts_with(IP_ADDRESS_LABEL) {
                    return true;
                }
                window.previous_run = text;
            }
            window.previous_paragraph = paragraph.text();
        }
    }
    false
}

/// CVE identifiers linked from a references paragraph, joined with ", ".
pub fn harvest_cve_numbers(paragraph: &Paragraph) -> String {
    let numbers: Vec<String> = paragraph
        .hyperlinks()
        .filter(|link| link.text().starts_with('C'))
        .flat_map(|link| link.runs().map(|run| run.text()).collect::<Vec<_>>())
        .filter(|text| text.starts_with("CVE"))
        .collect();

    if numbers.is_empty() {
        NO_CVE.to_string()
    } else {
        numbers.join(", ")
    }
}

/// Text before the first space.
pub fn cvss_prefix(text: &str) -> &str {
    text.split(' ').next().unwrap_or(text)
}

fn widen_table(
    table: &mut Table,
    index: usize,
    finding: &FindingAccumulator,
    style: &StyleConfig,
) -> Result<()> {
    check_shape(table, index)?;

    let instance = table.cell(1, 2).map(|c| c.text()).unwrap_or_default();
    if !instance.is_empty() {
        if let Some(cell) = table.cell_mut(1, 1) {
            cell.append_text(&format!("/{}", instance));
        }
    }

    let header_first = table.rows[0].cells.len();
    let values_first = table.rows[1].cells.len();
    let width = table.last_column_width();
    for _ in 0..NEW_COLUMN_HEADERS.len() {
        table.append_column(width);
    }

    for (offset, header) in NEW_COLUMN_HEADERS.iter().enumerate() {
        if let Some(cell) = table.cell_mut(0, header_first + offset) {
            cell.set_text(header);
        }
    }
    let values = [&finding.cvss_score, &finding.cve_numbers, &finding.severity];
    for (offset, value) in values.into_iter().enumerate() {
        if let Some(cell) = table.cell_mut(1, values_first + offset) {
            cell.set_text(value);
        }
    }

    for row in &mut table.rows {
        let len = row.cells.len() as isize;
        for (target, source) in COLUMN_COPIES {
            let target = resolve(target, len);
            let source = resolve(source, len);
            let content = row.cells[source].content.clone();
            let cell = &mut row.cells[target];
            cell.content = content;
            for run in cell.runs_mut() {
                run.set_font_size(style.table_content_font_size);
            }
        }
    }
    Ok(())
}

fn resolve(index: isize, len: isize) -> usize {
    if index < 0 {
        (len + index) as usize
    } else {
        index as usize
    }
}

fn check_shape(table: &Table, index: usize) -> Result<()> {
    if table.rows.len() < 2 {
        return Err(Error::TableShape {
            table: index,
            rows: table.rows.len(),
            row: table.rows.len(),
            cells: 0,
        });
    }
    if let Some((row, short)) = table
        .rows
        .iter()
        .enumerate()
        .find(|(_, r)| r.cells.len() < MIN_ROW_CELLS)
    {
        return Err(Error::TableShape {
            table: index,
            rows: table.rows.len(),
            row,
            cells: short.cells.len(),
        });
    }
    Ok(())
}
