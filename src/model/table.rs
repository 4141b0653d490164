//! Table types.

use super::properties::{
    Border, BorderSide, Rgb, TBLPR_ORDER, TCBORDERS_ORDER, TCPR_ORDER, W_TBLPR, W_TCPR, W_VAL,
};
use super::{Block, Paragraph, Run};
use crate::xml::Element;

/// Width given to appended columns when the grid carries no widths (twips).
pub const DEFAULT_COLUMN_WIDTH: u32 = 1440;

/// A table (`w:tbl`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    /// Table properties (`w:tblPr`), kept verbatim
    pub properties: Option<Element>,

    /// Column grid widths in twips (`w:tblGrid`)
    pub grid: Vec<Option<u32>>,

    /// Rows in the table
    pub rows: Vec<TableRow>,

    /// Trailing markup between or after rows (bookmarks, custom XML)
    pub trailing: Vec<Element>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from rows of text, one grid column per cell of the
    /// first row.
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        table.properties = Some(Self::default_properties());
        for row in rows {
            table.add_row(TableRow::from_strings(row));
        }
        table.grid = vec![Some(DEFAULT_COLUMN_WIDTH); table.column_count()];
        table
    }

    /// Minimal `w:tblPr`: automatic table width.
    pub(crate) fn default_properties() -> Element {
        Element::new(W_TBLPR).with_child(
            Element::new("w:tblW")
                .with_attr("w:w", "0")
                .with_attr("w:type", "auto"),
        )
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns: grid width, or the first row's cell count when
    /// the table carries no grid.
    pub fn column_count(&self) -> usize {
        if self.grid.is_empty() {
            self.rows.first().map(|r| r.cells.len()).unwrap_or(0)
        } else {
            self.grid.len()
        }
    }

    /// Get a cell by row and column index.
    pub fn cell(&self, row: usize, column: usize) -> Option<&TableCell> {
        self.rows.get(row).and_then(|r| r.cells.get(column))
    }

    /// Get a cell by row and column index, mutably.
    pub fn cell_mut(&mut self, row: usize, column: usize) -> Option<&mut TableCell> {
        self.rows.get_mut(row).and_then(|r| r.cells.get_mut(column))
    }

    /// Iterate over every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = &TableCell> {
        self.rows.iter().flat_map(|r| r.cells.iter())
    }

    /// Iterate mutably over every cell, row by row.
    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut TableCell> {
        self.rows.iter_mut().flat_map(|r| r.cells.iter_mut())
    }

    /// Append a column: one grid entry and one empty cell per row.
    pub fn append_column(&mut self, width: u32) {
        self.grid.push(Some(width));
        for row in &mut self.rows {
            row.cells.push(TableCell::with_width(width));
        }
    }

    /// Width of the last grid column, used for appended columns.
    pub fn last_column_width(&self) -> u32 {
        self.grid
            .iter()
            .rev()
            .find_map(|w| *w)
            .unwrap_or(DEFAULT_COLUMN_WIDTH)
    }

    /// Delete a column: the cell at `index` in every row and its grid entry.
    ///
    /// Rows shorter than `index` are left untouched.
    pub fn delete_column(&mut self, index: usize) {
        for row in &mut self.rows {
            if index < row.cells.len() {
                row.cells.remove(index);
            }
        }
        if index < self.grid.len() {
            self.grid.remove(index);
        }
    }

    /// Lay the table out right-to-left (`w:bidiVisual`).
    pub fn set_right_to_left(&mut self) {
        self.properties
            .get_or_insert_with(|| Element::new(W_TBLPR))
            .set_child_ordered(Element::new("w:bidiVisual"), TBLPR_ORDER);
    }

    /// Check if the table is laid out right-to-left.
    pub fn is_right_to_left(&self) -> bool {
        self.properties
            .as_ref()
            .and_then(|p| p.child("w:bidiVisual"))
            .is_some_and(|b| !matches!(b.attr(W_VAL), Some("0") | Some("false")))
    }

    /// Plain text of the first paragraph of the first cell.
    pub fn first_cell_text(&self) -> Option<String> {
        self.cell(0, 0)
            .and_then(|c| c.paragraphs().next())
            .map(Paragraph::text)
    }

    /// Texts of the cells in the first row.
    pub fn header_texts(&self) -> Vec<String> {
        self.rows
            .first()
            .map(|r| r.cells.iter().map(TableCell::text).collect())
            .unwrap_or_default()
    }
}

/// A table row (`w:tr`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableRow {
    /// Row-level property exceptions (`w:tblPrEx`)
    pub exceptions: Option<Element>,

    /// Row properties (`w:trPr`)
    pub properties: Option<Element>,

    /// Cells in the row
    pub cells: Vec<TableCell>,

    /// Other row children, written after the cells
    pub trailing: Vec<Element>,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            ..Self::default()
        }
    }

    /// Create a row from text values.
    pub fn from_strings<S: AsRef<str>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(
            values
                .into_iter()
                .map(|v| TableCell::with_text(v.as_ref()))
                .collect(),
        )
    }
}

/// A table cell (`w:tc`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableCell {
    /// Cell properties (`w:tcPr`), kept in schema order
    pub properties: Option<Element>,

    /// Block content: paragraphs and nested tables
    pub content: Vec<Block>,
}

impl TableCell {
    /// Create a cell holding one paragraph of text.
    pub fn with_text(text: &str) -> Self {
        Self {
            properties: None,
            content: vec![Block::Paragraph(Paragraph::with_text(text))],
        }
    }

    /// Create an empty cell of the given width (twips).
    pub fn with_width(width: u32) -> Self {
        let mut properties = Element::new(W_TCPR);
        properties.set_child_ordered(
            Element::new("w:tcW")
                .with_attr("w:w", width.to_string())
                .with_attr("w:type", "dxa"),
            TCPR_ORDER,
        );
        Self {
            properties: Some(properties),
            content: vec![Block::Paragraph(Paragraph::new())],
        }
    }

    /// Paragraphs directly inside the cell.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.content.iter().filter_map(|block| match block {
            Block::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    /// Paragraphs directly inside the cell, mutably.
    pub fn paragraphs_mut(&mut self) -> impl Iterator<Item = &mut Paragraph> {
        self.content.iter_mut().filter_map(|block| match block {
            Block::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    /// Runs of every paragraph directly inside the cell.
    pub fn runs_mut(&mut self) -> Vec<&mut Run> {
        self.paragraphs_mut().flat_map(|p| p.runs_mut()).collect()
    }

    /// Cell text: paragraph texts joined by newlines.
    pub fn text(&self) -> String {
        self.paragraphs()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Replace the cell content with one paragraph holding `text`.
    pub fn set_text(&mut self, text: &str) {
        self.content = vec![Block::Paragraph(Paragraph::with_text(text))];
    }

    /// Append text to the last run of the last paragraph, keeping its
    /// formatting.
    pub fn append_text(&mut self, text: &str) {
        if !self.content.iter().any(|b| matches!(b, Block::Paragraph(_))) {
            self.content.push(Block::Paragraph(Paragraph::new()));
        }
        let Some(paragraph) = self.content.iter_mut().rev().find_map(|block| match block {
            Block::Paragraph(p) => Some(p),
            _ => None,
        }) else {
            return;
        };
        let last = paragraph.runs_mut().pop();
        match last {
            Some(run) => {
                let combined = format!("{}{}", run.text(), text);
                run.set_text(&combined);
            }
            None => paragraph.add_run(Run::new(text)),
        }
    }

    /// Set a solid background fill (`w:shd`).
    pub fn set_shading(&mut self, fill: Rgb) {
        self.properties_mut().set_child_ordered(
            Element::new("w:shd")
                .with_attr(W_VAL, "clear")
                .with_attr("w:color", "auto")
                .with_attr("w:fill", fill.hex()),
            TCPR_ORDER,
        );
    }

    /// Background fill, if any.
    pub fn shading(&self) -> Option<Rgb> {
        self.properties
            .as_ref()
            .and_then(|p| p.child("w:shd"))
            .and_then(|s| s.attr("w:fill"))
            .and_then(Rgb::from_hex)
    }

    /// Replace the cell borders (`w:tcBorders`).
    pub fn set_borders(&mut self, borders: &[(BorderSide, Border)]) {
        let mut element = Element::new("w:tcBorders");
        for &(side, border) in borders {
            let side_element = match border {
                Border::Nil => Element::new(side.element_name()).with_attr(W_VAL, "nil"),
                Border::Single { size, color } => Element::new(side.element_name())
                    .with_attr(W_VAL, "single")
                    .with_attr("w:sz", size.to_string())
                    .with_attr("w:color", color.hex()),
            };
            element.set_child_ordered(side_element, TCBORDERS_ORDER);
        }
        self.properties_mut()
            .set_child_ordered(element, TCPR_ORDER);
    }

    /// Border drawn on one side, if the cell declares one.
    pub fn border(&self, side: BorderSide) -> Option<Border> {
        let element = self
            .properties
            .as_ref()?
            .child("w:tcBorders")?
            .child(side.element_name())?;
        match element.attr(W_VAL) {
            Some("nil") | Some("none") => Some(Border::Nil),
            _ => Some(Border::Single {
                size: element.attr("w:sz").and_then(|v| v.parse().ok()).unwrap_or(4),
                color: element
                    .attr("w:color")
                    .and_then(Rgb::from_hex)
                    .unwrap_or(Rgb::BLACK),
            }),
        }
    }

    fn properties_mut(&mut self) -> &mut Element {
        self.properties.get_or_insert_with(|| Element::new(W_TCPR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_rows([["A", "B", "C"], ["1", "2", "3"]])
    }

    #[test]
    fn test_table_shape() {
        let table = sample();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.header_texts(), ["A", "B", "C"]);
        assert_eq!(table.first_cell_text().as_deref(), Some("A"));
    }

    #[test]
    fn test_append_and_delete_column() {
        let mut table = sample();
        table.append_column(900);
        assert_eq!(table.column_count(), 4);
        assert_eq!(table.rows[1].cells.len(), 4);
        assert_eq!(table.cell(1, 3).unwrap().text(), "");

        table.delete_column(0);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.header_texts(), ["B", "C", ""]);
        assert_eq!(table.grid.last(), Some(&Some(900)));
    }

    #[test]
    fn test_right_to_left() {
        let mut table = sample();
        assert!(!table.is_right_to_left());
        table.set_right_to_left();
        assert!(table.is_right_to_left());
    }

    #[test]
    fn test_cell_text_and_append() {
        let mut cell = TableCell::with_text("443");
        cell.append_text("/tcp");
        assert_eq!(cell.text(), "443/tcp");

        let mut empty = TableCell::default();
        empty.append_text("x");
        assert_eq!(empty.text(), "x");
    }

    #[test]
    fn test_cell_shading_and_borders() {
        let mut cell = TableCell::with_width(100);
        cell.set_borders(&[
            (BorderSide::Right, Border::Nil),
            (
                BorderSide::Top,
                Border::Single {
                    size: 12,
                    color: Rgb(0x4F, 0x2D, 0x7F),
                },
            ),
        ]);
        cell.set_shading(Rgb::WHITE);

        assert_eq!(cell.shading(), Some(Rgb::WHITE));
        assert_eq!(cell.border(BorderSide::Right), Some(Border::Nil));
        assert_eq!(
            cell.border(BorderSide::Top),
            Some(Border::Single {
                size: 12,
                color: Rgb(0x4F, 0x2D, 0x7F)
            })
        );
        assert_eq!(cell.border(BorderSide::Left), None);

        let names: Vec<_> = cell
            .properties
            .as_ref()
            .unwrap()
            .elements()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, ["w:tcW", "w:tcBorders", "w:shd"]);
    }
}
