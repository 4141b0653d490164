//! Copying per-finding values down restructured component tables.

use super::classify::is_component_header;
use crate::model::Document;

/// Columns holding CVSS score, CVE numbers and severity after
/// restructuring.
const FINDING_COLUMNS: [usize; 3] = [2, 3, 4];

/// Fill the finding columns of every data row from the first data row, in
/// tables whose last header reads "Component". Returns how many tables
/// were filled.
pub fn propagate_cell_text(doc: &mut Document) -> usize {
    let mut filled = 0;
    for table in doc.tables_mut() {
        if !is_component_header(table) {
            continue;
        }

        let values: Vec<(usize, String)> = FINDING_COLUMNS
            .iter()
            .filter_map(|&column| table.cell(1, column).map(|cell| (column, cell.text())))
            .collect();

        for row in table.rows.iter_mut().skip(2) {
            for (column, value) in &values {
                if let Some(cell) = row.cells.get_mut(*column) {
                    cell.set_text(value);
                }
            }
        }
        filled += 1;
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Table;

    #[test]
    fn test_values_copied_to_later_rows() {
        let mut doc = Document::new();
        doc.add_table(Table::from_rows([
            vec!["Port", "x", "CVSS Score", "CVE Number", "Severity Level", "Component"],
            vec!["443", "a", "7.5", "CVE-2021-1234", "High", "10.0.0.5"],
            vec!["80", "b", "", "", "", "10.0.0.6"],
            vec!["22", "c"],
        ]));

        assert_eq!(propagate_cell_text(&mut doc), 1);

        let table = doc.table(0).unwrap();
        assert_eq!(table.cell(2, 2).unwrap().text(), "7.5");
        assert_eq!(table.cell(2, 3).unwrap().text(), "CVE-2021-1234");
        assert_eq!(table.cell(2, 4).unwrap().text(), "High");
        assert_eq!(table.cell(2, 5).unwrap().text(), "10.0.0.6");
        assert_eq!(table.rows[3].cells.len(), 2);
    }

    #[test]
    fn test_other_tables_untouched() {
        let mut doc = Document::new();
        doc.add_table(Table::from_rows([["a", "b", "c"], ["1", "2", "3"], ["4", "5", "6"]]));

        assert_eq!(propagate_cell_text(&mut doc), 0);
        assert_eq!(doc.table(0).unwrap().cell(2, 2).unwrap().text(), "6");
    }
}
