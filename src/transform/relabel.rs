//! Header relabeling, header shading and cell borders.

use super::classify::is_customer_table;
use super::labels;
use crate::config::{DocumentKind, StyleConfig};
use crate::model::{Border, BorderSide, Document, Rgb, Table};

/// Thick border width, in eighths of a point.
const ACCENT_BORDER_SIZE: u32 = 12;

/// Thin border width, in eighths of a point.
const PLAIN_BORDER_SIZE: u32 = 5;

/// Shade and relabel every table header, then redraw every cell border.
///
/// Returns the number of relabeled header runs.
pub fn relabel_tables(doc: &mut Document, kind: DocumentKind, style: &StyleConfig) -> usize {
    let mut hits = 0;
    for (index, table) in doc.tables_mut().enumerate() {
        let recolor = !(kind.is_detail() && index == 2);
        hits += relabel_header(table, kind, style, recolor);

        let nil = nil_sides(index, kind);
        let special = is_customer_table(table);
        log::debug!(
            "Table {}: nil borders {:?}, customer details: {}",
            index,
            nil,
            special
        );
        draw_borders(table, &nil, special, style);
    }
    hits
}

fn relabel_header(table: &mut Table, kind: DocumentKind, style: &StyleConfig, recolor: bool) -> usize {
    let Some(header) = table.rows.first_mut() else {
        return 0;
    };

    let mut hits = 0;
    for cell in &mut header.cells {
        cell.set_shading(style.table_header_color);
        for run in cell.runs_mut() {
            let Some(label) = labels::relabel(kind, &run.text()) else {
                continue;
            };
            run.set_text(label);
            if recolor {
                if let Some(color) = style.default_color {
                    run.set_color(color);
                }
            }
            hits += 1;
        }
    }
    hits
}

/// Sides drawn without a line for the table at `index`.
pub fn nil_sides(index: usize, kind: DocumentKind) -> Vec<BorderSide> {
    let mut sides = vec![BorderSide::Left, BorderSide::Right, BorderSide::Top];
    if index == 1 && !kind.is_detail() {
        sides.push(BorderSide::Bottom);
    }
    sides
}

/// Redraw every cell's borders. The first `column_count` cells get the
/// thick accent line on their remaining sides; the others get a thin line,
/// white on customer detail tables.
pub fn draw_borders(table: &mut Table, nil: &[BorderSide], special: bool, style: &StyleConfig) {
    let columns = table.column_count();
    let plain_color = if special { Rgb::WHITE } else { style.border_color };

    for (position, cell) in table.cells_mut().enumerate() {
        let line = if position < columns {
            Border::Single {
                size: ACCENT_BORDER_SIZE,
                color: style.border_accent_color,
            }
        } else {
            Border::Single {
                size: PLAIN_BORDER_SIZE,
                color: plain_color,
            }
        };
        let borders: Vec<_> = BorderSide::ALL
            .iter()
            .map(|&side| {
                if nil.contains(&side) {
                    (side, Border::Nil)
                } else {
                    (side, line)
                }
            })
            .collect();
        cell.set_borders(&borders);
    }
}
