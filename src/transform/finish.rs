//! Final uniform table styling and page setup.

use crate::config::StyleConfig;
use crate::model::{Block, Document};
use crate::xml::Element;

/// `w:sectPr` children in schema order, up to the page margins.
const SECTPR_ORDER: &[&str] = &[
    "w:headerReference",
    "w:footerReference",
    "w:footnotePr",
    "w:endnotePr",
    "w:type",
    "w:pgSz",
    "w:pgMar",
];

/// Twips per point.
const TWIPS_PER_POINT: f32 = 20.0;

/// Give every cell of every table the background color and every table run
/// the content font size and font name. Overrides earlier passes, so it must
/// run after them.
pub fn apply_table_style(doc: &mut Document, style: &StyleConfig) {
    for table in doc.tables_mut() {
        for cell in table.cells_mut() {
            cell.set_shading(style.table_background_color);
            for run in cell.runs_mut() {
                run.set_font_size(style.table_content_font_size);
                run.set_font_name(&style.font_name);
            }
        }
    }
}

/// Set the page size of every section. A body without section properties
/// gets one.
pub fn apply_page_size(doc: &mut Document, style: &StyleConfig) {
    let width = to_twips(style.page_width);
    let height = to_twips(style.page_height);

    if doc.section_properties_mut().is_empty() {
        doc.add_block(Block::Other(Element::new("w:sectPr")));
    }
    for section in doc.section_properties_mut() {
        let size = section.ensure_child("w:pgSz", SECTPR_ORDER);
        size.set_attr("w:w", width.to_string());
        size.set_attr("w:h", height.to_string());
    }
}

fn to_twips(points: f32) -> u32 {
    (points * TWIPS_PER_POINT).round().max(0.0) as u32
}
